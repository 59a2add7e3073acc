//! Turn validation, move application, and win evaluation.
//!
//! Every function here is pure with respect to its `Game` input: a valid
//! move clones the game, applies the mark, settles the terminal state, and
//! returns the new value. Invalid moves return a `MoveError`, which the
//! session layer reports as a structured failure rather than raising.

use thiserror::Error;

use crate::models::{Game, Mark, PlayerRecord, Turn, Winner};

/// Recoverable move failures; rendered into `MoveResult::message`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("the game is already complete")]
    GameComplete,

    #[error("it is not the user's turn")]
    NotUserTurn,

    #[error("it is not the opponent's turn")]
    NotOpponentTurn,

    #[error("({row}, {col}) is not a playable cell")]
    NotInterior { row: usize, col: usize },

    #[error("cell ({row}, {col}) is already marked")]
    AlreadyMarked { row: usize, col: usize },

    #[error("cell ({row}, {col}) has no player to mark")]
    EmptyCell { row: usize, col: usize },

    #[error("{name} does not satisfy the cell's categories")]
    CategoryMismatch { name: String },

    #[error("no player found matching '{guess}'")]
    UnknownPlayer { guess: String },
}

/// The three interior rows, three interior columns, and two diagonals
const LINES: [[(usize, usize); 3]; 8] = [
    [(1, 1), (1, 2), (1, 3)],
    [(2, 1), (2, 2), (2, 3)],
    [(3, 1), (3, 2), (3, 3)],
    [(1, 1), (2, 1), (3, 1)],
    [(1, 2), (2, 2), (3, 2)],
    [(1, 3), (2, 3), (3, 3)],
    [(1, 1), (2, 2), (3, 3)],
    [(1, 3), (2, 2), (3, 1)],
];

/// Evaluate the terminal condition by marks alone: three in a line wins, a
/// fully marked interior with no line is a draw.
pub fn evaluate_winner(game: &Game) -> Option<Winner> {
    for line in &LINES {
        let marks: Vec<Option<Mark>> = line.iter().map(|&(r, c)| game.mark_at(r, c)).collect();
        match (marks[0], marks[1], marks[2]) {
            (Some(Mark::User), Some(Mark::User), Some(Mark::User)) => return Some(Winner::User),
            (Some(Mark::Opponent), Some(Mark::Opponent), Some(Mark::Opponent)) => {
                return Some(Winner::Opponent)
            }
            _ => {}
        }
    }
    if game.unmarked_cells().is_empty() {
        return Some(Winner::Draw);
    }
    None
}

/// Would marking `(row, col)` with `mark` complete a line?
pub fn completes_line(game: &Game, row: usize, col: usize, mark: Mark) -> bool {
    LINES
        .iter()
        .filter(|line| line.contains(&(row, col)))
        .any(|line| {
            line.iter()
                .filter(|&&cell| cell != (row, col))
                .all(|&(r, c)| game.mark_at(r, c) == Some(mark))
        })
}

fn check_user_cell(game: &Game, row: usize, col: usize) -> Result<(), MoveError> {
    if game.is_complete {
        return Err(MoveError::GameComplete);
    }
    if game.turn != Turn::User {
        return Err(MoveError::NotUserTurn);
    }
    if !Game::is_interior(row, col) {
        return Err(MoveError::NotInterior { row, col });
    }
    if game.mark_at(row, col).is_some() {
        return Err(MoveError::AlreadyMarked { row, col });
    }
    Ok(())
}

/// Apply the mark and settle the game: evaluate the winner, flip the turn on
/// a non-terminal board.
fn settle(game: &mut Game, next_turn: Turn) {
    if let Some(winner) = evaluate_winner(game) {
        game.winner = Some(winner);
        game.is_complete = true;
    } else {
        game.turn = next_turn;
    }
}

/// Mark a preset cell for the user.
pub fn place_user_mark(game: &Game, row: usize, col: usize) -> Result<Game, MoveError> {
    check_user_cell(game, row, col)?;
    let occupant = game
        .player_at(row, col)
        .ok_or(MoveError::EmptyCell { row, col })?;
    if !game.satisfies_cell(row, col, occupant) {
        return Err(MoveError::CategoryMismatch {
            name: occupant.name.clone(),
        });
    }

    let mut next = game.clone();
    next.set_mark(row, col, Mark::User);
    settle(&mut next, Turn::Opponent);
    Ok(next)
}

/// Replace a cell's occupant with a resolved guess and mark it for the user.
/// The preset occupant is irrelevant; only the guessed record must satisfy
/// both axis categories.
pub fn place_guess(
    game: &Game,
    row: usize,
    col: usize,
    record: &PlayerRecord,
) -> Result<Game, MoveError> {
    check_user_cell(game, row, col)?;
    if !game.satisfies_cell(row, col, record) {
        return Err(MoveError::CategoryMismatch {
            name: record.name.clone(),
        });
    }

    let mut next = game.clone();
    next.set_player(row, col, record.clone());
    next.set_mark(row, col, Mark::User);
    settle(&mut next, Turn::Opponent);
    Ok(next)
}

/// Hand the turn to the opponent without marking anything.
pub fn skip_turn(game: &Game) -> Result<Game, MoveError> {
    if game.is_complete {
        return Err(MoveError::GameComplete);
    }
    if game.turn != Turn::User {
        return Err(MoveError::NotUserTurn);
    }
    let mut next = game.clone();
    next.turn = Turn::Opponent;
    Ok(next)
}

/// Mark `cell` for the opponent, or declare a draw when no cell remains.
pub fn place_opponent_mark(
    game: &Game,
    cell: Option<(usize, usize)>,
) -> Result<Game, MoveError> {
    if game.is_complete {
        return Err(MoveError::GameComplete);
    }
    if game.turn != Turn::Opponent {
        return Err(MoveError::NotOpponentTurn);
    }

    let mut next = game.clone();
    match cell {
        Some((row, col)) => {
            if !Game::is_interior(row, col) {
                return Err(MoveError::NotInterior { row, col });
            }
            if game.mark_at(row, col).is_some() {
                return Err(MoveError::AlreadyMarked { row, col });
            }
            next.set_mark(row, col, Mark::Opponent);
            settle(&mut next, Turn::User);
        }
        None => {
            // Board exhausted with no line
            next.winner = Some(Winner::Draw);
            next.is_complete = true;
        }
    }
    Ok(next)
}
