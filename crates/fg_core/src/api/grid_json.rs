//! JSON API over a `GameSession`.
//!
//! String-in/string-out wrappers consumed by the transport layer: requests
//! are serde DTOs, responses embed the full `Game` value so hosts can
//! persist it as-is and feed it back into the next call. Failures come back
//! as `success: false` with a coded message; nothing here panics on bad
//! input.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::engine::{GameSession, MoveResult, SelectionOutcome};
use crate::models::{CategoryType, Difficulty, Game};

pub mod error_codes {
    pub const INVALID_REQUEST: &str = "E_INVALID_REQUEST";
    pub const INVALID_DIFFICULTY: &str = "E_INVALID_DIFFICULTY";
    pub const INVALID_CATEGORY: &str = "E_INVALID_CATEGORY";
    pub const GENERATION_FAILED: &str = "E_GENERATION_FAILED";
}

fn err_code(code: &str, message: impl std::fmt::Display) -> String {
    format!("{code}: {message}")
}

#[derive(Debug, Deserialize)]
pub struct GenerateGameRequest {
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub force_reset: bool,
}

#[derive(Debug, Serialize)]
pub struct GenerateGameResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game: Option<Game>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<SelectionOutcome>,
    pub degraded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerateGameResponse {
    fn failure(error: String) -> Self {
        Self {
            success: false,
            game: None,
            selection: None,
            degraded: false,
            error: Some(error),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MarkRequest {
    pub game: Game,
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Deserialize)]
pub struct GuessRequest {
    pub game: Game,
    pub row: usize,
    pub col: usize,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct GameOnlyRequest {
    pub game: Game,
}

#[derive(Debug, Serialize)]
pub struct MoveResponse {
    pub success: bool,
    pub game: Game,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<MoveResult> for MoveResponse {
    fn from(result: MoveResult) -> Self {
        Self {
            success: result.success,
            game: result.game,
            message: result.message,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CategoryOptionsRequest {
    pub category: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub players: Vec<crate::models::PlayerRecord>,
}

#[derive(Debug, Serialize)]
pub struct CategoryOptionsResponse {
    pub success: bool,
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

fn error_json(code: &str, message: impl std::fmt::Display) -> String {
    let response = ErrorResponse {
        success: false,
        error: err_code(code, message),
    };
    serde_json::to_string(&response).unwrap_or_else(|_| {
        format!("{{\"success\":false,\"error\":\"{code}\"}}")
    })
}

fn to_json<T: Serialize>(response: &T) -> String {
    serde_json::to_string(response)
        .unwrap_or_else(|e| error_json(error_codes::INVALID_REQUEST, e))
}

/// Generate a new game. Request: `{"difficulty"?: "easy|medium|hard",
/// "force_reset"?: bool}`.
pub fn generate_game_json(session: &mut GameSession, request_json: &str) -> String {
    let request: GenerateGameRequest = match serde_json::from_str(request_json) {
        Ok(request) => request,
        Err(e) => return error_json(error_codes::INVALID_REQUEST, e),
    };

    let difficulty = match request.difficulty.as_deref() {
        None => None,
        Some(raw) => match Difficulty::from_str(raw) {
            Some(difficulty) => Some(difficulty),
            None => {
                return error_json(
                    error_codes::INVALID_DIFFICULTY,
                    format!("unknown difficulty '{raw}'"),
                )
            }
        },
    };

    match session.generate_game(difficulty, request.force_reset) {
        Ok(generated) => {
            debug!(game_id = %generated.game.id, "generated game");
            to_json(&GenerateGameResponse {
                success: true,
                game: Some(generated.game),
                selection: Some(generated.selection),
                degraded: generated.degraded,
                error: None,
            })
        }
        Err(e) => {
            warn!(error = %e, "generation failed");
            to_json(&GenerateGameResponse::failure(err_code(
                error_codes::GENERATION_FAILED,
                e,
            )))
        }
    }
}

/// Mark a preset cell for the user.
pub fn place_user_mark_json(session: &mut GameSession, request_json: &str) -> String {
    let request: MarkRequest = match serde_json::from_str(request_json) {
        Ok(request) => request,
        Err(e) => return error_json(error_codes::INVALID_REQUEST, e),
    };
    let result = session.place_user_mark(&request.game, request.row, request.col);
    to_json(&MoveResponse::from(result))
}

/// Resolve a free-text guess against a cell.
pub fn guess_json(session: &mut GameSession, request_json: &str) -> String {
    let request: GuessRequest = match serde_json::from_str(request_json) {
        Ok(request) => request,
        Err(e) => return error_json(error_codes::INVALID_REQUEST, e),
    };
    let result = session.guess(&request.game, request.row, request.col, &request.name);
    to_json(&MoveResponse::from(result))
}

/// Skip the user's turn; the opponent's reply is applied immediately.
pub fn skip_json(session: &mut GameSession, request_json: &str) -> String {
    let request: GameOnlyRequest = match serde_json::from_str(request_json) {
        Ok(request) => request,
        Err(e) => return error_json(error_codes::INVALID_REQUEST, e),
    };
    to_json(&MoveResponse::from(session.skip(&request.game)))
}

/// Let the opponent take its cell.
pub fn place_opponent_mark_json(session: &mut GameSession, request_json: &str) -> String {
    let request: GameOnlyRequest = match serde_json::from_str(request_json) {
        Ok(request) => request,
        Err(e) => return error_json(error_codes::INVALID_REQUEST, e),
    };
    to_json(&MoveResponse::from(session.place_opponent_mark(&request.game)))
}

/// Sorted distinct dataset values for one category.
pub fn category_options_json(session: &GameSession, request_json: &str) -> String {
    let request: CategoryOptionsRequest = match serde_json::from_str(request_json) {
        Ok(request) => request,
        Err(e) => return error_json(error_codes::INVALID_REQUEST, e),
    };
    match CategoryType::from_str(&request.category) {
        Some(category) => to_json(&CategoryOptionsResponse {
            success: true,
            options: session.category_options(category),
            error: None,
        }),
        None => error_json(
            error_codes::INVALID_CATEGORY,
            format!("unknown category '{}'", request.category),
        ),
    }
}

/// Filtered player search (case-insensitive substring per provided field,
/// AND-combined). Request: any subset of `{"name", "team", "nationality",
/// "position", "league", "shirt_number"}`.
pub fn search_players_json(session: &GameSession, request_json: &str) -> String {
    let filter: crate::data::SearchFilter = match serde_json::from_str(request_json) {
        Ok(filter) => filter,
        Err(e) => return error_json(error_codes::INVALID_REQUEST, e),
    };
    let players = session
        .dataset()
        .search(&filter)
        .into_iter()
        .cloned()
        .collect();
    to_json(&SearchResponse {
        success: true,
        players,
    })
}

/// Snapshot the difficulty progression for host-side persistence.
pub fn difficulty_state_json(session: &GameSession) -> String {
    to_json(&session.difficulty_state())
}

/// Restore a previously snapshotted difficulty progression.
pub fn restore_difficulty_state_json(session: &mut GameSession, request_json: &str) -> String {
    match serde_json::from_str(request_json) {
        Ok(state) => {
            session.restore_difficulty_state(state);
            to_json(&session.difficulty_state())
        }
        Err(e) => error_json(error_codes::INVALID_REQUEST, e),
    }
}
