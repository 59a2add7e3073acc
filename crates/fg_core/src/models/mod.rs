pub mod category;
pub mod game;
pub mod record;

pub use category::CategoryType;
pub use game::{
    Difficulty, Game, GameCell, GameOutcome, Mark, Turn, Winner, GRID_SIZE, INTERIOR_CELLS,
};
pub use record::{PlayerRecord, PriorityTier};
