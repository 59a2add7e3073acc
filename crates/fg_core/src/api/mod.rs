pub mod grid_json;

pub use grid_json::{
    category_options_json, difficulty_state_json, generate_game_json, guess_json,
    place_opponent_mark_json, place_user_mark_json, restore_difficulty_state_json,
    search_players_json, skip_json,
};
