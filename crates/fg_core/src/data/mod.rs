pub mod dataset;
pub mod player_cache;

pub use dataset::{PlayerDataset, SearchFilter};
pub use player_cache::{get_dataset, load_dataset_from_path, DatasetIndex};
