//! File persistence: the tuning file and the best score

pub mod best_score;
pub mod config_file;

pub use best_score::{offer_save, SaveDecision};
pub use config_file::{load_or_create, LoadedConfig};
