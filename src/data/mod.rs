pub mod ability;
pub mod catalog;
pub mod registry;
pub mod send;
pub mod tower;
pub mod unit;
pub mod validate;
pub mod wave;

pub use ability::{load_abilities, Ability, ABILITIES_FILE};
pub use catalog::{load_catalog, Catalog, DataError};
pub use registry::{default_data_dir, GameData, DATA_DIR_ENV, DEFAULT_DATA_DIR};
pub use send::{load_sends, Send, SENDS_FILE};
pub use tower::{load_towers, Tower, TOWERS_FILE};
pub use unit::{Unit, Weapon};
pub use wave::{load_waves, Wave, WAVES_FILE};
