mod loader;
mod types;

pub use loader::{load_config, load_config_from_file, resolve_config_path, CONFIG_FILE_NAME, CONFIG_PATH_ENV, ENV_PREFIX};
pub use types::*;
