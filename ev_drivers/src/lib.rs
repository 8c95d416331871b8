mod shared;

pub use shared::{parse_config_from_file, Config, ConfigEvCalculator, ConfigRule};
