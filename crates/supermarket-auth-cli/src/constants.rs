pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const CONFIG_ENV_VAR: &str = "SUPERMARKET_AUTH_CONFIG";
pub const LOG_ENV_VAR: &str = "SUPERMARKET_AUTH_LOG";
pub const BINARY_NAME: &str = env!("CARGO_BIN_NAME");
