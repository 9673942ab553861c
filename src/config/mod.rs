//! Configuration module.
//!
//! Resolution order: defaults, then the TOML config file, then `NOTEFEED_*` environment
//! variables, then command-line flags.

pub mod loader;

pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, ConfigError, ConfigFile,
    ResolvedConfig,
};
