pub mod repl;
pub mod setup;

pub use repl::{run_ask_mode, run_repl_mode, ReplCommand};
pub use setup::{load_config_file, setup_from_cli, setup_with_env, AppConfig, DEFAULT_CONFIG_FILE};

/// Initialize `env_logger`; `RUST_LOG` wins over the verbosity flag
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
