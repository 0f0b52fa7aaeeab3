use env_logger::Env;

/// Install the global logger.
///
/// The level comes from `CACHESIM_LOG` when set, otherwise `debug` in
/// verbose mode and `warn` without it.
pub fn init(verbose: bool) {
    let env = Env::default()
        .filter_or("CACHESIM_LOG", if verbose { "debug" } else { "warn" })
        .write_style_or("CACHESIM_LOG_STYLE", "auto");
    env_logger::init_from_env(env);
}
