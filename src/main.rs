mod app;
mod assets;
mod audio;
mod click;
mod config;
#[cfg(not(windows))]
mod cursor;
mod ecs;
mod error;
mod pet;
mod platform;
mod render;

use config::Config;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Neko starting up");

    let result = Config::load().and_then(|config| {
        log::info!(
            "Config: speed={} scale={} quiet={} passthrough={} assets={}",
            config.speed,
            config.scale,
            config.quiet,
            config.mouse_passthrough,
            config.assets.display()
        );
        app::run(config)
    });

    if let Err(e) = result {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}
