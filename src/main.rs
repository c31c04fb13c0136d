mod app;
mod bee;
mod config;
mod debug;
mod ecs;
mod error;
mod geom;
mod hud;
mod input;
mod overlay;
mod pacing;
mod render;
mod sim;

fn main() {
    env_logger::init();
    log::info!("Bee Garden starting up");

    if let Err(e) = app::run() {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}
