use clickfield_renderer::{js, Error, Scene};
use log::LevelFilter;

fn main() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    js::init_console_logger(LevelFilter::Info);

    if let Err(e) = run() {
        log::error!("unable to start scene: {e}");
    }
}

fn run() -> Result<(), Error> {
    let scene = Scene::builder("#canvas").build()?;
    scene.detach();

    Ok(())
}
