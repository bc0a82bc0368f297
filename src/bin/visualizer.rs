use anyhow::Context;
use clap::Parser;
use kiss3d::light::Light;
use kiss3d::window::Window;

use rocket_visualizer::cli::{init_logging, Args};
use rocket_visualizer::consts::{BACKGROUND_COLOR, TARGET_FPS, WINDOW_TITLE};
use rocket_visualizer::gui::Visualizer;
use rocket_visualizer::trajectory;

fn main() -> anyhow::Result<()> {
    // A missing path exits here with a usage message, before any window opens
    let args = Args::parse();
    init_logging(args.verbose);
    args.warn_about_extra();

    let records = trajectory::load(&args.path)
        .with_context(|| format!("Failed to load trajectory from {}", args.path.display()))?;

    let mut window = Window::new_with_size(WINDOW_TITLE, args.width, args.height);
    window.set_light(Light::StickToCamera);
    window.set_framerate_limit(Some(TARGET_FPS));
    let [r, g, b] = BACKGROUND_COLOR;
    window.set_background_color(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);

    let visualizer = Visualizer::new(records, &mut window);
    window.render_loop(visualizer);

    log::info!("Window closed");
    Ok(())
}
