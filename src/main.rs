use std::path::PathBuf;

use clap::Parser;
use flatrast::prelude::*;

/// Flat-shaded software viewer for triangle models.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Model file: a light direction line, then one triangle per line.
    model: PathBuf,

    #[arg(long, default_value_t = 600)]
    width: u32,

    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Ambient light as R,G,B.
    #[arg(long, value_parser = parse_color, default_value = "128,128,128")]
    ambient: Color,

    /// Direct light as R,G,B.
    #[arg(long, value_parser = parse_color, default_value = "128,128,128")]
    light: Color,

    /// Initial rotation about the X axis in radians.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    rotate_x: f32,

    /// Initial rotation about the Y axis in radians.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    rotate_y: f32,

    #[arg(long, default_value_t = 1.0)]
    zoom: f32,

    /// Render one frame to this PNG file and exit.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

fn parse_color(text: &str) -> Result<Color, String> {
    let channels: Vec<&str> = text.split(',').map(str::trim).collect();
    let [r, g, b] = channels.as_slice() else {
        return Err(format!("expected R,G,B, got {text:?}"));
    };
    let channel = |s: &str| s.parse::<u8>().map_err(|e| format!("{s:?}: {e}"));
    Ok(Color::new(channel(r)?, channel(g)?, channel(b)?))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = ViewerConfig {
        canvas: Canvas::new(args.width, args.height),
        ambient: args.ambient,
        light: args.light,
        ..ViewerConfig::default()
    };
    config.validate()?;

    let mut engine = Engine::new(config);
    engine.load_file(&args.model)?;
    {
        let view = engine.view_mut();
        view.rotation_x = args.rotate_x;
        view.rotation_y = args.rotate_y;
        view.zoom = config.clamp_zoom(args.zoom);
    }

    match args.output {
        Some(path) => {
            let frame = engine.render()?;
            frame.framebuffer.save_png(&path)?;
            log::info!(
                "wrote {} ({} polygons drawn, {} culled)",
                path.display(),
                frame.stats.drawn,
                frame.stats.culled
            );
            Ok(())
        }
        None => run_interactive(engine),
    }
}

#[cfg(feature = "window")]
fn run_interactive(mut engine: Engine) -> Result<(), Box<dyn std::error::Error>> {
    let canvas = engine.canvas();
    let mut window = Window::new("flatrast", canvas.width, canvas.height, engine.config().light_step)?;
    let mut frame_limiter = FrameLimiter::new(&window);

    'running: loop {
        for event in window.poll_events() {
            match event {
                WindowEvent::Quit => break 'running,
                WindowEvent::Resize(w, h) => {
                    window.resize(w, h)?;
                    engine.resize(Canvas::new(w, h))?;
                }
                WindowEvent::Command(command) => engine.apply(command),
            }
        }

        let frame = engine.render()?;
        window.present(&frame.framebuffer)?;
        frame_limiter.wait_and_get_delta(&window);
    }

    Ok(())
}

#[cfg(not(feature = "window"))]
fn run_interactive(_engine: Engine) -> Result<(), Box<dyn std::error::Error>> {
    Err("built without the `window` feature; pass --output <file.png> to render headless".into())
}
