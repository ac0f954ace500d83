//! Program 2: a triangle with per-vertex colors, shaders loaded from
//! `shaders/triangle.vert` and `shaders/triangle.frag`.

use std::process::ExitCode;

use glow_shapes::logging::{init_logging, LoggingConfig};
use glow_shapes::{Demo, WindowConfig};

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    let demo = Demo::colored_triangle();
    match glow_shapes::run(&demo, &WindowConfig::default()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{} demo failed: {e}", demo.name);
            e.exit_code()
        }
    }
}
