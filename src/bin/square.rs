//! Program 1: an orange square drawn as two indexed triangles.

use std::process::ExitCode;

use glow_shapes::logging::{init_logging, LoggingConfig};
use glow_shapes::{Demo, WindowConfig};

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    match glow_shapes::run(&Demo::indexed_square(), &WindowConfig::default()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            e.exit_code()
        }
    }
}
