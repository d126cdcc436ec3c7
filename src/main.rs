//! # Voxel Core Entry Point
//!
//! Runs the scripted headless session from the library.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- [config.json]
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    voxel_core::init_logger();
    log::info!("Logger initialized");

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    match voxel_core::run(config_path.as_deref()) {
        Ok(report) => {
            log::info!(
                "Drew {} chunks ({} indices) after {} frames",
                report.chunks_drawn,
                report.indices_drawn,
                report.frames
            );
            ExitCode::SUCCESS
        }
        Err(error) => {
            log::error!("{}", error);
            ExitCode::FAILURE
        }
    }
}
