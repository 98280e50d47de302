mod app;
mod config;
mod error;
mod frame_loop;
mod gpu;
mod raster;
mod simulation;
mod ui;

use winit::event_loop::{ControlFlow, EventLoop};

use crate::app::App;
use crate::config::FieldConfig;
use crate::error::AppError;

fn main() -> Result<(), AppError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Two Truths & Quantum Reality");

    let event_loop = EventLoop::new()?;
    // Frames are driven by redraw requests from the animation loop
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(FieldConfig::default());
    event_loop.run_app(&mut app)?;

    app.into_result()
}
