pub mod adapters;
pub mod controllers;
pub mod core;
pub mod input;
pub mod presenters;
pub mod storage;

pub use controllers::engine_set::EngineSet;
pub use controllers::render_controller::RenderController;
pub use controllers::render_error::RenderError;
pub use crate::core::data::render_params::{CalculationMethod, RenderParameters};
pub use input::cli::args::CliArgs;
pub use input::cli::run_cli::RunCliCommand;
pub use presenters::file::png::PngFilePresenter;
pub use presenters::video::ffmpeg::FfmpegVideoEncoder;
pub use storage::write_calculation_information::JsonTelemetrySink;
