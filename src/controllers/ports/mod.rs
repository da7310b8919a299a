pub mod file_presenter;
pub mod telemetry_sink;
pub mod video_encoder;
