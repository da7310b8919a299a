pub mod engine_set;
pub mod ports;
pub mod render_controller;
pub mod render_error;
