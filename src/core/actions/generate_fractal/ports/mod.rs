pub mod escape_time_engine;
pub mod fractal_algorithm;
