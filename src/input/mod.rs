//! Input adapters for mandelbaker.
//!
//! Adapters here receive requests from the outside world and translate
//! them into render parameters for the controllers.

pub mod cli;
