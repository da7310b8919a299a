pub mod calculation_information;
pub mod colour;
pub mod complex;
pub mod iteration_grid;
pub mod kernel_input;
pub mod pixel_buffer;
pub mod point;
pub mod render_params;
pub mod resolution;
pub mod viewport;
