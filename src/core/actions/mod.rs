pub mod adapt_viewport;
pub mod animate_zoom;
pub mod compose_matrix;
pub mod generate_fractal;
pub mod generate_pixel_buffer;
