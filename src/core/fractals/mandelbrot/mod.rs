pub mod algorithm;
pub mod colour_map;
pub mod colour_maps;
pub mod errors;
