pub mod tile_layout;
