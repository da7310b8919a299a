pub mod animation_settings;
pub mod frame_layout;
pub mod zoom_trajectory;
