pub mod errors;
pub mod factory;
pub mod hsv_wheel;
pub mod legacy_modulo;
