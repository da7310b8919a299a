pub mod file;
pub mod video;
