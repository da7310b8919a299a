pub mod accelerator;
pub mod accelerator_error;
#[cfg(feature = "gpu")]
pub mod gpu;
