use thiserror::Error;

/// Why an accelerator-backed engine could not be brought up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AcceleratorError {
    #[error("this build has no accelerator support (enable the `gpu` feature)")]
    NotCompiled,

    #[error("accelerator was not initialised for this session")]
    NotInitialised,

    #[error("no compatible accelerator adapter found")]
    NoAdapter,

    #[error("no accelerator adapter matches \"{requested}\" (available: {available})")]
    AdapterNotFound { requested: String, available: String },

    #[error("adapter {adapter} does not support {capability}")]
    MissingCapability {
        adapter: String,
        capability: &'static str,
    },

    #[error("failed to create device: {0}")]
    DeviceCreation(String),

    #[error("kernel compilation failed: {0}")]
    KernelCompilation(String),
}
