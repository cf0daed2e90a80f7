use thiserror::Error;

#[derive(Error, Debug)]
pub enum EntityError {
    #[error("EntityError - Build: {0}")]
    Build(#[from] derive_builder::UninitializedFieldError),
    #[error("EntityError - EventDeserialize: {0}")]
    EventDeserialize(#[from] serde_json::Error),
    #[error("EntityError - NoEvents")]
    NoEvents,
}
