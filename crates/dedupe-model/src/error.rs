use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unrecognized field spec {descriptor}: {reason}")]
    MalformedDescriptor { descriptor: String, reason: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
