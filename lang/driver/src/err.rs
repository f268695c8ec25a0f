use mtac_dynamics::Failure;
use mtac_term::{KernelError, SignatureError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Signature error: {0}")]
    SignatureError(#[from] SignatureError),
    #[error("Run failed: {0}")]
    Failure(#[from] Failure),
    #[error("Kernel rejected the result: {0}")]
    KernelError(#[from] KernelError),
    #[error("Unknown demo `{0}`")]
    UnknownDemo(String),
}

pub type Result<T> = std::result::Result<T, SessionError>;
