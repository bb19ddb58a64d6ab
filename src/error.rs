use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReceiptError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Invalid value for field: {0}")]
    InvalidField(&'static str),
    #[error("Receipt ID not found")]
    NotFound,
    #[error("storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, ReceiptError>;
