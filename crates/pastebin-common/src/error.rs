use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommonError {
    #[error("Invalid paste ID: {0:?}")]
    InvalidPasteId(String),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

pub type CommonResult<T> = std::result::Result<T, CommonError>;
