use thiserror::Error;

#[derive(Error, Debug)]
pub enum PasteError {
    /// The server answered with a non-success status.
    #[error("{message}")]
    Api { message: String, status: u16 },

    /// The request never produced a usable response.
    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    InvalidForm(String),

    #[error(transparent)]
    Common(#[from] pastebin_common::CommonError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl PasteError {
    /// HTTP status for errors that came from a server response.
    pub fn status(&self) -> Option<u16> {
        match self {
            PasteError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for PasteError {
    fn from(err: reqwest::Error) -> Self {
        PasteError::Transport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PasteError>;
