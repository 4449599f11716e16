pub mod api_client;
pub mod commands;
pub mod config;
pub mod error;
pub mod form;
pub mod render;
pub mod retrieval;
pub mod submission;

#[cfg(test)]
mod test_support;

pub use api_client::{ApiClient, PasteApi};
pub use config::ClientConfig;
pub use error::{PasteError, Result};
pub use form::PasteForm;
pub use retrieval::{LoadPhase, RetrievalController, RetrievalState};
pub use submission::{SubmissionController, SubmissionState};
