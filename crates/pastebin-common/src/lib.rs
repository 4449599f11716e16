pub mod api;
pub mod error;
pub mod models;
pub mod share;

pub use api::{CreatePasteRequest, ErrorResponse};
pub use error::{CommonError, CommonResult};
pub use models::{Paste, PasteStatus};
