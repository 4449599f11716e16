mod paste;
mod status;

pub use paste::{parse_timestamp, Paste};
pub use status::PasteStatus;
