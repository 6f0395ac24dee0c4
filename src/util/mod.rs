//! Text and URL helpers shared by the feed parser and the UI.

mod text;
mod url_validator;

pub use text::{display_width, plain_text_snippet, strip_control_chars, truncate_to_width};
pub use url_validator::{validate_url_for_open, UrlValidationError};
