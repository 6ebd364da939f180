// URL handling utilities
pub mod url_parser;
pub mod url_builder;

// Log hygiene
pub mod redact;

// Re-export all utilities for convenient access
pub use url_parser::{split_credentials, SplitUrl};
pub use url_builder::absolute_url;
pub use redact::mask_secrets;
