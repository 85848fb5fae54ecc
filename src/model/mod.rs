//! Data model: the decoded part tree and its header collection.

pub mod headers;
pub mod part;

pub use headers::Headers;
pub use part::EmailPart;
