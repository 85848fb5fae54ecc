//! `mimetree` — decode raw RFC 5322 / MIME messages into a tree of parts.
//!
//! Every header value has its RFC 2047 encoded-words resolved, and every leaf
//! part has its transfer encoding (base64, quoted-printable) and charset
//! converted to UTF-8. Decoding never fails: malformed input yields a
//! best-effort tree.
//!
//! ```
//! let root = mimetree::decode("Subject: =?UTF-8?Q?Hello_World?=\n\nHi!\n");
//! assert_eq!(root.subject(), Some("Hello World"));
//! assert_eq!(root.content, "Hi!");
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod parser;

pub use model::{EmailPart, Headers};
pub use parser::message::Decoder;

/// Decode a message with the default configuration.
pub fn decode(message: &str) -> EmailPart {
    Decoder::default().decode(message)
}

/// Decode raw message bytes with the default configuration.
pub fn decode_bytes(message: &[u8]) -> EmailPart {
    Decoder::default().decode_bytes(message)
}
