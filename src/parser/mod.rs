//! Message decoding: header blocks, RFC 2047 encoded-words, transfer
//! encodings, charsets and multipart splitting.

pub mod charset;
pub mod content;
pub mod disposition;
pub mod encoded_word;
pub mod eml;
pub mod header;
pub mod message;
pub mod multipart;
pub mod quoted_printable;
