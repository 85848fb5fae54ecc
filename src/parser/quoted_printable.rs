//! Quoted-printable decoding (RFC 2045 §6.7).

/// Decode quoted-printable bytes.
///
/// `=XX` becomes the byte `0xXX` (hex is case-insensitive), `=` followed by
/// `\n` or `\r\n` is a soft line break and produces nothing. Any other `=`
/// is kept literally together with whatever follows it, so malformed input
/// never loses bytes.
pub fn decode_quoted_printable(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut i = 0;

    while i < input.len() {
        if input[i] != b'=' {
            out.push(input[i]);
            i += 1;
            continue;
        }

        match &input[i + 1..] {
            [b'\n', ..] => i += 2,
            [b'\r', b'\n', ..] => i += 3,
            [hi, lo, ..] => match (hex_value(*hi), hex_value(*lo)) {
                (Some(hi), Some(lo)) => {
                    out.push((hi << 4) | lo);
                    i += 3;
                }
                _ => {
                    out.push(b'=');
                    i += 1;
                }
            },
            _ => {
                out.push(b'=');
                i += 1;
            }
        }
    }

    out
}

pub(crate) fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Escape every byte outside printable ASCII (and `=` itself), inserting
    /// soft breaks every 60 output characters.
    fn encode(input: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        let mut line = 0;
        for &b in input {
            if line >= 60 {
                out.extend_from_slice(b"=\r\n");
                line = 0;
            }
            if (b'!'..=b'~').contains(&b) && b != b'=' {
                out.push(b);
                line += 1;
            } else {
                out.extend_from_slice(format!("={b:02X}").as_bytes());
                line += 3;
            }
        }
        out
    }

    #[test]
    fn test_hex_escapes() {
        assert_eq!(decode_quoted_printable(b"Caf=E9"), b"Caf\xE9");
        assert_eq!(decode_quoted_printable(b"H=C3=A9llo"), "Héllo".as_bytes());
        assert_eq!(decode_quoted_printable(b"=c3=a9"), "é".as_bytes());
    }

    #[test]
    fn test_soft_line_breaks() {
        assert_eq!(decode_quoted_printable(b"Hello=\nWorld"), b"HelloWorld");
        assert_eq!(decode_quoted_printable(b"Hello=\r\nWorld"), b"HelloWorld");
        assert_eq!(decode_quoted_printable(b"line=\n"), b"line");
    }

    #[test]
    fn test_hard_line_breaks_kept() {
        assert_eq!(decode_quoted_printable(b"one\ntwo"), b"one\ntwo");
    }

    #[test]
    fn test_invalid_escape_is_literal() {
        assert_eq!(decode_quoted_printable(b"a=ZZb"), b"a=ZZb");
        assert_eq!(decode_quoted_printable(b"=4G"), b"=4G");
        assert_eq!(decode_quoted_printable(b"50% =off"), b"50% =off");
    }

    #[test]
    fn test_truncated_escape_at_end() {
        assert_eq!(decode_quoted_printable(b"end="), b"end=");
        assert_eq!(decode_quoted_printable(b"end=A"), b"end=A");
        assert_eq!(decode_quoted_printable(b"end=\r"), b"end=\r");
    }

    #[test]
    fn test_non_ascii_passes_through() {
        assert_eq!(decode_quoted_printable("ñandú".as_bytes()), "ñandú".as_bytes());
    }

    proptest! {
        #[test]
        fn prop_plain_ascii_is_identity(s in "[a-zA-Z0-9 .,;:!?()\\n-]*") {
            prop_assert_eq!(decode_quoted_printable(s.as_bytes()), s.as_bytes().to_vec());
        }

        #[test]
        fn prop_encode_then_decode_roundtrips(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
            prop_assert_eq!(decode_quoted_printable(&encode(&bytes)), bytes);
        }
    }
}
