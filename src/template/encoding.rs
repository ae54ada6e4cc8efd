// Percent-encoding of literals and variable values

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use unicode_normalization::UnicodeNormalization;

/// Characters an operator may emit without escaping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterClass {
    /// `ALPHA / DIGIT / "-" / "." / "_" / "~"`
    Unreserved,
    /// Unreserved plus gen-delims and sub-delims. Existing `%XX` escapes are kept.
    UnreservedReserved,
}

const GEN_DELIMS: &[u8] = b":/?#[]@";
const SUB_DELIMS: &[u8] = b"!$&'()*+,;=";

/// Bytes escaped under [`CharacterClass::UnreservedReserved`].
///
/// Non-ASCII bytes are always escaped by `utf8_percent_encode`.
const RESERVED_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b':')
    .remove(b'/')
    .remove(b'?')
    .remove(b'#')
    .remove(b'[')
    .remove(b']')
    .remove(b'@')
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=');

impl CharacterClass {
    /// Whether `byte` may appear unescaped in output using this class
    pub fn allows(self, byte: u8) -> bool {
        let unreserved = byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~');
        match self {
            CharacterClass::Unreserved => unreserved,
            CharacterClass::UnreservedReserved => {
                unreserved || GEN_DELIMS.contains(&byte) || SUB_DELIMS.contains(&byte)
            }
        }
    }
}

/// Converts `value` to NFC and percent-encodes every UTF-8 byte outside `allowed`.
///
/// Escapes always use uppercase hex digits. With
/// [`CharacterClass::UnreservedReserved`], a `%` that already starts a valid
/// `%XX` triple is copied through, so encoding is idempotent.
pub fn normalize(value: &str, allowed: CharacterClass) -> String {
    let composed: String = value.nfc().collect();
    match allowed {
        CharacterClass::Unreserved => urlencoding::encode(&composed).into_owned(),
        CharacterClass::UnreservedReserved => encode_keeping_escapes(&composed),
    }
}

fn encode_keeping_escapes(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut result = String::with_capacity(input.len());
    let mut run_start = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        if is_pct_encoded(&bytes[pos..]) {
            result.extend(utf8_percent_encode(&input[run_start..pos], RESERVED_ENCODE_SET));
            result.push_str(&input[pos..pos + 3]);
            pos += 3;
            run_start = pos;
        } else {
            pos += 1;
        }
    }
    result.extend(utf8_percent_encode(&input[run_start..], RESERVED_ENCODE_SET));

    result
}

/// Whether `bytes` starts with `%` followed by two hex digits
pub(crate) fn is_pct_encoded(bytes: &[u8]) -> bool {
    matches!(bytes, [b'%', hi, lo, ..] if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reserved(value: &str) -> String {
        normalize(value, CharacterClass::UnreservedReserved)
    }

    fn unreserved(value: &str) -> String {
        normalize(value, CharacterClass::Unreserved)
    }

    #[test]
    fn test_allows_matches_encode_set() {
        for byte in 0u8..0x80 {
            let text = (byte as char).to_string();
            assert_eq!(
                CharacterClass::UnreservedReserved.allows(byte),
                reserved(&text) == text,
                "byte {:#04x}",
                byte
            );
            if byte != b'%' {
                assert_eq!(
                    CharacterClass::Unreserved.allows(byte),
                    unreserved(&text) == text,
                    "byte {:#04x}",
                    byte
                );
            }
        }
    }

    #[test]
    fn test_reserved_class_passes_delimiters() {
        assert_eq!(reserved(""), "");
        assert_eq!(reserved("a1-._~b2"), "a1-._~b2");
        assert_eq!(reserved(":/?#[]@"), ":/?#[]@");
        assert_eq!(reserved("!$&'()*+,;="), "!$&'()*+,;=");
        assert_eq!(reserved("ä"), "%C3%A4");
    }

    #[test]
    fn test_reserved_class_keeps_valid_escapes() {
        assert_eq!(reserved("a%20b"), "a%20b");
        assert_eq!(reserved("a%aab"), "a%aab");
        assert_eq!(reserved("a%FFb"), "a%FFb");
        assert_eq!(reserved("100%25"), "100%25");
    }

    #[test]
    fn test_reserved_class_escapes_stray_percent() {
        assert_eq!(reserved("a%g0b"), "a%25g0b");
        assert_eq!(reserved("a%0gb"), "a%250gb");
        assert_eq!(reserved("a%b"), "a%25b");
        assert_eq!(reserved("a%2"), "a%252");
        assert_eq!(reserved("a%2 "), "a%252%20");
        assert_eq!(reserved("a%%"), "a%25%25");
        assert_eq!(reserved("a%%20"), "a%25%20");
        assert_eq!(reserved("%"), "%25");
    }

    #[test]
    fn test_unreserved_class_escapes_everything_else() {
        assert_eq!(unreserved(":/?#[]@"), "%3A%2F%3F%23%5B%5D%40");
        assert_eq!(unreserved("!$&'()*+,;="), "%21%24%26%27%28%29%2A%2B%2C%3B%3D");
        assert_eq!(unreserved("a%20b"), "a%2520b");
        assert_eq!(unreserved("a%%22"), "a%25%2522");
    }

    #[test]
    fn test_nfc_before_encoding() {
        assert_eq!(unreserved("\u{1}"), "%01");
        assert_eq!(unreserved("\u{C5}"), "%C3%85");
        assert_eq!(unreserved("\u{41}\u{30A}"), "%C3%85");
        assert_eq!(unreserved("\u{41}\u{300}\u{323}"), "%E1%BA%A0%CC%80");
        assert_eq!(
            unreserved("a b c \u{73}\u{323}\u{307} d e f"),
            "a%20b%20c%20%E1%B9%A9%20d%20e%20f"
        );
    }

    #[test]
    fn test_reserved_class_is_idempotent() {
        for input in ["foo bar", "100%", "a%2 b", "ä/ö?x=1", "%%41%4", "{}|^"] {
            let once = reserved(input);
            assert_eq!(reserved(&once), once, "input {:?}", input);
        }
    }

    #[test]
    fn test_is_pct_encoded() {
        assert!(is_pct_encoded(b"%20"));
        assert!(is_pct_encoded(b"%aF rest"));
        assert!(!is_pct_encoded(b"%2"));
        assert!(!is_pct_encoded(b"%zz"));
        assert!(!is_pct_encoded(b"x20"));
    }
}
