/// Text encoding used on the control connection and for listing bytes.
///
/// Decoding is best effort: names that are neither UTF-8 nor Latin-1 come out
/// mangled and nothing here tries to detect that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    /// UTF-8; invalid byte sequences are dropped on decode.
    #[default]
    Utf8,
    /// ISO-8859-1; every byte maps to one char.
    Latin1,
}

impl TextEncoding {
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            TextEncoding::Utf8 => bytes.utf8_chunks().map(|chunk| chunk.valid()).collect(),
            TextEncoding::Latin1 => bytes.iter().map(|&b| b as char).collect(),
        }
    }

    /// Chars outside Latin-1 are sent as `?`.
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            TextEncoding::Utf8 => text.as_bytes().to_vec(),
            TextEncoding::Latin1 => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
                .collect(),
        }
    }

    /// Strict UTF-8 first, then this encoding.
    pub fn decode_listing(self, bytes: &[u8]) -> String {
        match std::str::from_utf8(bytes) {
            Ok(text) => text.to_string(),
            Err(_) => self.decode(bytes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_drops_invalid_bytes() {
        let bytes = b"caf\xc3\xa9 \xff\xfeok";
        assert_eq!(TextEncoding::Utf8.decode(bytes), "café ok");
    }

    #[test]
    fn test_latin1_maps_every_byte() {
        assert_eq!(TextEncoding::Latin1.decode(b"caf\xe9"), "café");
        assert_eq!(TextEncoding::Latin1.encode("café€"), b"caf\xe9?".to_vec());
    }

    #[test]
    fn test_listing_prefers_strict_utf8() {
        let utf8 = "résumé.txt".as_bytes();
        assert_eq!(TextEncoding::Latin1.decode_listing(utf8), "résumé.txt");
        assert_eq!(TextEncoding::Latin1.decode_listing(b"r\xe9sum\xe9"), "résumé");
    }
}
