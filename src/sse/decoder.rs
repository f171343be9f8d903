//! Incremental UTF-8 decoding for chunked response bodies.
//!
//! Transports split bodies wherever they like, including inside a multi-byte
//! character. Decoding each chunk on its own would turn both halves into
//! replacement characters, so the decoder keeps an incomplete trailing
//! sequence until the next chunk arrives.

/// Streaming UTF-8 decoder owned by a single reader.
#[derive(Debug, Default)]
pub struct Utf8StreamDecoder {
    pending: Vec<u8>,
}

impl Utf8StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the next chunk, returning all text that is complete so far.
    ///
    /// Invalid sequences become U+FFFD; an incomplete sequence at the end of
    /// the chunk is carried over.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        self.pending.extend_from_slice(chunk);

        let mut out = String::with_capacity(self.pending.len());
        let mut start = 0;

        loop {
            match std::str::from_utf8(&self.pending[start..]) {
                Ok(valid) => {
                    out.push_str(valid);
                    start = self.pending.len();
                    break;
                }
                Err(e) => {
                    let valid_up_to = start + e.valid_up_to();
                    out.push_str(&String::from_utf8_lossy(&self.pending[start..valid_up_to]));
                    match e.error_len() {
                        Some(bad) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            start = valid_up_to + bad;
                        }
                        None => {
                            // Incomplete sequence at the end, wait for more bytes
                            start = valid_up_to;
                            break;
                        }
                    }
                }
            }
        }

        self.pending.drain(..start);
        out
    }

    /// Number of bytes held back waiting for the rest of a character.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Flush whatever is left at end of stream, lossily.
    pub fn finish(&mut self) -> String {
        let rest = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        rest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_ascii_passthrough() {
        let mut decoder = Utf8StreamDecoder::new();
        assert_eq!(decoder.decode(b"data: ciao\n"), "data: ciao\n");
        assert_eq!(decoder.pending_len(), 0);
    }

    #[test]
    fn test_decode_multibyte_split_across_chunks() {
        // "è" is 0xC3 0xA8
        let bytes = "perché".as_bytes();
        let (head, tail) = bytes.split_at(bytes.len() - 1);

        let mut decoder = Utf8StreamDecoder::new();
        assert_eq!(decoder.decode(head), "perch");
        assert_eq!(decoder.pending_len(), 1);
        assert_eq!(decoder.decode(tail), "é");
        assert_eq!(decoder.pending_len(), 0);
    }

    #[test]
    fn test_decode_four_byte_char_one_byte_at_a_time() {
        let bytes = "🍕".as_bytes();
        let mut decoder = Utf8StreamDecoder::new();
        let mut out = String::new();
        for b in bytes {
            out.push_str(&decoder.decode(std::slice::from_ref(b)));
        }
        assert_eq!(out, "🍕");
    }

    #[test]
    fn test_decode_invalid_byte_is_replaced() {
        let mut decoder = Utf8StreamDecoder::new();
        assert_eq!(decoder.decode(b"a\xFFb"), "a\u{FFFD}b");
        assert_eq!(decoder.pending_len(), 0);
    }

    #[test]
    fn test_finish_flushes_truncated_sequence() {
        let mut decoder = Utf8StreamDecoder::new();
        assert_eq!(decoder.decode(&[b'x', 0xE2, 0x82]), "x");
        assert_eq!(decoder.finish(), "\u{FFFD}");
        assert_eq!(decoder.pending_len(), 0);
    }
}
