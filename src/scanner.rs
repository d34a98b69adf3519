use memchr::memchr;

/// A located candidate substring: byte offsets into the scanned text plus
/// the slice they denote. `end` is exclusive. Only ever produced by
/// [`candidates`], and always starts with `{` and ends with its matching
/// `}`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Span<'a> {
    pub start: usize,
    pub end: usize,
    pub text: &'a str,
}

/// Scans `text` for balanced object-shaped candidates.
///
/// The scan is a single left-to-right pass over the bytes. A candidate
/// opens at a `{`; inside it every bracket kind (`{}`, `[]`, `()`) must
/// nest correctly and quoted strings (single or double, backslash-escaped)
/// are opaque. A mismatched closer turns the whole current attempt into
/// noise. Nested objects are emitted on their own, inner before outer,
/// because a span is emitted the moment its closing `}` is reached.
pub fn candidates(text: &str) -> Candidates<'_> {
    Candidates {
        text,
        pos: 0,
        stack: Vec::new(),
    }
}

/// Lazy iterator over candidate [`Span`]s, in closing-delimiter order.
pub struct Candidates<'a> {
    text: &'a str,
    pos: usize,
    // Open delimiters and the byte offset they were opened at
    stack: Vec<(u8, usize)>,
}

impl<'a> Iterator for Candidates<'a> {
    type Item = Span<'a>;

    fn next(&mut self) -> Option<Span<'a>> {
        let bytes = self.text.as_bytes();

        loop {
            if self.stack.is_empty() {
                // A candidate only ever starts at '{'. Everything in
                // between is noise, including quotes and other brackets,
                // so jump straight to the next brace.
                let found = memchr(b'{', &bytes[self.pos..])?;

                let at = self.pos + found;
                self.stack.push((b'{', at));
                self.pos = at + 1;
                continue;
            }

            let byte = match bytes.get(self.pos) {
                Some(byte) => *byte,
                // Unterminated object, nothing left to emit
                None => return None,
            };

            match byte {
                b'"' | b'\'' => match skip_string(bytes, self.pos, byte) {
                    Some(after) => self.pos = after,
                    None => {
                        // Unterminated string: abandon the attempt and
                        // rescan from just past the opening quote
                        self.stack.clear();
                        self.pos += 1;
                    }
                },
                b'{' | b'[' | b'(' => {
                    self.stack.push((byte, self.pos));
                    self.pos += 1;
                }
                b'}' | b']' | b')' => {
                    let open = match byte {
                        b'}' => b'{',
                        b']' => b'[',
                        _ => b'(',
                    };

                    match self.stack.last() {
                        Some(&(kind, start)) if kind == open => {
                            self.stack.pop();
                            self.pos += 1;

                            if open == b'{' {
                                return Some(Span {
                                    start,
                                    end: self.pos,
                                    text: &self.text[start..self.pos],
                                });
                            }
                        }
                        _ => {
                            // Mismatched closer: the whole attempt is noise
                            self.stack.clear();
                            self.pos += 1;
                        }
                    }
                }
                _ => self.pos += 1,
            }
        }
    }
}

// Returns the position just past the closing quote, or None if the string
// never terminates. Byte-wise is safe: quote and backslash bytes never
// occur inside a multi-byte utf-8 sequence.
fn skip_string(bytes: &[u8], quote_pos: usize, quote: u8) -> Option<usize> {
    let mut pos = quote_pos + 1;

    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos += 2,
            byte if byte == quote => return Some(pos + 1),
            _ => pos += 1,
        }
    }

    None
}
