//! Append-only completion of truncated JSON text.
//!
//! The agent writes one JSON object per line, but a line can be cut short when
//! the process is killed mid-write. [`complete_json_into`] scans the prefix and
//! appends the minimal closing tokens that make it parse. Existing characters
//! are never rewritten. Text that does not look like a JSON prefix is left
//! untouched so the caller's parse fails and it can fall back to raw text.

// ─── Public API ───────────────────────────────────────────────────────────

/// Return `input` followed by whatever closers are needed to make it valid.
pub fn complete_json(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 8);
    complete_json_into(input, &mut out);
    out
}

/// Like [`complete_json`], but writes into a caller-owned buffer.
///
/// The buffer is cleared first, so a parser can reuse one allocation across
/// lines without carrying anything from the previous line.
pub fn complete_json_into(input: &str, out: &mut String) {
    out.clear();
    out.push_str(input);
    if let Some(suffix) = Completer::default().scan(input) {
        out.push_str(&suffix);
    }
}

// ─── Scanner state ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ObjectState {
    /// Just after `{`.
    Open,
    /// Just after `,`; a key must follow.
    Comma,
    /// Key string finished, waiting for `:`.
    AfterKey,
    /// Just after `:`.
    Colon,
    AfterValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArrayState {
    Open,
    Comma,
    AfterValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Object(ObjectState),
    Array(ArrayState),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Escape {
    None,
    Backslash,
    /// Inside `\uXXXX`, with this many hex digits still expected.
    Unicode(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scalar {
    None,
    String { key: bool, escape: Escape },
    Number { last: char },
    Literal { rest: &'static str },
}

/// Marker for input that is not a JSON prefix at all.
struct Invalid;

#[derive(Debug)]
struct Completer {
    stack: Vec<Frame>,
    scalar: Scalar,
    top_done: bool,
}

impl Default for Completer {
    fn default() -> Self {
        Self {
            stack: Vec::new(),
            scalar: Scalar::None,
            top_done: false,
        }
    }
}

impl Completer {
    /// Scan `input` and return the suffix that closes it, or `None` when the
    /// text cannot be completed by appending alone.
    fn scan(mut self, input: &str) -> Option<String> {
        for c in input.chars() {
            if self.feed(c).is_err() {
                return None;
            }
        }
        self.finish()
    }

    fn feed(&mut self, c: char) -> Result<(), Invalid> {
        match self.scalar {
            Scalar::String { key, escape } => self.feed_string(c, key, escape),
            Scalar::Number { .. } => {
                if matches!(c, '0'..='9' | '-' | '+' | '.' | 'e' | 'E') {
                    self.scalar = Scalar::Number { last: c };
                    Ok(())
                } else {
                    self.scalar = Scalar::None;
                    self.value_done();
                    self.feed_structural(c)
                }
            }
            Scalar::Literal { rest } => {
                let mut chars = rest.chars();
                if chars.next() != Some(c) {
                    return Err(Invalid);
                }
                let rest = chars.as_str();
                if rest.is_empty() {
                    self.scalar = Scalar::None;
                    self.value_done();
                } else {
                    self.scalar = Scalar::Literal { rest };
                }
                Ok(())
            }
            Scalar::None => self.feed_structural(c),
        }
    }

    fn feed_string(&mut self, c: char, key: bool, escape: Escape) -> Result<(), Invalid> {
        let escape = match escape {
            Escape::None => match c {
                '\\' => Escape::Backslash,
                '"' => {
                    self.scalar = Scalar::None;
                    if key {
                        self.key_done();
                    } else {
                        self.value_done();
                    }
                    return Ok(());
                }
                _ => Escape::None,
            },
            Escape::Backslash => match c {
                'u' => Escape::Unicode(4),
                '"' | '\\' | '/' | 'b' | 'f' | 'n' | 'r' | 't' => Escape::None,
                _ => return Err(Invalid),
            },
            Escape::Unicode(remaining) => {
                if !c.is_ascii_hexdigit() {
                    return Err(Invalid);
                }
                if remaining <= 1 {
                    Escape::None
                } else {
                    Escape::Unicode(remaining - 1)
                }
            }
        };
        self.scalar = Scalar::String { key, escape };
        Ok(())
    }

    fn feed_structural(&mut self, c: char) -> Result<(), Invalid> {
        if c.is_whitespace() {
            return Ok(());
        }
        if self.top_done {
            return Err(Invalid);
        }

        match self.stack.last().copied() {
            None => self.start_value(c),
            Some(Frame::Object(state)) => match (state, c) {
                (ObjectState::Open | ObjectState::Comma, '"') => {
                    self.scalar = Scalar::String {
                        key: true,
                        escape: Escape::None,
                    };
                    Ok(())
                }
                (ObjectState::Open | ObjectState::AfterValue, '}') => {
                    self.stack.pop();
                    self.value_done();
                    Ok(())
                }
                (ObjectState::AfterKey, ':') => {
                    self.set_top(Frame::Object(ObjectState::Colon));
                    Ok(())
                }
                (ObjectState::Colon, _) => self.start_value(c),
                (ObjectState::AfterValue, ',') => {
                    self.set_top(Frame::Object(ObjectState::Comma));
                    Ok(())
                }
                _ => Err(Invalid),
            },
            Some(Frame::Array(state)) => match (state, c) {
                (ArrayState::Open | ArrayState::AfterValue, ']') => {
                    self.stack.pop();
                    self.value_done();
                    Ok(())
                }
                (ArrayState::AfterValue, ',') => {
                    self.set_top(Frame::Array(ArrayState::Comma));
                    Ok(())
                }
                (ArrayState::Open | ArrayState::Comma, _) => self.start_value(c),
                _ => Err(Invalid),
            },
        }
    }

    fn start_value(&mut self, c: char) -> Result<(), Invalid> {
        match c {
            '{' => self.stack.push(Frame::Object(ObjectState::Open)),
            '[' => self.stack.push(Frame::Array(ArrayState::Open)),
            '"' => {
                self.scalar = Scalar::String {
                    key: false,
                    escape: Escape::None,
                }
            }
            '-' | '0'..='9' => self.scalar = Scalar::Number { last: c },
            't' => self.scalar = Scalar::Literal { rest: "rue" },
            'f' => self.scalar = Scalar::Literal { rest: "alse" },
            'n' => self.scalar = Scalar::Literal { rest: "ull" },
            _ => return Err(Invalid),
        }
        Ok(())
    }

    fn set_top(&mut self, frame: Frame) {
        if let Some(top) = self.stack.last_mut() {
            *top = frame;
        }
    }

    fn key_done(&mut self) {
        self.set_top(Frame::Object(ObjectState::AfterKey));
    }

    fn value_done(&mut self) {
        match self.stack.last().copied() {
            None => self.top_done = true,
            Some(Frame::Object(_)) => self.set_top(Frame::Object(ObjectState::AfterValue)),
            Some(Frame::Array(_)) => self.set_top(Frame::Array(ArrayState::AfterValue)),
        }
    }

    fn finish(mut self) -> Option<String> {
        let mut suffix = String::new();

        match self.scalar {
            Scalar::None => {}
            Scalar::String { key, escape } => {
                match escape {
                    Escape::None => {}
                    Escape::Backslash => suffix.push('\\'),
                    Escape::Unicode(remaining) => {
                        suffix.extend(std::iter::repeat('0').take(remaining as usize))
                    }
                }
                suffix.push('"');
                if key {
                    self.key_done();
                } else {
                    self.value_done();
                }
            }
            Scalar::Number { last } => {
                if matches!(last, '-' | '+' | '.' | 'e' | 'E') {
                    suffix.push('0');
                }
                self.value_done();
            }
            Scalar::Literal { rest } => {
                suffix.push_str(rest);
                self.value_done();
            }
        }

        if self.stack.is_empty() && !self.top_done {
            // Whitespace only: nothing to complete.
            return None;
        }

        let mut frames = self.stack.into_iter().rev();
        if let Some(innermost) = frames.next() {
            suffix.push_str(match innermost {
                Frame::Object(ObjectState::Open | ObjectState::AfterValue) => "}",
                Frame::Object(ObjectState::Comma) => "\"\":null}",
                Frame::Object(ObjectState::AfterKey) => ":null}",
                Frame::Object(ObjectState::Colon) => "null}",
                Frame::Array(ArrayState::Open | ArrayState::AfterValue) => "]",
                Frame::Array(ArrayState::Comma) => "null]",
            });
        }
        for frame in frames {
            suffix.push(match frame {
                Frame::Object(_) => '}',
                Frame::Array(_) => ']',
            });
        }

        Some(suffix)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
