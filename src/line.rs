//! Line assembly from a raw character stream
//!
//! Input arrives one character at a time from whatever transport feeds the
//! session. A terminator dispatches the accumulated buffer as a logical
//! line; delimiter punctuation (braces, commas, comment markers and the
//! like) collapses into a single separating space, inserted lazily before
//! the next meaningful character. That noise tolerance is what lets a
//! previously emitted test block be pasted straight back in as a command
//! sequence.

/// Characters absorbed as token separators.
fn is_noise(c: char) -> bool {
    matches!(
        c,
        ' ' | '\t' | ',' | ';' | '=' | '/' | '*' | '{' | '}' | '(' | ')' | '[' | ']' | '"' | '\''
    )
}

/// Reassembles a character stream into whitespace-normalized logical
/// command lines.
#[derive(Debug, Default)]
pub struct LineAssembler {
    buf: String,
    pending_space: bool,
}

impl LineAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one character. Returns the completed logical line when `c`
    /// terminates one; the buffer and pending-space flag reset either way.
    pub fn push(&mut self, c: char) -> Option<String> {
        if c == '\n' || c == '\r' {
            self.pending_space = false;
            return Some(std::mem::take(&mut self.buf));
        }
        if is_noise(c) {
            self.pending_space = true;
            return None;
        }
        if self.pending_space {
            if !self.buf.is_empty() {
                self.buf.push(' ');
            }
            self.pending_space = false;
        }
        self.buf.push(c);
        None
    }

    /// Feed a string, collecting every completed line.
    pub fn push_str(&mut self, text: &str) -> Vec<String> {
        text.chars().filter_map(|c| self.push(c)).collect()
    }
}
