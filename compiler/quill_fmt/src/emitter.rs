//! Output buffer for the debugger.

/// String-based emitter.
///
/// Builds the reconstructed text incrementally. Only the debugger writes to
/// it, and only through these methods, so separators stay uniform.
#[derive(Default, Debug)]
pub struct StringEmitter {
    buffer: String,
}

impl StringEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a text fragment.
    #[inline]
    pub fn emit(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    /// Emit a single character.
    #[inline]
    pub fn emit_char(&mut self, c: char) {
        self.buffer.push(c);
    }

    /// Emit a single space.
    #[inline]
    pub fn emit_space(&mut self) {
        self.buffer.push(' ');
    }

    /// Emit `text` surrounded by single spaces, as for infix operators.
    #[inline]
    pub fn emit_spaced(&mut self, text: &str) {
        self.emit_space();
        self.emit(text);
        self.emit_space();
    }

    /// Emit a string literal in double quotes, escaping as needed.
    pub fn emit_quoted(&mut self, value: &str) {
        self.buffer.push('"');
        for c in value.chars() {
            match c {
                '"' => self.buffer.push_str("\\\""),
                '\\' => self.buffer.push_str("\\\\"),
                '\n' => self.buffer.push_str("\\n"),
                '\r' => self.buffer.push_str("\\r"),
                '\t' => self.buffer.push_str("\\t"),
                c => self.buffer.push(c),
            }
        }
        self.buffer.push('"');
    }

    /// Get the current buffer contents without consuming.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Get the output.
    pub fn output(self) -> String {
        self.buffer
    }
}
