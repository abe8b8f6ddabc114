/// Label that inserts a space into the output text
pub const SPACE_LABEL: &str = "Space";
/// Label that deletes the previous character
pub const DELETE_LABEL: &str = "Delete";

/// Output text buffer consuming symbols emitted by the stability gate.
///
/// Interprets the two special labels; every other label is appended
/// verbatim.
#[derive(Debug, Default)]
pub struct TextBuffer {
    text: String,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Applies one emitted symbol
    pub fn apply(&mut self, symbol: &str) {
        match symbol {
            SPACE_LABEL => self.text.push(' '),
            DELETE_LABEL => {
                self.text.pop();
            }
            other => self.text.push_str(other),
        }
    }

    /// Removes the last character, for an explicit backspace action
    pub fn backspace(&mut self) {
        self.text.pop();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_and_specials() {
        let mut buffer = TextBuffer::new();
        buffer.apply("H");
        buffer.apply("I");
        buffer.apply(SPACE_LABEL);
        buffer.apply("A");
        buffer.apply(DELETE_LABEL);
        assert_eq!(buffer.text(), "HI ");
    }

    #[test]
    fn test_delete_on_empty_is_noop() {
        let mut buffer = TextBuffer::new();
        buffer.apply(DELETE_LABEL);
        assert_eq!(buffer.text(), "");
    }
}
