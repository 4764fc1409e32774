//! Editable text buffers for the entry textarea and the search line.

use unicode_width::UnicodeWidthStr;

/// A text buffer with a cursor. The cursor is a byte offset that always
/// sits on a char boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    content: String,
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.content
    }

    #[cfg(test)]
    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    pub fn set_value(&mut self, value: &str) {
        self.content = value.to_string();
        self.cursor = self.content.len();
    }

    pub fn insert(&mut self, c: char) {
        self.content.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) -> bool {
        match self.content[..self.cursor].chars().next_back() {
            Some(c) => {
                self.cursor -= c.len_utf8();
                self.content.remove(self.cursor);
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self) -> bool {
        if self.cursor < self.content.len() {
            self.content.remove(self.cursor);
            true
        } else {
            false
        }
    }

    pub fn move_left(&mut self) {
        if let Some(c) = self.content[..self.cursor].chars().next_back() {
            self.cursor -= c.len_utf8();
        }
    }

    pub fn move_right(&mut self) {
        if let Some(c) = self.content[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = self.line_start();
    }

    pub fn move_end(&mut self) {
        self.cursor = self.content[self.cursor..]
            .find('\n')
            .map(|i| self.cursor + i)
            .unwrap_or(self.content.len());
    }

    pub fn move_up(&mut self) {
        let current_line_start = self.line_start();
        if current_line_start == 0 {
            return;
        }
        let prev_line_end = current_line_start - 1;
        let prev_line_start = self.content[..prev_line_end]
            .rfind('\n')
            .map(|i| i + 1)
            .unwrap_or(0);
        let column = self.content[current_line_start..self.cursor].chars().count();
        self.cursor = Self::offset_at_column(&self.content, prev_line_start, prev_line_end, column);
    }

    pub fn move_down(&mut self) {
        let Some(offset) = self.content[self.cursor..].find('\n') else {
            return;
        };
        let column = self.content[self.line_start()..self.cursor].chars().count();
        let next_line_start = self.cursor + offset + 1;
        let next_line_end = self.content[next_line_start..]
            .find('\n')
            .map(|i| next_line_start + i)
            .unwrap_or(self.content.len());
        self.cursor = Self::offset_at_column(&self.content, next_line_start, next_line_end, column);
    }

    /// Zero-based (row, display column) of the cursor.
    pub fn cursor_position(&self) -> (u16, u16) {
        let before = &self.content[..self.cursor];
        let row = before.matches('\n').count();
        let line = &before[self.line_start()..];
        (
            u16::try_from(row).unwrap_or(u16::MAX),
            u16::try_from(line.width()).unwrap_or(u16::MAX),
        )
    }

    fn line_start(&self) -> usize {
        self.content[..self.cursor]
            .rfind('\n')
            .map(|i| i + 1)
            .unwrap_or(0)
    }

    fn offset_at_column(content: &str, start: usize, end: usize, column: usize) -> usize {
        content[start..end]
            .char_indices()
            .nth(column)
            .map(|(i, _)| start + i)
            .unwrap_or(end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(s: &str) -> TextInput {
        let mut input = TextInput::new();
        for c in s.chars() {
            input.insert(c);
        }
        input
    }

    #[test]
    fn test_insert_and_backspace_multibyte() {
        let mut input = typed("héllo");
        assert_eq!(input.value(), "héllo");
        input.move_left();
        input.move_left();
        input.move_left();
        input.backspace();
        assert_eq!(input.value(), "hllo");
        assert_eq!(input.cursor(), 1);
    }

    #[test]
    fn test_delete_at_end_is_noop() {
        let mut input = typed("ab");
        assert!(!input.delete());
        input.move_left();
        assert!(input.delete());
        assert_eq!(input.value(), "a");
    }

    #[test]
    fn test_vertical_movement_keeps_column() {
        let mut input = typed("abcdef\nxy\nlonger line");
        input.move_up();
        assert_eq!(input.cursor_position(), (1, 2));
        input.move_up();
        assert_eq!(input.cursor_position(), (0, 2));
        input.move_down();
        input.move_down();
        assert_eq!(input.cursor_position(), (2, 2));
    }

    #[test]
    fn test_home_end() {
        let mut input = typed("one\ntwo");
        input.move_home();
        assert_eq!(input.cursor_position(), (1, 0));
        input.move_end();
        assert_eq!(input.cursor_position(), (1, 3));
    }

    #[test]
    fn test_cursor_width_counts_wide_chars() {
        let input = typed("日本");
        assert_eq!(input.cursor_position(), (0, 4));
    }

    #[test]
    fn test_cursor_position_saturates_on_huge_line() {
        let mut input = TextInput::new();
        input.set_value(&"x".repeat(70_000));
        assert_eq!(input.cursor_position(), (0, u16::MAX));
    }

    #[test]
    fn test_clear() {
        let mut input = typed("text");
        input.clear();
        assert_eq!(input.value(), "");
        assert_eq!(input.cursor(), 0);
    }
}
