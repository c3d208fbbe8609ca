// Note editor buffer and toolbar commands
//
// The persisted blob is opaque text; the editor imposes no structure on
// it. Toolbar buttons become markdown markers here - a terminal has no
// native rich-text commands to dispatch to.

/// Formatting actions the toolbar offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarCommand {
    Bold,
    Italic,
    Heading,
    Bullet,
}

/// Plain multi-line edit buffer with a char-indexed cursor
pub struct NoteEditor {
    lines: Vec<String>,
    cursor_row: usize,
    cursor_col: usize,
    dirty: bool,
}

impl NoteEditor {
    pub fn from_content(content: &str) -> Self {
        let lines = if content.is_empty() {
            vec![String::new()]
        } else {
            content.split('\n').map(str::to_string).collect()
        };
        Self {
            lines,
            cursor_row: 0,
            cursor_col: 0,
            dirty: false,
        }
    }

    /// The blob that gets persisted
    pub fn content(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// (row, col) in characters, for placing the terminal cursor
    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_row, self.cursor_col)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    fn current_line(&mut self) -> &mut String {
        &mut self.lines[self.cursor_row]
    }

    /// Byte offset of the cursor within the current line
    fn cursor_byte(&self) -> usize {
        let line = &self.lines[self.cursor_row];
        line.char_indices()
            .nth(self.cursor_col)
            .map(|(i, _)| i)
            .unwrap_or(line.len())
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.cursor_byte();
        self.current_line().insert(at, c);
        self.cursor_col += 1;
        self.dirty = true;
    }

    pub fn insert_str(&mut self, s: &str) {
        let at = self.cursor_byte();
        self.current_line().insert_str(at, s);
        self.cursor_col += s.chars().count();
        self.dirty = true;
    }

    pub fn newline(&mut self) {
        let at = self.cursor_byte();
        let rest = self.current_line().split_off(at);
        self.lines.insert(self.cursor_row + 1, rest);
        self.cursor_row += 1;
        self.cursor_col = 0;
        self.dirty = true;
    }

    pub fn backspace(&mut self) {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
            let at = self.cursor_byte();
            self.current_line().remove(at);
            self.dirty = true;
        } else if self.cursor_row > 0 {
            // Join with the previous line
            let line = self.lines.remove(self.cursor_row);
            self.cursor_row -= 1;
            self.cursor_col = self.lines[self.cursor_row].chars().count();
            self.lines[self.cursor_row].push_str(&line);
            self.dirty = true;
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
        } else if self.cursor_row > 0 {
            self.cursor_row -= 1;
            self.cursor_col = self.lines[self.cursor_row].chars().count();
        }
    }

    pub fn move_right(&mut self) {
        let line_len = self.lines[self.cursor_row].chars().count();
        if self.cursor_col < line_len {
            self.cursor_col += 1;
        } else if self.cursor_row + 1 < self.lines.len() {
            self.cursor_row += 1;
            self.cursor_col = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.cursor_row > 0 {
            self.cursor_row -= 1;
            self.clamp_col();
        }
    }

    pub fn move_down(&mut self) {
        if self.cursor_row + 1 < self.lines.len() {
            self.cursor_row += 1;
            self.clamp_col();
        }
    }

    fn clamp_col(&mut self) {
        let line_len = self.lines[self.cursor_row].chars().count();
        self.cursor_col = self.cursor_col.min(line_len);
    }

    /// Dispatch a toolbar button press into the buffer
    pub fn apply(&mut self, command: ToolbarCommand) {
        match command {
            // Inline markers: drop the pair and leave the cursor inside
            ToolbarCommand::Bold => {
                self.insert_str("****");
                self.cursor_col -= 2;
            }
            ToolbarCommand::Italic => {
                self.insert_str("**");
                self.cursor_col -= 1;
            }
            // Block markers: prefix the current line
            ToolbarCommand::Heading => self.prefix_line("# "),
            ToolbarCommand::Bullet => self.prefix_line("- "),
        }
    }

    fn prefix_line(&mut self, prefix: &str) {
        self.current_line().insert_str(0, prefix);
        self.cursor_col += prefix.chars().count();
        self.dirty = true;
    }

    /// The link-insert control: drops a `[title](url)` at the cursor
    pub fn insert_link(&mut self, url: &str) {
        self.insert_str(&format!("[link]({})", url));
    }

    /// Wipe the buffer back to a single empty line
    ///
    /// Used after the stored blob is deleted, so the empty buffer already
    /// matches storage and stays marked clean.
    pub fn clear(&mut self) {
        self.lines = vec![String::new()];
        self.cursor_row = 0;
        self.cursor_col = 0;
        self.dirty = false;
    }
}

impl Default for NoteEditor {
    fn default() -> Self {
        Self::from_content("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_and_content_round_trip() {
        let mut editor = NoteEditor::default();
        for c in "hello".chars() {
            editor.insert_char(c);
        }
        editor.newline();
        for c in "world".chars() {
            editor.insert_char(c);
        }

        assert_eq!(editor.content(), "hello\nworld");
        assert!(editor.is_dirty());
    }

    #[test]
    fn test_backspace_joins_lines() {
        let mut editor = NoteEditor::from_content("ab\ncd");
        editor.move_down();
        assert_eq!(editor.cursor(), (1, 0));

        editor.backspace();
        assert_eq!(editor.content(), "abcd");
        assert_eq!(editor.cursor(), (0, 2));
    }

    #[test]
    fn test_bold_leaves_cursor_between_markers() {
        let mut editor = NoteEditor::default();
        editor.apply(ToolbarCommand::Bold);
        editor.insert_char('x');

        assert_eq!(editor.content(), "**x**");
    }

    #[test]
    fn test_heading_prefixes_current_line() {
        let mut editor = NoteEditor::from_content("title");
        editor.apply(ToolbarCommand::Heading);
        assert_eq!(editor.content(), "# title");
    }

    #[test]
    fn test_insert_link() {
        let mut editor = NoteEditor::default();
        editor.insert_link("https://example.com");
        assert_eq!(editor.content(), "[link](https://example.com)");
    }

    #[test]
    fn test_multibyte_chars_keep_cursor_honest() {
        let mut editor = NoteEditor::default();
        editor.insert_char('é');
        editor.insert_char('b');
        editor.backspace();
        editor.backspace();
        assert_eq!(editor.content(), "");
    }

    #[test]
    fn test_clear_resets_to_empty_and_clean() {
        let mut editor = NoteEditor::from_content("a\nb\nc");
        editor.move_down();
        editor.insert_char('x');
        editor.clear();

        assert_eq!(editor.content(), "");
        assert_eq!(editor.cursor(), (0, 0));
        // Matches the freshly deleted store, so nothing pending to save
        assert!(!editor.is_dirty());
    }
}
