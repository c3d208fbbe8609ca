// TUI application state and event handling
use crate::editor::NoteEditor;
use chrono::Local;
use ratatui::widgets::ListState;
use startpage_core::{clock, Bookmark, PageSession, TodoItem};

/// Which widget has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Bookmarks,
    Note,
    Todos,
}

/// Destructive actions that go through the confirmation modal first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    ResetBookmarks,
    ClearPage,
}

impl ConfirmAction {
    pub fn prompt(&self) -> &'static str {
        match self {
            ConfirmAction::ResetBookmarks => "Reset the bookmarks bar? This cannot be undone.",
            ConfirmAction::ClearPage => "Clear the note page? This cannot be undone.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,              // Navigating widgets
    AddingBookmarkTitle, // Typing the new bookmark's title
    AddingBookmarkUrl,   // Typing the new bookmark's url
    RenamingBookmark,    // Retyping the selected bookmark's title
    EditingBookmarkUrl,  // Retyping the selected bookmark's url
    AddingTodo,          // Typing a new todo
    EditingNote,         // Cursor lives in the note editor
    InsertingLink,       // Typing a url for the note's link-insert control
    Confirming(ConfirmAction),
}

pub struct App {
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub focus: Pane,
    // UI-only flag gating bookmark delete controls; never persisted
    pub edit_mode: bool,
    // In-memory copies, reloaded from the store after every mutation
    pub bookmarks: Vec<Bookmark>,
    pub todos: Vec<TodoItem>,
    pub selected_bookmark: usize,
    pub selected_todo: usize,
    pub todo_state: ListState,
    pub editor: NoteEditor,
    // Shared text entry buffer for the Adding* and InsertingLink modes
    pub input_buffer: String,
    // Bookmark title captured while the url is still being typed
    pub pending_title: String,
    pub clock_text: String,
    pub greeting: String,
    pub quote: Option<String>,
    pub status_message: Option<String>,
    pub error_message: Option<String>,
}

impl App {
    /// Build the initial state from everything the session has stored
    pub fn load(session: &PageSession) -> Self {
        let mut todo_state = ListState::default();
        todo_state.select(Some(0));

        let name = session.config().ui.display_name.clone();
        let now = Local::now();

        Self {
            should_quit: false,
            input_mode: InputMode::Normal,
            focus: Pane::Bookmarks,
            edit_mode: false,
            bookmarks: session.bookmarks().all(),
            todos: session.todos().all(),
            selected_bookmark: 0,
            selected_todo: 0,
            todo_state,
            editor: NoteEditor::from_content(&session.note()),
            input_buffer: String::new(),
            pending_title: String::new(),
            clock_text: clock::clock_text(now),
            greeting: clock::greeting(now, name.as_deref()),
            quote: None,
            status_message: None,
            error_message: None,
        }
    }

    /// 1-second cadence: refresh clock and greeting
    pub fn tick(&mut self, name: Option<&str>) {
        let now = Local::now();
        self.clock_text = clock::clock_text(now);
        self.greeting = clock::greeting(now, name);
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn next_pane(&mut self) {
        self.focus = match self.focus {
            Pane::Bookmarks => Pane::Note,
            Pane::Note => Pane::Todos,
            Pane::Todos => Pane::Bookmarks,
        };
    }

    pub fn toggle_edit_mode(&mut self) {
        self.edit_mode = !self.edit_mode;
    }

    pub fn set_bookmarks(&mut self, bookmarks: Vec<Bookmark>) {
        self.bookmarks = bookmarks;
        if self.selected_bookmark >= self.bookmarks.len() {
            self.selected_bookmark = self.bookmarks.len().saturating_sub(1);
        }
    }

    pub fn set_todos(&mut self, todos: Vec<TodoItem>) {
        self.todos = todos;
        if self.selected_todo >= self.todos.len() {
            self.selected_todo = self.todos.len().saturating_sub(1);
        }
        self.todo_state.select(Some(self.selected_todo));
    }

    pub fn current_bookmark(&self) -> Option<&Bookmark> {
        self.bookmarks.get(self.selected_bookmark)
    }

    pub fn next_bookmark(&mut self) {
        if !self.bookmarks.is_empty() {
            self.selected_bookmark = (self.selected_bookmark + 1).min(self.bookmarks.len() - 1);
        }
    }

    pub fn previous_bookmark(&mut self) {
        self.selected_bookmark = self.selected_bookmark.saturating_sub(1);
    }

    pub fn next_todo(&mut self) {
        if !self.todos.is_empty() {
            self.selected_todo = (self.selected_todo + 1).min(self.todos.len() - 1);
            self.todo_state.select(Some(self.selected_todo));
        }
    }

    pub fn previous_todo(&mut self) {
        self.selected_todo = self.selected_todo.saturating_sub(1);
        self.todo_state.select(Some(self.selected_todo));
    }

    pub fn start_input(&mut self, mode: InputMode) {
        self.input_buffer.clear();
        self.input_mode = mode;
    }

    /// Start editing one field of the selected bookmark, with the edit
    /// buffer seeded from its current value; no-op without a selection
    pub fn start_bookmark_field_edit(&mut self, mode: InputMode) {
        let seed = match (mode, self.current_bookmark()) {
            (InputMode::RenamingBookmark, Some(b)) => b.title.clone(),
            (InputMode::EditingBookmarkUrl, Some(b)) => b.url.clone(),
            _ => return,
        };
        self.input_buffer = seed;
        self.input_mode = mode;
    }

    pub fn enter_normal_mode(&mut self) {
        self.input_buffer.clear();
        self.pending_title.clear();
        self.input_mode = InputMode::Normal;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.error_message = None;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
        self.status_message = None;
    }

    pub fn clear_messages(&mut self) {
        self.status_message = None;
        self.error_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use startpage_core::Config;

    fn app() -> App {
        let session = PageSession::in_memory(Config::default()).unwrap();
        App::load(&session)
    }

    #[test]
    fn test_pane_cycle_wraps() {
        let mut app = app();
        assert_eq!(app.focus, Pane::Bookmarks);
        app.next_pane();
        app.next_pane();
        app.next_pane();
        assert_eq!(app.focus, Pane::Bookmarks);
    }

    #[test]
    fn test_edit_mode_is_a_pure_toggle() {
        let mut app = app();
        assert!(!app.edit_mode);
        app.toggle_edit_mode();
        assert!(app.edit_mode);
        app.toggle_edit_mode();
        assert!(!app.edit_mode);
    }

    #[test]
    fn test_selection_clamped_after_shrink() {
        let mut app = app();
        app.set_todos(vec![TodoItem::new("a"), TodoItem::new("b"), TodoItem::new("c")]);
        app.next_todo();
        app.next_todo();
        assert_eq!(app.selected_todo, 2);

        app.set_todos(vec![TodoItem::new("a")]);
        assert_eq!(app.selected_todo, 0);
    }

    #[test]
    fn test_start_input_clears_buffer() {
        let mut app = app();
        app.input_buffer.push_str("leftover");
        app.start_input(InputMode::AddingTodo);
        assert!(app.input_buffer.is_empty());
        assert_eq!(app.input_mode, InputMode::AddingTodo);
    }

    #[test]
    fn test_bookmark_field_edit_seeds_buffer() {
        let mut app = app();
        app.set_bookmarks(vec![Bookmark::new("Example", "https://example.com")]);

        app.start_bookmark_field_edit(InputMode::RenamingBookmark);
        assert_eq!(app.input_mode, InputMode::RenamingBookmark);
        assert_eq!(app.input_buffer, "Example");

        app.start_bookmark_field_edit(InputMode::EditingBookmarkUrl);
        assert_eq!(app.input_buffer, "https://example.com");
    }

    #[test]
    fn test_bookmark_field_edit_needs_a_selection() {
        let mut app = app();
        assert!(app.bookmarks.is_empty());

        app.start_bookmark_field_edit(InputMode::RenamingBookmark);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_load_picks_up_stored_state() {
        let session = PageSession::in_memory(Config::default()).unwrap();
        session.bookmarks().add("Example", "https://example.com").unwrap();
        session.save_note("remember this").unwrap();

        let app = App::load(&session);
        assert_eq!(app.bookmarks.len(), 1);
        assert_eq!(app.bookmarks[0].title, "Example");
        assert_eq!(app.editor.content(), "remember this");
    }
}
