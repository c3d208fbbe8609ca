// TUI event loop and terminal management
use crate::{App, ConfirmAction, InputMode, Pane};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use startpage_api::{QuoteClient, FALLBACK_QUOTE};
use startpage_core::{Debouncer, PageSession};
use std::cell::Cell;
use std::io;
use std::rc::Rc;
use std::time::Duration;
use tokio::sync::oneshot;

use crate::editor::ToolbarCommand;

pub async fn run_tui(session: PageSession) -> anyhow::Result<()> {
    let mut app = App::load(&session);
    let display_name = session.config().ui.display_name.clone();

    // One quote fetch after load, off the UI loop; the result lands in
    // the footer whenever it arrives. No retry.
    let mut quote_rx: Option<oneshot::Receiver<String>> = None;
    if session.config().quote.enabled {
        let client = QuoteClient::with_api_url(session.config().quote.api_url.clone());
        let (tx, rx) = oneshot::channel();
        quote_rx = Some(rx);
        tokio::spawn(async move {
            let _ = tx.send(client.fetch_or_fallback().await);
        });
    } else {
        app.quote = Some(FALLBACK_QUOTE.to_string());
    }

    // Autosave for the note: each keystroke re-arms the quiet period, the
    // loop polls the deadline and writes the blob once the typing stops.
    let save_requested = Rc::new(Cell::new(false));
    let flag = Rc::clone(&save_requested);
    let quiet = Duration::from_millis(session.config().autosave.quiet_ms);
    let mut autosave = Debouncer::new(quiet, move || flag.set(true));

    tracing::debug!(
        "Entering TUI loop ({} bookmarks, {} todos)",
        app.bookmarks.len(),
        app.todos.len()
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if session.config().ui.mouse_enabled {
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    } else {
        execute!(stdout, EnterAlternateScreen)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    loop {
        terminal.draw(|f| crate::ui::render(f, &mut app))?;

        // Short poll so the clock ticks and the autosave deadline fires
        // without a keypress
        if event::poll(Duration::from_millis(200))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.clear_messages();
                    match app.input_mode {
                        InputMode::Normal => match key.code {
                            KeyCode::Char('q') => {
                                app.quit();
                            }
                            KeyCode::Tab => {
                                app.next_pane();
                            }
                            KeyCode::Char('e') if app.focus == Pane::Bookmarks => {
                                app.toggle_edit_mode();
                            }
                            KeyCode::Char('a') => match app.focus {
                                Pane::Bookmarks => app.start_input(InputMode::AddingBookmarkTitle),
                                Pane::Todos => app.start_input(InputMode::AddingTodo),
                                Pane::Note => {}
                            },
                            KeyCode::Char('h') | KeyCode::Left if app.focus == Pane::Bookmarks => {
                                app.previous_bookmark();
                            }
                            KeyCode::Char('l') | KeyCode::Right if app.focus == Pane::Bookmarks => {
                                app.next_bookmark();
                            }
                            KeyCode::Char('j') | KeyCode::Down if app.focus == Pane::Todos => {
                                app.next_todo();
                            }
                            KeyCode::Char('k') | KeyCode::Up if app.focus == Pane::Todos => {
                                app.previous_todo();
                            }
                            KeyCode::Enter => match app.focus {
                                Pane::Bookmarks => {
                                    // Open the selected chip in the browser
                                    if let Some(bookmark) = app.current_bookmark() {
                                        let url = bookmark.url.clone();
                                        if let Err(e) = open::that(&url) {
                                            app.set_error(format!("Failed to open browser: {}", e));
                                        }
                                    }
                                }
                                Pane::Note => {
                                    app.input_mode = InputMode::EditingNote;
                                }
                                Pane::Todos => {}
                            },
                            KeyCode::Char(' ') if app.focus == Pane::Todos => {
                                if !app.todos.is_empty() {
                                    match session.todos().toggle(app.selected_todo) {
                                        Ok(todos) => app.set_todos(todos),
                                        Err(e) => app.set_error(format!("Toggle failed: {}", e)),
                                    }
                                }
                            }
                            KeyCode::Char('d') => match app.focus {
                                Pane::Bookmarks => {
                                    if !app.edit_mode {
                                        app.set_status("Press e to enter edit mode before deleting");
                                    } else if !app.bookmarks.is_empty() {
                                        match session.bookmarks().remove(app.selected_bookmark) {
                                            Ok(bookmarks) => app.set_bookmarks(bookmarks),
                                            Err(e) => app.set_error(format!("Delete failed: {}", e)),
                                        }
                                    }
                                }
                                Pane::Todos => {
                                    if !app.todos.is_empty() {
                                        match session.todos().remove(app.selected_todo) {
                                            Ok(todos) => app.set_todos(todos),
                                            Err(e) => app.set_error(format!("Delete failed: {}", e)),
                                        }
                                    }
                                }
                                Pane::Note => {}
                            },
                            KeyCode::Char('r') if app.focus == Pane::Bookmarks => {
                                if app.edit_mode {
                                    app.start_bookmark_field_edit(InputMode::RenamingBookmark);
                                } else {
                                    app.set_status("Press e to enter edit mode before editing");
                                }
                            }
                            KeyCode::Char('u') if app.focus == Pane::Bookmarks => {
                                if app.edit_mode {
                                    app.start_bookmark_field_edit(InputMode::EditingBookmarkUrl);
                                } else {
                                    app.set_status("Press e to enter edit mode before editing");
                                }
                            }
                            KeyCode::Char('c') if app.focus == Pane::Todos => {
                                match session.todos().clear_completed() {
                                    Ok(todos) => app.set_todos(todos),
                                    Err(e) => app.set_error(format!("Clear failed: {}", e)),
                                }
                            }
                            KeyCode::Char('R') if app.focus == Pane::Bookmarks => {
                                app.input_mode = InputMode::Confirming(ConfirmAction::ResetBookmarks);
                            }
                            KeyCode::Char('C') if app.focus == Pane::Note => {
                                app.input_mode = InputMode::Confirming(ConfirmAction::ClearPage);
                            }
                            _ => {}
                        },
                        InputMode::AddingBookmarkTitle => match key.code {
                            KeyCode::Enter => {
                                if !app.input_buffer.is_empty() {
                                    app.pending_title = app.input_buffer.clone();
                                    app.start_input(InputMode::AddingBookmarkUrl);
                                }
                            }
                            KeyCode::Char(c) => {
                                app.input_buffer.push(c);
                            }
                            KeyCode::Backspace => {
                                app.input_buffer.pop();
                            }
                            KeyCode::Esc => {
                                app.enter_normal_mode();
                            }
                            _ => {}
                        },
                        InputMode::AddingBookmarkUrl => match key.code {
                            KeyCode::Enter => {
                                if !app.input_buffer.is_empty() {
                                    let title = app.pending_title.clone();
                                    let url = app.input_buffer.clone();
                                    match session.bookmarks().add(&title, &url) {
                                        Ok(bookmarks) => {
                                            app.set_bookmarks(bookmarks);
                                            app.set_status(format!("Added bookmark '{}'", title));
                                        }
                                        Err(e) => app.set_error(format!("Add failed: {}", e)),
                                    }
                                    app.enter_normal_mode();
                                }
                            }
                            KeyCode::Char(c) => {
                                app.input_buffer.push(c);
                            }
                            KeyCode::Backspace => {
                                app.input_buffer.pop();
                            }
                            KeyCode::Esc => {
                                app.enter_normal_mode();
                            }
                            _ => {}
                        },
                        InputMode::RenamingBookmark => match key.code {
                            KeyCode::Enter => {
                                if !app.input_buffer.is_empty() {
                                    let title = app.input_buffer.clone();
                                    match session.bookmarks().rename(app.selected_bookmark, &title) {
                                        Ok(bookmarks) => app.set_bookmarks(bookmarks),
                                        Err(e) => app.set_error(format!("Rename failed: {}", e)),
                                    }
                                    app.enter_normal_mode();
                                }
                            }
                            KeyCode::Char(c) => {
                                app.input_buffer.push(c);
                            }
                            KeyCode::Backspace => {
                                app.input_buffer.pop();
                            }
                            KeyCode::Esc => {
                                app.enter_normal_mode();
                            }
                            _ => {}
                        },
                        InputMode::EditingBookmarkUrl => match key.code {
                            KeyCode::Enter => {
                                if !app.input_buffer.is_empty() {
                                    let url = app.input_buffer.clone();
                                    match session.bookmarks().set_url(app.selected_bookmark, &url) {
                                        Ok(bookmarks) => app.set_bookmarks(bookmarks),
                                        Err(e) => app.set_error(format!("Edit failed: {}", e)),
                                    }
                                    app.enter_normal_mode();
                                }
                            }
                            KeyCode::Char(c) => {
                                app.input_buffer.push(c);
                            }
                            KeyCode::Backspace => {
                                app.input_buffer.pop();
                            }
                            KeyCode::Esc => {
                                app.enter_normal_mode();
                            }
                            _ => {}
                        },
                        InputMode::AddingTodo => match key.code {
                            KeyCode::Enter => {
                                if !app.input_buffer.is_empty() {
                                    let text = app.input_buffer.clone();
                                    match session.todos().add(&text) {
                                        Ok(todos) => app.set_todos(todos),
                                        Err(e) => app.set_error(format!("Add failed: {}", e)),
                                    }
                                    app.enter_normal_mode();
                                }
                            }
                            KeyCode::Char(c) => {
                                app.input_buffer.push(c);
                            }
                            KeyCode::Backspace => {
                                app.input_buffer.pop();
                            }
                            KeyCode::Esc => {
                                app.enter_normal_mode();
                            }
                            _ => {}
                        },
                        InputMode::InsertingLink => match key.code {
                            KeyCode::Enter => {
                                if !app.input_buffer.is_empty() {
                                    let url = app.input_buffer.clone();
                                    app.editor.insert_link(&url);
                                    autosave.trigger();
                                }
                                app.input_buffer.clear();
                                app.input_mode = InputMode::EditingNote;
                            }
                            KeyCode::Char(c) => {
                                app.input_buffer.push(c);
                            }
                            KeyCode::Backspace => {
                                app.input_buffer.pop();
                            }
                            KeyCode::Esc => {
                                app.input_buffer.clear();
                                app.input_mode = InputMode::EditingNote;
                            }
                            _ => {}
                        },
                        InputMode::EditingNote => {
                            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
                            match key.code {
                                KeyCode::Esc => {
                                    // Leaving the editor saves right away
                                    autosave.flush();
                                    app.input_mode = InputMode::Normal;
                                }
                                KeyCode::Char('b') if ctrl => {
                                    app.editor.apply(ToolbarCommand::Bold);
                                    autosave.trigger();
                                }
                                KeyCode::Char('i') if ctrl => {
                                    app.editor.apply(ToolbarCommand::Italic);
                                    autosave.trigger();
                                }
                                KeyCode::Char('h') if ctrl => {
                                    app.editor.apply(ToolbarCommand::Heading);
                                    autosave.trigger();
                                }
                                KeyCode::Char('u') if ctrl => {
                                    app.editor.apply(ToolbarCommand::Bullet);
                                    autosave.trigger();
                                }
                                KeyCode::Char('k') if ctrl => {
                                    app.start_input(InputMode::InsertingLink);
                                }
                                KeyCode::Char(c) if !ctrl => {
                                    app.editor.insert_char(c);
                                    autosave.trigger();
                                }
                                KeyCode::Enter => {
                                    app.editor.newline();
                                    autosave.trigger();
                                }
                                KeyCode::Backspace => {
                                    app.editor.backspace();
                                    autosave.trigger();
                                }
                                KeyCode::Left => app.editor.move_left(),
                                KeyCode::Right => app.editor.move_right(),
                                KeyCode::Up => app.editor.move_up(),
                                KeyCode::Down => app.editor.move_down(),
                                _ => {}
                            }
                        }
                        InputMode::Confirming(action) => {
                            match key.code {
                                KeyCode::Char('y') | KeyCode::Char('Y') => match action {
                                    ConfirmAction::ResetBookmarks => {
                                        match session.bookmarks().reset() {
                                            Ok(()) => {
                                                app.set_bookmarks(Vec::new());
                                                app.set_status("Bookmarks reset");
                                            }
                                            Err(e) => app.set_error(format!("Reset failed: {}", e)),
                                        }
                                    }
                                    ConfirmAction::ClearPage => match session.clear_note() {
                                        Ok(()) => {
                                            autosave.cancel();
                                            save_requested.set(false);
                                            app.editor.clear();
                                            app.set_status("Page cleared");
                                        }
                                        Err(e) => app.set_error(format!("Clear failed: {}", e)),
                                    },
                                },
                                _ => {
                                    // Anything but an explicit yes backs out
                                }
                            }
                            app.input_mode = InputMode::Normal;
                        }
                    }
                }
            }
        }

        // Clock/greeting refresh and pending autosave check
        app.tick(display_name.as_deref());
        autosave.poll();
        if save_requested.replace(false) {
            match session.save_note(&app.editor.content()) {
                Ok(()) => app.editor.mark_saved(),
                Err(e) => app.set_error(format!("Autosave failed: {}", e)),
            }
        }

        // Pick up the quote once the background fetch finishes
        if let Some(mut rx) = quote_rx.take() {
            match rx.try_recv() {
                Ok(quote) => app.quote = Some(quote),
                Err(oneshot::error::TryRecvError::Empty) => quote_rx = Some(rx),
                Err(oneshot::error::TryRecvError::Closed) => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal before anything that can fail, so an error below
    // never strands the user in raw mode on the alternate screen
    disable_raw_mode()?;
    if session.config().ui.mouse_enabled {
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
    } else {
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    }
    terminal.show_cursor()?;

    // Don't lose the last burst of typing on the way out
    if app.editor.is_dirty() || autosave.is_pending() {
        autosave.cancel();
        session.save_note(&app.editor.content())?;
    }

    Ok(())
}
