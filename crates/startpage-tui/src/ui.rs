// UI rendering logic
use crate::{App, ConfirmAction, InputMode, Pane};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header: clock + greeting
            Constraint::Length(3), // Bookmarks bar
            Constraint::Min(5),    // Note editor | todo list
            Constraint::Length(3), // Quote footer
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_bookmarks_bar(frame, app, chunks[1]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60), // Note editor
            Constraint::Percentage(40), // Todo list
        ])
        .split(chunks[2]);

    render_note(frame, app, content_chunks[0]);
    render_todos(frame, app, content_chunks[1]);
    render_quote(frame, app, chunks[3]);
    render_status_bar(frame, app, chunks[4]);

    // Modal overlays on top of everything else
    match app.input_mode {
        InputMode::AddingBookmarkTitle => {
            render_input_modal(frame, app, "New bookmark - title");
        }
        InputMode::AddingBookmarkUrl => {
            render_input_modal(frame, app, "New bookmark - url");
        }
        InputMode::RenamingBookmark => {
            render_input_modal(frame, app, "Rename bookmark");
        }
        InputMode::EditingBookmarkUrl => {
            render_input_modal(frame, app, "Edit bookmark url");
        }
        InputMode::AddingTodo => {
            render_input_modal(frame, app, "New todo");
        }
        InputMode::InsertingLink => {
            render_input_modal(frame, app, "Insert link - url");
        }
        InputMode::Confirming(action) => {
            render_confirm_modal(frame, action);
        }
        _ => {}
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(9), Constraint::Min(10)])
        .split(area);

    let clock = Paragraph::new(Line::from(Span::styled(
        app.clock_text.clone(),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(clock, header_chunks[0]);

    let mut greeting_spans = vec![Span::styled(
        app.greeting.clone(),
        Style::default().fg(Color::White),
    )];
    if app.edit_mode {
        greeting_spans.push(Span::raw("  "));
        greeting_spans.push(Span::styled(
            "[edit mode]",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
    }

    let greeting = Paragraph::new(Line::from(greeting_spans))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(greeting, header_chunks[1]);
}

fn render_bookmarks_bar(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Pane::Bookmarks;

    let mut spans: Vec<Span> = Vec::new();
    if app.bookmarks.is_empty() {
        spans.push(Span::styled(
            "no bookmarks yet - press a to add one",
            Style::default().fg(Color::DarkGray),
        ));
    }

    for (i, bookmark) in app.bookmarks.iter().enumerate() {
        let selected = focused && i == app.selected_bookmark;
        let chip_style = if selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };

        // Delete controls only render while edit mode is on
        let chip_text = if app.edit_mode {
            format!(" {} \u{2715} ", bookmark.title)
        } else {
            format!(" {} ", bookmark.title)
        };
        spans.push(Span::styled(chip_text, chip_style));
        spans.push(Span::raw(" "));
    }

    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let bar = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title("Bookmarks"),
    );
    frame.render_widget(bar, area);
}

fn render_note(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Pane::Note;
    let editing = app.input_mode == InputMode::EditingNote;

    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let title = if editing { "Note (editing)" } else { "Note" };

    let lines: Vec<Line> = app
        .editor
        .lines()
        .iter()
        .map(|l| Line::from(l.clone()))
        .collect();

    let note = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        );
    frame.render_widget(note, area);

    // Show the real terminal cursor only while typing in the note
    if editing {
        let (row, col) = app.editor.cursor();
        let x = area.x + 1 + col as u16;
        let y = area.y + 1 + row as u16;
        if x < area.right() - 1 && y < area.bottom() - 1 {
            frame.set_cursor_position((x, y));
        }
    }
}

fn render_todos(frame: &mut Frame, app: &mut App, area: Rect) {
    let focused = app.focus == Pane::Todos;
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let items: Vec<ListItem> = app
        .todos
        .iter()
        .map(|todo| {
            let (checkbox, style) = if todo.done {
                (
                    "[x] ",
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT),
                )
            } else {
                ("[ ] ", Style::default().fg(Color::White))
            };
            ListItem::new(Line::from(vec![
                Span::styled(checkbox, Style::default().fg(Color::Green)),
                Span::styled(todo.text.clone(), style),
            ]))
        })
        .collect();

    let open_count = app.todos.iter().filter(|t| !t.done).count();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(format!("Todos ({} open)", open_count)),
        )
        .highlight_style(Style::default().bg(Color::Rgb(50, 50, 70)))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.todo_state);
}

fn render_quote(frame: &mut Frame, app: &App, area: Rect) {
    let text = match &app.quote {
        Some(quote) => Span::styled(
            quote.clone(),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::ITALIC),
        ),
        None => Span::styled("Fetching quote...", Style::default().fg(Color::DarkGray)),
    };

    let quote = Paragraph::new(Line::from(text))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Quote of the day"));
    frame.render_widget(quote, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(error) = &app.error_message {
        Line::from(Span::styled(
            format!(" {} ", error),
            Style::default().fg(Color::White).bg(Color::Red),
        ))
    } else if let Some(status) = &app.status_message {
        Line::from(Span::styled(
            format!(" {} ", status),
            Style::default().fg(Color::Black).bg(Color::Green),
        ))
    } else {
        let hints = match app.input_mode {
            InputMode::EditingNote => {
                " Esc done | Ctrl-b bold | Ctrl-i italic | Ctrl-h heading | Ctrl-u bullet | Ctrl-k link "
            }
            _ => match app.focus {
                Pane::Bookmarks => {
                    " q quit | Tab pane | h/l select | Enter open | a add | e edit mode | d delete | r/u edit | R reset "
                }
                Pane::Note => " q quit | Tab pane | Enter edit | C clear page ",
                Pane::Todos => {
                    " q quit | Tab pane | j/k select | Space toggle | a add | d delete | c clear done "
                }
            },
        };
        Line::from(Span::styled(hints, Style::default().fg(Color::DarkGray)))
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn render_input_modal(frame: &mut Frame, app: &App, title: &str) {
    let area = centered_rect(50, 3, frame.area());
    frame.render_widget(Clear, area);

    let input = Paragraph::new(Line::from(vec![
        Span::raw(app.input_buffer.clone()),
        Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!("{} (Enter confirm, Esc cancel)", title)),
    );
    frame.render_widget(input, area);
}

fn render_confirm_modal(frame: &mut Frame, action: ConfirmAction) {
    let area = centered_rect(50, 4, frame.area());
    frame.render_widget(Clear, area);

    let prompt = Paragraph::new(vec![
        Line::from(action.prompt()),
        Line::from(Span::styled(
            "y confirm / any other key cancels",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title("Are you sure?"),
    );
    frame.render_widget(prompt, area);
}

/// Centered rect of `width` percent and fixed height, for modals
fn centered_rect(width_pct: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - width_pct) / 2),
            Constraint::Percentage(width_pct),
            Constraint::Percentage((100 - width_pct) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
