//! Keyboard and mouse handling, routed by the active view.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::App;
use crate::board::Point;
use crate::llm::schema;
use crate::state::runtime::{Activity, Focus, FormField, SidebarItem, SpecialTool, View};
use crate::state::tabs::TABS;
use crate::state::SectionState;

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    // Quit works from anywhere, even mid-typing.
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c')) {
        app.should_quit = true;
        return;
    }
    app.state.status = None;

    match app.state.view {
        View::Explorer => explorer_key(app, key),
        View::CustomEntry => form_key(app, key, ctrl),
        View::SpecialTool => tool_key(app, key),
        View::Chapter => chapter_key(app, key, ctrl),
    }
}

fn explorer_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.state.view = View::Chapter,
        KeyCode::Enter => app.send_chat(),
        KeyCode::Backspace => {
            app.state.explorer.input.pop();
        }
        // Scroll counts lines up from the bottom of the transcript.
        KeyCode::Up => app.state.explorer.scroll = app.state.explorer.scroll.saturating_add(1),
        KeyCode::Down => app.state.explorer.scroll = app.state.explorer.scroll.saturating_sub(1),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.state.explorer.input.push(c);
        }
        _ => {}
    }
}

fn form_key(app: &mut App, key: KeyEvent, ctrl: bool) {
    if ctrl {
        match key.code {
            // Ctrl+S saves the chapter, Ctrl+O runs OCR on the image path.
            KeyCode::Char('s') => app.create_custom_chapter(),
            KeyCode::Char('o') => app.start_ocr(),
            _ => {}
        }
        return;
    }
    match key.code {
        KeyCode::Esc => app.state.view = View::Chapter,
        KeyCode::Tab => {
            let current = app.state.form.field.unwrap_or(FormField::Title);
            app.state.form.field = Some(current.next());
        }
        KeyCode::Enter => {
            if app.state.form.field == Some(FormField::Text) {
                app.state.form.text.push('\n');
            }
        }
        KeyCode::Backspace => {
            match app.state.form.field.unwrap_or(FormField::Title) {
                FormField::Title => app.state.form.title.pop(),
                FormField::Text => app.state.form.text.pop(),
                FormField::ImagePath => app.state.form.image_path.pop(),
            };
        }
        KeyCode::Char(c) => match app.state.form.field.unwrap_or(FormField::Title) {
            FormField::Title => app.state.form.title.push(c),
            FormField::Text => app.state.form.text.push(c),
            FormField::ImagePath => app.state.form.image_path.push(c),
        },
        _ => {}
    }
}

fn tool_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.state.view = View::Chapter,
        KeyCode::Enter => app.start_tool(),
        KeyCode::Backspace => {
            app.state.tool_state.input.pop();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.state.tool_state.input.push(c);
        }
        _ => {}
    }
}

fn chapter_key(app: &mut App, key: KeyEvent, ctrl: bool) {
    if ctrl {
        match key.code {
            KeyCode::Char('l') => app.state.show_sidebar = !app.state.show_sidebar,
            KeyCode::Char('b') => app.state.show_board = !app.state.show_board,
            KeyCode::Char('r') => app.state.show_reader = !app.state.show_reader,
            KeyCode::Char('f') => {
                let target = !app.state.full_screen;
                app.state.set_full_screen(target);
            }
            KeyCode::Char('g') => app.toggle_language(),
            KeyCode::Char('p') => app.export_active(),
            _ => {}
        }
        return;
    }
    // Board shortcuts take precedence while the board is up.
    if app.state.show_board {
        match key.code {
            KeyCode::Char('c') => {
                app.state.board.next_color();
                return;
            }
            KeyCode::Char('e') => {
                app.state.board.toggle_tool();
                return;
            }
            KeyCode::Char('u') => {
                app.state.board.undo();
                return;
            }
            KeyCode::Char('x') => {
                app.state.board.clear();
                return;
            }
            _ => {}
        }
    }
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Tab => app.state.focus = app.state.focus.next(),
        _ => match app.state.focus {
            Focus::Sidebar => sidebar_key(app, key),
            Focus::Tabs => tabs_key(app, key),
            Focus::Content => content_key(app, key),
        },
    }
}

fn sidebar_key(app: &mut App, key: KeyEvent) {
    let items = app.state.sidebar_items();
    if items.is_empty() {
        return;
    }
    match key.code {
        KeyCode::Up => {
            app.state.sidebar_cursor = app.state.sidebar_cursor.saturating_sub(1);
        }
        KeyCode::Down => {
            app.state.sidebar_cursor = (app.state.sidebar_cursor + 1).min(items.len() - 1);
        }
        KeyCode::Enter => match items[app.state.sidebar_cursor.min(items.len() - 1)] {
            SidebarItem::Chapter(index) => {
                app.select_chapter(index);
                app.state.focus = Focus::Tabs;
            }
            SidebarItem::Activity(Activity::Explorer) => app.state.view = View::Explorer,
            SidebarItem::Activity(Activity::AddChapter) => {
                if app.state.form.field.is_none() {
                    app.state.form.reset();
                }
                app.state.view = View::CustomEntry;
            }
            SidebarItem::Activity(activity) => {
                app.state.tool = match activity {
                    Activity::Vachan => SpecialTool::Vachan,
                    Activity::Shrutlekh => SpecialTool::Shrutlekh,
                    _ => SpecialTool::Keeki,
                };
                app.state.tool_state.report = None;
                app.state.view = View::SpecialTool;
            }
        },
        _ => {}
    }
}

fn tabs_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Left => {
            app.state.tab_cursor = app.state.tab_cursor.checked_sub(1).unwrap_or(TABS.len() - 1);
        }
        KeyCode::Right => {
            app.state.tab_cursor = (app.state.tab_cursor + 1) % TABS.len();
        }
        KeyCode::Enter => {
            let id = TABS[app.state.tab_cursor].id;
            app.select_tab(id);
            app.state.focus = Focus::Content;
        }
        KeyCode::Char('r') => app.regenerate_active(),
        KeyCode::Char('g') => app.generate_active(),
        _ => {}
    }
}

fn content_key(app: &mut App, key: KeyEvent) {
    // Quiz sections are interactive; everything else just scrolls.
    let quiz = if app.state.reader.active_tab == "quiz" && !app.state.reader.finished {
        match &app.state.reader.section {
            SectionState::Ready(raw) => schema::parse_quiz(raw),
            _ => None,
        }
    } else {
        None
    };
    if let Some(quiz) = quiz {
        match key.code {
            KeyCode::Up => {
                app.state.reader.question_cursor = app.state.reader.question_cursor.saturating_sub(1);
                return;
            }
            KeyCode::Down => {
                if !quiz.questions.is_empty() {
                    app.state.reader.question_cursor =
                        (app.state.reader.question_cursor + 1).min(quiz.questions.len() - 1);
                }
                return;
            }
            KeyCode::Char(c @ '1'..='9') => {
                let choice = c as usize - '1' as usize;
                if let Some(question) = quiz.questions.get(app.state.reader.question_cursor) {
                    if let Some(option) = question.options.get(choice) {
                        app.state.reader.answers.insert(question.id, option.clone());
                    }
                }
                return;
            }
            KeyCode::Char('s') => {
                app.state.reader.finished = true;
                return;
            }
            _ => {}
        }
    }
    match key.code {
        KeyCode::Up => app.state.reader.scroll = app.state.reader.scroll.saturating_sub(1),
        KeyCode::Down => app.state.reader.scroll = app.state.reader.scroll.saturating_add(1),
        KeyCode::PageUp => app.state.reader.scroll = app.state.reader.scroll.saturating_sub(10),
        KeyCode::PageDown => app.state.reader.scroll = app.state.reader.scroll.saturating_add(10),
        KeyCode::Char('r') => app.regenerate_active(),
        KeyCode::Char('g') => app.generate_active(),
        _ => {}
    }
}

/// Map a terminal cell under the board to logical surface coordinates.
/// Each cell holds two vertically stacked pixels.
fn board_point(app: &App, column: u16, row: u16) -> Option<Point> {
    let rect = app.state.board_rect?;
    if column < rect.x || column >= rect.x + rect.width || row < rect.y || row >= rect.y + rect.height
    {
        return None;
    }
    Some(Point { x: (column - rect.x) as f32, y: ((row - rect.y) * 2) as f32 })
}

pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if !app.state.show_board {
        match mouse.kind {
            MouseEventKind::ScrollUp => {
                app.state.reader.scroll = app.state.reader.scroll.saturating_sub(2);
            }
            MouseEventKind::ScrollDown => {
                app.state.reader.scroll = app.state.reader.scroll.saturating_add(2);
            }
            _ => {}
        }
        return;
    }
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(point) = board_point(app, mouse.column, mouse.row) {
                app.state.board.begin_stroke(point);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some(point) = board_point(app, mouse.column, mouse.row) {
                app.state.board.extend_stroke(point);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => app.state.board.end_stroke(),
        _ => {}
    }
}
