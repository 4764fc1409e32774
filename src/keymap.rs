use crate::view::Focus;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Quit,
    Submit,
    Export,
    DeleteSelected,
    FocusNext,
    FocusPrev,
    SelectNext,
    SelectPrev,
    Edit(EditOp),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    Insert(char),
    Newline,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
}

pub fn map_key(focus: Focus, key: KeyEvent) -> Option<Intent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let command = key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER);

    match key.code {
        KeyCode::Esc => return Some(Intent::Quit),
        KeyCode::Char('q') if command => return Some(Intent::Quit),
        KeyCode::Char('s') if command => return Some(Intent::Submit),
        KeyCode::Char('e') if command => return Some(Intent::Export),
        KeyCode::Tab => return Some(Intent::FocusNext),
        KeyCode::BackTab => return Some(Intent::FocusPrev),
        _ => {}
    }

    match focus {
        Focus::Textarea => match key.code {
            KeyCode::Enter if command => Some(Intent::Submit),
            KeyCode::Enter => Some(Intent::Edit(EditOp::Newline)),
            KeyCode::Up => Some(Intent::Edit(EditOp::Up)),
            KeyCode::Down => Some(Intent::Edit(EditOp::Down)),
            _ => map_line_edit(key, command),
        },
        Focus::Search => map_line_edit(key, command),
        Focus::List => match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(Intent::SelectPrev),
            KeyCode::Down | KeyCode::Char('j') => Some(Intent::SelectNext),
            KeyCode::Delete | KeyCode::Char('d') => Some(Intent::DeleteSelected),
            _ => None,
        },
    }
}

fn map_line_edit(key: KeyEvent, command: bool) -> Option<Intent> {
    let op = match key.code {
        KeyCode::Char(c) if !command => EditOp::Insert(c),
        KeyCode::Backspace => EditOp::Backspace,
        KeyCode::Delete => EditOp::Delete,
        KeyCode::Left => EditOp::Left,
        KeyCode::Right => EditOp::Right,
        KeyCode::Home => EditOp::Home,
        KeyCode::End => EditOp::End,
        _ => return None,
    };
    Some(Intent::Edit(op))
}
