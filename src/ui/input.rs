//! 键盘事件映射 (Input -> Action)
//!
//! 将按键事件转换为 Action

use std::io;

use crossterm::event::KeyCode;

use super::actions::Action;
use super::state::App;

/// 根据帮助弹窗开关和按键获取对应的 Action
pub fn get_action(help_open: bool, key: KeyCode) -> Option<Action> {
    if help_open {
        return match key {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('?') | KeyCode::Esc | KeyCode::Enter => Some(Action::ToggleHelp),
            _ => None,
        };
    }

    match key {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('h') | KeyCode::Left => Some(Action::MoveLeft),
        KeyCode::Char('l') | KeyCode::Right => Some(Action::MoveRight),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveUp),
        KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveDown),
        KeyCode::Char(' ') | KeyCode::Enter => Some(Action::ToggleSelected),
        KeyCode::Char('b') => Some(Action::CyclePolicy),
        KeyCode::Char('u') => Some(Action::Refresh),
        KeyCode::Char('c') => Some(Action::ClearJournal),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        _ => None,
    }
}

/// 处理按键事件
pub fn handle_key_event(app: &mut App, key: KeyCode) -> io::Result<bool> {
    if let Some(action) = get_action(app.show_help, key) {
        Ok(app.dispatch(action))
    } else {
        Ok(false)
    }
}
