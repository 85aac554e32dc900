//! Terminal events to game actions.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::buttons::ButtonId;
use crate::game::Action;
use crate::level::SpeedLevel;
use crate::render::Viewport;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Quit,
    Resize { cols: u16, rows: u16 },
    Game(Action),
}

/// Translates one terminal event. Keys and clicks with no meaning map to
/// `None` and are dropped.
pub fn translate(event: &Event, viewport: &Viewport) -> Option<Command> {
    match event {
        Event::Key(key) => translate_key(key),
        Event::Mouse(mouse) => translate_mouse(mouse, viewport),
        Event::Resize(cols, rows) => Some(Command::Resize {
            cols: *cols,
            rows: *rows,
        }),
        _ => None,
    }
}

fn translate_key(key: &KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c')).then_some(Command::Quit);
    }

    let action = match key.code {
        KeyCode::Char('q') => return Some(Command::Quit),
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Char('x') => Action::Jump,
        KeyCode::Char('p') => Action::Press(ButtonId::Pause),
        KeyCode::Esc | KeyCode::Backspace => Action::Press(ButtonId::Back),
        KeyCode::Enter => Action::Press(ButtonId::Play),
        KeyCode::Char('s') => Action::Press(ButtonId::Settings),
        KeyCode::Char('h') => Action::Press(ButtonId::Help),
        KeyCode::Char('m') => Action::Press(ButtonId::Sound),
        KeyCode::Char(c @ '1'..='4') => {
            let level = SpeedLevel::from_index(c as usize - '1' as usize)?;
            Action::Press(ButtonId::Level(level))
        }
        _ => return None,
    };
    Some(Command::Game(action))
}

fn translate_mouse(mouse: &MouseEvent, viewport: &Viewport) -> Option<Command> {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return None;
    }
    let (x, y) = viewport.cell_to_board(mouse.column, mouse.row)?;
    Some(Command::Game(Action::Click { x, y }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vp() -> Viewport {
        Viewport::fit(200, 128, 360.0, 640.0)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_jump_keys() {
        for code in [KeyCode::Char(' '), KeyCode::Up, KeyCode::Char('x')] {
            assert_eq!(translate(&key(code), &vp()), Some(Command::Game(Action::Jump)));
        }
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(translate(&key(KeyCode::Char('q')), &vp()), Some(Command::Quit));
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(translate(&ctrl_c, &vp()), Some(Command::Quit));
    }

    #[test]
    fn test_level_shortcuts() {
        assert_eq!(
            translate(&key(KeyCode::Char('4')), &vp()),
            Some(Command::Game(Action::Press(ButtonId::Level(SpeedLevel::Hard))))
        );
        assert_eq!(translate(&key(KeyCode::Char('5')), &vp()), None);
    }

    #[test]
    fn test_unknown_keys_are_dropped() {
        assert_eq!(translate(&key(KeyCode::Char('z')), &vp()), None);
        assert_eq!(translate(&key(KeyCode::F(5)), &vp()), None);
        let ctrl_x = Event::Key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL));
        assert_eq!(translate(&ctrl_x, &vp()), None);
    }

    #[test]
    fn test_key_release_is_dropped() {
        let mut release = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(translate(&Event::Key(release), &vp()), None);
    }

    #[test]
    fn test_left_click_maps_to_board() {
        let event = click(MouseEventKind::Down(MouseButton::Left), 100, 32);
        match translate(&event, &vp()) {
            Some(Command::Game(Action::Click { x, y })) => {
                assert!((x - 182.5).abs() < 1e-9);
                assert!((y - 325.0).abs() < 1e-9);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_other_mouse_events_are_dropped() {
        let right = click(MouseEventKind::Down(MouseButton::Right), 100, 32);
        let moved = click(MouseEventKind::Moved, 100, 32);
        let letterbox = click(MouseEventKind::Down(MouseButton::Left), 2, 2);
        assert_eq!(translate(&right, &vp()), None);
        assert_eq!(translate(&moved, &vp()), None);
        assert_eq!(translate(&letterbox, &vp()), None);
    }

    #[test]
    fn test_resize() {
        assert_eq!(
            translate(&Event::Resize(80, 24), &vp()),
            Some(Command::Resize { cols: 80, rows: 24 })
        );
    }
}
