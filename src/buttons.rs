//! Clickable widgets for each screen, laid out in board units.

use crate::config::Config;
use crate::game::{GameState, MenuPage};
use crate::geometry::Rect;
use crate::level::SpeedLevel;

pub const MENU_BUTTON_WIDTH: f64 = 140.0;
pub const MENU_BUTTON_HEIGHT: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonId {
    Play,
    Settings,
    Help,
    Sound,
    Level(SpeedLevel),
    Back,
    Pause,
}

impl ButtonId {
    /// Menu buttons are drawn as labelled boxes; back and pause are glyphs.
    pub fn is_menu_button(self) -> bool {
        !matches!(self, ButtonId::Back | ButtonId::Pause)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Button {
    pub id: ButtonId,
    pub rect: Rect,
}

impl Button {
    fn menu(id: ButtonId, cx: f64, cy: f64) -> Self {
        Self {
            id,
            rect: Rect::centered(cx, cy, MENU_BUTTON_WIDTH, MENU_BUTTON_HEIGHT),
        }
    }
}

pub fn back_button(config: &Config) -> Button {
    Button {
        id: ButtonId::Back,
        rect: Rect::new(config.board_width - 40.0, 20.0, 40.0, 40.0),
    }
}

pub fn pause_button(config: &Config) -> Button {
    Button {
        id: ButtonId::Pause,
        rect: Rect::new(config.board_width / 2.0 - 10.0, 20.0, 20.0, 30.0),
    }
}

/// Buttons live on `state`, in hit-test priority order.
pub fn layout(state: GameState, config: &Config) -> Vec<Button> {
    let cx = config.board_width / 2.0;
    let cy = config.board_height / 2.0;

    match state {
        GameState::Menu(MenuPage::Main) => vec![
            Button::menu(ButtonId::Play, cx, cy),
            Button::menu(ButtonId::Settings, cx, cy + 60.0),
            Button::menu(ButtonId::Help, cx, cy + 120.0),
        ],
        GameState::Menu(MenuPage::Settings) => {
            let mut buttons = vec![back_button(config), Button::menu(ButtonId::Sound, cx, 200.0)];
            buttons.extend(
                SpeedLevel::ALL
                    .iter()
                    .enumerate()
                    .map(|(i, &level)| Button::menu(ButtonId::Level(level), cx, 300.0 + i as f64 * 50.0)),
            );
            buttons
        }
        GameState::Menu(MenuPage::Help) | GameState::GameOver => vec![back_button(config)],
        GameState::Playing | GameState::Paused => vec![back_button(config), pause_button(config)],
    }
}

/// First button under the board point `(x, y)`, if any.
pub fn hit(state: GameState, config: &Config, x: f64, y: f64) -> Option<ButtonId> {
    layout(state, config)
        .into_iter()
        .find(|b| b.rect.contains(x, y))
        .map(|b| b.id)
}
