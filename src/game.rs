//! Game-state controller: menus, rounds, pause and restart, plus the
//! per-frame simulation step.

use std::time::Duration;

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::bird::Bird;
use crate::buttons::{self, ButtonId};
use crate::config::Config;
use crate::level::SpeedLevel;
use crate::obstacle::{PipePair, Pipes, Spawner};
use crate::score::Score;

/// Pop scale a menu button starts at when pressed.
const PRESS_POP_SCALE: f64 = 1.2;
/// Pop shrink per frame.
const PRESS_POP_DECAY: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuPage {
    Main,
    Settings,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Menu(MenuPage),
    Playing,
    Paused,
    GameOver,
}

/// Player input, already stripped of device details.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Jump,
    /// Pointer press at a board position.
    Click { x: f64, y: f64 },
    /// Keyboard shortcut for a button; ignored unless that button is on screen.
    Press(ButtonId),
}

/// User choices that outlive a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub level: SpeedLevel,
    pub sound: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level: SpeedLevel::default(),
            sound: true,
        }
    }
}

/// What happened since the events were last taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Events {
    pub flapped: bool,
    pub collided: bool,
    pub button_clicked: bool,
    pub back_pressed: bool,
}

pub struct Game {
    pub config: Config,
    pub settings: Settings,
    pub bird: Bird,
    pub pipes: Pipes,
    pub score: Score,
    state: GameState,
    spawner: Spawner,
    restart_timer: Option<Duration>,
    sound_cooldown: Duration,
    pressed: Option<(ButtonId, f64)>,
    events: Events,
    rng: StdRng,
    frame: u64,
    rounds: u32,
    resets: u32,
}

impl Game {
    pub fn new(config: Config, settings: Settings, seed: u64) -> Self {
        Self {
            bird: Bird::new(&config),
            pipes: Pipes::new(),
            score: Score::new(),
            state: GameState::Menu(MenuPage::Main),
            spawner: Spawner::new(config.spawn_interval),
            restart_timer: None,
            sound_cooldown: Duration::ZERO,
            pressed: None,
            events: Events::default(),
            rng: StdRng::seed_from_u64(seed),
            frame: 0,
            rounds: 0,
            resets: 0,
            settings,
            config,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Rounds started since launch, from the menu or by restarting.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Restarts performed after a game over.
    pub fn resets(&self) -> u32 {
        self.resets
    }

    pub fn restart_pending(&self) -> bool {
        self.restart_timer.is_some()
    }

    /// Current draw scale of a button (above 1.0 right after a press).
    pub fn button_scale(&self, id: ButtonId) -> f64 {
        match self.pressed {
            Some((pressed, scale)) if pressed == id => scale,
            _ => 1.0,
        }
    }

    /// Returns the accumulated events and starts a fresh record.
    pub fn take_events(&mut self) -> Events {
        std::mem::take(&mut self.events)
    }

    pub fn handle(&mut self, action: Action) {
        match action {
            Action::Jump => self.jump(),
            Action::Click { x, y } => {
                if let Some(id) = buttons::hit(self.state, &self.config, x, y) {
                    self.press(id);
                }
            }
            Action::Press(id) => {
                let visible = buttons::layout(self.state, &self.config)
                    .iter()
                    .any(|b| b.id == id);
                if visible {
                    self.press(id);
                }
            }
        }
    }

    /// Advances one display frame that took `dt` of wall-clock time.
    pub fn tick(&mut self, dt: Duration) {
        self.frame += 1;
        self.sound_cooldown = self.sound_cooldown.saturating_sub(dt);

        if let Some((id, scale)) = self.pressed {
            let scale = scale - PRESS_POP_DECAY;
            self.pressed = (scale > 1.0).then_some((id, scale));
        }

        match self.state {
            GameState::Playing => self.step_round(dt),
            GameState::GameOver => {
                if let Some(remaining) = self.restart_timer {
                    if remaining <= dt {
                        self.restart();
                    } else {
                        self.restart_timer = Some(remaining - dt);
                    }
                }
            }
            GameState::Menu(_) | GameState::Paused => {}
        }
    }

    fn step_round(&mut self, dt: Duration) {
        self.bird.step(self.config.gravity);
        if self.bird.y > self.config.board_height {
            self.end_round("fell off the board");
        }

        let bounds = self.bird.bounds();
        let bird_x = self.bird.x;
        let skip_before = bird_x - self.config.collision_skip_margin;
        let mut collided = false;

        self.pipes.advance(self.settings.level.velocity());
        // New pairs start scrolling on the next frame.
        if self.spawner.advance(dt) {
            self.pipes.push(PipePair::spawn(&self.config, &mut self.rng));
        }
        for pair in self.pipes.iter_mut() {
            if !pair.passed && bird_x > pair.right() {
                pair.passed = true;
                self.score.add_half();
            }
            if pair.right() < skip_before {
                continue;
            }
            if pair.hits(&bounds) {
                collided = true;
                break;
            }
        }

        if collided {
            self.events.collided = true;
            self.end_round("hit a pipe");
        }
        if self.state == GameState::Playing {
            self.pipes.prune();
        }
    }

    fn jump(&mut self) {
        match self.state {
            GameState::Playing => {
                self.bird.jump(self.config.jump_velocity);
                self.events.flapped = true;
            }
            GameState::GameOver if self.restart_timer.is_none() => {
                debug!("restart armed");
                self.restart_timer = Some(self.config.restart_delay);
            }
            _ => {}
        }
    }

    fn press(&mut self, id: ButtonId) {
        if id.is_menu_button() {
            self.pressed = Some((id, PRESS_POP_SCALE));
        }

        match id {
            ButtonId::Play => {
                self.events.button_clicked = true;
                self.start_round();
            }
            ButtonId::Settings => {
                self.events.button_clicked = true;
                self.state = GameState::Menu(MenuPage::Settings);
            }
            ButtonId::Help => {
                self.events.button_clicked = true;
                self.state = GameState::Menu(MenuPage::Help);
            }
            ButtonId::Sound => {
                self.events.button_clicked = true;
                self.toggle_sound();
            }
            ButtonId::Level(level) => {
                self.events.button_clicked = true;
                info!("speed level set to {level}");
                self.settings.level = level;
            }
            ButtonId::Back => {
                self.events.back_pressed = true;
                self.go_to_menu();
            }
            ButtonId::Pause => self.toggle_pause(),
        }
    }

    fn start_round(&mut self) {
        self.state = GameState::Playing;
        self.spawner.reset();
        self.restart_timer = None;
        self.rounds += 1;
        info!("round {} started at level {}", self.rounds, self.settings.level);
    }

    fn end_round(&mut self, reason: &str) {
        if self.state != GameState::Playing {
            return;
        }
        self.state = GameState::GameOver;
        self.restart_timer = None;
        info!("round {} over ({reason}), score {}", self.rounds, self.score);
    }

    fn restart(&mut self) {
        self.bird = Bird::new(&self.config);
        self.pipes.clear();
        self.score.clear();
        self.resets += 1;
        debug!("board reset #{}", self.resets);
        self.start_round();
    }

    fn go_to_menu(&mut self) {
        self.state = GameState::Menu(MenuPage::Main);
        self.bird = Bird::new(&self.config);
        self.pipes.clear();
        self.score.clear();
        self.restart_timer = None;
    }

    fn toggle_pause(&mut self) {
        self.state = match self.state {
            GameState::Playing => GameState::Paused,
            GameState::Paused => GameState::Playing,
            other => other,
        };
        debug!("pause toggled, now {:?}", self.state);
    }

    fn toggle_sound(&mut self) {
        if !self.sound_cooldown.is_zero() {
            return;
        }
        self.settings.sound = !self.settings.sound;
        self.sound_cooldown = self.config.sound_toggle_debounce;
        info!("sound {}", if self.settings.sound { "on" } else { "off" });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn new_game() -> Game {
        Game::new(Config::new(), Settings::default(), 99)
    }

    fn playing_game() -> Game {
        let mut game = new_game();
        game.handle(Action::Press(ButtonId::Play));
        game.take_events();
        game
    }

    #[test]
    fn test_starts_on_main_menu() {
        let game = new_game();
        assert_eq!(game.state(), GameState::Menu(MenuPage::Main));
        assert_eq!(game.rounds(), 0);
        assert!(game.pipes.is_empty());
    }

    #[test]
    fn test_play_button_starts_round() {
        let mut game = new_game();
        game.handle(Action::Click { x: 180.0, y: 320.0 });
        assert_eq!(game.state(), GameState::Playing);
        let events = game.take_events();
        assert!(events.button_clicked);
        assert_eq!(game.rounds(), 1);
        assert_eq!(game.button_scale(ButtonId::Play), PRESS_POP_SCALE);
    }

    #[test]
    fn test_button_pop_decays() {
        let mut game = new_game();
        game.handle(Action::Press(ButtonId::Settings));
        for _ in 0..3 {
            game.tick(FRAME);
        }
        let scale = game.button_scale(ButtonId::Settings);
        assert!(scale > 1.0 && scale < PRESS_POP_SCALE);
        for _ in 0..10 {
            game.tick(FRAME);
        }
        assert_eq!(game.button_scale(ButtonId::Settings), 1.0);
    }

    #[test]
    fn test_hidden_shortcut_is_ignored() {
        let mut game = new_game();
        game.handle(Action::Press(ButtonId::Sound));
        assert!(game.settings.sound);
        game.handle(Action::Press(ButtonId::Pause));
        assert_eq!(game.state(), GameState::Menu(MenuPage::Main));
        assert_eq!(game.take_events(), Events::default());
    }

    #[test]
    fn test_jump_outside_round_is_noop() {
        let mut game = new_game();
        game.handle(Action::Jump);
        assert_eq!(game.bird.vy, 0.0);
        assert!(!game.take_events().flapped);
    }

    #[test]
    fn test_jump_flaps_while_playing() {
        let mut game = playing_game();
        game.handle(Action::Jump);
        assert_eq!(game.bird.vy, game.config.jump_velocity);
        assert!(game.take_events().flapped);
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut game = playing_game();
        game.handle(Action::Press(ButtonId::Pause));
        assert_eq!(game.state(), GameState::Paused);
        let y = game.bird.y;
        for _ in 0..200 {
            game.tick(FRAME);
        }
        assert_eq!(game.bird.y, y);
        assert!(game.pipes.is_empty());
        game.handle(Action::Click { x: 180.0, y: 35.0 });
        assert_eq!(game.state(), GameState::Playing);
        game.tick(FRAME);
        assert!(game.bird.y > y);
    }

    #[test]
    fn test_jump_ignored_while_paused() {
        let mut game = playing_game();
        game.handle(Action::Press(ButtonId::Pause));
        game.handle(Action::Jump);
        assert_eq!(game.bird.vy, 0.0);
    }

    #[test]
    fn test_falling_below_board_ends_round() {
        let mut game = playing_game();
        game.bird.y = game.config.board_height;
        game.tick(FRAME);
        assert_eq!(game.state(), GameState::GameOver);
        assert!(!game.take_events().collided);
    }

    #[test]
    fn test_pipe_collision_ends_round() {
        let mut game = playing_game();
        let config = game.config.clone();
        // Top pipe covers the bird's row.
        game.pipes.push(PipePair::at(&config, game.bird.x, game.bird.y + 100.0 - config.pipe_height));
        game.tick(FRAME);
        assert_eq!(game.state(), GameState::GameOver);
        assert!(game.take_events().collided);
        // Pipes are kept on screen behind the game-over overlay.
        assert_eq!(game.pipes.len(), 1);
    }

    #[test]
    fn test_passing_pair_scores_half_point_once() {
        let mut game = playing_game();
        let config = game.config.clone();
        // Right edge one unit past the bird, opening around the bird's row.
        let x = game.bird.x - config.pipe_width + 1.0;
        game.pipes.push(PipePair::at(&config, x, -250.0));
        game.tick(FRAME);
        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(game.score.value(), 0.5);
        for _ in 0..5 {
            game.bird.vy = 0.0;
            game.tick(FRAME);
        }
        assert_eq!(game.score.value(), 0.5);
    }

    #[test]
    fn test_spawns_on_interval() {
        let mut game = playing_game();
        game.tick(Duration::from_millis(1499));
        assert!(game.pipes.is_empty());
        game.bird.y = 100.0;
        game.bird.vy = 0.0;
        game.tick(Duration::from_millis(1));
        assert_eq!(game.pipes.len(), 1);
        let pair = game.pipes.iter().next().unwrap();
        assert_eq!(pair.x, game.config.spawn_x());
    }

    #[test]
    fn test_long_frame_spawns_one_pair() {
        let mut game = playing_game();
        game.tick(Duration::from_secs(6));
        assert_eq!(game.pipes.len(), 1);
        assert_eq!(game.pipes.iter().next().unwrap().x, game.config.spawn_x());
        game.bird.y = 100.0;
        game.bird.vy = 0.0;
        game.tick(Duration::from_millis(16));
        assert_eq!(game.pipes.len(), 1);
    }

    #[test]
    fn test_restart_after_delay() {
        let mut game = playing_game();
        game.bird.y = game.config.board_height;
        game.tick(FRAME);
        assert_eq!(game.state(), GameState::GameOver);

        game.handle(Action::Jump);
        assert!(game.restart_pending());
        game.tick(Duration::from_millis(300));
        assert_eq!(game.state(), GameState::GameOver);
        game.tick(Duration::from_millis(200));
        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(game.resets(), 1);
        assert_eq!(game.rounds(), 2);
        assert_eq!(game.bird.vy, 0.0);
        assert_eq!(game.bird.y, game.config.bird_start_y());
    }

    #[test]
    fn test_back_goes_to_menu_and_clears_round() {
        let mut game = playing_game();
        let config = game.config.clone();
        game.pipes.push(PipePair::at(&config, 300.0, -200.0));
        game.score.add_half();
        game.bird.y = 12.0;
        game.handle(Action::Press(ButtonId::Back));
        assert_eq!(game.state(), GameState::Menu(MenuPage::Main));
        assert!(game.pipes.is_empty());
        assert_eq!(game.score, Score::new());
        assert_eq!(game.bird.y, config.bird_start_y());
        assert!(game.take_events().back_pressed);
    }

    #[test]
    fn test_sound_toggle_debounced() {
        let mut game = new_game();
        game.handle(Action::Press(ButtonId::Settings));
        game.handle(Action::Press(ButtonId::Sound));
        assert!(!game.settings.sound);
        game.handle(Action::Press(ButtonId::Sound));
        assert!(!game.settings.sound);
        game.tick(Duration::from_millis(300));
        game.handle(Action::Press(ButtonId::Sound));
        assert!(game.settings.sound);
    }

    #[test]
    fn test_level_selection() {
        let mut game = new_game();
        game.handle(Action::Press(ButtonId::Settings));
        game.handle(Action::Click { x: 180.0, y: 400.0 });
        assert_eq!(game.settings.level, SpeedLevel::Medium);
        game.handle(Action::Press(ButtonId::Level(SpeedLevel::Soft)));
        assert_eq!(game.settings.level, SpeedLevel::Soft);
    }

    #[test]
    fn test_help_page_and_back() {
        let mut game = new_game();
        game.handle(Action::Press(ButtonId::Help));
        assert_eq!(game.state(), GameState::Menu(MenuPage::Help));
        game.handle(Action::Click { x: 340.0, y: 40.0 });
        assert_eq!(game.state(), GameState::Menu(MenuPage::Main));
    }
}
