use crate::bird::Bird;
use crate::buttons::{self, Button, ButtonId};
use crate::game::{Game, GameState, MenuPage};
use crate::geometry::Rect;
use crate::obstacle::PipePair;

use super::canvas::{Canvas, Rgb};
use super::font::{self, GLYPH_H};
use super::viewport::Viewport;

// ── Colors ──────────────────────────────────────────────────────────────────

pub const LETTERBOX: Rgb = Rgb(18, 22, 30);
const SKY_TOP: Rgb = Rgb(70, 180, 200);
const SKY_BOT: Rgb = Rgb(190, 232, 245);
const MENU_BG: Rgb = Rgb(173, 216, 230);
const PIPE_L: Rgb = Rgb(74, 122, 26);
const PIPE_M: Rgb = Rgb(100, 170, 40);
const PIPE_R: Rgb = Rgb(115, 191, 46);
const PIPE_HI: Rgb = Rgb(145, 215, 62);
const CAP_DARK: Rgb = Rgb(60, 100, 20);
const BIRD_Y: Rgb = Rgb(245, 200, 66);
const BIRD_HI: Rgb = Rgb(255, 225, 100);
const BIRD_WING: Rgb = Rgb(215, 165, 35);
const BIRD_EYE: Rgb = Rgb(255, 255, 255);
const BIRD_PUPIL: Rgb = Rgb(20, 20, 20);
const BIRD_BEAK: Rgb = Rgb(225, 75, 35);
const BUTTON: Rgb = Rgb(0, 0, 255);
const BUTTON_SELECTED: Rgb = Rgb(40, 120, 255);
const WHITE: Rgb = Rgb(255, 255, 255);
const BLACK: Rgb = Rgb(0, 0, 0);
const SHADOW: Rgb = Rgb(30, 30, 30);

/// Pipe cap height and overhang, in board units.
const CAP_H: f64 = 24.0;
const CAP_OVERHANG: f64 = 4.0;

/// Paints one frame of `game` onto `canvas`.
pub fn draw(game: &Game, canvas: &mut Canvas) {
    canvas.clear(LETTERBOX);
    let vp = Viewport::fit(
        canvas.width(),
        canvas.height(),
        game.config.board_width,
        game.config.board_height,
    );
    let mut p = Painter { canvas, vp, game };

    match game.state() {
        GameState::Menu(page) => p.menu(page),
        state => {
            p.world();
            p.hud(state);
            match state {
                GameState::Paused => p.paused(),
                GameState::GameOver => p.game_over(),
                _ => {}
            }
        }
    }
}

struct Painter<'a> {
    canvas: &'a mut Canvas,
    vp: Viewport,
    game: &'a Game,
}

impl Painter<'_> {
    fn board_w(&self) -> f64 {
        self.game.config.board_width
    }

    fn board_h(&self) -> f64 {
        self.game.config.board_height
    }

    fn fill(&mut self, r: &Rect, c: Rgb) {
        let (x, y, w, h) = self.vp.px_rect(r);
        self.canvas.fill_rect(x, y, w, h, c);
    }

    fn veil(&mut self) {
        let (x, y, w, h) = self.vp.board_rect();
        self.canvas.dim_rect(x, y, w, h);
    }

    /// Text whose top edge sits at board `y`, horizontally centered on `cx`.
    fn text_centered(&mut self, cx: f64, y: f64, text: &str, size: f64, c: Rgb) {
        let scale = self.vp.text_scale(size);
        let x = self.vp.px_x(cx) - font::text_width(text, scale) / 2;
        font::draw_text(self.canvas, x, self.vp.px_y(y), text, scale, c);
    }

    fn text_at(&mut self, x: f64, y: f64, text: &str, size: f64, c: Rgb) {
        let scale = self.vp.text_scale(size);
        font::draw_text_shadowed(self.canvas, self.vp.px_x(x), self.vp.px_y(y), text, scale, c, SHADOW);
    }

    // ── Menus ───────────────────────────────────────────────────────────

    fn menu(&mut self, page: MenuPage) {
        let (x, y, w, h) = self.vp.board_rect();
        self.canvas.fill_rect(x, y, w, h, MENU_BG);
        let cx = self.board_w() / 2.0;

        match page {
            MenuPage::Main => self.text_centered(cx, self.board_h() / 4.0 - 30.0, "FLAPPY BIRD", 40.0, BLACK),
            MenuPage::Settings => self.text_centered(cx, 60.0, "SETTINGS", 30.0, BLACK),
            MenuPage::Help => {
                let mid = self.board_h() / 2.0;
                self.text_centered(cx, mid - 60.0, "SPACE, UP OR X", 15.0, BLACK);
                self.text_centered(cx, mid - 30.0, "TO JUMP", 15.0, BLACK);
                self.text_centered(cx, mid + 20.0, "AVOID THE PIPES!", 15.0, BLACK);
            }
        }

        for button in buttons::layout(GameState::Menu(page), &self.game.config) {
            if button.id.is_menu_button() {
                self.menu_button(&button);
            } else {
                self.glyph_button(&button);
            }
        }
    }

    fn menu_button(&mut self, button: &Button) {
        let s = self.game.button_scale(button.id);
        let r = &button.rect;
        let grown = Rect::centered(r.x + r.w / 2.0, r.y + r.h / 2.0, r.w * s, r.h * s);
        let selected = button.id == ButtonId::Level(self.game.settings.level);
        self.fill(&grown, if selected { BUTTON_SELECTED } else { BUTTON });

        let label = self.label(button.id);
        let scale = self.vp.text_scale(20.0 * s);
        let (px, py, pw, ph) = self.vp.px_rect(&grown);
        let tx = px + (pw - font::text_width(&label, scale)) / 2;
        let ty = py + (ph - GLYPH_H * scale) / 2;
        font::draw_text(self.canvas, tx, ty, &label, scale, WHITE);
    }

    fn label(&self, id: ButtonId) -> String {
        match id {
            ButtonId::Play => "PLAY".into(),
            ButtonId::Settings => "SETTINGS".into(),
            ButtonId::Help => "HELP".into(),
            ButtonId::Sound => format!("SOUND: {}", if self.game.settings.sound { "ON" } else { "OFF" }),
            ButtonId::Level(level) => level.name().to_ascii_uppercase(),
            ButtonId::Back => "<-".into(),
            ButtonId::Pause => "||".into(),
        }
    }

    fn glyph_button(&mut self, button: &Button) {
        let r = button.rect;
        let label = self.label(button.id);
        self.text_at(r.x + 4.0, r.y + 4.0, &label, r.h * 0.75, WHITE);
    }

    // ── Round ───────────────────────────────────────────────────────────

    fn world(&mut self) {
        let (x, y, w, h) = self.vp.board_rect();
        self.canvas.gradient_rect(x, y, w, h, SKY_TOP, SKY_BOT);
        let game = self.game;
        for pair in game.pipes.iter() {
            self.pipe_pair(pair);
        }
        self.bird(&game.bird);
        // Pipes may start off-board; keep the letterbox clean.
        self.clip_letterbox();
    }

    fn clip_letterbox(&mut self) {
        let (bx, _, bw, _) = self.vp.board_rect();
        let ch = self.canvas.height() as i32;
        let cw = self.canvas.width() as i32;
        self.canvas.fill_rect(0, 0, bx, ch, LETTERBOX);
        self.canvas.fill_rect(bx + bw, 0, cw - bx - bw, ch, LETTERBOX);
    }

    fn pipe_pair(&mut self, pair: &PipePair) {
        let top = pair.top();
        let bottom = pair.bottom();
        self.pipe_body(&top);
        self.pipe_body(&bottom);
        self.pipe_cap(&Rect::new(top.x - CAP_OVERHANG, top.bottom() - CAP_H, top.w + 2.0 * CAP_OVERHANG, CAP_H));
        self.pipe_cap(&Rect::new(bottom.x - CAP_OVERHANG, bottom.y, bottom.w + 2.0 * CAP_OVERHANG, CAP_H));
    }

    fn pipe_body(&mut self, r: &Rect) {
        let (x, y, w, h) = self.vp.px_rect(r);
        for dx in 0..w {
            self.canvas.fill_rect(x + dx, y, 1, h, pipe_shade(dx, w));
        }
    }

    fn pipe_cap(&mut self, r: &Rect) {
        self.pipe_body(r);
        let (x, y, w, h) = self.vp.px_rect(r);
        self.canvas.fill_rect(x, y, w, 1, CAP_DARK);
        self.canvas.fill_rect(x, y + h - 1, w, 1, CAP_DARK);
    }

    fn bird(&mut self, bird: &Bird) {
        let (x, y, w, h) = self.vp.px_rect(&bird.bounds());
        self.canvas.fill_rect(x, y, w, h, BIRD_Y);
        self.canvas.fill_rect(x + 1, y, (w - 2).max(1), 1, BIRD_HI);

        // Wing flaps every few frames.
        let wing_y = if self.game.frame() % 8 < 4 { y + h / 3 } else { y + h / 2 };
        self.canvas.fill_rect(x, wing_y, (w / 2).max(1), (h / 3).max(1), BIRD_WING);

        let eye = (w / 4).max(1);
        self.canvas.fill_rect(x + w - eye - 1, y + 1, eye, eye, BIRD_EYE);
        self.canvas.set(x + w - 2, y + eye, BIRD_PUPIL);

        let beak_w = (w / 4).max(1);
        self.canvas.fill_rect(x + w, y + h / 2, beak_w, (h / 4).max(1), BIRD_BEAK);
    }

    fn hud(&mut self, state: GameState) {
        let w = self.board_w();
        let h = self.board_h();

        if state != GameState::GameOver {
            let score = self.game.score.to_string();
            self.text_at(5.0, 8.0, &score, 45.0, WHITE);
        }
        let level = format!("LEVEL: {}", self.game.settings.level.name());
        self.text_at(5.0, h - 30.0, &level, 20.0, WHITE);

        self.glyph_button(&buttons::back_button(&self.game.config));
        if state == GameState::Playing {
            let pause = buttons::pause_button(&self.game.config);
            self.text_centered(w / 2.0, pause.rect.y + 4.0, "||", 24.0, WHITE);
        }
    }

    fn paused(&mut self) {
        self.veil();
        let cx = self.board_w() / 2.0;
        self.text_centered(cx, self.board_h() / 2.0 - 20.0, "GAME PAUSED", 40.0, WHITE);
    }

    fn game_over(&mut self) {
        self.veil();
        let cx = self.board_w() / 2.0;
        let mid = self.board_h() / 2.0;
        let score = format!("SCORE: {}", self.game.score);
        self.text_centered(cx, mid - 70.0, "GAME OVER!", 40.0, WHITE);
        self.text_centered(cx, mid, &score, 30.0, WHITE);
        if !self.game.restart_pending() {
            self.text_centered(cx, mid + 60.0, "SPACE TO RETRY", 15.0, WHITE);
        }
    }
}

fn pipe_shade(x: i32, total_w: i32) -> Rgb {
    if total_w <= 1 {
        return PIPE_M;
    }
    let t = (x as f64 / (total_w - 1) as f64 * 256.0) as u16;
    if t < 64 {
        PIPE_L.towards(PIPE_M, (t * 4).min(256))
    } else if t < 100 {
        PIPE_M.towards(PIPE_HI, ((t - 64) * 7).min(256))
    } else if t < 160 {
        PIPE_HI.towards(PIPE_R, ((t - 100) * 4).min(256))
    } else {
        PIPE_R.towards(PIPE_L, ((t - 160) * 3).min(256))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::game::{Action, Settings};
    use std::time::Duration;

    fn canvas() -> Canvas {
        Canvas::new(120, 128, BLACK)
    }

    fn count(canvas: &Canvas, c: Rgb) -> usize {
        let mut n = 0;
        for y in 0..canvas.height() as i32 {
            for x in 0..canvas.width() as i32 {
                if canvas.get(x, y) == Some(c) {
                    n += 1;
                }
            }
        }
        n
    }

    #[test]
    fn test_menu_draws_buttons() {
        let game = Game::new(Config::new(), Settings::default(), 1);
        let mut canvas = canvas();
        draw(&game, &mut canvas);
        assert!(count(&canvas, MENU_BG) > 0);
        assert!(count(&canvas, BUTTON) > 0);
        // Letterbox on both sides of the 72-pixel-wide board.
        assert_eq!(canvas.get(0, 0), Some(LETTERBOX));
        assert_eq!(canvas.get(119, 127), Some(LETTERBOX));
    }

    #[test]
    fn test_selected_level_is_highlighted() {
        let mut game = Game::new(Config::new(), Settings::default(), 1);
        game.handle(Action::Press(ButtonId::Settings));
        let mut canvas = canvas();
        draw(&game, &mut canvas);
        assert!(count(&canvas, BUTTON_SELECTED) > 0);
    }

    #[test]
    fn test_round_draws_bird_and_pipes() {
        let mut game = Game::new(Config::new(), Settings::default(), 1);
        game.handle(Action::Press(ButtonId::Play));
        game.tick(Duration::from_millis(1500));
        assert_eq!(game.pipes.len(), 1);
        let mut canvas = canvas();
        draw(&game, &mut canvas);
        assert!(count(&canvas, BIRD_Y) > 0);
        assert!(count(&canvas, CAP_DARK) > 0);
    }

    #[test]
    fn test_game_over_veils_board() {
        let mut game = Game::new(Config::new(), Settings::default(), 1);
        game.handle(Action::Press(ButtonId::Play));
        game.bird.y = game.config.board_height;
        game.tick(Duration::from_millis(16));
        assert_eq!(game.state(), GameState::GameOver);
        let mut canvas = canvas();
        draw(&game, &mut canvas);
        assert_eq!(count(&canvas, BIRD_Y), 0);
        assert_eq!(count(&canvas, SKY_TOP), 0);
    }

    #[test]
    fn test_pipe_shade_edges() {
        assert_eq!(pipe_shade(0, 1), PIPE_M);
        assert_eq!(pipe_shade(0, 10), PIPE_L);
    }
}
