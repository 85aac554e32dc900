//! A Flappy Bird clone for the terminal: a bird falls under gravity and must
//! slip through scrolling pipe pairs, with a menu, settings, pause and a
//! game-over screen.
//!
//! The simulation ([`game`]) is plain data stepped once per frame and is
//! independent of the terminal; [`render`], [`input`] and [`audio`] adapt it
//! to crossterm, and to fundsp/rodio for sound.

pub mod audio;
pub mod bird;
pub mod buttons;
pub mod config;
pub mod error;
pub mod game;
pub mod geometry;
pub mod input;
pub mod level;
pub mod obstacle;
pub mod render;
pub mod score;

pub use bird::Bird;
pub use config::{Config, Options, Params};
pub use error::{FlappyError, Result};
pub use game::{Action, Events, Game, GameState, MenuPage, Settings};
pub use geometry::Rect;
pub use level::SpeedLevel;
pub use obstacle::{PipePair, Pipes, Spawner};
pub use score::Score;
