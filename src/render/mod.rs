//! Terminal drawing: a half-block pixel canvas, a tiny bitmap font, and the
//! painters that turn a [`Game`](crate::game::Game) into pixels.

pub mod canvas;
pub mod font;
pub mod scene;
pub mod viewport;

pub use canvas::{Canvas, Rgb};
pub use scene::{LETTERBOX, draw};
pub use viewport::Viewport;
