//! Terminal "game renderer".
//!
//! A small, game-oriented rendering layer: the view draws a snapshot into a
//! framebuffer, the renderer flushes that framebuffer to the terminal.
//! No widget toolkit is involved.
//!
//! - [`fb`]: styled character framebuffer
//! - [`palette`]: display colour per piece identifier
//! - [`game_view`]: snapshot to framebuffer (pure)
//! - [`renderer`]: framebuffer to crossterm, diff based

pub mod fb;
pub mod game_view;
pub mod palette;
pub mod renderer;

pub use stackfall_core as core;
pub use stackfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use palette::{Palette, COLORS};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
