//! Display abstraction for Lodestar
//!
//! This crate provides:
//! - `DrawCommand` / `DrawList`: the per-tick output of the view renderer
//! - `ColorClass` / `FontClass`: semantic styling the surface maps to pixels
//! - `DisplaySurface` trait for the pixel/font rendering collaborator
//!
//! # Architecture
//!
//! The core never touches a framebuffer. Each tick it produces an ordered
//! list of text commands; the surface implementation clears the screen,
//! draws them in order and flushes. Color classes stay semantic ("ideal",
//! "muted") so the same views work on a monochrome OLED and a color TFT.

#![no_std]

pub mod backend;
pub mod draw;

// Re-export key types
pub use backend::{present, DisplayError, DisplaySurface};
pub use draw::{
    ColorClass, DrawCommand, DrawList, FontClass, LINE_LEN, MAX_DRAW_COMMANDS, SCREEN_ROWS,
};
