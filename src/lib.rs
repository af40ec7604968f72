//! Skyflap - a Flappy Bird style side-scroller for the terminal.
//!
//! The game plays on a fixed 360x640 logical canvas which is rasterised into
//! half-block pixels. The library holds the game logic so it can be tested
//! without a terminal; the binary only wires it to the screen.

pub mod config;
pub mod game;
pub mod i18n;
pub mod render;
pub mod scene;
pub mod shell;
pub mod sound;
pub mod storage;
