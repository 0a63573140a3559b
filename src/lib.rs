use wasm_bindgen::prelude::*;

pub mod assets;
pub mod board;
pub mod cell;
pub mod config;
pub mod error;
pub mod event_loop;
pub mod game;
pub mod moves;
pub mod render;
pub mod replay;
pub mod session;
pub mod types;
pub mod wasm;

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
