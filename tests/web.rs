#![cfg(target_arch = "wasm32")]

use corners::wasm::WebGame;
use js_sys::{Array, Reflect};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

fn field(value: &JsValue, key: &str) -> JsValue {
    Reflect::get(value, &JsValue::from_str(key)).unwrap()
}

#[wasm_bindgen_test]
fn first_frame_draws_board_and_pieces() {
    let mut game = WebGame::new(JsValue::UNDEFINED).map_err(JsValue::from).unwrap();

    let frame = game.frame().map_err(JsValue::from).unwrap();

    assert_eq!(field(&frame, "running").as_bool(), Some(true));
    assert_eq!(Array::from(&field(&frame, "commands")).length(), 19);
}

#[wasm_bindgen_test]
fn click_sequence_moves_a_piece_and_passes_the_turn() {
    let mut game = WebGame::new(JsValue::UNDEFINED).map_err(JsValue::from).unwrap();

    game.pointer_pressed(300.0, 140.0);
    game.frame().map_err(JsValue::from).unwrap();
    game.pointer_pressed(300.0, 180.0);
    game.frame().map_err(JsValue::from).unwrap();

    let state = game.state().map_err(JsValue::from).unwrap();
    assert_eq!(field(&state, "active_player").as_string().as_deref(), Some("black"));
    let board = Array::from(&field(&state, "board"));
    assert_eq!(board.get(5 + 3 * 8).as_f64(), Some(1.0));
    assert_eq!(board.get(5 + 2 * 8).as_f64(), Some(0.0));
}

#[wasm_bindgen_test]
fn quit_stops_the_loop() {
    let mut game = WebGame::new(JsValue::UNDEFINED).map_err(JsValue::from).unwrap();

    game.quit();
    let frame = game.frame().map_err(JsValue::from).unwrap();

    assert_eq!(field(&frame, "running").as_bool(), Some(false));
}

#[wasm_bindgen_test]
fn legal_moves_lists_step_targets() {
    let game = WebGame::new(JsValue::UNDEFINED).map_err(JsValue::from).unwrap();

    let moves = Array::from(&game.legal_moves(5, 2).map_err(JsValue::from).unwrap());

    assert_eq!(moves.length(), 2);
}

#[wasm_bindgen_test]
fn module_reports_ready() {
    assert!(corners::wasm_ready());
}
