//! Browser tests for the WASM entry points. Run with `wasm-pack test`.
#![cfg(target_arch = "wasm32")]

use js_sys::{Object, Reflect};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn field(value: &JsValue, key: &str) -> JsValue {
    Reflect::get(value, &JsValue::from_str(key)).unwrap()
}

#[wasm_bindgen_test]
fn new_game_with_default_config_starts_black() {
    let state = othello_grid::new_game(JsValue::UNDEFINED).unwrap();

    assert_eq!(field(&state, "size").as_f64(), Some(8.0));
    assert_eq!(field(&state, "current_player").as_string().as_deref(), Some("black"));
    assert_eq!(field(&state, "black_count").as_f64(), Some(2.0));
}

#[wasm_bindgen_test]
fn new_game_accepts_partial_config_object() {
    let config = Object::new();
    Reflect::set(&config, &JsValue::from_str("boardSize"), &JsValue::from_f64(6.0)).unwrap();

    let state = othello_grid::new_game(config.into()).unwrap();

    assert_eq!(field(&state, "size").as_f64(), Some(6.0));
}

#[wasm_bindgen_test]
fn move_outcome_and_rejection_cross_the_boundary() {
    othello_grid::new_game(JsValue::UNDEFINED).unwrap();

    let outcome = othello_grid::attempt_move(2, 3).unwrap();
    assert_eq!(field(&outcome, "kind").as_string().as_deref(), Some("advanced"));
    assert_eq!(field(&outcome, "next").as_string().as_deref(), Some("white"));

    let err = othello_grid::attempt_move(0, 0).unwrap_err();
    assert_eq!(err.as_string().as_deref(), Some("illegal move at (0, 0)"));
    assert_eq!(othello_grid::status_text().unwrap(), "White to move");
}

#[wasm_bindgen_test]
fn result_is_unavailable_while_playing() {
    othello_grid::new_game(JsValue::UNDEFINED).unwrap();

    let err = othello_grid::get_result().unwrap_err();
    assert_eq!(err.as_string().as_deref(), Some("game is still in progress"));
}
