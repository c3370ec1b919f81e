use std::sync::{Mutex, MutexGuard, TryLockError};

use once_cell::sync::Lazy;
use serde::Serialize;
use tracing::warn;
use wasm_bindgen::prelude::*;
use web_time::Instant;

pub mod board;
pub mod config;
pub mod game;
pub mod grid;
pub mod rules;
pub mod types;
pub mod view;

use config::GameConfig;
use grid::GridGame;
use types::GameError;
use view::OthelloView;

/// The single in-memory session driven by the page.
static SESSION: Lazy<Mutex<Option<OthelloView>>> = Lazy::new(|| Mutex::new(None));

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Another call is still running; dispatch must be serialized.
    #[error("session is busy")]
    Busy,

    #[error("no game has been started")]
    NoSession,

    #[error("game is still in progress")]
    InProgress,

    #[error(transparent)]
    Game(#[from] GameError),
}

impl From<SessionError> for JsValue {
    fn from(err: SessionError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

fn lock_session() -> Result<MutexGuard<'static, Option<OthelloView>>, SessionError> {
    match SESSION.try_lock() {
        Ok(guard) => Ok(guard),
        Err(TryLockError::WouldBlock) => {
            warn!("re-entrant session call rejected");
            Err(SessionError::Busy)
        }
        Err(TryLockError::Poisoned(poisoned)) => Ok(poisoned.into_inner()),
    }
}

fn with_session<T>(
    f: impl FnOnce(&mut OthelloView) -> Result<T, SessionError>,
) -> Result<T, SessionError> {
    let mut guard = lock_session()?;
    let view = guard.as_mut().ok_or(SessionError::NoSession)?;
    f(view)
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

/// Starts a new game, replacing any current one. `config` may be
/// `undefined` for the defaults.
#[wasm_bindgen]
pub fn new_game(config: JsValue) -> Result<JsValue, JsValue> {
    let config: GameConfig = if config.is_undefined() || config.is_null() {
        GameConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)?
    };
    let view = OthelloView::new(&config).map_err(SessionError::from)?;
    let state = view.game().to_game_state();

    *lock_session()? = Some(view);
    to_js(&state)
}

#[wasm_bindgen]
pub fn attempt_move(row: usize, col: usize) -> Result<JsValue, JsValue> {
    let outcome = with_session(|view| Ok(view.play_at(row, col, Instant::now())?))?;
    to_js(&outcome)
}

/// Handles a click at canvas pixel `(x, y)`.
#[wasm_bindgen]
pub fn click(x: i32, y: i32) -> Result<JsValue, JsValue> {
    let outcome = with_session(|view| Ok(view.click_at(x, y)?))?;
    to_js(&outcome)
}

#[wasm_bindgen]
pub fn paint_board() -> Result<JsValue, JsValue> {
    let cells = with_session(|view| Ok(view.paint_all()))?;
    to_js(&cells)
}

#[wasm_bindgen]
pub fn get_state() -> Result<JsValue, JsValue> {
    let state = with_session(|view| Ok(view.game().to_game_state()))?;
    to_js(&state)
}

#[wasm_bindgen]
pub fn get_result() -> Result<JsValue, JsValue> {
    let result = with_session(|view| {
        if !view.game().is_game_over() {
            return Err(SessionError::InProgress);
        }
        Ok(view.game().to_game_result())
    })?;
    to_js(&result)
}

#[wasm_bindgen]
pub fn get_legal_moves() -> Result<JsValue, JsValue> {
    let moves = with_session(|view| Ok(view.game().legal_moves()))?;
    to_js(&moves)
}

#[wasm_bindgen]
pub fn status_text() -> Result<String, JsValue> {
    with_session(|view| Ok(view.status_text().to_string())).map_err(JsValue::from)
}

#[wasm_bindgen]
pub fn set_show_legal_moves(show: bool) -> Result<(), JsValue> {
    with_session(|view| {
        view.set_show_legal_moves(show);
        Ok(())
    })
    .map_err(JsValue::from)
}

#[wasm_bindgen]
pub fn resize(width: u32, height: u32) -> Result<(), JsValue> {
    with_session(|view| {
        view.resize(width, height);
        Ok(())
    })
    .map_err(JsValue::from)
}

#[wasm_bindgen]
pub fn restart() -> Result<JsValue, JsValue> {
    let state = with_session(|view| {
        view.restart();
        Ok(view.game().to_game_state())
    })?;
    to_js(&state)
}

/// Advances highlight timers. Returns true when the board needs a repaint.
#[wasm_bindgen]
pub fn tick() -> Result<bool, JsValue> {
    with_session(|view| Ok(view.tick(Instant::now()))).map_err(JsValue::from)
}
