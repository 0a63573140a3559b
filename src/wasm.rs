//! Browser binding. JavaScript owns the window: it forwards pointer events,
//! calls [`WebGame::frame`] from `requestAnimationFrame` and blits the
//! returned draw commands.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::assets::PathLoader;
use crate::cell::Cell;
use crate::config::GameConfig;
use crate::error::CornersError;
use crate::event_loop::{ControlFlow, Event, EventLoop, LoopStatus, QueuedEvents};
use crate::moves::available_moves;
use crate::render::{CommandBuffer, DrawCommand};
use crate::session::Session;

/// What JavaScript needs to render one frame.
#[derive(Debug, Serialize)]
pub struct Frame {
    pub running: bool,
    pub commands: Vec<DrawCommand>,
}

#[wasm_bindgen]
pub struct WebGame {
    session: Session,
    event_loop: EventLoop<QueuedEvents>,
    canvas: CommandBuffer,
}

#[wasm_bindgen]
impl WebGame {
    /// `config` is a plain object shaped like the TOML config, or
    /// `undefined` for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WebGame, JsError> {
        let config = if config.is_undefined() || config.is_null() {
            GameConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(CornersError::from)?
        };
        let session = Session::new(&config, &mut PathLoader)?;
        Ok(Self {
            session,
            event_loop: EventLoop::new(QueuedEvents::new()),
            canvas: CommandBuffer::new(),
        })
    }

    pub fn pointer_pressed(&mut self, x: f32, y: f32) {
        self.event_loop.source_mut().push(Event::PointerPressed { x, y });
    }

    pub fn pointer_released(&mut self, x: f32, y: f32) {
        self.event_loop.source_mut().push(Event::PointerReleased { x, y });
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.event_loop.source_mut().push(Event::PointerMoved { x, y });
    }

    pub fn quit(&mut self) {
        self.event_loop.source_mut().push(Event::Quit);
    }

    /// Runs one loop iteration and returns a `Frame`.
    pub fn frame(&mut self) -> Result<JsValue, JsError> {
        let session = &mut self.session;
        let canvas = &mut self.canvas;
        let status = self
            .event_loop
            .pump(&mut |event: &Event, source: &QueuedEvents, flow: &mut ControlFlow| {
                session.handle_event(event, source, flow, canvas);
            });
        let frame = Frame {
            running: matches!(status, LoopStatus::Running { .. }),
            commands: self.canvas.take(),
        };
        to_js(&frame)
    }

    /// Current `GameState`.
    pub fn state(&self) -> Result<JsValue, JsError> {
        to_js(&self.session.game().to_game_state())
    }

    /// Cells the piece on `(x, y)` could move to, as `{x, y}` objects.
    pub fn legal_moves(&self, x: i32, y: i32) -> Result<JsValue, JsError> {
        let source = Cell::new(x, y);
        let board = self.session.game().board();
        let moves: Vec<Cell> = if board.is_occupied(source) {
            available_moves(board, source).into_iter().collect()
        } else {
            Vec::new()
        };
        to_js(&moves)
    }

    /// Texture paths indexed by the handle ids used in draw commands.
    pub fn textures(&self) -> Result<JsValue, JsError> {
        let sprites = self.session.sprites();
        let textures = &self.session.assets().textures;
        let mut paths = Vec::new();
        for handle in [sprites.board, sprites.white, sprites.black, sprites.select] {
            let info = textures.require(handle)?;
            paths.push((handle.id(), info.path.clone()));
        }
        to_js(&paths)
    }
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    Ok(serde_wasm_bindgen::to_value(value).map_err(CornersError::from)?)
}
