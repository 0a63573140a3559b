//! Screen-space layout and the drawing collaborator.

use serde::Serialize;
use tracing::trace;

use crate::assets::{Handle, Texture};
use crate::cell::{BOARD_SIZE, Cell};

/// Side of the logical canvas in pixels.
pub const CANVAS_SIZE: f32 = 450.0;

/// Axis-aligned rectangle with half-open containment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Rect {
    pub fn from_origin_size(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x0: x,
            y0: y,
            x1: x + width,
            y1: y + height,
        }
    }

    /// `x0 <= x < x1 && y0 <= y < y1`.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.x0 <= x && x < self.x1 && self.y0 <= y && y < self.y1
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }
}

/// Maps board cells to canvas rectangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardLayout {
    pub canvas_size: f32,
}

impl BoardLayout {
    pub fn new(canvas_size: f32) -> Self {
        Self { canvas_size }
    }

    pub fn cell_size(&self) -> f32 {
        self.canvas_size / BOARD_SIZE as f32
    }

    pub fn board_rect(&self) -> Rect {
        Rect::from_origin_size(0.0, 0.0, self.canvas_size, self.canvas_size)
    }

    pub fn cell_rect(&self, cell: Cell) -> Rect {
        let size = self.cell_size();
        Rect::from_origin_size(size * cell.x as f32, size * cell.y as f32, size, size)
    }

    /// Cell under the pointer, if any.
    pub fn cell_at(&self, x: f32, y: f32) -> Option<Cell> {
        Cell::scan_order().find(|&cell| self.cell_rect(cell).contains(x, y))
    }
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self::new(CANVAS_SIZE)
    }
}

/// Rendering backend: blits a texture into a canvas rectangle.
pub trait Canvas {
    fn draw(&mut self, texture: Handle<Texture>, rect: Rect);
}

/// One recorded blit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DrawCommand {
    pub texture: Handle<Texture>,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Canvas that records draw calls for a host to replay.
#[derive(Debug, Default, Clone)]
pub struct CommandBuffer {
    commands: Vec<DrawCommand>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Hands out the recorded commands and leaves the buffer empty.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Canvas for CommandBuffer {
    fn draw(&mut self, texture: Handle<Texture>, rect: Rect) {
        trace!(?texture, ?rect, "draw");
        self.commands.push(DrawCommand {
            texture,
            x: rect.x0,
            y: rect.y0,
            width: rect.width(),
            height: rect.height(),
        });
    }
}
