//! One running game: rules, layout and sprites, driven by loop events.

use tracing::{debug, info, instrument};

use crate::assets::{AssetLoader, AssetManager, Handle, Texture, TextureInfo};
use crate::cell::Cell;
use crate::config::GameConfig;
use crate::error::CornersError;
use crate::event_loop::{ControlFlow, Event, EventSource};
use crate::game::{Game, PressOutcome};
use crate::render::{BoardLayout, Canvas};
use crate::types::Occupancy;

/// Texture handles used by the redraw pass.
#[derive(Debug, Clone, Copy)]
pub struct Sprites {
    pub board: Handle<Texture>,
    pub white: Handle<Texture>,
    pub black: Handle<Texture>,
    pub select: Handle<Texture>,
}

impl Sprites {
    /// Loads the configured textures into `assets`.
    pub fn load<L>(config: &GameConfig, assets: &mut AssetManager, loader: &mut L) -> Result<Self, CornersError>
    where
        L: AssetLoader<Texture, Resource = TextureInfo>,
    {
        let paths = &config.textures;
        Ok(Self {
            board: assets.textures.add(Texture::new(&paths.board), loader)?,
            white: assets.textures.add(Texture::new(&paths.white), loader)?,
            black: assets.textures.add(Texture::new(&paths.black), loader)?,
            select: assets.textures.add(Texture::new(&paths.select), loader)?,
        })
    }
}

pub struct Session {
    game: Game,
    layout: BoardLayout,
    assets: AssetManager,
    sprites: Sprites,
    press_pending: bool,
}

impl Session {
    pub fn new<L>(config: &GameConfig, loader: &mut L) -> Result<Self, CornersError>
    where
        L: AssetLoader<Texture, Resource = TextureInfo>,
    {
        config.validate()?;
        let mut assets = AssetManager::new();
        let sprites = Sprites::load(config, &mut assets, loader)?;
        info!(first_player = ?config.first_player, "session started");
        Ok(Self {
            game: Game::new(config.first_player),
            layout: BoardLayout::new(config.canvas_size),
            assets,
            sprites,
            press_pending: false,
        })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    pub fn assets(&self) -> &AssetManager {
        &self.assets
    }

    pub fn sprites(&self) -> &Sprites {
        &self.sprites
    }

    /// Loop handler. Records presses, requests exit on quit and runs a
    /// redraw pass when asked to.
    pub fn handle_event<S, C>(&mut self, event: &Event, source: &S, flow: &mut ControlFlow, canvas: &mut C)
    where
        S: EventSource,
        C: Canvas,
    {
        match event {
            Event::Quit => {
                info!("quit requested");
                flow.request_exit();
            }
            Event::PointerPressed { .. } => self.press_pending = true,
            Event::RedrawRequested => {
                let (x, y) = source.pointer_position();
                self.redraw(x, y, canvas);
            }
            Event::PointerReleased { .. }
            | Event::PointerMoved { .. }
            | Event::EventsCleared
            | Event::LoopExiting => {}
        }
    }

    /// Runs one redraw pass with the pointer at `(x, y)`.
    ///
    /// A pending press goes to the first cell, x outer and y inner, whose
    /// rectangle contains the pointer. The resulting transition is applied
    /// before anything is drawn, so the frame shows the updated board.
    #[instrument(skip(self, canvas))]
    pub fn redraw<C: Canvas>(&mut self, x: f32, y: f32, canvas: &mut C) -> Option<PressOutcome> {
        let press = std::mem::take(&mut self.press_pending);
        let outcome = press.then(|| self.layout.cell_at(x, y)).flatten().map(|cell| {
            let result = self.game.press(cell);
            debug!(?cell, ?result, "press handled");
            result
        });

        canvas.draw(self.sprites.board, self.layout.board_rect());
        for cell in Cell::scan_order() {
            self.draw_cell(cell, canvas);
        }

        outcome
    }

    fn draw_cell<C: Canvas>(&self, cell: Cell, canvas: &mut C) {
        let texture = match self.game.board().occupancy(cell) {
            Occupancy::Empty => return,
            Occupancy::White => self.sprites.white,
            Occupancy::Black => self.sprites.black,
        };
        let rect = self.layout.cell_rect(cell);
        if self.game.selected_cell() == Some(cell) {
            canvas.draw(self.sprites.select, rect);
        }
        canvas.draw(texture, rect);
    }
}
