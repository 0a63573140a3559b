//! Scripted input for headless play.
//!
//! A script is a TOML document with one `[[frame]]` table per loop
//! iteration:
//!
//! ```toml
//! [[frame]]
//! events = [
//!     { kind = "pointer_pressed", x = 300.0, y = 140.0 },
//! ]
//! ```

use serde::Deserialize;
use tracing::{info, instrument};

use crate::error::{CornersError, CornersErrorKind};
use crate::event_loop::{ControlFlow, Event, EventLoop, LoopStatus, QueuedEvents};
use crate::render::CommandBuffer;
use crate::session::Session;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptFrame {
    #[serde(default)]
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    #[serde(default, rename = "frame")]
    pub frames: Vec<ScriptFrame>,
}

/// Summary of a replay.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplayReport {
    pub frames_run: usize,
    /// Draw commands emitted by each frame, in order.
    pub draws_per_frame: Vec<usize>,
    pub exited: bool,
}

impl ReplayReport {
    pub fn draw_commands(&self) -> usize {
        self.draws_per_frame.iter().sum()
    }
}

impl Script {
    #[instrument(skip(text))]
    pub fn from_toml_str(text: &str) -> Result<Self, CornersError> {
        let script: Script = toml::from_str(text)
            .map_err(|err| CornersError::new(CornersErrorKind::Script(err.message().to_string())))?;
        script.validate()?;
        Ok(script)
    }

    /// Only input events may be scripted; loop markers come from the loop.
    pub fn validate(&self) -> Result<(), CornersError> {
        for (index, frame) in self.frames.iter().enumerate() {
            for event in &frame.events {
                if matches!(
                    event,
                    Event::EventsCleared | Event::RedrawRequested | Event::LoopExiting
                ) {
                    return Err(CornersError::new(CornersErrorKind::Script(format!(
                        "frame {index}: {event:?} cannot be scripted"
                    ))));
                }
            }
        }
        Ok(())
    }

    /// Feeds each frame's events into the loop and runs one iteration per
    /// frame. Stops early once the session quits.
    pub fn run(&self, session: &mut Session) -> ReplayReport {
        let mut event_loop = EventLoop::new(QueuedEvents::new());
        let mut canvas = CommandBuffer::new();
        let mut report = ReplayReport::default();

        for frame in &self.frames {
            event_loop.source_mut().extend(frame.events.iter().copied());
            let status = event_loop.pump(&mut |event: &Event, source: &QueuedEvents, flow: &mut ControlFlow| {
                session.handle_event(event, source, flow, &mut canvas);
            });
            report.frames_run += 1;
            report.draws_per_frame.push(canvas.take().len());
            if status == LoopStatus::Exited {
                report.exited = true;
                break;
            }
        }

        info!(frames = report.frames_run, exited = report.exited, "replay finished");
        report
    }
}
