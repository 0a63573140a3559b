//! Pull-based event loop.
//!
//! Each iteration drains every pending event from an [`EventSource`] into the
//! handler, then delivers [`Event::EventsCleared`] and
//! [`Event::RedrawRequested`]. Once the handler asks to exit, the loop
//! finishes the iteration and delivers [`Event::LoopExiting`] exactly once.

use std::collections::VecDeque;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, trace};
use web_time::Instant;

/// Input and loop lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    Quit,
    PointerPressed { x: f32, y: f32 },
    PointerReleased { x: f32, y: f32 },
    PointerMoved { x: f32, y: f32 },
    /// All pending input of this iteration has been delivered.
    EventsCleared,
    RedrawRequested,
    /// Last event the handler ever sees.
    LoopExiting,
}

/// Exit flag shared between the loop and its handler.
#[derive(Debug, Default, Clone)]
pub struct ControlFlow {
    exit: bool,
}

impl ControlFlow {
    pub fn request_exit(&mut self) {
        self.exit = true;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit
    }
}

/// Platform side of the loop.
pub trait EventSource {
    /// Next pending input event, or `None` once the queue is drained.
    fn poll_event(&mut self) -> Option<Event>;

    /// Current pointer position in canvas pixels.
    fn pointer_position(&self) -> (f32, f32);
}

/// Whether the loop keeps going after a [`EventLoop::pump`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopStatus {
    Running { elapsed: Duration },
    Exited,
}

pub struct EventLoop<S> {
    source: S,
    control_flow: ControlFlow,
    exited: bool,
}

impl<S: EventSource> EventLoop<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            control_flow: ControlFlow::default(),
            exited: false,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Runs iterations until the handler requests exit.
    pub fn run<F>(&mut self, mut handler: F)
    where
        F: FnMut(&Event, &S, &mut ControlFlow),
    {
        while let LoopStatus::Running { .. } = self.pump(&mut handler) {}
    }

    /// Runs a single iteration. Hosts that own the frame callback call this
    /// once per frame.
    pub fn pump<F>(&mut self, handler: &mut F) -> LoopStatus
    where
        F: FnMut(&Event, &S, &mut ControlFlow),
    {
        if self.exited {
            return LoopStatus::Exited;
        }

        let start = Instant::now();
        let mut drained = 0usize;
        while let Some(event) = self.source.poll_event() {
            trace!(?event, "event");
            handler(&event, &self.source, &mut self.control_flow);
            drained += 1;
        }
        handler(&Event::EventsCleared, &self.source, &mut self.control_flow);
        handler(&Event::RedrawRequested, &self.source, &mut self.control_flow);

        if self.control_flow.exit_requested() {
            handler(&Event::LoopExiting, &self.source, &mut self.control_flow);
            self.exited = true;
            debug!("event loop exited");
            return LoopStatus::Exited;
        }

        let elapsed = start.elapsed();
        trace!(drained, ?elapsed, "iteration done");
        LoopStatus::Running { elapsed }
    }
}

/// In-memory event source fed by the host.
///
/// Pointer events update the tracked pointer position as they are polled,
/// so that [`EventSource::pointer_position`] reflects the last delivered
/// event.
#[derive(Debug, Default, Clone)]
pub struct QueuedEvents {
    queue: VecDeque<Event>,
    pointer: (f32, f32),
}

impl QueuedEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) {
        self.queue.push_back(event);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl Extend<Event> for QueuedEvents {
    fn extend<I: IntoIterator<Item = Event>>(&mut self, iter: I) {
        self.queue.extend(iter);
    }
}

impl EventSource for QueuedEvents {
    fn poll_event(&mut self) -> Option<Event> {
        let event = self.queue.pop_front()?;
        if let Event::PointerPressed { x, y }
        | Event::PointerReleased { x, y }
        | Event::PointerMoved { x, y } = event
        {
            self.pointer = (x, y);
        }
        Some(event)
    }

    fn pointer_position(&self) -> (f32, f32) {
        self.pointer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(events: &[Event]) -> (Vec<Event>, LoopStatus) {
        let mut source = QueuedEvents::new();
        source.extend(events.iter().copied());
        let mut event_loop = EventLoop::new(source);
        let mut seen = Vec::new();
        let status = event_loop.pump(&mut |event: &Event, _: &QueuedEvents, flow: &mut ControlFlow| {
            if *event == Event::Quit {
                flow.request_exit();
            }
            seen.push(*event);
        });
        (seen, status)
    }

    #[test]
    fn iteration_drains_input_before_redraw() {
        let (seen, status) = record(&[
            Event::PointerMoved { x: 1.0, y: 2.0 },
            Event::PointerPressed { x: 1.0, y: 2.0 },
        ]);

        assert_eq!(
            seen,
            vec![
                Event::PointerMoved { x: 1.0, y: 2.0 },
                Event::PointerPressed { x: 1.0, y: 2.0 },
                Event::EventsCleared,
                Event::RedrawRequested,
            ]
        );
        assert!(matches!(status, LoopStatus::Running { .. }));
    }

    #[test]
    fn quit_finishes_iteration_then_exits_once() {
        let (seen, status) = record(&[Event::Quit]);

        assert_eq!(
            seen,
            vec![
                Event::Quit,
                Event::EventsCleared,
                Event::RedrawRequested,
                Event::LoopExiting,
            ]
        );
        assert_eq!(status, LoopStatus::Exited);
    }

    #[test]
    fn run_stops_after_exit_and_pump_is_inert_afterwards() {
        let mut source = QueuedEvents::new();
        source.push(Event::Quit);
        let mut event_loop = EventLoop::new(source);
        let mut redraws = 0;
        let mut exits = 0;

        event_loop.run(|event, _, flow| match event {
            Event::Quit => flow.request_exit(),
            Event::RedrawRequested => redraws += 1,
            Event::LoopExiting => exits += 1,
            _ => {}
        });

        assert_eq!((redraws, exits), (1, 1));
        let mut noop = |_: &Event, _: &QueuedEvents, _: &mut ControlFlow| {};
        assert_eq!(event_loop.pump(&mut noop), LoopStatus::Exited);
    }

    #[test]
    fn pointer_tracks_last_polled_pointer_event() {
        let mut source = QueuedEvents::new();
        source.extend([
            Event::PointerMoved { x: 3.0, y: 4.0 },
            Event::Quit,
            Event::PointerReleased { x: 7.5, y: 8.5 },
        ]);

        assert_eq!(source.pointer_position(), (0.0, 0.0));
        source.poll_event();
        assert_eq!(source.pointer_position(), (3.0, 4.0));
        source.poll_event();
        assert_eq!(source.pointer_position(), (3.0, 4.0));
        source.poll_event();
        assert_eq!(source.pointer_position(), (7.5, 8.5));
        assert_eq!(source.pending(), 0);
    }
}
