//! Ordered record of the decisions a search makes. A [TraceRecorder] only grows while its run is in
//! progress and is frozen into a [Trace] when the run finishes.
use fxhash::FxHashMap;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Coord, Cost};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum TraceEvent {
    /// The cell was finalized and will not be expanded again.
    Visited { cell: Coord },
    /// The cell was discovered and entered the frontier.
    FrontierAdded { cell: Coord },
    /// The cell was re-entered into the frontier at a new cost.
    FrontierUpdated { cell: Coord, cost: Cost },
}

impl TraceEvent {
    pub fn cell(&self) -> Coord {
        match *self {
            TraceEvent::Visited { cell }
            | TraceEvent::FrontierAdded { cell }
            | TraceEvent::FrontierUpdated { cell, .. } => cell,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct TraceRecorder {
    events: Vec<TraceEvent>,
}

impl TraceRecorder {
    pub fn new() -> TraceRecorder {
        TraceRecorder::default()
    }

    pub fn record(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn finish(self) -> Trace {
        Trace {
            events: self.events,
        }
    }
}

/// A frozen trace. Repeated updates of the same cell are all kept.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Trace {
    events: Vec<TraceEvent>,
}

impl Trace {
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TraceEvent> {
        self.events.iter()
    }

    /// Finalized cells in the order they were visited.
    pub fn visited_order(&self) -> impl Iterator<Item = Coord> + '_ {
        self.events.iter().filter_map(|event| match *event {
            TraceEvent::Visited { cell } => Some(cell),
            _ => None,
        })
    }

    pub fn replay(&self) -> Replay<'_> {
        Replay {
            events: &self.events,
            position: 0,
            marks: FxHashMap::default(),
        }
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a TraceEvent;
    type IntoIter = std::slice::Iter<'a, TraceEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    /// In the frontier, with the cost of its latest entry if the run tracked one.
    Frontier(Option<Cost>),
    Visited,
}

/// Cursor that applies a trace one event at a time, for stepwise playback.
#[derive(Clone, Debug)]
pub struct Replay<'a> {
    events: &'a [TraceEvent],
    position: usize,
    marks: FxHashMap<Coord, Mark>,
}

impl<'a> Replay<'a> {
    /// Applies the next event and returns it, or [None] once the trace is exhausted.
    pub fn advance(&mut self) -> Option<&'a TraceEvent> {
        let events = self.events;
        let event = events.get(self.position)?;
        self.position += 1;
        let mark = match *event {
            TraceEvent::Visited { .. } => Mark::Visited,
            TraceEvent::FrontierAdded { .. } => Mark::Frontier(None),
            TraceEvent::FrontierUpdated { cost, .. } => Mark::Frontier(Some(cost)),
        };
        self.marks.insert(event.cell(), mark);
        Some(event)
    }

    /// Advances up to `steps` events and returns how many were applied.
    pub fn advance_by(&mut self, steps: usize) -> usize {
        (0..steps).take_while(|_| self.advance().is_some()).count()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_finished(&self) -> bool {
        self.position == self.events.len()
    }

    pub fn mark(&self, cell: Coord) -> Option<Mark> {
        self.marks.get(&cell).copied()
    }
}
