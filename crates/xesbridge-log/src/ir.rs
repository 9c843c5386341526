use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Label token that marks a trace as accepted.
pub const ACCEPTED_LABEL: &str = "Y";
/// Separates the label from the trace segment of a line.
pub const TRACE_SEPARATOR: char = '\t';
/// Separates event names inside the trace segment.
pub const EVENT_SEPARATOR: char = ';';

/// An ordered sequence of event names. Order is temporal and never changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trace {
    pub events: Vec<String>,
}

impl Trace {
    pub fn new(events: Vec<String>) -> Self {
        Self { events }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.events.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for Trace {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// One input line: its acceptance label and the trace that followed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// 1-based line number in the source file.
    pub line: usize,
    pub label: String,
    pub trace: Trace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Acceptance {
    Accepted,
    Rejected,
}

/// Ordered collection of traces sharing an acceptance classification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    pub traces: Vec<Trace>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, trace: Trace) {
        self.traces.push(trace);
    }

    pub fn len(&self) -> usize {
        self.traces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Trace> {
        self.traces.iter()
    }

    /// Distinct event names across every trace, sorted.
    pub fn alphabet(&self) -> BTreeSet<String> {
        self.traces
            .iter()
            .flat_map(|t| t.events.iter().cloned())
            .collect()
    }
}

impl FromIterator<Trace> for EventLog {
    fn from_iter<I: IntoIterator<Item = Trace>>(iter: I) -> Self {
        Self {
            traces: iter.into_iter().collect(),
        }
    }
}

/// The positive (accepted) and negative (rejected) logs of one input file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    pub positive: EventLog,
    pub negative: EventLog,
}

impl Partition {
    pub fn log(&self, acceptance: Acceptance) -> &EventLog {
        match acceptance {
            Acceptance::Accepted => &self.positive,
            Acceptance::Rejected => &self.negative,
        }
    }

    /// Total number of traces in both logs.
    pub fn len(&self) -> usize {
        self.positive.len() + self.negative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn alphabet(&self) -> BTreeSet<String> {
        let mut alphabet = self.positive.alphabet();
        alphabet.extend(self.negative.alphabet());
        alphabet
    }
}
