//! # xesbridge trace log model
//!
//! Parses the flat labeled-trace format and splits it into accepted and
//! rejected event logs.
//!
//! ## Input format
//!
//! One trace per line, the acceptance label first:
//!
//! ```text
//! Y\tregister;check;approve
//! N\tregister;reject
//! N
//! ```
//!
//! - The label is everything before the first tab, trimmed.
//! - The trace segment is everything after it, trimmed and split on `;`.
//! - A line with no tab, or a blank segment, yields an empty trace.
//! - Only the exact label `Y` is accepted; anything else is rejected.
//!
//! ## Architecture
//!
//! ```text
//! trace file ──update()/parse()──► TraceParser ──Vec<Record>──► Classifier
//!                                                                   │
//!                                                     Partition { positive, negative }
//! ```
//!
//! ## Example
//!
//! ```
//! use xesbridge_log::{Classifier, TraceParser};
//!
//! let records = TraceParser::new().parse("Y\ta;b;c\nN\td;e\n");
//! assert_eq!(records.len(), 2);
//!
//! let partition = Classifier::default().partition(records)?;
//! assert_eq!(partition.positive.len(), 1);
//! assert_eq!(partition.negative.len(), 1);
//! # Ok::<(), xesbridge_log::LogError>(())
//! ```

/// Accept/reject partitioning.
pub mod classify;
/// Error types.
pub mod error;
/// Records, traces and event logs.
pub mod ir;
/// Streaming line parser.
pub mod parser;


pub use classify::Classifier;
pub use error::LogError;
pub use ir::{Acceptance, EventLog, Partition, Record, Trace};
pub use parser::TraceParser;
