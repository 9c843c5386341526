//! # xesbridge XES output
//!
//! Serializes [`EventLog`](xesbridge_log::EventLog)s to the XES XML event-log
//! format, reads them back, and lays out the exported files.
//!
//! ## Document shape
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <log xes.version="1.0" xes.features="nested-attributes">
//! 	<extension name="Concept" prefix="concept" uri="..."/>
//! 	<trace>
//! 		<event>
//! 			<string key="concept:name" value="register"/>
//! 		</event>
//! 	</trace>
//! 	<trace/>
//! </log>
//! ```
//!
//! ## Output layout
//!
//! ```text
//! <root>/T_OK.xes          accepted traces
//! <root>/T.xes             rejected traces
//! <root>/train/T_OK.xes    copies
//! <root>/train/T.xes
//! <root>/test/T_OK.xes
//! <root>/test/T.xes
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use xesbridge_log::{Classifier, TraceParser};
//! use xesbridge_xes::{ExportLayout, Exporter};
//!
//! let records = TraceParser::parse_file("traces.txt")?;
//! let partition = Classifier::default().partition(records)?;
//! let report = Exporter::new(ExportLayout::new("out")).export(&partition)?;
//! println!("wrote {:?}", report.written);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Names and defaults of the XES format and the export layout.
pub mod constants;
pub mod error;
/// Directory setup, log files and train/test copies.
pub mod export;
/// XES document reader.
pub mod reader;
/// XES document writer.
pub mod writer;

pub use error::XesError;
pub use export::{ExportLayout, ExportReport, Exporter, is_plain_file_name};
pub use reader::{read_log, read_log_file};
pub use writer::XesWriter;
