use crate::constants::ACTIVITY_NAME;
use crate::error::XesError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs;
use std::path::Path;
use xesbridge_log::{EventLog, Trace};

/// Parses an XES document back into an [`EventLog`].
///
/// Only `concept:name` string attributes attached directly to an event are
/// read. Globals, classifiers, extensions and nested attributes are skipped.
pub fn read_log(xml: &str) -> Result<EventLog, XesError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut builder = LogBuilder::default();

    loop {
        let position = reader.buffer_position();
        match reader.read_event()? {
            Event::Start(e) => {
                builder.open(parent(&stack), &e)?;
                stack.push(e.local_name().as_ref().to_vec());
            }
            Event::Empty(e) => {
                builder.open(parent(&stack), &e)?;
                builder.close(parent(&stack), e.local_name().as_ref(), position)?;
            }
            Event::End(e) => {
                stack.pop();
                builder.close(parent(&stack), e.local_name().as_ref(), position)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(XesError::UnexpectedEof {
            open: String::from_utf8_lossy(open).into_owned(),
        });
    }
    builder.finish()
}

pub fn read_log_file(path: impl AsRef<Path>) -> Result<EventLog, XesError> {
    let path = path.as_ref();
    let xml = fs::read_to_string(path).map_err(|source| XesError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    read_log(&xml)
}

fn parent(stack: &[Vec<u8>]) -> Option<&[u8]> {
    stack.last().map(Vec::as_slice)
}

#[derive(Default)]
struct LogBuilder {
    log: Option<EventLog>,
    trace: Option<Trace>,
    // Outer option: inside an event. Inner: its name, once seen.
    event: Option<Option<String>>,
}

impl LogBuilder {
    fn open(&mut self, parent: Option<&[u8]>, e: &BytesStart) -> Result<(), XesError> {
        match (e.local_name().as_ref(), parent) {
            (b"log", None) => self.log = Some(EventLog::new()),
            (b"trace", Some(b"log")) => self.trace = Some(Trace::empty()),
            (b"event", Some(b"trace")) if self.trace.is_some() => self.event = Some(None),
            (b"string", Some(b"event")) => {
                if let Some(slot) = self.event.as_mut() {
                    if attribute(e, b"key")?.as_deref() == Some(ACTIVITY_NAME) {
                        *slot = attribute(e, b"value")?;
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn close(
        &mut self,
        parent: Option<&[u8]>,
        name: &[u8],
        position: usize,
    ) -> Result<(), XesError> {
        match (name, parent) {
            (b"event", Some(b"trace")) => {
                if let Some(slot) = self.event.take() {
                    let event = slot.ok_or(XesError::MissingEventName { position })?;
                    if let Some(trace) = self.trace.as_mut() {
                        trace.events.push(event);
                    }
                }
            }
            (b"trace", Some(b"log")) => {
                if let (Some(trace), Some(log)) = (self.trace.take(), self.log.as_mut()) {
                    log.push(trace);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn finish(self) -> Result<EventLog, XesError> {
        self.log.ok_or(XesError::MissingLog)
    }
}

fn attribute(e: &BytesStart, key: &[u8]) -> Result<Option<String>, XesError> {
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.as_ref() == key {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPENXES_SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<!-- This file has been generated with the OpenXES library. -->
<log xes.version="1.0" xes.features="nested-attributes" openxes.version="1.0RC7">
	<extension name="Concept" prefix="concept" uri="http://www.xes-standard.org/concept.xesext"/>
	<global scope="event">
		<string key="concept:name" value="__INVALID__"/>
	</global>
	<classifier name="Activity" keys="concept:name"/>
	<trace>
		<string key="concept:name" value="case-1"/>
		<event>
			<string key="concept:name" value="register"/>
			<date key="time:timestamp" value="2024-01-01T00:00:00.000+00:00"/>
		</event>
		<event>
			<string key="org:resource" value="alice"/>
			<string key="concept:name" value="approve">
				<string key="concept:name" value="nested"/>
			</string>
		</event>
	</trace>
	<trace>
	</trace>
</log>
"#;

    #[test]
    fn test_reads_openxes_document() {
        let log = read_log(OPENXES_SAMPLE).unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log.traces[0], Trace::from_iter(["register", "approve"]));
        assert!(log.traces[1].is_empty());
    }

    #[test]
    fn test_unescapes_values() {
        let xml = r#"<log><trace><event><string key="concept:name" value="a&amp;b&#9;c"/></event></trace></log>"#;
        let log = read_log(xml).unwrap();
        assert_eq!(log.traces[0], Trace::from_iter(["a&b\tc"]));
    }

    #[test]
    fn test_missing_event_name() {
        let xml = r#"<log><trace><event><string key="org:resource" value="x"/></event></trace></log>"#;
        assert!(matches!(
            read_log(xml),
            Err(XesError::MissingEventName { .. })
        ));
    }

    #[test]
    fn test_missing_log_root() {
        assert!(matches!(read_log("<other/>"), Err(XesError::MissingLog)));
    }

    #[test]
    fn test_truncated_document() {
        let xml = "<log><trace><event>";
        assert!(read_log(xml).is_err());
    }

    #[test]
    fn test_mismatched_tags() {
        let xml = "<log><trace></event></log>";
        assert!(matches!(read_log(xml), Err(XesError::Xml(_))));
    }
}
