use crate::constants::{
    ACTIVITY_NAME, CONCEPT_EXTENSION_NAME, CONCEPT_EXTENSION_PREFIX, CONCEPT_EXTENSION_URI,
    XES_FEATURES, XES_VERSION,
};
use crate::error::XesError;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::QName;
use quick_xml::Writer;
use std::borrow::Cow;
use std::io::Write;
use xesbridge_log::{EventLog, Trace};

const GENERATOR_COMMENT: &str =
    " Generated by xesbridge. Conforms to the XML serialization of the XES standard. ";

/// Serializes an [`EventLog`] as an XES XML document.
///
/// The output is deterministic: the same log always produces the same bytes.
/// Event names holding characters that XML 1.0 forbids (C0 controls other
/// than tab, newline and carriage return, and U+FFFE/U+FFFF) are rejected
/// with [`XesError::InvalidCharacter`] before anything is written.
#[derive(Debug, Clone)]
pub struct XesWriter {
    indent_size: usize,
}

impl Default for XesWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl XesWriter {
    /// Creates a writer that indents with one tab per level.
    pub fn new() -> Self {
        Self { indent_size: 1 }
    }

    /// Fails on the first event name that cannot appear in an XML document.
    pub fn check(&self, log: &EventLog) -> Result<(), XesError> {
        for name in log.iter().flat_map(|t| t.iter()) {
            if let Some(ch) = name.chars().find(|&c| !is_xml_char(c)) {
                return Err(XesError::InvalidCharacter {
                    name: name.to_string(),
                    ch,
                });
            }
        }
        Ok(())
    }

    /// Writes `log` to `out` and hands the sink back so the caller can flush it.
    pub fn write<W: Write>(&self, log: &EventLog, out: W) -> Result<W, XesError> {
        self.check(log)?;
        let mut writer = Writer::new_with_indent(out, b'\t', self.indent_size);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        writer.write_event(Event::Comment(BytesText::new(GENERATOR_COMMENT)))?;

        let mut root = BytesStart::new("log");
        root.push_attribute(("xes.version", XES_VERSION));
        root.push_attribute(("xes.features", XES_FEATURES));
        writer.write_event(Event::Start(root))?;

        let mut extension = BytesStart::new("extension");
        extension.push_attribute(("name", CONCEPT_EXTENSION_NAME));
        extension.push_attribute(("prefix", CONCEPT_EXTENSION_PREFIX));
        extension.push_attribute(("uri", CONCEPT_EXTENSION_URI));
        writer.write_event(Event::Empty(extension))?;

        for trace in log.iter() {
            write_trace(&mut writer, trace)?;
        }

        writer.write_event(Event::End(BytesEnd::new("log")))?;
        Ok(writer.into_inner())
    }

    pub fn to_bytes(&self, log: &EventLog) -> Result<Vec<u8>, XesError> {
        self.write(log, Vec::new())
    }

    pub fn to_string(&self, log: &EventLog) -> Result<String, XesError> {
        let bytes = self.to_bytes(log)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

fn write_trace<W: Write>(writer: &mut Writer<W>, trace: &Trace) -> quick_xml::Result<()> {
    if trace.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new("trace")))?;
        return Ok(());
    }

    writer.write_event(Event::Start(BytesStart::new("trace")))?;
    for name in trace.iter() {
        writer.write_event(Event::Start(BytesStart::new("event")))?;
        writer.write_event(Event::Empty(name_attribute(name)))?;
        writer.write_event(Event::End(BytesEnd::new("event")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("trace")))?;
    Ok(())
}

fn name_attribute(name: &str) -> BytesStart<'static> {
    let mut element = BytesStart::new("string");
    element.push_attribute(("key", ACTIVITY_NAME));
    element.push_attribute(Attribute {
        key: QName(b"value"),
        value: Cow::Owned(escape_attribute(name).into_bytes()),
    });
    element
}

// XML 1.0 `Char` production. Rust chars already exclude surrogates.
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{FFFD}' | '\u{10000}'..)
}

/// Escapes markup characters and the whitespace that XML parsers would
/// otherwise normalize to a plain space inside attribute values.
fn escape_attribute(value: &str) -> String {
    let escaped = quick_xml::escape::escape(value);
    if !escaped.contains(['\t', '\n', '\r']) {
        return escaped.into_owned();
    }
    escaped
        .replace('\t', "&#9;")
        .replace('\n', "&#10;")
        .replace('\r', "&#13;")
}
