use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum XesError {
    #[error("invalid XML document")]
    Xml(#[from] quick_xml::Error),

    /// XML 1.0 cannot carry this character, escaped or not.
    #[error("event name {name:?} contains {ch:?}, which XML 1.0 does not allow")]
    InvalidCharacter { name: String, ch: char },

    #[error("output file name {name:?} must be a single plain path component")]
    InvalidFileName { name: String },

    #[error("document has no <log> root element")]
    MissingLog,

    #[error("document ended inside <{open}>")]
    UnexpectedEof { open: String },

    #[error("event near byte {position} has no concept:name attribute")]
    MissingEventName { position: usize },

    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize {}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: quick_xml::Error,
    },

    #[error("failed to copy {} to {}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
