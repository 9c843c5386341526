/// Attribute key that identifies an event's activity name (Concept extension).
pub const ACTIVITY_NAME: &str = "concept:name";
/// XES standard version written on the `<log>` element.
pub const XES_VERSION: &str = "1.0";
/// Feature list written on the `<log>` element.
pub const XES_FEATURES: &str = "nested-attributes";

pub const CONCEPT_EXTENSION_NAME: &str = "Concept";
pub const CONCEPT_EXTENSION_PREFIX: &str = "concept";
pub const CONCEPT_EXTENSION_URI: &str = "http://www.xes-standard.org/concept.xesext";

/// Output file for the accepted log.
pub const POSITIVE_FILE: &str = "T_OK.xes";
/// Output file for the rejected log.
pub const NEGATIVE_FILE: &str = "T.xes";
/// Subdirectories that receive a copy of every written log.
pub const DEFAULT_SPLITS: [&str; 2] = ["train", "test"];
