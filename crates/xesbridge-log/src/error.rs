use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogError {
    #[error("failed to read trace file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Labels and traces did not pair up one to one.
    #[error("label/trace count mismatch: {labels} labels but {traces} traces")]
    Misaligned { labels: usize, traces: usize },
}
