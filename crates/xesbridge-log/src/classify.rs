use crate::error::LogError;
use crate::ir::{ACCEPTED_LABEL, Acceptance, Partition, Record, Trace};

/// Routes traces into the positive or negative log by exact label match.
#[derive(Debug, Clone)]
pub struct Classifier {
    accepted: String,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::with_accepted_label(ACCEPTED_LABEL)
    }
}

impl Classifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `label` as the accepted sentinel. Comparison is case-sensitive.
    pub fn with_accepted_label(label: impl Into<String>) -> Self {
        Self {
            accepted: label.into(),
        }
    }

    pub fn accepted_label(&self) -> &str {
        &self.accepted
    }

    pub fn classify(&self, label: &str) -> Acceptance {
        if label == self.accepted {
            Acceptance::Accepted
        } else {
            Acceptance::Rejected
        }
    }

    /// Partitions parsed records, preserving their order within each log.
    pub fn partition(&self, records: Vec<Record>) -> Result<Partition, LogError> {
        let (labels, traces): (Vec<String>, Vec<Trace>) =
            records.into_iter().map(|r| (r.label, r.trace)).unzip();
        self.partition_parallel(labels, traces)
    }

    /// Partitions parallel label and trace sequences.
    ///
    /// Fails with [`LogError::Misaligned`] when the two sequences differ in
    /// length; nothing is partitioned in that case.
    pub fn partition_parallel(
        &self,
        labels: Vec<String>,
        traces: Vec<Trace>,
    ) -> Result<Partition, LogError> {
        if labels.len() != traces.len() {
            return Err(LogError::Misaligned {
                labels: labels.len(),
                traces: traces.len(),
            });
        }

        let mut partition = Partition::default();
        for (label, trace) in labels.into_iter().zip(traces) {
            match self.classify(&label) {
                Acceptance::Accepted => partition.positive.push(trace),
                Acceptance::Rejected => partition.negative.push(trace),
            }
        }
        Ok(partition)
    }
}
