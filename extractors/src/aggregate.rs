use chrono::Utc;
use shared_types::{EmailSet, ExtractionError, ExtractionReport, LeafFailure};

/// What one branch of the traversal produced.
///
/// Per-leaf email sets are kept separate so that deduplication happens once,
/// globally, in the aggregator.
#[derive(Debug, Default)]
pub struct Batch {
    pub sets: Vec<EmailSet>,
    pub failures: Vec<LeafFailure>,
}

impl Batch {
    pub fn matched(emails: EmailSet) -> Self {
        Self {
            sets: vec![emails],
            failures: Vec::new(),
        }
    }

    pub fn failed(path: impl Into<String>, error: ExtractionError) -> Self {
        Self {
            sets: Vec::new(),
            failures: vec![LeafFailure::new(path, error)],
        }
    }

    /// Append a sibling branch's output after this one's.
    pub fn absorb(&mut self, other: Batch) {
        self.sets.extend(other.sets);
        self.failures.extend(other.failures);
    }

    /// Join sibling batches in the given order.
    pub fn join(batches: impl IntoIterator<Item = Batch>) -> Self {
        let mut joined = Batch::default();
        for batch in batches {
            joined.absorb(batch);
        }
        joined
    }
}

/// Collects every batch of one top-level invocation.
#[derive(Debug, Default)]
pub struct Aggregator {
    emails: EmailSet,
    failures: Vec<LeafFailure>,
    leaves: u64,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, batch: Batch) {
        for set in batch.sets {
            self.leaves += 1;
            self.emails.merge(set);
        }
        self.failures.extend(batch.failures);
    }

    pub fn emails(&self) -> &EmailSet {
        &self.emails
    }

    pub fn failures(&self) -> &[LeafFailure] {
        &self.failures
    }

    pub fn finish(self, source: impl Into<String>, started_at: i64) -> ExtractionReport {
        ExtractionReport {
            source: source.into(),
            emails: self.emails,
            failures: self.failures,
            leaves_processed: self.leaves,
            started_at,
            finished_at: Utc::now().timestamp(),
        }
    }
}

/// Concatenate batches in arrival order, keeping the first occurrence of each
/// address.
pub fn aggregate(batches: impl IntoIterator<Item = EmailSet>) -> EmailSet {
    let mut emails = EmailSet::new();
    for batch in batches {
        emails.merge(batch);
    }
    emails
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(emails: &[&str]) -> EmailSet {
        emails.iter().copied().collect()
    }

    #[test]
    fn test_aggregate_keeps_first_occurrence() {
        let batches = vec![
            set(&["a@x.com", "b@y.com"]),
            set(&[]),
            set(&["c@z.com", "a@x.com"]),
        ];
        assert_eq!(aggregate(batches), vec!["a@x.com", "b@y.com", "c@z.com"]);
    }

    #[test]
    fn test_aggregate_is_deterministic() {
        let batches = vec![set(&["b@y.com", "a@x.com"]), set(&["a@x.com", "c@z.com"])];

        let first = aggregate(batches.clone());
        let second = aggregate(batches);
        assert_eq!(first, second);
        assert_eq!(first, vec!["b@y.com", "a@x.com", "c@z.com"]);
    }

    #[test]
    fn test_batch_join_preserves_sibling_order() {
        let joined = Batch::join(vec![
            Batch::matched(set(&["one@x.com"])),
            Batch::failed("bundle.zip/bad.zip", ExtractionError::archive_corrupt("bad.zip", "eof")),
            Batch::matched(set(&["two@x.com"])),
        ]);

        assert_eq!(joined.sets.len(), 2);
        assert_eq!(joined.sets[0], vec!["one@x.com"]);
        assert_eq!(joined.failures[0].path, "bundle.zip/bad.zip");
    }

    #[test]
    fn test_aggregator_report() {
        let mut aggregator = Aggregator::new();
        aggregator.push(Batch::matched(set(&["a@x.com"])));
        aggregator.push(Batch::join(vec![
            Batch::matched(set(&["a@x.com", "b@y.com"])),
            Batch::failed("in.tar/x.pdf", ExtractionError::decode_failed("pdf", "bad xref")),
        ]));
        assert_eq!(aggregator.emails().len(), 2);
        assert_eq!(aggregator.failures().len(), 1);

        let report = aggregator.finish("in.tar", 0);
        assert_eq!(report.source, "in.tar");
        assert_eq!(report.emails, vec!["a@x.com", "b@y.com"]);
        assert_eq!(report.leaves_processed, 2);
        assert!(!report.is_complete());
        assert!(report.finished_at >= report.started_at);
    }
}
