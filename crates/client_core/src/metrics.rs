use crate::entity::{ListRecord, RecordStatus};

/// Per-status counts over a bulk fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMetrics<S: RecordStatus> {
    pub total: usize,
    counts: Vec<(S, usize)>,
}

impl<S: RecordStatus> StatusMetrics<S> {
    pub fn from_records<R>(records: &[R]) -> Self
    where
        R: ListRecord<Status = S>,
    {
        let mut counts: Vec<(S, usize)> = S::ALL.iter().map(|status| (*status, 0)).collect();
        for record in records {
            let status = record.status();
            if let Some((_, count)) = counts.iter_mut().find(|(s, _)| *s == status) {
                *count += 1;
            }
        }
        Self {
            total: records.len(),
            counts,
        }
    }

    pub fn count(&self, status: S) -> usize {
        self.counts
            .iter()
            .find(|(s, _)| *s == status)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (S, usize)> + '_ {
        self.counts.iter().copied()
    }
}
