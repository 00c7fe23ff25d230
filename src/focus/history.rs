use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::phase::Phase;

/// A phase that ran all the way down to zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub phase: Phase,
    pub duration_secs: u32,
    pub completed_at: DateTime<Utc>,
}

/// Append-only log of completed phases for one focus session.
#[derive(Debug, Clone, Default)]
pub struct SessionHistory {
    entries: Vec<HistoryEntry>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in the order they completed.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &HistoryEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    /// Entries newest first.
    pub fn recent_first(&self) -> impl Iterator<Item = &HistoryEntry> + ExactSizeIterator {
        self.entries.iter().rev()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn count(&self, phase: Phase) -> usize {
        self.entries.iter().filter(|e| e.phase == phase).count()
    }

    pub fn total_secs_for(&self, phase: Phase) -> u64 {
        self.entries
            .iter()
            .filter(|e| e.phase == phase)
            .map(|e| u64::from(e.duration_secs))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn entry(phase: Phase, duration_secs: u32, offset_secs: i64) -> HistoryEntry {
        HistoryEntry {
            phase,
            duration_secs,
            completed_at: DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(offset_secs),
        }
    }

    #[test]
    fn test_recent_first_reverses_insertion_order() {
        let mut history = SessionHistory::new();
        history.push(entry(Phase::Focus, 1500, 1500));
        history.push(entry(Phase::ShortBreak, 300, 1800));
        history.push(entry(Phase::Focus, 1500, 3300));

        let phases: Vec<_> = history.recent_first().map(|e| e.phase).collect();
        assert_eq!(phases, vec![Phase::Focus, Phase::ShortBreak, Phase::Focus]);
        let times: Vec<_> = history.recent_first().map(|e| e.completed_at).collect();
        assert!(times.windows(2).all(|w| w[0] >= w[1]));

        // Reading again starts from the newest entry again.
        assert_eq!(history.recent_first().next(), history.last());
        assert_eq!(history.recent_first().len(), 3);
    }

    #[test]
    fn test_totals_per_phase() {
        let mut history = SessionHistory::new();
        assert!(history.is_empty());
        history.push(entry(Phase::Focus, 1500, 0));
        history.push(entry(Phase::ShortBreak, 300, 1));
        history.push(entry(Phase::Focus, 1500, 2));

        assert_eq!(history.len(), 3);
        assert_eq!(history.count(Phase::Focus), 2);
        assert_eq!(history.total_secs_for(Phase::Focus), 3000);
        assert_eq!(history.total_secs_for(Phase::LongBreak), 0);
    }
}
