use crate::model::Track;
use serde::{Deserialize, Serialize};

/// Upper bound on the recently-played list; older entries fall off.
pub const RECENT_CAP: usize = 50;

/// Recently-played sink: most recent first, one entry per track id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
    entries: Vec<Track>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(mut entries: Vec<Track>) -> Self {
        entries.truncate(RECENT_CAP);
        Self { entries }
    }

    /// Records a play. A repeat of an already-listed id moves it to the
    /// front rather than duplicating it.
    pub fn record(&mut self, track: &Track) {
        self.entries.retain(|entry| entry.id != track.id);
        self.entries.insert(0, track.clone());
        self.entries.truncate(RECENT_CAP);
    }

    pub fn entries(&self) -> &[Track] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str) -> Track {
        Track {
            id: id.to_string(),
            title: id.to_string(),
            artist_names: String::new(),
            stream_url: None,
            artwork_url: None,
            album: None,
            duration_seconds: None,
        }
    }

    #[test]
    fn newest_play_goes_first() {
        let mut history = History::new();
        history.record(&track("a"));
        history.record(&track("b"));
        assert_eq!(history.entries()[0].id, "b");
        assert_eq!(history.entries()[1].id, "a");
    }

    #[test]
    fn replaying_moves_the_entry_to_the_front_without_duplicating() {
        let mut history = History::new();
        history.record(&track("a"));
        history.record(&track("b"));
        history.record(&track("a"));

        assert_eq!(history.len(), 2);
        assert_eq!(history.entries()[0].id, "a");
    }

    #[test]
    fn history_is_capped() {
        let mut history = History::new();
        for n in 0..(RECENT_CAP + 10) {
            history.record(&track(&format!("t{n}")));
        }
        assert_eq!(history.len(), RECENT_CAP);
        assert_eq!(history.entries()[0].id, format!("t{}", RECENT_CAP + 9));
    }

    #[test]
    fn restored_entries_are_truncated_to_the_cap() {
        let entries: Vec<Track> = (0..(RECENT_CAP * 2)).map(|n| track(&format!("t{n}"))).collect();
        let history = History::from_entries(entries);
        assert_eq!(history.len(), RECENT_CAP);
    }
}
