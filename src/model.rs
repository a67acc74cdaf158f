use serde::{Deserialize, Serialize};

/// Catalog identifier for a track. Opaque, stable, unique within a queue
/// except where autoplay deliberately appends a repeat.
pub type TrackId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RepeatMode {
    Off,
    #[default]
    All,
    One,
}

impl RepeatMode {
    pub fn next(self) -> Self {
        match self {
            Self::Off => Self::All,
            Self::All => Self::One,
            Self::One => Self::Off,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

/// One playable item, as produced by the catalog transform or restored from
/// persisted user data. Never mutated after construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub artist_names: String,
    #[serde(default)]
    pub stream_url: Option<String>,
    #[serde(default)]
    pub artwork_url: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub duration_seconds: Option<u32>,
}

impl Track {
    /// A track without a resolved stream locator cannot be handed to a sink.
    pub fn is_playable(&self) -> bool {
        self.stream_url.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Playlist {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub liked: Vec<Track>,
    #[serde(default)]
    pub recently_played: Vec<Track>,
    #[serde(default)]
    pub playlists: Vec<Playlist>,
    #[serde(default)]
    pub repeat_mode: RepeatMode,
    #[serde(default = "default_volume")]
    pub volume: f32,
}

fn default_volume() -> f32 {
    1.0
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            liked: Vec::new(),
            recently_played: Vec::new(),
            playlists: Vec::new(),
            repeat_mode: RepeatMode::default(),
            volume: default_volume(),
        }
    }
}
