use crate::model::{PersistedState, Playlist, Track, TrackId};

/// Liked songs and user playlists. Playlist membership is duplicate-free
/// by track id; the liked list keeps newest likes first.
#[derive(Debug, Clone, Default)]
pub struct UserLibrary {
    pub liked: Vec<Track>,
    pub playlists: Vec<Playlist>,
    next_playlist_id: u64,
}

impl UserLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_persisted(state: &PersistedState) -> Self {
        let next_playlist_id = state
            .playlists
            .iter()
            .map(|playlist| playlist.id + 1)
            .max()
            .unwrap_or(1);
        Self {
            liked: state.liked.clone(),
            playlists: state.playlists.clone(),
            next_playlist_id,
        }
    }

    /// Returns whether the track is liked after the toggle.
    pub fn toggle_like(&mut self, track: &Track) -> bool {
        if self.is_liked(&track.id) {
            self.liked.retain(|liked| liked.id != track.id);
            false
        } else {
            self.liked.insert(0, track.clone());
            true
        }
    }

    pub fn is_liked(&self, id: &TrackId) -> bool {
        self.liked.iter().any(|liked| liked.id == *id)
    }

    pub fn create_playlist(&mut self, name: &str) -> u64 {
        let id = self.next_playlist_id;
        self.next_playlist_id += 1;
        self.playlists.push(Playlist {
            id,
            name: name.to_string(),
            tracks: Vec::new(),
        });
        id
    }

    pub fn delete_playlist(&mut self, id: u64) {
        self.playlists.retain(|playlist| playlist.id != id);
    }

    /// Returns false when the playlist is missing or already holds the id.
    pub fn add_to_playlist(&mut self, id: u64, track: &Track) -> bool {
        let Some(playlist) = self.playlists.iter_mut().find(|pl| pl.id == id) else {
            return false;
        };
        if playlist.tracks.iter().any(|queued| queued.id == track.id) {
            return false;
        }
        playlist.tracks.push(track.clone());
        true
    }

    pub fn playlist(&self, id: u64) -> Option<&Playlist> {
        self.playlists.iter().find(|playlist| playlist.id == id)
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
    fn toggling_a_like_twice_removes_it() {
        let mut library = UserLibrary::new();
        assert!(library.toggle_like(&track("a")));
        assert!(library.is_liked(&String::from("a")));
        assert!(!library.toggle_like(&track("a")));
        assert!(library.liked.is_empty());
    }

    #[test]
    fn newest_like_goes_first() {
        let mut library = UserLibrary::new();
        library.toggle_like(&track("a"));
        library.toggle_like(&track("b"));
        assert_eq!(library.liked[0].id, "b");
    }

    #[test]
    fn playlist_rejects_duplicate_tracks() {
        let mut library = UserLibrary::new();
        let id = library.create_playlist("mix");

        assert!(library.add_to_playlist(id, &track("a")));
        assert!(!library.add_to_playlist(id, &track("a")));
        assert_eq!(library.playlist(id).expect("playlist").tracks.len(), 1);
    }

    #[test]
    fn add_to_missing_playlist_is_rejected() {
        let mut library = UserLibrary::new();
        assert!(!library.add_to_playlist(42, &track("a")));
    }

    #[test]
    fn delete_removes_the_playlist() {
        let mut library = UserLibrary::new();
        let id = library.create_playlist("mix");
        library.delete_playlist(id);
        assert!(library.playlist(id).is_none());
    }

    #[test]
    fn restored_libraries_keep_issuing_fresh_playlist_ids() {
        let mut state = PersistedState::default();
        state.playlists.push(Playlist {
            id: 7,
            name: String::from("old"),
            tracks: Vec::new(),
        });

        let mut library = UserLibrary::from_persisted(&state);
        let id = library.create_playlist("new");
        assert!(id > 7);
    }
}
