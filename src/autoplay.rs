use crate::model::{Track, TrackId};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;

/// Supplies a filler track when the queue runs out under repeat-all.
///
/// Exclusion is best effort: implementations should avoid the given ids
/// when the pool allows it, but a pool with no other candidates may return
/// an excluded track rather than nothing.
pub trait FillerSource {
    fn filler_track(&mut self, exclude: &[TrackId]) -> Option<Track>;
}

/// In-memory filler pool, typically refreshed from the catalog's trending
/// list by whatever fetch layer sits above this crate.
#[derive(Debug)]
pub struct TrendingPool {
    tracks: Vec<Track>,
    rng: SmallRng,
}

impl TrendingPool {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Replaces the pool contents, stale-while-revalidate style.
    pub fn set_tracks(&mut self, tracks: Vec<Track>) {
        self.tracks = tracks;
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

impl FillerSource for TrendingPool {
    fn filler_track(&mut self, exclude: &[TrackId]) -> Option<Track> {
        if self.tracks.is_empty() {
            return None;
        }

        let candidates: Vec<&Track> = self
            .tracks
            .iter()
            .filter(|track| !exclude.contains(&track.id))
            .collect();
        if candidates.is_empty() {
            // Pool too small to avoid a repeat; hand one back as-is.
            return self.tracks.choose(&mut self.rng).cloned();
        }
        candidates.choose(&mut self.rng).map(|track| (*track).clone())
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
            stream_url: Some(format!("https://cdn.example/{id}")),
            artwork_url: None,
            album: None,
            duration_seconds: None,
        }
    }

    #[test]
    fn empty_pool_yields_nothing() {
        let mut pool = TrendingPool::new(Vec::new());
        assert_eq!(pool.filler_track(&[]), None);
    }

    #[test]
    fn excluded_ids_are_avoided_when_alternatives_exist() {
        let mut pool = TrendingPool::new(vec![track("a"), track("b")]);
        for _ in 0..20 {
            let filler = pool.filler_track(&[String::from("a")]).expect("filler");
            assert_eq!(filler.id, "b");
        }
    }

    #[test]
    fn pool_of_one_returns_the_excluded_track_as_is() {
        let mut pool = TrendingPool::new(vec![track("only")]);
        let filler = pool.filler_track(&[String::from("only")]).expect("filler");
        assert_eq!(filler.id, "only");
    }

    #[test]
    fn refreshed_pool_serves_new_tracks() {
        let mut pool = TrendingPool::new(vec![track("old")]);
        pool.set_tracks(vec![track("new")]);
        let filler = pool.filler_track(&[]).expect("filler");
        assert_eq!(filler.id, "new");
    }
}
