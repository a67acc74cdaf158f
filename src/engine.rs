use crate::history::History;
use crate::model::{Direction, PersistedState, RepeatMode, Track, TrackId};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

/// What the caller must do to its audio sink after an engine call.
///
/// The engine only computes queue state; binding sources, seeking and the
/// autoplay fetch are the caller's side effects. `AwaitFiller` is the suspend
/// point: the engine stays in "awaiting next track" (`is_playing` true, no
/// source bound) until `resolve_filler` hands back the supplier's answer, and
/// transport calls arriving in between are ignored.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportAction {
    /// Bind this track's stream and start playing.
    Load(Track),
    /// Seek the already-bound source to zero and keep playing.
    Restart,
    /// Queue end reached under repeat-all: fetch a filler track, excluding
    /// these ids if the pool allows it, then call `resolve_filler`.
    AwaitFiller { exclude: Vec<TrackId> },
    /// Playback stopped at the queue end; pause the sink.
    Halt,
}

/// Playback queue and transport state machine.
///
/// `current` is `None` until a queue is loaded, otherwise an index into
/// `queue`. While shuffle is on, `shuffle_order` is a permutation of
/// `0..queue.len()` and traversal follows adjacency in that permutation.
#[derive(Debug)]
pub struct PlayerEngine {
    pub queue: Vec<Track>,
    pub current: Option<usize>,
    pub repeat_mode: RepeatMode,
    pub is_playing: bool,
    shuffle_enabled: bool,
    shuffle_order: Vec<usize>,
    pending_filler: bool,
    history: History,
    rng: SmallRng,
}

impl PlayerEngine {
    pub fn new() -> Self {
        Self {
            queue: Vec::new(),
            current: None,
            repeat_mode: RepeatMode::default(),
            is_playing: false,
            shuffle_enabled: false,
            shuffle_order: Vec::new(),
            pending_filler: false,
            history: History::new(),
            rng: SmallRng::from_os_rng(),
        }
    }

    pub fn from_persisted(state: &PersistedState) -> Self {
        let mut engine = Self::new();
        engine.repeat_mode = state.repeat_mode;
        engine.history = History::from_entries(state.recently_played.clone());
        engine
    }

    /// Replaces the queue and starts playing `start` (falling back to the
    /// first track when `start` is not in `tracks`). Loading an empty queue
    /// succeeds and leaves the engine idle.
    pub fn load_queue(&mut self, tracks: Vec<Track>, start: &Track) -> Option<TransportAction> {
        self.pending_filler = false;
        self.queue = tracks;
        if self.queue.is_empty() {
            self.current = None;
            self.is_playing = false;
            return None;
        }

        let index = self
            .queue
            .iter()
            .position(|track| track.id == start.id)
            .unwrap_or(0);
        if self.shuffle_enabled {
            self.rebuild_shuffle_order();
        }
        let loaded = self.queue[index].clone();
        self.history.record(&loaded);
        self.start_at(index)
    }

    /// Context-free play. A track already in the queue resumes in place
    /// (the queue is never truncated or reordered by clicking it); anything
    /// else becomes a fresh single-track queue.
    pub fn play(&mut self, track: Track) -> Option<TransportAction> {
        let position = self.queue.iter().position(|queued| queued.id == track.id);
        match (self.current, position) {
            (Some(_), Some(index)) => {
                self.pending_filler = false;
                let resumed = self.queue[index].clone();
                self.history.record(&resumed);
                self.start_at(index)
            }
            _ => {
                let start = track.clone();
                self.load_queue(vec![track], &start)
            }
        }
    }

    /// Builds a mix seeded by one track: the seed first, then the pool
    /// (minus the seed) in random order.
    pub fn start_radio(&mut self, seed: Track, pool: &[Track]) -> Option<TransportAction> {
        let mut mix: Vec<Track> = pool
            .iter()
            .filter(|track| track.id != seed.id)
            .cloned()
            .collect();
        mix.shuffle(&mut self.rng);
        mix.insert(0, seed.clone());
        self.load_queue(mix, &seed)
    }

    /// Flips the play/pause intent. Never moves `current`; no-op while
    /// nothing is loaded.
    pub fn toggle_playback(&mut self) {
        if self.current.is_some() {
            self.is_playing = !self.is_playing;
        }
    }

    /// Moves to the adjacent track in traversal order.
    ///
    /// Prev at the start always wraps to the last position. Next past the
    /// end asks for a filler under repeat-all, otherwise stops with
    /// `current` untouched so resuming replays the same track.
    pub fn advance(&mut self, direction: Direction) -> Option<TransportAction> {
        if self.queue.is_empty() || self.pending_filler {
            return None;
        }

        let candidate = match direction {
            Direction::Next => self.next_index(),
            Direction::Prev => Some(self.prev_index()),
        };
        match candidate {
            Some(index) => self.start_at(index),
            None => self.end_of_queue(),
        }
    }

    /// Completes a pending `AwaitFiller`. `Some` appends the filler (repeat
    /// ids are allowed here by design) and plays it; `None` means the pool
    /// was empty, so wrap to the first position instead.
    pub fn resolve_filler(&mut self, filler: Option<Track>) -> Option<TransportAction> {
        if !self.pending_filler {
            return None;
        }
        self.pending_filler = false;
        if self.queue.is_empty() {
            return None;
        }

        let index = match filler {
            Some(track) => {
                self.queue.push(track);
                if self.shuffle_enabled {
                    // The appended entry rides at the end of the current
                    // pass; the in-flight shuffle position is not disturbed.
                    self.shuffle_order.push(self.queue.len() - 1);
                }
                self.queue.len() - 1
            }
            None => self.first_position(),
        };
        self.start_at(index)
    }

    /// Natural end of the bound media. Repeat-one restarts in place; every
    /// other mode behaves exactly like an explicit skip forward.
    pub fn on_track_ended(&mut self) -> Option<TransportAction> {
        if self.pending_filler {
            return None;
        }
        if self.repeat_mode == RepeatMode::One && self.current.is_some() {
            self.is_playing = true;
            return Some(TransportAction::Restart);
        }
        self.advance(Direction::Next)
    }

    /// A broken stream must not stall the queue: skip forward, even under
    /// repeat-one (restarting a failed source would loop on the failure).
    pub fn on_track_error(&mut self) -> Option<TransportAction> {
        self.advance(Direction::Next)
    }

    pub fn toggle_shuffle(&mut self) {
        self.shuffle_enabled = !self.shuffle_enabled;
        if self.shuffle_enabled && !self.queue.is_empty() {
            self.rebuild_shuffle_order();
        }
    }

    pub fn cycle_repeat(&mut self) {
        self.repeat_mode = self.repeat_mode.next();
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.queue.get(self.current?)
    }

    pub fn shuffle_enabled(&self) -> bool {
        self.shuffle_enabled
    }

    /// True between an `AwaitFiller` and its `resolve_filler`.
    pub fn awaiting_filler(&self) -> bool {
        self.pending_filler
    }

    /// Recently played, most recent first, deduplicated by id, capped.
    pub fn recent(&self) -> &[Track] {
        self.history.entries()
    }

    fn start_at(&mut self, index: usize) -> Option<TransportAction> {
        let track = self.queue.get(index)?.clone();
        self.current = Some(index);
        self.is_playing = true;
        Some(TransportAction::Load(track))
    }

    fn next_index(&mut self) -> Option<usize> {
        if self.shuffle_enabled {
            self.ensure_shuffle_order();
            let Some(current) = self.current else {
                return self.shuffle_order.first().copied();
            };
            match self.shuffle_order.iter().position(|idx| *idx == current) {
                Some(pos) if pos + 1 < self.shuffle_order.len() => {
                    Some(self.shuffle_order[pos + 1])
                }
                _ => None,
            }
        } else {
            match self.current {
                Some(current) if current + 1 < self.queue.len() => Some(current + 1),
                Some(_) => None,
                None => Some(0),
            }
        }
    }

    fn prev_index(&mut self) -> usize {
        if self.shuffle_enabled {
            self.ensure_shuffle_order();
            let last = self.shuffle_order[self.shuffle_order.len() - 1];
            let Some(current) = self.current else {
                return last;
            };
            match self.shuffle_order.iter().position(|idx| *idx == current) {
                Some(pos) if pos > 0 => self.shuffle_order[pos - 1],
                _ => last,
            }
        } else {
            match self.current {
                Some(current) if current > 0 => current - 1,
                _ => self.queue.len() - 1,
            }
        }
    }

    fn first_position(&mut self) -> usize {
        if self.shuffle_enabled {
            self.ensure_shuffle_order();
            self.shuffle_order[0]
        } else {
            0
        }
    }

    fn end_of_queue(&mut self) -> Option<TransportAction> {
        if self.repeat_mode == RepeatMode::All {
            self.pending_filler = true;
            let exclude = self
                .current_track()
                .map(|track| track.id.clone())
                .into_iter()
                .collect();
            Some(TransportAction::AwaitFiller { exclude })
        } else {
            // Explicit skips never replay under repeat-one; at the boundary
            // it stops just like off. `current` stays put so resuming play
            // replays the last track rather than advancing.
            self.is_playing = false;
            Some(TransportAction::Halt)
        }
    }

    // The queue is a pub field, so its length can drift under an active
    // shuffle; regenerate lazily before any shuffled traversal.
    fn ensure_shuffle_order(&mut self) {
        if self.shuffle_order.len() != self.queue.len() {
            self.rebuild_shuffle_order();
        }
    }

    fn rebuild_shuffle_order(&mut self) {
        self.shuffle_order = (0..self.queue.len()).collect();
        self.shuffle_order.shuffle(&mut self.rng);
    }
}

impl Default for PlayerEngine {
    fn default() -> Self {
        Self::new()
    }
}
