use crate::autoplay::FillerSource;
use crate::engine::{PlayerEngine, TransportAction};
use crate::model::{Direction, Track};
use std::time::{Duration, Instant};

/// Past this point into a track, "previous" restarts it instead of moving
/// back through the queue.
pub const PREV_RESTART_THRESHOLD: Duration = Duration::from_secs(3);

/// The audio output the transport drives. Implementations wrap whatever
/// actually makes sound (an `<audio>` element, a streaming sink); the
/// engine itself never touches audio APIs.
pub trait AudioSink {
    fn load(&mut self, stream_url: &str);
    fn play(&mut self);
    fn pause(&mut self);
    fn seek_to(&mut self, position: Duration);
    fn position(&self) -> Option<Duration>;
    fn duration(&self) -> Option<Duration>;
}

/// Sink that keeps time without producing audio. Used in tests and as a
/// fallback when no output device is available.
#[derive(Debug, Default)]
pub struct NullAudioSink {
    current: Option<String>,
    paused: bool,
    started_at: Option<Instant>,
    position_offset: Duration,
    track_duration: Option<Duration>,
}

impl NullAudioSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_url(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.track_duration = Some(duration);
    }

    fn clock_position(&self) -> Duration {
        let mut position = self.position_offset;
        if !self.paused
            && self.current.is_some()
            && let Some(started_at) = self.started_at
        {
            position = position.saturating_add(started_at.elapsed());
        }
        if let Some(duration) = self.track_duration {
            return position.min(duration);
        }
        position
    }
}

impl AudioSink for NullAudioSink {
    fn load(&mut self, stream_url: &str) {
        self.current = Some(stream_url.to_string());
        self.paused = false;
        self.started_at = Some(Instant::now());
        self.position_offset = Duration::ZERO;
        self.track_duration = None;
    }

    fn play(&mut self) {
        if self.current.is_some() && self.paused {
            self.started_at = Some(Instant::now());
        }
        self.paused = false;
    }

    fn pause(&mut self) {
        self.position_offset = self.clock_position();
        self.started_at = None;
        self.paused = true;
    }

    fn seek_to(&mut self, position: Duration) {
        self.position_offset = position;
        if !self.paused && self.current.is_some() {
            self.started_at = Some(Instant::now());
        }
    }

    fn position(&self) -> Option<Duration> {
        self.current.as_ref().map(|_| self.clock_position())
    }

    fn duration(&self) -> Option<Duration> {
        self.track_duration
    }
}

/// Glue between the engine, an audio sink and a filler source: applies
/// `TransportAction`s, resolves autoplay fetches, and implements the two
/// transport-level UX rules the engine stays out of (restart-on-previous
/// and skip-on-error).
pub struct Transport<S: AudioSink, F: FillerSource> {
    pub engine: PlayerEngine,
    pub sink: S,
    pub filler: F,
}

impl<S: AudioSink, F: FillerSource> Transport<S, F> {
    pub fn new(engine: PlayerEngine, sink: S, filler: F) -> Self {
        Self {
            engine,
            sink,
            filler,
        }
    }

    pub fn play(&mut self, track: Track) {
        let action = self.engine.play(track);
        self.apply(action);
    }

    pub fn play_in_context(&mut self, tracks: Vec<Track>, start: &Track) {
        let action = self.engine.load_queue(tracks, start);
        self.apply(action);
    }

    pub fn start_radio(&mut self, seed: Track, pool: &[Track]) {
        let action = self.engine.start_radio(seed, pool);
        self.apply(action);
    }

    pub fn next(&mut self) {
        let action = self.engine.advance(Direction::Next);
        self.apply(action);
    }

    /// Early in a track this moves back through the queue; past the
    /// threshold it restarts the current track and the queue stays put.
    pub fn previous(&mut self) {
        if self
            .sink
            .position()
            .is_some_and(|position| position > PREV_RESTART_THRESHOLD)
        {
            self.sink.seek_to(Duration::ZERO);
            return;
        }
        let action = self.engine.advance(Direction::Prev);
        self.apply(action);
    }

    pub fn toggle_playback(&mut self) {
        self.engine.toggle_playback();
        if self.engine.is_playing {
            self.sink.play();
        } else {
            self.sink.pause();
        }
    }

    pub fn on_track_ended(&mut self) {
        let action = self.engine.on_track_ended();
        self.apply(action);
    }

    pub fn on_track_error(&mut self) {
        let action = self.engine.on_track_error();
        self.apply(action);
    }

    fn apply(&mut self, mut action: Option<TransportAction>) {
        // Unplayable entries are skipped like failed streams; give up after
        // one full pass so a queue with no playable source cannot spin.
        let mut skip_budget = self.engine.queue.len() + 1;
        loop {
            match action.take() {
                None => return,
                Some(TransportAction::Load(track)) => match track.stream_url.as_deref() {
                    Some(url) => {
                        self.sink.load(url);
                        self.sink.play();
                        return;
                    }
                    None => {
                        if skip_budget == 0 {
                            self.engine.is_playing = false;
                            self.sink.pause();
                            return;
                        }
                        skip_budget -= 1;
                        action = self.engine.on_track_error();
                    }
                },
                Some(TransportAction::Restart) => {
                    self.sink.seek_to(Duration::ZERO);
                    self.sink.play();
                    return;
                }
                Some(TransportAction::AwaitFiller { exclude }) => {
                    let filler = self.filler.filler_track(&exclude);
                    action = self.engine.resolve_filler(filler);
                }
                Some(TransportAction::Halt) => {
                    self.sink.pause();
                    return;
                }
            }
        }
    }
}
