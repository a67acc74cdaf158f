#![no_main]

use libfuzzer_sys::fuzz_target;
use vaani::engine::PlayerEngine;
use vaani::model::{Direction, Track};

fn track(id: usize) -> Track {
    Track {
        id: format!("track_{id}"),
        title: format!("Track {id}"),
        artist_names: String::from("artist"),
        stream_url: Some(format!("https://cdn.example/{id}.mp4")),
        artwork_url: None,
        album: None,
        duration_seconds: None,
    }
}

fuzz_target!(|data: &[u8]| {
    let mut engine = PlayerEngine::new();
    let len = (data.len() % 16).max(1);
    let queue: Vec<Track> = (0..len).map(track).collect();
    let start = queue[0].clone();
    engine.load_queue(queue, &start);

    for byte in data {
        match byte % 9 {
            0 => {
                let _ = engine.advance(Direction::Next);
            }
            1 => {
                let _ = engine.advance(Direction::Prev);
            }
            2 => engine.toggle_shuffle(),
            3 => engine.cycle_repeat(),
            4 => {
                let _ = engine.on_track_ended();
            }
            5 => {
                let _ = engine.on_track_error();
            }
            6 => {
                let _ = engine.resolve_filler(Some(track(usize::from(*byte))));
            }
            7 => {
                let _ = engine.play(track(usize::from(*byte) % 24));
            }
            _ => engine.toggle_playback(),
        }

        if let Some(index) = engine.current {
            assert!(index < engine.queue.len());
        }
    }
});
