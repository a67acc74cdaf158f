use crate::model::PersistedState;
use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::PathBuf;

const APP_DIR: &str = "vaani";
const STATE_FILE: &str = "state.json";

pub fn config_root() -> Result<PathBuf> {
    if let Ok(override_dir) = env::var("VAANI_CONFIG_DIR") {
        return Ok(PathBuf::from(override_dir));
    }

    let home = env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .context("neither HOME nor USERPROFILE is set")?;
    Ok(PathBuf::from(home).join(".config").join(APP_DIR))
}

pub fn state_path() -> Result<PathBuf> {
    Ok(config_root()?.join(STATE_FILE))
}

pub fn ensure_config_dir() -> Result<PathBuf> {
    let root = config_root()?;
    fs::create_dir_all(&root).with_context(|| format!("failed to create {}", root.display()))?;
    Ok(root)
}

pub fn load_state() -> Result<PersistedState> {
    let path = state_path()?;
    if !path.exists() {
        return Ok(PersistedState::default());
    }

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("failed to read state file {}", path.display()))?;
    let state: PersistedState = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse state file {}", path.display()))?;
    Ok(state)
}

pub fn save_state(state: &PersistedState) -> Result<()> {
    ensure_config_dir()?;
    let path = state_path()?;
    let json = serde_json::to_string_pretty(state)?;
    fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RepeatMode, Track};
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempdir().expect("tempdir");
        unsafe {
            env::set_var("VAANI_CONFIG_DIR", dir.path().to_string_lossy().as_ref());
        }

        let state = PersistedState {
            repeat_mode: RepeatMode::One,
            recently_played: vec![Track {
                id: String::from("t1"),
                title: String::from("Song"),
                artist_names: String::from("Artist A, Artist B"),
                stream_url: Some(String::from("https://cdn.example/t1.mp4")),
                artwork_url: None,
                album: Some(String::from("Single")),
                duration_seconds: Some(211),
            }],
            ..PersistedState::default()
        };
        save_state(&state).expect("save");

        let loaded = load_state().expect("load");
        assert_eq!(loaded.repeat_mode, RepeatMode::One);
        assert_eq!(loaded.recently_played.len(), 1);
        assert_eq!(loaded.recently_played[0].id, "t1");
    }

    #[test]
    fn partial_state_files_fill_in_defaults() {
        let state: PersistedState =
            serde_json::from_str(r#"{"repeat_mode":"Off"}"#).expect("parse");
        assert_eq!(state.repeat_mode, RepeatMode::Off);
        assert!(state.liked.is_empty());
        assert_eq!(state.volume, 1.0);
    }
}
