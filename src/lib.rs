//! Playback queue and transport engine for the Vaani music client.
//!
//! The engine decides what plays next (shuffle, repeat, autoplay
//! continuation); audio output, catalog fetching and rendering live behind
//! the collaborator traits in [`sink`] and [`autoplay`].

pub mod autoplay;
pub mod config;
pub mod engine;
pub mod history;
pub mod library;
pub mod model;
pub mod sink;
