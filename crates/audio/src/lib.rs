#![warn(missing_docs)]
//! Sound playback abstraction.
//!
//! The interaction core only needs "play this clip at that position"; what a
//! sink does with the request is its own business. The demo logs requests
//! through `tracing`, tests capture them with [`RecordingSink`].

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Handle for a configured audio clip (e.g. `door/creak_1`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClipId(pub String);

impl ClipId {
    /// Convenience constructor.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl std::fmt::Display for ClipId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single playback request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoundEvent {
    /// Requested clip.
    pub clip: ClipId,
    /// World position the sound originates from.
    pub position: Vec3,
    /// Linear volume in [0, 1].
    pub volume: f32,
}

/// Destination for playback requests.
pub trait AudioSink {
    /// Play `clip` at `position` with the given volume.
    fn play(&mut self, clip: &ClipId, position: Vec3, volume: f32);
}

/// Sink that records every request, for tests and the headless harness.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Vec<SoundEvent>,
}

impl RecordingSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything played so far, in order.
    pub fn events(&self) -> &[SoundEvent] {
        &self.events
    }

    /// How many times `clip` has been requested.
    pub fn count(&self, clip: &ClipId) -> usize {
        self.events.iter().filter(|e| &e.clip == clip).count()
    }

    /// Drop recorded history.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl AudioSink for RecordingSink {
    fn play(&mut self, clip: &ClipId, position: Vec3, volume: f32) {
        self.events.push(SoundEvent {
            clip: clip.clone(),
            position,
            volume,
        });
    }
}

/// Sink that reports playback through `tracing` (headless demo output).
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, clip: &ClipId, position: Vec3, volume: f32) {
        debug!(%clip, x = position.x, y = position.y, z = position.z, volume, "play sound");
    }
}
