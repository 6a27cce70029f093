//! Play/pause over the media inputs feeding the graph.

use crate::error::Result;

/// A media input that can be started and stopped (an `<audio>` element).
pub trait Transport {
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self);
}

/// The audio context driving playback. Browsers start it suspended until a
/// user gesture.
pub trait PlaybackContext {
    fn is_suspended(&self) -> bool;
    fn resume(&mut self);
}

#[derive(Default, Debug)]
pub struct PlaybackToggle {
    playing: bool,
}

impl PlaybackToggle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Flip between playing and paused, resuming a suspended context first.
    /// Returns the new state. A transport that refuses to start is logged
    /// and the others still start.
    pub fn toggle<C, T>(&mut self, ctx: &mut C, transports: &mut [T]) -> bool
    where
        C: PlaybackContext,
        T: Transport,
    {
        if ctx.is_suspended() {
            log::info!("[transport] resuming suspended audio context");
            ctx.resume();
        }
        if self.playing {
            for t in transports.iter_mut() {
                t.pause();
            }
            self.playing = false;
        } else {
            for (i, t) in transports.iter_mut().enumerate() {
                if let Err(e) = t.play() {
                    log::warn!("[transport] input {} did not start: {}", i, e);
                }
            }
            self.playing = true;
        }
        log::info!("[transport] playing={}", self.playing);
        self.playing
    }
}
