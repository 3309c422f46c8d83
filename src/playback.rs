//! Replays a [SearchTrace] to a renderer, one step at a time.
//!
//! Computing a trace and showing it are separate: the search runs to completion first, then a
//! [Playback] walks the recorded steps with a delay between them. The delay goes through a
//! [Sleeper] so that tests can run without timers, and a [CancelToken] lets a newer run abandon
//! a playback that is still in progress.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use grid_util::point::Point;
use log::{debug, warn};

use crate::trace::{SearchTrace, TraceStatus};

/// How fast playback advances.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SpeedTier {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl SpeedTier {
    /// Pause after showing a step with the given marker.
    pub fn delay(&self, marker: Marker) -> Duration {
        let ms = match (self, marker) {
            (SpeedTier::Slow, Marker::Visited) => 100,
            (SpeedTier::Slow, Marker::Path) => 150,
            (SpeedTier::Medium, Marker::Visited) => 30,
            (SpeedTier::Medium, Marker::Path) => 50,
            (SpeedTier::Fast, Marker::Visited) => 5,
            (SpeedTier::Fast, Marker::Path) => 10,
        };
        Duration::from_millis(ms)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackConfig {
    pub speed: SpeedTier,
    /// Pause between the last step and the status report.
    pub status_delay: Duration,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        PlaybackConfig {
            speed: SpeedTier::default(),
            status_delay: Duration::from_millis(100),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Marker {
    Visited,
    Path,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub pos: Point,
    pub marker: Marker,
    pub delay: Duration,
}

/// The steps of a trace in display order: every visit event, then the path from start to end.
pub fn steps(trace: &SearchTrace, speed: SpeedTier) -> impl Iterator<Item = Step> + '_ {
    let visited = trace.visited.iter().map(move |e| Step {
        pos: e.pos,
        marker: Marker::Visited,
        delay: speed.delay(Marker::Visited),
    });
    let path = trace.path.iter().map(move |p| Step {
        pos: *p,
        marker: Marker::Path,
        delay: speed.delay(Marker::Path),
    });
    visited.chain(path)
}

/// Receives playback output. Start and end cells are never marked.
pub trait Renderer {
    /// Removes all visited and path marks left by an earlier playback.
    fn clear_marks(&mut self);
    fn mark(&mut self, pos: Point, marker: Marker);
    fn status(&mut self, status: TraceStatus);
}

pub trait Sleeper {
    fn sleep(&mut self, duration: Duration);
}

/// Blocks the current thread for each delay.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Shared cancellation flag. Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> CancelToken {
        CancelToken::default()
    }
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackOutcome {
    Completed,
    Cancelled,
}

/// A computed trace waiting to be shown.
#[derive(Clone, Debug)]
pub struct Playback {
    pub trace: SearchTrace,
    pub config: PlaybackConfig,
    token: CancelToken,
}

impl Playback {
    pub fn new(trace: SearchTrace, config: PlaybackConfig, token: CancelToken) -> Playback {
        Playback {
            trace,
            config,
            token,
        }
    }

    pub fn token(&self) -> &CancelToken {
        &self.token
    }

    /// Shows the trace on `renderer`. Marks from earlier runs are cleared first. The token is
    /// checked before every step; a cancelled playback stops where it is and reports no status.
    pub fn play<R, S>(&self, renderer: &mut R, sleeper: &mut S) -> PlaybackOutcome
    where
        R: Renderer + ?Sized,
        S: Sleeper + ?Sized,
    {
        if self.token.is_cancelled() {
            warn!("Playback cancelled before it started");
            return PlaybackOutcome::Cancelled;
        }
        renderer.clear_marks();
        for (i, step) in steps(&self.trace, self.config.speed).enumerate() {
            if self.token.is_cancelled() {
                warn!("Playback cancelled after {} of {} steps", i, self.trace.step_count());
                return PlaybackOutcome::Cancelled;
            }
            renderer.mark(step.pos, step.marker);
            sleeper.sleep(step.delay);
        }
        sleeper.sleep(self.config.status_delay);
        if self.token.is_cancelled() {
            warn!("Playback cancelled before reporting its status");
            return PlaybackOutcome::Cancelled;
        }
        let status = self.trace.status();
        debug!("Playback finished with {:?}", status);
        renderer.status(status);
        PlaybackOutcome::Completed
    }
}
