//! Announcement Arbiter
//!
//! Serializes spoken brightness announcements on the single audio device.
//!
//! # Flow
//! ```text
//! notify(step) ──▶ pending steps + wake ──▶ dispatcher ──▶ request slot ──▶ worker ──▶ AudioOutput::play
//! ```
//! - [`Arbiter::notify`] is synchronous and can be called at any time. It records the
//!   step in the pending set and wakes the dispatcher.
//! - The dispatcher ([`Arbiter::run_dispatcher`]) waits for the wake with a bounded
//!   timeout, reads and clears the pending set in one step, and hands the most recent
//!   step to the worker. Steps that were superseded within the same wake cycle are
//!   dropped.
//! - The request slot holds a single step. A newer request overwrites a queued one
//!   that has not started yet, so a fast spin of the knob ends with the announcement
//!   of the step the user stopped on.
//! - Exactly one long-lived worker ([`Arbiter::run_worker`]) drains the slot. It plays
//!   each sound while holding the playback lock, so at most one sound is playing and
//!   at most one is waiting at any time.
//!
//! Playback failures are logged and dropped. They never reach the UI and are never
//! retried.
//!
//! # Shutdown
//! Both loops wait with a bounded timeout and return once [`Arbiter::close`] was
//! called. A sound that is already playing finishes first.

use crate::system::sound::{AudioError, AudioOutput, Sound};
use crate::system::state::{BrightnessStep, StepSet};
use crate::system::tracker::Notify;
use core::cell::Cell;
use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex as BlockingMutex;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;
use embassy_time::{with_timeout, Duration};

/// Arbiter tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArbiterConfig {
    /// Longest time the dispatcher and the worker wait before rechecking for shutdown
    pub wake_poll: Duration,
    /// Upper bound for a single `play` call, `None` waits for the device forever
    pub playback_timeout: Option<Duration>,
}

impl ArbiterConfig {
    pub const DEFAULT: ArbiterConfig = ArbiterConfig {
        wake_poll: Duration::from_millis(100),
        playback_timeout: Some(Duration::from_secs(5)),
    };
}

impl Default for ArbiterConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Whether an announcement is outstanding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ArbiterState {
    /// Nothing pending, queued or playing
    Idle,
    /// A request is pending, queued or playing
    Announcing,
}

/// Why a single announcement did not play
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnnounceError {
    /// The audio device reported a failure
    #[error("playback failed: {0}")]
    Playback(#[from] AudioError),
    /// The audio device did not finish within the playback timeout
    #[error("playback timed out")]
    TimedOut,
}

/// Requests recorded since the last dispatcher wake
#[derive(Debug, Clone, Copy, Default)]
struct Pending {
    steps: StepSet,
    latest: Option<BrightnessStep>,
}

/// Owner of the audio device's announcement traffic
///
/// All state lives inside the arbiter; the firmware keeps one instance in a
/// `static` and hands `&'static` references to the panel and the two loops.
pub struct Arbiter<M: RawMutex> {
    config: ArbiterConfig,
    pending: BlockingMutex<M, Cell<Pending>>,
    wake: Signal<M, ()>,
    request: Signal<M, BrightnessStep>,
    playback: Mutex<M, ()>,
    /// Announcements playing or waiting for the playback lock
    busy: AtomicUsize,
    closed: AtomicBool,
}

impl<M: RawMutex> Arbiter<M> {
    pub const fn new(config: ArbiterConfig) -> Self {
        Self {
            config,
            pending: BlockingMutex::new(Cell::new(Pending {
                steps: StepSet::EMPTY,
                latest: None,
            })),
            wake: Signal::new(),
            request: Signal::new(),
            playback: Mutex::new(()),
            busy: AtomicUsize::new(0),
            closed: AtomicBool::new(false),
        }
    }

    /// Records a request to announce `step` and wakes the dispatcher
    pub fn notify(&self, step: BrightnessStep) {
        self.pending.lock(|pending| {
            let mut requests = pending.get();
            requests.steps.insert(step);
            requests.latest = Some(step);
            pending.set(requests);
        });
        self.wake.signal(());
    }

    /// Steps with a request that the dispatcher has not picked up yet
    pub fn pending(&self) -> StepSet {
        self.pending.lock(|pending| pending.get().steps)
    }

    /// Whether a request is waiting for the worker
    pub fn has_queued_request(&self) -> bool {
        self.request.signaled()
    }

    pub fn state(&self) -> ArbiterState {
        if !self.pending().is_empty()
            || self.request.signaled()
            || self.busy.load(Ordering::Acquire) > 0
        {
            ArbiterState::Announcing
        } else {
            ArbiterState::Idle
        }
    }

    /// Makes both loops return after their current wait
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Runs one dispatcher wake cycle
    ///
    /// Reads and clears the pending set and queues its most recent step for the
    /// worker. With nothing pending this does nothing and returns `None`.
    pub fn dispatch_pending(&self) -> Option<BrightnessStep> {
        let requests = self
            .pending
            .lock(|pending| pending.replace(Pending::default()));
        let step = requests.latest?;

        for superseded in requests.steps.iter().filter(|pending| *pending != step) {
            debug!("Announcement of {}% superseded", superseded.percent());
        }
        if let Some(replaced) = self.request.try_take() {
            debug!("Queued announcement of {}% replaced", replaced.percent());
        }
        self.request.signal(step);
        Some(step)
    }

    /// Dispatcher loop
    pub async fn run_dispatcher(&self) {
        info!("Announcement dispatcher started");
        while !self.is_closed() {
            if with_timeout(self.config.wake_poll, self.wake.wait())
                .await
                .is_ok()
            {
                self.dispatch_pending();
            }
        }
        info!("Announcement dispatcher stopped");
    }

    /// Worker loop, the only consumer of the request slot
    pub async fn run_worker<A: AudioOutput>(&self, audio: &mut A) {
        info!("Announcement worker started");
        while !self.is_closed() {
            let Ok(step) = with_timeout(self.config.wake_poll, self.request.wait()).await else {
                continue;
            };
            // Failures are already logged; audio is cosmetic, so nothing else to do.
            let _ = self.announce(audio, step).await;
        }
        info!("Announcement worker stopped");
    }

    /// Plays the announcement for `step` while holding the playback lock
    ///
    /// Waits for the lock as long as it takes and counts as announcing while it
    /// waits. The lock is released on every exit path, including failure and
    /// timeout.
    pub async fn announce<A: AudioOutput>(
        &self,
        audio: &mut A,
        step: BrightnessStep,
    ) -> Result<(), AnnounceError> {
        let _busy = BusyGuard::enter(&self.busy);
        let _device = self.playback.lock().await;

        let sound = Sound::for_step(step);
        info!("Announcing {:?}", sound);
        let result = match self.config.playback_timeout {
            Some(limit) => match with_timeout(limit, audio.play(sound)).await {
                Ok(played) => played.map_err(AnnounceError::from),
                Err(_) => Err(AnnounceError::TimedOut),
            },
            None => audio.play(sound).await.map_err(AnnounceError::from),
        };

        match result {
            Ok(()) => debug!("Announcement of {:?} finished", sound),
            Err(error) => warn!("Announcement of {:?} failed: {:?}", sound, error),
        }
        result
    }
}

impl<M: RawMutex> Notify for Arbiter<M> {
    fn notify(&self, step: BrightnessStep) {
        Arbiter::notify(self, step);
    }
}

/// Counts an announcement as outstanding until dropped
struct BusyGuard<'a>(&'a AtomicUsize);

impl<'a> BusyGuard<'a> {
    fn enter(count: &'a AtomicUsize) -> Self {
        count.fetch_add(1, Ordering::AcqRel);
        Self(count)
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}
