// Step transport - one independently timed eight-step sequencer
// Stopped <-> Running state machine; ticks are driven by the host timer.

use crate::persistence::PatternSnapshot;
use crate::sequencer::note::Note;
use crate::sequencer::pattern::{StepPattern, STEP_COUNT};
use crate::time::{TimerDriver, TimerHandle};
use crate::voice::{InstrumentKind, VoicePool};
use std::time::Duration;

/// Unique identifier for sequencers. Monotonically assigned by the
/// registry, never reused while the registry lives.
pub type SequencerId = u64;

/// Supported tempo range in beats per minute, inclusive.
pub const TEMPO_MIN: u32 = 60;
pub const TEMPO_MAX: u32 = 180;

/// Tempo a freshly created sequencer starts with.
pub const DEFAULT_TEMPO: u32 = 120;

/// Fixed duration of a step trigger: an eighth note at the reference
/// 120 BPM. Deliberately independent of the tick interval, matching the
/// observed behavior of the toy; at high tempo a trigger outlasts its step
/// and overlapping one-shots of the same note occur.
pub const STEP_TRIGGER: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SequencerError {
    #[error("tempo {0} BPM outside supported range {TEMPO_MIN}-{TEMPO_MAX}")]
    TempoOutOfRange(u32),
}

/// One independently timed step sequencer owning one pattern.
///
/// Each step is a sixteenth note at the configured tempo, so the tick
/// interval is `(60 / tempo) * 250` milliseconds. Starting performs the
/// first tick synchronously so step 0 sounds without waiting a full
/// interval. A tempo or pattern change while running restarts the
/// transport so the new interval takes effect without accumulated drift.
pub struct Sequencer {
    id: SequencerId,
    pattern: StepPattern,
    tempo: u32,
    looping: bool,
    instrument: InstrumentKind,
    current_step: usize,
    timer: Option<TimerHandle>,
}

impl Sequencer {
    pub(crate) fn new(id: SequencerId) -> Self {
        Self {
            id,
            pattern: StepPattern::new(),
            tempo: DEFAULT_TEMPO,
            looping: false,
            instrument: InstrumentKind::default(),
            current_step: 0,
            timer: None,
        }
    }

    pub fn id(&self) -> SequencerId {
        self.id
    }

    pub fn tempo(&self) -> u32 {
        self.tempo
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn instrument(&self) -> InstrumentKind {
        self.instrument
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    /// Running iff a host timer is armed.
    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    pub fn pattern(&self) -> &StepPattern {
        &self.pattern
    }

    /// Time between ticks at the current tempo (one sixteenth note).
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(60.0 / self.tempo as f64 * 0.25)
    }

    /// Begin running. No-op if already running. Resets to step 0, arms the
    /// host timer, and executes the first tick synchronously.
    pub fn start(&mut self, driver: &mut dyn TimerDriver, pool: &mut VoicePool) {
        if self.is_running() {
            return;
        }
        self.current_step = 0;
        self.timer = Some(driver.set_interval(self.tick_interval()));
        log::debug!(
            "sequencer {} started at {} BPM ({:?}/tick)",
            self.id,
            self.tempo,
            self.tick_interval()
        );
        self.tick(pool, driver);
    }

    /// Stop and rewind. Idempotent; safe to call while stopped.
    pub fn stop(&mut self, driver: &mut dyn TimerDriver) {
        if let Some(handle) = self.timer.take() {
            driver.clear_interval(handle);
            log::debug!("sequencer {} stopped", self.id);
        }
        self.current_step = 0;
    }

    /// One transport advance: dispatch the current step, then move on.
    ///
    /// Notes are dispatched in canonical `Note::ALL` order; triggers the
    /// pool rejects are dropped silently. When the step index wraps to 0
    /// and looping is off, the transport stops itself.
    ///
    /// A cleared host timer may still deliver one queued callback, so a
    /// tick on a stopped sequencer is ignored.
    pub fn tick(&mut self, pool: &mut VoicePool, driver: &mut dyn TimerDriver) {
        if !self.is_running() {
            return;
        }

        let instrument = self.instrument;
        for note in self.pattern.active_notes(self.current_step) {
            let _ = pool.trigger_one_shot(note, instrument, STEP_TRIGGER);
        }

        self.current_step = (self.current_step + 1) % STEP_COUNT;
        if self.current_step == 0 && !self.looping {
            self.stop(driver);
        }
    }

    /// Change tempo. Rejected (never clamped) outside 60-180 BPM. While
    /// running this is an implicit stop+start so the new interval applies
    /// without drift.
    pub fn set_tempo(
        &mut self,
        bpm: u32,
        driver: &mut dyn TimerDriver,
        pool: &mut VoicePool,
    ) -> Result<(), SequencerError> {
        if !(TEMPO_MIN..=TEMPO_MAX).contains(&bpm) {
            return Err(SequencerError::TempoOutOfRange(bpm));
        }
        self.tempo = bpm;
        if self.is_running() {
            self.stop(driver);
            self.start(driver, pool);
        }
        Ok(())
    }

    /// Replace the whole pattern. Restarts the transport while running.
    pub fn set_pattern(
        &mut self,
        pattern: StepPattern,
        driver: &mut dyn TimerDriver,
        pool: &mut VoicePool,
    ) {
        self.pattern = pattern;
        if self.is_running() {
            self.stop(driver);
            self.start(driver, pool);
        }
    }

    /// Flip the loop flag. Never restarts the transport.
    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    pub fn set_instrument(&mut self, instrument: InstrumentKind) {
        self.instrument = instrument;
    }

    /// Edit one cell of the owned pattern in place.
    pub fn toggle_step(&mut self, note: Note, step: usize) {
        self.pattern.toggle(note, step);
    }

    /// Snapshot of the persisted state triple.
    pub fn snapshot(&self) -> PatternSnapshot {
        PatternSnapshot {
            pattern: self.pattern.clone(),
            tempo: self.tempo,
            looping: self.looping,
        }
    }

    /// Restore from a snapshot. The sequencer must be stopped first;
    /// applying over a running transport is a programming error.
    pub fn apply_snapshot(&mut self, snapshot: &PatternSnapshot) {
        assert!(
            !self.is_running(),
            "snapshot applied to a running sequencer"
        );
        self.pattern = snapshot.pattern.clone();
        self.tempo = snapshot.tempo;
        self.looping = snapshot.looping;
    }
}
