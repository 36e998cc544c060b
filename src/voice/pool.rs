// Voice pool - admission control and attack/release lifecycle
// The single synchronization point shared by all sequencers and direct play.

use crate::engine::{ToneEngine, VoiceHandle};
use crate::sequencer::Note;
use crate::time::Clock;
use crate::viz::Visualizer;
use crate::voice::instrument::InstrumentKind;
use std::collections::HashMap;
use std::mem;
use std::sync::Arc;
use std::time::Duration;

/// Maximum number of simultaneously live voices.
pub const MAX_POLYPHONY: usize = 6;

/// How long a released voice keeps its engine handle so the release
/// envelope stays audible. Bookkeeping frees the slot immediately; only
/// the physical disposal waits.
pub const RELEASE_TAIL: Duration = Duration::from_secs(1);

/// Expected, recoverable rejection reasons. A rejected trigger is simply
/// a missed note; callers drop it silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum VoiceError {
    #[error("all {MAX_POLYPHONY} voices are in use")]
    AtCapacity,

    #[error("note {0} is already sounding")]
    AlreadySounding(Note),
}

/// One sustained voice. Attack completes synchronously inside `start`, so
/// the first observable state is `Sustaining`; `Releasing` voices live in
/// the tail list until disposal.
#[derive(Debug, Clone, Copy)]
struct Voice {
    handle: VoiceHandle,
}

/// A one-shot trigger in flight. The engine performs the timed release
/// itself; the pool only tracks when the polyphony slot frees and when the
/// handle may be torn down.
#[derive(Debug, Clone, Copy)]
struct OneShot {
    handle: VoiceHandle,
    free_at: Duration,
}

/// A released handle waiting out its audible tail.
#[derive(Debug, Clone, Copy)]
struct Tail {
    handle: VoiceHandle,
    dispose_at: Duration,
}

/// Bounded registry of currently sounding voices.
///
/// Policy: monophonic per note for sustained play (one voice per distinct
/// note), polyphonic across notes, with a hard cap of [`MAX_POLYPHONY`]
/// live voices counting both sustained voices and in-flight one-shots.
/// Every admission check and mutation happens within one synchronous call;
/// there is no suspension between check and registration.
pub struct VoicePool {
    engine: Box<dyn ToneEngine>,
    viz: Box<dyn Visualizer>,
    clock: Arc<dyn Clock>,
    held: HashMap<Note, Voice>,
    one_shots: Vec<OneShot>,
    tails: Vec<Tail>,
}

impl VoicePool {
    pub fn new(engine: Box<dyn ToneEngine>, viz: Box<dyn Visualizer>, clock: Arc<dyn Clock>) -> Self {
        Self {
            engine,
            viz,
            clock,
            held: HashMap::new(),
            one_shots: Vec::new(),
            tails: Vec::new(),
        }
    }

    /// Voices currently counting against the polyphony cap.
    pub fn live_count(&self) -> usize {
        let now = self.clock.now();
        self.held.len() + self.one_shots.iter().filter(|o| o.free_at > now).count()
    }

    /// Whether `note` is currently held as a sustained voice.
    pub fn is_sounding(&self, note: Note) -> bool {
        self.held.contains_key(&note)
    }

    /// Start sustaining `note` until `stop` is called.
    ///
    /// Rejects with `AlreadySounding` if the note is already held and with
    /// `AtCapacity` when the pool is full; the existing voices are untouched
    /// either way.
    pub fn start(&mut self, note: Note, kind: InstrumentKind) -> Result<(), VoiceError> {
        let now = self.clock.now();
        self.sweep(now);

        if self.held.contains_key(&note) {
            return Err(VoiceError::AlreadySounding(note));
        }
        if self.live_count() >= MAX_POLYPHONY {
            return Err(VoiceError::AtCapacity);
        }

        let handle = self.engine.create_voice(kind);
        self.engine.attack(handle, kind.pitch_for(note));
        self.held.insert(note, Voice { handle });
        self.viz.note_triggered(note, now);
        Ok(())
    }

    /// Release `note` if it is sounding; no-op otherwise.
    ///
    /// The slot frees immediately (a new `start` for the same note is
    /// permitted right away); the engine handle is disposed only after
    /// [`RELEASE_TAIL`] so the release envelope stays audible.
    pub fn stop(&mut self, note: Note) {
        let now = self.clock.now();
        if let Some(voice) = self.held.remove(&note) {
            self.engine.release(voice.handle);
            self.tails.push(Tail {
                handle: voice.handle,
                dispose_at: now + RELEASE_TAIL,
            });
        }
        self.sweep(now);
    }

    /// Release every live voice. Idempotent; used on focus loss and
    /// global stop.
    pub fn stop_all(&mut self) {
        let now = self.clock.now();

        let held = mem::take(&mut self.held);
        for (_, voice) in held {
            self.engine.release(voice.handle);
            self.tails.push(Tail {
                handle: voice.handle,
                dispose_at: now + RELEASE_TAIL,
            });
        }

        let one_shots = mem::take(&mut self.one_shots);
        for shot in one_shots {
            self.engine.release(shot.handle);
            self.tails.push(Tail {
                handle: shot.handle,
                dispose_at: now + RELEASE_TAIL,
            });
        }

        self.sweep(now);
    }

    /// Trigger `note` for a fixed duration; the engine handles the timed
    /// release. Subject to the same capacity cap as `start`, but not keyed
    /// by note: overlapping one-shots of the same note are permitted.
    pub fn trigger_one_shot(
        &mut self,
        note: Note,
        kind: InstrumentKind,
        duration: Duration,
    ) -> Result<(), VoiceError> {
        let now = self.clock.now();
        self.sweep(now);

        if self.live_count() >= MAX_POLYPHONY {
            return Err(VoiceError::AtCapacity);
        }

        let handle = self.engine.create_voice(kind);
        self.engine
            .attack_one_shot(handle, kind.pitch_for(note), duration);
        self.one_shots.push(OneShot {
            handle,
            free_at: now + duration,
        });
        self.viz.note_triggered(note, now);
        Ok(())
    }

    /// Expire finished one-shots and dispose handles whose tail has passed.
    /// Fire-and-forget housekeeping; hosts call this from their event loop.
    pub fn process_deferred(&mut self) {
        let now = self.clock.now();
        self.sweep(now);
    }

    fn sweep(&mut self, now: Duration) {
        let (done, in_flight): (Vec<OneShot>, Vec<OneShot>) = mem::take(&mut self.one_shots)
            .into_iter()
            .partition(|shot| shot.free_at <= now);
        self.one_shots = in_flight;
        for shot in done {
            self.tails.push(Tail {
                handle: shot.handle,
                dispose_at: shot.free_at + RELEASE_TAIL,
            });
        }

        let (due, pending): (Vec<Tail>, Vec<Tail>) = mem::take(&mut self.tails)
            .into_iter()
            .partition(|tail| tail.dispose_at <= now);
        self.tails = pending;
        for tail in due {
            self.engine.dispose(tail.handle);
        }
    }
}
