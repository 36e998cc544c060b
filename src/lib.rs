// Vibebox - sequencer and voice scheduling core for a keyboard music toy
// The UI, input surface, audio engine, and visualizer are external hosts.

pub mod engine;
pub mod persistence;
pub mod sequencer;
pub mod time;
pub mod viz;
pub mod voice;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export commonly used types for convenience
pub use engine::{EffectSettings, ToneEngine, VoiceHandle};
pub use persistence::{
    FileStore, KvStore, MemoryStore, PatternSnapshot, PersistError, PersistenceCodec, StoreError,
};
pub use sequencer::{
    Note, RegistryError, Sequencer, SequencerError, SequencerId, SequencerRegistry, StepPattern,
    DEFAULT_TEMPO, STEP_COUNT, STEP_TRIGGER, TEMPO_MAX, TEMPO_MIN,
};
pub use time::{Clock, ManualClock, ManualTimerDriver, SystemClock, TimerDriver, TimerHandle};
pub use viz::{NullVisualizer, Visualizer};
pub use voice::{InstrumentKind, VoiceError, VoicePool, MAX_POLYPHONY, RELEASE_TAIL};
