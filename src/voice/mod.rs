// Voice module - instrument kinds and the polyphonic voice pool

pub mod instrument;
pub mod pool;

pub use instrument::InstrumentKind;
pub use pool::{VoiceError, VoicePool, MAX_POLYPHONY, RELEASE_TAIL};
