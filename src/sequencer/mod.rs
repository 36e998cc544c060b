// Sequencer module - note model, step patterns, transport, and registry

pub mod note;
pub mod pattern;
pub mod registry;
pub mod transport;

pub use note::Note;
pub use pattern::{StepPattern, STEP_COUNT};
pub use registry::{RegistryError, SequencerRegistry};
pub use transport::{
    Sequencer, SequencerError, SequencerId, DEFAULT_TEMPO, STEP_TRIGGER, TEMPO_MAX, TEMPO_MIN,
};
