// Persisted snapshot shapes - pure data, no identities, no timer state

use crate::sequencer::StepPattern;

/// One sequencer's persisted state: the (pattern, tempo, loop) triple.
///
/// Deliberately carries no identity and no transport state; identities are
/// reassigned on load.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PatternSnapshot {
    pub pattern: StepPattern,
    pub tempo: u32,
    pub looping: bool,
}

/// Envelope every slot is stored inside. `saved_at` is metadata only and
/// takes no part in round-trip equality.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub(crate) struct SlotEnvelope<T> {
    pub saved_at: String,
    pub data: T,
}
