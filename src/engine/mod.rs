// Tone engine boundary - sound production is an external collaborator
// The core issues attack/release commands; the engine owns the audio graph.

pub mod effects;

pub use effects::EffectSettings;

use crate::voice::InstrumentKind;
use std::time::Duration;

/// Opaque handle to one engine-side voice instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VoiceHandle(pub u64);

/// The external synthesis engine.
///
/// Pitches are MIDI note numbers (60 = C4). Effect parameters may be set at
/// any time and take effect on the next and all subsequent triggers.
pub trait ToneEngine {
    /// Allocate a voice of the given instrument kind.
    fn create_voice(&mut self, kind: InstrumentKind) -> VoiceHandle;

    /// Begin sounding a pitch; the voice sustains until released.
    fn attack(&mut self, voice: VoiceHandle, pitch: u8);

    /// Begin sounding a pitch and release it after `release_after`.
    /// The engine owns the timed release; the caller never follows up.
    fn attack_one_shot(&mut self, voice: VoiceHandle, pitch: u8, release_after: Duration);

    /// Enter the release envelope. The voice keeps sounding its tail.
    fn release(&mut self, voice: VoiceHandle);

    /// Tear down the voice. Must only be called once the tail is done.
    fn dispose(&mut self, voice: VoiceHandle);

    fn set_filter_cutoff(&mut self, hz: f32);
    fn set_distortion(&mut self, amount: f32);
    fn set_reverb_wet(&mut self, wet: f32);
    fn set_master_gain(&mut self, gain: f32);
}
