// Effect rack - current effect parameter values and engine forwarding

use super::ToneEngine;

/// Audible filter cutoff range in Hz.
pub const CUTOFF_MIN_HZ: f32 = 20.0;
pub const CUTOFF_MAX_HZ: f32 = 20_000.0;

/// Current values of the master effect parameters.
///
/// The UI layer binds sliders to the setters; values are clamped to their
/// valid range and forwarded to the engine immediately. Defaults match the
/// toy's initial state: 800 Hz lowpass, no distortion, half-wet reverb,
/// unity gain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectSettings {
    filter_cutoff_hz: f32,
    distortion: f32,
    reverb_wet: f32,
    master_gain: f32,
}

impl Default for EffectSettings {
    fn default() -> Self {
        Self {
            filter_cutoff_hz: 800.0,
            distortion: 0.0,
            reverb_wet: 0.5,
            master_gain: 1.0,
        }
    }
}

impl EffectSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter_cutoff_hz(&self) -> f32 {
        self.filter_cutoff_hz
    }

    pub fn distortion(&self) -> f32 {
        self.distortion
    }

    pub fn reverb_wet(&self) -> f32 {
        self.reverb_wet
    }

    pub fn master_gain(&self) -> f32 {
        self.master_gain
    }

    pub fn set_filter_cutoff(&mut self, engine: &mut dyn ToneEngine, hz: f32) {
        self.filter_cutoff_hz = hz.clamp(CUTOFF_MIN_HZ, CUTOFF_MAX_HZ);
        engine.set_filter_cutoff(self.filter_cutoff_hz);
    }

    pub fn set_distortion(&mut self, engine: &mut dyn ToneEngine, amount: f32) {
        self.distortion = amount.clamp(0.0, 1.0);
        engine.set_distortion(self.distortion);
    }

    pub fn set_reverb_wet(&mut self, engine: &mut dyn ToneEngine, wet: f32) {
        self.reverb_wet = wet.clamp(0.0, 1.0);
        engine.set_reverb_wet(self.reverb_wet);
    }

    pub fn set_master_gain(&mut self, engine: &mut dyn ToneEngine, gain: f32) {
        self.master_gain = gain.clamp(0.0, 1.0);
        engine.set_master_gain(self.master_gain);
    }

    /// Push every current value to the engine (host startup, engine swap).
    pub fn apply_all(&self, engine: &mut dyn ToneEngine) {
        engine.set_filter_cutoff(self.filter_cutoff_hz);
        engine.set_distortion(self.distortion);
        engine.set_reverb_wet(self.reverb_wet);
        engine.set_master_gain(self.master_gain);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::VoiceHandle;
    use crate::voice::InstrumentKind;
    use std::time::Duration;

    #[derive(Default)]
    struct ParamEngine {
        cutoff: f32,
        distortion: f32,
        reverb: f32,
        gain: f32,
    }

    impl ToneEngine for ParamEngine {
        fn create_voice(&mut self, _kind: InstrumentKind) -> VoiceHandle {
            VoiceHandle(0)
        }
        fn attack(&mut self, _voice: VoiceHandle, _pitch: u8) {}
        fn attack_one_shot(&mut self, _voice: VoiceHandle, _pitch: u8, _after: Duration) {}
        fn release(&mut self, _voice: VoiceHandle) {}
        fn dispose(&mut self, _voice: VoiceHandle) {}
        fn set_filter_cutoff(&mut self, hz: f32) {
            self.cutoff = hz;
        }
        fn set_distortion(&mut self, amount: f32) {
            self.distortion = amount;
        }
        fn set_reverb_wet(&mut self, wet: f32) {
            self.reverb = wet;
        }
        fn set_master_gain(&mut self, gain: f32) {
            self.gain = gain;
        }
    }

    #[test]
    fn test_defaults_match_initial_patch() {
        let settings = EffectSettings::default();
        assert_eq!(settings.filter_cutoff_hz(), 800.0);
        assert_eq!(settings.distortion(), 0.0);
        assert_eq!(settings.reverb_wet(), 0.5);
        assert_eq!(settings.master_gain(), 1.0);
    }

    #[test]
    fn test_setters_forward_to_engine() {
        let mut engine = ParamEngine::default();
        let mut settings = EffectSettings::new();

        settings.set_filter_cutoff(&mut engine, 2_500.0);
        settings.set_distortion(&mut engine, 0.3);
        settings.set_reverb_wet(&mut engine, 0.8);
        settings.set_master_gain(&mut engine, 0.6);

        assert_eq!(engine.cutoff, 2_500.0);
        assert_eq!(engine.distortion, 0.3);
        assert_eq!(engine.reverb, 0.8);
        assert_eq!(engine.gain, 0.6);
    }

    #[test]
    fn test_out_of_range_values_clamped() {
        let mut engine = ParamEngine::default();
        let mut settings = EffectSettings::new();

        settings.set_filter_cutoff(&mut engine, 1.0);
        assert_eq!(settings.filter_cutoff_hz(), CUTOFF_MIN_HZ);

        settings.set_distortion(&mut engine, 4.2);
        assert_eq!(settings.distortion(), 1.0);

        settings.set_reverb_wet(&mut engine, -0.5);
        assert_eq!(settings.reverb_wet(), 0.0);

        settings.set_master_gain(&mut engine, 1.5);
        assert_eq!(settings.master_gain(), 1.0);
        assert_eq!(engine.gain, 1.0);
    }

    #[test]
    fn test_apply_all_pushes_every_value() {
        let mut engine = ParamEngine::default();
        let settings = EffectSettings::default();

        settings.apply_all(&mut engine);

        assert_eq!(engine.cutoff, 800.0);
        assert_eq!(engine.reverb, 0.5);
        assert_eq!(engine.gain, 1.0);
    }
}
