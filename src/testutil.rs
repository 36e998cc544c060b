// Test doubles - recording engine and visualizer for unit tests

use crate::engine::{ToneEngine, VoiceHandle};
use crate::sequencer::Note;
use crate::viz::Visualizer;
use crate::voice::InstrumentKind;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// One observed engine call, in call order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineEvent {
    Create(InstrumentKind, VoiceHandle),
    Attack(VoiceHandle, u8),
    AttackOneShot(VoiceHandle, u8, Duration),
    Release(VoiceHandle),
    Dispose(VoiceHandle),
    FilterCutoff(f32),
    Distortion(f32),
    ReverbWet(f32),
    MasterGain(f32),
}

/// Engine that records every call; the log handle stays with the test
/// after the engine moves into the pool.
pub struct RecordingEngine {
    next_handle: u64,
    log: Rc<RefCell<Vec<EngineEvent>>>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self {
            next_handle: 0,
            log: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn log(&self) -> Rc<RefCell<Vec<EngineEvent>>> {
        Rc::clone(&self.log)
    }
}

impl ToneEngine for RecordingEngine {
    fn create_voice(&mut self, kind: InstrumentKind) -> VoiceHandle {
        self.next_handle += 1;
        let handle = VoiceHandle(self.next_handle);
        self.log.borrow_mut().push(EngineEvent::Create(kind, handle));
        handle
    }

    fn attack(&mut self, voice: VoiceHandle, pitch: u8) {
        self.log.borrow_mut().push(EngineEvent::Attack(voice, pitch));
    }

    fn attack_one_shot(&mut self, voice: VoiceHandle, pitch: u8, release_after: Duration) {
        self.log
            .borrow_mut()
            .push(EngineEvent::AttackOneShot(voice, pitch, release_after));
    }

    fn release(&mut self, voice: VoiceHandle) {
        self.log.borrow_mut().push(EngineEvent::Release(voice));
    }

    fn dispose(&mut self, voice: VoiceHandle) {
        self.log.borrow_mut().push(EngineEvent::Dispose(voice));
    }

    fn set_filter_cutoff(&mut self, hz: f32) {
        self.log.borrow_mut().push(EngineEvent::FilterCutoff(hz));
    }

    fn set_distortion(&mut self, amount: f32) {
        self.log.borrow_mut().push(EngineEvent::Distortion(amount));
    }

    fn set_reverb_wet(&mut self, wet: f32) {
        self.log.borrow_mut().push(EngineEvent::ReverbWet(wet));
    }

    fn set_master_gain(&mut self, gain: f32) {
        self.log.borrow_mut().push(EngineEvent::MasterGain(gain));
    }
}

/// Visualizer that records bloom events.
pub struct RecordingViz {
    blooms: Rc<RefCell<Vec<(Note, Duration)>>>,
}

impl RecordingViz {
    pub fn new() -> Self {
        Self {
            blooms: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn blooms(&self) -> Rc<RefCell<Vec<(Note, Duration)>>> {
        Rc::clone(&self.blooms)
    }
}

impl Visualizer for RecordingViz {
    fn note_triggered(&mut self, note: Note, at: Duration) {
        self.blooms.borrow_mut().push((note, at));
    }

    fn spectral_frame(&mut self, _samples: &[f32]) {}
}
