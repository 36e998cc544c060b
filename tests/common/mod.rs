// Shared test doubles for the integration suite
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;
use vibebox::{
    InstrumentKind, ManualClock, Note, ToneEngine, Visualizer, VoiceHandle, VoicePool,
};

/// One observed engine call, in call order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineEvent {
    Create(InstrumentKind, VoiceHandle),
    Attack(VoiceHandle, u8),
    AttackOneShot(VoiceHandle, u8, Duration),
    Release(VoiceHandle),
    Dispose(VoiceHandle),
}

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

    fn set_filter_cutoff(&mut self, _hz: f32) {}
    fn set_distortion(&mut self, _amount: f32) {}
    fn set_reverb_wet(&mut self, _wet: f32) {}
    fn set_master_gain(&mut self, _gain: f32) {}
}

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

pub struct Fixture {
    pub pool: VoicePool,
    pub clock: Arc<ManualClock>,
    pub engine_log: Rc<RefCell<Vec<EngineEvent>>>,
    pub blooms: Rc<RefCell<Vec<(Note, Duration)>>>,
}

pub fn fixture() -> Fixture {
    let engine = RecordingEngine::new();
    let engine_log = engine.log();
    let viz = RecordingViz::new();
    let blooms = viz.blooms();
    let clock = Arc::new(ManualClock::new());
    let pool = VoicePool::new(Box::new(engine), Box::new(viz), clock.clone());
    Fixture {
        pool,
        clock,
        engine_log,
        blooms,
    }
}

/// Pitches of every one-shot attack observed so far.
pub fn one_shot_pitches(log: &Rc<RefCell<Vec<EngineEvent>>>) -> Vec<u8> {
    log.borrow()
        .iter()
        .filter_map(|e| match e {
            EngineEvent::AttackOneShot(_, pitch, _) => Some(*pitch),
            _ => None,
        })
        .collect()
}
