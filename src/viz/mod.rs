// Visualizer boundary - fire-and-forget presentation events
// Pure output: nothing here feeds back into scheduling.

use crate::sequencer::Note;
use std::time::Duration;

/// Consumer of visual events emitted by the voice pool.
///
/// Both calls are fire-and-forget; no return value is consumed and the
/// core never waits on the visualizer.
pub trait Visualizer {
    /// A note was audibly triggered at `at` (pool clock time).
    fn note_triggered(&mut self, note: Note, at: Duration);

    /// One frame of spectral samples from the host's analyser.
    fn spectral_frame(&mut self, samples: &[f32]);
}

/// Visualizer that discards everything (headless hosts, tests).
#[derive(Debug, Default)]
pub struct NullVisualizer;

impl Visualizer for NullVisualizer {
    fn note_triggered(&mut self, _note: Note, _at: Duration) {}

    fn spectral_frame(&mut self, _samples: &[f32]) {}
}
