// Sequencer registry - owns the live sequencers and their identities
// Insertion order is song order; index 0 is the protected primary.

use crate::persistence::PatternSnapshot;
use crate::sequencer::transport::{Sequencer, SequencerId};
use crate::time::TimerDriver;
use crate::voice::VoicePool;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The id was removed or never existed. Distinct from "already
    /// stopped" so callers can tell the two apart.
    #[error("no sequencer with id {0}")]
    NotFound(SequencerId),

    /// The primary sequencer can only be reset, never removed.
    #[error("the primary sequencer cannot be removed")]
    PrimaryProtected,
}

/// Ordered collection of live sequencers.
///
/// Identities are assigned monotonically and never reused, so a stale
/// external id can never resolve to a different sequencer. The registry is
/// never empty: the primary sequencer is created on construction and
/// protected from removal.
pub struct SequencerRegistry {
    sequencers: Vec<Sequencer>,
    next_id: SequencerId,
    primary_id: SequencerId,
}

impl SequencerRegistry {
    /// Create the registry with its primary sequencer.
    pub fn new() -> Self {
        let mut registry = Self {
            sequencers: Vec::new(),
            next_id: 0,
            primary_id: 0,
        };
        registry.primary_id = registry.add();
        registry
    }

    fn alloc_id(&mut self) -> SequencerId {
        self.next_id += 1;
        self.next_id
    }

    /// Append a fresh stopped sequencer and return its identity.
    pub fn add(&mut self) -> SequencerId {
        let id = self.alloc_id();
        self.sequencers.push(Sequencer::new(id));
        id
    }

    /// Stop and discard a sequencer. The primary is protected.
    pub fn remove(
        &mut self,
        id: SequencerId,
        driver: &mut dyn TimerDriver,
    ) -> Result<(), RegistryError> {
        if id == self.primary_id {
            return Err(RegistryError::PrimaryProtected);
        }
        let index = self
            .sequencers
            .iter()
            .position(|s| s.id() == id)
            .ok_or(RegistryError::NotFound(id))?;
        self.sequencers[index].stop(driver);
        self.sequencers.remove(index);
        Ok(())
    }

    pub fn get(&self, id: SequencerId) -> Result<&Sequencer, RegistryError> {
        self.sequencers
            .iter()
            .find(|s| s.id() == id)
            .ok_or(RegistryError::NotFound(id))
    }

    pub fn get_mut(&mut self, id: SequencerId) -> Result<&mut Sequencer, RegistryError> {
        self.sequencers
            .iter_mut()
            .find(|s| s.id() == id)
            .ok_or(RegistryError::NotFound(id))
    }

    pub fn primary_id(&self) -> SequencerId {
        self.primary_id
    }

    /// The sequencer single-sequencer UI controls talk to.
    pub fn primary(&self) -> &Sequencer {
        &self.sequencers[0]
    }

    pub fn primary_mut(&mut self) -> &mut Sequencer {
        &mut self.sequencers[0]
    }

    /// Members in song order.
    pub fn iter(&self) -> impl Iterator<Item = &Sequencer> {
        self.sequencers.iter()
    }

    pub fn len(&self) -> usize {
        self.sequencers.len()
    }

    /// Start every member. Each start is independent; one already running
    /// member does not affect the others.
    pub fn play_all(&mut self, driver: &mut dyn TimerDriver, pool: &mut VoicePool) {
        for seq in &mut self.sequencers {
            seq.start(driver, pool);
        }
    }

    /// Stop every member; no-op for members already stopped.
    pub fn stop_all(&mut self, driver: &mut dyn TimerDriver) {
        for seq in &mut self.sequencers {
            seq.stop(driver);
        }
    }

    /// Reconcile the registry against a loaded song.
    ///
    /// Stops everything, discards all but the protected primary, then
    /// repopulates in snapshot order with fresh identities (song data
    /// carries none). An empty song resets the primary to defaults.
    pub fn load_song(&mut self, snapshots: &[PatternSnapshot], driver: &mut dyn TimerDriver) {
        self.stop_all(driver);
        self.sequencers.truncate(1);

        match snapshots.split_first() {
            Some((first, rest)) => {
                self.sequencers[0].apply_snapshot(first);
                for snapshot in rest {
                    let id = self.alloc_id();
                    let mut seq = Sequencer::new(id);
                    seq.apply_snapshot(snapshot);
                    self.sequencers.push(seq);
                }
            }
            None => {
                self.sequencers[0] = Sequencer::new(self.primary_id);
            }
        }
        log::debug!("song loaded: {} sequencer(s)", self.sequencers.len());
    }
}

impl Default for SequencerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
