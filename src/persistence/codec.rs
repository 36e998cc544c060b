// Persistence codec - pattern and song slots over the key-value store

use crate::persistence::snapshot::{PatternSnapshot, SlotEnvelope};
use crate::persistence::store::{KvStore, StoreError};
use crate::sequencer::{Sequencer, SequencerRegistry, TEMPO_MAX, TEMPO_MIN};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Key prefixes keeping pattern and song slots in distinct namespaces.
pub const PATTERN_PREFIX: &str = "pattern:";
pub const SONG_PREFIX: &str = "song:";

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("no saved data under slot '{0}'")]
    NotFound(String),

    /// The slot exists but its payload has the wrong shape. Surfaced to
    /// the caller, never a panic.
    #[error("stored payload under slot '{slot}' is malformed: {reason}")]
    Corrupt { slot: String, reason: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Serializes sequencer state into named slots and back.
///
/// All operations are synchronous; the only failure modes are a missing
/// slot, a malformed payload, and store-level I/O.
pub struct PersistenceCodec {
    store: Box<dyn KvStore>,
}

impl PersistenceCodec {
    pub fn new(store: Box<dyn KvStore>) -> Self {
        Self { store }
    }

    fn pattern_key(slot: &str) -> String {
        format!("{PATTERN_PREFIX}{slot}")
    }

    fn song_key(slot: &str) -> String {
        format!("{SONG_PREFIX}{slot}")
    }

    fn encode<T: Serialize>(data: &T) -> Result<Value, PersistError> {
        let envelope = SlotEnvelope {
            saved_at: chrono::Utc::now().to_rfc3339(),
            data,
        };
        Ok(serde_json::to_value(&envelope).map_err(StoreError::from)?)
    }

    fn decode<T: DeserializeOwned>(slot: &str, value: Value) -> Result<T, PersistError> {
        let envelope: SlotEnvelope<T> =
            serde_json::from_value(value).map_err(|err| PersistError::Corrupt {
                slot: slot.to_owned(),
                reason: err.to_string(),
            })?;
        Ok(envelope.data)
    }

    fn check_tempo(slot: &str, snapshot: &PatternSnapshot) -> Result<(), PersistError> {
        if !(TEMPO_MIN..=TEMPO_MAX).contains(&snapshot.tempo) {
            return Err(PersistError::Corrupt {
                slot: slot.to_owned(),
                reason: format!("tempo {} outside {TEMPO_MIN}-{TEMPO_MAX}", snapshot.tempo),
            });
        }
        Ok(())
    }

    /// Save one sequencer's (pattern, tempo, loop) triple, overwriting any
    /// prior value under `slot`.
    pub fn save_pattern(&mut self, slot: &str, sequencer: &Sequencer) -> Result<(), PersistError> {
        let value = Self::encode(&sequencer.snapshot())?;
        self.store.set(&Self::pattern_key(slot), &value)?;
        log::debug!("pattern saved to slot '{slot}'");
        Ok(())
    }

    /// Read a pattern slot. Read-only: the caller stops the target
    /// sequencer before applying the snapshot.
    pub fn load_pattern(&self, slot: &str) -> Result<PatternSnapshot, PersistError> {
        let value = self
            .store
            .get(&Self::pattern_key(slot))
            .map_err(|err| Self::corrupt_on_malformed(slot, err))?
            .ok_or_else(|| PersistError::NotFound(slot.to_owned()))?;
        let snapshot: PatternSnapshot = Self::decode(slot, value)?;
        Self::check_tempo(slot, &snapshot)?;
        Ok(snapshot)
    }

    pub fn delete_pattern(&mut self, slot: &str) -> Result<(), PersistError> {
        if self.store.delete(&Self::pattern_key(slot))? {
            Ok(())
        } else {
            Err(PersistError::NotFound(slot.to_owned()))
        }
    }

    /// Save the full song: one triple per sequencer, in song order.
    pub fn save_song(
        &mut self,
        slot: &str,
        registry: &SequencerRegistry,
    ) -> Result<(), PersistError> {
        let snapshots: Vec<PatternSnapshot> = registry.iter().map(|s| s.snapshot()).collect();
        let value = Self::encode(&snapshots)?;
        self.store.set(&Self::song_key(slot), &value)?;
        log::debug!("song saved to slot '{slot}' ({} sequencer(s))", snapshots.len());
        Ok(())
    }

    /// Read a song slot. The caller reconciles the result against the
    /// registry (`SequencerRegistry::load_song`).
    pub fn load_song(&self, slot: &str) -> Result<Vec<PatternSnapshot>, PersistError> {
        let value = self
            .store
            .get(&Self::song_key(slot))
            .map_err(|err| Self::corrupt_on_malformed(slot, err))?
            .ok_or_else(|| PersistError::NotFound(slot.to_owned()))?;
        let snapshots: Vec<PatternSnapshot> = Self::decode(slot, value)?;
        for snapshot in &snapshots {
            Self::check_tempo(slot, snapshot)?;
        }
        Ok(snapshots)
    }

    pub fn delete_song(&mut self, slot: &str) -> Result<(), PersistError> {
        if self.store.delete(&Self::song_key(slot))? {
            Ok(())
        } else {
            Err(PersistError::NotFound(slot.to_owned()))
        }
    }

    /// A store that cannot even parse its payload is a corrupt slot, not
    /// an I/O failure.
    fn corrupt_on_malformed(slot: &str, err: StoreError) -> PersistError {
        match err {
            StoreError::Malformed(err) => {
                log::warn!("slot '{slot}' holds unparseable data: {err}");
                PersistError::Corrupt {
                    slot: slot.to_owned(),
                    reason: err.to_string(),
                }
            }
            other => PersistError::Store(other),
        }
    }
}
