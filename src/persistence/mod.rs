// Persistence module - snapshots, slot codec, and the store boundary

pub mod codec;
pub mod snapshot;
pub mod store;

pub use codec::{PersistError, PersistenceCodec, PATTERN_PREFIX, SONG_PREFIX};
pub use snapshot::PatternSnapshot;
pub use store::{FileStore, KvStore, MemoryStore, StoreError};
