use std::collections::{BTreeMap, BTreeSet};
use std::num::NonZeroUsize;

use lru::LruCache;
use tracing::trace;

use crate::{Chunk, ChunkPos, WorldView};

/// In-memory chunk arena with an LRU eviction policy.
/// Uses BTreeMap for deterministic iteration order.
///
/// A chunk can be resident without being loaded (for example while it is
/// being regenerated); map sampling treats such chunks as having no data.
pub struct ChunkStorage {
    chunks: BTreeMap<ChunkPos, Chunk>,
    loaded: BTreeSet<ChunkPos>,
    lru: LruCache<ChunkPos, ()>,
    capacity: usize,
}

impl ChunkStorage {
    /// Create a storage with the desired maximum chunk count.
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            chunks: BTreeMap::new(),
            loaded: BTreeSet::new(),
            lru: LruCache::new(cap),
            capacity: cap.get(),
        }
    }

    /// Number of resident chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Returns true when no chunks are currently stored.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Obtain mutable access to a chunk, creating (and loading) it if necessary.
    pub fn ensure_chunk(&mut self, pos: ChunkPos) -> &mut Chunk {
        if !self.chunks.contains_key(&pos) {
            self.evict_if_needed();
            self.chunks.insert(pos, Chunk::new(pos));
            self.loaded.insert(pos);
        }
        self.touch(pos);
        self.chunks.entry(pos).or_insert_with(|| Chunk::new(pos))
    }

    /// Store a fully built chunk and mark it loaded, replacing any previous one.
    pub fn insert(&mut self, chunk: Chunk) {
        let pos = chunk.position();
        if !self.chunks.contains_key(&pos) {
            self.evict_if_needed();
        }
        self.chunks.insert(pos, chunk);
        self.loaded.insert(pos);
        self.touch(pos);
    }

    /// Attempt to fetch a chunk immutably.
    pub fn get(&self, pos: ChunkPos) -> Option<&Chunk> {
        self.chunks.get(&pos)
    }

    /// Fetch a chunk mutably (without creating it).
    pub fn get_mut(&mut self, pos: ChunkPos) -> Option<&mut Chunk> {
        if self.chunks.contains_key(&pos) {
            self.touch(pos);
        }
        self.chunks.get_mut(&pos)
    }

    /// Flip the load state of a resident chunk. Returns false if it is not resident.
    pub fn set_loaded(&mut self, pos: ChunkPos, loaded: bool) -> bool {
        if !self.chunks.contains_key(&pos) {
            return false;
        }
        if loaded {
            self.loaded.insert(pos);
        } else {
            self.loaded.remove(&pos);
        }
        true
    }

    /// Iterate over currently resident chunk positions.
    pub fn iter_positions(&self) -> impl Iterator<Item = ChunkPos> + '_ {
        self.chunks.keys().copied()
    }

    fn touch(&mut self, pos: ChunkPos) {
        self.lru.put(pos, ());
    }

    fn evict_if_needed(&mut self) {
        while self.chunks.len() >= self.capacity {
            if let Some((oldest, _)) = self.lru.pop_lru() {
                trace!(chunk = %oldest, "evicting chunk");
                self.chunks.remove(&oldest);
                self.loaded.remove(&oldest);
            } else {
                break;
            }
        }
    }
}

impl WorldView for ChunkStorage {
    fn chunk(&self, pos: ChunkPos) -> Option<&Chunk> {
        self.get(pos)
    }

    fn is_chunk_loaded(&self, pos: ChunkPos) -> bool {
        self.loaded.contains(&pos)
    }
}
