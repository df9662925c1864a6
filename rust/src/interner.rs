//! Vertex id interning.
//!
//! Maps string vertex ids to dense integer handles so adjacency and weight
//! tables never hold strings. Handles of removed vertices are recycled.

use rustc_hash::FxHashMap;

/// Interned vertex handle (u32 for compact storage and fast hashing).
pub type VertexIdInt = u32;

/// String interner that maps vertex id strings to integer handles.
#[derive(Debug, Clone)]
pub struct VertexInterner {
    to_int: FxHashMap<String, VertexIdInt>,
    from_int: Vec<Option<String>>,
    free: Vec<VertexIdInt>,
}

impl VertexInterner {
    /// Create a new interner with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            to_int: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            from_int: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    /// Intern a string, returning its handle.
    /// If already interned, returns the existing handle.
    pub fn intern(&mut self, s: &str) -> VertexIdInt {
        if let Some(&id) = self.to_int.get(s) {
            return id;
        }
        let id = match self.free.pop() {
            Some(id) => {
                self.from_int[id as usize] = Some(s.to_string());
                id
            }
            None => {
                self.from_int.push(Some(s.to_string()));
                (self.from_int.len() - 1) as VertexIdInt
            }
        };
        self.to_int.insert(s.to_string(), id);
        id
    }

    /// Get the handle for a string, if it exists.
    #[inline]
    pub fn get(&self, s: &str) -> Option<VertexIdInt> {
        self.to_int.get(s).copied()
    }

    /// Get the string for a handle.
    #[inline]
    pub fn resolve(&self, id: VertexIdInt) -> Option<&str> {
        self.from_int
            .get(id as usize)
            .and_then(|s| s.as_deref())
    }

    /// Forget a string. Its handle becomes available for the next `intern`.
    pub fn release(&mut self, s: &str) -> Option<VertexIdInt> {
        let id = self.to_int.remove(s)?;
        self.from_int[id as usize] = None;
        self.free.push(id);
        Some(id)
    }

    /// Iterate over live (handle, string) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (VertexIdInt, &str)> + '_ {
        self.from_int
            .iter()
            .enumerate()
            .filter_map(|(id, s)| s.as_deref().map(|s| (id as VertexIdInt, s)))
    }

    /// Upper bound (exclusive) of every handle handed out so far.
    /// Suitable for sizing handle-indexed vectors.
    pub fn bound(&self) -> usize {
        self.from_int.len()
    }

    /// Number of live interned strings.
    pub fn len(&self) -> usize {
        self.to_int.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.to_int.is_empty()
    }

    pub fn clear(&mut self) {
        self.to_int.clear();
        self.from_int.clear();
        self.free.clear();
    }
}

impl Default for VertexInterner {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}
