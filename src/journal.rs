use uuid::Uuid;

/// Anything stored in a journal carries a stable unique id.
pub trait Record {
    fn id(&self) -> Uuid;
}

/// Insertion-ordered in-memory log. Used for both meals and workouts; entries
/// live only as long as the session (logout or process exit drops them).
#[derive(Debug, Clone)]
pub struct Journal<T: Record> {
    entries: Vec<T>,
}

impl<T: Record> Default for Journal<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: Record> Journal<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry; it becomes visible immediately at the end of the log.
    pub fn add(&mut self, entry: T) {
        self.entries.push(entry);
    }

    /// Replaces the entry with the same id in place, preserving its position.
    /// Returns `false` (and changes nothing) if the id is not present.
    pub fn update(&mut self, id: Uuid, entry: T) -> bool {
        match self.entries.iter_mut().find(|e| e.id() == id) {
            Some(slot) => {
                *slot = entry;
                true
            }
            None => false,
        }
    }

    /// Removes the entry with the given id. Idempotent: a second call for the
    /// same id is a no-op returning `false`.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id() != id);
        self.entries.len() != before
    }

    pub fn get(&self, id: Uuid) -> Option<&T> {
        self.entries.iter().find(|e| e.id() == id)
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
