//! Generational slot arena for entities that are created and destroyed as the patch is edited.
//!
//! Vacant slots are threaded into a free list and reused by later insertions. Every slot carries
//! a generation counter that is bumped on removal, so a key that outlived its entity resolves to
//! `None` instead of aliasing whatever now occupies the slot.
use std::{fmt, marker::PhantomData};

/// Raw slot address: index into the arena plus the generation it was issued for.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct SlotKey {
    index: u32,
    generation: u32,
}

impl SlotKey {
    /// Build a key from its raw parts.
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index.
    pub fn index(self) -> u32 {
        self.index
    }

    /// Generation the key was issued for.
    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Typed handle stored in an [`Arena`].
pub trait ArenaKey: Copy {
    /// Wrap a raw slot key.
    fn from_slot(slot: SlotKey) -> Self;
    /// Unwrap into the raw slot key.
    fn slot(self) -> SlotKey;
}

enum EntryState<T> {
    Occupied(T),
    /// Points to the next vacant slot, forming a list headed by `Arena::first_free`.
    Vacant(Option<u32>),
}

struct Entry<T> {
    generation: u32,
    state: EntryState<T>,
}

/// Slot arena addressed by typed generational keys.
pub struct Arena<K, T> {
    entries: Vec<Entry<T>>,
    first_free: Option<u32>,
    len: usize,
    _key: PhantomData<fn() -> K>,
}

impl<K, T: fmt::Debug> fmt::Debug for Arena<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let live = self.entries.iter().filter_map(|e| match &e.state {
            EntryState::Occupied(v) => Some(v),
            EntryState::Vacant(_) => None,
        });
        f.debug_list().entries(live).finish()
    }
}

impl<K, T> Default for Arena<K, T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            first_free: None,
            len: 0,
            _key: PhantomData,
        }
    }
}

impl<K: ArenaKey, T> Arena<K, T> {
    /// Construct an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` when no entry is live.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Store `value`, reusing a vacant slot when one exists.
    pub fn insert(&mut self, value: T) -> K {
        self.insert_with(|_| value)
    }

    /// Store the value built by `f`, which receives the key the value will live under.
    pub fn insert_with(&mut self, f: impl FnOnce(K) -> T) -> K {
        self.len += 1;
        if let Some(index) = self.first_free {
            let entry = &mut self.entries[index as usize];
            let key = K::from_slot(SlotKey::new(index, entry.generation));
            let value = f(key);
            let old = std::mem::replace(&mut entry.state, EntryState::Occupied(value));
            self.first_free = match old {
                EntryState::Vacant(next) => next,
                // The free list only ever links vacant slots.
                EntryState::Occupied(_) => None,
            };
            return key;
        }

        let index = u32::try_from(self.entries.len()).unwrap_or(u32::MAX);
        let key = K::from_slot(SlotKey::new(index, 0));
        self.entries.push(Entry {
            generation: 0,
            state: EntryState::Occupied(f(key)),
        });
        key
    }

    /// Take the value out of its slot. Returns `None` for stale or foreign keys.
    pub fn remove(&mut self, key: K) -> Option<T> {
        let slot = key.slot();
        let entry = self.entries.get_mut(slot.index as usize)?;
        if entry.generation != slot.generation || matches!(entry.state, EntryState::Vacant(_)) {
            return None;
        }

        let taken = std::mem::replace(&mut entry.state, EntryState::Vacant(self.first_free));
        entry.generation = entry.generation.wrapping_add(1);
        self.first_free = Some(slot.index);
        self.len -= 1;
        match taken {
            EntryState::Occupied(v) => Some(v),
            EntryState::Vacant(_) => None,
        }
    }

    /// `true` when `key` refers to a live entry.
    pub fn contains(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    /// Shared access to a live entry.
    pub fn get(&self, key: K) -> Option<&T> {
        let slot = key.slot();
        let entry = self.entries.get(slot.index as usize)?;
        match &entry.state {
            EntryState::Occupied(v) if entry.generation == slot.generation => Some(v),
            _ => None,
        }
    }

    /// Exclusive access to a live entry.
    pub fn get_mut(&mut self, key: K) -> Option<&mut T> {
        let slot = key.slot();
        let entry = self.entries.get_mut(slot.index as usize)?;
        match &mut entry.state {
            EntryState::Occupied(v) if entry.generation == slot.generation => Some(v),
            _ => None,
        }
    }

    /// Live entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &T)> + '_ {
        self.entries.iter().enumerate().filter_map(|(i, e)| match &e.state {
            EntryState::Occupied(v) => Some((K::from_slot(SlotKey::new(i as u32, e.generation)), v)),
            EntryState::Vacant(_) => None,
        })
    }

    /// Live entries in slot order, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (K, &mut T)> + '_ {
        self.entries
            .iter_mut()
            .enumerate()
            .filter_map(|(i, e)| match &mut e.state {
                EntryState::Occupied(v) => {
                    Some((K::from_slot(SlotKey::new(i as u32, e.generation)), v))
                }
                EntryState::Vacant(_) => None,
            })
    }

    /// Keys of all live entries in slot order.
    pub fn keys(&self) -> Vec<K> {
        self.iter().map(|(k, _)| k).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/arena.rs"]
mod tests;
