use std::borrow::Borrow;
use std::cmp::max;
use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hash, Hasher};
use std::mem;

use crate::primes::next_prime;

///Initial number of slots when no capacity is requested (prime)
pub const DEFAULT_TABLE_SIZE: usize = 101;

///Keys that can report their own length, in symbols (characters for strings).
///The index tracks the longest key ever inserted, which bounds how far a search has to extend a
///candidate before it can no longer match anything.
pub trait KeyLength {
    fn key_length(&self) -> usize;
}

impl KeyLength for String {
    fn key_length(&self) -> usize {
        self.chars().count()
    }
}

impl KeyLength for Box<str> {
    fn key_length(&self) -> usize {
        self.chars().count()
    }
}

impl<T> KeyLength for Vec<T> {
    fn key_length(&self) -> usize {
        self.len()
    }
}

///A present slot in the table
#[derive(Clone, Debug)]
pub struct HashEntry<K> {
    pub key: K,

    ///false if marked deleted (a tombstone)
    pub active: bool,

    ///true if the key is a complete word rather than only a prefix
    pub is_word: bool,
}

impl<K> HashEntry<K> {
    fn new(key: K) -> Self {
        Self {
            key,
            active: true,
            is_word: false,
        }
    }
}

///Open addressing hash table with linear probing and lazy deletion.
///
///Besides plain membership it flags which keys are complete words, so that when it holds every
///prefix of every word of a dictionary it can answer both "can this still grow into a word?"
///(`contains`) and "is this a word?" (`is_word`).
///
///The number of slots is always prime. Tombstones keep occupying their slot until the table
///grows, at which point only active entries are carried over.
#[derive(Clone, Debug)]
pub struct PrefixIndex<K, S = RandomState> {
    slots: Vec<Option<HashEntry<K>>>,

    ///Number of non-empty slots, tombstones included
    occupied: usize,

    ///Number of active entries (the logical size)
    live_count: usize,

    ///Length of the longest key ever inserted
    max_key_length: usize,

    hash_builder: S,
}

impl<K: Hash + Eq + KeyLength> PrefixIndex<K, RandomState> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_TABLE_SIZE)
    }

    ///Creates an empty index with at least the requested number of slots (rounded up to a prime)
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::new())
    }
}

impl<K: Hash + Eq + KeyLength> Default for PrefixIndex<K, RandomState> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq + KeyLength, S: BuildHasher> PrefixIndex<K, S> {
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            slots: Self::allocate_slots(next_prime(capacity)),
            occupied: 0,
            live_count: 0,
            max_key_length: 0,
            hash_builder,
        }
    }

    fn allocate_slots(size: usize) -> Vec<Option<HashEntry<K>>> {
        let mut slots = Vec::with_capacity(size);
        slots.resize_with(size, || None);
        slots
    }

    ///Inserts the key as an active, non-word entry.
    ///Returns false (and changes nothing) if an active equal key is already present.
    pub fn insert(&mut self, key: K) -> bool {
        let pos = self.find_pos(&key);
        if self.is_active(pos) {
            return false;
        }

        if self.slots[pos].is_none() {
            self.occupied += 1;
        }
        //a tombstone of the same key gets overwritten, the slot stays occupied
        self.max_key_length = max(self.max_key_length, key.key_length());
        self.slots[pos] = Some(HashEntry::new(key));
        self.live_count += 1;

        if self.occupied > self.slots.len() / 2 {
            self.rehash();
        }
        true
    }

    ///Lazily removes the key: its slot becomes a tombstone that still counts as occupied.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let pos = self.find_pos(key);
        if let Some(entry) = self.slots[pos].as_mut() {
            if entry.active {
                entry.active = false;
                self.live_count -= 1;
                return true;
            }
        }
        false
    }

    ///Tests whether the key is present and active
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.is_active(self.find_pos(key))
    }

    ///Tests whether the key's slot is flagged as a complete word.
    ///This does not check whether the entry is still active; callers consult `contains` first.
    pub fn is_word<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let pos = self.find_pos(key);
        self.slots[pos].as_ref().map_or(false, |entry| entry.is_word)
    }

    ///Flags an already inserted (active) key as a complete word.
    ///Returns false if the key is not present.
    pub fn mark_as_word<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let pos = self.find_pos(key);
        match self.slots[pos].as_mut() {
            Some(entry) if entry.active => {
                entry.is_word = true;
                true
            }
            _ => false,
        }
    }

    ///Number of active keys
    pub fn live_size(&self) -> usize {
        self.live_count
    }

    pub fn is_empty(&self) -> bool {
        self.live_count == 0
    }

    ///Number of slots
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    ///Number of non-empty slots, including tombstones
    pub fn occupied(&self) -> usize {
        self.occupied
    }

    pub fn max_key_length(&self) -> usize {
        self.max_key_length
    }

    ///Empties the table, keeping its current capacity
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
        self.occupied = 0;
        self.live_count = 0;
        self.max_key_length = 0;
    }

    ///Iterates over all active keys, in slot order
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.slots
            .iter()
            .flatten()
            .filter(|entry| entry.active)
            .map(|entry| &entry.key)
    }

    ///Iterates over all active keys that are flagged as words, in slot order
    pub fn words(&self) -> impl Iterator<Item = &K> {
        self.slots
            .iter()
            .flatten()
            .filter(|entry| entry.active && entry.is_word)
            .map(|entry| &entry.key)
    }

    fn is_active(&self, pos: usize) -> bool {
        self.slots[pos].as_ref().map_or(false, |entry| entry.active)
    }

    fn home_slot<Q: ?Sized + Hash>(&self, key: &Q) -> usize {
        let mut hasher = self.hash_builder.build_hasher();
        key.hash(&mut hasher);
        (hasher.finish() % self.slots.len() as u64) as usize
    }

    ///Resolves the canonical slot for a key: the first slot, probing linearly from the home slot,
    ///that is either empty or holds an equal key (active or not).
    ///Always terminates because at most half of the slots are occupied.
    fn find_pos<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let capacity = self.slots.len();
        let mut pos = self.home_slot(key);
        while let Some(entry) = &self.slots[pos] {
            if entry.key.borrow() == key {
                break;
            }
            pos += 1;
            if pos == capacity {
                pos = 0;
            }
        }
        pos
    }

    ///Grows to the next prime at least twice the current size and reinserts all active entries
    ///in their original slot order. Tombstones are dropped, word flags are retained.
    fn rehash(&mut self) {
        let new_size = next_prime(2 * self.slots.len());
        let old_slots = mem::replace(&mut self.slots, Self::allocate_slots(new_size));
        self.occupied = 0;
        self.live_count = 0;

        for entry in old_slots.into_iter().flatten() {
            if !entry.active {
                continue;
            }
            let pos = self.find_pos(&entry.key);
            self.slots[pos] = Some(entry);
            self.occupied += 1;
            self.live_count += 1;
        }
    }
}
