/// Number of markers that can be selected at once.
pub const SELECTION_CAPACITY: usize = 2;

/// Value stored in an empty selection slot. No sanitized marker index equals it.
pub const SELECTION_SENTINEL: u32 = u32::MAX;

/// The currently chosen puzzle points: zero, one or two marker indices.
///
/// Stored as fixed slots so it uploads directly into the point uniform.
/// Selected indices are kept in insertion order without duplicates.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Selection {
    slots: [u32; SELECTION_CAPACITY],
}

impl Default for Selection {
    fn default() -> Self {
        Self::empty()
    }
}

impl Selection {
    #[inline]
    pub const fn empty() -> Self {
        Self { slots: [SELECTION_SENTINEL; SELECTION_CAPACITY] }
    }

    pub fn single(index: u32) -> Self {
        let mut s = Self::empty();
        s.insert(index);
        s
    }

    pub fn pair(a: u32, b: u32) -> Self {
        let mut s = Self::empty();
        s.insert(a);
        s.insert(b);
        s
    }

    /// Adds `index`. Returns `false` if it is already selected, if the
    /// selection is full, or if `index` is the sentinel.
    pub fn insert(&mut self, index: u32) -> bool {
        if index == SELECTION_SENTINEL || self.contains(index) {
            return false;
        }
        match self.slots.iter_mut().find(|s| **s == SELECTION_SENTINEL) {
            Some(slot) => {
                *slot = index;
                true
            }
            None => false,
        }
    }

    /// Removes `index`, shifting later entries down one slot.
    pub fn remove(&mut self, index: u32) -> bool {
        if index == SELECTION_SENTINEL {
            return false;
        }
        let Some(pos) = self.slots.iter().position(|&s| s == index) else {
            return false;
        };
        self.slots.copy_within(pos + 1.., pos);
        self.slots[SELECTION_CAPACITY - 1] = SELECTION_SENTINEL;
        true
    }

    #[inline]
    pub fn clear(&mut self) {
        *self = Self::empty();
    }

    #[inline]
    pub fn contains(&self, index: u32) -> bool {
        index != SELECTION_SENTINEL && self.slots.contains(&index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|&&s| s != SELECTION_SENTINEL).count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.slots.iter().copied().filter(|&s| s != SELECTION_SENTINEL)
    }

    /// Raw slots, sentinel-padded, as uploaded to the GPU.
    #[inline]
    pub fn slots(&self) -> [u32; SELECTION_CAPACITY] {
        self.slots
    }
}
