//! Catalog builders and the catalogs they produce

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::hash::Hash;

/// Dense catalog from trace ordinal `0..len` to a value
///
/// [`DenseCatalogBuilder::create`] picks the most compact representation
/// that reproduces the values exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenseCatalog {
    /// Every ordinal maps to the same value
    Constant {
        /// The shared value
        value: u64,
        /// Number of ordinals
        len: usize,
    },
    /// Values form an increasing arithmetic progression
    Regular {
        /// Value of ordinal 0
        start: u64,
        /// Difference between consecutive values
        step: u64,
        /// Number of ordinals
        len: usize,
    },
    /// Values stored one per ordinal
    Explicit(Vec<u64>),
}

impl Default for DenseCatalog {
    fn default() -> Self {
        Self::Explicit(Vec::new())
    }
}

impl DenseCatalog {
    /// Number of ordinals
    pub fn len(&self) -> usize {
        match self {
            Self::Constant { len, .. } | Self::Regular { len, .. } => *len,
            Self::Explicit(values) => values.len(),
        }
    }

    /// Whether the catalog has no ordinals
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value for `ordinal`
    pub fn get(&self, ordinal: usize) -> Option<u64> {
        if ordinal >= self.len() {
            return None;
        }
        match self {
            Self::Constant { value, .. } => Some(*value),
            Self::Regular { start, step, .. } => Some(start + step * ordinal as u64),
            Self::Explicit(values) => values.get(ordinal).copied(),
        }
    }

    /// Values in ordinal order
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        (0..self.len()).filter_map(|ordinal| self.get(ordinal))
    }
}

/// Accumulates the values of a [`DenseCatalog`] in ordinal order
#[derive(Debug, Clone, Default)]
pub struct DenseCatalogBuilder {
    values: Vec<u64>,
}

impl DenseCatalogBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the value of the next ordinal, returning that ordinal
    pub fn add(&mut self, value: u64) -> usize {
        self.values.push(value);
        self.values.len() - 1
    }

    /// Number of values added
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no values were added
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Finalize into the most compact representation
    pub fn create(self) -> DenseCatalog {
        let len = self.values.len();
        let (first, second) = match self.values[..] {
            [] => return DenseCatalog::default(),
            [only] => return DenseCatalog::Constant { value: only, len },
            [first, second, ..] => (first, second),
        };

        if self.values.iter().all(|&v| v == first) {
            return DenseCatalog::Constant { value: first, len };
        }

        if second > first {
            let step = second - first;
            if self.values.windows(2).all(|w| w[1].checked_sub(w[0]) == Some(step)) {
                return DenseCatalog::Regular {
                    start: first,
                    step,
                    len,
                };
            }
        }

        DenseCatalog::Explicit(self.values)
    }
}

/// Sparse catalog from a trace attribute to a trace ordinal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog<K: Eq + Hash> {
    ordinals: HashMap<K, usize>,
}

impl<K: Eq + Hash> Catalog<K> {
    /// Ordinal of the trace with `key`
    pub fn get(&self, key: &K) -> Option<usize> {
        self.ordinals.get(key).copied()
    }

    /// Whether a trace has `key`
    pub fn contains_key(&self, key: &K) -> bool {
        self.ordinals.contains_key(key)
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.ordinals.len()
    }

    /// Always false; empty catalogs are never created
    pub fn is_empty(&self) -> bool {
        self.ordinals.is_empty()
    }

    /// Keys and ordinals in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&K, usize)> {
        self.ordinals.iter().map(|(k, v)| (k, *v))
    }
}

/// Accumulates key to ordinal associations for a [`Catalog`]
#[derive(Debug, Clone)]
pub struct CatalogBuilder<K: Eq + Hash> {
    ordinals: HashMap<K, usize>,
    duplicate: bool,
}

impl<K: Eq + Hash> Default for CatalogBuilder<K> {
    fn default() -> Self {
        Self {
            ordinals: HashMap::new(),
            duplicate: false,
        }
    }
}

impl<K: Eq + Hash> CatalogBuilder<K> {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate `key` with `ordinal`
    ///
    /// A key seen before poisons the builder: the key space cannot
    /// identify traces uniquely.
    pub fn add(&mut self, key: K, ordinal: usize) {
        if self.duplicate {
            return;
        }
        match self.ordinals.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(ordinal);
            }
            Entry::Occupied(_) => {
                self.duplicate = true;
                self.ordinals = HashMap::new();
            }
        }
    }

    /// Whether a duplicate key has been added
    pub fn has_duplicates(&self) -> bool {
        self.duplicate
    }

    /// Finalize, yielding `None` for an empty or non-unique key space
    pub fn create(self) -> Option<Catalog<K>> {
        if self.duplicate || self.ordinals.is_empty() {
            return None;
        }
        Some(Catalog {
            ordinals: self.ordinals,
        })
    }
}
