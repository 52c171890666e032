//! Handler descriptors grouped by declaring class
//!
//! Iteration order is insertion order, both across classes and within a
//! class. Branch ordinals are assigned in this order, so it must never
//! depend on hashing.

use rustc_hash::FxHashMap;

use crate::shared::models::MethodDescriptor;

/// All handler methods of one declaring class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassEntry {
    pub class_name: String,
    pub methods: Vec<MethodDescriptor>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassMethodMap {
    entries: Vec<ClassEntry>,
    index: FxHashMap<String, usize>,
}

impl ClassMethodMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a descriptor. Returns false if it was already present.
    pub fn insert(&mut self, descriptor: MethodDescriptor) -> bool {
        let slot = match self.index.get(&descriptor.class_name) {
            Some(&slot) => slot,
            None => {
                let slot = self.entries.len();
                self.index.insert(descriptor.class_name.clone(), slot);
                self.entries.push(ClassEntry {
                    class_name: descriptor.class_name.clone(),
                    methods: Vec::new(),
                });
                slot
            }
        };

        let entry = &mut self.entries[slot];
        if entry.methods.contains(&descriptor) {
            return false;
        }
        entry.methods.push(descriptor);
        true
    }

    pub fn get(&self, class_name: &str) -> Option<&ClassEntry> {
        self.index.get(class_name).map(|&slot| &self.entries[slot])
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassEntry> {
        self.entries.iter()
    }

    /// (class, method) pairs in branch order
    pub fn descriptors(&self) -> impl Iterator<Item = &MethodDescriptor> {
        self.entries.iter().flat_map(|entry| entry.methods.iter())
    }

    pub fn class_names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.class_name.clone()).collect()
    }

    pub fn class_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of distinct descriptors
    pub fn len(&self) -> usize {
        self.entries.iter().map(|e| e.methods.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<MethodDescriptor> for ClassMethodMap {
    fn from_iter<I: IntoIterator<Item = MethodDescriptor>>(iter: I) -> Self {
        let mut map = ClassMethodMap::new();
        for descriptor in iter {
            map.insert(descriptor);
        }
        map
    }
}
