//! Load types -- opaque traffic-classification tokens.
//!
//! Feed operations carry a load-type id on the wire so the receiving side can
//! apply per-class admission and priority policy. The codec only resolves the
//! id through this table and attaches the result to the decoded message; the
//! policy itself lives elsewhere.

use std::collections::HashMap;

/// Default load-type id, always resolvable.
pub const DEFAULT_LOAD_TYPE_ID: u32 = 0;

/// A named traffic class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadType {
    pub id: u32,
    pub name: String,
}

impl LoadType {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Immutable id -> LoadType table with a guaranteed default entry.
///
/// Lookup of an unknown id falls back to the default rather than failing:
/// a sender with a newer load-type config must not be able to make our
/// decode path reject otherwise valid feed traffic.
#[derive(Debug, Clone)]
pub struct LoadTypeSet {
    types: HashMap<u32, LoadType>,
    default: LoadType,
}

impl LoadTypeSet {
    pub fn new(extra: Vec<LoadType>) -> Self {
        let default = LoadType::new(DEFAULT_LOAD_TYPE_ID, "default");
        let mut types = HashMap::new();
        types.insert(default.id, default.clone());
        for lt in extra {
            types.insert(lt.id, lt);
        }
        Self { types, default }
    }

    /// Resolve a load-type id, falling back to the default.
    pub fn lookup(&self, id: u32) -> &LoadType {
        self.types.get(&id).unwrap_or(&self.default)
    }

    pub fn default_type(&self) -> &LoadType {
        &self.default
    }
}

impl Default for LoadTypeSet {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
