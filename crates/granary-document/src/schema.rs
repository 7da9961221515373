//! Document schema catalog -- resolve-only view of the deployed schema.
//!
//! The catalog is owned by the configuration layer and shared read-only with
//! every codec factory that needs it. It is built once at startup, typically
//! from the deployed schema config JSON, and never mutated afterwards.
//!
//! Field semantics are NOT interpreted here; the codec only needs to know
//! whether a type name resolves.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::DocumentError;

/// A field definition within a document type. Carried for diagnostics and
/// for collaborators that introspect the schema; the codec never reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub data_type: String,
}

/// A named document type from the deployed schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentType {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

/// On-disk shape of the catalog config.
#[derive(Debug, Serialize, Deserialize)]
struct CatalogConfig {
    document_types: Vec<DocumentType>,
}

/// Immutable type-name -> DocumentType mapping.
#[derive(Debug, Default)]
pub struct DocumentTypeCatalog {
    types: BTreeMap<String, DocumentType>,
}

impl DocumentTypeCatalog {
    /// Build a catalog from an explicit type list. Duplicate names are a
    /// deployment error, not something to silently last-write-wins over.
    pub fn new(types: Vec<DocumentType>) -> crate::Result<Self> {
        let mut map = BTreeMap::new();
        for ty in types {
            let name = ty.name.clone();
            if map.insert(name.clone(), ty).is_some() {
                return Err(DocumentError::DuplicateDocumentType(name));
            }
        }
        Ok(Self { types: map })
    }

    /// Build a catalog from the schema config JSON.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let config: CatalogConfig = serde_json::from_str(json)?;
        Self::new(config.document_types)
    }

    /// Resolve a document type by name.
    pub fn resolve(&self, name: &str) -> Option<&DocumentType> {
        self.types.get(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
