// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! IPFIX information model: field identity to declared name and type.
//!
//! The model is an owned value. Build it once at startup, then share it
//! read-only (`&InformationModel` or `Arc<InformationModel>`) with the
//! decoders. Reloading needs `&mut`, so it cannot race with readers.
//!
//! # Extension file
//!
//! `ipfix.elements` is YAML keyed by enterprise number, then element ID:
//!
//! ```yaml
//! 9999:
//!   1: [customField, unsigned32]
//!   2: [customName, string, "ignored extra"]
//! 2636:
//!   137: [commonPropertiesId, unsigned64]
//! ```
//!
//! Entries with fewer than two items are skipped. Unrecognized type names
//! load as [`ScalarType::Unknown`].

mod iana;

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::identity::{FieldIdentity, ScalarType};

/// File name looked up in the extension directory.
pub const ELEMENTS_FILE: &str = "ipfix.elements";

// ---------------------------------------------------------------------------
// RegistryEntry
// ---------------------------------------------------------------------------

/// Declared name and type of an information element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    pub field_id: u16,
    pub name: String,
    pub field_type: ScalarType,
}

// ---------------------------------------------------------------------------
// RegistryError
// ---------------------------------------------------------------------------

/// Errors loading an extension file.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("elements file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("elements file parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
}

// ---------------------------------------------------------------------------
// InformationModel
// ---------------------------------------------------------------------------

/// Raw shape of `ipfix.elements`.
type ElementsDocument = HashMap<u32, HashMap<u16, Vec<String>>>;

/// Lookup table from field identity to registry entry.
#[derive(Debug, Clone, PartialEq)]
pub struct InformationModel {
    entries: HashMap<FieldIdentity, RegistryEntry>,
}

impl InformationModel {
    /// Model with no entries.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Model holding the compiled-in IANA elements.
    pub fn builtin() -> Self {
        let mut model = Self::empty();
        for &(element_id, name, field_type) in iana::ELEMENTS {
            model.insert(FieldIdentity::new(0, element_id), name, field_type);
        }
        model
    }

    /// Load `<dir>/ipfix.elements`.
    ///
    /// The result holds only the entries of the file; built-in elements
    /// are not carried over.
    pub fn load_extensions(dir: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = dir.as_ref().join(ELEMENTS_FILE);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(RegistryError::NotFound(path));
            }
            Err(e) => return Err(e.into()),
        };

        let model = Self::from_yaml(&content)?;
        log::info!(
            "[InformationModel::load_extensions] {} elements loaded from {}",
            model.len(),
            path.display()
        );
        Ok(model)
    }

    /// Parse the extension file format from a string.
    pub fn from_yaml(yaml: &str) -> Result<Self, RegistryError> {
        let document: ElementsDocument = serde_yaml::from_str(yaml)?;

        let mut model = Self::empty();
        for (enterprise_no, elements) in document {
            for (element_id, props) in elements {
                if props.len() < 2 {
                    log::debug!(
                        "[InformationModel::from_yaml] skipping {}_{}: {} properties",
                        enterprise_no,
                        element_id,
                        props.len()
                    );
                    continue;
                }
                let field_type = ScalarType::from_name(&props[1]);
                if field_type == ScalarType::Unknown {
                    log::debug!(
                        "[InformationModel::from_yaml] {}_{}: unknown type {:?}",
                        enterprise_no,
                        element_id,
                        props[1]
                    );
                }
                model.insert(
                    FieldIdentity::new(enterprise_no, element_id),
                    &props[0],
                    field_type,
                );
            }
        }
        Ok(model)
    }

    /// Reload from `dir`, replacing every entry on success.
    ///
    /// On error the current entries are left untouched.
    pub fn reload_extensions(&mut self, dir: impl AsRef<Path>) -> Result<(), RegistryError> {
        let model = Self::load_extensions(dir)?;
        self.replace_with(model);
        Ok(())
    }

    /// Swap in `other`, returning the previous model.
    pub fn replace_with(&mut self, other: InformationModel) -> InformationModel {
        std::mem::replace(self, other)
    }

    /// Add or overwrite one entry.
    pub fn insert(&mut self, id: FieldIdentity, name: &str, field_type: ScalarType) {
        self.entries.insert(
            id,
            RegistryEntry {
                field_id: id.element_id,
                name: name.to_string(),
                field_type,
            },
        );
    }

    /// Exact lookup.
    pub fn lookup(&self, id: &FieldIdentity) -> Option<&RegistryEntry> {
        self.entries.get(id)
    }

    /// Lookup by enterprise number and element ID.
    pub fn get(&self, enterprise_no: u32, element_id: u16) -> Option<&RegistryEntry> {
        self.lookup(&FieldIdentity::new(enterprise_no, element_id))
    }

    /// Declared type of the field specifier of `id`, ignoring its
    /// discriminant. `Unknown` when the element is not registered.
    pub fn field_type(&self, id: &FieldIdentity) -> ScalarType {
        self.lookup(&id.primary())
            .map(|e| e.field_type)
            .unwrap_or(ScalarType::Unknown)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries ordered by identity.
    pub fn iter(&self) -> impl Iterator<Item = (FieldIdentity, &RegistryEntry)> + '_ {
        let mut entries: Vec<_> = self.entries.iter().map(|(id, e)| (*id, e)).collect();
        entries.sort_by_key(|(id, _)| *id);
        entries.into_iter()
    }
}

impl Default for InformationModel {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const EXTENSIONS_YAML: &str = r#"
9999:
  1: [customField, unsigned32]
  2: [onlyName]
  3: [labelled, string, "extra", "ignored"]
  4: [strange, decimal128]
2636:
  137: [commonPropertiesId, unsigned64]
"#;

    fn write_elements(dir: &Path, content: &str) {
        let mut file = fs::File::create(dir.join(ELEMENTS_FILE)).expect("create elements file");
        file.write_all(content.as_bytes()).expect("write elements file");
    }

    #[test]
    fn test_builtin_has_protocol_and_icmp() {
        let model = InformationModel::builtin();
        assert_eq!(
            model.get(0, 4).map(|e| e.name.as_str()),
            Some("protocolIdentifier")
        );
        assert_eq!(model.get(0, 176).map(|e| e.field_type), Some(ScalarType::Uint8));
        assert_eq!(model.get(0, 177).map(|e| e.field_id), Some(177));
        assert_eq!(model, InformationModel::default());
    }

    #[test]
    fn test_builtin_has_no_duplicates() {
        assert_eq!(InformationModel::builtin().len(), iana::ELEMENTS.len());
    }

    #[test]
    fn test_from_yaml() {
        let model = InformationModel::from_yaml(EXTENSIONS_YAML).expect("parse");

        assert_eq!(
            model.lookup(&FieldIdentity::new(9999, 1)),
            Some(&RegistryEntry {
                field_id: 1,
                name: "customField".to_string(),
                field_type: ScalarType::Uint32,
            })
        );
        assert!(model.get(9999, 2).is_none());
        assert_eq!(model.get(9999, 3).map(|e| e.field_type), Some(ScalarType::String));
        assert_eq!(model.get(9999, 4).map(|e| e.field_type), Some(ScalarType::Unknown));
        assert_eq!(model.get(2636, 137).map(|e| e.field_type), Some(ScalarType::Uint64));
        assert_eq!(model.len(), 4);
    }

    #[test]
    fn test_from_yaml_wrong_shape() {
        let err = InformationModel::from_yaml("9999: [a, b]").unwrap_err();
        assert!(matches!(err, RegistryError::Parse(_)));

        let err = InformationModel::from_yaml("not-a-number:\n  1: [a, string]").unwrap_err();
        assert!(matches!(err, RegistryError::Parse(_)));
    }

    #[test]
    fn test_load_extensions_replaces_builtin() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_elements(dir.path(), EXTENSIONS_YAML);

        let model = InformationModel::load_extensions(dir.path()).expect("load");
        assert!(model.get(9999, 1).is_some());
        assert!(model.get(0, 4).is_none());
    }

    #[test]
    fn test_load_extensions_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        match InformationModel::load_extensions(dir.path()) {
            Err(RegistryError::NotFound(path)) => {
                assert_eq!(path, dir.path().join(ELEMENTS_FILE));
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_reload_keeps_model_on_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_elements(dir.path(), "9999: {1: [a, b]");

        let mut model = InformationModel::builtin();
        assert!(model.reload_extensions(dir.path()).is_err());
        assert!(model.get(0, 4).is_some());

        write_elements(dir.path(), EXTENSIONS_YAML);
        model.reload_extensions(dir.path()).expect("reload");
        assert!(model.get(0, 4).is_none());
        assert_eq!(model.len(), 4);
    }

    #[test]
    fn test_field_type_ignores_discriminant() {
        let mut model = InformationModel::empty();
        model.insert(FieldIdentity::new(9999, 7), "addrOrName", ScalarType::Ipv4OrString);

        let alternate = FieldIdentity::with_multi_type(9999, 7, 1);
        assert!(model.lookup(&alternate).is_none());
        assert_eq!(model.field_type(&alternate), ScalarType::Ipv4OrString);
        assert_eq!(model.field_type(&FieldIdentity::new(1, 1)), ScalarType::Unknown);
    }

    #[test]
    fn test_iter_sorted() {
        let model = InformationModel::from_yaml(EXTENSIONS_YAML).expect("parse");
        let ids: Vec<_> = model.iter().map(|(id, _)| id).collect();
        assert_eq!(
            ids,
            vec![
                FieldIdentity::new(2636, 137),
                FieldIdentity::new(9999, 1),
                FieldIdentity::new(9999, 3),
                FieldIdentity::new(9999, 4),
            ]
        );
    }
}
