//! Generated document staging.
//!
//! Each compilation unit can produce two generated documents: the interface
//! document (contracts, extendable markers, synthesized parents) and the
//! partial document (flattened composing types). Documents are written next
//! to their unit, replacing any stale artifact from a previous run.

use std::path::{Path, PathBuf};

use serde::Serialize;

use weft_common::decl::TypeDecl;

use crate::discovery::UNIT_SUFFIX;

/// A generated document, ready to be written: its path relative to the
/// project root plus the declarations it carries, in emission order.
#[derive(Debug, Serialize)]
pub struct GeneratedDoc {
    #[serde(skip)]
    pub path: PathBuf,
    pub declarations: Vec<TypeDecl>,
}

/// The interface document path for a unit:
/// `game/actors.types.json` -> `game/actors.trait.interface.generated.json`.
pub fn interface_doc_path(unit_path: &Path) -> PathBuf {
    replace_suffix(unit_path, ".trait.interface.generated.json")
}

/// The partial document path for a unit:
/// `game/actors.types.json` -> `game/actors.trait.partial.generated.json`.
pub fn partial_doc_path(unit_path: &Path) -> PathBuf {
    replace_suffix(unit_path, ".trait.partial.generated.json")
}

fn replace_suffix(unit_path: &Path, suffix: &str) -> PathBuf {
    let s = unit_path.to_string_lossy();
    let stem = s.strip_suffix(UNIT_SUFFIX).unwrap_or(&s);
    PathBuf::from(format!("{stem}{suffix}"))
}

/// Write a generated document under the project root, overwriting any
/// existing file at that path.
pub fn stage(project_root: &Path, doc: &GeneratedDoc) -> Result<PathBuf, String> {
    let full_path = project_root.join(&doc.path);
    let json = serde_json::to_string_pretty(doc)
        .map_err(|e| format!("Failed to serialize '{}': {}", doc.path.display(), e))?;
    std::fs::write(&full_path, json)
        .map_err(|e| format!("Failed to write '{}': {}", full_path.display(), e))?;
    Ok(full_path)
}
