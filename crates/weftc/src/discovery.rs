//! Compilation unit discovery and loading for weft projects.
//!
//! Provides utilities to recursively discover `*.types.json` unit files in a
//! project directory and deserialize them into the declaration model.
//! Generated documents use the `*.generated.json` suffix and are never
//! picked up as input.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use weft_common::decl::TypeDecl;

/// The suffix that marks a file as a compilation unit.
pub const UNIT_SUFFIX: &str = ".types.json";

/// The on-disk shape of a compilation unit file.
#[derive(Debug, Deserialize)]
pub struct UnitFile {
    #[serde(default)]
    pub declarations: Vec<TypeDecl>,
}

/// A loaded compilation unit: its path relative to the project root plus
/// its declarations in source order.
#[derive(Debug)]
pub struct CompilationUnit {
    pub path: PathBuf,
    pub decls: Vec<TypeDecl>,
}

/// Recursively discover all `*.types.json` files in a project directory.
///
/// Returns paths relative to `project_root`, sorted alphabetically for
/// determinism. Hidden directories (names starting with `.`) are skipped.
pub fn discover_unit_files(project_root: &Path) -> Result<Vec<PathBuf>, String> {
    let mut files = Vec::new();
    discover_recursive(project_root, project_root, &mut files)
        .map_err(|e| format!("Failed to walk directory '{}': {}", project_root.display(), e))?;
    files.sort();
    Ok(files)
}

/// Internal recursive walker that collects unit files as relative paths.
fn discover_recursive(
    root: &Path,
    dir: &Path,
    files: &mut Vec<PathBuf>,
) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let entry_path = entry.path();
        let file_name = entry.file_name();
        let name_str = file_name.to_string_lossy();

        // Skip hidden directories and files
        if name_str.starts_with('.') {
            continue;
        }

        if entry_path.is_dir() {
            discover_recursive(root, &entry_path, files)?;
        } else if name_str.ends_with(UNIT_SUFFIX) {
            // Store path relative to root
            let relative = entry_path
                .strip_prefix(root)
                .unwrap_or(&entry_path)
                .to_path_buf();
            files.push(relative);
        }
    }
    Ok(())
}

/// Discover and deserialize every compilation unit under `project_root`.
///
/// Units are returned in sorted path order; a file that fails to read or
/// parse fails the whole load with a formatted context message.
pub fn load_units(project_root: &Path) -> Result<Vec<CompilationUnit>, String> {
    let files = discover_unit_files(project_root)?;
    let mut units = Vec::with_capacity(files.len());
    for relative_path in files {
        let full_path = project_root.join(&relative_path);
        let source = std::fs::read_to_string(&full_path)
            .map_err(|e| format!("Failed to read '{}': {}", full_path.display(), e))?;
        let unit: UnitFile = serde_json::from_str(&source)
            .map_err(|e| format!("Failed to parse '{}': {}", full_path.display(), e))?;
        units.push(CompilationUnit {
            path: relative_path,
            decls: unit.declarations,
        });
    }
    Ok(units)
}
