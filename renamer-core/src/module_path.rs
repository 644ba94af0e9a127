use crate::rename_list::{is_dotted_path, RenamePair};
use std::collections::HashSet;
use std::path::{Component, Path};

/// Extensions of files that define importable modules
pub const MODULE_EXTENSIONS: &[&str] = &["py", "pyi"];

const PACKAGE_INIT: &str = "__init__";

/// Map a project-relative file path to its dotted module path.
///
/// `home/room.py` becomes `home.room` and `home/__init__.py` becomes `home`.
/// Returns `None` for non-module files and for paths that cannot be imported
/// (a component that is not an identifier, or a top-level `__init__.py`).
pub fn module_path_for(relative: &Path) -> Option<String> {
    let extension = relative.extension()?.to_str()?;
    if !MODULE_EXTENSIONS.contains(&extension) {
        return None;
    }

    let mut parts = Vec::new();
    for component in relative.with_extension("").components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?.to_string()),
            Component::CurDir => {},
            _ => return None,
        }
    }

    if parts.last().is_some_and(|last| last == PACKAGE_INIT) {
        parts.pop();
    }
    if parts.is_empty() {
        return None;
    }

    let dotted = parts.join(".");
    is_dotted_path(&dotted).then_some(dotted)
}

/// Turn file moves into module moves.
///
/// Moves of non-module files, moves that leave the module path unchanged and
/// repeated moves are dropped. The order of first appearance is kept.
pub fn module_pairs<P: AsRef<Path>>(file_moves: &[(P, P)]) -> Vec<RenamePair> {
    let mut seen = HashSet::new();
    let mut pairs = Vec::new();

    for (from, to) in file_moves {
        let (Some(old), Some(new)) = (
            module_path_for(from.as_ref()),
            module_path_for(to.as_ref()),
        ) else {
            continue;
        };

        if old == new {
            continue;
        }

        let pair = RenamePair { old, new };
        if seen.insert(pair.clone()) {
            pairs.push(pair);
        }
    }

    pairs
}
