//! The list of module moves shared between `analyze` and `rename`.
//!
//! On disk this is a JSON object with a single `imports_to_move` key whose
//! value is a list of `[old, new]` pairs. Files ending in `.py` are read with
//! a restricted literal parser instead (see [`literal`]), so hand-written
//! lists in the older `imports_to_move = [(...)]` form keep working without
//! ever being executed.

pub mod literal;

use crate::error::RenamerError;
use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// Name of the list inside a rename list file
pub const LIST_NAME: &str = "imports_to_move";

static DOTTED_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\W\d]\w*(?:\.[^\W\d]\w*)*$").expect("valid regex"));

/// True if `path` is a dotted sequence of Python identifiers
pub fn is_dotted_path(path: &str) -> bool {
    DOTTED_PATH.is_match(path)
}

/// One module move: everything imported from `old` now lives at `new`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct RenamePair {
    pub old: String,
    pub new: String,
}

impl RenamePair {
    pub fn new(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            old: old.into(),
            new: new.into(),
        }
    }

    fn validate(&self) -> Result<(), String> {
        if !is_dotted_path(&self.old) {
            return Err(format!("'{}' is not a dotted module path", self.old));
        }
        if !is_dotted_path(&self.new) {
            return Err(format!("'{}' is not a dotted module path", self.new));
        }
        if self.old == self.new {
            return Err(format!("'{}' is moved onto itself", self.old));
        }
        Ok(())
    }
}

impl From<(String, String)> for RenamePair {
    fn from((old, new): (String, String)) -> Self {
        Self { old, new }
    }
}

impl From<RenamePair> for (String, String) {
    fn from(pair: RenamePair) -> Self {
        (pair.old, pair.new)
    }
}

#[derive(Debug, Deserialize)]
struct RawList {
    imports_to_move: Option<Vec<RenamePair>>,
}

/// Ordered list of module moves
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameList {
    pub imports_to_move: Vec<RenamePair>,
}

impl RenameList {
    pub fn new(pairs: Vec<RenamePair>) -> Self {
        Self {
            imports_to_move: pairs,
        }
    }

    pub fn pairs(&self) -> &[RenamePair] {
        &self.imports_to_move
    }

    pub fn len(&self) -> usize {
        self.imports_to_move.len()
    }

    pub fn is_empty(&self) -> bool {
        self.imports_to_move.is_empty()
    }

    /// Load and validate a rename list from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read rename list from {}", path.display()))?;

        let is_literal = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("py"));

        let list = if is_literal {
            literal::parse(&content).map(Self::new)
        } else {
            Self::parse_json(&content)
        }
        .map_err(|reason| RenamerError::malformed(path, reason))?;

        list.validate()
            .map_err(|reason| RenamerError::malformed(path, reason))?;

        Ok(list)
    }

    fn parse_json(content: &str) -> Result<Self, String> {
        let raw: RawList = serde_json::from_str(content).map_err(|e| e.to_string())?;
        raw.imports_to_move
            .map(Self::new)
            .ok_or_else(|| format!("missing `{}` list", LIST_NAME))
    }

    /// Check every pair, reporting the first bad one with its position
    pub fn validate(&self) -> Result<(), String> {
        for (index, pair) in self.imports_to_move.iter().enumerate() {
            pair.validate()
                .map_err(|reason| format!("entry {}: {}", index + 1, reason))?;
        }
        Ok(())
    }

    /// Serialize with one pair per line so lists stay reviewable in diffs
    pub fn to_json_string(&self) -> Result<String> {
        if self.imports_to_move.is_empty() {
            return Ok(format!("{{\n  \"{}\": []\n}}\n", LIST_NAME));
        }

        let mut out = format!("{{\n  \"{}\": [\n", LIST_NAME);
        let last = self.imports_to_move.len() - 1;
        for (index, pair) in self.imports_to_move.iter().enumerate() {
            out.push_str("    ");
            out.push_str(&serde_json::to_string(pair)?);
            if index != last {
                out.push(',');
            }
            out.push('\n');
        }
        out.push_str("  ]\n}\n");
        Ok(out)
    }

    /// Write the list as JSON, creating parent directories as needed
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {}", parent.display()))?;
            }
        }
        fs::write(path, self.to_json_string()?)
            .with_context(|| format!("Failed to write rename list to {}", path.display()))?;
        Ok(())
    }
}
