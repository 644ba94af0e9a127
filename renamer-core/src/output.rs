use crate::rename_list::RenamePair;
use crate::rewriter::{ImportEdit, UnresolvedImport};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt::Write;
use std::path::PathBuf;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

/// Result of an analyze operation
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResult {
    pub branch: String,
    pub compare_with: String,
    pub output_file: PathBuf,
    pub files_moved: usize,
    pub imports_to_move: Vec<RenamePair>,
}

/// A file whose imports were (or, in a dry run, would be) rewritten
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileChange {
    pub path: PathBuf,
    pub edits: Vec<ImportEdit>,
    #[serde(skip)]
    pub original: String,
    #[serde(skip)]
    pub rewritten: String,
}

/// A file left alone because it could not be read or written
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileUnresolved {
    pub path: PathBuf,
    #[serde(flatten)]
    pub import: UnresolvedImport,
}

/// Result of a rename operation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenameResult {
    pub dry_run: bool,
    pub files_scanned: usize,
    pub changes: Vec<FileChange>,
    pub skipped: Vec<SkippedFile>,
    pub unresolved: Vec<FileUnresolved>,
    /// Pairs ignored because an earlier pair has the same old path
    pub shadowed: Vec<RenamePair>,
    /// Directory entries the walker could not read
    pub walk_errors: Vec<String>,
}

impl RenameResult {
    pub fn files_changed(&self) -> usize {
        self.changes.len()
    }

    pub fn imports_rewritten(&self) -> usize {
        self.changes.iter().map(|c| c.edits.len()).sum()
    }
}

/// Result of a version command
#[derive(Debug, Serialize, Deserialize)]
pub struct VersionResult {
    pub name: String,
    pub version: String,
}

/// Trait for formatting output in different formats
pub trait OutputFormatter {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }

    fn format_json(&self) -> String;
    fn format_summary(&self) -> String;
}

impl OutputFormatter for AnalyzeResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "analyze",
            "branch": self.branch,
            "compare_with": self.compare_with,
            "output_file": self.output_file,
            "summary": {
                "files_moved": self.files_moved,
                "modules_moved": self.imports_to_move.len(),
            },
            "imports_to_move": self.imports_to_move,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();

        if self.imports_to_move.is_empty() {
            writeln!(
                output,
                "No moved modules between {} and {}",
                self.compare_with, self.branch
            )
            .unwrap();
        } else {
            writeln!(
                output,
                "Found {} moved modules between {} and {}:",
                self.imports_to_move.len(),
                self.compare_with,
                self.branch
            )
            .unwrap();
            for pair in &self.imports_to_move {
                writeln!(output, "  {} -> {}", pair.old, pair.new).unwrap();
            }
        }

        writeln!(output, "✓ Wrote {}", self.output_file.display()).unwrap();
        output
    }
}

impl OutputFormatter for RenameResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "rename",
            "dry_run": self.dry_run,
            "summary": {
                "files_scanned": self.files_scanned,
                "files_changed": self.files_changed(),
                "imports_rewritten": self.imports_rewritten(),
                "files_skipped": self.skipped.len(),
            },
            "changes": self.changes,
            "skipped": self.skipped,
            "unresolved": self.unresolved,
            "shadowed": self.shadowed,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();

        let verb = if self.dry_run {
            "Would rewrite"
        } else {
            "Rewrote"
        };
        writeln!(
            output,
            "✓ {} {} imports across {} files ({} scanned)",
            verb,
            self.imports_rewritten(),
            self.files_changed(),
            self.files_scanned
        )
        .unwrap();

        for pair in &self.shadowed {
            writeln!(
                output,
                "⚠ Ignored duplicate entry {} -> {}",
                pair.old, pair.new
            )
            .unwrap();
        }

        if !self.unresolved.is_empty() {
            writeln!(
                output,
                "⚠ {} imports need manual attention:",
                self.unresolved.len()
            )
            .unwrap();
            for item in &self.unresolved {
                writeln!(
                    output,
                    "  {}:{}: {} ({})",
                    item.path.display(),
                    item.import.line,
                    item.import.statement,
                    item.import.reason
                )
                .unwrap();
            }
        }

        if !self.skipped.is_empty() {
            writeln!(output, "⚠ Skipped {} files:", self.skipped.len()).unwrap();
            for file in &self.skipped {
                writeln!(output, "  {}: {}", file.path.display(), file.error).unwrap();
            }
        }

        for error in &self.walk_errors {
            writeln!(output, "⚠ {}", error).unwrap();
        }

        output
    }
}

impl OutputFormatter for VersionResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "name": self.name,
            "version": self.version,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        format!("{} {}", self.name, self.version)
    }
}
