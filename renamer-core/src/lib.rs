#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod analyzer;
pub mod config;
pub mod error;
pub mod imports;
pub mod lexer;
pub mod module_path;
pub mod operations;
pub mod output;
pub mod preview;
pub mod rename_list;
pub mod rewriter;
pub mod rules;
pub mod run_log;
pub mod vcs;

pub use analyzer::{analyze_modifications, Analysis};
pub use config::Config;
pub use error::{exit_code_for, RenamerError};
pub use module_path::{module_pairs, module_path_for};
pub use operations::{analyze_operation, rename_operation, RewriteOptions};
pub use output::{
    AnalyzeResult, FileChange, OutputFormat, OutputFormatter, RenameResult, SkippedFile,
    VersionResult,
};
pub use preview::{render_changes, write_preview, Preview};
pub use rename_list::{RenameList, RenamePair};
pub use rewriter::{rewrite_source, ImportEdit, SourceRewrite};
pub use rules::RenameRules;
pub use vcs::{GitCli, VersionControl};

use anyhow::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::path::PathBuf;

/// Configure a `WalkBuilder` for the given unrestricted level.
///
/// This matches ripgrep's behavior:
/// - Level 0 (default): Respect all ignore files, skip hidden files
/// - Level 1 (-u): Don't respect .gitignore, but respect other ignore files, skip hidden
/// - Level 2+ (-uu): Don't respect any ignore files, include hidden files
pub fn configure_walker(roots: &[PathBuf], unrestricted_level: u8) -> WalkBuilder {
    let mut builder = if roots.is_empty() {
        WalkBuilder::new(".")
    } else {
        let mut b = WalkBuilder::new(&roots[0]);
        for root in roots.iter().skip(1) {
            b.add(root);
        }
        b
    };

    match unrestricted_level {
        0 => {
            builder
                .git_ignore(true)
                .git_global(true)
                .git_exclude(true)
                .ignore(true)
                .parents(true)
                .hidden(true) // true = skip hidden files
                .add_custom_ignore_filename(".gitignore") // also outside git repositories
                .add_custom_ignore_filename(".renamerignore");
        },
        1 => {
            builder
                .git_ignore(false)
                .git_global(true)
                .git_exclude(true)
                .ignore(true)
                .parents(true)
                .hidden(true)
                .add_custom_ignore_filename(".renamerignore");
        },
        _ => {
            builder
                .git_ignore(false)
                .git_global(false)
                .git_exclude(false)
                .ignore(false)
                .parents(false)
                .hidden(false); // false = include hidden files
        },
    }

    builder
}

/// Build a glob set from include/exclude patterns. A bare name or a
/// pattern ending in `/` also matches everything below that directory.
pub fn build_globset(patterns: &[String]) -> Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);

        if pattern.ends_with('/')
            || (!pattern.contains('*') && !pattern.contains('?') && !pattern.contains('.'))
        {
            let recursive_pattern = if pattern.ends_with('/') {
                format!("{}**", pattern)
            } else {
                format!("{}/**", pattern)
            };
            builder.add(Glob::new(&recursive_pattern)?);
        }
    }
    Ok(Some(builder.build()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn walked(roots: &[PathBuf], level: u8) -> Vec<String> {
        let mut names: Vec<String> = configure_walker(roots, level)
            .build()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_some_and(|t| t.is_file()))
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_build_globset_empty() {
        assert!(build_globset(&[]).unwrap().is_none());
    }

    #[test]
    fn test_build_globset_patterns() {
        let globset = build_globset(&["*.py".to_string()]).unwrap().unwrap();
        assert!(globset.is_match("setup.py"));
        assert!(globset.is_match("pkg/mod.py"));
        assert!(!globset.is_match("README.md"));
    }

    #[test]
    fn test_build_globset_directory() {
        let globset = build_globset(&["build".to_string(), "dist/".to_string()])
            .unwrap()
            .unwrap();
        assert!(globset.is_match("build/lib/a.py"));
        assert!(globset.is_match("dist/a.py"));
        assert!(!globset.is_match("src/build.py"));
    }

    #[test]
    fn test_build_globset_invalid() {
        assert!(build_globset(&["[".to_string()]).is_err());
    }

    #[test]
    fn test_unrestricted_levels() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join(".gitignore"), "generated.py\n").unwrap();
        fs::write(root.join("generated.py"), "").unwrap();
        fs::write(root.join("main.py"), "").unwrap();
        fs::write(root.join(".hidden.py"), "").unwrap();
        let roots = vec![root.to_path_buf()];

        assert_eq!(walked(&roots, 0), vec!["main.py"]);
        assert_eq!(walked(&roots, 1), vec!["generated.py", "main.py"]);
        assert_eq!(
            walked(&roots, 2),
            vec![".gitignore", ".hidden.py", "generated.py", "main.py"]
        );
    }

    #[test]
    fn test_renamerignore_file() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join(".renamerignore"), "vendored.py\n").unwrap();
        fs::write(root.join("vendored.py"), "").unwrap();
        fs::write(root.join("main.py"), "").unwrap();
        let roots = vec![root.to_path_buf()];

        assert_eq!(walked(&roots, 0), vec!["main.py"]);
        assert_eq!(walked(&roots, 1), vec!["main.py"]);
        assert_eq!(
            walked(&roots, 2),
            vec![".renamerignore", "main.py", "vendored.py"]
        );
    }
}
