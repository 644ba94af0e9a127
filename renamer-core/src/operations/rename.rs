use crate::error::RenamerError;
use crate::module_path::MODULE_EXTENSIONS;
use crate::output::{FileChange, FileUnresolved, RenameResult, SkippedFile};
use crate::rename_list::RenameList;
use crate::rewriter::rewrite_source;
use crate::rules::RenameRules;
use crate::run_log::RunLog;
use crate::{build_globset, configure_walker};
use anyhow::{Context, Result};
use content_inspector::ContentType;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Options for rewriting the imports of a set of project trees
#[derive(Debug, Clone)]
pub struct RewriteOptions {
    /// Extensions (without the dot) of files to rewrite
    pub extensions: Vec<String>,
    pub includes: Vec<String>,
    pub excludes: Vec<String>,
    /// 0 = respect all ignore files, 1 = ignore .gitignore, 2+ = walk everything
    pub unrestricted_level: u8,
    pub dry_run: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            extensions: MODULE_EXTENSIONS.iter().map(ToString::to_string).collect(),
            includes: Vec::new(),
            excludes: Vec::new(),
            unrestricted_level: 0,
            dry_run: false,
            log_file: None,
        }
    }
}

impl RewriteOptions {
    fn wants(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(ext))
            })
    }
}

/// Rename operation - rewrite imports under every project path according
/// to the rename list in `import_file`
pub fn rename_operation(
    project_paths: &[PathBuf],
    import_file: &Path,
    options: &RewriteOptions,
) -> Result<RenameResult> {
    for path in project_paths.iter().map(PathBuf::as_path).chain([import_file]) {
        if !path.exists() {
            return Err(RenamerError::InvalidPath(path.to_path_buf()).into());
        }
    }

    let list = RenameList::load(import_file)?;
    let rules = RenameRules::new(&list);

    let include_globs = build_globset(&options.includes).context("Invalid include pattern")?;
    let exclude_globs = build_globset(&options.excludes).context("Invalid exclude pattern")?;

    let mut log = match options.log_file.as_deref() {
        Some(path) => RunLog::open(path)?,
        None => RunLog::disabled(),
    };
    log.log(&format!(
        "{} {} rules from {} over {} path(s)",
        if options.dry_run { "Previewing" } else { "Applying" },
        rules.len(),
        import_file.display(),
        project_paths.len()
    ))?;
    for pair in rules.shadowed() {
        log.log(&format!("Ignored duplicate entry {} -> {}", pair.old, pair.new))?;
    }

    let mut result = RenameResult {
        dry_run: options.dry_run,
        shadowed: rules.shadowed().to_vec(),
        ..Default::default()
    };

    let mut seen = HashSet::new();
    let walker = configure_walker(project_paths, options.unrestricted_level).build();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log.log(&format!("Walk error: {}", err))?;
                result.walk_errors.push(err.to_string());
                continue;
            },
        };

        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }

        let path = entry.path();
        if !options.wants(path) {
            continue;
        }

        let relative_path = project_paths
            .iter()
            .find_map(|root| {
                path.strip_prefix(root)
                    .ok()
                    .filter(|rel| !rel.as_os_str().is_empty())
            })
            .unwrap_or(path);

        if let Some(ref includes) = include_globs {
            if !includes.is_match(relative_path) {
                continue;
            }
        }

        if let Some(ref excludes) = exclude_globs {
            if excludes.is_match(relative_path) {
                continue;
            }
        }

        // Overlapping project paths must not rewrite a file twice
        let key = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        if !seen.insert(key) {
            continue;
        }

        result.files_scanned += 1;

        let content = match read_source(path) {
            Ok(content) => content,
            Err(err) => {
                skip(&mut result, &mut log, path, &err)?;
                continue;
            },
        };

        let rewrite = rewrite_source(&content, &rules);
        result
            .unresolved
            .extend(rewrite.unresolved.into_iter().map(|import| FileUnresolved {
                path: path.to_path_buf(),
                import,
            }));

        let Some(rewritten) = rewrite.content else {
            continue;
        };

        if !options.dry_run {
            if let Err(err) = write_source(path, &rewritten) {
                skip(&mut result, &mut log, path, &err)?;
                continue;
            }
            log.log(&format!(
                "Rewrote {} ({} imports)",
                path.display(),
                rewrite.edits.len()
            ))?;
        }

        result.changes.push(FileChange {
            path: path.to_path_buf(),
            edits: rewrite.edits,
            original: content,
            rewritten,
        });
    }

    log.log(&format!(
        "Done: {} files changed, {} skipped, {} scanned",
        result.files_changed(),
        result.skipped.len(),
        result.files_scanned
    ))?;

    Ok(result)
}

fn skip(result: &mut RenameResult, log: &mut RunLog, path: &Path, err: &RenamerError) -> Result<()> {
    log.log(&format!("Skipped: {}", err))?;
    result.skipped.push(SkippedFile {
        path: path.to_path_buf(),
        error: err.to_string(),
    });
    Ok(())
}

fn file_error(path: &Path, action: &'static str, source: io::Error) -> RenamerError {
    RenamerError::FileIo {
        path: path.to_path_buf(),
        action,
        source,
    }
}

/// Read a source file, refusing binary and non-UTF-8 content
fn read_source(path: &Path) -> Result<String, RenamerError> {
    let bytes = fs::read(path).map_err(|e| file_error(path, "read", e))?;

    if matches!(content_inspector::inspect(&bytes), ContentType::BINARY) {
        return Err(file_error(
            path,
            "read",
            io::Error::new(io::ErrorKind::InvalidData, "binary content"),
        ));
    }

    String::from_utf8(bytes)
        .map_err(|e| file_error(path, "decode", io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Replace a file's content through a temp file and rename, keeping its
/// permissions
fn write_source(path: &Path, content: &str) -> Result<(), RenamerError> {
    let temp_path = path.with_extension(format!("{}.renamer.tmp", std::process::id()));

    let result = (|| -> io::Result<()> {
        let permissions = fs::metadata(path)?.permissions();
        {
            let mut temp_file = File::create(&temp_path)?;
            temp_file.write_all(content.as_bytes())?;
            temp_file.sync_all()?;
        }
        fs::set_permissions(&temp_path, permissions)?;
        fs::rename(&temp_path, path)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }

    result.map_err(|e| file_error(path, "write", e))
}
