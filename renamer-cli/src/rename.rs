use anyhow::Result;
use renamer_core::{
    rename_operation, write_preview, Config, OutputFormatter, Preview, RewriteOptions,
};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::cli::args::FilterArgs;
use crate::OutputFormat;

#[allow(clippy::too_many_arguments)]
pub fn handle_rename(
    project_paths: &[PathBuf],
    import_file: &Path,
    filter: FilterArgs,
    dry_run: bool,
    preview: Option<Preview>,
    log_file: Option<PathBuf>,
    config: &Config,
    use_color: Option<bool>,
    output: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let extensions = if filter.extensions.is_empty() {
        config.defaults.extensions.clone()
    } else {
        filter.extensions
    };

    let options = RewriteOptions {
        extensions,
        includes: filter.include,
        excludes: filter.exclude,
        unrestricted_level: filter.unrestricted,
        dry_run,
        log_file: log_file.or_else(|| config.defaults.log_file.clone()),
    };

    let result = rename_operation(project_paths, import_file, &options)?;

    if quiet {
        return Ok(());
    }

    if output == OutputFormat::Json {
        println!("{}", result.format_json());
        return Ok(());
    }

    // Dry runs preview by default; real runs only when asked
    let preview = preview.or_else(|| {
        dry_run.then(|| {
            Preview::from_str(&config.defaults.preview_format).unwrap_or(Preview::Diff)
        })
    });
    if let Some(format) = preview {
        write_preview(&result, format, use_color)?;
    }

    eprint!("{}", result.format_summary());
    Ok(())
}
