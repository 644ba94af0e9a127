use anyhow::Result;
use renamer_core::{analyze_operation, Config, OutputFormatter};
use std::path::{Path, PathBuf};

use crate::OutputFormat;

pub fn handle_analyze(
    project_path: &Path,
    compare_with: Option<String>,
    branch: Option<String>,
    output_file: Option<PathBuf>,
    config: &Config,
    output: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let compare_with = compare_with.unwrap_or_else(|| config.defaults.compare_with.clone());
    let output_file = output_file.unwrap_or_else(|| config.defaults.output_file.clone());

    let result = analyze_operation(
        project_path,
        &compare_with,
        branch.as_deref(),
        &output_file,
    )?;

    if !quiet {
        match output {
            OutputFormat::Json => println!("{}", result.format_json()),
            OutputFormat::Summary => print!("{}", result.format_summary()),
        }
    }

    Ok(())
}
