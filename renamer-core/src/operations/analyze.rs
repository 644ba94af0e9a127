use crate::analyzer::analyze_modifications;
use crate::error::RenamerError;
use crate::output::AnalyzeResult;
use crate::vcs::{GitCli, VersionControl};
use anyhow::Result;
use std::path::Path;

/// Analyze operation - diff two branches of the repository at
/// `project_path` and write the resulting rename list to `output_file`
pub fn analyze_operation(
    project_path: &Path,
    compare_with: &str,
    branch: Option<&str>,
    output_file: &Path,
) -> Result<AnalyzeResult> {
    if !project_path.is_dir() {
        return Err(RenamerError::InvalidPath(project_path.to_path_buf()).into());
    }

    let git = GitCli::new(project_path);
    analyze_with(&git, compare_with, branch, output_file)
}

pub(crate) fn analyze_with<V: VersionControl + ?Sized>(
    vcs: &V,
    compare_with: &str,
    branch: Option<&str>,
    output_file: &Path,
) -> Result<AnalyzeResult> {
    let analysis = analyze_modifications(vcs, compare_with, branch)?;

    analysis.list.write(output_file)?;

    Ok(AnalyzeResult {
        branch: analysis.branch,
        compare_with: analysis.compare_with,
        output_file: output_file.to_path_buf(),
        files_moved: analysis.file_moves.len(),
        imports_to_move: analysis.list.pairs().to_vec(),
    })
}
