mod diff;
mod summary;
mod table;

pub use diff::render_diff;
pub use summary::render_summary;
pub use table::render_table;

use crate::output::RenameResult;
use anyhow::Result;
use std::io::{self, IsTerminal, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preview {
    Diff,
    Table,
    Summary,
    None,
}

impl std::str::FromStr for Preview {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "diff" => Ok(Self::Diff),
            "table" => Ok(Self::Table),
            "summary" => Ok(Self::Summary),
            "none" => Ok(Self::None),
            _ => Err(format!("Invalid preview format: {}", s)),
        }
    }
}

/// Determine whether to use colors based on explicit preference or terminal detection
pub fn should_use_color_with_detector<F>(use_color: Option<bool>, is_terminal: F) -> bool
where
    F: Fn() -> bool,
{
    match use_color {
        Some(explicit_color) => explicit_color,
        None => is_terminal(),
    }
}

pub fn should_use_color(use_color: Option<bool>) -> bool {
    should_use_color_with_detector(use_color, || io::stdout().is_terminal())
}

/// Path relative to the current directory when possible, with forward slashes
pub(crate) fn display_path(path: &Path) -> String {
    let relative = std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf))
        .unwrap_or_else(|| path.to_path_buf());

    if cfg!(windows) {
        relative.to_string_lossy().replace('\\', "/")
    } else {
        relative.to_string_lossy().to_string()
    }
}

/// Render the changes of a rename run in the specified format
pub fn render_changes(result: &RenameResult, format: Preview, use_color: Option<bool>) -> String {
    let use_color = should_use_color(use_color);

    match format {
        Preview::Diff => render_diff(result, use_color),
        Preview::Table => render_table(result, use_color),
        Preview::Summary => render_summary(result),
        Preview::None => String::new(),
    }
}

/// Write the preview to stdout
pub fn write_preview(result: &RenameResult, format: Preview, use_color: Option<bool>) -> Result<()> {
    let output = render_changes(result, format, use_color);
    let mut stdout = io::stdout();
    write!(stdout, "{}", output)?;
    stdout.flush()?;
    Ok(())
}
