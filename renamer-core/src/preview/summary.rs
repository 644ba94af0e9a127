use super::display_path;
use crate::output::RenameResult;
use std::fmt::Write;

/// Render a plain listing of every rewrite, grouped by file
pub fn render_summary(result: &RenameResult) -> String {
    let mut output = String::new();

    if result.dry_run {
        writeln!(output, "[DRY RUN]").unwrap();
    } else {
        writeln!(output, "[RENAME SUMMARY]").unwrap();
    }
    writeln!(output, "Scanned: {}", result.files_scanned).unwrap();
    writeln!(output, "Files: {}", result.files_changed()).unwrap();
    writeln!(output, "Imports: {}", result.imports_rewritten()).unwrap();

    let mut changes: Vec<_> = result.changes.iter().collect();
    changes.sort_by(|a, b| a.path.cmp(&b.path));

    if !changes.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "[IMPORTS]").unwrap();
        for change in changes {
            let file_str = display_path(&change.path);
            for edit in &change.edits {
                writeln!(
                    output,
                    "{}:{}:{}: {} -> {}",
                    file_str, edit.line, edit.column, edit.before, edit.after
                )
                .unwrap();
            }
        }
    }

    if !result.unresolved.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "[UNRESOLVED]").unwrap();
        for item in &result.unresolved {
            writeln!(
                output,
                "{}:{}: {}",
                display_path(&item.path),
                item.import.line,
                item.import.reason
            )
            .unwrap();
        }
    }

    output
}
