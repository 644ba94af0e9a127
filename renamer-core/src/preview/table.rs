use super::display_path;
use crate::output::RenameResult;
use comfy_table::{Cell, Color, ColumnConstraint, ContentArrangement, Table, Width};
use std::io::{self, IsTerminal};

const COLUMN_WIDTHS: [u16; 4] = [60, 8, 45, 45];

/// Render one row per rewritten import reference
pub fn render_table(result: &RenameResult, use_color: bool) -> String {
    let mut table = Table::new();

    if io::stdout().is_terminal() {
        table.set_content_arrangement(ContentArrangement::Dynamic);
    } else {
        table.set_content_arrangement(ContentArrangement::Disabled);
        table.set_constraints(
            COLUMN_WIDTHS
                .iter()
                .map(|w| ColumnConstraint::Absolute(Width::Fixed(*w))),
        );
    }

    if use_color {
        table.enforce_styling();
        table.set_header(vec![
            Cell::new("File").fg(Color::Cyan),
            Cell::new("Line").fg(Color::Cyan),
            Cell::new("Before").fg(Color::Cyan),
            Cell::new("After").fg(Color::Cyan),
        ]);
    } else {
        table.set_header(vec!["File", "Line", "Before", "After"]);
    }

    let mut changes: Vec<_> = result.changes.iter().collect();
    changes.sort_by(|a, b| a.path.cmp(&b.path));

    for change in changes {
        let file_str = display_path(&change.path);
        for edit in &change.edits {
            if use_color {
                table.add_row(vec![
                    Cell::new(&file_str),
                    Cell::new(edit.line.to_string()).fg(Color::Yellow),
                    Cell::new(&edit.before).fg(Color::Red),
                    Cell::new(&edit.after).fg(Color::Green),
                ]);
            } else {
                table.add_row(vec![
                    file_str.clone(),
                    edit.line.to_string(),
                    edit.before.clone(),
                    edit.after.clone(),
                ]);
            }
        }
    }

    format!("{}\n", table)
}
