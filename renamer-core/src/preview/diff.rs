use super::display_path;
use crate::output::{FileChange, RenameResult};
use nu_ansi_term::{Color as AnsiColor, Style};
use similar::{ChangeTag, TextDiff};
use std::fmt::Write;

fn paint_line(sign: &str, line: &str, tag: ChangeTag, use_color: bool) -> String {
    let text = format!("{}{}", sign, line);
    if !use_color {
        return text;
    }
    match tag {
        ChangeTag::Delete => AnsiColor::Red.paint(text).to_string(),
        ChangeTag::Insert => AnsiColor::Green.paint(text).to_string(),
        ChangeTag::Equal => text,
    }
}

fn render_file(output: &mut String, change: &FileChange, use_color: bool) {
    let file_str = display_path(&change.path);
    let header = format!("--- {}\n+++ {}\n", file_str, file_str);
    if use_color {
        write!(output, "{}", Style::new().bold().paint(header)).unwrap();
    } else {
        output.push_str(&header);
    }

    let diff = TextDiff::from_lines(&change.original, &change.rewritten);
    for group in diff.grouped_ops(1) {
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            continue;
        };
        let old_start = first.old_range().start + 1;
        let old_len = last.old_range().end - first.old_range().start;
        let new_start = first.new_range().start + 1;
        let new_len = last.new_range().end - first.new_range().start;
        let hunk_header = format!(
            "@@ -{},{} +{},{} @@",
            old_start, old_len, new_start, new_len
        );
        if use_color {
            writeln!(output, "{}", AnsiColor::Blue.paint(hunk_header)).unwrap();
        } else {
            writeln!(output, "{}", hunk_header).unwrap();
        }

        for op in &group {
            for change in diff.iter_changes(op) {
                let sign = match change.tag() {
                    ChangeTag::Delete => "-",
                    ChangeTag::Insert => "+",
                    ChangeTag::Equal => " ",
                };
                let line = change.value().trim_end_matches(['\n', '\r']);
                writeln!(output, "{}", paint_line(sign, line, change.tag(), use_color)).unwrap();
            }
        }
    }
}

/// Render changed files as unified diffs, files in path order
pub fn render_diff(result: &RenameResult, use_color: bool) -> String {
    let mut output = String::new();

    let mut changes: Vec<&FileChange> = result.changes.iter().collect();
    changes.sort_by(|a, b| a.path.cmp(&b.path));

    for change in changes {
        render_file(&mut output, change, use_color);
    }

    output
}
