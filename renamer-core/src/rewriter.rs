//! Rewrite the import statements of one source text.

use crate::imports::{find_imports, DottedName, ImportStatement, Member, Span};
use crate::rules::RenameRules;
use serde::{Deserialize, Serialize};

/// One substitution inside a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportEdit {
    /// 1-based line of the edit
    pub line: usize,
    /// 0-based byte column of the edit
    pub column: usize,
    pub start: usize,
    pub end: usize,
    pub before: String,
    pub after: String,
}

/// A `from X import ...` whose members moved to different places
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedImport {
    pub line: usize,
    pub statement: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct SourceRewrite {
    pub edits: Vec<ImportEdit>,
    pub unresolved: Vec<UnresolvedImport>,
    /// New text, present only when at least one edit applies
    pub content: Option<String>,
}

impl SourceRewrite {
    pub fn is_changed(&self) -> bool {
        self.content.is_some()
    }
}

struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(src: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(src.match_indices('\n').map(|(i, _)| i + 1));
        Self { starts }
    }

    /// (1-based line, 0-based byte column)
    fn position(&self, offset: usize) -> (usize, usize) {
        let line = self.starts.partition_point(|&start| start <= offset);
        (line, offset - self.starts[line - 1])
    }
}

struct EditSet<'s> {
    src: &'s str,
    lines: LineIndex,
    edits: Vec<ImportEdit>,
}

impl<'s> EditSet<'s> {
    fn push(&mut self, span: Span, after: String) {
        let before = &self.src[span.start..span.end];
        if before == after {
            return;
        }
        let (line, column) = self.lines.position(span.start);
        self.edits.push(ImportEdit {
            line,
            column,
            start: span.start,
            end: span.end,
            before: before.to_string(),
            after,
        });
    }

    /// Rewrite the leading components of `name` that a rule covers.
    /// Returns true if a rule applied.
    fn module(&mut self, name: &DottedName, rules: &RenameRules) -> bool {
        match rules.lookup(name.components.as_slice()) {
            Some(rule) => {
                self.push(name.prefix_span(rule.len), rule.new.to_string());
                true
            },
            None => false,
        }
    }
}

fn split_parent(path: &str) -> Option<(&str, &str)> {
    path.rsplit_once('.')
}

/// `from home import room` where `home.room` itself moved
fn rewrite_members(
    edits: &mut EditSet<'_>,
    module: &DottedName,
    members: &[Member],
    span: Span,
    rules: &RenameRules,
) -> Option<UnresolvedImport> {
    let base = module.path();
    let moved: Vec<(&Member, &str)> = members
        .iter()
        .filter_map(|m| {
            rules
                .exact(&format!("{}.{}", base, m.name))
                .map(|new| (m, new))
        })
        .collect();

    if moved.is_empty() {
        return None;
    }

    let unresolved = |reason: String| {
        let (line, _) = edits.lines.position(span.start);
        Some(UnresolvedImport {
            line,
            statement: edits.src[span.start..span.end].to_string(),
            reason,
        })
    };

    if moved.len() != members.len() {
        return unresolved(format!(
            "only some names imported from '{}' moved; split the statement by hand",
            base
        ));
    }

    let mut parent = None;
    for (_, new) in &moved {
        let Some((new_parent, _)) = split_parent(new) else {
            return unresolved(format!(
                "'{}' became top-level module '{}'; use `import {}` instead",
                base, new, new
            ));
        };
        match parent {
            None => parent = Some(new_parent),
            Some(p) if p == new_parent => {},
            Some(_) => {
                return unresolved(format!(
                    "names imported from '{}' moved to different packages",
                    base
                ))
            },
        }
    }
    let parent = parent?;

    edits.push(module.span(), parent.to_string());
    for (member, new) in moved {
        let Some((_, new_name)) = split_parent(new) else {
            continue;
        };
        let replacement = if member.alias.is_some() || new_name == member.name {
            new_name.to_string()
        } else {
            // Keep the name the rest of the file uses
            format!("{} as {}", new_name, member.name)
        };
        edits.push(member.span, replacement);
    }

    None
}

/// Compute and apply every import rewrite for `src`.
///
/// Each import reference is rewritten at most once, so rules never chain
/// within a single pass.
pub fn rewrite_source(src: &str, rules: &RenameRules) -> SourceRewrite {
    if rules.is_empty() {
        return SourceRewrite::default();
    }

    let mut edits = EditSet {
        src,
        lines: LineIndex::new(src),
        edits: Vec::new(),
    };
    let mut unresolved = Vec::new();

    for statement in find_imports(src) {
        match statement {
            ImportStatement::Import { modules } => {
                for module in &modules {
                    edits.module(module, rules);
                }
            },
            ImportStatement::From {
                module,
                members,
                span,
            } => {
                if edits.module(&module, rules) {
                    continue;
                }
                if let Some(problem) = rewrite_members(&mut edits, &module, &members, span, rules)
                {
                    unresolved.push(problem);
                }
            },
        }
    }

    let mut edits = edits.edits;
    if edits.is_empty() {
        return SourceRewrite {
            edits,
            unresolved,
            content: None,
        };
    }

    edits.sort_by_key(|e| e.start);
    let mut content = src.to_string();
    for edit in edits.iter().rev() {
        content.replace_range(edit.start..edit.end, &edit.after);
    }

    SourceRewrite {
        edits,
        unresolved,
        content: Some(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rename_list::{RenameList, RenamePair};

    fn rules(pairs: &[(&str, &str)]) -> RenameRules {
        RenameRules::new(&RenameList::new(
            pairs.iter().map(|(o, n)| RenamePair::new(*o, *n)).collect(),
        ))
    }

    fn rewrite(src: &str, pairs: &[(&str, &str)]) -> String {
        rewrite_source(src, &rules(pairs))
            .content
            .unwrap_or_else(|| src.to_string())
    }

    const ROOM: &[(&str, &str)] = &[("home.room", "home.basic_material")];

    #[test]
    fn test_from_import_module() {
        assert_eq!(
            rewrite("from home.room import Door\n", ROOM),
            "from home.basic_material import Door\n"
        );
    }

    #[test]
    fn test_import_submodule_keeps_remainder() {
        assert_eq!(
            rewrite("import home.room.door\n", ROOM),
            "import home.basic_material.door\n"
        );
    }

    #[test]
    fn test_no_partial_component_match() {
        let src = "import home.room.door\nfrom home.roommate import Bob\n";
        assert_eq!(rewrite(src, &[("home.roo", "x")]), src);
        assert!(rewrite_source(src, &rules(ROOM)).edits.len() == 1);
    }

    #[test]
    fn test_alias_preserved() {
        assert_eq!(
            rewrite("import home.room as r, os\n", ROOM),
            "import home.basic_material as r, os\n"
        );
    }

    #[test]
    fn test_unrelated_code_untouched() {
        let src = "x = home.room.Door()  # home.room\nprint('import home.room')\n";
        let result = rewrite_source(src, &rules(ROOM));
        assert!(!result.is_changed());
        assert!(result.edits.is_empty());
    }

    #[test]
    fn test_parenthesized_from_import() {
        let src = "from home.room import (\n    Door,\n    Window,\n)\n";
        assert_eq!(
            rewrite(src, ROOM),
            "from home.basic_material import (\n    Door,\n    Window,\n)\n"
        );
    }

    #[test]
    fn test_edit_positions() {
        let src = "import os\n\nfrom home.room import Door\n";
        let result = rewrite_source(src, &rules(ROOM));
        assert_eq!(result.edits.len(), 1);
        let edit = &result.edits[0];
        assert_eq!(edit.line, 3);
        assert_eq!(edit.column, 5);
        assert_eq!(edit.before, "home.room");
        assert_eq!(edit.after, "home.basic_material");
    }

    #[test]
    fn test_swap_rewrites_each_reference_once() {
        let src = "import a.x\nimport b.x\n";
        assert_eq!(
            rewrite(src, &[("a", "b"), ("b", "a")]),
            "import b.x\nimport a.x\n"
        );
    }

    #[test]
    fn test_member_import_keeps_binding() {
        assert_eq!(
            rewrite("from home import room\n", ROOM),
            "from home import basic_material as room\n"
        );
        assert_eq!(
            rewrite("from home import room as r\n", ROOM),
            "from home import basic_material as r\n"
        );
    }

    #[test]
    fn test_member_import_moved_to_other_package() {
        assert_eq!(
            rewrite("from home import room\n", &[("home.room", "house.room")]),
            "from house import room\n"
        );
    }

    #[test]
    fn test_member_import_partially_moved_is_unresolved() {
        let src = "from home import room, garden\n";
        let result = rewrite_source(src, &rules(ROOM));
        assert!(!result.is_changed());
        assert_eq!(result.unresolved.len(), 1);
        assert_eq!(result.unresolved[0].line, 1);
        assert_eq!(result.unresolved[0].statement, "from home import room, garden");
    }

    #[test]
    fn test_member_import_to_top_level_is_unresolved() {
        let result = rewrite_source("from home import room\n", &rules(&[("home.room", "room")]));
        assert!(!result.is_changed());
        assert_eq!(result.unresolved.len(), 1);
    }

    #[test]
    fn test_module_rule_beats_member_rule() {
        let src = "from home.room import door\n";
        assert_eq!(
            rewrite(
                src,
                &[("home.room", "home.basic_material"), ("home.room.door", "portal.door")]
            ),
            "from home.basic_material import door\n"
        );
    }

    #[test]
    fn test_relative_import_untouched() {
        let src = "from .room import Door\nfrom . import room\n";
        assert_eq!(rewrite(src, ROOM), src);
    }

    #[test]
    fn test_crlf_preserved() {
        assert_eq!(
            rewrite("import home.room\r\nimport os\r\n", ROOM),
            "import home.basic_material\r\nimport os\r\n"
        );
    }

    #[test]
    fn test_multiple_statements() {
        let src = "import home.room\nimport home.room.door as d\nfrom home.room.window import Pane\n";
        let result = rewrite_source(src, &rules(ROOM));
        assert_eq!(result.edits.len(), 3);
        assert_eq!(
            result.content.unwrap(),
            "import home.basic_material\nimport home.basic_material.door as d\nfrom home.basic_material.window import Pane\n"
        );
    }
}
