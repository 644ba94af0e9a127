//! Import statements found in Python source, with the byte span of every
//! name so they can be rewritten without touching anything around them.

use crate::lexer::{tokenize, Token, TokenKind};

/// Byte range of one identifier in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// A dotted module name such as `home.room.door`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DottedName {
    pub components: Vec<String>,
    pub spans: Vec<Span>,
}

impl DottedName {
    pub fn path(&self) -> String {
        self.components.join(".")
    }

    /// Span covering the first `len` components, dots included
    pub fn prefix_span(&self, len: usize) -> Span {
        Span {
            start: self.spans[0].start,
            end: self.spans[len - 1].end,
        }
    }

    pub fn span(&self) -> Span {
        self.prefix_span(self.spans.len())
    }
}

/// One name after `from X import`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub name: String,
    pub span: Span,
    pub alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportStatement {
    /// `import a.b [as c], d`
    Import { modules: Vec<DottedName> },
    /// `from a.b import c [as d], e` or `from a.b import *` (no members).
    /// Relative imports are never produced.
    From {
        module: DottedName,
        members: Vec<Member>,
        span: Span,
    },
}

struct Parser<'s, 't> {
    tokens: &'t [Token<'s>],
    pos: usize,
}

impl<'s, 't> Parser<'s, 't> {
    fn peek(&self) -> Option<&Token<'s>> {
        self.tokens.get(self.pos)
    }

    fn is_op(&self, op: char) -> bool {
        self.peek().is_some_and(|t| t.kind == TokenKind::Op(op))
    }

    fn is_keyword(&self, word: &str) -> bool {
        self.peek()
            .is_some_and(|t| t.kind == TokenKind::Name && t.text == word)
    }

    fn name(&mut self) -> Option<Token<'s>> {
        let token = *self.peek()?;
        if token.kind != TokenKind::Name {
            return None;
        }
        self.pos += 1;
        Some(token)
    }

    fn dotted_name(&mut self) -> Option<DottedName> {
        let first = self.name()?;
        let mut dotted = DottedName {
            components: vec![first.text.to_string()],
            spans: vec![Span {
                start: first.start,
                end: first.end,
            }],
        };

        while self.is_op('.') {
            self.pos += 1;
            let next = self.name()?;
            dotted.components.push(next.text.to_string());
            dotted.spans.push(Span {
                start: next.start,
                end: next.end,
            });
        }

        Some(dotted)
    }

    fn alias(&mut self) -> Option<Option<String>> {
        if !self.is_keyword("as") {
            return Some(None);
        }
        self.pos += 1;
        self.name().map(|t| Some(t.text.to_string()))
    }

    /// After the `import` keyword
    fn import_statement(&mut self) -> Option<ImportStatement> {
        let mut modules = Vec::new();
        loop {
            modules.push(self.dotted_name()?);
            self.alias()?;
            if !self.is_op(',') {
                break;
            }
            self.pos += 1;
        }
        Some(ImportStatement::Import { modules })
    }

    /// After the `from` keyword
    fn from_statement(&mut self, start: usize) -> Option<ImportStatement> {
        if self.is_op('.') {
            return None;
        }
        let module = self.dotted_name()?;
        if !self.is_keyword("import") {
            return None;
        }
        self.pos += 1;

        let mut members = Vec::new();
        let mut end = self.peek()?.end;

        if self.is_op('*') {
            self.pos += 1;
        } else {
            let parenthesized = self.is_op('(');
            if parenthesized {
                self.pos += 1;
            }
            loop {
                if parenthesized && self.is_op(')') {
                    break;
                }
                let name = self.name()?;
                let alias = self.alias()?;
                end = self.tokens[self.pos - 1].end;
                members.push(Member {
                    name: name.text.to_string(),
                    span: Span {
                        start: name.start,
                        end: name.end,
                    },
                    alias,
                });
                if !self.is_op(',') {
                    break;
                }
                self.pos += 1;
            }
            if parenthesized {
                if !self.is_op(')') {
                    return None;
                }
                end = self.peek()?.end;
                self.pos += 1;
            }
            if members.is_empty() {
                return None;
            }
        }

        Some(ImportStatement::From {
            module,
            members,
            span: Span { start, end },
        })
    }
}

fn is_statement_start(previous: Option<&Token<'_>>) -> bool {
    match previous {
        None => true,
        Some(t) => match t.kind {
            TokenKind::Newline | TokenKind::Op(';') => true,
            // `if TYPE_CHECKING: import x`
            TokenKind::Op(':') => t.depth == 0,
            _ => false,
        },
    }
}

/// Find every absolute import statement in `src`.
///
/// Statements that do not parse (incomplete code, relative imports) are
/// skipped rather than reported.
pub fn find_imports(src: &str) -> Vec<ImportStatement> {
    let tokens = tokenize(src);
    let mut statements = Vec::new();
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
    };

    while let Some(token) = parser.peek().copied() {
        let previous = parser.pos.checked_sub(1).map(|i| &tokens[i]);
        let at_start = is_statement_start(previous);
        parser.pos += 1;

        if token.kind != TokenKind::Name || !at_start {
            continue;
        }

        let statement = match token.text {
            "import" => parser.import_statement(),
            "from" => parser.from_statement(token.start),
            _ => None,
        };
        if let Some(statement) = statement {
            statements.push(statement);
        }
    }

    statements
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module_paths(src: &str) -> Vec<String> {
        find_imports(src)
            .iter()
            .flat_map(|s| match s {
                ImportStatement::Import { modules } => {
                    modules.iter().map(DottedName::path).collect::<Vec<_>>()
                },
                ImportStatement::From { module, .. } => vec![module.path()],
            })
            .collect()
    }

    #[test]
    fn test_plain_imports() {
        assert_eq!(
            module_paths("import os\nimport home.room.door as d, sys\n"),
            vec!["os", "home.room.door", "sys"]
        );
    }

    #[test]
    fn test_from_import_members() {
        let statements = find_imports("from home.room import Door, Window as W\n");
        let ImportStatement::From {
            module, members, ..
        } = &statements[0]
        else {
            panic!("expected from-import");
        };
        assert_eq!(module.path(), "home.room");
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].name, "Door");
        assert_eq!(members[0].alias, None);
        assert_eq!(members[1].name, "Window");
        assert_eq!(members[1].alias.as_deref(), Some("W"));
    }

    #[test]
    fn test_parenthesized_members() {
        let src = "from home.room import (\n    Door,  # front\n    Window,\n)\nx = 1\n";
        let statements = find_imports(src);
        assert_eq!(statements.len(), 1);
        let ImportStatement::From { members, span, .. } = &statements[0] else {
            panic!("expected from-import");
        };
        assert_eq!(members.len(), 2);
        assert!(src[span.start..span.end].ends_with(')'));
    }

    #[test]
    fn test_star_import() {
        let statements = find_imports("from home.room import *\n");
        let ImportStatement::From { members, .. } = &statements[0] else {
            panic!("expected from-import");
        };
        assert!(members.is_empty());
    }

    #[test]
    fn test_relative_imports_skipped() {
        assert!(module_paths("from . import room\nfrom ..home import room\n").is_empty());
    }

    #[test]
    fn test_indented_and_inline_imports() {
        let src = "if TYPE_CHECKING:\n    import home.room\ntry: import a.b\nexcept ImportError: pass\nx = 1; import c\n";
        assert_eq!(module_paths(src), vec!["home.room", "a.b", "c"]);
    }

    #[test]
    fn test_from_in_other_positions_ignored() {
        let src = "def gen():\n    yield from home.room\nraise Error from home.room\n";
        assert!(module_paths(src).is_empty());
    }

    #[test]
    fn test_strings_and_comments_ignored() {
        let src = "doc = \"\"\"\nimport home.room\n\"\"\"\n# from home.room import Door\ns = 'import home.room'\n";
        assert!(module_paths(src).is_empty());
    }

    #[test]
    fn test_spans_point_at_components() {
        let src = "import  home.room\n";
        let statements = find_imports(src);
        let ImportStatement::Import { modules } = &statements[0] else {
            panic!("expected import");
        };
        let span = modules[0].prefix_span(1);
        assert_eq!(&src[span.start..span.end], "home");
        let span = modules[0].span();
        assert_eq!(&src[span.start..span.end], "home.room");
    }

    #[test]
    fn test_incomplete_statement_skipped() {
        assert!(module_paths("import\nfrom home.room\nimport a.\n").is_empty());
    }

    #[test]
    fn test_continuation_lines() {
        assert_eq!(
            module_paths("import a, \\\n    b.c\n"),
            vec!["a", "b.c"]
        );
    }
}
