//! Just enough of a Python tokenizer to find import statements.
//!
//! String literals and comments are consumed whole so their contents never
//! look like code. Newlines inside brackets and after a backslash
//! continuation are not statement boundaries, matching Python's logical
//! lines.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier or keyword
    Name,
    /// Single punctuation character
    Op(char),
    /// String literal, including prefix and quotes
    Str,
    /// Numbers and anything else the import parser never looks at
    Other,
    /// End of a logical line
    Newline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
    /// Bracket nesting depth the token starts at
    pub depth: usize,
}

const STRING_PREFIXES: &[&str] = &[
    "r", "u", "b", "f", "t", "br", "rb", "fr", "rf", "tr", "rt",
];

fn is_name_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_name_continue(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
    tokens: Vec<Token<'a>>,
}

impl<'a> Lexer<'a> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.src.get(self.pos + offset..)?.chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn push(&mut self, kind: TokenKind, start: usize) {
        self.tokens.push(Token {
            kind,
            text: &self.src[start..self.pos],
            start,
            end: self.pos,
            depth: self.depth,
        });
    }

    fn newline(&mut self, start: usize) {
        let already_ended = self
            .tokens
            .last()
            .map_or(true, |t| t.kind == TokenKind::Newline);
        if self.depth == 0 && !already_ended {
            self.push(TokenKind::Newline, start);
        }
    }

    fn skip_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' || c == '\r' {
                break;
            }
            self.bump();
        }
    }

    /// Consume a string body; `pos` is at the opening quote
    fn string_body(&mut self) {
        let Some(quote) = self.bump() else {
            return;
        };
        let triple = self.peek() == Some(quote) && self.peek_at(1) == Some(quote);
        if triple {
            self.bump();
            self.bump();
        }

        while let Some(c) = self.peek() {
            // Unterminated single-line string: leave the newline for the caller
            if !triple && (c == '\n' || c == '\r') {
                return;
            }
            self.bump();
            match c {
                '\\' => {
                    if self.bump() == Some('\r') && self.peek() == Some('\n') {
                        self.bump();
                    }
                },
                c if c == quote => {
                    if !triple {
                        return;
                    }
                    if self.peek() == Some(quote) && self.peek_at(1) == Some(quote) {
                        self.bump();
                        self.bump();
                        return;
                    }
                },
                _ => {},
            }
        }
    }

    fn name_or_prefixed_string(&mut self, start: usize) {
        while self.peek().is_some_and(is_name_continue) {
            self.bump();
        }

        let word = &self.src[start..self.pos];
        let quoted = matches!(self.peek(), Some('\'' | '"'));
        if quoted && STRING_PREFIXES.contains(&word.to_ascii_lowercase().as_str()) {
            self.string_body();
            self.push(TokenKind::Str, start);
        } else {
            self.push(TokenKind::Name, start);
        }
    }

    fn run(mut self) -> Vec<Token<'a>> {
        while let Some(c) = self.peek() {
            let start = self.pos;
            match c {
                '\n' => {
                    self.bump();
                    self.newline(start);
                },
                '\r' => {
                    self.bump();
                    if self.peek() == Some('\n') {
                        self.bump();
                    }
                    self.newline(start);
                },
                '#' => self.skip_comment(),
                '\\' => {
                    self.bump();
                    // Line continuation joins the next physical line
                    if self.peek() == Some('\r') {
                        self.bump();
                    }
                    if self.peek() == Some('\n') {
                        self.bump();
                    }
                },
                '\'' | '"' => {
                    self.string_body();
                    self.push(TokenKind::Str, start);
                },
                // Byte order mark counts as whitespace
                c if c.is_whitespace() || c == '\u{feff}' => {
                    self.bump();
                },
                c if is_name_start(c) => self.name_or_prefixed_string(start),
                c if c.is_ascii_digit() => {
                    while self.peek().is_some_and(is_name_continue) {
                        self.bump();
                    }
                    self.push(TokenKind::Other, start);
                },
                '(' | '[' | '{' => {
                    self.bump();
                    self.push(TokenKind::Op(c), start);
                    self.depth += 1;
                },
                ')' | ']' | '}' => {
                    self.bump();
                    self.depth = self.depth.saturating_sub(1);
                    self.push(TokenKind::Op(c), start);
                },
                _ => {
                    self.bump();
                    self.push(TokenKind::Op(c), start);
                },
            }
        }

        self.tokens
    }
}

/// Tokenize Python source. Never fails: unterminated strings end at the end
/// of their line (or of the file for triple-quoted ones).
pub fn tokenize(src: &str) -> Vec<Token<'_>> {
    Lexer {
        src,
        pos: 0,
        depth: 0,
        tokens: Vec::new(),
    }
    .run()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<(TokenKind, &str)> {
        tokenize(src).iter().map(|t| (t.kind, t.text)).collect()
    }

    #[test]
    fn test_simple_import() {
        assert_eq!(
            kinds("import home.room\n"),
            vec![
                (TokenKind::Name, "import"),
                (TokenKind::Name, "home"),
                (TokenKind::Op('.'), "."),
                (TokenKind::Name, "room"),
                (TokenKind::Newline, "\n"),
            ]
        );
    }

    #[test]
    fn test_strings_are_opaque() {
        let tokens = kinds("x = 'import a' + \"from b import c\"\n");
        let names: Vec<_> = tokens
            .iter()
            .filter(|(k, _)| *k == TokenKind::Name)
            .map(|(_, t)| *t)
            .collect();
        assert_eq!(names, vec!["x"]);
    }

    #[test]
    fn test_triple_quoted_docstring() {
        let src = "\"\"\"Module doc.\n\nimport home.room\n\"\"\"\nimport os\n";
        let tokens = tokenize(src);
        assert_eq!(tokens[0].kind, TokenKind::Str);
        assert!(tokens[0].text.ends_with("\"\"\""));
        let names: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Name)
            .map(|t| t.text)
            .collect();
        assert_eq!(names, vec!["import", "os"]);
    }

    #[test]
    fn test_prefixed_strings() {
        let tokens = kinds("rb'import x' f\"{y}\" Rb'''z'''\n");
        assert_eq!(tokens[0], (TokenKind::Str, "rb'import x'"));
        assert_eq!(tokens[1], (TokenKind::Str, "f\"{y}\""));
        assert_eq!(tokens[2], (TokenKind::Str, "Rb'''z'''"));
    }

    #[test]
    fn test_escaped_quotes() {
        let tokens = kinds(r#"s = "a \" import b" ; import c"#);
        assert_eq!(tokens[2].0, TokenKind::Str);
        assert_eq!(tokens[3], (TokenKind::Op(';'), ";"));
        assert_eq!(tokens[4], (TokenKind::Name, "import"));
    }

    #[test]
    fn test_comments_skipped() {
        let tokens = kinds("# import home.room\nimport os  # from x import y\n");
        let names: Vec<_> = tokens
            .iter()
            .filter(|(k, _)| *k == TokenKind::Name)
            .map(|(_, t)| *t)
            .collect();
        assert_eq!(names, vec!["import", "os"]);
    }

    #[test]
    fn test_newlines_inside_brackets_are_not_boundaries() {
        let tokens = tokenize("from a import (\n    b,\n    c,\n)\n");
        let newlines = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Newline)
            .count();
        assert_eq!(newlines, 1);
        let b = tokens.iter().find(|t| t.text == "b").unwrap();
        assert_eq!(b.depth, 1);
    }

    #[test]
    fn test_backslash_continuation() {
        let tokens = tokenize("import a, \\\n    b\n");
        let newlines = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Newline)
            .count();
        assert_eq!(newlines, 1);
    }

    #[test]
    fn test_crlf_line_endings() {
        let tokens = kinds("import a\r\nimport b\r\n");
        assert_eq!(tokens[1], (TokenKind::Name, "a"));
        assert_eq!(tokens[2], (TokenKind::Newline, "\r\n"));
        assert_eq!(tokens[3], (TokenKind::Name, "import"));
    }

    #[test]
    fn test_unicode_identifiers_and_offsets() {
        let src = "import café.menu\n";
        let tokens = tokenize(src);
        let cafe = tokens[1];
        assert_eq!(cafe.text, "café");
        assert_eq!(&src[cafe.start..cafe.end], "café");
    }

    #[test]
    fn test_byte_order_mark() {
        let tokens = kinds("\u{feff}import os\n");
        assert_eq!(tokens[0], (TokenKind::Name, "import"));
    }

    #[test]
    fn test_unterminated_string_stops_at_line_end() {
        let tokens = kinds("x = 'oops\nimport os\n");
        assert_eq!(tokens[2], (TokenKind::Str, "'oops"));
        assert_eq!(tokens[3], (TokenKind::Newline, "\n"));
        assert_eq!(tokens[4], (TokenKind::Name, "import"));
    }
}
