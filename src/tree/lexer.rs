//! Lexer for Penn Treebank bracket notation.
//!
//! Splits on whitespace, with `(` and `)` always standing alone even when
//! they abut other characters. There is no quoting or escaping: anything
//! else is an opaque atom.

/// Byte-level source span for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        (span.start, span.len()).into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind<'a> {
    Open,
    Close,
    Atom(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub span: Span,
}

/// Strip line breaks the way parser output is joined before lexing.
///
/// Breaks are removed, not replaced by spaces; pretty-printed parser output
/// always puts a bracket on one side of a break.
pub fn normalize(text: &str) -> String {
    text.chars().filter(|&c| c != '\n' && c != '\r').collect()
}

/// Streaming tokenizer over normalized text.
pub struct Lexer<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let rest = &self.text[self.pos..];
        let skipped = rest.len() - rest.trim_start().len();
        let start = self.pos + skipped;
        let rest = &self.text[start..];

        let first = rest.chars().next()?;
        let (kind, end) = match first {
            '(' => (TokenKind::Open, start + 1),
            ')' => (TokenKind::Close, start + 1),
            _ => {
                let len = rest
                    .find(|c: char| c == '(' || c == ')' || c.is_whitespace())
                    .unwrap_or(rest.len());
                (TokenKind::Atom(&rest[..len]), start + len)
            }
        };
        self.pos = end;
        Some(Token {
            kind,
            span: Span { start, end },
        })
    }
}
