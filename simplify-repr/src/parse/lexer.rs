//! Tokenizer for the fixture reader.
//!
//! Tracks exact row/column ranges and whether each token is the first one on
//! its line, which the parser uses for indentation-based layout.

use crate::error::{ParseError, ParseResult};
use crate::expr::{Location, Range};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Keyword {
    If,
    Then,
    Else,
    Case,
    Of,
    Let,
    In,
    Type,
    Alias,
    Module,
    Exposing,
    Import,
    As,
    Port,
}

impl Keyword {
    fn from_ident(ident: &str) -> Option<Self> {
        Some(match ident {
            "if" => Self::If,
            "then" => Self::Then,
            "else" => Self::Else,
            "case" => Self::Case,
            "of" => Self::Of,
            "let" => Self::Let,
            "in" => Self::In,
            "type" => Self::Type,
            "alias" => Self::Alias,
            "module" => Self::Module,
            "exposing" => Self::Exposing,
            "import" => Self::Import,
            "as" => Self::As,
            "port" => Self::Port,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    /// `x`, `List.map`
    Lower { module: Vec<String>, name: String },
    /// `Just`, `Maybe.Just`, `Html.Attributes`
    Upper { module: Vec<String>, name: String },
    Keyword(Keyword),
    Int(i64),
    Hex(i64),
    Float(f64),
    Str(String),
    Char(char),
    Operator(String),
    /// `-` written directly against its operand
    Negate,
    /// `.field` written directly after an expression
    DotField(String),
    /// `.field` on its own
    AccessFunction(String),
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Pipe,
    Equals,
    Arrow,
    Colon,
    DotDot,
    Backslash,
    Underscore,
    Eof,
}

impl TokenKind {
    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Lower { module, name } | Self::Upper { module, name } => {
                if module.is_empty() {
                    format!("`{name}`")
                } else {
                    format!("`{}.{name}`", module.join("."))
                }
            }
            Self::Keyword(k) => format!("keyword `{}`", format!("{k:?}").to_lowercase()),
            Self::Int(n) | Self::Hex(n) => format!("number `{n}`"),
            Self::Float(f) => format!("number `{f}`"),
            Self::Str(_) => "string literal".to_string(),
            Self::Char(_) => "char literal".to_string(),
            Self::Operator(op) => format!("operator `{op}`"),
            Self::Negate => "`-`".to_string(),
            Self::DotField(f) | Self::AccessFunction(f) => format!("`.{f}`"),
            Self::LParen => "`(`".to_string(),
            Self::RParen => "`)`".to_string(),
            Self::LBracket => "`[`".to_string(),
            Self::RBracket => "`]`".to_string(),
            Self::LBrace => "`{`".to_string(),
            Self::RBrace => "`}`".to_string(),
            Self::Comma => "`,`".to_string(),
            Self::Pipe => "`|`".to_string(),
            Self::Equals => "`=`".to_string(),
            Self::Arrow => "`->`".to_string(),
            Self::Colon => "`:`".to_string(),
            Self::DotDot => "`..`".to_string(),
            Self::Backslash => "`\\`".to_string(),
            Self::Underscore => "`_`".to_string(),
            Self::Eof => "end of input".to_string(),
        }
    }

    /// Tokens after which a `-` starts a negation rather than a subtraction.
    fn opens_operand(&self) -> bool {
        matches!(
            self,
            Self::LParen
                | Self::LBracket
                | Self::LBrace
                | Self::Comma
                | Self::Operator(_)
                | Self::Negate
                | Self::Equals
                | Self::Arrow
                | Self::Pipe
                | Self::Backslash
                | Self::Keyword(_)
        )
    }

    /// Tokens after which a directly attached `.field` is a record access.
    fn closes_operand(&self) -> bool {
        matches!(
            self,
            Self::Lower { .. } | Self::RParen | Self::RBrace | Self::DotField(_)
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub range: Range,
    /// First token on its row.
    pub line_start: bool,
}

const OPERATOR_CHARS: &str = "+-*/=<>:&|^?%!.";

pub(crate) fn tokenize(source: &str) -> ParseResult<Vec<Token>> {
    Lexer::new(source).run()
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    row: u32,
    column: u32,
    tokens: Vec<Token>,
    row_has_token: bool,
}

impl Lexer {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            row: 1,
            column: 1,
            tokens: Vec::new(),
            row_has_token: false,
        }
    }

    fn location(&self) -> Location {
        Location::new(self.row, self.column)
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.get(self.pos).copied()?;
        self.pos += 1;
        if c == '\n' {
            self.row += 1;
            self.column = 1;
            self.row_has_token = false;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn push(&mut self, kind: TokenKind, start: Location) {
        let line_start = !self.row_has_token;
        self.row_has_token = true;
        self.tokens.push(Token {
            kind,
            range: Range::new(start, self.location()),
            line_start,
        });
    }

    /// The previous token, if it ends exactly where the next one starts.
    fn attached_previous(&self, at: Location) -> Option<&TokenKind> {
        self.tokens
            .last()
            .filter(|t| t.range.end == at)
            .map(|t| &t.kind)
    }

    fn run(mut self) -> ParseResult<Vec<Token>> {
        while let Some(c) = self.peek_at(0) {
            let start = self.location();
            match c {
                ' ' | '\t' | '\r' | '\n' => {
                    self.bump();
                }
                '-' if self.peek_at(1) == Some('-') => self.line_comment(),
                '{' if self.peek_at(1) == Some('-') => self.block_comment(start)?,
                '(' => self.single(TokenKind::LParen, start),
                ')' => self.single(TokenKind::RParen, start),
                '[' => self.single(TokenKind::LBracket, start),
                ']' => self.single(TokenKind::RBracket, start),
                '{' => self.single(TokenKind::LBrace, start),
                '}' => self.single(TokenKind::RBrace, start),
                ',' => self.single(TokenKind::Comma, start),
                '\\' => self.single(TokenKind::Backslash, start),
                '"' => self.string(start)?,
                '\'' => self.char_literal(start)?,
                '.' => self.dot(start)?,
                c if c.is_ascii_digit() => self.number(start)?,
                c if c.is_alphabetic() || c == '_' => self.identifier(start),
                c if OPERATOR_CHARS.contains(c) => self.operator(start),
                other => {
                    return Err(ParseError::InvalidCharacter {
                        location: start,
                        found: other,
                    })
                }
            }
        }
        let end = self.location();
        self.tokens.push(Token {
            kind: TokenKind::Eof,
            range: Range::point(end),
            line_start: true,
        });
        Ok(self.tokens)
    }

    fn single(&mut self, kind: TokenKind, start: Location) {
        self.bump();
        self.push(kind, start);
    }

    fn line_comment(&mut self) {
        while let Some(c) = self.peek_at(0) {
            if c == '\n' {
                break;
            }
            self.bump();
        }
    }

    fn block_comment(&mut self, start: Location) -> ParseResult<()> {
        let mut depth = 0usize;
        loop {
            match (self.peek_at(0), self.peek_at(1)) {
                (Some('{'), Some('-')) => {
                    depth += 1;
                    self.bump();
                    self.bump();
                }
                (Some('-'), Some('}')) => {
                    depth -= 1;
                    self.bump();
                    self.bump();
                    if depth == 0 {
                        return Ok(());
                    }
                }
                (Some(_), _) => {
                    self.bump();
                }
                (None, _) => return Err(ParseError::UnterminatedComment { location: start }),
            }
        }
    }

    fn read_word(&mut self) -> String {
        let mut word = String::new();
        while let Some(c) = self.peek_at(0) {
            if c.is_alphanumeric() || c == '_' {
                word.push(c);
                self.bump();
            } else {
                break;
            }
        }
        word
    }

    fn identifier(&mut self, start: Location) {
        let first = self.read_word();
        if first == "_" {
            self.push(TokenKind::Underscore, start);
            return;
        }
        if !first.starts_with(|c: char| c.is_uppercase()) {
            let kind = match Keyword::from_ident(&first) {
                Some(keyword) => TokenKind::Keyword(keyword),
                None => TokenKind::Lower {
                    module: Vec::new(),
                    name: first,
                },
            };
            self.push(kind, start);
            return;
        }

        let mut segments = vec![first];
        loop {
            match (self.peek_at(0), self.peek_at(1)) {
                (Some('.'), Some(c)) if c.is_uppercase() => {
                    self.bump();
                    segments.push(self.read_word());
                }
                (Some('.'), Some(c)) if c.is_lowercase() => {
                    self.bump();
                    let name = self.read_word();
                    self.push(
                        TokenKind::Lower {
                            module: segments,
                            name,
                        },
                        start,
                    );
                    return;
                }
                _ => break,
            }
        }
        let name = segments.pop().unwrap_or_default();
        self.push(
            TokenKind::Upper {
                module: segments,
                name,
            },
            start,
        );
    }

    fn dot(&mut self, start: Location) -> ParseResult<()> {
        match self.peek_at(1) {
            Some('.') => {
                self.bump();
                self.bump();
                self.push(TokenKind::DotDot, start);
            }
            Some(c) if c.is_lowercase() => {
                let attached = self
                    .attached_previous(start)
                    .is_some_and(TokenKind::closes_operand);
                self.bump();
                let field = self.read_word();
                let kind = if attached {
                    TokenKind::DotField(field)
                } else {
                    TokenKind::AccessFunction(field)
                };
                self.push(kind, start);
            }
            _ => {
                return Err(ParseError::InvalidCharacter {
                    location: start,
                    found: '.',
                })
            }
        }
        Ok(())
    }

    fn operator(&mut self, start: Location) {
        let negation_context = self
            .attached_previous(start)
            .map_or(true, TokenKind::opens_operand);

        let mut op = String::new();
        while let Some(c) = self.peek_at(0) {
            if OPERATOR_CHARS.contains(c) && !(c == '.' && op.is_empty()) {
                op.push(c);
                self.bump();
            } else {
                break;
            }
        }

        let kind = match op.as_str() {
            "=" => TokenKind::Equals,
            "|" => TokenKind::Pipe,
            "->" => TokenKind::Arrow,
            ":" => TokenKind::Colon,
            "-" if negation_context
                && self
                    .peek_at(0)
                    .is_some_and(|c| !c.is_whitespace() && c != ')') =>
            {
                TokenKind::Negate
            }
            _ => TokenKind::Operator(op),
        };
        self.push(kind, start);
    }

    fn number(&mut self, start: Location) -> ParseResult<()> {
        if self.peek_at(0) == Some('0') && matches!(self.peek_at(1), Some('x' | 'X')) {
            self.bump();
            self.bump();
            let digits = self.read_word();
            let value = i64::from_str_radix(&digits, 16).map_err(|_| ParseError::InvalidNumber {
                location: start,
                text: format!("0x{digits}"),
            })?;
            self.push(TokenKind::Hex(value), start);
            return Ok(());
        }

        let mut text = String::new();
        let mut is_float = false;
        while let Some(c) = self.peek_at(0) {
            if c.is_ascii_digit() {
                text.push(c);
                self.bump();
            } else if c == '.' && !is_float && self.peek_at(1).is_some_and(|d| d.is_ascii_digit()) {
                is_float = true;
                text.push(c);
                self.bump();
            } else if matches!(c, 'e' | 'E') {
                is_float = true;
                text.push(c);
                self.bump();
                if let Some(sign @ ('+' | '-')) = self.peek_at(0) {
                    text.push(sign);
                    self.bump();
                }
            } else {
                break;
            }
        }

        let invalid = || ParseError::InvalidNumber {
            location: start,
            text: text.clone(),
        };
        let kind = if is_float {
            TokenKind::Float(text.parse().map_err(|_| invalid())?)
        } else {
            TokenKind::Int(text.parse().map_err(|_| invalid())?)
        };
        self.push(kind, start);
        Ok(())
    }

    fn escape(&mut self, start: Location) -> ParseResult<char> {
        let unterminated = ParseError::UnterminatedLiteral { location: start };
        match self.bump() {
            Some('n') => Ok('\n'),
            Some('t') => Ok('\t'),
            Some('r') => Ok('\r'),
            Some('u') => {
                if self.bump() != Some('{') {
                    return Err(unterminated);
                }
                let mut hex = String::new();
                loop {
                    match self.bump() {
                        Some('}') => break,
                        Some(c) => hex.push(c),
                        None => return Err(unterminated),
                    }
                }
                u32::from_str_radix(&hex, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or(unterminated)
            }
            Some(c) => Ok(c),
            None => Err(unterminated),
        }
    }

    fn string(&mut self, start: Location) -> ParseResult<()> {
        let triple = self.peek_at(1) == Some('"') && self.peek_at(2) == Some('"');
        let quotes = if triple { 3 } else { 1 };
        for _ in 0..quotes {
            self.bump();
        }

        let mut value = String::new();
        loop {
            match self.peek_at(0) {
                None => return Err(ParseError::UnterminatedLiteral { location: start }),
                Some('\n') if !triple => {
                    return Err(ParseError::UnterminatedLiteral { location: start })
                }
                Some('"')
                    if !triple
                        || (self.peek_at(1) == Some('"') && self.peek_at(2) == Some('"')) =>
                {
                    for _ in 0..quotes {
                        self.bump();
                    }
                    break;
                }
                Some('\\') => {
                    self.bump();
                    value.push(self.escape(start)?);
                }
                Some(c) => {
                    value.push(c);
                    self.bump();
                }
            }
        }
        self.push(TokenKind::Str(value), start);
        Ok(())
    }

    fn char_literal(&mut self, start: Location) -> ParseResult<()> {
        self.bump();
        let value = match self.bump() {
            Some('\\') => self.escape(start)?,
            Some(c) if c != '\n' => c,
            _ => return Err(ParseError::UnterminatedLiteral { location: start }),
        };
        if self.bump() != Some('\'') {
            return Err(ParseError::UnterminatedLiteral { location: start });
        }
        self.push(TokenKind::Char(value), start);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .filter(|k| *k != TokenKind::Eof)
            .collect()
    }

    fn lower(name: &str) -> TokenKind {
        TokenKind::Lower {
            module: vec![],
            name: name.to_string(),
        }
    }

    // =========================================================================
    // Names
    // =========================================================================

    #[test]
    fn test_qualified_names() {
        assert_eq!(
            kinds("List.map Maybe.Just Html.Attributes"),
            vec![
                TokenKind::Lower {
                    module: vec!["List".into()],
                    name: "map".into()
                },
                TokenKind::Upper {
                    module: vec!["Maybe".into()],
                    name: "Just".into()
                },
                TokenKind::Upper {
                    module: vec!["Html".into()],
                    name: "Attributes".into()
                },
            ]
        );
    }

    #[test]
    fn test_record_access_versus_access_function() {
        assert_eq!(
            kinds("r.a .b"),
            vec![
                lower("r"),
                TokenKind::DotField("a".into()),
                TokenKind::AccessFunction("b".into())
            ]
        );
    }

    #[test]
    fn test_keywords_and_wildcard() {
        assert_eq!(
            kinds("case x of _"),
            vec![
                TokenKind::Keyword(Keyword::Case),
                lower("x"),
                TokenKind::Keyword(Keyword::Of),
                TokenKind::Underscore
            ]
        );
    }

    // =========================================================================
    // Operators and negation
    // =========================================================================

    #[test]
    fn test_minus_forms() {
        assert_eq!(
            kinds("a - b"),
            vec![lower("a"), TokenKind::Operator("-".into()), lower("b")]
        );
        assert_eq!(kinds("f -1"), vec![lower("f"), TokenKind::Negate, TokenKind::Int(1)]);
        assert_eq!(
            kinds("a-b"),
            vec![lower("a"), TokenKind::Operator("-".into()), lower("b")]
        );
        assert_eq!(
            kinds("(-)"),
            vec![TokenKind::LParen, TokenKind::Operator("-".into()), TokenKind::RParen]
        );
    }

    #[test]
    fn test_punctuation_operators() {
        assert_eq!(
            kinds("= | -> : .. |> :: ++"),
            vec![
                TokenKind::Equals,
                TokenKind::Pipe,
                TokenKind::Arrow,
                TokenKind::Colon,
                TokenKind::DotDot,
                TokenKind::Operator("|>".into()),
                TokenKind::Operator("::".into()),
                TokenKind::Operator("++".into()),
            ]
        );
    }

    // =========================================================================
    // Literals and comments
    // =========================================================================

    #[test]
    fn test_literals() {
        assert_eq!(
            kinds(r#"1 0x1F 2.5 "a\"b" 'c'"#),
            vec![
                TokenKind::Int(1),
                TokenKind::Hex(31),
                TokenKind::Float(2.5),
                TokenKind::Str("a\"b".into()),
                TokenKind::Char('c'),
            ]
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            kinds("a -- trailing\n{- block {- nested -} -} b"),
            vec![lower("a"), lower("b")]
        );
    }

    #[test]
    fn test_unterminated_comment() {
        assert!(matches!(
            tokenize("{- open"),
            Err(ParseError::UnterminatedComment { .. })
        ));
    }

    // =========================================================================
    // Positions
    // =========================================================================

    #[test]
    fn test_ranges_and_line_start() {
        let tokens = tokenize("a =\n    b").unwrap();
        assert_eq!(tokens[0].range, Range::from_coords(1, 1, 1, 2));
        assert!(tokens[0].line_start);
        assert!(!tokens[1].line_start);
        assert_eq!(tokens[2].range, Range::from_coords(2, 5, 2, 6));
        assert!(tokens[2].line_start);
    }
}
