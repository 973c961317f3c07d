//! Byte-offset tokenizer for Doris SQL text.

use super::{Keyword, Span, Token, TokenKind};
use crate::dialect::{Dialect, DorisDialect};

/// Operators and punctuation that are always one character long.
fn single_char(c: char) -> Option<TokenKind> {
    Some(match c {
        '(' => TokenKind::LeftParen,
        ')' => TokenKind::RightParen,
        '[' => TokenKind::LeftBracket,
        ']' => TokenKind::RightBracket,
        '{' => TokenKind::LeftBrace,
        '}' => TokenKind::RightBrace,
        ',' => TokenKind::Comma,
        ';' => TokenKind::Semicolon,
        '+' => TokenKind::Plus,
        '*' => TokenKind::Star,
        '/' => TokenKind::Slash,
        '%' => TokenKind::Percent,
        '~' => TokenKind::BitNot,
        '^' => TokenKind::BitXor,
        '&' => TokenKind::BitAnd,
        '?' => TokenKind::Question,
        '@' => TokenKind::At,
        '.' => TokenKind::Dot,
        _ => return None,
    })
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Splits SQL text into [`Token`]s.
///
/// Whitespace, `--` comments and `/* */` comments (hints included) are
/// skipped. Malformed input yields [`TokenKind::Error`] tokens rather than
/// stopping the scan.
pub struct Lexer<'a> {
    src: &'a str,
    cursor: usize,
    token_start: usize,
    /// `"..."` is a string rather than an identifier.
    double_quoted_strings: bool,
    backslash_escapes: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer with Doris quoting rules.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::with_dialect(input, &DorisDialect)
    }

    /// Creates a lexer following the quoting rules of `dialect`.
    #[must_use]
    pub fn with_dialect(input: &'a str, dialect: &dyn Dialect) -> Self {
        Self {
            src: input,
            cursor: 0,
            token_start: 0,
            double_quoted_strings: dialect.double_quoted_strings(),
            backslash_escapes: dialect.backslash_escapes(),
        }
    }

    fn rest(&self) -> &'a str {
        self.src.get(self.cursor..).unwrap_or_default()
    }

    fn lookahead(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.lookahead(0)?;
        self.cursor += c.len_utf8();
        Some(c)
    }

    fn bump_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.lookahead(0).is_some_and(&pred) {
            self.bump();
        }
    }

    /// Consumes `expected` if it comes next.
    fn eat(&mut self, expected: char) -> bool {
        let matched = self.lookahead(0) == Some(expected);
        if matched {
            self.cursor += expected.len_utf8();
        }
        matched
    }

    fn starts_with(&self, pair: &str) -> bool {
        self.rest().starts_with(pair)
    }

    fn lexeme(&self) -> &'a str {
        self.src.get(self.token_start..self.cursor).unwrap_or_default()
    }

    fn emit(&self, kind: TokenKind) -> Token {
        Token::new(kind, Span::new(self.token_start, self.cursor))
    }

    fn error(&self, message: impl Into<String>) -> Token {
        self.emit(TokenKind::Error(message.into()))
    }

    fn skip_trivia(&mut self) {
        loop {
            self.bump_while(char::is_whitespace);
            if self.starts_with("--") {
                self.bump_while(|c| c != '\n');
            } else if self.starts_with("/*") {
                self.cursor += 2;
                match self.rest().find("*/") {
                    Some(end) => self.cursor += end + 2,
                    None => self.cursor = self.src.len(),
                }
            } else {
                return;
            }
        }
    }

    fn word(&mut self) -> Token {
        self.bump_while(is_word_char);
        let text = self.lexeme();
        match Keyword::from_str(text) {
            Some(keyword) => self.emit(TokenKind::Keyword(keyword)),
            None => self.emit(TokenKind::Identifier(text.to_owned())),
        }
    }

    /// Reads up to the closing `quote`, which has already been opened. A
    /// doubled quote stands for itself. Returns `None` at end of input.
    fn delimited(&mut self, quote: char, escapes: bool) -> Option<String> {
        let mut value = String::new();
        loop {
            match self.bump()? {
                c if c == quote => {
                    if !self.eat(quote) {
                        return Some(value);
                    }
                    value.push(quote);
                }
                '\\' if escapes => match self.bump()? {
                    'n' => value.push('\n'),
                    't' => value.push('\t'),
                    'r' => value.push('\r'),
                    '0' => value.push('\0'),
                    // LIKE wildcards keep their escape
                    c @ ('%' | '_') => {
                        value.push('\\');
                        value.push(c);
                    }
                    c => value.push(c),
                },
                c => value.push(c),
            }
        }
    }

    fn string(&mut self, quote: char) -> Token {
        match self.delimited(quote, self.backslash_escapes) {
            Some(value) => self.emit(TokenKind::String(value)),
            None => self.error("unterminated string literal"),
        }
    }

    fn quoted_identifier(&mut self, quote: char) -> Token {
        match self.delimited(quote, false) {
            Some(value) if value.is_empty() => self.error("empty quoted identifier"),
            Some(value) => self.emit(TokenKind::QuotedIdentifier(value)),
            None => self.error("unterminated quoted identifier"),
        }
    }

    /// Integers, decimals and exponent forms. Integers too wide for `i64`
    /// (LARGEINT) are kept as decimal text.
    fn number(&mut self) -> Token {
        self.bump_while(|c| c.is_ascii_digit());
        let mut fractional = false;

        if self.lookahead(0) == Some('.') && self.lookahead(1).is_some_and(|c| c.is_ascii_digit()) {
            fractional = true;
            self.bump();
            self.bump_while(|c| c.is_ascii_digit());
        }

        if matches!(self.lookahead(0), Some('e' | 'E')) {
            let digits_at = if matches!(self.lookahead(1), Some('+' | '-')) { 2 } else { 1 };
            if self.lookahead(digits_at).is_some_and(|c| c.is_ascii_digit()) {
                fractional = true;
                for _ in 0..digits_at {
                    self.bump();
                }
                self.bump_while(|c| c.is_ascii_digit());
            }
        }

        if self.lookahead(0).is_some_and(|c| c.is_alphabetic() || c == '_') {
            self.bump_while(|c| c.is_alphanumeric() || c == '_');
            return self.error(format!("invalid number: {}", self.lexeme()));
        }

        let text = self.lexeme();
        match text.parse::<i64>() {
            Ok(value) if !fractional => self.emit(TokenKind::Integer(value)),
            _ => self.emit(TokenKind::Decimal(text.to_owned())),
        }
    }

    /// Operators that may be one, two or three characters long.
    fn operator(&mut self, first: char) -> Option<TokenKind> {
        let kind = match first {
            '-' if self.eat('>') => TokenKind::Arrow,
            '-' => TokenKind::Minus,
            ':' if self.eat(':') => TokenKind::DoubleColon,
            ':' => TokenKind::Colon,
            '=' => {
                self.eat('=');
                TokenKind::Eq
            }
            '<' if self.eat('=') => {
                if self.eat('>') {
                    TokenKind::NullSafeEq
                } else {
                    TokenKind::LtEq
                }
            }
            '<' if self.eat('>') => TokenKind::NotEq,
            '<' if self.eat('<') => TokenKind::LeftShift,
            '<' => TokenKind::Lt,
            '>' if self.eat('=') => TokenKind::GtEq,
            '>' if self.eat('>') => TokenKind::RightShift,
            '>' => TokenKind::Gt,
            '!' if self.eat('=') => TokenKind::NotEq,
            '|' if self.eat('|') => TokenKind::Concat,
            '|' => TokenKind::BitOr,
            _ => return None,
        };
        Some(kind)
    }

    /// Scans the next token; at end of input this keeps returning
    /// [`TokenKind::Eof`].
    #[must_use]
    pub fn next_token(&mut self) -> Token {
        self.skip_trivia();
        self.token_start = self.cursor;

        let Some(c) = self.bump() else {
            return self.emit(TokenKind::Eof);
        };
        if let Some(kind) = single_char(c) {
            return self.emit(kind);
        }
        if let Some(kind) = self.operator(c) {
            return self.emit(kind);
        }
        match c {
            '\'' => self.string(c),
            '"' if self.double_quoted_strings => self.string(c),
            '"' | '`' => self.quoted_identifier(c),
            c if c.is_ascii_digit() => self.number(),
            c if c.is_alphabetic() || c == '_' => self.word(),
            _ => self.error(format!("unexpected character: {c}")),
        }
    }

    /// Tokenizes the whole input. The last token is always [`TokenKind::Eof`].
    #[must_use]
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token.is_eof();
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::AnsiDialect;

    fn tokenize(input: &str) -> Vec<Token> {
        Lexer::new(input).tokenize()
    }

    fn token_kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_empty_input() {
        let tokens = tokenize("   \n\t  ");
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_eof());
    }

    #[test]
    fn test_comments() {
        assert_eq!(
            token_kinds("SELECT -- comment\n/*+ SET_VAR(a=1) */ FROM"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Keyword(Keyword::From),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_doris_quoting() {
        assert_eq!(
            token_kinds("`select` \"text\" 'it''s'"),
            vec![
                TokenKind::QuotedIdentifier(String::from("select")),
                TokenKind::String(String::from("text")),
                TokenKind::String(String::from("it's")),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_ansi_quoting() {
        let kinds: Vec<TokenKind> = Lexer::with_dialect("\"col name\" 'a\\b'", &AnsiDialect)
            .tokenize()
            .into_iter()
            .map(|t| t.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::QuotedIdentifier(String::from("col name")),
                TokenKind::String(String::from("a\\b")),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_backslash_escapes() {
        assert_eq!(
            token_kinds(r"'a\'b\n' 'x\%'"),
            vec![
                TokenKind::String(String::from("a'b\n")),
                TokenKind::String(String::from("x\\%")),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            token_kinds("42 3.14 1e10 170141183460469231731687303715884105727"),
            vec![
                TokenKind::Integer(42),
                TokenKind::Decimal(String::from("3.14")),
                TokenKind::Decimal(String::from("1e10")),
                TokenKind::Decimal(String::from("170141183460469231731687303715884105727")),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            token_kinds("<=> <= <> != == -> :: ^ ||"),
            vec![
                TokenKind::NullSafeEq,
                TokenKind::LtEq,
                TokenKind::NotEq,
                TokenKind::NotEq,
                TokenKind::Eq,
                TokenKind::Arrow,
                TokenKind::DoubleColon,
                TokenKind::BitXor,
                TokenKind::Concat,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_match_keywords() {
        assert_eq!(
            token_kinds("log match_phrase 'x'"),
            vec![
                TokenKind::Identifier(String::from("log")),
                TokenKind::Keyword(Keyword::MatchPhrase),
                TokenKind::String(String::from("x")),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_errors() {
        assert!(matches!(tokenize("'abc")[0].kind, TokenKind::Error(_)));
        assert!(matches!(tokenize("`abc")[0].kind, TokenKind::Error(_)));
        assert!(matches!(tokenize("``")[0].kind, TokenKind::Error(_)));
        assert!(matches!(tokenize("!")[0].kind, TokenKind::Error(_)));
        assert!(matches!(tokenize("12ab")[0].kind, TokenKind::Error(_)));
    }

    #[test]
    fn test_span_tracking() {
        let tokens = tokenize("SELECT `id`");
        assert_eq!(tokens[0].span, Span::new(0, 6));
        assert_eq!(tokens[1].span, Span::new(7, 11));
        assert_eq!(tokens[2].span, Span::point(11));
    }
}
