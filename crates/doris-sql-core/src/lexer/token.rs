//! Token types for the Doris SQL lexer.

use core::fmt;

use super::Span;

macro_rules! define_keywords {
    ($($variant:ident => $text:literal, $reserved:literal;)*) => {
        /// Doris SQL keywords.
        ///
        /// Reserved keywords cannot be used as bare identifiers; the others
        /// are keywords only in the positions that call for them.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Keyword {
            $(
                #[doc = concat!("`", $text, "`")]
                $variant,
            )*
        }

        impl Keyword {
            /// Every keyword, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// Attempts to parse a keyword from a string (case-insensitive).
            #[must_use]
            #[allow(clippy::should_implement_trait)]
            pub fn from_str(s: &str) -> Option<Self> {
                match s.to_ascii_uppercase().as_str() {
                    $($text => Some(Self::$variant),)*
                    _ => None,
                }
            }

            /// Returns the keyword as a string.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)*
                }
            }

            /// Returns true if the keyword cannot be used as a bare identifier.
            #[must_use]
            pub const fn is_reserved(&self) -> bool {
                match self {
                    $(Self::$variant => $reserved,)*
                }
            }
        }
    };
}

define_keywords! {
    // Queries
    Select => "SELECT", true;
    From => "FROM", true;
    Where => "WHERE", true;
    Group => "GROUP", true;
    By => "BY", true;
    Having => "HAVING", true;
    Order => "ORDER", true;
    Limit => "LIMIT", true;
    Offset => "OFFSET", true;
    Distinct => "DISTINCT", true;
    All => "ALL", true;
    As => "AS", true;
    With => "WITH", true;
    Recursive => "RECURSIVE", false;

    // Joins
    Join => "JOIN", true;
    Inner => "INNER", true;
    Left => "LEFT", true;
    Right => "RIGHT", true;
    Full => "FULL", true;
    Outer => "OUTER", true;
    Cross => "CROSS", true;
    Semi => "SEMI", true;
    Anti => "ANTI", true;
    On => "ON", true;
    Using => "USING", true;
    Lateral => "LATERAL", true;

    // Set operations
    Union => "UNION", true;
    Intersect => "INTERSECT", true;
    Except => "EXCEPT", true;
    Minus => "MINUS", true;

    // Data manipulation
    Insert => "INSERT", true;
    Into => "INTO", true;
    Overwrite => "OVERWRITE", false;
    Values => "VALUES", true;
    Update => "UPDATE", true;
    Set => "SET", true;
    Delete => "DELETE", true;
    Label => "LABEL", false;
    Partition => "PARTITION", true;

    // Data definition
    Create => "CREATE", true;
    Drop => "DROP", true;
    Alter => "ALTER", true;
    Truncate => "TRUNCATE", true;
    Table => "TABLE", true;
    View => "VIEW", true;
    Database => "DATABASE", true;
    Schema => "SCHEMA", true;
    External => "EXTERNAL", false;
    Temporary => "TEMPORARY", false;
    If => "IF", false;
    Replace => "REPLACE", false;
    Force => "FORCE", false;
    Default => "DEFAULT", true;
    Comment => "COMMENT", false;
    Engine => "ENGINE", false;
    Properties => "PROPERTIES", false;
    Distributed => "DISTRIBUTED", false;
    Hash => "HASH", false;
    Random => "RANDOM", false;
    Buckets => "BUCKETS", false;
    Auto => "AUTO", false;
    Duplicate => "DUPLICATE", false;
    Unique => "UNIQUE", false;
    Aggregate => "AGGREGATE", false;
    Primary => "PRIMARY", false;
    Key => "KEY", false;
    Column => "COLUMN", false;
    Add => "ADD", false;
    Modify => "MODIFY", false;
    Rename => "RENAME", false;

    // Utility statements
    Show => "SHOW", true;
    Describe => "DESCRIBE", true;
    Desc => "DESC", true;
    Use => "USE", true;
    Explain => "EXPLAIN", true;
    Kill => "KILL", true;
    Grant => "GRANT", true;
    Revoke => "REVOKE", true;
    To => "TO", true;
    Role => "ROLE", false;
    Tables => "TABLES", false;
    Databases => "DATABASES", false;
    Schemas => "SCHEMAS", false;
    Columns => "COLUMNS", false;
    Fields => "FIELDS", false;
    Variables => "VARIABLES", false;
    Global => "GLOBAL", false;
    Session => "SESSION", false;
    Verbose => "VERBOSE", false;
    Graph => "GRAPH", false;
    Plan => "PLAN", false;
    Query => "QUERY", false;
    Connection => "CONNECTION", false;

    // Transactions
    Begin => "BEGIN", false;
    Start => "START", false;
    Commit => "COMMIT", false;
    Rollback => "ROLLBACK", false;
    Work => "WORK", false;
    Transaction => "TRANSACTION", false;

    // Operators
    And => "AND", true;
    Or => "OR", true;
    Xor => "XOR", true;
    Not => "NOT", true;
    In => "IN", true;
    Is => "IS", true;
    Between => "BETWEEN", true;
    Like => "LIKE", true;
    Regexp => "REGEXP", true;
    Rlike => "RLIKE", true;
    Div => "DIV", true;
    MatchAny => "MATCH_ANY", true;
    MatchAll => "MATCH_ALL", true;
    MatchPhrase => "MATCH_PHRASE", true;
    MatchPhrasePrefix => "MATCH_PHRASE_PREFIX", true;
    MatchPhraseEdge => "MATCH_PHRASE_EDGE", true;
    MatchRegexp => "MATCH_REGEXP", true;
    Exists => "EXISTS", true;

    // Values and expressions
    Null => "NULL", true;
    True => "TRUE", true;
    False => "FALSE", true;
    Case => "CASE", true;
    When => "WHEN", true;
    Then => "THEN", true;
    Else => "ELSE", true;
    End => "END", true;
    Cast => "CAST", true;
    Interval => "INTERVAL", true;
    Date => "DATE", false;
    Datetime => "DATETIME", false;
    Timestamp => "TIMESTAMP", false;

    // Ordering and windows
    Asc => "ASC", true;
    Nulls => "NULLS", false;
    First => "FIRST", false;
    Last => "LAST", false;
    Over => "OVER", true;
    Rows => "ROWS", false;
    Range => "RANGE", false;
    Unbounded => "UNBOUNDED", false;
    Preceding => "PRECEDING", false;
    Following => "FOLLOWING", false;
    Current => "CURRENT", false;
    Row => "ROW", false;
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token types.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    /// Integer literal that fits in an `i64`.
    Integer(i64),
    /// Decimal or out-of-range integer literal, kept as written.
    Decimal(String),
    /// String literal (`'...'`, or `"..."` where the dialect allows it).
    String(String),

    // Identifiers and keywords
    /// Bare identifier.
    Identifier(String),
    /// Quoted identifier (`` `...` `` in Doris).
    QuotedIdentifier(String),
    /// SQL keyword
    Keyword(Keyword),

    // Operators
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// %
    Percent,
    /// = or ==
    Eq,
    /// <=>
    NullSafeEq,
    /// != or <>
    NotEq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,
    /// ||
    Concat,
    /// &
    BitAnd,
    /// |
    BitOr,
    /// ^
    BitXor,
    /// ~
    BitNot,
    /// <<
    LeftShift,
    /// >>
    RightShift,
    /// ->
    Arrow,

    // Delimiters
    /// (
    LeftParen,
    /// )
    RightParen,
    /// [
    LeftBracket,
    /// ]
    RightBracket,
    /// {
    LeftBrace,
    /// }
    RightBrace,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// .
    Dot,
    /// :
    Colon,
    /// ::
    DoubleColon,
    /// ?
    Question,
    /// @
    At,

    // Special
    /// End of input
    Eof,
    /// Invalid/unknown token
    Error(String),
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Integer(value) => return write!(f, "integer {value}"),
            Self::Decimal(text) => return write!(f, "number {text}"),
            Self::String(value) => return write!(f, "string '{value}'"),
            Self::Identifier(name) => return write!(f, "identifier {name}"),
            Self::QuotedIdentifier(name) => return write!(f, "identifier `{name}`"),
            Self::Keyword(keyword) => return write!(f, "keyword {keyword}"),
            Self::Error(message) => return write!(f, "invalid token ({message})"),
            Self::Eof => "end of input",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Star => "'*'",
            Self::Slash => "'/'",
            Self::Percent => "'%'",
            Self::Eq => "'='",
            Self::NullSafeEq => "'<=>'",
            Self::NotEq => "'!='",
            Self::Lt => "'<'",
            Self::LtEq => "'<='",
            Self::Gt => "'>'",
            Self::GtEq => "'>='",
            Self::Concat => "'||'",
            Self::BitAnd => "'&'",
            Self::BitOr => "'|'",
            Self::BitXor => "'^'",
            Self::BitNot => "'~'",
            Self::LeftShift => "'<<'",
            Self::RightShift => "'>>'",
            Self::Arrow => "'->'",
            Self::LeftParen => "'('",
            Self::RightParen => "')'",
            Self::LeftBracket => "'['",
            Self::RightBracket => "']'",
            Self::LeftBrace => "'{'",
            Self::RightBrace => "'}'",
            Self::Comma => "','",
            Self::Semicolon => "';'",
            Self::Dot => "'.'",
            Self::Colon => "':'",
            Self::DoubleColon => "'::'",
            Self::Question => "'?'",
            Self::At => "'@'",
        };
        f.write_str(symbol)
    }
}

/// A token with its span in the source code.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The location in the source code.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns true if this is a keyword.
    #[must_use]
    pub const fn is_keyword(&self) -> bool {
        matches!(self.kind, TokenKind::Keyword(_))
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_from_str() {
        assert_eq!(Keyword::from_str("SELECT"), Some(Keyword::Select));
        assert_eq!(Keyword::from_str("select"), Some(Keyword::Select));
        assert_eq!(Keyword::from_str("match_phrase"), Some(Keyword::MatchPhrase));
        assert_eq!(Keyword::from_str("not_a_keyword"), None);
    }

    #[test]
    fn test_keyword_round_trip() {
        for keyword in Keyword::ALL {
            assert_eq!(Keyword::from_str(keyword.as_str()), Some(*keyword));
        }
    }

    #[test]
    fn test_reserved_keywords() {
        assert!(Keyword::Select.is_reserved());
        assert!(Keyword::Desc.is_reserved());
        assert!(!Keyword::Date.is_reserved());
        assert!(!Keyword::Comment.is_reserved());
    }

    #[test]
    fn test_token_as_keyword() {
        let select = Token::new(TokenKind::Keyword(Keyword::Select), Span::new(0, 6));
        let plus = Token::new(TokenKind::Plus, Span::new(0, 1));
        assert_eq!(select.as_keyword(), Some(Keyword::Select));
        assert_eq!(plus.as_keyword(), None);
        assert!(Token::new(TokenKind::Eof, Span::point(0)).is_eof());
    }
}
