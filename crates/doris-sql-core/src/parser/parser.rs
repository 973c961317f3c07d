//! Statement-level recognizer.

use tracing::{debug, warn};

use crate::ast::{
    AliasStatement, AliasSyntax, AlterOperation, AlterTableAction, AlterTableStatement,
    Assignment, Buckets, ColumnDef, CreateDatabaseStatement, CreateTableStatement,
    CreateViewStatement, DeleteStatement, DescribeStatement, DistributionClause,
    DistributionMethod, DropStatement, ErrorCapturingIdent, ExplainLevel, ExplainStatement,
    GrantObject, GrantStatement, Grantee, Ident, Identifier, InsertSource, InsertStatement,
    IntegerLiteral, KeyType, KeysClause, KillStatement, KillTarget, Literal, ObjectName,
    ObjectType, PartitionSpec, Property, PropertyList, QuotedIdent, RevokeStatement,
    SetStatement, ShowFilter, ShowStatement, ShowTarget, Statement, StringLiteral, TableOptions,
    TransactionAction, TransactionStatement, TruncateStatement, UnsupportedStatement,
    UpdateStatement, UseStatement, ValuesClause, VariableAssignment, VariableScope,
};
use crate::config::ParserConfig;
use crate::dialect::Dialect;
use crate::error::ParseError;
use crate::lexer::{Keyword, Lexer, Span, Token, TokenKind};

static EOF: TokenKind = TokenKind::Eof;

/// Leading words of Doris statements that are recognized but not modelled.
const UNMODELLED_COMMANDS: &[&str] = &[
    "LOAD", "BACKUP", "RESTORE", "ADMIN", "INSTALL", "UNINSTALL", "EXPORT", "SYNC", "RECOVER",
    "CANCEL", "PAUSE", "RESUME", "STOP", "CLEAN", "REFRESH", "ANALYZE", "COPY", "CALL", "HELP",
    "LOCK", "UNLOCK",
];

/// SET forms that look like variable assignments but are separate commands.
const SET_COMMANDS: &[&str] = &["PASSWORD", "PROPERTY", "LDAP_ADMIN_PASSWORD", "NAMES"];

/// Recursive descent recognizer for Doris SQL.
///
/// The parser owns the token stream of one batch. [`Parser::parse_statement`]
/// recognizes a single statement; [`Parser::parse_statements`] recognizes a
/// `;`-separated batch, resynchronizing after each failed statement.
pub struct Parser<'a> {
    pub(super) tokens: Vec<Token>,
    pub(super) pos: usize,
    pub(super) source: &'a str,
    pub(super) config: ParserConfig,
    pub(super) param_counter: usize,
    pub(super) depth: usize,
    pub(super) prev_end: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser over `source` with the default configuration.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self::with_config(source, ParserConfig::default())
    }

    /// Creates a parser over `source` with the given configuration.
    #[must_use]
    pub fn with_config(source: &'a str, config: ParserConfig) -> Self {
        let tokens = Lexer::new(source).tokenize();
        Self::from_tokens(source, tokens, config)
    }

    /// Creates a parser that tokenizes `source` with `dialect`'s quoting rules.
    #[must_use]
    pub fn with_dialect(source: &'a str, dialect: &dyn Dialect, config: ParserConfig) -> Self {
        let tokens = Lexer::with_dialect(source, dialect).tokenize();
        Self::from_tokens(source, tokens, config)
    }

    /// Creates a parser over an existing token stream.
    ///
    /// `source` must be the text the tokens were produced from; it is used
    /// for statement text and names written as keywords. A missing trailing
    /// EOF token is supplied.
    #[must_use]
    pub fn from_tokens(source: &'a str, mut tokens: Vec<Token>, config: ParserConfig) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            tokens.push(Token::new(TokenKind::Eof, Span::point(source.len())));
        }
        Self {
            tokens,
            pos: 0,
            source,
            config,
            param_counter: 0,
            depth: 0,
            prev_end: 0,
        }
    }

    /// Parses exactly one statement, optionally followed by `;`.
    ///
    /// # Errors
    ///
    /// Returns the first syntax or malformed-node error, or a syntax error if
    /// anything other than `;` follows the statement.
    pub fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        while self.eat(&TokenKind::Semicolon) {}
        self.reset_statement_state();
        let statement = self.parse_one()?;
        while self.eat(&TokenKind::Semicolon) {}
        if !self.check(&TokenKind::Eof) {
            return Err(self.error_expected("end of input"));
        }
        debug!(kind = %statement.kind(), span = ?statement.span(), "parsed statement");
        Ok(statement)
    }

    /// Parses a `;`-separated batch.
    ///
    /// Each statement yields its own result. After a failure the parser skips
    /// to the next top-level `;` and continues, so later statements still
    /// parse. Empty statements are skipped.
    pub fn parse_statements(&mut self) -> Vec<Result<Statement, ParseError>> {
        let mut results = Vec::new();
        loop {
            while self.eat(&TokenKind::Semicolon) {}
            if self.check(&TokenKind::Eof) {
                break;
            }
            if results.len() >= self.config.max_statements {
                let start = self.current().span.start;
                results.push(Err(ParseError::new(
                    format!("batch exceeds {} statements", self.config.max_statements),
                    Span::new(start, self.source.len()),
                )));
                break;
            }

            self.reset_statement_state();
            let result = self
                .parse_one()
                .and_then(|statement| self.expect_statement_end().map(|()| statement));
            match result {
                Ok(statement) => {
                    debug!(kind = %statement.kind(), span = ?statement.span(), "parsed statement");
                    results.push(Ok(statement));
                }
                Err(err) => {
                    warn!(error = %err, "statement failed, skipping to next ';'");
                    self.skip_statement();
                    results.push(Err(err));
                }
            }
        }
        results
    }

    fn reset_statement_state(&mut self) {
        self.param_counter = 0;
        self.depth = 0;
    }

    fn expect_statement_end(&self) -> Result<(), ParseError> {
        if self.check(&TokenKind::Semicolon) || self.check(&TokenKind::Eof) {
            Ok(())
        } else {
            Err(self.error_expected("';' or end of input"))
        }
    }

    /// Skips to the next `;` outside parentheses, or to EOF.
    fn skip_statement(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.current().kind {
                TokenKind::Eof => break,
                TokenKind::Semicolon if depth == 0 => break,
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => depth = depth.saturating_sub(1),
                _ => {}
            }
            self.advance();
        }
    }

    // ------------------------------------------------------------------
    // Token helpers
    // ------------------------------------------------------------------

    pub(super) fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    pub(super) fn peek_kind(&self, n: usize) -> &TokenKind {
        self.tokens.get(self.pos + n).map_or(&EOF, |token| &token.kind)
    }

    pub(super) fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if !token.is_eof() {
            self.prev_end = token.span.end;
            self.pos += 1;
        }
        token
    }

    pub(super) fn check(&self, kind: &TokenKind) -> bool {
        core::mem::discriminant(&self.current().kind) == core::mem::discriminant(kind)
    }

    pub(super) fn check_keyword(&self, keyword: Keyword) -> bool {
        matches!(self.current().kind, TokenKind::Keyword(kw) if kw == keyword)
    }

    pub(super) fn peek_keyword(&self, n: usize, keyword: Keyword) -> bool {
        matches!(self.peek_kind(n), TokenKind::Keyword(kw) if *kw == keyword)
    }

    pub(super) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(super) fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        if self.check_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes a token of `kind`, returning its span.
    pub(super) fn expect(&mut self, kind: &TokenKind) -> Result<Span, ParseError> {
        if self.check(kind) {
            Ok(self.advance().span)
        } else {
            Err(self.error_expected(&kind.to_string()))
        }
    }

    /// Consumes `keyword`, returning its span.
    pub(super) fn expect_keyword(&mut self, keyword: Keyword) -> Result<Span, ParseError> {
        if self.check_keyword(keyword) {
            Ok(self.advance().span)
        } else {
            Err(self.error_expected(keyword.as_str()))
        }
    }

    /// Returns true if the current token is the bare word `word`.
    pub(super) fn check_word(&self, word: &str) -> bool {
        matches!(&self.current().kind, TokenKind::Identifier(name) if name.eq_ignore_ascii_case(word))
    }

    /// Returns true if the token `n` ahead can be used as a name without quoting.
    pub(super) fn is_name_at(&self, n: usize) -> bool {
        match self.peek_kind(n) {
            TokenKind::Identifier(_) | TokenKind::QuotedIdentifier(_) => true,
            TokenKind::Keyword(keyword) => !keyword.is_reserved(),
            _ => false,
        }
    }

    /// Returns the source text of `token`.
    pub(super) fn token_text(&self, token: &Token) -> String {
        token
            .span
            .slice(self.source)
            .map_or_else(|| token.kind.to_string(), str::to_string)
    }

    /// Returns the span from `start` to the end of the last consumed token.
    pub(super) fn span_from(&self, start: usize) -> Span {
        Span::new(start, self.prev_end.max(start))
    }

    /// Returns the whitespace gap before the current token, or the token
    /// itself when there is no gap.
    fn gap_span(&self) -> Span {
        let current = self.current().span;
        if self.prev_end < current.start {
            Span::new(self.prev_end, current.start)
        } else {
            current
        }
    }

    /// Builds the error for a token that does not fit the grammar here.
    pub(super) fn error_expected(&self, expected: &str) -> ParseError {
        let token = self.current();
        match &token.kind {
            TokenKind::Eof => ParseError::unexpected_eof(expected, self.gap_span()),
            TokenKind::Error(message) => ParseError::new(message.clone(), token.span),
            kind => ParseError::unexpected(expected, kind.clone(), token.span),
        }
    }

    /// Builds the error for a missing operand.
    ///
    /// When a keyword or the end of input shows up where an operand belongs,
    /// the error points at the gap where the operand was left out.
    pub(super) fn error_expected_operand(&self, expected: &str) -> ParseError {
        let token = self.current();
        match &token.kind {
            TokenKind::Keyword(_) => ParseError::unexpected(expected, token.kind.clone(), self.gap_span()),
            _ => self.error_expected(expected),
        }
    }

    /// Runs `f` one nesting level deeper.
    pub(super) fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= self.config.max_depth {
            return Err(ParseError::new(
                format!("nesting exceeds {} levels", self.config.max_depth),
                self.current().span,
            ));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    // ------------------------------------------------------------------
    // Names
    // ------------------------------------------------------------------

    /// Parses a single-part name.
    ///
    /// Reserved words are accepted as error-capturing identifiers when the
    /// configuration is lenient.
    pub(super) fn parse_identifier(&mut self) -> Result<Identifier, ParseError> {
        let token = self.current().clone();
        let identifier = match &token.kind {
            TokenKind::Identifier(name) => Identifier::Simple(Ident::new(name.clone(), token.span)?),
            TokenKind::QuotedIdentifier(name) => {
                Identifier::Quoted(QuotedIdent::new(name.clone(), token.span)?)
            }
            TokenKind::Keyword(keyword) if !keyword.is_reserved() => {
                Identifier::Simple(Ident::new(self.token_text(&token), token.span)?)
            }
            TokenKind::Keyword(_) if self.config.lenient_identifiers => Identifier::ErrorCapturing(
                ErrorCapturingIdent::new(self.token_text(&token), token.span)?,
            ),
            _ => return Err(self.error_expected("identifier")),
        };
        self.advance();
        Ok(identifier)
    }

    /// Parses `part [. part]*`.
    pub(super) fn parse_object_name(&mut self) -> Result<ObjectName, ParseError> {
        let start = self.current().span.start;
        let mut parts = vec![self.parse_identifier()?];
        while self.check(&TokenKind::Dot) {
            self.advance();
            parts.push(self.parse_identifier()?);
        }
        ObjectName::new(parts, self.span_from(start))
    }

    /// Parses `( name, ... )`.
    pub(super) fn parse_parenthesized_identifiers(&mut self) -> Result<Vec<Identifier>, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let mut names = vec![self.parse_identifier()?];
        while self.eat(&TokenKind::Comma) {
            names.push(self.parse_identifier()?);
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(names)
    }

    /// Parses `AS name` or a bare unreserved name.
    pub(super) fn parse_optional_alias(&mut self) -> Result<Option<Identifier>, ParseError> {
        if self.eat_keyword(Keyword::As) {
            return self.parse_identifier().map(Some);
        }
        match self.current().kind {
            TokenKind::Identifier(_) | TokenKind::QuotedIdentifier(_) => {
                self.parse_identifier().map(Some)
            }
            _ => Ok(None),
        }
    }

    pub(super) fn parse_string_literal(&mut self) -> Result<StringLiteral, ParseError> {
        let token = self.current().clone();
        if let TokenKind::String(value) = &token.kind {
            self.advance();
            StringLiteral::new(value.clone(), token.span)
        } else {
            Err(self.error_expected("string literal"))
        }
    }

    /// Parses an unsigned integer that fits `T`.
    pub(super) fn parse_unsigned<T: TryFrom<i64>>(&mut self, what: &str) -> Result<T, ParseError> {
        let token = self.current().clone();
        if let TokenKind::Integer(value) = token.kind {
            self.advance();
            T::try_from(value)
                .map_err(|_| ParseError::new(format!("{what} {value} is out of range"), token.span))
        } else {
            Err(self.error_expected(what))
        }
    }

    // ------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------

    /// Parses one statement without consuming its terminator.
    fn parse_one(&mut self) -> Result<Statement, ParseError> {
        self.nested(Self::parse_statement_inner)
    }

    fn parse_statement_inner(&mut self) -> Result<Statement, ParseError> {
        let token = self.current().clone();
        match &token.kind {
            TokenKind::Keyword(Keyword::Select | Keyword::With) | TokenKind::LeftParen => {
                self.parse_query().map(Statement::Query)
            }
            TokenKind::Keyword(Keyword::Insert) => self.parse_insert(),
            TokenKind::Keyword(Keyword::Update) => self.parse_update(),
            TokenKind::Keyword(Keyword::Delete) => self.parse_delete(),
            TokenKind::Keyword(Keyword::Create) => self.parse_create(),
            TokenKind::Keyword(Keyword::Alter) => self.parse_alter(),
            TokenKind::Keyword(Keyword::Drop) => self.parse_drop(),
            TokenKind::Keyword(Keyword::Truncate) => self.parse_truncate(),
            TokenKind::Keyword(Keyword::Show) => self.parse_show(),
            TokenKind::Keyword(Keyword::Describe | Keyword::Desc) => self.parse_describe(),
            TokenKind::Keyword(Keyword::Use) => self.parse_use(),
            TokenKind::Keyword(Keyword::Set) => self.parse_set(),
            TokenKind::Keyword(Keyword::Grant | Keyword::Revoke) => self.parse_grant_or_revoke(),
            TokenKind::Keyword(
                Keyword::Begin | Keyword::Start | Keyword::Commit | Keyword::Rollback,
            ) => self.parse_transaction(),
            TokenKind::Keyword(Keyword::Explain) => self.parse_explain(),
            TokenKind::Keyword(Keyword::Kill) => self.parse_kill(),
            TokenKind::Identifier(word)
                if UNMODELLED_COMMANDS
                    .iter()
                    .any(|command| command.eq_ignore_ascii_case(word)) =>
            {
                self.parse_unsupported(self.pos, 1)
            }
            _ => Err(self.error_expected("statement")),
        }
    }

    /// Rewinds to `start_pos` and consumes the rest of the statement as an
    /// unmodelled command named by its first `words` words.
    fn parse_unsupported(&mut self, start_pos: usize, words: usize) -> Result<Statement, ParseError> {
        self.pos = start_pos;
        let start = self.current().span.start;
        let statement_type = self.tokens[start_pos..]
            .iter()
            .take_while(|token| !matches!(token.kind, TokenKind::Eof | TokenKind::Semicolon))
            .take(words)
            .map(|token| self.token_text(token).to_ascii_uppercase())
            .collect::<Vec<_>>()
            .join(" ");
        self.skip_statement();
        let span = self.span_from(start);
        let text = span.slice(self.source).unwrap_or_default();
        debug!(%statement_type, "unmodelled statement");
        UnsupportedStatement::new(statement_type, text, span).map(Statement::Unsupported)
    }

    fn at_statement_end(&self) -> bool {
        matches!(self.current().kind, TokenKind::Semicolon | TokenKind::Eof)
    }

    /// Parses `IF NOT EXISTS` if present.
    fn parse_if_not_exists(&mut self) -> bool {
        if self.check_keyword(Keyword::If)
            && self.peek_keyword(1, Keyword::Not)
            && self.peek_keyword(2, Keyword::Exists)
        {
            self.advance();
            self.advance();
            self.advance();
            true
        } else {
            false
        }
    }

    /// Parses `IF EXISTS` if present.
    fn parse_if_exists(&mut self) -> bool {
        if self.check_keyword(Keyword::If) && self.peek_keyword(1, Keyword::Exists) {
            self.advance();
            self.advance();
            true
        } else {
            false
        }
    }

    /// Parses `[TEMPORARY] PARTITION (p, ...)` or `PARTITION p` if present.
    pub(super) fn parse_optional_partition(&mut self) -> Result<Option<PartitionSpec>, ParseError> {
        let start = self.current().span.start;
        let temporary =
            self.check_keyword(Keyword::Temporary) && self.peek_keyword(1, Keyword::Partition);
        if temporary {
            self.advance();
        } else if !self.check_keyword(Keyword::Partition) {
            return Ok(None);
        }
        self.advance();
        let partitions = if self.check(&TokenKind::LeftParen) {
            self.parse_parenthesized_identifiers()?
        } else {
            vec![self.parse_identifier()?]
        };
        PartitionSpec::new(temporary, partitions, self.span_from(start)).map(Some)
    }

    /// Parses `WITH LABEL name` if present.
    fn parse_optional_label(&mut self) -> Result<Option<Identifier>, ParseError> {
        if self.check_keyword(Keyword::With) && self.peek_keyword(1, Keyword::Label) {
            self.advance();
            self.advance();
            self.parse_identifier().map(Some)
        } else {
            Ok(None)
        }
    }

    fn parse_insert(&mut self) -> Result<Statement, ParseError> {
        let start = self.expect_keyword(Keyword::Insert)?.start;
        let overwrite = if self.eat_keyword(Keyword::Overwrite) {
            self.expect_keyword(Keyword::Table)?;
            true
        } else {
            self.expect_keyword(Keyword::Into)?;
            self.eat_keyword(Keyword::Table);
            false
        };
        let table = self.parse_object_name()?;
        let partition = self.parse_optional_partition()?;
        let label = self.parse_optional_label()?;

        let columns = if self.check(&TokenKind::LeftParen)
            && !matches!(
                self.peek_kind(1),
                TokenKind::Keyword(Keyword::Select | Keyword::With)
            ) {
            self.parse_parenthesized_identifiers()?
        } else {
            Vec::new()
        };

        let source = if self.check_keyword(Keyword::Values) {
            InsertSource::Values(self.parse_values()?)
        } else {
            InsertSource::Query(self.parse_query()?)
        };

        InsertStatement::new(
            overwrite,
            table,
            partition,
            label,
            columns,
            source,
            self.span_from(start),
        )
        .map(Statement::Insert)
    }

    fn parse_values(&mut self) -> Result<ValuesClause, ParseError> {
        let start = self.expect_keyword(Keyword::Values)?.start;
        let mut rows = Vec::new();
        loop {
            let row_start = self.expect(&TokenKind::LeftParen)?.start;
            let row = self.parse_expr_list()?;
            self.expect(&TokenKind::RightParen)?;
            if let Some(width) = rows.first().map(Vec::len) {
                if row.len() != width {
                    return Err(ParseError::new(
                        format!("VALUES row has {} values, expected {width}", row.len()),
                        self.span_from(row_start),
                    ));
                }
            }
            rows.push(row);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        ValuesClause::new(rows, self.span_from(start))
    }

    fn parse_update(&mut self) -> Result<Statement, ParseError> {
        let start = self.expect_keyword(Keyword::Update)?.start;
        let table = self.parse_object_name()?;
        let alias = self.parse_optional_alias()?;
        self.expect_keyword(Keyword::Set)?;

        let mut assignments = Vec::new();
        loop {
            let column = self.parse_object_name()?;
            self.expect(&TokenKind::Eq)?;
            let value = self.parse_expr()?;
            assignments.push(Assignment::new(column, value)?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }

        let from = if self.check_keyword(Keyword::From) {
            Some(self.parse_from_clause(Keyword::From)?)
        } else {
            None
        };
        let selection = self.parse_optional_where()?;
        UpdateStatement::new(table, alias, assignments, from, selection, self.span_from(start))
            .map(Statement::Update)
    }

    fn parse_delete(&mut self) -> Result<Statement, ParseError> {
        let start = self.expect_keyword(Keyword::Delete)?.start;
        self.expect_keyword(Keyword::From)?;
        let table = self.parse_object_name()?;
        let partition = self.parse_optional_partition()?;
        let using = if self.check_keyword(Keyword::Using) {
            Some(self.parse_from_clause(Keyword::Using)?)
        } else {
            None
        };
        let selection = self.parse_optional_where()?;
        DeleteStatement::new(table, partition, using, selection, self.span_from(start))
            .map(Statement::Delete)
    }

    fn parse_create(&mut self) -> Result<Statement, ParseError> {
        let start_pos = self.pos;
        let start = self.expect_keyword(Keyword::Create)?.start;
        match self.current().kind {
            TokenKind::Keyword(Keyword::Table | Keyword::External) => {
                match self.parse_create_table(start)? {
                    Some(statement) => Ok(Statement::CreateTable(statement)),
                    None => self.parse_unsupported(start_pos, 2),
                }
            }
            TokenKind::Keyword(Keyword::View) => self.parse_create_view(start),
            TokenKind::Keyword(Keyword::Database) => {
                self.parse_create_database(start).map(Statement::CreateDatabase)
            }
            TokenKind::Keyword(Keyword::Schema) => {
                let statement = self.parse_create_database(start)?;
                AliasStatement::new(AliasSyntax::CreateSchema, Statement::CreateDatabase(statement))
                    .map(Statement::Alias)
            }
            _ => self.parse_unsupported(start_pos, 2),
        }
    }

    /// Parses CREATE TABLE; `None` means the statement uses clauses the node
    /// model does not cover.
    fn parse_create_table(&mut self, start: usize) -> Result<Option<CreateTableStatement>, ParseError> {
        let external = self.eat_keyword(Keyword::External);
        self.expect_keyword(Keyword::Table)?;
        let if_not_exists = self.parse_if_not_exists();
        let name = self.parse_object_name()?;

        let mut columns = Vec::new();
        if self.eat(&TokenKind::LeftParen) {
            loop {
                match self.parse_column_def()? {
                    Some(column) => columns.push(column),
                    None => return Ok(None),
                }
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
            self.expect(&TokenKind::RightParen)?;
        }

        let mut options = TableOptions::default();
        if self.eat_keyword(Keyword::Engine) {
            self.expect(&TokenKind::Eq)?;
            options.engine = Some(self.parse_identifier()?);
        }
        if let Some(key_type) = self.key_type() {
            let key_start = self.advance().span.start;
            self.expect_keyword(Keyword::Key)?;
            let key_columns = self.parse_parenthesized_identifiers()?;
            options.keys = Some(KeysClause::new(key_type, key_columns, self.span_from(key_start))?);
        }
        if self.eat_keyword(Keyword::Comment) {
            options.comment = Some(self.parse_string_literal()?);
        }
        if self.check_keyword(Keyword::Distributed) {
            options.distribution = Some(self.parse_distribution()?);
        }
        if self.eat_keyword(Keyword::Properties) {
            options.properties = Some(self.parse_property_list()?);
        }
        let as_query = if self.eat_keyword(Keyword::As) {
            Some(self.parse_query()?)
        } else {
            None
        };
        if !self.at_statement_end() {
            return Ok(None);
        }

        CreateTableStatement::new(
            external,
            if_not_exists,
            name,
            columns,
            options,
            as_query,
            self.span_from(start),
        )
        .map(Some)
    }

    fn key_type(&self) -> Option<KeyType> {
        if !self.peek_keyword(1, Keyword::Key) {
            return None;
        }
        match self.current().kind {
            TokenKind::Keyword(Keyword::Duplicate) => Some(KeyType::Duplicate),
            TokenKind::Keyword(Keyword::Unique) => Some(KeyType::Unique),
            TokenKind::Keyword(Keyword::Aggregate) => Some(KeyType::Aggregate),
            TokenKind::Keyword(Keyword::Primary) => Some(KeyType::Primary),
            _ => None,
        }
    }

    /// Parses `name type [NOT NULL | NULL] [DEFAULT expr] [COMMENT '...']`.
    ///
    /// Returns `None` for index definitions, name-only columns and column
    /// attributes outside the node model.
    fn parse_column_def(&mut self) -> Result<Option<ColumnDef>, ParseError> {
        if self.check_word("INDEX")
            || matches!(self.peek_kind(1), TokenKind::Comma | TokenKind::RightParen)
        {
            return Ok(None);
        }
        let start = self.current().span.start;
        let name = self.parse_identifier()?;
        let data_type = self.parse_data_type()?;

        let nullable = if self.check_keyword(Keyword::Not) && self.peek_keyword(1, Keyword::Null) {
            self.advance();
            self.advance();
            Some(false)
        } else if self.eat_keyword(Keyword::Null) {
            Some(true)
        } else {
            None
        };
        let default = if self.eat_keyword(Keyword::Default) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        let comment = if self.eat_keyword(Keyword::Comment) {
            Some(self.parse_string_literal()?)
        } else {
            None
        };
        if !matches!(
            self.current().kind,
            TokenKind::Comma | TokenKind::RightParen | TokenKind::Semicolon | TokenKind::Eof
        ) {
            return Ok(None);
        }
        ColumnDef::new(name, data_type, nullable, default, comment, self.span_from(start)).map(Some)
    }

    fn parse_distribution(&mut self) -> Result<DistributionClause, ParseError> {
        let start = self.expect_keyword(Keyword::Distributed)?.start;
        self.expect_keyword(Keyword::By)?;
        let method = if self.eat_keyword(Keyword::Hash) {
            DistributionMethod::Hash(self.parse_parenthesized_identifiers()?)
        } else if self.eat_keyword(Keyword::Random) {
            DistributionMethod::Random
        } else {
            return Err(self.error_expected("HASH or RANDOM"));
        };
        let buckets = if self.eat_keyword(Keyword::Buckets) {
            if self.eat_keyword(Keyword::Auto) {
                Some(Buckets::Auto)
            } else {
                Some(Buckets::Count(self.parse_unsigned("bucket count")?))
            }
        } else {
            None
        };
        DistributionClause::new(method, buckets, self.span_from(start))
    }

    /// Parses `( "key" = "value", ... )`.
    fn parse_property_list(&mut self) -> Result<PropertyList, ParseError> {
        let start = self.expect(&TokenKind::LeftParen)?.start;
        let mut properties = Vec::new();
        if !self.check(&TokenKind::RightParen) {
            loop {
                let key = self.parse_string_literal()?;
                self.expect(&TokenKind::Eq)?;
                let value = self.parse_string_literal()?;
                properties.push(Property::new(key, value)?);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RightParen)?;
        PropertyList::new(properties, self.span_from(start))
    }

    fn parse_create_view(&mut self, start: usize) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::View)?;
        let if_not_exists = self.parse_if_not_exists();
        let name = self.parse_object_name()?;
        let columns = if self.check(&TokenKind::LeftParen) {
            self.parse_parenthesized_identifiers()?
        } else {
            Vec::new()
        };
        let comment = if self.eat_keyword(Keyword::Comment) {
            Some(self.parse_string_literal()?)
        } else {
            None
        };
        self.expect_keyword(Keyword::As)?;
        let query = self.parse_query()?;
        CreateViewStatement::new(if_not_exists, name, columns, comment, query, self.span_from(start))
            .map(Statement::CreateView)
    }

    fn parse_create_database(&mut self, start: usize) -> Result<CreateDatabaseStatement, ParseError> {
        if !self.eat_keyword(Keyword::Schema) {
            self.expect_keyword(Keyword::Database)?;
        }
        let if_not_exists = self.parse_if_not_exists();
        let name = self.parse_object_name()?;
        let properties = if self.eat_keyword(Keyword::Properties) {
            Some(self.parse_property_list()?)
        } else {
            None
        };
        CreateDatabaseStatement::new(if_not_exists, name, properties, self.span_from(start))
    }

    fn parse_alter(&mut self) -> Result<Statement, ParseError> {
        let start_pos = self.pos;
        let start = self.expect_keyword(Keyword::Alter)?.start;
        if !self.eat_keyword(Keyword::Table) {
            return self.parse_unsupported(start_pos, 2);
        }
        let name = self.parse_object_name()?;
        let mut actions = Vec::new();
        loop {
            match self.parse_alter_action()? {
                Some(action) => actions.push(action),
                None => return self.parse_unsupported(start_pos, 2),
            }
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        if !self.at_statement_end() {
            return self.parse_unsupported(start_pos, 2);
        }
        AlterTableStatement::new(name, actions, self.span_from(start)).map(Statement::AlterTable)
    }

    fn parse_alter_action(&mut self) -> Result<Option<AlterTableAction>, ParseError> {
        let start = self.current().span.start;
        let op = match self.current().kind {
            TokenKind::Keyword(Keyword::Add | Keyword::Modify)
                if self.peek_keyword(1, Keyword::Column) =>
            {
                let add = self.check_keyword(Keyword::Add);
                self.advance();
                self.advance();
                let Some(column) = self.parse_column_def()? else {
                    return Ok(None);
                };
                if add {
                    AlterOperation::AddColumn(column)
                } else {
                    AlterOperation::ModifyColumn(column)
                }
            }
            TokenKind::Keyword(Keyword::Drop) if self.peek_keyword(1, Keyword::Column) => {
                self.advance();
                self.advance();
                AlterOperation::DropColumn(self.parse_identifier()?)
            }
            TokenKind::Keyword(Keyword::Rename) if self.peek_keyword(1, Keyword::Column) => {
                self.advance();
                self.advance();
                let from = self.parse_identifier()?;
                let to = self.parse_identifier()?;
                AlterOperation::RenameColumn { from, to }
            }
            TokenKind::Keyword(Keyword::Rename) if self.is_name_at(1) => {
                self.advance();
                AlterOperation::RenameTable(self.parse_identifier()?)
            }
            TokenKind::Keyword(Keyword::Set) if matches!(self.peek_kind(1), TokenKind::LeftParen) => {
                self.advance();
                AlterOperation::SetProperties(self.parse_property_list()?)
            }
            _ => return Ok(None),
        };
        AlterTableAction::new(op, self.span_from(start)).map(Some)
    }

    fn parse_drop(&mut self) -> Result<Statement, ParseError> {
        let start_pos = self.pos;
        let start = self.expect_keyword(Keyword::Drop)?.start;
        let (object_type, alias) = match self.current().kind {
            TokenKind::Keyword(Keyword::Table) => (ObjectType::Table, false),
            TokenKind::Keyword(Keyword::View) => (ObjectType::View, false),
            TokenKind::Keyword(Keyword::Database) => (ObjectType::Database, false),
            TokenKind::Keyword(Keyword::Schema) => (ObjectType::Database, true),
            _ => return self.parse_unsupported(start_pos, 2),
        };
        self.advance();
        let if_exists = self.parse_if_exists();
        let name = self.parse_object_name()?;
        let force = self.eat_keyword(Keyword::Force);
        let statement = Statement::Drop(DropStatement::new(
            object_type,
            if_exists,
            name,
            force,
            self.span_from(start),
        )?);
        if alias {
            AliasStatement::new(AliasSyntax::DropSchema, statement).map(Statement::Alias)
        } else {
            Ok(statement)
        }
    }

    fn parse_truncate(&mut self) -> Result<Statement, ParseError> {
        let start = self.expect_keyword(Keyword::Truncate)?.start;
        self.eat_keyword(Keyword::Table);
        let name = self.parse_object_name()?;
        let partition = self.parse_optional_partition()?;
        TruncateStatement::new(name, partition, self.span_from(start)).map(Statement::Truncate)
    }

    fn parse_show(&mut self) -> Result<Statement, ParseError> {
        let start_pos = self.pos;
        let start = self.expect_keyword(Keyword::Show)?.start;
        let full = self.check_keyword(Keyword::Full)
            && matches!(
                self.peek_kind(1),
                TokenKind::Keyword(Keyword::Tables | Keyword::Columns | Keyword::Fields)
            );
        if full {
            self.advance();
        }

        let mut alias = None;
        let target = match self.current().kind {
            TokenKind::Keyword(Keyword::Tables) => {
                self.advance();
                let database = if self.eat_keyword(Keyword::From) || self.eat_keyword(Keyword::In) {
                    Some(self.parse_object_name()?)
                } else {
                    None
                };
                ShowTarget::Tables {
                    full,
                    database,
                    filter: self.parse_show_filter()?,
                }
            }
            TokenKind::Keyword(Keyword::Databases | Keyword::Schemas) => {
                if self.advance().as_keyword() == Some(Keyword::Schemas) {
                    alias = Some(AliasSyntax::ShowSchemas);
                }
                ShowTarget::Databases {
                    filter: self.parse_show_filter()?,
                }
            }
            TokenKind::Keyword(Keyword::Columns | Keyword::Fields) => {
                if self.advance().as_keyword() == Some(Keyword::Fields) {
                    alias = Some(AliasSyntax::ShowFields);
                }
                if !self.eat_keyword(Keyword::From) {
                    self.expect_keyword(Keyword::In)?;
                }
                let table = self.parse_object_name()?;
                let database = if self.eat_keyword(Keyword::From) || self.eat_keyword(Keyword::In) {
                    Some(self.parse_object_name()?)
                } else {
                    None
                };
                ShowTarget::Columns {
                    full,
                    table,
                    database,
                    filter: self.parse_show_filter()?,
                }
            }
            TokenKind::Keyword(Keyword::Create) if self.peek_keyword(1, Keyword::Table) => {
                self.advance();
                self.advance();
                ShowTarget::CreateTable {
                    name: self.parse_object_name()?,
                }
            }
            TokenKind::Keyword(Keyword::Global | Keyword::Session | Keyword::Variables) => {
                let scope = match self.current().kind {
                    TokenKind::Keyword(Keyword::Global) => Some(VariableScope::Global),
                    TokenKind::Keyword(Keyword::Session) => Some(VariableScope::Session),
                    _ => None,
                };
                if scope.is_some() {
                    if !self.peek_keyword(1, Keyword::Variables) {
                        return self.parse_unsupported(start_pos, 3);
                    }
                    self.advance();
                }
                self.expect_keyword(Keyword::Variables)?;
                ShowTarget::Variables {
                    scope,
                    filter: self.parse_show_filter()?,
                }
            }
            _ => return self.parse_unsupported(start_pos, 2),
        };

        let statement = Statement::Show(ShowStatement::new(target, self.span_from(start))?);
        match alias {
            Some(syntax) => AliasStatement::new(syntax, statement).map(Statement::Alias),
            None => Ok(statement),
        }
    }

    fn parse_show_filter(&mut self) -> Result<Option<ShowFilter>, ParseError> {
        if self.eat_keyword(Keyword::Like) {
            Ok(Some(ShowFilter::Like(self.parse_string_literal()?)))
        } else if self.eat_keyword(Keyword::Where) {
            Ok(Some(ShowFilter::Where(self.parse_expr()?)))
        } else {
            Ok(None)
        }
    }

    fn parse_describe(&mut self) -> Result<Statement, ParseError> {
        let token = self.advance();
        let table = self.parse_object_name()?;
        let statement = Statement::Describe(DescribeStatement::new(
            table,
            self.span_from(token.span.start),
        )?);
        if token.as_keyword() == Some(Keyword::Desc) {
            AliasStatement::new(AliasSyntax::Desc, statement).map(Statement::Alias)
        } else {
            Ok(statement)
        }
    }

    fn parse_use(&mut self) -> Result<Statement, ParseError> {
        let start = self.expect_keyword(Keyword::Use)?.start;
        let database = self.parse_object_name()?;
        UseStatement::new(database, self.span_from(start)).map(Statement::Use)
    }

    fn parse_set(&mut self) -> Result<Statement, ParseError> {
        let start_pos = self.pos;
        let start = self.expect_keyword(Keyword::Set)?.start;
        let assignment_form = match self.current().kind {
            TokenKind::Keyword(Keyword::Global | Keyword::Session) | TokenKind::At => true,
            TokenKind::Identifier(ref word) => {
                !SET_COMMANDS.iter().any(|command| command.eq_ignore_ascii_case(word))
                    && matches!(self.peek_kind(1), TokenKind::Eq)
            }
            _ => self.is_name_at(0) && matches!(self.peek_kind(1), TokenKind::Eq),
        };
        if !assignment_form {
            return self.parse_unsupported(start_pos, 2);
        }

        let mut assignments = Vec::new();
        loop {
            let item_start = self.current().span.start;
            let scope = if self.eat_keyword(Keyword::Global) {
                VariableScope::Global
            } else if self.eat_keyword(Keyword::Session) {
                VariableScope::Session
            } else if self.eat(&TokenKind::At) {
                VariableScope::User
            } else {
                VariableScope::Session
            };
            let name = self.parse_identifier()?;
            self.expect(&TokenKind::Eq)?;
            let value = self.parse_expr()?;
            assignments.push(VariableAssignment::new(
                scope,
                name,
                value,
                self.span_from(item_start),
            )?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        SetStatement::new(assignments, self.span_from(start)).map(Statement::Set)
    }

    fn parse_grant_or_revoke(&mut self) -> Result<Statement, ParseError> {
        let start_pos = self.pos;
        let grant = self.check_keyword(Keyword::Grant);
        let start = self.advance().span.start;

        let mut privileges = Vec::new();
        loop {
            let token = self.current().clone();
            match token.kind {
                TokenKind::Identifier(_) | TokenKind::Keyword(_) => {
                    self.advance();
                    privileges.push(Identifier::Simple(Ident::new(self.token_text(&token), token.span)?));
                }
                _ => return self.parse_unsupported(start_pos, 1),
            }
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        if !self.eat_keyword(Keyword::On) {
            return self.parse_unsupported(start_pos, 1);
        }

        let object_start = self.current().span.start;
        while matches!(
            self.current().kind,
            TokenKind::Identifier(_)
                | TokenKind::QuotedIdentifier(_)
                | TokenKind::Star
                | TokenKind::Dot
        ) || self.is_name_at(0)
        {
            self.advance();
        }
        if self.prev_end <= object_start {
            return Err(self.error_expected("privilege object"));
        }
        let object_span = self.span_from(object_start);
        let object = GrantObject {
            pattern: object_span.slice(self.source).unwrap_or_default().to_string(),
            span: object_span,
        };

        let direction = if grant { Keyword::To } else { Keyword::From };
        if !self.eat_keyword(direction) {
            return self.parse_unsupported(start_pos, 1);
        }
        let grantee = if self.eat_keyword(Keyword::Role) {
            Grantee::Role(self.parse_string_literal()?)
        } else {
            let name = self.parse_string_literal()?;
            let host = if self.eat(&TokenKind::At) {
                Some(self.parse_string_literal()?)
            } else {
                None
            };
            Grantee::User { name, host }
        };

        let span = self.span_from(start);
        if grant {
            GrantStatement::new(privileges, object, grantee, span).map(Statement::Grant)
        } else {
            RevokeStatement::new(privileges, object, grantee, span).map(Statement::Revoke)
        }
    }

    fn parse_transaction(&mut self) -> Result<Statement, ParseError> {
        let token = self.advance();
        let start = token.span.start;
        let (action, alias) = match token.as_keyword() {
            Some(Keyword::Start) => {
                self.expect_keyword(Keyword::Transaction)?;
                let label = self.parse_optional_label()?;
                (TransactionAction::Begin { label }, true)
            }
            Some(Keyword::Begin) => {
                let label = self.parse_optional_label()?;
                (TransactionAction::Begin { label }, false)
            }
            Some(Keyword::Commit) => {
                self.eat_keyword(Keyword::Work);
                (TransactionAction::Commit, false)
            }
            _ => {
                self.eat_keyword(Keyword::Work);
                (TransactionAction::Rollback, false)
            }
        };
        let statement =
            Statement::Transaction(TransactionStatement::new(action, self.span_from(start))?);
        if alias {
            AliasStatement::new(AliasSyntax::StartTransaction, statement).map(Statement::Alias)
        } else {
            Ok(statement)
        }
    }

    fn parse_explain(&mut self) -> Result<Statement, ParseError> {
        let start = self.expect_keyword(Keyword::Explain)?.start;
        let level = if self.eat_keyword(Keyword::Verbose) {
            ExplainLevel::Verbose
        } else if self.eat_keyword(Keyword::Graph) {
            ExplainLevel::Graph
        } else if self.eat_keyword(Keyword::Plan) {
            ExplainLevel::Plan
        } else {
            ExplainLevel::Normal
        };
        let statement = self.parse_one()?;
        let body_type = match statement.canonical() {
            Statement::Unsupported(body) => body.statement_type().to_owned(),
            Statement::Explain(_) => String::from("EXPLAIN"),
            _ => {
                return ExplainStatement::new(level, statement, self.span_from(start))
                    .map(Statement::Explain);
            }
        };
        // nothing to plan; the whole statement is kept as an unmodelled command
        let span = self.span_from(start);
        let statement_type = format!("EXPLAIN {body_type}");
        debug!(%statement_type, "unmodelled statement");
        let text = span.slice(self.source).unwrap_or_default();
        UnsupportedStatement::new(statement_type, text, span).map(Statement::Unsupported)
    }

    fn parse_kill(&mut self) -> Result<Statement, ParseError> {
        let start = self.expect_keyword(Keyword::Kill)?.start;
        let target = if self.eat_keyword(Keyword::Query) {
            KillTarget::Query
        } else {
            self.eat_keyword(Keyword::Connection);
            KillTarget::Connection
        };
        let token = self.current().clone();
        let id = match &token.kind {
            TokenKind::Integer(value) => Literal::Integer(IntegerLiteral::new(*value, token.span)?),
            TokenKind::String(value) => Literal::String(StringLiteral::new(value.clone(), token.span)?),
            _ => return Err(self.error_expected("connection or query id")),
        };
        self.advance();
        KillStatement::new(target, id, self.span_from(start)).map(Statement::Kill)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::NodeKind;

    fn parse(sql: &str) -> Result<Statement, ParseError> {
        Parser::new(sql).parse_statement()
    }

    #[test]
    fn test_empty_input() {
        let err = parse("").unwrap_err();
        assert!(err.is_syntax());
        assert_eq!(err.found, Some(TokenKind::Eof));
    }

    #[test]
    fn test_trailing_garbage() {
        let err = parse("SELECT 1 2").unwrap_err();
        assert_eq!(err.span, Span::new(9, 10));
    }

    #[test]
    fn test_trailing_semicolons() {
        assert!(parse("SELECT 1;;").is_ok());
    }

    #[test]
    fn test_unmodelled_command_keeps_text() {
        let Statement::Unsupported(statement) = parse("LOAD LABEL db.l1 (DATA INFILE('x'))").unwrap()
        else {
            panic!("expected unsupported statement");
        };
        assert_eq!(statement.statement_type(), "LOAD");
        assert_eq!(statement.text(), "LOAD LABEL db.l1 (DATA INFILE('x'))");
    }

    #[test]
    fn test_create_table_partition_falls_back() {
        let sql = "CREATE TABLE t (a INT) PARTITION BY RANGE(a) ()";
        let statement = parse(sql).unwrap();
        assert_eq!(statement.kind(), NodeKind::Unsupported);
        let Statement::Unsupported(unsupported) = statement else {
            unreachable!();
        };
        assert_eq!(unsupported.statement_type(), "CREATE TABLE");
        assert_eq!(unsupported.text(), sql);
    }

    #[test]
    fn test_set_password_is_unmodelled() {
        let statement = parse("SET PASSWORD = PASSWORD('x')").unwrap();
        assert!(statement.is_unsupported());
    }

    #[test]
    fn test_strict_identifiers() {
        let mut parser = Parser::with_config("SELECT a AS select FROM t", ParserConfig::strict());
        let err = parser.parse_statement().unwrap_err();
        assert_eq!(err.found, Some(TokenKind::Keyword(Keyword::Select)));
    }

    #[test]
    fn test_max_statements() {
        let config = ParserConfig {
            max_statements: 2,
            ..ParserConfig::default()
        };
        let results = Parser::with_config("SELECT 1; SELECT 2; SELECT 3", config).parse_statements();
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_ok());
        assert!(results[2].is_err());
    }
}
