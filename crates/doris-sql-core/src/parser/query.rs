//! Query recognition: WITH, set operations, SELECT and FROM.

use crate::ast::{
    Cte, DerivedTable, FromClause, GroupByClause, HavingClause, Join, JoinCriteria, JoinType,
    LateralView, LimitClause, LimitStyle, NamedTable, NullsOrder, OrderByClause, OrderItem,
    Query, QueryBody, Relation, Select, SelectItem, SelectList, SetOperation, SetOperator,
    SetQuantifier, SortDirection, TableFactor, WhereClause, With,
};
use crate::error::ParseError;
use crate::lexer::{Keyword, TokenKind};

use super::Parser;

impl Parser<'_> {
    /// Parses `[WITH ...] body [ORDER BY ...] [LIMIT ...]`.
    pub(super) fn parse_query(&mut self) -> Result<Query, ParseError> {
        self.nested(|parser| {
            let start = parser.current().span.start;
            let with = if parser.check_keyword(Keyword::With) {
                Some(parser.parse_with()?)
            } else {
                None
            };
            let body = parser.parse_query_body()?;
            let order_by = if parser.check_keyword(Keyword::Order) {
                Some(parser.parse_order_by()?)
            } else {
                None
            };
            let limit = if parser.check_keyword(Keyword::Limit) {
                Some(parser.parse_limit()?)
            } else {
                None
            };
            Query::new(with, body, order_by, limit, parser.span_from(start))
        })
    }

    fn parse_with(&mut self) -> Result<With, ParseError> {
        let start = self.expect_keyword(Keyword::With)?.start;
        let recursive = self.eat_keyword(Keyword::Recursive);
        let mut ctes = Vec::new();
        loop {
            let cte_start = self.current().span.start;
            let name = self.parse_identifier()?;
            let columns = if self.check(&TokenKind::LeftParen) {
                self.parse_parenthesized_identifiers()?
            } else {
                Vec::new()
            };
            self.expect_keyword(Keyword::As)?;
            self.expect(&TokenKind::LeftParen)?;
            let query = self.parse_query()?;
            self.expect(&TokenKind::RightParen)?;
            ctes.push(Cte::new(name, columns, query, self.span_from(cte_start))?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        With::new(recursive, ctes, self.span_from(start))
    }

    /// Parses set operations, left-associative.
    fn parse_query_body(&mut self) -> Result<QueryBody, ParseError> {
        let mut body = self.parse_query_primary()?;
        loop {
            let op = match self.current().kind {
                TokenKind::Keyword(Keyword::Union) => SetOperator::Union,
                TokenKind::Keyword(Keyword::Intersect) => SetOperator::Intersect,
                TokenKind::Keyword(Keyword::Except | Keyword::Minus) => SetOperator::Except,
                _ => break,
            };
            self.advance();
            let quantifier = if self.eat_keyword(Keyword::All) {
                SetQuantifier::All
            } else if self.eat_keyword(Keyword::Distinct) {
                SetQuantifier::Distinct
            } else {
                SetQuantifier::None
            };
            let right = self.parse_query_primary()?;
            body = QueryBody::SetOperation(Box::new(SetOperation::new(op, quantifier, body, right)?));
        }
        Ok(body)
    }

    fn parse_query_primary(&mut self) -> Result<QueryBody, ParseError> {
        if self.check(&TokenKind::LeftParen) {
            self.advance();
            let query = self.parse_query()?;
            self.expect(&TokenKind::RightParen)?;
            Ok(QueryBody::Nested(Box::new(query)))
        } else if self.check_keyword(Keyword::Select) {
            self.parse_select().map(|select| QueryBody::Select(Box::new(select)))
        } else {
            Err(self.error_expected("SELECT or '('"))
        }
    }

    fn parse_select(&mut self) -> Result<Select, ParseError> {
        let start = self.expect_keyword(Keyword::Select)?.start;
        let distinct = if self.eat_keyword(Keyword::Distinct) {
            true
        } else {
            self.eat_keyword(Keyword::All);
            false
        };

        let mut items = Vec::new();
        loop {
            let expr = self.parse_expr()?;
            let alias = self.parse_optional_alias()?;
            items.push(SelectItem::new(expr, alias)?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        let projection = SelectList::new(items)?;

        let from = if self.check_keyword(Keyword::From) {
            Some(self.parse_from_clause(Keyword::From)?)
        } else {
            None
        };
        let selection = self.parse_optional_where()?;
        let group_by = if self.check_keyword(Keyword::Group) {
            let group_start = self.advance().span.start;
            self.expect_keyword(Keyword::By)?;
            let exprs = self.parse_expr_list()?;
            Some(GroupByClause::new(exprs, self.span_from(group_start))?)
        } else {
            None
        };
        let having = if self.check_keyword(Keyword::Having) {
            let having_start = self.advance().span.start;
            let condition = self.parse_expr()?;
            Some(HavingClause::new(condition, self.span_from(having_start))?)
        } else {
            None
        };

        Select::new(
            distinct,
            projection,
            from,
            selection,
            group_by,
            having,
            self.span_from(start),
        )
    }

    pub(super) fn parse_optional_where(&mut self) -> Result<Option<WhereClause>, ParseError> {
        if !self.check_keyword(Keyword::Where) {
            return Ok(None);
        }
        let start = self.advance().span.start;
        let condition = self.parse_expr()?;
        WhereClause::new(condition, self.span_from(start)).map(Some)
    }

    /// Parses `keyword relation [, relation]*`; used for FROM and USING.
    pub(super) fn parse_from_clause(&mut self, keyword: Keyword) -> Result<FromClause, ParseError> {
        let start = self.expect_keyword(keyword)?.start;
        let mut relations = Vec::new();
        loop {
            let factor = self.parse_table_factor()?;
            let mut joins = Vec::new();
            while let Some(join) = self.parse_join()? {
                joins.push(join);
            }
            relations.push(Relation::new(factor, joins)?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        FromClause::new(relations, self.span_from(start))
    }

    fn parse_table_factor(&mut self) -> Result<TableFactor, ParseError> {
        let start = self.current().span.start;
        if self.check(&TokenKind::LeftParen) {
            self.advance();
            let query = self.parse_query()?;
            self.expect(&TokenKind::RightParen)?;
            let alias = self.parse_optional_alias()?;
            let lateral_views = self.parse_lateral_views()?;
            return DerivedTable::new(query, alias, lateral_views, self.span_from(start))
                .map(TableFactor::Derived);
        }

        let name = self.parse_object_name()?;
        let partition = self.parse_optional_partition()?;
        let alias = self.parse_optional_alias()?;
        let lateral_views = self.parse_lateral_views()?;
        NamedTable::new(name, partition, alias, lateral_views, self.span_from(start))
            .map(TableFactor::Named)
    }

    /// Parses `LATERAL VIEW [OUTER] fn(...) alias AS col [, col]*` repeatedly.
    fn parse_lateral_views(&mut self) -> Result<Vec<LateralView>, ParseError> {
        let mut views = Vec::new();
        while self.check_keyword(Keyword::Lateral) {
            let start = self.advance().span.start;
            self.expect_keyword(Keyword::View)?;
            let outer = self.eat_keyword(Keyword::Outer);
            let function = self.parse_function_call()?;
            let table_alias = self.parse_identifier()?;
            self.expect_keyword(Keyword::As)?;
            let mut column_aliases = vec![self.parse_identifier()?];
            while self.check(&TokenKind::Comma)
                && self.is_name_at(1)
                && !matches!(
                    self.peek_kind(2),
                    TokenKind::Dot | TokenKind::Identifier(_) | TokenKind::QuotedIdentifier(_)
                )
            {
                self.advance();
                column_aliases.push(self.parse_identifier()?);
            }
            views.push(LateralView::new(
                outer,
                function,
                table_alias,
                column_aliases,
                self.span_from(start),
            )?);
        }
        Ok(views)
    }

    fn parse_join(&mut self) -> Result<Option<Join>, ParseError> {
        let start = self.current().span.start;
        let join_type = match self.current().kind {
            TokenKind::Keyword(Keyword::Join) => JoinType::Inner,
            TokenKind::Keyword(Keyword::Inner) => {
                self.advance();
                JoinType::Inner
            }
            TokenKind::Keyword(Keyword::Cross) => {
                self.advance();
                JoinType::Cross
            }
            TokenKind::Keyword(Keyword::Full) => {
                self.advance();
                self.eat_keyword(Keyword::Outer);
                JoinType::FullOuter
            }
            TokenKind::Keyword(side @ (Keyword::Left | Keyword::Right)) => {
                self.advance();
                let left = side == Keyword::Left;
                if self.eat_keyword(Keyword::Semi) {
                    if left { JoinType::LeftSemi } else { JoinType::RightSemi }
                } else if self.eat_keyword(Keyword::Anti) {
                    if left { JoinType::LeftAnti } else { JoinType::RightAnti }
                } else {
                    self.eat_keyword(Keyword::Outer);
                    if left { JoinType::LeftOuter } else { JoinType::RightOuter }
                }
            }
            _ => return Ok(None),
        };
        self.expect_keyword(Keyword::Join)?;
        let factor = self.parse_table_factor()?;

        let criteria = if join_type == JoinType::Cross {
            None
        } else if self.eat_keyword(Keyword::On) {
            Some(JoinCriteria::On(self.parse_expr()?))
        } else if self.eat_keyword(Keyword::Using) {
            Some(JoinCriteria::Using(self.parse_parenthesized_identifiers()?))
        } else if join_type.requires_criteria() {
            return Err(self.error_expected("ON or USING"));
        } else {
            None
        };
        Join::new(join_type, factor, criteria, self.span_from(start)).map(Some)
    }

    pub(super) fn parse_order_by(&mut self) -> Result<OrderByClause, ParseError> {
        let start = self.expect_keyword(Keyword::Order)?.start;
        self.expect_keyword(Keyword::By)?;
        let items = self.parse_order_items()?;
        OrderByClause::new(items, self.span_from(start))
    }

    /// Parses `expr [ASC|DESC] [NULLS FIRST|LAST]` items after `ORDER BY`.
    pub(super) fn parse_order_items(&mut self) -> Result<Vec<OrderItem>, ParseError> {
        let mut items = Vec::new();
        loop {
            let start = self.current().span.start;
            let expr = self.parse_expr()?;
            let direction = if self.eat_keyword(Keyword::Asc) {
                Some(SortDirection::Asc)
            } else if self.eat_keyword(Keyword::Desc) {
                Some(SortDirection::Desc)
            } else {
                None
            };
            let nulls = if self.eat_keyword(Keyword::Nulls) {
                if self.eat_keyword(Keyword::First) {
                    Some(NullsOrder::First)
                } else {
                    self.expect_keyword(Keyword::Last)?;
                    Some(NullsOrder::Last)
                }
            } else {
                None
            };
            items.push(OrderItem::new(expr, direction, nulls, self.span_from(start))?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        Ok(items)
    }

    /// Parses `LIMIT n [OFFSET m]` or `LIMIT m, n`.
    fn parse_limit(&mut self) -> Result<LimitClause, ParseError> {
        let start = self.expect_keyword(Keyword::Limit)?.start;
        let first = self.parse_expr()?;
        let (limit, offset, style) = if self.eat(&TokenKind::Comma) {
            let count = self.parse_expr()?;
            (count, Some(first), LimitStyle::Comma)
        } else if self.eat_keyword(Keyword::Offset) {
            let offset = self.parse_expr()?;
            (first, Some(offset), LimitStyle::LimitOffset)
        } else {
            (first, None, LimitStyle::LimitOffset)
        };
        LimitClause::new(limit, offset, style, self.span_from(start))
    }
}
