use regex::Regex;
use snafu::prelude::*;
use sqlparser::dialect::PostgreSqlDialect;
use sqlparser::tokenizer::{Token, Tokenizer};
use std::fmt::Display;
use std::sync::LazyLock;

#[allow(clippy::unwrap_used)]
static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").unwrap());

#[derive(Debug, Snafu, PartialEq, Eq)]
#[snafu(visibility(pub(crate)))]
pub enum GuardError {
    #[snafu(display("Query is empty"))]
    EmptyQuery,

    #[snafu(display("Only a single SQL statement is allowed"))]
    MultipleStatements,

    #[snafu(display("Only SELECT queries are allowed"))]
    NotASelect,

    #[snafu(display("Invalid table name: {name}"))]
    InvalidIdentifier { name: String },
}

pub type GuardResult<T> = std::result::Result<T, GuardError>;

/// Single SELECT statement that passed validation and may reach the executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQuery(String);

impl ValidatedQuery {
    /// Strips one trailing `;` and surrounding whitespace, then checks that
    /// exactly one SELECT statement remains.
    pub fn parse(raw: &str) -> GuardResult<Self> {
        let trimmed = raw.trim();
        let text = trimmed.strip_suffix(';').unwrap_or(trimmed).trim();

        ensure!(!text.is_empty(), EmptyQuerySnafu);
        ensure!(!has_statement_terminator(text), MultipleStatementsSnafu);
        ensure!(text.to_uppercase().starts_with("SELECT"), NotASelectSnafu);

        Ok(Self(text.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for ValidatedQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Table name safe to interpolate into SQL text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableName(String);

impl TableName {
    pub fn parse(name: &str) -> GuardResult<Self> {
        ensure!(
            IDENTIFIER.is_match(name),
            InvalidIdentifierSnafu {
                name: name.to_string()
            }
        );
        Ok(Self(name.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TableName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// True if `sql` contains a `;` token outside of literals, quoted identifiers
/// and comments. Text the tokenizer rejects counts any `;` as a terminator.
fn has_statement_terminator(sql: &str) -> bool {
    match Tokenizer::new(&PostgreSqlDialect {}, sql).tokenize() {
        Ok(tokens) => tokens.iter().any(|token| matches!(token, Token::SemiColon)),
        Err(err) => {
            tracing::debug!(error = %err, "Query text did not tokenize");
            sql.contains(';')
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_single_select() {
        let query = ValidatedQuery::parse("  select * from users ;  \n").map(ValidatedQuery::into_inner);
        assert_eq!(query, Ok("select * from users".to_string()));
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(ValidatedQuery::parse("   "), Err(GuardError::EmptyQuery));
        assert_eq!(ValidatedQuery::parse(" ; "), Err(GuardError::EmptyQuery));
    }

    #[test]
    fn rejects_multiple_statements() {
        assert_eq!(
            ValidatedQuery::parse("SELECT 1; DROP TABLE users;"),
            Err(GuardError::MultipleStatements)
        );
        assert_eq!(
            ValidatedQuery::parse("SELECT 1;;"),
            Err(GuardError::MultipleStatements)
        );
    }

    #[test]
    fn rejects_non_select() {
        assert_eq!(
            ValidatedQuery::parse("DELETE FROM users"),
            Err(GuardError::NotASelect)
        );
        assert_eq!(
            ValidatedQuery::parse("WITH x AS (SELECT 1) DELETE FROM users"),
            Err(GuardError::NotASelect)
        );
    }

    #[test]
    fn semicolons_in_literals_and_comments_are_not_terminators() {
        for query in [
            "SELECT 'a;b' AS v",
            "SELECT 'it''s; fine' AS v",
            r#"SELECT 1 AS "odd;name""#,
            "SELECT 1 -- trailing; comment",
            "SELECT /* ; */ 1",
            "SELECT 1 -- c;\n;",
        ] {
            assert!(ValidatedQuery::parse(query).is_ok(), "{query}");
        }
        assert_eq!(
            ValidatedQuery::parse("SELECT 'a'; SELECT 'b'"),
            Err(GuardError::MultipleStatements)
        );
        assert_eq!(
            ValidatedQuery::parse("SELECT /* x */ 1; DELETE FROM t"),
            Err(GuardError::MultipleStatements)
        );
    }

    #[test]
    fn escape_string_does_not_hide_terminators() {
        assert_eq!(
            ValidatedQuery::parse(r"SELECT E'\''; DELETE FROM users; --'"),
            Err(GuardError::MultipleStatements)
        );
        assert!(ValidatedQuery::parse(r"SELECT E'it\'s; fine' AS v").is_ok());
        assert!(ValidatedQuery::parse("SELECT $$a;b$$ AS v").is_ok());
    }

    #[test]
    fn untokenizable_text_rejects_any_semicolon() {
        assert_eq!(
            ValidatedQuery::parse("SELECT 'open; DELETE FROM users"),
            Err(GuardError::MultipleStatements)
        );
    }

    #[test]
    fn table_names() {
        assert!(TableName::parse("order_items2").is_ok());
        assert_eq!(
            TableName::parse("users; DROP TABLE x"),
            Err(GuardError::InvalidIdentifier {
                name: "users; DROP TABLE x".to_string()
            })
        );
        assert!(TableName::parse("").is_err());
        assert!(TableName::parse("public.users").is_err());
    }
}
