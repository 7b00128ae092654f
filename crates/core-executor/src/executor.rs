use crate::config::ExecutorConfig;
use crate::convert::{field_names, to_result_set};
use crate::error::{self as ex_error, ExecutionError, ExecutionResult};
use crate::guard::{TableName, ValidatedQuery};
use async_trait::async_trait;
use core_checker::ResultSet;
use snafu::ResultExt;
use sqlx::postgres::PgConnection;
use sqlx::{Executor as _, PgPool, Postgres, Row as _, Statement as _, Transaction};
use std::future::Future;
use std::time::Duration;

// client side slack on top of the server side statement timeout
const CLIENT_GRACE: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq)]
pub enum ReferenceRun {
    Completed(ResultSet),
    Failed(String),
}

impl From<ExecutionResult<ResultSet>> for ReferenceRun {
    fn from(result: ExecutionResult<ResultSet>) -> Self {
        match result {
            Ok(result_set) => Self::Completed(result_set),
            Err(err) => Self::Failed(err.to_string()),
        }
    }
}

/// Result of running a student query and, optionally, the stored solution
/// inside the same read-only transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionRun {
    pub student: ResultSet,
    pub reference: Option<ReferenceRun>,
}

#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn run_submission(
        &self,
        student: &ValidatedQuery,
        reference: Option<&str>,
    ) -> ExecutionResult<SubmissionRun>;

    async fn preview_table(&self, table: &TableName, limit: u32) -> ExecutionResult<ResultSet>;
}

pub struct PgQueryExecutor {
    pool: PgPool,
    config: ExecutorConfig,
}

impl PgQueryExecutor {
    #[must_use]
    pub const fn new(pool: PgPool, config: ExecutorConfig) -> Self {
        Self { pool, config }
    }

    #[must_use]
    pub const fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    async fn begin_read_only(&self) -> ExecutionResult<Transaction<'static, Postgres>> {
        let mut tx = self.pool.begin().await.context(ex_error::ConnectionSnafu)?;
        sqlx::query("SET TRANSACTION READ ONLY")
            .execute(&mut *tx)
            .await
            .context(ex_error::ConnectionSnafu)?;
        sqlx::query(&format!(
            "SET LOCAL statement_timeout = {}",
            self.config.statement_timeout.as_millis()
        ))
        .execute(&mut *tx)
        .await
        .context(ex_error::ConnectionSnafu)?;
        Ok(tx)
    }

    async fn submission_in_tx(
        &self,
        student: &str,
        reference: Option<&str>,
    ) -> ExecutionResult<SubmissionRun> {
        let timeout = self.config.statement_timeout;
        let mut tx = self.begin_read_only().await?;
        let result = match bounded(timeout, fetch_result_set(&mut tx, student)).await {
            Ok(student) => {
                let reference = match reference {
                    Some(reference) => Some(ReferenceRun::from(
                        bounded(timeout, fetch_result_set(&mut tx, reference)).await,
                    )),
                    None => None,
                };
                Ok(SubmissionRun { student, reference })
            }
            Err(err) => Err(err),
        };
        rollback(tx).await;
        result
    }

    async fn preview_in_tx(&self, sql: &str) -> ExecutionResult<ResultSet> {
        let mut tx = self.begin_read_only().await?;
        let result = bounded(self.config.statement_timeout, fetch_result_set(&mut tx, sql)).await;
        rollback(tx).await;
        result
    }
}

#[async_trait]
impl QueryExecutor for PgQueryExecutor {
    #[tracing::instrument(
        name = "QueryExecutor::run_submission",
        level = "debug",
        skip(self),
        err
    )]
    async fn run_submission(
        &self,
        student: &ValidatedQuery,
        reference: Option<&str>,
    ) -> ExecutionResult<SubmissionRun> {
        self.submission_in_tx(student.as_str(), reference).await
    }

    #[tracing::instrument(name = "QueryExecutor::preview_table", level = "debug", skip(self), err)]
    async fn preview_table(&self, table: &TableName, limit: u32) -> ExecutionResult<ResultSet> {
        let sql = format!("SELECT * FROM {table} LIMIT {limit}");
        self.preview_in_tx(&sql).await
    }
}

/// Bounds a single statement by its server side timeout plus client slack.
async fn bounded<T>(
    timeout: Duration,
    fut: impl Future<Output = ExecutionResult<T>> + Send,
) -> ExecutionResult<T> {
    tokio::time::timeout(timeout + CLIENT_GRACE, fut)
        .await
        .map_err(|_| ExecutionError::Timeout {
            timeout_ms: timeout.as_millis(),
        })?
}

async fn rollback(tx: Transaction<'static, Postgres>) {
    if let Err(err) = tx.rollback().await {
        tracing::warn!(error = %err, "Failed to roll back read-only transaction");
    }
}

async fn fetch_result_set(conn: &mut PgConnection, sql: &str) -> ExecutionResult<ResultSet> {
    let rows = sqlx::query(sql)
        .persistent(false)
        .fetch_all(&mut *conn)
        .await
        .map_err(|err| ExecutionError::from_query(&err))?;
    let fields = match rows.first() {
        Some(first) => field_names(first.columns())?,
        // no rows to read column names from
        None => {
            let statement = (&mut *conn)
                .prepare(sql)
                .await
                .map_err(|err| ExecutionError::from_query(&err))?;
            field_names(statement.columns())?
        }
    };
    to_result_set(fields, &rows)
}
