use crate::error::{self as ex_error, ExecutionError, ExecutionResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use core_checker::{ResultSet, Row, Value};
use snafu::ResultExt;
use sqlx::postgres::{PgColumn, PgRow};
use sqlx::{Column, Postgres, Row as _, TypeInfo};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Boolean,
    Int2,
    Int4,
    Int8,
    Float4,
    Float8,
    Numeric,
    Text,
    Uuid,
    Json,
    Date,
    Time,
    Timestamp,
    TimestampTz,
}

impl ColumnKind {
    fn from_type_name(name: &str) -> Option<Self> {
        let kind = match name {
            "BOOL" => Self::Boolean,
            "INT2" => Self::Int2,
            "INT4" => Self::Int4,
            "INT8" => Self::Int8,
            "FLOAT4" => Self::Float4,
            "FLOAT8" => Self::Float8,
            "NUMERIC" => Self::Numeric,
            "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => Self::Text,
            "UUID" => Self::Uuid,
            "JSON" | "JSONB" => Self::Json,
            "DATE" => Self::Date,
            "TIME" => Self::Time,
            "TIMESTAMP" => Self::Timestamp,
            "TIMESTAMPTZ" => Self::TimestampTz,
            _ => return None,
        };
        Some(kind)
    }
}

/// Column names in result order, rejecting duplicates.
pub fn field_names(columns: &[PgColumn]) -> ExecutionResult<Vec<String>> {
    let mut fields: Vec<String> = Vec::with_capacity(columns.len());
    for column in columns {
        let name = column.name();
        if fields.iter().any(|existing| existing == name) {
            return ex_error::DuplicateColumnSnafu { column: name }.fail();
        }
        fields.push(name.to_string());
    }
    Ok(fields)
}

pub fn to_result_set(fields: Vec<String>, rows: &[PgRow]) -> ExecutionResult<ResultSet> {
    let Some(first) = rows.first() else {
        return Ok(ResultSet::new(fields, vec![]));
    };
    let kinds = first
        .columns()
        .iter()
        .map(|column| {
            let type_name = column.type_info().name();
            ColumnKind::from_type_name(type_name).ok_or_else(|| ExecutionError::UnsupportedType {
                column: column.name().to_string(),
                type_name: type_name.to_string(),
            })
        })
        .collect::<ExecutionResult<Vec<_>>>()?;

    let rows = rows
        .iter()
        .map(|row| {
            fields
                .iter()
                .zip(&kinds)
                .enumerate()
                .map(|(index, (name, kind))| {
                    Ok((name.clone(), column_value(row, index, name, *kind)?))
                })
                .collect::<ExecutionResult<Row>>()
        })
        .collect::<ExecutionResult<Vec<_>>>()?;

    Ok(ResultSet::new(fields, rows))
}

fn decode<'r, T>(row: &'r PgRow, index: usize, column: &str) -> ExecutionResult<Option<T>>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get::<Option<T>, _>(index)
        .context(ex_error::DecodeSnafu { column })
}

fn column_value(row: &PgRow, index: usize, column: &str, kind: ColumnKind) -> ExecutionResult<Value> {
    let value = match kind {
        ColumnKind::Boolean => decode::<bool>(row, index, column)?.map(Value::Boolean),
        ColumnKind::Int2 => decode::<i16>(row, index, column)?.map(|v| Value::Integer(v.into())),
        ColumnKind::Int4 => decode::<i32>(row, index, column)?.map(|v| Value::Integer(v.into())),
        ColumnKind::Int8 => decode::<i64>(row, index, column)?.map(Value::Integer),
        // through text so 0.1::real stays 0.1 instead of its binary expansion
        ColumnKind::Float4 => decode::<f32>(row, index, column)?
            .map(|v| Value::Float(v.to_string().parse().unwrap_or_else(|_| f64::from(v)))),
        ColumnKind::Float8 => decode::<f64>(row, index, column)?.map(Value::Float),
        ColumnKind::Numeric => decode::<rust_decimal::Decimal>(row, index, column)?
            .map(|v| Value::Decimal(v.to_string())),
        ColumnKind::Text => decode::<String>(row, index, column)?.map(Value::Text),
        ColumnKind::Uuid => {
            decode::<uuid::Uuid>(row, index, column)?.map(|v| Value::Text(v.to_string()))
        }
        ColumnKind::Json => decode::<serde_json::Value>(row, index, column)?
            .map(|v| Value::Text(v.to_string())),
        ColumnKind::Date => decode::<NaiveDate>(row, index, column)?.map(Value::Date),
        ColumnKind::Time => decode::<NaiveTime>(row, index, column)?.map(Value::Time),
        ColumnKind::Timestamp => decode::<NaiveDateTime>(row, index, column)?
            .map(|v| Value::Timestamp(v.and_utc().fixed_offset())),
        ColumnKind::TimestampTz => decode::<DateTime<Utc>>(row, index, column)?
            .map(|v| Value::Timestamp(v.fixed_offset())),
    };
    Ok(value.unwrap_or(Value::Null))
}
