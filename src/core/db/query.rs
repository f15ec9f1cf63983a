/// Query Value and Result Module
///
/// This module defines the typed bound-parameter representation that crosses
/// the data-access boundary, the in-memory result of a SELECT, and the
/// stringification of PostgreSQL rows for display.
use crate::core::{MarqueeError, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use postgres::types::{ToSql, Type};
use postgres::Row;
use std::fmt;

/// A typed value bound to a statement placeholder.
///
/// Handlers never interpolate user input into SQL text; every value crosses
/// the boundary as one of these and is handed to the driver as a bound
/// parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Int(i32),
    Text(String),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
}

impl SqlValue {
    /// Borrows the value as a driver-level parameter.
    pub fn as_sql(&self) -> &(dyn ToSql + Sync) {
        match self {
            SqlValue::Int(v) => v,
            SqlValue::Text(v) => v,
            SqlValue::Date(v) => v,
            SqlValue::Time(v) => v,
            SqlValue::Timestamp(v) => v,
        }
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Int(v) => write!(f, "{}", v),
            SqlValue::Text(v) => write!(f, "{}", v),
            SqlValue::Date(v) => write!(f, "{}", v),
            SqlValue::Time(v) => write!(f, "{}", v),
            SqlValue::Timestamp(v) => write!(f, "{}", v),
        }
    }
}

/// Collects driver-level references for a parameter slice.
pub fn to_sql_refs(params: &[SqlValue]) -> Vec<&(dyn ToSql + Sync)> {
    params.iter().map(SqlValue::as_sql).collect()
}

/// Represents the result of a SQL query execution.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    /// Column names from the query result
    pub columns: Vec<String>,
    /// Rows of data as string values
    pub rows: Vec<Vec<String>>,
    /// Number of rows returned
    pub row_count: usize,
}

impl QueryResult {
    /// Creates a new QueryResult from column names and row data.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let row_count = rows.len();
        QueryResult {
            columns,
            rows,
            row_count,
        }
    }

    /// An empty result with no columns, as produced by a statement that
    /// returned nothing.
    pub fn empty() -> Self {
        QueryResult::new(Vec::new(), Vec::new())
    }
}

/// Builds a `QueryResult` from driver rows and the prepared statement's
/// column metadata. Headers come from the statement, so they survive an
/// empty result set.
pub fn rows_to_result(columns: &[postgres::Column], rows: &[Row]) -> Result<QueryResult> {
    let headers: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let mut record = Vec::with_capacity(headers.len());
        for idx in 0..headers.len() {
            record.push(format_column(row, idx)?);
        }
        out.push(record);
    }
    Ok(QueryResult::new(headers, out))
}

/// Formats one column of a row for display.
///
/// Only the types the ticketing schema actually uses are decoded; anything
/// else is reported rather than guessed at.
fn format_column(row: &Row, idx: usize) -> Result<String> {
    let ty = row.columns()[idx].type_();
    let rendered = if *ty == Type::INT2 {
        display_or_null(get(row, idx)?.map(|v: i16| v.to_string()))
    } else if *ty == Type::INT4 {
        display_or_null(get(row, idx)?.map(|v: i32| v.to_string()))
    } else if *ty == Type::INT8 {
        display_or_null(get(row, idx)?.map(|v: i64| v.to_string()))
    } else if *ty == Type::FLOAT4 {
        display_or_null(get(row, idx)?.map(|v: f32| v.to_string()))
    } else if *ty == Type::FLOAT8 {
        display_or_null(get(row, idx)?.map(|v: f64| v.to_string()))
    } else if *ty == Type::BOOL {
        display_or_null(get(row, idx)?.map(|v: bool| v.to_string()))
    } else if *ty == Type::DATE {
        display_or_null(get(row, idx)?.map(|v: NaiveDate| v.to_string()))
    } else if *ty == Type::TIME {
        display_or_null(get(row, idx)?.map(|v: NaiveTime| v.to_string()))
    } else if *ty == Type::TIMESTAMP {
        display_or_null(get(row, idx)?.map(|v: NaiveDateTime| v.to_string()))
    } else if *ty == Type::TEXT || *ty == Type::VARCHAR || *ty == Type::BPCHAR {
        display_or_null(get(row, idx)?.map(|v: String| v))
    } else {
        format!("<{}>", ty.name())
    };
    Ok(rendered)
}

fn get<'a, T: postgres::types::FromSql<'a>>(row: &'a Row, idx: usize) -> Result<Option<T>> {
    row.try_get(idx)
        .map_err(|e| MarqueeError::Statement(format!("Failed to decode column {}: {}", idx, e)))
}

fn display_or_null(value: Option<String>) -> String {
    value.unwrap_or_else(|| "NULL".to_string())
}
