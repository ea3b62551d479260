//! Shared WHERE-clause builder for filtered list queries.
//!
//! Filter values are always bound as positional parameters (`$1`, `$2`, ...).
//! Only column names and operators from `'static` strings in this crate are
//! interpolated into the query text.

use sqlx::postgres::PgArguments;
use sqlx::query::{QueryAs, QueryScalar};
use sqlx::Postgres;

/// A single bound filter value.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    BigInt(i64),
    Int(i32),
    Text(String),
}

/// Accumulates `AND <column> <op> $n` clauses after a `WHERE 1=1` base.
#[derive(Debug, Default)]
pub struct FilterBuilder {
    conditions: Vec<String>,
    values: Vec<BindValue>,
}

impl FilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `AND <column> <op> $n` and record the value to bind.
    pub fn push(&mut self, column: &'static str, op: &'static str, value: BindValue) {
        let idx = self.values.len() + 1;
        self.conditions.push(format!("{column} {op} ${idx}"));
        self.values.push(value);
    }

    /// Append `AND column = $n` when `value` is present.
    pub fn eq_opt(&mut self, column: &'static str, value: Option<BindValue>) {
        if let Some(v) = value {
            self.push(column, "=", v);
        }
    }

    /// Append a fixed predicate that binds nothing.
    pub fn push_static(&mut self, predicate: &'static str) {
        self.conditions.push(predicate.to_string());
    }

    /// `WHERE 1=1 [AND ...]`.
    pub fn where_clause(&self) -> String {
        let mut clause = String::from("WHERE 1=1");
        for condition in &self.conditions {
            clause.push_str(" AND ");
            clause.push_str(condition);
        }
        clause
    }

    /// Index of the next free positional parameter.
    pub fn next_index(&self) -> usize {
        self.values.len() + 1
    }

    pub fn values(&self) -> &[BindValue] {
        &self.values
    }
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
pub fn bind_values<'q, O>(
    mut q: QueryAs<'q, Postgres, O, PgArguments>,
    values: &'q [BindValue],
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for val in values {
        match val {
            BindValue::BigInt(v) => q = q.bind(*v),
            BindValue::Int(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
        }
    }
    q
}

/// Bind a slice of `BindValue` to a sqlx `QueryScalar`.
pub fn bind_values_scalar<'q>(
    mut q: QueryScalar<'q, Postgres, i64, PgArguments>,
    values: &'q [BindValue],
) -> QueryScalar<'q, Postgres, i64, PgArguments> {
    for val in values {
        match val {
            BindValue::BigInt(v) => q = q.bind(*v),
            BindValue::Int(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
        }
    }
    q
}
