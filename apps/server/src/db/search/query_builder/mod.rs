//! SQL query builder for record searches.
//!
//! Compiles a [`CompoundFilter`] and [`SearchOptions`] into parameterized
//! PostgreSQL over the `metadata_records` table, whose `document` column
//! holds `{ "id": ..., "metadata": { ... } }`. Attribute paths are bound as
//! `text[]` and addressed with `#>` / `#>>`.

use serde_json::Value as JsonValue;

use super::filter::{CompoundFilter, Condition, FilterFragment};
use super::params::{SearchOptions, SortDirection};

mod bind;

use bind::{push_bigint, push_json, push_text, push_text_array};

/// Bind values for `sqlx` queries.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Text(String),
    TextArray(Vec<String>),
    Json(JsonValue),
    BigInt(i64),
}

/// Columns selected for a record row.
pub(crate) const RECORD_COLUMNS: &str =
    "id, document -> 'metadata' AS metadata, created_at, updated_at";

/// Builds find and count statements for one filter.
#[derive(Debug)]
pub struct QueryBuilder<'a> {
    filter: &'a CompoundFilter,
}

impl<'a> QueryBuilder<'a> {
    pub fn new(filter: &'a CompoundFilter) -> Self {
        Self { filter }
    }

    /// `SELECT` with ordering and pagination.
    pub fn build_sql(&self, options: &SearchOptions) -> (String, Vec<BindValue>) {
        let mut binds = Vec::new();
        let mut sql = format!("SELECT {RECORD_COLUMNS} FROM metadata_records");
        self.push_where(&mut sql, &mut binds);

        let mut order = Vec::with_capacity(options.sort.len() + 1);
        for spec in &options.sort {
            let idx = push_text_array(&mut binds, split_path(&spec.path));
            order.push(match spec.direction {
                SortDirection::Ascending => format!("document #> ${idx} ASC NULLS FIRST"),
                SortDirection::Descending => format!("document #> ${idx} DESC NULLS LAST"),
            });
        }
        order.push("seq ASC".to_string());
        sql.push_str(" ORDER BY ");
        sql.push_str(&order.join(", "));

        let limit_idx = push_bigint(&mut binds, to_i64(options.limit));
        let offset_idx = push_bigint(&mut binds, to_i64(options.skip));
        sql.push_str(&format!(" LIMIT ${limit_idx} OFFSET ${offset_idx}"));

        (sql, binds)
    }

    /// `SELECT COUNT(*)` ignoring pagination.
    pub fn build_count_sql(&self) -> (String, Vec<BindValue>) {
        let mut binds = Vec::new();
        let mut sql = "SELECT COUNT(*) FROM metadata_records".to_string();
        self.push_where(&mut sql, &mut binds);
        (sql, binds)
    }

    fn push_where(&self, sql: &mut String, binds: &mut Vec<BindValue>) {
        if self.filter.is_empty() {
            return;
        }
        let clauses: Vec<String> = self
            .filter
            .fragments()
            .iter()
            .map(|f| build_fragment_clause(f, binds))
            .collect();
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
}

fn build_fragment_clause(fragment: &FilterFragment, binds: &mut Vec<BindValue>) -> String {
    let path = push_text_array(binds, split_path(&fragment.path));
    match &fragment.condition {
        Condition::Equals(value) => {
            let v = push_json(binds, value.clone());
            format!("(document #> ${path} = ${v})")
        }
        Condition::Matches(pattern) => {
            let v = push_text(binds, pattern.pattern.clone());
            let op = regex_operator(pattern.case_insensitive);
            format!(
                "(jsonb_typeof(document #> ${path}) = 'string' AND document #>> ${path} {op} ${v})"
            )
        }
        Condition::AnyElementMatches(pattern) => {
            let v = push_text(binds, pattern.pattern.clone());
            let op = regex_operator(pattern.case_insensitive);
            format!(
                "(CASE WHEN jsonb_typeof(document #> ${path}) = 'array' THEN EXISTS (\
                 SELECT 1 FROM jsonb_array_elements(document #> ${path}) AS elem \
                 WHERE jsonb_typeof(elem) = 'string' AND elem #>> '{{}}' {op} ${v}) \
                 ELSE false END)"
            )
        }
        Condition::Between { low, high } => {
            let lo = push_bigint(binds, *low);
            let hi = push_bigint(binds, *high);
            format!(
                "(CASE WHEN jsonb_typeof(document #> ${path}) = 'number' \
                 THEN (document #>> ${path})::numeric BETWEEN ${lo} AND ${hi} \
                 ELSE false END)"
            )
        }
    }
}

fn regex_operator(case_insensitive: bool) -> &'static str {
    if case_insensitive {
        "~*"
    } else {
        "~"
    }
}

fn split_path(path: &str) -> Vec<String> {
    path.split('.').map(str::to_string).collect()
}

fn to_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}
