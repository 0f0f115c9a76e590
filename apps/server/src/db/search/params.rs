//! Search parameter parsing
//!
//! Splits query-string items into the field/value pairs of a
//! [`SearchRequest`] and the result controls `_limit`, `_skip` and `_sort`.
//! Every other name, including unrecognised `_`-prefixed ones, is treated as
//! a search field and checked against the registry by the engine.

use serde::Serialize;
use std::collections::BTreeMap;

use super::registry::FieldRegistry;

/// Default number of records returned by a search.
pub const DEFAULT_LIMIT: usize = 100;

/// Field name to raw value. When a name repeats, the last value wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SearchRequest(BTreeMap<String, String>);

impl SearchRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SearchRequest {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut request = Self::new();
        for (k, v) in iter {
            request.insert(k, v);
        }
        request
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Sort key over an attribute path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub path: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(path: &str) -> Self {
        Self {
            path: path.to_string(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(path: &str) -> Self {
        Self {
            path: path.to_string(),
            direction: SortDirection::Descending,
        }
    }
}

/// Pagination and ordering for a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    pub limit: usize,
    pub skip: usize,
    pub sort: Vec<SortSpec>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            skip: 0,
            sort: Vec::new(),
        }
    }
}

/// Sort parameter as written by the client (`title` or `-year`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortParam {
    /// Search field name to sort by
    pub field: String,
    pub ascending: bool,
}

/// Parsed query string of a search request.
#[derive(Debug, Clone, Default)]
pub struct SearchParameters {
    pub request: SearchRequest,
    /// `_limit`; zero means the configured default
    pub limit: Option<usize>,
    pub skip: Option<usize>,
    pub sort: Vec<SortParam>,
}

impl SearchParameters {
    /// Parse search parameters from ordered (key, value) items.
    pub fn from_items(items: &[(String, String)]) -> crate::Result<Self> {
        let mut params = Self::default();

        for (key, value) in items {
            match key.as_str() {
                "_limit" => {
                    let parsed: usize = value.trim().parse().map_err(|_| {
                        crate::Error::Validation(format!("Invalid _limit value: {}", value))
                    })?;
                    params.limit = Some(parsed);
                }
                "_skip" => {
                    let parsed: usize = value.trim().parse().map_err(|_| {
                        crate::Error::Validation(format!("Invalid _skip value: {}", value))
                    })?;
                    params.skip = Some(parsed);
                }
                "_sort" => {
                    if !params.sort.is_empty() {
                        return Err(crate::Error::Validation(
                            "Search parameter '_sort' must not appear more than once".to_string(),
                        ));
                    }
                    params.sort = Self::parse_sort(value);
                }
                _ => params.request.insert(key.as_str(), value.as_str()),
            }
        }

        Ok(params)
    }

    /// Parse sort parameter (e.g. "title" or "-year,title")
    fn parse_sort(value: &str) -> Vec<SortParam> {
        value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| {
                let (ascending, name) = match s.strip_prefix('-') {
                    Some(rest) => (false, rest.trim()),
                    None => (true, s),
                };
                (!name.is_empty()).then(|| SortParam {
                    field: name.to_string(),
                    ascending,
                })
            })
            .collect()
    }

    /// Resolve sort fields to attribute paths and apply limit defaults.
    ///
    /// A limit of zero or none falls back to `default_limit`; larger limits
    /// are clamped to `max_limit`.
    pub fn to_options(
        &self,
        registry: &FieldRegistry,
        default_limit: usize,
        max_limit: usize,
    ) -> crate::Result<SearchOptions> {
        let mut sort = Vec::with_capacity(self.sort.len());
        for param in &self.sort {
            let field = registry.lookup(&param.field).ok_or_else(|| {
                crate::Error::Validation(format!("Unknown sort field: {}", param.field))
            })?;
            sort.push(if param.ascending {
                SortSpec::ascending(&field.path)
            } else {
                SortSpec::descending(&field.path)
            });
        }

        let limit = match self.limit {
            None | Some(0) => default_limit,
            Some(n) => n,
        };

        Ok(SearchOptions {
            limit: limit.min(max_limit),
            skip: self.skip.unwrap_or(0),
            sort,
        })
    }
}
