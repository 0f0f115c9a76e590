//! Searchable field definitions
//!
//! A [`SearchFieldConfig`] ties a public field name to the attribute path it
//! searches, the [`MatchKind`] that decides how a raw value becomes a filter,
//! and the [`ValueRule`] every raw value must satisfy first.

use chrono::Datelike;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::SearchError;
use crate::models::is_record_id;

lazy_static! {
    static ref YEAR_OR_YEAR_RANGE: Regex =
        Regex::new(r"^\s*\d{1,4}\s*(-\s*\d{1,4}\s*)?$").expect("year range pattern is valid");
}

/// How a field's raw value is matched against stored records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// Verbatim equality
    Exact,
    /// Case-insensitive literal substring
    Text,
    /// Case-insensitive literal substring on any element of an array
    #[serde(rename = "array")]
    ArrayText,
    /// Integer equality
    Number,
    /// Inclusive integer range (`low-high`) or integer equality
    Range,
}

impl MatchKind {
    pub const ALL: [MatchKind; 5] = [
        Self::Exact,
        Self::Text,
        Self::ArrayText,
        Self::Number,
        Self::Range,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Text => "text",
            Self::ArrayText => "array",
            Self::Number => "number",
            Self::Range => "range",
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(Self::Exact),
            "text" => Ok(Self::Text),
            "array" | "array_text" => Ok(Self::ArrayText),
            "number" => Ok(Self::Number),
            "range" => Ok(Self::Range),
            _ => Err(SearchError::UnsupportedMatchKind(s.to_string())),
        }
    }
}

/// An integer bound that is either fixed or resolved when a value is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegerBound {
    Fixed(i64),
    CurrentYear,
}

impl IntegerBound {
    pub fn resolve(&self) -> i64 {
        match self {
            Self::Fixed(v) => *v,
            Self::CurrentYear => i64::from(chrono::Utc::now().year()),
        }
    }
}

/// Validation predicate applied to a raw search value before it is parsed.
#[derive(Debug, Clone)]
pub enum ValueRule {
    Uuid,
    Length {
        min: usize,
        max: Option<usize>,
    },
    Integer {
        min: Option<IntegerBound>,
        max: Option<IntegerBound>,
    },
    Pattern(Regex),
}

impl ValueRule {
    /// Check a raw value, returning a human-readable reason on failure.
    pub fn check(&self, raw: &str) -> Result<(), String> {
        match self {
            Self::Uuid => {
                if is_record_id(raw) {
                    Ok(())
                } else {
                    Err("must be a valid UUID".to_string())
                }
            }
            Self::Length { min, max } => {
                let len = raw.chars().count();
                if len < *min {
                    if len == 0 {
                        return Err("is not allowed to be empty".to_string());
                    }
                    return Err(format!("length must be at least {min} characters long"));
                }
                if let Some(max) = max {
                    if len > *max {
                        return Err(format!(
                            "length must be less than or equal to {max} characters long"
                        ));
                    }
                }
                Ok(())
            }
            Self::Integer { min, max } => {
                let value: i64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| "must be an integer".to_string())?;
                if let Some(min) = min.map(|b| b.resolve()) {
                    if value < min {
                        return Err(format!("must be greater than or equal to {min}"));
                    }
                }
                if let Some(max) = max.map(|b| b.resolve()) {
                    if value > max {
                        return Err(format!("must be less than or equal to {max}"));
                    }
                }
                Ok(())
            }
            Self::Pattern(re) => {
                if re.is_match(raw) {
                    Ok(())
                } else {
                    Err(format!("must match the pattern {}", re.as_str()))
                }
            }
        }
    }
}

/// Configuration of a single searchable field.
#[derive(Debug, Clone)]
pub struct SearchFieldConfig {
    pub name: String,
    /// Dotted attribute path into the stored record document
    pub path: String,
    pub match_kind: MatchKind,
    pub label: String,
    pub description: String,
    pub value_rule: ValueRule,
}

impl SearchFieldConfig {
    pub fn new(
        name: &str,
        path: &str,
        match_kind: MatchKind,
        label: &str,
        description: &str,
        value_rule: ValueRule,
    ) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            match_kind,
            label: label.to_string(),
            description: description.to_string(),
            value_rule,
        }
    }
}

/// Serializable form of a [`ValueRule`], used by configuration files and the
/// field registration endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValueRuleSpec {
    Uuid,
    Length {
        #[serde(default = "default_min_length")]
        min: usize,
        #[serde(default)]
        max: Option<usize>,
    },
    Integer {
        #[serde(default)]
        min: Option<i64>,
        #[serde(default)]
        max: Option<i64>,
        /// Use the current calendar year as the upper bound (overrides `max`)
        #[serde(default)]
        max_current_year: bool,
    },
    Pattern {
        pattern: String,
    },
}

fn default_min_length() -> usize {
    1
}

impl ValueRuleSpec {
    pub fn compile(&self) -> Result<ValueRule, SearchError> {
        Ok(match self {
            Self::Uuid => ValueRule::Uuid,
            Self::Length { min, max } => {
                if let Some(max) = max {
                    if max < min {
                        return Err(SearchError::InvalidFieldDefinition(format!(
                            "length bounds are inverted ({min} > {max})"
                        )));
                    }
                }
                ValueRule::Length {
                    min: *min,
                    max: *max,
                }
            }
            Self::Integer {
                min,
                max,
                max_current_year,
            } => ValueRule::Integer {
                min: min.map(IntegerBound::Fixed),
                max: if *max_current_year {
                    Some(IntegerBound::CurrentYear)
                } else {
                    max.map(IntegerBound::Fixed)
                },
            },
            Self::Pattern { pattern } => {
                let re = Regex::new(pattern).map_err(|e| {
                    SearchError::InvalidFieldDefinition(format!("invalid pattern: {e}"))
                })?;
                ValueRule::Pattern(re)
            }
        })
    }
}

/// Serializable definition of a searchable field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchFieldSpec {
    pub name: String,
    pub path: String,
    /// Match kind name (`exact`, `text`, `array`, `number`, `range`)
    #[serde(rename = "type")]
    pub kind: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
    pub rule: ValueRuleSpec,
}

impl SearchFieldSpec {
    /// Turn the definition into a registry entry.
    ///
    /// Fails with `UnsupportedMatchKind` when `kind` names no strategy.
    pub fn into_config(self) -> Result<SearchFieldConfig, SearchError> {
        let name = self.name.trim();
        if name.is_empty() || name.starts_with('_') {
            return Err(SearchError::InvalidFieldDefinition(format!(
                "field name '{}' must be non-empty and must not start with '_'",
                self.name
            )));
        }
        if self.path.is_empty() || self.path.split('.').any(str::is_empty) {
            return Err(SearchError::InvalidFieldDefinition(format!(
                "attribute path '{}' is not a dotted path",
                self.path
            )));
        }

        let match_kind = MatchKind::from_str(&self.kind)?;
        let value_rule = self.rule.compile()?;

        Ok(SearchFieldConfig {
            name: name.to_string(),
            path: self.path,
            match_kind,
            label: self.label,
            description: self.description,
            value_rule,
        })
    }
}

fn text_rule() -> ValueRule {
    ValueRule::Length {
        min: 1,
        max: Some(500),
    }
}

/// Built-in searchable fields.
pub fn default_fields() -> Vec<SearchFieldConfig> {
    vec![
        SearchFieldConfig::new(
            "id",
            "id",
            MatchKind::Exact,
            "Record ID",
            "Search by exact record ID (UUID)",
            ValueRule::Uuid,
        ),
        SearchFieldConfig::new(
            "title",
            "metadata.title",
            MatchKind::Text,
            "Title",
            "Search in record title",
            text_rule(),
        ),
        SearchFieldConfig::new(
            "subtitle",
            "metadata.subtitle",
            MatchKind::Text,
            "Subtitle",
            "Search in record subtitle",
            text_rule(),
        ),
        SearchFieldConfig::new(
            "authors",
            "metadata.authors",
            MatchKind::ArrayText,
            "Authors",
            "Search in authors list",
            text_rule(),
        ),
        SearchFieldConfig::new(
            "genre",
            "metadata.genre",
            MatchKind::Exact,
            "Genre",
            "Search by exact genre match",
            ValueRule::Length { min: 1, max: None },
        ),
        SearchFieldConfig::new(
            "country",
            "metadata.country",
            MatchKind::Text,
            "Country",
            "Search in country field",
            text_rule(),
        ),
        SearchFieldConfig::new(
            "year",
            "metadata.pub_date",
            MatchKind::Number,
            "Publication Year",
            "Search by publication year",
            ValueRule::Integer {
                min: Some(IntegerBound::Fixed(1000)),
                max: Some(IntegerBound::CurrentYear),
            },
        ),
        SearchFieldConfig::new(
            "published",
            "metadata.pub_date",
            MatchKind::Range,
            "Publication Years",
            "Search by publication year or an inclusive range such as 1990-2000",
            ValueRule::Pattern(YEAR_OR_YEAR_RANGE.clone()),
        ),
        SearchFieldConfig::new(
            "editor",
            "metadata.editor",
            MatchKind::Text,
            "Editor",
            "Search in editor field",
            text_rule(),
        ),
        SearchFieldConfig::new(
            "translator",
            "metadata.translator",
            MatchKind::Text,
            "Translator",
            "Search in translator field",
            text_rule(),
        ),
        SearchFieldConfig::new(
            "location",
            "metadata.location",
            MatchKind::Text,
            "Location",
            "Search in location field",
            text_rule(),
        ),
        SearchFieldConfig::new(
            "dialect",
            "metadata.dialect",
            MatchKind::Exact,
            "Dialect",
            "Search by exact dialect match",
            ValueRule::Length { min: 1, max: None },
        ),
        SearchFieldConfig::new(
            "language",
            "metadata.language",
            MatchKind::Exact,
            "Language",
            "Search by exact language match",
            ValueRule::Length { min: 1, max: None },
        ),
        SearchFieldConfig::new(
            "pages",
            "metadata.num_pages",
            MatchKind::Number,
            "Number of Pages",
            "Search by exact page count",
            ValueRule::Integer {
                min: Some(IntegerBound::Fixed(1)),
                max: None,
            },
        ),
    ]
}
