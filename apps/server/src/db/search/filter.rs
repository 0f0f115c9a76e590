//! Filter fragments and compound filters
//!
//! A [`FilterFragment`] is a predicate over one attribute path of a stored
//! record document. Fragments are combined into a [`CompoundFilter`]: no
//! fragment matches everything, one fragment is used as-is, several are
//! combined with logical AND.
//!
//! The filter is backend-neutral. The in-memory store evaluates it through
//! [`CompoundFilter::compile`]; the PostgreSQL store translates it to SQL.
//! For diagnostics it serializes to a Mongo-style query document.

use regex::{Regex, RegexBuilder};
use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value as JsonValue};

/// An escaped regular expression used for literal substring matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPattern {
    pub pattern: String,
    pub case_insensitive: bool,
}

impl TextPattern {
    pub fn case_insensitive(pattern: String) -> Self {
        Self {
            pattern,
            case_insensitive: true,
        }
    }

    fn compile(&self) -> Result<Regex, regex::Error> {
        RegexBuilder::new(&self.pattern)
            .case_insensitive(self.case_insensitive)
            .build()
    }

    fn to_document(&self) -> JsonValue {
        let mut doc = Map::new();
        doc.insert("$regex".to_string(), JsonValue::String(self.pattern.clone()));
        if self.case_insensitive {
            doc.insert("$options".to_string(), JsonValue::String("i".to_string()));
        }
        JsonValue::Object(doc)
    }
}

/// Condition an attribute must satisfy.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Attribute equals the value (numbers compare numerically)
    Equals(JsonValue),
    /// Attribute is a string matching the pattern
    Matches(TextPattern),
    /// Attribute is an array with at least one string element matching the pattern
    AnyElementMatches(TextPattern),
    /// Attribute is a number within `[low, high]`
    Between { low: i64, high: i64 },
}

/// Predicate over a single attribute path.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterFragment {
    pub path: String,
    pub condition: Condition,
}

impl FilterFragment {
    pub fn new(path: &str, condition: Condition) -> Self {
        Self {
            path: path.to_string(),
            condition,
        }
    }

    /// Path split into its dotted segments.
    pub fn segments(&self) -> Vec<&str> {
        self.path.split('.').collect()
    }

    fn condition_document(&self) -> JsonValue {
        match &self.condition {
            Condition::Equals(v) => v.clone(),
            Condition::Matches(p) => p.to_document(),
            Condition::AnyElementMatches(p) => json!({ "$elemMatch": p.to_document() }),
            Condition::Between { low, high } => json!({ "$gte": low, "$lte": high }),
        }
    }

    pub fn to_document(&self) -> JsonValue {
        let mut doc = Map::new();
        doc.insert(self.path.clone(), self.condition_document());
        JsonValue::Object(doc)
    }
}

/// Zero, one or many fragments combined with logical AND.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CompoundFilter {
    #[default]
    MatchAll,
    Single(FilterFragment),
    And(Vec<FilterFragment>),
}

impl CompoundFilter {
    pub fn from_fragments(mut fragments: Vec<FilterFragment>) -> Self {
        match fragments.len() {
            0 => Self::MatchAll,
            1 => Self::Single(fragments.remove(0)),
            _ => Self::And(fragments),
        }
    }

    pub fn fragments(&self) -> &[FilterFragment] {
        match self {
            Self::MatchAll => &[],
            Self::Single(f) => std::slice::from_ref(f),
            Self::And(fs) => fs,
        }
    }

    pub fn len(&self) -> usize {
        self.fragments().len()
    }

    /// True for the match-all filter.
    pub fn is_empty(&self) -> bool {
        self.fragments().is_empty()
    }

    /// Mongo-style query document, for diagnostics.
    pub fn to_document(&self) -> JsonValue {
        match self {
            Self::MatchAll => JsonValue::Object(Map::new()),
            Self::Single(f) => f.to_document(),
            Self::And(fs) => json!({
                "$and": fs.iter().map(FilterFragment::to_document).collect::<Vec<_>>()
            }),
        }
    }

    /// Prepare the filter for repeated evaluation against documents.
    pub fn compile(&self) -> Result<CompiledFilter, regex::Error> {
        let fragments = self
            .fragments()
            .iter()
            .map(|f| {
                let test = match &f.condition {
                    Condition::Equals(v) => CompiledCondition::Equals(v.clone()),
                    Condition::Matches(p) => CompiledCondition::Matches(p.compile()?),
                    Condition::AnyElementMatches(p) => {
                        CompiledCondition::AnyElementMatches(p.compile()?)
                    }
                    Condition::Between { low, high } => CompiledCondition::Between {
                        low: *low,
                        high: *high,
                    },
                };
                Ok(CompiledFragment {
                    path: f.path.clone(),
                    test,
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(CompiledFilter { fragments })
    }
}

impl Serialize for CompoundFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_document().serialize(serializer)
    }
}

#[derive(Debug)]
enum CompiledCondition {
    Equals(JsonValue),
    Matches(Regex),
    AnyElementMatches(Regex),
    Between { low: i64, high: i64 },
}

#[derive(Debug)]
struct CompiledFragment {
    path: String,
    test: CompiledCondition,
}

impl CompiledFragment {
    fn matches(&self, doc: &JsonValue) -> bool {
        let Some(value) = lookup_path(doc, &self.path) else {
            return false;
        };
        match &self.test {
            CompiledCondition::Equals(expected) => json_equals(value, expected),
            CompiledCondition::Matches(re) => value.as_str().is_some_and(|s| re.is_match(s)),
            CompiledCondition::AnyElementMatches(re) => value.as_array().is_some_and(|items| {
                items
                    .iter()
                    .filter_map(JsonValue::as_str)
                    .any(|s| re.is_match(s))
            }),
            CompiledCondition::Between { low, high } => value
                .as_f64()
                .is_some_and(|n| n >= *low as f64 && n <= *high as f64),
        }
    }
}

/// A compound filter ready to be evaluated against record documents.
#[derive(Debug)]
pub struct CompiledFilter {
    fragments: Vec<CompiledFragment>,
}

impl CompiledFilter {
    pub fn matches(&self, doc: &JsonValue) -> bool {
        self.fragments.iter().all(|f| f.matches(doc))
    }
}

/// Resolve a dotted attribute path inside a JSON document.
pub fn lookup_path<'a>(doc: &'a JsonValue, path: &str) -> Option<&'a JsonValue> {
    path.split('.')
        .try_fold(doc, |current, segment| current.as_object()?.get(segment))
}

fn json_equals(actual: &JsonValue, expected: &JsonValue) -> bool {
    match (actual, expected) {
        (JsonValue::Number(a), JsonValue::Number(b)) => match (a.as_i64(), b.as_i64()) {
            (Some(a), Some(b)) => a == b,
            _ => a.as_f64() == b.as_f64(),
        },
        _ => actual == expected,
    }
}
