//! Record payload validation
//!
//! Known metadata keys are type-checked and select values are checked
//! against the current option lists, visiting keys in form order. Bounds are
//! then enforced with the `validator` derive. The first failure is reported.
//! Unknown keys pass through untouched.

use chrono::Datelike;
use serde_json::{Map, Value as JsonValue};
use validator::Validate;

use super::options::OptionLists;
use crate::models::is_record_id;
use crate::{Error, Result};

pub const MAX_TEXT_LENGTH: u64 = 500;
pub const MIN_PUB_YEAR: i64 = 1000;
pub const LANGUAGES: [&str; 4] = ["Assyrian", "English", "Arabic", "Other"];
pub const COPYRIGHT_VALUES: [&str; 2] = ["yes", "no"];

const TEXT_KEYS: [&str; 7] = [
    "title",
    "subtitle",
    "editor",
    "translator",
    "location",
    "country",
    "edition",
];

/// Known keys in form order.
const KNOWN_KEYS: [&str; 15] = [
    "title",
    "subtitle",
    "genre",
    "language",
    "copyright",
    "authors",
    "editor",
    "translator",
    "dialect",
    "location",
    "country",
    "source",
    "num_pages",
    "pub_date",
    "edition",
];

#[derive(Debug, Default, Validate)]
struct KnownMetadata {
    #[validate(length(max = 500))]
    title: Option<String>,
    #[validate(length(max = 500))]
    subtitle: Option<String>,
    #[validate(length(max = 500))]
    editor: Option<String>,
    #[validate(length(max = 500))]
    translator: Option<String>,
    #[validate(length(max = 500))]
    location: Option<String>,
    #[validate(length(max = 500))]
    country: Option<String>,
    #[validate(length(max = 500))]
    edition: Option<String>,
    #[validate(length(min = 1))]
    authors: Option<Vec<String>>,
    #[validate(range(min = 1))]
    num_pages: Option<i64>,
    #[validate(range(min = 1000))]
    pub_date: Option<i64>,
}

impl KnownMetadata {
    fn set_text(&mut self, key: &str, value: String) {
        let slot = match key {
            "title" => &mut self.title,
            "subtitle" => &mut self.subtitle,
            "editor" => &mut self.editor,
            "translator" => &mut self.translator,
            "location" => &mut self.location,
            "country" => &mut self.country,
            "edition" => &mut self.edition,
            _ => return,
        };
        *slot = Some(value);
    }
}

fn label(key: &str) -> String {
    format!("\"metadata.{key}\"")
}

fn invalid(message: String) -> Error {
    Error::Validation(message)
}

fn as_integer(key: &str, value: &JsonValue) -> Result<i64> {
    let Some(number) = value.as_f64() else {
        return Err(invalid(format!("{} must be a number", label(key))));
    };
    if let Some(n) = value.as_i64() {
        return Ok(n);
    }
    if number.fract() != 0.0 || !number.is_finite() {
        return Err(invalid(format!("{} must be an integer", label(key))));
    }
    Ok(number as i64)
}

fn as_string(key: &str, value: &JsonValue) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid(format!("{} must be a string", label(key))))
}

fn check_allowed(key: &str, value: &str, allowed: &[String]) -> Result<()> {
    if allowed.iter().any(|a| a.as_str() == value) {
        return Ok(());
    }
    Err(invalid(format!(
        "{} must be one of [{}]",
        label(key),
        allowed.join(", ")
    )))
}

/// Check an `id` supplied in a payload.
pub fn validate_record_id(id: &str) -> Result<()> {
    if is_record_id(id) {
        Ok(())
    } else {
        Err(invalid("\"id\" must be a valid GUID".to_string()))
    }
}

/// Validate a payload's metadata and return it as an object.
pub fn validate_metadata(
    metadata: Option<&JsonValue>,
    options: &OptionLists,
) -> Result<Map<String, JsonValue>> {
    let map = match metadata {
        None => return Err(invalid("\"metadata\" is required".to_string())),
        Some(JsonValue::Object(map)) => map,
        Some(_) => return Err(invalid("\"metadata\" must be of type object".to_string())),
    };
    if map.is_empty() {
        return Err(invalid("\"metadata\" must have at least 1 key".to_string()));
    }

    let known = collect_known(map, options)?;
    if let Err(errors) = known.validate() {
        let fields = errors.field_errors();
        if let Some(key) = KNOWN_KEYS.iter().find(|k| fields.contains_key(**k)) {
            return Err(invalid(bound_message(key)));
        }
    }

    let current_year = i64::from(chrono::Utc::now().year());
    if let Some(year) = known.pub_date.filter(|y| *y > current_year) {
        tracing::debug!(year, current_year, "Publication year in the future");
        return Err(invalid(format!(
            "{} must be less than or equal to {current_year}",
            label("pub_date")
        )));
    }

    Ok(map.clone())
}

fn collect_known(map: &Map<String, JsonValue>, options: &OptionLists) -> Result<KnownMetadata> {
    let mut known = KnownMetadata::default();

    for key in KNOWN_KEYS {
        let Some(value) = map.get(key) else {
            continue;
        };
        match key {
            k if TEXT_KEYS.contains(&k) => known.set_text(k, as_string(k, value)?),
            "genre" => check_allowed(key, &as_string(key, value)?, &options.genre)?,
            "dialect" => check_allowed(key, &as_string(key, value)?, &options.dialect)?,
            "source" => check_allowed(key, &as_string(key, value)?, &options.source)?,
            "language" => {
                let allowed: Vec<String> = LANGUAGES.iter().map(|s| s.to_string()).collect();
                check_allowed(key, &as_string(key, value)?, &allowed)?
            }
            "copyright" => {
                let allowed: Vec<String> =
                    COPYRIGHT_VALUES.iter().map(|s| s.to_string()).collect();
                check_allowed(key, &as_string(key, value)?, &allowed)?
            }
            "authors" => known.authors = Some(collect_authors(value)?),
            "num_pages" => known.num_pages = Some(as_integer(key, value)?),
            "pub_date" => known.pub_date = Some(as_integer(key, value)?),
            _ => {}
        }
    }

    Ok(known)
}

fn collect_authors(value: &JsonValue) -> Result<Vec<String>> {
    let JsonValue::Array(items) = value else {
        return Err(invalid(format!("{} must be an array", label("authors"))));
    };
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let name = item.as_str().ok_or_else(|| {
                invalid(format!("\"metadata.authors[{i}]\" must be a string"))
            })?;
            if name.is_empty() {
                return Err(invalid(format!(
                    "\"metadata.authors[{i}]\" is not allowed to be empty"
                )));
            }
            if name.chars().count() as u64 > MAX_TEXT_LENGTH {
                return Err(invalid(format!(
                    "\"metadata.authors[{i}]\" length must be less than or equal to {MAX_TEXT_LENGTH} characters long"
                )));
            }
            Ok(name.to_string())
        })
        .collect()
}

fn bound_message(key: &str) -> String {
    match key {
        "authors" => format!("{} must contain at least 1 items", label(key)),
        "num_pages" => format!("{} must be a positive number", label(key)),
        "pub_date" => format!(
            "{} must be greater than or equal to {MIN_PUB_YEAR}",
            label(key)
        ),
        _ => format!(
            "{} length must be less than or equal to {MAX_TEXT_LENGTH} characters long",
            label(key)
        ),
    }
}
