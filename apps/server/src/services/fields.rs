//! Form field definitions served to record editors

use chrono::Datelike;
use serde::Serialize;

use super::options::OptionLists;
use super::validation::{COPYRIGHT_VALUES, LANGUAGES, MAX_TEXT_LENGTH, MIN_PUB_YEAR};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Select,
    Array,
    Number,
    Year,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_type: Option<FieldType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
}

impl FieldDefinition {
    fn base(name: &'static str, field_type: FieldType, label: &'static str) -> Self {
        Self {
            name,
            field_type,
            label,
            max_length: None,
            options: None,
            item_type: None,
            min_items: None,
            min: None,
            max: None,
        }
    }

    fn text(name: &'static str, label: &'static str) -> Self {
        Self {
            max_length: Some(MAX_TEXT_LENGTH),
            ..Self::base(name, FieldType::Text, label)
        }
    }

    fn select<S: AsRef<str>>(name: &'static str, label: &'static str, options: &[S]) -> Self {
        Self {
            options: Some(options.iter().map(|o| o.as_ref().to_string()).collect()),
            ..Self::base(name, FieldType::Select, label)
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinitions {
    pub predefined_fields: Vec<FieldDefinition>,
}

/// The predefined form fields, with select options from `options`.
pub fn predefined_fields(options: &OptionLists) -> FieldDefinitions {
    let current_year = i64::from(chrono::Utc::now().year());

    let predefined_fields = vec![
        FieldDefinition::text("title", "Title"),
        FieldDefinition::text("subtitle", "Subtitle"),
        FieldDefinition::select("genre", "Genre", &options.genre),
        FieldDefinition::select("language", "Language", &LANGUAGES),
        FieldDefinition::select("copyright", "Copyright", &COPYRIGHT_VALUES),
        FieldDefinition {
            item_type: Some(FieldType::Text),
            min_items: Some(1),
            max_length: Some(MAX_TEXT_LENGTH),
            ..FieldDefinition::base("authors", FieldType::Array, "Authors")
        },
        FieldDefinition::text("editor", "Editor"),
        FieldDefinition::text("translator", "Translator"),
        FieldDefinition::select("dialect", "Dialect", &options.dialect),
        FieldDefinition::text("location", "Location"),
        FieldDefinition::text("country", "Country"),
        FieldDefinition::select("source", "Source", &options.source),
        FieldDefinition {
            min: Some(1),
            ..FieldDefinition::base("num_pages", FieldType::Number, "Number of Pages")
        },
        FieldDefinition {
            min: Some(MIN_PUB_YEAR),
            max: Some(current_year),
            ..FieldDefinition::base("pub_date", FieldType::Year, "Publication Date")
        },
        FieldDefinition::text("edition", "Edition"),
    ];

    FieldDefinitions { predefined_fields }
}
