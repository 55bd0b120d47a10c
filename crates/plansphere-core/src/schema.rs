//! Schema contracts for AI-generated JSON
//!
//! A small declarative grammar describing the output shape of each AI-backed
//! operation. Contracts are used twice: serialized into the provider's
//! `responseSchema` field at request time, and mirrored by the validators in
//! [`crate::ai::parsing`] as the local ground truth, independent of whether
//! the provider actually enforced them.

use serde_json::{json, Map, Value};

/// Portable type grammar: object/array/string/number/enum with nesting.
#[derive(Debug, Clone)]
pub enum Schema {
    Object {
        properties: Vec<(&'static str, Schema)>,
        required: &'static [&'static str],
    },
    Array(Box<Schema>),
    String(Option<&'static str>),
    Number(Option<&'static str>),
    Integer,
    Enum(&'static [&'static str]),
}

impl Schema {
    pub fn object(properties: Vec<(&'static str, Schema)>) -> Self {
        Schema::Object {
            properties,
            required: &[],
        }
    }

    pub fn array(items: Schema) -> Self {
        Schema::Array(Box::new(items))
    }

    pub fn string() -> Self {
        Schema::String(None)
    }

    pub fn string_desc(description: &'static str) -> Self {
        Schema::String(Some(description))
    }

    pub fn number() -> Self {
        Schema::Number(None)
    }

    pub fn number_desc(description: &'static str) -> Self {
        Schema::Number(Some(description))
    }

    /// Serialize into the provider's schema JSON (uppercase type tags).
    pub fn to_value(&self) -> Value {
        match self {
            Schema::Object {
                properties,
                required,
            } => {
                let mut props = Map::new();
                for (name, schema) in properties {
                    props.insert((*name).to_string(), schema.to_value());
                }
                let mut object = Map::new();
                object.insert("type".to_string(), json!("OBJECT"));
                object.insert("properties".to_string(), Value::Object(props));
                if !required.is_empty() {
                    object.insert("required".to_string(), json!(required));
                }
                Value::Object(object)
            }
            Schema::Array(items) => json!({ "type": "ARRAY", "items": items.to_value() }),
            Schema::String(description) => tagged("STRING", *description),
            Schema::Number(description) => tagged("NUMBER", *description),
            Schema::Integer => json!({ "type": "INTEGER" }),
            Schema::Enum(values) => json!({ "type": "STRING", "enum": values }),
        }
    }
}

fn tagged(type_name: &str, description: Option<&str>) -> Value {
    match description {
        Some(text) => json!({ "type": type_name, "description": text }),
        None => json!({ "type": type_name }),
    }
}

// --- Contract catalog, one per schema-constrained operation ----------------

/// Nested itinerary contract: days, activities, costs.
pub fn itinerary() -> Schema {
    let activity = Schema::object(vec![
        ("time", Schema::string_desc("Specific time range (e.g., '08:00 AM - 09:30 AM')")),
        ("activity", Schema::string_desc("Name of the place or activity")),
        ("description", Schema::string_desc("Specific instructions (e.g., 'Try the matcha latte here.')")),
        ("location", Schema::string_desc("Address or area name")),
        ("estimatedCost", Schema::number_desc("Cost in USD")),
        ("type", Schema::Enum(&["food", "sightseeing", "adventure", "relax", "culture"])),
    ]);

    let day = Schema::object(vec![
        ("day", Schema::Integer),
        ("date", Schema::string_desc("The specific calendar date (e.g., 'Mon, July 15')")),
        ("theme", Schema::string_desc("Theme of the day (e.g., Cultural Immersion)")),
        ("activities", Schema::array(activity)),
    ]);

    Schema::Object {
        properties: vec![
            ("title", Schema::string_desc("A catchy title for the trip")),
            ("destination", Schema::string_desc("The specific city and country of the destination (e.g. 'Tokyo, Japan')")),
            ("description", Schema::string_desc("A brief summary of the experience")),
            ("totalEstimatedCost", Schema::number_desc("Total estimated cost in USD")),
            ("currency", Schema::string_desc("Local currency code")),
            ("travelTips", Schema::array(Schema::string())),
            ("days", Schema::array(day)),
        ],
        required: &["title", "destination", "days"],
    }
}

/// {category, subcategory} for expense tagging.
pub fn expense_tag() -> Schema {
    Schema::object(vec![
        ("category", Schema::string()),
        ("subcategory", Schema::string()),
    ])
}

/// {result: number} for currency conversion.
pub fn currency_result() -> Schema {
    Schema::object(vec![("result", Schema::number())])
}

/// {caption, hashtags[], location} for photo analysis.
pub fn photo_insights() -> Schema {
    Schema::object(vec![
        ("caption", Schema::string()),
        ("hashtags", Schema::array(Schema::string())),
        ("location", Schema::string()),
    ])
}

/// Array of tour guide records.
pub fn tour_guides() -> Schema {
    Schema::array(Schema::object(vec![
        ("id", Schema::string()),
        ("name", Schema::string()),
        ("languages", Schema::array(Schema::string())),
        ("specialty", Schema::string()),
        ("rating", Schema::number()),
        ("ratePerHour", Schema::number()),
        ("imageUrl", Schema::string()),
    ]))
}

/// Array of community post records.
pub fn community_posts() -> Schema {
    Schema::array(Schema::object(vec![
        ("id", Schema::string()),
        ("user", Schema::string()),
        ("location", Schema::string()),
        ("content", Schema::string()),
        ("likes", Schema::number()),
        ("tags", Schema::array(Schema::string())),
        ("imageUrl", Schema::string()),
        ("timestamp", Schema::number()),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_serialization() {
        let value = expense_tag().to_value();
        assert_eq!(value["type"], "OBJECT");
        assert_eq!(value["properties"]["category"]["type"], "STRING");
    }

    #[test]
    fn test_enum_serialization() {
        let value = itinerary().to_value();
        let activity_type = &value["properties"]["days"]["items"]["properties"]["activities"]
            ["items"]["properties"]["type"];
        assert_eq!(activity_type["type"], "STRING");
        assert!(activity_type["enum"]
            .as_array()
            .unwrap()
            .contains(&serde_json::json!("sightseeing")));
    }

    #[test]
    fn test_required_fields_emitted() {
        let value = itinerary().to_value();
        let required = value["required"].as_array().unwrap();
        assert!(required.contains(&serde_json::json!("days")));
    }

    #[test]
    fn test_array_contract() {
        let value = tour_guides().to_value();
        assert_eq!(value["type"], "ARRAY");
        assert_eq!(value["items"]["properties"]["ratePerHour"]["type"], "NUMBER");
    }
}
