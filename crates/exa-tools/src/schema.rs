//! JSON Schema builders
//!
//! Small helpers for declaring tool input and output schemas without
//! hand-writing nested `json!` literals.

use serde_json::{Value, json};

/// Create a JSON Schema object type
///
/// # Arguments
///
/// * `properties` - Map of property names to their schemas
/// * `required` - List of required property names
///
/// # Example
///
/// ```
/// use exa_tools::schema::{object, string, integer};
/// use serde_json::json;
///
/// let schema = object(
///     json!({
///         "query": string(Some("Search query")),
///         "numResults": integer(Some("Number of results")),
///     }),
///     &["query"],
/// );
/// assert_eq!(schema["required"][0], "query");
/// ```
pub fn object(properties: Value, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

fn typed(kind: &str, description: Option<&str>) -> Value {
    match description {
        Some(d) => json!({"type": kind, "description": d}),
        None => json!({"type": kind}),
    }
}

/// Create a JSON Schema string type
pub fn string(description: Option<&str>) -> Value {
    typed("string", description)
}

/// Create a JSON Schema number type
pub fn number(description: Option<&str>) -> Value {
    typed("number", description)
}

/// Create a JSON Schema integer type
pub fn integer(description: Option<&str>) -> Value {
    typed("integer", description)
}

/// Create a JSON Schema boolean type
pub fn boolean(description: Option<&str>) -> Value {
    typed("boolean", description)
}

/// Create a JSON Schema array type
///
/// # Arguments
///
/// * `items` - Schema for array items
/// * `description` - Optional description of the array field
pub fn array(items: Value, description: Option<&str>) -> Value {
    let mut schema = typed("array", description);
    schema["items"] = items;
    schema
}

/// Create an enum schema (string with allowed values)
pub fn enum_string(values: &[&str], description: Option<&str>) -> Value {
    let mut schema = typed("string", description);
    schema["enum"] = json!(values);
    schema
}

/// Add a lower bound to a numeric schema
pub fn minimum(mut schema: Value, min: i64) -> Value {
    schema["minimum"] = json!(min);
    schema
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_schema() {
        let schema = string(Some("A test string"));
        assert_eq!(schema["type"], "string");
        assert_eq!(schema["description"], "A test string");

        let schema_no_desc = string(None);
        assert_eq!(schema_no_desc["type"], "string");
        assert!(schema_no_desc.get("description").is_none());
    }

    #[test]
    fn test_object_schema() {
        let schema = object(
            json!({
                "url": string(Some("Seed URL")),
                "numResults": minimum(integer(Some("Count")), 1),
            }),
            &["url"],
        );

        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["url"]));
        assert_eq!(schema["properties"]["numResults"]["minimum"], 1);
    }

    #[test]
    fn test_object_without_required_fields() {
        let schema = object(json!({"flag": boolean(None)}), &[]);
        assert_eq!(schema["required"], json!([]));
        assert_eq!(schema["properties"]["flag"]["type"], "boolean");
    }

    #[test]
    fn test_array_schema() {
        let schema = array(string(None), Some("List of domains"));

        assert_eq!(schema["type"], "array");
        assert_eq!(schema["items"]["type"], "string");
        assert_eq!(schema["description"], "List of domains");
    }

    #[test]
    fn test_enum_schema() {
        let schema = enum_string(&["never", "fallback", "always"], Some("Livecrawl mode"));

        assert_eq!(schema["type"], "string");
        assert_eq!(schema["enum"], json!(["never", "fallback", "always"]));
        assert_eq!(schema["description"], "Livecrawl mode");
    }

    #[test]
    fn test_number_schema() {
        assert_eq!(number(None), json!({"type": "number"}));
    }
}
