//! Declarative tool descriptors and the JSON input schemas rendered from them.

use serde_json::{json, Map, Value};

pub type ArgumentBag = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Integer,
    StringArray,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub ty: FieldType,
    pub description: &'static str,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, ty: FieldType, description: &'static str) -> Self {
        Self {
            name,
            ty,
            description,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, ty: FieldType, description: &'static str) -> Self {
        Self {
            name,
            ty,
            description,
            required: false,
        }
    }

    fn schema(&self) -> Value {
        match self.ty {
            | FieldType::String => json!({ "type": "string", "description": self.description }),
            | FieldType::Integer => json!({ "type": "integer", "description": self.description }),
            | FieldType::StringArray => json!({
                "type": "array",
                "items": { "type": "string" },
                "description": self.description,
            }),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub fields: &'static [FieldSpec],
}

impl ToolDescriptor {
    /// JSON Schema object describing the argument bag.
    pub fn input_schema(&self) -> Map<String, Value> {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|f| (f.name.to_string(), f.schema()))
            .collect();

        let mut schema = Map::new();
        schema.insert("type".into(), json!("object"));
        schema.insert("properties".into(), Value::Object(properties));
        schema.insert("required".into(), json!(self.required_fields().collect::<Vec<_>>()));
        schema
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().filter(|f| f.required).map(|f| f.name)
    }

    /// First required field that is absent or null in `args`.
    pub fn missing_required(&self, args: &ArgumentBag) -> Option<&'static str> {
        self.required_fields()
            .find(|name| args.get(*name).map_or(true, Value::is_null))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: &[FieldSpec] = &[
        FieldSpec::required("event_id", FieldType::String, "ID of the event"),
        FieldSpec::optional("attendees", FieldType::StringArray, "Emails"),
        FieldSpec::optional("max_results", FieldType::Integer, "Cap"),
    ];

    const TOOL: ToolDescriptor = ToolDescriptor {
        name: "demo",
        description: "demo tool",
        fields: FIELDS,
    };

    #[test]
    fn renders_object_schema() {
        let schema = Value::Object(TOOL.input_schema());
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["event_id"]));
        assert_eq!(schema["properties"]["attendees"]["items"]["type"], "string");
        assert_eq!(schema["properties"]["max_results"]["type"], "integer");
    }

    #[test]
    fn null_counts_as_missing() {
        let args = json!({ "event_id": null }).as_object().cloned().unwrap();
        assert_eq!(TOOL.missing_required(&args), Some("event_id"));

        let args = json!({ "event_id": "abc" }).as_object().cloned().unwrap();
        assert_eq!(TOOL.missing_required(&args), None);
    }
}
