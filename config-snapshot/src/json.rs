//! JSON documents as configuration input.

use std::borrow::Cow;

use rust_decimal::Decimal;

use crate::{
    describe::{Describe, Entries, Mapping, Scalar, Shape},
    value::Value,
};

impl Describe for serde_json::Value {
    fn shape(&self) -> Shape<'_> {
        match self {
            serde_json::Value::Null => Shape::Null,
            serde_json::Value::Bool(value) => Shape::Scalar(Scalar::Bool(*value)),
            serde_json::Value::Number(number) => Shape::Scalar(number_scalar(number)),
            serde_json::Value::String(text) => Shape::Scalar(Scalar::Str(Cow::Borrowed(text))),
            serde_json::Value::Array(items) => items.shape(),
            serde_json::Value::Object(entries) => Shape::Mapping(entries),
        }
    }
}

fn number_scalar(number: &serde_json::Number) -> Scalar<'_> {
    if let Some(value) = number.as_i64() {
        Scalar::Int(i128::from(value))
    } else if let Some(value) = number.as_u64() {
        Scalar::UInt(u128::from(value))
    } else if let Some(value) = number.as_f64() {
        Scalar::Float(value)
    } else {
        Scalar::Opaque(number)
    }
}

impl Mapping for serde_json::Map<String, serde_json::Value> {
    fn entries(&self) -> Entries<'_> {
        Box::new(
            self.iter()
                .map(|(key, value)| (Cow::Borrowed(key.as_str()), value as &dyn Describe)),
        )
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(value) => Value::Bool(value),
            serde_json::Value::Number(number) => {
                if let Some(value) = number.as_i64() {
                    Value::Int(value)
                } else if let Some(value) = number.as_u64() {
                    Value::Decimal(Decimal::from(value))
                } else {
                    number.as_f64().map_or(Value::Null, Value::Float)
                }
            }
            serde_json::Value::String(text) => Value::String(text),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => entries
                .into_iter()
                .map(|(key, value)| (key, Value::from(value)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{render, value::Value};

    #[test]
    fn json_documents_render_directly() {
        let document = json!({
            "Database": { "Host": "db", "Password": "hunter2", "Port": 5432 },
            "Features": ["a", "b"],
            "Ratio": 0.5,
            "Enabled": true,
            "Missing": null
        });
        let text = render(&document);
        assert!(text.contains("Host = 'db'"));
        assert!(text.contains("Password = '********'"));
        assert!(!text.contains("hunter2"));
        assert!(text.contains("Port = '5432'"));
        assert!(text.contains("Features = @('a', 'b')"));
        assert!(text.contains("Ratio = '0.5'"));
        assert!(text.contains("Enabled = 'True'"));
        assert!(text.contains("Missing = ''"));
    }

    #[test]
    fn json_converts_into_values() {
        let value = Value::from(json!({ "Big": u64::MAX, "Small": -1, "List": [1] }));
        assert!(matches!(value.get("Small"), Some(Value::Int(-1))));
        assert!(matches!(value.get("Big"), Some(Value::Decimal(_))));
        assert!(matches!(value.get("List"), Some(Value::List(items)) if items.len() == 1));
    }
}
