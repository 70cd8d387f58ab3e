use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One permit as it appears in the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RawRecord {
    #[serde(default)]
    pub neighborhood: Value,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl RawRecord {
    /// Non-object elements become empty records so one bad entry never
    /// sinks the whole payload.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut fields) = value else {
            return Self::default();
        };
        let neighborhood = fields.remove("neighborhood").unwrap_or(Value::Null);
        Self {
            neighborhood,
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        if name == "neighborhood" {
            return Some(&self.neighborhood);
        }
        self.fields.get(name)
    }

    /// Trimmed, non-empty text of a string or number field.
    pub fn field_str(&self, name: &str) -> Option<String> {
        let text = match self.field(name)? {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        if text.is_empty() { None } else { Some(text) }
    }

    pub fn neighborhood_label(&self) -> Option<&str> {
        self.neighborhood
            .as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// A permit plus its derived neighborhood identifier (`nhid`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedRecord {
    #[serde(flatten)]
    pub record: RawRecord,
    pub nhid: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_value_splits_neighborhood_out() {
        let raw = RawRecord::from_value(json!({
            "neighborhood": "Mission",
            "date": "2020-01-01",
            "address": "123 Valencia St"
        }));
        assert_eq!(raw.neighborhood, json!("Mission"));
        assert_eq!(raw.fields.len(), 2);
        assert_eq!(raw.field_str("address").as_deref(), Some("123 Valencia St"));
        assert_eq!(raw.neighborhood_label(), Some("Mission"));
    }

    #[test]
    fn missing_neighborhood_is_null() {
        let raw = RawRecord::from_value(json!({"date": "2020-01-02"}));
        assert_eq!(raw.neighborhood, Value::Null);
        assert_eq!(raw.neighborhood_label(), None);
    }

    #[test]
    fn non_object_becomes_empty_record() {
        for value in [json!(7), json!("permit"), json!(null), json!([1, 2])] {
            assert_eq!(RawRecord::from_value(value), RawRecord::default());
        }
    }

    #[test]
    fn field_str_skips_blank_and_structured_values() {
        let raw = RawRecord::from_value(json!({
            "blank": "   ",
            "cost": 1500,
            "nested": {"a": 1}
        }));
        assert_eq!(raw.field_str("blank"), None);
        assert_eq!(raw.field_str("cost").as_deref(), Some("1500"));
        assert_eq!(raw.field_str("nested"), None);
        assert_eq!(raw.field_str("absent"), None);
    }

    #[test]
    fn annotated_record_serializes_flat() {
        let annotated = AnnotatedRecord {
            record: RawRecord::from_value(json!({
                "neighborhood": "Mission",
                "date": "2020-01-01"
            })),
            nhid: "mission".to_string(),
        };
        let value = serde_json::to_value(&annotated).expect("serialize");
        assert_eq!(
            value,
            json!({"neighborhood": "Mission", "date": "2020-01-01", "nhid": "mission"})
        );
    }
}
