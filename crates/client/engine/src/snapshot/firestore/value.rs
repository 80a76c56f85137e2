//! Typed Firestore REST values.
use std::collections::BTreeMap;

use serde::Deserialize;

use game_core::Position;

/// `int64` values arrive as JSON strings; some emulators send numbers.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum IntegerRepr {
    Number(i64),
    Text(String),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GeoPoint {
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
pub struct ArrayValue {
    #[serde(default)]
    pub values: Vec<Value>,
}

#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
pub struct MapValue {
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Value {
    NullValue(()),
    BooleanValue(bool),
    IntegerValue(IntegerRepr),
    DoubleValue(f64),
    TimestampValue(String),
    StringValue(String),
    BytesValue(String),
    ReferenceValue(String),
    GeoPointValue(GeoPoint),
    ArrayValue(ArrayValue),
    MapValue(MapValue),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::StringValue(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::BooleanValue(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer view; integral doubles are accepted since writers are loose.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::IntegerValue(IntegerRepr::Number(n)) => Some(*n),
            Self::IntegerValue(IntegerRepr::Text(s)) => s.parse().ok(),
            Self::DoubleValue(d) if d.fract() == 0.0 && d.is_finite() => Some(*d as i64),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        self.as_i64().and_then(|n| i32::try_from(n).ok())
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::DoubleValue(d) => Some(*d),
            Self::IntegerValue(_) => self.as_i64().map(|n| n as f64),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::MapValue(map) => Some(&map.fields),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::ArrayValue(array) => Some(&array.values),
            _ => None,
        }
    }

    /// String elements of an array; non-strings are skipped.
    pub fn as_string_list(&self) -> Option<Vec<String>> {
        self.as_array().map(|values| {
            values
                .iter()
                .filter_map(|v| v.as_str().map(str::to_owned))
                .collect()
        })
    }

    /// `{x, y}` map as a position.
    pub fn as_position(&self) -> Option<Position> {
        let map = self.as_map()?;
        let x = map.get("x")?.as_i32()?;
        let y = map.get("y")?.as_i32()?;
        Some(Position::new(x, y))
    }
}

/// One document from a list or get call.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub name: String,
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
    #[serde(default)]
    pub create_time: Option<String>,
    #[serde(default)]
    pub update_time: Option<String>,
}

impl Document {
    /// Last path segment of the resource name.
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn str(&self, key: &str) -> Option<&str> {
        self.get(key)?.as_str()
    }

    pub fn bool(&self, key: &str) -> Option<bool> {
        self.get(key)?.as_bool()
    }

    pub fn i32(&self, key: &str) -> Option<i32> {
        self.get(key)?.as_i32()
    }

    pub fn i64(&self, key: &str) -> Option<i64> {
        self.get(key)?.as_i64()
    }

    pub fn f64(&self, key: &str) -> Option<f64> {
        self.get(key)?.as_f64()
    }

    pub fn position(&self, key: &str) -> Option<Position> {
        self.get(key)?.as_position()
    }

    pub fn string_list(&self, key: &str) -> Option<Vec<String>> {
        self.get(key)?.as_string_list()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDocumentsResponse {
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_nested_values() {
        let doc: Document = serde_json::from_str(
            r#"{
                "name": "projects/p/databases/(default)/documents/games/g/zombies/z1",
                "fields": {
                    "pos": {"mapValue": {"fields": {"x": {"integerValue": "4"}, "y": {"integerValue": 7}}}},
                    "alive": {"booleanValue": true},
                    "hitChance": {"doubleValue": 0.75},
                    "note": {"nullValue": null},
                    "hostileTo": {"arrayValue": {"values": [{"stringValue": "HUMAN"}, {"integerValue": "3"}]}},
                    "empty": {"arrayValue": {}}
                }
            }"#,
        )
        .unwrap();

        assert_eq!(doc.id(), "z1");
        assert_eq!(doc.position("pos"), Some(Position::new(4, 7)));
        assert_eq!(doc.bool("alive"), Some(true));
        assert_eq!(doc.f64("hitChance"), Some(0.75));
        assert_eq!(doc.get("note"), Some(&Value::NullValue(())));
        assert_eq!(doc.string_list("hostileTo"), Some(vec!["HUMAN".to_string()]));
        assert_eq!(doc.string_list("empty"), Some(Vec::new()));
    }

    #[test]
    fn integral_doubles_read_as_integers() {
        assert_eq!(Value::DoubleValue(12.0).as_i32(), Some(12));
        assert_eq!(Value::DoubleValue(12.5).as_i32(), None);
        assert_eq!(
            Value::IntegerValue(IntegerRepr::Text("x".into())).as_i64(),
            None
        );
    }

    #[test]
    fn empty_listing_decodes() {
        let res: ListDocumentsResponse = serde_json::from_str("{}").unwrap();
        assert!(res.documents.is_empty());
        assert!(res.next_page_token.is_none());
    }
}
