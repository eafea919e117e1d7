use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::error::DataParseError;

/// Mapping type used for the context and for nested objects. Keeps source order.
pub type Mapping = IndexMap<String, Value>;

/// A number as it appeared in the data file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

/// Any value a data file can hold.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Sequence(Vec<Value>),
    Mapping(Mapping),
}

impl Value {
    /// Short name of the variant, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            Value::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Mapping(map) => serialize_mapping(map, serializer),
        }
    }
}

fn serialize_mapping<S: Serializer>(map: &Mapping, serializer: S) -> Result<S::Ok, S::Error> {
    let mut out = serializer.serialize_map(Some(map.len()))?;
    for (k, v) in map {
        out.serialize_entry(k, v)?;
    }
    out.end()
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(json_number(&n)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Mapping(
                map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            ),
        }
    }
}

fn json_number(n: &serde_json::Number) -> Number {
    match n.as_i64() {
        Some(i) => Number::Integer(i),
        None => Number::Float(n.as_f64().unwrap_or(f64::NAN)),
    }
}

impl From<serde_yaml::Value> for Value {
    fn from(value: serde_yaml::Value) -> Self {
        match value {
            serde_yaml::Value::Null => Value::Null,
            serde_yaml::Value::Bool(b) => Value::Bool(b),
            serde_yaml::Value::Number(n) => Value::Number(match n.as_i64() {
                Some(i) => Number::Integer(i),
                None => Number::Float(n.as_f64().unwrap_or(f64::NAN)),
            }),
            serde_yaml::Value::String(s) => Value::String(s),
            serde_yaml::Value::Sequence(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_yaml::Value::Mapping(map) => Value::Mapping(
                map.into_iter()
                    .map(|(k, v)| (yaml_key(k), Value::from(v)))
                    .collect(),
            ),
            serde_yaml::Value::Tagged(tagged) => Value::from(tagged.value),
        }
    }
}

fn yaml_key(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Null => "null".to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Tagged(tagged) => yaml_key(tagged.value),
        // Complex keys have no natural string form; fall back to their YAML text.
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// The data handed to the template: top-level names mapped to values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Context(Mapping);

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(s: &str) -> Result<Self, DataParseError> {
        let value: serde_json::Value = serde_json::from_str(s)?;
        Self::try_from(Value::from(value))
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, DataParseError> {
        if s.trim().is_empty() {
            return Ok(Self::new());
        }
        let mut value: serde_yaml::Value = serde_yaml::from_str(s)?;
        value.apply_merge()?;
        Self::try_from(Value::from(value))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl TryFrom<Value> for Context {
    type Error = DataParseError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Mapping(map) => Ok(Context(map)),
            Value::Null => Ok(Context::new()),
            other => Err(DataParseError::NotAMapping(other.kind())),
        }
    }
}

impl Serialize for Context {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_mapping(&self.0, serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_context() {
        let ctx = Context::from_json_str(r#"{"name": "Ada", "age": 36, "tags": ["a", "b"]}"#)
            .unwrap();
        assert_eq!(ctx.get("name").and_then(Value::as_str), Some("Ada"));
        assert_eq!(ctx.get("age"), Some(&Value::Number(Number::Integer(36))));
        assert_eq!(
            ctx.get("tags"),
            Some(&Value::Sequence(vec![
                Value::String("a".into()),
                Value::String("b".into())
            ]))
        );
    }

    #[test]
    fn test_key_order_preserved() {
        let ctx = Context::from_json_str(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
        assert_eq!(ctx.keys().collect::<Vec<_>>(), vec!["z", "a", "m"]);
    }

    #[test]
    fn test_yaml_non_string_keys() {
        let ctx = Context::from_yaml_str("1: one\ntrue: yes\nlist: [1.5, null]\n").unwrap();
        assert_eq!(ctx.get("1").and_then(Value::as_str), Some("one"));
        assert!(ctx.get("true").is_some());
        assert_eq!(
            ctx.get("list"),
            Some(&Value::Sequence(vec![
                Value::Number(Number::Float(1.5)),
                Value::Null
            ]))
        );
    }

    #[test]
    fn test_yaml_merge_keys() {
        let yaml = r#"
base: &base
  city: Paris
person:
  <<: *base
  name: Ada
"#;
        let ctx = Context::from_yaml_str(yaml).unwrap();
        match ctx.get("person") {
            Some(Value::Mapping(m)) => {
                assert_eq!(m.get("city").and_then(Value::as_str), Some("Paris"));
                assert_eq!(m.get("name").and_then(Value::as_str), Some("Ada"));
            }
            other => panic!("unexpected person value: {:?}", other),
        }
    }

    #[test]
    fn test_empty_yaml_is_empty_context() {
        assert!(Context::from_yaml_str("").unwrap().is_empty());
        assert!(Context::from_yaml_str("~").unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_yaml_keys_rejected() {
        let err = Context::from_yaml_str("name: Ada\nname: Grace\n").unwrap_err();
        assert!(matches!(err, DataParseError::Yaml(_)));
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_top_level_must_be_mapping() {
        let err = Context::from_json_str("[1, 2]").unwrap_err();
        assert!(matches!(err, DataParseError::NotAMapping("sequence")));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Context::from_json_str("{\"name\": "),
            Err(DataParseError::Json(_))
        ));
    }

    #[test]
    fn test_serializes_for_templates() {
        let ctx = Context::from_yaml_str("name: Ada\nnested:\n  n: 1\n").unwrap();
        let json = serde_json::to_string(&ctx).unwrap();
        assert_eq!(json, r#"{"name":"Ada","nested":{"n":1}}"#);
    }
}
