//! Content option validation
//!
//! Options are the attributes that can be changed on existing content. They
//! live in two disjoint namespaces (file options and folder options). Each
//! key declares the value types it accepts and, optionally, how the value is
//! formatted before it is sent.
//!
//! Validation is a pure function of `(key, value)`:
//!
//! ```rust
//! use gofile_client::options::{self, folder_option};
//! use serde_json::json;
//!
//! assert_eq!(options::validate(folder_option::IS_PUBLIC, &true.into()).unwrap(), json!("true"));
//! assert_eq!(options::validate(folder_option::TAGS, &vec!["a", "b"].into()).unwrap(), json!("a,b"));
//! assert_eq!(options::validate(folder_option::EXPIRE, &120.0.into()).unwrap(), json!(120));
//! ```

use crate::{ClientError, Result};
use serde_json::Value;
use std::fmt;

/// Option keys applicable to files
pub mod file_option {
    /// Expected value is a string
    pub const NAME: &str = "name";
    /// Expected value is a bool
    pub const DIRECT_LINK: &str = "directLink";
}

/// Option keys applicable to folders
pub mod folder_option {
    /// Expected value is a bool
    pub const IS_PUBLIC: &str = "public";
    /// Expected value is a string
    pub const PASSWORD: &str = "password";
    /// Expected value is a string
    pub const DESCRIPTION: &str = "description";
    /// Expected value is a list of strings
    pub const TAGS: &str = "tags";
    /// Expected value is a unix timestamp, int or float
    pub const EXPIRE: &str = "expiry";
}

/// Which kind of content an option belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionNamespace {
    File,
    Folder,
}

/// Type tag of an [`OptionValue`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueType {
    Bool,
    Str,
    List,
    Int,
    Float,
}

impl ValueType {
    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Str => "string",
            Self::List => "list",
            Self::Int => "int",
            Self::Float => "float",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A caller-supplied option value
#[derive(Clone, Debug, PartialEq)]
pub enum OptionValue {
    Bool(bool),
    Str(String),
    List(Vec<String>),
    Int(i64),
    Float(f64),
}

impl OptionValue {
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Bool(_) => ValueType::Bool,
            Self::Str(_) => ValueType::Str,
            Self::List(_) => ValueType::List,
            Self::Int(_) => ValueType::Int,
            Self::Float(_) => ValueType::Float,
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Self::Bool(b) => Value::Bool(*b),
            Self::Str(s) => Value::String(s.clone()),
            Self::List(items) => Value::from(items.clone()),
            Self::Int(i) => Value::from(*i),
            Self::Float(f) => Value::from(*f),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for OptionValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(v: Vec<String>) -> Self {
        Self::List(v)
    }
}

impl From<Vec<&str>> for OptionValue {
    fn from(v: Vec<&str>) -> Self {
        Self::List(v.into_iter().map(str::to_string).collect())
    }
}

impl From<i64> for OptionValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for OptionValue {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<f64> for OptionValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

type Formatter = fn(&OptionValue) -> Value;

/// Declaration of a single option key
pub struct OptionSpec {
    pub key: &'static str,
    pub namespace: OptionNamespace,
    pub accepts: &'static [ValueType],
    format: Option<Formatter>,
}

impl fmt::Debug for OptionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionSpec")
            .field("key", &self.key)
            .field("namespace", &self.namespace)
            .field("accepts", &self.accepts)
            .finish()
    }
}

impl OptionSpec {
    fn expected(&self) -> String {
        self.accepts
            .iter()
            .map(|t| t.name())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Check the value type and apply the key's formatter
    pub fn validate(&self, value: &OptionValue) -> Result<Value> {
        if !self.accepts.contains(&value.value_type()) {
            return Err(ClientError::InvalidOptionValue {
                option: self.key.to_string(),
                expected: self.expected(),
                received: value.value_type().name(),
            });
        }
        Ok(match self.format {
            Some(format) => format(value),
            None => value.to_json(),
        })
    }

    /// Parse a textual value (e.g. from a command line) as the first
    /// accepted type that fits
    pub fn parse_value(&self, raw: &str) -> Result<OptionValue> {
        for ty in self.accepts {
            let parsed = match ty {
                ValueType::Bool => raw.parse::<bool>().ok().map(OptionValue::Bool),
                ValueType::Int => raw.parse::<i64>().ok().map(OptionValue::Int),
                ValueType::Float => raw.parse::<f64>().ok().map(OptionValue::Float),
                ValueType::List => Some(OptionValue::List(
                    raw.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect(),
                )),
                ValueType::Str => Some(OptionValue::Str(raw.to_string())),
            };
            if let Some(value) = parsed {
                return Ok(value);
            }
        }
        Err(ClientError::InvalidOptionValue {
            option: self.key.to_string(),
            expected: self.expected(),
            received: "string",
        })
    }
}

// The service expects booleans as lowercase strings
fn format_bool(value: &OptionValue) -> Value {
    match value {
        OptionValue::Bool(b) => Value::String(b.to_string()),
        other => other.to_json(),
    }
}

fn format_csv(value: &OptionValue) -> Value {
    match value {
        OptionValue::List(items) => Value::String(items.join(",")),
        other => other.to_json(),
    }
}

fn format_epoch(value: &OptionValue) -> Value {
    match value {
        OptionValue::Float(f) => Value::from(f.trunc() as i64),
        other => other.to_json(),
    }
}

static OPTIONS: &[OptionSpec] = &[
    OptionSpec {
        key: file_option::NAME,
        namespace: OptionNamespace::File,
        accepts: &[ValueType::Str],
        format: None,
    },
    OptionSpec {
        key: file_option::DIRECT_LINK,
        namespace: OptionNamespace::File,
        accepts: &[ValueType::Bool],
        format: Some(format_bool),
    },
    OptionSpec {
        key: folder_option::IS_PUBLIC,
        namespace: OptionNamespace::Folder,
        accepts: &[ValueType::Bool],
        format: Some(format_bool),
    },
    OptionSpec {
        key: folder_option::PASSWORD,
        namespace: OptionNamespace::Folder,
        accepts: &[ValueType::Str],
        format: None,
    },
    OptionSpec {
        key: folder_option::DESCRIPTION,
        namespace: OptionNamespace::Folder,
        accepts: &[ValueType::Str],
        format: None,
    },
    OptionSpec {
        key: folder_option::TAGS,
        namespace: OptionNamespace::Folder,
        accepts: &[ValueType::List],
        format: Some(format_csv),
    },
    OptionSpec {
        key: folder_option::EXPIRE,
        namespace: OptionNamespace::Folder,
        accepts: &[ValueType::Int, ValueType::Float],
        format: Some(format_epoch),
    },
];

/// Look up the declaration for `key`
pub fn lookup(key: &str) -> Result<&'static OptionSpec> {
    OPTIONS
        .iter()
        .find(|spec| spec.key == key)
        .ok_or_else(|| ClientError::UnknownOption(key.to_string()))
}

/// All option keys in `namespace`
pub fn keys(namespace: OptionNamespace) -> impl Iterator<Item = &'static str> {
    OPTIONS
        .iter()
        .filter(move |spec| spec.namespace == namespace)
        .map(|spec| spec.key)
}

/// Validate and format `value` for `key`
pub fn validate(key: &str, value: &OptionValue) -> Result<Value> {
    lookup(key)?.validate(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(folder_option::IS_PUBLIC, OptionValue::Bool(true), json!("true"))]
    #[case(folder_option::IS_PUBLIC, OptionValue::Bool(false), json!("false"))]
    #[case(folder_option::PASSWORD, "secret".into(), json!("secret"))]
    #[case(folder_option::DESCRIPTION, "A short description".into(), json!("A short description"))]
    #[case(folder_option::TAGS, vec!["a", "b"].into(), json!("a,b"))]
    #[case(folder_option::EXPIRE, OptionValue::Float(120.0), json!(120))]
    #[case(folder_option::EXPIRE, OptionValue::Float(120.9), json!(120))]
    #[case(folder_option::EXPIRE, OptionValue::Int(1700000000), json!(1700000000))]
    #[case(file_option::DIRECT_LINK, OptionValue::Bool(true), json!("true"))]
    #[case(file_option::NAME, "report.pdf".into(), json!("report.pdf"))]
    fn test_formats(#[case] key: &str, #[case] value: OptionValue, #[case] expected: Value) {
        assert_eq!(validate(key, &value).unwrap(), expected);
    }

    #[rstest]
    #[case("expire")]
    #[case("Public")]
    #[case("")]
    fn test_unknown_option(#[case] key: &str) {
        let err = validate(key, &OptionValue::Bool(true)).unwrap_err();
        assert!(matches!(err, ClientError::UnknownOption(k) if k == key));
    }

    #[rstest]
    #[case(folder_option::IS_PUBLIC, "true".into(), "string")]
    #[case(folder_option::TAGS, "a,b".into(), "string")]
    #[case(folder_option::EXPIRE, OptionValue::Bool(true), "bool")]
    #[case(folder_option::PASSWORD, OptionValue::Int(1), "int")]
    fn test_invalid_value(#[case] key: &str, #[case] value: OptionValue, #[case] received_type: &str) {
        match validate(key, &value).unwrap_err() {
            ClientError::InvalidOptionValue { option, received, .. } => {
                assert_eq!(option, key);
                assert_eq!(received, received_type);
            }
            other => panic!("Expected InvalidOptionValue, got {other:?}"),
        }
    }

    #[test]
    fn test_expected_types_listed() {
        match validate(folder_option::EXPIRE, &"soon".into()).unwrap_err() {
            ClientError::InvalidOptionValue { expected, .. } => assert_eq!(expected, "int, float"),
            other => panic!("Expected InvalidOptionValue, got {other:?}"),
        }
    }

    #[test]
    fn test_namespaces_are_disjoint() {
        let files: Vec<_> = keys(OptionNamespace::File).collect();
        let folders: Vec<_> = keys(OptionNamespace::Folder).collect();
        assert_eq!(files, vec!["name", "directLink"]);
        assert_eq!(folders.len(), 5);
        assert!(files.iter().all(|k| !folders.contains(k)));
    }

    #[test]
    fn test_parse_value() {
        let spec = lookup(folder_option::EXPIRE).unwrap();
        assert_eq!(spec.parse_value("120").unwrap(), OptionValue::Int(120));
        assert_eq!(spec.parse_value("120.5").unwrap(), OptionValue::Float(120.5));
        assert!(spec.parse_value("tomorrow").is_err());

        let spec = lookup(folder_option::TAGS).unwrap();
        assert_eq!(
            spec.parse_value("a, b,").unwrap(),
            OptionValue::List(vec!["a".to_string(), "b".to_string()])
        );

        let spec = lookup(folder_option::IS_PUBLIC).unwrap();
        assert_eq!(spec.parse_value("false").unwrap(), OptionValue::Bool(false));
    }
}
