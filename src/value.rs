use std::fmt;

/// A property value read from a node.
///
/// Hosts map whatever their widgets actually store into this vocabulary;
/// the engine compares values without ever touching host types. The
/// integer/float distinction is preserved so `[Count=3]` and
/// `[Opacity=0.5]` both compare against the value as stored.
///
/// # Examples
///
/// ```
/// use sceneq::{CompareOp, PropertyValue};
///
/// let width = PropertyValue::Integer(120);
/// assert!(width.matches(CompareOp::Equal, "120"));
/// assert!(width.matches(CompareOp::StartsWith, "12"));
/// assert!(!width.is_default());
///
/// let title = PropertyValue::String("Save as...".to_string());
/// assert!(title.matches(CompareOp::Contains, "as"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// No value set
    Null,

    /// Boolean property (true/false)
    Boolean(bool),

    /// Floating-point property
    Float(f64),

    /// Integer property (preserved separately from floats)
    Integer(i64),

    /// UTF-8 string property
    String(String),
}

/// Comparison operators available in property filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// Equal (`=`)
    Equal,
    /// Not equal (`!=`)
    NotEqual,
    /// Prefix match (`^=`)
    StartsWith,
    /// Suffix match (`$=`)
    EndsWith,
    /// Substring match (`~=`)
    Contains,
}

impl CompareOp {
    /// Map a single operator character to its comparison.
    pub fn from_symbol(symbol: char) -> Option<CompareOp> {
        match symbol {
            '=' => Some(CompareOp::Equal),
            '!' => Some(CompareOp::NotEqual),
            '^' => Some(CompareOp::StartsWith),
            '$' => Some(CompareOp::EndsWith),
            '~' => Some(CompareOp::Contains),
            _ => None,
        }
    }
}

impl PropertyValue {
    /// True for the zero value of the variant: null, false, 0, 0.0
    /// and the empty string.
    pub fn is_default(&self) -> bool {
        match self {
            PropertyValue::Null => true,
            PropertyValue::Boolean(b) => !b,
            PropertyValue::Float(n) => *n == 0.0,
            PropertyValue::Integer(n) => *n == 0,
            PropertyValue::String(s) => s.is_empty(),
        }
    }

    /// Parse a query literal toward this value's own variant.
    ///
    /// A literal that does not parse stays a plain string, so a typed
    /// value never accidentally equals it: `[Width=abc]` matches nothing
    /// while `[Width!=abc]` matches every node carrying `Width`.
    pub fn coerce(&self, literal: &str) -> PropertyValue {
        let coerced = match self {
            PropertyValue::Boolean(_) if literal.eq_ignore_ascii_case("true") => {
                Some(PropertyValue::Boolean(true))
            }
            PropertyValue::Boolean(_) if literal.eq_ignore_ascii_case("false") => {
                Some(PropertyValue::Boolean(false))
            }
            PropertyValue::Boolean(_) => None,
            PropertyValue::Float(_) => literal.parse::<f64>().ok().map(PropertyValue::Float),
            PropertyValue::Integer(_) => literal.parse::<i64>().ok().map(PropertyValue::Integer),
            PropertyValue::String(_) => Some(PropertyValue::String(literal.to_string())),
            PropertyValue::Null => None,
        };
        coerced.unwrap_or_else(|| PropertyValue::String(literal.to_string()))
    }

    /// Compare this value against a query literal.
    ///
    /// The literal is coerced first; `Equal` and `NotEqual` then compare
    /// typed values, while the prefix/suffix/substring operators compare
    /// the rendered strings of both sides. Null matches nothing, not
    /// even `NotEqual`.
    pub fn matches(&self, op: CompareOp, literal: &str) -> bool {
        if *self == PropertyValue::Null {
            return false;
        }
        let coerced = self.coerce(literal);
        match op {
            CompareOp::Equal => *self == coerced,
            CompareOp::NotEqual => *self != coerced,
            CompareOp::StartsWith => self.to_string().starts_with(&coerced.to_string()),
            CompareOp::EndsWith => self.to_string().ends_with(&coerced.to_string()),
            CompareOp::Contains => self.to_string().contains(&coerced.to_string()),
        }
    }

    /// Build a value from a JSON scene property. Numbers keep the
    /// integer/float split; anything compound is rendered to a string.
    pub fn from_json(value: &serde_json::Value) -> PropertyValue {
        match value {
            serde_json::Value::Null => PropertyValue::Null,
            serde_json::Value::Bool(b) => PropertyValue::Boolean(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => PropertyValue::Integer(i),
                None => PropertyValue::Float(n.as_f64().unwrap_or(0.0)),
            },
            serde_json::Value::String(s) => PropertyValue::String(s.clone()),
            other => PropertyValue::String(other.to_string()),
        }
    }

    /// Render as JSON.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            PropertyValue::Null => serde_json::Value::Null,
            PropertyValue::Boolean(b) => serde_json::Value::Bool(*b),
            PropertyValue::Float(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            PropertyValue::Integer(n) => serde_json::Value::Number((*n).into()),
            PropertyValue::String(s) => serde_json::Value::String(s.clone()),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Null => write!(f, "null"),
            PropertyValue::Boolean(b) => write!(f, "{b}"),
            PropertyValue::Float(n) => write!(f, "{n}"),
            PropertyValue::Integer(n) => write!(f, "{n}"),
            PropertyValue::String(s) => write!(f, "{s}"),
        }
    }
}

#[test]
fn test_failed_coercion_stays_string() {
    let width = PropertyValue::Integer(90);
    assert!(!width.matches(CompareOp::Equal, "abc"));
    assert!(width.matches(CompareOp::NotEqual, "abc"));
}

#[test]
fn test_null_never_matches() {
    let value = PropertyValue::Null;
    assert!(!value.matches(CompareOp::Equal, "null"));
    assert!(!value.matches(CompareOp::NotEqual, "anything"));
}
