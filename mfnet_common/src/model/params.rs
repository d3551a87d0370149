use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Open-ended attribute bag attached to components, connections, layers and
/// features.
///
/// Keys map to arbitrary JSON values (numbers, strings, booleans, arrays),
/// which covers everything the interchange format stores in `params` blocks,
/// including `"position": [x, y]`. Equality is structural over keys and
/// values; insertion order is preserved for serialization but does not
/// affect equality.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params {
    data: IndexMap<String, Value>,
}

impl PartialEq for Params {
    fn eq(&self, other: &Self) -> bool {
        // IndexMap equality is order-insensitive, which is exactly the
        // structural comparison the matcher needs.
        self.data == other.data
    }
}

impl Eq for Params {}

impl Params {
    /// Creates an empty attribute bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// True if no parameters are set.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if `key` is present.
    pub fn exists(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Raw value lookup.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Sets `key` to `value`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.data.insert(key.into(), value.into());
    }

    /// Removes `key`, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.shift_remove(key)
    }

    /// Iterates parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.data.iter()
    }

    /// Integer accessor; `None` if absent or not an integer.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.data.get(key).and_then(Value::as_i64)
    }

    /// Float accessor; accepts any JSON number.
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.data.get(key).and_then(Value::as_f64)
    }

    /// String accessor.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }

    /// Reads a two-element numeric array such as `"position": [x, y]`.
    pub fn get_point(&self, key: &str) -> Option<(f64, f64)> {
        let arr = self.data.get(key)?.as_array()?;
        match arr.as_slice() {
            [x, y] => Some((x.as_f64()?, y.as_f64()?)),
            _ => None,
        }
    }
}

impl std::fmt::Display for Params {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_json::to_string(&self.data) {
            Ok(text) => f.write_str(&text),
            Err(_) => f.write_str("{?}"),
        }
    }
}

impl FromIterator<(String, Value)> for Params {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}
