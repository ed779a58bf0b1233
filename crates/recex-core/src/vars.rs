//! Variable maps attached to traced frames.
//!
//! [`Vars`] is an insertion-ordered map from variable name to an arbitrary
//! JSON value. Frames update their variables by shallow merge: keys in the
//! patch overwrite, keys absent from the patch are kept.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An insertion-ordered variable map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vars(IndexMap<String, Value>);

impl Vars {
    /// Creates an empty variable map.
    pub fn new() -> Self {
        Vars(IndexMap::new())
    }

    /// Inserts or replaces a variable, keeping its original position if it
    /// already existed.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Shallow-merges `patch` into this map. New values win.
    pub fn merge(&mut self, patch: &Vars) {
        for (name, value) in patch.iter() {
            self.0.insert(name.clone(), value.clone());
        }
    }
}

impl FromIterator<(String, Value)> for Vars {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Vars(iter.into_iter().collect())
    }
}

impl IntoIterator for Vars {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Vars {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Builds a [`Vars`] map from `name => expr` pairs, where each expression is
/// anything `serde_json::json!` accepts.
///
/// ```
/// let vars = recex_core::vars! { "n" => 5, "seen" => [1, 2] };
/// assert_eq!(vars.len(), 2);
/// ```
#[macro_export]
macro_rules! vars {
    () => {
        $crate::Vars::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut vars = $crate::Vars::new();
        $( vars.insert($name, $crate::serde_json::json!($value)); )+
        vars
    }};
}
