// Variable values bound during expansion

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{hash_map::Entry, HashMap};

use super::ast::VariableName;

/// The value of a variable used for expanding a template.
///
/// Plain strings, string lists and ordered key/value pairs convert into the
/// matching variant:
///
/// ```
/// use uritemplate::template::Value;
///
/// let hello: Value = "Hello World!".into();
/// let list: Value = ["red", "green", "blue"].into();
/// let keys: Value = [("semi", ";"), ("dot", "."), ("comma", ",")].into();
/// # assert!(matches!(hello, Value::Text(_)));
/// # assert!(matches!(list, Value::List(_)));
/// # assert!(matches!(keys, Value::AssociativeList(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    List(Vec<String>),
    AssociativeList(AssociativeList),
}

impl Value {
    pub fn text(text: impl Into<String>) -> Self {
        Value::Text(text.into())
    }

    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    pub fn associative_list<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Value::AssociativeList(pairs.into_iter().collect())
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::text(text)
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items)
    }
}

impl From<Vec<&str>> for Value {
    fn from(items: Vec<&str>) -> Self {
        Value::list(items)
    }
}

impl<const N: usize> From<[&str; N]> for Value {
    fn from(items: [&str; N]) -> Self {
        Value::list(items)
    }
}

impl<K: Into<String>, V: Into<String>> From<Vec<(K, V)>> for Value {
    fn from(pairs: Vec<(K, V)>) -> Self {
        Value::associative_list(pairs)
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Value {
    fn from(pairs: [(K, V); N]) -> Self {
        Value::associative_list(pairs)
    }
}

impl From<AssociativeList> for Value {
    fn from(pairs: AssociativeList) -> Self {
        Value::AssociativeList(pairs)
    }
}

/// Ordered key/value pairs with unique keys.
///
/// Inserting an existing key replaces its value but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssociativeList(IndexMap<String, String>);

impl AssociativeList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AssociativeList {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut list = Self::new();
        for (key, value) in iter {
            list.insert(key, value);
        }
        list
    }
}

/// Variable bindings for one expansion.
///
/// Names that are absent, or deserialized from `null`, are undefined.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "HashMap<VariableName, Option<Value>>")]
pub struct Variables(HashMap<VariableName, Value>);

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<VariableName>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&VariableName, &Value)> {
        self.0.iter()
    }

    /// Binds `value` as text, or appends it when `name` is already bound.
    ///
    /// A second value turns text into a list. Associative lists are replaced.
    pub fn append_text(&mut self, name: impl Into<VariableName>, value: impl Into<String>) {
        let value = value.into();
        match self.0.entry(name.into()) {
            Entry::Occupied(mut entry) => match entry.get_mut() {
                Value::List(items) => items.push(value),
                Value::Text(first) => {
                    let first = std::mem::take(first);
                    entry.insert(Value::List(vec![first, value]));
                }
                Value::AssociativeList(_) => {
                    entry.insert(Value::Text(value));
                }
            },
            Entry::Vacant(entry) => {
                entry.insert(Value::Text(value));
            }
        }
    }

    /// Adds `(key, value)` to the associative list bound to `name`.
    ///
    /// Any other value bound to `name` is replaced by a new associative list.
    pub fn insert_member(
        &mut self,
        name: impl Into<VariableName>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        let slot = self
            .0
            .entry(name.into())
            .or_insert_with(|| Value::AssociativeList(AssociativeList::new()));
        if !matches!(slot, Value::AssociativeList(_)) {
            *slot = Value::AssociativeList(AssociativeList::new());
        }
        if let Value::AssociativeList(pairs) = slot {
            pairs.insert(key, value);
        }
    }

    /// Binds every name from `defaults` that is not bound here
    pub fn fill_defaults(&mut self, defaults: &Variables) {
        for (name, value) in defaults.iter() {
            if !self.0.contains_key(name) {
                self.0.insert(name.clone(), value.clone());
            }
        }
    }
}

impl From<HashMap<VariableName, Option<Value>>> for Variables {
    fn from(map: HashMap<VariableName, Option<Value>>) -> Self {
        Self(
            map.into_iter()
                .filter_map(|(name, value)| value.map(|value| (name, value)))
                .collect(),
        )
    }
}

impl Serialize for Variables {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter())
    }
}

impl<N: Into<VariableName>, V: Into<Value>> FromIterator<(N, V)> for Variables {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut variables = Self::new();
        for (name, value) in iter {
            variables.insert(name, value);
        }
        variables
    }
}
