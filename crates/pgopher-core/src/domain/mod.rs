pub mod errors;

pub use errors::{ErrorCategory, ParserResult, PgopherError, PgopherResult, RunResult};

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::modules::serialization::format_real;

/// A single configuration value.
///
/// Numbers stay numeric until the document is serialized; the text form is
/// produced by [`Display`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Integer(i64),
    Real(f64),
    Text(String),
}

impl ParamValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Bool(_) => None,
            Self::Integer(value) => Some(*value as f64),
            Self::Real(value) => Some(*value),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }
}

impl Display for ParamValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Real(value) => f.write_str(&format_real(*value)),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Insertion-ordered, string-keyed map of [`ParamValue`]s.
///
/// Replacing an existing key keeps its position; new keys are appended.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParameterMap {
    entries: Vec<(String, ParamValue)>,
}

impl ParameterMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from `defaults` and lay `overrides` over them.
    ///
    /// Every key present in `overrides` wins; defaults only fill keys the
    /// caller did not supply.
    pub fn merged(defaults: ParameterMap, overrides: Option<ParameterMap>) -> Self {
        let mut merged = overrides.unwrap_or_default();
        let mut ordered = Self::new();
        for (key, default) in defaults.entries {
            let value = merged.remove(&key).unwrap_or(default);
            ordered.entries.push((key, value));
        }
        ordered.entries.extend(merged.entries);
        ordered
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        let index = self.entries.iter().position(|(existing, _)| existing == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Lay `other` over `self`, replacing values in place and appending new keys.
    pub fn extend(&mut self, other: ParameterMap) {
        for (key, value) in other.entries {
            self.insert(key, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for ParameterMap
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl Serialize for ParameterMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ParameterMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = ParameterMap;

            fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str("a mapping of parameter names to booleans, numbers or strings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = ParameterMap::new();
                while let Some((key, value)) = access.next_entry::<String, ParamValue>()? {
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

/// Rotor classification of the simulated molecule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MolType {
    Asymmetric,
    Symmetric,
    Linear,
}

impl MolType {
    pub const ALL: [MolType; 3] = [Self::Asymmetric, Self::Symmetric, Self::Linear];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asymmetric => "Asymmetric",
            Self::Symmetric => "Symmetric",
            Self::Linear => "Linear",
        }
    }

    pub fn molecule_tag(self) -> String {
        format!("{}Molecule", self.as_str())
    }

    pub fn manifold_tag(self) -> String {
        format!("{}Manifold", self.as_str())
    }

    pub fn hamiltonian_tag(self) -> String {
        match self {
            Self::Linear => self.as_str().to_string(),
            _ => format!("{}Top", self.as_str()),
        }
    }
}

impl FromStr for MolType {
    type Err = PgopherError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim();
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str().eq_ignore_ascii_case(normalized))
            .ok_or_else(|| PgopherError::InvalidTopology(value.to_string()))
    }
}

impl Display for MolType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// Principal inertial axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    A,
    B,
    C,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Self::A, Self::B, Self::C];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
            Self::C => "c",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|axis| axis.as_str() == key)
    }
}

impl Display for Axis {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}
