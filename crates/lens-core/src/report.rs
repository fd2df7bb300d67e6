//! Typed tree for generated reports.
//!
//! The generator returns arbitrary JSON. Citation scanning and rewriting only
//! care about string leaves, so the tree keeps every other value untouched and
//! preserves object key order through (de)serialization.

use std::fmt;

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::errors::GenerationFailure;

/// One node of a generated report.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportNode {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
    List(Vec<ReportNode>),
    /// Object entries in document order.
    Map(Vec<(String, ReportNode)>),
}

impl ReportNode {
    /// Visit every string leaf. Map keys are not leaves.
    pub fn for_each_text<F>(&self, f: &mut F)
    where
        F: FnMut(&str),
    {
        match self {
            Self::Text(text) => f(text),
            Self::List(items) => items.iter().for_each(|item| item.for_each_text(f)),
            Self::Map(entries) => entries.iter().for_each(|(_, value)| value.for_each_text(f)),
            Self::Null | Self::Bool(_) | Self::Number(_) => {}
        }
    }

    /// Rewrite every string leaf, leaving structure, key order, and non-string
    /// values unchanged.
    #[must_use]
    pub fn map_text<F>(self, f: &mut F) -> Self
    where
        F: FnMut(String) -> String,
    {
        match self {
            Self::Text(text) => Self::Text(f(text)),
            Self::List(items) => Self::List(items.into_iter().map(|item| item.map_text(f)).collect()),
            Self::Map(entries) => Self::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, value.map_text(f)))
                    .collect(),
            ),
            other @ (Self::Null | Self::Bool(_) | Self::Number(_)) => other,
        }
    }

    /// Look up a key in a map node.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Map(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self, Self::Map(_))
    }

    /// Number of string leaves in the tree.
    #[must_use]
    pub fn text_leaf_count(&self) -> usize {
        let mut count = 0;
        self.for_each_text(&mut |_| count += 1);
        count
    }
}

impl Serialize for ReportNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Number(value) => value.serialize(serializer),
            Self::Text(value) => serializer.serialize_str(value),
            Self::List(items) => serializer.collect_seq(items),
            Self::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for ReportNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NodeVisitor)
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = ReportNode;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON value")
    }

    fn visit_unit<E: de::Error>(self) -> Result<ReportNode, E> {
        Ok(ReportNode::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<ReportNode, E> {
        Ok(ReportNode::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<ReportNode, D::Error> {
        ReportNode::deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<ReportNode, E> {
        Ok(ReportNode::Bool(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<ReportNode, E> {
        Ok(ReportNode::Number(value.into()))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<ReportNode, E> {
        Ok(ReportNode::Number(value.into()))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<ReportNode, E> {
        Ok(serde_json::Number::from_f64(value).map_or(ReportNode::Null, ReportNode::Number))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<ReportNode, E> {
        Ok(ReportNode::Text(value.to_owned()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<ReportNode, E> {
        Ok(ReportNode::Text(value))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<ReportNode, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(ReportNode::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<ReportNode, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, ReportNode>()? {
            entries.push((key, value));
        }
        Ok(ReportNode::Map(entries))
    }
}

/// A parsed generator response.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedReport {
    /// The report body; always a map node.
    pub report: ReportNode,
    /// Ids the generator claims to have cited. Never trusted for grounding.
    pub claimed_ids: Vec<u64>,
}

#[derive(Deserialize)]
struct RawGeneratedReport {
    report: Option<ReportNode>,
    #[serde(default)]
    cited_ids: Vec<serde_json::Value>,
}

impl GeneratedReport {
    #[must_use]
    pub const fn new(report: ReportNode) -> Self {
        Self {
            report,
            claimed_ids: Vec::new(),
        }
    }

    /// Parse the generator's `{"report": {...}, "cited_ids": [...]}` envelope.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationFailure::Malformed`] when the text is not JSON, is
    /// not an object, or lacks a `report` object. Nothing is repaired.
    pub fn from_json(text: &str) -> Result<Self, GenerationFailure> {
        let raw: RawGeneratedReport = serde_json::from_str(text)
            .map_err(|e| GenerationFailure::Malformed(format!("invalid report JSON: {e}")))?;

        let report = raw
            .report
            .filter(ReportNode::is_map)
            .ok_or_else(|| GenerationFailure::Malformed("missing `report` object".into()))?;

        let claimed_ids = raw
            .cited_ids
            .iter()
            .filter_map(|v| match v {
                serde_json::Value::Number(n) => n.as_u64(),
                serde_json::Value::String(s) => s.trim().parse().ok(),
                _ => None,
            })
            .collect();

        Ok(Self {
            report,
            claimed_ids,
        })
    }
}
