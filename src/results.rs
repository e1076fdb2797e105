use crate::report::ResultRow;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The result of a `SELECT` query as returned by [`SparqlClient`](super::SparqlClient).
///
/// Some endpoints (and most hand-written fixtures) omit `head` or the `type`
/// of each term, so both are optional here.
#[derive(Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct BindingsDocument {
    #[serde(default)]
    pub(crate) head: BindingsHead,
    pub(crate) results: Results,
}

#[derive(Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct BindingsHead {
    #[serde(default)]
    pub(crate) vars: Vec<Box<str>>,
    #[serde(default)]
    link: Vec<Box<str>>,
}

#[derive(Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Results {
    pub(crate) bindings: Vec<HashMap<Box<str>, Term>>,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TermKind {
    Bnode,
    Literal,
    Uri,
    Triple,
    /// Any type this crate does not know about; the term's value is still readable.
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub struct Term {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TermKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Box<str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<Box<str>>,
    #[serde(rename = "xml:lang", default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<Box<str>>,
}

impl BindingsDocument {
    pub fn len(&self) -> usize {
        self.results.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.bindings.is_empty()
    }

    /// The lexical value bound to `var` in the `index`-th binding, if any.
    pub fn value(&self, index: usize, var: &str) -> Option<&str> {
        self.results
            .bindings
            .get(index)?
            .get(var)?
            .value
            .as_deref()
    }

    /// Turn every binding into a [`ResultRow`], preserving order.
    pub fn rows(&self) -> Vec<ResultRow> {
        (0..self.len())
            .map(|i| ResultRow {
                label: self.value(i, "entityLabel").map(String::from),
                date: self.value(i, "date").map(String::from),
            })
            .collect()
    }
}
