//! Output document tree and the structural mapping from resolved values.
//!
//! The mapping is fixed:
//! - each top-level entry becomes `<entry name="KEY">` under `<config>`;
//! - a dict becomes one child `entry` per pair, in order;
//! - an array becomes one child `array_item` per element, `index` counting
//!   from zero;
//! - an integer becomes decimal text, the null sentinel becomes
//!   [`NULL_TEXT`].
//!
//! Nothing is evaluated or validated here.

use crate::value::{Dict, Value};

/// Name of the document's root element.
pub const ROOT_ELEMENT: &str = "config";
pub const ENTRY_ELEMENT: &str = "entry";
pub const ARRAY_ITEM_ELEMENT: &str = "array_item";

/// Text rendered for a value that failed to resolve. Never produced by an
/// integer, whose rendering is always an optional `-` followed by digits.
pub const NULL_TEXT: &str = "null";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    Config,
    Entry { name: String },
    ArrayItem { index: usize },
}

impl Tag {
    pub fn element_name(&self) -> &'static str {
        match self {
            Tag::Config => ROOT_ELEMENT,
            Tag::Entry { .. } => ENTRY_ELEMENT,
            Tag::ArrayItem { .. } => ARRAY_ITEM_ELEMENT,
        }
    }

    /// The single attribute the element carries, if any.
    pub fn attribute(&self) -> Option<(&'static str, String)> {
        match self {
            Tag::Config => None,
            Tag::Entry { name } => Some(("name", name.clone())),
            Tag::ArrayItem { index } => Some(("index", index.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Elements(Vec<Element>),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: Tag,
    pub content: Content,
}

impl Element {
    pub fn children(&self) -> &[Element] {
        match &self.content {
            Content::Elements(children) => children,
            Content::Text(_) => &[],
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.content {
            Content::Text(t) => Some(t),
            Content::Elements(_) => None,
        }
    }
}

/// A complete output document rooted at `<config>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub root: Element,
}

/// Build the document for a resolved top-level mapping.
pub fn serialize(entries: &Dict) -> Document {
    Document {
        root: Element {
            tag: Tag::Config,
            content: Content::Elements(dict_children(entries)),
        },
    }
}

fn dict_children(dict: &Dict) -> Vec<Element> {
    dict.iter()
        .map(|(key, value)| Element {
            tag: Tag::Entry {
                name: key.to_owned(),
            },
            content: content_of(value),
        })
        .collect()
}

fn content_of(value: &Value) -> Content {
    match value {
        Value::Dict(dict) => Content::Elements(dict_children(dict)),
        Value::Array(items) => Content::Elements(
            items
                .iter()
                .enumerate()
                .map(|(index, item)| Element {
                    tag: Tag::ArrayItem { index },
                    content: content_of(item),
                })
                .collect(),
        ),
        Value::Integer(n) => Content::Text(n.to_string()),
        Value::Null => Content::Text(NULL_TEXT.to_owned()),
    }
}
