//! DOM Node
//!
//! Nodes link to their relatives by `NodeId` rather than by pointer, so the
//! whole tree lives in one `Vec` owned by `DomTree`.

use crate::{ClassList, InlineStyle, NodeId};

/// DOM Node - Core structure
#[derive(Debug, Clone)]
pub struct Node {
    /// Parent node (NONE if root or detached)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Create a new element node
    pub fn element(data: ElementData) -> Self {
        Self::with_data(NodeData::Element(data))
    }

    /// Create a new text node
    pub fn text(content: impl Into<String>) -> Self {
        Self::with_data(NodeData::Text(content.into()))
    }

    /// Create a comment node
    pub fn comment(content: impl Into<String>) -> Self {
        Self::with_data(NodeData::Comment(content.into()))
    }

    /// Create a doctype node
    pub fn doctype(name: impl Into<String>) -> Self {
        Self::with_data(NodeData::Doctype { name: name.into() })
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Document root
    Document,
    /// DOCTYPE
    Doctype { name: String },
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
    /// Comment
    Comment(String),
}

/// Element-specific data
///
/// `class` and `style` are not kept in `attrs`; they live in `classes` and
/// `style` so that class-list and style mutations are the single source of
/// truth for those attributes.
#[derive(Debug, Clone)]
pub struct ElementData {
    /// Lowercase tag name
    pub tag: String,
    /// Attributes other than `class` and `style`
    pub attrs: Vec<Attribute>,
    /// Class list (presentation flags)
    pub classes: ClassList,
    /// Inline style declarations
    pub style: InlineStyle,
    /// Live value of form controls
    pub value: String,
    /// Checkedness of checkbox/radio inputs
    pub checked: bool,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            classes: ClassList::new(),
            style: InlineStyle::new(),
            value: String::new(),
            checked: false,
        }
    }

    /// Build an element from parsed attributes
    pub fn with_attrs<I, K, V>(tag: &str, attrs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut elem = Self::new(tag);
        for (name, value) in attrs {
            elem.set_attr(name, value);
        }
        elem
    }

    /// Get an attribute value (`class` and `style` excluded, see `class_attr`)
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_str())
    }

    /// Check attribute presence, including `class` and `style`
    pub fn has_attr(&self, name: &str) -> bool {
        match name.to_ascii_lowercase().as_str() {
            "class" => !self.classes.is_empty(),
            "style" => !self.style.is_empty(),
            _ => self.get_attr(name).is_some(),
        }
    }

    /// Serialized value of any attribute, including `class` and `style`
    pub fn attr_value(&self, name: &str) -> Option<String> {
        match name.to_ascii_lowercase().as_str() {
            "class" if !self.classes.is_empty() => Some(self.classes.value()),
            "style" if !self.style.is_empty() => Some(self.style.css_text()),
            "class" | "style" => None,
            _ => self.get_attr(name).map(str::to_string),
        }
    }

    /// Set an attribute
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into().to_ascii_lowercase();
        let value = value.into();
        match name.as_str() {
            "class" => self.classes.set_value(&value),
            "style" => self.style = InlineStyle::parse(&value),
            _ => {
                if name == "value" {
                    self.value = value.clone();
                } else if name == "checked" {
                    self.checked = true;
                }
                if let Some(attr) = self.attrs.iter_mut().find(|a| a.name == name) {
                    attr.value = value;
                } else {
                    self.attrs.push(Attribute { name, value });
                }
            }
        }
    }

    /// Remove a plain attribute
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let pos = self.attrs.iter().position(|a| a.name.eq_ignore_ascii_case(name))?;
        Some(self.attrs.remove(pos).value)
    }

    /// `id` attribute
    pub fn id(&self) -> Option<&str> {
        self.get_attr("id")
    }

    /// Lowercased `type` attribute of a form control, `text` when absent
    pub fn input_type(&self) -> String {
        self.get_attr("type")
            .map(|t| t.trim().to_ascii_lowercase())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "text".to_string())
    }
}

/// Attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}
