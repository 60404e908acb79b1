//! Document - High-level document API

use crate::{
    ClassList, DomError, DomResult, DomTree, ElementData, InlineStyle, NodeId,
    SelectorList,
};

/// HTML Document
#[derive(Debug, Clone)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a new document with an html/head/body skeleton
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();

        let html = tree.append_element(NodeId::ROOT, "html");
        let head = tree.append_element(html, "head");
        let body = tree.append_element(html, "body");

        Self {
            tree,
            url: url.to_string(),
            html_element: html,
            head_element: head,
            body_element: body,
        }
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
        }
    }

    /// Locate html/head/body and seed textarea values after parsing
    pub fn finalize(&mut self) {
        let root = self.tree.root();
        self.html_element = self.first_child_tagged(root, "html").unwrap_or(NodeId::NONE);
        if self.html_element.is_valid() {
            self.head_element = self
                .first_child_tagged(self.html_element, "head")
                .unwrap_or(NodeId::NONE);
            self.body_element = self
                .first_child_tagged(self.html_element, "body")
                .unwrap_or(NodeId::NONE);
        }

        for id in self.tree.descendants(root) {
            let is_textarea = self.tree.element(id).is_some_and(|e| e.tag == "textarea");
            if is_textarea {
                let text = self.tree.text_content(id);
                if let Some(elem) = self.tree.element_mut(id) {
                    elem.value = text;
                }
            }
        }
        tracing::trace!(nodes = self.tree.len(), "document finalized");
    }

    fn first_child_tagged(&self, parent: NodeId, tag: &str) -> Option<NodeId> {
        self.tree
            .children(parent)
            .find(|(_, node)| node.as_element().is_some_and(|e| e.tag == tag))
            .map(|(id, _)| id)
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Text of the first <title> in <head>
    pub fn title(&self) -> String {
        if !self.head_element.is_valid() {
            return String::new();
        }
        self.first_child_tagged(self.head_element, "title")
            .map(|t| self.tree.text_content(t))
            .unwrap_or_default()
    }

    /// Get <html> element
    pub fn document_element(&self) -> Option<NodeId> {
        Some(self.html_element).filter(|id| id.is_valid())
    }

    /// Get <head> element
    pub fn head(&self) -> Option<NodeId> {
        Some(self.head_element).filter(|id| id.is_valid())
    }

    /// Get <body> element
    pub fn body(&self) -> Option<NodeId> {
        Some(self.body_element).filter(|id| id.is_valid())
    }

    /// Get connected element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .into_iter()
            .find(|&n| self.tree.element(n).and_then(ElementData::id) == Some(id))
    }

    /// First element in the document matching `selector`
    pub fn query_selector(&self, selector: &str) -> DomResult<Option<NodeId>> {
        self.query_selector_from(self.tree.root(), selector)
    }

    /// All elements in the document matching `selector`, in document order
    pub fn query_selector_all(&self, selector: &str) -> DomResult<Vec<NodeId>> {
        self.query_selector_all_from(self.tree.root(), selector)
    }

    /// First descendant of `root` matching `selector`
    pub fn query_selector_from(&self, root: NodeId, selector: &str) -> DomResult<Option<NodeId>> {
        let list = SelectorList::parse(selector)?;
        Ok(self
            .tree
            .descendants(root)
            .into_iter()
            .find(|&n| list.matches(&self.tree, n)))
    }

    /// All descendants of `root` matching `selector`
    pub fn query_selector_all_from(&self, root: NodeId, selector: &str) -> DomResult<Vec<NodeId>> {
        let list = SelectorList::parse(selector)?;
        Ok(self
            .tree
            .descendants(root)
            .into_iter()
            .filter(|&n| list.matches(&self.tree, n))
            .collect())
    }

    /// Closest inclusive ancestor matching `selector`
    pub fn closest(&self, node: NodeId, selector: &str) -> DomResult<Option<NodeId>> {
        let list = SelectorList::parse(selector)?;
        Ok(std::iter::once(node)
            .chain(self.tree.ancestors(node))
            .find(|&n| list.matches(&self.tree, n)))
    }

    /// Check whether an element matches `selector`
    pub fn matches(&self, node: NodeId, selector: &str) -> DomResult<bool> {
        Ok(SelectorList::parse(selector)?.matches(&self.tree, node))
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.tree.create_element(tag)
    }

    /// Append a child node
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.tree.append_child(parent, child)
    }

    pub fn element(&self, node: NodeId) -> Option<&ElementData> {
        self.tree.element(node)
    }

    pub fn element_mut(&mut self, node: NodeId) -> Option<&mut ElementData> {
        self.tree.element_mut(node)
    }

    /// Tag name of an element
    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|e| e.tag.as_str())
    }

    pub fn class_list(&self, node: NodeId) -> Option<&ClassList> {
        self.element(node).map(|e| &e.classes)
    }

    pub fn class_list_mut(&mut self, node: NodeId) -> Option<&mut ClassList> {
        self.element_mut(node).map(|e| &mut e.classes)
    }

    pub fn style(&self, node: NodeId) -> Option<&InlineStyle> {
        self.element(node).map(|e| &e.style)
    }

    pub fn style_mut(&mut self, node: NodeId) -> Option<&mut InlineStyle> {
        self.element_mut(node).map(|e| &mut e.style)
    }

    /// Attribute value, including serialized `class` and `style`
    pub fn attr(&self, node: NodeId, name: &str) -> Option<String> {
        self.element(node).and_then(|e| e.attr_value(name))
    }

    /// Live value of a form control
    pub fn value(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|e| e.value.as_str())
    }

    pub fn set_value(&mut self, node: NodeId, value: &str) -> DomResult<()> {
        let elem = self
            .element_mut(node)
            .ok_or(DomError::NotAnElement(node))?;
        elem.value = value.to_string();
        Ok(())
    }

    pub fn text_content(&self, node: NodeId) -> String {
        self.tree.text_content(node)
    }

    /// innerText setter: replace children with one text node
    pub fn set_text_content(&mut self, node: NodeId, text: &str) -> DomResult<()> {
        self.tree.set_text_content(node, text)
    }

    /// Check whether the node is still part of this document
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.tree.is_connected(node)
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fighters() -> (Document, NodeId, NodeId) {
        let mut doc = Document::new("http://localhost/");
        let body = doc.body().unwrap();
        let tim = doc.tree_mut().create_element_with(ElementData::with_attrs(
            "div",
            [("id", "toxic-tim"), ("class", "doggo fighter")],
        ));
        let salmon = doc.tree_mut().create_element_with(ElementData::with_attrs(
            "div",
            [("class", "team salmon")],
        ));
        doc.append_child(body, salmon).unwrap();
        doc.append_child(salmon, tim).unwrap();
        (doc, tim, salmon)
    }

    #[test]
    fn test_skeleton() {
        let doc = Document::new("about:blank");
        assert!(doc.document_element().is_some());
        assert!(doc.head().is_some());
        assert!(doc.body().is_some());
        assert_eq!(doc.title(), "");
    }

    #[test]
    fn test_get_element_by_id() {
        let (doc, tim, _) = fighters();
        assert_eq!(doc.get_element_by_id("toxic-tim"), Some(tim));
        assert_eq!(doc.get_element_by_id("nobody"), None);
    }

    #[test]
    fn test_query_selector_miss_is_none() {
        let (doc, _, _) = fighters();
        assert_eq!(doc.query_selector("p").unwrap(), None);
        assert!(doc.query_selector_all(".doggo.blank").unwrap().is_empty());
        assert!(doc.query_selector("p:first").is_err());
    }

    #[test]
    fn test_closest() {
        let (doc, tim, salmon) = fighters();
        assert_eq!(doc.closest(tim, ".team").unwrap(), Some(salmon));
        assert_eq!(doc.closest(tim, ".fighter").unwrap(), Some(tim));
        assert_eq!(doc.closest(tim, ".roster").unwrap(), None);
    }

    #[test]
    fn test_value_and_text() {
        let (mut doc, tim, _) = fighters();
        doc.set_text_content(tim, "Tim").unwrap();
        assert_eq!(doc.text_content(tim), "Tim");
        doc.set_value(tim, "x").unwrap();
        assert_eq!(doc.value(tim), Some("x"));
        assert_eq!(
            doc.set_value(NodeId::ROOT, "x"),
            Err(DomError::NotAnElement(NodeId::ROOT))
        );
    }
}
