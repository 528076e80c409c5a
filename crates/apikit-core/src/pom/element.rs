//! Mutable configuration tree
//!
//! A single owned node type used for the whole POM document and for plugin
//! configuration blocks. Edits go through `&mut Element` borrows; there is no
//! separate builder wrapper.

use tracing::debug;

/// A child node of an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Nested element
    Element(Element),
    /// XML comment, kept so rewritten files preserve them
    Comment(String),
}

impl Node {
    /// Borrow as an element, if this node is one
    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Comment(_) => None,
        }
    }

    /// Mutably borrow as an element, if this node is one
    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Comment(_) => None,
        }
    }

    fn is_element_named(&self, name: &str) -> bool {
        self.as_element().is_some_and(|e| e.name == name)
    }
}

/// A named element with optional text, attributes and ordered children
///
/// Sibling names are not unique; every lookup by name returns the first match.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    cdata: bool,
    children: Vec<Node>,
}

impl Element {
    /// Create an empty element
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Create an element holding text
    #[must_use]
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        let mut element = Self::new(name);
        element.set_text(text);
        element
    }

    /// Add a child and return self (builder style)
    #[must_use]
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Element name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Text content, if any
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Whether the text is written as a CDATA block
    #[must_use]
    pub fn is_cdata(&self) -> bool {
        self.cdata
    }

    /// Replace the text content
    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = Some(text.into());
        self.cdata = false;
        self
    }

    /// Replace the text content with a literal CDATA block
    pub fn set_cdata(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = Some(text.into());
        self.cdata = true;
        self
    }

    /// Append text, used while parsing split text events
    pub(crate) fn push_text(&mut self, text: &str, cdata: bool) {
        let blank = |t: &str| t.trim().is_empty();
        if self.cdata && blank(text) {
            return;
        }
        match &mut self.text {
            Some(existing) if cdata && !self.cdata && blank(existing.as_str()) => {
                *existing = text.to_string();
            }
            Some(existing) => existing.push_str(text),
            None => self.text = Some(text.to_string()),
        }
        self.cdata |= cdata;
    }

    /// Forget text that is only layout whitespace
    pub(crate) fn drop_blank_text(&mut self) {
        if !self.cdata && self.text.as_deref().is_some_and(|t| t.trim().is_empty()) {
            self.text = None;
        }
    }

    /// Attribute pairs in document order
    #[must_use]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Look up an attribute value
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set or replace an attribute
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.attributes.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.attributes.push((key, value));
        }
    }

    /// All child nodes, comments included
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.children
    }

    /// Child elements in order
    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Mutable child elements in order
    pub fn children_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(Node::as_element_mut)
    }

    /// Child elements with the given name
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children().filter(move |c| c.name == name)
    }

    /// First child with the given name
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children().find(|c| c.name == name)
    }

    /// First child with the given name, mutably
    pub fn child_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.children_mut().find(|c| c.name == name)
    }

    /// Text of the first child with the given name
    #[must_use]
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).and_then(Element::text)
    }

    /// Whether a child with the given name exists
    #[must_use]
    pub fn has_child(&self, name: &str) -> bool {
        self.child(name).is_some()
    }

    /// Whether the element has neither text nor child nodes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.children.is_empty()
    }

    /// Append a comment node
    pub fn push_comment(&mut self, comment: impl Into<String>) {
        self.children.push(Node::Comment(comment.into()));
    }

    /// Append a child element and return it
    pub fn append_child(&mut self, child: Element) -> &mut Element {
        self.children.push(Node::Element(child));
        let index = self.children.len() - 1;
        self.element_at_mut(index)
    }

    /// Append a new empty child element and return it
    pub fn create_child(&mut self, name: &str) -> &mut Element {
        debug!(parent = %self.name, child = name, "creating element");
        self.append_child(Element::new(name))
    }

    /// Find the first child named `name`, or append a new one
    ///
    /// An existing child keeps its text and descendants.
    pub fn get_or_create_child(&mut self, name: &str) -> &mut Element {
        match self.children.iter().position(|n| n.is_element_named(name)) {
            Some(index) => self.element_at_mut(index),
            None => self.create_child(name),
        }
    }

    /// Upsert a child and overwrite its text
    ///
    /// No escaping is applied here; serialization escapes plain text and
    /// callers that need a literal block use [`Element::set_cdata`].
    pub fn get_or_create_child_with_content(
        &mut self,
        name: &str,
        content: impl Into<String>,
    ) -> &mut Element {
        let child = self.get_or_create_child(name);
        child.set_text(content);
        child
    }

    /// Upsert a child only when a value is present
    ///
    /// `None` leaves the tree untouched: an existing child keeps its text and
    /// no child is created.
    pub fn get_or_create_child_if_some<T: ToString>(
        &mut self,
        name: &str,
        content: Option<T>,
    ) -> Option<&mut Element> {
        let content = content?;
        Some(self.get_or_create_child_with_content(name, content.to_string()))
    }

    /// Remove the first child element matching the predicate
    pub fn remove_child_where<F>(&mut self, mut predicate: F) -> Option<Element>
    where
        F: FnMut(&Element) -> bool,
    {
        let index = self
            .children
            .iter()
            .position(|n| n.as_element().is_some_and(&mut predicate))?;
        match self.children.remove(index) {
            Node::Element(element) => Some(element),
            Node::Comment(_) => None,
        }
    }

    fn element_at_mut(&mut self, index: usize) -> &mut Element {
        match &mut self.children[index] {
            Node::Element(element) => element,
            Node::Comment(_) => unreachable!("index {index} must point at an element node"),
        }
    }
}
