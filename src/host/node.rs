//! Renderable node tree.
//!
//! Components produce an owned `Node` that the router hands to a mount
//! surface. The tree is deliberately small: an element has a tag, an
//! optional id, classes and children; text is a leaf.

use std::fmt;

/// Kind of a node in the rendered tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Element with a tag name (e.g. "div", "main").
    Element(String),
    /// Text leaf.
    Text(String),
}

/// A node produced by a component render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub children: Vec<Node>,
}

impl Node {
    /// Create an empty element node.
    pub fn element(tag: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Element(tag.into()),
            id: None,
            classes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create a text node.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Text(content.into()),
            id: None,
            classes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Transient loading indicator inserted while components resolve.
    pub fn spinner() -> Self {
        Self::element("div").with_class("spinner")
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn append_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Tag name for elements, `None` for text.
    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element(tag) => Some(tag),
            NodeKind::Text(_) => None,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Depth-first search for a node carrying `id`.
    pub fn find_by_id(&self, id: &str) -> Option<&Node> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_id(id))
    }

    /// Concatenated text of this subtree.
    pub fn text_content(&self) -> String {
        match &self.kind {
            NodeKind::Text(t) => t.clone(),
            NodeKind::Element(_) => self.children.iter().map(Node::text_content).collect(),
        }
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let pad = "  ".repeat(depth);
        match &self.kind {
            NodeKind::Text(t) => writeln!(f, "{}\"{}\"", pad, t),
            NodeKind::Element(tag) => {
                write!(f, "{}<{}", pad, tag)?;
                if let Some(id) = &self.id {
                    write!(f, " id=\"{}\"", id)?;
                }
                if !self.classes.is_empty() {
                    write!(f, " class=\"{}\"", self.classes.join(" "))?;
                }
                writeln!(f, ">")?;
                for child in &self.children {
                    child.write_indented(f, depth + 1)?;
                }
                writeln!(f, "{}</{}>", pad, tag)
            }
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}
