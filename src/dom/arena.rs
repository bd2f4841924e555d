//! Arena-based DOM that html5ever parses into.
//!
//! Nodes live in a single vector and link to each other by index, so a
//! tree can be walked in document order, queried for headings and anchors,
//! and have attributes rewritten in place without reference counting.

use html5ever::{LocalName, QualName, ns};

/// Unique identifier for a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value for no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_some(&self) -> bool {
        self.0 != u32::MAX
    }

    pub fn is_none(&self) -> bool {
        self.0 == u32::MAX
    }
}

/// Node payload.
#[derive(Debug, Clone)]
pub enum NodeData {
    Document,
    Element {
        name: QualName,
        attrs: Vec<Attribute>,
    },
    Text(String),
    Comment(String),
    Doctype {
        name: String,
        public_id: String,
        system_id: String,
    },
}

/// HTML attribute.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: QualName,
    pub value: String,
}

/// A node in the arena DOM.
#[derive(Debug)]
pub struct Node {
    pub data: NodeData,
    pub parent: NodeId,
    pub first_child: NodeId,
    pub last_child: NodeId,
    pub prev_sibling: NodeId,
    pub next_sibling: NodeId,
}

impl Node {
    fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
        }
    }
}

/// Map a tag name to its heading level (`h1` → 1 ... `h6` → 6).
pub fn heading_level(tag: &str) -> Option<u8> {
    match tag {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

/// Arena-based DOM tree.
pub struct ArenaDom {
    nodes: Vec<Node>,
    document: NodeId,
}

impl ArenaDom {
    /// Create a new empty DOM with a document root.
    pub fn new() -> Self {
        let mut dom = Self {
            nodes: Vec::new(),
            document: NodeId::NONE,
        };
        dom.document = dom.alloc(Node::new(NodeData::Document));
        dom
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn document(&self) -> NodeId {
        self.document
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if id.is_none() {
            return None;
        }
        self.nodes.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if id.is_none() {
            return None;
        }
        self.nodes.get_mut(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the DOM holds nothing but its document root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    // ------------------------------------------------------------------
    // Construction (used by the tree sink and by tests)
    // ------------------------------------------------------------------

    pub fn create_element(&mut self, name: QualName, attrs: Vec<Attribute>) -> NodeId {
        self.alloc(Node::new(NodeData::Element { name, attrs }))
    }

    /// Create an HTML-namespace element from a bare tag name.
    pub fn create_html_element(&mut self, tag: &str) -> NodeId {
        let name = QualName::new(None, ns!(html), LocalName::from(tag));
        self.create_element(name, Vec::new())
    }

    pub fn create_text(&mut self, text: String) -> NodeId {
        self.alloc(Node::new(NodeData::Text(text)))
    }

    pub fn create_comment(&mut self, text: String) -> NodeId {
        self.alloc(Node::new(NodeData::Comment(text)))
    }

    pub fn create_doctype(&mut self, name: String, public_id: String, system_id: String) -> NodeId {
        self.alloc(Node::new(NodeData::Doctype {
            name,
            public_id,
            system_id,
        }))
    }

    /// Append `child` as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        let last_child = self
            .get(parent)
            .map(|n| n.last_child)
            .unwrap_or(NodeId::NONE);

        if let Some(child_node) = self.get_mut(child) {
            child_node.parent = parent;
            child_node.prev_sibling = last_child;
            child_node.next_sibling = NodeId::NONE;
        }

        if let Some(last_node) = self.get_mut(last_child) {
            last_node.next_sibling = child;
        }

        if let Some(parent_node) = self.get_mut(parent) {
            if parent_node.first_child.is_none() {
                parent_node.first_child = child;
            }
            parent_node.last_child = child;
        }
    }

    /// Insert `new_node` immediately before `sibling`.
    pub fn insert_before(&mut self, sibling: NodeId, new_node: NodeId) {
        let (parent, prev) = match self.get(sibling) {
            Some(n) => (n.parent, n.prev_sibling),
            None => return,
        };

        if let Some(new) = self.get_mut(new_node) {
            new.parent = parent;
            new.prev_sibling = prev;
            new.next_sibling = sibling;
        }

        if let Some(sib) = self.get_mut(sibling) {
            sib.prev_sibling = new_node;
        }

        if prev.is_some() {
            if let Some(p) = self.get_mut(prev) {
                p.next_sibling = new_node;
            }
        } else if let Some(par) = self.get_mut(parent) {
            par.first_child = new_node;
        }
    }

    /// Append text, merging into the last child when it is already a text node.
    pub fn append_text(&mut self, parent: NodeId, text: &str) {
        let last_child = self
            .get(parent)
            .map(|n| n.last_child)
            .unwrap_or(NodeId::NONE);

        if let Some(last) = self.get_mut(last_child)
            && let NodeData::Text(existing) = &mut last.data
        {
            existing.push_str(text);
            return;
        }

        let text_node = self.create_text(text.to_string());
        self.append(parent, text_node);
    }

    /// Unlink a node from its parent and siblings. The node stays in the arena.
    pub fn detach(&mut self, id: NodeId) {
        let (parent, prev, next) = match self.get(id) {
            Some(n) => (n.parent, n.prev_sibling, n.next_sibling),
            None => return,
        };

        if prev.is_some() {
            if let Some(p) = self.get_mut(prev) {
                p.next_sibling = next;
            }
        } else if let Some(p) = self.get_mut(parent) {
            p.first_child = next;
        }

        if next.is_some() {
            if let Some(n) = self.get_mut(next) {
                n.prev_sibling = prev;
            }
        } else if let Some(p) = self.get_mut(parent) {
            p.last_child = prev;
        }

        if let Some(node) = self.get_mut(id) {
            node.parent = NodeId::NONE;
            node.prev_sibling = NodeId::NONE;
            node.next_sibling = NodeId::NONE;
        }
    }

    // ------------------------------------------------------------------
    // Traversal
    // ------------------------------------------------------------------

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.parent).filter(NodeId::is_some)
    }

    /// Collect the nodes of `node`'s subtree that come before the first
    /// heading, in document order.
    ///
    /// A node without a heading below it is taken whole; a node that holds
    /// one is entered so that only the part before the heading is taken.
    /// Returns true once a heading was reached.
    pub fn collect_until_heading(&self, node: NodeId, out: &mut Vec<NodeId>) -> bool {
        if self.is_heading(node) {
            return true;
        }
        if !self.contains_heading(node) {
            out.push(node);
            return false;
        }
        for child in self.children(node) {
            if self.collect_until_heading(child, out) {
                return true;
            }
        }
        false
    }

    /// Iterate over the children of a node in document order.
    pub fn children(&self, parent: NodeId) -> Siblings<'_> {
        let first = self
            .get(parent)
            .map(|n| n.first_child)
            .unwrap_or(NodeId::NONE);
        Siblings {
            dom: self,
            current: first,
        }
    }

    /// Iterate over the siblings that follow `node`, excluding `node` itself.
    pub fn following_siblings(&self, node: NodeId) -> Siblings<'_> {
        let first = self
            .get(node)
            .map(|n| n.next_sibling)
            .unwrap_or(NodeId::NONE);
        Siblings {
            dom: self,
            current: first,
        }
    }

    /// Pre-order walk of the subtree below `root` (not including `root`).
    pub fn descendants(&self, root: NodeId) -> Descendants<'_> {
        let first = self
            .get(root)
            .map(|n| n.first_child)
            .unwrap_or(NodeId::NONE);
        Descendants {
            dom: self,
            root,
            next: first,
        }
    }

    /// First element with the given tag in document order.
    pub fn find_element(&self, tag: &str) -> Option<NodeId> {
        self.descendants(self.document)
            .find(|&id| self.is_element_named(id, tag))
    }

    /// All elements with the given tag below `root`, in document order.
    pub fn elements_by_tag(&self, root: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(root)
            .filter(|&id| self.is_element_named(id, tag))
            .collect()
    }

    /// The document's `head` element.
    pub fn head(&self) -> Option<NodeId> {
        self.find_element("head")
    }

    /// The document's `body` element.
    pub fn body(&self) -> Option<NodeId> {
        self.find_element("body")
    }

    // ------------------------------------------------------------------
    // Node inspection
    // ------------------------------------------------------------------

    pub fn element_name(&self, id: NodeId) -> Option<&LocalName> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element { name, .. } => Some(&name.local),
            _ => None,
        })
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.get(id)
            .is_some_and(|n| matches!(n.data, NodeData::Element { .. }))
    }

    pub fn is_element_named(&self, id: NodeId, tag: &str) -> bool {
        self.element_name(id).is_some_and(|name| name.as_ref() == tag)
    }

    pub fn is_text(&self, id: NodeId) -> bool {
        self.get(id)
            .is_some_and(|n| matches!(n.data, NodeData::Text(_)))
    }

    /// Text of a text node. `None` for every other node kind.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Concatenated text of every text node below `id`, untouched.
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(text) = self.text(id) {
            return text.to_string();
        }
        self.descendants(id)
            .filter_map(|d| self.text(d))
            .collect()
    }

    pub fn is_heading(&self, id: NodeId) -> bool {
        self.element_name(id)
            .is_some_and(|name| heading_level(name).is_some())
    }

    /// Heading level of an element, if its tag is `h1`..`h6`.
    pub fn heading_level(&self, id: NodeId) -> Option<u8> {
        self.element_name(id).and_then(|name| heading_level(name))
    }

    /// True if `id` is a heading or has a heading anywhere below it.
    pub fn contains_heading(&self, id: NodeId) -> bool {
        self.is_heading(id) || self.descendants(id).any(|d| self.is_heading(d))
    }

    pub fn attr(&self, id: NodeId, attr_name: &str) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element { attrs, .. } => attrs
                .iter()
                .find(|a| a.name.local.as_ref() == attr_name)
                .map(|a| a.value.as_str()),
            _ => None,
        })
    }

    /// Overwrite an existing attribute value. Returns false if the node is
    /// not an element or has no such attribute.
    pub fn set_attr(&mut self, id: NodeId, attr_name: &str, value: &str) -> bool {
        let Some(NodeData::Element { attrs, .. }) = self.get_mut(id).map(|n| &mut n.data) else {
            return false;
        };
        match attrs.iter_mut().find(|a| a.name.local.as_ref() == attr_name) {
            Some(attr) => {
                attr.value = value.to_string();
                true
            }
            None => false,
        }
    }
}

impl Default for ArenaDom {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a run of siblings.
pub struct Siblings<'a> {
    dom: &'a ArenaDom,
    current: NodeId,
}

impl Iterator for Siblings<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_none() {
            return None;
        }
        let id = self.current;
        self.current = self
            .dom
            .get(id)
            .map(|n| n.next_sibling)
            .unwrap_or(NodeId::NONE);
        Some(id)
    }
}

/// Pre-order iterator over a subtree.
pub struct Descendants<'a> {
    dom: &'a ArenaDom,
    root: NodeId,
    next: NodeId,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next;
        let node = self.dom.get(current)?;

        self.next = if node.first_child.is_some() {
            node.first_child
        } else {
            // Climb until a node with a next sibling, stopping at the root.
            let mut cursor = current;
            loop {
                if cursor == self.root {
                    break NodeId::NONE;
                }
                let Some(n) = self.dom.get(cursor) else {
                    break NodeId::NONE;
                };
                if n.next_sibling.is_some() {
                    break n.next_sibling;
                }
                cursor = n.parent;
            }
        };

        Some(current)
    }
}
