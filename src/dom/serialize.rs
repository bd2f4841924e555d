//! Markup serialization through html5ever's serializer.

use std::io;

use html5ever::serialize::{Serialize, SerializeOpts, Serializer, TraversalScope, serialize};

use super::arena::{ArenaDom, NodeData, NodeId};
use crate::error::{Error, Result};

/// A node paired with the DOM that owns it, so html5ever can walk it.
pub struct SerializableNode<'a> {
    dom: &'a ArenaDom,
    id: NodeId,
}

impl<'a> SerializableNode<'a> {
    pub fn new(dom: &'a ArenaDom, id: NodeId) -> Self {
        Self { dom, id }
    }

    fn serialize_children<S: Serializer>(&self, serializer: &mut S) -> io::Result<()> {
        for child in self.dom.children(self.id) {
            SerializableNode::new(self.dom, child)
                .serialize(serializer, TraversalScope::IncludeNode)?;
        }
        Ok(())
    }
}

impl Serialize for SerializableNode<'_> {
    fn serialize<S>(&self, serializer: &mut S, traversal_scope: TraversalScope) -> io::Result<()>
    where
        S: Serializer,
    {
        let Some(node) = self.dom.get(self.id) else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("node {} is not part of this document", self.id.0),
            ));
        };

        if let TraversalScope::ChildrenOnly(_) = traversal_scope {
            return self.serialize_children(serializer);
        }

        match &node.data {
            NodeData::Document => self.serialize_children(serializer),
            NodeData::Element { name, attrs } => {
                serializer.start_elem(
                    name.clone(),
                    attrs.iter().map(|a| (&a.name, a.value.as_str())),
                )?;
                self.serialize_children(serializer)?;
                serializer.end_elem(name.clone())
            }
            NodeData::Text(text) => serializer.write_text(text),
            NodeData::Comment(text) => serializer.write_comment(text),
            NodeData::Doctype { name, .. } => serializer.write_doctype(name),
        }
    }
}

/// Serialize `nodes` (each including its own tag) back-to-back into markup.
pub fn serialize_nodes(dom: &ArenaDom, nodes: &[NodeId]) -> Result<String> {
    let mut buf = Vec::new();

    for &id in nodes {
        let opts = SerializeOpts {
            traversal_scope: TraversalScope::IncludeNode,
            ..Default::default()
        };
        serialize(&mut buf, &SerializableNode::new(dom, id), opts).map_err(Error::Serialization)?;
    }

    String::from_utf8(buf)
        .map_err(|e| Error::Serialization(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Serialize the children of `parent`, without `parent`'s own tag.
pub fn serialize_children(dom: &ArenaDom, parent: NodeId) -> Result<String> {
    let children: Vec<_> = dom.children(parent).collect();
    serialize_nodes(dom, &children)
}
