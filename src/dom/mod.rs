//! HTML parse tree.
//!
//! html5ever parses into an [`ArenaDom`] through a tree sink;
//! [`serialize_nodes`] turns any run of nodes back into markup.
//!
//! ```
//! use bookprint::dom::{parse_document, serialize_children};
//!
//! let dom = parse_document("<h1>Intro <em>here</em></h1>");
//! let h1 = dom.find_element("h1").unwrap();
//! assert_eq!(dom.heading_level(h1), Some(1));
//! assert_eq!(serialize_children(&dom, h1).unwrap(), "Intro <em>here</em>");
//! ```

mod arena;
mod serialize;
mod tree_sink;

pub use arena::{ArenaDom, Attribute, Descendants, Node, NodeData, NodeId, Siblings, heading_level};
pub use serialize::{SerializableNode, serialize_children, serialize_nodes};

use html5ever::driver::ParseOpts;
use html5ever::parse_document as html5ever_parse_document;
use html5ever::tendril::TendrilSink;

use tree_sink::ArenaSink;

/// Parse a complete HTML document. Missing `html`, `head` and `body`
/// elements are synthesized the way browsers do.
pub fn parse_document(html: &str) -> ArenaDom {
    let sink = ArenaSink::new();
    html5ever_parse_document(sink, ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes())
        .into_dom()
}
