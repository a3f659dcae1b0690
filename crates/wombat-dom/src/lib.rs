//! SVG node tree for the Wombat converter.
//!
//! This crate provides an arena-based element tree following the
//! [SVG 1.1 document structure](https://www.w3.org/TR/SVG11/struct.html).
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues. Unlike a
//! full DOM, text is carried on the element that owns it: the XML front end
//! turns mixed content into anonymous `tspan` elements, so every node is an
//! element.

use std::collections::{BTreeMap, HashMap};

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Map of attribute names to values for an element.
///
/// Namespaced attributes use the `{namespace-uri}local-name` key form.
pub type AttributesMap = HashMap<String, String>;

/// Attribute key of `xlink:href`, the reference attribute of `use`.
///
/// [SVG 1.1 § 5.6](https://www.w3.org/TR/SVG11/struct.html#UseElementHrefAttribute)
pub const XLINK_HREF: &str = "{http://www.w3.org/1999/xlink}href";

/// A type-safe index into the node tree.
///
/// `NodeId` provides O(1) access to any node in the tree without borrowing issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The document element is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// [SVG 1.1 § 5.1](https://www.w3.org/TR/SVG11/struct.html#Introduction)
///
/// "An SVG document fragment consists of any number of SVG elements contained
/// within an 'svg' element."
///
/// Element-specific data: local name, attributes and character data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ElementData {
    /// The element's local name (namespace stripped).
    #[serde(rename = "tag")]
    pub tag_name: String,
    /// The element's attributes, `style` declarations already expanded.
    #[serde(rename = "attributes", serialize_with = "sorted_attributes")]
    pub attrs: AttributesMap,
    /// Character data directly inside the element, before any child element.
    pub text: Option<String>,
}

impl ElementData {
    /// Create element data with the given tag and no attributes.
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attrs: AttributesMap::new(),
            text: None,
        }
    }

    /// Builder-style attribute setter.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.attrs.insert(name.into(), value.into());
        self
    }

    /// Builder-style text setter.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Look up an attribute value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Whether the attribute is present (even if empty).
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    /// Returns the element's id attribute value if present.
    ///
    /// [SVG 1.1 § 5.10.1](https://www.w3.org/TR/SVG11/struct.html#IDAttribute)
    /// "Standard XML attribute for assigning a unique name to an element."
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.get("id")
    }
}

/// Serialize attributes ordered by name.
fn sorted_attributes<S: Serializer>(attrs: &AttributesMap, serializer: S) -> Result<S::Ok, S::Error> {
    attrs.iter().collect::<BTreeMap<_, _>>().serialize(serializer)
}

/// A node in the tree: element data plus structural links.
#[derive(Debug, Clone)]
pub struct Node {
    /// The element carried by this node.
    pub element: ElementData,
    /// Parent node, `None` for the document element.
    pub parent: Option<NodeId>,
    /// Child nodes in document order.
    pub children: Vec<NodeId>,
}

/// Arena-based node tree with O(1) node access and traversal.
///
/// This structure stores all nodes in a contiguous vector, using indices
/// for all relationships. The document element is always at
/// [`NodeId::ROOT`]; it is the only node whose root flag is set.
#[derive(Debug, Clone)]
pub struct DomTree {
    /// All nodes in the tree, indexed by `NodeId`.
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree whose document element is `root`.
    #[must_use]
    pub fn new(root: ElementData) -> Self {
        Self {
            nodes: vec![Node {
                element: root,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Get the document element's ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Whether `id` is the document element.
    #[must_use]
    pub fn is_root(&self, id: NodeId) -> bool {
        id == NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get the element data of a node.
    #[must_use]
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).map(|n| &n.element)
    }

    /// Get the number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds its document element.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, element: ElementData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            element,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Appends `child` as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Allocate `element` and append it to `parent` in one step.
    pub fn append_element(&mut self, parent: NodeId, element: ElementData) -> NodeId {
        let id = self.alloc(element);
        self.append_child(parent, id);
        id
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Iterate over a subtree in document order, starting with `id` itself.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            stack: vec![id],
        }
    }

    /// A serializable view of the subtree rooted at `id`, children nested.
    #[must_use]
    pub const fn subtree(&self, id: NodeId) -> Subtree<'_> {
        Subtree { tree: self, id }
    }

    /// Find the first element in document order with the given `id` attribute.
    #[must_use]
    pub fn find_by_id(&self, element_id: &str) -> Option<NodeId> {
        self.descendants(NodeId::ROOT)
            .find(|&id| self.element(id).and_then(ElementData::id) == Some(element_id))
    }
}

/// A subtree serialized as `{tag, attributes, text, children}` objects.
#[derive(Debug, Clone, Copy)]
pub struct Subtree<'a> {
    tree: &'a DomTree,
    id: NodeId,
}

impl Serialize for Subtree<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let Some(element) = self.tree.element(self.id) else {
            return serializer.serialize_none();
        };
        let children: Vec<Subtree<'_>> = self
            .tree
            .children(self.id)
            .iter()
            .map(|&child| self.tree.subtree(child))
            .collect();

        let mut state = serializer.serialize_struct("Subtree", 4)?;
        state.serialize_field("tag", &element.tag_name)?;
        state.serialize_field("attributes", &element.attrs.iter().collect::<BTreeMap<_, _>>())?;
        state.serialize_field("text", &element.text)?;
        state.serialize_field("children", &children)?;
        state.end()
    }
}

/// Pre-order iterator over a subtree.
pub struct Descendants<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
