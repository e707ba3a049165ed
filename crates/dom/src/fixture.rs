//! In-memory page fixture implementing [`StyleDom`].
//!
//! Stands in for a rendered page in tests and the demo driver. Each element
//! carries two style layers: the *declared* layer plays the role of the
//! stylesheet cascade result, the *inline* layer holds overrides written
//! through [`StyleDom`]. A computed-style query reports the inline value
//! when present, else the declared one — the cascade behavior the
//! override-clearing invariant of the synchronizer depends on.

use crate::StyleDom;
use gutter_values::Viewport;
use indextree::{Arena, NodeId};
use smallvec::SmallVec;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub enum FixtureNodeKind {
    #[default]
    Document,
    Element {
        tag: String,
    },
}

/// One node of the fixture tree.
#[derive(Debug, Clone, Default)]
pub struct FixtureNode {
    pub kind: FixtureNodeKind,
    pub attrs: SmallVec<(String, String), 4>,
    declared: HashMap<String, String>,
    inline: HashMap<String, String>,
}

/// An in-memory two-layer-styled element tree with an id index.
#[derive(Debug)]
pub struct PageFixture {
    arena: Arena<FixtureNode>,
    root: NodeId,
    ids: HashMap<String, NodeId>,
    viewport: Viewport,
}

impl Default for PageFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl PageFixture {
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(FixtureNode::default());
        Self {
            arena,
            root,
            ids: HashMap::new(),
            viewport: Viewport {
                width_px: 1280,
                height_px: 720,
            },
        }
    }

    /// Insert an element under `parent` (the document root when `None`).
    /// Returns `false` when the id is already taken or the parent is absent.
    pub fn insert_element(&mut self, parent: Option<&str>, tag: &str, id: &str) -> bool {
        if self.ids.contains_key(id) {
            return false;
        }
        let parent_node = match parent {
            Some(parent_id) => match self.ids.get(parent_id) {
                Some(node) => *node,
                None => return false,
            },
            None => self.root,
        };
        let mut attrs = SmallVec::new();
        attrs.push((String::from("id"), id.to_owned()));
        let node = self.arena.new_node(FixtureNode {
            kind: FixtureNodeKind::Element {
                tag: tag.to_owned(),
            },
            attrs,
            declared: HashMap::new(),
            inline: HashMap::new(),
        });
        parent_node.append(node, &mut self.arena);
        self.ids.insert(id.to_owned(), node);
        true
    }

    /// Remove an element and its subtree, releasing every indexed id below it.
    pub fn remove_element(&mut self, id: &str) -> bool {
        let Some(node) = self.ids.get(id).copied() else {
            return false;
        };
        let removed: Vec<NodeId> = node.descendants(&self.arena).collect();
        self.ids.retain(|_, indexed| !removed.contains(indexed));
        node.remove_subtree(&mut self.arena);
        true
    }

    /// Set a property in the declared (cascade-result) layer.
    pub fn set_declared_style(&mut self, id: &str, property: &str, value: &str) -> bool {
        match self.node_mut(id) {
            Some(data) => {
                data.declared.insert(property.to_owned(), value.to_owned());
                true
            }
            None => false,
        }
    }

    pub fn remove_declared_style(&mut self, id: &str, property: &str) -> bool {
        match self.node_mut(id) {
            Some(data) => {
                data.declared.remove(property);
                true
            }
            None => false,
        }
    }

    /// The inline override currently applied, if any. Inspection surface for
    /// tests; the synchronizer itself goes through [`StyleDom`].
    pub fn inline_style(&self, id: &str, property: &str) -> Option<String> {
        self.node(id)
            .and_then(|data| data.inline.get(property).cloned())
    }

    pub fn set_viewport(&mut self, width_px: u32, height_px: u32) {
        self.viewport = Viewport {
            width_px,
            height_px,
        };
    }

    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn node(&self, id: &str) -> Option<&FixtureNode> {
        let node = self.ids.get(id)?;
        self.arena.get(*node).map(indextree::Node::get)
    }

    fn node_mut(&mut self, id: &str) -> Option<&mut FixtureNode> {
        let node = self.ids.get(id)?;
        self.arena.get_mut(*node).map(indextree::Node::get_mut)
    }
}

impl StyleDom for PageFixture {
    fn contains(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    fn computed_style(&self, id: &str, property: &str) -> Option<String> {
        let data = self.node(id)?;
        data.inline
            .get(property)
            .or_else(|| data.declared.get(property))
            .cloned()
    }

    fn set_inline_style(&mut self, id: &str, property: &str, value: &str) -> bool {
        match self.node_mut(id) {
            Some(data) => {
                data.inline.insert(property.to_owned(), value.to_owned());
                true
            }
            None => false,
        }
    }

    fn remove_inline_style(&mut self, id: &str, property: &str) -> bool {
        match self.node_mut(id) {
            Some(data) => {
                data.inline.remove(property);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_pane_page() -> PageFixture {
        let mut page = PageFixture::new();
        assert!(page.insert_element(None, "nav", "sidebar"));
        assert!(page.insert_element(None, "div", "main"));
        page
    }

    #[test]
    fn inline_layer_wins_over_declared() {
        let mut page = two_pane_page();
        page.set_declared_style("main", "min-width", "600px");
        assert_eq!(
            page.computed_style("main", "min-width"),
            Some(String::from("600px"))
        );

        page.set_inline_style("main", "min-width", "calc(600px - 240px - 0px)");
        assert_eq!(
            page.computed_style("main", "min-width"),
            Some(String::from("calc(600px - 240px - 0px)"))
        );

        page.remove_inline_style("main", "min-width");
        assert_eq!(
            page.computed_style("main", "min-width"),
            Some(String::from("600px"))
        );
    }

    #[test]
    fn absent_elements_answer_nothing() {
        let mut page = two_pane_page();
        assert!(!page.contains("footer"));
        assert_eq!(page.computed_style("footer", "width"), None);
        assert!(!page.set_inline_style("footer", "width", "1px"));
        assert!(!page.remove_inline_style("footer", "width"));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut page = two_pane_page();
        assert!(!page.insert_element(None, "aside", "sidebar"));
    }

    #[test]
    fn removal_releases_the_whole_subtree() {
        let mut page = two_pane_page();
        assert!(page.insert_element(Some("sidebar"), "ul", "toc"));
        assert!(page.remove_element("sidebar"));
        assert!(!page.contains("sidebar"));
        assert!(!page.contains("toc"));
        assert!(page.contains("main"));
        // The released ids may be reused.
        assert!(page.insert_element(None, "nav", "sidebar"));
    }

    #[test]
    fn viewport_updates_are_observable() {
        let mut page = two_pane_page();
        page.set_viewport(800, 600);
        assert_eq!(page.viewport().width_px, 800);
        assert_eq!(page.viewport().height_px, 600);
    }
}
