use crate::foundation::error::{SoleilError, SoleilResult};
use crate::host::Document;
use crate::parallax::config::ParallaxConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

#[derive(Clone, Debug)]
struct Node {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    transform: Option<String>,
    scroll_top: f64,
}

/// Arena-backed document for headless runs and tests.
///
/// Nodes are never freed; [`MemoryDocument::detach`] only unlinks a subtree from its parent,
/// after which it no longer matches selectors and reports no scroll offset.
#[derive(Clone, Debug)]
pub struct MemoryDocument {
    nodes: Vec<Node>,
    root: NodeId,
    viewport_h: Option<f64>,
    style_writes: u64,
}

impl MemoryDocument {
    pub fn new(viewport_h: f64) -> Self {
        let root = Node {
            tag: "body".to_string(),
            id: None,
            classes: Vec::new(),
            parent: None,
            children: Vec::new(),
            transform: None,
            scroll_top: 0.0,
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
            viewport_h: Some(viewport_h),
            style_writes: 0,
        }
    }

    /// Builds `body > <scroll container> > <one element per layer>` for `config`.
    pub fn scaffold(config: &ParallaxConfig, viewport_h: f64) -> SoleilResult<Self> {
        config.validate()?;
        let mut doc = Self::new(viewport_h);
        let container = doc.append_from_selector(doc.root, &config.scroll_container)?;
        for layer in &config.layers {
            let el = doc.append_from_selector(container, &layer.selector)?;
            doc.nodes[el.0].classes.push("parallax-layer".to_string());
        }
        Ok(doc)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Appends a new element under `parent`.
    pub fn append_element(
        &mut self,
        parent: NodeId,
        tag: &str,
        id: Option<&str>,
        classes: &[&str],
    ) -> SoleilResult<NodeId> {
        self.node(parent)?;
        let node = NodeId(self.nodes.len());
        self.nodes.push(Node {
            tag: tag.to_ascii_lowercase(),
            id: id.map(str::to_string),
            classes: classes.iter().map(|c| (*c).to_string()).collect(),
            parent: Some(parent),
            children: Vec::new(),
            transform: None,
            scroll_top: 0.0,
        });
        self.nodes[parent.0].children.push(node);
        Ok(node)
    }

    /// Appends an element that matches `selector` (`div` is used when it names no tag).
    pub fn append_from_selector(&mut self, parent: NodeId, selector: &str) -> SoleilResult<NodeId> {
        let sel = SimpleSelector::parse(selector).ok_or_else(|| {
            SoleilError::host(format!("unsupported selector '{selector}'"))
        })?;
        let classes: Vec<&str> = sel.classes.iter().map(String::as_str).collect();
        self.append_element(
            parent,
            sel.tag.as_deref().unwrap_or("div"),
            sel.id.as_deref(),
            &classes,
        )
    }

    pub fn set_scroll_top(&mut self, node: NodeId, scroll_top: f64) -> SoleilResult<()> {
        self.node_mut(node)?.scroll_top = scroll_top;
        Ok(())
    }

    pub fn set_viewport_height(&mut self, viewport_h: Option<f64>) {
        self.viewport_h = viewport_h;
    }

    /// Unlinks `node` (and its subtree) from its parent.
    pub fn detach(&mut self, node: NodeId) -> SoleilResult<()> {
        let parent = self.node(node)?.parent;
        if let Some(parent) = parent {
            self.nodes[parent.0].children.retain(|c| *c != node);
        }
        self.nodes[node.0].parent = None;
        Ok(())
    }

    pub fn is_attached(&self, node: NodeId) -> bool {
        let mut cur = node;
        loop {
            if cur == self.root {
                return true;
            }
            match self.nodes.get(cur.0).and_then(|n| n.parent) {
                Some(p) => cur = p,
                None => return false,
            }
        }
    }

    pub fn transform(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node.0)?.transform.as_deref()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0)?.parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node.0)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(node)?);
        let idx = siblings.iter().position(|c| *c == node)?;
        siblings.get(idx + 1).copied()
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes
            .get(node.0)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    /// All attached elements matching `selector`, in document order.
    pub fn query_selector_all(&self, selector: &str) -> Vec<NodeId> {
        let Some(sel) = SimpleSelector::parse(selector) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(cur) = stack.pop() {
            if cur != self.root && sel.matches(&self.nodes[cur.0]) {
                out.push(cur);
            }
            stack.extend(self.nodes[cur.0].children.iter().rev().copied());
        }
        out
    }

    /// Number of `transform` writes performed so far.
    pub fn style_writes(&self) -> u64 {
        self.style_writes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn node(&self, node: NodeId) -> SoleilResult<&Node> {
        self.nodes
            .get(node.0)
            .ok_or_else(|| SoleilError::host(format!("unknown node {node:?}")))
    }

    fn node_mut(&mut self, node: NodeId) -> SoleilResult<&mut Node> {
        self.nodes
            .get_mut(node.0)
            .ok_or_else(|| SoleilError::host(format!("unknown node {node:?}")))
    }

    fn copy_subtree(&mut self, src: NodeId, parent: Option<NodeId>) -> NodeId {
        let mut copy = self.nodes[src.0].clone();
        copy.parent = parent;
        copy.children = Vec::new();
        let dst = NodeId(self.nodes.len());
        self.nodes.push(copy);

        let children = self.nodes[src.0].children.clone();
        for child in children {
            let c = self.copy_subtree(child, Some(dst));
            self.nodes[dst.0].children.push(c);
        }
        dst
    }
}

impl Document for MemoryDocument {
    type Element = NodeId;

    fn query_selector(&self, selector: &str) -> Option<NodeId> {
        self.query_selector_all(selector).into_iter().next()
    }

    fn clone_after(&mut self, element: &NodeId) -> SoleilResult<NodeId> {
        let parent = self.node(*element)?.parent.ok_or_else(|| {
            SoleilError::host(format!("cannot clone {element:?}: element has no parent"))
        })?;
        let copy = self.copy_subtree(*element, Some(parent));
        let siblings = &mut self.nodes[parent.0].children;
        let idx = siblings
            .iter()
            .position(|c| c == element)
            .map_or(siblings.len(), |i| i + 1);
        siblings.insert(idx, copy);
        Ok(copy)
    }

    fn set_transform(&mut self, element: &NodeId, css: &str) -> SoleilResult<()> {
        let slot = self.node_mut(*element)?.transform.get_or_insert_with(String::new);
        slot.clear();
        slot.push_str(css);
        self.style_writes += 1;
        Ok(())
    }

    fn scroll_top(&self, element: &NodeId) -> Option<f64> {
        if !self.is_attached(*element) {
            return None;
        }
        Some(self.nodes.get(element.0)?.scroll_top)
    }

    fn viewport_height(&self) -> Option<f64> {
        self.viewport_h
    }
}

/// `tag`, `#id`, `.class` and compounds of them such as `div.layer.background`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct SimpleSelector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl SimpleSelector {
    fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() || s.contains(char::is_whitespace) {
            return None;
        }

        let mut sel = Self::default();
        let mut rest = s;
        let tag_end = rest.find(['.', '#']).unwrap_or(rest.len());
        if tag_end > 0 {
            sel.tag = Some(rest[..tag_end].to_ascii_lowercase());
        }
        rest = &rest[tag_end..];

        while let Some(marker) = rest.chars().next() {
            let body = &rest[1..];
            let end = body.find(['.', '#']).unwrap_or(body.len());
            let name = &body[..end];
            if name.is_empty() || !name.chars().all(is_ident_char) {
                return None;
            }
            match marker {
                '.' => sel.classes.push(name.to_string()),
                '#' if sel.id.is_none() => sel.id = Some(name.to_string()),
                _ => return None,
            }
            rest = &body[end..];
        }

        if let Some(tag) = &sel.tag
            && !tag.chars().all(is_ident_char)
        {
            return None;
        }
        Some(sel)
    }

    fn matches(&self, node: &Node) -> bool {
        if self.tag.as_deref().is_some_and(|t| t != node.tag) {
            return false;
        }
        if self.id.is_some() && self.id != node.id {
            return false;
        }
        self.classes
            .iter()
            .all(|c| node.classes.iter().any(|nc| nc == c))
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

#[cfg(test)]
#[path = "../../tests/unit/host/memory.rs"]
mod tests;
