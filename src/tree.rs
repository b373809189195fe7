use std::collections::BTreeMap;

/// Handle into the tree's node arena.
///
/// Entries hold a `NodeId` instead of a reference so that expand/collapse
/// performed through a flattened entry mutates the shared tree without any
/// lifetime entanglement. The tree owns all nodes; ids stay valid for the
/// whole session because nodes are never removed from the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(usize);

/// The root node. Its segment list is empty and it is implicitly expanded
/// for the purpose of listing its direct children.
pub const ROOT: NodeId = NodeId(0);

const ICON_FILE: &str = "\u{ea7b}";
const ICON_FOLDER_CLOSED: &str = "\u{ea83}";
const ICON_FOLDER_OPEN: &str = "\u{f07c}";
const INDENT: &str = "  ";

/// A node in the path tree.
///
/// A node with zero children is a file; one or more children makes it a
/// folder. That classification is always derived from the children map.
#[derive(Debug)]
struct Node {
    /// Path components from the root to this node.
    segments: Vec<String>,
    /// Children keyed by their own segment. `BTreeMap` keeps sibling
    /// iteration in lexicographic order.
    children: BTreeMap<String, NodeId>,
    expanded: bool,
}

/// Hierarchical model of a flat list of slash-delimited paths.
#[derive(Debug)]
pub struct PathTree {
    nodes: Vec<Node>,
}

impl PathTree {
    /// Build a tree by grouping paths on their common segment prefixes.
    ///
    /// Paths are sorted first so tie ordering is deterministic. Duplicate
    /// paths merge into the same leaf; empty strings contribute nothing.
    pub fn build<S: AsRef<str>>(paths: &[S]) -> Self {
        let mut sorted: Vec<&str> = paths.iter().map(|p| p.as_ref()).collect();
        sorted.sort_unstable();

        let parts: Vec<Vec<String>> = sorted.iter().map(|p| split_segments(p)).collect();
        let part_refs: Vec<&[String]> = parts.iter().map(|p| p.as_slice()).collect();

        let mut tree = Self {
            nodes: vec![Node {
                segments: Vec::new(),
                children: BTreeMap::new(),
                expanded: false,
            }],
        };
        tree.build_level(ROOT, &part_refs, 0);
        tree
    }

    /// Partition `paths` by their segment at `depth`; each partition becomes
    /// one child of `parent`, recursing one level deeper. Paths shorter than
    /// `depth` stop contributing here and terminate as leaves above.
    fn build_level(&mut self, parent: NodeId, paths: &[&[String]], depth: usize) {
        let mut groups: BTreeMap<&str, Vec<&[String]>> = BTreeMap::new();
        for path in paths {
            if let Some(segment) = path.get(depth) {
                groups.entry(segment).or_default().push(path);
            }
        }

        for (segment, group) in groups {
            let mut segments = self.nodes[parent.0].segments.clone();
            segments.push(segment.to_string());

            let id = NodeId(self.nodes.len());
            self.nodes.push(Node {
                segments,
                children: BTreeMap::new(),
                expanded: false,
            });
            self.nodes[parent.0]
                .children
                .insert(segment.to_string(), id);

            self.build_level(id, &group, depth + 1);
        }
    }

    pub fn expand(&mut self, id: NodeId) {
        self.nodes[id.0].expanded = true;
    }

    pub fn collapse(&mut self, id: NodeId) {
        self.nodes[id.0].expanded = false;
    }

    /// Expand `id` and every node below it.
    pub fn expand_all(&mut self, id: NodeId) {
        self.nodes[id.0].expanded = true;
        let children: Vec<NodeId> = self.nodes[id.0].children.values().copied().collect();
        for child in children {
            self.expand_all(child);
        }
    }

    /// Collapse `id` and every node below it.
    pub fn collapse_all(&mut self, id: NodeId) {
        self.nodes[id.0].expanded = false;
        let children: Vec<NodeId> = self.nodes[id.0].children.values().copied().collect();
        for child in children {
            self.collapse_all(child);
        }
    }

    #[cfg(test)]
    fn is_expanded(&self, id: NodeId) -> bool {
        self.nodes[id.0].expanded
    }

    /// Merge single-child chains so deep folder-per-level runs render as one
    /// row (`a/b/c` instead of three nested levels).
    ///
    /// Applied bottom-up: a node with exactly one child is removed and its
    /// child re-keyed under the concatenation of both segments, so chains of
    /// arbitrary length collapse in one pass and a second pass is a no-op.
    /// The surviving node keeps its full segment list, so leaf paths are
    /// unchanged; this is a display-only transform.
    pub fn flatten(&mut self) {
        self.flatten_children(ROOT);
    }

    fn flatten_children(&mut self, id: NodeId) {
        let keys: Vec<String> = self.nodes[id.0].children.keys().cloned().collect();
        for key in keys {
            let Some(&child) = self.nodes[id.0].children.get(&key) else {
                continue;
            };
            self.flatten_children(child);

            if self.nodes[child.0].children.len() != 1 {
                continue;
            }
            let Some((grand_key, grand_id)) = self.nodes[child.0]
                .children
                .iter()
                .next()
                .map(|(k, v)| (k.clone(), *v))
            else {
                continue;
            };

            // The intermediate node stays in the arena but becomes
            // unreachable; ids held by stale entries never dangle.
            self.nodes[child.0].children.clear();
            self.nodes[id.0].children.remove(&key);
            self.nodes[id.0]
                .children
                .insert(format!("{key}/{grand_key}"), grand_id);
        }
    }

    /// Flatten the tree into renderable entries: depth-first, siblings in
    /// lexicographic label order, descending only into expanded nodes. The
    /// root itself is not emitted.
    ///
    /// Recomputed fresh on every call so the result always reflects the
    /// current expansion state; callers must not cache it across mutations.
    pub fn entries(&self) -> Vec<Entry> {
        let mut out = Vec::new();
        self.collect_entries(ROOT, 0, &mut out);
        out
    }

    fn collect_entries(&self, id: NodeId, depth: usize, out: &mut Vec<Entry>) {
        for (label, &child) in &self.nodes[id.0].children {
            let node = &self.nodes[child.0];
            out.push(Entry {
                node: child,
                depth,
                label: label.clone(),
                is_file: node.children.is_empty(),
                expanded: node.expanded,
                full_path: node.segments.join("/"),
                search_text: self.search_tags(child).join(" "),
            });
            if node.expanded {
                self.collect_entries(child, depth + 1, out);
            }
        }
    }

    /// Searchable tags for a node: its own segments plus every descendant
    /// label, so a collapsed folder still matches a query for a file inside.
    fn search_tags(&self, id: NodeId) -> Vec<String> {
        let mut tags = self.nodes[id.0].segments.clone();
        for (label, &child) in &self.nodes[id.0].children {
            tags.push(label.clone());
            tags.extend(self.search_tags(child));
        }
        tags
    }
}

/// Split a raw path on `/`, dropping empty segments so absolute paths don't
/// grow a spurious root child and repeated or trailing separators leave no
/// artifacts.
fn split_segments(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// A flattened, renderable view of one tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Backing node, for expand/collapse through this entry.
    pub node: NodeId,
    /// Indentation level; direct children of the root are at 0.
    pub depth: usize,
    /// The node's own segment (or merged chain), not the full path.
    pub label: String,
    pub is_file: bool,
    pub expanded: bool,
    /// Root-to-node segments joined by `/`.
    pub full_path: String,
    search_text: String,
}

impl Entry {
    fn icon(&self) -> &'static str {
        if self.is_file {
            ICON_FILE
        } else if self.expanded {
            ICON_FOLDER_OPEN
        } else {
            ICON_FOLDER_CLOSED
        }
    }

    /// Display line with nerd-font icons.
    pub fn display(&self) -> String {
        format!("{}{} {}", INDENT.repeat(self.depth), self.icon(), self.label)
    }

    /// ASCII fallback display line.
    pub fn display_ascii(&self) -> String {
        let marker = if self.is_file { "[F]" } else { "[D]" };
        format!("{}{} {}", INDENT.repeat(self.depth), marker, self.label)
    }

    /// Text the fuzzy filter matches against.
    pub fn search_text(&self) -> String {
        self.search_text.clone()
    }
}
