/// Data structures to represent parsed arithmetic expressions, and some
/// utility functions to display and traverse them.
use std::collections::HashMap;

/// The kind tag of a parse tree node. `Expr`, `Term`, and `Factor` are
/// internal nodes; `Op`, `Num`, and `Id` are leaves.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum NodeKind {
    Expr,
    Term,
    Factor,
    Op,
    Num,
    Id,
}

impl NodeKind {
    /// Returns the lowercase grammar name of this kind, as shown by the
    /// level renderer.
    pub fn grammar_name(&self) -> &'static str {
        match self {
            Self::Expr => return "expr",
            Self::Term => return "term",
            Self::Factor => return "factor",
            Self::Op => return "op",
            Self::Num => return "num",
            Self::Id => return "id",
        };
    }
}

/// Display trait implementation for NodeKind using grammar_name.
impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        return write!(f, "{}", self.grammar_name());
    }
}

/// A single node of a parse tree. A node records the offset where its
/// matching began (the start of its input-in-scope), how many characters the
/// match consumed, and the arena indices of its children in evaluation
/// order. The text a node resolved is derived from these offsets instead of
/// being stored on the node.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub scope_start: usize,
    pub matched_len: usize,
    pub child_idxs: Vec<usize>,
}

impl Node {
    /// Creates a single-character operator leaf at the given source offset.
    pub fn new_op(scope_start: usize) -> Node {
        return Node {
            kind: NodeKind::Op,
            scope_start: scope_start,
            matched_len: 1,
            child_idxs: Vec::new(),
        };
    }
}

/// Owns every node created while matching one input line. Node identity is
/// the index handed out at allocation time; indices increase in construction
/// order and mean nothing beyond uniqueness within their arena.
#[derive(Debug, PartialEq, Eq)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    /// Creates an empty arena for a fresh parse.
    pub fn new() -> NodeArena {
        return NodeArena { nodes: Vec::new() };
    }

    /// Creates an arena from an already-built node vector (used by tests to
    /// spell out expected trees index by index).
    pub fn from_vec(nodes: Vec<Node>) -> NodeArena {
        return NodeArena { nodes: nodes };
    }

    /// Adds a node to the arena and returns the index that now identifies it.
    pub fn alloc(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        return self.nodes.len() - 1;
    }

    /// Returns a reference to the node at node_idx.
    pub fn node(&self, node_idx: usize) -> &Node {
        return &self.nodes[node_idx];
    }

    /// Returns the number of nodes allocated so far.
    pub fn len(&self) -> usize {
        return self.nodes.len();
    }
}

/// A successfully parsed input line: the source text, the arena holding
/// every node built while matching it, and the index of the root node.
///
/// The arena may hold nodes that are not reachable from the root (the
/// number and identifier leaves whose spans the factor matcher copies into
/// zero-child factors); they are dropped with the arena and never rendered.
#[derive(Debug, PartialEq, Eq)]
pub struct ParseTree {
    pub source: String,
    pub nodes: NodeArena,
    pub root_idx: usize,
}

impl ParseTree {
    /// Returns the substring the node at node_idx actually consumed: the
    /// first matched_len characters of its input-in-scope.
    pub fn resolved_text(&self, node_idx: usize) -> &str {
        let node = self.nodes.node(node_idx);
        return &self.source[node.scope_start..node.scope_start + node.matched_len];
    }

    /// Returns the input text that was in scope when the node at node_idx
    /// began matching.
    pub fn input_in_scope(&self, node_idx: usize) -> &str {
        return &self.source[self.nodes.node(node_idx).scope_start..];
    }
}

/// Renders the tree breadth first, one line per level. Each node shows its
/// kind, resolved text, id, parent id, and a bracketed child list where
/// op/id/num children appear as their resolved text and internal children as
/// their kind name.
///
/// Parent ids come from a side table the traversal fills in while rendering
/// each node's children; the nodes themselves are never written to. The root
/// has no entry and renders as parent=none, and rendering the same tree
/// again produces identical output.
pub fn render_tree_levels(tree: &ParseTree) -> String {
    let mut parent_idxs: HashMap<usize, usize> = HashMap::new();
    let mut frontier = vec![tree.root_idx];
    let mut level_lines: Vec<String> = Vec::new();

    while !frontier.is_empty() {
        let mut next_frontier: Vec<usize> = Vec::new();
        let mut node_renderings: Vec<String> = Vec::new();

        for node_idx in frontier {
            let node = tree.nodes.node(node_idx);

            let parent_rendering = match parent_idxs.get(&node_idx) {
                Some(parent_idx) => parent_idx.to_string(),
                None => String::from("none"),
            };

            let mut child_renderings: Vec<String> = Vec::new();

            for child_idx in &node.child_idxs {
                parent_idxs.insert(*child_idx, node_idx);

                let child = tree.nodes.node(*child_idx);
                match child.kind {
                    NodeKind::Op | NodeKind::Id | NodeKind::Num => {
                        child_renderings.push(String::from(tree.resolved_text(*child_idx)));
                    }
                    _ => {
                        child_renderings.push(String::from(child.kind.grammar_name()));
                    }
                }

                next_frontier.push(*child_idx);
            }

            node_renderings.push(format!(
                "<type={} resolve={} id={} parent={} children=[{}]>",
                node.kind,
                tree.resolved_text(node_idx),
                node_idx,
                parent_rendering,
                child_renderings.join(" ")
            ));
        }

        level_lines.push(node_renderings.join("  "));
        frontier = next_frontier;
    }

    return level_lines.join("\n");
}

/// Display trait implementation for ParseTree using render_tree_levels.
impl std::fmt::Display for ParseTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        return write!(f, "{}", render_tree_levels(self).as_str());
    }
}
