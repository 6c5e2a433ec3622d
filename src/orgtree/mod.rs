//! Organization tree
//!
//! Immutable tree of organizational units and accounts. Expansion state
//! lives outside the node data, in a caller-owned set of expanded ids, so
//! the tree itself never changes while the user browses it. Traversal is a
//! pure recursion producing a flattened render list.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// Kind of node in the organization tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NodeKind {
    Root,
    Ou,
    Account,
}

impl NodeKind {
    /// Render marker, one per kind
    pub fn marker(&self) -> &'static str {
        match self {
            NodeKind::Root => "[root]",
            NodeKind::Ou => "[ou]",
            NodeKind::Account => "[acct]",
        }
    }
}

/// One node in the organization tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrgNode {
    pub id: String,
    pub name: String,
    pub kind: NodeKind,

    /// Accounts beneath this node, display only
    pub account_count: Option<u32>,

    /// Policies attached to this node, display only
    pub policy_count: Option<u32>,

    #[serde(default)]
    pub children: Vec<OrgNode>,
}

impl OrgNode {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Caller-owned set of expanded node ids
#[derive(Debug, Clone, Default)]
pub struct ExpandedNodes {
    ids: AHashSet<String>,
}

impl ExpandedNodes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the root expanded, the way the tree first renders
    pub fn with_root(root: &OrgNode) -> Self {
        let mut expanded = Self::new();
        expanded.expand(&root.id);
        expanded
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn expand(&mut self, id: &str) {
        self.ids.insert(id.to_string());
    }

    pub fn collapse(&mut self, id: &str) {
        self.ids.remove(id);
    }

    /// Flip one node's expansion state
    pub fn toggle(&mut self, id: &str) {
        if !self.ids.remove(id) {
            self.ids.insert(id.to_string());
        }
    }

    /// Expand every node in the tree
    pub fn expand_all(&mut self, root: &OrgNode) {
        self.expand(&root.id);
        for child in &root.children {
            self.expand_all(child);
        }
    }
}

/// One row of the flattened tree, ready to render
#[derive(Debug, Clone)]
pub struct TreeRow<'a> {
    pub node: &'a OrgNode,
    pub depth: usize,
    pub expanded: bool,
    pub has_children: bool,
}

/// Flatten the tree into a render list
///
/// Children are visited only under expanded nodes. The traversal reads both
/// inputs and mutates neither.
pub fn flatten<'a>(root: &'a OrgNode, expanded: &ExpandedNodes) -> Vec<TreeRow<'a>> {
    let mut rows = Vec::new();
    flatten_into(root, expanded, 0, &mut rows);
    rows
}

fn flatten_into<'a>(
    node: &'a OrgNode,
    expanded: &ExpandedNodes,
    depth: usize,
    rows: &mut Vec<TreeRow<'a>>,
) {
    let is_expanded = expanded.is_expanded(&node.id);
    rows.push(TreeRow {
        node,
        depth,
        expanded: is_expanded,
        has_children: node.has_children(),
    });

    if is_expanded {
        for child in &node.children {
            flatten_into(child, expanded, depth + 1, rows);
        }
    }
}

fn node(
    id: &str,
    name: &str,
    kind: NodeKind,
    accounts: u32,
    policies: u32,
    children: Vec<OrgNode>,
) -> OrgNode {
    OrgNode {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        account_count: Some(accounts),
        policy_count: Some(policies),
        children,
    }
}

/// Demonstration organization tree
pub fn seed_tree() -> OrgNode {
    node(
        "r-abc123",
        "Organization Root",
        NodeKind::Root,
        47,
        8,
        vec![
            node(
                "ou-001",
                "Production",
                NodeKind::Ou,
                15,
                5,
                vec![
                    node("acc-001", "AWS-Prod-001", NodeKind::Account, 0, 2, vec![]),
                    node("acc-002", "AWS-Prod-002", NodeKind::Account, 0, 2, vec![]),
                ],
            ),
            node(
                "ou-002",
                "Development",
                NodeKind::Ou,
                12,
                3,
                vec![node(
                    "acc-003",
                    "AWS-Dev-001",
                    NodeKind::Account,
                    0,
                    1,
                    vec![],
                )],
            ),
            node("ou-003", "Workloads", NodeKind::Ou, 20, 4, vec![]),
        ],
    )
}
