use std::fmt;

use curve25519_dalek::Scalar;
use serde::{Deserialize, Serialize};

/// Index of a node in the builder's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    // x = assigned value
    Input { value: Option<Scalar> },
    // x = a + b
    Sum(NodeId, NodeId),
    // x = a - b
    Difference(NodeId, NodeId),
    // x = a * b
    Product(NodeId, NodeId),
}

impl NodeKind {
    pub fn is_leaf(&self) -> bool {
        matches!(self, NodeKind::Input { .. })
    }

    pub fn operands(&self) -> Option<(NodeId, NodeId)> {
        match *self {
            NodeKind::Input { .. } => None,
            NodeKind::Sum(a, b) | NodeKind::Difference(a, b) | NodeKind::Product(a, b) => {
                Some((a, b))
            }
        }
    }

    pub(crate) fn symbol(&self) -> &'static str {
        match self {
            NodeKind::Input { .. } => "",
            NodeKind::Sum(..) => "+",
            NodeKind::Difference(..) => "-",
            NodeKind::Product(..) => "*",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    pub is_public: bool,
    pub value: Option<Scalar>,
    pub var_slot: Option<usize>,
}

impl Node {
    pub(crate) fn new(id: NodeId, name: String, kind: NodeKind) -> Self {
        Self {
            id,
            name,
            kind,
            is_public: false,
            value: None,
            var_slot: None,
        }
    }
}

/// Either side of a binary node: an existing node or an integer literal
/// that gets materialized as a fresh leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Node(NodeId),
    Literal(i64),
}

impl From<NodeId> for Operand {
    fn from(id: NodeId) -> Self {
        Operand::Node(id)
    }
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Operand::Literal(value)
    }
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Operand::Literal(value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operands() {
        let a = NodeId(0);
        let b = NodeId(1);
        assert_eq!(NodeKind::Input { value: None }.operands(), None);
        assert_eq!(NodeKind::Sum(a, b).operands(), Some((a, b)));
        assert_eq!(NodeKind::Difference(b, a).operands(), Some((b, a)));
        assert_eq!(NodeKind::Product(a, a).operands(), Some((a, a)));
    }

    #[test]
    fn test_is_leaf() {
        assert!(NodeKind::Input {
            value: Some(Scalar::ONE)
        }
        .is_leaf());
        assert!(!NodeKind::Product(NodeId(0), NodeId(1)).is_leaf());
    }

    #[test]
    fn test_display() {
        assert_eq!(NodeId(7).to_string(), "v7");
    }
}
