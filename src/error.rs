use crate::node::NodeId;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("can't set the value of non-leaf node {0}")]
    InvalidAssignment(NodeId),
    #[error("leaf node {node} ({name}) was evaluated before being assigned")]
    UnassignedLeaf { node: NodeId, name: String },
    #[error("the circuit has already been allocated")]
    AlreadyAllocated,
    #[error("the circuit has not been allocated yet")]
    NotAllocated,
    #[error("node {0} was created after allocation and owns no variable slot")]
    UnallocatedNode(NodeId),
    #[error("node {node} ({name}) holds no value; evaluate it first")]
    Unevaluated { node: NodeId, name: String },
    #[error("bit vectors have different lengths: {left} and {right}")]
    LengthMismatch { left: usize, right: usize },
    #[error("comparison on an empty bit vector")]
    EmptyBitVector,
    #[error("value {value} does not fit in {size} bits")]
    ValueTooWide { value: u64, size: usize },
    #[error("expected {expected} {kind} inputs, got {actual}")]
    InputLength {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("proving backend error: {0}")]
    Backend(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("encoding error: {0}")]
    Encoding(#[from] bincode::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
