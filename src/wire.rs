use std::ops::{Add, Mul, Sub};

use crate::{
    circuit::CircuitBuilder,
    node::{NodeId, Operand},
};

/// Copyable handle to a node that builds new nodes with `+`, `-` and `*`.
///
/// Integer literals on either side are materialized as fresh leaves, so
/// `1 - b` creates a `const:1` leaf and a difference node.
#[derive(Debug, Clone, Copy)]
pub struct Wire<'a> {
    cs: &'a CircuitBuilder,
    id: NodeId,
}

impl<'a> Wire<'a> {
    pub(crate) fn new(cs: &'a CircuitBuilder, id: NodeId) -> Self {
        Self { cs, id }
    }

    pub fn id(self) -> NodeId {
        self.id
    }

    pub fn builder(self) -> &'a CircuitBuilder {
        self.cs
    }

    pub fn name(self) -> String {
        self.cs.name(self.id)
    }
}

impl From<Wire<'_>> for NodeId {
    fn from(wire: Wire<'_>) -> Self {
        wire.id
    }
}

impl From<Wire<'_>> for Operand {
    fn from(wire: Wire<'_>) -> Self {
        Operand::Node(wire.id)
    }
}

macro_rules! wire_op {
    ($trait:ident, $method:ident) => {
        impl<'a> $trait<Wire<'a>> for Wire<'a> {
            type Output = Wire<'a>;

            fn $method(self, rhs: Wire<'a>) -> Wire<'a> {
                Wire::new(self.cs, self.cs.$method(self.id, rhs.id))
            }
        }

        impl<'a> $trait<i64> for Wire<'a> {
            type Output = Wire<'a>;

            fn $method(self, rhs: i64) -> Wire<'a> {
                Wire::new(self.cs, self.cs.$method(self.id, rhs))
            }
        }

        impl<'a> $trait<Wire<'a>> for i64 {
            type Output = Wire<'a>;

            fn $method(self, rhs: Wire<'a>) -> Wire<'a> {
                Wire::new(rhs.cs, rhs.cs.$method(self, rhs.id))
            }
        }
    };
}

wire_op!(Add, add);
wire_op!(Sub, sub);
wire_op!(Mul, mul);

#[cfg(test)]
mod tests {
    use curve25519_dalek::Scalar;

    use super::*;
    use crate::node::NodeKind;

    #[test]
    fn test_operators() {
        let cs = CircuitBuilder::new();
        let a = cs.input("a");
        let b = cs.input("b");
        let c = (a + b) * a - b;
        assert_eq!(c.name(), "a+b*a-b");
        assert_eq!(cs.len(), 5);
        assert!(matches!(cs.kind(c.id()), NodeKind::Difference(_, rhs) if rhs == b.id()));
    }

    #[test]
    fn test_literal_operands() {
        let cs = CircuitBuilder::new();
        let b = cs.input("b");
        let c = 1 - b;
        let d = b * 2;
        assert_eq!(c.name(), "const:1-b");
        assert_eq!(d.name(), "b*const:2");
        // b, const:1, 1-b, const:2, b*2
        assert_eq!(cs.len(), 5);
    }

    #[test]
    fn test_evaluate_operators() {
        let mut cs = CircuitBuilder::new();
        let (a, b, out) = {
            let a = cs.input("a");
            let b = cs.input("b");
            (a.id(), b.id(), ((1 - b) * a + 3).id())
        };
        cs.set(a, 4u64).unwrap();
        cs.set(b, 0u64).unwrap();
        assert_eq!(cs.evaluate(out).unwrap(), Scalar::from(7u64));
    }
}
