use curve25519_dalek::Scalar;

use crate::{
    circuit::CircuitBuilder,
    error::{Error, Result},
    node::{NodeId, NodeKind},
};

impl CircuitBuilder {
    /// Computes the value of a node from its operands, caching it on every
    /// node it visits and writing it into the node's slot once allocated.
    ///
    /// Operands are resolved with an explicit work stack, so graph depth is
    /// bounded by memory rather than by the call stack.
    pub fn evaluate(&mut self, id: NodeId) -> Result<Scalar> {
        let mut stack = vec![id];
        while let Some(&top) = stack.last() {
            let (kind, cached) = self.cached(top);
            if cached.is_some() {
                stack.pop();
                continue;
            }

            let value = match kind {
                NodeKind::Input { value: Some(value) } => value,
                NodeKind::Input { value: None } => {
                    return Err(Error::UnassignedLeaf {
                        node: top,
                        name: self.name(top),
                    })
                }
                NodeKind::Sum(a, b) | NodeKind::Difference(a, b) | NodeKind::Product(a, b) => {
                    let (va, vb) = (self.cached(a).1, self.cached(b).1);
                    let (Some(va), Some(vb)) = (va, vb) else {
                        // left operand on top so it resolves first
                        if vb.is_none() {
                            stack.push(b);
                        }
                        if va.is_none() {
                            stack.push(a);
                        }
                        continue;
                    };
                    match kind {
                        NodeKind::Sum(..) => va + vb,
                        NodeKind::Difference(..) => va - vb,
                        _ => va * vb,
                    }
                }
            };
            stack.pop();
            self.cache(top, value);
        }

        let (_, value) = self.cached(id);
        value.ok_or_else(|| Error::Unevaluated {
            node: id,
            name: self.name(id),
        })
    }

    /// Evaluates every node in creation order.
    pub fn evaluate_all(&mut self) -> Result<()> {
        for index in 0..self.len() {
            self.evaluate(NodeId(index))?;
        }
        Ok(())
    }
}
