use std::cell::{Ref, RefCell};
use std::collections::HashMap;

use curve25519_dalek::Scalar;
use serde::{Deserialize, Serialize};

use crate::{
    config::BuilderConfig,
    error::{Error, Result},
    node::{Node, NodeId, NodeKind, Operand},
    r1cs::{Constraint, ConstraintSystem, LinearCombination, Variable},
    scalar::from_i64,
    wire::Wire,
};

/// Longer operand labels are replaced by the operand's id in derived labels.
const MAX_LABEL_LEN: usize = 32;

/// Slot assignment produced by [`CircuitBuilder::allocate`]: public slots
/// come first, then private ones, each group in node creation order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VariableLayout {
    pub num_public: usize,
    pub num_slots: usize,
    /// `slots[i]` is the node holding slot `i`.
    pub slots: Vec<NodeId>,
}

impl VariableLayout {
    pub fn num_private(&self) -> usize {
        self.num_slots - self.num_public
    }

    pub fn public_nodes(&self) -> &[NodeId] {
        &self.slots[..self.num_public]
    }

    pub fn private_nodes(&self) -> &[NodeId] {
        &self.slots[self.num_public..]
    }
}

/// Owns every node of an expression graph and compiles it into rank-1
/// constraints plus a matching witness.
///
/// Nodes are created through `&self` so that [`Wire`] handles can build
/// expressions with ordinary operators; everything that commits results
/// (assignment, allocation, evaluation) takes `&mut self`.
#[derive(Debug, Default)]
pub struct CircuitBuilder {
    config: BuilderConfig,
    nodes: RefCell<Vec<Node>>,
    literals: RefCell<HashMap<i64, NodeId>>,
    layout: Option<VariableLayout>,
    constraints: Vec<Constraint>,
    assignment: Vec<Option<Scalar>>,
    /// Set once any value is cached; cleared by `invalidate`.
    evaluated: bool,
}

impl CircuitBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BuilderConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    fn push_node(&self, name: String, kind: NodeKind) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        let id = NodeId(nodes.len());
        if let Some((a, b)) = kind.operands() {
            assert!(
                a.0 < id.0 && b.0 < id.0,
                "operand of {id} does not belong to this builder"
            );
        }
        nodes.push(Node::new(id, name, kind));
        id
    }

    /// Creates an unassigned private leaf.
    pub fn define(&self, name: impl Into<String>) -> NodeId {
        self.push_node(name.into(), NodeKind::Input { value: None })
    }

    /// Creates a leaf and returns an operator handle for it.
    pub fn input(&self, name: impl Into<String>) -> Wire<'_> {
        self.wire(self.define(name))
    }

    pub fn wire(&self, id: NodeId) -> Wire<'_> {
        Wire::new(self, id)
    }

    /// Materializes an integer literal as an assigned leaf.
    pub fn constant(&self, value: i64) -> NodeId {
        if self.config.intern_literals {
            if let Some(&id) = self.literals.borrow().get(&value) {
                return id;
            }
        }
        let id = self.push_node(
            format!("const:{value}"),
            NodeKind::Input {
                value: Some(from_i64(value)),
            },
        );
        if self.config.intern_literals {
            self.literals.borrow_mut().insert(value, id);
        }
        id
    }

    fn operand(&self, operand: Operand) -> NodeId {
        match operand {
            Operand::Node(id) => id,
            Operand::Literal(value) => self.constant(value),
        }
    }

    fn label(&self, id: NodeId) -> String {
        let nodes = self.nodes.borrow();
        match nodes.get(id.0) {
            Some(node) if node.name.len() <= MAX_LABEL_LEN => node.name.clone(),
            _ => id.to_string(),
        }
    }

    fn binary(
        &self,
        a: Operand,
        b: Operand,
        kind: impl FnOnce(NodeId, NodeId) -> NodeKind,
    ) -> NodeId {
        let a = self.operand(a);
        let b = self.operand(b);
        let kind = kind(a, b);
        let name = format!("{}{}{}", self.label(a), kind.symbol(), self.label(b));
        self.push_node(name, kind)
    }

    pub fn add(&self, a: impl Into<Operand>, b: impl Into<Operand>) -> NodeId {
        self.binary(a.into(), b.into(), NodeKind::Sum)
    }

    pub fn sub(&self, a: impl Into<Operand>, b: impl Into<Operand>) -> NodeId {
        self.binary(a.into(), b.into(), NodeKind::Difference)
    }

    pub fn mul(&self, a: impl Into<Operand>, b: impl Into<Operand>) -> NodeId {
        self.binary(a.into(), b.into(), NodeKind::Product)
    }

    pub fn len(&self) -> usize {
        self.nodes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrows a node. Panics on an id from another builder.
    pub fn node(&self, id: NodeId) -> Ref<'_, Node> {
        Ref::map(self.nodes.borrow(), |nodes| &nodes[id.0])
    }

    pub fn name(&self, id: NodeId) -> String {
        self.node(id).name.clone()
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.node(id).kind
    }

    pub fn value(&self, id: NodeId) -> Option<Scalar> {
        self.node(id).value
    }

    pub fn is_public(&self, id: NodeId) -> bool {
        self.node(id).is_public
    }

    pub fn slot(&self, id: NodeId) -> Option<usize> {
        self.node(id).var_slot
    }

    pub fn layout(&self) -> Option<&VariableLayout> {
        self.layout.as_ref()
    }

    pub fn is_allocated(&self) -> bool {
        self.layout.is_some()
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub(crate) fn cached(&mut self, id: NodeId) -> (NodeKind, Option<Scalar>) {
        let node = &self.nodes.get_mut()[id.0];
        (node.kind, node.value)
    }

    /// Stores an evaluated value on the node and in its slot, if any.
    pub(crate) fn cache(&mut self, id: NodeId, value: Scalar) {
        let node = &mut self.nodes.get_mut()[id.0];
        node.value = Some(value);
        if let Some(slot) = node.var_slot {
            self.assignment[slot] = Some(value);
        }
        self.evaluated = true;
    }

    /// Assigns a value to a leaf.
    pub fn set(&mut self, id: NodeId, value: impl Into<Scalar>) -> Result<()> {
        let value = value.into();
        let nodes = self.nodes.get_mut();
        let node = &mut nodes[id.0];
        match &mut node.kind {
            NodeKind::Input { value: assigned } => *assigned = Some(value),
            _ => return Err(Error::InvalidAssignment(id)),
        }
        self.invalidate();
        Ok(())
    }

    /// Drops every cached value so the next evaluation sees fresh leaves.
    fn invalidate(&mut self) {
        if !self.evaluated {
            return;
        }
        self.evaluated = false;
        let nodes = self.nodes.get_mut();
        let mut cleared = 0;
        for node in nodes.iter_mut().filter(|node| node.value.is_some()) {
            node.value = None;
            cleared += 1;
        }
        self.assignment.iter_mut().for_each(|slot| *slot = None);
        if cleared > 0 {
            tracing::debug!(cleared, "cleared cached node values");
        }
    }

    pub fn mark_public(&mut self, id: NodeId) -> Result<()> {
        if self.is_allocated() {
            return Err(Error::AlreadyAllocated);
        }
        self.nodes.get_mut()[id.0].is_public = true;
        Ok(())
    }

    /// Assigns every node a variable slot, public nodes first, and emits one
    /// constraint per derived node.
    pub fn allocate(&mut self) -> Result<VariableLayout> {
        if self.is_allocated() {
            return Err(Error::AlreadyAllocated);
        }
        let nodes = self.nodes.get_mut();
        let mut slots: Vec<NodeId> = nodes
            .iter()
            .filter(|node| node.is_public)
            .map(|node| node.id)
            .collect();
        let num_public = slots.len();
        slots.extend(nodes.iter().filter(|node| !node.is_public).map(|node| node.id));

        for (slot, id) in slots.iter().enumerate() {
            nodes[id.0].var_slot = Some(slot);
        }

        let layout = VariableLayout {
            num_public,
            num_slots: slots.len(),
            slots,
        };
        tracing::debug!(
            num_public = layout.num_public,
            num_private = layout.num_private(),
            "allocated variable slots"
        );

        self.assignment = vec![None; layout.num_slots];
        self.layout = Some(layout.clone());
        self.emit_constraints()?;
        Ok(layout)
    }

    fn emit_constraints(&mut self) -> Result<()> {
        let nodes = self.nodes.get_mut();
        let slot = |id: NodeId| nodes[id.0].var_slot.ok_or(Error::UnallocatedNode(id));

        let mut constraints = Vec::new();
        for node in nodes.iter() {
            let Some((a, b)) = node.kind.operands() else {
                continue;
            };
            let (a, b, c) = (slot(a)?, slot(b)?, slot(node.id)?);
            let constraint = match node.kind {
                // (a + b) * 1 = c
                NodeKind::Sum(..) => Constraint {
                    a: LinearCombination::slot(a).with(Variable::Slot(b), Scalar::ONE),
                    b: LinearCombination::one(),
                    c: LinearCombination::slot(c),
                },
                // (a - b) * 1 = c
                NodeKind::Difference(..) => Constraint {
                    a: LinearCombination::slot(a).with(Variable::Slot(b), -Scalar::ONE),
                    b: LinearCombination::one(),
                    c: LinearCombination::slot(c),
                },
                // a * b = c
                NodeKind::Product(..) => Constraint {
                    a: LinearCombination::slot(a),
                    b: LinearCombination::slot(b),
                    c: LinearCombination::slot(c),
                },
                NodeKind::Input { .. } => continue,
            };
            constraints.push(constraint);
        }
        tracing::debug!(num_constraints = constraints.len(), "emitted constraints");
        self.constraints = constraints;
        Ok(())
    }

    fn allocated_layout(&self) -> Result<&VariableLayout> {
        let layout = self.layout.as_ref().ok_or(Error::NotAllocated)?;
        let len = self.len();
        if len > layout.num_slots {
            return Err(Error::UnallocatedNode(NodeId(layout.num_slots)));
        }
        Ok(layout)
    }

    pub fn constraint_system(&self) -> Result<ConstraintSystem> {
        let layout = self.allocated_layout()?;
        Ok(ConstraintSystem {
            num_public: layout.num_public,
            num_slots: layout.num_slots,
            constraints: self.constraints.clone(),
        })
    }

    fn slot_values(&self, slots: &[NodeId], offset: usize) -> Result<Vec<Scalar>> {
        slots
            .iter()
            .enumerate()
            .map(|(i, &id)| {
                self.assignment[offset + i].ok_or_else(|| Error::Unevaluated {
                    node: id,
                    name: self.name(id),
                })
            })
            .collect()
    }

    /// Values of slots `0..num_public`, in slot order.
    pub fn public_input(&self) -> Result<Vec<Scalar>> {
        let layout = self.allocated_layout()?;
        self.slot_values(layout.public_nodes(), 0)
    }

    /// Values of slots `num_public..num_slots`, in slot order.
    pub fn private_input(&self) -> Result<Vec<Scalar>> {
        let layout = self.allocated_layout()?;
        self.slot_values(layout.private_nodes(), layout.num_public)
    }

    /// Full assignment in slot order.
    pub fn witness(&self) -> Result<Vec<Scalar>> {
        let mut witness = self.public_input()?;
        witness.extend(self.private_input()?);
        Ok(witness)
    }
}
