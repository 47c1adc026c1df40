//! Fixed-width vectors of boolean nodes and the comparison / XOR gadgets
//! built from them.
//!
//! Bits are stored most significant first. Nothing constrains a bit to be
//! 0 or 1; callers assign boolean values by convention.
//!
//! Comparisons scan the bit positions from most to least significant,
//! carrying two nodes:
//!
//! - `decided`: 1 once some position has shown `a > b`
//! - `tied`: 1 while every position so far has matched
//!
//! ```text
//! decided_0 = (1 - b_0) * a_0
//! tied_0    = a_0 * b_0 + (1 - a_0) * (1 - b_0)
//! decided_i = decided + (1 - decided) * tied * (1 - b_i) * a_i
//! tied_i    = tied * (a_i * b_i + (1 - a_i) * (1 - b_i))
//! ```
use std::ops::Index;

use crate::{
    circuit::CircuitBuilder,
    error::{Error, Result},
    node::NodeId,
    wire::Wire,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitVector {
    bits: Vec<NodeId>,
}

impl BitVector {
    pub fn from_nodes(bits: Vec<NodeId>) -> Self {
        Self { bits }
    }

    /// Defines `size` fresh leaves labelled `name[0]`, `name[1]`, ...
    pub fn define(cs: &CircuitBuilder, name: &str, size: usize) -> Self {
        Self::from_nodes((0..size).map(|i| cs.define(format!("{name}[{i}]"))).collect())
    }

    pub fn size(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bits(&self) -> &[NodeId] {
        &self.bits
    }

    /// Sets the bits to the big-endian binary digits of `value`.
    pub fn assign(&self, cs: &mut CircuitBuilder, value: u64) -> Result<()> {
        let size = self.size();
        if size < 64 && value >> size != 0 {
            return Err(Error::ValueTooWide { value, size });
        }
        for (i, &bit) in self.bits.iter().enumerate() {
            let position = size - 1 - i;
            let digit = if position < 64 {
                (value >> position) & 1
            } else {
                0
            };
            cs.set(bit, digit)?;
        }
        Ok(())
    }

    /// `sum(bit[i] * 2^(size - 1 - i))`, built as a multiply-add chain.
    pub fn to_integer(&self, cs: &CircuitBuilder) -> NodeId {
        let Some((&first, rest)) = self.bits.split_first() else {
            return cs.constant(0);
        };
        rest.iter()
            .fold(cs.wire(first), |acc, &bit| acc * 2 + cs.wire(bit))
            .id()
    }

    pub fn xor(&self, cs: &CircuitBuilder, other: &BitVector) -> Result<BitVector> {
        xor(cs, self, other)
    }
}

impl Index<usize> for BitVector {
    type Output = NodeId;

    fn index(&self, index: usize) -> &NodeId {
        &self.bits[index]
    }
}

fn check_sizes(a: &BitVector, b: &BitVector) -> Result<()> {
    if a.size() != b.size() {
        return Err(Error::LengthMismatch {
            left: a.size(),
            right: b.size(),
        });
    }
    Ok(())
}

// 1 iff a == b, for boolean a and b
fn bits_match<'a>(a: Wire<'a>, b: Wire<'a>) -> Wire<'a> {
    a * b + (1 - a) * (1 - b)
}

struct Scan {
    decided: NodeId,
    tied: NodeId,
}

fn scan(cs: &CircuitBuilder, a: &BitVector, b: &BitVector) -> Result<Scan> {
    check_sizes(a, b)?;
    if a.is_empty() {
        return Err(Error::EmptyBitVector);
    }

    let (a0, b0) = (cs.wire(a[0]), cs.wire(b[0]));
    let mut decided = (1 - b0) * a0;
    let mut tied = bits_match(a0, b0);

    for (&ai, &bi) in a.bits().iter().zip(b.bits()).skip(1) {
        let (ai, bi) = (cs.wire(ai), cs.wire(bi));
        decided = decided + (1 - decided) * tied * (1 - bi) * ai;
        tied = tied * bits_match(ai, bi);
    }

    Ok(Scan {
        decided: decided.id(),
        tied: tied.id(),
    })
}

/// 1 iff `a > b` as big-endian unsigned integers.
pub fn greater_than(cs: &CircuitBuilder, a: &BitVector, b: &BitVector) -> Result<NodeId> {
    Ok(scan(cs, a, b)?.decided)
}

pub fn less_than(cs: &CircuitBuilder, a: &BitVector, b: &BitVector) -> Result<NodeId> {
    greater_than(cs, b, a)
}

/// 1 iff every bit of `a` matches `b`.
pub fn equal(cs: &CircuitBuilder, a: &BitVector, b: &BitVector) -> Result<NodeId> {
    Ok(scan(cs, a, b)?.tied)
}

/// `gt + (1 - gt) * eq`, sharing one scan for both terms.
pub fn greater_or_equal(cs: &CircuitBuilder, a: &BitVector, b: &BitVector) -> Result<NodeId> {
    let Scan { decided, tied } = scan(cs, a, b)?;
    let (gt, eq) = (cs.wire(decided), cs.wire(tied));
    Ok((gt + (1 - gt) * eq).id())
}

pub fn less_or_equal(cs: &CircuitBuilder, a: &BitVector, b: &BitVector) -> Result<NodeId> {
    greater_or_equal(cs, b, a)
}

/// Per-position `a[i] * (1 - b[i]) + (1 - a[i]) * b[i]`.
pub fn xor(cs: &CircuitBuilder, a: &BitVector, b: &BitVector) -> Result<BitVector> {
    check_sizes(a, b)?;
    Ok(BitVector::from_nodes(
        a.bits()
            .iter()
            .zip(b.bits())
            .map(|(&ai, &bi)| {
                let (ai, bi) = (cs.wire(ai), cs.wire(bi));
                (ai * (1 - bi) + (1 - ai) * bi).id()
            })
            .collect(),
    ))
}
