use curve25519_dalek::Scalar;
use libspartan::{Assignment, Instance};
use rayon::prelude::*;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variable {
    One,
    Slot(usize),
}

/// Sum of `coeff * variable` terms; like terms are merged on insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinearCombination {
    terms: Vec<(Variable, Scalar)>,
}

impl LinearCombination {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn one() -> Self {
        Self::zero().with(Variable::One, Scalar::ONE)
    }

    pub fn slot(slot: usize) -> Self {
        Self::zero().with(Variable::Slot(slot), Scalar::ONE)
    }

    pub fn with(mut self, var: Variable, coeff: Scalar) -> Self {
        self.push(var, coeff);
        self
    }

    pub fn push(&mut self, var: Variable, coeff: Scalar) {
        match self.terms.iter_mut().find(|(v, _)| *v == var) {
            Some((_, c)) => *c += coeff,
            None => self.terms.push((var, coeff)),
        }
        self.terms.retain(|(_, c)| *c != Scalar::ZERO);
    }

    pub fn terms(&self) -> &[(Variable, Scalar)] {
        &self.terms
    }

    /// Evaluates against a full witness in slot order.
    pub fn evaluate(&self, witness: &[Scalar]) -> Scalar {
        self.terms
            .iter()
            .fold(Scalar::ZERO, |acc, (var, coeff)| match var {
                Variable::One => acc + coeff,
                Variable::Slot(s) => acc + coeff * witness[*s],
            })
    }
}

/// `a * b = c`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub a: LinearCombination,
    pub b: LinearCombination,
    pub c: LinearCombination,
}

impl Constraint {
    pub fn is_satisfied(&self, witness: &[Scalar]) -> bool {
        self.a.evaluate(witness) * self.b.evaluate(witness) == self.c.evaluate(witness)
    }
}

/// Slots `0..num_public` are the public input, the rest are private.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintSystem {
    pub num_public: usize,
    pub num_slots: usize,
    pub constraints: Vec<Constraint>,
}

impl ConstraintSystem {
    pub fn num_private(&self) -> usize {
        self.num_slots - self.num_public
    }

    fn check_witness(&self, witness: &[Scalar]) -> Result<()> {
        if witness.len() != self.num_slots {
            return Err(Error::InputLength {
                kind: "witness",
                expected: self.num_slots,
                actual: witness.len(),
            });
        }
        Ok(())
    }

    pub fn is_satisfied(&self, witness: &[Scalar]) -> Result<bool> {
        self.check_witness(witness)?;
        Ok(self
            .constraints
            .par_iter()
            .all(|constraint| constraint.is_satisfied(witness)))
    }

    /// Index of the first constraint the witness violates.
    pub fn first_unsatisfied(&self, witness: &[Scalar]) -> Result<Option<usize>> {
        self.check_witness(witness)?;
        Ok(self
            .constraints
            .par_iter()
            .position_first(|constraint| !constraint.is_satisfied(witness)))
    }
}

pub struct R1CS {
    pub num_cons: usize,
    pub num_vars: usize,
    pub num_inputs: usize,
    pub num_non_zero_entries: usize,
    pub instance: Instance,
}

impl R1CS {
    pub fn is_sat(&self, public: &[Scalar], private: &[Scalar]) -> Result<bool> {
        check_len("public", self.num_inputs, public.len())?;
        check_len("private", self.num_vars, private.len())?;
        self.instance
            .is_sat(&assignment(private)?, &assignment(public)?)
            .map_err(backend_error)
    }
}

pub(crate) fn check_len(kind: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(Error::InputLength {
            kind,
            expected,
            actual,
        });
    }
    Ok(())
}

pub(crate) fn assignment(values: &[Scalar]) -> Result<Assignment> {
    Assignment::new(&values.iter().map(Scalar::to_bytes).collect::<Vec<_>>())
        .map_err(backend_error)
}

pub(crate) fn backend_error(err: impl std::fmt::Debug) -> Error {
    Error::Backend(format!("{err:?}"))
}

/// Lays the constraint system out the way Spartan expects its columns:
/// private variables, then the constant one, then the public inputs.
pub fn into_r1cs(cs: &ConstraintSystem) -> Result<R1CS> {
    let num_inputs = cs.num_public;
    let num_vars = cs.num_private();
    // Spartan pads the constraint count to a power of two (at least 2);
    // the generators must be sized the same way.
    let num_cons = cs.constraints.len().next_power_of_two().max(2);

    let column = |var: Variable| match var {
        Variable::One => num_vars,
        Variable::Slot(s) if s < num_inputs => num_vars + 1 + s,
        Variable::Slot(s) => s - num_inputs,
    };

    let mut a: Vec<(usize, usize, [u8; 32])> = Vec::new();
    let mut b: Vec<(usize, usize, [u8; 32])> = Vec::new();
    let mut c: Vec<(usize, usize, [u8; 32])> = Vec::new();

    for (i, constraint) in cs.constraints.iter().enumerate() {
        for (lc, entries) in [
            (&constraint.a, &mut a),
            (&constraint.b, &mut b),
            (&constraint.c, &mut c),
        ] {
            for &(var, coeff) in lc.terms() {
                entries.push((i, column(var), coeff.to_bytes()));
            }
        }
    }

    let instance =
        Instance::new(num_cons, num_vars, num_inputs, &a, &b, &c).map_err(backend_error)?;

    let num_non_zero_entries = a.len().max(b.len()).max(c.len());

    Ok(R1CS {
        num_cons,
        num_vars,
        num_inputs,
        num_non_zero_entries,
        instance,
    })
}
