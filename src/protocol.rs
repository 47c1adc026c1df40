//! Boundary to the Spartan proving backend.
//!
//! 1. Setup
//!     ConstraintSystem -> R1CS
//!     R1CS -> Gens
//!     R1CS, Gens -> Commitment, Decommitment
//!
//! 2. Prover
//!     ProvingKey, public input, private input -> Proof
//!
//! 3. Verifier
//!     VerifyingKey, public input, Proof -> bool
use std::rc::Rc;

use curve25519_dalek::Scalar;
use libspartan::{ComputationCommitment, ComputationDecommitment, SNARKGens, SNARK};
use merlin::Transcript;
use serde::{Deserialize, Serialize};

use crate::{
    config::ProverConfig,
    error::Result,
    r1cs::{assignment, backend_error, check_len, into_r1cs, ConstraintSystem, R1CS},
};

pub struct ProvingKey {
    r1cs: Rc<R1CS>,
    gens: Rc<SNARKGens>,
    commitment: Rc<ComputationCommitment>,
    decommitment: ComputationDecommitment,
    config: ProverConfig,
}

pub struct VerifyingKey {
    num_inputs: usize,
    gens: Rc<SNARKGens>,
    commitment: Rc<ComputationCommitment>,
    config: ProverConfig,
}

#[derive(Serialize, Deserialize)]
pub struct Proof(SNARK);

impl ProvingKey {
    pub fn r1cs(&self) -> &R1CS {
        &self.r1cs
    }
}

impl VerifyingKey {
    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }
}

fn transcript(config: &ProverConfig) -> Transcript {
    let mut transcript = Transcript::new(b"SNARK");
    transcript.append_message(b"domain", config.domain.as_bytes());
    transcript
}

pub fn generate_keypair(cs: &ConstraintSystem) -> Result<(ProvingKey, VerifyingKey)> {
    generate_keypair_with_config(cs, ProverConfig::default())
}

pub fn generate_keypair_with_config(
    cs: &ConstraintSystem,
    config: ProverConfig,
) -> Result<(ProvingKey, VerifyingKey)> {
    let _scope = tracing::info_span!(
        "Setup",
        num_constraints = cs.constraints.len(),
        num_public = cs.num_public,
        num_private = cs.num_private()
    )
    .entered();

    let r1cs = into_r1cs(cs)?;
    let gens = SNARKGens::new(
        r1cs.num_cons,
        r1cs.num_vars,
        r1cs.num_inputs,
        r1cs.num_non_zero_entries,
    );
    let (commitment, decommitment) = SNARK::encode(&r1cs.instance, &gens);

    let gens = Rc::new(gens);
    let commitment = Rc::new(commitment);
    let verifying_key = VerifyingKey {
        num_inputs: r1cs.num_inputs,
        gens: Rc::clone(&gens),
        commitment: Rc::clone(&commitment),
        config: config.clone(),
    };
    let proving_key = ProvingKey {
        r1cs: Rc::new(r1cs),
        gens,
        commitment,
        decommitment,
        config,
    };
    Ok((proving_key, verifying_key))
}

pub fn prove(pk: &ProvingKey, public_input: &[Scalar], private_input: &[Scalar]) -> Result<Proof> {
    let _scope = tracing::info_span!("Prove").entered();
    check_len("public", pk.r1cs.num_inputs, public_input.len())?;
    check_len("private", pk.r1cs.num_vars, private_input.len())?;

    let inputs = assignment(public_input)?;
    let vars = assignment(private_input)?;
    let mut transcript = transcript(&pk.config);
    let proof = SNARK::prove(
        &pk.r1cs.instance,
        &pk.commitment,
        &pk.decommitment,
        vars,
        &inputs,
        &pk.gens,
        &mut transcript,
    );
    Ok(Proof(proof))
}

pub fn verify(vk: &VerifyingKey, public_input: &[Scalar], proof: &Proof) -> Result<bool> {
    let _scope = tracing::info_span!("Verify").entered();
    check_len("public", vk.num_inputs, public_input.len())?;

    let inputs = assignment(public_input)?;
    let mut transcript = transcript(&vk.config);
    match proof
        .0
        .verify(&vk.commitment, &inputs, &mut transcript, &vk.gens)
    {
        Ok(()) => Ok(true),
        Err(err) => {
            tracing::warn!(error = ?backend_error(err), "proof rejected");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{circuit::CircuitBuilder, error::Error};

    fn s(x: u64) -> Scalar {
        Scalar::from(x)
    }

    // out = (a + 1) * b, out public
    fn circuit(a: u64, b: u64) -> CircuitBuilder {
        let mut cs = CircuitBuilder::new();
        let (a_id, b_id, out) = {
            let a = cs.input("a");
            let b = cs.input("b");
            (a.id(), b.id(), ((a + 1) * b).id())
        };
        cs.mark_public(out).unwrap();
        cs.allocate().unwrap();
        cs.set(a_id, a).unwrap();
        cs.set(b_id, b).unwrap();
        cs.evaluate(out).unwrap();
        cs
    }

    #[test]
    fn test_prove_verify() {
        let cs = circuit(2, 5);
        let system = cs.constraint_system().unwrap();
        let (pk, vk) = generate_keypair(&system).unwrap();

        let public = cs.public_input().unwrap();
        let private = cs.private_input().unwrap();
        assert_eq!(public, vec![s(15)]);
        assert!(pk.r1cs().is_sat(&public, &private).unwrap());

        let proof = prove(&pk, &public, &private).unwrap();
        assert!(verify(&vk, &public, &proof).unwrap());
        assert!(!verify(&vk, &[s(16)], &proof).unwrap());
    }

    #[test]
    fn test_domain_mismatch() {
        let cs = circuit(1, 1);
        let system = cs.constraint_system().unwrap();
        let (pk, _) =
            generate_keypair_with_config(&system, ProverConfig::new("prover")).unwrap();
        let (_, vk) =
            generate_keypair_with_config(&system, ProverConfig::new("verifier")).unwrap();

        let public = cs.public_input().unwrap();
        let proof = prove(&pk, &public, &cs.private_input().unwrap()).unwrap();
        assert!(!verify(&vk, &public, &proof).unwrap());
    }

    #[test]
    fn test_input_length() {
        let cs = circuit(1, 1);
        let (pk, vk) = generate_keypair(&cs.constraint_system().unwrap()).unwrap();
        let private = cs.private_input().unwrap();
        assert!(matches!(
            prove(&pk, &[], &private),
            Err(Error::InputLength { kind: "public", expected: 1, actual: 0 })
        ));

        let proof = prove(&pk, &cs.public_input().unwrap(), &private).unwrap();
        assert!(matches!(
            verify(&vk, &[s(1), s(2)], &proof),
            Err(Error::InputLength { .. })
        ));
    }
}
