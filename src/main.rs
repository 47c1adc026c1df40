use r1cs_gadgets::{
    bin_loader::save_to_file,
    bits::{greater_than, BitVector},
    protocol::{generate_keypair, prove, verify},
    CircuitBuilder, Result,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut cs = CircuitBuilder::new();
    let a = BitVector::define(&cs, "a", 2);
    let b = BitVector::define(&cs, "b", 2);
    let out = greater_than(&cs, &a, &b)?;

    cs.mark_public(out)?;
    cs.allocate()?;

    a.assign(&mut cs, 0b10)?;
    b.assign(&mut cs, 0b01)?;
    cs.evaluate_all()?;

    let system = cs.constraint_system()?;
    tracing::info!("Number of R1CS constraints: {}", system.constraints.len());

    let (pk, vk) = generate_keypair(&system)?;
    let public = cs.public_input()?;
    let private = cs.private_input()?;
    let proof = prove(&pk, &public, &private)?;
    let verified = verify(&vk, &public, &proof)?;

    tracing::info!("Primary (public) input: {:?}", public);
    tracing::info!("Auxiliary (private) input: {:?}", private);
    tracing::info!("Verification status: {}", verified);

    save_to_file(&proof, "proof.bin")?;
    Ok(())
}
