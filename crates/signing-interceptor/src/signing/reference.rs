use rand::Rng;

pub const REFERENCE_PREFIX: &str = "PT1";
pub const REFERENCE_BITS: u32 = 46;

/// `PT1` followed by a uniform random integer in `[0, 2^46)`.
pub fn generate_reference<R: Rng + ?Sized>(rng: &mut R) -> String {
    let n: u64 = rng.gen_range(0..1u64 << REFERENCE_BITS);
    format!("{REFERENCE_PREFIX}{n}")
}
