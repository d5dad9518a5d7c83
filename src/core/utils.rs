use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Build the single seeded PRNG threaded through mutation and tie-breaking
/// for a run. Using one `ChaCha8Rng` (rather than, say, one RNG per operator)
/// is what makes a run reproducible from its seed alone: every draw happens
/// in a fixed order against a fixed stream.
pub fn get_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}
