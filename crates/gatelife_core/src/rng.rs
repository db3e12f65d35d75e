use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The single random source driving a run.
pub type SimRng = ChaCha8Rng;

/// Create a deterministic RNG from a seed.
#[must_use]
pub fn create_rng(seed: u64) -> SimRng {
    ChaCha8Rng::seed_from_u64(seed)
}
