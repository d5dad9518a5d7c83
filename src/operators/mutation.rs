use rand_chacha::ChaCha8Rng;

use crate::core::error::OError;
use crate::core::genome::Genome;
use crate::core::individual::{Individual, Population};

/// The trait to implement a mutation operator that produces offspring
/// genomes from a parent.
pub trait Mutation {
    fn mutate(&self, genome: &Genome, rng: &mut ChaCha8Rng) -> Genome;
}

/// Bit-flip mutation: every gene is flipped independently with probability
/// `p`. The population-wide default is `p = 1 / n` (one expected flip per
/// genome).
pub struct BitFlipMutation {
    probability: f64,
}

impl BitFlipMutation {
    /// Build a bit-flip operator with an explicit per-gene probability.
    /// Returns an error if the probability is outside `[0, 1]`.
    pub fn new(probability: f64) -> Result<Self, OError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(OError::InvalidArgument(format!(
                "mutation probability {probability} must be between 0 and 1"
            )));
        }
        Ok(Self { probability })
    }

    /// Build a bit-flip operator with the default probability `1 / genome_len`.
    pub fn default_for(genome_len: usize) -> Result<Self, OError> {
        if genome_len == 0 {
            return Err(OError::InvalidArgument(
                "cannot derive a default mutation rate for a zero-length genome".into(),
            ));
        }
        Self::new(1.0 / genome_len as f64)
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl Mutation for BitFlipMutation {
    fn mutate(&self, genome: &Genome, rng: &mut ChaCha8Rng) -> Genome {
        let mut child = genome.clone();
        for i in 0..child.len() {
            child.mutate_bit(i, self.probability, rng);
        }
        child
    }
}

/// Produce a doubled population: every parent survives unchanged and is
/// joined by one mutated offspring, turning a population of size `n` into a
/// pool of size `2n` for non-dominated sorting and environmental selection
/// to draw the next generation from.
pub fn mutate_population(
    population: &Population,
    mutation: &impl Mutation,
    rng: &mut ChaCha8Rng,
) -> Population {
    let mut next = population.clone();
    for parent in population.individuals() {
        let child_genome = mutation.mutate(parent.genome(), rng);
        next.push(Individual::new(child_genome));
    }
    next
}
