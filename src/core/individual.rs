use std::fmt::{Display, Formatter};

use crate::core::error::OError;
use crate::core::genome::Genome;
use crate::core::objective;

/// A solution: a genome together with the objective values, rank and
/// crowding distance assigned to it during selection.
///
/// Objectives are a plain `Vec<f64>` indexed positionally rather than a
/// name-keyed map: every individual in a run is evaluated against the same
/// fixed-arity objective function, so a name lookup would only add an
/// allocation per read with no extra safety.
#[derive(Debug, Clone)]
pub struct Individual {
    genome: Genome,
    /// `None` until the individual has been evaluated.
    objectives: Option<Vec<f64>>,
    /// The non-domination rank assigned during sorting (0 is the best
    /// front). `None` before sorting has run on this generation.
    rank: Option<usize>,
    /// The crowding distance assigned during environmental selection.
    /// Defaults to `0.0` and is only meaningful after selection has run.
    crowding_distance: f64,
}

impl Display for Individual {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Individual(genome={}, objectives={:?}, rank={:?}, crowding_distance={})",
            self.genome, self.objectives, self.rank, self.crowding_distance
        )
    }
}

impl Individual {
    /// Create a new, unevaluated individual from a genome.
    pub fn new(genome: Genome) -> Self {
        Self {
            genome,
            objectives: None,
            rank: None,
            crowding_distance: 0.0,
        }
    }

    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    pub fn is_evaluated(&self) -> bool {
        self.objectives.is_some()
    }

    /// The objective vector. Returns an error if the individual has not yet
    /// been evaluated.
    pub fn objectives(&self) -> Result<&[f64], OError> {
        self.objectives.as_deref().ok_or_else(|| {
            OError::precondition("individual", "objectives read before evaluation")
        })
    }

    /// Record the result of evaluating this individual's genome.
    pub fn set_objectives(&mut self, objectives: Vec<f64>) {
        self.objectives = Some(objectives);
    }

    pub fn rank(&self) -> Option<usize> {
        self.rank
    }

    pub fn set_rank(&mut self, rank: usize) {
        self.rank = Some(rank);
    }

    pub fn crowding_distance(&self) -> f64 {
        self.crowding_distance
    }

    pub fn set_crowding_distance(&mut self, distance: f64) {
        self.crowding_distance = distance;
    }

    /// Does `self` dominate `other`? Both individuals must already be
    /// evaluated.
    pub fn dominates(&self, other: &Self) -> Result<bool, OError> {
        objective::dominates(self.objectives()?, other.objectives()?)
    }
}

/// An ordered collection of individuals.
///
/// NSGA-II treats a population as an unordered set in theory, but every
/// concrete step (sorting, crowding, selection) needs a stable index to
/// refer back to an individual by id, so the storage is a plain `Vec` and
/// "the population" really means "individuals `0..len()`" for the duration
/// of one generation.
#[derive(Debug, Clone, Default)]
pub struct Population(Vec<Individual>);

impl Population {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.0
    }

    pub fn individuals_mut(&mut self) -> &mut [Individual] {
        &mut self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, individual: Individual) {
        self.0.push(individual);
    }

    pub fn get(&self, index: usize) -> &Individual {
        &self.0[index]
    }

    pub fn get_mut(&mut self, index: usize) -> &mut Individual {
        &mut self.0[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Individual> {
        self.0.iter()
    }

    /// Build a population of `count` individuals with randomly generated
    /// genomes of the given length.
    pub fn random(count: usize, genome_len: usize, rng: &mut impl rand::Rng) -> Self {
        Self(
            (0..count)
                .map(|_| Individual::new(Genome::random(genome_len, rng)))
                .collect(),
        )
    }

    /// Retain only the individuals at the given indices, in the given
    /// order. Used by environmental selection to materialise the next
    /// generation from a subset of a combined parent+offspring pool.
    pub fn select_by_index(&self, indices: &[usize]) -> Self {
        Self(indices.iter().map(|&i| self.0[i].clone()).collect())
    }

    pub fn into_vec(self) -> Vec<Individual> {
        self.0
    }
}

impl FromIterator<Individual> for Population {
    fn from_iter<T: IntoIterator<Item = Individual>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Individual> for Population {
    fn extend<T: IntoIterator<Item = Individual>>(&mut self, iter: T) {
        self.0.extend(iter)
    }
}

#[cfg(test)]
mod test {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn unevaluated_individual_rejects_objective_read() {
        let ind = Individual::new(Genome::from_bits([1, 0, 1]));
        assert!(ind.objectives().is_err());
    }

    #[test]
    fn dominates_delegates_to_pareto_compare() {
        let mut a = Individual::new(Genome::from_bits([1, 1, 1]));
        let mut b = Individual::new(Genome::from_bits([0, 0, 0]));
        a.set_objectives(vec![3.0, 3.0]);
        b.set_objectives(vec![1.0, 1.0]);
        assert!(a.dominates(&b).unwrap());
        assert!(!b.dominates(&a).unwrap());
    }

    #[test]
    fn random_population_has_requested_size() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let pop = Population::random(20, 12, &mut rng);
        assert_eq!(pop.len(), 20);
        assert!(pop.individuals().iter().all(|i| i.genome().len() == 12));
    }

    #[test]
    fn select_by_index_preserves_order_and_allows_duplicates() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let pop = Population::random(5, 4, &mut rng);
        let subset = pop.select_by_index(&[3, 3, 0]);
        assert_eq!(subset.len(), 3);
        assert_eq!(subset.get(0).genome(), pop.get(3).genome());
        assert_eq!(subset.get(1).genome(), pop.get(3).genome());
        assert_eq!(subset.get(2).genome(), pop.get(0).genome());
    }
}
