use std::time::Instant;

use rand_chacha::ChaCha8Rng;

use crate::algorithms::algorithm::Algorithm;
use crate::core::error::OError;
use crate::core::individual::Population;
use crate::core::problem::Problem;
use crate::operators::mutation::{mutate_population, BitFlipMutation};
use crate::selection::select::{non_dominated_sort, select, SelectionStrategy};

/// NSGA-II specialised to bit-string genomes: mutation is always bit-flip,
/// and the environmental selection strategy (simple sort-and-truncate or the
/// heap/linked-list iterative trim) is configurable but defaults to the
/// iterative trim.
///
/// Each generation mutates the current population into a combined pool,
/// ranks that pool into non-domination fronts, then admits whole fronts into
/// the next generation until the boundary front has to be trimmed down to
/// the remaining slots by crowding distance.
pub struct Nsga2 {
    problem: Problem,
    population_size: usize,
    mutation: BitFlipMutation,
    strategy: SelectionStrategy,
    population: Population,
    generation: usize,
    rng: ChaCha8Rng,
    start_time: Instant,
}

impl Nsga2 {
    /// Build a new NSGA-II run. `population_size` is the number of
    /// individuals kept at the end of every generation (the mutation step
    /// temporarily doubles this to form the combined pool that selection
    /// draws from).
    pub fn new(
        problem: Problem,
        population_size: usize,
        mutation: BitFlipMutation,
        strategy: SelectionStrategy,
        seed: u64,
    ) -> Result<Self, OError> {
        if population_size == 0 {
            return Err(OError::InvalidArgument(
                "population size must be greater than zero".into(),
            ));
        }
        Ok(Self {
            problem,
            population_size,
            mutation,
            strategy,
            population: Population::new(),
            generation: 0,
            rng: crate::core::utils::get_rng(seed),
            start_time: Instant::now(),
        })
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    /// Evaluate every unevaluated individual in `population` against the
    /// problem's objective function.
    fn evaluate(&self, population: &mut Population) -> Result<(), OError> {
        for individual in population.individuals_mut() {
            if !individual.is_evaluated() {
                let objectives = self.problem.evaluate(individual.genome())?;
                individual.set_objectives(objectives);
            }
        }
        Ok(())
    }
}

impl Algorithm for Nsga2 {
    fn initialise(&mut self) -> Result<(), OError> {
        let mut population = Population::random(
            self.population_size,
            self.problem.genome_len(),
            &mut self.rng,
        );
        self.evaluate(&mut population)?;
        non_dominated_sort(&mut population)?;
        self.population = population;
        self.generation = 0;
        self.start_time = Instant::now();
        Ok(())
    }

    fn evolve(&mut self) -> Result<(), OError> {
        let mut pool = mutate_population(&self.population, &self.mutation, &mut self.rng);
        self.evaluate(&mut pool)?;

        let fronts = non_dominated_sort(&mut pool)?;
        self.population = select(
            &pool,
            &fronts,
            self.population_size,
            self.strategy,
            &mut self.rng,
        )?;
        self.generation += 1;
        Ok(())
    }

    fn generation(&self) -> usize {
        self.generation
    }

    fn name(&self) -> String {
        "NSGA-II".to_string()
    }

    fn start_time(&self) -> &Instant {
        &self.start_time
    }

    fn population(&self) -> &Population {
        &self.population
    }
}
