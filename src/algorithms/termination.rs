use std::time::{Duration, Instant};

use crate::benchmark::is_mlotz_pareto_front;
use crate::core::error::OError;
use crate::core::individual::Population;

/// A termination predicate evaluated once per generation against the
/// current population.
///
/// Concrete instances below cover stopping after a fixed number of
/// generations, after a wall-clock budget, once the whole population has
/// reached the mLOTZ Pareto front, and a combined variant that also tracks
/// the on-front count for the run log — each as its own named, testable
/// type implementing this one trait, rather than unrelated closures.
pub trait Termination {
    /// Should the run stop after evaluating `population` at `iteration`?
    fn should_terminate(&mut self, population: &Population, iteration: usize) -> Result<bool, OError>;
}

/// Stop once `max_iters` generations have elapsed.
pub struct MaxGenerations {
    max_iters: usize,
}

impl MaxGenerations {
    pub fn new(max_iters: usize) -> Self {
        Self { max_iters }
    }
}

impl Termination for MaxGenerations {
    fn should_terminate(&mut self, _population: &Population, iteration: usize) -> Result<bool, OError> {
        Ok(iteration >= self.max_iters)
    }
}

/// Stop once a wall-clock duration has elapsed since construction.
pub struct MaxDuration {
    start: Instant,
    limit: Duration,
}

impl MaxDuration {
    pub fn new(limit: Duration) -> Self {
        Self {
            start: Instant::now(),
            limit,
        }
    }
}

impl Termination for MaxDuration {
    fn should_terminate(&mut self, _population: &Population, _iteration: usize) -> Result<bool, OError> {
        Ok(self.start.elapsed() >= self.limit)
    }
}

/// Stop once every individual in the population lies on the mLOTZ Pareto
/// front. Does not short-circuit the per-individual scan: every individual
/// is still checked even after a miss is found, since a caller may want the
/// exact count (see [`ParetoFrontReached::count_on_front`]).
pub struct ParetoFrontReached {
    m: usize,
    last_count_on_front: usize,
}

impl ParetoFrontReached {
    pub fn new(m: usize) -> Self {
        Self {
            m,
            last_count_on_front: 0,
        }
    }

    /// How many individuals were on the front at the last check.
    pub fn count_on_front(&self) -> usize {
        self.last_count_on_front
    }
}

impl Termination for ParetoFrontReached {
    fn should_terminate(&mut self, population: &Population, _iteration: usize) -> Result<bool, OError> {
        let mut count = 0;
        for individual in population.individuals() {
            if is_mlotz_pareto_front(self.m, individual.genome().as_slice())? {
                count += 1;
            }
        }
        self.last_count_on_front = count;
        Ok(count == population.len())
    }
}

/// Logs the per-generation count of individuals on the Pareto front and
/// terminates at `max_iters`. It is both the termination predicate and the
/// thing that decides when to flush the JSON log — the actual JSON writing
/// lives in [`crate::logging`], this type only decides whether to stop and
/// exposes the count so the driver can pass it to the logger.
pub struct CountingLogger {
    m: usize,
    max_iters: usize,
    print_period: usize,
    last_count: usize,
}

impl CountingLogger {
    pub fn new(m: usize, max_iters: usize, print_period: usize) -> Self {
        Self {
            m,
            max_iters,
            print_period,
            last_count: 0,
        }
    }

    pub fn should_log(&self, iteration: usize) -> bool {
        iteration % self.print_period == 0 || iteration == self.max_iters
    }

    /// The count of on-front individuals recorded at the last
    /// [`Termination::should_terminate`] call.
    pub fn last_count(&self) -> usize {
        self.last_count
    }
}

impl Termination for CountingLogger {
    fn should_terminate(&mut self, population: &Population, iteration: usize) -> Result<bool, OError> {
        let mut count = 0;
        for individual in population.individuals() {
            if is_mlotz_pareto_front(self.m, individual.genome().as_slice())? {
                count += 1;
            }
        }
        self.last_count = count;
        if self.should_log(iteration) {
            log::info!(
                "generation {iteration}: {count}/{} individuals on the Pareto front",
                population.len()
            );
        }
        Ok(iteration >= self.max_iters)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn max_generations_fires_at_the_limit() {
        let mut term = MaxGenerations::new(5);
        let population = Population::new();
        assert!(!term.should_terminate(&population, 4).unwrap());
        assert!(term.should_terminate(&population, 5).unwrap());
    }

    #[test]
    fn pareto_front_reached_counts_and_terminates() {
        use crate::core::genome::Genome;
        use crate::core::individual::Individual;

        let on_front = Genome::from_bits([1, 1, 1, 0, 0, 0]);
        let population: Population = (0..3).map(|_| Individual::new(on_front.clone())).collect();
        let mut term = ParetoFrontReached::new(6);
        assert!(term.should_terminate(&population, 0).unwrap());
        assert_eq!(term.count_on_front(), 3);
    }
}
