use std::time::Instant;

use log::{debug, info};

use crate::algorithms::termination::Termination;
use crate::core::error::OError;
use crate::core::individual::Population;

/// Elapsed run time, broken into hours/minutes/seconds for display and for
/// the JSON log (see [`crate::logging`]).
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct Elapsed {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Elapsed {
    pub fn since(start: &Instant) -> Self {
        let duration = start.elapsed();
        Self {
            hours: duration.as_secs() / 3600,
            minutes: (duration.as_secs() / 60) % 60,
            seconds: duration.as_secs() % 60,
        }
    }
}

impl std::fmt::Display for Elapsed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:0>2} hours, {:0>2} minutes and {:0>2} seconds",
            self.hours, self.minutes, self.seconds
        )
    }
}

/// A genetic algorithm driver: initialise a population, then repeatedly
/// mutate/sort/select until a [`Termination`] predicate fires.
///
/// A trait rather than a concrete loop so the evolution loop and its
/// logging/timing are shared by any concrete algorithm, even though this
/// crate only ships [`crate::algorithms::nsga2::Nsga2`].
pub trait Algorithm {
    fn initialise(&mut self) -> Result<(), OError>;
    fn evolve(&mut self) -> Result<(), OError>;
    fn generation(&self) -> usize;
    fn name(&self) -> String;
    fn start_time(&self) -> &Instant;
    fn population(&self) -> &Population;

    fn elapsed(&self) -> Elapsed {
        Elapsed::since(self.start_time())
    }

    /// Run the full evolutionary loop, checking `termination` before every
    /// generation (including generation 0, against the freshly initialised
    /// population, before it has been mutated at all).
    fn run(&mut self, termination: &mut dyn Termination) -> Result<(), OError> {
        info!("Starting {}", self.name());
        self.initialise()?;

        loop {
            debug!("Generation #{}", self.generation());
            if termination.should_terminate(self.population(), self.generation())? {
                info!(
                    "Stopping evolution at generation #{} after {}",
                    self.generation(),
                    self.elapsed()
                );
                break;
            }

            self.evolve()?;
            info!(
                "Evolved generation #{} - elapsed time: {}",
                self.generation(),
                self.elapsed()
            );
        }
        Ok(())
    }
}
