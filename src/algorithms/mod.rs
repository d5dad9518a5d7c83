pub use algorithm::{Algorithm, Elapsed};
pub use nsga2::Nsga2;
pub use termination::{CountingLogger, MaxDuration, MaxGenerations, ParetoFrontReached, Termination};

mod algorithm;
mod nsga2;
mod termination;
