pub use error::OError;
pub use genome::Genome;
pub use individual::{Individual, Population};
pub use objective::{compare, dominates, strictly_dominates, ParetoOrdering};
pub use problem::{Evaluator, Problem};

pub mod error;
pub mod genome;
pub mod individual;
pub mod objective;
pub mod problem;
pub mod utils;
