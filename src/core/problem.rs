use std::fmt::{Debug, Formatter};

use crate::core::error::OError;
use crate::core::genome::Genome;

/// The user-supplied objective function.
///
/// A problem here is fully described by the genome length and the number of
/// objectives it produces, so `evaluate` takes a genome directly and returns
/// a plain objective vector rather than a name-keyed bag of
/// constraint/objective values. A blanket implementation below admits any
/// `Fn(&Genome) -> Result<Vec<f64>, OError>` closure, a stateless function
/// pointer, or a struct capturing extra parameters (the `m` split point of
/// `mLOTZ`, for instance).
pub trait Evaluator {
    fn evaluate(&self, genome: &Genome) -> Result<Vec<f64>, OError>;
}

impl<F> Evaluator for F
where
    F: Fn(&Genome) -> Result<Vec<f64>, OError>,
{
    fn evaluate(&self, genome: &Genome) -> Result<Vec<f64>, OError> {
        self(genome)
    }
}

/// A problem to optimise: a fixed genome length, a fixed number of
/// objectives (all maximised, per the Pareto convention used throughout this
/// crate), and the evaluator that scores a genome.
pub struct Problem {
    genome_len: usize,
    number_of_objectives: usize,
    evaluator: Box<dyn Evaluator>,
}

impl Debug for Problem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Problem")
            .field("genome_len", &self.genome_len)
            .field("number_of_objectives", &self.number_of_objectives)
            .finish_non_exhaustive()
    }
}

impl Problem {
    /// Build a new problem. Returns an error if `genome_len` or
    /// `number_of_objectives` is zero.
    pub fn new(
        genome_len: usize,
        number_of_objectives: usize,
        evaluator: Box<dyn Evaluator>,
    ) -> Result<Self, OError> {
        if genome_len == 0 {
            return Err(OError::InvalidArgument(
                "genome length must be greater than zero".into(),
            ));
        }
        if number_of_objectives == 0 {
            return Err(OError::InvalidArgument(
                "number of objectives must be greater than zero".into(),
            ));
        }
        Ok(Self {
            genome_len,
            number_of_objectives,
            evaluator,
        })
    }

    pub fn genome_len(&self) -> usize {
        self.genome_len
    }

    pub fn number_of_objectives(&self) -> usize {
        self.number_of_objectives
    }

    /// Evaluate a genome, checking that the evaluator honoured the declared
    /// objective arity.
    pub fn evaluate(&self, genome: &Genome) -> Result<Vec<f64>, OError> {
        if genome.len() != self.genome_len {
            return Err(OError::precondition(
                "problem",
                format!(
                    "genome has length {} but problem expects {}",
                    genome.len(),
                    self.genome_len
                ),
            ));
        }
        let values = self.evaluator.evaluate(genome)?;
        if values.len() != self.number_of_objectives {
            return Err(OError::Evaluation(format!(
                "evaluator returned {} objective values, expected {}",
                values.len(),
                self.number_of_objectives
            )));
        }
        Ok(values)
    }
}
