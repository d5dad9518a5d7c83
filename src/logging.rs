use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::error::OError;
use crate::core::individual::Population;

/// The static parameters of a run, recorded once at the top of the log.
#[derive(Debug, Clone, Serialize)]
pub struct RunMetadata {
    pub individual_size: usize,
    pub population_size: usize,
    pub objective_size: usize,
    pub max_iters: usize,
    pub seed: u64,
    pub begin: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
}

/// The JSON document written to disk: `metadata` up front, a
/// `count_pareto_front` series with one entry per recorded generation, and
/// the bit-string rendering of the final population once the run has ended.
#[derive(Debug, Clone, Serialize)]
pub struct RunLog {
    pub metadata: RunMetadata,
    pub count_pareto_front: Vec<usize>,
    pub final_population: Vec<String>,
}

/// Accumulates a [`RunLog`] over the course of a run and periodically
/// flushes it to disk.
///
/// `record` appends one entry per recorded generation, `sync_to_file`
/// re-serialises the whole log and writes it out every `print_period`
/// generations and once more at the end. Every sync is a
/// write-to-temp-then-rename so a concurrent reader never observes a
/// half-written file.
pub struct RunLogger {
    path: PathBuf,
    print_period: usize,
    metadata: RunMetadata,
    count_pareto_front: Vec<usize>,
}

impl RunLogger {
    pub fn new(
        path: impl Into<PathBuf>,
        individual_size: usize,
        population_size: usize,
        objective_size: usize,
        max_iters: usize,
        seed: u64,
        print_period: usize,
    ) -> Self {
        Self {
            path: path.into(),
            print_period: print_period.max(1),
            metadata: RunMetadata {
                individual_size,
                population_size,
                objective_size,
                max_iters,
                seed,
                begin: Utc::now(),
                end: None,
            },
            count_pareto_front: Vec::new(),
        }
    }

    pub fn should_sync(&self, generation: usize) -> bool {
        generation % self.print_period == 0 || generation == self.metadata.max_iters
    }

    pub fn record(&mut self, count_on_front: usize) {
        self.count_pareto_front.push(count_on_front);
    }

    /// Write the accumulated log to disk via write-to-temp + rename. I/O
    /// failures are reported to the caller but are not meant to abort a run
    /// (see the error-handling design notes): callers should log the error
    /// and continue rather than propagate it upward as fatal.
    pub fn sync_to_file(&self, final_population: Option<&Population>) -> Result<(), OError> {
        let mut metadata = self.metadata.clone();
        let final_population = match final_population {
            Some(population) => {
                metadata.end = Some(Utc::now());
                population
                    .individuals()
                    .iter()
                    .map(|i| i.genome().to_string())
                    .collect()
            }
            None => Vec::new(),
        };

        let log = RunLog {
            metadata,
            count_pareto_front: self.count_pareto_front.clone(),
            final_population,
        };

        let data = serde_json::to_string_pretty(&log)
            .map_err(|e| OError::Generic(format!("failed to serialise the run log: {e}")))?;

        write_atomically(&self.path, &data)
    }
}

fn write_atomically(path: &Path, data: &str) -> Result<(), OError> {
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, data)
        .map_err(|e| OError::File(tmp_path.clone(), e.to_string()))?;
    std::fs::rename(&tmp_path, path).map_err(|e| OError::File(path.to_path_buf(), e.to_string()))
}

#[cfg(test)]
mod test {
    use crate::core::genome::Genome;
    use crate::core::individual::Individual;

    use super::*;

    #[test]
    fn sync_to_file_produces_valid_json() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("bitnsga2-test-{}.json", std::process::id()));

        let mut logger = RunLogger::new(&path, 12, 20, 4, 10, 1, 5);
        logger.record(2);
        logger.record(5);

        let population: Population = (0..3)
            .map(|_| Individual::new(Genome::from_bits([1, 0, 1])))
            .collect();
        logger.sync_to_file(Some(&population)).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed["count_pareto_front"].as_array().unwrap().len(), 2);
        assert_eq!(parsed["final_population"].as_array().unwrap().len(), 3);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn should_sync_respects_print_period_and_final_iteration() {
        let logger = RunLogger::new("/tmp/unused.json", 1, 1, 1, 17, 0, 5);
        assert!(logger.should_sync(0));
        assert!(logger.should_sync(5));
        assert!(!logger.should_sync(6));
        assert!(logger.should_sync(17));
    }
}
