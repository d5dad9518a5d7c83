use clap::Parser;

use bitnsga2::algorithms::{Algorithm, CountingLogger, Nsga2};
use bitnsga2::benchmark::MlotzFunctor;
use bitnsga2::cli::Cli;
use bitnsga2::core::error::OError;
use bitnsga2::core::problem::Problem;
use bitnsga2::logging::RunLogger;
use bitnsga2::operators::BitFlipMutation;
use bitnsga2::selection::SelectionStrategy;

fn run(cli: Cli) -> Result<(), OError> {
    let evaluator = MlotzFunctor::new(cli.objective_size)?;
    let problem = Problem::new(cli.individual_size, cli.objective_size, Box::new(evaluator))?;
    let mutation = BitFlipMutation::default_for(cli.individual_size)?;

    let mut algorithm = Nsga2::new(
        problem,
        cli.population_size,
        mutation,
        SelectionStrategy::default(),
        cli.seed,
    )?;

    let mut logger = RunLogger::new(
        &cli.filename,
        cli.individual_size,
        cli.population_size,
        cli.objective_size,
        cli.max_iters,
        cli.seed,
        cli.print_period,
    );
    let mut termination = CountingLogger::new(cli.objective_size, cli.max_iters, cli.print_period);

    algorithm.initialise()?;
    loop {
        let generation = algorithm.generation();
        let terminate = termination.should_terminate(algorithm.population(), generation)?;

        if logger.should_sync(generation) || terminate {
            logger.record(termination.last_count());
            let final_population = if terminate { Some(algorithm.population()) } else { None };
            if let Err(e) = logger.sync_to_file(final_population) {
                log::error!("failed to write the run log: {e}");
            }
        }
        if terminate {
            break;
        }
        algorithm.evolve()?;
    }

    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
