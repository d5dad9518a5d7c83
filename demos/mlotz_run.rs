//! Run NSGA-II against the 4-objective mLOTZ benchmark for a handful of
//! generations and print how many individuals end up on the Pareto front.

use bitnsga2::algorithms::{Algorithm, MaxGenerations, Nsga2};
use bitnsga2::benchmark::{is_mlotz_pareto_front, MlotzFunctor};
use bitnsga2::core::problem::Problem;
use bitnsga2::operators::BitFlipMutation;
use bitnsga2::selection::SelectionStrategy;

fn main() {
    env_logger::init();

    let individual_size = 24;
    let objective_size = 4;

    let evaluator = MlotzFunctor::new(objective_size).expect("valid objective size");
    let problem = Problem::new(individual_size, objective_size, Box::new(evaluator))
        .expect("valid problem parameters");
    let mutation = BitFlipMutation::default_for(individual_size).expect("valid genome length");

    let mut algorithm = Nsga2::new(
        problem,
        40,
        mutation,
        SelectionStrategy::IterativeTrim,
        42,
    )
    .expect("valid NSGA-II configuration");

    let mut termination = MaxGenerations::new(200);
    algorithm.run(&mut termination).expect("run should not error");

    let on_front = algorithm
        .population()
        .individuals()
        .iter()
        .filter(|ind| is_mlotz_pareto_front(objective_size, ind.genome().as_slice()).unwrap())
        .count();

    println!(
        "{on_front}/{} individuals on the Pareto front after {} generations",
        algorithm.population().len(),
        algorithm.generation()
    );
}
