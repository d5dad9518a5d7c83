pub use mutation::{mutate_population, BitFlipMutation, Mutation};

mod mutation;
