pub use lotz::{is_lotz_pareto_front, is_mlotz_pareto_front, lotz, mlotz, MlotzFunctor};

pub mod lotz;
