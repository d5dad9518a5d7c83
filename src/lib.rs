//! NSGA-II specialised to bit-string genomes and the (m)LOTZ pseudo-Boolean
//! benchmark family.

pub mod algorithms;
pub mod benchmark;
pub mod cli;
pub mod core;
pub mod logging;
pub mod operators;
pub mod selection;
