pub mod macreau;
pub mod math;
pub mod rng;
