pub mod motion;
pub mod rng;
