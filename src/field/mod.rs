pub mod cache;
pub mod generator;
pub mod random;
pub mod spec;
