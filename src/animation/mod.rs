pub mod ease;
pub mod remap;
pub mod signal;
