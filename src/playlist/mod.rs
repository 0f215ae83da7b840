pub mod buckets;
pub mod config;
pub mod filters;
pub mod generator;
pub mod metadata;
pub mod naming;
pub mod normalizer;
pub mod selector;


pub use buckets::*;
pub use config::*;
pub use generator::*;
pub use metadata::*;
