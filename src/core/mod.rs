//! Core functionality: classification, graph walking and generation

pub mod classifier;
pub mod generator;
pub mod parallel;
pub mod walker;
pub mod workspace;

pub use classifier::classify;
pub use generator::{GenerateOptions, GenerationReport, Generator, InputKind};
pub use parallel::ProgressUpdate;
pub use walker::{generate_registry, GraphWalker};
