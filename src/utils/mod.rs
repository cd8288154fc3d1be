//! Path helpers and static module resolution

pub mod path_resolver;
pub mod paths;

pub use path_resolver::{PathResolver, TsConfig};
