//! Walks a resolved selection set against the type graph, calling field
//! resolvers and completing their results per type kind.

mod context;
mod executor;
mod options;

pub use context::ExecutionContext;
pub use executor::execute;
pub use options::ExecutionOptions;
pub use options::ExecutionStrategy;
