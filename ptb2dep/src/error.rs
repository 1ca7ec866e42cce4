use depgraph::GraphError;
use thiserror::Error;

/// Conversion error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConvertError {
    /// The assembled primary-head graph is cyclic. No partial tree is
    /// returned.
    #[error("cyclic dependency relation")]
    Cycle,

    /// Error building the dependency graph.
    #[error(transparent)]
    Graph(#[from] GraphError),
}
