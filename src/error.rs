use tern_core::LowerError;
use thiserror::Error;

/// Errors of the root graph and its host.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Lowering was triggered before the platform supplied a scene connection.
    #[error("cannot run the graph before a scene connection is available")]
    NotAttached,

    #[error("lowering failed: {0}")]
    Lowering(#[from] LowerError),

    /// The platform adapter could not realize the outputs.
    #[error("platform adapter failed: {0}")]
    Platform(String),
}
