use core::fmt;
use thiserror::Error;

/// The kind of tree a node was being lowered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoweringContext {
    Scene,
    View,
}

impl fmt::Display for LoweringContext {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LoweringContext::Scene => write!(f, "scene"),
            LoweringContext::View => write!(f, "view"),
        }
    }
}

/// Errors that abort a lowering pass.
///
/// None of these are recoverable: each one means the declared tree is wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LowerError {
    /// A node was reached that cannot produce outputs in this context.
    #[error("{kind} cannot be lowered as a {context}: {reason}")]
    ContractViolation {
        kind: &'static str,
        context: LoweringContext,
        reason: &'static str,
    },

    /// Nested expansion went deeper than the configured limit.
    ///
    /// `chain` lists node kinds from the root down to the node that tripped the limit.
    #[error("cyclic composition: more than {limit} nested nodes ({})", .chain.join(" -> "))]
    CyclicComposition {
        limit: usize,
        chain: Vec<&'static str>,
    },
}
