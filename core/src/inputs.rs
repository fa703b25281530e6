//! What a node receives when it is lowered.
//!
//! Children are handed their parent's inputs unchanged unless a modifier explicitly rewrites them.

use crate::environment::EnvironmentValues;
use crate::lowering::{ExpansionTrace, DEFAULT_MAX_EXPANSION_DEPTH};
use crate::rect::Rect;
use core::fmt;
use uuid::Uuid;

/// Identifies one connection between the application and a platform scene session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> SessionId {
        SessionId(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        SessionId::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The attachment point a platform adapter supplies once it can host windows.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConnection {
    pub session: SessionId,

    /// Frame available to the application's windows, in points.
    pub frame: Rect,

    /// Backing scale factor (pixels per point).
    pub scale_factor: f64,
}

impl SceneConnection {
    pub fn new(frame: Rect) -> SceneConnection {
        SceneConnection {
            session: SessionId::new(),
            frame,
            scale_factor: 1.,
        }
    }

    pub fn with_scale_factor(mut self, scale_factor: f64) -> SceneConnection {
        self.scale_factor = scale_factor;
        self
    }
}

/// Inputs for lowering a scene.
#[derive(Debug, Clone)]
pub struct SceneInputs {
    pub environment: EnvironmentValues,
    pub connection: SceneConnection,
    pub(crate) trace: ExpansionTrace,
}

impl SceneInputs {
    pub fn new(environment: EnvironmentValues, connection: SceneConnection) -> SceneInputs {
        SceneInputs {
            environment,
            connection,
            trace: ExpansionTrace::new(DEFAULT_MAX_EXPANSION_DEPTH),
        }
    }

    /// Sets the nesting limit past which lowering fails with a cyclic composition error.
    pub fn with_max_expansion_depth(mut self, limit: usize) -> SceneInputs {
        self.trace = self.trace.with_limit(limit);
        self
    }

    /// Returns these inputs with a different environment.
    pub fn with_environment(mut self, environment: EnvironmentValues) -> SceneInputs {
        self.environment = environment;
        self
    }

    /// Derives the inputs for a window's content.
    pub fn view_inputs(&self, bounds: Rect) -> ViewInputs {
        ViewInputs {
            environment: self.environment.clone(),
            connection: self.connection.clone(),
            bounds,
            trace: self.trace.clone(),
        }
    }

    /// Number of nodes between the root and the node receiving these inputs.
    pub fn depth(&self) -> usize {
        self.trace.depth()
    }

    pub fn trace(&self) -> &ExpansionTrace {
        &self.trace
    }
}

/// The trace is diagnostic and does not take part in comparisons.
impl PartialEq for SceneInputs {
    fn eq(&self, other: &SceneInputs) -> bool {
        self.environment == other.environment && self.connection == other.connection
    }
}

/// Inputs for lowering a view.
#[derive(Debug, Clone)]
pub struct ViewInputs {
    pub environment: EnvironmentValues,
    pub connection: SceneConnection,

    /// Bounds proposed by the container, in window coordinates.
    pub bounds: Rect,
    pub(crate) trace: ExpansionTrace,
}

impl ViewInputs {
    pub fn new(
        environment: EnvironmentValues,
        connection: SceneConnection,
        bounds: Rect,
    ) -> ViewInputs {
        ViewInputs {
            environment,
            connection,
            bounds,
            trace: ExpansionTrace::new(DEFAULT_MAX_EXPANSION_DEPTH),
        }
    }

    pub fn with_max_expansion_depth(mut self, limit: usize) -> ViewInputs {
        self.trace = self.trace.with_limit(limit);
        self
    }

    pub fn with_environment(mut self, environment: EnvironmentValues) -> ViewInputs {
        self.environment = environment;
        self
    }

    pub fn with_bounds(mut self, bounds: Rect) -> ViewInputs {
        self.bounds = bounds;
        self
    }

    pub fn depth(&self) -> usize {
        self.trace.depth()
    }

    pub fn trace(&self) -> &ExpansionTrace {
        &self.trace
    }
}

impl PartialEq for ViewInputs {
    fn eq(&self, other: &ViewInputs) -> bool {
        self.environment == other.environment
            && self.connection == other.connection
            && self.bounds == other.bounds
    }
}
