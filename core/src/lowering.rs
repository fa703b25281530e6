//! Lowering dispatch.
//!
//! Every node is lowered through [`lower_scene`] or [`lower_view`], which record the node in the
//! expansion trace before handing over to the node kind's own `make_scene`/`make_view`. The trace
//! bounds nesting depth, so a node whose body (directly or indirectly) contains itself fails with
//! [`LowerError::CyclicComposition`] instead of overflowing the stack.

use crate::error::{LowerError, LoweringContext};
use crate::graph::GraphValue;
use crate::inputs::{SceneInputs, ViewInputs};
use crate::outputs::{SceneOutputs, ViewOutputs};
use crate::scene::Scene;
use crate::view::View;
use core::any::type_name;
use core::fmt;
use std::rc::Rc;

/// Default nesting limit.
pub const DEFAULT_MAX_EXPANSION_DEPTH: usize = 256;

struct Frame {
    kind: &'static str,
    parent: Option<Rc<Frame>>,
}

/// The chain of node kinds from the root to the node currently being lowered.
#[derive(Clone)]
pub struct ExpansionTrace {
    limit: usize,
    depth: usize,
    top: Option<Rc<Frame>>,
}

impl ExpansionTrace {
    pub(crate) fn new(limit: usize) -> ExpansionTrace {
        ExpansionTrace {
            limit,
            depth: 0,
            top: None,
        }
    }

    pub(crate) fn with_limit(mut self, limit: usize) -> ExpansionTrace {
        self.limit = limit;
        self
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Node kinds from the root down, outermost first.
    pub fn chain(&self) -> Vec<&'static str> {
        let mut chain = Vec::with_capacity(self.depth);
        let mut cursor = self.top.as_deref();
        while let Some(frame) = cursor {
            chain.push(frame.kind);
            cursor = frame.parent.as_deref();
        }
        chain.reverse();
        chain
    }

    fn enter(&self, kind: &'static str) -> Result<ExpansionTrace, LowerError> {
        let trace = ExpansionTrace {
            limit: self.limit,
            depth: self.depth + 1,
            top: Some(Rc::new(Frame {
                kind,
                parent: self.top.clone(),
            })),
        };
        if trace.depth > self.limit {
            return Err(LowerError::CyclicComposition {
                limit: self.limit,
                chain: trace.chain(),
            });
        }
        Ok(trace)
    }
}

impl fmt::Debug for ExpansionTrace {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ExpansionTrace")
            .field("depth", &self.depth)
            .field("limit", &self.limit)
            .finish()
    }
}

/// Lowers a scene node.
pub fn lower_scene<S: Scene>(
    scene: GraphValue<S>,
    mut inputs: SceneInputs,
) -> Result<SceneOutputs, LowerError> {
    inputs.trace = inputs.trace.enter(type_name::<S>())?;
    log::trace!(
        "lowering scene {} at depth {}",
        type_name::<S>(),
        inputs.trace.depth()
    );
    S::make_scene(scene, inputs)
}

/// Lowers a view node.
pub fn lower_view<V: View>(
    view: GraphValue<V>,
    mut inputs: ViewInputs,
) -> Result<ViewOutputs, LowerError> {
    inputs.trace = inputs.trace.enter(type_name::<V>())?;
    log::trace!(
        "lowering view {} at depth {}",
        type_name::<V>(),
        inputs.trace.depth()
    );
    V::make_view(view, inputs)
}

/// Returns true if `B` is [`Never`], i.e. the node has no body to expand.
pub(crate) fn is_never<B: 'static>() -> bool {
    core::any::TypeId::of::<B>() == core::any::TypeId::of::<Never>()
}

/// The error for a primitive node that fell through to composite expansion.
pub(crate) fn missing_primitive<T>(context: LoweringContext) -> LowerError {
    LowerError::ContractViolation {
        kind: type_name::<T>(),
        context,
        reason: "node has no body but does not lower itself",
    }
}

/// The body type of primitive nodes, which have no body.
///
/// It has no values, so a `Never` node can never be constructed or lowered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Never {}

impl Never {
    /// Traps: `T` is a primitive node and has no body.
    ///
    /// Primitive nodes implement `body` with this; it is never called by lowering.
    pub fn body_of<T>() -> Never {
        panic!(
            "{}::body should not be called; primitive nodes lower themselves",
            type_name::<T>()
        )
    }
}

impl Scene for Never {
    type Body = Never;

    fn body(&self) -> Never {
        match *self {}
    }

    fn make_scene(scene: GraphValue<Self>, _: SceneInputs) -> Result<SceneOutputs, LowerError> {
        match *scene.value() {}
    }
}

impl View for Never {
    type Body = Never;

    fn body(&self) -> Never {
        match *self {}
    }

    fn make_view(view: GraphValue<Self>, _: ViewInputs) -> Result<ViewOutputs, LowerError> {
        match *view.value() {}
    }
}

/// A node that produces nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Empty;

impl Scene for Empty {
    type Body = Never;

    fn body(&self) -> Never {
        Never::body_of::<Self>()
    }

    fn make_scene(_: GraphValue<Self>, _: SceneInputs) -> Result<SceneOutputs, LowerError> {
        Ok(SceneOutputs::empty())
    }
}

impl View for Empty {
    type Body = Never;

    fn body(&self) -> Never {
        Never::body_of::<Self>()
    }

    fn make_view(_: GraphValue<Self>, _: ViewInputs) -> Result<ViewOutputs, LowerError> {
        Ok(ViewOutputs::empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::EnvironmentValues;
    use crate::inputs::SceneConnection;
    use crate::rect::Rect;
    use crate::view::Text;

    fn inputs(limit: usize) -> ViewInputs {
        ViewInputs::new(
            EnvironmentValues::new(),
            SceneConnection::new(Rect::from_size(320., 240.)),
            Rect::from_size(320., 240.),
        )
        .with_max_expansion_depth(limit)
    }

    #[derive(Debug)]
    struct Loop;

    impl View for Loop {
        type Body = Loop;
        fn body(&self) -> Loop {
            Loop
        }
    }

    #[derive(Debug)]
    struct Ping;
    #[derive(Debug)]
    struct Pong;

    impl View for Ping {
        type Body = Pong;
        fn body(&self) -> Pong {
            Pong
        }
    }

    impl View for Pong {
        type Body = Ping;
        fn body(&self) -> Ping {
            Ping
        }
    }

    #[derive(Debug)]
    struct Forgetful;

    impl View for Forgetful {
        type Body = Never;
        fn body(&self) -> Never {
            Never::body_of::<Self>()
        }
    }

    #[derive(Debug)]
    struct Greeting;

    impl View for Greeting {
        type Body = Text;
        fn body(&self) -> Text {
            Text::new("hello")
        }
    }

    #[test]
    fn self_referential_body_is_cut_off() {
        let err = lower_view(GraphValue::new(Loop), inputs(16)).unwrap_err();
        match err {
            LowerError::CyclicComposition { limit, chain } => {
                assert_eq!(limit, 16);
                assert_eq!(chain.len(), 17, "chain should include the node past the limit");
                assert!(chain.iter().all(|kind| kind.ends_with("Loop")));
            }
            other => panic!("expected a cyclic composition error, got {:?}", other),
        }
    }

    #[test]
    fn mutual_recursion_reports_both_kinds() {
        let err = lower_view(GraphValue::new(Ping), inputs(5)).unwrap_err();
        match err {
            LowerError::CyclicComposition { chain, .. } => {
                assert!(chain[0].ends_with("Ping"));
                assert!(chain[1].ends_with("Pong"));
                assert!(chain[2].ends_with("Ping"));
            }
            other => panic!("expected a cyclic composition error, got {:?}", other),
        }
    }

    #[test]
    fn composites_expand_into_their_body() {
        let composite = lower_view(GraphValue::new(Greeting), inputs(8)).unwrap();
        let direct = lower_view(GraphValue::new(Text::new("hello")), inputs(8)).unwrap();
        assert_eq!(composite, direct, "a composite adds no outputs of its own");
    }

    #[test]
    fn primitive_without_lowering_is_a_contract_violation() {
        let err = lower_view(GraphValue::new(Forgetful), inputs(8)).unwrap_err();
        match err {
            LowerError::ContractViolation { kind, context, .. } => {
                assert!(kind.ends_with("Forgetful"));
                assert_eq!(context, LoweringContext::View);
            }
            other => panic!("expected a contract violation, got {:?}", other),
        }
    }

    #[test]
    #[should_panic(expected = "should not be called")]
    fn primitive_body_traps() {
        let _ = View::body(&Empty);
    }

    #[test]
    fn depth_within_limit_is_fine() {
        let outputs = lower_view(GraphValue::new(Greeting), inputs(2)).unwrap();
        assert_eq!(outputs.all_views().len(), 1);
    }
}
