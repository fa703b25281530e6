//! The root of a running application's declared tree.

use crate::config::GraphConfig;
use crate::error::GraphError;
use crate::platform::HostDefaults;
use tern_core::{
    lower_scene, EnvironmentValues, GraphValue, Scene, SceneConnection, SceneInputs,
    SceneOutputs, ScenePhase, ScenePhaseKey,
};

/// An application: the top-level declaration of its scenes.
pub trait App: 'static {
    type Body: Scene;

    fn body(&self) -> Self::Body;
}

/// The composite node at the root of every graph, expanding to the application's body.
pub struct RootScene<A> {
    app: A,
}

impl<A: App> RootScene<A> {
    pub fn new(app: A) -> RootScene<A> {
        RootScene { app }
    }

    pub fn app(&self) -> &A {
        &self.app
    }
}

impl<A: App> Scene for RootScene<A> {
    type Body = A::Body;

    fn body(&self) -> A::Body {
        self.app.body()
    }
}

/// Owns the declared tree of an application along with its environment and scene phase.
///
/// Nothing is lowered on construction. Once a platform supplies a [`SceneConnection`], each
/// [`run`](AppGraph::run) lowers the whole tree from the root and keeps the outputs.
pub struct AppGraph<A: App> {
    root: GraphValue<RootScene<A>>,
    config: GraphConfig,
    environment: EnvironmentValues,
    phase: ScenePhase,
    connection: Option<SceneConnection>,
    outputs: Option<SceneOutputs>,
    passes: usize,
}

impl<A: App> AppGraph<A> {
    pub fn new(app: A, config: GraphConfig, defaults: &HostDefaults) -> AppGraph<A> {
        let phase = ScenePhase::default();
        let environment = defaults
            .environment(&config)
            .set::<ScenePhaseKey>(phase);
        AppGraph {
            root: GraphValue::new(RootScene::new(app)),
            config,
            environment,
            phase,
            connection: None,
            outputs: None,
            passes: 0,
        }
    }

    /// Supplies the attachment point lowering needs.
    pub fn connect(&mut self, connection: SceneConnection) {
        log::info!("scene session {} connected", connection.session);
        self.connection = Some(connection);
    }

    /// Drops the connection and the outputs produced for it.
    pub fn disconnect(&mut self) -> Option<SceneConnection> {
        self.outputs = None;
        self.connection.take()
    }

    pub fn is_attached(&self) -> bool {
        self.connection.is_some()
    }

    /// Lowers the whole tree with the current environment.
    ///
    /// Previous outputs are discarded. On failure nothing is kept.
    pub fn run(&mut self) -> Result<&SceneOutputs, GraphError> {
        let connection = self.connection.clone().ok_or(GraphError::NotAttached)?;
        self.outputs = None;

        let inputs = SceneInputs::new(self.environment.snapshot(), connection)
            .with_max_expansion_depth(self.config.max_expansion_depth);
        let outputs = lower_scene(self.root.clone(), inputs)?;
        self.passes += 1;
        log::info!(
            "lowering pass {} produced {} windows in phase {:?}",
            self.passes,
            outputs.all_windows().len(),
            self.phase
        );
        Ok(self.outputs.get_or_insert(outputs))
    }

    /// Forgets the outputs of the last pass, e.g. because the platform could not realize them.
    pub fn discard_outputs(&mut self) {
        self.outputs = None;
    }

    /// Moves to `phase`. Returns false if the graph already was in that phase.
    pub fn transition(&mut self, phase: ScenePhase) -> bool {
        if phase == self.phase {
            return false;
        }
        log::debug!("scene phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        self.environment = self.environment.set::<ScenePhaseKey>(phase);
        true
    }

    /// Replaces the root environment with `f` applied to it.
    pub fn update_environment<F>(&mut self, f: F)
    where
        F: FnOnce(&EnvironmentValues) -> EnvironmentValues,
    {
        self.environment = f(&self.environment);
    }

    pub fn phase(&self) -> ScenePhase {
        self.phase
    }

    pub fn environment(&self) -> &EnvironmentValues {
        &self.environment
    }

    /// Outputs of the last successful pass, unless disconnected since.
    pub fn outputs(&self) -> Option<&SceneOutputs> {
        self.outputs.as_ref()
    }

    /// True if a pass succeeded and its outputs are still current.
    pub fn is_running(&self) -> bool {
        self.outputs.is_some()
    }

    /// Number of successful lowering passes.
    pub fn passes(&self) -> usize {
        self.passes
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn app(&self) -> &A {
        self.root.value().app()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use tern_core::{Rect, Text, WindowGroup};

    tern_core::environment_key! {
        MarkerKey: Option<Rc<()>> = None;
    }

    struct Hello;

    impl App for Hello {
        type Body = WindowGroup<Text>;

        fn body(&self) -> Self::Body {
            WindowGroup::new("Hello", Text::new("Hello, world"))
        }
    }

    fn graph() -> AppGraph<Hello> {
        AppGraph::new(Hello, GraphConfig::default(), &HostDefaults::default())
    }

    #[test]
    fn construction_does_not_lower() {
        let graph = graph();
        assert!(!graph.is_running());
        assert_eq!(graph.passes(), 0);
        assert_eq!(graph.phase(), ScenePhase::Inactive);
        assert_eq!(graph.environment().get::<ScenePhaseKey>(), ScenePhase::Inactive);
    }

    #[test]
    fn run_requires_a_connection() {
        let mut graph = graph();
        match graph.run() {
            Err(GraphError::NotAttached) => (),
            other => panic!("expected NotAttached, got {:?}", other.map(|_| ())),
        }
        assert!(graph.outputs().is_none(), "no partial outputs");
    }

    #[test]
    fn transitions() {
        let mut graph = graph();
        assert!(graph.transition(ScenePhase::Active));
        assert!(!graph.transition(ScenePhase::Active));
        assert!(graph.transition(ScenePhase::Background));
        assert!(graph.transition(ScenePhase::Active));
        assert_eq!(graph.environment().get::<ScenePhaseKey>(), ScenePhase::Active);
    }

    #[test]
    fn disconnect_discards_outputs() {
        let mut graph = graph();
        graph.connect(SceneConnection::new(Rect::from_size(800., 600.)));
        assert_eq!(graph.run().unwrap().all_windows().len(), 1);
        assert!(graph.is_running());

        assert!(graph.disconnect().is_some());
        assert!(!graph.is_running());
        assert!(graph.disconnect().is_none());
    }

    #[test]
    fn long_running_graphs_do_not_accumulate() {
        let shadowed = Rc::new(());
        let kept = Rc::new(());
        let mut graph = graph();
        graph.update_environment(|env| env.set::<MarkerKey>(Some(Rc::clone(&shadowed))));
        graph.update_environment(|env| env.set::<MarkerKey>(Some(Rc::clone(&kept))));
        assert_eq!(Rc::strong_count(&shadowed), 1);

        for _ in 0..50_000 {
            graph.transition(ScenePhase::Active);
            graph.transition(ScenePhase::Background);
        }
        // color scheme, locale, accessibility, scene phase and the marker
        assert_eq!(graph.environment().set_keys().len(), 5);
        assert_eq!(Rc::strong_count(&kept), 2);

        drop(graph);
        assert_eq!(Rc::strong_count(&kept), 1);
    }

    #[test]
    fn discarded_outputs_stop_running() {
        let mut graph = graph();
        graph.connect(SceneConnection::new(Rect::from_size(800., 600.)));
        graph.run().unwrap();
        graph.discard_outputs();
        assert!(!graph.is_running());
        assert!(graph.outputs().is_none());
        assert!(graph.is_attached(), "the connection is kept");
    }
}
