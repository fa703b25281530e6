use crate::app::{App, AppGraph};
use crate::config::GraphConfig;
use crate::error::GraphError;
use crate::platform::PlatformAdapter;
use crossbeam::channel::{self, Receiver, SendError, Sender};
use tern_core::{ColorScheme, ColorSchemeKey, Locale, LocaleKey, SceneConnection, ScenePhase};

/// Something the platform reports about the application's scenes.
#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleEvent {
    /// A scene session is ready to host windows.
    Connected(SceneConnection),
    Disconnected,
    PhaseChanged(ScenePhase),
    ColorSchemeChanged(ColorScheme),
    LocaleChanged(Locale),
}

/// Sends lifecycle events to a [`Host`]. May be used from any thread.
#[derive(Debug, Clone)]
pub struct LifecycleSender(Sender<LifecycleEvent>);

impl LifecycleSender {
    pub fn send(&self, event: LifecycleEvent) -> Result<(), SendError<LifecycleEvent>> {
        self.0.send(event)
    }
}

/// Connects an application graph to a platform.
///
/// The platform reports lifecycle events through a [`LifecycleSender`]; each [`poll`](Host::poll)
/// applies the queued events and, if any of them changed what the tree would lower to, lowers the
/// whole tree again and attaches the result.
pub struct Host<A: App, P: PlatformAdapter> {
    graph: AppGraph<A>,
    platform: P,
    event_send: Sender<LifecycleEvent>,
    event_recv: Receiver<LifecycleEvent>,
}

impl<A: App, P: PlatformAdapter> Host<A, P> {
    /// Creates a new Host.
    ///
    /// The graph is initialized from the platform's defaults, but nothing is lowered until the
    /// platform connects a scene session and the host is polled.
    pub fn new(app: A, platform: P, config: GraphConfig) -> Host<A, P> {
        let (event_send, event_recv) = channel::unbounded();
        let graph = AppGraph::new(app, config, &platform.host_defaults());

        Host {
            graph,
            platform,
            event_send,
            event_recv,
        }
    }

    pub fn lifecycle_sender(&self) -> LifecycleSender {
        LifecycleSender(self.event_send.clone())
    }

    pub fn graph(&self) -> &AppGraph<A> {
        &self.graph
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    /// Receives all events from the event queue and updates the graph accordingly.
    ///
    /// # Panics
    /// Panics if lowering or attaching fails. Such failures are errors in the declared tree.
    pub fn poll(&mut self) {
        if let Err(err) = self.try_poll() {
            log::error!("{}", err);
            panic!("failed to update the scene graph: {}", err);
        }
    }

    /// Like [`poll`](Host::poll), but returns errors instead of panicking.
    pub fn try_poll(&mut self) -> Result<(), GraphError> {
        // the whole queue is applied even if one event fails
        let events: Vec<_> = self.event_recv.try_iter().collect();
        let mut dirty = false;
        let mut failure = None;
        for event in events {
            match self.recv_event(event) {
                Ok(changed) => dirty |= changed,
                Err(err) => {
                    log::error!("{}", err);
                    failure.get_or_insert(err);
                }
            }
        }

        let rendered = if dirty && self.graph.is_attached() {
            self.render()
        } else {
            Ok(())
        };
        match failure {
            Some(err) => Err(err),
            None => rendered,
        }
    }

    /// Lowers the tree and attaches it now.
    ///
    /// # Panics
    /// Panics if no scene session is connected, or if lowering or attaching fails.
    pub fn run(&mut self) {
        if let Err(err) = self.try_run() {
            log::error!("{}", err);
            panic!("failed to run the scene graph: {}", err);
        }
    }

    pub fn try_run(&mut self) -> Result<(), GraphError> {
        self.render()
    }

    /// Applies one event. Returns whether the tree needs to be lowered again.
    fn recv_event(&mut self, event: LifecycleEvent) -> Result<bool, GraphError> {
        log::trace!("lifecycle event {:?}", event);
        match event {
            LifecycleEvent::Connected(connection) => {
                self.graph.connect(connection);
                Ok(true)
            }
            LifecycleEvent::Disconnected => {
                if self.graph.disconnect().is_none() {
                    log::warn!("ignoring disconnect: no scene session is connected");
                    return Ok(false);
                }
                self.platform
                    .detach()
                    .map_err(|err| GraphError::Platform(err.to_string()))?;
                Ok(false)
            }
            LifecycleEvent::PhaseChanged(phase) => Ok(self.graph.transition(phase)),
            LifecycleEvent::ColorSchemeChanged(scheme) => {
                if self.graph.environment().get::<ColorSchemeKey>() == scheme {
                    return Ok(false);
                }
                self.graph
                    .update_environment(|env| env.set::<ColorSchemeKey>(scheme));
                Ok(true)
            }
            LifecycleEvent::LocaleChanged(locale) => {
                if self.graph.environment().get::<LocaleKey>() == locale {
                    return Ok(false);
                }
                self.graph
                    .update_environment(|env| env.set::<LocaleKey>(locale));
                Ok(true)
            }
        }
    }

    fn render(&mut self) -> Result<(), GraphError> {
        let outputs = self.graph.run()?;
        if let Err(err) = self.platform.attach(outputs) {
            self.graph.discard_outputs();
            return Err(GraphError::Platform(err.to_string()));
        }
        log::info!("attached outputs of pass {}", self.graph.passes());
        Ok(())
    }
}

impl<A: App, P: PlatformAdapter> Drop for Host<A, P> {
    fn drop(&mut self) {
        if !self.graph.is_running() {
            return;
        }
        if let Err(err) = self.platform.detach() {
            log::error!("failed to detach on teardown: {}", err);
        }
    }
}
