//! Declarative applications built from scene and view graphs.
//!
//! An [`App`] declares its scenes; an [`AppGraph`] owns that declaration together with the root
//! environment and the scene phase, and lowers it into [`SceneOutputs`] once a platform has
//! connected a scene session. A [`Host`] drives the graph from lifecycle events and hands every
//! result to a [`PlatformAdapter`].
//!
//! ```
//! use tern::{App, GraphConfig, HeadlessPlatform, Host, LifecycleEvent};
//! use tern::{Rect, SceneConnection, Text, WindowGroup};
//!
//! struct Hello;
//!
//! impl App for Hello {
//!     type Body = WindowGroup<Text>;
//!
//!     fn body(&self) -> Self::Body {
//!         WindowGroup::new("Hello", Text::new("Hello, world"))
//!     }
//! }
//!
//! let mut host = Host::new(Hello, HeadlessPlatform::new(), GraphConfig::default());
//! host.lifecycle_sender()
//!     .send(LifecycleEvent::Connected(SceneConnection::new(Rect::from_size(640., 480.))))
//!     .unwrap();
//! host.poll();
//! assert_eq!(host.platform().windows()[0].window.title, "Hello");
//! ```

mod app;
mod config;
mod error;
mod host;
mod platform;

pub use app::{App, AppGraph, RootScene};
pub use config::GraphConfig;
pub use error::GraphError;
pub use host::{Host, LifecycleEvent, LifecycleSender};
pub use platform::{HeadlessError, HeadlessPlatform, HeadlessWindow, HostDefaults, PlatformAdapter};
pub use tern_core::*;
