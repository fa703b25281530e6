//! Declarative scene and view graphs.
//!
//! # Conceptual overview
//! An application declares its user interface as a statically typed tree of scenes (windows and
//! their commands) whose leaves contain trees of views. The tree is a cheap description, not the
//! user interface itself: to show it, the tree is *lowered* into descriptors of native objects
//! ([`SceneOutputs`]) that a platform adapter then realizes.
//!
//! ## Node kinds
//! Every node type implements [`Scene`] or [`View`] (or both), and lowering dispatches on the
//! static type of each node:
//!
//! - **Primitive** nodes ([`WindowGroup`], [`Text`], [`Fill`], [`Empty`]) have the body type
//!   [`Never`] and produce outputs directly.
//! - **Composite** nodes only declare a `body`. Lowering computes the body and lowers it in the
//!   node's place, without adding outputs of its own.
//! - [`Tuple`] lowers each of its children with the same inputs and keeps their outputs in order.
//! - [`ModifiedContent`] decorates one child with a modifier, which may rewrite the inputs the
//!   child sees (e.g. override an environment value) and post-process the child's outputs.
//! - [`Conditional`] lowers exactly one of its two branches.
//!
//! ## Inputs and outputs
//! Nodes receive [`SceneInputs`]/[`ViewInputs`] from their parent: the [`EnvironmentValues`], the
//! platform's [`SceneConnection`] and, for views, the proposed bounds. A child sees its parent's
//! inputs unless a modifier explicitly overrides something, and such overrides only apply to the
//! modifier's own subtree.
//!
//! ## Failure
//! A lowering pass either produces complete outputs or fails with a [`LowerError`]. There is no
//! partial result: errors mean the declared tree is wrong. Nesting depth is bounded (see
//! [`DEFAULT_MAX_EXPANSION_DEPTH`]), so a node whose body contains itself fails instead of
//! recursing forever.
//!
//! ## Threads
//! Graph values and environment stores are reference counted without atomics, so a lowering pass
//! stays on the thread that built the tree.

mod binding;
pub mod color;
mod commands;
mod conditional;
pub mod environment;
mod error;
mod graph;
mod inputs;
mod lowering;
mod modifier;
mod outputs;
mod rect;
mod scene;
mod tuple;
mod view;

pub use binding::{Binding, Lens};
pub use color::Color;
pub use commands::{
    CommandAction, CommandItem, CommandMenu, Commands, KeyCode, KeyModifiers, KeyboardShortcut,
};
pub use conditional::{branch, Conditional};
pub use environment::{
    Accessibility, AccessibilityKey, ColorScheme, ColorSchemeKey, EnvironmentKey,
    EnvironmentValues, KeyboardShortcutsEnabledKey, Locale, LocaleKey, ScenePhase, ScenePhaseKey,
    TimeZone, TimeZoneKey,
};
pub use error::{LowerError, LoweringContext};
pub use graph::{Case, Field, GraphValue};
pub use inputs::{SceneConnection, SceneInputs, SessionId, ViewInputs};
pub use lowering::{
    lower_scene, lower_view, Empty, ExpansionTrace, Never, DEFAULT_MAX_EXPANSION_DEPTH,
};
pub use modifier::{
    Background, CommandsModifier, EnvironmentModifier, ModifiedContent, Padding, SceneModifier,
    ViewModifier, WindowStyleModifier,
};
pub use outputs::{NativeView, NativeWindow, SceneOutputs, SceneRole, ViewOutputs, WindowStyle};
pub use rect::Rect;
pub use scene::{Scene, SceneExt, Settings, WindowGroup};
pub use tuple::{tuple, Tuple};
pub use view::{Fill, Text, View, ViewExt};

pub use cgmath;
