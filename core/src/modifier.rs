//! Modifiers: single-child decoration.
//!
//! A modifier may rewrite the inputs before its content is lowered and post-process the content's
//! outputs afterwards. Both steps are pure; a modifier keeps no state between passes.

use crate::color::Color;
use crate::commands::Commands;
use crate::environment::EnvironmentKey;
use crate::error::LowerError;
use crate::graph::{Field, GraphValue};
use crate::inputs::{SceneInputs, ViewInputs};
use crate::lowering::{lower_scene, lower_view, Never};
use crate::outputs::{NativeView, SceneOutputs, ViewOutputs, WindowStyle};
use crate::scene::Scene;
use crate::view::View;
use core::any::type_name;
use core::fmt;
use core::marker::PhantomData;

/// Content decorated by a modifier.
#[derive(Debug, Clone, PartialEq)]
pub struct ModifiedContent<Content, Modifier> {
    pub content: Content,
    pub modifier: Modifier,
}

impl<C, M> ModifiedContent<C, M> {
    pub fn new(content: C, modifier: M) -> ModifiedContent<C, M> {
        ModifiedContent { content, modifier }
    }
}

/// A modifier applicable to scenes.
pub trait SceneModifier: 'static {
    /// Rewrites the inputs the content will be lowered with.
    fn transform_inputs(&self, inputs: SceneInputs) -> SceneInputs {
        inputs
    }

    /// Post-processes the content's outputs. `inputs` are the inputs the modifier itself received.
    fn transform_outputs(&self, inputs: &SceneInputs, outputs: SceneOutputs) -> SceneOutputs {
        let _ = inputs;
        outputs
    }
}

/// A modifier applicable to views.
pub trait ViewModifier: 'static {
    fn transform_inputs(&self, inputs: ViewInputs) -> ViewInputs {
        inputs
    }

    fn transform_outputs(&self, inputs: &ViewInputs, outputs: ViewOutputs) -> ViewOutputs {
        let _ = inputs;
        outputs
    }
}

impl<C: Scene, M: SceneModifier> Scene for ModifiedContent<C, M> {
    type Body = Never;

    fn body(&self) -> Never {
        Never::body_of::<Self>()
    }

    fn make_scene(scene: GraphValue<Self>, inputs: SceneInputs) -> Result<SceneOutputs, LowerError> {
        let modifier = &scene.value().modifier;
        let content_inputs = modifier.transform_inputs(inputs.clone());
        let content = scene.project(Field::new("content", |modified: &Self| &modified.content));
        let outputs = lower_scene(content, content_inputs)?;
        Ok(modifier.transform_outputs(&inputs, outputs))
    }
}

impl<C: View, M: ViewModifier> View for ModifiedContent<C, M> {
    type Body = Never;

    fn body(&self) -> Never {
        Never::body_of::<Self>()
    }

    fn make_view(view: GraphValue<Self>, inputs: ViewInputs) -> Result<ViewOutputs, LowerError> {
        let modifier = &view.value().modifier;
        let content_inputs = modifier.transform_inputs(inputs.clone());
        let content = view.project(Field::new("content", |modified: &Self| &modified.content));
        let outputs = lower_view(content, content_inputs)?;
        Ok(modifier.transform_outputs(&inputs, outputs))
    }
}

/// Overrides one environment value for the modified content.
pub struct EnvironmentModifier<K: EnvironmentKey> {
    value: K::Value,
    _key: PhantomData<K>,
}

impl<K: EnvironmentKey> EnvironmentModifier<K> {
    pub fn new(value: K::Value) -> EnvironmentModifier<K> {
        EnvironmentModifier {
            value,
            _key: PhantomData,
        }
    }
}

impl<K: EnvironmentKey> Clone for EnvironmentModifier<K> {
    fn clone(&self) -> Self {
        EnvironmentModifier::new(self.value.clone())
    }
}

impl<K: EnvironmentKey> fmt::Debug for EnvironmentModifier<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "EnvironmentModifier<{}>", type_name::<K>())
    }
}

impl<K: EnvironmentKey> SceneModifier for EnvironmentModifier<K> {
    fn transform_inputs(&self, inputs: SceneInputs) -> SceneInputs {
        log::debug!("overriding {} for scene content", type_name::<K>());
        let environment = inputs.environment.set::<K>(self.value.clone());
        inputs.with_environment(environment)
    }
}

impl<K: EnvironmentKey> ViewModifier for EnvironmentModifier<K> {
    fn transform_inputs(&self, inputs: ViewInputs) -> ViewInputs {
        log::debug!("overriding {} for view content", type_name::<K>());
        let environment = inputs.environment.set::<K>(self.value.clone());
        inputs.with_environment(environment)
    }
}

/// Sets the style of produced windows.
///
/// Windows that already have a style other than [`WindowStyle::Automatic`] keep it, so the
/// innermost style modifier wins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowStyleModifier(pub WindowStyle);

impl SceneModifier for WindowStyleModifier {
    fn transform_outputs(&self, _: &SceneInputs, mut outputs: SceneOutputs) -> SceneOutputs {
        let style = self.0;
        outputs.for_each_window_mut(|window| {
            if window.style == WindowStyle::Automatic {
                window.style = style;
            }
        });
        outputs
    }
}

/// Appends command menus to the outputs of the modified scene.
#[derive(Debug, Clone)]
pub struct CommandsModifier<C>(pub C);

impl<C: Commands> SceneModifier for CommandsModifier<C> {
    fn transform_outputs(&self, inputs: &SceneInputs, mut outputs: SceneOutputs) -> SceneOutputs {
        outputs.menus.extend(self.0.menus(&inputs.environment));
        outputs
    }
}

/// Insets the bounds proposed to the content on all edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding(pub f64);

impl ViewModifier for Padding {
    fn transform_inputs(&self, inputs: ViewInputs) -> ViewInputs {
        let bounds = inputs.bounds.inset(self.0, self.0);
        inputs.with_bounds(bounds)
    }
}

/// Puts a filled layer behind the content, covering the modifier's own bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Background(pub Color);

impl ViewModifier for Background {
    fn transform_outputs(&self, inputs: &ViewInputs, outputs: ViewOutputs) -> ViewOutputs {
        ViewOutputs {
            views: vec![NativeView::Layer {
                bounds: inputs.bounds,
                background: self.0,
                opacity: 1.,
            }],
            children: vec![outputs],
        }
    }
}
