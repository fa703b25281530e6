use crate::commands::Commands;
use crate::environment::{ColorScheme, ColorSchemeKey, EnvironmentKey};
use crate::error::{LowerError, LoweringContext};
use crate::graph::{Field, GraphValue};
use crate::inputs::SceneInputs;
use crate::lowering::{is_never, lower_scene, lower_view, missing_primitive, Never};
use crate::modifier::{
    CommandsModifier, EnvironmentModifier, ModifiedContent, SceneModifier, WindowStyleModifier,
};
use crate::outputs::{NativeWindow, SceneOutputs, SceneRole, WindowStyle};
use crate::view::View;
use cgmath::Point2;
use core::any::type_name;

/// Scenes describe the windows of an application.
///
/// Like views, a composite scene only implements [`body`](Scene::body), while primitive scenes
/// use [`Never`] as their body and override [`make_scene`](Scene::make_scene).
pub trait Scene: Sized + 'static {
    type Body: Scene;

    /// Computes the body of this scene.
    fn body(&self) -> Self::Body;

    /// Lowers a scene of this type.
    ///
    /// Call [`lower_scene`] rather than this method directly, so that the expansion trace is kept.
    fn make_scene(scene: GraphValue<Self>, inputs: SceneInputs) -> Result<SceneOutputs, LowerError> {
        if is_never::<Self::Body>() {
            return Err(missing_primitive::<Self>(LoweringContext::Scene));
        }
        log::debug!(
            "expanding scene {} into {}",
            type_name::<Self>(),
            type_name::<Self::Body>()
        );
        let body = GraphValue::new(scene.value().body());
        lower_scene(body, inputs)
    }
}

/// Lowers window content into a window for the connection the inputs carry.
fn make_window<C: View>(
    content: GraphValue<C>,
    inputs: &SceneInputs,
    id: Option<String>,
    title: String,
    role: SceneRole,
) -> Result<NativeWindow, LowerError> {
    let frame = inputs.connection.frame;
    let content = lower_view(
        content,
        inputs.view_inputs(frame.with_origin(Point2::new(0., 0.))),
    )?;
    Ok(NativeWindow {
        id,
        title,
        role,
        frame,
        color_scheme: inputs.environment.get::<ColorSchemeKey>(),
        style: WindowStyle::Automatic,
        content,
    })
}

/// A scene presenting its content in a window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowGroup<Content> {
    id: Option<String>,
    title: String,
    content: Content,
}

impl<C: View> WindowGroup<C> {
    pub fn new(title: impl Into<String>, content: C) -> WindowGroup<C> {
        WindowGroup {
            id: None,
            title: title.into(),
            content,
        }
    }

    /// Sets an identifier that platforms use to tell windows apart across runs.
    pub fn id(mut self, id: impl Into<String>) -> WindowGroup<C> {
        self.id = Some(id.into());
        self
    }
}

impl<C: View> Scene for WindowGroup<C> {
    type Body = Never;

    fn body(&self) -> Never {
        Never::body_of::<Self>()
    }

    fn make_scene(scene: GraphValue<Self>, inputs: SceneInputs) -> Result<SceneOutputs, LowerError> {
        let group = scene.value();
        let window = make_window(
            scene.project(Field::new("content", |group: &Self| &group.content)),
            &inputs,
            group.id.clone(),
            group.title.clone(),
            SceneRole::Main,
        )?;
        Ok(SceneOutputs::window(window))
    }
}

/// A scene presenting the application's settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings<Content> {
    content: Content,
}

impl<C: View> Settings<C> {
    pub fn new(content: C) -> Settings<C> {
        Settings { content }
    }
}

impl<C: View> Scene for Settings<C> {
    type Body = Never;

    fn body(&self) -> Never {
        Never::body_of::<Self>()
    }

    fn make_scene(scene: GraphValue<Self>, inputs: SceneInputs) -> Result<SceneOutputs, LowerError> {
        let window = make_window(
            scene.project(Field::new("content", |settings: &Self| &settings.content)),
            &inputs,
            Some("settings".into()),
            "Settings".into(),
            SceneRole::Settings,
        )?;
        Ok(SceneOutputs::window(window))
    }
}

/// Modifier methods for scenes.
pub trait SceneExt: Scene {
    /// Wraps this scene in a modifier.
    fn modifier<M: SceneModifier>(self, modifier: M) -> ModifiedContent<Self, M> {
        ModifiedContent::new(self, modifier)
    }

    /// Sets an environment value for this scene and everything in it.
    fn environment<K: EnvironmentKey>(
        self,
        value: K::Value,
    ) -> ModifiedContent<Self, EnvironmentModifier<K>> {
        self.modifier(EnvironmentModifier::new(value))
    }

    fn preferred_color_scheme(
        self,
        scheme: ColorScheme,
    ) -> ModifiedContent<Self, EnvironmentModifier<ColorSchemeKey>> {
        self.environment::<ColorSchemeKey>(scheme)
    }

    /// Sets the style of windows in this scene that do not have one yet.
    fn window_style(self, style: WindowStyle) -> ModifiedContent<Self, WindowStyleModifier> {
        self.modifier(WindowStyleModifier(style))
    }

    /// Adds command menus to this scene.
    fn commands<C: Commands>(self, commands: C) -> ModifiedContent<Self, CommandsModifier<C>> {
        self.modifier(CommandsModifier(commands))
    }
}

impl<S: Scene> SceneExt for S {}
