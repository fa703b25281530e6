use crate::color::Color;
use crate::environment::{AccessibilityKey, ColorScheme, ColorSchemeKey, EnvironmentKey, LocaleKey};
use crate::error::{LowerError, LoweringContext};
use crate::graph::{Case, GraphValue};
use crate::inputs::ViewInputs;
use crate::lowering::{is_never, lower_view, missing_primitive, Never};
use crate::modifier::{Background, EnvironmentModifier, ModifiedContent, Padding, ViewModifier};
use crate::outputs::{NativeView, ViewOutputs};
use core::any::type_name;

/// Views describe the content of a window: properties and a body made of more views.
///
/// Implementors are cheap descriptions, not actual views. A composite view only implements
/// [`body`](View::body); lowering expands the body in its place and adds nothing of its own.
///
/// Primitive views use [`Never`] as their body, implement `body` with [`Never::body_of`] and
/// override [`make_view`](View::make_view) to produce outputs directly.
///
/// # Panics
/// A body that eventually contains its own view type makes lowering fail once the expansion
/// limit is reached; it does not loop forever.
pub trait View: Sized + 'static {
    type Body: View;

    /// Computes the body of this view.
    fn body(&self) -> Self::Body;

    /// Lowers a view of this type.
    ///
    /// Call [`lower_view`] rather than this method directly, so that the expansion trace is kept.
    fn make_view(view: GraphValue<Self>, inputs: ViewInputs) -> Result<ViewOutputs, LowerError> {
        if is_never::<Self::Body>() {
            return Err(missing_primitive::<Self>(LoweringContext::View));
        }
        log::debug!(
            "expanding view {} into {}",
            type_name::<Self>(),
            type_name::<Self::Body>()
        );
        let body = GraphValue::new(view.value().body());
        lower_view(body, inputs)
    }
}

/// A run of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    content: String,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Text {
        Text {
            content: content.into(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Label color for a color scheme.
fn label_color(scheme: ColorScheme, increase_contrast: bool) -> Color {
    match (scheme, increase_contrast) {
        (ColorScheme::Light, true) => Color::BLACK,
        (ColorScheme::Light, false) => Color::rgb(0.1, 0.1, 0.1),
        (ColorScheme::Dark, true) => Color::WHITE,
        (ColorScheme::Dark, false) => Color::rgb(0.9, 0.9, 0.9),
    }
}

impl View for Text {
    type Body = Never;

    fn body(&self) -> Never {
        Never::body_of::<Self>()
    }

    fn make_view(view: GraphValue<Self>, inputs: ViewInputs) -> Result<ViewOutputs, LowerError> {
        let env = &inputs.environment;
        let color = label_color(
            env.get::<ColorSchemeKey>(),
            env.get::<AccessibilityKey>().increase_contrast,
        );
        Ok(ViewOutputs::view(NativeView::Text {
            content: view.value().content.clone(),
            color,
            locale: env.get::<LocaleKey>(),
            bounds: inputs.bounds,
        }))
    }
}

/// A view that fills its bounds with a color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fill(pub Color);

impl View for Fill {
    type Body = Never;

    fn body(&self) -> Never {
        Never::body_of::<Self>()
    }

    fn make_view(view: GraphValue<Self>, inputs: ViewInputs) -> Result<ViewOutputs, LowerError> {
        Ok(ViewOutputs::view(NativeView::Layer {
            bounds: inputs.bounds,
            background: view.value().0,
            opacity: 1.,
        }))
    }
}

/// An optional view lowers its content if present and nothing otherwise.
impl<V: View> View for Option<V> {
    type Body = Never;

    fn body(&self) -> Never {
        Never::body_of::<Self>()
    }

    fn make_view(view: GraphValue<Self>, inputs: ViewInputs) -> Result<ViewOutputs, LowerError> {
        match view.project_case(Case::new("Some", |option: &Option<V>| option.as_ref())) {
            Some(content) => lower_view(content, inputs),
            None => Ok(ViewOutputs::empty()),
        }
    }
}

/// Modifier methods for views.
pub trait ViewExt: View {
    /// Wraps this view in a modifier.
    fn modifier<M: ViewModifier>(self, modifier: M) -> ModifiedContent<Self, M> {
        ModifiedContent::new(self, modifier)
    }

    /// Sets an environment value for this view and its descendants.
    fn environment<K: EnvironmentKey>(
        self,
        value: K::Value,
    ) -> ModifiedContent<Self, EnvironmentModifier<K>> {
        self.modifier(EnvironmentModifier::new(value))
    }

    fn color_scheme(
        self,
        scheme: ColorScheme,
    ) -> ModifiedContent<Self, EnvironmentModifier<ColorSchemeKey>> {
        self.environment::<ColorSchemeKey>(scheme)
    }

    /// Insets the bounds this view is proposed on all edges.
    fn padding(self, amount: f64) -> ModifiedContent<Self, Padding> {
        self.modifier(Padding(amount))
    }

    /// Places a filled layer behind this view.
    fn background(self, color: Color) -> ModifiedContent<Self, Background> {
        self.modifier(Background(color))
    }
}

impl<V: View> ViewExt for V {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{EnvironmentValues, Locale};
    use crate::inputs::SceneConnection;
    use crate::rect::Rect;

    fn inputs() -> ViewInputs {
        ViewInputs::new(
            EnvironmentValues::new().set::<LocaleKey>(Locale::new("fr_FR")),
            SceneConnection::new(Rect::from_size(100., 50.)),
            Rect::from_size(100., 50.),
        )
    }

    #[test]
    fn text_reads_the_environment() {
        let dark = inputs().with_environment(
            inputs()
                .environment
                .set::<ColorSchemeKey>(ColorScheme::Dark),
        );
        let outputs = lower_view(GraphValue::new(Text::new("Bonjour")), dark).unwrap();
        assert_eq!(
            outputs.views,
            vec![NativeView::Text {
                content: "Bonjour".into(),
                color: Color::rgb(0.9, 0.9, 0.9),
                locale: Locale::new("fr_FR"),
                bounds: Rect::from_size(100., 50.),
            }]
        );
    }

    #[test]
    fn optional_views() {
        let none: Option<Text> = None;
        assert!(lower_view(GraphValue::new(none), inputs())
            .unwrap()
            .is_empty());

        let some = Some(Fill(Color::WHITE));
        let outputs = lower_view(GraphValue::new(some), inputs()).unwrap();
        assert_eq!(outputs.all_views().len(), 1);
    }
}
