//! Branch selection.

use crate::error::LowerError;
use crate::graph::{Case, GraphValue};
use crate::inputs::{SceneInputs, ViewInputs};
use crate::lowering::{lower_scene, lower_view, Never};
use crate::outputs::{SceneOutputs, ViewOutputs};
use crate::scene::Scene;
use crate::view::View;

/// One of two statically typed branches, chosen when the node is built.
///
/// Only the chosen branch is lowered.
#[derive(Debug, Clone, PartialEq)]
pub enum Conditional<T, F> {
    First(T),
    Second(F),
}

/// Picks `then` if `condition` holds and `otherwise` if not.
pub fn branch<T, F>(condition: bool, then: T, otherwise: F) -> Conditional<T, F> {
    if condition {
        Conditional::First(then)
    } else {
        Conditional::Second(otherwise)
    }
}

impl<T, F> Conditional<T, F> {
    pub fn first(value: T) -> Conditional<T, F> {
        Conditional::First(value)
    }

    pub fn second(value: F) -> Conditional<T, F> {
        Conditional::Second(value)
    }
}

impl<T: 'static, F: 'static> Conditional<T, F> {
    pub fn is_first(&self) -> bool {
        match self {
            Conditional::First(_) => true,
            Conditional::Second(_) => false,
        }
    }

    fn first_case() -> Case<Self, T> {
        Case::new("First", |conditional: &Self| match conditional {
            Conditional::First(first) => Some(first),
            Conditional::Second(_) => None,
        })
    }

    fn second_case() -> Case<Self, F> {
        Case::new("Second", |conditional: &Self| match conditional {
            Conditional::First(_) => None,
            Conditional::Second(second) => Some(second),
        })
    }
}

impl<T: Scene, F: Scene> Scene for Conditional<T, F> {
    type Body = Never;

    fn body(&self) -> Never {
        Never::body_of::<Self>()
    }

    fn make_scene(scene: GraphValue<Self>, inputs: SceneInputs) -> Result<SceneOutputs, LowerError> {
        if let Some(first) = scene.project_case(Self::first_case()) {
            return lower_scene(first, inputs);
        }
        match scene.project_case(Self::second_case()) {
            Some(second) => lower_scene(second, inputs),
            None => unreachable!("a conditional is always one of its two cases"),
        }
    }
}

impl<T: View, F: View> View for Conditional<T, F> {
    type Body = Never;

    fn body(&self) -> Never {
        Never::body_of::<Self>()
    }

    fn make_view(view: GraphValue<Self>, inputs: ViewInputs) -> Result<ViewOutputs, LowerError> {
        if let Some(first) = view.project_case(Self::first_case()) {
            return lower_view(first, inputs);
        }
        match view.project_case(Self::second_case()) {
            Some(second) => lower_view(second, inputs),
            None => unreachable!("a conditional is always one of its two cases"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::EnvironmentValues;
    use crate::inputs::SceneConnection;
    use crate::rect::Rect;
    use crate::tuple::tuple;
    use crate::view::Text;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Counts how often it is lowered.
    #[derive(Debug, Clone)]
    struct Probe(Rc<Cell<usize>>);

    impl View for Probe {
        type Body = Never;

        fn body(&self) -> Never {
            Never::body_of::<Self>()
        }

        fn make_view(view: GraphValue<Self>, _: ViewInputs) -> Result<ViewOutputs, LowerError> {
            let hits = &view.value().0;
            hits.set(hits.get() + 1);
            Ok(ViewOutputs::view(crate::outputs::NativeView::Layer {
                bounds: Rect::zero(),
                background: crate::color::Color::CLEAR,
                opacity: 0.,
            }))
        }
    }

    fn inputs() -> ViewInputs {
        ViewInputs::new(
            EnvironmentValues::new(),
            SceneConnection::new(Rect::from_size(10., 10.)),
            Rect::from_size(10., 10.),
        )
    }

    #[test]
    fn only_the_chosen_branch_is_lowered() {
        let taken = Rc::new(Cell::new(0));
        let untaken = Rc::new(Cell::new(0));

        let node = branch(
            false,
            Probe(Rc::clone(&untaken)),
            tuple((Probe(Rc::clone(&taken)), Text::new("else"))),
        );
        assert!(!node.is_first());

        let outputs = lower_view(GraphValue::new(node), inputs()).unwrap();
        assert_eq!(taken.get(), 1);
        assert_eq!(untaken.get(), 0, "the untaken branch must not be lowered");
        assert_eq!(outputs.all_views().len(), 2);
    }

    #[test]
    fn first_branch() {
        let hits = Rc::new(Cell::new(0));
        let node: Conditional<Probe, Text> = branch(true, Probe(Rc::clone(&hits)), Text::new("no"));
        let outputs = lower_view(GraphValue::new(node), inputs()).unwrap();
        assert_eq!(hits.get(), 1);
        assert_eq!(outputs.views.len(), 1, "a conditional adds no nesting of its own");
    }
}
