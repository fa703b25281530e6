//! Sibling aggregation.

use crate::error::LowerError;
use crate::graph::{Field, GraphValue};
use crate::inputs::{SceneInputs, ViewInputs};
use crate::lowering::{lower_scene, lower_view, Never};
use crate::outputs::{SceneOutputs, ViewOutputs};
use crate::scene::Scene;
use crate::view::View;

/// A fixed-arity group of sibling scenes or views.
///
/// Every child is lowered with the same inputs as the tuple itself, so siblings never see each
/// other's environment overrides. Child outputs keep declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tuple<T>(pub T);

/// Groups up to ten scenes or views: `tuple((a, b, c))`.
pub fn tuple<T>(children: T) -> Tuple<T> {
    Tuple(children)
}

macro_rules! impl_tuple {
    ($($name:ident $idx:tt),+) => {
        impl<$($name: Scene),+> Scene for Tuple<($($name,)+)> {
            type Body = Never;

            fn body(&self) -> Never {
                Never::body_of::<Self>()
            }

            fn make_scene(
                scene: GraphValue<Self>,
                inputs: SceneInputs,
            ) -> Result<SceneOutputs, LowerError> {
                let children = vec![$(
                    lower_scene(
                        scene.project(Field::new(stringify!($idx), |t: &Self| &(t.0).$idx)),
                        inputs.clone(),
                    )?,
                )+];
                Ok(SceneOutputs::group(children))
            }
        }

        impl<$($name: View),+> View for Tuple<($($name,)+)> {
            type Body = Never;

            fn body(&self) -> Never {
                Never::body_of::<Self>()
            }

            fn make_view(
                view: GraphValue<Self>,
                inputs: ViewInputs,
            ) -> Result<ViewOutputs, LowerError> {
                let children = vec![$(
                    lower_view(
                        view.project(Field::new(stringify!($idx), |t: &Self| &(t.0).$idx)),
                        inputs.clone(),
                    )?,
                )+];
                Ok(ViewOutputs::group(children))
            }
        }
    };
}

impl_tuple!(A 0);
impl_tuple!(A 0, B 1);
impl_tuple!(A 0, B 1, C 2);
impl_tuple!(A 0, B 1, C 2, D 3);
impl_tuple!(A 0, B 1, C 2, D 3, E 4);
impl_tuple!(A 0, B 1, C 2, D 3, E 4, F 5);
impl_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6);
impl_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);
impl_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8);
impl_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9);
