//! Graph values.
//!
//! A [`GraphValue`] is a handle to one node value of the declared tree. Node kinds receive their
//! own value as a graph value during lowering and hand their children down as projections of it,
//! so a child is reached through a field path instead of being copied out of its parent.

use core::fmt;
use std::rc::Rc;

/// A path from a value of type `P` to one of its fields of type `F`.
///
/// Usually created with the [`field!`](crate::field) macro.
pub struct Field<P, F> {
    name: &'static str,
    get: fn(&P) -> &F,
}

impl<P, F> Field<P, F> {
    pub fn new(name: &'static str, get: fn(&P) -> &F) -> Self {
        Field { name, get }
    }

    /// The field name, for diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Reads the field from a parent value.
    pub fn get<'a>(&self, parent: &'a P) -> &'a F {
        (self.get)(parent)
    }
}

impl<P, F> Clone for Field<P, F> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<P, F> Copy for Field<P, F> {}

impl<P, F> fmt::Debug for Field<P, F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Field({})", self.name)
    }
}

/// A path from an enum value of type `P` into the payload of one of its variants.
///
/// The selector returns `None` if the value is currently a different variant.
pub struct Case<P, F> {
    name: &'static str,
    select: fn(&P) -> Option<&F>,
}

impl<P, F> Case<P, F> {
    pub fn new(name: &'static str, select: fn(&P) -> Option<&F>) -> Self {
        Case { name, select }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<P, F> Clone for Case<P, F> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<P, F> Copy for Case<P, F> {}

/// Creates a [`Field`] for a named (or tuple-indexed) field of a type.
///
/// ```
/// # use tern_core::{field, GraphValue};
/// struct Window {
///     title: String,
/// }
///
/// let window = GraphValue::new(Window { title: "Main".into() });
/// let title = window.project(field!(Window, title));
/// assert_eq!(title.value(), "Main");
/// ```
#[macro_export]
macro_rules! field {
    ($parent:ty, $field:tt) => {
        $crate::Field::new(stringify!($field), |parent: &$parent| &parent.$field)
    };
}

trait Projection<V> {
    fn value(&self) -> &V;
}

struct Root<V>(V);

impl<V> Projection<V> for Root<V> {
    fn value(&self) -> &V {
        &self.0
    }
}

struct Project<P: 'static, F> {
    parent: Rc<dyn Projection<P>>,
    field: Field<P, F>,
}

impl<P: 'static, F> Projection<F> for Project<P, F> {
    fn value(&self) -> &F {
        self.field.get(self.parent.value())
    }
}

struct Select<P: 'static, F> {
    parent: Rc<dyn Projection<P>>,
    case: Case<P, F>,
}

impl<P: 'static, F> Projection<F> for Select<P, F> {
    fn value(&self) -> &F {
        match (self.case.select)(self.parent.value()) {
            Some(value) => value,
            // graph values are immutable, so the case checked at projection time still holds
            None => unreachable!("graph value left case {} after projection", self.case.name),
        }
    }
}

/// An immutable, type-preserving handle to a node value.
///
/// Cloning a graph value is cheap and shares the underlying node. Projections never copy or
/// mutate their source; they read through it on access.
pub struct GraphValue<V: 'static> {
    source: Rc<dyn Projection<V>>,
    path: Rc<str>,
}

impl<V: 'static> GraphValue<V> {
    /// Wraps a node value.
    pub fn new(value: V) -> GraphValue<V> {
        GraphValue {
            source: Rc::new(Root(value)),
            path: Rc::from("self"),
        }
    }

    /// Returns the node value.
    pub fn value(&self) -> &V {
        self.source.value()
    }

    /// The field path from the root value to this one, for diagnostics.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Projects this value onto one of its fields.
    pub fn project<F: 'static>(&self, field: Field<V, F>) -> GraphValue<F> {
        GraphValue {
            source: Rc::new(Project {
                parent: Rc::clone(&self.source),
                field,
            }),
            path: Rc::from(format!("{}.{}", self.path, field.name)),
        }
    }

    /// Projects this value onto the payload of an enum variant.
    ///
    /// Returns `None` without touching the payload if the value is a different variant.
    pub fn project_case<F: 'static>(&self, case: Case<V, F>) -> Option<GraphValue<F>> {
        (case.select)(self.value())?;
        Some(GraphValue {
            source: Rc::new(Select {
                parent: Rc::clone(&self.source),
                case,
            }),
            path: Rc::from(format!("{}.{}", self.path, case.name)),
        })
    }
}

impl<V: 'static> Clone for GraphValue<V> {
    fn clone(&self) -> Self {
        GraphValue {
            source: Rc::clone(&self.source),
            path: Rc::clone(&self.path),
        }
    }
}

impl<V: fmt::Debug + 'static> fmt::Debug for GraphValue<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("GraphValue")
            .field("path", &&*self.path)
            .field("value", self.value())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Window {
        title: String,
        frame: (f64, f64),
    }

    #[derive(Debug, PartialEq)]
    enum Slot {
        Filled(Window),
        Vacant,
    }

    #[test]
    fn projection_reads_through_the_parent() {
        let window = GraphValue::new(Window {
            title: "Inbox".into(),
            frame: (640., 480.),
        });
        let title = window.project(field!(Window, title));
        let height = window.project(field!(Window, frame)).project(field!((f64, f64), 1));

        assert_eq!(title.value(), "Inbox");
        assert_eq!(*height.value(), 480.);
        assert_eq!(height.path(), "self.frame.1");
        assert_eq!(
            window.value(),
            &Window {
                title: "Inbox".into(),
                frame: (640., 480.),
            },
            "projection must not alter the source"
        );
    }

    #[test]
    fn case_projection() {
        let filled_case = Case::new("Filled", |slot: &Slot| match slot {
            Slot::Filled(window) => Some(window),
            Slot::Vacant => None,
        });

        let vacant = GraphValue::new(Slot::Vacant);
        assert!(vacant.project_case(filled_case).is_none());

        let filled = GraphValue::new(Slot::Filled(Window {
            title: "Compose".into(),
            frame: (0., 0.),
        }));
        let window = filled
            .project_case(filled_case)
            .expect("filled slot should project");
        assert_eq!(window.value().title, "Compose");
        assert_eq!(window.path(), "self.Filled");
    }
}
