//! Bindings: a get/set pair over some source of truth.

use core::fmt;
use parking_lot::Mutex;
use std::rc::Rc;
use std::sync::Arc;

/// A path from a value of type `P` to one of its fields, readable and writable.
///
/// Usually created with the [`lens!`](crate::lens) macro.
pub struct Lens<P, F> {
    get: fn(&P) -> &F,
    get_mut: fn(&mut P) -> &mut F,
}

impl<P, F> Lens<P, F> {
    pub fn new(get: fn(&P) -> &F, get_mut: fn(&mut P) -> &mut F) -> Self {
        Lens { get, get_mut }
    }
}

impl<P, F> Clone for Lens<P, F> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<P, F> Copy for Lens<P, F> {}

/// Creates a [`Lens`] for a field of a type.
#[macro_export]
macro_rules! lens {
    ($parent:ty, $field:tt) => {
        $crate::Lens::new(
            |parent: &$parent| &parent.$field,
            |parent: &mut $parent| &mut parent.$field,
        )
    };
}

/// A readable and writable reference to a value owned elsewhere.
pub struct Binding<V> {
    get: Rc<dyn Fn() -> V>,
    set: Rc<dyn Fn(V)>,
}

impl<V: Clone + 'static> Binding<V> {
    pub fn new<G, S>(get: G, set: S) -> Binding<V>
    where
        G: Fn() -> V + 'static,
        S: Fn(V) + 'static,
    {
        Binding {
            get: Rc::new(get),
            set: Rc::new(set),
        }
    }

    /// A binding that always reads `value` and ignores writes.
    pub fn constant(value: V) -> Binding<V> {
        Binding::new(move || value.clone(), |_| ())
    }

    /// A binding over a shared, lockable value.
    pub fn from_shared(source: Arc<Mutex<V>>) -> Binding<V> {
        let read = Arc::clone(&source);
        Binding::new(
            move || read.lock().clone(),
            move |value| *source.lock() = value,
        )
    }

    pub fn get(&self) -> V {
        (self.get)()
    }

    pub fn set(&self, value: V) {
        (self.set)(value)
    }

    /// A binding to one field of this binding's value.
    ///
    /// Writing the field reads the whole value, replaces the field and writes the whole value back.
    pub fn project<F: Clone + 'static>(&self, lens: Lens<V, F>) -> Binding<F> {
        let reader = self.clone();
        let writer = self.clone();
        Binding::new(
            move || (lens.get)(&reader.get()).clone(),
            move |value| {
                let mut whole = writer.get();
                *(lens.get_mut)(&mut whole) = value;
                writer.set(whole);
            },
        )
    }
}

impl<V> Clone for Binding<V> {
    fn clone(&self) -> Self {
        Binding {
            get: Rc::clone(&self.get),
            set: Rc::clone(&self.set),
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for Binding<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Binding").field(&(self.get)()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Document {
        title: String,
        pages: u32,
    }

    #[test]
    fn projection_writes_through() {
        let source = Arc::new(Mutex::new(Document {
            title: "Draft".into(),
            pages: 3,
        }));
        let document = Binding::from_shared(Arc::clone(&source));
        let title = document.project(lens!(Document, title));

        assert_eq!(title.get(), "Draft");
        title.set("Final".into());
        assert_eq!(
            *source.lock(),
            Document {
                title: "Final".into(),
                pages: 3,
            }
        );
        assert_eq!(document.project(lens!(Document, pages)).get(), 3);
    }

    #[test]
    fn constant_ignores_writes() {
        let binding = Binding::constant(7);
        binding.set(9);
        assert_eq!(binding.get(), 7);
    }
}
