//! The environment store.
//!
//! Environment values are ambient configuration that every node sees while it is lowered: the color
//! scheme, the locale, the current scene phase, and so on. Values are looked up by a static key
//! type; a key that was never set yields its declared default.
//!
//! Setting a key never mutates a store. It returns a new store that shares every other entry with
//! its parent, so an override made for one subtree is invisible to siblings and to the parent.

use core::any::{type_name, Any, TypeId};
use core::fmt;
use std::rc::Rc;

/// A statically declared environment key.
///
/// Usually declared with [`environment_key!`](crate::environment_key).
pub trait EnvironmentKey: 'static {
    type Value: Clone + 'static;

    /// The value seen when the key has not been set.
    fn default_value() -> Self::Value;
}

/// Declares an environment key type with a value type and a default.
///
/// ```
/// # use tern_core::{environment_key, EnvironmentValues};
/// environment_key! {
///     /// Spacing between toolbar items.
///     pub ToolbarSpacingKey: f64 = 8.;
/// }
///
/// let env = EnvironmentValues::new();
/// assert_eq!(env.get::<ToolbarSpacingKey>(), 8.);
/// ```
#[macro_export]
macro_rules! environment_key {
    ($($(#[$attr:meta])* $vis:vis $key:ident: $value:ty = $default:expr;)+) => {
        $(
            $(#[$attr])*
            #[derive(Debug, Clone, Copy)]
            $vis enum $key {}

            impl $crate::EnvironmentKey for $key {
                type Value = $value;
                fn default_value() -> $value {
                    $default
                }
            }
        )+
    };
}

struct Entry {
    key: TypeId,
    name: &'static str,
    value: Rc<dyn Any>,
    parent: Option<Rc<Entry>>,
}

impl Drop for Entry {
    // unlinks iteratively so long chains cannot overflow the stack
    fn drop(&mut self) {
        let mut parent = self.parent.take();
        while let Some(entry) = parent {
            parent = match Rc::try_unwrap(entry) {
                Ok(mut entry) => entry.parent.take(),
                Err(_) => None,
            };
        }
    }
}

/// A persistent keyed store of environment values.
///
/// Cloning is cheap. Two stores compare equal only if they share the same entries, i.e. one is a
/// clone of the other; stores with equal contents built separately are not equal.
#[derive(Clone, Default)]
pub struct EnvironmentValues {
    head: Option<Rc<Entry>>,
}

impl EnvironmentValues {
    /// Creates an empty store, in which every key has its default value.
    pub fn new() -> EnvironmentValues {
        EnvironmentValues { head: None }
    }

    fn entries(&self) -> impl Iterator<Item = &Entry> {
        let mut cursor = self.head.as_deref();
        core::iter::from_fn(move || {
            let entry = cursor?;
            cursor = entry.parent.as_deref();
            Some(entry)
        })
    }

    fn lookup<K: EnvironmentKey>(&self) -> Option<&K::Value> {
        let key = TypeId::of::<K>();
        self.entries()
            .find(|entry| entry.key == key)
            .and_then(|entry| entry.value.downcast_ref::<K::Value>())
    }

    /// Returns the value for `K`, or its default if it was never set.
    pub fn get<K: EnvironmentKey>(&self) -> K::Value {
        match self.lookup::<K>() {
            Some(value) => value.clone(),
            None => K::default_value(),
        }
    }

    /// Returns true if `K` has been set on this store or one of its ancestors.
    pub fn is_set<K: EnvironmentKey>(&self) -> bool {
        self.lookup::<K>().is_some()
    }

    /// Returns a new store where `K` is `value`.
    ///
    /// A previous value for `K` is not kept: entries set after it are copied, everything set
    /// before it is shared. A store therefore never holds more entries than distinct keys.
    pub fn set<K: EnvironmentKey>(&self, value: K::Value) -> EnvironmentValues {
        let key = TypeId::of::<K>();
        let parent = match self.entries().position(|entry| entry.key == key) {
            None => self.head.clone(),
            Some(index) => {
                let newer: Vec<&Entry> = self.entries().take(index).collect();
                let mut rest = self
                    .entries()
                    .nth(index)
                    .and_then(|shadowed| shadowed.parent.clone());
                for entry in newer.into_iter().rev() {
                    rest = Some(Rc::new(Entry {
                        key: entry.key,
                        name: entry.name,
                        value: Rc::clone(&entry.value),
                        parent: rest,
                    }));
                }
                rest
            }
        };

        EnvironmentValues {
            head: Some(Rc::new(Entry {
                key,
                name: type_name::<K>(),
                value: Rc::new(value),
                parent,
            })),
        }
    }

    /// Returns a new store where `K` has been modified by `f`.
    pub fn transform<K, F>(&self, f: F) -> EnvironmentValues
    where
        K: EnvironmentKey,
        F: FnOnce(&mut K::Value),
    {
        let mut value = self.get::<K>();
        f(&mut value);
        self.set::<K>(value)
    }

    /// A snapshot of the store; later overrides made from it do not affect the snapshot.
    pub fn snapshot(&self) -> EnvironmentValues {
        self.clone()
    }

    /// Names of all keys that have been set, most recent first and without repeats.
    pub fn set_keys(&self) -> Vec<&'static str> {
        let mut keys: Vec<&'static str> = Vec::new();
        for entry in self.entries() {
            if !keys.contains(&entry.name) {
                keys.push(entry.name);
            }
        }
        keys
    }
}

impl PartialEq for EnvironmentValues {
    fn eq(&self, other: &EnvironmentValues) -> bool {
        match (&self.head, &other.head) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl fmt::Debug for EnvironmentValues {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("EnvironmentValues")
            .field("set_keys", &self.set_keys())
            .finish()
    }
}

/// Light or dark appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorScheme {
    Light,
    Dark,
}

impl Default for ColorScheme {
    fn default() -> Self {
        ColorScheme::Light
    }
}

/// A locale identifier such as `en_US`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale(String);

impl Locale {
    pub fn new(identifier: impl Into<String>) -> Locale {
        Locale(identifier.into())
    }

    pub fn identifier(&self) -> &str {
        &self.0
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::new("en_US")
    }
}

/// A time zone identifier such as `Europe/Berlin`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimeZone(String);

impl TimeZone {
    pub fn new(identifier: impl Into<String>) -> TimeZone {
        TimeZone(identifier.into())
    }

    pub fn identifier(&self) -> &str {
        &self.0
    }
}

impl Default for TimeZone {
    fn default() -> Self {
        TimeZone::new("UTC")
    }
}

/// Lifecycle phase of the application's scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScenePhase {
    /// Not receiving events; the initial phase.
    Inactive,
    /// In the foreground and interactive.
    Active,
    /// Not visible.
    Background,
}

impl Default for ScenePhase {
    fn default() -> Self {
        ScenePhase::Inactive
    }
}

/// Accessibility preferences reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Accessibility {
    pub reduce_motion: bool,
    pub increase_contrast: bool,
    pub differentiate_without_color: bool,
}

environment_key! {
    /// The color scheme content is displayed in.
    pub ColorSchemeKey: ColorScheme = ColorScheme::Light;
    /// The current locale.
    pub LocaleKey: Locale = Locale::default();
    /// The current time zone.
    pub TimeZoneKey: TimeZone = TimeZone::default();
    /// The phase of the scene being lowered.
    pub ScenePhaseKey: ScenePhase = ScenePhase::Inactive;
    /// Accessibility preferences.
    pub AccessibilityKey: Accessibility = Accessibility::default();
    /// Whether command items keep their keyboard shortcuts.
    pub KeyboardShortcutsEnabledKey: bool = true;
}
