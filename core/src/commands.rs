//! Commands: menus and keyboard shortcuts contributed by scenes.

use crate::environment::{EnvironmentValues, KeyboardShortcutsEnabledKey};
use crate::lowering::Empty;
use core::fmt;
use parking_lot::Mutex;
use std::sync::Arc;

/// Modifier key state.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyModifiers {
    /// Whether any shift key is pressed.
    pub shift: bool,

    /// Whether any control key is pressed.
    pub control: bool,

    /// Whether any option key or alt key is pressed.
    pub option: bool,

    /// Whether any command key or meta key is pressed.
    pub command: bool,
}

impl KeyModifiers {
    pub const NONE: KeyModifiers = KeyModifiers {
        shift: false,
        control: false,
        option: false,
        command: false,
    };

    pub const COMMAND: KeyModifiers = KeyModifiers {
        command: true,
        ..KeyModifiers::NONE
    };

    pub const fn with_shift(self) -> KeyModifiers {
        KeyModifiers {
            shift: true,
            ..self
        }
    }
}

/// Keyboard layout-independent identifiers for the keys shortcuts can use.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    A = 0x1,
    B = 0x2,
    C = 0x3,
    D = 0x4,
    E = 0x5,
    F = 0x6,
    G = 0x7,
    H = 0x8,
    I = 0x9,
    J = 0xA,
    K = 0xB,
    L = 0xC,
    M = 0xD,
    N = 0xE,
    O = 0xF,
    P = 0x10,
    Q = 0x11,
    R = 0x12,
    S = 0x13,
    T = 0x14,
    U = 0x15,
    V = 0x16,
    W = 0x17,
    X = 0x18,
    Y = 0x19,
    Z = 0x1A,
    N0 = 0x20,
    N1 = 0x21,
    N2 = 0x22,
    N3 = 0x23,
    N4 = 0x24,
    N5 = 0x25,
    N6 = 0x26,
    N7 = 0x27,
    N8 = 0x28,
    N9 = 0x29,
    Equal = 0x2A,
    Minus = 0x2B,
    Comma = 0x31,
    Period = 0x33,
    Return = 0x35,
    Tab = 0x36,
    Space = 0x37,
    Delete = 0x38,
    Escape = 0x39,
}

/// A key combination that triggers a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyboardShortcut {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyboardShortcut {
    pub fn new(key: KeyCode, modifiers: KeyModifiers) -> KeyboardShortcut {
        KeyboardShortcut { key, modifiers }
    }
}

/// The action performed when a command is chosen.
///
/// Actions are shared, not copied: clones refer to the same closure.
pub struct CommandAction(Arc<Mutex<dyn FnMut() + Send>>);

impl CommandAction {
    pub fn new<F: 'static + FnMut() + Send>(action: F) -> Self {
        CommandAction(Arc::new(Mutex::new(action)))
    }

    /// Runs the action.
    pub fn perform(&self) {
        let mut action = self.0.lock();
        (&mut *action)();
    }
}

impl Clone for CommandAction {
    fn clone(&self) -> Self {
        CommandAction(Arc::clone(&self.0))
    }
}

impl PartialEq for CommandAction {
    fn eq(&self, other: &CommandAction) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for CommandAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "CommandAction")
    }
}

/// One entry in a command menu.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandItem {
    pub title: String,
    pub shortcut: Option<KeyboardShortcut>,
    pub action: CommandAction,
}

impl CommandItem {
    pub fn new<F: 'static + FnMut() + Send>(title: impl Into<String>, action: F) -> CommandItem {
        CommandItem {
            title: title.into(),
            shortcut: None,
            action: CommandAction::new(action),
        }
    }

    pub fn keyboard_shortcut(mut self, shortcut: KeyboardShortcut) -> CommandItem {
        self.shortcut = Some(shortcut);
        self
    }
}

/// A titled menu of commands.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandMenu {
    pub title: String,
    pub items: Vec<CommandItem>,
}

impl CommandMenu {
    pub fn new(title: impl Into<String>) -> CommandMenu {
        CommandMenu {
            title: title.into(),
            items: Vec::new(),
        }
    }

    pub fn item(mut self, item: CommandItem) -> CommandMenu {
        self.items.push(item);
        self
    }

    /// This menu as seen under `environment`.
    fn resolved(&self, environment: &EnvironmentValues) -> CommandMenu {
        let mut menu = self.clone();
        if !environment.get::<KeyboardShortcutsEnabledKey>() {
            for item in &mut menu.items {
                item.shortcut = None;
            }
        }
        menu
    }
}

/// Something that contributes command menus to a scene.
pub trait Commands: 'static {
    /// The menus to add, in order, resolved against the scene's environment.
    fn menus(&self, environment: &EnvironmentValues) -> Vec<CommandMenu>;
}

impl Commands for CommandMenu {
    fn menus(&self, environment: &EnvironmentValues) -> Vec<CommandMenu> {
        vec![self.resolved(environment)]
    }
}

impl Commands for Vec<CommandMenu> {
    fn menus(&self, environment: &EnvironmentValues) -> Vec<CommandMenu> {
        self.iter().map(|menu| menu.resolved(environment)).collect()
    }
}

impl Commands for Empty {
    fn menus(&self, _: &EnvironmentValues) -> Vec<CommandMenu> {
        Vec::new()
    }
}

macro_rules! impl_commands_tuple {
    ($($name:ident $idx:tt),+) => {
        impl<$($name: Commands),+> Commands for ($($name,)+) {
            fn menus(&self, environment: &EnvironmentValues) -> Vec<CommandMenu> {
                let mut menus = Vec::new();
                $(menus.extend(self.$idx.menus(environment));)+
                menus
            }
        }
    };
}

impl_commands_tuple!(A 0);
impl_commands_tuple!(A 0, B 1);
impl_commands_tuple!(A 0, B 1, C 2);
impl_commands_tuple!(A 0, B 1, C 2, D 3);
impl_commands_tuple!(A 0, B 1, C 2, D 3, E 4);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::graph::GraphValue;
    use crate::inputs::{SceneConnection, SceneInputs};
    use crate::lowering::lower_scene;
    use crate::rect::Rect;
    use crate::scene::{SceneExt, WindowGroup};
    use crate::view::Fill;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn file_menu(saves: Arc<AtomicUsize>) -> CommandMenu {
        CommandMenu::new("File").item(
            CommandItem::new("Save", move || {
                saves.fetch_add(1, Ordering::SeqCst);
            })
            .keyboard_shortcut(KeyboardShortcut::new(KeyCode::S, KeyModifiers::COMMAND)),
        )
    }

    #[test]
    fn menus_are_appended_in_order() {
        let saves = Arc::new(AtomicUsize::new(0));
        let scene = WindowGroup::new("Editor", Fill(Color::WHITE))
            .commands((file_menu(Arc::clone(&saves)), CommandMenu::new("View")));
        let inputs = SceneInputs::new(
            EnvironmentValues::new(),
            SceneConnection::new(Rect::from_size(100., 100.)),
        );
        let outputs = lower_scene(GraphValue::new(scene), inputs).unwrap();

        let titles: Vec<_> = outputs.menus.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["File", "View"]);

        let save = &outputs.menus[0].items[0];
        assert_eq!(
            save.shortcut,
            Some(KeyboardShortcut::new(KeyCode::S, KeyModifiers::COMMAND))
        );
        save.action.perform();
        save.action.clone().perform();
        assert_eq!(saves.load(Ordering::SeqCst), 2, "clones share the action");
    }

    #[test]
    fn shortcuts_can_be_disabled() {
        let env = EnvironmentValues::new().set::<KeyboardShortcutsEnabledKey>(false);
        let menus = file_menu(Arc::new(AtomicUsize::new(0))).menus(&env);
        assert_eq!(menus[0].items[0].shortcut, None);
    }
}
