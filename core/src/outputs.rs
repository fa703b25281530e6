//! What lowering produces: descriptors of native objects for a platform adapter to realize.

use crate::color::Color;
use crate::commands::CommandMenu;
use crate::environment::{ColorScheme, Locale};
use crate::rect::Rect;

/// Which kind of scene a window was produced by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneRole {
    Main,
    Settings,
}

/// Window chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowStyle {
    /// Whatever the platform considers default.
    Automatic,
    TitleBar,
    HiddenTitleBar,
    Plain,
}

impl Default for WindowStyle {
    fn default() -> Self {
        WindowStyle::Automatic
    }
}

/// A window to be created by the platform.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeWindow {
    pub id: Option<String>,
    pub title: String,
    pub role: SceneRole,
    pub frame: Rect,
    pub color_scheme: ColorScheme,
    pub style: WindowStyle,

    /// The lowered content view.
    pub content: ViewOutputs,
}

/// A native view to be created by the platform.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeView {
    Text {
        content: String,
        color: Color,
        locale: Locale,
        bounds: Rect,
    },
    Layer {
        bounds: Rect,
        background: Color,
        opacity: f64,
    },
}

/// Outputs of lowering a scene.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SceneOutputs {
    pub windows: Vec<NativeWindow>,
    pub menus: Vec<CommandMenu>,

    /// Outputs of child scenes, in declaration order.
    pub children: Vec<SceneOutputs>,
}

impl SceneOutputs {
    pub fn empty() -> SceneOutputs {
        SceneOutputs::default()
    }

    /// Outputs holding a single window.
    pub fn window(window: NativeWindow) -> SceneOutputs {
        SceneOutputs {
            windows: vec![window],
            ..SceneOutputs::default()
        }
    }

    /// Outputs that only aggregate child outputs.
    pub fn group(children: Vec<SceneOutputs>) -> SceneOutputs {
        SceneOutputs {
            children,
            ..SceneOutputs::default()
        }
    }

    /// True if neither these outputs nor any children produce anything.
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
            && self.menus.is_empty()
            && self.children.iter().all(SceneOutputs::is_empty)
    }

    /// All windows, own windows before those of children, depth-first.
    pub fn all_windows(&self) -> Vec<&NativeWindow> {
        let mut windows = Vec::new();
        self.collect_windows(&mut windows);
        windows
    }

    fn collect_windows<'a>(&'a self, windows: &mut Vec<&'a NativeWindow>) {
        windows.extend(self.windows.iter());
        for child in &self.children {
            child.collect_windows(windows);
        }
    }

    /// All command menus, in the same order as [`all_windows`](Self::all_windows).
    pub fn all_menus(&self) -> Vec<&CommandMenu> {
        let mut menus: Vec<&CommandMenu> = self.menus.iter().collect();
        for child in &self.children {
            menus.extend(child.all_menus());
        }
        menus
    }

    /// Applies `f` to every window in these outputs and their children.
    pub fn for_each_window_mut<F: FnMut(&mut NativeWindow)>(&mut self, mut f: F) {
        self.visit_windows_mut(&mut f);
    }

    fn visit_windows_mut<F: FnMut(&mut NativeWindow)>(&mut self, f: &mut F) {
        for window in &mut self.windows {
            f(window);
        }
        for child in &mut self.children {
            child.visit_windows_mut(f);
        }
    }
}

/// Outputs of lowering a view.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewOutputs {
    pub views: Vec<NativeView>,

    /// Outputs of child views, in declaration order.
    pub children: Vec<ViewOutputs>,
}

impl ViewOutputs {
    pub fn empty() -> ViewOutputs {
        ViewOutputs::default()
    }

    pub fn view(view: NativeView) -> ViewOutputs {
        ViewOutputs {
            views: vec![view],
            children: Vec::new(),
        }
    }

    pub fn group(children: Vec<ViewOutputs>) -> ViewOutputs {
        ViewOutputs {
            views: Vec::new(),
            children,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty() && self.children.iter().all(ViewOutputs::is_empty)
    }

    /// All native views, own views before those of children, depth-first.
    pub fn all_views(&self) -> Vec<&NativeView> {
        let mut views: Vec<&NativeView> = self.views.iter().collect();
        for child in &self.children {
            views.extend(child.all_views());
        }
        views
    }
}
