//! The seam between the root graph and a windowing system.

use crate::config::GraphConfig;
use core::fmt;
use tern_core::{
    Accessibility, AccessibilityKey, ColorScheme, ColorSchemeKey, EnvironmentValues, Locale,
    LocaleKey, NativeWindow, SceneOutputs, TimeZone, TimeZoneKey,
};
use thiserror::Error;
use uuid::Uuid;

/// What the platform reports about itself when the root graph is created.
///
/// Values left as `None` fall back to the graph configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HostDefaults {
    pub locale: Option<Locale>,
    pub time_zone: Option<TimeZone>,
    pub color_scheme: Option<ColorScheme>,
    pub accessibility: Accessibility,
}

impl HostDefaults {
    /// Builds the root environment.
    pub fn environment(&self, config: &GraphConfig) -> EnvironmentValues {
        let mut environment = EnvironmentValues::new()
            .set::<ColorSchemeKey>(self.color_scheme.unwrap_or(config.color_scheme))
            .set::<LocaleKey>(
                self.locale
                    .clone()
                    .unwrap_or_else(|| config.locale.clone()),
            )
            .set::<AccessibilityKey>(self.accessibility);
        if let Some(time_zone) = &self.time_zone {
            environment = environment.set::<TimeZoneKey>(time_zone.clone());
        }
        environment
    }
}

/// A windowing system that realizes lowered outputs.
pub trait PlatformAdapter {
    type Error: fmt::Display;

    /// Locale, color scheme and similar values queried from the host.
    fn host_defaults(&self) -> HostDefaults;

    /// Realizes `outputs`, replacing whatever was attached before.
    fn attach(&mut self, outputs: &SceneOutputs) -> Result<(), Self::Error>;

    /// Tears down everything attached.
    fn detach(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Errors of the [`HeadlessPlatform`].
#[derive(Debug, Error, PartialEq)]
pub enum HeadlessError {
    #[error("window {title:?} has a zero-sized frame")]
    ZeroSizedWindow { title: String },
}

/// A window as realized by the [`HeadlessPlatform`].
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessWindow {
    pub handle: Uuid,
    pub window: NativeWindow,
}

/// A platform without a display, which records what it is asked to show.
#[derive(Debug, Default)]
pub struct HeadlessPlatform {
    defaults: HostDefaults,
    windows: Vec<HeadlessWindow>,
    menus: Vec<String>,
    attach_count: usize,
}

impl HeadlessPlatform {
    pub fn new() -> HeadlessPlatform {
        HeadlessPlatform::default()
    }

    /// Reports `defaults` from [`host_defaults`](PlatformAdapter::host_defaults).
    pub fn with_defaults(defaults: HostDefaults) -> HeadlessPlatform {
        HeadlessPlatform {
            defaults,
            ..HeadlessPlatform::default()
        }
    }

    /// Windows currently attached, in output order.
    pub fn windows(&self) -> &[HeadlessWindow] {
        &self.windows
    }

    /// Titles of the attached command menus.
    pub fn menu_titles(&self) -> &[String] {
        &self.menus
    }

    /// How many times outputs were attached.
    pub fn attach_count(&self) -> usize {
        self.attach_count
    }

    pub fn is_attached(&self) -> bool {
        !self.windows.is_empty() || !self.menus.is_empty()
    }
}

impl PlatformAdapter for HeadlessPlatform {
    type Error = HeadlessError;

    fn host_defaults(&self) -> HostDefaults {
        self.defaults.clone()
    }

    fn attach(&mut self, outputs: &SceneOutputs) -> Result<(), HeadlessError> {
        let mut windows = Vec::new();
        for window in outputs.all_windows() {
            if window.frame.is_empty() {
                return Err(HeadlessError::ZeroSizedWindow {
                    title: window.title.clone(),
                });
            }
            windows.push(HeadlessWindow {
                handle: Uuid::new_v4(),
                window: window.clone(),
            });
        }

        self.menus = outputs
            .all_menus()
            .into_iter()
            .map(|menu| menu.title.clone())
            .collect();
        self.windows = windows;
        self.attach_count += 1;
        log::debug!(
            "headless platform attached {} windows and {} menus",
            self.windows.len(),
            self.menus.len()
        );
        Ok(())
    }

    fn detach(&mut self) -> Result<(), HeadlessError> {
        self.windows.clear();
        self.menus.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tern_core::{
        lower_scene, Color, CommandMenu, Fill, GraphValue, Rect, SceneConnection, SceneExt,
        SceneInputs, WindowGroup,
    };

    fn lowered(frame: Rect) -> SceneOutputs {
        let scene = WindowGroup::new("Main", Fill(Color::WHITE)).commands(CommandMenu::new("File"));
        let inputs = SceneInputs::new(EnvironmentValues::new(), SceneConnection::new(frame));
        lower_scene(GraphValue::new(scene), inputs).unwrap()
    }

    #[test]
    fn host_values_win_over_config() {
        let config = GraphConfig::default().with_locale(Locale::new("fr_FR"));
        let defaults = HostDefaults {
            color_scheme: Some(ColorScheme::Dark),
            ..HostDefaults::default()
        };
        let environment = defaults.environment(&config);
        assert_eq!(environment.get::<ColorSchemeKey>(), ColorScheme::Dark);
        assert_eq!(environment.get::<LocaleKey>(), Locale::new("fr_FR"));
        assert_eq!(environment.get::<TimeZoneKey>(), TimeZone::default());
    }

    #[test]
    fn attach_assigns_handles() {
        let mut platform = HeadlessPlatform::new();
        platform.attach(&lowered(Rect::from_size(640., 480.))).unwrap();
        let first = platform.windows()[0].handle;
        assert_eq!(platform.windows().len(), 1);
        assert_eq!(platform.menu_titles(), ["File".to_string()]);

        platform.attach(&lowered(Rect::from_size(640., 480.))).unwrap();
        assert_ne!(platform.windows()[0].handle, first, "every attachment is fresh");
        assert_eq!(platform.attach_count(), 2);

        platform.detach().unwrap();
        assert!(!platform.is_attached());
    }

    #[test]
    fn zero_sized_windows_are_rejected() {
        let mut platform = HeadlessPlatform::new();
        let error = platform.attach(&lowered(Rect::zero())).unwrap_err();
        assert_eq!(
            error,
            HeadlessError::ZeroSizedWindow {
                title: "Main".into()
            }
        );
        assert_eq!(platform.attach_count(), 0);
    }
}
