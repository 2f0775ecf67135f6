use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub stats: StatsConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Deck file to present; the bundled deck is used when unset
    #[serde(default)]
    pub deck: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            deck: None,
        }
    }
}

/// Named navigation presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationPreset {
    /// Wheel + keyboard driven, native snap for touch
    #[default]
    Desktop,
    /// Adds custom swipe translation
    Touch,
}

/// Navigation controller behavior
///
/// The optional behaviors are independent flags so that both the desktop
/// and the touch flavours run through the same controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Preset the flags below were derived from (informational)
    #[serde(default)]
    pub preset: NavigationPreset,
    /// Translate vertical swipes into one-slide moves
    #[serde(default)]
    pub enable_custom_touch_swipe: bool,
    /// Prevent the native line/page scroll for navigation keys
    #[serde(default = "default_true")]
    pub suppress_default_arrow_key_scroll: bool,
    /// Mark `animate` blocks as in-view when their slide becomes visible
    #[serde(default = "default_true")]
    pub legacy_animate_class_support: bool,
    /// Let the visibility observer sync the nav dots as well
    #[serde(default = "default_true")]
    pub sync_dots_on_visibility: bool,
    /// Viewport width above which wheel events are hijacked
    #[serde(default = "default_wheel_breakpoint")]
    pub wheel_breakpoint: f64,
    /// Wheel debounce window in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Minimum vertical travel for a swipe
    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold: f64,
    /// Visible ratio a slide needs to count as in view
    #[serde(default = "default_visibility_threshold")]
    pub visibility_threshold: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self::desktop()
    }
}

impl NavigationConfig {
    /// Wheel and keyboard navigation, native touch scrolling
    pub fn desktop() -> Self {
        Self {
            preset: NavigationPreset::Desktop,
            enable_custom_touch_swipe: false,
            suppress_default_arrow_key_scroll: true,
            legacy_animate_class_support: true,
            sync_dots_on_visibility: true,
            wheel_breakpoint: default_wheel_breakpoint(),
            debounce_ms: default_debounce_ms(),
            swipe_threshold: default_swipe_threshold(),
            visibility_threshold: default_visibility_threshold(),
        }
    }

    /// Swipe translation; native key scrolling; dots follow navigation only
    pub fn touch() -> Self {
        Self {
            preset: NavigationPreset::Touch,
            enable_custom_touch_swipe: true,
            suppress_default_arrow_key_scroll: false,
            sync_dots_on_visibility: false,
            ..Self::desktop()
        }
    }

    pub fn from_preset(preset: NavigationPreset) -> Self {
        match preset {
            NavigationPreset::Desktop => Self::desktop(),
            NavigationPreset::Touch => Self::touch(),
        }
    }

    /// Switch the behavior flags to a preset, keeping thresholds and timings
    pub fn apply_preset(&mut self, preset: NavigationPreset) {
        let flags = Self::from_preset(preset);
        self.preset = flags.preset;
        self.enable_custom_touch_swipe = flags.enable_custom_touch_swipe;
        self.suppress_default_arrow_key_scroll = flags.suppress_default_arrow_key_scroll;
        self.legacy_animate_class_support = flags.legacy_animate_class_support;
        self.sync_dots_on_visibility = flags.sync_dots_on_visibility;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Counter animation duration in milliseconds
    #[serde(default = "default_stats_duration")]
    pub duration_ms: u64,
    /// Counter easing curve
    #[serde(default = "default_stats_easing")]
    pub easing: EasingType,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_stats_duration(),
            easing: default_stats_easing(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Layout units per terminal column
    #[serde(default = "default_cell_width")]
    pub cell_width: f64,
    /// Layout units per terminal row
    #[serde(default = "default_cell_height")]
    pub cell_height: f64,
    /// Show the bottom status bar
    #[serde(default = "default_true")]
    pub show_status_bar: bool,
    /// Color theme
    #[serde(default)]
    pub theme: ThemeConfig,
    /// Smooth scrolling
    #[serde(default)]
    pub scroll: ScrollConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            cell_width: default_cell_width(),
            cell_height: default_cell_height(),
            show_status_bar: true,
            theme: ThemeConfig::default(),
            scroll: ScrollConfig::default(),
        }
    }
}

/// Easing curve for animations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EasingType {
    /// Jump to the end value
    None,
    Linear,
    #[default]
    Cubic,
    Quartic,
    Quintic,
    /// Exponential ease-out
    EaseOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Animate viewport scrolling
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Scroll animation duration in milliseconds
    #[serde(default = "default_scroll_duration")]
    pub animation_duration_ms: u64,
    /// Scroll easing curve
    #[serde(default)]
    pub easing: EasingType,
    /// Units scrolled by one native line step (arrow keys without suppression)
    #[serde(default = "default_native_scroll_step")]
    pub native_scroll_step: f64,
    /// Frame rate while something is animating
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: true,
            animation_duration_ms: default_scroll_duration(),
            easing: EasingType::Cubic,
            native_scroll_step: default_native_scroll_step(),
            animation_fps: default_animation_fps(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ThemeConfig {
    /// Theme name (e.g., "gruvbox-dark", "nord")
    pub name: String,
    /// Optional color overrides for semantic colors
    pub colors: ThemeColorOverrides,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            colors: ThemeColorOverrides::default(),
        }
    }
}

// Accept either a bare theme name or a table with overrides
impl<'de> Deserialize<'de> for ThemeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};
        use std::fmt;

        struct ThemeConfigVisitor;

        impl<'de> Visitor<'de> for ThemeConfigVisitor {
            type Value = ThemeConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string (theme name) or a map with 'name' and optional 'colors'")
            }

            fn visit_str<E>(self, value: &str) -> Result<ThemeConfig, E>
            where
                E: de::Error,
            {
                Ok(ThemeConfig {
                    name: value.to_string(),
                    colors: ThemeColorOverrides::default(),
                })
            }

            fn visit_map<M>(self, mut map: M) -> Result<ThemeConfig, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut name: Option<String> = None;
                let mut colors: Option<ThemeColorOverrides> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "name" => name = Some(map.next_value()?),
                        "colors" => colors = Some(map.next_value()?),
                        _ => {
                            let _: de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                Ok(ThemeConfig {
                    name: name.unwrap_or_else(default_theme_name),
                    colors: colors.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_any(ThemeConfigVisitor)
    }
}

/// Optional color overrides, each a hex string ("#ff0000" or "ff0000")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColorOverrides {
    pub bg0: Option<String>,
    pub bg1: Option<String>,
    pub fg0: Option<String>,
    pub accent: Option<String>,
    pub selection: Option<String>,
    pub success: Option<String>,
    pub error: Option<String>,
    pub muted: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// Quit the presenter
    #[serde(default = "default_key_quit")]
    pub quit: String,
    /// Focus next quiz option on the current slide
    #[serde(default = "default_key_next_option")]
    pub next_option: String,
    /// Focus previous quiz option
    #[serde(default = "default_key_prev_option")]
    pub prev_option: String,
    /// Select the focused option / activate the start control
    #[serde(default = "default_key_select")]
    pub select: String,
    /// Jump to the first slide
    #[serde(default = "default_key_first_slide")]
    pub first_slide: String,
    /// Jump to the last slide
    #[serde(default = "default_key_last_slide")]
    pub last_slide: String,
    /// Toggle the help overlay
    #[serde(default = "default_key_help")]
    pub help: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            next_option: default_key_next_option(),
            prev_option: default_key_prev_option(),
            select: default_key_select(),
            first_slide: default_key_first_slide(),
            last_slide: default_key_last_slide(),
            help: default_key_help(),
        }
    }
}

fn default_key_quit() -> String { "q".to_string() }
fn default_key_next_option() -> String { "<Tab>".to_string() }
fn default_key_prev_option() -> String { "<S-Tab>".to_string() }
fn default_key_select() -> String { "<CR>".to_string() }
fn default_key_first_slide() -> String { "<Home>".to_string() }
fn default_key_last_slide() -> String { "<End>".to_string() }
fn default_key_help() -> String { "?".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("slidedeck")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_wheel_breakpoint() -> f64 {
    800.0
}

fn default_debounce_ms() -> u64 {
    600
}

fn default_swipe_threshold() -> f64 {
    30.0
}

fn default_visibility_threshold() -> f64 {
    0.55
}

fn default_stats_duration() -> u64 {
    2000
}

fn default_stats_easing() -> EasingType {
    EasingType::Quartic
}

fn default_tick_rate() -> u64 {
    100
}

fn default_cell_width() -> f64 {
    10.0
}

fn default_cell_height() -> f64 {
    20.0
}

fn default_scroll_duration() -> u64 {
    450
}

fn default_native_scroll_step() -> f64 {
    40.0
}

fn default_animation_fps() -> u32 {
    60
}

fn default_theme_name() -> String {
    "gruvbox-dark".to_string()
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from the default location or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, defaults when missing
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let mut config: Self =
            toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&mut self) -> crate::Result<()> {
        let threshold = self.navigation.visibility_threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(crate::Error::Config(format!(
                "navigation.visibility_threshold must be in (0, 1], got {}",
                threshold
            )));
        }
        if self.ui.cell_width <= 0.0 || self.ui.cell_height <= 0.0 {
            return Err(crate::Error::Config(
                "ui.cell_width and ui.cell_height must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Save configuration to the default location
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, config_path: &Path) -> crate::Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/slidedeck/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("slidedeck")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Log file used while the terminal UI owns stdout
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("slidedeck.log")
    }

    /// Deck path from config (with tilde expansion)
    pub fn deck_path(&self) -> Option<PathBuf> {
        self.general.deck.as_deref().map(expand_tilde)
    }
}
