use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

// ===== ROUTES =====

/// Pages reachable in the portfolio. The path is the identity key used by
/// the transition coordinator, so two `Route` values are the same page iff
/// their paths are equal.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub enum Route {
    Home,
    About,
    Projects,
    Skills,
    Contact,
}

impl Route {
    /// Menu link order inside the full-screen navigation overlay.
    pub const MENU: [Route; 5] = [
        Route::Home,
        Route::About,
        Route::Projects,
        Route::Skills,
        Route::Contact,
    ];

    /// In-page shortcut buttons on the landing page.
    pub const HERO_SHORTCUTS: [Route; 3] = [Route::Projects, Route::Skills, Route::Contact];

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::About => "/about",
            Route::Projects => "/projects",
            Route::Skills => "/skills",
            Route::Contact => "/contact",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::About => "About",
            Route::Projects => "Projects",
            Route::Skills => "Skills",
            Route::Contact => "Contact",
        }
    }

    /// Parse a location path. A single trailing slash is tolerated.
    pub fn from_path(path: &str) -> Result<Self, RouteError> {
        let trimmed = match path {
            "" | "/" => "/",
            other => other.strip_suffix('/').unwrap_or(other),
        };
        Self::MENU
            .into_iter()
            .find(|route| route.path() == trimmed)
            .ok_or_else(|| RouteError::UnknownPath(path.to_string()))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl From<Route> for String {
    fn from(route: Route) -> Self {
        route.path().to_string()
    }
}

impl TryFrom<String> for Route {
    type Error = RouteError;

    fn try_from(path: String) -> Result<Self, Self::Error> {
        Route::from_path(&path)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RouteError {
    UnknownPath(String),
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::UnknownPath(path) => write!(f, "no page is registered for path '{}'", path),
        }
    }
}

impl std::error::Error for RouteError {}

// ===== CONFIG TYPES =====

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct PortfolioConfig {
    pub app: AppSection,
    pub overlay: OverlaySection,
    pub menu: MenuSection,
    pub navigation: NavigationSection,
    pub page: PageSection,
    pub layout: LayoutSection,
    pub contact: ContactSection,
}

impl PortfolioConfig {
    /// Parse and validate a TOML document. Missing sections and keys take
    /// their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: PortfolioConfig =
            toml::from_str(source).map_err(|error| ConfigError::Parse(error.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.app.is_supported_version() {
            return Err(ConfigError::UnsupportedVersion(self.app.version.clone()));
        }
        if self.overlay.strip_count == 0 {
            return Err(ConfigError::Invalid {
                field: "overlay.strip_count",
                reason: "at least one strip is required",
            });
        }
        if self.navigation.debounce_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "navigation.debounce_ms",
                reason: "tap feedback needs a non-zero latency",
            });
        }
        if self.layout.compact_breakpoint_px == 0 {
            return Err(ConfigError::Invalid {
                field: "layout.compact_breakpoint_px",
                reason: "breakpoint must be positive",
            });
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AppSection {
    pub version: String,
}

impl AppSection {
    /// Current configuration format version
    pub const CURRENT_VERSION: &'static str = "1.0.0";

    pub fn is_supported_version(&self) -> bool {
        self.version == Self::CURRENT_VERSION
    }
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION.to_string(),
        }
    }
}

/// Strip-wipe timing shared by the page and navbar overlay variants.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct OverlaySection {
    pub strip_count: usize,
    pub enter_step_ms: u64,
    pub exit_step_ms: u64,
    pub strip_enter_duration_ms: u64,
    pub strip_exit_duration_ms: u64,
    pub navbar_hide_after_ms: u64,
    pub page_hide_after_ms: u64,
}

impl Default for OverlaySection {
    fn default() -> Self {
        Self {
            strip_count: 5,
            enter_step_ms: 120,
            exit_step_ms: 100,
            strip_enter_duration_ms: 320,
            strip_exit_duration_ms: 400,
            navbar_hide_after_ms: 1400,
            page_hide_after_ms: 900,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MenuSection {
    pub link_step_ms: u64,
}

impl Default for MenuSection {
    fn default() -> Self {
        Self { link_step_ms: 100 }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct NavigationSection {
    pub debounce_ms: u64,
}

impl Default for NavigationSection {
    fn default() -> Self {
        Self { debounce_ms: 165 }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PageSection {
    pub exit_duration_ms: u64,
    pub enter_duration_ms: u64,
}

impl Default for PageSection {
    fn default() -> Self {
        Self {
            exit_duration_ms: 450,
            enter_duration_ms: 650,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LayoutSection {
    pub compact_breakpoint_px: u32,
}

impl Default for LayoutSection {
    fn default() -> Self {
        Self {
            compact_breakpoint_px: 768,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ContactSection {
    pub submit_latency_ms: u64,
    pub success_reset_ms: u64,
}

impl Default for ContactSection {
    fn default() -> Self {
        Self {
            submit_latency_ms: 1100,
            success_reset_ms: 4000,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Parse(String),
    UnsupportedVersion(String),
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(message) => write!(f, "config parse error: {}", message),
            ConfigError::UnsupportedVersion(version) => {
                write!(f, "unsupported config version '{}'", version)
            }
            ConfigError::Invalid { field, reason } => write!(f, "invalid {}: {}", field, reason),
        }
    }
}

impl std::error::Error for ConfigError {}

// ===== GALLERY TYPES =====

/// One card as consumed by the horizontally scrolling gallery.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GalleryItem {
    pub image_ref: String,
    pub title: String,
    pub description: Option<String>,
    pub media_ref: Option<String>,
    pub link_href: Option<String>,
    pub repo_href: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GalleryParams {
    pub bend_amount: f64,
    pub text_color: String,
    pub corner_radius: f64,
    pub font_spec: String,
    pub scroll_speed: f64,
    pub scroll_ease: f64,
}

impl Default for GalleryParams {
    fn default() -> Self {
        Self {
            bend_amount: 3.0,
            text_color: "#ffffff".to_string(),
            corner_radius: 0.12,
            font_spec: "600 26px Figtree, sans-serif".to_string(),
            scroll_speed: 2.2,
            scroll_ease: 0.07,
        }
    }
}

pub fn project_catalog() -> Vec<GalleryItem> {
    let project = |seed: u8, title: &str, description: &str, clip: &str| GalleryItem {
        image_ref: format!("https://picsum.photos/seed/project{}/800/600", seed),
        title: title.to_string(),
        description: Some(description.to_string()),
        media_ref: Some(format!("https://storage.googleapis.com/coverr-main/mp4/{}.mp4", clip)),
        link_href: Some("#".to_string()),
        repo_href: Some("#".to_string()),
    };
    vec![
        project(
            1,
            "Project One",
            "Interactive 3D gallery built with WebGL demonstrating smooth curved scrolling and performant shaders.",
            "Mt_Baker",
        ),
        project(
            2,
            "Project Two",
            "Full-stack application featuring authentication, real-time updates, and responsive UI components.",
            "Footboys",
        ),
        project(
            3,
            "Project Three",
            "Data visualization dashboard with dynamic charts, dark mode, and accessibility first design.",
            "Night_Street",
        ),
    ]
}

// ===== CONTACT FORM =====

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn field(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Subject => &self.subject,
            ContactField::Message => &self.message,
        }
    }

    pub fn set_field(&mut self, field: ContactField, value: String) {
        match field {
            ContactField::Name => self.name = value,
            ContactField::Email => self.email = value,
            ContactField::Subject => self.subject = value,
            ContactField::Message => self.message = value,
        }
    }

    /// Field errors in form order. Empty map means the form can be sent.
    pub fn validate(&self) -> IndexMap<ContactField, &'static str> {
        let mut errors = IndexMap::new();
        for field in [
            ContactField::Name,
            ContactField::Email,
            ContactField::Subject,
            ContactField::Message,
        ] {
            let raw = self.field(field);
            if raw.trim().is_empty() {
                errors.insert(field, "Required");
            } else if field == ContactField::Email && !is_plausible_email(raw) {
                errors.insert(field, "Invalid email");
            }
        }
        errors
    }
}

fn is_plausible_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    let clean = |part: &str| !part.is_empty() && !part.chars().any(|c| c.is_whitespace() || c == '@');
    if !clean(local) || !clean(domain) {
        return false;
    }
    domain
        .char_indices()
        .any(|(index, c)| c == '.' && index > 0 && index + 1 < domain.len())
}
