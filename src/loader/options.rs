//! Loading options and configuration.

/// Scale used for grid previews (72 dpi × 0.2).
pub const DEFAULT_THUMBNAIL_SCALE: f32 = 0.2;

/// Options for loading a source document and rendering its previews.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Error handling mode for per-page work (thumbnails)
    pub error_mode: ErrorMode,

    /// Preview scale relative to 72 dpi
    pub thumbnail_scale: f32,

    /// Whether to render previews in parallel
    pub parallel: bool,
}

impl LoadOptions {
    /// Create new load options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip pages that fail to render).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set the preview scale; non-positive values fall back to the default.
    pub fn with_thumbnail_scale(mut self, scale: f32) -> Self {
        self.thumbnail_scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            DEFAULT_THUMBNAIL_SCALE
        };
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            thumbnail_scale: DEFAULT_THUMBNAIL_SCALE,
            parallel: true,
        }
    }
}

/// Error handling mode for per-page work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any error
    #[default]
    Strict,
    /// Log the failing page and continue
    Lenient,
}
