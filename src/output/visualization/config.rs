//! Plot configuration

use plotters::prelude::*;

/// Configuration for customizing plots
///
/// # Example
///
/// ```rust
/// use sugar_rs::output::visualization::PlotConfig;
/// use plotters::prelude::*;
///
/// let mut config = PlotConfig::sweep("Impact of Inflow/Outflow Rate (R)");
/// config.width = 1920;
/// config.series_colors = Some(vec![RED, BLUE]);
/// assert_eq!(config.ylabel, "Sugar Quantity (g)");
/// ```
#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 768)
    pub height: u32,

    /// Plot title (default: "Plot")
    pub title: String,

    /// X-axis label (default: "Time (minutes)")
    pub xlabel: String,

    /// Y-axis label (default: "Sugar Quantity (g)")
    pub ylabel: String,

    /// Optional colors, one per curve
    ///
    /// Curves past the end of the list, or every curve when `None`, take
    /// the default palette.
    pub series_colors: Option<Vec<RGBColor>>,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Line width in pixels (default: 2)
    pub line_width: u32,

    /// Show grid lines (default: true)
    pub show_grid: bool,

    /// Show the legend box (default: true)
    pub show_legend: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Plot".to_string(),
            xlabel: "Time (minutes)".to_string(),
            ylabel: "Sugar Quantity (g)".to_string(),
            series_colors: None,
            background: WHITE,
            line_width: 2,
            show_grid: true,
            show_legend: true,
        }
    }
}

/// Helper trait to accept both `String` and `None` for optional titles
pub trait IntoOptionalTitle {
    fn into_optional_title(self) -> Option<String>;
}

impl IntoOptionalTitle for &str {
    fn into_optional_title(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoOptionalTitle for String {
    fn into_optional_title(self) -> Option<String> {
        Some(self)
    }
}

impl<T: IntoOptionalTitle> IntoOptionalTitle for Option<T> {
    fn into_optional_title(self) -> Option<String> {
        self.and_then(|t| t.into_optional_title())
    }
}

/// No custom title: the plot type's default is used
pub const NO_TITLE: Option<&str> = None;

impl PlotConfig {
    /// Sugar quantity against time, one curve per swept value
    ///
    /// Title defaults to "Sugar Quantity".
    ///
    /// ```rust
    /// use sugar_rs::output::visualization::{PlotConfig, NO_TITLE};
    ///
    /// assert_eq!(PlotConfig::sweep(NO_TITLE).title, "Sugar Quantity");
    /// assert_eq!(PlotConfig::sweep(format!("Goal {}", "A")).title, "Goal A");
    /// ```
    pub fn sweep(title: impl IntoOptionalTitle) -> Self {
        Self {
            xlabel: "Time (minutes)".to_string(),
            ylabel: "Sugar Quantity (g)".to_string(),
            title: title
                .into_optional_title()
                .unwrap_or_else(|| "Sugar Quantity".to_string()),
            ..Self::default()
        }
    }

    pub fn with_colors(mut self, colors: Vec<RGBColor>) -> Self {
        self.series_colors = Some(colors);
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Color of the curve at `index`
    pub(crate) fn series_color(&self, index: usize) -> RGBColor {
        if let Some(color) = self.series_colors.as_ref().and_then(|c| c.get(index)) {
            return *color;
        }

        const PALETTE: [RGBColor; 10] = [
            RGBColor(31, 119, 180),
            RGBColor(255, 127, 14),
            RGBColor(44, 160, 44),
            RGBColor(214, 39, 40),
            RGBColor(148, 103, 189),
            RGBColor(140, 86, 75),
            RGBColor(227, 119, 194),
            RGBColor(127, 127, 127),
            RGBColor(188, 189, 34),
            RGBColor(23, 190, 207),
        ];

        PALETTE[index % PALETTE.len()]
    }
}

// =================================================================================================
// Tests
// =================================================================================================
