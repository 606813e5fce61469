// Viewport - drawing surface minus margins
use super::axis::{AxisDomain, LinearScale};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 80.0,
            bottom: 30.0,
            left: 50.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default)]
    pub margins: Margins,
}

fn default_width() -> f64 {
    960.0
}

fn default_height() -> f64 {
    500.0
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            margins: Margins::default(),
        }
    }
}

impl Viewport {
    pub fn plot_width(&self) -> f64 {
        (self.width - self.margins.left - self.margins.right).max(0.0)
    }

    pub fn plot_height(&self) -> f64 {
        (self.height - self.margins.top - self.margins.bottom).max(0.0)
    }

    pub fn x_scale(&self, domain_x: AxisDomain) -> LinearScale {
        LinearScale::new(domain_x, (0.0, self.plot_width()))
    }

    /// Y grows downwards on screen, so the range is inverted.
    pub fn y_scale(&self, domain_y: AxisDomain) -> LinearScale {
        LinearScale::new(domain_y, (self.plot_height(), 0.0))
    }
}
