//! Renderer configuration.
//!
//! Every field has a default matching the reference device: a 400x240
//! panel with 52-byte scanlines, driven at 30 Hz with 2x pixel scaling.
//! A JSON document only needs to name the fields it changes.

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::dither::BayerSize;
use crate::framebuffer::DisplayGeometry;

/// Top-level renderer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Frames per second requested from the host.
    pub refresh_rate: u32,
    /// Integer pixel scale; the drawable grid is the panel size divided by this.
    pub scale: usize,
    /// Physical panel width in pixels.
    pub lcd_columns: usize,
    /// Physical panel height in pixels.
    pub lcd_rows: usize,
    /// Bytes per scanline in the host frame buffer.
    pub row_stride: usize,
    /// Ordered-dither table used for fills.
    pub bayer_size: BayerSize,
    pub camera: CameraConfig,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            refresh_rate: 30,
            scale: 2,
            lcd_columns: 400,
            lcd_rows: 240,
            row_stride: 52,
            bayer_size: BayerSize::X8,
            camera: CameraConfig::default(),
        }
    }
}

/// Projection and camera placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// How far the model is pushed along +z away from the camera.
    pub distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            near: 0.1,
            far: 1000.0,
            distance: 3.0,
        }
    }
}

impl RendererConfig {
    /// Parse a JSON document; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("Failed to parse renderer config")?;
        ensure!(config.refresh_rate > 0, "refresh rate must be positive");
        Ok(config)
    }

    /// Drawable grid after scaling.
    pub fn display_geometry(&self) -> Result<DisplayGeometry> {
        ensure!(self.scale > 0, "display scale must be at least 1");
        DisplayGeometry::new(
            self.lcd_columns / self.scale,
            self.lcd_rows / self.scale,
            self.row_stride,
        )
        .with_context(|| {
            format!(
                "Invalid display geometry {}x{} at scale {}",
                self.lcd_columns, self.lcd_rows, self.scale
            )
        })
    }
}
