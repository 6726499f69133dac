//! Display and file export of rendered figures.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use sankey_core::{Result, SankeyError};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::render::SankeyFigure;

/// Raster export width in pixels.
pub const PNG_WIDTH: usize = 700;
/// Raster export height in pixels.
pub const PNG_HEIGHT: usize = 500;
/// Raster export scale factor.
pub const PNG_SCALE: f64 = 2.0;

/// What to do with a finished figure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SaveAs {
    /// Open it in the default browser.
    #[default]
    Display,
    /// Write a standalone HTML document.
    Html,
    /// Write a PNG image (requires the `png` feature).
    Png,
}

impl SaveAs {
    /// File extension written, if any.
    #[must_use]
    pub const fn extension(&self) -> Option<&'static str> {
        match self {
            Self::Display => None,
            Self::Html => Some("html"),
            Self::Png => Some("png"),
        }
    }
}

impl FromStr for SaveAs {
    type Err = SankeyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "png" => Ok(Self::Png),
            "show" | "display" => Ok(Self::Display),
            other => Err(SankeyError::InvalidParameter(format!(
                "unknown output {other:?}, expected html, png or show"
            ))),
        }
    }
}

impl fmt::Display for SaveAs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension().unwrap_or("show"))
    }
}

/// `{dir}/{ticker}{year}.{ext}`, or `None` when nothing is written.
#[must_use]
pub fn output_path(dir: &Path, ticker: &str, year: i32, save_as: SaveAs) -> Option<PathBuf> {
    save_as
        .extension()
        .map(|ext| dir.join(format!("{ticker}{year}.{ext}")))
}

/// File `save_as` writes for `figure`, under `dir` or the current directory.
///
/// The current directory is only looked up for outputs that write a file.
pub fn destination(
    figure: &SankeyFigure,
    save_as: SaveAs,
    dir: Option<&Path>,
) -> Result<Option<PathBuf>> {
    if save_as.extension().is_none() {
        return Ok(None);
    }
    let dir = match dir {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir()?,
    };
    Ok(output_path(&dir, figure.ticker().as_str(), figure.year(), save_as))
}

/// Show or write `figure`.
///
/// Files go to `dir`, or the current working directory when `None`, and
/// replace any existing file of the same name. Returns the written path.
pub fn export(figure: &SankeyFigure, save_as: SaveAs, dir: Option<&Path>) -> Result<Option<PathBuf>> {
    let Some(path) = destination(figure, save_as, dir)? else {
        figure.plot().show();
        return Ok(None);
    };

    match save_as {
        SaveAs::Html => std::fs::write(&path, figure.to_html())?,
        SaveAs::Png => write_png(figure, &path)?,
        SaveAs::Display => {}
    }

    info!(path = %path.display(), "Exported figure");
    Ok(Some(path))
}

#[cfg(feature = "png")]
fn write_png(figure: &SankeyFigure, path: &Path) -> Result<()> {
    figure
        .plot()
        .write_image(path, plotly::ImageFormat::PNG, PNG_WIDTH, PNG_HEIGHT, PNG_SCALE)
        .map_err(|e| SankeyError::Export(format!("{}: {e}", path.display())))
}

#[cfg(not(feature = "png"))]
fn write_png(_figure: &SankeyFigure, _path: &Path) -> Result<()> {
    Err(SankeyError::NotSupported(
        "PNG export requires the `png` feature".to_string(),
    ))
}

impl SankeyFigure {
    /// Show or write the figure; see [`export`].
    pub fn show(&self, save_as: SaveAs, dir: Option<&Path>) -> Result<Option<PathBuf>> {
        export(self, save_as, dir)
    }
}
