//! Icon handles and raster images
//!
//! An [`Icon`] is a cheap, clonable handle. Its identity is its [`IconOrigin`]:
//! two handles built from the same origin compare equal no matter which code
//! path produced them. Only icons loaded from a user file carry decoded pixels;
//! built-in and plugin-resource icons are addressed by resource path and left
//! to the host to paint.

use image::imageops::FilterType;
use image::RgbaImage;
use resvg::{tiny_skia, usvg};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::error::{QuickRunError, Result};

/// File extensions recognized as icons
pub const ICON_EXTENSIONS: &[&str] = &["svg", "png"];

/// Where an icon came from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "origin", rename_all = "snake_case")]
pub enum IconOrigin {
    /// Entry of the compiled-in icon table, by dotted key
    Builtin { key: String, resource: Option<String> },
    /// Resource bundled with a plugin, by owner and absolute-style path
    Resource { owner: String, path: String },
    /// Image file on disk
    File { path: PathBuf },
}

#[derive(Clone)]
pub struct Icon {
    inner: Arc<IconInner>,
}

struct IconInner {
    origin: IconOrigin,
    image: Option<RasterImage>,
}

impl Icon {
    pub fn builtin(key: impl Into<String>, resource: Option<&str>) -> Self {
        Self::from_origin(
            IconOrigin::Builtin {
                key: key.into(),
                resource: resource.map(str::to_string),
            },
            None,
        )
    }

    pub fn resource(owner: impl Into<String>, path: impl Into<String>) -> Self {
        Self::from_origin(
            IconOrigin::Resource {
                owner: owner.into(),
                path: path.into(),
            },
            None,
        )
    }

    /// Load an icon from an image file. SVGs are rasterized at `svg_scale`.
    pub fn load_file(path: &Path, svg_scale: f32) -> Result<Self> {
        let image = if has_extension(path, "svg") {
            RasterImage::from_svg_file(path, svg_scale)?
        } else {
            RasterImage::from_raster_file(path)?
        };
        Ok(Self::from_origin(
            IconOrigin::File {
                path: path.to_path_buf(),
            },
            Some(image),
        ))
    }

    fn from_origin(origin: IconOrigin, image: Option<RasterImage>) -> Self {
        Self {
            inner: Arc::new(IconInner { origin, image }),
        }
    }

    pub fn origin(&self) -> &IconOrigin {
        &self.inner.origin
    }

    /// Decoded pixels, present only for file icons
    pub fn image(&self) -> Option<&RasterImage> {
        self.inner.image.as_ref()
    }

    /// Short human-readable locator, used by the CLI renderers
    pub fn locator(&self) -> String {
        match &self.inner.origin {
            IconOrigin::Builtin { key, .. } => key.clone(),
            IconOrigin::Resource { owner, path } => format!("{}::{}", owner, path),
            IconOrigin::File { path } => path.to_string_lossy().to_string(),
        }
    }
}

impl PartialEq for Icon {
    fn eq(&self, other: &Self) -> bool {
        self.inner.origin == other.inner.origin
    }
}

impl Eq for Icon {}

impl fmt::Debug for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Icon")
            .field("origin", &self.inner.origin)
            .field("decoded", &self.inner.image.is_some())
            .finish()
    }
}

impl Serialize for Icon {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.inner.origin.serialize(serializer)
    }
}

/// Longest side an SVG is rasterized at; larger documents are scaled down
pub const MAX_SVG_RASTER_SIDE: u32 = 1024;

/// Straight-alpha RGBA pixels
#[derive(Debug, Clone)]
pub struct RasterImage {
    pixels: RgbaImage,
}

impl RasterImage {
    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    pub fn from_raster_file(path: &Path) -> Result<Self> {
        let reader = image::ImageReader::open(path)
            .map_err(|e| QuickRunError::io(path, e))?
            .with_guessed_format()
            .map_err(|e| QuickRunError::io(path, e))?;
        let decoded = reader.decode().map_err(|source| QuickRunError::ImageDecode {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_rgba(decoded.to_rgba8()))
    }

    pub fn from_svg_file(path: &Path, scale: f32) -> Result<Self> {
        let data = std::fs::read(path).map_err(|e| QuickRunError::io(path, e))?;
        let svg_error = |message: String| QuickRunError::SvgParse {
            path: path.to_path_buf(),
            message,
        };

        let tree = usvg::Tree::from_data(&data, &usvg::Options::default())
            .map_err(|e| svg_error(e.to_string()))?;

        let size = tree.size();
        let longest = size.width().max(size.height()) * scale;
        let scale = if longest > MAX_SVG_RASTER_SIDE as f32 {
            scale * MAX_SVG_RASTER_SIDE as f32 / longest
        } else {
            scale
        };
        let width = ((size.width() * scale).round() as u32).clamp(1, MAX_SVG_RASTER_SIDE);
        let height = ((size.height() * scale).round() as u32).clamp(1, MAX_SVG_RASTER_SIDE);

        let mut pixmap = tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| svg_error(format!("invalid raster size {}x{}", width, height)))?;
        resvg::render(
            &tree,
            tiny_skia::Transform::from_scale(scale, scale),
            &mut pixmap.as_mut(),
        );

        // tiny-skia stores premultiplied alpha
        let mut data = pixmap.take();
        for px in data.chunks_exact_mut(4) {
            let a = px[3];
            if a == 0 {
                px.copy_from_slice(&[0, 0, 0, 0]);
            } else if a < 255 {
                for c in &mut px[..3] {
                    *c = ((*c as u32 * 255 + a as u32 / 2) / a as u32).min(255) as u8;
                }
            }
        }

        let pixels = RgbaImage::from_raw(width, height, data)
            .ok_or_else(|| svg_error("pixel buffer size mismatch".to_string()))?;
        Ok(Self::from_rgba(pixels))
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Scale down proportionally so neither side exceeds `max`; never upscales
    pub fn fit_within(&self, max: u32) -> RasterImage {
        let max = max.max(1);
        let (w, h) = (self.width().max(1), self.height().max(1));
        if w <= max && h <= max {
            return self.clone();
        }

        let scale = f64::min(max as f64 / w as f64, max as f64 / h as f64);
        let out_w = ((w as f64 * scale).round() as u32).max(1);
        let out_h = ((h as f64 * scale).round() as u32).max(1);
        Self::from_rgba(image::imageops::resize(
            &self.pixels,
            out_w,
            out_h,
            FilterType::Triangle,
        ))
    }
}

/// Case-insensitive extension check
pub fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}

/// Whether a file name ends in one of [`ICON_EXTENSIONS`]
pub fn is_icon_file_name(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    ICON_EXTENSIONS
        .iter()
        .any(|ext| lower.len() > ext.len() + 1 && lower.ends_with(&format!(".{}", ext)))
}
