//! Image renderers for local documents
//!
//! Raster output crops the document image to the layer, scales it and encodes
//! PNG or JPEG. Vector output wraps the same pixels in an SVG document.

use crate::adapters::host::{
    BoundComponent, Document, RenderKind, RenderedFile, Renderer, RendererFactory,
};
use crate::domain::{AssetportError, Result};
use async_trait::async_trait;
use base64::Engine;
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, ImageFormat};
use std::io::{BufWriter, Cursor, Write};
use std::path::PathBuf;
use std::sync::Arc;

/// JPEG quality used when a component names none
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Output width/height limit used when none is configured
pub const DEFAULT_MAX_DIMENSION: u32 = 16_384;

/// Where and how large the local renderers may write
#[derive(Debug, Clone)]
struct RenderTarget {
    temp_dir: PathBuf,
    max_dimension: u32,
}

/// Creates renderers that write into `temp_dir`
pub struct LocalRendererFactory {
    target: RenderTarget,
}

impl LocalRendererFactory {
    pub fn new(temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            target: RenderTarget {
                temp_dir: temp_dir.into(),
                max_dimension: DEFAULT_MAX_DIMENSION,
            },
        }
    }

    /// Caps output width and height; larger requests fail before any pixels are allocated
    pub fn with_max_dimension(mut self, max_dimension: u32) -> Self {
        self.target.max_dimension = max_dimension.max(1);
        self
    }
}

impl RendererFactory for LocalRendererFactory {
    fn create(&self, kind: RenderKind, _document: Arc<dyn Document>) -> Box<dyn Renderer> {
        match kind {
            RenderKind::Raster => Box::new(RasterRenderer {
                target: self.target.clone(),
            }),
            RenderKind::Vector => Box::new(SvgRenderer {
                target: self.target.clone(),
            }),
        }
    }
}

/// Pixel output (`png`, `jpg`/`jpeg`)
pub struct RasterRenderer {
    target: RenderTarget,
}

#[async_trait]
impl Renderer for RasterRenderer {
    async fn render(&self, component: &BoundComponent) -> Result<RenderedFile> {
        let job = RenderJob::from_component(component, &self.target)?;
        let format = RasterFormat::from_extension(component.description().extension())?;
        let quality = component
            .description()
            .quality()
            .unwrap_or(DEFAULT_JPEG_QUALITY)
            .clamp(1, 100);

        run_blocking(move || {
            let image = job.load()?;
            let mut bytes = Vec::new();
            match format {
                RasterFormat::Png => {
                    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
                }
                RasterFormat::Jpeg => {
                    let rgb = image.to_rgb8();
                    let mut encoder =
                        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut bytes, quality);
                    encoder.encode(
                        rgb.as_raw(),
                        rgb.width(),
                        rgb.height(),
                        ExtendedColorType::Rgb8,
                    )?;
                }
            }
            job.write_temp(format.suffix(), &bytes)
        })
        .await
    }
}

/// Vector output: an SVG embedding the rendered pixels as PNG
pub struct SvgRenderer {
    target: RenderTarget,
}

#[async_trait]
impl Renderer for SvgRenderer {
    async fn render(&self, component: &BoundComponent) -> Result<RenderedFile> {
        let job = RenderJob::from_component(component, &self.target)?;

        run_blocking(move || {
            let image = job.load()?;
            let mut png = Vec::new();
            image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
            let svg = svg_document(image.width(), image.height(), &png);
            job.write_temp(".svg", svg.as_bytes())
        })
        .await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RasterFormat {
    Png,
    Jpeg,
}

impl RasterFormat {
    fn from_extension(extension: &str) -> Result<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "png" => Ok(RasterFormat::Png),
            "jpg" | "jpeg" => Ok(RasterFormat::Jpeg),
            other => Err(AssetportError::Render(format!(
                "Unsupported export format '{other}'"
            ))),
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            RasterFormat::Png => ".png",
            RasterFormat::Jpeg => ".jpg",
        }
    }
}

/// Everything a blocking render needs, detached from the host objects
struct RenderJob {
    source: PathBuf,
    crop: Option<[u32; 4]>,
    scale: f64,
    width: Option<u32>,
    height: Option<u32>,
    target: RenderTarget,
}

impl RenderJob {
    fn from_component(component: &BoundComponent, target: &RenderTarget) -> Result<Self> {
        let document = component.document();
        let source = document.file_path().ok_or_else(|| {
            AssetportError::Render(format!(
                "Document {} has no file to render from",
                document.id()
            ))
        })?;
        let description = component.description();

        Ok(Self {
            source,
            crop: component
                .layer()
                .map(|l| [l.bounds.x, l.bounds.y, l.bounds.width, l.bounds.height]),
            scale: description.scale().unwrap_or(1.0),
            width: description.width(),
            height: description.height(),
            target: target.clone(),
        })
    }

    fn load(&self) -> Result<DynamicImage> {
        let image = image::open(&self.source).map_err(|e| {
            AssetportError::Render(format!("Failed to read {}: {e}", self.source.display()))
        })?;

        let image = match self.crop {
            Some([x, y, width, height]) => {
                if x >= image.width() || y >= image.height() {
                    return Err(AssetportError::Render(format!(
                        "Layer bounds ({x}, {y}) lie outside the {}x{} document",
                        image.width(),
                        image.height()
                    )));
                }
                image.crop_imm(x, y, width, height)
            }
            None => image,
        };

        self.resize(image)
    }

    fn resize(&self, image: DynamicImage) -> Result<DynamicImage> {
        let (w, h) = (image.width(), image.height());
        let (target_w, target_h) = self.output_size(w, h)?;

        if (target_w, target_h) == (w, h) {
            Ok(image)
        } else {
            Ok(image.resize_exact(target_w, target_h, FilterType::Lanczos3))
        }
    }

    /// Output size for a `w`x`h` source, checked against the dimension limit
    fn output_size(&self, w: u32, h: u32) -> Result<(u32, u32)> {
        let (w, h) = (f64::from(w), f64::from(h));
        let (target_w, target_h) = match (self.width, self.height) {
            (Some(tw), Some(th)) => (f64::from(tw), f64::from(th)),
            (Some(tw), None) => (f64::from(tw), proportional(h, f64::from(tw), w)),
            (None, Some(th)) => (proportional(w, f64::from(th), h), f64::from(th)),
            (None, None) => ((w * self.scale).round(), (h * self.scale).round()),
        };

        let limit = f64::from(self.target.max_dimension);
        if !(target_w <= limit && target_h <= limit) {
            return Err(AssetportError::Render(format!(
                "requested size {target_w}x{target_h} exceeds limit of {} pixels per side",
                self.target.max_dimension
            )));
        }
        Ok((target_w.max(1.0) as u32, target_h.max(1.0) as u32))
    }

    fn write_temp(&self, suffix: &str, bytes: &[u8]) -> Result<RenderedFile> {
        let temp_dir = &self.target.temp_dir;
        std::fs::create_dir_all(temp_dir)?;
        let file = tempfile::Builder::new()
            .prefix("assetport-")
            .suffix(suffix)
            .tempfile_in(temp_dir)?;
        let (file, path) = file
            .keep()
            .map_err(|e| AssetportError::Render(format!("Failed to keep temp file: {e}")))?;

        let mut writer = BufWriter::new(file);
        writer.write_all(bytes)?;
        writer.flush()?;

        tracing::debug!(path = %path.display(), bytes = bytes.len(), "Rendered temp file");
        Ok(RenderedFile { path })
    }
}

fn proportional(size: f64, target: f64, reference: f64) -> f64 {
    if reference == 0.0 {
        return target;
    }
    (size * target / reference).round()
}

fn svg_document(width: u32, height: u32, png: &[u8]) -> String {
    let data = base64::engine::general_purpose::STANDARD.encode(png);
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" \
         viewBox=\"0 0 {width} {height}\">\n  \
         <image width=\"{width}\" height=\"{height}\" href=\"data:image/png;base64,{data}\"/>\n\
         </svg>\n"
    )
}

async fn run_blocking<F>(f: F) -> Result<RenderedFile>
where
    F: FnOnce() -> Result<RenderedFile> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AssetportError::Render(format!("Render task failed: {e}")))?
}
