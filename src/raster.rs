//! Displayed-size rasterization and single-pixel sampling
//!
//! An image's transparency at a point depends on how it is *displayed*, not
//! on its intrinsic pixels: a 100×100 source stretched to 150×150 moves
//! every alpha boundary by the same factor. [`sample_scaled_pixel`] therefore
//! draws the source bitmap into an off-screen `tiny-skia` surface matching
//! the element's rendered size and reads back the one pixel of interest.

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::geometry::{Point, Size};
use image::RgbaImage;
use tiny_skia::{FilterQuality, Pixmap, PixmapPaint, PremultipliedColorU8, Transform};

const BYTES_PER_PIXEL: u64 = 4;
/// Upper bound on a single raster surface to avoid pathological allocations.
const MAX_RASTER_BYTES: u64 = 64 * 1024 * 1024;

/// Samples one pixel of `image` as it would appear rendered at `rendered`
/// size.
///
/// `local` is the element-local coordinate of the pixel, in the same units
/// as `rendered`. Coordinates outside the rendered surface fail with
/// [`Error::SamplingOutOfBounds`].
///
/// # Examples
///
/// ```
/// use image::RgbaImage;
/// use opaquepoint::raster::sample_scaled_pixel;
/// use opaquepoint::{Point, Size};
///
/// let mut image = RgbaImage::new(2, 1);
/// image.put_pixel(1, 0, image::Rgba([255, 255, 255, 255]));
///
/// // Rendered at 4x1, the opaque right half starts at x = 2.
/// let rendered = Size::new(4.0, 1.0);
/// let left = sample_scaled_pixel(&image, Point::new(0.0, 0.0), rendered).unwrap();
/// let right = sample_scaled_pixel(&image, Point::new(3.0, 0.0), rendered).unwrap();
/// assert_eq!(left.a, 0);
/// assert_eq!(right.a, 255);
/// ```
pub fn sample_scaled_pixel(image: &RgbaImage, local: Point, rendered: Size) -> Result<Rgba> {
  if rendered.is_empty() {
    return Err(Error::Raster {
      message: format!("rendered size {rendered} is empty"),
    });
  }
  let render_width = checked_dimension(rendered.width, "rendered width")?;
  let render_height = checked_dimension(rendered.height, "rendered height")?;
  guard_dimensions(render_width, render_height)?;

  if local.x < 0.0
    || local.y < 0.0
    || local.x >= render_width as f32
    || local.y >= render_height as f32
  {
    return Err(Error::SamplingOutOfBounds {
      x: local.x,
      y: local.y,
      width: render_width,
      height: render_height,
    });
  }

  let source = pixmap_from_rgba_image(image)?;
  let mut surface = new_pixmap(render_width, render_height)?;
  let scale_x = render_width as f32 / image.width() as f32;
  let scale_y = render_height as f32 / image.height() as f32;
  // Nearest keeps the scaled pixel mapping exact; a smoothing filter would
  // blend alpha across the very boundaries being classified.
  let paint = PixmapPaint {
    quality: FilterQuality::Nearest,
    ..PixmapPaint::default()
  };
  surface.draw_pixmap(
    0,
    0,
    source.as_ref(),
    &paint,
    Transform::from_scale(scale_x, scale_y),
    None,
  );

  let pixel = surface
    .pixel(local.x as u32, local.y as u32)
    .ok_or(Error::SamplingOutOfBounds {
      x: local.x,
      y: local.y,
      width: render_width,
      height: render_height,
    })?
    .demultiply();
  Ok(Rgba::new(pixel.red(), pixel.green(), pixel.blue(), pixel.alpha()))
}

fn checked_dimension(value: f32, what: &str) -> Result<u32> {
  let rounded = value.round();
  if !(rounded >= 1.0 && rounded <= u32::MAX as f32) {
    return Err(Error::Raster {
      message: format!("{what} {value} is not a positive pixel count"),
    });
  }
  Ok(rounded as u32)
}

fn guard_dimensions(width: u32, height: u32) -> Result<()> {
  let bytes = (width as u64)
    .checked_mul(height as u64)
    .and_then(|pixels| pixels.checked_mul(BYTES_PER_PIXEL))
    .ok_or(Error::Raster {
      message: format!("raster byte size overflow ({width}x{height})"),
    })?;
  if bytes > MAX_RASTER_BYTES {
    return Err(Error::Raster {
      message: format!(
        "raster {width}x{height} would allocate {bytes} bytes (limit {MAX_RASTER_BYTES})"
      ),
    });
  }
  Ok(())
}

fn new_pixmap(width: u32, height: u32) -> Result<Pixmap> {
  Pixmap::new(width, height).ok_or(Error::Raster {
    message: format!("raster surface creation failed for {width}x{height}"),
  })
}

fn pixmap_from_rgba_image(image: &RgbaImage) -> Result<Pixmap> {
  guard_dimensions(image.width(), image.height())?;
  let mut pixmap = new_pixmap(image.width(), image.height())?;
  let transparent = PremultipliedColorU8::from_rgba(0, 0, 0, 0).ok_or(Error::Raster {
    message: "premultiplied transparent color rejected".to_string(),
  })?;
  for (target, source) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
    let [r, g, b, a] = source.0;
    *target = PremultipliedColorU8::from_rgba(
      premultiply(r, a),
      premultiply(g, a),
      premultiply(b, a),
      a,
    )
    .unwrap_or(transparent);
  }
  Ok(pixmap)
}

fn premultiply(channel: u8, alpha: u8) -> u8 {
  ((channel as u16 * alpha as u16 + 127) / 255) as u8
}
