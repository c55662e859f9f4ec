use crate::foundation::core::Point;
use crate::foundation::error::{ChartreelError, ChartreelResult};
use crate::foundation::math::trunc_px;
use crate::render::composite::over;
use image::imageops::FilterType;

/// Premultiplied RGBA8 pixel buffer, used for output frames and sprite regions alike.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl Raster {
    /// Fully transparent raster.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    /// Raster filled with one premultiplied pixel value.
    pub fn filled(width: u32, height: u32, px: [u8; 4]) -> Self {
        Self {
            width,
            height,
            data: px.repeat(width as usize * height as usize),
        }
    }

    /// Take ownership of a straight-alpha RGBA image, premultiplying it.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let mut data = img.into_raw();
        premultiply_rgba8_in_place(&mut data);
        Self {
            width,
            height,
            data,
        }
    }

    /// Return `true` when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Pixel at `(x, y)`, or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset(x, y);
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Sub-rectangle copy; the rectangle must lie inside the raster.
    pub fn crop(&self, x: u32, y: u32, width: u32, height: u32) -> ChartreelResult<Self> {
        let fits = x
            .checked_add(width)
            .zip(y.checked_add(height))
            .is_some_and(|(r, b)| r <= self.width && b <= self.height);
        if !fits {
            return Err(ChartreelError::asset_load(format!(
                "region {width}x{height}+{x}+{y} exceeds sheet bounds {}x{}",
                self.width, self.height
            )));
        }

        let mut out = Self::new(width, height);
        let row_bytes = width as usize * 4;
        for row in 0..height {
            let src = self.offset(x, y + row);
            let dst = out.offset(0, row);
            out.data[dst..dst + row_bytes].copy_from_slice(&self.data[src..src + row_bytes]);
        }
        Ok(out)
    }

    /// Resample to `width`x`height`. Equal dimensions return an exact copy.
    ///
    /// Color channels are clamped to alpha afterwards, since the filter can overshoot.
    pub fn resized(&self, width: u32, height: u32) -> ChartreelResult<Self> {
        if width == self.width && height == self.height {
            return Ok(self.clone());
        }
        let view = image::ImageBuffer::<image::Rgba<u8>, &[u8]>::from_raw(
            self.width,
            self.height,
            self.data.as_slice(),
        )
        .ok_or_else(|| ChartreelError::asset_load("raster buffer does not match its dimensions"))?;
        let mut data = image::imageops::resize(&view, width, height, FilterType::CatmullRom)
            .into_raw();
        for px in data.chunks_exact_mut(4) {
            let a = px[3];
            for c in &mut px[..3] {
                *c = (*c).min(a);
            }
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Source-over composite `src` with its top-left at `(x, y)`; clipped to this raster.
    pub fn draw_over(&mut self, src: &Raster, x: i64, y: i64) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + i64::from(src.width)).min(i64::from(self.width));
        let y1 = (y + i64::from(src.height)).min(i64::from(self.height));
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        for dy in y0..y1 {
            for dx in x0..x1 {
                let s = src.offset((dx - x) as u32, (dy - y) as u32);
                let d = self.offset(dx as u32, dy as u32);
                let sp = [
                    src.data[s],
                    src.data[s + 1],
                    src.data[s + 2],
                    src.data[s + 3],
                ];
                if sp[3] == 0 {
                    continue;
                }
                let dp = [
                    self.data[d],
                    self.data[d + 1],
                    self.data[d + 2],
                    self.data[d + 3],
                ];
                self.data[d..d + 4].copy_from_slice(&over(dp, sp));
            }
        }
    }

    /// Composite `src` centered on `center`, anchored at `trunc(center - size / 2)`.
    pub fn paste_center(&mut self, src: &Raster, center: Point) {
        let (x, y) = center_anchor(src, center);
        self.draw_over(src, x, y);
    }

    /// Copy into an [`image::RgbaImage`] (pixels stay premultiplied).
    pub fn to_rgba_image(&self) -> ChartreelResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| ChartreelError::encode("raster buffer does not match its dimensions"))
    }
}

/// Top-left pixel at which `src` lands when centered on `center`.
pub(crate) fn center_anchor(src: &Raster, center: Point) -> (i64, i64) {
    (
        trunc_px(center.x - f64::from(src.width) / 2.0),
        trunc_px(center.y - f64::from(src.height) / 2.0),
    )
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
