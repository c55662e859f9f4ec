use crate::foundation::error::{ChartreelError, ChartreelResult};
use crate::render::raster::Raster;
use std::path::Path;

/// Decode an encoded image (PNG, JPEG, ...) into a premultiplied raster.
pub fn decode_image(bytes: &[u8]) -> ChartreelResult<Raster> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| ChartreelError::asset_load(format!("decode image from memory: {e}")))?;
    Ok(Raster::from_rgba_image(dyn_img.to_rgba8()))
}

/// Read and decode an image file.
pub fn load_image(path: &Path) -> ChartreelResult<Raster> {
    let bytes = std::fs::read(path).map_err(|e| {
        ChartreelError::asset_load(format!("read image '{}': {e}", path.display()))
    })?;
    decode_image(&bytes).map_err(|e| match e {
        ChartreelError::AssetLoad(msg) => {
            ChartreelError::asset_load(format!("'{}': {msg}", path.display()))
        }
        other => other,
    })
}

/// Read and decode an image file, dropping its alpha channel.
pub fn load_opaque_image(path: &Path) -> ChartreelResult<Raster> {
    let bytes = std::fs::read(path).map_err(|e| {
        ChartreelError::asset_load(format!("read image '{}': {e}", path.display()))
    })?;
    let dyn_img = image::load_from_memory(&bytes).map_err(|e| {
        ChartreelError::asset_load(format!("decode image '{}': {e}", path.display()))
    })?;
    let rgb = dyn_img.to_rgb8();
    let (width, height) = rgb.dimensions();
    let mut data = Vec::with_capacity(width as usize * height as usize * 4);
    for px in rgb.pixels() {
        data.extend_from_slice(&[px[0], px[1], px[2], 255]);
    }
    Ok(Raster {
        width,
        height,
        data,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
