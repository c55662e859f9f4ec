use crate::assets::decode::load_image;
use crate::config::settings::RenderSettings;
use crate::foundation::error::{ChartreelError, ChartreelResult};
use crate::render::raster::Raster;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

#[derive(Debug, Deserialize)]
struct ManifestDef {
    frames: BTreeMap<String, FrameEntryDef>,
}

#[derive(Debug, Deserialize)]
struct FrameEntryDef {
    frame: RectDef,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct RectDef {
    x: u32,
    y: u32,
    w: u32,
    h: u32,
}

/// Immutable name → sprite region mapping.
///
/// Regions are cropped out of their sheets and premultiplied once, at construction. A session
/// borrows the atlas for every frame it renders; nothing mutates it afterwards.
#[derive(Debug, Clone, Default)]
pub struct SpriteAtlas {
    regions: HashMap<String, Raster>,
}

impl SpriteAtlas {
    /// Build an atlas from already extracted regions.
    pub fn from_regions(regions: impl IntoIterator<Item = (String, Raster)>) -> Self {
        Self {
            regions: regions.into_iter().collect(),
        }
    }

    /// Load the `lane <id>`, `note <id>` and `common` packs named by `settings`.
    ///
    /// A pack that does not exist for a configured skin id is a configuration error; any other
    /// missing or malformed file is an asset error.
    #[tracing::instrument(skip(settings), fields(lane = %settings.lane_skin_id, note = %settings.note_skin_id))]
    pub fn load(settings: &RenderSettings) -> ChartreelResult<Self> {
        let mut regions = HashMap::new();
        let packs = [
            (format!("lane {}", settings.lane_skin_id), Some("lane skin id")),
            (format!("note {}", settings.note_skin_id), Some("note skin id")),
            ("common".to_owned(), None),
        ];

        for (pack, skin_field) in packs {
            let manifest_path = settings.asset_path(format!("{pack}.json"));
            if let Some(field) = skin_field
                && !manifest_path.exists()
            {
                return Err(ChartreelError::configuration(format!(
                    "unknown {field}: no atlas manifest at '{}'",
                    manifest_path.display()
                )));
            }
            let sheet_path = settings.asset_path(format!("{pack}.png"));
            let added = add_pack(&mut regions, &manifest_path, &sheet_path)?;
            tracing::debug!(pack = %pack, regions = added, "loaded atlas pack");
        }

        Ok(Self { regions })
    }

    /// Crop every region listed in `manifest_json` out of `sheet`.
    pub fn from_sheet(manifest_json: &[u8], sheet: &Raster) -> ChartreelResult<Self> {
        let mut regions = HashMap::new();
        extract_regions(&mut regions, manifest_json, sheet)?;
        Ok(Self { regions })
    }

    /// Region stored under `name`.
    pub fn region(&self, name: &str) -> ChartreelResult<&Raster> {
        self.regions
            .get(name)
            .ok_or_else(|| ChartreelError::asset_load(format!("atlas has no sprite '{name}'")))
    }

    /// Return `true` when a region named `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.regions.contains_key(name)
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Return `true` when the atlas holds no regions.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

fn add_pack(
    regions: &mut HashMap<String, Raster>,
    manifest_path: &Path,
    sheet_path: &Path,
) -> ChartreelResult<usize> {
    let manifest = std::fs::read(manifest_path).map_err(|e| {
        ChartreelError::asset_load(format!(
            "read atlas manifest '{}': {e}",
            manifest_path.display()
        ))
    })?;
    let sheet = load_image(sheet_path)?;
    extract_regions(regions, &manifest, &sheet).map_err(|e| match e {
        ChartreelError::AssetLoad(msg) => {
            ChartreelError::asset_load(format!("'{}': {msg}", manifest_path.display()))
        }
        other => other,
    })
}

fn extract_regions(
    regions: &mut HashMap<String, Raster>,
    manifest_json: &[u8],
    sheet: &Raster,
) -> ChartreelResult<usize> {
    let manifest: ManifestDef = serde_json::from_slice(manifest_json)
        .map_err(|e| ChartreelError::asset_load(format!("parse atlas manifest: {e}")))?;

    let count = manifest.frames.len();
    for (name, entry) in manifest.frames {
        let RectDef { x, y, w, h } = entry.frame;
        let region = sheet
            .crop(x, y, w, h)
            .map_err(|e| ChartreelError::asset_load(format!("sprite '{name}': {e}")))?;
        regions.insert(name, region);
    }
    Ok(count)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/atlas.rs"]
mod tests;
