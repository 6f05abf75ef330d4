//! Tile conversion pipeline: extract the archive, resolve the band set,
//! convert every band to a COG under the nodata policy for its revision year.
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::core::grammar::FilenameTokens;
use crate::core::inventory::{self, BandInventory};
use crate::core::policy::{self, NoDataPolicy};
use crate::error::Result;
use crate::io::archive;
use crate::io::cog::{self, CogAsset, CogProfile};
use crate::types::BandRole;

/// Output of a tile conversion run: one COG per raster band, the tile-level
/// filename tokens, and the XML sidecar when the archive carried one.
#[derive(Debug, Clone)]
pub struct ConvertedTile {
    pub tokens: FilenameTokens,
    pub cogs: BTreeMap<BandRole, CogAsset>,
    pub metadata: Option<PathBuf>,
}

/// COG file name for a band source: ENVI rasters gain a `.tif` extension,
/// GeoTIFF sources keep their basename.
fn cog_file_name(source_name: &str) -> String {
    if source_name.ends_with(".tif") {
        source_name.to_string()
    } else {
        format!("{source_name}.tif")
    }
}

/// Convert a tile archive or reference file into COGs under `output_directory`.
///
/// Archives are unpacked into a scratch directory that is removed when the run
/// finishes; the XML sidecar, if any, is copied next to the COGs so the output
/// directory is self-contained. The run is fail-fast: the first band that does
/// not convert aborts the tile with no partial record.
pub fn cogify(
    tile_path: &Path,
    output_directory: &Path,
    policy: &NoDataPolicy,
    profile: &CogProfile,
) -> Result<ConvertedTile> {
    fs::create_dir_all(output_directory)?;

    let is_archive = tile_path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(".tar.gz"));

    // The scratch directory must outlive the per-band conversions below.
    let (_scratch, inventory) = if is_archive {
        let scratch = tempfile::tempdir()?;
        let extracted = archive::extract(tile_path, Some(scratch.path()))?;
        (Some(scratch), inventory::resolve_dir(&extracted)?)
    } else {
        (None, inventory::resolve(tile_path)?)
    };

    let tokens = inventory.tokens().clone();
    info!(
        "converting {} ({} raster bands)",
        tokens.item_id(),
        inventory.rasters().count()
    );

    let mut cogs = BTreeMap::new();
    for (role, source) in inventory.rasters() {
        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let outfile = output_directory.join(cog_file_name(&name));
        let nodata = policy.nodata_for(role, tokens.year);
        let pixel_type = policy::dtype_for(role);
        let asset = cog::convert(role, source, &outfile, nodata, pixel_type, profile)?;
        cogs.insert(role, asset);
    }

    let metadata = copy_sidecar(&inventory, output_directory)?;

    Ok(ConvertedTile {
        tokens,
        cogs,
        metadata,
    })
}

/// Carry the XML sidecar into the output directory; it has no raster payload
/// but is declared as a metadata asset on the item.
fn copy_sidecar(inventory: &BandInventory, output_directory: &Path) -> Result<Option<PathBuf>> {
    let Some(source) = inventory.metadata() else {
        return Ok(None);
    };
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let dest = output_directory.join(name);
    if source != dest {
        fs::copy(source, &dest)?;
    }
    Ok(Some(dest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envi_sources_gain_tif_extension() {
        assert_eq!(
            cog_file_name("N00E072_17_sl_HH_F02DAR"),
            "N00E072_17_sl_HH_F02DAR.tif"
        );
    }

    #[test]
    fn tif_sources_keep_their_basename() {
        assert_eq!(
            cog_file_name("N23W161_20_date_F02DAR.tif"),
            "N23W161_20_date_F02DAR.tif"
        );
    }
}
