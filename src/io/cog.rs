//! Cloud-Optimized GeoTIFF conversion via the GDAL `COG` driver.
//!
//! Each band of a tile is copied into a deflate-compressed, internally
//! overviewed COG. The nodata value is stamped on the source band first so the
//! copy carries it into the output and its overviews.
use std::path::{Path, PathBuf};

use gdal::errors::GdalError as GdalCrateError;
use gdal::raster::RasterCreationOptions;
use gdal::{Dataset, DatasetOptions, DriverManager, GdalOpenFlags};
use thiserror::Error;
use tracing::info;

use crate::types::{BandRole, PixelType};

/// Errors encountered while converting a band to COG
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("GDAL error: {0}")]
    Gdal(#[from] GdalCrateError),
    #[error("source raster has no bands: {0}")]
    NoBands(String),
}

/// Codec profile applied to every band of a run.
#[derive(Debug, Clone, Copy)]
pub struct CogProfile {
    /// Block size of the internal overview tiles
    pub overview_blocksize: u32,
}

impl Default for CogProfile {
    fn default() -> Self {
        Self {
            overview_blocksize: 128,
        }
    }
}

/// A converted band: the produced artifact and the policy applied to it.
#[derive(Debug, Clone)]
pub struct CogAsset {
    pub role: BandRole,
    pub path: PathBuf,
    pub pixel_type: PixelType,
    pub nodata: u8,
}

/// Convert one band raster into a COG at `output`.
///
/// Writes exactly one file and never deletes the input. Failures from the
/// underlying codec are wrapped and propagated; retries belong to the caller.
pub fn convert(
    role: BandRole,
    input: &Path,
    output: &Path,
    nodata: u8,
    pixel_type: PixelType,
    profile: &CogProfile,
) -> Result<CogAsset, ConversionError> {
    gdal::config::set_config_option("GDAL_NUM_THREADS", "ALL_CPUS")?;
    gdal::config::set_config_option("GDAL_TIFF_INTERNAL_MASK", "TRUE")?;
    gdal::config::set_config_option(
        "GDAL_TIFF_OVR_BLOCKSIZE",
        &profile.overview_blocksize.to_string(),
    )?;

    // Update access: the nodata value must live on the source band so the COG
    // copy and its overviews inherit it.
    let source = Dataset::open_ex(
        input,
        DatasetOptions {
            open_flags: GdalOpenFlags::GDAL_OF_RASTER | GdalOpenFlags::GDAL_OF_UPDATE,
            ..Default::default()
        },
    )?;
    if source.raster_count() == 0 {
        return Err(ConversionError::NoBands(input.display().to_string()));
    }
    {
        let mut band = source.rasterband(1)?;
        band.set_no_data_value(Some(f64::from(nodata)))?;
    }

    let driver = DriverManager::get_driver_by_name("COG")?;
    let options = RasterCreationOptions::from_iter([
        "COMPRESS=DEFLATE",
        "BIGTIFF=IF_SAFER",
        "NUM_THREADS=ALL_CPUS",
    ]);
    info!("creating COG {} ({} band)", output.display(), role);
    source.create_copy(&driver, output, &options)?;

    Ok(CogAsset {
        role,
        path: output.to_path_buf(),
        pixel_type,
        nodata,
    })
}
