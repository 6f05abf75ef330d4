//! High-level, ergonomic library API: convert a tile archive to COGs, derive
//! its STAC item, and build collection records. Prefer these entrypoints over
//! the low-level `core` modules when embedding PALSARCOG in another
//! application.
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::core::params::ConversionParams;
use crate::core::pipeline::{self, ConvertedTile};
use crate::error::Result;
use crate::io::cog::CogProfile;
use crate::io::gdal::RasterHeader;
use crate::stac::collection;
use crate::stac::item::{self, ItemOptions, ValidationError};
use crate::stac::model::{StacCollection, StacItem};
use crate::types::Product;

/// Optional hook applied to hrefs before remote reads and on every declared
/// asset href (e.g. SAS-token signing for blob storage).
pub type HrefRewrite<'a> = &'a dyn Fn(&str) -> String;

/// Result of a full tile run: the COG set and the derived item record.
/// Moving the produced files to durable storage is the caller's job.
#[derive(Debug, Clone)]
pub struct ProcessedTile {
    pub converted: ConvertedTile,
    pub item: StacItem,
}

/// Convert a tile archive or reference file into COGs under `output_dir`.
pub fn cogify_tile(
    input: &Path,
    output_dir: &Path,
    params: &ConversionParams,
) -> Result<ConvertedTile> {
    let profile = CogProfile {
        overview_blocksize: params.overview_blocksize,
    };
    pipeline::cogify(input, output_dir, &params.policy(), &profile)
}

/// Derive the STAC item of a converted tile.
///
/// The header of one reference band is read to establish geometry; the
/// rewrite hook, when given, is applied once to that href before the read and
/// once to every asset href in the record.
pub fn create_item(
    converted: &ConvertedTile,
    params: &ConversionParams,
    rewrite: Option<HrefRewrite<'_>>,
) -> Result<StacItem> {
    let reference = converted
        .cogs
        .values()
        .next()
        .ok_or_else(|| ValidationError::NoReferenceBand(converted.tokens.item_id()))?;

    let href = reference.path.display().to_string();
    let href = match rewrite {
        Some(rewrite) => rewrite(&href),
        None => href,
    };
    let header = RasterHeader::open(&href)?;

    let options = ItemOptions {
        base_url: params.base_url.as_deref(),
        root_href: None,
        rewrite,
    };
    let item = item::derive(
        &converted.tokens,
        &converted.cogs,
        converted.metadata.as_deref(),
        &header,
        &options,
    )?;
    Ok(item)
}

/// Full pipeline: cogify, then derive the item record.
pub fn process_tile(
    input: &Path,
    output_dir: &Path,
    params: &ConversionParams,
    rewrite: Option<HrefRewrite<'_>>,
) -> Result<ProcessedTile> {
    let converted = cogify_tile(input, output_dir, params)?;
    let item = create_item(&converted, params, rewrite)?;
    info!("derived item {}", item.id);
    Ok(ProcessedTile { converted, item })
}

/// Build the collection record of a product family.
pub fn create_collection(product: Product) -> StacCollection {
    collection::create_collection(product)
}

/// Write an item record as `{id}.json` under `directory`.
pub fn write_item_json(item: &StacItem, directory: &Path) -> Result<PathBuf> {
    let path = directory.join(format!("{}.json", item.id));
    fs::write(&path, serde_json::to_string_pretty(item)?)?;
    Ok(path)
}

/// Write a collection record as `{id}.json` under `directory`.
pub fn write_collection_json(collection: &StacCollection, directory: &Path) -> Result<PathBuf> {
    let path = directory.join(format!("{}.json", collection.id));
    fs::write(&path, serde_json::to_string_pretty(collection)?)?;
    Ok(path)
}
