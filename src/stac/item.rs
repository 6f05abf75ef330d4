//! Metadata derivation: build the item record for a converted tile from its
//! filename tokens, its band set, and the header of one reference raster.
//! Derivation is pure — every field comes from the naming convention, the
//! header, or the fixed tables in `constants`; nothing is defaulted when an
//! input is missing or inconsistent.
use std::collections::BTreeMap;
use std::path::Path;

use chrono::{SecondsFormat, TimeZone, Utc};
use serde_json::{Value, json};
use thiserror::Error;

use crate::core::grammar::FilenameTokens;
use crate::io::cog::CogAsset;
use crate::io::gdal::RasterHeader;
use crate::stac::constants;
use crate::stac::model::{
    Asset, Link, MEDIA_TYPE_COG, MEDIA_TYPE_JSON, MEDIA_TYPE_XML, STAC_VERSION, StacItem,
};
use crate::types::{BandRole, PolarizationCount, Product};

/// Errors raised while deriving a metadata record.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error(
        "reference raster is not geographic EPSG:{expected} (found {found:?}); this pipeline does not reproject",
        expected = constants::EPSG
    )]
    NotGeographic { found: Option<u32> },

    #[error("tile {0} has no raster asset to derive geometry from")]
    NoReferenceBand(String),
}

/// Options of one derivation run.
pub struct ItemOptions<'a> {
    /// Root URL under which the COGs are published; local paths when absent.
    pub base_url: Option<&'a str>,
    /// Root href for the collection link; falls back to `base_url`, then `.`.
    pub root_href: Option<&'a str>,
    /// Hook applied exactly once to every declared asset href (URL signing).
    pub rewrite: Option<&'a dyn Fn(&str) -> String>,
}

impl Default for ItemOptions<'_> {
    fn default() -> Self {
        Self {
            base_url: None,
            root_href: None,
            rewrite: None,
        }
    }
}

impl ItemOptions<'_> {
    fn href_for(&self, path: &Path) -> String {
        let href = match self.base_url {
            Some(base) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                format!("{}/{}", base.trim_end_matches('/'), name)
            }
            None => path.display().to_string(),
        };
        match self.rewrite {
            Some(rewrite) => rewrite(&href),
            None => href,
        }
    }
}

/// Derive the STAC item of a converted tile.
///
/// Hard precondition: the reference raster must already be geographic
/// EPSG:4326. A violation is a `ValidationError`, never a silently wrong
/// geometry.
pub fn derive(
    tokens: &FilenameTokens,
    cogs: &BTreeMap<BandRole, CogAsset>,
    metadata: Option<&Path>,
    header: &RasterHeader,
    options: &ItemOptions<'_>,
) -> Result<StacItem, ValidationError> {
    if header.epsg != Some(constants::EPSG) {
        return Err(ValidationError::NotGeographic {
            found: header.epsg,
        });
    }
    if cogs.is_empty() {
        return Err(ValidationError::NoReferenceBand(tokens.item_id()));
    }

    let product = tokens.product();
    let collection_id = product.collection_id();

    let [west, south, east, north] = header.bounds();
    let bbox = vec![west, south, east, north];
    let geometry = json!({
        "type": "Polygon",
        "coordinates": [[
            [west, south],
            [east, south],
            [east, north],
            [west, north],
            [west, south],
        ]],
    });

    let item = StacItem {
        type_: "Feature".to_string(),
        stac_version: STAC_VERSION.to_string(),
        stac_extensions: extensions_for(product),
        id: tokens.item_id(),
        geometry,
        bbox,
        properties: properties_for(tokens, header, product),
        links: links_for(collection_id, options),
        assets: assets_for(cogs, metadata, product, options),
        collection: Some(collection_id.to_string()),
    };

    Ok(item)
}

fn extensions_for(product: Product) -> Vec<String> {
    let mut extensions = vec![
        constants::CLASSIFICATION_EXTENSION.to_string(),
        constants::PROJECTION_EXTENSION.to_string(),
        constants::RASTER_EXTENSION.to_string(),
    ];
    if product == Product::Mos {
        extensions.push(constants::SAR_EXTENSION.to_string());
        extensions.push(constants::SAT_EXTENSION.to_string());
    }
    extensions
}

fn properties_for(
    tokens: &FilenameTokens,
    header: &RasterHeader,
    product: Product,
) -> BTreeMap<String, Value> {
    let year = tokens.full_year();
    let start = Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(year, 12, 31, 23, 59, 59).unwrap();
    let (platform, instrument) = constants::platform_for_year(tokens.year);

    let mut properties = BTreeMap::new();
    properties.insert(
        "datetime".to_string(),
        json!(start.to_rfc3339_opts(SecondsFormat::Secs, true)),
    );
    properties.insert(
        "start_datetime".to_string(),
        json!(start.to_rfc3339_opts(SecondsFormat::Secs, true)),
    );
    properties.insert(
        "end_datetime".to_string(),
        json!(end.to_rfc3339_opts(SecondsFormat::Secs, true)),
    );
    properties.insert("platform".to_string(), json!(platform));
    properties.insert("instruments".to_string(), json!([instrument]));
    properties.insert("gsd".to_string(), json!(constants::GSD));

    properties.insert("proj:epsg".to_string(), json!(constants::EPSG));
    properties.insert("proj:bbox".to_string(), json!(header.bounds()));
    properties.insert("proj:shape".to_string(), json!(header.shape()));
    properties.insert("proj:transform".to_string(), json!(header.proj_transform()));

    if product == Product::Mos {
        let observation = &tokens.observation;
        properties.insert(
            "sar:frequency_band".to_string(),
            json!(constants::FREQUENCY_BAND),
        );
        properties.insert(
            "sar:polarizations".to_string(),
            json!(observation.polarizations.channels()),
        );
        properties.insert(
            "sar:instrument_mode".to_string(),
            json!(observation.mode.to_string()),
        );
        properties.insert("sar:product_type".to_string(), json!(constants::PRODUCT_TYPE));
        properties.insert(
            "sat:orbit_state".to_string(),
            json!(observation.orbit_state.as_str()),
        );
        if observation.polarizations == PolarizationCount::Dual {
            properties.insert(
                "palsar:correction_factor".to_string(),
                json!(constants::CORRECTION_FACTOR_DB),
            );
        }
    }

    properties
}

fn links_for(collection_id: &str, options: &ItemOptions<'_>) -> Vec<Link> {
    let root = options
        .root_href
        .or(options.base_url)
        .unwrap_or(".")
        .trim_end_matches('/');

    vec![
        Link {
            rel: "collection".to_string(),
            href: format!("{root}/{collection_id}.json"),
            type_: Some(MEDIA_TYPE_JSON.to_string()),
            title: None,
        },
        constants::handbook_link(),
    ]
}

fn assets_for(
    cogs: &BTreeMap<BandRole, CogAsset>,
    metadata: Option<&Path>,
    product: Product,
    options: &ItemOptions<'_>,
) -> BTreeMap<String, Asset> {
    let mut assets = BTreeMap::new();

    for (role, cog) in cogs {
        let mut extra = BTreeMap::new();
        extra.insert(
            "raster:bands".to_string(),
            json!([{
                "data_type": cog.pixel_type.as_str(),
                "nodata": cog.nodata,
                "spatial_resolution": constants::GSD,
            }]),
        );
        if matches!(role, BandRole::Mask | BandRole::C) {
            extra.insert(
                "classification:classes".to_string(),
                classification_json(product),
            );
        }

        assets.insert(
            role.key().to_string(),
            Asset {
                href: options.href_for(&cog.path),
                type_: Some(MEDIA_TYPE_COG.to_string()),
                title: Some(constants::band_title(*role).to_string()),
                description: Some(constants::band_description(*role).to_string()),
                roles: vec!["data".to_string()],
                extra,
            },
        );
    }

    if let Some(path) = metadata {
        assets.insert(
            BandRole::Metadata.key().to_string(),
            Asset {
                href: options.href_for(path),
                type_: Some(MEDIA_TYPE_XML.to_string()),
                title: Some(constants::band_title(BandRole::Metadata).to_string()),
                description: Some(constants::band_description(BandRole::Metadata).to_string()),
                roles: vec!["metadata".to_string()],
                extra: BTreeMap::new(),
            },
        );
    }

    assets
}

fn classification_json(product: Product) -> Value {
    let classes: Vec<Value> = constants::classification_classes(product)
        .iter()
        .map(|(value, name, description)| {
            json!({
                "value": value,
                "name": name,
                "description": description,
            })
        })
        .collect();
    Value::Array(classes)
}
