//! Fixed metadata tables for the ALOS mosaic collections: providers, links,
//! extents, band descriptions, and classification legends. Values follow the
//! JAXA dataset description (revision K).
use crate::stac::model::{Link, Provider, MEDIA_TYPE_PDF};
use crate::types::{BandRole, Product};

pub const PROJECTION_EXTENSION: &str =
    "https://stac-extensions.github.io/projection/v1.1.0/schema.json";
pub const RASTER_EXTENSION: &str = "https://stac-extensions.github.io/raster/v1.1.0/schema.json";
pub const CLASSIFICATION_EXTENSION: &str =
    "https://stac-extensions.github.io/classification/v1.1.0/schema.json";
pub const SAR_EXTENSION: &str = "https://stac-extensions.github.io/sar/v1.0.0/schema.json";
pub const SAT_EXTENSION: &str = "https://stac-extensions.github.io/sat/v1.0.0/schema.json";

/// Ground sample distance in meters
pub const GSD: f64 = 25.0;

/// The tiles are distributed in geographic coordinates; nothing here
/// reprojects, so this is a hard precondition on every input raster.
pub const EPSG: u32 = 4326;

/// L-band radar
pub const FREQUENCY_BAND: &str = "L";

/// All mosaic tiles are geometrically terrain corrected
pub const PRODUCT_TYPE: &str = "GTC";

/// Decibel correction factor for converting backscatter DN to gamma naught,
/// declared by the dataset description for dual-polarization mosaics.
pub const CORRECTION_FACTOR_DB: f64 = -83.0;

/// Global coverage of the mosaic grid: `[west, north, east, south]` corners
/// flattened to the published collection bbox.
pub const SPATIAL_EXTENT: [f64; 4] = [-180.0, 85.0, 180.0, -56.0];

pub const LICENSE: &str = "proprietary";

const DESCRIPTION: &str = "Global 25 m Resolution PALSAR-2/PALSAR Mosaic and \
    Forest/Non-Forest Map (FNF) Dataset Description";

const HANDBOOK_HREF: &str = "https://www.eorc.jaxa.jp/ALOS/en/dataset/pdf/DatasetDescription_PALSAR2_Mosaic_FNF_revK.pdf";

/// Platform and instrument names by two-digit epoch year: ALOS-2 carries
/// PALSAR-2 from 2015 on, the original ALOS carried PALSAR.
pub fn platform_for_year(year: u8) -> (&'static str, &'static str) {
    if year >= 15 {
        ("alos-2", "PALSAR-2")
    } else {
        ("alos", "PALSAR")
    }
}

pub fn platforms() -> Vec<&'static str> {
    vec!["alos", "alos-2"]
}

pub fn instruments() -> Vec<&'static str> {
    vec!["PALSAR", "PALSAR-2"]
}

pub fn providers() -> Vec<Provider> {
    vec![
        Provider {
            name: "Japan Aerospace Exploration Agency".to_string(),
            roles: vec![
                "producer".to_string(),
                "processor".to_string(),
                "licensor".to_string(),
            ],
            url: Some("https://www.eorc.jaxa.jp/ALOS/en/dataset/fnf_e.htm".to_string()),
        },
        Provider {
            name: "Microsoft Planetary Computer".to_string(),
            roles: vec!["host".to_string()],
            url: Some("https://planetarycomputer.microsoft.com".to_string()),
        },
    ]
}

pub fn handbook_link() -> Link {
    Link {
        rel: "handbook".to_string(),
        href: HANDBOOK_HREF.to_string(),
        type_: Some(MEDIA_TYPE_PDF.to_string()),
        title: Some(DESCRIPTION.to_string()),
    }
}

/// Published temporal extent per collection, RFC 3339.
pub fn temporal_extent(product: Product) -> (&'static str, &'static str) {
    match product {
        Product::Mos => ("2015-01-01T00:00:00Z", "2021-12-31T23:59:59Z"),
        Product::Fnf => ("2015-01-01T00:00:00Z", "2020-12-31T23:59:59Z"),
    }
}

pub fn collection_title(product: Product) -> &'static str {
    match product {
        Product::Mos => "ALOS PALSAR Annual Mosaic",
        Product::Fnf => "ALOS Forest/Non-Forest Annual Mosaic",
    }
}

pub fn collection_description(product: Product) -> &'static str {
    match product {
        Product::Mos => {
            "Global 25 m resolution SAR backscatter mosaic, built from ALOS \
             PALSAR and ALOS-2 PALSAR-2 imagery and distributed as 1x1 degree \
             terrain-corrected tiles."
        }
        Product::Fnf => {
            "Global 25 m resolution forest/non-forest classification map, \
             derived from the PALSAR-2/PALSAR SAR mosaic and distributed as \
             1x1 degree tiles."
        }
    }
}

/// Asset title per band role.
pub fn band_title(role: BandRole) -> &'static str {
    match role {
        BandRole::Hh => "HH",
        BandRole::Hv => "HV",
        BandRole::Vh => "VH",
        BandRole::Vv => "VV",
        BandRole::Linci => "linci",
        BandRole::Date => "date",
        BandRole::Mask => "mask",
        BandRole::C => "C",
        BandRole::Metadata => "metadata",
    }
}

/// Asset description per band role, from the dataset description table.
pub fn band_description(role: BandRole) -> &'static str {
    match role {
        BandRole::Hh => "HH polarization backscattering coefficient, 16-bit DN.",
        BandRole::Hv => "HV polarization backscattering coefficient, 16-bit DN.",
        BandRole::Vh => "VH polarization backscattering coefficient, 16-bit DN.",
        BandRole::Vv => "VV polarization backscattering coefficient, 16-bit DN.",
        BandRole::Linci => "Local incidence angle (degrees).",
        BandRole::Date => "Observation date (days since Jan 1, 1970).",
        BandRole::Mask => "Quality mask.",
        BandRole::C => "Forest vs non-forest classification.",
        BandRole::Metadata => "Tile metadata (XML).",
    }
}

/// Classification legend value: `(pixel value, name, description)`.
pub type ClassEntry = (u8, &'static str, &'static str);

/// Quality-mask legend of the mosaic product.
pub const MOS_MASK_CLASSES: &[ClassEntry] = &[
    (0, "no_data", "No data"),
    (50, "water", "Ocean and water"),
    (100, "lay_over", "Radar layover"),
    (150, "shadowing", "Radar shadowing"),
    (255, "land", "Normal land surface"),
];

/// Forest/non-forest legend of the classification product.
pub const FNF_CLASSES: &[ClassEntry] = &[
    (0, "no_data", "No data"),
    (1, "forest_dense", "Forest, canopy cover above 90%"),
    (2, "forest_sparse", "Forest, canopy cover 10% to 90%"),
    (3, "non_forest", "Non-forest"),
    (4, "water", "Water"),
];

/// Legend attached to the mask/classification raster of a product.
pub fn classification_classes(product: Product) -> &'static [ClassEntry] {
    match product {
        Product::Mos => MOS_MASK_CLASSES,
        Product::Fnf => FNF_CLASSES,
    }
}
