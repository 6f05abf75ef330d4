//! Shared types and enums used across PALSARCOG.
//! Includes the product families (`Product`), per-tile band roles (`BandRole`),
//! output pixel types (`PixelType`), and the orbit/observation codes carried by
//! the JAXA filename convention.
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// The two ALOS mosaic product families distributed as 1x1 degree tiles.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
pub enum Product {
    /// Annual mosaic: multi-band backscatter product.
    Mos,
    /// Forest/Non-Forest: single-band classification product.
    Fnf,
}

impl Product {
    /// Token used in archive names (`N00E072_21_MOS_F02DAR.tar.gz`).
    pub fn token(&self) -> &'static str {
        match self {
            Product::Mos => "MOS",
            Product::Fnf => "FNF",
        }
    }

    /// STAC collection the product belongs to.
    pub fn collection_id(&self) -> &'static str {
        match self {
            Product::Mos => "alos-palsar-mosaic",
            Product::Fnf => "alos-fnf-mosaic",
        }
    }
}

impl std::fmt::Display for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Semantic channel of a tile. The `Ord` derive keeps inventories and asset
/// maps in a stable order so records serialize deterministically.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum BandRole {
    Hh,
    Hv,
    Vh,
    Vv,
    /// Local incidence angle.
    Linci,
    /// Observation date, days since 1970-01-01.
    Date,
    /// Quality mask (MOS only).
    Mask,
    /// Forest/Non-Forest classification (FNF only).
    C,
    /// XML sidecar, no raster payload.
    Metadata,
}

impl BandRole {
    /// Map a filename role token onto a band role. Polarization rasters appear
    /// both with and without the `sl_` prefix depending on revision.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "HH" | "sl_HH" => Some(BandRole::Hh),
            "HV" | "sl_HV" => Some(BandRole::Hv),
            "VH" | "sl_VH" => Some(BandRole::Vh),
            "VV" | "sl_VV" => Some(BandRole::Vv),
            "linci" => Some(BandRole::Linci),
            "date" => Some(BandRole::Date),
            "mask" => Some(BandRole::Mask),
            "C" => Some(BandRole::C),
            _ => None,
        }
    }

    /// Key under which the band appears in inventories and item assets.
    pub fn key(&self) -> &'static str {
        match self {
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

    /// Whether the role carries raster payload (everything but the XML sidecar).
    pub fn is_raster(&self) -> bool {
        !matches!(self, BandRole::Metadata)
    }
}

impl std::fmt::Display for BandRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Output pixel type of a converted band.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum PixelType {
    U8,
    U16,
}

impl PixelType {
    /// Name used by the raster STAC extension.
    pub fn as_str(&self) -> &'static str {
        match self {
            PixelType::U8 => "uint8",
            PixelType::U16 => "uint16",
        }
    }
}

impl std::fmt::Display for PixelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Polarization count encoded at position 4 of the observation code.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum PolarizationCount {
    Dual,
    Quad,
}

impl PolarizationCount {
    /// Polarization channels implied by the count.
    pub fn channels(&self) -> &'static [&'static str] {
        match self {
            PolarizationCount::Dual => &["HH", "HV"],
            PolarizationCount::Quad => &["HH", "HV", "VH", "VV"],
        }
    }
}

/// Orbit state encoded at position 5 of the observation code.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum OrbitState {
    Ascending,
    Descending,
}

impl OrbitState {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrbitState::Ascending => "ascending",
            OrbitState::Descending => "descending",
        }
    }
}

/// Observation side encoded at position 6 of the observation code.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum ObservationSide {
    Right,
    Left,
}

impl ObservationSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObservationSide::Right => "right",
            ObservationSide::Left => "left",
        }
    }
}
