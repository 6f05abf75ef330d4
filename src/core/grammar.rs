//! Parser for the JAXA tile naming convention.
//!
//! Every file in a mosaic tile follows the fixed grammar
//! `{TILE}_{YY}_{ROLE|PRODUCT}_{OBSERVATION}`, e.g. `N00E072_21_sl_HH_F02DAR`,
//! where the trailing observation code packs mode, beam number, polarization
//! count, orbit state, and observation side into six characters. Nothing else
//! about a tile is self-describing, so all parsing fails closed: a stem that
//! does not match the grammar exactly is rejected rather than guessed at.
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::types::{BandRole, ObservationSide, OrbitState, PolarizationCount, Product};

/// Errors raised while parsing tile file names.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("filename `{0}` does not match the PALSAR tile naming convention")]
    Stem(String),

    #[error("invalid tile id `{0}`, expected e.g. N00E072")]
    TileId(String),

    #[error("invalid two-digit year `{0}`")]
    Year(String),

    #[error("invalid observation code `{0}`, expected e.g. F02DAR")]
    ObservationCode(String),

    #[error("unknown role token `{token}` in `{stem}`")]
    RoleToken { token: String, stem: String },
}

static TILE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[NS]\d{2}[EW]\d{3}$").unwrap());
static OBSERVATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z])([0-9A-Z]{2})([DQ])([AD])([RL])$").unwrap());

/// Decoded six-character observation code (`F02DAR`: fine beam 02,
/// dual-polarization, ascending orbit, right-looking).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationMode {
    pub mode: char,
    pub beam_number: String,
    pub polarizations: PolarizationCount,
    pub orbit_state: OrbitState,
    pub observation_side: ObservationSide,
}

impl ObservationMode {
    /// The raw six-character code, reassembled.
    pub fn code(&self) -> String {
        let pol = match self.polarizations {
            PolarizationCount::Dual => 'D',
            PolarizationCount::Quad => 'Q',
        };
        let orbit = match self.orbit_state {
            OrbitState::Ascending => 'A',
            OrbitState::Descending => 'D',
        };
        let side = match self.observation_side {
            ObservationSide::Right => 'R',
            ObservationSide::Left => 'L',
        };
        format!("{}{}{}{}{}", self.mode, self.beam_number, pol, orbit, side)
    }
}

/// The role slot of a stem: either a band raster or a whole-product archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StemRole {
    Product(Product),
    Band(BandRole),
}

/// Fully parsed tile file stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameTokens {
    pub tile_id: String,
    /// Two-digit epoch year; full year = 2000 + YY. Dataset starts in 2015.
    pub year: u8,
    pub role: StemRole,
    pub observation: ObservationMode,
}

impl FilenameTokens {
    pub fn full_year(&self) -> i32 {
        2000 + i32::from(self.year)
    }

    /// Product family, inferred from the role slot: `C` is the FNF
    /// classification raster, every other band belongs to a mosaic.
    pub fn product(&self) -> Product {
        match self.role {
            StemRole::Product(p) => p,
            StemRole::Band(BandRole::C) => Product::Fnf,
            StemRole::Band(_) => Product::Mos,
        }
    }

    /// Item identity: `{tile}_{YY}_{MOS|FNF}`.
    pub fn item_id(&self) -> String {
        format!("{}_{:02}_{}", self.tile_id, self.year, self.product().token())
    }

    /// Stem for a sibling file of the same tile with a different role token.
    pub fn sibling_stem(&self, role_token: &str) -> String {
        format!(
            "{}_{:02}_{}_{}",
            self.tile_id,
            self.year,
            role_token,
            self.observation.code()
        )
    }
}

/// Decode a six-character observation code.
pub fn parse_observation(token: &str) -> Result<ObservationMode, ParseError> {
    let caps = OBSERVATION_RE
        .captures(token)
        .ok_or_else(|| ParseError::ObservationCode(token.to_string()))?;

    let mode = caps[1].chars().next().unwrap();
    let polarizations = match &caps[3] {
        "D" => PolarizationCount::Dual,
        _ => PolarizationCount::Quad,
    };
    let orbit_state = match &caps[4] {
        "A" => OrbitState::Ascending,
        _ => OrbitState::Descending,
    };
    let observation_side = match &caps[5] {
        "R" => ObservationSide::Right,
        _ => ObservationSide::Left,
    };

    Ok(ObservationMode {
        mode,
        beam_number: caps[2].to_string(),
        polarizations,
        orbit_state,
        observation_side,
    })
}

/// Parse a full tile file stem into its tokens.
///
/// The role slot may span two underscore-separated tokens (`sl_HH`); everything
/// between the year and the observation code is treated as one role token.
pub fn parse(stem: &str) -> Result<FilenameTokens, ParseError> {
    let parts: Vec<&str> = stem.split('_').collect();
    if parts.len() < 4 {
        return Err(ParseError::Stem(stem.to_string()));
    }

    let tile_id = parts[0];
    if !TILE_RE.is_match(tile_id) {
        return Err(ParseError::TileId(tile_id.to_string()));
    }

    let year_token = parts[1];
    if year_token.len() != 2 {
        return Err(ParseError::Year(year_token.to_string()));
    }
    let year: u8 = year_token
        .parse()
        .map_err(|_| ParseError::Year(year_token.to_string()))?;

    let observation = parse_observation(parts[parts.len() - 1])?;

    let role_token = parts[2..parts.len() - 1].join("_");
    let role = match role_token.as_str() {
        "MOS" => StemRole::Product(Product::Mos),
        "FNF" => StemRole::Product(Product::Fnf),
        token => match BandRole::from_token(token) {
            Some(band) => StemRole::Band(band),
            None => {
                return Err(ParseError::RoleToken {
                    token: role_token,
                    stem: stem.to_string(),
                });
            }
        },
    };

    Ok(FilenameTokens {
        tile_id: tile_id.to_string(),
        year,
        role,
        observation,
    })
}

/// Strip the tile-file extension from a file name. `.tar.gz` is the one
/// double extension in the convention; legacy ENVI rasters carry none.
pub fn strip_extension(name: &str) -> &str {
    if let Some(stem) = name.strip_suffix(".tar.gz") {
        return stem;
    }
    for ext in [".tif", ".xml", ".hdr", ".json"] {
        if let Some(stem) = name.strip_suffix(ext) {
            return stem;
        }
    }
    name
}
