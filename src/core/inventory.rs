//! Band inventory resolution for extracted tiles.
//!
//! Two archive conventions exist. Legacy tiles (pre-2019) ship ENVI rasters
//! with `.hdr` sidecars; the raster file itself carries no extension. Current
//! tiles ship GeoTIFFs plus one XML metadata sidecar, and a single reference
//! file (the XML or a raster) is enough to reconstruct the full band set by
//! substituting role tokens into the stem. Either way the result is a typed
//! role -> path map that is validated for exhaustiveness before conversion.
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::core::grammar::{self, FilenameTokens, ParseError, StemRole};
use crate::types::{BandRole, PolarizationCount, Product};

/// Errors raised while resolving the band set of a tile.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("missing mandatory `{role}` band for {product} tile {tile}")]
    MissingBand {
        product: Product,
        tile: String,
        role: BandRole,
    },

    #[error("unexpected `{role}` raster in {product} tile {tile}")]
    UnexpectedBand {
        product: Product,
        tile: String,
        role: BandRole,
    },

    #[error("duplicate `{role}` raster: {first} and {second}")]
    DuplicateBand {
        role: BandRole,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("no tile rasters found in {0}")]
    Empty(PathBuf),
}

/// Typed mapping from band role to source file, plus the tile-level tokens
/// shared by every file in the set.
#[derive(Debug, Clone)]
pub struct BandInventory {
    tokens: FilenameTokens,
    entries: BTreeMap<BandRole, PathBuf>,
}

impl BandInventory {
    /// Tile-level filename tokens (role slot normalized to the product).
    pub fn tokens(&self) -> &FilenameTokens {
        &self.tokens
    }

    pub fn product(&self) -> Product {
        self.tokens.product()
    }

    pub fn get(&self, role: BandRole) -> Option<&Path> {
        self.entries.get(&role).map(PathBuf::as_path)
    }

    /// Raster entries in stable role order; excludes the XML sidecar.
    pub fn rasters(&self) -> impl Iterator<Item = (BandRole, &Path)> {
        self.entries
            .iter()
            .filter(|(role, _)| role.is_raster())
            .map(|(role, path)| (*role, path.as_path()))
    }

    /// The optional XML metadata sidecar.
    pub fn metadata(&self) -> Option<&Path> {
        self.get(BandRole::Metadata)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, role: BandRole, path: PathBuf) -> Result<(), ResolutionError> {
        if let Some(existing) = self.entries.get(&role) {
            return Err(ResolutionError::DuplicateBand {
                role,
                first: existing.clone(),
                second: path,
            });
        }
        self.entries.insert(role, path);
        Ok(())
    }

    /// Exhaustiveness check: FNF tiles carry exactly the `C` raster, mosaics
    /// carry the five mandatory bands plus `VH`/`VV` when quad-polarized.
    fn validate(&self) -> Result<(), ResolutionError> {
        let product = self.product();
        let tile = self.tokens.tile_id.clone();
        let expected = expected_rasters(product, self.tokens.observation.polarizations);

        for role in expected {
            if !self.entries.contains_key(role) {
                return Err(ResolutionError::MissingBand {
                    product,
                    tile,
                    role: *role,
                });
            }
        }
        for (role, _) in self.rasters() {
            if !expected.contains(&role) {
                return Err(ResolutionError::UnexpectedBand {
                    product,
                    tile,
                    role,
                });
            }
        }
        Ok(())
    }
}

/// Mandatory raster roles per product and polarization count.
fn expected_rasters(product: Product, polarizations: PolarizationCount) -> &'static [BandRole] {
    match (product, polarizations) {
        (Product::Fnf, _) => &[BandRole::C],
        (Product::Mos, PolarizationCount::Dual) => &[
            BandRole::Hh,
            BandRole::Hv,
            BandRole::Linci,
            BandRole::Date,
            BandRole::Mask,
        ],
        (Product::Mos, PolarizationCount::Quad) => &[
            BandRole::Hh,
            BandRole::Hv,
            BandRole::Vh,
            BandRole::Vv,
            BandRole::Linci,
            BandRole::Date,
            BandRole::Mask,
        ],
    }
}

/// Role tokens substituted into the stem when resolving from a single
/// reference file (current convention, `sl_`-prefixed polarizations).
fn reference_tokens(product: Product, polarizations: PolarizationCount) -> &'static [&'static str] {
    match (product, polarizations) {
        (Product::Fnf, _) => &["C"],
        (Product::Mos, PolarizationCount::Dual) => &["sl_HH", "sl_HV", "linci", "date", "mask"],
        (Product::Mos, PolarizationCount::Quad) => &[
            "sl_HH", "sl_HV", "sl_VH", "sl_VV", "linci", "date", "mask",
        ],
    }
}

/// Resolve the band set of an extracted tile directory.
///
/// Any file with a `.hdr` sidecar is included through its companion raster;
/// `.tif` files are included directly; a single `.xml` becomes the metadata
/// entry. File names that do not parse under the tile grammar fail the
/// resolution rather than being skipped.
pub fn resolve_dir(dir: &Path) -> Result<BandInventory, ResolutionError> {
    let mut rasters: Vec<(FilenameTokens, PathBuf)> = Vec::new();
    let mut metadata: Option<PathBuf> = None;

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => continue,
        };

        if let Some(raster_name) = name.strip_suffix(".hdr") {
            let tokens = grammar::parse(grammar::strip_extension(raster_name))?;
            rasters.push((tokens, dir.join(raster_name)));
        } else if name.ends_with(".tif") {
            let tokens = grammar::parse(grammar::strip_extension(&name))?;
            rasters.push((tokens, path));
        } else if name.ends_with(".xml") {
            grammar::parse(grammar::strip_extension(&name))?;
            metadata = Some(path);
        }
        // ENVI payload files carry no extension and are reached via their .hdr
    }

    let first = match rasters.first() {
        Some((tokens, _)) => tokens.clone(),
        None => return Err(ResolutionError::Empty(dir.to_path_buf())),
    };

    // Infer the product from the band set: a C raster marks an FNF tile.
    let product = if rasters
        .iter()
        .any(|(t, _)| t.role == StemRole::Band(BandRole::C))
    {
        Product::Fnf
    } else {
        Product::Mos
    };

    let mut inventory = BandInventory {
        tokens: FilenameTokens {
            role: StemRole::Product(product),
            ..first
        },
        entries: BTreeMap::new(),
    };

    for (tokens, path) in rasters {
        let role = match tokens.role {
            StemRole::Band(role) => role,
            // A product token never names a raster file.
            StemRole::Product(_) => {
                return Err(ParseError::RoleToken {
                    token: tokens.product().token().to_string(),
                    stem: path.display().to_string(),
                }
                .into());
            }
        };
        debug!("resolved {} -> {}", role, path.display());
        inventory.insert(role, path)?;
    }
    if let Some(path) = metadata {
        inventory.insert(BandRole::Metadata, path)?;
    }

    inventory.validate()?;
    Ok(inventory)
}

/// Resolve the band set from a single reference file (current convention).
///
/// The reference is typically the tile XML or one of the rasters; siblings are
/// constructed by substituting role tokens into the stem and must exist on
/// disk. An XML reference becomes the metadata entry of the inventory.
pub fn resolve_reference(reference: &Path) -> Result<BandInventory, ResolutionError> {
    let name = reference
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ResolutionError::Empty(reference.to_path_buf()))?;
    let tokens = grammar::parse(grammar::strip_extension(name))?;
    let product = tokens.product();
    let dir = reference.parent().unwrap_or_else(|| Path::new("."));

    let mut inventory = BandInventory {
        tokens: FilenameTokens {
            role: StemRole::Product(product),
            ..tokens.clone()
        },
        entries: BTreeMap::new(),
    };

    for token in reference_tokens(product, tokens.observation.polarizations) {
        let role = BandRole::from_token(token).expect("reference tokens are band roles");
        let path = dir.join(format!("{}.tif", tokens.sibling_stem(token)));
        if !path.is_file() {
            return Err(ResolutionError::MissingBand {
                product,
                tile: tokens.tile_id.clone(),
                role,
            });
        }
        inventory.insert(role, path)?;
    }

    if name.ends_with(".xml") {
        inventory.insert(BandRole::Metadata, reference.to_path_buf())?;
    }

    inventory.validate()?;
    Ok(inventory)
}

/// Resolve a tile from either an extracted directory or a single reference.
pub fn resolve(path: &Path) -> Result<BandInventory, ResolutionError> {
    if path.is_dir() {
        resolve_dir(path)
    } else {
        resolve_reference(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    fn touch(dir: &Path, name: &str) {
        File::create(dir.join(name)).unwrap();
    }

    #[test]
    fn resolves_legacy_mosaic_with_hdr_sidecars() {
        let dir = tempfile::tempdir().unwrap();
        for stem in [
            "N00E072_17_sl_HH_F02DAR",
            "N00E072_17_sl_HV_F02DAR",
            "N00E072_17_linci_F02DAR",
            "N00E072_17_date_F02DAR",
            "N00E072_17_mask_F02DAR",
        ] {
            touch(dir.path(), stem);
            touch(dir.path(), &format!("{stem}.hdr"));
        }

        let inventory = resolve_dir(dir.path()).unwrap();
        assert_eq!(inventory.product(), Product::Mos);
        assert_eq!(inventory.rasters().count(), 5);
        assert!(inventory.metadata().is_none());
        assert!(
            inventory
                .get(BandRole::Hh)
                .unwrap()
                .ends_with("N00E072_17_sl_HH_F02DAR")
        );
    }

    #[test]
    fn resolves_current_mosaic_with_tifs_and_xml() {
        let dir = tempfile::tempdir().unwrap();
        for stem in [
            "N23W161_20_sl_HH_F02DAR",
            "N23W161_20_sl_HV_F02DAR",
            "N23W161_20_linci_F02DAR",
            "N23W161_20_date_F02DAR",
            "N23W161_20_mask_F02DAR",
        ] {
            touch(dir.path(), &format!("{stem}.tif"));
        }
        touch(dir.path(), "N23W161_20_MOS_F02DAR.xml");

        let inventory = resolve_dir(dir.path()).unwrap();
        assert_eq!(inventory.product(), Product::Mos);
        assert_eq!(inventory.rasters().count(), 5);
        assert!(inventory.metadata().is_some());
        assert_eq!(inventory.tokens().item_id(), "N23W161_20_MOS");
    }

    #[test]
    fn fnf_tile_is_exactly_one_raster() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "S16W150_15_C_F02DAR.tif");

        let inventory = resolve_dir(dir.path()).unwrap();
        assert_eq!(inventory.product(), Product::Fnf);
        assert_eq!(inventory.rasters().count(), 1);
    }

    #[test]
    fn fnf_with_extra_raster_fails() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "S16W150_15_C_F02DAR.tif");
        touch(dir.path(), "S16W150_15_mask_F02DAR.tif");

        assert!(matches!(
            resolve_dir(dir.path()),
            Err(ResolutionError::UnexpectedBand {
                role: BandRole::Mask,
                ..
            })
        ));
    }

    #[test]
    fn mosaic_missing_band_fails() {
        let dir = tempfile::tempdir().unwrap();
        for stem in [
            "N00E072_17_sl_HH_F02DAR",
            "N00E072_17_sl_HV_F02DAR",
            "N00E072_17_linci_F02DAR",
            "N00E072_17_date_F02DAR",
        ] {
            touch(dir.path(), &format!("{stem}.tif"));
        }

        assert!(matches!(
            resolve_dir(dir.path()),
            Err(ResolutionError::MissingBand {
                role: BandRole::Mask,
                ..
            })
        ));
    }

    #[test]
    fn empty_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            resolve_dir(dir.path()),
            Err(ResolutionError::Empty(_))
        ));
    }

    #[test]
    fn reference_xml_resolves_dual_siblings() {
        let dir = tempfile::tempdir().unwrap();
        for stem in [
            "N23W161_20_sl_HH_F02DAR",
            "N23W161_20_sl_HV_F02DAR",
            "N23W161_20_linci_F02DAR",
            "N23W161_20_date_F02DAR",
            "N23W161_20_mask_F02DAR",
        ] {
            touch(dir.path(), &format!("{stem}.tif"));
        }
        touch(dir.path(), "N23W161_20_MOS_F02DAR.xml");

        let inventory = resolve_reference(&dir.path().join("N23W161_20_MOS_F02DAR.xml")).unwrap();
        assert_eq!(inventory.rasters().count(), 5);
        assert!(inventory.get(BandRole::Vh).is_none());
        assert!(inventory.metadata().is_some());
    }

    #[test]
    fn reference_resolves_quad_siblings() {
        let dir = tempfile::tempdir().unwrap();
        for stem in [
            "N00E072_21_sl_HH_FP6QAR",
            "N00E072_21_sl_HV_FP6QAR",
            "N00E072_21_sl_VH_FP6QAR",
            "N00E072_21_sl_VV_FP6QAR",
            "N00E072_21_linci_FP6QAR",
            "N00E072_21_date_FP6QAR",
            "N00E072_21_mask_FP6QAR",
        ] {
            touch(dir.path(), &format!("{stem}.tif"));
        }
        touch(dir.path(), "N00E072_21_MOS_FP6QAR.xml");

        let inventory = resolve_reference(&dir.path().join("N00E072_21_MOS_FP6QAR.xml")).unwrap();
        assert_eq!(inventory.rasters().count(), 7);
        assert!(inventory.get(BandRole::Vh).is_some());
        assert!(inventory.get(BandRole::Vv).is_some());
    }

    #[test]
    fn reference_with_missing_sibling_fails() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "N23W161_20_sl_HH_F02DAR.tif");
        touch(dir.path(), "N23W161_20_MOS_F02DAR.xml");

        assert!(matches!(
            resolve_reference(&dir.path().join("N23W161_20_MOS_F02DAR.xml")),
            Err(ResolutionError::MissingBand { .. })
        ));
    }
}
