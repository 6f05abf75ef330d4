use serde::{Deserialize, Serialize};

use crate::core::policy::{DEFAULT_NODATA_CUTOVER, NoDataPolicy};

/// Conversion parameters suitable for config files and presets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionParams {
    /// Two-digit revision year at which nodata switches from 0 to 1
    pub nodata_cutover: u8,
    /// Root URL for asset hrefs; None means local output paths
    pub base_url: Option<String>,
    /// Overview block size handed to the TIFF codec
    pub overview_blocksize: u32,
}

impl ConversionParams {
    pub fn policy(&self) -> NoDataPolicy {
        NoDataPolicy::new(self.nodata_cutover)
    }
}

impl Default for ConversionParams {
    fn default() -> Self {
        Self {
            nodata_cutover: DEFAULT_NODATA_CUTOVER,
            base_url: None,
            overview_blocksize: 128,
        }
    }
}
