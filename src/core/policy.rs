//! NoData and pixel-type policy for converted bands.
//!
//! JAXA changed the nodata value of the backscatter, incidence-angle, and date
//! bands from 0 to 1 in a later product revision; the mask and classification
//! bands stayed at 0. Historical processing code disagrees on whether the
//! cutover was the 2017 or the 2019 revision, so the cutover year is carried
//! as configuration instead of being baked in.
use serde::{Deserialize, Serialize};

use crate::types::{BandRole, PixelType};

/// Two-digit revision year at which nodata switched from 0 to 1.
pub const DEFAULT_NODATA_CUTOVER: u8 = 17;

/// Nodata selection as a function of band role and product revision year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoDataPolicy {
    cutover_year: u8,
}

impl NoDataPolicy {
    pub fn new(cutover_year: u8) -> Self {
        Self { cutover_year }
    }

    pub fn cutover_year(&self) -> u8 {
        self.cutover_year
    }

    /// Nodata value for a band of the given two-digit revision year.
    pub fn nodata_for(&self, role: BandRole, year: u8) -> u8 {
        if year >= self.cutover_year {
            match role {
                BandRole::Mask | BandRole::C => 0,
                _ => 1,
            }
        } else {
            0
        }
    }
}

impl Default for NoDataPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_NODATA_CUTOVER)
    }
}

/// Output pixel type per band role. Backscatter and date bands are 16-bit DN,
/// the angle, mask, and classification bands fit in 8 bits.
pub fn dtype_for(role: BandRole) -> PixelType {
    match role {
        BandRole::Hh | BandRole::Hv | BandRole::Vh | BandRole::Vv | BandRole::Date => PixelType::U16,
        BandRole::Linci | BandRole::Mask | BandRole::C | BandRole::Metadata => PixelType::U8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nodata_switches_at_cutover() {
        let policy = NoDataPolicy::default();
        assert_eq!(policy.nodata_for(BandRole::Hh, 17), 1);
        assert_eq!(policy.nodata_for(BandRole::Hv, 21), 1);
        assert_eq!(policy.nodata_for(BandRole::Linci, 17), 1);
        assert_eq!(policy.nodata_for(BandRole::Date, 17), 1);
        assert_eq!(policy.nodata_for(BandRole::Mask, 17), 0);
        assert_eq!(policy.nodata_for(BandRole::C, 17), 0);
    }

    #[test]
    fn nodata_is_zero_before_cutover() {
        let policy = NoDataPolicy::default();
        assert_eq!(policy.nodata_for(BandRole::Hh, 15), 0);
        assert_eq!(policy.nodata_for(BandRole::Mask, 15), 0);
        assert_eq!(policy.nodata_for(BandRole::C, 16), 0);
    }

    #[test]
    fn alternate_cutover_is_honored() {
        let policy = NoDataPolicy::new(19);
        assert_eq!(policy.nodata_for(BandRole::Hh, 17), 0);
        assert_eq!(policy.nodata_for(BandRole::Hh, 19), 1);
    }

    #[test]
    fn pixel_types_by_role() {
        assert_eq!(dtype_for(BandRole::Hh), PixelType::U16);
        assert_eq!(dtype_for(BandRole::Vv), PixelType::U16);
        assert_eq!(dtype_for(BandRole::Date), PixelType::U16);
        assert_eq!(dtype_for(BandRole::Linci), PixelType::U8);
        assert_eq!(dtype_for(BandRole::Mask), PixelType::U8);
        assert_eq!(dtype_for(BandRole::C), PixelType::U8);
    }
}
