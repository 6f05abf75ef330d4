use gdal::Dataset;
use gdal::errors::GdalError as GdalCrateError;
use std::path::Path;
use thiserror::Error;

/// Errors encountered while reading raster headers
#[derive(Debug, Error)]
pub enum HeaderError {
    #[error("GDAL error: {0}")]
    Gdal(#[from] GdalCrateError),
    #[error("no raster bands found in {0}")]
    NoBands(String),
}

/// Header of a georeferenced raster: everything metadata derivation needs,
/// read without touching pixel payload.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterHeader {
    /// Width (pixels) of the raster
    pub size_x: usize,
    /// Height (lines) of the raster
    pub size_y: usize,
    /// Affine geotransform coefficients ([origin_x, pixel_width, rot_x, origin_y, rot_y, pixel_height])
    pub geotransform: [f64; 6],
    /// EPSG code of the projection, when one is declared
    pub epsg: Option<u32>,
}

// Helper to extract EPSG code from WKT authority tag
fn parse_epsg(wkt: &str) -> Option<u32> {
    const KEY: &str = "AUTHORITY[\"EPSG\",\"";
    if let Some(idx) = wkt.rfind(KEY) {
        let start = idx + KEY.len();
        if let Some(end) = wkt[start..].find('"') {
            return wkt[start..start + end].parse().ok();
        }
    }
    None
}

impl RasterHeader {
    /// Read the header of a GDAL-supported dataset (GeoTIFF, ENVI, ...)
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, HeaderError> {
        let path = path.as_ref();
        let dataset = Dataset::open(path)?;
        if dataset.raster_count() == 0 {
            return Err(HeaderError::NoBands(path.display().to_string()));
        }
        let (size_x, size_y) = dataset.raster_size();
        let geotransform = dataset.geo_transform()?;

        let proj = dataset.projection();
        let epsg = if let Some(code) = proj.strip_prefix("EPSG:") {
            code.parse().ok()
        } else {
            parse_epsg(&proj)
        };

        Ok(RasterHeader {
            size_x: size_x as usize,
            size_y: size_y as usize,
            geotransform,
            epsg,
        })
    }

    /// Bounding box `[west, south, east, north]` derived from the geotransform.
    pub fn bounds(&self) -> [f64; 4] {
        let gt = self.geotransform;
        let (cols, rows) = (self.size_x as f64, self.size_y as f64);
        let x0 = gt[0];
        let y0 = gt[3];
        let x1 = gt[0] + cols * gt[1] + rows * gt[2];
        let y1 = gt[3] + cols * gt[4] + rows * gt[5];
        [x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1)]
    }

    /// Raster shape as `[rows, cols]`.
    pub fn shape(&self) -> [usize; 2] {
        [self.size_y, self.size_x]
    }

    /// Affine transform in row-major `[a, b, c, d, e, f]` order, as used by
    /// the projection STAC extension.
    pub fn proj_transform(&self) -> [f64; 6] {
        let gt = self.geotransform;
        [gt[1], gt[2], gt[0], gt[4], gt[5], gt[3]]
    }
}
