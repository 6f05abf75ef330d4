#![doc = r#"
PALSARCOG — ALOS PALSAR-2/PALSAR mosaic and forest/non-forest tiles to
Cloud-Optimized GeoTIFFs with STAC metadata.

This crate provides a typed, ergonomic API for turning JAXA's 1x1 degree
mosaic (MOS) and forest/non-forest (FNF) tile archives into per-band COGs and
deriving the matching STAC item record purely from filename conventions and
raster headers. It powers the PALSARCOG CLI and can be embedded in your own
Rust applications.

Requirements
------------
- GDAL development headers and runtime available on your system, built with
  the `COG` driver.
- Rust 2024 edition toolchain.

Quick start: process a tile archive
-----------------------------------
```rust,no_run
use std::path::Path;
use palsarcog::{ConversionParams, api};

fn main() -> palsarcog::Result<()> {
    let params = ConversionParams::default();

    let processed = api::process_tile(
        Path::new("/data/N00E072_21_MOS_F02DAR.tar.gz"),
        Path::new("/out"),
        &params,
        None,
    )?;

    println!("item {} with {} bands", processed.item.id, processed.converted.cogs.len());
    api::write_item_json(&processed.item, Path::new("/out"))?;
    Ok(())
}
```

Asset hrefs rooted at a publish URL, with signing
-------------------------------------------------
```rust,no_run
use std::path::Path;
use palsarcog::{ConversionParams, api};

fn main() -> palsarcog::Result<()> {
    let params = ConversionParams {
        base_url: Some("https://example.blob.core.windows.net/palsar".to_string()),
        ..Default::default()
    };
    let sign = |href: &str| format!("{href}?sig=token");

    let processed = api::process_tile(
        Path::new("/data/N23W161_20_MOS_F02DAR.tar.gz"),
        Path::new("/out"),
        &params,
        Some(&sign),
    )?;
    assert!(processed.item.assets["date"].href.starts_with("https://"));
    Ok(())
}
```

Error handling
--------------
All public functions return `palsarcog::Result<T>`; match on
`palsarcog::Error` to handle specific stages, e.g. grammar or conversion
failures. Every error is typed and fail-fast: a tile that cannot be parsed,
resolved, converted, or validated produces no partial record.

```rust,no_run
use std::path::Path;
use palsarcog::{ConversionParams, Error, api};

fn main() {
    let params = ConversionParams::default();
    match api::process_tile(Path::new("/bad/tile.tar.gz"), Path::new("/out"), &params, None) {
        Ok(_) => {}
        Err(Error::Parse(e)) => eprintln!("bad tile name: {e}"),
        Err(Error::Resolution(e)) => eprintln!("incomplete band set: {e}"),
        Err(other) => eprintln!("Other error: {other}"),
    }
}
```

Useful modules
--------------
- [`api`] — high-level, ergonomic entry points.
- [`core`] — filename grammar, band inventory, nodata policy, pipeline.
- [`io`] — archive extraction, raster headers, COG conversion.
- [`stac`] — the STAC object model and record builders.
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod stac;
pub mod types;

// Curated public API surface
// Types
pub use core::grammar::{FilenameTokens, ObservationMode, ParseError, StemRole};
pub use core::inventory::{BandInventory, ResolutionError};
pub use core::params::ConversionParams;
pub use core::pipeline::ConvertedTile;
pub use core::policy::{NoDataPolicy, dtype_for};
pub use error::{Error, Result};
pub use types::{
    BandRole, ObservationSide, OrbitState, PixelType, PolarizationCount, Product,
};

// I/O
pub use io::cog::{CogAsset, CogProfile, ConversionError};
pub use io::gdal::{HeaderError, RasterHeader};

// STAC records
pub use stac::item::{ItemOptions, ValidationError};
pub use stac::model::{StacCollection, StacItem};

// High-level API re-exports
pub use api::{HrefRewrite, ProcessedTile, process_tile};
