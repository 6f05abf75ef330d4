use std::fs::File;
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;

use gdal::raster::Buffer;
use gdal::spatial_ref::SpatialRef;
use gdal::{Dataset, DriverManager};

use palsarcog::api;
use palsarcog::core::inventory;
use palsarcog::io::archive;
use palsarcog::{BandRole, ConversionParams, Product};

/// Bundle already-written files into a `.tar.gz` tile archive.
fn pack_archive(archive_path: &Path, files: &[&Path]) {
    let file = File::create(archive_path).expect("Failed to create archive");
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for path in files {
        let name = path.file_name().unwrap().to_str().unwrap();
        builder
            .append_path_with_name(path, name)
            .expect("Failed to append file");
    }
    builder
        .into_inner()
        .expect("Failed to finish tar")
        .finish()
        .expect("Failed to finish gzip");
}

/// Write a tiny one-band GeoTIFF covering the 1x1 degree tile N00E072.
fn write_band(path: &Path) {
    let cols = 64usize;
    let rows = 64usize;
    let driver = DriverManager::get_driver_by_name("GTiff").expect("GTiff driver");
    let mut ds = driver
        .create_with_band_type::<u16, _>(path, cols, rows, 1)
        .expect("Failed to create raster");

    let step = 1.0 / cols as f64;
    ds.set_geo_transform(&[72.0, step, 0.0, 1.0, 0.0, -step])
        .expect("Failed to set geotransform");
    ds.set_spatial_ref(&SpatialRef::from_epsg(4326).expect("EPSG:4326"))
        .expect("Failed to set spatial ref");

    let data: Vec<u16> = (0..cols * rows).map(|i| (i % 1024) as u16).collect();
    let mut buffer = Buffer::new((cols, rows), data);
    let mut band = ds.rasterband(1).expect("Failed to get band");
    band.write((0, 0), (cols, rows), &mut buffer)
        .expect("Failed to write band");
}

#[test]
fn test_extract_and_resolve_legacy_archive() {
    // Legacy archives carry extension-less ENVI rasters with .hdr sidecars;
    // resolution alone does not open the rasters, so empty files suffice.
    let dir = tempfile::tempdir().unwrap();
    let archive_path = dir.path().join("N00E072_17_MOS_F02DAR.tar.gz");

    let mut files = Vec::new();
    for stem in [
        "N00E072_17_sl_HH_F02DAR",
        "N00E072_17_sl_HV_F02DAR",
        "N00E072_17_linci_F02DAR",
        "N00E072_17_date_F02DAR",
        "N00E072_17_mask_F02DAR",
    ] {
        let raster = dir.path().join(stem);
        let header = dir.path().join(format!("{stem}.hdr"));
        File::create(&raster).unwrap();
        File::create(&header).unwrap();
        files.push(raster);
        files.push(header);
    }
    let refs: Vec<&Path> = files.iter().map(|p| p.as_path()).collect();
    pack_archive(&archive_path, &refs);

    let extracted = dir.path().join("work");
    archive::extract(&archive_path, Some(&extracted)).expect("Failed to extract");

    let inventory = inventory::resolve_dir(&extracted).expect("Failed to resolve");
    assert_eq!(inventory.product(), Product::Mos);
    assert_eq!(inventory.rasters().count(), 5);
    assert_eq!(inventory.tokens().item_id(), "N00E072_17_MOS");
    assert!(
        inventory
            .get(BandRole::Date)
            .unwrap()
            .ends_with("N00E072_17_date_F02DAR")
    );
}

#[test]
fn test_cogify_mosaic_archive_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let archive_path = dir.path().join("N00E072_21_MOS_F02DAR.tar.gz");

    let stems = [
        "N00E072_21_sl_HH_F02DAR",
        "N00E072_21_sl_HV_F02DAR",
        "N00E072_21_linci_F02DAR",
        "N00E072_21_date_F02DAR",
        "N00E072_21_mask_F02DAR",
    ];
    let mut files = Vec::new();
    for stem in stems {
        let path = dir.path().join(format!("{stem}.tif"));
        write_band(&path);
        files.push(path);
    }
    let refs: Vec<&Path> = files.iter().map(|p| p.as_path()).collect();
    pack_archive(&archive_path, &refs);

    let out_dir = dir.path().join("out");
    let params = ConversionParams::default();
    let converted =
        api::cogify_tile(&archive_path, &out_dir, &params).expect("Failed to cogify archive");

    assert_eq!(converted.cogs.len(), 5);
    for stem in stems {
        let out = out_dir.join(format!("{stem}.tif"));
        assert!(out.is_file(), "missing COG {}", out.display());
    }

    // Revision year 21 is past the cutover: backscatter nodata 1, mask 0.
    let hh = Dataset::open(&converted.cogs[&BandRole::Hh].path).expect("Failed to open HH COG");
    assert_eq!(hh.rasterband(1).unwrap().no_data_value(), Some(1.0));
    let mask = Dataset::open(&converted.cogs[&BandRole::Mask].path).expect("Failed to open mask");
    assert_eq!(mask.rasterband(1).unwrap().no_data_value(), Some(0.0));

    let item = api::create_item(&converted, &params, None).expect("Failed to derive item");
    assert_eq!(item.id, "N00E072_21_MOS");
    assert_eq!(item.collection.as_deref(), Some("alos-palsar-mosaic"));
    assert_eq!(item.assets.len(), 5);
    assert!(
        item.assets["HH"]
            .href
            .ends_with("N00E072_21_sl_HH_F02DAR.tif")
    );

    let bbox = &item.bbox;
    assert!((bbox[0] - 72.0).abs() < 1e-6);
    assert!((bbox[3] - 1.0).abs() < 1e-6);

    let item_path = api::write_item_json(&item, &out_dir).expect("Failed to write item");
    assert!(item_path.ends_with("N00E072_21_MOS.json"));
}

#[test]
fn test_cogify_fnf_archive_yields_single_cog() {
    let dir = tempfile::tempdir().unwrap();
    let archive_path = dir.path().join("S16W150_15_FNF_F02DAR.tar.gz");

    let band = dir.path().join("S16W150_15_C_F02DAR.tif");
    write_band(&band);
    pack_archive(&archive_path, &[&band]);

    let out_dir = dir.path().join("out");
    let params = ConversionParams::default();
    let converted =
        api::cogify_tile(&archive_path, &out_dir, &params).expect("Failed to cogify archive");

    assert_eq!(converted.cogs.len(), 1);
    assert!(out_dir.join("S16W150_15_C_F02DAR.tif").is_file());

    // Pre-cutover year: nodata 0 everywhere.
    let c = Dataset::open(&converted.cogs[&BandRole::C].path).expect("Failed to open C COG");
    assert_eq!(c.rasterband(1).unwrap().no_data_value(), Some(0.0));

    let item = api::create_item(&converted, &params, None).expect("Failed to derive item");
    assert_eq!(item.id, "S16W150_15_FNF");
    assert_eq!(item.collection.as_deref(), Some("alos-fnf-mosaic"));
}
