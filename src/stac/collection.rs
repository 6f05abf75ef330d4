//! Collection records for the two mosaic products.
use std::collections::BTreeMap;

use serde_json::json;

use crate::stac::constants;
use crate::stac::model::{
    Extent, SpatialExtent, StacCollection, TemporalExtent, STAC_VERSION,
};
use crate::types::Product;

/// Build the STAC collection record for a product family.
pub fn create_collection(product: Product) -> StacCollection {
    let (start, end) = constants::temporal_extent(product);

    let mut summaries = BTreeMap::new();
    summaries.insert("platform".to_string(), json!(constants::platforms()));
    summaries.insert("instruments".to_string(), json!(constants::instruments()));
    summaries.insert("gsd".to_string(), json!([constants::GSD]));

    StacCollection {
        type_: "Collection".to_string(),
        id: product.collection_id().to_string(),
        stac_version: STAC_VERSION.to_string(),
        stac_extensions: Vec::new(),
        title: Some(constants::collection_title(product).to_string()),
        description: constants::collection_description(product).to_string(),
        license: constants::LICENSE.to_string(),
        keywords: vec![
            "ALOS".to_string(),
            "PALSAR".to_string(),
            "JAXA".to_string(),
            "SAR".to_string(),
            "Global".to_string(),
        ],
        providers: constants::providers(),
        extent: Extent {
            spatial: SpatialExtent {
                bbox: vec![constants::SPATIAL_EXTENT.to_vec()],
            },
            temporal: TemporalExtent {
                interval: vec![vec![Some(start.to_string()), Some(end.to_string())]],
            },
        },
        summaries,
        links: vec![constants::handbook_link()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mosaic_collection_identity() {
        let collection = create_collection(Product::Mos);
        assert_eq!(collection.id, "alos-palsar-mosaic");
        assert_eq!(collection.type_, "Collection");
        assert_eq!(collection.license, "proprietary");
        assert_eq!(
            collection.extent.spatial.bbox[0],
            vec![-180.0, 85.0, 180.0, -56.0]
        );
    }

    #[test]
    fn fnf_collection_identity() {
        let collection = create_collection(Product::Fnf);
        assert_eq!(collection.id, "alos-fnf-mosaic");
        assert_eq!(
            collection.extent.temporal.interval[0][1].as_deref(),
            Some("2020-12-31T23:59:59Z")
        );
    }

    #[test]
    fn collections_carry_providers_and_handbook() {
        let collection = create_collection(Product::Mos);
        assert_eq!(collection.providers.len(), 2);
        assert!(collection.links.iter().any(|l| l.rel == "handbook"));
    }
}
