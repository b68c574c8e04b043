//! deck.gl layer construction.
//!
//! Both layers are plain `GeoJSON` `FeatureCollection`s with the fill
//! color precomputed into the feature properties, keyed the way the map
//! front end reads them.

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use jochome_map_district_models::{DistrictRow, FillColor};
use jochome_map_gml_models::{LonLatRing, TownRecord};
use serde_json::json;

/// Builds the merged district layer, one feature per disjoint part.
#[must_use]
pub fn district_layer(rows: &[DistrictRow]) -> FeatureCollection {
    let features = rows
        .iter()
        .map(|row| {
            let mut properties = JsonObject::new();
            properties.insert("prefecture_name".to_string(), json!(row.prefecture_name));
            properties.insert("city_name".to_string(), json!(row.city_names));
            properties.insert("town_group".to_string(), json!(row.label));
            properties.insert("fill_color".to_string(), json!(row.fill_color.to_array()));
            feature(&row.ring, properties)
        })
        .collect();

    collection(features)
}

/// Builds the flat town layer: every record of the city, all drawn in
/// the same translucent black.
#[must_use]
pub fn towns_layer(records: &[&TownRecord]) -> FeatureCollection {
    let features = records
        .iter()
        .map(|record| {
            let mut properties = JsonObject::new();
            properties.insert(
                "prefecture_name".to_string(),
                json!(record.prefecture_name),
            );
            properties.insert("city_name".to_string(), json!(record.city_name));
            properties.insert("town_name".to_string(), json!(record.town_name));
            properties.insert("address".to_string(), json!(record.address));
            properties.insert(
                "fill_color".to_string(),
                json!(FillColor::ALL_TOWNS.to_array()),
            );
            feature(&record.ring, properties)
        })
        .collect();

    collection(features)
}

fn feature(ring: &LonLatRing, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(polygon(ring))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// `GeoJSON` polygons require an explicitly closed exterior ring.
fn polygon(ring: &LonLatRing) -> Value {
    let mut positions: Vec<Vec<f64>> = ring.iter().map(|&(lon, lat)| vec![lon, lat]).collect();
    let needs_close = positions.len() > 1 && positions.first() != positions.last();
    if needs_close {
        let first = positions[0].clone();
        positions.push(first);
    }
    Value::Polygon(vec![positions])
}

fn collection(features: Vec<Feature>) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}
