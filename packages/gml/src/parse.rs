//! Streaming parser for the JPGIS GML boundary document.
//!
//! The document is a `gml:FeatureCollection` of `gml:featureMember`
//! elements. Each feature carries the administrative names as FME
//! attribute elements and its polygon boundary as a `gml:posList` nested
//! inside the GML surface structure. The parser is a single pull-event
//! pass: no DOM is built, and only the elements named below are ever
//! captured.

use std::io::BufRead;

use jochome_map_gml_models::{LonLatRing, RecordTable, TownRecord};
use quick_xml::Reader;
use quick_xml::events::Event;

use crate::GmlError;

/// Element that delimits one feature record.
const FEATURE_MEMBER: &[u8] = b"featureMember";

/// Text-bearing elements captured per feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Prefecture,
    City,
    Town,
    PosList,
}

/// Maps an element local name to the field it populates, namespace prefix
/// already stripped.
const fn field_for(name: &[u8]) -> Option<Field> {
    match name {
        b"PREF_NAME" => Some(Field::Prefecture),
        b"CITY_NAME" => Some(Field::City),
        b"S_NAME" => Some(Field::Town),
        b"posList" => Some(Field::PosList),
        _ => None,
    }
}

/// Accumulates the captured fields of the feature currently being read.
///
/// A surface may carry several `gml:posList` elements (interior rings,
/// extra patches); only the first one, the outer boundary, is kept.
#[derive(Debug, Default)]
struct PendingFeature {
    prefecture_name: Option<String>,
    city_name: Option<String>,
    town_name: Option<String>,
    pos_list: Option<String>,
}

impl PendingFeature {
    const fn slot(&self, field: Field) -> &Option<String> {
        match field {
            Field::Prefecture => &self.prefecture_name,
            Field::City => &self.city_name,
            Field::Town => &self.town_name,
            Field::PosList => &self.pos_list,
        }
    }

    fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Prefecture => self.prefecture_name = Some(value),
            Field::City => self.city_name = Some(value),
            Field::Town => self.town_name = Some(value),
            Field::PosList => self.pos_list = Some(value),
        }
    }

    fn into_record(self, index: usize) -> Result<TownRecord, GmlError> {
        let feature = self
            .town_name
            .clone()
            .unwrap_or_else(|| format!("#{index}"));

        let Some(prefecture_name) = self.prefecture_name else {
            return Err(missing(&feature, "fme:PREF_NAME"));
        };
        let Some(city_name) = self.city_name else {
            return Err(missing(&feature, "fme:CITY_NAME"));
        };
        let Some(town_name) = self.town_name else {
            return Err(missing(&feature, "fme:S_NAME"));
        };
        let Some(pos_list) = self.pos_list else {
            return Err(missing(&feature, "gml:posList"));
        };

        let ring = parse_pos_list(&pos_list)
            .map_err(|reason| GmlError::MalformedRecord { feature, reason })?;

        Ok(TownRecord::new(prefecture_name, city_name, town_name, ring))
    }
}

fn missing(feature: &str, element: &str) -> GmlError {
    GmlError::MalformedRecord {
        feature: feature.to_string(),
        reason: format!("missing {element}"),
    }
}

/// Parses a `gml:posList` payload into a (longitude, latitude) ring.
///
/// The payload is a whitespace-separated flat list of decimal numbers in
/// [latitude, longitude] pair order (the JGD2011 northing/easting axis
/// convention), so each pair is swapped exactly once on the way out.
fn parse_pos_list(text: &str) -> Result<LonLatRing, String> {
    let mut values = Vec::new();
    for token in text.split_whitespace() {
        let value: f64 = token
            .parse()
            .map_err(|_| format!("invalid coordinate '{token}'"))?;
        values.push(value);
    }

    if values.is_empty() {
        return Err("empty coordinate list".to_string());
    }
    if values.len() % 2 != 0 {
        return Err(format!("odd coordinate count: {}", values.len()));
    }

    Ok(values.chunks_exact(2).map(|pair| (pair[1], pair[0])).collect())
}

/// Parses a GML boundary document into a [`RecordTable`].
///
/// Record order matches document order. The parse aborts on the first
/// malformed feature.
///
/// # Errors
///
/// Returns [`GmlError::Xml`] if the document is not well-formed, or
/// [`GmlError::MalformedRecord`] if a feature lacks a required name or
/// coordinate element or its coordinate list cannot be interpreted as
/// (latitude, longitude) pairs.
pub fn parse_gml<R: BufRead>(reader: R) -> Result<RecordTable, GmlError> {
    let mut xml = Reader::from_reader(reader);
    let mut buf = Vec::new();

    let mut table = RecordTable::new();
    let mut pending: Option<PendingFeature> = None;
    let mut capture: Option<Field> = None;
    let mut text = String::new();
    let mut index = 0usize;

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let name = e.local_name();
                let name = name.as_ref();
                if name == FEATURE_MEMBER {
                    index += 1;
                    pending = Some(PendingFeature::default());
                } else if let (Some(feature), Some(field)) =
                    (pending.as_ref(), field_for(name))
                {
                    // First occurrence wins; later ones are interior rings
                    // or duplicate attribute elements.
                    if feature.slot(field).is_none() {
                        capture = Some(field);
                        text.clear();
                    }
                }
            }
            Event::Text(e) => {
                if capture.is_some() {
                    text.push_str(&e.unescape()?);
                }
            }
            Event::End(e) => {
                let name = e.local_name();
                let name = name.as_ref();
                if name == FEATURE_MEMBER {
                    if let Some(feature) = pending.take() {
                        table.push(feature.into_record(index)?);
                    }
                } else if let Some(field) = capture {
                    if field_for(name) == Some(field) {
                        if let Some(feature) = pending.as_mut() {
                            feature.set(field, std::mem::take(&mut text));
                        }
                        capture = None;
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature(pref: &str, city: &str, town: &str, pos_list: &str) -> String {
        format!(
            "<gml:featureMember><fme:town>\
             <fme:PREF_NAME>{pref}</fme:PREF_NAME>\
             <fme:CITY_NAME>{city}</fme:CITY_NAME>\
             <fme:S_NAME>{town}</fme:S_NAME>\
             <gml:surfaceProperty><gml:Surface><gml:patches><gml:PolygonPatch>\
             <gml:exterior><gml:LinearRing>\
             <gml:posList>{pos_list}</gml:posList>\
             </gml:LinearRing></gml:exterior></gml:PolygonPatch></gml:patches>\
             </gml:Surface></gml:surfaceProperty>\
             </fme:town></gml:featureMember>"
        )
    }

    fn document(features: &[String]) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <gml:FeatureCollection \
             xmlns:gml=\"http://www.opengis.net/gml/3.2\" \
             xmlns:fme=\"http://www.safe.com/gml/fme\">{}\
             </gml:FeatureCollection>",
            features.concat()
        )
    }

    #[test]
    fn parses_features_in_document_order() {
        let doc = document(&[
            feature(
                "北海道",
                "札幌市中央区",
                "北一条西2丁目",
                "43.0 141.0 43.0 141.1 43.1 141.1 43.0 141.0",
            ),
            feature("北海道", "旭川市", "1条通1丁目", "43.7 142.3 43.7 142.4 43.8 142.4"),
        ]);

        let table = parse_gml(doc.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);

        let records = table.records();
        assert_eq!(records[0].prefecture_name, "北海道");
        assert_eq!(records[0].city_name, "札幌市中央区");
        assert_eq!(records[0].town_name, "北一条西2丁目");
        assert_eq!(records[0].address, "札幌市中央区 北一条西2丁目");
        assert_eq!(records[1].town_name, "1条通1丁目");
    }

    #[test]
    fn pos_list_axes_are_swapped_exactly_once() {
        let doc = document(&[feature(
            "北海道",
            "札幌市中央区",
            "北一条西2丁目",
            "43.0 141.0 43.0 141.1 43.1 141.1 43.0 141.0",
        )]);

        let table = parse_gml(doc.as_bytes()).unwrap();
        let ring = &table.records()[0].ring;

        // Input pairs are (latitude, longitude); the ring stores
        // (longitude, latitude).
        assert_eq!(ring.len(), 4);
        assert_eq!(ring[0], (141.0, 43.0));
        assert_eq!(ring[2], (141.1, 43.1));
    }

    #[test]
    fn first_pos_list_wins_when_a_surface_has_interior_rings() {
        let inner = "<gml:featureMember><fme:town>\
             <fme:PREF_NAME>北海道</fme:PREF_NAME>\
             <fme:CITY_NAME>札幌市中央区</fme:CITY_NAME>\
             <fme:S_NAME>北一条西2丁目</fme:S_NAME>\
             <gml:surfaceProperty><gml:Surface><gml:patches><gml:PolygonPatch>\
             <gml:exterior><gml:LinearRing>\
             <gml:posList>43.0 141.0 43.0 141.1 43.1 141.1</gml:posList>\
             </gml:LinearRing></gml:exterior>\
             <gml:interior><gml:LinearRing>\
             <gml:posList>43.01 141.01 43.01 141.02 43.02 141.02</gml:posList>\
             </gml:LinearRing></gml:interior>\
             </gml:PolygonPatch></gml:patches></gml:Surface></gml:surfaceProperty>\
             </fme:town></gml:featureMember>"
            .to_string();

        let table = parse_gml(document(&[inner]).as_bytes()).unwrap();
        let ring = &table.records()[0].ring;
        assert_eq!(ring[0], (141.0, 43.0));
        assert_eq!(ring.len(), 3);
    }

    #[test]
    fn missing_town_name_is_malformed() {
        let broken = "<gml:featureMember><fme:town>\
             <fme:PREF_NAME>北海道</fme:PREF_NAME>\
             <fme:CITY_NAME>札幌市中央区</fme:CITY_NAME>\
             <gml:surfaceProperty><gml:Surface><gml:patches><gml:PolygonPatch>\
             <gml:exterior><gml:LinearRing>\
             <gml:posList>43.0 141.0 43.0 141.1 43.1 141.1</gml:posList>\
             </gml:LinearRing></gml:exterior></gml:PolygonPatch></gml:patches>\
             </gml:Surface></gml:surfaceProperty>\
             </fme:town></gml:featureMember>"
            .to_string();

        let err = parse_gml(document(&[broken]).as_bytes()).unwrap_err();
        match err {
            GmlError::MalformedRecord { feature, reason } => {
                assert_eq!(feature, "#1");
                assert!(reason.contains("fme:S_NAME"), "unexpected reason: {reason}");
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn odd_coordinate_count_is_malformed() {
        let doc = document(&[feature(
            "北海道",
            "札幌市中央区",
            "北一条西2丁目",
            "43.0 141.0 43.0",
        )]);

        let err = parse_gml(doc.as_bytes()).unwrap_err();
        match err {
            GmlError::MalformedRecord { feature, reason } => {
                assert_eq!(feature, "北一条西2丁目");
                assert!(reason.contains("odd"), "unexpected reason: {reason}");
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn blank_pos_list_is_malformed() {
        let doc = document(&[feature("北海道", "札幌市中央区", "北一条西2丁目", " ")]);

        let err = parse_gml(doc.as_bytes()).unwrap_err();
        match err {
            GmlError::MalformedRecord { reason, .. } => {
                assert!(reason.contains("empty"), "unexpected reason: {reason}");
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_coordinate_is_malformed() {
        let doc = document(&[feature(
            "北海道",
            "札幌市中央区",
            "北一条西2丁目",
            "43.0 141.0 43.0 oops",
        )]);

        let err = parse_gml(doc.as_bytes()).unwrap_err();
        match err {
            GmlError::MalformedRecord { reason, .. } => {
                assert!(reason.contains("oops"), "unexpected reason: {reason}");
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }
}
