use anyhow::{anyhow, bail, Context, Result};
use geo::{Coord, Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};
use serde_json::{json, Map, Value};

use crate::feature::{paths, Feature, Ordinates, Shape};

/// GeoJSON name of a geometry's variant.
pub fn geometry_type(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Read features from GeoJSON bytes.
///
/// Accepts a FeatureCollection, a single Feature, or a bare geometry. Only a
/// document that is not JSON, or is not one of those objects, is an error: a
/// feature whose geometry is missing or malformed is returned with the reason
/// in place of its shape.
pub fn read_features(bytes: &[u8]) -> Result<Vec<Feature>> {
    let value: Value = serde_json::from_slice(bytes).context("Failed to parse GeoJSON bytes")?;

    match value["type"].as_str() {
        Some("FeatureCollection") => {
            let features = value["features"].as_array()
                .ok_or_else(|| anyhow!("[read_features] FeatureCollection has no \"features\" array"))?;
            Ok(features.iter().enumerate().map(|(index, feature)| read_feature(index, feature)).collect())
        }
        Some("Feature") => Ok(vec![read_feature(0, &value)]),
        Some(_) if value.get("coordinates").is_some() || value.get("geometries").is_some() => {
            Ok(vec![Feature {
                index: 0,
                id: None,
                properties: Map::new(),
                shape: parse_shape(&value).map_err(|e| format!("{e:#}")),
            }])
        }
        Some(other) => bail!("[read_features] Unsupported GeoJSON object type {other:?}"),
        None => bail!("[read_features] GeoJSON object has no \"type\" member"),
    }
}

fn read_feature(index: usize, feature: &Value) -> Feature {
    let shape = match feature.get("geometry") {
        None | Some(Value::Null) => Err("feature has no geometry".to_string()),
        Some(geometry) => parse_shape(geometry).map_err(|e| format!("{e:#}")),
    };

    Feature {
        index,
        id: feature.get("id").filter(|id| !id.is_null()).cloned(),
        properties: feature["properties"].as_object().cloned().unwrap_or_default(),
        shape,
    }
}

fn parse_shape(geometry: &Value) -> Result<Shape> {
    let mut ordinates = Ordinates::new();
    let geometry = parse_geometry(geometry, &mut ordinates)?;
    Ok(Shape::with_ordinates(geometry, ordinates))
}

/// Parse a GeoJSON geometry object, pushing the extra ordinates of each path
/// onto `ordinates` in traversal order.
fn parse_geometry(geometry: &Value, ordinates: &mut Ordinates) -> Result<Geometry<f64>> {
    let kind = geometry["type"].as_str()
        .ok_or_else(|| anyhow!("Invalid geometry: missing \"type\""))?;

    if kind == "GeometryCollection" {
        let members = geometry["geometries"].as_array()
            .ok_or_else(|| anyhow!("Invalid GeometryCollection: missing \"geometries\""))?;
        let members = members.iter()
            .map(|member| parse_geometry(member, ordinates))
            .collect::<Result<Vec<_>>>()?;
        return Ok(Geometry::GeometryCollection(GeometryCollection(members)));
    }

    let coords = &geometry["coordinates"];
    let geometry = match kind {
        "Point" => {
            let (coord, extra) = parse_position(coords)?;
            ordinates.push(vec![extra]);
            Geometry::Point(Point(coord))
        }
        "MultiPoint" => {
            let points = array(coords, "MultiPoint")?.iter()
                .map(|position| {
                    let (coord, extra) = parse_position(position)?;
                    ordinates.push(vec![extra]);
                    Ok(Point(coord))
                })
                .collect::<Result<Vec<_>>>()?;
            Geometry::MultiPoint(MultiPoint(points))
        }
        "LineString" => Geometry::LineString(parse_path(coords, false, ordinates)?),
        "MultiLineString" => {
            let lines = array(coords, "MultiLineString")?.iter()
                .map(|line| parse_path(line, false, ordinates))
                .collect::<Result<Vec<_>>>()?;
            Geometry::MultiLineString(MultiLineString(lines))
        }
        "Polygon" => Geometry::Polygon(parse_polygon(coords, ordinates)?),
        "MultiPolygon" => {
            let polygons = array(coords, "MultiPolygon")?.iter()
                .map(|polygon| parse_polygon(polygon, ordinates))
                .collect::<Result<Vec<_>>>()?;
            Geometry::MultiPolygon(MultiPolygon(polygons))
        }
        other => bail!("Unsupported geometry type {other:?}"),
    };
    Ok(geometry)
}

fn array<'a>(value: &'a Value, what: &str) -> Result<&'a Vec<Value>> {
    value.as_array().ok_or_else(|| anyhow!("Invalid {what}: coordinates must be an array"))
}

/// Parse a polygon: first ring is the exterior, the rest are holes.
/// An empty coordinate array is an empty polygon.
fn parse_polygon(coords: &Value, ordinates: &mut Ordinates) -> Result<Polygon<f64>> {
    let mut rings = array(coords, "Polygon")?.iter()
        .map(|ring| parse_path(ring, true, ordinates))
        .collect::<Result<Vec<_>>>()?
        .into_iter();
    let exterior = rings.next().unwrap_or_else(|| {
        ordinates.push(vec![]);
        LineString(vec![])
    });
    Ok(Polygon::new(exterior, rings.collect()))
}

/// Parse a sequence of positions. Rings are closed if the source left them open.
fn parse_path(coords: &Value, ring: bool, ordinates: &mut Ordinates) -> Result<LineString<f64>> {
    let (mut points, mut extras): (Vec<Coord<f64>>, Vec<Vec<f64>>) = array(coords, "path")?.iter()
        .map(parse_position)
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .unzip();

    if ring && !points.is_empty() && points[0] != points[points.len() - 1] {
        points.push(points[0]);
        extras.push(extras[0].clone());
    }

    ordinates.push(extras);
    Ok(LineString(points))
}

/// Parse one position `[x, y, ...]` into its coordinate and remaining ordinates.
fn parse_position(position: &Value) -> Result<(Coord<f64>, Vec<f64>)> {
    let values = position.as_array()
        .ok_or_else(|| anyhow!("Invalid position: expected an array of numbers"))?;
    if values.len() < 2 {
        bail!("Invalid position: expected at least 2 ordinates, found {}", values.len());
    }

    let numbers = values.iter()
        .map(|v| v.as_f64().ok_or_else(|| anyhow!("Invalid position: {v} is not a number")))
        .collect::<Result<Vec<_>>>()?;

    Ok((Coord { x: numbers[0], y: numbers[1] }, numbers[2..].to_vec()))
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// Write features to GeoJSON bytes as a FeatureCollection.
/// Features whose shape is an error are written with a null geometry.
pub fn write_features(features: &[Feature]) -> Result<Vec<u8>> {
    let features = features.iter()
        .map(feature_to_geojson)
        .collect::<Result<Vec<_>>>()?;

    let feature_collection = json!({
        "type": "FeatureCollection",
        "features": features,
    });

    serde_json::to_vec(&feature_collection).context("Failed to serialize GeoJSON to bytes")
}

fn feature_to_geojson(feature: &Feature) -> Result<Value> {
    let geometry = match &feature.shape {
        Ok(shape) => shape_to_geojson(shape)
            .with_context(|| format!("[write_features] feature {}", feature.index))?,
        Err(_) => Value::Null,
    };

    let mut object = Map::new();
    object.insert("type".to_string(), json!("Feature"));
    if let Some(id) = &feature.id {
        object.insert("id".to_string(), id.clone());
    }
    object.insert("geometry".to_string(), geometry);
    object.insert("properties".to_string(), Value::Object(feature.properties.clone()));
    Ok(Value::Object(object))
}

/// Convert a shape to a GeoJSON geometry object, re-attaching extra ordinates.
pub fn shape_to_geojson(shape: &Shape) -> Result<Value> {
    let mut extras = shape.ordinates.as_deref().map(|table| table.iter());

    if let Some(ordinates) = &shape.ordinates {
        let expected = paths(&shape.geometry).len();
        if ordinates.len() != expected {
            bail!("Ordinate table has {} paths, geometry has {expected}", ordinates.len());
        }
    }

    let mut next_path = || extras.as_mut().and_then(|it| it.next()).map(Vec::as_slice);
    geometry_to_geojson(&shape.geometry, &mut next_path)
}

fn geometry_to_geojson<'a>(
    geometry: &Geometry<f64>,
    next_path: &mut impl FnMut() -> Option<&'a [Vec<f64>]>,
) -> Result<Value> {
    let value = match geometry {
        Geometry::Point(point) => json!({
            "type": "Point",
            "coordinates": position(point.0, next_path().and_then(|e| e.first())),
        }),
        Geometry::MultiPoint(points) => json!({
            "type": "MultiPoint",
            "coordinates": points.0.iter()
                .map(|p| position(p.0, next_path().and_then(|e| e.first())))
                .collect::<Vec<_>>(),
        }),
        Geometry::LineString(line) => json!({
            "type": "LineString",
            "coordinates": path(line, next_path()),
        }),
        Geometry::MultiLineString(lines) => json!({
            "type": "MultiLineString",
            "coordinates": lines.0.iter().map(|l| path(l, next_path())).collect::<Vec<_>>(),
        }),
        Geometry::Polygon(polygon) => json!({
            "type": "Polygon",
            "coordinates": polygon_rings(polygon, &mut *next_path),
        }),
        Geometry::MultiPolygon(polygons) => json!({
            "type": "MultiPolygon",
            "coordinates": polygons.0.iter().map(|p| polygon_rings(p, &mut *next_path)).collect::<Vec<_>>(),
        }),
        Geometry::GeometryCollection(collection) => json!({
            "type": "GeometryCollection",
            "geometries": collection.0.iter()
                .map(|member| geometry_to_geojson(member, &mut *next_path))
                .collect::<Result<Vec<_>>>()?,
        }),
        other => bail!("{} has no GeoJSON representation", geometry_type(other)),
    };
    Ok(value)
}

fn polygon_rings<'a>(
    polygon: &Polygon<f64>,
    next_path: &mut impl FnMut() -> Option<&'a [Vec<f64>]>,
) -> Vec<Vec<Vec<f64>>> {
    // An empty exterior with no holes is an empty polygon: `"coordinates": []`.
    if polygon.exterior().0.is_empty() && polygon.interiors().is_empty() {
        next_path();
        return vec![];
    }
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(|ring| path(ring, next_path()))
        .collect()
}

fn path(line: &LineString<f64>, extras: Option<&[Vec<f64>]>) -> Vec<Vec<f64>> {
    line.0.iter().enumerate()
        .map(|(i, &coord)| position(coord, extras.and_then(|e| e.get(i))))
        .collect()
}

fn position(coord: Coord<f64>, extra: Option<&Vec<f64>>) -> Vec<f64> {
    let mut position = vec![coord.x, coord.y];
    if let Some(extra) = extra {
        position.extend_from_slice(extra);
    }
    position
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_a_bare_geometry() {
        let features = read_features(br#"{"type": "LineString", "coordinates": [[0, 0], [1, 1]]}"#).unwrap();
        assert_eq!(features.len(), 1);
        let shape = features[0].shape.as_ref().unwrap();
        assert_eq!(geometry_type(&shape.geometry), "LineString");
    }

    #[test]
    fn open_polygon_rings_are_closed() {
        let features = read_features(br#"{"type": "Polygon", "coordinates": [[[0, 0], [4, 0], [4, 4]]]}"#).unwrap();
        let Ok(Shape { geometry: Geometry::Polygon(polygon), .. }) = &features[0].shape else {
            panic!("expected a polygon");
        };
        assert_eq!(polygon.exterior().0.len(), 4);
    }

    #[test]
    fn malformed_feature_geometry_is_kept_as_error() {
        let bytes = br#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "properties": {}, "geometry": {"type": "Point", "coordinates": ["a", 1]}},
            {"type": "Feature", "properties": {}, "geometry": null},
            {"type": "Feature", "properties": {}, "geometry": {"type": "Point", "coordinates": [1, 2]}}
        ]}"#;
        let features = read_features(bytes).unwrap();
        assert!(features[0].shape.is_err());
        assert_eq!(features[1].shape.as_ref().unwrap_err(), "feature has no geometry");
        assert!(features[2].shape.is_ok());
    }

    #[test]
    fn rejects_non_geojson_documents() {
        assert!(read_features(b"not json").is_err());
        assert!(read_features(br#"{"type": "Topology"}"#).is_err());
    }

    #[test]
    fn extra_ordinates_survive_a_round_trip() {
        let geometry = json!({"type": "LineString", "coordinates": [[0.0, 0.0, 5.0], [1.0, 1.0, 6.0]]});
        let shape = parse_shape(&geometry).unwrap();
        assert!(shape.has_extra_ordinates());
        assert_eq!(shape_to_geojson(&shape).unwrap(), geometry);
    }

    #[test]
    fn empty_polygon_round_trips() {
        let geometry = json!({"type": "Polygon", "coordinates": []});
        let shape = parse_shape(&geometry).unwrap();
        assert_eq!(shape_to_geojson(&shape).unwrap(), geometry);
    }
}
