use std::path::Path;

use geo::Geometry;
use geojson::GeoJson;
use tracing::debug;

use crate::error::{KdError, KdResult};
use crate::geometry::Point2D;

/// 从文件读取点，按扩展名选择格式
///
/// `.geojson` 和 `.json` 按 GeoJSON 解析，其余按文本格式（每行 `x y`）解析。
pub fn load_points(path: &Path) -> crate::Result<Vec<Point2D>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    let is_geojson = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("geojson") | Some("json")
    );
    let points = if is_geojson {
        parse_geojson(&content)?
    } else {
        parse_text(&content)?
    };

    debug!(path = %path.display(), count = points.len(), "loaded points");
    Ok(points)
}

/// 解析文本格式：每行两个用空白分隔的坐标，空行和 `#` 开头的行被忽略
pub fn parse_text(content: &str) -> KdResult<Vec<Point2D>> {
    let mut points = Vec::new();
    for (index, raw) in content.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        if fields.len() != 2 {
            return Err(KdError::Parse {
                line,
                message: format!("expected two coordinates, found {}", fields.len()),
            });
        }

        let x = parse_coordinate(fields[0], line)?;
        let y = parse_coordinate(fields[1], line)?;
        let point = Point2D::new(x, y).map_err(|e| KdError::Parse {
            line,
            message: e.to_string(),
        })?;
        points.push(point);
    }
    Ok(points)
}

fn parse_coordinate(field: &str, line: usize) -> KdResult<f64> {
    field.parse::<f64>().map_err(|e| KdError::Parse {
        line,
        message: format!("invalid coordinate '{}': {}", field, e),
    })
}

/// 解析 GeoJSON：支持 FeatureCollection、Feature 和 Geometry
///
/// 只接受 Point、MultiPoint 以及由它们组成的 GeometryCollection。
pub fn parse_geojson(content: &str) -> crate::Result<Vec<Point2D>> {
    let geojson = content.parse::<GeoJson>()?;

    let geometries: Vec<geojson::Geometry> = match geojson {
        GeoJson::Geometry(g) => vec![g],
        GeoJson::Feature(f) => f.geometry.into_iter().collect(),
        GeoJson::FeatureCollection(fc) => fc
            .features
            .into_iter()
            .filter_map(|feature| feature.geometry)
            .collect(),
    };

    let mut points = Vec::new();
    for g in geometries {
        let geometry: Geometry<f64> = g.try_into()?;
        collect_points(&geometry, &mut points)?;
    }
    Ok(points)
}

fn collect_points(geometry: &Geometry<f64>, points: &mut Vec<Point2D>) -> KdResult<()> {
    match geometry {
        Geometry::Point(p) => points.push(Point2D::try_from(*p)?),
        Geometry::MultiPoint(mp) => {
            for p in mp.iter() {
                points.push(Point2D::try_from(*p)?);
            }
        }
        Geometry::GeometryCollection(gc) => {
            for inner in gc.iter() {
                collect_points(inner, points)?;
            }
        }
        other => {
            return Err(KdError::UnsupportedGeometry(
                geometry_kind(other).to_string(),
            ))
        }
    }
    Ok(())
}

fn geometry_kind(geometry: &Geometry<f64>) -> &'static str {
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
