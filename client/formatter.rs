use std::str::FromStr;

use colored::*;
use geojson::{Feature, FeatureCollection, JsonObject};
use serde_json::json;

use crate::geometry::{Point2D, RectHV};
use crate::kdtree::{KdTree, Orientation};

/// 命令行输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    GeoJson,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "geojson" => Ok(OutputFormat::GeoJson),
            _ => Err(format!(
                "Invalid output format: '{}'. Must be one of: text, json, geojson",
                s
            )),
        }
    }
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn format_contains(&self, query: &Point2D, found: bool) -> String {
        match self.format {
            OutputFormat::Text => {
                if found {
                    format!("{} {}", query, "(true)".green())
                } else {
                    format!("{} {}", query, "(false)".red())
                }
            }
            OutputFormat::Json => json!({ "query": query, "contains": found }).to_string(),
            OutputFormat::GeoJson => {
                let mut properties = JsonObject::new();
                properties.insert("contains".to_string(), json!(found));
                Self::point_feature(query, properties).to_string()
            }
        }
    }

    /// 范围查询结果，GeoJSON 格式会附带查询矩形
    pub fn format_range(&self, rect: &RectHV, points: &[Point2D]) -> String {
        match self.format {
            OutputFormat::Text => Self::format_point_list(points),
            OutputFormat::Json => json!({ "rect": rect, "count": points.len(), "points": points })
                .to_string(),
            OutputFormat::GeoJson => {
                let mut features: Vec<Feature> = points
                    .iter()
                    .map(|p| Self::point_feature(p, JsonObject::new()))
                    .collect();

                let polygon = geo::Rect::<f64>::from(*rect).to_polygon();
                let mut properties = JsonObject::new();
                properties.insert("role".to_string(), json!("query"));
                features.push(Feature {
                    bbox: None,
                    geometry: Some(geojson::Geometry::new(geojson::Value::from(&polygon))),
                    id: None,
                    properties: Some(properties),
                    foreign_members: None,
                });

                FeatureCollection {
                    bbox: None,
                    features,
                    foreign_members: None,
                }
                .to_string()
            }
        }
    }

    pub fn format_nearest(&self, query: &Point2D, nearest: Option<(Point2D, f64)>) -> String {
        match (self.format, nearest) {
            (OutputFormat::Text, Some((p, distance))) => format!(
                "{} (distance {})",
                p.to_string().green(),
                format!("{:.6}", distance).cyan()
            ),
            (OutputFormat::Text, None) => "(nil)".red().to_string(),
            (OutputFormat::Json, Some((p, distance))) => {
                json!({ "query": query, "nearest": p, "distance": distance }).to_string()
            }
            (OutputFormat::Json, None) => json!({ "query": query, "nearest": null }).to_string(),
            (OutputFormat::GeoJson, Some((p, distance))) => {
                let mut properties = JsonObject::new();
                properties.insert("distance".to_string(), json!(distance));
                Self::point_feature(&p, properties).to_string()
            }
            (OutputFormat::GeoJson, None) => FeatureCollection {
                bbox: None,
                features: Vec::new(),
                foreign_members: None,
            }
            .to_string(),
        }
    }

    /// 每个节点的分割信息
    ///
    /// GeoJSON 格式输出点和裁剪后的分割线段，绘图端可以直接使用。
    pub fn format_splits(&self, tree: &KdTree) -> Result<String, serde_json::Error> {
        match self.format {
            OutputFormat::Text => {
                if tree.is_empty() {
                    return Ok("(empty tree)".yellow().to_string());
                }
                let mut result = String::new();
                for split in tree.splits() {
                    let orientation = match split.orientation {
                        Orientation::Vertical => "|".red(),
                        Orientation::Horizontal => "-".blue(),
                    };
                    result.push_str(&format!(
                        "{}{} {} {}\n",
                        "  ".repeat(split.depth),
                        orientation,
                        split.point,
                        split.rect.to_string().dimmed()
                    ));
                }
                Ok(result.trim_end().to_string())
            }
            OutputFormat::Json => tree.export_to_json(),
            OutputFormat::GeoJson => {
                let mut features = Vec::new();
                for split in tree.splits() {
                    let mut properties = JsonObject::new();
                    properties.insert("depth".to_string(), json!(split.depth));
                    features.push(Self::point_feature(&split.point, properties));

                    let (from, to) = split.segment();
                    let line = geo::Line::new(geo::Point::from(from), geo::Point::from(to));
                    let mut properties = JsonObject::new();
                    properties.insert("depth".to_string(), json!(split.depth));
                    properties.insert("orientation".to_string(), json!(split.orientation));
                    features.push(Feature {
                        bbox: None,
                        geometry: Some(geojson::Geometry::new(geojson::Value::from(&line))),
                        id: None,
                        properties: Some(properties),
                        foreign_members: None,
                    });
                }
                Ok(FeatureCollection {
                    bbox: None,
                    features,
                    foreign_members: None,
                }
                .to_string())
            }
        }
    }

    fn format_point_list(points: &[Point2D]) -> String {
        if points.is_empty() {
            return "(empty array)".yellow().to_string();
        }
        let mut result = String::new();
        for (i, p) in points.iter().enumerate() {
            result.push_str(&format!("{}) {}\n", (i + 1).to_string().blue(), p));
        }
        result.trim_end().to_string()
    }

    fn point_feature(p: &Point2D, properties: JsonObject) -> Feature {
        let point: geo::Point<f64> = (*p).into();
        Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::new(geojson::Value::from(&point))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }

    pub fn format_error(err: &str) -> String {
        format!("(error) {}", err.red())
    }

    pub fn format_success(msg: &str) -> String {
        format!("✅ {}", msg.green())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64) -> Point2D {
        Point2D::new(x, y).unwrap()
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("GeoJSON".parse::<OutputFormat>().unwrap(), OutputFormat::GeoJson);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_text_range() {
        let formatter = OutputFormatter::new(OutputFormat::Text);
        let rect = RectHV::unit_square();
        let text = formatter.format_range(&rect, &[pt(0.2, 0.3), pt(0.4, 0.7)]);
        assert!(text.contains("(0.2, 0.3)"));
        assert!(text.contains("(0.4, 0.7)"));
        assert_eq!(text.lines().count(), 2);

        assert!(formatter.format_range(&rect, &[]).contains("(empty array)"));
    }

    #[test]
    fn test_json_nearest() {
        let formatter = OutputFormatter::new(OutputFormat::Json);
        let out = formatter.format_nearest(&pt(0.45, 0.65), Some((pt(0.4, 0.7), 0.5)));
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["nearest"][0], 0.4);
        assert_eq!(value["distance"], 0.5);

        let out = formatter.format_nearest(&pt(0.45, 0.65), None);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(value["nearest"].is_null());
    }

    #[test]
    fn test_geojson_range() {
        let formatter = OutputFormatter::new(OutputFormat::GeoJson);
        let rect = RectHV::new(0.0, 0.0, 0.5, 1.0).unwrap();
        let out = formatter.format_range(&rect, &[pt(0.2, 0.3)]);

        let parsed = out.parse::<geojson::GeoJson>().unwrap();
        match parsed {
            geojson::GeoJson::FeatureCollection(fc) => {
                assert_eq!(fc.features.len(), 2);
                let last = fc.features.last().unwrap();
                assert_eq!(last.property("role"), Some(&json!("query")));
            }
            other => panic!("expected a feature collection, got {:?}", other),
        }
    }

    #[test]
    fn test_geojson_splits() {
        let mut tree = KdTree::new();
        tree.insert(pt(0.7, 0.2)).unwrap();
        tree.insert(pt(0.5, 0.4)).unwrap();

        let out = OutputFormatter::new(OutputFormat::GeoJson)
            .format_splits(&tree)
            .unwrap();
        let parsed = out.parse::<geojson::GeoJson>().unwrap();
        let fc = match parsed {
            geojson::GeoJson::FeatureCollection(fc) => fc,
            other => panic!("expected a feature collection, got {:?}", other),
        };
        // 每个节点一个点和一条线段
        assert_eq!(fc.features.len(), 4);
        assert_eq!(fc.features[1].property("orientation"), Some(&json!("vertical")));
        assert_eq!(fc.features[3].property("orientation"), Some(&json!("horizontal")));
    }

    #[test]
    fn test_text_splits() {
        let formatter = OutputFormatter::new(OutputFormat::Text);
        assert!(formatter
            .format_splits(&KdTree::new())
            .unwrap()
            .contains("(empty tree)"));

        let mut tree = KdTree::new();
        tree.insert(pt(0.7, 0.2)).unwrap();
        tree.insert(pt(0.5, 0.4)).unwrap();
        let out = formatter.format_splits(&tree).unwrap();
        assert_eq!(out.lines().count(), 2);
        assert!(out.lines().nth(1).unwrap().starts_with("  "));
    }

    #[test]
    fn test_contains_formats() {
        let text = OutputFormatter::new(OutputFormat::Text).format_contains(&pt(0.5, 0.5), false);
        assert!(text.contains("false"));

        let json = OutputFormatter::new(OutputFormat::Json).format_contains(&pt(0.5, 0.5), true);
        assert!(json.contains("\"contains\":true"));
    }
}
