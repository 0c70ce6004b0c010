use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::error::{KdError, KdResult};

/// 平面上的点，坐标必须是有限值
///
/// 构造时会把 `-0.0` 规范化为 `0.0`，保证相等判断和两种全序一致。
#[derive(Debug, Display, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[display(fmt = "({}, {})", x, y)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point2D {
    x: f64,
    y: f64,
}

impl Point2D {
    /// 创建新的点，坐标为 NaN 或无穷时返回 `InvalidArgument`
    pub fn new(x: f64, y: f64) -> KdResult<Self> {
        if !x.is_finite() || !y.is_finite() {
            return Err(KdError::InvalidArgument(format!(
                "point coordinates must be finite, got ({}, {})",
                x, y
            )));
        }
        Ok(Point2D {
            x: normalize_zero(x),
            y: normalize_zero(y),
        })
    }

    /// 由已经校验过的坐标构造，调用方保证坐标有限
    pub(crate) fn from_finite(x: f64, y: f64) -> Self {
        Point2D {
            x: normalize_zero(x),
            y: normalize_zero(y),
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// 到另一个点的欧氏距离的平方
    pub fn distance_squared_to(&self, other: &Point2D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// 到另一个点的欧氏距离
    pub fn distance_to(&self, other: &Point2D) -> f64 {
        self.distance_squared_to(other).sqrt()
    }

    /// x 优先的全序，x 相同时比较 y
    pub fn x_order(a: &Point2D, b: &Point2D) -> Ordering {
        a.x.total_cmp(&b.x).then_with(|| a.y.total_cmp(&b.y))
    }

    /// y 优先的全序，y 相同时比较 x
    pub fn y_order(a: &Point2D, b: &Point2D) -> Ordering {
        a.y.total_cmp(&b.y).then_with(|| a.x.total_cmp(&b.x))
    }
}

fn normalize_zero(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else {
        v
    }
}

// 坐标总是有限值，所以相等关系是自反的
impl Eq for Point2D {}

impl Hash for Point2D {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.to_bits().hash(state);
        self.y.to_bits().hash(state);
    }
}

/// 自然顺序：y 优先，与 `y_order` 相同
impl Ord for Point2D {
    fn cmp(&self, other: &Self) -> Ordering {
        Point2D::y_order(self, other)
    }
}

impl PartialOrd for Point2D {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl TryFrom<[f64; 2]> for Point2D {
    type Error = KdError;

    fn try_from(coords: [f64; 2]) -> KdResult<Self> {
        Point2D::new(coords[0], coords[1])
    }
}

impl From<Point2D> for [f64; 2] {
    fn from(p: Point2D) -> Self {
        [p.x, p.y]
    }
}

impl TryFrom<geo::Point<f64>> for Point2D {
    type Error = KdError;

    fn try_from(p: geo::Point<f64>) -> KdResult<Self> {
        Point2D::new(p.x(), p.y())
    }
}

impl From<Point2D> for geo::Point<f64> {
    fn from(p: Point2D) -> Self {
        geo::Point::new(p.x, p.y)
    }
}
