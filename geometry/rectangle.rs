use derive_more::Display;
use serde::{Deserialize, Serialize};

use super::point::Point2D;
use crate::error::{KdError, KdResult};

/// 轴对齐矩形，边界是闭区间
#[derive(Debug, Display, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[display(fmt = "[{}, {}] x [{}, {}]", xmin, xmax, ymin, ymax)]
#[serde(try_from = "RectBounds")]
pub struct RectHV {
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
}

/// 反序列化时的原始边界，转换成 `RectHV` 时重新校验
#[derive(Deserialize)]
struct RectBounds {
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
}

impl TryFrom<RectBounds> for RectHV {
    type Error = KdError;

    fn try_from(b: RectBounds) -> KdResult<Self> {
        RectHV::new(b.xmin, b.ymin, b.xmax, b.ymax)
    }
}

impl RectHV {
    /// 创建新的矩形
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> KdResult<Self> {
        if ![xmin, ymin, xmax, ymax].iter().all(|v| v.is_finite()) {
            return Err(KdError::InvalidArgument(format!(
                "rectangle bounds must be finite, got ({}, {}, {}, {})",
                xmin, ymin, xmax, ymax
            )));
        }
        if xmin > xmax || ymin > ymax {
            return Err(KdError::InvalidArgument(format!(
                "invalid rectangle bounds: [{}, {}] x [{}, {}]",
                xmin, xmax, ymin, ymax
            )));
        }
        Ok(RectHV {
            xmin,
            ymin,
            xmax,
            ymax,
        })
    }

    /// 单位正方形 [0, 1] x [0, 1]，kd-tree 默认的 universe
    pub const fn unit_square() -> Self {
        RectHV {
            xmin: 0.0,
            ymin: 0.0,
            xmax: 1.0,
            ymax: 1.0,
        }
    }

    /// 只包含一个点的退化矩形
    pub fn from_point(p: &Point2D) -> Self {
        RectHV {
            xmin: p.x(),
            ymin: p.y(),
            xmax: p.x(),
            ymax: p.y(),
        }
    }

    pub fn xmin(&self) -> f64 {
        self.xmin
    }

    pub fn ymin(&self) -> f64 {
        self.ymin
    }

    pub fn xmax(&self) -> f64 {
        self.xmax
    }

    pub fn ymax(&self) -> f64 {
        self.ymax
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// 对角线长度的平方是否是有限值
    ///
    /// 边界在 1e154 量级以上时平方距离会溢出成无穷，最近邻的剪枝就失效了。
    pub fn has_finite_diagonal(&self) -> bool {
        let w = self.width();
        let h = self.height();
        (w * w + h * h).is_finite()
    }

    /// 判断矩形是否包含一个点（含边界）
    pub fn contains(&self, p: &Point2D) -> bool {
        self.xmin <= p.x() && p.x() <= self.xmax && self.ymin <= p.y() && p.y() <= self.ymax
    }

    /// 判断两个矩形是否相交（含边界接触）
    pub fn intersects(&self, other: &RectHV) -> bool {
        self.xmax >= other.xmin
            && self.ymax >= other.ymin
            && other.xmax >= self.xmin
            && other.ymax >= self.ymin
    }

    /// 点到矩形的最小距离的平方，点在矩形内时为 0
    pub fn distance_squared_to(&self, p: &Point2D) -> f64 {
        let dx = if p.x() < self.xmin {
            p.x() - self.xmin
        } else if p.x() > self.xmax {
            p.x() - self.xmax
        } else {
            0.0
        };
        let dy = if p.y() < self.ymin {
            p.y() - self.ymin
        } else if p.y() > self.ymax {
            p.y() - self.ymax
        } else {
            0.0
        };
        dx * dx + dy * dy
    }

    /// 点到矩形的最小距离
    pub fn distance_to(&self, p: &Point2D) -> f64 {
        self.distance_squared_to(p).sqrt()
    }

    // 下面四个方法用于 kd-tree 子节点矩形的推导，
    // 调用方保证新的边界落在原矩形内

    pub(crate) fn with_xmin(&self, xmin: f64) -> Self {
        RectHV { xmin, ..*self }
    }

    pub(crate) fn with_xmax(&self, xmax: f64) -> Self {
        RectHV { xmax, ..*self }
    }

    pub(crate) fn with_ymin(&self, ymin: f64) -> Self {
        RectHV { ymin, ..*self }
    }

    pub(crate) fn with_ymax(&self, ymax: f64) -> Self {
        RectHV { ymax, ..*self }
    }
}

impl Default for RectHV {
    fn default() -> Self {
        RectHV::unit_square()
    }
}

impl From<RectHV> for geo::Rect<f64> {
    fn from(r: RectHV) -> Self {
        geo::Rect::new(
            geo::coord! { x: r.xmin, y: r.ymin },
            geo::coord! { x: r.xmax, y: r.ymax },
        )
    }
}
