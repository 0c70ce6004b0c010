use thiserror::Error;

use crate::geometry::{Point2D, RectHV};

/// kd-tree 及其几何类型的错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KdError {
    /// 非有限坐标、矩形边界颠倒等非法参数
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// 插入的点不在树的 universe 矩形内
    #[error("point {point} is outside the universe {universe}")]
    OutsideUniverse { point: Point2D, universe: RectHV },

    /// 点文件中无法解析的行
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// GeoJSON 中不是点的几何体
    #[error("unsupported geometry: {0}")]
    UnsupportedGeometry(String),
}

pub type KdResult<T> = std::result::Result<T, KdError>;
