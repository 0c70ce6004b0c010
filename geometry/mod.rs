pub mod point;
pub mod rectangle;

// 重新导出几何类型
pub use point::Point2D;
pub use rectangle::RectHV;
