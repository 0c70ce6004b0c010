pub mod brute;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod geometry;
pub mod index;
pub mod kdtree;

use std::error::Error;

// 重新导出主要的公共接口
pub use brute::PointSet;
pub use error::{KdError, KdResult};
pub use geometry::{Point2D, RectHV};
pub use index::PointIndex;
pub use kdtree::{KdTree, Orientation, Split};

// 重新导出常用类型，便于二进制文件使用
pub use client::{CliArgs, OutputFormatter};
pub use config::KdConfig;

pub type Result<T> = std::result::Result<T, Box<dyn Error + Send + Sync>>;
