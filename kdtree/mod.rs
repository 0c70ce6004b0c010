pub mod algorithms;
#[allow(clippy::module_inception)]
pub mod kdtree;
pub mod node;

// 重新导出主要类型
pub use algorithms::traversal::{Split, Splits};
pub use kdtree::{KdTree, NodeVisualization, TreeVisualization};
pub use node::{Node, Orientation, Side};
