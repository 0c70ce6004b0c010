use serde::{Deserialize, Serialize};
use tracing::debug;

use super::node::{Node, Orientation};
use crate::geometry::{Point2D, RectHV};

/// 用于 JSON 序列化的树结构，供前端绘制点和分割线
#[derive(Debug, Serialize, Deserialize)]
pub struct TreeVisualization {
    /// 根节点的矩形
    pub universe: RectHV,
    /// 点的数量
    pub size: usize,
    /// 树的层数
    pub height: usize,
    /// 根节点（如果存在）
    pub root: Option<NodeVisualization>,
}

/// 用于 JSON 序列化的节点结构
#[derive(Debug, Serialize, Deserialize)]
pub struct NodeVisualization {
    pub point: Point2D,
    pub rect: RectHV,
    pub orientation: Orientation,
    pub left: Option<Box<NodeVisualization>>,
    pub right: Option<Box<NodeVisualization>>,
}

/// 2d-tree 主结构
///
/// 不重复的点集合，支持成员判断、矩形范围查询和最近邻查询。
/// 所有点都必须落在 universe 矩形内（默认单位正方形）。
#[derive(Debug)]
pub struct KdTree {
    /// 根节点
    root: Option<Box<Node>>,
    /// 节点数量
    size: usize,
    /// 根节点的矩形
    universe: RectHV,
}

impl KdTree {
    /// 创建以单位正方形为 universe 的空树
    pub fn new() -> Self {
        Self::with_universe(RectHV::unit_square())
    }

    /// 创建指定 universe 的空树
    ///
    /// 距离用平方比较，universe 的对角线平方必须是有限值，
    /// 用 `RectHV::has_finite_diagonal` 检查；配置加载时已经拒绝了超限的 universe。
    pub fn with_universe(universe: RectHV) -> Self {
        debug!(%universe, "creating kd-tree");
        KdTree {
            root: None,
            size: 0,
            universe,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// 不同点的数量
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn universe(&self) -> &RectHV {
        &self.universe
    }

    /// 树的层数，空树为 0
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(&Node, usize)> = Vec::new();
        if let Some(root) = self.root.as_deref() {
            stack.push((root, 1));
        }
        while let Some((node, level)) = stack.pop() {
            // 最深的一层一定是叶子
            if node.is_leaf() {
                height = height.max(level);
                continue;
            }
            if let Some(left) = node.left.as_deref() {
                stack.push((left, level + 1));
            }
            if let Some(right) = node.right.as_deref() {
                stack.push((right, level + 1));
            }
        }
        height
    }

    /// 内部方法：获取根节点的引用
    pub(crate) fn root_ref(&self) -> Option<&Node> {
        self.root.as_deref()
    }

    /// 内部方法：获取根节点槽位的可变引用
    pub(crate) fn root_slot_mut(&mut self) -> &mut Option<Box<Node>> {
        &mut self.root
    }

    pub(crate) fn increment_size(&mut self) {
        self.size += 1;
    }

    /// 导出树结构为 JSON 格式
    ///
    /// 返回包含每个节点的点、矩形和分割方向的 JSON 字符串，用于可视化
    pub fn export_to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.create_tree_visualization())
    }

    /// 创建用于可视化的树结构
    pub fn create_tree_visualization(&self) -> TreeVisualization {
        TreeVisualization {
            universe: self.universe,
            size: self.size,
            height: self.height(),
            root: self
                .root
                .as_deref()
                .map(|node| Self::create_node_visualization(node, Orientation::Vertical)),
        }
    }

    /// 递归创建节点的可视化结构
    ///
    /// 序列化本身也是递归的，所以这里不做迭代改写。
    fn create_node_visualization(node: &Node, orientation: Orientation) -> NodeVisualization {
        let next = orientation.next();
        NodeVisualization {
            point: node.point,
            rect: node.rect,
            orientation,
            left: node
                .left
                .as_deref()
                .map(|child| Box::new(Self::create_node_visualization(child, next))),
            right: node
                .right
                .as_deref()
                .map(|child| Box::new(Self::create_node_visualization(child, next))),
        }
    }
}

impl Default for KdTree {
    fn default() -> Self {
        Self::new()
    }
}

// 按插入顺序退化的树深度和点数同阶，默认的递归析构可能爆栈
impl Drop for KdTree {
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node>> = Vec::new();
        if let Some(root) = self.root.take() {
            stack.push(root);
        }
        while let Some(mut node) = stack.pop() {
            if let Some(left) = node.left.take() {
                stack.push(left);
            }
            if let Some(right) = node.right.take() {
                stack.push(right);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64) -> Point2D {
        Point2D::new(x, y).unwrap()
    }

    #[test]
    fn test_kdtree_creation() {
        let tree = KdTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), 0);
        assert_eq!(*tree.universe(), RectHV::unit_square());
    }

    #[test]
    fn test_custom_universe() {
        let universe = RectHV::new(-10.0, -10.0, 10.0, 10.0).unwrap();
        let mut tree = KdTree::with_universe(universe);
        tree.insert(pt(-5.0, 7.5)).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(*tree.universe(), universe);
    }

    #[test]
    fn test_height() {
        let mut tree = KdTree::new();
        tree.insert(pt(0.5, 0.5)).unwrap();
        assert_eq!(tree.height(), 1);
        tree.insert(pt(0.25, 0.5)).unwrap();
        tree.insert(pt(0.75, 0.5)).unwrap();
        assert_eq!(tree.height(), 2);
        tree.insert(pt(0.75, 0.75)).unwrap();
        assert_eq!(tree.height(), 3);
    }

    #[test]
    fn test_json_export() {
        let mut tree = KdTree::new();
        tree.insert(pt(0.2, 0.3)).unwrap();
        tree.insert(pt(0.4, 0.7)).unwrap();
        tree.insert(pt(0.9, 0.6)).unwrap();

        let json = tree.export_to_json().expect("Failed to export JSON");
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["size"], 3);
        assert_eq!(value["height"], 3);
        assert_eq!(value["root"]["orientation"], "vertical");
        assert_eq!(value["root"]["right"]["orientation"], "horizontal");
        assert_eq!(value["root"]["right"]["point"][0], 0.4);
        assert_eq!(value["root"]["right"]["rect"]["xmin"], 0.2);
        assert!(value["root"]["left"].is_null());
    }

    #[test]
    fn test_empty_json_export() {
        let tree = KdTree::new();
        let json = tree.export_to_json().unwrap();
        assert!(json.contains("\"root\": null"));
    }

    #[test]
    fn test_drop_degenerate_tree() {
        // 按 x 递增插入得到一条链
        let mut tree = KdTree::new();
        let n = 20_000;
        for i in 0..n {
            let v = i as f64 / n as f64;
            tree.insert(pt(v, v)).unwrap();
        }
        assert_eq!(tree.len(), n);
        drop(tree);
    }
}
