use super::super::kdtree::KdTree;
use super::super::node::{Node, Orientation};
use crate::geometry::{Point2D, RectHV};

/// 搜索操作相关算法
impl KdTree {
    /// 判断集合中是否包含点 `p`
    ///
    /// 与插入走同一条路径，但不分配节点。
    pub fn contains(&self, p: &Point2D) -> bool {
        let mut current = self.root_ref();
        let mut orientation = Orientation::Vertical;

        while let Some(node) = current {
            if node.point == *p {
                return true;
            }
            current = node.child(orientation.side_of(p, &node.point));
            orientation = orientation.next();
        }
        false
    }

    /// 返回所有落在 `rect` 内（含边界）的点，顺序不保证
    pub fn range(&self, rect: &RectHV) -> Vec<Point2D> {
        let mut results = Vec::new();
        self.range_with(rect, |p| results.push(*p));
        results
    }

    /// 统计落在 `rect` 内的点数，不分配结果数组
    pub fn range_count(&self, rect: &RectHV) -> usize {
        let mut count = 0;
        self.range_with(rect, |_| count += 1);
        count
    }

    /// 范围搜索的核心：对每个命中的点调用 `visit`
    ///
    /// 节点矩形与查询矩形不相交时整棵子树被剪掉；否则两侧子树都要看，
    /// 因为查询矩形可能跨过分割线。
    fn range_with<F>(&self, rect: &RectHV, mut visit: F)
    where
        F: FnMut(&Point2D),
    {
        let mut stack: Vec<&Node> = Vec::new();
        if let Some(root) = self.root_ref() {
            stack.push(root);
        }

        while let Some(node) = stack.pop() {
            if !rect.intersects(&node.rect) {
                continue;
            }
            if rect.contains(&node.point) {
                visit(&node.point);
            }
            if let Some(right) = node.right.as_deref() {
                stack.push(right);
            }
            if let Some(left) = node.left.as_deref() {
                stack.push(left);
            }
        }
    }
}
