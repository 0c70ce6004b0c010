//! 最近邻搜索
//!
//! 当前最优点以根节点的点作为初值，然后深度优先遍历：
//!
//! 1. 如果查询点到节点矩形的距离平方已经大于到当前最优点的距离平方，
//!    这棵子树不可能更近，直接剪掉
//! 2. 节点的点严格更近时更新最优点
//! 3. 先走查询点所在的一侧，再走另一侧，先收紧的界能剪掉更多的远侧子树
//!
//! 遍历使用显式栈：远侧先入栈、近侧后入栈，出栈顺序与递归写法一致；
//! 剪枝条件在出栈时用最新的最优距离判断。

use super::super::kdtree::KdTree;
use super::super::node::{Node, Orientation, Side};
use crate::geometry::Point2D;

impl KdTree {
    /// 距离 `p` 最近的点，空树返回 `None`
    pub fn nearest(&self, p: &Point2D) -> Option<Point2D> {
        let root = self.root_ref()?;
        let mut best = root.point;
        let mut best_dist = p.distance_squared_to(&best);

        let mut stack: Vec<(&Node, Orientation)> = vec![(root, Orientation::Vertical)];
        while let Some((node, orientation)) = stack.pop() {
            if node.rect.distance_squared_to(p) > best_dist {
                continue;
            }

            let dist = p.distance_squared_to(&node.point);
            if dist < best_dist {
                best = node.point;
                best_dist = dist;
            }

            let near = orientation.side_of(p, &node.point);
            let far = match near {
                Side::LeftBottom => Side::RightTop,
                Side::RightTop => Side::LeftBottom,
            };
            let next = orientation.next();
            if let Some(child) = node.child(far) {
                stack.push((child, next));
            }
            if let Some(child) = node.child(near) {
                stack.push((child, next));
            }
        }

        Some(best)
    }

    /// 最近点以及它到 `p` 的欧氏距离
    pub fn nearest_with_distance(&self, p: &Point2D) -> Option<(Point2D, f64)> {
        self.nearest(p).map(|q| (q, q.distance_to(p)))
    }
}
