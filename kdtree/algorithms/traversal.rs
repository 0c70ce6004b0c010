use serde::Serialize;

use super::super::kdtree::KdTree;
use super::super::node::{Node, Orientation};
use crate::geometry::{Point2D, RectHV};

/// 一个节点的分割信息：点、节点矩形、分割方向
///
/// 绘图端只需要这三样就能画出点和分割线。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Split {
    pub point: Point2D,
    pub rect: RectHV,
    pub orientation: Orientation,
    pub depth: usize,
}

impl Split {
    /// 分割线段的两个端点，裁剪在节点矩形内
    pub fn segment(&self) -> (Point2D, Point2D) {
        let r = &self.rect;
        match self.orientation {
            Orientation::Vertical => (
                Point2D::from_finite(self.point.x(), r.ymin()),
                Point2D::from_finite(self.point.x(), r.ymax()),
            ),
            Orientation::Horizontal => (
                Point2D::from_finite(r.xmin(), self.point.y()),
                Point2D::from_finite(r.xmax(), self.point.y()),
            ),
        }
    }
}

/// 先序遍历所有节点的迭代器
pub struct Splits<'a> {
    stack: Vec<(&'a Node, Orientation, usize)>,
}

impl<'a> Iterator for Splits<'a> {
    type Item = Split;

    fn next(&mut self) -> Option<Split> {
        let (node, orientation, depth) = self.stack.pop()?;
        let next = orientation.next();
        if let Some(right) = node.right.as_deref() {
            self.stack.push((right, next, depth + 1));
        }
        if let Some(left) = node.left.as_deref() {
            self.stack.push((left, next, depth + 1));
        }
        Some(Split {
            point: node.point,
            rect: node.rect,
            orientation,
            depth,
        })
    }
}

/// 遍历相关算法
impl KdTree {
    /// 按先序遍历每个节点的分割信息
    pub fn splits(&self) -> Splits<'_> {
        let mut stack = Vec::new();
        if let Some(root) = self.root_ref() {
            stack.push((root, Orientation::Vertical, 0));
        }
        Splits { stack }
    }

    /// 所有点，先序
    pub fn points(&self) -> Vec<Point2D> {
        self.splits().map(|split| split.point).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64) -> Point2D {
        Point2D::new(x, y).unwrap()
    }

    #[test]
    fn test_splits_preorder() {
        let mut tree = KdTree::new();
        for (x, y) in [(0.7, 0.2), (0.5, 0.4), (0.2, 0.3), (0.4, 0.7), (0.9, 0.6)] {
            tree.insert(pt(x, y)).unwrap();
        }

        let splits: Vec<Split> = tree.splits().collect();
        let points: Vec<Point2D> = splits.iter().map(|s| s.point).collect();
        assert_eq!(
            points,
            vec![pt(0.7, 0.2), pt(0.5, 0.4), pt(0.2, 0.3), pt(0.4, 0.7), pt(0.9, 0.6)]
        );
        assert_eq!(splits[0].orientation, Orientation::Vertical);
        assert_eq!(splits[1].orientation, Orientation::Horizontal);
        assert_eq!(splits[2].orientation, Orientation::Vertical);
        assert_eq!(splits[2].depth, 2);
        assert_eq!(splits[4].depth, 1);
    }

    #[test]
    fn test_segments() {
        let mut tree = KdTree::new();
        tree.insert(pt(0.7, 0.2)).unwrap();
        tree.insert(pt(0.5, 0.4)).unwrap();

        let splits: Vec<Split> = tree.splits().collect();
        assert_eq!(splits[0].segment(), (pt(0.7, 0.0), pt(0.7, 1.0)));
        // 横线只画到父节点的竖线为止
        assert_eq!(splits[1].segment(), (pt(0.0, 0.4), pt(0.7, 0.4)));
    }

    #[test]
    fn test_rects_follow_splits() {
        let mut tree = KdTree::new();
        for i in 0..200u32 {
            let x = ((i * 37) % 200) as f64 / 200.0;
            let y = ((i * 91) % 200) as f64 / 200.0;
            tree.insert(pt(x, y)).unwrap();
        }

        // 每个节点的点都在自己的矩形内，矩形都在 universe 内
        for split in tree.splits() {
            assert!(split.rect.contains(&split.point));
            assert!(tree.universe().intersects(&split.rect));
            assert!(split.rect.xmin() >= 0.0 && split.rect.xmax() <= 1.0);
        }
        assert_eq!(tree.points().len(), tree.len());
    }
}
