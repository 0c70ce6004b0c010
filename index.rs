use crate::brute::PointSet;
use crate::error::KdResult;
use crate::geometry::{Point2D, RectHV};
use crate::kdtree::KdTree;

/// 点集合的统一接口
///
/// kd-tree 和暴力实现都实现这个 trait，测试、基准测试和命令行的
/// `compare` 命令用它在两种实现上跑同样的操作。
pub trait PointIndex {
    /// 实现的名字，用于输出
    fn name(&self) -> &'static str;

    /// 插入一个点，返回是否新增
    fn insert(&mut self, p: Point2D) -> KdResult<bool>;

    fn contains(&self, p: &Point2D) -> bool;

    /// 落在 `rect` 内的所有点，顺序不保证
    fn range(&self, rect: &RectHV) -> Vec<Point2D>;

    /// 最近的点，集合为空时返回 `None`
    fn nearest(&self, p: &Point2D) -> Option<Point2D>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PointIndex for KdTree {
    fn name(&self) -> &'static str {
        "kdtree"
    }

    fn insert(&mut self, p: Point2D) -> KdResult<bool> {
        KdTree::insert(self, p)
    }

    fn contains(&self, p: &Point2D) -> bool {
        KdTree::contains(self, p)
    }

    fn range(&self, rect: &RectHV) -> Vec<Point2D> {
        KdTree::range(self, rect)
    }

    fn nearest(&self, p: &Point2D) -> Option<Point2D> {
        KdTree::nearest(self, p)
    }

    fn len(&self) -> usize {
        KdTree::len(self)
    }
}

impl PointIndex for PointSet {
    fn name(&self) -> &'static str {
        "brute"
    }

    fn insert(&mut self, p: Point2D) -> KdResult<bool> {
        Ok(PointSet::insert(self, p))
    }

    fn contains(&self, p: &Point2D) -> bool {
        PointSet::contains(self, p)
    }

    fn range(&self, rect: &RectHV) -> Vec<Point2D> {
        PointSet::range(self, rect)
    }

    fn nearest(&self, p: &Point2D) -> Option<Point2D> {
        PointSet::nearest(self, p)
    }

    fn len(&self) -> usize {
        PointSet::len(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64) -> Point2D {
        Point2D::new(x, y).unwrap()
    }

    fn load(index: &mut dyn PointIndex) {
        for (x, y) in [(0.2, 0.3), (0.4, 0.7), (0.9, 0.6), (0.4, 0.7)] {
            index.insert(pt(x, y)).unwrap();
        }
    }

    #[test]
    fn test_both_implementations_agree() {
        let mut indexes: Vec<Box<dyn PointIndex>> =
            vec![Box::new(KdTree::new()), Box::new(PointSet::new())];

        for index in indexes.iter_mut() {
            load(index.as_mut());
            assert_eq!(index.len(), 3, "{}", index.name());
            assert!(index.contains(&pt(0.4, 0.7)));
            assert!(!index.contains(&pt(0.5, 0.5)));

            let mut found = index.range(&RectHV::new(0.0, 0.0, 0.5, 1.0).unwrap());
            found.sort();
            assert_eq!(found, vec![pt(0.2, 0.3), pt(0.4, 0.7)]);
            assert_eq!(index.nearest(&pt(0.45, 0.65)), Some(pt(0.4, 0.7)));
        }
    }

    #[test]
    fn test_default_is_empty() {
        let tree = KdTree::new();
        assert!(PointIndex::is_empty(&tree));
        assert_eq!(tree.name(), "kdtree");
        assert_eq!(PointSet::new().name(), "brute");
    }
}
