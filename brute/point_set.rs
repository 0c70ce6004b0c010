use std::collections::BTreeSet;

use crate::geometry::{Point2D, RectHV};

/// 暴力实现的点集合
///
/// 所有查询都是线性扫描，用作 kd-tree 的正确性参照和性能基准。
#[derive(Debug, Clone, Default)]
pub struct PointSet {
    points: BTreeSet<Point2D>,
}

impl PointSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// 插入一个点，返回是否新增
    pub fn insert(&mut self, p: Point2D) -> bool {
        self.points.insert(p)
    }

    pub fn contains(&self, p: &Point2D) -> bool {
        self.points.contains(p)
    }

    /// 所有落在 `rect` 内的点
    pub fn range(&self, rect: &RectHV) -> Vec<Point2D> {
        self.points.iter().filter(|p| rect.contains(p)).copied().collect()
    }

    /// 距离 `p` 最近的点，距离相同时保留先遍历到的
    pub fn nearest(&self, p: &Point2D) -> Option<Point2D> {
        let mut best: Option<(Point2D, f64)> = None;
        for q in &self.points {
            let dist = q.distance_squared_to(p);
            match best {
                Some((_, best_dist)) if dist >= best_dist => {}
                _ => best = Some((*q, dist)),
            }
        }
        best.map(|(q, _)| q)
    }

    /// 按自然顺序（y 优先）遍历所有点
    pub fn iter(&self) -> impl Iterator<Item = &Point2D> {
        self.points.iter()
    }
}

impl FromIterator<Point2D> for PointSet {
    fn from_iter<I: IntoIterator<Item = Point2D>>(iter: I) -> Self {
        PointSet {
            points: iter.into_iter().collect(),
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
    fn test_point_set_basics() {
        let mut set = PointSet::new();
        assert!(set.is_empty());
        assert!(set.insert(pt(0.2, 0.3)));
        assert!(set.insert(pt(0.4, 0.7)));
        assert!(!set.insert(pt(0.2, 0.3)));
        assert_eq!(set.len(), 2);
        assert!(set.contains(&pt(0.4, 0.7)));
        assert!(!set.contains(&pt(0.5, 0.5)));
    }

    #[test]
    fn test_point_set_queries() {
        let set: PointSet = [pt(0.2, 0.3), pt(0.4, 0.7), pt(0.9, 0.6)]
            .into_iter()
            .collect();

        let rect = RectHV::new(0.0, 0.0, 0.5, 1.0).unwrap();
        assert_eq!(set.range(&rect), vec![pt(0.2, 0.3), pt(0.4, 0.7)]);
        assert_eq!(set.nearest(&pt(0.45, 0.65)), Some(pt(0.4, 0.7)));
        assert_eq!(PointSet::new().nearest(&pt(0.5, 0.5)), None);
    }

    #[test]
    fn test_iter_is_y_major() {
        let set: PointSet = [pt(0.1, 0.9), pt(0.9, 0.1), pt(0.5, 0.5)]
            .into_iter()
            .collect();
        let ys: Vec<f64> = set.iter().map(|p| p.y()).collect();
        assert_eq!(ys, vec![0.1, 0.5, 0.9]);
    }
}
