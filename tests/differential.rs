//! kd-tree 与暴力实现的对比测试

use kdset::{KdTree, Point2D, PointIndex, PointSet, RectHV};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn pt(x: f64, y: f64) -> Point2D {
    Point2D::new(x, y).unwrap()
}

fn random_point(rng: &mut StdRng) -> Point2D {
    pt(rng.gen_range(0.0..=1.0), rng.gen_range(0.0..=1.0))
}

/// 坐标取在粗网格上，制造大量分割坐标相同的情况
fn grid_point(rng: &mut StdRng) -> Point2D {
    pt(
        rng.gen_range(0..=10) as f64 / 10.0,
        rng.gen_range(0..=10) as f64 / 10.0,
    )
}

fn random_rect(rng: &mut StdRng) -> RectHV {
    let (x1, x2): (f64, f64) = (rng.gen_range(0.0..=1.0), rng.gen_range(0.0..=1.0));
    let (y1, y2): (f64, f64) = (rng.gen_range(0.0..=1.0), rng.gen_range(0.0..=1.0));
    RectHV::new(x1.min(x2), y1.min(y2), x1.max(x2), y1.max(y2)).unwrap()
}

fn build(points: &[Point2D]) -> (KdTree, PointSet) {
    let mut tree = KdTree::new();
    let mut brute = PointSet::new();
    for p in points {
        tree.insert(*p).unwrap();
        brute.insert(*p);
    }
    (tree, brute)
}

fn sorted(mut points: Vec<Point2D>) -> Vec<Point2D> {
    points.sort();
    points
}

fn check_against_brute(tree: &KdTree, brute: &PointSet, rng: &mut StdRng, queries: usize) {
    assert_eq!(tree.len(), brute.len());

    for _ in 0..queries {
        let rect = random_rect(rng);
        assert_eq!(
            sorted(tree.range(&rect)),
            sorted(brute.range(&rect)),
            "range {}",
            rect
        );

        let q = random_point(rng);
        let kd = tree.nearest(&q).map(|p| p.distance_squared_to(&q));
        let bf = brute.nearest(&q).map(|p| p.distance_squared_to(&q));
        assert_eq!(kd, bf, "nearest {}", q);

        assert_eq!(tree.contains(&q), brute.contains(&q));
    }
}

#[test]
fn test_concrete_scenario() {
    let mut tree = KdTree::new();
    tree.insert(pt(0.2, 0.3)).unwrap();
    tree.insert(pt(0.4, 0.7)).unwrap();
    tree.insert(pt(0.9, 0.6)).unwrap();

    assert!(tree.contains(&pt(0.4, 0.7)));
    assert!(!tree.contains(&pt(0.5, 0.5)));
    assert_eq!(
        sorted(tree.range(&RectHV::new(0.0, 0.0, 0.5, 1.0).unwrap())),
        vec![pt(0.2, 0.3), pt(0.4, 0.7)]
    );
    assert_eq!(tree.nearest(&pt(0.45, 0.65)), Some(pt(0.4, 0.7)));
}

#[test]
fn test_random_points_match_brute_force() {
    let mut rng = StdRng::seed_from_u64(42);
    let points: Vec<Point2D> = (0..2_000).map(|_| random_point(&mut rng)).collect();
    let (tree, brute) = build(&points);
    check_against_brute(&tree, &brute, &mut rng, 500);
}

#[test]
fn test_grid_points_with_ties_match_brute_force() {
    let mut rng = StdRng::seed_from_u64(7);
    let points: Vec<Point2D> = (0..1_000).map(|_| grid_point(&mut rng)).collect();
    let (tree, brute) = build(&points);
    // 11 x 11 的网格，重复插入不增加数量
    assert!(tree.len() <= 121);
    check_against_brute(&tree, &brute, &mut rng, 300);

    // 网格上的每个点都能找到
    for p in &points {
        assert!(tree.contains(p));
        assert_eq!(tree.nearest(p), Some(*p));
    }
}

#[test]
fn test_contains_independent_of_insertion_order() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut points: Vec<Point2D> = (0..300).map(|_| random_point(&mut rng)).collect();
    let (forward, _) = build(&points);
    points.reverse();
    let (backward, _) = build(&points);

    for p in &points {
        assert!(forward.contains(p));
        assert!(backward.contains(p));
    }
    for _ in 0..300 {
        let q = random_point(&mut rng);
        assert_eq!(forward.contains(&q), backward.contains(&q));
    }
}

#[test]
fn test_duplicate_inserts_are_idempotent() {
    let mut rng = StdRng::seed_from_u64(5);
    let points: Vec<Point2D> = (0..200).map(|_| random_point(&mut rng)).collect();

    let (once, _) = build(&points);
    let mut twice = KdTree::new();
    for p in points.iter().chain(points.iter()) {
        twice.insert(*p).unwrap();
    }

    assert_eq!(once.len(), twice.len());
    assert_eq!(once.height(), twice.height());
    assert_eq!(once.points(), twice.points());
    let rect = RectHV::new(0.25, 0.25, 0.75, 0.75).unwrap();
    assert_eq!(sorted(once.range(&rect)), sorted(twice.range(&rect)));
}

#[test]
fn test_queries_are_deterministic() {
    let mut rng = StdRng::seed_from_u64(9);
    let points: Vec<Point2D> = (0..500).map(|_| random_point(&mut rng)).collect();
    let (tree, _) = build(&points);

    let rect = random_rect(&mut rng);
    let q = random_point(&mut rng);
    let first_range = tree.range(&rect);
    let first_nearest = tree.nearest(&q);
    for _ in 0..5 {
        assert_eq!(tree.range(&rect), first_range);
        assert_eq!(tree.nearest(&q), first_nearest);
    }
}

#[test]
fn test_sorted_insertion_does_not_overflow() {
    // 按 x 递增插入退化成链表，查询和析构都不能爆栈
    let n = 10_000;
    let points: Vec<Point2D> = (0..n)
        .map(|i| pt(i as f64 / n as f64, i as f64 / n as f64))
        .collect();
    let (tree, brute) = build(&points);
    assert_eq!(tree.height(), n);

    let q = pt(1.0, 1.0);
    assert_eq!(tree.nearest(&q), brute.nearest(&q));
    assert_eq!(tree.range(&RectHV::unit_square()).len(), n);
    assert!(tree.contains(&points[n - 1]));
}

#[test]
fn test_generic_index_usage() {
    fn fill(index: &mut dyn PointIndex, points: &[Point2D]) -> usize {
        points
            .iter()
            .filter(|p| index.insert(**p).unwrap())
            .count()
    }

    let points = vec![pt(0.1, 0.1), pt(0.2, 0.2), pt(0.1, 0.1)];
    let mut tree = KdTree::new();
    let mut brute = PointSet::new();
    assert_eq!(fill(&mut tree, &points), 2);
    assert_eq!(fill(&mut brute, &points), 2);
}
