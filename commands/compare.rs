use std::path::PathBuf;
use std::time::{Duration, Instant};

use colored::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::warn;

use super::{load_index, Command, CommandContext};
use crate::brute::PointSet;
use crate::client::OutputFormat;
use crate::geometry::{Point2D, RectHV};
use crate::index::PointIndex;
use crate::kdtree::KdTree;
use crate::Result;

/// 在 kd-tree 和暴力实现上跑同一组随机查询，对比结果和耗时
pub struct CompareCommand {
    input: PathBuf,
    queries: usize,
    seed: u64,
}

impl CompareCommand {
    pub fn new(input: PathBuf, queries: usize, seed: u64) -> Self {
        Self {
            input,
            queries,
            seed,
        }
    }
}

/// 对比结果
#[derive(Debug, Clone, Serialize)]
pub struct CompareReport {
    pub points: usize,
    pub queries: usize,
    /// 暴力集合里有、kd-tree 却找不到的点
    pub contains_mismatches: usize,
    pub range_mismatches: usize,
    pub nearest_mismatches: usize,
    pub kdtree_range: Duration,
    pub brute_range: Duration,
    pub kdtree_nearest: Duration,
    pub brute_nearest: Duration,
}

impl CompareReport {
    pub fn is_consistent(&self) -> bool {
        self.contains_mismatches == 0 && self.range_mismatches == 0 && self.nearest_mismatches == 0
    }
}

/// 在 universe 内随机生成查询矩形和查询点
fn random_queries(universe: &RectHV, count: usize, seed: u64) -> (Vec<RectHV>, Vec<Point2D>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let random_point = |rng: &mut StdRng| {
        Point2D::from_finite(
            rng.gen_range(universe.xmin()..=universe.xmax()),
            rng.gen_range(universe.ymin()..=universe.ymax()),
        )
    };

    let mut rects = Vec::with_capacity(count);
    let mut points = Vec::with_capacity(count);
    for _ in 0..count {
        let a = random_point(&mut rng);
        let b = random_point(&mut rng);
        rects.push(bounding_rect(&a, &b));
        points.push(random_point(&mut rng));
    }
    (rects, points)
}

/// 以两个点为对角的矩形
fn bounding_rect(a: &Point2D, b: &Point2D) -> RectHV {
    let (xmin, xmax) = if a.x() <= b.x() { (a.x(), b.x()) } else { (b.x(), a.x()) };
    let (ymin, ymax) = if a.y() <= b.y() { (a.y(), b.y()) } else { (b.y(), a.y()) };
    // 坐标有限且已排好序，构造不会失败
    RectHV::new(xmin, ymin, xmax, ymax).unwrap_or_else(|_| RectHV::from_point(a))
}

fn time_range(index: &dyn PointIndex, rects: &[RectHV]) -> (Vec<Vec<Point2D>>, Duration) {
    let start = Instant::now();
    let results = rects
        .iter()
        .map(|rect| {
            let mut found = index.range(rect);
            found.sort();
            found
        })
        .collect();
    (results, start.elapsed())
}

fn time_nearest(index: &dyn PointIndex, points: &[Point2D]) -> (Vec<Option<Point2D>>, Duration) {
    let start = Instant::now();
    let results = points.iter().map(|p| index.nearest(p)).collect();
    (results, start.elapsed())
}

/// 跑对比，结果不依赖输出格式
pub fn run_compare(
    kdtree: &KdTree,
    brute: &PointSet,
    universe: &RectHV,
    queries: usize,
    seed: u64,
) -> CompareReport {
    let (rects, query_points) = random_queries(universe, queries, seed);

    let contains_mismatches = brute
        .iter()
        .filter(|p| {
            let missing = !kdtree.contains(p);
            if missing {
                warn!(point = %p, "stored point not found in kdtree");
            }
            missing
        })
        .count();

    let (kd_ranges, kdtree_range) = time_range(kdtree, &rects);
    let (brute_ranges, brute_range) = time_range(brute, &rects);
    let range_mismatches = kd_ranges
        .iter()
        .zip(&brute_ranges)
        .zip(&rects)
        .filter(|((kd, bf), rect)| {
            let mismatch = kd != bf;
            if mismatch {
                warn!(%rect, kdtree = kd.len(), brute = bf.len(), "range results differ");
            }
            mismatch
        })
        .count();

    let (kd_nearest, kdtree_nearest) = time_nearest(kdtree, &query_points);
    let (brute_nearest_results, brute_nearest) = time_nearest(brute, &query_points);
    // 距离相同的点可能不同，只比较距离
    let nearest_mismatches = kd_nearest
        .iter()
        .zip(&brute_nearest_results)
        .zip(&query_points)
        .filter(|((kd, bf), q)| {
            let kd_dist = kd.map(|p| p.distance_squared_to(q));
            let bf_dist = bf.map(|p| p.distance_squared_to(q));
            let mismatch = kd_dist != bf_dist;
            if mismatch {
                warn!(query = %q, ?kd, ?bf, "nearest results differ");
            }
            mismatch
        })
        .count();

    CompareReport {
        points: kdtree.len(),
        queries,
        contains_mismatches,
        range_mismatches,
        nearest_mismatches,
        kdtree_range,
        brute_range,
        kdtree_nearest,
        brute_nearest,
    }
}

fn format_report(report: &CompareReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json | OutputFormat::GeoJson => Ok(serde_json::to_string(report)?),
        OutputFormat::Text => {
            let status = if report.is_consistent() {
                "consistent".green()
            } else {
                "MISMATCH".red()
            };
            Ok(format!(
                "points: {}, queries: {} ({})\n\
                 contains: mismatches {}\n\
                 range:   kdtree {:?}, brute {:?}, mismatches {}\n\
                 nearest: kdtree {:?}, brute {:?}, mismatches {}",
                report.points.to_string().cyan(),
                report.queries.to_string().cyan(),
                status,
                report.contains_mismatches,
                report.kdtree_range,
                report.brute_range,
                report.range_mismatches,
                report.kdtree_nearest,
                report.brute_nearest,
                report.nearest_mismatches,
            ))
        }
    }
}

impl Command for CompareCommand {
    fn name(&self) -> &'static str {
        "compare"
    }

    fn execute(&self, ctx: &CommandContext) -> Result<String> {
        let mut kdtree = KdTree::with_universe(ctx.universe);
        let mut brute = PointSet::new();
        load_index(&mut kdtree, &self.input)?;
        load_index(&mut brute, &self.input)?;

        let report = run_compare(&kdtree, &brute, &ctx.universe, self.queries, self.seed);
        format_report(&report, ctx.formatter.format())
    }
}
