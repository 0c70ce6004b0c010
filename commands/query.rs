use std::path::PathBuf;

use tracing::debug;

use super::{load_index, Command, CommandContext};
use crate::brute::PointSet;
use crate::geometry::{Point2D, RectHV};
use crate::index::PointIndex;
use crate::kdtree::KdTree;
use crate::Result;

/// 按 `brute` 选择 kd-tree 或暴力实现
fn build_index(ctx: &CommandContext, brute: bool) -> Box<dyn PointIndex> {
    if brute {
        Box::new(PointSet::new())
    } else {
        Box::new(KdTree::with_universe(ctx.universe))
    }
}

pub struct ContainsCommand {
    input: PathBuf,
    x: f64,
    y: f64,
    brute: bool,
}

impl ContainsCommand {
    pub fn new(input: PathBuf, x: f64, y: f64, brute: bool) -> Self {
        Self { input, x, y, brute }
    }
}

impl Command for ContainsCommand {
    fn name(&self) -> &'static str {
        "contains"
    }

    fn execute(&self, ctx: &CommandContext) -> Result<String> {
        let query = Point2D::new(self.x, self.y)?;
        let mut index = build_index(ctx, self.brute);
        load_index(index.as_mut(), &self.input)?;

        let found = index.contains(&query);
        debug!(%query, found, index = index.name(), "contains query");
        Ok(ctx.formatter.format_contains(&query, found))
    }
}

pub struct RangeCommand {
    input: PathBuf,
    bounds: [f64; 4],
    brute: bool,
}

impl RangeCommand {
    pub fn new(input: PathBuf, bounds: [f64; 4], brute: bool) -> Self {
        Self {
            input,
            bounds,
            brute,
        }
    }
}

impl Command for RangeCommand {
    fn name(&self) -> &'static str {
        "range"
    }

    fn execute(&self, ctx: &CommandContext) -> Result<String> {
        let [xmin, ymin, xmax, ymax] = self.bounds;
        let rect = RectHV::new(xmin, ymin, xmax, ymax)?;
        let mut index = build_index(ctx, self.brute);
        load_index(index.as_mut(), &self.input)?;

        // 输出按 y 优先排序，两种实现的结果可以直接对比
        let mut points = index.range(&rect);
        points.sort();
        debug!(%rect, count = points.len(), index = index.name(), "range query");
        Ok(ctx.formatter.format_range(&rect, &points))
    }
}

pub struct NearestCommand {
    input: PathBuf,
    x: f64,
    y: f64,
    brute: bool,
}

impl NearestCommand {
    pub fn new(input: PathBuf, x: f64, y: f64, brute: bool) -> Self {
        Self { input, x, y, brute }
    }
}

impl Command for NearestCommand {
    fn name(&self) -> &'static str {
        "nearest"
    }

    fn execute(&self, ctx: &CommandContext) -> Result<String> {
        let query = Point2D::new(self.x, self.y)?;
        let mut index = build_index(ctx, self.brute);
        load_index(index.as_mut(), &self.input)?;

        let nearest = index
            .nearest(&query)
            .map(|p| (p, p.distance_to(&query)));
        debug!(%query, found = nearest.is_some(), index = index.name(), "nearest query");
        Ok(ctx.formatter.format_nearest(&query, nearest))
    }
}
