use std::path::PathBuf;

use super::{load_index, Command, CommandContext};
use crate::kdtree::KdTree;
use crate::Result;

/// 输出每个节点的点、矩形和分割方向，供绘图使用
pub struct SplitsCommand {
    input: PathBuf,
}

impl SplitsCommand {
    pub fn new(input: PathBuf) -> Self {
        Self { input }
    }
}

impl Command for SplitsCommand {
    fn name(&self) -> &'static str {
        "splits"
    }

    fn execute(&self, ctx: &CommandContext) -> Result<String> {
        let mut tree = KdTree::with_universe(ctx.universe);
        load_index(&mut tree, &self.input)?;
        Ok(ctx.formatter.format_splits(&tree)?)
    }
}
