pub mod compare;
pub mod generate;
pub mod query;
pub mod splits;

use std::path::Path;

use tracing::info;

use crate::client::{load_points, CliCommand, OutputFormatter};
use crate::geometry::RectHV;
use crate::index::PointIndex;
use crate::Result;

use compare::CompareCommand;
use generate::GenerateCommand;
use query::{ContainsCommand, NearestCommand, RangeCommand};
use splits::SplitsCommand;

/// 命令执行时共享的上下文
pub struct CommandContext {
    /// kd-tree 的 universe 矩形
    pub universe: RectHV,
    pub formatter: OutputFormatter,
}

pub trait Command {
    fn name(&self) -> &'static str;
    fn execute(&self, ctx: &CommandContext) -> Result<String>;
}

pub enum CommandType {
    Contains(ContainsCommand),
    Range(RangeCommand),
    Nearest(NearestCommand),
    Splits(SplitsCommand),
    Generate(GenerateCommand),
    Compare(CompareCommand),
}

impl CommandType {
    pub fn name(&self) -> &'static str {
        match self {
            CommandType::Contains(cmd) => cmd.name(),
            CommandType::Range(cmd) => cmd.name(),
            CommandType::Nearest(cmd) => cmd.name(),
            CommandType::Splits(cmd) => cmd.name(),
            CommandType::Generate(cmd) => cmd.name(),
            CommandType::Compare(cmd) => cmd.name(),
        }
    }

    pub fn execute(&self, ctx: &CommandContext) -> Result<String> {
        match self {
            CommandType::Contains(cmd) => cmd.execute(ctx),
            CommandType::Range(cmd) => cmd.execute(ctx),
            CommandType::Nearest(cmd) => cmd.execute(ctx),
            CommandType::Splits(cmd) => cmd.execute(ctx),
            CommandType::Generate(cmd) => cmd.execute(ctx),
            CommandType::Compare(cmd) => cmd.execute(ctx),
        }
    }
}

impl From<CliCommand> for CommandType {
    fn from(command: CliCommand) -> Self {
        match command {
            CliCommand::Contains { input, x, y, brute } => {
                CommandType::Contains(ContainsCommand::new(input, x, y, brute))
            }
            CliCommand::Range {
                input,
                xmin,
                ymin,
                xmax,
                ymax,
                brute,
            } => CommandType::Range(RangeCommand::new(input, [xmin, ymin, xmax, ymax], brute)),
            CliCommand::Nearest { input, x, y, brute } => {
                CommandType::Nearest(NearestCommand::new(input, x, y, brute))
            }
            CliCommand::Splits { input } => CommandType::Splits(SplitsCommand::new(input)),
            CliCommand::Generate {
                count,
                seed,
                output,
            } => CommandType::Generate(GenerateCommand::new(count, seed, output)),
            CliCommand::Compare {
                input,
                queries,
                seed,
            } => CommandType::Compare(CompareCommand::new(input, queries, seed)),
        }
    }
}

/// 把点文件装入一个点集合，返回新增的点数
pub(crate) fn load_index(index: &mut dyn PointIndex, path: &Path) -> Result<usize> {
    let points = load_points(path)?;
    let total = points.len();
    let mut added = 0;
    for p in points {
        if index
            .insert(p)
            .map_err(|e| format!("{}: {}", path.display(), e))?
        {
            added += 1;
        }
    }
    info!(
        index = index.name(),
        path = %path.display(),
        total,
        added,
        "loaded point file"
    );
    Ok(added)
}
