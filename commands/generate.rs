use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use super::{Command, CommandContext};
use crate::client::OutputFormatter;
use crate::geometry::RectHV;
use crate::Result;

/// 在 universe 内生成均匀分布的随机点，文本格式输出
pub struct GenerateCommand {
    count: usize,
    seed: u64,
    output: Option<PathBuf>,
}

impl GenerateCommand {
    pub fn new(count: usize, seed: u64, output: Option<PathBuf>) -> Self {
        Self {
            count,
            seed,
            output,
        }
    }
}

/// 生成 `count` 行 `x y`
pub fn generate_points_text(universe: &RectHV, count: usize, seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut text = String::with_capacity(count * 20);
    for _ in 0..count {
        let x = rng.gen_range(universe.xmin()..=universe.xmax());
        let y = rng.gen_range(universe.ymin()..=universe.ymax());
        text.push_str(&format!("{} {}\n", x, y));
    }
    text
}

impl Command for GenerateCommand {
    fn name(&self) -> &'static str {
        "generate"
    }

    fn execute(&self, ctx: &CommandContext) -> Result<String> {
        let text = generate_points_text(&ctx.universe, self.count, self.seed);
        match &self.output {
            Some(path) => {
                std::fs::write(path, &text)
                    .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
                info!(path = %path.display(), count = self.count, seed = self.seed, "generated points");
                Ok(OutputFormatter::format_success(&format!(
                    "Generated {} points: {}",
                    self.count,
                    path.display()
                )))
            }
            None => Ok(text.trim_end().to_string()),
        }
    }
}
