use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "kdset-cli",
    version,
    about = "Query a set of 2D points with a 2d-tree",
    long_about = "kdset-cli loads points from a text or GeoJSON file into a 2d-tree and answers\nmembership, rectangle range and nearest-neighbor queries. A brute-force point set\ncan be used instead of the tree for comparison."
)]
pub struct CliArgs {
    /// 配置文件路径
    #[arg(short, long, default_value = "kdset.toml")]
    pub config: String,

    /// 生成默认配置文件并退出
    #[arg(long)]
    pub generate_config: bool,

    /// Log level (overrides config file)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Output format: text, json, geojson (overrides config file)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CliCommand {
    /// Check whether a point is in the set
    Contains {
        /// Point file (text or GeoJSON)
        input: PathBuf,
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
        /// Use the brute-force point set instead of the tree
        #[arg(long)]
        brute: bool,
    },

    /// List all points inside a rectangle
    Range {
        /// Point file (text or GeoJSON)
        input: PathBuf,
        #[arg(allow_negative_numbers = true)]
        xmin: f64,
        #[arg(allow_negative_numbers = true)]
        ymin: f64,
        #[arg(allow_negative_numbers = true)]
        xmax: f64,
        #[arg(allow_negative_numbers = true)]
        ymax: f64,
        /// Use the brute-force point set instead of the tree
        #[arg(long)]
        brute: bool,
    },

    /// Find the point nearest to a query point
    Nearest {
        /// Point file (text or GeoJSON)
        input: PathBuf,
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
        /// Use the brute-force point set instead of the tree
        #[arg(long)]
        brute: bool,
    },

    /// Print every node's point, rectangle and split orientation as JSON
    Splits {
        /// Point file (text or GeoJSON)
        input: PathBuf,
    },

    /// Generate uniformly random points inside the universe
    Generate {
        /// Number of points
        count: usize,
        /// Random seed
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run random queries against both the tree and the brute-force set
    Compare {
        /// Point file (text or GeoJSON)
        input: PathBuf,
        /// Number of range queries and nearest queries
        #[arg(long, default_value_t = 1000)]
        queries: usize,
        /// Random seed
        #[arg(long, default_value_t = 7)]
        seed: u64,
    },
}

impl CliArgs {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.generate_config && self.command.is_none() {
            return Err(
                "No command specified. Run with --help to see the available commands.".to_string(),
            );
        }

        if let Some(format) = &self.format {
            if !matches!(format.as_str(), "text" | "json" | "geojson") {
                return Err(format!(
                    "Invalid output format: '{}'. Must be one of: text, json, geojson",
                    format
                ));
            }
        }

        match &self.command {
            Some(CliCommand::Generate { count: 0, .. }) => {
                Err("Generate count must be greater than 0".to_string())
            }
            Some(CliCommand::Compare { queries: 0, .. }) => {
                Err("Number of queries must be greater than 0".to_string())
            }
            _ => Ok(()),
        }
    }
}
