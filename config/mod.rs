use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::geometry::RectHV;

/// kdset 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KdConfig {
    /// kd-tree 的 universe 矩形
    pub universe: UniverseConfig,

    /// 日志配置
    pub logging: LoggingConfig,

    /// 输出配置
    pub output: OutputConfig,
}

/// universe 矩形配置，所有插入的点都必须落在这个矩形内
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniverseConfig {
    #[serde(default = "default_min")]
    pub xmin: f64,

    #[serde(default = "default_min")]
    pub ymin: f64,

    #[serde(default = "default_max")]
    pub xmax: f64,

    #[serde(default = "default_max")]
    pub ymax: f64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别：trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 日志输出：stdout, file
    #[serde(default = "default_log_output")]
    pub output: String,

    /// 日志文件路径（当 output = file 时）
    pub log_file: Option<PathBuf>,
}

/// 命令行输出配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// 输出格式：text, json, geojson
    #[serde(default = "default_output_format")]
    pub format: String,

    /// text 格式是否带颜色
    #[serde(default = "default_color")]
    pub color: bool,
}

// ============================================================================
// 默认值函数
// ============================================================================

fn default_min() -> f64 {
    0.0
}

fn default_max() -> f64 {
    1.0
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_output() -> String {
    "stdout".to_string()
}

fn default_output_format() -> String {
    "text".to_string()
}

fn default_color() -> bool {
    true
}

// ============================================================================
// 实现
// ============================================================================

impl Default for KdConfig {
    fn default() -> Self {
        Self {
            universe: UniverseConfig {
                xmin: default_min(),
                ymin: default_min(),
                xmax: default_max(),
                ymax: default_max(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
                output: default_log_output(),
                log_file: None,
            },
            output: OutputConfig {
                format: default_output_format(),
                color: default_color(),
            },
        }
    }
}

impl UniverseConfig {
    /// 转换为 universe 矩形
    ///
    /// 边界非法或者范围大到距离平方会溢出时返回 `InvalidArgument`。
    pub fn to_rect(&self) -> crate::KdResult<RectHV> {
        let rect = RectHV::new(self.xmin, self.ymin, self.xmax, self.ymax)?;
        if !rect.has_finite_diagonal() {
            return Err(crate::KdError::InvalidArgument(format!(
                "universe {} is too large: squared distances would overflow",
                rect
            )));
        }
        Ok(rect)
    }
}

impl KdConfig {
    /// 从文件加载配置
    ///
    /// 配置加载顺序（优先级从低到高）：
    /// 1. 默认配置（内嵌的 default.toml）
    /// 2. 用户配置文件（可选）
    /// 3. 环境变量（KDSET__ 前缀，使用双下划线分隔嵌套）
    ///
    /// # 示例
    ///
    /// ```no_run
    /// use kdset::config::KdConfig;
    ///
    /// // 加载配置（如果文件不存在，使用默认配置）
    /// let config = KdConfig::from_file("kdset.toml").unwrap();
    /// ```
    pub fn from_file(path: &str) -> crate::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(
                include_str!("default.toml"),
                config::FileFormat::Toml,
            ))
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("KDSET").separator("__"))
            .build()
            .map_err(|e| format!("Failed to load config: {}", e))?;

        Ok(settings
            .try_deserialize()
            .map_err(|e| format!("Failed to parse config: {}", e))?)
    }

    /// 保存配置到文件
    pub fn save_to_file(&self, path: &str) -> crate::Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;
        std::fs::write(path, toml_string)
            .map_err(|e| format!("Failed to write config file: {}", e))?;
        Ok(())
    }

    /// 验证配置
    ///
    /// 检查 universe 边界、日志级别、日志文件和输出格式
    pub fn validate(&self) -> Result<(), String> {
        self.universe
            .to_rect()
            .map_err(|e| format!("Invalid universe: {}", e))?;

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(format!(
                    "Invalid log level: '{}'. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                ))
            }
        }

        match self.logging.output.as_str() {
            "stdout" | "file" => {}
            _ => {
                return Err(format!(
                    "Invalid log output: '{}'. Must be one of: stdout, file",
                    self.logging.output
                ))
            }
        }

        if self.logging.output == "file" && self.logging.log_file.is_none() {
            return Err("Log output is 'file' but log_file path is not specified".to_string());
        }

        match self.output.format.as_str() {
            "text" | "json" | "geojson" => {}
            _ => {
                return Err(format!(
                    "Invalid output format: '{}'. Must be one of: text, json, geojson",
                    self.output.format
                ))
            }
        }

        Ok(())
    }

    /// 打印配置摘要（写到 stderr，不干扰查询结果）
    pub fn print_summary(&self) {
        eprintln!("📋 kdset Configuration:");
        eprintln!(
            "   Universe:    [{}, {}] x [{}, {}]",
            self.universe.xmin, self.universe.xmax, self.universe.ymin, self.universe.ymax
        );
        eprintln!("   Log Level:   {}", self.logging.level);
        eprintln!("   Log Output:  {}", self.logging.output);
        if let Some(ref log_file) = self.logging.log_file {
            eprintln!("   Log File:    {}", log_file.display());
        }
        eprintln!("   Format:      {}", self.output.format);
        eprintln!();
    }
}
