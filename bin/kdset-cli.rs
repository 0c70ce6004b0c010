use kdset::client::{CliArgs, OutputFormat, OutputFormatter};
use kdset::commands::{CommandContext, CommandType};
use kdset::{KdConfig, Result};
use tracing::{debug, info, Level};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}", OutputFormatter::format_error(&e.to_string()));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse_args();
    args.validate()?;

    // 生成默认配置文件
    if args.generate_config {
        let config = KdConfig::default();
        config.save_to_file(&args.config)?;
        println!(
            "{}",
            OutputFormatter::format_success(&format!(
                "Generated default configuration: {}",
                args.config
            ))
        );
        return Ok(());
    }

    // 加载配置
    let mut config = KdConfig::from_file(&args.config)?;

    // 命令行参数覆盖配置文件
    if let Some(log_level) = args.log_level {
        config.logging.level = log_level;
    }
    if let Some(format) = args.format {
        config.output.format = format;
    }
    if args.no_color {
        config.output.color = false;
    }

    // 验证配置
    config.validate()?;

    // 初始化日志系统
    init_logging(&config.logging)?;
    colored::control::set_override(config.output.color);

    info!("📦 kdset-cli version {}", env!("CARGO_PKG_VERSION"));
    if tracing::enabled!(Level::DEBUG) {
        config.print_summary();
    }

    let Some(cli_command) = args.command else {
        return Ok(());
    };
    let command = CommandType::from(cli_command);
    let ctx = CommandContext {
        universe: config.universe.to_rect()?,
        formatter: OutputFormatter::new(config.output.format.parse::<OutputFormat>()?),
    };

    debug!(command = command.name(), "executing command");
    let output = command.execute(&ctx)?;
    println!("{}", output);
    Ok(())
}

/// 初始化日志系统，日志写到 stderr 或文件，stdout 只留给查询结果
fn init_logging(config: &kdset::config::LoggingConfig) -> Result<()> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = match config.level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    match (config.output.as_str(), &config.log_file) {
        ("file", Some(log_file)) => {
            // 确保日志目录存在
            if let Some(parent) = log_file.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_file)
                .map_err(|e| format!("Failed to open log file {}: {}", log_file.display(), e))?;

            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(std::sync::Mutex::new(file))
                        .with_ansi(false)
                        .with_target(false),
                )
                .with(tracing_subscriber::filter::LevelFilter::from_level(filter))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(false),
                )
                .with(tracing_subscriber::filter::LevelFilter::from_level(filter))
                .init();
        }
    }
    Ok(())
}
