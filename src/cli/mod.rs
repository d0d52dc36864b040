// ============================================================================
// ResxTool - CLI 模块
// ============================================================================
//
// 文件: src/cli/mod.rs
// 职责: CLI 命令行接口模块入口和路由
// 边界:
//   - ✅ CLI 结构定义和命令枚举
//   - ✅ 命令行参数解析配置
//   - ✅ 命令路由分发
//   - ✅ 子模块导出
//   - ❌ 不应包含具体命令实现逻辑
//   - ❌ 不应包含业务逻辑处理
//   - ❌ 不应包含数据模型定义
//
// ============================================================================

pub mod init;
pub mod scaffold;
pub mod translate;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::models::config::{Config, RuntimeArgs};
use crate::utils::colors::Colors;
use crate::utils::logger::init_tracing;
use init::{handle_init, InitArgs};
use scaffold::{handle_scaffold, ScaffoldArgs};
use translate::{handle_translate, TranslateArgs};

/// ResxTool - ResX resource scaffolding and DeepL translation
#[derive(Debug, Parser)]
#[command(name = "resxtool")]
#[command(about = "Generate .resx resource files and fill them with DeepL translations")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Configuration file (defaults to ./resxtool.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Global verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Interface language (en_us, fr_fr)
    #[arg(short, long, global = true)]
    pub language: Option<String>,

    /// Project directory (contains the .csproj)
    #[arg(short = 'C', long, global = true)]
    pub project_dir: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Disable progress bar
    #[arg(long, global = true)]
    pub no_progress: bool,

    /// Commands
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write a default configuration file
    Init(InitArgs),
    /// Create one .resx file per locale, never overwriting existing files
    Scaffold(ScaffoldArgs),
    /// Translate the source .resx file into every target locale
    Translate(TranslateArgs),
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    Config::initialize(cli.config.as_deref())?;
    // Build runtime args to override config
    let runtime_args = build_runtime_args(&cli);
    Config::merge_runtime_args(runtime_args)?;

    Colors::set_enabled(Config::get_colored());
    init_tracing(Config::get_verbose());

    match cli.command {
        Commands::Init(args) => handle_init(args),
        Commands::Scaffold(args) => handle_scaffold(args),
        Commands::Translate(args) => handle_translate(args).await,
    }
}

/// Build runtime args from CLI arguments
fn build_runtime_args(cli: &Cli) -> RuntimeArgs {
    RuntimeArgs {
        verbose: if cli.verbose { Some(true) } else { None },
        colored: if cli.no_color { Some(false) } else { None },
        show_progress: if cli.no_progress { Some(false) } else { None },
        project_dir: cli.project_dir.clone(),
        language: cli.language.clone(),
    }
}
