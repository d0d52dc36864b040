// ============================================================================
// ResxTool - CLI Scaffold 命令
// ============================================================================
//
// 文件: src/cli/scaffold.rs
// 职责: 资源文件生成命令的 CLI 接口层
// 边界:
//   - ✅ 命令行参数定义和解析
//   - ✅ 配置校验与覆盖
//   - ✅ 调用核心生成器并展示汇总
//   - ❌ 不应包含文件生成逻辑
//
// ============================================================================

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use std::time::Instant;

use crate::core::scaffolder::{ScaffoldConfig, Scaffolder};
use crate::models::config::Config;
use crate::ui::summary::render_scaffold_summary;
use crate::utils::logger::Logger;
use crate::{t, tf};

/// 生成资源文件命令
#[derive(Debug, Args)]
pub struct ScaffoldArgs {
    /// 输出目录（默认为 <project>/<lang_dir>）
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// 只显示将要创建的文件，不写入
    #[arg(long)]
    pub dry_run: bool,
}

pub fn handle_scaffold(args: ScaffoldArgs) -> Result<()> {
    let config = Config::current()?;
    config.validate()?;

    let scaffold_config = build_scaffold_config(&config, args);
    Logger::info(t!("scaffold.start"));
    Logger::info(tf!(
        "scaffold.plan",
        scaffold_config.locales.len(),
        scaffold_config.strings.len()
    ));

    let started = Instant::now();
    let summary = Scaffolder::new(scaffold_config).run()?;
    render_scaffold_summary(&summary, started.elapsed());

    Ok(())
}

fn build_scaffold_config(config: &Config, args: ScaffoldArgs) -> ScaffoldConfig {
    let mut scaffold_config = ScaffoldConfig::from_config(config);
    if let Some(output_dir) = args.output_dir {
        scaffold_config.output_dir = output_dir;
    }
    scaffold_config.dry_run = args.dry_run;
    scaffold_config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_override_config_paths() {
        let config = Config::default();
        let scaffold_config = build_scaffold_config(
            &config,
            ScaffoldArgs {
                output_dir: Some(PathBuf::from("/tmp/lang")),
                dry_run: true,
            },
        );
        assert_eq!(scaffold_config.output_dir, PathBuf::from("/tmp/lang"));
        assert!(scaffold_config.dry_run);
        assert_eq!(scaffold_config.locales, config.locales);

        let defaults = build_scaffold_config(
            &config,
            ScaffoldArgs {
                output_dir: None,
                dry_run: false,
            },
        );
        assert_eq!(defaults.output_dir, config.project.lang_dir_path());
    }
}
