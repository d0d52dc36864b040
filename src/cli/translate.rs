// ============================================================================
// ResxTool - CLI Translate 命令
// ============================================================================
//
// 文件: src/cli/translate.rs
// 职责: 自动翻译命令的 CLI 接口层
// 边界:
//   - ✅ 命令行参数定义和解析
//   - ✅ API Key 校验（任何输出之前）
//   - ✅ 构建翻译计划与 DeepL 客户端
//   - ✅ 调用核心填充器并展示汇总
//   - ❌ 不应包含翻译与文件写入逻辑
//
// ============================================================================

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::core::filler::{FillError, FillPlan, TranslationFiller};
use crate::core::translator::DeeplTranslator;
use crate::models::config::Config;
use crate::ui::summary::render_fill_report;
use crate::utils::logger::Logger;
use crate::{t, tf};

/// 自动翻译命令
#[derive(Debug, Args)]
pub struct TranslateArgs {
    /// 源 resx 文件（默认为 <project>/<lang_dir>/<base>.resx）
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// 只翻译指定语言（可重复）
    #[arg(long)]
    pub only: Vec<String>,

    /// 两次请求之间的间隔（毫秒）
    #[arg(long)]
    pub delay_ms: Option<u64>,
}

pub async fn handle_translate(args: TranslateArgs) -> Result<()> {
    let config = Config::current()?;
    config.validate_locale_table()?;

    let (api_key, plan) = prepare(&config, args, config.translate.resolve_api_key())?;

    Logger::info(t!("translate.start"));
    Logger::info(tf!(
        "translate.plan",
        plan.targets.len(),
        plan.source_lang
    ));

    let translator = DeeplTranslator::new(
        config.translate.endpoint.clone(),
        api_key,
        Duration::from_secs(config.translate.timeout_secs),
    )?;
    let show_progress = Config::get_show_progress() && atty::is(atty::Stream::Stdout);
    let filler = TranslationFiller::new(translator).with_progress(show_progress);

    let started = Instant::now();
    let report = filler.run(&plan).await?;
    render_fill_report(&report, started.elapsed(), config.output.verbose);

    Ok(())
}

/// 先确认 API Key，再构建翻译计划；缺少 Key 时不读取任何文件
fn prepare(
    config: &Config,
    args: TranslateArgs,
    api_key: Option<String>,
) -> Result<(String, FillPlan), FillError> {
    let api_key = api_key.ok_or(FillError::MissingApiKey)?;
    let plan = build_plan(config, args)?;
    Ok((api_key, plan))
}

fn build_plan(config: &Config, args: TranslateArgs) -> Result<FillPlan, FillError> {
    let mut plan = match args.source {
        Some(source) => FillPlan::for_source(source, config),
        None => FillPlan::from_config(config),
    };
    if let Some(delay_ms) = args.delay_ms {
        plan.delay = Duration::from_millis(delay_ms);
    }
    plan.retain_targets(&args.only)?;
    Ok(plan)
}
