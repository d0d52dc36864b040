// ============================================================================
// ResxTool - 执行结果汇总组件
// ============================================================================
//
// 文件: src/ui/summary.rs
// 职责: 生成与翻译结果汇总显示
// 边界:
//   - ✅ 执行结果汇总显示
//   - ✅ 统计信息格式化输出
//   - ✅ 国际化文本支持
//   - ❌ 不应包含具体业务逻辑
//   - ❌ 不应包含文件操作
//   - ❌ 不应包含翻译请求
//
// ============================================================================

use std::io::{self, Write};
use std::time::Duration;

use crate::core::filler::{FillReport, KeyOutcome, LocaleReport};
use crate::core::scaffolder::ScaffoldSummary;
use crate::utils::colors::Colors;
use crate::utils::constants::icons;
use crate::utils::logger::Logger;
use crate::utils::styles::TextStyles;
use crate::{t, tf};

const RULE: &str = "═══════════════════════════════════════";

// ============================================================================
// 生成汇总
// ============================================================================

/// 渲染生成汇总
pub fn render_scaffold_summary(summary: &ScaffoldSummary, elapsed: Duration) {
    let created_key = if summary.dry_run {
        "summary.would_create"
    } else {
        "summary.created"
    };

    let lines = vec![
        "".to_string(),
        TextStyles::bold(&t!("summary.scaffold_title")),
        RULE.to_string(),
        format!("{} {}", icons::SUCCESS, tf!(created_key, summary.created.len())),
        format!("{} {}", icons::SKIP, tf!("summary.skipped", summary.skipped.len())),
        format!(
            "{} {}",
            icons::FILE,
            tf!(
                "summary.output_dir",
                TextStyles::underline(&summary.output_dir.display().to_string())
            )
        ),
        format!(
            "{} {}",
            icons::TIME,
            tf!("summary.duration", format!("{:.2}", elapsed.as_secs_f64()))
        ),
    ];

    for line in lines {
        Logger::info(line);
    }

    let _ = io::stdout().flush();
}

// ============================================================================
// 翻译汇总
// ============================================================================

/// 渲染翻译汇总
pub fn render_fill_report(report: &FillReport, elapsed: Duration, verbose: bool) {
    Logger::info("");
    Logger::info(TextStyles::bold(&t!("summary.translate_title")));
    Logger::info(RULE);
    Logger::info(format!(
        "{} {}",
        icons::FILE,
        tf!(
            "summary.keys_found",
            report.keys_found,
            report.source.display()
        )
    ));

    for locale in &report.locales {
        render_locale_line(locale, report.keys_found);
        if verbose {
            render_outcomes(locale);
        }
    }

    let failed: usize = report.locales.iter().map(LocaleReport::failed_count).sum();
    if failed > 0 {
        Logger::warn(tf!("summary.failed_total", failed));
    }

    Logger::info(format!(
        "{} {}",
        icons::TIME,
        tf!("summary.duration", format!("{:.2}", elapsed.as_secs_f64()))
    ));
    Logger::success(t!("summary.done"));

    let _ = io::stdout().flush();
}

fn render_locale_line(locale: &LocaleReport, total: usize) {
    let icon = if locale.failed_count() == 0 {
        icons::SUCCESS
    } else {
        icons::ERROR
    };
    Logger::info(tf!(
        "summary.locale_line",
        icon,
        Colors::info(&locale.target.culture),
        locale.translated_count(),
        total,
        icons::ARROW,
        Colors::secondary(&locale.output.display().to_string())
    ));
    if locale.blank_count() > 0 {
        Logger::info(tf!("summary.blank_kept", icons::SKIP, locale.blank_count()));
    }
}

fn render_outcomes(locale: &LocaleReport) {
    for outcome in &locale.outcomes {
        let key = outcome.key();
        match outcome {
            KeyOutcome::Translated { text, .. } => Logger::info(tf!(
                "summary.translated_detail",
                icons::LOCALE,
                key,
                Colors::secondary(text)
            )),
            KeyOutcome::Blank { .. } => {
                Logger::info(tf!("summary.blank_detail", icons::SKIP, key))
            }
            KeyOutcome::Fallback {
                original, error, ..
            } => Logger::warn(tf!(
                "summary.failure_detail",
                icons::LOCALE,
                key,
                error,
                Colors::secondary(original)
            )),
        }
    }
}
