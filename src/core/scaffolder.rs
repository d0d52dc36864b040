// ============================================================================
// ResxTool - 资源文件生成器
// ============================================================================
//
// 文件: src/core/scaffolder.rs
// 职责: 按语言表生成带基础字符串的 resx 文件
// 边界:
//   - ✅ 目标目录创建
//   - ✅ 已存在文件跳过（从不覆盖）
//   - ✅ 最小 resx 文档构建与写出
//   - ❌ 不应包含网络请求
//   - ❌ 不应包含翻译逻辑
//   - ❌ 不应包含汇总展示
//
// ============================================================================

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::models::config::{BaseString, Config};
use crate::models::locale::LocaleSpec;
use crate::models::resx::ResxDocument;
use crate::tf;
use crate::utils::logger::Logger;

/// 生成器配置
#[derive(Debug, Clone)]
pub struct ScaffoldConfig {
    /// 输出目录
    pub output_dir: PathBuf,
    /// 资源文件基础名
    pub base_name: String,
    /// 语言表
    pub locales: Vec<LocaleSpec>,
    /// 基础字符串表
    pub strings: Vec<BaseString>,
    /// 只报告，不写文件
    pub dry_run: bool,
}

impl ScaffoldConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            output_dir: config.project.lang_dir_path(),
            base_name: config.project.base_name.clone(),
            locales: config.locales.clone(),
            strings: config.strings.clone(),
            dry_run: false,
        }
    }
}

/// 生成结果
#[derive(Debug, Clone, Default)]
pub struct ScaffoldSummary {
    pub output_dir: PathBuf,
    pub created: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub dry_run: bool,
}

/// 资源文件生成器
pub struct Scaffolder {
    config: ScaffoldConfig,
}

impl Scaffolder {
    pub fn new(config: ScaffoldConfig) -> Self {
        Self { config }
    }

    /// 构建包含基础字符串的文档
    pub fn build_document(strings: &[BaseString]) -> ResxDocument {
        let mut document = ResxDocument::new();
        for entry in strings {
            document.add_string(&entry.key, &entry.value);
        }
        document.indent();
        document
    }

    /// 执行生成
    pub fn run(&self) -> Result<ScaffoldSummary> {
        let config = &self.config;
        if !config.dry_run {
            fs::create_dir_all(&config.output_dir).with_context(|| {
                format!("Failed to create directory {}", config.output_dir.display())
            })?;
        }

        let mut summary = ScaffoldSummary {
            output_dir: config.output_dir.clone(),
            dry_run: config.dry_run,
            ..Default::default()
        };

        // 所有语言内容相同，只构建一次
        let content = Self::build_document(&config.strings).to_xml_string();

        for locale in &config.locales {
            let path = config.output_dir.join(locale.file_name(&config.base_name));

            if path.exists() {
                Logger::info(tf!("scaffold.skip_exists", path.display()));
                summary.skipped.push(path);
                continue;
            }

            if config.dry_run {
                Logger::info(tf!("scaffold.would_create", path.display()));
            } else {
                fs::write(&path, &content)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                tracing::debug!(locale = locale.label(), path = %path.display(), "resx created");
                Logger::success(tf!("scaffold.created", path.display()));
            }
            summary.created.push(path);
        }

        Ok(summary)
    }
}
