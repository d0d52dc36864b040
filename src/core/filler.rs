// ============================================================================
// ResxTool - 翻译填充器
// ============================================================================
//
// 文件: src/core/filler.rs
// 职责: 读取源 resx，逐 key 调用翻译服务，写出各语言 resx
// 边界:
//   - ✅ 源文件加载与字符串条目提取
//   - ✅ 按语言复制文档并替换翻译值
//   - ✅ 单个 key 失败时回退原文
//   - ✅ 请求间隔控制
//   - ❌ 不应包含 HTTP 细节
//   - ❌ 不应包含 CLI 参数解析
//   - ❌ 不应包含汇总展示
//
// ============================================================================

use std::path::{Path, PathBuf};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use thiserror::Error;

use crate::core::translator::{TranslationError, Translator};
use crate::models::config::Config;
use crate::models::locale::{resource_file_name, translation_targets, TranslationTarget};
use crate::models::resx::{ResxDocument, ResxError, StringEntry};
use crate::utils::constants::{progress_chars, DEEPL_API_KEY_ENV};
use crate::utils::logger::Logger;
use crate::tf;

/// 致命错误：出现时整个运行中止
#[derive(Debug, Error)]
pub enum FillError {
    #[error(
        "DeepL API key is missing: set translate.api_key in the config file or the {} environment variable",
        DEEPL_API_KEY_ENV
    )]
    MissingApiKey,

    #[error("source resx file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("unknown target locale: {0}")]
    UnknownLocale(String),

    #[error(transparent)]
    Resx(#[from] ResxError),
}

/// 翻译计划
#[derive(Debug, Clone)]
pub struct FillPlan {
    /// 源 resx 文件
    pub source: PathBuf,
    /// 输出目录
    pub output_dir: PathBuf,
    /// 资源文件基础名
    pub base_name: String,
    /// 源语言代码
    pub source_lang: String,
    /// 目标语言，按顺序处理
    pub targets: Vec<TranslationTarget>,
    /// 两次 API 调用之间的间隔
    pub delay: Duration,
}

impl FillPlan {
    /// 从配置构建翻译计划，输出目录为源文件所在目录
    pub fn from_config(config: &Config) -> Self {
        let source = config.translate.source_path(&config.project);
        Self::for_source(source, config)
    }

    /// 指定源文件构建翻译计划
    pub fn for_source(source: PathBuf, config: &Config) -> Self {
        let output_dir = source
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            source,
            output_dir,
            base_name: config.project.base_name.clone(),
            source_lang: config.translate.source_lang.clone(),
            targets: translation_targets(&config.locales),
            delay: Duration::from_millis(config.translate.delay_ms),
        }
    }

    /// 仅保留指定语言；空列表表示全部
    pub fn retain_targets(&mut self, only: &[String]) -> Result<(), FillError> {
        if only.is_empty() {
            return Ok(());
        }
        for culture in only {
            if !self
                .targets
                .iter()
                .any(|target| target.culture.eq_ignore_ascii_case(culture))
            {
                return Err(FillError::UnknownLocale(culture.clone()));
            }
        }
        self.targets.retain(|target| {
            only.iter()
                .any(|culture| target.culture.eq_ignore_ascii_case(culture))
        });
        Ok(())
    }

    /// 目标语言的输出路径
    pub fn output_path(&self, target: &TranslationTarget) -> PathBuf {
        self.output_dir
            .join(resource_file_name(&self.base_name, Some(&target.culture)))
    }
}

/// 单个 key 的处理结果
#[derive(Debug)]
pub enum KeyOutcome {
    /// 翻译成功
    Translated { key: String, text: String },
    /// 空白文本，原样保留，未调用接口
    Blank { key: String },
    /// 翻译失败，保留原文
    Fallback {
        key: String,
        original: String,
        error: TranslationError,
    },
}

impl KeyOutcome {
    pub fn key(&self) -> &str {
        match self {
            KeyOutcome::Translated { key, .. }
            | KeyOutcome::Blank { key }
            | KeyOutcome::Fallback { key, .. } => key,
        }
    }

    pub fn is_translated(&self) -> bool {
        matches!(self, KeyOutcome::Translated { .. })
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, KeyOutcome::Fallback { .. })
    }
}

/// 单个语言的结果
#[derive(Debug)]
pub struct LocaleReport {
    pub target: TranslationTarget,
    pub output: PathBuf,
    pub outcomes: Vec<KeyOutcome>,
}

impl LocaleReport {
    pub fn translated_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_translated()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_fallback()).count()
    }

    /// 空白值原样保留，不计入已翻译
    pub fn blank_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, KeyOutcome::Blank { .. }))
            .count()
    }
}

/// 整体结果
#[derive(Debug)]
pub struct FillReport {
    pub source: PathBuf,
    pub keys_found: usize,
    pub locales: Vec<LocaleReport>,
}

/// 翻译填充器
pub struct TranslationFiller<T: Translator> {
    translator: T,
    show_progress: bool,
}

impl<T: Translator> TranslationFiller<T> {
    pub fn new(translator: T) -> Self {
        Self {
            translator,
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// 执行翻译计划
    pub async fn run(&self, plan: &FillPlan) -> Result<FillReport, FillError> {
        if !plan.source.is_file() {
            return Err(FillError::SourceNotFound(plan.source.clone()));
        }

        let source = ResxDocument::load(&plan.source)?;
        let strings = source.string_entries();
        Logger::success(tf!(
            "translate.keys_found",
            strings.len(),
            plan.source.display()
        ));

        let mut calls = 0usize;
        let mut locales = Vec::with_capacity(plan.targets.len());
        for target in &plan.targets {
            locales.push(
                self.fill_locale(&source, &strings, target, plan, &mut calls)
                    .await?,
            );
        }

        Ok(FillReport {
            source: plan.source.clone(),
            keys_found: strings.len(),
            locales,
        })
    }

    async fn fill_locale(
        &self,
        source: &ResxDocument,
        strings: &[StringEntry],
        target: &TranslationTarget,
        plan: &FillPlan,
        calls: &mut usize,
    ) -> Result<LocaleReport, FillError> {
        let output = plan.output_path(target);
        Logger::info(tf!(
            "translate.generating",
            output.display(),
            target.deepl
        ));

        let mut document = source.clone();
        let progress = self.progress_bar(strings.len() as u64, &target.culture);
        let mut outcomes = Vec::with_capacity(strings.len());

        for entry in strings {
            progress.inc(1);
            if document.value(&entry.key).is_none() {
                continue;
            }

            if entry.value.trim().is_empty() {
                outcomes.push(KeyOutcome::Blank {
                    key: entry.key.clone(),
                });
                continue;
            }

            if *calls > 0 && !plan.delay.is_zero() {
                tokio::time::sleep(plan.delay).await;
            }
            *calls += 1;

            let outcome = match self
                .translator
                .translate(&entry.value, &target.deepl, &plan.source_lang)
                .await
            {
                Ok(text) => {
                    document.set_value(&entry.key, &text);
                    KeyOutcome::Translated {
                        key: entry.key.clone(),
                        text,
                    }
                }
                Err(error) => {
                    progress.suspend(|| {
                        Logger::warn(tf!("translate.key_failed", entry.key, error));
                    });
                    document.set_value(&entry.key, &entry.value);
                    KeyOutcome::Fallback {
                        key: entry.key.clone(),
                        original: entry.value.clone(),
                        error,
                    }
                }
            };
            outcomes.push(outcome);
        }
        progress.finish_and_clear();

        document.save(&output)?;

        let report = LocaleReport {
            target: target.clone(),
            output,
            outcomes,
        };
        Logger::success(tf!(
            "translate.locale_done",
            report.translated_count(),
            report.output.display()
        ));
        Ok(report)
    }

    fn progress_bar(&self, len: u64, culture: &str) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg} [{bar:30.cyan}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars(&format!("{}{}", progress_chars::FILLED, progress_chars::EMPTY));
        let bar = ProgressBar::new(len).with_style(style);
        bar.set_message(culture.to_string());
        bar
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::fs;
    use std::time::Instant;

    /// 固定词表翻译器；未命中的文本返回错误
    struct FakeTranslator {
        dictionary: HashMap<(String, String), String>,
        calls: RefCell<Vec<(String, String, String)>>,
        called_at: RefCell<Vec<Instant>>,
    }

    impl FakeTranslator {
        fn new(entries: &[(&str, &str, &str)]) -> Self {
            Self {
                dictionary: entries
                    .iter()
                    .map(|(text, target, out)| {
                        ((text.to_string(), target.to_string()), out.to_string())
                    })
                    .collect(),
                calls: RefCell::new(Vec::new()),
                called_at: RefCell::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self::new(&[])
        }
    }

    impl Translator for FakeTranslator {
        async fn translate(
            &self,
            text: &str,
            target_lang: &str,
            source_lang: &str,
        ) -> Result<String, TranslationError> {
            self.called_at.borrow_mut().push(Instant::now());
            self.calls.borrow_mut().push((
                text.to_string(),
                target_lang.to_string(),
                source_lang.to_string(),
            ));
            self.dictionary
                .get(&(text.to_string(), target_lang.to_string()))
                .cloned()
                .ok_or_else(|| TranslationError::Status {
                    status: 503,
                    body: "unavailable".to_string(),
                })
        }
    }

    fn write_source(dir: &Path, strings: &[(&str, &str)]) -> PathBuf {
        let mut document = ResxDocument::new();
        for (key, value) in strings {
            document.add_string(key, value);
        }
        document.indent();
        let path = dir.join("AppResources.resx");
        document.save(&path).unwrap();
        path
    }

    fn plan(source: PathBuf, targets: &[(&str, &str)]) -> FillPlan {
        FillPlan {
            output_dir: source.parent().unwrap().to_path_buf(),
            source,
            base_name: "AppResources".to_string(),
            source_lang: "FR".to_string(),
            targets: targets
                .iter()
                .map(|(culture, deepl)| TranslationTarget {
                    culture: culture.to_string(),
                    deepl: deepl.to_string(),
                })
                .collect(),
            delay: Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn translates_values_and_keeps_untranslatable_text() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(
            dir.path(),
            &[("Email", "Email"), ("Password", "Mot de passe")],
        );
        let translator = FakeTranslator::new(&[
            ("Email", "EN", "Email"),
            ("Mot de passe", "EN", "Password"),
        ]);

        let report = TranslationFiller::new(translator)
            .run(&plan(source, &[("en", "EN")]))
            .await
            .unwrap();

        assert_eq!(report.keys_found, 2);
        let locale = &report.locales[0];
        assert_eq!(locale.translated_count(), 2);
        assert_eq!(locale.output, dir.path().join("AppResources.en.resx"));

        let output = ResxDocument::load(&locale.output).unwrap();
        assert_eq!(output.value("Email").as_deref(), Some("Email"));
        assert_eq!(output.value("Password").as_deref(), Some("Password"));
        assert_eq!(output.keys(), vec!["Email", "Password"]);
    }

    #[tokio::test]
    async fn all_failures_degrade_to_identity_copy() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(
            dir.path(),
            &[("ErrorTitle", "Erreur"), ("BadPassword", "Mauvais mot de passe")],
        );

        let report = TranslationFiller::new(FakeTranslator::failing())
            .run(&plan(source.clone(), &[("de", "DE")]))
            .await
            .unwrap();

        let locale = &report.locales[0];
        assert_eq!(locale.translated_count(), 0);
        assert_eq!(locale.failed_count(), 2);
        assert!(matches!(
            &locale.outcomes[1],
            KeyOutcome::Fallback { key, original, .. }
                if key == "BadPassword" && original == "Mauvais mot de passe"
        ));

        let written = fs::read_to_string(&locale.output).unwrap();
        assert_eq!(written, fs::read_to_string(&source).unwrap());
    }

    #[tokio::test]
    async fn one_failed_key_does_not_abort_the_locale() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(
            dir.path(),
            &[("LoginButton", "Se connecter"), ("ErrorTitle", "Erreur")],
        );
        let translator = FakeTranslator::new(&[("Erreur", "ES", "Error")]);

        let report = TranslationFiller::new(translator)
            .run(&plan(source, &[("es", "ES")]))
            .await
            .unwrap();

        let locale = &report.locales[0];
        assert_eq!(locale.translated_count(), 1);
        assert_eq!(locale.outcomes[0].key(), "LoginButton");
        assert!(locale.outcomes[0].is_fallback());

        let output = ResxDocument::load(&locale.output).unwrap();
        assert_eq!(output.value("LoginButton").as_deref(), Some("Se connecter"));
        assert_eq!(output.value("ErrorTitle").as_deref(), Some("Error"));
    }

    #[tokio::test]
    async fn typed_entries_are_copied_but_never_sent() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("AppResources.resx");
        fs::write(
            &source,
            r#"<?xml version="1.0" encoding="utf-8"?>
<root>
  <!-- kept -->
  <data name="Logo" type="System.Byte[], mscorlib" mimetype="application/x-microsoft.net.object.bytearray.base64">
    <value>AAAA</value>
  </data>
  <data name="Title" xml:space="preserve">
    <value>Bienvenue</value>
  </data>
  <data name="Blank" xml:space="preserve">
    <value>   </value>
  </data>
</root>
"#,
        )
        .unwrap();
        let translator = FakeTranslator::new(&[("Bienvenue", "IT", "Benvenuto")]);

        let filler = TranslationFiller::new(translator);
        let report = filler.run(&plan(source, &[("it", "IT")])).await.unwrap();

        assert_eq!(report.keys_found, 2);
        assert_eq!(
            filler.translator.calls.borrow().as_slice(),
            &[("Bienvenue".to_string(), "IT".to_string(), "FR".to_string())]
        );

        let locale = &report.locales[0];
        assert!(matches!(&locale.outcomes[1], KeyOutcome::Blank { key } if key == "Blank"));
        assert_eq!(locale.translated_count(), 1);
        assert_eq!(locale.blank_count(), 1);

        let written = fs::read_to_string(&locale.output).unwrap();
        assert!(written.contains("<!-- kept -->"));
        assert!(written.contains("<value>AAAA</value>"));
        assert!(written.contains("<value>Benvenuto</value>"));
    }

    #[tokio::test]
    async fn calls_are_spaced_by_delay_across_locales() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(
            dir.path(),
            &[("Email", "Email"), ("Blank", "  "), ("Title", "Bienvenue")],
        );
        let delay = Duration::from_millis(100);
        let mut plan = plan(source, &[("de", "DE"), ("it", "IT")]);
        plan.delay = delay;

        let filler = TranslationFiller::new(FakeTranslator::failing());
        let started = Instant::now();
        let report = filler.run(&plan).await.unwrap();
        let elapsed = started.elapsed();

        // 2 个语言 × 2 个非空 key；空白值不调用接口
        let called_at = filler.translator.called_at.borrow();
        assert_eq!(called_at.len(), 4);
        assert_eq!(report.locales[1].blank_count(), 1);

        // 第一次调用不等待
        assert!(called_at[0].duration_since(started) < delay);
        // 相邻调用至少间隔 delay，空白值不额外等待
        for pair in called_at.windows(2) {
            let gap = pair[1].duration_since(pair[0]);
            assert!(gap >= delay, "gap {gap:?} shorter than {delay:?}");
            assert!(gap < delay * 2, "gap {gap:?} includes an extra sleep");
        }
        assert!(elapsed >= delay * 3);
    }

    #[tokio::test]
    async fn outputs_are_overwritten_for_every_target() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(dir.path(), &[("Email", "Email")]);
        fs::write(dir.path().join("AppResources.ja.resx"), "stale").unwrap();
        let translator = FakeTranslator::new(&[("Email", "JA", "メール"), ("Email", "KO", "이메일")]);

        let report = TranslationFiller::new(translator)
            .run(&plan(source, &[("ja", "JA"), ("ko", "KO")]))
            .await
            .unwrap();

        assert_eq!(report.locales.len(), 2);
        let ja = ResxDocument::load(&dir.path().join("AppResources.ja.resx")).unwrap();
        let ko = ResxDocument::load(&dir.path().join("AppResources.ko.resx")).unwrap();
        assert_eq!(ja.value("Email").as_deref(), Some("メール"));
        assert_eq!(ko.value("Email").as_deref(), Some("이메일"));
    }

    #[tokio::test]
    async fn missing_source_is_fatal_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("AppResources.resx");

        let err = TranslationFiller::new(FakeTranslator::failing())
            .run(&plan(source.clone(), &[("en", "EN")]))
            .await
            .unwrap_err();

        assert!(matches!(err, FillError::SourceNotFound(path) if path == source));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn retain_targets_filters_and_rejects_unknown_cultures() {
        let config = Config::default();
        let mut plan = FillPlan::from_config(&config);
        plan.retain_targets(&["zh-hans".to_string(), "pt-BR".to_string()])
            .unwrap();
        let cultures: Vec<_> = plan.targets.iter().map(|t| t.culture.as_str()).collect();
        assert_eq!(cultures, vec!["zh-Hans", "pt-BR"]);

        let mut plan = FillPlan::from_config(&config);
        assert!(matches!(
            plan.retain_targets(&["fr".to_string()]),
            Err(FillError::UnknownLocale(culture)) if culture == "fr"
        ));
    }

    #[test]
    fn plan_writes_next_to_source() {
        let config = Config::default();
        let plan = FillPlan::from_config(&config);
        assert_eq!(plan.output_dir, config.project.lang_dir_path());
        assert_eq!(plan.delay, Duration::from_millis(350));
        let en = plan
            .targets
            .iter()
            .find(|t| t.culture == "en")
            .unwrap();
        assert_eq!(
            plan.output_path(en),
            config.project.lang_dir_path().join("AppResources.en.resx")
        );
    }
}
