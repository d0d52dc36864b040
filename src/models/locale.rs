// ============================================================================
// ResxTool - 语言表数据模型
// ============================================================================
//
// 文件: src/models/locale.rs
// 职责: 目标语言定义、资源文件命名规则、翻译目标推导
// 边界:
//   - ✅ 语言条目定义（culture + DeepL 目标代码）
//   - ✅ 资源文件命名规则
//   - ✅ 默认语言表
//   - ✅ 语言表校验
//   - ❌ 不应包含文件读写
//   - ❌ 不应包含翻译请求逻辑
//
// ============================================================================

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// 语言表校验错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocaleError {
    #[error("duplicate locale in locale table: {0}")]
    DuplicateCulture(String),

    #[error("the neutral locale is the translation source and cannot target DeepL code {0}")]
    NeutralTarget(String),

    #[error("locale table contains an empty culture tag")]
    EmptyCulture,
}

/// 语言表条目
///
/// `culture` 为 None 表示中性资源文件（`<base>.resx`），即翻译源文件。
/// `deepl` 为 None 表示只生成文件、不自动翻译。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub culture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deepl: Option<String>,
}

impl LocaleSpec {
    pub fn neutral() -> Self {
        Self {
            culture: None,
            deepl: None,
        }
    }

    /// 仅生成文件的语言
    pub fn scaffold_only(culture: &str) -> Self {
        Self {
            culture: Some(culture.to_string()),
            deepl: None,
        }
    }

    /// 可自动翻译的语言
    pub fn translated(culture: &str, deepl: &str) -> Self {
        Self {
            culture: Some(culture.to_string()),
            deepl: Some(deepl.to_string()),
        }
    }

    pub fn is_neutral(&self) -> bool {
        self.culture.is_none()
    }

    /// 资源文件名
    pub fn file_name(&self, base_name: &str) -> String {
        resource_file_name(base_name, self.culture.as_deref())
    }

    /// 日志展示用名称
    pub fn label(&self) -> &str {
        self.culture.as_deref().unwrap_or("neutral")
    }
}

/// 翻译目标：输出文件后缀 + DeepL target_lang
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationTarget {
    pub culture: String,
    pub deepl: String,
}

/// 资源文件命名：`<base>.resx` 或 `<base>.<culture>.resx`
pub fn resource_file_name(base_name: &str, culture: Option<&str>) -> String {
    match culture {
        Some(culture) => format!("{}.{}.resx", base_name, culture),
        None => format!("{}.resx", base_name),
    }
}

/// 从语言表推导翻译目标（有 culture 且有 DeepL 代码的条目，保持顺序）
pub fn translation_targets(locales: &[LocaleSpec]) -> Vec<TranslationTarget> {
    locales
        .iter()
        .filter_map(|locale| match (&locale.culture, &locale.deepl) {
            (Some(culture), Some(deepl)) => Some(TranslationTarget {
                culture: culture.clone(),
                deepl: deepl.clone(),
            }),
            _ => None,
        })
        .collect()
}

/// 校验语言表
pub fn validate_locales(locales: &[LocaleSpec]) -> Result<(), LocaleError> {
    let mut seen = HashSet::new();
    for locale in locales {
        if locale.is_neutral() {
            if let Some(deepl) = &locale.deepl {
                return Err(LocaleError::NeutralTarget(deepl.clone()));
            }
        } else if locale.label().trim().is_empty() {
            return Err(LocaleError::EmptyCulture);
        }

        let key = locale.culture.as_deref().map(str::to_lowercase);
        if !seen.insert(key) {
            return Err(LocaleError::DuplicateCulture(locale.label().to_string()));
        }
    }
    Ok(())
}

/// 默认语言表
///
/// 生成器和翻译器共用这一张表：每个条目都会生成文件，
/// 带 DeepL 代码的条目才会被翻译。法语是源语言，不翻译。
pub fn default_locale_table() -> Vec<LocaleSpec> {
    vec![
        LocaleSpec::neutral(),
        // Europe
        LocaleSpec::scaffold_only("fr"),
        LocaleSpec::translated("en", "EN-US"),
        LocaleSpec::translated("de", "DE"),
        LocaleSpec::translated("it", "IT"),
        LocaleSpec::translated("es", "ES"),
        LocaleSpec::translated("pt", "PT-PT"),
        LocaleSpec::translated("nl", "NL"),
        LocaleSpec::translated("el", "EL"),
        LocaleSpec::translated("sv", "SV"),
        LocaleSpec::translated("da", "DA"),
        LocaleSpec::translated("fi", "FI"),
        LocaleSpec::translated("no", "NB"),
        LocaleSpec::scaffold_only("is"),
        LocaleSpec::translated("pl", "PL"),
        LocaleSpec::translated("cs", "CS"),
        LocaleSpec::translated("sk", "SK"),
        LocaleSpec::translated("hu", "HU"),
        LocaleSpec::translated("ro", "RO"),
        LocaleSpec::translated("bg", "BG"),
        LocaleSpec::scaffold_only("hr"),
        LocaleSpec::scaffold_only("sr"),
        LocaleSpec::translated("sl", "SL"),
        LocaleSpec::translated("et", "ET"),
        LocaleSpec::translated("lv", "LV"),
        LocaleSpec::translated("lt", "LT"),
        LocaleSpec::translated("uk", "UK"),
        LocaleSpec::translated("ru", "RU"),
        LocaleSpec::translated("tr", "TR"),
        // Middle East / Africa
        LocaleSpec::translated("ar", "AR"),
        LocaleSpec::translated("he", "HE"),
        LocaleSpec::scaffold_only("fa"),
        LocaleSpec::scaffold_only("ur"),
        LocaleSpec::scaffold_only("sw"),
        LocaleSpec::scaffold_only("af"),
        LocaleSpec::scaffold_only("zu"),
        LocaleSpec::scaffold_only("xh"),
        LocaleSpec::scaffold_only("am"),
        // Asia
        LocaleSpec::scaffold_only("hi"),
        LocaleSpec::scaffold_only("bn"),
        LocaleSpec::scaffold_only("ta"),
        LocaleSpec::scaffold_only("te"),
        LocaleSpec::scaffold_only("mr"),
        LocaleSpec::scaffold_only("gu"),
        LocaleSpec::scaffold_only("pa"),
        LocaleSpec::scaffold_only("ml"),
        LocaleSpec::scaffold_only("kn"),
        LocaleSpec::translated("th", "TH"),
        LocaleSpec::translated("vi", "VI"),
        LocaleSpec::translated("id", "ID"),
        LocaleSpec::scaffold_only("ms"),
        LocaleSpec::scaffold_only("fil"),
        LocaleSpec::translated("zh-Hans", "ZH-HANS"),
        LocaleSpec::translated("zh-Hant", "ZH-HANT"),
        LocaleSpec::translated("ja", "JA"),
        LocaleSpec::translated("ko", "KO"),
        // Regional variants
        LocaleSpec::translated("en-AU", "EN-GB"),
        LocaleSpec::translated("en-CA", "EN-US"),
        LocaleSpec::translated("en-GB", "EN-GB"),
        LocaleSpec::translated("es-MX", "ES-419"),
        LocaleSpec::translated("es-AR", "ES-419"),
        LocaleSpec::translated("es-CO", "ES-419"),
        LocaleSpec::translated("pt-BR", "PT-BR"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_follow_resx_convention() {
        assert_eq!(resource_file_name("AppResources", None), "AppResources.resx");
        assert_eq!(
            resource_file_name("AppResources", Some("zh-Hant")),
            "AppResources.zh-Hant.resx"
        );
        assert_eq!(LocaleSpec::neutral().file_name("Strings"), "Strings.resx");
    }

    #[test]
    fn targets_skip_neutral_and_scaffold_only_entries() {
        let locales = vec![
            LocaleSpec::neutral(),
            LocaleSpec::scaffold_only("fr"),
            LocaleSpec::translated("en", "EN-US"),
            LocaleSpec::translated("zh-Hans", "ZH-HANS"),
        ];
        let targets = translation_targets(&locales);
        assert_eq!(
            targets,
            vec![
                TranslationTarget {
                    culture: "en".into(),
                    deepl: "EN-US".into()
                },
                TranslationTarget {
                    culture: "zh-Hans".into(),
                    deepl: "ZH-HANS".into()
                },
            ]
        );
    }

    #[test]
    fn default_table_is_valid_and_splits_chinese_scripts() {
        let table = default_locale_table();
        assert_eq!(validate_locales(&table), Ok(()));
        assert!(table[0].is_neutral());

        let targets = translation_targets(&table);
        assert!(targets.iter().any(|t| t.culture == "zh-Hans" && t.deepl == "ZH-HANS"));
        assert!(targets.iter().any(|t| t.culture == "zh-Hant" && t.deepl == "ZH-HANT"));
        assert!(!targets.iter().any(|t| t.culture == "zh" || t.culture == "fr"));
    }

    #[test]
    fn validation_rejects_bad_tables() {
        let neutral_target = vec![LocaleSpec {
            culture: None,
            deepl: Some("EN".into()),
        }];
        assert_eq!(
            validate_locales(&neutral_target),
            Err(LocaleError::NeutralTarget("EN".into()))
        );

        let duplicate = vec![
            LocaleSpec::scaffold_only("pt-BR"),
            LocaleSpec::translated("pt-br", "PT-BR"),
        ];
        assert_eq!(
            validate_locales(&duplicate),
            Err(LocaleError::DuplicateCulture("pt-br".into()))
        );

        let two_neutral = vec![LocaleSpec::neutral(), LocaleSpec::neutral()];
        assert_eq!(
            validate_locales(&two_neutral),
            Err(LocaleError::DuplicateCulture("neutral".into()))
        );

        assert_eq!(
            validate_locales(&[LocaleSpec::scaffold_only(" ")]),
            Err(LocaleError::EmptyCulture)
        );
    }
}
