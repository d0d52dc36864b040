// ============================================================================
// ResxTool - 配置数据模型
// ============================================================================
//
// 文件: src/models/config.rs
// 职责: 配置文件数据结构定义和操作
// 边界:
//   - ✅ 配置文件数据结构定义
//   - ✅ 配置序列化/反序列化
//   - ✅ 配置验证和默认值
//   - ✅ 配置文件读写操作
//   - ✅ 默认语言表与基础字符串表
//   - ❌ 不应包含资源文件生成逻辑
//   - ❌ 不应包含翻译请求逻辑
//   - ❌ 不应包含 CLI 参数处理
//
// ============================================================================

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::models::locale::{default_locale_table, validate_locales, LocaleSpec};
use crate::utils::constants::{CONFIG_FILE_NAME, DEEPL_API_KEY_ENV, DEEPL_FREE_ENDPOINT};

/// 全局配置管理器
static GLOBAL_CONFIG: std::sync::OnceLock<Arc<RwLock<Config>>> = std::sync::OnceLock::new();

/// ResxTool 配置文件结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 项目配置
    #[serde(default)]
    pub project: ProjectConfig,
    /// 翻译配置
    #[serde(default)]
    pub translate: TranslateConfig,
    /// 输出配置
    #[serde(default)]
    pub output: OutputConfig,
    /// 国际化配置
    #[serde(default)]
    pub i18n: I18nConfig,
    /// 语言表（生成与翻译共用）
    #[serde(default = "default_locale_table")]
    pub locales: Vec<LocaleSpec>,
    /// 基础字符串表（法语）
    #[serde(default = "Config::default_strings")]
    pub strings: Vec<BaseString>,
}

/// 项目配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// 项目目录（包含 .csproj 的目录）
    #[serde(default = "Config::default_project_dir")]
    pub dir: String,
    /// 资源目录，相对于项目目录
    #[serde(default = "Config::default_lang_dir")]
    pub lang_dir: String,
    /// 资源文件基础名
    #[serde(default = "Config::default_base_name")]
    pub base_name: String,
}

/// 翻译配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateConfig {
    /// DeepL API Key（为空时读取环境变量）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// DeepL 接口地址
    #[serde(default = "Config::default_endpoint")]
    pub endpoint: String,
    /// 源语言代码
    #[serde(default = "Config::default_source_lang")]
    pub source_lang: String,
    /// 源文件路径（默认为资源目录下的中性文件）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    /// 两次请求之间的间隔（毫秒）
    #[serde(default = "Config::default_delay_ms")]
    pub delay_ms: u64,
    /// 请求超时（秒）
    #[serde(default = "Config::default_timeout_secs")]
    pub timeout_secs: u64,
}

/// 输出配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// 是否显示进度条
    #[serde(default = "Config::default_show_progress")]
    pub show_progress: bool,
    /// 是否详细输出
    #[serde(default)]
    pub verbose: bool,
    /// 是否彩色输出
    #[serde(default = "Config::default_colored")]
    pub colored: bool,
}

/// 国际化配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct I18nConfig {
    /// 界面语言
    #[serde(default = "Config::default_language")]
    pub language: String,
}

/// 基础字符串条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseString {
    pub key: String,
    pub value: String,
}

impl BaseString {
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

/// CLI 运行时参数（用于覆盖配置文件）
#[derive(Debug, Clone, Default)]
pub struct RuntimeArgs {
    pub verbose: Option<bool>,
    pub colored: Option<bool>,
    pub show_progress: Option<bool>,
    pub project_dir: Option<String>,
    pub language: Option<String>,
}

/// 配置默认值 trait - 不依赖全局配置初始化
pub trait ConfigDefaults {
    fn default_project_dir() -> String {
        "./LoGeCuiMobile".to_string()
    }

    fn default_lang_dir() -> String {
        "Resources/Lang".to_string()
    }

    fn default_base_name() -> String {
        "AppResources".to_string()
    }

    fn default_endpoint() -> String {
        DEEPL_FREE_ENDPOINT.to_string()
    }

    fn default_source_lang() -> String {
        "FR".to_string()
    }

    fn default_delay_ms() -> u64 {
        350
    }

    fn default_timeout_secs() -> u64 {
        30
    }

    fn default_show_progress() -> bool {
        true
    }

    fn default_colored() -> bool {
        true
    }

    fn default_language() -> String {
        "en_us".to_string()
    }

    /// 默认基础字符串表（法语界面文本）
    fn default_strings() -> Vec<BaseString> {
        vec![
            BaseString::new("Email", "Email"),
            BaseString::new("Password", "Mot de passe"),
            BaseString::new("StayConnected", "Rester connecté"),
            BaseString::new("LoginButton", "Se connecter"),
            BaseString::new("SignupButton", "Créer un compte"),
            BaseString::new("ForgotPassword", "Mot de passe oublié ?"),
            BaseString::new("ErrorTitle", "Erreur"),
            BaseString::new("BadPassword", "Mauvais mot de passe"),
        ]
    }
}

impl ConfigDefaults for Config {}

impl ProjectConfig {
    /// 资源目录完整路径
    pub fn lang_dir_path(&self) -> PathBuf {
        Path::new(&self.dir).join(&self.lang_dir)
    }
}

impl TranslateConfig {
    /// 解析 API Key：配置优先，其次环境变量
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key_or(std::env::var(DEEPL_API_KEY_ENV).ok())
    }

    fn api_key_or(&self, env_value: Option<String>) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or(env_value.filter(|key| !key.trim().is_empty()))
    }

    /// 源文件路径
    pub fn source_path(&self, project: &ProjectConfig) -> PathBuf {
        match &self.source_file {
            Some(path) => PathBuf::from(path),
            None => project
                .lang_dir_path()
                .join(crate::models::locale::resource_file_name(&project.base_name, None)),
        }
    }
}

impl Config {
    /// 初始化全局配置（程序启动时调用）
    pub fn initialize(path: Option<&Path>) -> anyhow::Result<()> {
        let config = Self::load_config(path)?;
        GLOBAL_CONFIG
            .set(Arc::new(RwLock::new(config)))
            .map_err(|_| anyhow::anyhow!("Global config already initialized"))?;
        Ok(())
    }

    /// 加载配置文件
    ///
    /// 显式指定的路径必须存在；默认路径不存在时使用默认配置。
    fn load_config(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_path = PathBuf::from(CONFIG_FILE_NAME);
                if default_path.exists() {
                    Self::load_from_file(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// 从指定文件读取配置
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
        let config = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path.display(), e))?;
        Ok(config)
    }

    /// 合并运行时参数
    pub fn merge_runtime_args(args: RuntimeArgs) -> anyhow::Result<()> {
        let global_config = GLOBAL_CONFIG
            .get()
            .ok_or_else(|| anyhow::anyhow!("Global config not initialized"))?;

        let mut config = global_config
            .write()
            .map_err(|_| anyhow::anyhow!("Failed to acquire config write lock"))?;

        config.apply_runtime_args(args);
        Ok(())
    }

    fn apply_runtime_args(&mut self, args: RuntimeArgs) {
        if let Some(verbose) = args.verbose {
            self.output.verbose = verbose;
        }
        if let Some(colored) = args.colored {
            self.output.colored = colored;
        }
        if let Some(show_progress) = args.show_progress {
            self.output.show_progress = show_progress;
        }
        if let Some(project_dir) = args.project_dir {
            self.project.dir = project_dir;
        }
        if let Some(language) = args.language {
            self.i18n.language = language;
        }
    }

    /// 校验文件命名与语言表（translate 只需要这部分）
    pub fn validate_locale_table(&self) -> anyhow::Result<()> {
        if self.project.base_name.trim().is_empty() {
            anyhow::bail!("project.base_name must not be empty");
        }
        validate_locales(&self.locales)?;
        Ok(())
    }

    /// 校验完整配置，包括基础字符串表
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_locale_table()?;

        let mut keys = HashSet::new();
        for entry in &self.strings {
            if entry.key.trim().is_empty() {
                anyhow::bail!("strings table contains an empty key");
            }
            if !keys.insert(entry.key.as_str()) {
                anyhow::bail!("duplicate key in strings table: {}", entry.key);
            }
        }
        Ok(())
    }

    /// 保存配置到文件
    pub fn save_to_file(&self, config_path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// 生成默认配置模板并保存到文件
    pub fn create_default_config_file(config_path: &Path) -> anyhow::Result<()> {
        Self::default().save_to_file(config_path)
    }

    fn read<R>(f: impl FnOnce(&Config) -> R) -> anyhow::Result<R> {
        let global_config = GLOBAL_CONFIG
            .get()
            .ok_or_else(|| anyhow::anyhow!("Global config not initialized"))?;

        let config = global_config
            .read()
            .map_err(|_| anyhow::anyhow!("Failed to acquire config read lock"))?;

        Ok(f(&config))
    }

    /// 当前全局配置快照
    pub fn current() -> anyhow::Result<Config> {
        Self::read(Config::clone)
    }

    /// 获取界面语言
    pub fn get_language() -> anyhow::Result<String> {
        Self::read(|config| config.i18n.language.clone())
    }

    /// 获取详细输出设置（带默认值）
    pub fn get_verbose() -> bool {
        Self::read(|config| config.output.verbose).unwrap_or(false)
    }

    /// 获取是否彩色输出（带默认值）
    pub fn get_colored() -> bool {
        Self::read(|config| config.output.colored).unwrap_or_else(|_| Self::default_colored())
    }

    /// 获取是否显示进度条（带默认值）
    pub fn get_show_progress() -> bool {
        Self::read(|config| config.output.show_progress)
            .unwrap_or_else(|_| Self::default_show_progress())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project: ProjectConfig::default(),
            translate: TranslateConfig::default(),
            output: OutputConfig::default(),
            i18n: I18nConfig::default(),
            locales: default_locale_table(),
            strings: Self::default_strings(),
        }
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            dir: Config::default_project_dir(),
            lang_dir: Config::default_lang_dir(),
            base_name: Config::default_base_name(),
        }
    }
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: Config::default_endpoint(),
            source_lang: Config::default_source_lang(),
            source_file: None,
            delay_ms: Config::default_delay_ms(),
            timeout_secs: Config::default_timeout_secs(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            show_progress: Config::default_show_progress(),
            verbose: false,
            colored: Config::default_colored(),
        }
    }
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            language: Config::default_language(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_reproduce_original_constants() {
        let config = Config::default();
        assert_eq!(
            config.project.lang_dir_path(),
            Path::new("./LoGeCuiMobile").join("Resources/Lang")
        );
        assert_eq!(config.project.base_name, "AppResources");
        assert_eq!(config.translate.endpoint, DEEPL_FREE_ENDPOINT);
        assert_eq!(config.translate.source_lang, "FR");
        assert_eq!(config.translate.delay_ms, 350);
        assert_eq!(config.translate.timeout_secs, 30);
        assert_eq!(
            config.translate.source_path(&config.project),
            Path::new("./LoGeCuiMobile/Resources/Lang").join("AppResources.resx")
        );
        assert_eq!(config.strings.len(), 8);
        assert_eq!(config.strings[1], BaseString::new("Password", "Mot de passe"));
        config.validate().unwrap();
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let config: Config = toml::from_str(
            r#"
[project]
base_name = "Strings"

[translate]
delay_ms = 0

[[locales]]

[[locales]]
culture = "en"
deepl = "EN-GB"

[[strings]]
key = "Hello"
value = "Bonjour"
"#,
        )
        .unwrap();

        assert_eq!(config.project.base_name, "Strings");
        assert_eq!(config.project.dir, "./LoGeCuiMobile");
        assert_eq!(config.translate.delay_ms, 0);
        assert_eq!(config.translate.timeout_secs, 30);
        assert_eq!(
            config.locales,
            vec![LocaleSpec::neutral(), LocaleSpec::translated("en", "EN-GB")]
        );
        assert_eq!(config.strings, vec![BaseString::new("Hello", "Bonjour")]);
        assert!(config.output.colored);
    }

    #[test]
    fn saved_default_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        Config::create_default_config_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        let defaults = Config::default();
        assert_eq!(loaded.locales, defaults.locales);
        assert_eq!(loaded.strings, defaults.strings);
        assert_eq!(loaded.translate.api_key, None);
    }

    #[test]
    fn api_key_prefers_config_then_environment() {
        let mut settings = TranslateConfig::default();
        assert_eq!(settings.api_key_or(None), None);
        assert_eq!(settings.api_key_or(Some("  ".into())), None);
        assert_eq!(
            settings.api_key_or(Some("env-key".into())).as_deref(),
            Some("env-key")
        );

        settings.api_key = Some("file-key:fx".into());
        assert_eq!(
            settings.api_key_or(Some("env-key".into())).as_deref(),
            Some("file-key:fx")
        );

        settings.api_key = Some(String::new());
        assert_eq!(
            settings.api_key_or(Some("env-key".into())).as_deref(),
            Some("env-key")
        );
    }

    #[test]
    fn runtime_args_override_file_values() {
        let mut config = Config::default();
        config.apply_runtime_args(RuntimeArgs {
            verbose: Some(true),
            colored: Some(false),
            show_progress: Some(false),
            project_dir: Some("/tmp/app".into()),
            language: Some("fr_fr".into()),
        });
        assert!(config.output.verbose);
        assert!(!config.output.colored);
        assert!(!config.output.show_progress);
        assert_eq!(config.project.dir, "/tmp/app");
        assert_eq!(config.i18n.language, "fr_fr");
    }

    #[test]
    fn validation_rejects_duplicate_string_keys() {
        let mut config = Config::default();
        config.strings.push(BaseString::new("Email", "Courriel"));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Email"));
        config.validate_locale_table().unwrap();
    }

    #[test]
    fn locale_table_check_ignores_strings() {
        let mut config = Config::default();
        config.strings.push(BaseString::new("", "vide"));
        config.validate_locale_table().unwrap();

        config.locales.push(LocaleSpec::translated("DE", "DE"));
        assert!(config.validate_locale_table().is_err());
    }
}
