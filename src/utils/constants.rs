// ============================================================================
// ResxTool - 常量定义
// ============================================================================
//
// 文件: src/utils/constants.rs
// 职责: 应用程序常量定义
// 边界:
//   - ✅ 应用程序常量定义
//   - ✅ 像素图标字符定义
//   - ✅ 外部服务默认地址
//   - ❌ 不应包含动态配置
//   - ❌ 不应包含业务逻辑
//
// ============================================================================

/// 应用名称常量
pub const APP_NAME: &str = "RESX";

/// 默认配置文件名
pub const CONFIG_FILE_NAME: &str = "resxtool.toml";

/// DeepL API Key 环境变量
pub const DEEPL_API_KEY_ENV: &str = "DEEPL_API_KEY";

/// DeepL Free 接口（Pro 账号使用 https://api.deepl.com/v2/translate）
pub const DEEPL_FREE_ENDPOINT: &str = "https://api-free.deepl.com/v2/translate";

/// 像素风格图标
pub mod icons {
    /// 成功图标
    pub const SUCCESS: &str = "✓";
    /// 错误图标
    pub const ERROR: &str = "✗";
    /// 文件图标
    pub const FILE: &str = "●";
    /// 语言图标
    pub const LOCALE: &str = "◉";
    /// 时间图标
    pub const TIME: &str = "⧖";
    /// 箭头图标
    pub const ARROW: &str = "→";
    /// 跳过图标
    pub const SKIP: &str = "○";
}

/// 进度条字符
pub mod progress_chars {
    /// 已完成块
    pub const FILLED: &str = "█";
    /// 未完成块
    pub const EMPTY: &str = "░";
}
