// ============================================================================
// ResxTool - 翻译接口
// ============================================================================
//
// 文件: src/core/translator.rs
// 职责: 翻译服务抽象与 DeepL 实现
// 边界:
//   - ✅ Translator trait 定义
//   - ✅ DeepL HTTP 请求与响应解析
//   - ✅ 翻译错误类型
//   - ❌ 不应包含资源文件读写
//   - ❌ 不应包含重试或退避策略
//   - ❌ 不应包含请求间隔控制
//
// ============================================================================

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

/// 单个 key 的翻译错误（可恢复）
#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("translation API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid translation response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("translation response contained no translations")]
    EmptyResponse,
}

/// 翻译服务
#[allow(async_fn_in_trait)]
pub trait Translator {
    /// 将 `text` 从 `source_lang` 翻译为 `target_lang`
    async fn translate(
        &self,
        text: &str,
        target_lang: &str,
        source_lang: &str,
    ) -> Result<String, TranslationError>;
}

#[derive(Debug, Deserialize)]
struct DeeplResponse {
    translations: Vec<DeeplTranslation>,
}

#[derive(Debug, Deserialize)]
struct DeeplTranslation {
    text: String,
}

/// 解析 DeepL 响应体，取第一条翻译
pub fn parse_translation_response(body: &str) -> Result<String, TranslationError> {
    let response: DeeplResponse = serde_json::from_str(body)?;
    response
        .translations
        .into_iter()
        .next()
        .map(|translation| translation.text)
        .ok_or(TranslationError::EmptyResponse)
}

/// DeepL 翻译客户端
#[derive(Debug, Clone)]
pub struct DeeplTranslator {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl DeeplTranslator {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TranslationError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }
}

impl Translator for DeeplTranslator {
    async fn translate(
        &self,
        text: &str,
        target_lang: &str,
        source_lang: &str,
    ) -> Result<String, TranslationError> {
        tracing::debug!(target_lang, source_lang, chars = text.len(), "POST {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("DeepL-Auth-Key {}", self.api_key))
            .form(&[
                ("text", text),
                ("target_lang", target_lang),
                ("source_lang", source_lang),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(status = status.as_u16(), "DeepL response");

        if !status.is_success() {
            // 用户可见的提示由填充器在进度条挂起时输出
            tracing::debug!(status = status.as_u16(), body = %body, "DeepL request rejected");
            return Err(TranslationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        parse_translation_response(&body)
    }
}
