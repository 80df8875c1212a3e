/// LLM API 客户端
///
/// 通过 `async-openai` 调用兼容 OpenAI 的 chat completions 接口（Gemini、Azure 等）
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequest, CreateChatCompletionRequestArgs, ResponseFormat,
    },
    Client,
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

use crate::clients::annotation_client::AnnotationClient;
use crate::config::Config;
use crate::error::{ConfigError, LlmError};

/// LLM 客户端
///
/// 内部的 `Client` 基于 reqwest 连接池，可在多个任务间共享。
pub struct LlmClient {
    client: Client<OpenAIConfig>,
    model_name: String,
    temperature: f32,
    max_tokens: u32,
    json_mode: bool,
    request_timeout: Duration,
}

impl LlmClient {
    /// 创建新的 LLM 客户端；没有 API Key 时直接拒绝
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        if config.llm_api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        Ok(Self {
            client: Client::with_config(openai_config),
            model_name: config.llm_model_name.clone(),
            temperature: config.llm_temperature,
            max_tokens: config.llm_max_tokens,
            json_mode: config.llm_json_mode,
            request_timeout: Duration::from_secs(config.request_timeout_secs),
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    async fn chat(&self, user_message: &str) -> Result<String, LlmError> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        let request = self.build_request(user_message)?;

        let response = tokio::time::timeout(self.request_timeout, self.client.chat().create(request))
            .await
            .map_err(|_| {
                warn!("LLM API 调用超时 ({}秒)", self.request_timeout.as_secs());
                LlmError::Timeout {
                    model: self.model_name.clone(),
                    secs: self.request_timeout.as_secs(),
                }
            })?
            .map_err(|e| {
                warn!("LLM API 调用失败: {}", e);
                LlmError::api_call_failed(&self.model_name, e)
            })?;

        debug!("LLM API 调用成功");

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| LlmError::EmptyContent {
                model: self.model_name.clone(),
            })
    }

    /// 构建请求；`json_mode` 开启时要求模型只输出 JSON 对象
    fn build_request(&self, user_message: &str) -> Result<CreateChatCompletionRequest, LlmError> {
        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()
            .map_err(|e| self.invalid_request(e))?;

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(&self.model_name)
            .messages(vec![ChatCompletionRequestMessage::User(user_msg)])
            .temperature(self.temperature)
            .max_tokens(self.max_tokens);
        if self.json_mode {
            args.response_format(ResponseFormat::JsonObject);
        }

        args.build().map_err(|e| self.invalid_request(e))
    }

    fn invalid_request(&self, source: impl std::error::Error + Send + Sync + 'static) -> LlmError {
        LlmError::InvalidRequest {
            model: self.model_name.clone(),
            source: Box::new(source),
        }
    }
}

#[async_trait]
impl AnnotationClient for LlmClient {
    async fn submit(&self, prompt: &str) -> Result<String, LlmError> {
        self.chat(prompt).await
    }
}
