//! 错误类型
//!
//! - `LlmError`：单条记录的传输失败（网络、鉴权、配额、超时……），只影响该记录
//! - `ParseError`：模型输出无法解析为 JSON，只影响该记录
//! - `ConfigError` / `FileError`：批次级致命错误，必须在派发任何任务之前终止

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// LLM 服务错误
    #[error("LLM错误: {0}")]
    Llm(#[from] LlmError),
}

/// LLM 服务错误（传输层失败）
#[derive(Debug, Error)]
pub enum LlmError {
    /// API 调用失败
    #[error("LLM API调用失败 (模型: {model}): {source}")]
    ApiCallFailed {
        model: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 请求构建失败
    #[error("LLM请求构建失败 (模型: {model}): {source}")]
    InvalidRequest {
        model: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 调用超时
    #[error("LLM调用超时 (模型: {model}, {secs}秒)")]
    Timeout { model: String, secs: u64 },
    /// 返回内容为空
    #[error("LLM返回内容为空 (模型: {model})")]
    EmptyContent { model: String },
}

/// 模型输出解析失败
///
/// `raw` 只保存失败文本的前若干个字符，避免日志和输出文件膨胀。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("无效的 JSON 响应: {message}")]
pub struct ParseError {
    /// 解码器给出的诊断信息
    pub message: String,
    /// 失败文本的截断片段
    pub raw: String,
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 缺少 API Key
    #[error("未配置 LLM API Key (请设置 LLM_API_KEY 或 GEMINI_API_KEY)")]
    MissingApiKey,
    /// 字段取值非法
    #[error("配置项 {field} 非法: {reason}")]
    InvalidValue { field: String, reason: String },
    /// 配置文件解析失败
    #[error("配置文件解析失败 ({path}): {source}")]
    FileParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 输入文件格式不符合预期
    #[error("输入文件格式错误 ({path}): {reason}")]
    InvalidFormat { path: String, reason: String },
}

// ========== 便捷构造函数 ==========

impl LlmError {
    /// 创建LLM API调用错误
    pub fn api_call_failed(
        model: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        LlmError::ApiCallFailed {
            model: model.into(),
            source: Box::new(source),
        }
    }
}

impl ConfigError {
    /// 创建字段非法错误
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
