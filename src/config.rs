use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

/// 默认配置文件路径（可通过 CONFIG_FILE 覆盖，不存在时忽略）
pub const DEFAULT_CONFIG_FILE: &str = "annotate.toml";

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 同时在途的 LLM 调用数量上限
    pub max_concurrent_calls: usize,
    /// 输入 JSON 文件（通话记录数组）
    pub input_file: String,
    /// 输出 JSON 文件
    pub output_file: String,
    /// 提示词文件，内容会直接拼接在通话文本之前
    pub prompt_file: String,
    /// 回写到每条记录上的字段名
    pub annotation_field: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    pub llm_temperature: f32,
    pub llm_max_tokens: u32,
    /// 要求模型只输出 JSON 对象（response_format = json_object）
    pub llm_json_mode: bool,
    /// 单次调用超时（秒）
    pub request_timeout_secs: u64,
    /// 解析失败时保留的原始文本字符数
    pub raw_excerpt_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrent_calls: 25,
            input_file: "vapi_call_extracted.json".to_string(),
            output_file: "vapi_extracted_calls_analysed.json".to_string(),
            prompt_file: "prompts/ANALYSIS_PROMPT_V11.txt".to_string(),
            annotation_field: "llm_analysis".to_string(),
            verbose_logging: false,
            llm_api_key: String::new(),
            llm_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            llm_model_name: "gemini-3-flash-preview".to_string(),
            llm_temperature: 0.0,
            llm_max_tokens: 8192,
            llm_json_mode: true,
            request_timeout_secs: 180,
            raw_excerpt_chars: 500,
        }
    }
}

impl Config {
    /// 加载配置：配置文件（可选）→ 环境变量覆盖 → 校验
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let base = if Path::new(&path).exists() {
            Self::from_toml_file(&path)?
        } else {
            Self::default()
        };

        let config = base.with_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// 从 TOML 文件读取，缺失的字段使用默认值
    pub fn from_toml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::invalid("CONFIG_FILE", format!("无法读取 {}: {}", path, e)))?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::FileParseFailed {
            path: path.to_string(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// 用环境变量覆盖已有配置
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        let api_key = resolve_api_key(
            std::env::var("LLM_API_KEY").ok(),
            std::env::var("GEMINI_API_KEY").ok(),
            self.llm_api_key,
        );

        Ok(Self {
            max_concurrent_calls: env_parse("MAX_CONCURRENT_CALLS", self.max_concurrent_calls)?,
            input_file: std::env::var("INPUT_FILE").unwrap_or(self.input_file),
            output_file: std::env::var("OUTPUT_FILE").unwrap_or(self.output_file),
            prompt_file: std::env::var("PROMPT_FILE").unwrap_or(self.prompt_file),
            annotation_field: std::env::var("ANNOTATION_FIELD").unwrap_or(self.annotation_field),
            verbose_logging: env_parse("VERBOSE_LOGGING", self.verbose_logging)?,
            llm_api_key: api_key,
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(self.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(self.llm_model_name),
            llm_temperature: env_parse("LLM_TEMPERATURE", self.llm_temperature)?,
            llm_max_tokens: env_parse("LLM_MAX_TOKENS", self.llm_max_tokens)?,
            llm_json_mode: env_parse("LLM_JSON_MODE", self.llm_json_mode)?,
            request_timeout_secs: env_parse("REQUEST_TIMEOUT_SECS", self.request_timeout_secs)?,
            raw_excerpt_chars: env_parse("RAW_EXCERPT_CHARS", self.raw_excerpt_chars)?,
        })
    }

    /// 校验配置，任何一项不满足都属于批次级致命错误
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrent_calls == 0 {
            return Err(ConfigError::invalid("max_concurrent_calls", "必须大于 0"));
        }
        if self.llm_api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if self.llm_model_name.trim().is_empty() {
            return Err(ConfigError::invalid("llm_model_name", "不能为空"));
        }
        if self.annotation_field.trim().is_empty() {
            return Err(ConfigError::invalid("annotation_field", "不能为空"));
        }
        if self.raw_excerpt_chars == 0 {
            return Err(ConfigError::invalid("raw_excerpt_chars", "必须大于 0"));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::invalid("request_timeout_secs", "必须大于 0"));
        }
        Ok(())
    }
}

/// 依次取 LLM_API_KEY、GEMINI_API_KEY、已有配置；空白值视为未设置
fn resolve_api_key(primary: Option<String>, fallback: Option<String>, current: String) -> String {
    primary
        .into_iter()
        .chain(fallback)
        .find(|v| !v.trim().is_empty())
        .unwrap_or(current)
}

fn env_parse<T: FromStr>(var_name: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(var_name) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::EnvVarParseFailed {
            var_name: var_name.to_string(),
            value,
            expected_type: std::any::type_name::<T>().to_string(),
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            llm_api_key: "test-key".to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.max_concurrent_calls, 25);
        assert_eq!(config.annotation_field, "llm_analysis");
        assert_eq!(config.raw_excerpt_chars, 500);
        assert_eq!(config.llm_temperature, 0.0);
        assert!(config.llm_json_mode);
    }

    #[test]
    fn test_validate_ok() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_validate_missing_api_key() {
        let config = Config::default();
        assert!(matches!(config.validate(), Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn test_validate_zero_concurrency() {
        let config = Config {
            max_concurrent_calls: 0,
            ..valid_config()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "max_concurrent_calls"
        ));
    }

    #[test]
    fn test_validate_zero_excerpt() {
        let config = Config {
            raw_excerpt_chars: 0,
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_llm_api_key_falls_back_to_gemini() {
        let key = resolve_api_key(Some(String::new()), Some("real-key".to_string()), String::new());
        assert_eq!(key, "real-key");

        let key = resolve_api_key(Some("  ".to_string()), None, "from-file".to_string());
        assert_eq!(key, "from-file");

        let key = resolve_api_key(Some("primary".to_string()), Some("real-key".to_string()), String::new());
        assert_eq!(key, "primary");
    }

    #[test]
    fn test_env_overrides_skip_blank_api_key() {
        std::env::set_var("LLM_API_KEY", "");
        std::env::set_var("GEMINI_API_KEY", "real-key");
        let config = Config::default().with_env_overrides();
        std::env::remove_var("LLM_API_KEY");
        std::env::remove_var("GEMINI_API_KEY");

        let config = config.unwrap();
        assert_eq!(config.llm_api_key, "real-key");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = Config::from_toml_str(
            r#"
            max_concurrent_calls = 4
            llm_model_name = "gemini-2.5-pro"
            "#,
        )
        .unwrap();

        assert_eq!(config.max_concurrent_calls, 4);
        assert_eq!(config.llm_model_name, "gemini-2.5-pro");
        // 未给出的字段保持默认值
        assert_eq!(config.output_file, "vapi_extracted_calls_analysed.json");
    }

    #[test]
    fn test_from_toml_bad_type() {
        assert!(Config::from_toml_str("max_concurrent_calls = \"many\"").is_err());
    }
}
