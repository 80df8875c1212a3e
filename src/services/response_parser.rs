//! 模型输出解析 - 业务能力层
//!
//! 只负责"把 LLM 的文本输出变成 JSON 文档"，不关心是哪条记录

use regex::Regex;
use serde_json::Value as JsonValue;
use std::sync::LazyLock;
use tracing::debug;

use crate::error::ParseError;

/// 解析失败时保留的原始文本长度（字符）
pub const DEFAULT_EXCERPT_CHARS: usize = 500;

/// 开头的代码块标记及语言标签，例如 "```json"
static OPENING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```[A-Za-z0-9_+.-]*[ \t]*").expect("valid fence regex"));

/// 模型输出解析器
#[derive(Debug, Clone, Copy)]
pub struct ResponseParser {
    excerpt_chars: usize,
}

impl ResponseParser {
    pub fn new(excerpt_chars: usize) -> Self {
        Self { excerpt_chars }
    }

    /// 解析模型输出
    ///
    /// 1. 去除首尾空白
    /// 2. 去除包裹的代码块标记
    /// 3. 按 JSON 解码，失败则返回带截断片段的 `ParseError`
    pub fn parse(&self, raw: &str) -> Result<JsonValue, ParseError> {
        let text = strip_code_fence(raw);

        serde_json::from_str(text).map_err(|e| {
            debug!("JSON 解析失败: {} (文本长度: {} 字符)", e, text.chars().count());
            ParseError {
                message: e.to_string(),
                raw: excerpt(text, self.excerpt_chars),
            }
        })
    }
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new(DEFAULT_EXCERPT_CHARS)
    }
}

/// 去除代码块标记
///
/// 只有文本以 ``` 开头时才处理；结尾的 ``` 可以缺失。
pub fn strip_code_fence(raw: &str) -> &str {
    let text = raw.trim();
    if !text.starts_with("```") {
        return text;
    }

    let body = match OPENING_FENCE.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    };
    let body = body.trim();
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// 取前 `max_chars` 个字符（按字符而不是字节截断）
fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}
