//! 标注结果与批次统计

use serde::Serialize;
use serde_json::{json, Value as JsonValue};

use crate::error::{LlmError, ParseError};

/// 失败类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// LLM 调用本身失败
    Transport,
    /// 调用成功但输出不是合法 JSON
    Parse,
    /// 任务异常终止（panic）
    Task,
}

/// 单条记录的标注结果
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationOutcome {
    /// 没有可分析的文本，未调用 LLM
    Skipped,
    /// 解析后的结构化文档，结构由提示词决定
    Success(JsonValue),
    /// 失败；`raw` 仅在解析失败时存在
    Error {
        kind: FailureKind,
        message: String,
        raw: Option<String>,
    },
}

impl AnnotationOutcome {
    pub fn transport(err: &LlmError) -> Self {
        AnnotationOutcome::Error {
            kind: FailureKind::Transport,
            message: err.to_string(),
            raw: None,
        }
    }

    pub fn parse(err: ParseError) -> Self {
        AnnotationOutcome::Error {
            kind: FailureKind::Parse,
            message: err.to_string(),
            raw: Some(err.raw),
        }
    }

    pub fn task_failed(message: impl Into<String>) -> Self {
        AnnotationOutcome::Error {
            kind: FailureKind::Task,
            message: message.into(),
            raw: None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AnnotationOutcome::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, AnnotationOutcome::Error { .. })
    }

    /// 渲染为回写到记录上的值
    ///
    /// - Skipped → `null`
    /// - Success → 文档本身
    /// - Error → `{"error": ..., "raw": ...}`，非解析失败时没有 `raw`
    pub fn to_json(&self) -> JsonValue {
        match self {
            AnnotationOutcome::Skipped => JsonValue::Null,
            AnnotationOutcome::Success(doc) => doc.clone(),
            AnnotationOutcome::Error { message, raw, .. } => match raw {
                Some(raw) => json!({ "error": message, "raw": raw }),
                None => json!({ "error": message }),
            },
        }
    }
}

/// 批次统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub success: usize,
    pub skipped: usize,
    pub error: usize,
}

impl RunSummary {
    /// 只根据结果序列统计
    pub fn from_outcomes(outcomes: &[AnnotationOutcome]) -> Self {
        outcomes.iter().fold(
            RunSummary {
                total: outcomes.len(),
                ..Default::default()
            },
            |mut summary, outcome| {
                match outcome {
                    AnnotationOutcome::Skipped => summary.skipped += 1,
                    AnnotationOutcome::Success(_) => summary.success += 1,
                    AnnotationOutcome::Error { .. } => summary.error += 1,
                }
                summary
            },
        )
    }

    pub fn is_consistent(&self) -> bool {
        self.success + self.skipped + self.error == self.total
    }
}
