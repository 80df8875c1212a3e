use async_trait::async_trait;

use crate::error::LlmError;

/// 标注能力：提交提示词，返回模型的原始文本输出
///
/// 实现必须可以被多个任务同时调用（至少 `max_concurrent_calls` 个），
/// 并且调用没有服务端副作用，失败后重新提交是安全的。
#[async_trait]
pub trait AnnotationClient: Send + Sync {
    async fn submit(&self, prompt: &str) -> Result<String, LlmError>;
}
