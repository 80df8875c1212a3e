//! 单条记录标注流程 - 流程层
//!
//! 流程顺序：
//! 1. 拼接提示词（固定指令 + 通话文本）
//! 2. 调用 LLM
//! 3. 解析输出
//!
//! 任何失败都转换成 `AnnotationOutcome::Error`，不会向上抛出

use std::sync::Arc;
use tracing::{info, warn};

use crate::clients::AnnotationClient;
use crate::models::AnnotationOutcome;
use crate::services::ResponseParser;
use crate::workflow::record_ctx::RecordCtx;

/// 单条记录标注流程
///
/// - 不持有任何记录，只拿到一段文本
/// - 克隆成本很低（内部都是 `Arc`），每个任务持有一份
#[derive(Clone)]
pub struct AnnotateFlow {
    client: Arc<dyn AnnotationClient>,
    prompt: Arc<str>,
    parser: ResponseParser,
}

impl AnnotateFlow {
    pub fn new(client: Arc<dyn AnnotationClient>, prompt: impl Into<Arc<str>>, parser: ResponseParser) -> Self {
        Self {
            client,
            prompt: prompt.into(),
            parser,
        }
    }

    /// 构建完整提示词
    pub fn build_prompt(&self, transcript: &str) -> String {
        format!("{}{}", self.prompt, transcript)
    }

    pub async fn run(&self, transcript: &str, ctx: &RecordCtx) -> AnnotationOutcome {
        info!("{} 🔍 分析中...", ctx);

        let raw = match self.client.submit(&self.build_prompt(transcript)).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("{} ❌ 分析失败: {}", ctx, e);
                return AnnotationOutcome::transport(&e);
            }
        };

        match self.parser.parse(&raw) {
            Ok(doc) => {
                info!("{} ✓ 完成", ctx);
                AnnotationOutcome::Success(doc)
            }
            Err(e) => {
                warn!("{} ⚠️ JSON 解析失败: {}", ctx, e.message);
                AnnotationOutcome::parse(e)
            }
        }
    }
}
