//! 并发调度器
//!
//! 每条有文本的记录对应一个 tokio 任务，Semaphore 限制同时在途的 LLM 调用数量。
//! 没有文本的记录在派发前直接判定为 Skipped，不占用并发名额。
//! 每个任务的结果写回它自己下标的槽位，所以输出顺序与输入顺序一致。

use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info};

use crate::models::{AnnotationOutcome, CallRecord};
use crate::workflow::{AnnotateFlow, RecordCtx};

/// 对所有记录执行标注，返回与输入等长、同序的结果
///
/// `max_concurrent` 小于 1 时按 1 处理。
pub async fn annotate_records(
    records: &[CallRecord],
    flow: &AnnotateFlow,
    max_concurrent: usize,
) -> Vec<AnnotationOutcome> {
    let semaphore = Arc::new(Semaphore::new(max_concurrent.max(1)));
    let mut outcomes = vec![AnnotationOutcome::Skipped; records.len()];
    let mut handles = Vec::new();

    for (index, record) in records.iter().enumerate() {
        let ctx = RecordCtx::new(index, record.id_or_index(index));

        if !record.has_transcript() {
            info!("{} ⏭️ 跳过: 没有通话文本", ctx);
            continue;
        }
        let transcript = record.transcript().unwrap_or_default().to_string();

        let semaphore = semaphore.clone();
        let flow = flow.clone();
        let task_ctx = ctx.clone();

        let handle = tokio::spawn(async move {
            // Semaphore 不会被关闭，acquire 只可能在关闭后失败
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => return AnnotationOutcome::task_failed(e.to_string()),
            };
            flow.run(&transcript, &task_ctx).await
        });
        handles.push((ctx, handle));
    }

    info!("🚀 已派发 {} 个任务，最大并发数: {}", handles.len(), max_concurrent.max(1));

    let (contexts, handles): (Vec<_>, Vec<_>) = handles.into_iter().unzip();
    let results = join_all(handles).await;

    for (ctx, result) in contexts.into_iter().zip(results) {
        outcomes[ctx.index] = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("{} 任务执行失败: {}", ctx, e);
                AnnotationOutcome::task_failed(format!("任务执行失败: {}", e))
            }
        };
    }

    outcomes
}
