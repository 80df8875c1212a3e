//! 测试用的模拟标注客户端

#![allow(dead_code)]

use async_trait::async_trait;
use call_annotate::{AnnotateFlow, AnnotationClient, CallRecord, LlmError, ResponseParser};
use serde_json::Value as JsonValue;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const PROMPT: &str = "PROMPT:";

/// 根据通话文本决定行为的模拟客户端
///
/// - `fail` 开头：返回超时错误
/// - `panic` 开头：任务内 panic
/// - `garbage` 开头：返回非 JSON 文本
/// - `fenced` 开头：返回带代码块标记的 JSON
/// - 其他：返回 `{"t": <transcript>}`
///
/// 同时统计调用次数和同时在途的最大调用数。
#[derive(Default)]
pub struct MockClient {
    pub calls: AtomicUsize,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub delay_ms: u64,
    /// 按下标递减的延迟，让后面的记录先完成
    pub reverse_delay_total: Option<u64>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnnotationClient for MockClient {
    async fn submit(&self, prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let transcript = prompt.strip_prefix(PROMPT).unwrap_or(prompt).to_string();

        let delay = match (self.reverse_delay_total, transcript.strip_prefix("rec-")) {
            (Some(total), Some(n)) => total.saturating_sub(n.parse::<u64>().unwrap_or(0)),
            _ => self.delay_ms,
        };
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if transcript.starts_with("fail") {
            return Err(LlmError::Timeout {
                model: "mock".to_string(),
                secs: 30,
            });
        }
        if transcript.starts_with("panic") {
            panic!("mock client blew up");
        }
        if transcript.starts_with("garbage") {
            return Ok("Sorry, I can't produce JSON today.".to_string());
        }
        if transcript.starts_with("fenced") {
            return Ok("```json\n{\"x\":1}\n```".to_string());
        }

        Ok(serde_json::json!({ "t": transcript }).to_string())
    }
}

pub fn flow(client: Arc<MockClient>) -> AnnotateFlow {
    AnnotateFlow::new(client, PROMPT, ResponseParser::default())
}

pub fn records(value: JsonValue) -> Vec<CallRecord> {
    serde_json::from_value(value).expect("records")
}

/// 生成 `n` 条文本为 `rec-<i>` 的记录
pub fn numbered_records(n: usize) -> Vec<CallRecord> {
    (0..n)
        .map(|i| {
            serde_json::from_value(serde_json::json!({
                "id": format!("id-{}", i),
                "transcript": format!("rec-{}", i),
            }))
            .expect("record")
        })
        .collect()
}
