//! # Call Annotate
//!
//! 使用 LLM 为通话记录批量生成结构化标注
//!
//! ## 架构设计
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - 持有外部资源（LLM 连接），只暴露能力
//! - `AnnotationClient` - "提交提示词，拿回原始文本"的抽象
//! - `LlmClient` - 基于 async-openai 的实现
//!
//! ### ② 业务能力层（Services）
//! - `ResponseParser` - 把模型输出解析为 JSON 文档
//!
//! ### ③ 流程层（Workflow）
//! - `RecordCtx` - 上下文封装（记录下标 + 记录 ID）
//! - `AnnotateFlow` - 单条记录流程（拼提示词 → LLM → 解析）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/scheduler` - Semaphore 限流的并发调度，结果按输入顺序收集
//! - `orchestrator/aggregator` - 回写标注字段，统计结果
//! - `orchestrator/batch_processor` - 应用入口，管理配置、输入和输出
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{AnnotationClient, LlmClient};
pub use config::Config;
pub use error::{AppError, AppResult, ConfigError, LlmError, ParseError};
pub use models::{AnnotationOutcome, CallRecord, FailureKind, RunSummary};
pub use orchestrator::{annotate_records, apply_outcomes, App};
pub use services::ResponseParser;
pub use workflow::{AnnotateFlow, RecordCtx};
