//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量标注处理器
//! - 管理应用生命周期（初始化、运行）
//! - 加载记录、写出结果、输出全局统计
//!
//! ### `scheduler` - 并发调度
//! - 每条记录一个任务，Semaphore 控制并发
//! - 结果按输入顺序收集
//!
//! ### `aggregator` - 结果汇总
//! - 回写标注字段，统计 成功/跳过/失败
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<CallRecord>)
//!     ↓
//! scheduler (并发派发) → aggregator (回写 + 统计)
//!     ↓
//! workflow::AnnotateFlow (处理单条记录)
//!     ↓
//! services::ResponseParser / clients::AnnotationClient
//! ```

pub mod aggregator;
pub mod batch_processor;
pub mod scheduler;

// 重新导出主要类型
pub use aggregator::apply_outcomes;
pub use batch_processor::{load_prompt, App};
pub use scheduler::annotate_records;
