//! 结果汇总
//!
//! 所有任务结束后，把结果回写到各自的记录上，并统计成功/跳过/失败数量

use crate::models::{AnnotationOutcome, CallRecord, RunSummary};

/// 回写标注字段并返回统计
///
/// `records` 与 `outcomes` 按下标一一对应。
pub fn apply_outcomes(
    records: &mut [CallRecord],
    outcomes: &[AnnotationOutcome],
    field: &str,
) -> RunSummary {
    debug_assert_eq!(records.len(), outcomes.len());

    for (record, outcome) in records.iter_mut().zip(outcomes) {
        record.set_annotation(field, outcome.to_json());
    }

    RunSummary::from_outcomes(outcomes)
}
