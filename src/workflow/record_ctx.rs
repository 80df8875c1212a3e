//! 记录处理上下文
//!
//! 封装"我正在处理第几条记录、它的 ID 是什么"这一信息

use std::fmt::Display;

/// 记录处理上下文
#[derive(Debug, Clone)]
pub struct RecordCtx {
    /// 记录在输入序列中的位置（从0开始）
    pub index: usize,

    /// 记录标识，缺失时为 `index_<i>`
    pub record_id: String,
}

impl RecordCtx {
    pub fn new(index: usize, record_id: String) -> Self {
        Self { index, record_id }
    }
}

impl Display for RecordCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[记录 #{} ID#{}]", self.index, self.record_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let ctx = RecordCtx::new(3, "call-9".to_string());
        assert_eq!(ctx.to_string(), "[记录 #3 ID#call-9]");
    }
}
