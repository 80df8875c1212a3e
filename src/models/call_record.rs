//! 通话记录
//!
//! 记录本身是一个保持字段顺序的 JSON 对象，流水线只读取 `id` 和 `transcript`，
//! 只写入一个标注字段，其余字段原样透传。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// 单条通话记录
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallRecord(Map<String, JsonValue>);

impl CallRecord {
    pub fn new(fields: Map<String, JsonValue>) -> Self {
        Self(fields)
    }

    /// 记录标识；缺失（或为 null）时合成为 `index_<i>`，空字符串原样保留
    pub fn id_or_index(&self, index: usize) -> String {
        match self.0.get("id") {
            Some(JsonValue::String(id)) => id.clone(),
            Some(JsonValue::Number(n)) => n.to_string(),
            _ => format!("index_{}", index),
        }
    }

    /// 通话文本；非字符串视为缺失
    pub fn transcript(&self) -> Option<&str> {
        self.0.get("transcript").and_then(JsonValue::as_str)
    }

    /// 是否有可供分析的文本（去除首尾空白后非空）
    pub fn has_transcript(&self) -> bool {
        self.transcript().is_some_and(|t| !t.trim().is_empty())
    }

    /// 写入标注字段，这是流水线对记录唯一的修改
    pub fn set_annotation(&mut self, field: &str, value: JsonValue) {
        self.0.insert(field.to_string(), value);
    }

    pub fn get(&self, field: &str) -> Option<&JsonValue> {
        self.0.get(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: JsonValue) -> CallRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_id_present_and_synthesized() {
        assert_eq!(record(json!({"id": "abc"})).id_or_index(3), "abc");
        assert_eq!(record(json!({"id": 42})).id_or_index(3), "42");
        assert_eq!(record(json!({})).id_or_index(3), "index_3");
        assert_eq!(record(json!({"id": null})).id_or_index(0), "index_0");
    }

    #[test]
    fn test_empty_id_is_kept() {
        assert_eq!(record(json!({"id": "", "transcript": "hi"})).id_or_index(2), "");
    }

    #[test]
    fn test_has_transcript() {
        assert!(record(json!({"transcript": "hello"})).has_transcript());
        assert!(!record(json!({"transcript": ""})).has_transcript());
        assert!(!record(json!({"transcript": "  \n\t "})).has_transcript());
        assert!(!record(json!({"transcript": null})).has_transcript());
        assert!(!record(json!({"transcript": 7})).has_transcript());
        assert!(!record(json!({"id": "x"})).has_transcript());
    }

    #[test]
    fn test_set_annotation_keeps_other_fields() {
        let mut rec = record(json!({"id": "a", "transcript": "t", "type": "inbound", "durationSeconds": 12.5}));
        rec.set_annotation("llm_analysis", json!({"x": 1}));

        let serialized = serde_json::to_value(&rec).unwrap();
        let keys: Vec<&str> = serialized.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["id", "transcript", "type", "durationSeconds", "llm_analysis"]);
        assert_eq!(rec.get("type"), Some(&json!("inbound")));
        assert_eq!(rec.get("llm_analysis"), Some(&json!({"x": 1})));
    }
}
