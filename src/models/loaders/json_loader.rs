use crate::error::{AppResult, FileError};
use crate::models::call_record::CallRecord;
use serde_json::Value as JsonValue;
use std::path::Path;
use tokio::fs;

/// 从 JSON 文件加载通话记录（顶层必须是对象数组）
pub async fn load_call_records(path: &Path) -> AppResult<Vec<CallRecord>> {
    let display = path.display().to_string();

    if !path.exists() {
        return Err(FileError::NotFound { path: display }.into());
    }

    let content = fs::read_to_string(path)
        .await
        .map_err(|source| FileError::ReadFailed {
            path: display.clone(),
            source,
        })?;

    let records = parse_call_records(&content).map_err(|reason| FileError::InvalidFormat {
        path: display,
        reason,
    })?;

    tracing::info!("成功加载 {} 条通话记录", records.len());
    Ok(records)
}

/// 解析记录数组；错误信息指出第一个不合法元素的位置
pub fn parse_call_records(content: &str) -> Result<Vec<CallRecord>, String> {
    let value: JsonValue = serde_json::from_str(content).map_err(|e| e.to_string())?;

    let JsonValue::Array(items) = value else {
        return Err("顶层必须是 JSON 数组".to_string());
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            JsonValue::Object(fields) => Ok(CallRecord::new(fields)),
            other => Err(format!("第 {} 个元素不是对象: {}", i, type_name(&other))),
        })
        .collect()
}

/// 将记录写回 JSON 文件（缩进 2 空格）
pub async fn save_call_records(path: &Path, records: &[CallRecord]) -> AppResult<()> {
    let display = path.display().to_string();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|source| FileError::WriteFailed {
                path: display.clone(),
                source,
            })?;
    }

    let body = serde_json::to_string_pretty(records).map_err(|e| FileError::InvalidFormat {
        path: display.clone(),
        reason: e.to_string(),
    })?;

    fs::write(path, body)
        .await
        .map_err(|source| FileError::WriteFailed {
            path: display,
            source,
        })?;

    Ok(())
}

fn type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
