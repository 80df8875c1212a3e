//! 批量标注处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量记录的处理和资源管理。
//!
//! 1. **应用初始化**：校验配置、加载提示词、创建 LLM 客户端（任何一步失败都直接终止）
//! 2. **批量加载**：读取输入文件中的全部通话记录
//! 3. **并发调度**：委托 `scheduler` 在 Semaphore 限制下执行标注
//! 4. **结果回写**：委托 `aggregator` 回写标注字段并统计
//! 5. **输出**：写出结果文件，打印最终统计

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

use crate::clients::{AnnotationClient, LlmClient};
use crate::config::Config;
use crate::error::FileError;
use crate::models::{load_call_records, save_call_records, RunSummary};
use crate::orchestrator::{aggregator, scheduler};
use crate::services::ResponseParser;
use crate::utils::logging;
use crate::workflow::AnnotateFlow;

/// 应用主结构
pub struct App {
    config: Config,
    flow: AnnotateFlow,
}

impl App {
    /// 初始化应用
    ///
    /// 配置非法、缺少 API Key、找不到提示词文件都属于致命错误，此时不会派发任何任务。
    pub async fn initialize(config: Config) -> Result<Self> {
        config.validate().context("配置校验失败")?;

        if !Path::new(&config.input_file).exists() {
            return Err(FileError::NotFound {
                path: config.input_file.clone(),
            })
            .context("输入文件不存在");
        }

        let prompt = load_prompt(Path::new(&config.prompt_file)).await?;
        let client = LlmClient::new(&config).context("无法创建 LLM 客户端")?;

        logging::log_startup(
            &prompt_display_name(&config.prompt_file),
            client.model_name(),
            config.max_concurrent_calls,
        );

        Ok(Self::with_client(config, prompt, Arc::new(client)))
    }

    /// 使用指定的标注客户端创建应用
    pub fn with_client(config: Config, prompt: String, client: Arc<dyn AnnotationClient>) -> Self {
        let parser = ResponseParser::new(config.raw_excerpt_chars);
        let flow = AnnotateFlow::new(client, prompt, parser);
        Self { config, flow }
    }

    /// 运行应用主逻辑
    ///
    /// 即使全部记录失败也正常返回，统计结果会如实反映。
    pub async fn run(&self) -> Result<RunSummary> {
        let input = PathBuf::from(&self.config.input_file);
        let mut records = load_call_records(&input)
            .await
            .with_context(|| format!("无法加载输入文件: {}", input.display()))?;

        if records.is_empty() {
            warn!("⚠️ 输入文件中没有记录");
        }
        logging::log_records_loaded(records.len(), &input.display().to_string());

        let outcomes =
            scheduler::annotate_records(&records, &self.flow, self.config.max_concurrent_calls).await;
        let summary = aggregator::apply_outcomes(&mut records, &outcomes, &self.config.annotation_field);

        let output = PathBuf::from(&self.config.output_file);
        save_call_records(&output, &records)
            .await
            .with_context(|| format!("无法写出结果文件: {}", output.display()))?;

        logging::print_final_stats(&summary, &self.config.output_file);

        Ok(summary)
    }
}

/// 加载提示词文件
pub async fn load_prompt(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(FileError::NotFound {
            path: path.display().to_string(),
        })
        .context("提示词文件不存在");
    }

    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| FileError::ReadFailed {
            path: path.display().to_string(),
            source,
        })
        .context("无法读取提示词文件")
}

fn prompt_display_name(prompt_file: &str) -> String {
    Path::new(prompt_file)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| prompt_file.to_string())
}
