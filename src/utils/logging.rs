/// 日志工具模块
///
/// 提供日志初始化和格式化输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::models::RunSummary;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则 `verbose` 为真时输出 debug 级别
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `prompt_name`: 提示词文件名
/// - `model`: 模型名称
/// - `max_concurrent`: 最大并发数
pub fn log_startup(prompt_name: &str, model: &str, max_concurrent: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 通话记录批量标注");
    info!("📝 提示词: {}", prompt_name);
    info!("🤖 模型: {}", model);
    info!("📊 最大并发数: {}", max_concurrent);
    info!("{}", "=".repeat(60));
}

/// 记录加载信息
pub fn log_records_loaded(total: usize, path: &str) {
    info!("✓ 从 {} 加载了 {} 条记录", path, total);
    info!("{}", "-".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `summary`: 批次统计
/// - `output_path`: 结果文件路径
pub fn print_final_stats(summary: &RunSummary, output_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("共处理: {} 条", summary.total);
    info!("✅ 成功: {}", summary.success);
    info!("⏭️ 跳过 (无通话文本): {}", summary.skipped);
    info!("❌ 失败: {}", summary.error);
    info!("{}", "=".repeat(60));
    info!("\n结果已保存至: {}", output_path);
}
