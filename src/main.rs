use anyhow::Result;
use call_annotate::utils::logging;
use call_annotate::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load()?;

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用；单条记录失败不影响退出码
    App::initialize(config).await?.run().await?;

    Ok(())
}
