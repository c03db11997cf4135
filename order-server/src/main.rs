use order_server::{Config, Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 设置环境 (dotenv, 工作目录, 日志)
    setup_environment()?;

    print_banner();
    tracing::info!("🔥 Gas order server starting...");

    // 2. 加载配置
    let config = Config::from_env()?;
    tracing::info!(
        environment = %config.environment,
        work_dir = %config.work_dir,
        store = %config.store_name,
        "Configuration loaded"
    );

    // 3. 初始化服务器状态 (数据库、迁移)
    let state = ServerState::initialize(&config).await?;

    // 4. 启动 HTTP 服务器 (含管理员引导)
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
