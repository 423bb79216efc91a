use anyhow::{Context, Result};
use buzz_server::{config, storage};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::fmt::format::FmtSpan;

#[derive(Parser)]
#[command(name = "migrate", about = "buzz-server 數據庫遷移工具")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 運行所有未應用的遷移
    Run {
        /// 遷移後寫入初始 buzz 資料
        #[arg(long)]
        seed: bool,

        /// 寫入前清空 buzz 資料表（需搭配 --seed）
        #[arg(long, requires = "seed")]
        reset: bool,
    },

    /// 檢查遷移狀態
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日誌系統
    tracing_subscriber::fmt()
        .with_env_filter("buzz_server=info,migrate=info")
        .with_span_events(FmtSpan::CLOSE)
        .init();

    // 解析命令行參數
    let cli = Cli::parse();

    let app_config = config::load_config().context("無法載入配置")?;
    let pool = storage::init_pool(&app_config.database)
        .await
        .context("無法初始化資料庫連接池")?;

    match cli.command {
        Commands::Run { seed, reset } => {
            info!("開始運行資料庫遷移...");
            storage::run_migrations(&pool)
                .await
                .context("資料庫遷移執行失敗")?;
            info!("資料庫遷移完成！");

            if seed {
                let created = storage::seed_buzz(&pool, reset)
                    .await
                    .context("寫入初始資料失敗")?;
                for buzz in &created {
                    info!("已寫入 buzz {}: {}", buzz.id, buzz.url);
                }
            }
        }
        Commands::Status => {
            info!("檢查資料庫遷移狀態...");
            let status = storage::migration_status(&pool)
                .await
                .context("無法讀取遷移狀態")?;

            for migration in status {
                let mark = if migration.applied { "已套用" } else { "未套用" };
                println!("{:>16}  {:<6}  {}", migration.version, mark, migration.description);
            }
        }
    }

    pool.close().await;
    Ok(())
}
