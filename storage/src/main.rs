use attachments_storage::{Config, StorageServiceFactory, telemetry};
use tracing::{info, warn};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

const BUILD_DATE: &str = env!("BUILD_DATE");
const BUILD_COMMIT: &str = env!("BUILD_COMMIT");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine, the environment may already be set
    dotenvy::dotenv().ok();

    let config = Config::init()?;
    telemetry::init_tracing(&config)?;
    print_build_info();
    info!(
        environment = %config.environment(),
        file_bucket = %config.file_bucket(),
        form_data_bucket = %config.form_data_bucket(),
        "Configuration loaded"
    );

    let factory = StorageServiceFactory::new(config);
    let statuses = factory.check_buckets().await;

    let mut unreachable = Vec::new();
    for status in statuses {
        if status.reachable {
            info!(bucket = %status.bucket, "Bucket is reachable");
        } else {
            warn!(bucket = %status.bucket, "Bucket is not reachable");
            unreachable.push(status.bucket);
        }
    }

    if !unreachable.is_empty() {
        anyhow::bail!("unreachable buckets: {}", unreachable.join(", "));
    }
    Ok(())
}

fn print_build_info() {
    info!("===========================================");
    info!("  Attachments Storage Check");
    info!("===========================================");
    info!("Build Date:   {}", BUILD_DATE);
    info!("Build Commit: {}", BUILD_COMMIT);
    info!("===========================================");
}
