use specdeck_projects::ProjectRegistry;
use specdeck_serve::ServeConfig;
use tracing_subscriber::EnvFilter;

pub fn execute(registry: ProjectRegistry, bind: &str, port: u16) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServeConfig {
        bind: bind.to_string(),
        port,
    };
    tokio::runtime::Runtime::new()?.block_on(specdeck_serve::serve(registry, config))
}
