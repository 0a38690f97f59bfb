use anyhow::Context;
use bridge::routes::TrafficBridge;
use clap::Parser;
use generator::feed::run_feed;
use log::info;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::ServiceConfig;
use workflow::optimizer::Optimizer;

mod bridge;
mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Stand-in lane-optimization service for the dashboard")]
struct Args {
    /// Load the service config from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// Address to serve `/data` and `/api/update` on
    #[arg(long)]
    bind: Option<SocketAddr>,
    /// Directory served at `/` (the dashboard page and its wasm bundle)
    #[arg(long)]
    static_dir: Option<PathBuf>,
    /// Feed synthetic lane reports instead of waiting for a detector
    #[arg(long, default_value_t = false)]
    generate: bool,
    #[arg(long)]
    generate_interval_ms: Option<u64>,
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn into_config(self) -> anyhow::Result<ServiceConfig> {
        let mut config = match self.config {
            Some(path) => ServiceConfig::load(path)?,
            None => ServiceConfig::default(),
        };
        if let Some(bind) = self.bind {
            config.bind = bind;
        }
        if self.static_dir.is_some() {
            config.static_dir = self.static_dir;
        }
        config.generator.enabled |= self.generate;
        if let Some(interval_ms) = self.generate_interval_ms {
            config.generator.interval_ms = interval_ms;
        }
        if let Some(seed) = self.seed {
            config.generator.seed = seed;
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = Args::parse().into_config()?;

    let runtime = TokioBuilder::new_current_thread()
        .enable_all()
        .build()
        .context("creating service runtime")?;
    runtime.block_on(serve(config))
}

async fn serve(config: ServiceConfig) -> anyhow::Result<()> {
    let bridge = TrafficBridge::new(Optimizer::new(config.clone()), config.static_dir.clone());

    if config.generator.enabled {
        info!(
            "synthetic feed every {} ms (seed {})",
            config.generator.interval_ms, config.generator.seed
        );
        tokio::spawn(run_feed(bridge.clone(), config.generator.clone()));
    }

    let (addr, server) = warp::serve(bridge.routes())
        .try_bind_with_graceful_shutdown(config.bind, async {
            if let Err(err) = signal::ctrl_c().await {
                log::warn!("waiting for Ctrl+C failed: {}", err);
            }
        })
        .with_context(|| format!("binding {}", config.bind))?;

    println!("[simulator] serving http://{}/data (Ctrl+C to stop)", addr);
    if let Some(dir) = &config.static_dir {
        println!("[simulator] dashboard page from {}", dir.display());
    }
    server.await;
    info!("simulator stopped");
    Ok(())
}
