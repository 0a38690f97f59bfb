#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use anyhow::Context;
    use clap::Parser;
    use dashboard::native::{HeadlessDashboard, LocalClock};
    use dashboard::HttpFetcher;
    use lanecore::poll::DashboardConfig;
    use log::info;
    use tokio::runtime::Builder as TokioBuilder;
    use tokio::signal;
    use tokio::task::LocalSet;

    #[derive(Parser)]
    #[command(author, version, about = "Run the lane dashboard without a browser")]
    struct Args {
        /// Data endpoint (`API_URL`)
        #[arg(long)]
        api_url: Option<String>,
        /// Print every handle after each successful poll
        #[arg(long, default_value_t = false)]
        verbose_view: bool,
    }

    pub fn run() -> anyhow::Result<()> {
        env_logger::init();
        let args = Args::parse();
        let config = DashboardConfig::default().override_api_url(args.api_url.as_deref());

        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating dashboard runtime")?;
        let dashboard = HeadlessDashboard::new(HttpFetcher::new(), LocalClock, &config)
            .echo_view(args.verbose_view);

        println!("[dashboard] polling {} (Ctrl+C to stop)", config.api_url);
        LocalSet::new().block_on(
            &runtime,
            dashboard.run_until(async {
                if let Err(err) = signal::ctrl_c().await {
                    log::warn!("waiting for Ctrl+C failed: {}", err);
                }
            }),
        );

        let metrics = dashboard.metrics();
        info!(
            "polls: {} succeeded, {} failed",
            metrics.succeeded, metrics.failed
        );
        for line in dashboard.view().render_lines() {
            println!("{}", line);
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {}
