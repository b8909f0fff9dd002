use anyhow::Context;
use mhs::domain::config::ApiConfig;
use mhs::kernel::config::load_config;
use mhs_server::{Server, init_logging};

#[mhs_runtime::main(high_performance)]
async fn main() -> anyhow::Result<()> {
    let cfg: ApiConfig =
        load_config(Some("server")).context("Critical: Configuration is malformed")?;

    let _log = init_logging(&cfg.logging)?;

    Server::builder().config(cfg).build()?.run().await
}
