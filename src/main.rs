use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use support_line::agents::support_workflow;
use support_line::config::{Cli, Config};
use support_line::llm::ChatCompletions;
use support_line::session::Session;
use support_line::{Ctx, Runner};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_cli(cli)?;

    // Logs go to stderr so the console trace on stdout stays readable.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    info!(model = %config.llm.model, base_url = %config.llm.base_url, "starting support desk");

    let workflow = support_workflow().context("building support workflow")?;
    let runner = Runner::new(workflow).with_tracing();
    let ctx = Ctx::new().with_model(Box::new(ChatCompletions::new(config.llm)));

    let stdin = io::stdin();
    let mut session = Session::new(stdin.lock(), io::stdout(), runner, ctx);
    session.run().context("console session failed")?;
    Ok(())
}
