//! Sites command implementation

use crate::cli::Cli;
use crate::context::dispatch_service;
use crate::output::OutputWriter;
use crate::output_types::SiteRow;
use anyhow::Result;

pub async fn execute(cli: &Cli, output: &OutputWriter) -> Result<()> {
    let dispatch = dispatch_service(cli).await?;
    let sites = dispatch.list_sites().await?;

    if output.is_json() {
        return output.result(&sites);
    }

    output.section("Job sites");
    output.table(sites.iter().map(SiteRow::from).collect());
    Ok(())
}
