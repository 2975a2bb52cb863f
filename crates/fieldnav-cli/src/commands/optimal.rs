//! Optimal command implementation

use crate::cli::{Cli, OptimalArgs};
use crate::context::dispatch_service;
use crate::output::OutputWriter;
use crate::output_types::WorkerRow;
use anyhow::Result;
use fieldnav_core::models::JobId;

pub async fn execute(cli: &Cli, args: &OptimalArgs, output: &OutputWriter) -> Result<()> {
    let dispatch = dispatch_service(cli).await?;

    let ranked = dispatch
        .find_optimal_workers(JobId(args.job_id), args.max_distance, args.limit)
        .await?;

    if output.is_json() {
        return output.result(&ranked);
    }

    let job = dispatch.get_job(ranked.job_id).await?;
    output.kv("Job", format!("#{} {}", job.id, job.title));
    output.kv("Location", ranked.job_location);
    output.section("Candidates");
    output.table(ranked.workers.iter().map(WorkerRow::from).collect());

    if ranked.workers.is_empty() {
        output.warning("No available workers within range");
    }
    Ok(())
}
