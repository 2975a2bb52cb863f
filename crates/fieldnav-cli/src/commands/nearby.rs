//! Nearby command implementation

use crate::cli::{Cli, NearbyArgs};
use crate::context::dispatch_service;
use crate::output::OutputWriter;
use crate::output_types::WorkerRow;
use anyhow::Result;
use fieldnav_core::models::Coordinates;

pub async fn execute(cli: &Cli, args: &NearbyArgs, output: &OutputWriter) -> Result<()> {
    let dispatch = dispatch_service(cli).await?;
    let target = Coordinates::new(args.lat, args.lng);

    let workers = dispatch.find_nearby_workers(target, args.radius).await?;

    if output.is_json() {
        return output.result(&workers);
    }

    output.section(format!("Available workers near {}", target));
    output.table(workers.iter().map(WorkerRow::from).collect());
    output.info(format!("{} workers found", workers.len()));
    Ok(())
}
