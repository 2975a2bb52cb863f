//! Config command implementation

use crate::cli::Cli;
use crate::context::resolve_config;
use crate::output::OutputWriter;
use crate::output_types::ConfigRow;
use anyhow::Result;

pub fn execute(cli: &Cli, output: &OutputWriter) -> Result<()> {
    let config = resolve_config(cli)?;

    let mut rows: Vec<ConfigRow> = config
        .to_inspection_map()
        .into_iter()
        .map(|(key, (value, source))| ConfigRow {
            key,
            value,
            source: format!("{:?}", source),
        })
        .collect();
    rows.sort_by(|a, b| a.key.cmp(&b.key));

    if output.is_json() {
        return output.result(&rows);
    }

    output.section("Dispatch settings");
    output.table(rows);
    Ok(())
}
