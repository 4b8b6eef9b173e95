use anyhow::Result;
use log::info;

use crate::{cli::PreviewArgs, table};

pub fn execute(args: &PreviewArgs) -> Result<()> {
    let (config, dataset) = crate::open_source(&args.source)?;
    let limit = args.rows.unwrap_or(config.preview_rows);
    let rows = dataset.all().cells(Some(limit));
    let aligns = table::infer_alignment(dataset.headers(), &rows);
    print!("{}", table::render_table(dataset.headers(), &rows, &aligns));
    info!(
        "Displayed {} of {} row(s) from {:?}",
        rows.len(),
        dataset.len(),
        args.source.input
    );
    Ok(())
}
