//! Selector option listings.

use anyhow::Result;
use log::{info, warn};

use crate::{cli::CategoriesArgs, selection};

pub fn execute(args: &CategoriesArgs) -> Result<()> {
    let (_, dataset) = crate::open_source(&args.source)?;
    let everything = dataset.all();
    let options = match args.category.as_deref() {
        Some(category) => {
            let view = selection::filter_by_category(&everything, Some(category));
            if view.is_empty() {
                warn!("Category '{category}' does not occur in {:?}", args.source.input);
            }
            selection::sub_category_options(&view)
        }
        None => selection::category_options(&everything),
    };
    for option in &options {
        println!("{option}");
    }
    info!("Listed {} option(s)", options.len());
    Ok(())
}
