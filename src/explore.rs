//! Interactive selection session.
//!
//! Presents the category selector and then the sub-category selector as
//! numbered prompts, re-rendering the dashboard after every pair of answers.
//! Answers may be option numbers or exact option names. A blank answer means
//! "nothing selected"; `q` or end of input ends the session.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use log::info;

use crate::{
    cli::ExploreArgs,
    config::DashboardConfig,
    dashboard::Dashboard,
    dataset::Dataset,
    io_utils,
    selection::{self, Selection},
};

enum Answer {
    Quit,
    Line(String),
}

pub fn execute(args: &ExploreArgs) -> Result<()> {
    if io_utils::is_dash(&args.source.input) {
        bail!("explore reads selections from stdin; pass the sales file as a path with --input");
    }
    let (config, dataset) = crate::open_source(&args.source)?;
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();
    let renders = run_session(&dataset, &config, &mut input, &mut output)?;
    info!("Session ended after {renders} dashboard render(s)");
    Ok(())
}

/// Runs prompts until the user quits, returning the number of renders.
pub fn run_session<R, W>(
    dataset: &Dataset,
    config: &DashboardConfig,
    input: &mut R,
    output: &mut W,
) -> Result<usize>
where
    R: BufRead,
    W: Write,
{
    let everything = dataset.all();
    let categories = selection::category_options(&everything);
    let mut renders = 0usize;

    loop {
        writeln!(
            output,
            "Select a category (number or name, blank for none, q to quit):"
        )?;
        list_options(output, &categories)?;
        let line = match prompt(input, output)? {
            Answer::Quit => break,
            Answer::Line(line) => line,
        };
        let category = if line.is_empty() {
            None
        } else {
            match resolve_choice(&line, &categories) {
                Some(choice) => Some(choice),
                None => {
                    writeln!(output, "Unknown category '{line}'")?;
                    continue;
                }
            }
        };

        let category_view = selection::filter_by_category(&everything, category.as_deref());
        let sub_options = selection::sub_category_options(&category_view);
        let mut sub_categories = Vec::new();
        if !sub_options.is_empty() {
            writeln!(
                output,
                "Select one or more sub-categories (comma-separated, blank for none):"
            )?;
            list_options(output, &sub_options)?;
            let line = match prompt(input, output)? {
                Answer::Quit => break,
                Answer::Line(line) => line,
            };
            for token in line.split(',').map(str::trim).filter(|t| !t.is_empty()) {
                match resolve_choice(token, &sub_options) {
                    Some(choice) if !sub_categories.contains(&choice) => sub_categories.push(choice),
                    Some(_) => {}
                    None => writeln!(output, "Ignoring unknown sub-category '{token}'")?,
                }
            }
        }

        let selection = Selection {
            category,
            sub_categories,
        };
        let dashboard = Dashboard::compute(dataset, &selection)?;
        write!(output, "{}", dashboard.render_text(dataset, config))?;
        writeln!(output)?;
        renders += 1;
    }
    output.flush()?;
    Ok(renders)
}

fn list_options<W: Write>(output: &mut W, options: &[String]) -> io::Result<()> {
    for (idx, option) in options.iter().enumerate() {
        writeln!(output, "  {}) {option}", idx + 1)?;
    }
    Ok(())
}

fn prompt<R, W>(input: &mut R, output: &mut W) -> Result<Answer>
where
    R: BufRead,
    W: Write,
{
    write!(output, "> ")?;
    output.flush()?;
    let mut line = String::new();
    let read = input.read_line(&mut line).context("Reading selection")?;
    let trimmed = line.trim();
    if read == 0 || trimmed.eq_ignore_ascii_case("q") {
        return Ok(Answer::Quit);
    }
    Ok(Answer::Line(trimmed.to_string()))
}

/// Matches a 1-based option number or an exact option name.
fn resolve_choice(answer: &str, options: &[String]) -> Option<String> {
    if let Ok(number) = answer.parse::<usize>() {
        return number
            .checked_sub(1)
            .and_then(|idx| options.get(idx))
            .cloned();
    }
    options.iter().find(|option| option.as_str() == answer).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::ColumnNames, data, dataset::LoadOptions};
    use encoding_rs::UTF_8;
    use std::io::Cursor;

    fn scenario() -> Dataset {
        let names = ColumnNames::default();
        let formats = data::default_date_formats();
        let options = LoadOptions {
            delimiter: b',',
            encoding: UTF_8,
            columns: &names,
            date_formats: &formats,
        };
        let csv = "Category,Sub_Category,Order_Date,Sales,Profit\n\
                   Furniture,Chairs,2023-01-05,100,10\n\
                   Furniture,Chairs,2023-02-10,50,-5\n\
                   Technology,Phones,2023-01-15,200,40\n";
        Dataset::from_reader(csv.as_bytes(), &options).unwrap()
    }

    fn session(script: &str) -> (usize, String) {
        let dataset = scenario();
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut output = Vec::new();
        let renders = run_session(
            &dataset,
            &DashboardConfig::default(),
            &mut input,
            &mut output,
        )
        .unwrap();
        (renders, String::from_utf8(output).unwrap())
    }

    #[test]
    fn numbered_choices_render_metrics() {
        let (renders, output) = session("1\n1\nq\n");
        assert_eq!(renders, 1);
        assert!(output.contains("  1) Furniture\n  2) Technology\n"));
        assert!(output.contains("Total Sales                $150.00"));
    }

    #[test]
    fn names_and_numbers_mix_and_rerender() {
        let (renders, output) = session("Technology\nPhones\n1\n\n");
        assert_eq!(renders, 2);
        assert!(output.contains("Total Sales                $200.00"));
        assert!(output.contains("You selected: (none)"));
    }

    #[test]
    fn blank_category_skips_sub_category_prompt() {
        let (renders, output) = session("\n");
        assert_eq!(renders, 1);
        assert!(!output.contains("Select one or more sub-categories"));
        assert!(output.contains("No rows match the current selection."));
    }

    #[test]
    fn unknown_answers_are_reported() {
        let (renders, output) = session("Toys\n9\n2\nPhones, Lamps\n");
        assert_eq!(renders, 1);
        assert!(output.contains("Unknown category 'Toys'"));
        assert!(output.contains("Unknown category '9'"));
        assert!(output.contains("Ignoring unknown sub-category 'Lamps'"));
    }

    #[test]
    fn end_of_input_quits_cleanly() {
        let (renders, _) = session("");
        assert_eq!(renders, 0);
    }
}
