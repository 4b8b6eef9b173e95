//! Cascading category and sub-category selection.
//!
//! The category selector is single-choice with an explicit "nothing chosen"
//! state; choosing nothing yields an empty view so the sub-category selector
//! offers no options. The sub-category selector is multi-choice and scoped to
//! the category view; an empty choice also yields an empty view.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::dataset::View;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub category: Option<String>,
    pub sub_categories: Vec<String>,
}

impl Selection {
    pub fn new<C, S>(category: Option<C>, sub_categories: S) -> Self
    where
        C: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            category: category.map(Into::into),
            sub_categories: sub_categories.into_iter().map(Into::into).collect(),
        }
    }
}

/// Distinct Category values in first-seen order.
pub fn category_options(view: &View<'_>) -> Vec<String> {
    view.records()
        .map(|record| record.category())
        .unique()
        .map(str::to_string)
        .collect()
}

/// Distinct Sub_Category values in first-seen order.
pub fn sub_category_options(view: &View<'_>) -> Vec<String> {
    view.records()
        .map(|record| record.sub_category())
        .unique()
        .map(str::to_string)
        .collect()
}

pub fn filter_by_category<'a>(view: &View<'a>, category: Option<&str>) -> View<'a> {
    match category {
        Some(wanted) => view.filter(|record| record.category() == wanted),
        None => View::empty(view.dataset()),
    }
}

pub fn filter_by_sub_categories<'a>(view: &View<'a>, chosen: &[String]) -> View<'a> {
    if chosen.is_empty() {
        return View::empty(view.dataset());
    }
    view.filter(|record| chosen.iter().any(|wanted| wanted == record.sub_category()))
}

/// The category view, its sub-category options, and the final view.
#[derive(Debug, Clone)]
pub struct SelectionViews<'a> {
    pub category_view: View<'a>,
    pub sub_category_options: Vec<String>,
    pub selected_view: View<'a>,
}

pub fn apply<'a>(view: &View<'a>, selection: &Selection) -> SelectionViews<'a> {
    let category_view = filter_by_category(view, selection.category.as_deref());
    let sub_category_options = sub_category_options(&category_view);
    let selected_view = filter_by_sub_categories(&category_view, &selection.sub_categories);
    SelectionViews {
        category_view,
        sub_category_options,
        selected_view,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::ColumnNames,
        data,
        dataset::{Dataset, LoadOptions},
    };
    use encoding_rs::UTF_8;

    fn sample() -> Dataset {
        let names = ColumnNames::default();
        let formats = data::default_date_formats();
        let options = LoadOptions {
            delimiter: b',',
            encoding: UTF_8,
            columns: &names,
            date_formats: &formats,
        };
        let csv = "Category,Sub_Category,Order_Date,Sales,Profit\n\
                   Technology,Phones,2023-01-15,200,40\n\
                   Furniture,Chairs,2023-01-05,100,10\n\
                   Furniture,Tables,2023-03-01,80,-8\n\
                   Furniture,Chairs,2023-02-10,50,-5\n";
        Dataset::from_reader(csv.as_bytes(), &options).unwrap()
    }

    #[test]
    fn options_keep_first_seen_order() {
        let dataset = sample();
        assert_eq!(category_options(&dataset.all()), vec!["Technology", "Furniture"]);
        let furniture = filter_by_category(&dataset.all(), Some("Furniture"));
        assert_eq!(sub_category_options(&furniture), vec!["Chairs", "Tables"]);
    }

    #[test]
    fn no_category_means_no_rows() {
        let dataset = sample();
        let view = filter_by_category(&dataset.all(), None);
        assert!(view.is_empty());
        assert!(sub_category_options(&view).is_empty());
    }

    #[test]
    fn unknown_category_matches_nothing() {
        let dataset = sample();
        assert!(filter_by_category(&dataset.all(), Some("furniture")).is_empty());
    }

    #[test]
    fn apply_cascades_both_selectors() {
        let dataset = sample();
        let selection = Selection::new(Some("Furniture"), ["Chairs"]);
        let views = apply(&dataset.all(), &selection);
        assert_eq!(views.category_view.row_indices(), &[1, 2, 3]);
        assert_eq!(views.sub_category_options, vec!["Chairs", "Tables"]);
        assert_eq!(views.selected_view.row_indices(), &[1, 3]);
    }

    #[test]
    fn empty_sub_category_choice_yields_empty_view() {
        let dataset = sample();
        let selection = Selection::new(Some("Furniture"), Vec::<String>::new());
        let views = apply(&dataset.all(), &selection);
        assert_eq!(views.category_view.len(), 3);
        assert!(views.selected_view.is_empty());
    }

    #[test]
    fn sub_categories_outside_the_category_are_ignored() {
        let dataset = sample();
        let selection = Selection::new(Some("Furniture"), ["Phones", "Tables"]);
        let views = apply(&dataset.all(), &selection);
        assert_eq!(views.selected_view.row_indices(), &[2]);
    }
}
