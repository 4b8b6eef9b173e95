use std::fmt::Write as _;

use criterion::{Criterion, criterion_group, criterion_main};
use encoding_rs::UTF_8;
use sales_lens::{
    aggregate::{category_totals, monthly_sales},
    config::ColumnNames,
    dashboard::Dashboard,
    data,
    dataset::{Dataset, LoadOptions},
    selection::Selection,
};

const CATEGORIES: &[(&str, &[&str])] = &[
    ("Furniture", &["Bookcases", "Chairs", "Tables", "Furnishings"]),
    ("Office Supplies", &["Art", "Binders", "Paper", "Storage"]),
    ("Technology", &["Phones", "Machines", "Copiers", "Accessories"]),
];

fn generate_orders(rows: usize) -> String {
    let mut csv = String::from("Row_ID,Category,Sub_Category,Order_Date,Sales,Quantity,Profit\n");
    for i in 0..rows {
        let (category, subs) = CATEGORIES[i % CATEGORIES.len()];
        let sub = subs[(i / CATEGORIES.len()) % subs.len()];
        let month = (i % 12) + 1;
        let day = (i % 28) + 1;
        let year = 2014 + (i % 4);
        let sales = (i % 997) as f64 * 1.37 + 0.5;
        let profit = sales * 0.12 - (i % 13) as f64;
        let _ = writeln!(
            csv,
            "{i},{category},{sub},{month}/{day}/{year},{sales:.2},{},{profit:.4}",
            (i % 9) + 1
        );
    }
    csv
}

fn load(csv: &str) -> Dataset {
    let names = ColumnNames::default();
    let formats = data::default_date_formats();
    let options = LoadOptions {
        delimiter: b',',
        encoding: UTF_8,
        columns: &names,
        date_formats: &formats,
    };
    Dataset::from_reader(csv.as_bytes(), &options).expect("load dataset")
}

fn bench_aggregations(c: &mut Criterion) {
    let dataset = load(&generate_orders(10_000));
    let selection = Selection::new(Some("Office Supplies"), ["Binders", "Paper"]);

    c.bench_function("monthly_sales_10k", |b| {
        b.iter(|| monthly_sales(&dataset.all()).expect("monthly"))
    });
    c.bench_function("category_totals_10k", |b| {
        b.iter(|| category_totals(&dataset.all()).expect("totals"))
    });
    c.bench_function("dashboard_compute_10k", |b| {
        b.iter(|| Dashboard::compute(&dataset, &selection).expect("dashboard"))
    });
}

criterion_group!(benches, bench_aggregations);
criterion_main!(benches);
