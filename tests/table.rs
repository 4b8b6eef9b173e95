use sales_lens::table::{Align, infer_alignment, render_table};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn render_table_aligns_columns() {
    let headers = strings(&["Category", "Sales"]);
    let rows = vec![
        strings(&["Furniture", "150.00"]),
        strings(&["Technology", "2,032.06"]),
    ];

    let rendered = render_table(&headers, &rows, &[Align::Left, Align::Right]);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(
        lines,
        vec![
            "Category       Sales",
            "----------  --------",
            "Furniture     150.00",
            "Technology  2,032.06",
        ]
    );
}

#[test]
fn render_table_normalizes_control_characters() {
    let headers = strings(&["note"]);
    let rows = vec![strings(&["line1\nline2\tvalue"])];

    let rendered = render_table(&headers, &rows, &[]);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[2], "line1 line2 value");
}

#[test]
fn render_table_handles_unicode_widths() {
    let headers = strings(&["Customer", "Sub"]);
    let rows = vec![strings(&["Seán", "Crêpes"])];

    let rendered = render_table(&headers, &rows, &[]);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines[2], "Seán      Crêpes");
}

#[test]
fn infer_alignment_right_aligns_numeric_columns() {
    let headers = strings(&["Row_ID", "Customer", "Sales", "Margin"]);
    let rows = vec![
        strings(&["1", "Ann", "$1,200.00", "3.33%"]),
        strings(&["2", "", "", "-1.00%"]),
    ];
    assert_eq!(
        infer_alignment(&headers, &rows),
        vec![Align::Right, Align::Left, Align::Right, Align::Right]
    );
}
