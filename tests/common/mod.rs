#![allow(dead_code)]

use docx_rs::{BreakType, Docx, Paragraph, Run, Table, TableCell, TableRow};
use serde_json::{Value, json};
use xfilios::{DocxHandler, Record};

pub const NAME: &str = "demo.docx";

pub fn get_records() -> Vec<(i64, &'static str, &'static str)> {
    vec![
        (3, "101", "Spam"),
        (7, "422", "Eggs"),
        (4, "631", "Spam, spam, eggs, and spam"),
    ]
}

fn text_cell(text: &str) -> TableCell {
    TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text(text)))
}

/// Title, a paragraph with a bold run, a 4x3 table, a page break and a
/// closing paragraph
pub fn create_demo_docx() -> Docx {
    let mut rows = vec![TableRow::new(vec![
        text_cell("Qty"),
        text_cell("Id"),
        text_cell("Desc"),
    ])];
    for (qty, id, desc) in get_records() {
        rows.push(TableRow::new(vec![
            text_cell(&qty.to_string()),
            text_cell(id),
            text_cell(desc),
        ]));
    }

    Docx::new()
        .add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text("Document Title"))
                .style("Title"),
        )
        .add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text("A plain paragraph having some "))
                .add_run(Run::new().add_text("bold").bold()),
        )
        .add_table(Table::new(rows))
        .add_paragraph(Paragraph::new().add_run(Run::new().add_break(BreakType::Page)))
        .add_paragraph(
            Paragraph::new().add_run(Run::new().add_text("A plain paragraph having some New")),
        )
}

pub fn demo_handler() -> DocxHandler {
    DocxHandler::new(create_demo_docx(), NAME)
}

pub fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

pub fn inventory_records() -> Vec<Record> {
    get_records()
        .into_iter()
        .map(|(qty, id, desc)| record(json!({"qty": qty, "id": id, "desc": desc})))
        .collect()
}
