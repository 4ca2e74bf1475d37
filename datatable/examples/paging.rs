//! Drives a paginated, sortable, selectable table from the terminal.
//!
//! Run with `cargo run -p datatable --example paging`. Debug logs go to
//! `paging.log`.

use std::fs::File;

use datatable::prelude::*;
use simplelog::{Config, LevelFilter, WriteLogger};

fn print_view(table: &DataTable<Record>) {
    let view = table.view();
    let header: Vec<String> = view
        .columns
        .iter()
        .map(|c| match view.sort_column() {
            Some(id) if id == &c.id => format!("{} ({})", c.name, view.sort_direction()),
            _ => c.name.clone(),
        })
        .collect();
    let mark = if view.all_selected() {
        "[x]"
    } else if view.indeterminate() {
        "[-]"
    } else {
        "[ ]"
    };
    println!("{} {}", mark, header.join(" | "));

    match view.body {
        Body::Progress => println!("    loading..."),
        Body::Empty => println!("    no records"),
        Body::Rows => {
            for row in &view.rows {
                let mark = if view.is_row_selected(row) { "[x]" } else { "[ ]" };
                let cells: Vec<String> = view
                    .columns
                    .iter()
                    .map(|c| format!("{:?}", c.value(*row)))
                    .collect();
                println!("{} {}", mark, cells.join(" | "));
            }
        }
    }

    if let Some(p) = &view.pagination {
        println!(
            "    page {}/{} ({} rows, {} per page)",
            p.current_page, p.page_count, p.row_count, p.rows_per_page
        );
    }
    println!();
}

fn main() -> datatable::Result<()> {
    let log_file = File::create("paging.log").expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let data = Record::many_from_json(
        "id",
        serde_json::json!([
            {"id": 1, "name": "Ada", "city": {"name": "London"}, "score": 91.5},
            {"id": 2, "name": "Grace", "city": {"name": "Arlington"}, "score": 88},
            {"id": 3, "name": "Linus", "city": {"name": "Helsinki"}, "score": null},
            {"id": 4, "name": "Barbara", "city": {"name": "Boston"}, "score": 97},
            {"id": 5, "name": "Ken", "city": {"name": "New Orleans"}, "score": 72.25},
        ]),
    )?;

    let config = TableConfig::from_json_str(
        r#"{"pagination": true, "paginationPerPage": 2, "selectableRows": true}"#,
    )?;

    let columns = vec![
        ColumnDef::field("Name", "name").sortable(),
        ColumnDef::field("City", "city.name").sortable(),
        ColumnDef::field("Score", "score").sortable(),
    ];

    let mut table = DataTable::new(columns, data, config);
    table.subscribe(|event: &TableEvent<Record>| {
        if let TableEvent::TableUpdated(update) = event {
            println!(
                "    -> update: {} selected, sort {:?} {}",
                update.selected_count, update.sort_column, update.sort_direction
            );
        }
    });

    print_view(&table);

    table.sort_by(&ColumnId::from("score"));
    print_view(&table);

    table.sort_by(&ColumnId::from("score"));
    table.change_page(3);
    print_view(&table);

    table.select_all();
    let first = table.data()[0].clone();
    table.toggle_row_selected(&first);
    table.change_rows_per_page(3);
    print_view(&table);

    Ok(())
}
