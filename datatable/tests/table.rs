use std::cell::RefCell;
use std::rc::Rc;

use datatable::config::TableConfig;
use datatable::model::{Record, Value};
use datatable::pipeline::{ColumnDef, ColumnId};
use datatable::state::{ClearToken, SortDirection};
use datatable::table::{Body, DataTable, TableEvent};

fn people() -> Vec<Record> {
    vec![
        Record::new("1").set("name", "Carol").set("age", 35i64),
        Record::new("2").set("name", "Alice").set("age", 28i64),
        Record::new("3").set("name", "Bob").set("age", 41i64),
        Record::new("4").set("name", "Dave").set("age", 19i64),
        Record::new("5").set("name", "Eve").set("age", 52i64),
    ]
}

fn columns() -> Vec<ColumnDef<Record>> {
    vec![
        ColumnDef::field("Name", "name").sortable(),
        ColumnDef::field("Age", "age").sortable(),
        ColumnDef::field("Notes", "notes"),
    ]
}

/// Subscribe a recorder and return the shared event log.
fn record_events(table: &mut DataTable<Record>) -> Rc<RefCell<Vec<TableEvent<Record>>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    table.subscribe(move |event: &TableEvent<Record>| sink.borrow_mut().push(event.clone()));
    events
}

fn names(events: &Rc<RefCell<Vec<TableEvent<Record>>>>) -> Vec<&'static str> {
    events.borrow().iter().map(TableEvent::name).collect()
}

fn view_keys(table: &DataTable<Record>) -> Vec<String> {
    table.view().rows.iter().map(|r| r.key().to_string()).collect()
}

// ============================================================================
// Sorting
// ============================================================================

#[test]
fn test_default_sort_from_config() {
    let config = TableConfig::default().with_default_sort("age", false);
    let table = DataTable::new(columns(), people(), config);

    assert_eq!(table.state().sort_column(), Some(&ColumnId::from("age")));
    assert_eq!(table.state().sort_direction(), SortDirection::Desc);
    assert_eq!(view_keys(&table), vec!["5", "3", "1", "2", "4"]);
}

#[test]
fn test_clicking_active_column_toggles_direction() {
    let config = TableConfig::default().with_default_sort("name", true);
    let mut table = DataTable::new(columns(), people(), config);

    assert!(table.sort_by(&ColumnId::from("name")));
    assert_eq!(table.state().sort_direction(), SortDirection::Desc);
    assert_eq!(view_keys(&table), vec!["5", "4", "1", "3", "2"]);
}

#[test]
fn test_clicking_other_column_keeps_direction() {
    let config = TableConfig::default().with_default_sort("name", true);
    let mut table = DataTable::new(columns(), people(), config);

    table.sort_by(&ColumnId::from("name"));
    table.sort_by(&ColumnId::from("age"));

    assert_eq!(table.state().sort_column(), Some(&ColumnId::from("age")));
    assert_eq!(table.state().sort_direction(), SortDirection::Desc);
    assert_eq!(view_keys(&table), vec!["5", "3", "1", "2", "4"]);
}

#[test]
fn test_non_sortable_column_is_ignored() {
    let mut table = DataTable::new(columns(), people(), TableConfig::default());
    let events = record_events(&mut table);

    assert!(!table.sort_by(&ColumnId::from("notes")));
    assert!(!table.sort_by(&ColumnId::from("missing")));
    assert_eq!(table.state().sort_column(), None);
    assert!(events.borrow().is_empty());
}

#[test]
fn test_sort_emits_sort_changed_then_update() {
    let mut table = DataTable::new(columns(), people(), TableConfig::default());
    let events = record_events(&mut table);

    table.sort_by(&ColumnId::from("age"));

    assert_eq!(names(&events), vec!["sort_changed", "table_updated"]);
    let events = events.borrow();
    assert_eq!(
        events[0],
        TableEvent::SortChanged {
            column: ColumnId::from("age"),
            direction: SortDirection::Asc,
        }
    );
    let TableEvent::TableUpdated(update) = &events[1] else {
        panic!("expected a table update");
    };
    assert_eq!(update.sort_column, Some(ColumnId::from("age")));
    assert_eq!(update.sort_direction, SortDirection::Asc);
}

#[test]
fn test_table_sort_function_overrides_columns() {
    let mut table = DataTable::new(columns(), people(), TableConfig::default())
        .with_sort_function(|a: &Record, b: &Record| a.key().cmp(b.key()).reverse());

    table.sort_by(&ColumnId::from("name"));
    assert_eq!(view_keys(&table), vec!["5", "4", "3", "2", "1"]);

    table.sort_by(&ColumnId::from("name"));
    assert_eq!(view_keys(&table), vec!["1", "2", "3", "4", "5"]);
}

#[test]
fn test_selection_survives_sorting() {
    let mut table = DataTable::new(columns(), people(), TableConfig::default().selectable());
    let row = table.data()[2].clone();
    table.toggle_row_selected(&row);
    table.sort_by(&ColumnId::from("age"));

    assert!(table.is_row_selected(&row));
    assert_eq!(table.state().selected_count(), 1);
}

// ============================================================================
// Selection and notifications
// ============================================================================

#[test]
fn test_no_notification_for_initial_state() {
    let mut table = DataTable::new(columns(), people(), TableConfig::default());
    let events = record_events(&mut table);

    let _ = table.view();
    assert!(events.borrow().is_empty());
}

#[test]
fn test_select_all_and_toggle_row_notify() {
    let mut table = DataTable::new(columns(), people(), TableConfig::default().selectable());
    let events = record_events(&mut table);

    table.select_all();
    let row = table.data()[1].clone();
    table.toggle_row_selected(&row);

    assert_eq!(names(&events), vec!["table_updated", "table_updated"]);
    let events = events.borrow();
    let TableEvent::TableUpdated(update) = &events[1] else {
        panic!("expected a table update");
    };
    assert!(!update.all_selected);
    assert_eq!(update.selected_count, 4);
    let keys: Vec<&str> = update.selected_rows.iter().map(Record::key).collect();
    assert_eq!(keys, vec!["1", "3", "4", "5"]);
}

#[test]
fn test_toggling_row_outside_dataset_is_ignored() {
    let data = vec![Record::new("a"), Record::new("b")];
    let mut table = DataTable::new(columns(), data, TableConfig::default().selectable());
    let events = record_events(&mut table);

    let stranger = Record::new("zzz");
    table.toggle_row_selected(&stranger);
    assert!(!table.is_row_selected(&stranger));
    assert!(events.borrow().is_empty());

    let first = table.data()[0].clone();
    table.toggle_row_selected(&first);

    assert!(!table.state().all_selected());
    assert_eq!(table.state().selected_count(), 1);
    assert!(!table.is_row_selected(&table.data()[1]));
    assert!(table.view().indeterminate());
}

#[test]
fn test_view_header_checkbox() {
    let mut table = DataTable::new(columns(), people(), TableConfig::default().selectable());
    let row = table.data()[0].clone();
    table.toggle_row_selected(&row);

    let view = table.view();
    assert!(view.selectable);
    assert!(!view.all_selected());
    assert!(view.indeterminate());
    assert_eq!(view.selected_count(), 1);
    assert!(view.is_row_selected(&row));
}

#[test]
fn test_page_change_does_not_notify_update() {
    let config = TableConfig::default().with_pagination(true).with_per_page(2);
    let mut table = DataTable::new(columns(), people(), config);
    let events = record_events(&mut table);

    table.change_page(2);

    assert_eq!(
        *events.borrow(),
        vec![TableEvent::PageChanged {
            page: 2,
            total_rows: 5,
        }]
    );
}

#[test]
fn test_row_clicked_event() {
    let mut table = DataTable::new(columns(), people(), TableConfig::default());
    let events = record_events(&mut table);
    let row = table.data()[3].clone();

    table.row_clicked(&row);

    assert_eq!(*events.borrow(), vec![TableEvent::RowClicked { row }]);
}

// ============================================================================
// Clear token
// ============================================================================

#[test]
fn test_clear_token_clears_once_per_change() {
    let mut table = DataTable::new(columns(), people(), TableConfig::default().selectable());
    let events = record_events(&mut table);
    table.select_all();

    let token = ClearToken::default().next();
    assert!(table.sync_clear_token(token));
    assert_eq!(table.state().selected_count(), 0);
    assert!(!table.state().all_selected());

    // Same token again: the user's new selection stays.
    let row = table.data()[0].clone();
    table.toggle_row_selected(&row);
    assert!(!table.sync_clear_token(token));
    assert!(table.is_row_selected(&row));

    assert_eq!(
        names(&events),
        vec!["table_updated", "table_updated", "table_updated"]
    );
}

#[test]
fn test_clear_token_from_config_is_not_a_change() {
    let token = ClearToken::new(7);
    let config = TableConfig::default().with_clear_selected_rows(token);
    let mut table = DataTable::new(columns(), people(), config);
    table.select_all();

    assert!(!table.sync_clear_token(token));
    assert!(table.state().all_selected());
    assert!(table.sync_clear_token(token.next()));
    assert_eq!(table.state().selected_count(), 0);
}

#[test]
fn test_clear_selection_keeps_token() {
    let token = ClearToken::new(3);
    let config = TableConfig::default().with_clear_selected_rows(token);
    let mut table = DataTable::new(columns(), people(), config);
    table.select_all();

    table.clear_selection();

    assert_eq!(table.state().selected_count(), 0);
    assert_eq!(table.state().selected_rows_flag(), token);
}

// ============================================================================
// Pagination
// ============================================================================

#[test]
fn test_page_size_change_moves_to_last_page() {
    let config = TableConfig::default().with_pagination(true).with_per_page(2);
    let mut table = DataTable::new(columns(), people(), config);
    let events = record_events(&mut table);

    table.change_page(3);
    assert_eq!(view_keys(&table), vec!["5"]);

    let page = table.change_rows_per_page(3);

    assert_eq!(page, 2);
    assert_eq!(table.state().current_page(), 2);
    assert_eq!(table.state().rows_per_page(), 3);
    assert_eq!(view_keys(&table), vec!["4", "5"]);
    assert_eq!(
        *events.borrow(),
        vec![
            TableEvent::PageChanged {
                page: 3,
                total_rows: 5,
            },
            TableEvent::PageChanged {
                page: 2,
                total_rows: 5,
            },
            TableEvent::RowsPerPageChanged {
                rows_per_page: 3,
                page: 2,
            },
        ]
    );
}

#[test]
fn test_page_size_change_keeps_page_when_it_still_exists() {
    let config = TableConfig::default().with_pagination(true).with_per_page(2);
    let mut table = DataTable::new(columns(), people(), config);
    table.change_page(2);

    assert_eq!(table.change_rows_per_page(1), 2);
    assert_eq!(view_keys(&table), vec!["2"]);
}

#[test]
fn test_server_pagination_passes_rows_through() {
    let data: Vec<Record> = (1..=10)
        .map(|i| Record::new(format!("r{}", i)).set("n", i))
        .collect();
    let config = TableConfig::default()
        .with_pagination(true)
        .with_pagination_server(true)
        .with_total_rows(100)
        .with_default_page(5);
    let mut table = DataTable::new(vec![ColumnDef::field("N", "n")], data, config);
    let events = record_events(&mut table);

    assert_eq!(table.view().rows.len(), 10);
    assert_eq!(table.page_count(), 10);

    // 100 rows at 25 per page: page 5 no longer exists.
    let page = table.change_rows_per_page(25);

    assert_eq!(page, 4);
    assert_eq!(table.state().current_page(), 4);
    assert_eq!(table.page_count(), 4);
    assert_eq!(
        *events.borrow(),
        vec![TableEvent::RowsPerPageChanged {
            rows_per_page: 25,
            page: 4,
        }]
    );

    let view = table.view();
    let pagination = view.pagination.as_ref().unwrap();
    assert_eq!(pagination.row_count, 100);
    assert_eq!(pagination.page_count, 4);
}

#[test]
fn test_server_pagination_without_total_keeps_page() {
    let config = TableConfig::default()
        .with_pagination(true)
        .with_pagination_server(true)
        .with_default_page(7);
    let mut table = DataTable::new(columns(), people(), config);
    let events = record_events(&mut table);

    assert_eq!(table.change_rows_per_page(50), 7);
    assert_eq!(table.state().current_page(), 7);
    assert_eq!(
        *events.borrow(),
        vec![TableEvent::RowsPerPageChanged {
            rows_per_page: 50,
            page: 7,
        }]
    );
}

#[test]
fn test_server_total_reported_in_page_events() {
    let config = TableConfig::default()
        .with_pagination(true)
        .with_pagination_server(true)
        .with_total_rows(40);
    let mut table = DataTable::new(columns(), people(), config);
    let events = record_events(&mut table);

    table.change_page(3);
    table.set_total_rows(Some(0));
    table.change_page(1);

    assert_eq!(
        *events.borrow(),
        vec![
            TableEvent::PageChanged {
                page: 3,
                total_rows: 40,
            },
            TableEvent::PageChanged {
                page: 1,
                total_rows: 5,
            },
        ]
    );
}

// ============================================================================
// View
// ============================================================================

#[test]
fn test_view_progress_hides_pagination() {
    let config = TableConfig::default()
        .with_pagination(true)
        .with_progress_pending(true);
    let mut table = DataTable::new(columns(), people(), config);

    {
        let view = table.view();
        assert_eq!(view.body, Body::Progress);
        assert!(view.rows.is_empty());
        assert!(view.pagination.is_none());
    }

    table.set_progress_pending(false);
    let view = table.view();
    assert_eq!(view.body, Body::Rows);
    assert!(view.pagination.is_some());
}

#[test]
fn test_view_empty_dataset() {
    let config = TableConfig::default().with_pagination(true);
    let table = DataTable::new(columns(), Vec::new(), config);

    let view = table.view();
    assert_eq!(view.body, Body::Empty);
    assert!(view.pagination.is_none());
    assert_eq!(table.page_count(), 1);
}

#[test]
fn test_view_without_pagination_shows_all_rows() {
    let table = DataTable::new(columns(), people(), TableConfig::default().with_per_page(2));

    let view = table.view();
    assert_eq!(view.rows.len(), 5);
    assert!(view.pagination.is_none());
}

#[test]
fn test_view_pagination_details() {
    let config = TableConfig::default()
        .with_pagination(true)
        .with_per_page(2)
        .with_rows_per_page_options(vec![2, 4]);
    let table = DataTable::new(columns(), people(), config);

    let view = table.view();
    let pagination = view.pagination.unwrap();
    assert_eq!(pagination.current_page, 1);
    assert_eq!(pagination.rows_per_page, 2);
    assert_eq!(pagination.row_count, 5);
    assert_eq!(pagination.page_count, 3);
    assert_eq!(pagination.rows_per_page_options, vec![2, 4]);
}

#[test]
fn test_row_key_hint() {
    let data = vec![
        Record::new("a").set("id", 11i64),
        Record::new("b").set("id", Value::Null),
    ];
    let table = DataTable::new(columns(), data, TableConfig::default());
    let view = table.view();

    assert_eq!(view.row_key_hint(view.rows[0], 0), "11");
    assert_eq!(view.row_key_hint(view.rows[1], 1), "1");
}

// ============================================================================
// Data replacement
// ============================================================================

#[test]
fn test_set_data_clears_selection() {
    let mut table = DataTable::new(columns(), people(), TableConfig::default().selectable());
    table.select_all();
    let events = record_events(&mut table);

    table.set_data(people().into_iter().take(2).collect());

    assert_eq!(table.state().selected_count(), 0);
    assert!(!table.state().all_selected());
    assert_eq!(names(&events), vec!["table_updated"]);
}

#[test]
fn test_set_data_without_selection_is_silent() {
    let mut table = DataTable::new(columns(), people(), TableConfig::default());
    let events = record_events(&mut table);

    table.set_data(people());

    assert!(events.borrow().is_empty());
}

#[test]
fn test_set_data_resorts() {
    let config = TableConfig::default().with_default_sort("age", true);
    let mut table = DataTable::new(columns(), people(), config);

    table.set_data(vec![
        Record::new("x").set("age", 90i64),
        Record::new("y").set("age", 10i64),
    ]);

    assert_eq!(view_keys(&table), vec!["y", "x"]);
}

#[test]
fn test_set_columns_keeps_sort_by_id() {
    let config = TableConfig::default().with_default_sort("age", true);
    let mut table = DataTable::new(columns(), people(), config);

    table.set_columns(vec![
        ColumnDef::field("Years", "age").sortable(),
        ColumnDef::field("Name", "name").sortable(),
    ]);

    assert_eq!(table.columns()[0].id, ColumnId::from("age"));
    assert_eq!(view_keys(&table), vec!["4", "2", "1", "3", "5"]);
}

// ============================================================================
// Expansion
// ============================================================================

fn expandable_rows() -> Vec<Record> {
    vec![
        Record::new("1").set("open", true),
        Record::new("2").set("locked", true),
        Record::new("3"),
    ]
}

fn expandable_config() -> TableConfig {
    TableConfig::default()
        .expandable()
        .with_default_expanded_field("open")
        .with_expandable_disabled_field("locked")
}

#[test]
fn test_default_expanded_rows() {
    let table = DataTable::new(columns(), expandable_rows(), expandable_config());

    assert!(table.is_row_expanded(&table.data()[0]));
    assert!(!table.is_row_expanded(&table.data()[2]));
}

#[test]
fn test_toggle_row_expanded() {
    let mut table = DataTable::new(columns(), expandable_rows(), expandable_config());
    let events = record_events(&mut table);
    let row = table.data()[2].clone();

    assert_eq!(table.toggle_row_expanded(&row), Some(true));
    assert!(table.view().is_row_expanded(&row));
    assert_eq!(table.toggle_row_expanded(&row), Some(false));

    assert_eq!(
        *events.borrow(),
        vec![
            TableEvent::RowExpandToggled {
                key: "3".to_string(),
                expanded: true,
            },
            TableEvent::RowExpandToggled {
                key: "3".to_string(),
                expanded: false,
            },
        ]
    );
}

#[test]
fn test_expansion_disabled_for_row() {
    let mut table = DataTable::new(columns(), expandable_rows(), expandable_config());
    let row = table.data()[1].clone();

    assert!(table.view().is_row_expand_disabled(&row));
    assert_eq!(table.toggle_row_expanded(&row), None);
    assert!(!table.is_row_expanded(&row));
}

#[test]
fn test_expansion_off_for_table() {
    let mut table = DataTable::new(columns(), expandable_rows(), TableConfig::default());
    let row = table.data()[0].clone();

    assert!(!table.is_row_expanded(&row));
    assert_eq!(table.toggle_row_expanded(&row), None);
}

#[test]
fn test_set_data_keeps_expansion_for_known_keys() {
    let mut table = DataTable::new(columns(), expandable_rows(), expandable_config());
    let row = table.data()[0].clone();
    table.toggle_row_expanded(&row);

    table.set_data(vec![
        Record::new("1").set("open", true),
        Record::new("4").set("open", true),
    ]);

    // Row 1 was collapsed by the user; row 4 is new.
    assert!(!table.is_row_expanded(&table.data()[0]));
    assert!(table.is_row_expanded(&table.data()[1]));
}

// ============================================================================
// Dirty flag
// ============================================================================

#[test]
fn test_dirty_flag() {
    let mut table = DataTable::new(columns(), people(), TableConfig::default());
    assert!(table.is_dirty());

    table.clear_dirty();
    assert!(!table.is_dirty());

    table.change_page(2);
    assert!(table.is_dirty());

    table.clear_dirty();
    table.sort_by(&ColumnId::from("notes"));
    assert!(!table.is_dirty());
}
