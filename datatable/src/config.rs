//! Table configuration

use serde::Deserialize;
use serde::Serialize;

use crate::error::Result;
use crate::state::ClearToken;

/// Rows-per-page choices offered to the pagination widget by default.
pub const DEFAULT_ROWS_PER_PAGE_OPTIONS: [usize; 5] = [10, 15, 20, 25, 30];

/// Initialization-time options for a [`DataTable`](crate::table::DataTable).
///
/// Every option has a default. The configuration is read once when the table
/// is created; later changes go through the table's operations.
///
/// # Example
///
/// ```
/// use datatable::config::TableConfig;
///
/// let config = TableConfig::default()
///     .with_pagination(true)
///     .with_per_page(25)
///     .with_default_sort("name", false);
///
/// assert_eq!(config.pagination_per_page, 25);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableConfig {
    /// Field used as the rendering key of a row.
    ///
    /// A hint for the rendering layer only. Selection uses
    /// [`TableRow::key`](crate::model::TableRow::key).
    pub key_field: Option<String>,

    /// Enables pagination.
    ///
    /// Default: false
    pub pagination: bool,

    /// The caller fetches exactly one page at a time and owns page
    /// correctness. Rows are passed through without slicing.
    ///
    /// Default: false
    pub pagination_server: bool,

    /// Page shown when the table is created (1-based).
    ///
    /// Default: 1
    pub pagination_default_page: usize,

    /// Rows per page when the table is created.
    ///
    /// Default: 10
    pub pagination_per_page: usize,

    /// Total row count reported by a server. Overrides the dataset length
    /// for page math and events when non-zero.
    pub pagination_total_rows: Option<usize>,

    /// Rows-per-page choices for the pagination widget.
    pub pagination_rows_per_page_options: Vec<usize>,

    /// Column id sorted when the table is created.
    pub default_sort_field: Option<String>,

    /// Initial sort direction.
    ///
    /// Default: true (ascending)
    pub default_sort_asc: bool,

    /// Initial value of the external clear-selection token.
    pub clear_selected_rows: ClearToken,

    /// Show selection checkboxes.
    pub selectable_rows: bool,

    /// Rows can be expanded.
    pub expandable_rows: bool,

    /// Row field that, when truthy, marks a row as expanded on first sight.
    pub default_expanded_field: Option<String>,

    /// Row field that, when truthy, prevents a row from being expanded.
    pub expandable_disabled_field: Option<String>,

    /// Data is still loading. Shows the progress body and hides pagination.
    pub progress_pending: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            key_field: Some("id".to_string()),
            pagination: false,
            pagination_server: false,
            pagination_default_page: 1,
            pagination_per_page: 10,
            pagination_total_rows: None,
            pagination_rows_per_page_options: DEFAULT_ROWS_PER_PAGE_OPTIONS.to_vec(),
            default_sort_field: None,
            default_sort_asc: true,
            clear_selected_rows: ClearToken::default(),
            selectable_rows: false,
            expandable_rows: false,
            default_expanded_field: None,
            expandable_disabled_field: None,
            progress_pending: false,
        }
    }
}

impl TableConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a config from a JSON document with camelCase keys.
    ///
    /// Missing keys take their default values.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the rendering key field.
    pub fn with_key_field(mut self, field: impl Into<String>) -> Self {
        self.key_field = Some(field.into());
        self
    }

    /// Enables or disables pagination.
    pub fn with_pagination(mut self, enabled: bool) -> Self {
        self.pagination = enabled;
        self
    }

    /// Switches to server-managed pagination.
    pub fn with_pagination_server(mut self, server: bool) -> Self {
        self.pagination_server = server;
        self
    }

    /// Sets the initial page.
    pub fn with_default_page(mut self, page: usize) -> Self {
        self.pagination_default_page = page;
        self
    }

    /// Sets the initial rows per page.
    pub fn with_per_page(mut self, rows_per_page: usize) -> Self {
        self.pagination_per_page = rows_per_page;
        self
    }

    /// Sets the server-reported total row count.
    pub fn with_total_rows(mut self, total: usize) -> Self {
        self.pagination_total_rows = Some(total);
        self
    }

    /// Sets the rows-per-page choices.
    pub fn with_rows_per_page_options(mut self, options: Vec<usize>) -> Self {
        self.pagination_rows_per_page_options = options;
        self
    }

    /// Sets the initial sort column and direction.
    pub fn with_default_sort(mut self, field: impl Into<String>, asc: bool) -> Self {
        self.default_sort_field = Some(field.into());
        self.default_sort_asc = asc;
        self
    }

    /// Sets the initial clear-selection token.
    pub fn with_clear_selected_rows(mut self, token: ClearToken) -> Self {
        self.clear_selected_rows = token;
        self
    }

    /// Enables row selection.
    pub fn selectable(mut self) -> Self {
        self.selectable_rows = true;
        self
    }

    /// Enables row expansion.
    pub fn expandable(mut self) -> Self {
        self.expandable_rows = true;
        self
    }

    /// Sets the field that marks rows as expanded by default.
    pub fn with_default_expanded_field(mut self, field: impl Into<String>) -> Self {
        self.default_expanded_field = Some(field.into());
        self
    }

    /// Sets the field that disables expansion for a row.
    pub fn with_expandable_disabled_field(mut self, field: impl Into<String>) -> Self {
        self.expandable_disabled_field = Some(field.into());
        self
    }

    /// Marks the data as still loading.
    pub fn with_progress_pending(mut self, pending: bool) -> Self {
        self.progress_pending = pending;
        self
    }

    /// Row count used for page math: the server total when set and non-zero,
    /// otherwise the dataset length.
    pub fn row_count(&self, data_len: usize) -> usize {
        self.pagination_total_rows
            .filter(|&total| total > 0)
            .unwrap_or(data_len)
    }
}
