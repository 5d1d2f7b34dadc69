//! Data table widget.
//!
//! Renders the current page of a [`DataTable`]: header cells with sort
//! indicators, fixed and flexible column widths, the optional checkbox column
//! and the row cursor.

use crate::state::TableCursor;
use crate::table::{DataTable, TableRow};
use crate::view::constants::CHECKBOX_WIDTH;
use crate::view::styles::DashboardStyles;
use ratatui::{
    layout::{Constraint, Rect},
    text::Line,
    widgets::{Block, Cell, Row, Table, TableState},
    Frame,
};

/// Checkbox glyph for a selection cell.
pub fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

/// Header text with the active sort indicator appended.
pub fn header_label<T: TableRow>(table: &DataTable<T>, column_id: &str, header: &str) -> String {
    match table.sort_direction(column_id) {
        Some(direction) => format!("{header} {}", direction.indicator()),
        None => header.to_string(),
    }
}

fn aligned(text: String, centered: bool) -> Line<'static> {
    if centered {
        Line::from(text).centered()
    } else {
        Line::from(text)
    }
}

/// Column constraints: fixed widths where declared, the rest share the space.
pub fn column_widths<T: TableRow>(table: &DataTable<T>) -> Vec<Constraint> {
    let checkbox = table
        .options()
        .row_selection
        .then_some(Constraint::Length(CHECKBOX_WIDTH));
    checkbox
        .into_iter()
        .chain(
            table
                .columns()
                .iter()
                .map(|c| c.fixed_width().map_or(Constraint::Fill(1), Constraint::Length)),
        )
        .collect()
}

/// Draw the current page of `table` with the cursor and selection.
pub fn render_table<T: TableRow>(
    frame: &mut Frame,
    area: Rect,
    table: &DataTable<T>,
    cursor: TableCursor,
    block: Block<'_>,
    styles: &DashboardStyles,
) {
    let selectable = table.options().row_selection;

    let mut header: Vec<Cell> = Vec::with_capacity(table.columns().len() + 1);
    if selectable {
        let all = table.filtered_len() > 0 && table.is_all_selected();
        header.push(Cell::from(checkbox(all)).style(styles.table_header));
    }
    for (i, column) in table.columns().iter().enumerate() {
        let label = header_label(table, column.id(), column.header());
        let style = if i == cursor.column {
            styles.column_cursor
        } else {
            styles.table_header
        };
        header.push(Cell::from(aligned(label, column.is_centered())).style(style));
    }

    let rows: Vec<Row> = table
        .page_rows()
        .into_iter()
        .map(|(row_id, row)| {
            let selected = selectable && table.is_row_selected(row_id);
            let mut cells: Vec<Cell> = Vec::with_capacity(table.columns().len() + 1);
            if selectable {
                cells.push(Cell::from(checkbox(selected)));
            }
            cells.extend(
                table
                    .columns()
                    .iter()
                    .map(|c| Cell::from(aligned(c.render(row), c.is_centered()))),
            );
            let row = Row::new(cells);
            if selected {
                row.style(styles.selected_row)
            } else {
                row
            }
        })
        .collect();

    let has_rows = !rows.is_empty();
    let widget = Table::new(rows, column_widths(table))
        .header(Row::new(header))
        .block(block)
        .column_spacing(1)
        .row_highlight_style(styles.row_cursor);

    let mut state = TableState::default().with_selected(has_rows.then_some(cursor.row));
    frame.render_stateful_widget(widget, area, &mut state);
}
