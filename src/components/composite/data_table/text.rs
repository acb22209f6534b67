//! Text Output
//!
//! Lays out a [`TableView<String>`] as aligned plain text.

use super::data_table::{ReadyTable, TableBody, TableView};
use super::display::PaginationControls;
use crate::states::{i18n_range_summary, i18n_table};

const COLUMN_GAP: &str = "  ";

/// Render a table view to plain text using `locale` for built-in labels
pub fn render_text(view: &TableView<String>, locale: &str) -> String {
    let mut out = String::new();
    match view {
        TableView::Loading {
            title,
            create_action,
            indicator,
        } => {
            write_title(&mut out, title.as_deref(), create_action.as_deref());
            let indicator = indicator
                .clone()
                .unwrap_or_else(|| i18n_table(locale, "loading"));
            push_line(&mut out, &indicator);
        }
        TableView::Ready(ready) => write_ready(&mut out, ready, locale),
    }
    out
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

fn write_title(out: &mut String, title: Option<&str>, create_action: Option<&str>) {
    match (title, create_action) {
        (Some(title), Some(action)) => push_line(out, &format!("{title}{COLUMN_GAP}{action}")),
        (Some(line), None) | (None, Some(line)) => push_line(out, line),
        (None, None) => {}
    }
}

fn write_ready(out: &mut String, ready: &ReadyTable<String>, locale: &str) {
    write_title(out, ready.title.as_deref(), ready.create_action.as_deref());
    if let Some(filters) = &ready.filters_ui {
        push_line(out, filters);
    }

    let rows: &[Vec<String>] = match &ready.body {
        TableBody::Rows(rows) => rows,
        TableBody::Empty { .. } => &[],
    };
    let widths = column_widths(&ready.headers, rows);

    write_row(out, &ready.headers, &widths);
    let rule_width = widths.iter().sum::<usize>() + COLUMN_GAP.len() * widths.len().saturating_sub(1);
    push_line(out, &"-".repeat(rule_width));

    match &ready.body {
        TableBody::Rows(rows) => {
            for row in rows {
                write_row(out, row, &widths);
            }
        }
        TableBody::Empty { message, .. } => push_line(out, message),
    }

    if let Some(controls) = &ready.pagination {
        write_pagination(out, controls, locale);
    }
}

fn column_widths(headers: &[String], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    widths
}

fn write_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    push_line(out, line.trim_end());
}

fn write_pagination(out: &mut String, controls: &PaginationControls, locale: &str) {
    let previous = nav_label(&i18n_table(locale, "previous"), controls.is_prev_disabled);
    let next = nav_label(&i18n_table(locale, "next"), controls.is_next_disabled);
    let line = format!(
        "{} {}{COLUMN_GAP}{}{COLUMN_GAP}{previous} {next}",
        controls.page_size_label(locale),
        controls.page_size,
        i18n_range_summary(locale, &controls.range(), controls.scope_total()),
    );
    push_line(out, &line);
}

/// Disabled buttons are shown in parentheses
fn nav_label(label: &str, disabled: bool) -> String {
    if disabled {
        format!("({label})")
    } else {
        format!("[{label}]")
    }
}
