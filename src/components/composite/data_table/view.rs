//! DataTable View
//!
//! gpui entity wrapping a [`DataTable`] whose renderers produce elements.

use gpui::{
    AnyElement, AppContext, Context, Entity, FontWeight, IntoElement, ParentElement, Render,
    SharedString, Styled, Window, div, prelude::*, px,
};

use super::column::{CellValue, ColumnDef};
use super::data_table::{DataTable, ReadyTable, TableBody, TableView};
use super::pagination_bar::PaginationBar;
use super::state::TableAction;
use crate::constants::{DEFAULT_LOCALE, HEADER_HEIGHT, ROW_HEIGHT};
use crate::states::i18n_table;
use crate::theme::TableColors;

/// Column rendering a label header and the accessor value as text
pub fn text_column<T: 'static>(
    id: impl Into<String>,
    label: impl Into<SharedString>,
    accessor: impl Fn(&T) -> CellValue + 'static,
) -> ColumnDef<T, AnyElement> {
    let label = label.into();
    ColumnDef::new(
        id,
        accessor,
        move |_| label.clone().into_any_element(),
        |ctx| SharedString::from(ctx.value.to_string()).into_any_element(),
    )
}

/// DataTable view
pub struct DataTableView<T: 'static> {
    table: DataTable<T, AnyElement>,
    locale: SharedString,
}

impl<T: 'static> DataTableView<T> {
    pub fn new(table: DataTable<T, AnyElement>) -> Self {
        Self {
            table,
            locale: DEFAULT_LOCALE.into(),
        }
    }

    pub fn with_locale(mut self, locale: impl Into<SharedString>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn table(&self) -> &DataTable<T, AnyElement> {
        &self.table
    }

    /// Mutate the table and refresh
    pub fn update_table(
        &mut self,
        cx: &mut Context<Self>,
        f: impl FnOnce(&mut DataTable<T, AnyElement>),
    ) {
        f(&mut self.table);
        cx.notify();
    }

    /// Apply queued actions from collaborators holding a table handle
    pub fn commit(&mut self, cx: &mut Context<Self>) {
        if self.table.commit() > 0 {
            cx.notify();
        }
    }

    fn dispatch(&mut self, action: &TableAction, _window: &mut Window, cx: &mut Context<Self>) {
        self.table.dispatch(action.clone());
        cx.notify();
    }

    fn render_title(title: Option<String>, create_action: Option<AnyElement>) -> Option<impl IntoElement> {
        if title.is_none() && create_action.is_none() {
            return None;
        }
        Some(
            div()
                .w_full()
                .px_4()
                .py_2()
                .flex()
                .items_center()
                .justify_between()
                .child(
                    div()
                        .text_lg()
                        .font_weight(FontWeight::SEMIBOLD)
                        .text_color(TableColors::text_primary())
                        .children(title.map(SharedString::from)),
                )
                .children(create_action),
        )
    }

    fn render_header(headers: Vec<AnyElement>) -> impl IntoElement {
        div()
            .h(px(HEADER_HEIGHT))
            .w_full()
            .flex()
            .items_center()
            .bg(TableColors::header_bg())
            .border_b_1()
            .border_color(TableColors::border())
            .children(headers.into_iter().map(|header| {
                div()
                    .flex_1()
                    .px_3()
                    .text_sm()
                    .font_weight(FontWeight::MEDIUM)
                    .text_color(TableColors::text_primary())
                    .child(header)
            }))
    }

    fn render_row(cells: Vec<AnyElement>, index: usize) -> impl IntoElement {
        let bg = if index % 2 == 0 {
            TableColors::surface()
        } else {
            TableColors::row_alt()
        };

        div()
            .h(px(ROW_HEIGHT))
            .w_full()
            .flex()
            .items_center()
            .bg(bg)
            .border_b_1()
            .border_color(TableColors::border())
            .children(cells.into_iter().map(|cell| {
                div()
                    .flex_1()
                    .px_3()
                    .text_sm()
                    .text_color(TableColors::text_primary())
                    .overflow_hidden()
                    .child(cell)
            }))
    }

    fn render_message(message: impl IntoElement) -> impl IntoElement {
        div()
            .flex_1()
            .flex()
            .items_center()
            .justify_center()
            .py_4()
            .text_color(TableColors::text_muted())
            .child(message)
    }

    fn render_ready(&self, ready: ReadyTable<AnyElement>, cx: &mut Context<Self>) -> AnyElement {
        let ReadyTable {
            title,
            create_action,
            filters_ui,
            headers,
            body,
            pagination,
        } = ready;

        let body = match body {
            TableBody::Rows(rows) => div()
                .id("data-table-rows")
                .flex_1()
                .overflow_y_scroll()
                .children(
                    rows.into_iter()
                        .enumerate()
                        .map(|(i, cells)| Self::render_row(cells, i)),
                )
                .into_any_element(),
            TableBody::Empty { message, .. } => {
                Self::render_message(SharedString::from(message)).into_any_element()
            }
        };

        let pagination = pagination.map(|controls| {
            PaginationBar::new(controls, self.locale.clone()).on_action(cx.listener(Self::dispatch))
        });

        div()
            .size_full()
            .flex()
            .flex_col()
            .bg(TableColors::surface())
            .border_1()
            .border_color(TableColors::border())
            .rounded_md()
            .overflow_hidden()
            .children(Self::render_title(title, create_action))
            .children(filters_ui)
            .child(Self::render_header(headers))
            .child(body)
            .children(pagination)
            .into_any_element()
    }
}

impl<T: 'static> Render for DataTableView<T> {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        self.table.commit();

        match self.table.render() {
            TableView::Loading {
                title,
                create_action,
                indicator,
            } => {
                let indicator = indicator.unwrap_or_else(|| {
                    SharedString::from(i18n_table(&self.locale, "loading")).into_any_element()
                });
                div()
                    .size_full()
                    .flex()
                    .flex_col()
                    .bg(TableColors::surface())
                    .children(Self::render_title(title, create_action))
                    .child(Self::render_message(indicator))
                    .into_any_element()
            }
            TableView::Ready(ready) => self.render_ready(ready, cx),
        }
    }
}

/// Helper to create a DataTableView entity
pub fn data_table_view<T: 'static, V: 'static>(
    table: DataTable<T, AnyElement>,
    cx: &mut Context<V>,
) -> Entity<DataTableView<T>> {
    cx.new(|_| DataTableView::new(table))
}
