//! Pagination Bar
//!
//! Page size selector, range summary and prev/next buttons for the gpui view.

use std::rc::Rc;

use gpui::{
    App, ClickEvent, ElementId, InteractiveElement, IntoElement, ParentElement, RenderOnce,
    SharedString, StatefulInteractiveElement, Styled, Window, div, prelude::*,
};

use super::display::PaginationControls;
use super::state::TableAction;
use crate::theme::TableColors;

type ActionHandler = Rc<dyn Fn(&TableAction, &mut Window, &mut App) + 'static>;

/// Pagination bar
#[derive(IntoElement)]
pub struct PaginationBar {
    controls: PaginationControls,
    locale: SharedString,
    on_action: Option<ActionHandler>,
}

impl PaginationBar {
    pub fn new(controls: PaginationControls, locale: impl Into<SharedString>) -> Self {
        Self {
            controls,
            locale: locale.into(),
            on_action: None,
        }
    }

    /// Set the handler receiving the bar's table actions
    pub fn on_action(mut self, handler: impl Fn(&TableAction, &mut Window, &mut App) + 'static) -> Self {
        self.on_action = Some(Rc::new(handler));
        self
    }

    fn click_handler(
        &self,
        actions: Vec<TableAction>,
    ) -> Option<impl Fn(&ClickEvent, &mut Window, &mut App) + 'static> {
        let handler = self.on_action.clone()?;
        Some(move |_: &ClickEvent, window: &mut Window, cx: &mut App| {
            for action in &actions {
                handler(action, window, cx);
            }
        })
    }

    fn nav_button(&self, id: &'static str, label: String, disabled: bool, action: TableAction) -> impl IntoElement {
        let mut btn = div()
            .id(id)
            .px_2()
            .py_1()
            .rounded_sm()
            .text_sm()
            .text_color(if disabled {
                TableColors::text_muted()
            } else {
                TableColors::text_primary()
            })
            .child(label);

        if !disabled {
            btn = btn
                .cursor_pointer()
                .hover(|s| s.bg(TableColors::row_hover()));
            if let Some(on_click) = self.click_handler(vec![action]) {
                btn = btn.on_click(on_click);
            }
        }

        btn
    }

    fn page_size_option(&self, size: usize) -> impl IntoElement {
        let selected = size == self.controls.page_size;
        let mut option = div()
            .id(ElementId::Name(format!("page-size-{size}").into()))
            .px_2()
            .py_1()
            .rounded_sm()
            .text_sm()
            .cursor_pointer()
            .child(size.to_string());

        option = if selected {
            option
                .bg(TableColors::accent())
                .text_color(TableColors::text_on_accent())
        } else {
            option
                .text_color(TableColors::text_primary())
                .hover(|s| s.bg(TableColors::row_hover()))
        };

        if let Some(on_click) = self.click_handler(self.controls.select_page_size(size).to_vec()) {
            option = option.on_click(on_click);
        }
        option
    }
}

impl RenderOnce for PaginationBar {
    fn render(self, _window: &mut Window, _cx: &mut App) -> impl IntoElement {
        let locale = self.locale.clone();
        let c = &self.controls;

        div()
            .w_full()
            .px_4()
            .py_2()
            .flex()
            .items_center()
            .justify_between()
            .border_t_1()
            .border_color(TableColors::border())
            // Page size selector
            .child(
                div()
                    .flex()
                    .items_center()
                    .gap_1()
                    .child(
                        div()
                            .text_sm()
                            .text_color(TableColors::text_secondary())
                            .child(c.page_size_label(&locale)),
                    )
                    .children(c.page_size_options.iter().map(|&size| self.page_size_option(size))),
            )
            // Range summary and navigation
            .child(
                div()
                    .flex()
                    .items_center()
                    .gap_2()
                    .child(
                        div()
                            .text_sm()
                            .text_color(TableColors::text_primary())
                            .child(c.summary(&locale)),
                    )
                    .child(self.nav_button(
                        "prev-page",
                        crate::states::i18n_table(&locale, "previous"),
                        c.is_prev_disabled,
                        c.prev_page(),
                    ))
                    .child(self.nav_button(
                        "next-page",
                        crate::states::i18n_table(&locale, "next"),
                        c.is_next_disabled,
                        c.next_page(),
                    )),
            )
    }
}
