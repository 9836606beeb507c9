use crate::filter::FilteredView;
use crate::form::WidgetForm;
use crate::models::{Category, Dashboard, Widget};
use crate::store::DashboardStore;
use chrono::{DateTime, Duration, Utc};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Form,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
    pub at: DateTime<Utc>,
}

pub struct App {
    pub store: DashboardStore,
    pub query: String,
    pub input_mode: InputMode,
    pub form: WidgetForm,
    pub selected_category: usize,
    pub selected_widget: usize,
    pub catalog_open: bool,
    pub catalog_tab: usize,
    pub status: Option<StatusMessage>,
    pub status_ttl: Duration,
    pub should_quit: bool,
    view: FilteredView,
}

impl App {
    pub fn new(seed: Dashboard) -> Self {
        let mut app = Self {
            store: DashboardStore::new(seed),
            query: String::new(),
            input_mode: InputMode::Normal,
            form: WidgetForm::default(),
            selected_category: 0,
            selected_widget: 0,
            catalog_open: false,
            catalog_tab: 0,
            status: None,
            status_ttl: Duration::seconds(4),
            should_quit: false,
            view: FilteredView::new(),
        };
        app.refresh_view();
        app
    }

    /// Recompute the visible tree if needed and keep the selection in range.
    pub fn refresh_view(&mut self) {
        let visible = self.view.refresh(&self.store, &self.query);

        self.selected_category = self.selected_category.min(visible.len().saturating_sub(1));
        let widget_count = visible
            .get(self.selected_category)
            .map(|c| c.widgets.len())
            .unwrap_or(0);
        self.selected_widget = self.selected_widget.min(widget_count.saturating_sub(1));
    }

    /// Categories as of the last `refresh_view`
    pub fn visible(&self) -> &[Category] {
        self.view.categories()
    }

    pub fn current_category(&self) -> Option<&Category> {
        self.visible().get(self.selected_category)
    }

    pub fn current_widget(&self) -> Option<&Widget> {
        self.current_category()
            .and_then(|c| c.widgets.get(self.selected_widget))
    }

    pub fn on_tick(&mut self, now: DateTime<Utc>) {
        if let Some(status) = &self.status {
            if now - status.at >= self.status_ttl {
                self.status = None;
            }
        }
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.set_status(StatusLevel::Info, text.into());
    }

    pub fn warn(&mut self, text: impl Into<String>) {
        self.set_status(StatusLevel::Warning, text.into());
    }

    fn set_status(&mut self, level: StatusLevel, text: String) {
        self.status = Some(StatusMessage {
            level,
            text,
            at: Utc::now(),
        });
    }

    // Search

    pub fn start_search(&mut self) {
        self.input_mode = InputMode::Search;
    }

    pub fn finish_search(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn push_query_char(&mut self, c: char) {
        self.query.push(c);
        self.reset_selection();
    }

    pub fn pop_query_char(&mut self) {
        self.query.pop();
        self.reset_selection();
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
        self.reset_selection();
    }

    fn reset_selection(&mut self) {
        self.selected_category = 0;
        self.selected_widget = 0;
        self.refresh_view();
    }

    // Navigation

    pub fn next_category(&mut self) {
        let count = self.visible().len();
        if count > 0 {
            self.selected_category = (self.selected_category + 1) % count;
            self.selected_widget = 0;
        }
    }

    pub fn previous_category(&mut self) {
        let count = self.visible().len();
        if count > 0 {
            self.selected_category = (self.selected_category + count - 1) % count;
            self.selected_widget = 0;
        }
    }

    pub fn next_widget(&mut self) {
        let count = self.current_category().map(|c| c.widgets.len()).unwrap_or(0);
        if self.selected_widget + 1 < count {
            self.selected_widget += 1;
        }
    }

    pub fn previous_widget(&mut self) {
        self.selected_widget = self.selected_widget.saturating_sub(1);
    }

    pub fn toggle_catalog(&mut self) {
        self.catalog_open = !self.catalog_open;
    }

    pub fn next_catalog_tab(&mut self) {
        let count = self.store.categories().len();
        if count > 0 {
            self.catalog_tab = (self.catalog_tab + 1) % count;
        }
    }

    // Mutations

    pub fn open_form(&mut self) {
        let Some(category_id) = self.current_category().map(|c| c.id.clone()) else {
            self.warn("No category selected");
            return;
        };
        self.form.open(&category_id);
        self.input_mode = InputMode::Form;
    }

    pub fn cancel_form(&mut self) {
        self.form.cancel();
        self.input_mode = InputMode::Normal;
    }

    pub fn submit_form(&mut self, now: DateTime<Utc>) {
        match self.form.submit(&mut self.store, now) {
            Ok(id) => {
                self.input_mode = InputMode::Normal;
                self.refresh_view();
                self.info(format!("Added widget {}", id));
            }
            Err(e) => self.warn(e.to_string()),
        }
    }

    pub fn remove_selected_widget(&mut self) {
        let Some((category_id, widget_id, name)) = self.current_category().and_then(|c| {
            c.widgets
                .get(self.selected_widget)
                .map(|w| (c.id.clone(), w.id.clone(), w.name.clone()))
        }) else {
            self.warn("No widget selected");
            return;
        };

        if self.store.remove_widget(&category_id, &widget_id) {
            self.refresh_view();
            self.info(format!("Removed {}", name));
        } else {
            warn!(category = %category_id, widget = %widget_id, "selected widget vanished before removal");
            self.warn("Widget not found");
        }
    }
}
