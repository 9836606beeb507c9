use crate::models::{Category, Dashboard, Widget};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("Category not found")]
    CategoryNotFound(String),
    #[error("A widget with id `{0}` already exists")]
    DuplicateWidget(String),
}

/// The single authoritative category tree for a session.
///
/// Every successful mutation swaps in a new snapshot and bumps the version, so
/// anything still holding an older `Arc<Dashboard>` keeps seeing the old tree.
#[derive(Debug, Clone)]
pub struct DashboardStore {
    current: Arc<Dashboard>,
    version: u64,
}

impl DashboardStore {
    pub fn new(seed: Dashboard) -> Self {
        Self {
            current: Arc::new(seed),
            version: 0,
        }
    }

    pub fn snapshot(&self) -> Arc<Dashboard> {
        Arc::clone(&self.current)
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn categories(&self) -> &[Category] {
        &self.current.categories
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.current.category(id)
    }

    pub fn contains_widget(&self, widget_id: &str) -> bool {
        self.current.contains_widget(widget_id)
    }

    /// Append `widget` to the category `category_id`.
    pub fn add_widget(&mut self, widget: Widget, category_id: &str) -> Result<(), StoreError> {
        let index = self
            .current
            .categories
            .iter()
            .position(|c| c.id == category_id)
            .ok_or_else(|| StoreError::CategoryNotFound(category_id.to_string()))?;

        if self.contains_widget(&widget.id) {
            return Err(StoreError::DuplicateWidget(widget.id));
        }

        info!(category = category_id, widget = %widget.id, "adding widget");
        let next = self.next_snapshot();
        next.categories[index].widgets.push(widget);
        Ok(())
    }

    /// Remove a widget. Returns `false`, leaving the snapshot untouched, when nothing matched.
    pub fn remove_widget(&mut self, category_id: &str, widget_id: &str) -> bool {
        let position = self.current.categories.iter().enumerate().find_map(|(ci, c)| {
            if c.id != category_id {
                return None;
            }
            c.widgets.iter().position(|w| w.id == widget_id).map(|wi| (ci, wi))
        });

        let Some((ci, wi)) = position else {
            debug!(category = category_id, widget = widget_id, "remove matched nothing");
            return false;
        };

        info!(category = category_id, widget = widget_id, "removing widget");
        let next = self.next_snapshot();
        next.categories[ci].widgets.remove(wi);
        true
    }

    // Copy-on-write: clones only while an older snapshot is still shared.
    fn next_snapshot(&mut self) -> &mut Dashboard {
        self.version += 1;
        Arc::make_mut(&mut self.current)
    }
}
