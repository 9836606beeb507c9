use crate::models::Category;
use crate::store::DashboardStore;
use tracing::debug;

/// Keep only widgets whose name contains `query`, ignoring case, and drop
/// categories left empty. An empty query returns every category untouched.
pub fn filter_categories(categories: &[Category], query: &str) -> Vec<Category> {
    if query.is_empty() {
        return categories.to_vec();
    }

    let needle = query.to_lowercase();
    categories
        .iter()
        .filter_map(|category| {
            let widgets: Vec<_> = category
                .widgets
                .iter()
                .filter(|w| w.name.to_lowercase().contains(&needle))
                .cloned()
                .collect();

            if widgets.is_empty() {
                None
            } else {
                Some(Category {
                    id: category.id.clone(),
                    name: category.name.clone(),
                    widgets,
                })
            }
        })
        .collect()
}

/// The visible subtree, recomputed whenever the store version or the query changes.
#[derive(Debug, Default)]
pub struct FilteredView {
    key: Option<(u64, String)>,
    categories: Vec<Category>,
}

impl FilteredView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refresh(&mut self, store: &DashboardStore, query: &str) -> &[Category] {
        let stale = match &self.key {
            Some((version, last_query)) => *version != store.version() || last_query != query,
            None => true,
        };

        if stale {
            self.categories = filter_categories(store.categories(), query);
            self.key = Some((store.version(), query.to_string()));
            debug!(
                query,
                version = store.version(),
                visible = self.categories.len(),
                "recomputed visible categories"
            );
        }

        &self.categories
    }

    /// The result of the last `refresh`.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }
}
