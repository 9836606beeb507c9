use crate::models::Dashboard;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Seed document compiled into the binary, used when no other seed is found.
pub const DEFAULT_SEED: &str = include_str!("../data/widgets.json");

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid seed document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate category id `{0}`")]
    DuplicateCategory(String),
    #[error("duplicate widget id `{0}`")]
    DuplicateWidget(String),
    #[error("widget `{widget}` dataset {dataset} has {values} values for {labels} labels")]
    LengthMismatch {
        widget: String,
        dataset: usize,
        labels: usize,
        values: usize,
    },
}

/// Where the seed came from, for the startup log line.
#[derive(Debug, Clone, PartialEq)]
pub enum SeedSource {
    File(PathBuf),
    Embedded,
}

/// Resolve and load the seed: explicit path, then the user config dir, then the embedded copy.
pub fn load_seed(path: Option<&str>) -> Result<(Dashboard, SeedSource), SeedError> {
    if let Some(path) = path {
        let expanded = PathBuf::from(shellexpand::tilde(path).into_owned());
        let dashboard = load_seed_file(&expanded)?;
        return Ok((dashboard, SeedSource::File(expanded)));
    }

    if let Some(user_seed) = user_seed_path().filter(|p| p.exists()) {
        let dashboard = load_seed_file(&user_seed)?;
        return Ok((dashboard, SeedSource::File(user_seed)));
    }

    Ok((parse_seed(DEFAULT_SEED)?, SeedSource::Embedded))
}

pub fn user_seed_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("cnapp-dash").join("widgets.json"))
}

pub fn load_seed_file(path: &Path) -> Result<Dashboard, SeedError> {
    let contents = fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_seed(&contents)
}

pub fn parse_seed(json: &str) -> Result<Dashboard, SeedError> {
    let dashboard: Dashboard = serde_json::from_str(json)?;
    validate(&dashboard)?;
    Ok(dashboard)
}

fn validate(dashboard: &Dashboard) -> Result<(), SeedError> {
    let mut category_ids = HashSet::new();
    let mut widget_ids = HashSet::new();

    for category in &dashboard.categories {
        if !category_ids.insert(category.id.as_str()) {
            return Err(SeedError::DuplicateCategory(category.id.clone()));
        }

        for widget in &category.widgets {
            if !widget_ids.insert(widget.id.as_str()) {
                return Err(SeedError::DuplicateWidget(widget.id.clone()));
            }

            let labels = widget.data.labels.len();
            for (index, dataset) in widget.data.datasets.iter().enumerate() {
                if dataset.values.len() != labels {
                    return Err(SeedError::LengthMismatch {
                        widget: widget.id.clone(),
                        dataset: index,
                        labels,
                        values: dataset.values.len(),
                    });
                }
            }
        }
    }

    Ok(())
}
