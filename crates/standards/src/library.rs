use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use catalog::{Catalog, CatalogError, Record, Table, TableSpec};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::info;

use crate::specs;
use crate::{Guideline, PdfUaError, PdfUaTerm, ReadabilityMetric};

const WCAG_GUIDELINES_JSON: &str = include_str!("../data/wcag_guidelines.json");
const PDF_UA_ERRORS_JSON: &str = include_str!("../data/pdf_ua_errors.json");
const READABILITY_METRICS_JSON: &str = include_str!("../data/readability_metrics.json");
const PDF_UA_TERMS_JSON: &str = include_str!("../data/pdf_ua_terms.json");

#[derive(Debug, Error)]
pub enum StandardsError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{dataset}: invalid dataset JSON: {source}")]
    Json {
        dataset: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

pub type Result<T> = std::result::Result<T, StandardsError>;

/// Every dataset served by the site, in display order.
pub struct Library {
    tables: Vec<Arc<dyn Catalog>>,
}

impl Library {
    /// Datasets compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::load(None)
    }

    /// Built-in datasets, each replaced by `<data_dir>/<slug>.json` when
    /// that file exists.
    pub fn load(data_dir: Option<&Path>) -> Result<Self> {
        let tables = vec![
            load_table::<Guideline>(specs::WCAG_GUIDELINES, WCAG_GUIDELINES_JSON, data_dir)?,
            load_table::<PdfUaError>(specs::PDF_UA_ERRORS, PDF_UA_ERRORS_JSON, data_dir)?,
            load_table::<ReadabilityMetric>(specs::READABILITY_METRICS, READABILITY_METRICS_JSON, data_dir)?,
            load_table::<PdfUaTerm>(specs::PDF_UA_TERMS, PDF_UA_TERMS_JSON, data_dir)?,
        ];
        Ok(Self { tables })
    }

    pub fn get(&self, slug: &str) -> Option<Arc<dyn Catalog>> {
        self.tables.iter().find(|t| t.spec().slug == slug).cloned()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Catalog>> {
        self.tables.iter()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

fn load_table<R>(spec: TableSpec, builtin: &'static str, data_dir: Option<&Path>) -> Result<Arc<dyn Catalog>>
where
    R: Record + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    let override_path = data_dir.map(|dir| dir.join(format!("{}.json", spec.slug)));

    let (origin, text) = match override_path {
        Some(path) if path.is_file() => {
            let text = std::fs::read_to_string(&path)
                .map_err(|source| StandardsError::Io { path: path.clone(), source })?;
            (path.display().to_string(), Cow::Owned(text))
        }
        _ => ("built-in".to_string(), Cow::Borrowed(builtin)),
    };

    let records: Vec<R> = serde_json::from_str(&text)
        .map_err(|source| StandardsError::Json { dataset: spec.slug, source })?;
    let table = Table::new(spec, records)?;

    info!(
        dataset = spec.slug,
        records = table.len(),
        revision = %Catalog::revision(&table),
        source = %origin,
        "dataset loaded"
    );

    Ok(Arc::new(table))
}
