use std::collections::BTreeSet;

use serde::Serialize;

use crate::export::{self, CsvExport};
use crate::filter::{self, FilterState};
use crate::paginate::{paginate, PageInfo};
use crate::{CatalogError, Record, Result};

/// One categorical filter dimension.
#[derive(Clone, Copy, Debug)]
pub struct CriterionSpec {
    /// URL query key.
    pub key: &'static str,
    /// Record field it constrains.
    pub field: &'static str,
    pub label: &'static str,
    /// Fixed, ordered domain. `None` derives options from the data.
    pub options: Option<&'static [&'static str]>,
}

#[derive(Clone, Copy, Debug)]
pub struct Column {
    pub header: &'static str,
    pub field: &'static str,
}

/// Everything that distinguishes one reference table from another.
#[derive(Clone, Copy, Debug)]
pub struct TableSpec {
    pub slug: &'static str,
    pub title: &'static str,
    pub search_fields: &'static [&'static str],
    pub criteria: &'static [CriterionSpec],
    pub columns: &'static [Column],
    pub export_filename: &'static str,
    pub page_size: usize,
}

impl TableSpec {
    pub fn criterion(&self, key: &str) -> Option<&CriterionSpec> {
        self.criteria.iter().find(|c| c.key == key)
    }

    /// Fields every record must carry: searched fields and criterion fields.
    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.search_fields.iter().copied().chain(self.criteria.iter().map(|c| c.field))
    }
}

/// One page of a filtered table.
#[derive(Debug)]
pub struct TableView<'a, R> {
    pub rows: Vec<&'a R>,
    pub page: PageInfo,
}

/// A validated dataset together with its spec.
pub struct Table<R> {
    spec: TableSpec,
    records: Vec<R>,
    revision: String,
}

impl<R: Record + Serialize> Table<R> {
    /// Validate `records` against `spec` and fingerprint their content.
    pub fn new(spec: TableSpec, records: Vec<R>) -> Result<Self> {
        if spec.page_size == 0 {
            return Err(CatalogError::InvalidPageSize);
        }
        for (index, record) in records.iter().enumerate() {
            if let Some(field) = spec.required_fields().find(|f| record.field(f).is_none()) {
                return Err(CatalogError::MissingField {
                    dataset: spec.slug.to_string(),
                    index,
                    field: field.to_string(),
                });
            }
        }
        let revision = content_revision(&records)?;
        Ok(Self { spec, records, revision })
    }
}

/// Hex blake3 over each record's JSON followed by a newline.
fn content_revision<R: Serialize>(records: &[R]) -> Result<String> {
    let mut hasher = blake3::Hasher::new();
    for record in records {
        let bytes = serde_json::to_vec(record).map_err(|e| CatalogError::Ser(e.to_string()))?;
        hasher.update(&bytes);
        hasher.update(b"\n");
    }
    Ok(hex::encode(hasher.finalize().as_bytes()))
}

impl<R: Record> Table<R> {
    pub fn spec(&self) -> &TableSpec {
        &self.spec
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn filter(&self, state: &FilterState) -> Vec<&R> {
        filter::apply(&self.records, &self.spec, state)
    }

    pub fn view(&self, state: &FilterState) -> TableView<'_, R> {
        let filtered = self.filter(state);
        let page = paginate(&filtered, self.spec.page_size, state.page);
        TableView { rows: page.items.to_vec(), page: page.info }
    }

    /// Options offered for criterion `key`.
    pub fn facet(&self, key: &str) -> Vec<String> {
        let Some(criterion) = self.spec.criterion(key) else { return vec![] };
        if let Some(options) = criterion.options {
            return options.iter().map(|o| o.to_string()).collect();
        }
        let distinct: BTreeSet<&str> = self
            .records
            .iter()
            .filter_map(|r| r.field(criterion.field))
            .flat_map(|v| v.values())
            .collect();
        distinct.into_iter().map(str::to_string).collect()
    }

    /// CSV of the whole filtered view, ignoring the page.
    pub fn export(&self, state: &FilterState) -> Result<CsvExport> {
        export::to_csv(&self.spec, &self.filter(state))
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct CriterionInfo {
    pub key: &'static str,
    pub label: &'static str,
    pub options: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct DatasetInfo {
    pub slug: &'static str,
    pub title: &'static str,
    pub total_records: usize,
    pub page_size: usize,
    pub search_fields: &'static [&'static str],
    pub criteria: Vec<CriterionInfo>,
    pub columns: Vec<&'static str>,
    pub export_filename: &'static str,
    pub revision: String,
}

/// A page with rows rendered as JSON.
#[derive(Clone, Debug, Serialize)]
pub struct PageResponse {
    pub page: PageInfo,
    pub rows: Vec<serde_json::Value>,
}

/// Type-erased table so heterogeneous datasets can share one registry.
pub trait Catalog: Send + Sync {
    fn spec(&self) -> &TableSpec;
    fn info(&self) -> DatasetInfo;
    /// Hex blake3 over the serialized records; stable for unchanged content.
    fn revision(&self) -> &str;
    fn page(&self, state: &FilterState) -> Result<PageResponse>;
    fn export(&self, state: &FilterState) -> Result<CsvExport>;
}

impl<R> Catalog for Table<R>
where
    R: Record + Serialize + Send + Sync,
{
    fn spec(&self) -> &TableSpec {
        &self.spec
    }

    fn info(&self) -> DatasetInfo {
        DatasetInfo {
            slug: self.spec.slug,
            title: self.spec.title,
            total_records: self.records.len(),
            page_size: self.spec.page_size,
            search_fields: self.spec.search_fields,
            criteria: self
                .spec
                .criteria
                .iter()
                .map(|c| CriterionInfo { key: c.key, label: c.label, options: self.facet(c.key) })
                .collect(),
            columns: self.spec.columns.iter().map(|c| c.header).collect(),
            export_filename: self.spec.export_filename,
            revision: self.revision().to_string(),
        }
    }

    fn revision(&self) -> &str {
        &self.revision
    }

    fn page(&self, state: &FilterState) -> Result<PageResponse> {
        let view = self.view(state);
        let rows = view
            .rows
            .iter()
            .map(|r| serde_json::to_value(r).map_err(|e| CatalogError::Ser(e.to_string())))
            .collect::<Result<Vec<_>>>()?;
        Ok(PageResponse { page: view.page, rows })
    }

    fn export(&self, state: &FilterState) -> Result<CsvExport> {
        Table::export(self, state)
    }
}
