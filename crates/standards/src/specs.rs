//! Table descriptors for the built-in datasets.

use catalog::{Column, CriterionSpec, TableSpec};

pub const SEVERITIES: &[&str] = &["Error", "Warning", "Need manual"];
pub const LEVELS: &[&str] = &["A", "AA", "AAA"];

pub const WCAG_GUIDELINES: TableSpec = TableSpec {
    slug: "wcag-guidelines",
    title: "WCAG 2.2 Success Criteria",
    search_fields: &["id", "principle", "guideline", "summary"],
    criteria: &[
        CriterionSpec { key: "level", field: "level", label: "Level", options: Some(LEVELS) },
        CriterionSpec { key: "principle", field: "principle", label: "Principle", options: None },
        CriterionSpec { key: "version", field: "version", label: "WCAG version", options: None },
        CriterionSpec { key: "tag", field: "tags", label: "Tag", options: None },
        CriterionSpec { key: "impact", field: "impacts", label: "Impact", options: None },
    ],
    columns: &[
        Column { header: "Criterion", field: "id" },
        Column { header: "Principle", field: "principle" },
        Column { header: "Guideline", field: "guideline" },
        Column { header: "Level", field: "level" },
        Column { header: "Version", field: "version" },
        Column { header: "Summary", field: "summary" },
        Column { header: "Tags", field: "tags" },
        Column { header: "Impacts", field: "impacts" },
        Column { header: "Reference", field: "w3c_link" },
    ],
    export_filename: "wcag-guidelines.csv",
    page_size: 10,
};

pub const PDF_UA_ERRORS: TableSpec = TableSpec {
    slug: "pdf-ua-errors",
    title: "PDF/UA Compliance Errors",
    search_fields: &["code", "message"],
    criteria: &[
        CriterionSpec { key: "category", field: "category", label: "Category", options: None },
        CriterionSpec { key: "severity", field: "severity", label: "Severity", options: Some(SEVERITIES) },
    ],
    columns: &[
        Column { header: "Category", field: "category" },
        Column { header: "Code", field: "code" },
        Column { header: "Severity", field: "severity" },
        Column { header: "Message", field: "message" },
        Column { header: "Guideline", field: "guideline" },
        Column { header: "Fix Hint", field: "fix_hint" },
    ],
    export_filename: "pdf-ua-errors.csv",
    page_size: 15,
};

pub const READABILITY_METRICS: TableSpec = TableSpec {
    slug: "readability-metrics",
    title: "Readability Metrics",
    search_fields: &["name", "description", "api_key", "notes"],
    criteria: &[
        CriterionSpec { key: "category", field: "category", label: "Category", options: None },
        CriterionSpec { key: "subcategory", field: "subcategory", label: "Subcategory", options: None },
    ],
    columns: &[
        Column { header: "Category", field: "category" },
        Column { header: "Subcategory", field: "subcategory" },
        Column { header: "Metric/Functionality Name", field: "name" },
        Column { header: "API Variable Name (key)", field: "api_key" },
        Column { header: "Description", field: "description" },
        Column { header: "Interpretation Notes / Guidelines", field: "notes" },
    ],
    export_filename: "readability-metrics.csv",
    page_size: 10,
};

pub const PDF_UA_TERMS: TableSpec = TableSpec {
    slug: "pdf-ua-terms",
    title: "PDF/UA Core Terminology",
    search_fields: &["term", "description", "importance"],
    criteria: &[],
    columns: &[
        Column { header: "Term / Guideline", field: "term" },
        Column { header: "Description", field: "description" },
        Column { header: "Importance for Accessibility", field: "importance" },
    ],
    export_filename: "pdf-ua-terms.csv",
    page_size: 10,
};
