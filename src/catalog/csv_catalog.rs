//! Csv catalog feed with header `id,cpu,memory,hourly_price`.

use std::path::Path;

use serde::Deserialize;

use crate::catalog::Catalog;
use crate::core::error::FeedError;
use crate::core::node_type::NodeType;

#[derive(Debug, Deserialize, PartialEq)]
struct CatalogRow {
    id: String,
    cpu: f64,
    memory: f64, // in GiB
    hourly_price: f64,
}

pub fn catalog_from_csv_str(catalog_str: &str) -> Result<Catalog, FeedError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(catalog_str.as_bytes());

    let mut node_types = vec![];
    for row in csv_reader.deserialize() {
        let row: CatalogRow = row?;
        node_types.push(NodeType::new(row.id, row.cpu, row.memory, row.hourly_price));
    }
    Ok(Catalog::new(node_types)?)
}

pub fn read_catalog_from_csv_file(path: &Path) -> Result<Catalog, FeedError> {
    let catalog_str = std::fs::read_to_string(path)?;
    catalog_from_csv_str(&catalog_str)
}
