//! In-memory order snapshot, loaded once at startup

mod workbook;

use std::path::Path;
use std::sync::Arc;
use log::{error, info, warn};
use crate::server::model::record::OrderRecord;

/// Immutable, cheaply cloneable handle to the loaded orders.
#[derive(Debug, Clone)]
pub(crate) struct RecordStore(Arc<[OrderRecord]>);

impl RecordStore {
    /// Load the orders workbook. A missing or unreadable file yields an empty store.
    pub fn load(path: &Path) -> Self {
        if !path.is_file() {
            warn!("'{}' not found, serving an empty order set", path.display());
            return Self::default();
        }
        match workbook::read_orders(path) {
            Ok(records) => {
                info!("Loaded {} records from '{}'", records.len(), path.display());
                Self::from(records)
            }
            Err(e) => {
                error!("Failed to read orders file: {:#}", e);
                Self::default()
            }
        }
    }

    pub fn records(&self) -> &[OrderRecord] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::from(Vec::new())
    }
}

impl From<Vec<OrderRecord>> for RecordStore {
    fn from(records: Vec<OrderRecord>) -> Self {
        Self(records.into())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::server::model::record::FieldValue;
    use std::io::Write;

    #[test]
    fn missing_file_gives_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::load(&dir.path().join("CustomerOrders.xlsx"));
        assert!(store.is_empty());
    }

    #[test]
    fn directory_path_gives_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        assert!(RecordStore::load(dir.path()).is_empty());
    }

    #[test]
    fn unreadable_file_gives_empty_store() {
        let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        file.write_all(b"id,OrderDate\n1,2024-01-01\n").unwrap();
        assert!(RecordStore::load(file.path()).is_empty());

        let unknown = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        assert!(RecordStore::load(unknown.path()).is_empty());
    }

    #[test]
    fn records_keep_source_order_and_duplicates() {
        let row = |id| OrderRecord::new(vec![("OrderID".to_string(), FieldValue::Int(id))]);
        let store = RecordStore::from(vec![row(2), row(1), row(2)]);
        assert_eq!(store.len(), 3);
        assert_eq!(store.records()[0], store.records()[2]);
        assert_eq!(store.records()[1], row(1));
    }
}
