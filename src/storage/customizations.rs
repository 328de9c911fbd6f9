use redb::ReadableTable;
use uuid::Uuid;

use super::db::{Database, DatabaseError, StoreError};
use super::models::{CustomizationRecord, NewCustomization};
use super::tables::*;

impl Database {
    // ========================================================================
    // Customization operations
    // ========================================================================

    /// Assign an identifier to `new` and persist it.
    ///
    /// Identifiers are UUIDv7, so key order is creation order.
    pub fn create(&self, new: NewCustomization) -> Result<CustomizationRecord, StoreError> {
        let record = new.into_record(Uuid::now_v7().to_string());
        self.put_record(&record)?;
        Ok(record)
    }

    /// All stored records in creation order
    pub fn list_all(&self) -> Result<Vec<CustomizationRecord>, StoreError> {
        let read_txn = self.begin_read()?;
        let table = read_txn
            .open_table(CUSTOMIZATIONS)
            .map_err(DatabaseError::from)?;

        let mut records = Vec::new();
        for result in table.iter().map_err(DatabaseError::from)? {
            let (_, value) = result.map_err(DatabaseError::from)?;
            let record: CustomizationRecord =
                rmp_serde::from_slice(value.value()).map_err(DatabaseError::from)?;
            records.push(record);
        }

        Ok(records)
    }

    /// Look a record up by identifier. `Ok(None)` when it does not exist.
    pub fn get_by_id(&self, id: &str) -> Result<Option<CustomizationRecord>, StoreError> {
        let key = Uuid::parse_str(id)
            .map_err(|_| StoreError::InvalidIdentifier(id.to_string()))?
            .to_string();

        let read_txn = self.begin_read()?;
        let table = read_txn
            .open_table(CUSTOMIZATIONS)
            .map_err(DatabaseError::from)?;

        match table.get(key.as_str()).map_err(DatabaseError::from)? {
            Some(data) => {
                let record: CustomizationRecord =
                    rmp_serde::from_slice(data.value()).map_err(DatabaseError::from)?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    fn put_record(&self, record: &CustomizationRecord) -> Result<(), DatabaseError> {
        debug_assert!(!record.id.is_empty(), "record id must not be empty");

        let write_txn = self.begin_write()?;
        {
            let mut table = write_txn.open_table(CUSTOMIZATIONS)?;
            let data = rmp_serde::to_vec_named(record)?;
            table.insert(record.id.as_str(), data.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }
}
