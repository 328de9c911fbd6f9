use redb::TableDefinition;

/// Customization records: uuid -> CustomizationRecord (msgpack)
pub const CUSTOMIZATIONS: TableDefinition<&str, &[u8]> = TableDefinition::new("customizations");
