use synaptic_core::{KeyType, RecordCollection, RecordKey, SynapticError, VectorStoreMetadata};

struct TenantKey;

impl RecordKey for TenantKey {
    const KEY_TYPE: KeyType = KeyType::Other("TenantKey");
}

#[test]
fn builtin_key_descriptors() {
    assert_eq!(<String as RecordKey>::KEY_TYPE, KeyType::String);
    assert_eq!(<uuid::Uuid as RecordKey>::KEY_TYPE, KeyType::Guid);
    assert_eq!(<i32 as RecordKey>::KEY_TYPE, KeyType::Int32);
    assert_eq!(<i64 as RecordKey>::KEY_TYPE, KeyType::Int64);
    assert_eq!(<u64 as RecordKey>::KEY_TYPE, KeyType::UInt64);
}

#[test]
fn custom_key_descriptor() {
    assert_eq!(TenantKey::KEY_TYPE, KeyType::Other("TenantKey"));
    assert_eq!(TenantKey::KEY_TYPE.to_string(), "TenantKey");
}

#[test]
fn key_type_display() {
    assert_eq!(KeyType::String.to_string(), "string");
    assert_eq!(KeyType::Guid.to_string(), "guid");
    assert_eq!(KeyType::ObjectId.to_string(), "object_id");
}

#[test]
fn unsupported_key_type_error_lists_supported_set() {
    let err = SynapticError::unsupported_key_type(
        KeyType::Guid,
        &[KeyType::String, KeyType::ObjectId],
    );
    assert_eq!(
        err.to_string(),
        "unsupported key type `guid`; supported key types: string, object_id"
    );
}

struct NamedCollection(&'static str);

impl RecordCollection<String, ()> for NamedCollection {
    fn name(&self) -> &str {
        self.0
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[test]
fn record_collection_reports_key_type() {
    let collection: Box<dyn RecordCollection<String, ()>> = Box::new(NamedCollection("hotels"));
    assert_eq!(collection.name(), "hotels");
    assert_eq!(collection.key_type(), KeyType::String);
    assert!(collection.as_any().downcast_ref::<NamedCollection>().is_some());
}

#[test]
fn metadata_serializes() {
    let metadata = VectorStoreMetadata {
        system_name: "mongodb".to_string(),
        database_name: "hotels".to_string(),
    };
    let json = serde_json::to_value(&metadata).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"system_name": "mongodb", "database_name": "hotels"})
    );
}
