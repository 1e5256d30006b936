use synaptic_core::{KeyType, RecordKey, SynapticError};

/// Key types MongoDB collections in this store can be keyed by.
///
/// Records are stored with a string `_id`.
pub const SUPPORTED_KEY_TYPES: &[KeyType] = &[KeyType::String];

/// Check a key type descriptor against [`SUPPORTED_KEY_TYPES`].
pub fn validate_key_type(key_type: KeyType) -> Result<(), SynapticError> {
    if SUPPORTED_KEY_TYPES.contains(&key_type) {
        Ok(())
    } else {
        Err(SynapticError::unsupported_key_type(
            key_type,
            SUPPORTED_KEY_TYPES,
        ))
    }
}

/// [`validate_key_type`] for the descriptor of `K`.
pub fn validate_key<K: RecordKey>() -> Result<(), SynapticError> {
    validate_key_type(K::KEY_TYPE)
}
