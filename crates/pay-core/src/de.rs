//! Serde helpers shared by the wire types.

use serde::{Deserialize, Deserializer};

/// Decode `null` as the type's default value.
///
/// The gateway sends `null` for fields it has nothing to say about; those
/// must read the same as an absent field.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
