use serde::{Deserialize, Deserializer};

/// `null` reads as the type's default, the same as a missing key.
///
/// Use together with `#[serde(default)]`:
///
/// ```
/// use contracts::shared::serde_helpers::null_as_default;
///
/// #[derive(serde::Deserialize)]
/// struct Row {
///     #[serde(default, deserialize_with = "null_as_default")]
///     discount: f64,
/// }
///
/// let row: Row = serde_json::from_str(r#"{"discount":null}"#).unwrap();
/// assert_eq!(row.discount, 0.0);
/// ```
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
