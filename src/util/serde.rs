use ::serde::de::*;
use serde_json::Value;

/// Strings, numbers and booleans are kept as text, anything else is empty
pub fn text<'de, D>(deser: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deser)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// Non-negative integers, given as numbers or numeric strings. Anything unusable is 0
pub fn count<'de, D>(deser: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    fn from_float(f: f64) -> Option<u64> {
        Some(f)
            .filter(|f| f.is_finite() && *f >= 0.0)
            .map(|f| f as u64)
    }

    let n = match Value::deserialize(deser)? {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(from_float)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(from_float))
        }
        _ => None,
    };
    Ok(n.unwrap_or_default())
}

/// Anything that isn't the expected shape (`null`, a string instead of an object, ..)
/// becomes the default
pub fn or_default<'de, D, T>(deser: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(T::deserialize(Value::deserialize(deser)?).unwrap_or_default())
}

/// Like [`or_default`], per element. A non-array is an empty list
pub fn items<'de, D, T>(deser: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let items = match Value::deserialize(deser)? {
        Value::Array(items) => items,
        _ => return Ok(Vec::new()),
    };
    Ok(items
        .into_iter()
        .map(|item| T::deserialize(item).unwrap_or_default())
        .collect())
}
