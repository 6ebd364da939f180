use serde_json::Value;

const MASK: &str = "***";
const SECRET_KEYS: &[&str] = &["password", "secret", "token", "email"];

/// Copy of `value` with every secret-looking or personal field replaced by `***`
pub fn mask_secrets(value: &Value) -> Value {
    match value {
        Value::Object(obj) => Value::Object(
            obj.iter()
                .map(|(k, v)| {
                    let lower = k.to_lowercase();
                    if SECRET_KEYS.iter().any(|s| lower.contains(s)) {
                        (k.clone(), Value::String(MASK.to_string()))
                    } else {
                        (k.clone(), mask_secrets(v))
                    }
                })
                .collect(),
        ),
        Value::Array(arr) => Value::Array(arr.iter().map(mask_secrets).collect()),
        other => other.clone(),
    }
}
