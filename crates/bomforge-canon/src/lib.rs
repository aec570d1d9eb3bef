//! Deterministic canonical JSON, the byte format signatures are computed over.
//!
//! Rules: object keys in lexicographic codepoint order, no insignificant whitespace,
//! shortest round-trip float representation, and JSF's minimal string escaping. Keys
//! matching an exclusion predicate (by default, any key literally named `signature`,
//! at any depth) are dropped from the output and their JSON-pointer-like path is
//! recorded so callers can audit exactly what was left out of a signature.

pub mod error;

pub use error::CanonError;

use serde_json::Value;

const DEFAULT_EXCLUDE_KEY: &str = "signature";

/// Canonicalize `value`, excluding any field literally named `"signature"` at any depth.
/// Returns the canonical bytes (as a `String`) and the JSON-pointer-like paths of the
/// fields that were excluded, in traversal order.
pub fn canonicalize(value: &Value) -> (String, Vec<String>) {
    canonicalize_excluding(value, DEFAULT_EXCLUDE_KEY)
}

/// Canonicalize `value`, excluding any field named `exclude_key` at any depth.
pub fn canonicalize_excluding(value: &Value, exclude_key: &str) -> (String, Vec<String>) {
    let mut out = String::new();
    let mut excludes = Vec::new();
    write_value(&mut out, value, "", exclude_key, &mut excludes);
    (out, excludes)
}

/// Parse `s` as JSON and re-canonicalize it. Used to verify the round-trip stability
/// property: `canonicalize(parse(canonicalize(x))) == canonicalize(x)`.
pub fn canonicalize_str(s: &str) -> Result<(String, Vec<String>), CanonError> {
    let value: Value = serde_json::from_str(s)?;
    Ok(canonicalize(&value))
}

fn write_value(out: &mut String, value: &Value, path: &str, exclude_key: &str, excludes: &mut Vec<String>) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => write_number(out, n),
        Value::String(s) => write_string(out, s),
        Value::Array(items) => {
            out.push('[');
            let mut first = true;
            for (i, item) in items.iter().enumerate() {
                if !first {
                    out.push(',');
                }
                first = false;
                let child_path = if path.is_empty() {
                    format!("[{i}]")
                } else {
                    format!("{path}[{i}]")
                };
                write_value(out, item, &child_path, exclude_key, excludes);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().filter(|k| k.as_str() != exclude_key).collect();
            keys.sort();
            for k in map.keys() {
                if k.as_str() == exclude_key {
                    let child_path = if path.is_empty() {
                        k.clone()
                    } else {
                        format!("{path}.{k}")
                    };
                    excludes.push(child_path);
                }
            }
            out.push('{');
            let mut first = true;
            for k in keys {
                if !first {
                    out.push(',');
                }
                first = false;
                write_string(out, k);
                out.push(':');
                let child_path = if path.is_empty() {
                    k.clone()
                } else {
                    format!("{path}.{k}")
                };
                write_value(out, &map[k], &child_path, exclude_key, excludes);
            }
            out.push('}');
        }
    }
}

fn write_number(out: &mut String, n: &serde_json::Number) {
    if let Some(i) = n.as_i64() {
        out.push_str(&i.to_string());
    } else if let Some(u) = n.as_u64() {
        out.push_str(&u.to_string());
    } else if let Some(f) = n.as_f64() {
        if f == 0.0 {
            out.push('0');
        } else {
            out.push_str(&format!("{f}"));
        }
    }
}

fn write_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn object_keys_are_sorted() {
        let v = json!({"b": 1, "a": 2, "c": 3});
        let (s, excl) = canonicalize(&v);
        assert_eq!(s, r#"{"a":2,"b":1,"c":3}"#);
        assert!(excl.is_empty());
    }

    #[test]
    fn no_insignificant_whitespace() {
        let v = json!({"x": [1, 2, 3]});
        let (s, _) = canonicalize(&v);
        assert_eq!(s, r#"{"x":[1,2,3]}"#);
    }

    #[test]
    fn negative_zero_emits_as_zero() {
        let v = json!(-0.0);
        let (s, _) = canonicalize(&v);
        assert_eq!(s, "0");
    }

    #[test]
    fn string_escapes_only_jsf_mandated_set() {
        let v = json!("he said \"hi\"\nand left");
        let (s, _) = canonicalize(&v);
        assert_eq!(s, "\"he said \\\"hi\\\"\\u000aand left\"");
    }

    #[test]
    fn non_ascii_is_emitted_raw() {
        let v = json!("caf\u{00e9}");
        let (s, _) = canonicalize(&v);
        assert_eq!(s, "\"caf\u{00e9}\"");
    }

    #[test]
    fn excludes_root_signature_field() {
        let v = json!({"name": "x", "signature": {"value": "abc"}});
        let (s, excl) = canonicalize(&v);
        assert_eq!(s, r#"{"name":"x"}"#);
        assert_eq!(excl, vec!["signature".to_string()]);
    }

    #[test]
    fn excludes_nested_signature_fields_recursively() {
        let v = json!({
            "signature": {"value": "root-sig"},
            "components": [
                {"name": "a", "signature": {"value": "c0-sig"}}
            ]
        });
        let (s, mut excl) = canonicalize(&v);
        excl.sort();
        assert!(!s.contains("signature"));
        let mut expected = vec!["signature".to_string(), "components[0].signature".to_string()];
        expected.sort();
        assert_eq!(excl, expected);
    }

    #[test]
    fn round_trip_is_stable() {
        let v = json!({"b": [3, 1, 2], "a": {"z": true, "y": null}});
        let (first, _) = canonicalize(&v);
        let (second, _) = canonicalize_str(&first).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn integers_have_no_fractional_part() {
        let v = json!({"count": 5});
        let (s, _) = canonicalize(&v);
        assert_eq!(s, r#"{"count":5}"#);
    }
}
