//! Right-biased recursive structural merge.

use serde_json::Value;

/// Merge `overlay` on top of `base`.
///
/// Where both sides hold an object the merge recurses per key; everywhere
/// else the overlay replaces the base value outright (arrays and scalars
/// included). Keys only present on one side are preserved. Operates on the
/// language-neutral JSON value model, independent of any template syntax.
pub fn merge_values(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base), Value::Object(overlay)) => {
            for (key, overlay_value) in overlay {
                let merged = match base.remove(&key) {
                    Some(base_value) => merge_values(base_value, overlay_value),
                    None => overlay_value,
                };
                base.insert(key, merged);
            }
            Value::Object(base)
        }
        (_, overlay) => overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn overlay_wins_on_conflict() {
        let merged = merge_values(json!({"a": 1}), json!({"a": 2}));
        assert_eq!(merged, json!({"a": 2}));
    }

    #[test]
    fn untouched_keys_are_preserved() {
        let merged = merge_values(json!({"a": 1, "b": 2}), json!({"b": 3}));
        assert_eq!(merged, json!({"a": 1, "b": 3}));
    }

    #[test]
    fn nested_objects_merge_recursively() {
        let merged = merge_values(
            json!({"a": 1, "b": {"c": 2}}),
            json!({"b": {"c": 9, "d": 4}}),
        );
        assert_eq!(merged, json!({"a": 1, "b": {"c": 9, "d": 4}}));
    }

    #[test]
    fn deep_recursion() {
        let merged = merge_values(
            json!({"a": {"b": {"c": {"d": 1, "e": 2}}}}),
            json!({"a": {"b": {"c": {"d": 9}}}}),
        );
        assert_eq!(merged, json!({"a": {"b": {"c": {"d": 9, "e": 2}}}}));
    }

    #[test]
    fn arrays_are_replaced_not_merged() {
        let merged = merge_values(json!({"a": [1, 2, 3]}), json!({"a": [9]}));
        assert_eq!(merged, json!({"a": [9]}));
    }

    #[test]
    fn scalar_replaces_object_and_vice_versa() {
        assert_eq!(
            merge_values(json!({"a": {"b": 1}}), json!({"a": 7})),
            json!({"a": 7})
        );
        assert_eq!(
            merge_values(json!({"a": 7}), json!({"a": {"b": 1}})),
            json!({"a": {"b": 1}})
        );
    }

    #[test]
    fn null_overlay_value_wins() {
        let merged = merge_values(json!({"a": 1}), json!({"a": null}));
        assert_eq!(merged, json!({"a": null}));
    }

    #[test]
    fn empty_overlay_is_identity() {
        let base = json!({"a": 1, "b": {"c": 2}});
        assert_eq!(merge_values(base.clone(), json!({})), base);
    }

    #[test]
    fn non_object_base_is_replaced() {
        assert_eq!(merge_values(json!([1, 2]), json!({"a": 1})), json!({"a": 1}));
    }
}
