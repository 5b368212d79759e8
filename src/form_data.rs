//! Form payload construction helpers
//!
//! Builds the flat key-value data that a CMS page edit form submits.
//! Payloads are described as nested [`serde_json::Value`] trees (objects for
//! field groups, arrays for positional groups) and flattened into
//! hyphen-joined keys by [`nested_form_data`]. [`streamfield`] and
//! [`inline_formset`] build the nested sub-trees for the two kinds of
//! repeatable field group the admin renders.

use indexmap::IndexMap;
use serde_json::{Map, Value, json};

/// Management counters for an inline formset.
///
/// Mirrors the management form the admin renders alongside a formset:
/// how many forms were initially present and the allowed range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormsetCounts {
	/// Number of forms pre-populated from existing data
	pub initial: usize,
	/// Minimum number of forms the formset accepts
	pub min: usize,
	/// Maximum number of forms the formset accepts
	pub max: usize,
}

impl Default for FormsetCounts {
	fn default() -> Self {
		Self {
			initial: 0,
			min: 0,
			max: 1000,
		}
	}
}

fn leaf_to_string(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		Value::Null => String::new(),
		other => other.to_string(),
	}
}

fn flatten_into(path: &mut Vec<String>, value: &Value, out: &mut IndexMap<String, String>) {
	match value {
		Value::Object(fields) => {
			for (key, child) in fields {
				path.push(key.clone());
				flatten_into(path, child, out);
				path.pop();
			}
		}
		Value::Array(items) => {
			for (index, child) in items.iter().enumerate() {
				path.push(index.to_string());
				flatten_into(path, child, out);
				path.pop();
			}
		}
		leaf => {
			out.insert(path.join("-"), leaf_to_string(leaf));
		}
	}
}

/// Translates a nested value tree into flat form data with hyphen-separated
/// keys.
///
/// Objects and arrays recurse (array indices become stringified key
/// segments); any other value is a leaf. String leaves pass through
/// unchanged, numbers and booleans use their display form, and `null`
/// becomes the empty string. Key order in the result is the depth-first
/// traversal order of the tree.
///
/// The input must be finite; `serde_json::Value` trees are acyclic by
/// construction, and depth is bounded only by the call stack.
///
/// # Examples
///
/// ```
/// use reinhardt_cms_testkit::form_data::nested_form_data;
/// use serde_json::json;
///
/// let data = nested_form_data(&json!({
///     "foo": "bar",
///     "parent": {
///         "child": "field",
///     },
/// }));
///
/// assert_eq!(data["foo"], "bar");
/// assert_eq!(data["parent-child"], "field");
/// assert_eq!(data.len(), 2);
/// ```
pub fn nested_form_data(data: &Value) -> IndexMap<String, String> {
	let mut out = IndexMap::new();
	let mut path = Vec::new();
	flatten_into(&mut path, data, &mut out);
	out
}

/// Takes a sequence of `(block_type, value)` pairs and turns it into
/// StreamField form data. Use this within a [`nested_form_data`] call, with
/// the field name as the key.
///
/// Each item at index `i` contributes `i-type`, `i-value`, `i-order`
/// (mirroring the position) and `i-deleted` (always empty); a sibling
/// `count` key carries the number of blocks.
///
/// # Examples
///
/// ```
/// use reinhardt_cms_testkit::form_data::{nested_form_data, streamfield};
/// use serde_json::json;
///
/// let data = nested_form_data(&json!({
///     "content": streamfield([("text", "Hello, world")]),
/// }));
///
/// assert_eq!(data["content-count"], "1");
/// assert_eq!(data["content-0-type"], "text");
/// assert_eq!(data["content-0-value"], "Hello, world");
/// assert_eq!(data["content-0-order"], "0");
/// assert_eq!(data["content-0-deleted"], "");
/// ```
pub fn streamfield<I, T, V>(items: I) -> Value
where
	I: IntoIterator<Item = (T, V)>,
	T: Into<String>,
	V: Into<Value>,
{
	let mut data = Map::new();
	for (index, (block_type, value)) in items.into_iter().enumerate() {
		let block = json!({
			"type": block_type.into(),
			"value": value.into(),
			"deleted": "",
			"order": index.to_string(),
		});
		data.insert(index.to_string(), block);
	}
	data.insert("count".to_string(), Value::String(data.len().to_string()));
	Value::Object(data)
}

/// Takes a sequence of per-form field objects for an inline formset and
/// translates it into valid POST data, using default management counters
/// (`initial = 0`, `min = 0`, `max = 1000`).
///
/// See [`inline_formset_with`] for the full contract.
///
/// # Examples
///
/// ```
/// use reinhardt_cms_testkit::form_data::{inline_formset, nested_form_data};
/// use serde_json::json;
///
/// let data = nested_form_data(&json!({
///     "lines": inline_formset([json!({"text": "Hello"}), json!({"text": "World"})]),
/// }));
///
/// assert_eq!(data["lines-TOTAL_FORMS"], "2");
/// assert_eq!(data["lines-0-text"], "Hello");
/// assert_eq!(data["lines-1-ORDER"], "1");
/// ```
pub fn inline_formset<I>(items: I) -> Value
where
	I: IntoIterator<Item = Value>,
{
	inline_formset_with(items, FormsetCounts::default())
}

/// Takes a sequence of per-form field objects for an inline formset and
/// translates it into valid POST data with explicit management counters.
///
/// Each item must be a JSON object of field values. The item at index `i`
/// is keyed by `i` and merged over the defaults `ORDER = i`, `DELETE = ""`
/// (caller fields win on collision). Four management keys are always
/// emitted as siblings: `TOTAL_FORMS` (number of items), `INITIAL_FORMS`,
/// `MIN_NUM_FORMS` and `MAX_NUM_FORMS` from `counts` — all stringified.
pub fn inline_formset_with<I>(items: I, counts: FormsetCounts) -> Value
where
	I: IntoIterator<Item = Value>,
{
	let mut data = Map::new();
	let mut total = 0;
	for (index, item) in items.into_iter().enumerate() {
		let mut form = Map::new();
		form.insert("ORDER".to_string(), Value::String(index.to_string()));
		form.insert("DELETE".to_string(), Value::String(String::new()));
		if let Value::Object(fields) = item {
			for (key, value) in fields {
				form.insert(key, value);
			}
		}
		data.insert(index.to_string(), Value::Object(form));
		total = index + 1;
	}

	data.insert("TOTAL_FORMS".to_string(), Value::String(total.to_string()));
	data.insert("INITIAL_FORMS".to_string(), Value::String(counts.initial.to_string()));
	data.insert("MIN_NUM_FORMS".to_string(), Value::String(counts.min.to_string()));
	data.insert("MAX_NUM_FORMS".to_string(), Value::String(counts.max.to_string()));
	Value::Object(data)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_leaf_values_stringify() {
		let data = nested_form_data(&json!({
			"text": "plain",
			"number": 42,
			"flag": true,
			"empty": null,
		}));

		assert_eq!(data["text"], "plain");
		assert_eq!(data["number"], "42");
		assert_eq!(data["flag"], "true");
		assert_eq!(data["empty"], "");
	}

	#[test]
	fn test_array_indices_become_key_segments() {
		let data = nested_form_data(&json!({"tags": ["a", "b"]}));

		assert_eq!(data["tags-0"], "a");
		assert_eq!(data["tags-1"], "b");
	}

	#[test]
	fn test_flattening_preserves_traversal_order() {
		let data = nested_form_data(&json!({
			"b": "1",
			"a": {"z": "2", "y": "3"},
			"c": "4",
		}));

		let keys: Vec<&str> = data.keys().map(String::as_str).collect();
		assert_eq!(keys, ["b", "a-z", "a-y", "c"]);
	}

	#[test]
	fn test_streamfield_empty() {
		let data = nested_form_data(&streamfield(Vec::<(String, Value)>::new()));

		assert_eq!(data["count"], "0");
		assert_eq!(data.len(), 1);
	}

	#[test]
	fn test_formset_caller_fields_override_defaults() {
		let data = nested_form_data(&inline_formset(vec![json!({"ORDER": "5", "text": "x"})]));

		assert_eq!(data["0-ORDER"], "5");
		assert_eq!(data["0-DELETE"], "");
		assert_eq!(data["0-text"], "x");
	}
}
