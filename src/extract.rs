//! Rendered HTML form extraction
//!
//! Reverse-engineers a rendered form back into the payload a browser would
//! submit, so response assertions can compare against what a follow-up POST
//! would contain. Only the handful of submittable element kinds are
//! inspected (inputs, radios, checkboxes, textareas, selects); this is not
//! a general HTML5 form model.

use scraper::{ElementRef, Html, Selector};

use crate::error::{TestkitError, TestkitResult};
use crate::query_dict::QueryDict;

/// Name of the hidden CSRF token field rendered into admin forms
pub const CSRF_FORM_FIELD: &str = "csrfmiddlewaretoken";

/// Form selection and extraction options.
///
/// `Default` targets the first form in the document and leaves the CSRF
/// token field out of the result.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
	/// Extract the form whose id attribute equals this, instead of
	/// selecting by index
	pub form_id: Option<String>,
	/// 0-based occurrence of the form to extract, in document order;
	/// ignored when `form_id` is set
	pub form_index: usize,
	/// Keep the CSRF token field in the result
	pub include_csrf: bool,
}

fn selector(css: &str) -> Selector {
	Selector::parse(css).expect("static selector is valid")
}

/// Extract one form from an HTML document into a [`QueryDict`], simulating
/// what a browser would submit.
///
/// The form is located by id when [`ExtractOptions::form_id`] is set,
/// otherwise by 0-based document-order index. Fails with
/// [`TestkitError::FormIdNotFound`] or [`TestkitError::FormIndexNotFound`]
/// when no form matches; an empty result is never silently substituted.
///
/// # Examples
///
/// ```
/// use reinhardt_cms_testkit::extract::{ExtractOptions, querydict_from_html};
///
/// let html = r#"
///     <form id="f">
///         <input name="a" value="1">
///         <select name="b">
///             <option value="x">X</option>
///             <option value="y" selected>Y</option>
///         </select>
///     </form>
/// "#;
///
/// let data = querydict_from_html(html, &ExtractOptions::default()).unwrap();
/// assert_eq!(data.get("a"), Some("1"));
/// assert_eq!(data.get("b"), Some("y"));
/// ```
pub fn querydict_from_html(html: &str, options: &ExtractOptions) -> TestkitResult<QueryDict> {
	let document = Html::parse_document(html);
	let form_sel = selector("form");

	if let Some(form_id) = options.form_id.as_deref() {
		tracing::debug!(form_id, "locating form by id");
		let form = document
			.select(&form_sel)
			.find(|form| form.value().attr("id") == Some(form_id))
			.ok_or_else(|| TestkitError::FormIdNotFound(form_id.to_string()))?;
		return Ok(querydict_from_form(form, options.include_csrf));
	}

	tracing::debug!(form_index = options.form_index, "locating form by index");
	let form = document
		.select(&form_sel)
		.nth(options.form_index)
		.ok_or(TestkitError::FormIndexNotFound(options.form_index))?;
	Ok(querydict_from_form(form, options.include_csrf))
}

/// Extract the form with the given id attribute.
///
/// Shorthand for [`querydict_from_html`] with only
/// [`ExtractOptions::form_id`] set.
pub fn querydict_from_form_id(html: &str, form_id: &str) -> TestkitResult<QueryDict> {
	querydict_from_html(
		html,
		&ExtractOptions {
			form_id: Some(form_id.to_string()),
			..ExtractOptions::default()
		},
	)
}

/// Extract the form at the given 0-based occurrence index.
///
/// Shorthand for [`querydict_from_html`] with only
/// [`ExtractOptions::form_index`] set.
pub fn querydict_from_form_index(html: &str, form_index: usize) -> TestkitResult<QueryDict> {
	querydict_from_html(
		html,
		&ExtractOptions {
			form_index,
			..ExtractOptions::default()
		},
	)
}

/// The `value` attribute, falling back to the option's text content
fn option_value(option: ElementRef<'_>) -> String {
	match option.value().attr("value") {
		Some(value) => value.to_string(),
		None => option.text().collect(),
	}
}

// Passes run in a fixed order and later passes overwrite or append to keys
// set by earlier ones; that ordering decides the final value whenever one
// name is shared by several elements.
fn querydict_from_form(form: ElementRef<'_>, include_csrf: bool) -> QueryDict {
	let input_sel = selector("input");
	let textarea_sel = selector("textarea");
	let select_sel = selector("select");
	let option_sel = selector("option");

	let mut data = QueryDict::new();

	// Text-like inputs: everything that is not a checkbox or radio,
	// including inputs with no type attribute at all
	for input in form.select(&input_sel) {
		let element = input.value();
		let Some(name) = element.attr("name") else {
			continue;
		};
		if matches!(element.attr("type").unwrap_or(""), "checkbox" | "radio") {
			continue;
		}
		if !include_csrf && name == CSRF_FORM_FIELD {
			tracing::trace!(field = name, "skipping CSRF token field");
			continue;
		}
		data.set(name, element.attr("value").unwrap_or(""));
	}

	// Checked radios overwrite; an unchecked group leaves no key
	for input in form.select(&input_sel) {
		let element = input.value();
		if element.attr("type") != Some("radio") || element.attr("checked").is_none() {
			continue;
		}
		if let Some(name) = element.attr("name") {
			data.set(name, element.attr("value").unwrap_or(""));
		}
	}

	// Checked checkboxes accumulate into a value list
	for input in form.select(&input_sel) {
		let element = input.value();
		if element.attr("type") != Some("checkbox") || element.attr("checked").is_none() {
			continue;
		}
		if let Some(name) = element.attr("name") {
			data.append(name, element.attr("value").unwrap_or(""));
		}
	}

	for textarea in form.select(&textarea_sel) {
		if let Some(name) = textarea.value().attr("name") {
			data.set(name, textarea.text().collect::<String>());
		}
	}

	// Selected options accumulate; with none selected the first option is
	// the default selection, as a browser would submit it
	for select in form.select(&select_sel) {
		let Some(name) = select.value().attr("name") else {
			continue;
		};
		let mut any_selected = false;
		for option in select.select(&option_sel) {
			if option.value().attr("selected").is_some() {
				any_selected = true;
				data.append(name, option_value(option));
			}
		}
		if !any_selected {
			if let Some(first_option) = select.select(&option_sel).next() {
				data.set(name, option_value(first_option));
			}
		}
	}

	data
}
