//! Rich text value encoding
//!
//! Rich text fields store their value in whatever encoding the active
//! editor widget expects, so test payloads have to run plain HTML through
//! the same formatter the admin would use. The formatting rules themselves
//! belong to the editor integrations; this module only defines the consumed
//! interface ([`RichTextFormatter`]) and a process-wide name → formatter
//! registry, pre-seeded with a pass-through `"default"` editor.

use std::collections::HashMap;
use std::sync::OnceLock;

use parking_lot::RwLock;

use crate::error::{TestkitError, TestkitResult};

/// Name of the editor used when none is given
pub const DEFAULT_EDITOR: &str = "default";

/// Formatting rules of one rich text editor configuration.
pub trait RichTextFormatter: Send + Sync {
	/// Encode `value` into the representation the editor's form widget
	/// submits
	fn format_value(&self, value: &str) -> String;
}

/// Factory that builds a formatter for an optional feature allow-list
type FormatterFactory = Box<dyn Fn(Option<&[String]>) -> Box<dyn RichTextFormatter> + Send + Sync>;

/// Registry of named rich text editor configurations.
///
/// # Examples
///
/// ```
/// use reinhardt_cms_testkit::rich_text::{RichTextEditorRegistry, RichTextFormatter};
///
/// struct Upper;
///
/// impl RichTextFormatter for Upper {
///     fn format_value(&self, value: &str) -> String {
///         value.to_uppercase()
///     }
/// }
///
/// let mut registry = RichTextEditorRegistry::with_default();
/// registry.register("upper", |_features| Box::new(Upper));
///
/// let formatter = registry.resolve("upper", None).unwrap();
/// assert_eq!(formatter.format_value("<p>hi</p>"), "<P>HI</P>");
/// ```
pub struct RichTextEditorRegistry {
	editors: HashMap<String, FormatterFactory>,
}

/// Pass-through formatter backing the seeded `"default"` editor
struct IdentityFormatter;

impl RichTextFormatter for IdentityFormatter {
	fn format_value(&self, value: &str) -> String {
		value.to_string()
	}
}

impl RichTextEditorRegistry {
	/// Create an empty registry
	pub fn new() -> Self {
		Self {
			editors: HashMap::new(),
		}
	}

	/// Create a registry with the `"default"` pass-through editor seeded
	pub fn with_default() -> Self {
		let mut registry = Self::new();
		registry.register(DEFAULT_EDITOR, |_features| Box::new(IdentityFormatter));
		registry
	}

	/// Register an editor configuration under `name`
	///
	/// The factory receives the feature allow-list requested at resolve
	/// time. Registering an existing name replaces it.
	pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
	where
		F: Fn(Option<&[String]>) -> Box<dyn RichTextFormatter> + Send + Sync + 'static,
	{
		self.editors.insert(name.into(), Box::new(factory));
	}

	/// Resolve the editor configuration named `editor` into a formatter
	pub fn resolve(
		&self,
		editor: &str,
		features: Option<&[String]>,
	) -> TestkitResult<Box<dyn RichTextFormatter>> {
		let factory = self
			.editors
			.get(editor)
			.ok_or_else(|| TestkitError::UnknownEditor(editor.to_string()))?;

		Ok(factory(features))
	}
}

impl Default for RichTextEditorRegistry {
	fn default() -> Self {
		Self::new()
	}
}

fn global_registry() -> &'static RwLock<RichTextEditorRegistry> {
	static REGISTRY: OnceLock<RwLock<RichTextEditorRegistry>> = OnceLock::new();
	REGISTRY.get_or_init(|| RwLock::new(RichTextEditorRegistry::with_default()))
}

/// Register an editor configuration in the process-wide registry
///
/// Intended for test setup, before any [`rich_text_with`] call that names
/// the editor.
pub fn register_editor<F>(name: impl Into<String>, factory: F)
where
	F: Fn(Option<&[String]>) -> Box<dyn RichTextFormatter> + Send + Sync + 'static,
{
	global_registry().write().register(name, factory);
}

/// Converts an HTML-like rich text string to the data format required by
/// the default rich text editor.
///
/// # Examples
///
/// ```
/// use reinhardt_cms_testkit::form_data::nested_form_data;
/// use reinhardt_cms_testkit::rich_text::rich_text;
/// use serde_json::json;
///
/// let data = nested_form_data(&json!({
///     "title": "About us",
///     "body": rich_text("<p>Lorem ipsum dolor sit amet</p>"),
/// }));
///
/// assert_eq!(data["body"], "<p>Lorem ipsum dolor sit amet</p>");
/// ```
pub fn rich_text(value: &str) -> String {
	// The "default" entry is seeded at registry construction and entries
	// are never removed
	rich_text_with(value, DEFAULT_EDITOR, None).expect("default editor is always registered")
}

/// Converts an HTML-like rich text string to the data format required by
/// the named rich text editor configuration.
///
/// `features` is an optional allow-list of rich text features handed to the
/// editor's formatter. Fails with [`TestkitError::UnknownEditor`] when no
/// editor is registered under `editor`.
pub fn rich_text_with(value: &str, editor: &str, features: Option<&[String]>) -> TestkitResult<String> {
	let registry = global_registry().read();
	let formatter = registry.resolve(editor, features)?;
	Ok(formatter.format_value(value))
}
