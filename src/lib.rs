//! # Reinhardt CMS Testkit
//!
//! Test-data construction helpers for CMS admin forms.
//!
//! Page edit forms in the CMS admin submit their data in a flat key-value
//! encoding: nested field groups use hyphen-joined keys, repeatable groups
//! carry management-form counters, and rich text fields carry an
//! editor-specific value encoding. For complex page types it is tedious to
//! construct that payload by hand; this crate builds it from a nested
//! [`serde_json::Value`] tree. It also does the reverse: given a rendered
//! HTML document, it reconstructs the payload a browser would submit from
//! one of its forms.
//!
//! ## Architecture
//!
//! ```text
//! reinhardt-cms-testkit
//! ├── form_data  - nested payload construction (streamfield, inline formsets)
//! ├── rich_text  - rich text editor registry and value encoding
//! ├── query_dict - multi-value form payload container
//! └── extract    - rendered HTML form -> QueryDict
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use reinhardt_cms_testkit::form_data::{nested_form_data, streamfield};
//! use serde_json::json;
//!
//! let data = nested_form_data(&json!({
//!     "title": "About us",
//!     "body": streamfield([("text", "Hello, world")]),
//! }));
//!
//! assert_eq!(data["title"], "About us");
//! assert_eq!(data["body-count"], "1");
//! assert_eq!(data["body-0-type"], "text");
//! assert_eq!(data["body-0-value"], "Hello, world");
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

// Re-export so test code can build payload trees without depending on
// serde_json directly
pub use serde_json;

// Module declarations
pub mod extract;
pub mod form_data;
pub mod query_dict;
pub mod rich_text;

// Prelude for convenient imports
pub mod prelude {
	//! Convenient re-exports of commonly used items

	// Payload construction
	pub use crate::form_data::{FormsetCounts, inline_formset, inline_formset_with, nested_form_data, streamfield};

	// Rich text
	pub use crate::rich_text::{RichTextEditorRegistry, RichTextFormatter, rich_text, rich_text_with};

	// Extraction
	pub use crate::extract::{ExtractOptions, querydict_from_form_id, querydict_from_form_index, querydict_from_html};
	pub use crate::query_dict::QueryDict;

	// Errors
	pub use crate::error::{TestkitError, TestkitResult};
}

/// Testkit error types
pub mod error {
	use thiserror::Error;

	/// Errors raised by form extraction and editor lookup
	#[derive(Error, Debug)]
	pub enum TestkitError {
		/// No form element carries the requested id attribute
		#[error("No form was found with id {0:?}")]
		FormIdNotFound(String),

		/// Fewer form elements exist than the requested 0-based index
		#[error("No form was found with index: {0}")]
		FormIndexNotFound(usize),

		/// Rich text editor name not present in the registry
		#[error("Rich text editor not registered: {0}")]
		UnknownEditor(String),
	}

	/// Result type for testkit operations
	pub type TestkitResult<T> = Result<T, TestkitError>;
}
