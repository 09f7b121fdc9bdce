//! # CZML Validator
//!
//! Read-only diagnostics for CZML document arrays.
//!
//! ## Checks
//!
//! ```text
//! Document array
//!     │
//!     ├──> Top level (array, non-empty)        fatal, stops here
//!     │
//!     ├──> Element 0 is the document packet
//!     │      └─> name / version / clock
//!     │
//!     └──> Every packet
//!            ├─> object with string id, unique ids
//!            ├─> position (one encoding, lat/lon ranges)
//!            ├─> point / polyline / polygon / ellipse
//!            └─> anchored entities need a position
//! ```
//!
//! Everything except the two top-level failures is collected in a single pass, so a
//! caller sees every problem at once. Errors make the document invalid; warnings
//! never do.
//!
//! ## Example
//!
//! ```
//! use czml_validator::validate;
//! use serde_json::json;
//!
//! let result = validate(&json!([{"id": "document", "name": "T", "version": "1.0"}]));
//! assert!(result.valid);
//! assert_eq!(result.packet_count, 1);
//! ```

mod report;
mod summary;
mod validate;
mod value;

pub use report::{Severity, ValidationError, ValidationResult};
pub use summary::{is_likely_czml, summarize, CzmlSummary};
pub use validate::{validate, validate_document, validate_packets};
