//! # CZML Loader
//!
//! Turns text from a URL, a string or a file into a [`DocumentArray`], or a typed
//! failure. Nothing here panics or returns `Err` across the public API: every
//! operation produces a [`LoadResult`] naming its source.
//!
//! ## Sources
//!
//! ```text
//! URL ──GET──> status / content-type checks ──┐
//! File ──read──> UTF-8 check ─────────────────┼──> JSON parse ──> array check
//! String ─────────────────────────────────────┘
//!
//! URLs ──spawn all──> join all ──> merge (first document packet wins)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use czml_loader::{CzmlLoader, LoaderConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), czml_loader::LoadError> {
//!     let loader = CzmlLoader::new(LoaderConfig::default())?;
//!     let merged = loader
//!         .load_and_merge(&["https://example.com/a.czml", "https://example.com/b.czml"])
//!         .await;
//!     println!("{} packets", merged.into_result()?.len());
//!     Ok(())
//! }
//! ```
//!
//! [`DocumentArray`]: czml_model::DocumentArray

mod config;
mod error;
mod examples;
mod loader;
mod result;
mod source;

pub use config::{LoaderConfig, DEFAULT_EXAMPLES_BASE_URL};
pub use error::{LoadError, Result, SourceFailure};
pub use examples::{available_examples, example_path, ExampleFile};
pub use loader::{
    load_from_file, load_from_string, load_from_string_as, merge_results, CzmlLoader,
    STRING_SOURCE,
};
pub use result::LoadResult;
pub use source::{InMemoryFile, LocalFile, TextFile};
