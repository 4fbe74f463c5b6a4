//! # paperscope
//!
//! Research Papers Explorer - Dataset Aggregation Microservice
//!
//! Loads a pre-cleaned CSV of research-paper metadata and computes the
//! derived views a dashboard renders: a random sample, per-year publication
//! counts, top journals, the source distribution, and title word
//! frequencies. Rendering (tables, charts, word-cloud images) belongs to an
//! external layer; this crate only prepares the data.
//!
//! ## Modules
//!
//! - [`dataset`] - CSV loading and publish-year derivation
//! - [`aggregate`] - grouping and counting views
//! - [`sample`] - uniform random sampling
//! - [`titles`] - title concatenation and word frequencies
//! - [`views`] - per-interaction dashboard assembly
//! - [`error`] - custom error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use paperscope::dataset::Dataset;
//! use paperscope::views::{self, ViewOptions};
//!
//! fn main() -> anyhow::Result<()> {
//!     let dataset = Dataset::load("metadata_cleaned.csv")?;
//!     let view = views::build(&dataset, None, &ViewOptions::default())?;
//!     println!("{} papers loaded", view.total_papers);
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod dataset;
pub mod error;
pub mod sample;
pub mod titles;
pub mod views;

pub use error::{ExplorerError, Result};
