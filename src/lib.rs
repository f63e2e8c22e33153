// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::too_many_arguments)]
#![allow(clippy::should_implement_trait)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]
#![cfg_attr(test, allow(unused_variables))]

//! # Form Oxide
//!
//! Fillable PDF form builder in Rust.
//!
//! ## Core Features
//!
//! - **Element Model**: An ordered list of text fields, multi-line fields,
//!   checkbox groups, radio groups, drop-downs and static text
//! - **Themes & Fonts**: Eight colour themes and the six standard PDF fonts
//! - **Layout**: Single-pass, top-to-bottom placement on one page with a
//!   centered title, description lines and an optional logo
//! - **Interactive Output**: AcroForm fields with appearance streams,
//!   required flags and themed borders
//! - **Observable Rendering**: Progress, busy state and failure messages
//!   published over a watch channel
//!
//! ## Architecture
//! - **Pluggable Backends**: The assembler drives any [`backend::DocumentBackend`];
//!   [`PdfBackend`] writes PDF, [`backend::RecordingBackend`] records the
//!   call sequence
//! - **JSON Descriptions**: Forms can be loaded from JSON with [`FormSpec`]
//!
//! ## Quick Start
//!
//! ```no_run
//! use form_oxide::elements::{ElementKind, ElementStore, ElementUpdate};
//! use form_oxide::{FormAssembler, PdfBackend, RenderReporter};
//!
//! # async fn run() -> form_oxide::Result<()> {
//! let mut store = ElementStore::new();
//! store.set_title("Pizza order");
//! let name = store.add(ElementKind::Text);
//! store.update(name, ElementUpdate::new().label("Name").required(true));
//! let toppings = store.add(ElementKind::Checkbox);
//! store.update(toppings, ElementUpdate::new().label("Toppings").options_csv("Ham, Olives"));
//!
//! let reporter = RenderReporter::new();
//! let pdf = FormAssembler::default()
//!     .render(store.document(), PdfBackend::new(), &reporter)
//!     .await?;
//! std::fs::write("order.pdf", &pdf.bytes)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Form model
pub mod elements;
pub mod fonts;
pub mod form_spec;
pub mod theme;

// Layout
pub mod config;
pub mod geometry;
pub mod layout;

// Rendering
pub mod assembler;
pub mod backend;
pub mod progress;

// PDF output
pub mod object;
pub mod writer;

// Saving
pub mod export;

// Re-exports
pub use assembler::{FormAssembler, RenderedForm, PDF_CONTENT_TYPE};
pub use backend::{DocumentBackend, PdfBackend};
pub use config::LayoutConfig;
pub use elements::{ElementId, ElementKind, ElementStore, ElementUpdate, FormDocument};
pub use error::{Error, Result};
pub use form_spec::FormSpec;
pub use progress::{RenderReporter, RenderStatus};
pub use theme::{Theme, ThemeId};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
