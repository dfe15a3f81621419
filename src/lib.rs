//! Core library for Pricebook, an editor for nested price catalogs
//! (category -> model -> configuration -> prices) stored as a single JSON document.
//! Provides the typed catalog, a copy-on-write command store, input validation,
//! JSON load/save and a confirmation-gated editor front door.

mod candidate;
mod confirm;
mod editor;
mod error;
mod model;
pub mod statics;
mod store;
pub mod transport;
pub mod validate;

pub use candidate::Candidate;
pub use confirm::ConfirmationGate;
pub use editor::{Deletion, Notice, NoticeLevel, PriceEditor, SavedFile};
pub use error::{
    EditorError, GateError, NotFoundError, ParseError, SchemaError, Subject, ValidationError,
};
pub use model::{Catalog, Configs, Models, PriceEntry, PriceField, UnknownPriceField};
pub use store::{CatalogStore, Command, apply};
pub use transport::LineEnding;
