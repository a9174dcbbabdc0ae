//! Product form state: draft editing, validation, and multipart assembly.
//!
//! The [`draft`] module holds the editable product state, [`validate`]
//! checks it against the backend's submission rules, [`multipart`] turns
//! an accepted draft into the wire payload, and [`controller`] ties the
//! three together behind field setters and a guarded submit.

pub mod controller;
pub mod draft;
pub mod multipart;
pub mod validate;

pub use controller::{FormMode, ProductFormController, SubmitOutcome};
pub use draft::{ColorVariantDraft, ImageSource, ImageUpload, ProductDraft};
pub use multipart::{FilePart, MultipartPayload};
pub use validate::{ProductFieldErrors, ValidationErrors, VariantFieldErrors, validate};
