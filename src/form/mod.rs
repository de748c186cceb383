//! Upload form model and the per-form submission controller.
//!
//! A form is described by a [`element::FormElement`] (its declared attributes,
//! field values and file input). The [`controller::FormSubmissionController`]
//! owns the form's countdown, result and chosen-file regions and drives the
//! submit, wait and display cycle through the [`ports`] it is handed.

pub mod controller;
pub mod element;
pub mod ports;
pub mod result;
pub mod validation;
