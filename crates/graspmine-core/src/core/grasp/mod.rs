//! Grasp records: the structured output of a mining run.
//!
//! [`record`] defines the record type, link-name resolution, and the
//! composite quality score; [`squeeze`] detects fingers closed past the
//! squeeze threshold without touching the object.

pub mod record;
pub mod squeeze;

pub use record::{Contact, GraspRecord, LinkNameError, composite_quality, resolve_link};
pub use squeeze::squeezed;
