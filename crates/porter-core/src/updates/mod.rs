//! Create drafts and partial-update patches.
//!
//! Patches carry only the fields being changed; `None` means "leave as is".
//! They are shared by the live API client and the in-memory stores so both
//! paths merge the same way.

mod email;
mod issue;
mod supplier;

pub use email::EmailPatch;
pub use issue::{IssueDraft, IssuePatch, IssuePatchBuilder};
pub use supplier::SupplierDraft;
