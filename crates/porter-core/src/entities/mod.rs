//! Entity structs for the Porter building domain.
//!
//! `Issue` and `Email` are the linked core of the model. The remaining
//! records are flat and scoped to one `Building`. All structs derive
//! `Serialize`, `Deserialize` and `JsonSchema`; wire shapes differ and are
//! mapped in `porter-api`.

mod building;
mod document;
mod email;
mod finance;
mod issue;
mod meeting;
mod supplier;
mod user;

pub use building::{Building, Director, Role};
pub use document::{Document, DocumentLink};
pub use email::Email;
pub use finance::{AnnualFinance, FinanceLine};
pub use issue::Issue;
pub use meeting::{CalendarEvent, Meeting};
pub use supplier::Supplier;
pub use user::AuthUser;
