pub mod auth;
pub mod building;
pub mod document;
pub mod email;
pub mod finance;
pub mod issue;
pub mod meeting;
pub mod signup;
pub mod supplier;

pub use auth::AuthCommands;
pub use building::BuildingCommands;
pub use document::DocumentCommands;
pub use email::EmailCommands;
pub use finance::FinanceCommands;
pub use issue::IssueCommands;
pub use meeting::MeetingCommands;
pub use signup::SignupCommands;
pub use supplier::SupplierCommands;
