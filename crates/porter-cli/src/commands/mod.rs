pub mod auth;
pub mod building;
pub mod dispatch;
pub mod document;
pub mod email;
pub mod finance;
pub mod issue;
pub mod meeting;
pub mod shared;
pub mod signup;
pub mod supplier;
