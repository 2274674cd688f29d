pub mod contact;
pub mod project;

pub use contact::ContactSubmission;
pub use project::{ProjectRecord, ProjectSubmission};
