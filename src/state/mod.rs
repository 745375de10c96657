//! Pure client-side state: what is on screen, what has been fetched, and
//! which requests are still allowed to change it.

pub mod form;
pub mod pending;
pub mod request;
pub mod store;
pub mod view;

pub use form::{AdDraft, CompanyDraft, Draft, ImagePromptDraft, EXAMPLE_PROMPTS};
pub use pending::{Pending, ViewError};
pub use request::{RequestTicket, RequestTracker, Resource};
pub use store::{Collection, Identified};
pub use view::View;
