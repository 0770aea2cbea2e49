//! Service layer for business logic
//!
//! Shared by the HTTP handlers and the CLI.

mod leads;
mod referral_links;

pub use leads::{LeadService, LeadSubmission};
pub use referral_links::ReferralLinkService;
