//! Referral attribution
//!
//! Captures `ref` / `cid` from landing-page navigations and keeps them bound
//! to the browsing session. No network access happens here.

mod params;
mod session;
mod store;
mod tracker;

pub use params::{NavigationParams, UtmParams};
pub use session::SessionRegistry;
pub use store::{CAMPAIGN_ID_KEY, MemorySessionStore, REF_CODE_KEY, SessionStore};
pub use tracker::{AttributionTracker, SessionAttribution};
