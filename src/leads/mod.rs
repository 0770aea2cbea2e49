pub mod status;

pub use status::{LeadStatus, display_lead_status, map_lead_status};
