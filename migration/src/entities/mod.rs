pub mod lead;
pub mod referral_link;

pub use lead::Entity as LeadEntity;
pub use referral_link::Entity as ReferralLinkEntity;
