use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::attribution::SessionRegistry;
use crate::config::StaticConfig;
use crate::errors::Result;
use crate::events::EventBus;
use crate::resolver::AgentResolver;
use crate::scoring::ScoringEngine;
use crate::services::{LeadService, ReferralLinkService};
use crate::storage::{StorageFactory, Storages};

/// Shared state handed to every worker
#[derive(Clone)]
pub struct AppState {
    pub links: Arc<ReferralLinkService>,
    pub leads: Arc<LeadService>,
    pub resolver: Arc<AgentResolver>,
    pub engine: Arc<ScoringEngine>,
    pub sessions: SessionRegistry,
    pub events: EventBus,
    pub cookie_name: String,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(
        config: &StaticConfig,
        storages: Storages,
        resolver: Arc<AgentResolver>,
        events: EventBus,
    ) -> Self {
        let engine = Arc::new(ScoringEngine::new(config.scoring.clone()));
        let links = Arc::new(ReferralLinkService::new(storages.links, events.clone()));
        let leads = Arc::new(LeadService::new(
            storages.leads,
            engine.clone(),
            events.clone(),
        ));

        Self {
            links,
            leads,
            resolver,
            engine,
            sessions: SessionRegistry::new(&config.session),
            events,
            cookie_name: config.session.cookie_name.clone(),
            started_at: Utc::now(),
        }
    }

    /// Open storage and build the HTTP resolver from config
    pub async fn from_config(config: &StaticConfig) -> Result<Self> {
        let storages = StorageFactory::create(config).await?;
        let resolver = Arc::new(AgentResolver::from_config(&config.resolver));
        Ok(Self::new(config, storages, resolver, EventBus::default()))
    }
}
