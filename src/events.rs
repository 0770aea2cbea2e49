//! 应用事件总线
//!
//! 变更操作在完成后发布事件，订阅方（列表缓存、日志、外部推送）自行消费。

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::trace;

use crate::scoring::LeadLabel;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppEvent {
    /// 某代理的推荐链接集合发生变化，其列表缓存需失效
    ReferralLinksChanged { agent_id: String },
    AttributionCaptured {
        ref_code: String,
        campaign_id: Option<String>,
    },
    AttributionCleared,
    LeadSubmitted { lead_id: String, label: LeadLabel },
}

#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<AppEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// 发布事件；没有订阅者时直接丢弃
    pub fn publish(&self, event: AppEvent) {
        trace!("publish {:?}", event);
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_without_subscribers() {
        let bus = EventBus::default();
        bus.publish(AppEvent::AttributionCleared);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_subscriber_receives_events_in_order() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.publish(AppEvent::ReferralLinksChanged {
            agent_id: "agent-1".to_string(),
        });
        bus.publish(AppEvent::AttributionCleared);

        assert_eq!(
            rx.recv().await.unwrap(),
            AppEvent::ReferralLinksChanged {
                agent_id: "agent-1".to_string()
            }
        );
        assert_eq!(rx.recv().await.unwrap(), AppEvent::AttributionCleared);
    }

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_value(AppEvent::LeadSubmitted {
            lead_id: "l1".to_string(),
            label: LeadLabel::HighPotentialAgent,
        })
        .unwrap();
        assert_eq!(json["type"], "lead_submitted");
        assert_eq!(json["label"], "high_potential_agent");
    }
}
