//! Conversational bot agent.
//!
//! State machine over `{current_context, active_conversation, has_floor}`:
//!
//! | Event         | Effect                                                   |
//! |---------------|----------------------------------------------------------|
//! | invite        | bind to the conversation, then apply an automatic grant  |
//! | grantFloor    | `has_floor = true`                                       |
//! | revokeFloor   | `has_floor = false`                                      |
//! | uninvite      | unbind, `has_floor = false`                              |
//! | context       | remember for this envelope                               |
//! | utterance     | append the responder's reply                             |
//! | getManifests  | append `publishManifests` with our own manifest          |
//! | anything else | ignored                                                  |
//!
//! Only events addressed to this agent are dispatched.

use super::{Agent, AgentError, addressed_to_me};
use crate::config::AgentSettings;
use crate::ports::utterance_responder::{CannedReply, UtteranceResponder};
use async_trait::async_trait;
use openfloor_domain::{Envelope, EnvelopeBuilder, Event, EventKind, EventType, Manifest, To};
use tracing::{debug, info, warn};

/// Reason attached to the floor grant implied by an invitation.
pub const INVITE_GRANT_REASON: &str = "Automatic grant on invitation";

/// A conversant that joins on invitation and answers utterances.
pub struct BotAgent {
    manifest: Manifest,
    responder: Box<dyn UtteranceResponder>,
    current_context: Vec<Event>,
    active_conversation: Option<String>,
    has_floor: bool,
}

impl BotAgent {
    /// Bot answering with [`CannedReply::default`].
    pub fn new(manifest: Manifest) -> Self {
        Self::with_responder(manifest, Box::new(CannedReply::default()))
    }

    pub fn with_responder(manifest: Manifest, responder: Box<dyn UtteranceResponder>) -> Self {
        Self {
            manifest,
            responder,
            current_context: Vec::new(),
            active_conversation: None,
            has_floor: false,
        }
    }

    /// Bot answering with the configured canned reply.
    pub fn from_settings(manifest: Manifest, settings: &AgentSettings) -> Self {
        Self::with_responder(manifest, Box::new(CannedReply::new(settings.canned_reply.clone())))
    }

    /// Context events seen in the most recent envelope.
    pub fn current_context(&self) -> &[Event] {
        &self.current_context
    }

    pub fn active_conversation(&self) -> Option<&str> {
        self.active_conversation.as_deref()
    }

    pub fn has_floor(&self) -> bool {
        self.has_floor
    }

    async fn dispatch(
        &mut self,
        conversation_id: &str,
        event: &Event,
        outbound: &mut EnvelopeBuilder,
    ) -> Result<(), AgentError> {
        debug!(event_type = %event.event_type(), "Dispatching event");

        match event.kind() {
            EventKind::Invite => {
                self.active_conversation = Some(conversation_id.to_string());
                info!(conversation_id, "Joined conversation");
                // The implied grant changes local state only; it is not emitted.
                let grant = Event::grant_floor()
                    .with_to(To::speaker(self.manifest.speaker_uri()))
                    .with_reason(INVITE_GRANT_REASON);
                self.apply_floor(&grant);
            }
            EventKind::GrantFloor | EventKind::RevokeFloor => self.apply_floor(event),
            EventKind::Uninvite => {
                info!(conversation_id, "Left conversation");
                self.active_conversation = None;
                self.has_floor = false;
            }
            EventKind::Context { .. } => self.current_context.push(event.clone()),
            EventKind::Utterance { dialog_event } => {
                let reply = self
                    .responder
                    .respond(&self.manifest, dialog_event, &self.current_context)
                    .await?;
                outbound.push_event(Event::utterance(reply));
            }
            EventKind::GetManifests { .. } => {
                outbound.push_event(Event::publish_manifests(vec![self.manifest.clone()], vec![]));
            }
            EventKind::DeclineInvite
            | EventKind::Bye
            | EventKind::PublishManifests { .. }
            | EventKind::RequestFloor
            | EventKind::YieldFloor => {
                debug!(event_type = %event.event_type(), "Ignoring event");
            }
        }
        Ok(())
    }

    fn apply_floor(&mut self, event: &Event) {
        let has_floor = match event.event_type() {
            EventType::GrantFloor => true,
            EventType::RevokeFloor => false,
            _ => return,
        };
        if has_floor != self.has_floor {
            info!(has_floor, reason = event.reason(), "Floor changed");
        }
        self.has_floor = has_floor;
    }
}

#[async_trait]
impl Agent for BotAgent {
    fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    async fn on_envelope(
        &mut self,
        inbound: &Envelope,
        outbound: &mut EnvelopeBuilder,
    ) -> Result<(), AgentError> {
        let conversation_id = inbound.conversation().id();
        if let Some(active) = &self.active_conversation
            && active != conversation_id
        {
            warn!(active = %active, received = conversation_id, "Conversation conflict");
            return Err(AgentError::ConversationConflict {
                active: active.clone(),
                received: conversation_id.to_string(),
            });
        }

        self.current_context.clear();
        for event in inbound.events() {
            if addressed_to_me(&self.manifest, event) {
                self.dispatch(conversation_id, event, outbound).await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::fixtures::*;
    use openfloor_domain::DialogEvent;

    fn to_agent(event: Event) -> Event {
        event.with_to(To::speaker(AGENT))
    }

    #[tokio::test]
    async fn test_invite_binds_and_grants() {
        let mut bot = BotAgent::new(agent_manifest());
        let reply = bot
            .process_envelope(&envelope("conv-1", CONVENER, vec![to_agent(Event::invite())]))
            .await
            .unwrap();

        assert_eq!(bot.active_conversation(), Some("conv-1"));
        assert!(bot.has_floor());
        // The automatic grant is not emitted.
        assert!(reply.events().is_empty());
        assert_eq!(reply.sender().speaker_uri(), AGENT);
        assert_eq!(reply.sender().service_url(), Some(AGENT_URL));
        assert_eq!(reply.conversation().id(), "conv-1");
    }

    #[tokio::test]
    async fn test_floor_directives() {
        let mut bot = BotAgent::new(agent_manifest());
        bot.process_envelope(&envelope("conv-1", CONVENER, vec![to_agent(Event::grant_floor())]))
            .await
            .unwrap();
        assert!(bot.has_floor());

        bot.process_envelope(&envelope("conv-1", CONVENER, vec![to_agent(Event::revoke_floor())]))
            .await
            .unwrap();
        assert!(!bot.has_floor());
    }

    #[tokio::test]
    async fn test_uninvite_unbinds() {
        let mut bot = BotAgent::new(agent_manifest());
        bot.process_envelope(&envelope("conv-1", CONVENER, vec![to_agent(Event::invite())]))
            .await
            .unwrap();
        bot.process_envelope(&envelope("conv-1", CONVENER, vec![to_agent(Event::uninvite())]))
            .await
            .unwrap();
        assert_eq!(bot.active_conversation(), None);
        assert!(!bot.has_floor());

        // Unbound again, so another conversation is accepted.
        bot.process_envelope(&envelope("conv-2", CONVENER, vec![]))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_conversation_conflict_leaves_state_untouched() {
        let mut bot = BotAgent::new(agent_manifest());
        bot.process_envelope(&envelope("conv-1", CONVENER, vec![to_agent(Event::invite())]))
            .await
            .unwrap();

        let err = bot
            .process_envelope(&envelope("conv-2", CONVENER, vec![to_agent(Event::revoke_floor())]))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            AgentError::ConversationConflict {
                active: "conv-1".into(),
                received: "conv-2".into(),
            }
        );
        assert!(err.is_conversation_conflict());
        assert!(bot.has_floor());
        assert_eq!(bot.active_conversation(), Some("conv-1"));
    }

    #[tokio::test]
    async fn test_utterance_gets_canned_reply() {
        let mut bot = BotAgent::new(agent_manifest());
        let utterance = DialogEvent::text(USER, "What's the weather?").unwrap();
        let reply = bot
            .process_envelope(&envelope("conv-1", USER, vec![Event::utterance(utterance)]))
            .await
            .unwrap();

        assert_eq!(reply.events().len(), 1);
        match reply.events()[0].kind() {
            EventKind::Utterance { dialog_event } => {
                assert_eq!(dialog_event.speaker_uri(), AGENT);
                assert_eq!(
                    dialog_event.text_content().as_deref(),
                    Some(CannedReply::DEFAULT_TEXT)
                );
            }
            other => panic!("expected utterance, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_configured_canned_reply() {
        let settings = AgentSettings {
            canned_reply: "Sunny all week.".into(),
            ..Default::default()
        };
        let mut bot = BotAgent::from_settings(agent_manifest(), &settings);
        let utterance = DialogEvent::text(USER, "Forecast?").unwrap();
        let reply = bot
            .process_envelope(&envelope("conv-1", USER, vec![Event::utterance(utterance)]))
            .await
            .unwrap();
        match reply.events()[0].kind() {
            EventKind::Utterance { dialog_event } => {
                assert_eq!(dialog_event.text_content().as_deref(), Some("Sunny all week."));
            }
            other => panic!("expected utterance, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_manifests_publishes_own_manifest() {
        let mut bot = BotAgent::new(agent_manifest());
        let reply = bot
            .process_envelope(&envelope("conv-1", USER, vec![Event::get_manifests(None)]))
            .await
            .unwrap();

        assert_eq!(reply.events().len(), 1);
        match reply.events()[0].kind() {
            EventKind::PublishManifests {
                servicing_manifests,
                discovery_manifests,
            } => {
                assert_eq!(servicing_manifests, &vec![agent_manifest()]);
                assert!(discovery_manifests.is_empty());
            }
            other => panic!("expected publishManifests, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_context_is_reset_per_call() {
        let mut bot = BotAgent::new(agent_manifest());
        bot.process_envelope(&envelope("conv-1", USER, vec![Event::context(vec![])]))
            .await
            .unwrap();
        assert_eq!(bot.current_context().len(), 1);

        bot.process_envelope(&envelope("conv-1", USER, vec![]))
            .await
            .unwrap();
        assert!(bot.current_context().is_empty());
    }

    #[tokio::test]
    async fn test_events_for_others_are_skipped() {
        let mut bot = BotAgent::new(agent_manifest());
        let elsewhere = Event::grant_floor().with_to(To::speaker(USER));
        let reply = bot
            .process_envelope(&envelope("conv-1", CONVENER, vec![elsewhere]))
            .await
            .unwrap();
        assert!(!bot.has_floor());
        assert!(reply.events().is_empty());
    }

    #[tokio::test]
    async fn test_unhandled_events_are_ignored() {
        let mut bot = BotAgent::new(agent_manifest());
        let reply = bot
            .process_envelope(&envelope(
                "conv-1",
                USER,
                vec![Event::bye(), Event::request_floor(), Event::yield_floor()],
            ))
            .await
            .unwrap();
        assert!(reply.events().is_empty());
        assert!(
            reply
                .events_of_type(EventType::Utterance)
                .next()
                .is_none()
        );
    }
}
