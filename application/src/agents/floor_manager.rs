//! Floor mediator.
//!
//! Relays every inbound event unchanged. A `requestFloor` is answered at
//! once: a `grantFloor` to the requester is placed right before the relayed
//! request. A `bye` drops the sender from the conversant registry.

use super::{Agent, AgentError, Convener};
use async_trait::async_trait;
use openfloor_domain::{Envelope, EnvelopeBuilder, EventType, Manifest, To};
use std::collections::HashMap;
use tracing::{debug, info};

/// Broadcast relay that hands out the floor on request.
pub struct FloorManager {
    manifest: Manifest,
    active_conversants: HashMap<String, Manifest>,
    current_speaker: Option<String>,
}

impl FloorManager {
    pub fn new(manifest: Manifest) -> Self {
        Self {
            manifest,
            active_conversants: HashMap::new(),
            current_speaker: None,
        }
    }

    /// Register a conversant. Administrative; not driven by protocol events.
    pub fn add_conversant(&mut self, manifest: Manifest) {
        info!(speaker_uri = manifest.speaker_uri(), "Conversant added");
        self.active_conversants
            .insert(manifest.speaker_uri().to_string(), manifest);
    }

    pub fn remove_conversant(&mut self, speaker_uri: &str) -> Option<Manifest> {
        self.active_conversants.remove(speaker_uri)
    }

    pub fn active_conversants(&self) -> &HashMap<String, Manifest> {
        &self.active_conversants
    }

    pub fn current_speaker(&self) -> Option<&str> {
        self.current_speaker.as_deref()
    }
}

impl Convener for FloorManager {}

#[async_trait]
impl Agent for FloorManager {
    fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    async fn on_envelope(
        &mut self,
        inbound: &Envelope,
        outbound: &mut EnvelopeBuilder,
    ) -> Result<(), AgentError> {
        let sender = inbound.sender().speaker_uri();

        for event in inbound.events() {
            debug!(event_type = %event.event_type(), sender, "Relaying event");
            match event.event_type() {
                EventType::Bye => {
                    self.active_conversants.remove(sender);
                    if self.current_speaker.as_deref() == Some(sender) {
                        self.current_speaker = None;
                    }
                    info!(sender, "Conversant left");
                }
                EventType::RequestFloor => {
                    outbound.push_event(self.grant_floor(To::speaker(sender), None));
                    self.current_speaker = Some(sender.to_string());
                    info!(sender, "Floor granted");
                }
                EventType::Utterance
                | EventType::Context
                | EventType::Invite
                | EventType::Uninvite
                | EventType::DeclineInvite
                | EventType::GetManifests
                | EventType::PublishManifests
                | EventType::GrantFloor
                | EventType::RevokeFloor
                | EventType::YieldFloor => {}
            }
            outbound.push_event(event.clone());
        }
        Ok(())
    }
}
