//! Floor ledger - who holds the floor, who is in the conversation.
//!
//! The ledger observes envelopes as they pass and folds the floor
//! directives and invitations they carry into a small state. It never
//! produces events of its own.

use crate::envelope::{Envelope, Event, EventType, To};
use tracing::debug;

/// Observed floor state of one conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FloorLedger {
    holder: Option<String>,
    participants: Vec<String>,
}

impl FloorLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current floor holder, if any.
    pub fn holder(&self) -> Option<&str> {
        self.holder.as_deref()
    }

    /// Invited conversants, in invitation order.
    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    pub fn is_participant(&self, speaker_uri: &str) -> bool {
        self.participants.iter().any(|p| p == speaker_uri)
    }

    pub fn holds_floor(&self, speaker_uri: &str) -> bool {
        self.holder.as_deref() == Some(speaker_uri)
    }

    /// Fold every event of `envelope` into the ledger, in order.
    pub fn observe(&mut self, envelope: &Envelope) {
        let sender = envelope.sender().speaker_uri();
        for event in envelope.events() {
            self.apply(sender, event);
        }
    }

    /// Fold a single event sent by `sender`.
    pub fn apply(&mut self, sender: &str, event: &Event) {
        let target = event.to().and_then(target_of);
        match event.event_type() {
            EventType::GrantFloor => {
                if let Some(target) = target {
                    debug!(holder = target, "Floor granted");
                    self.holder = Some(target.to_string());
                }
            }
            EventType::RevokeFloor => {
                if let Some(target) = target
                    && self.holds_floor(target)
                {
                    debug!(holder = target, "Floor revoked");
                    self.holder = None;
                }
            }
            EventType::YieldFloor => {
                if self.holds_floor(sender) {
                    debug!(holder = sender, "Floor yielded");
                    self.holder = None;
                }
            }
            EventType::Bye => {
                if self.holds_floor(sender) {
                    self.holder = None;
                }
                self.participants.retain(|p| p != sender);
            }
            EventType::Invite => {
                if let Some(target) = target
                    && !self.is_participant(target)
                {
                    self.participants.push(target.to_string());
                }
            }
            EventType::Uninvite => {
                if let Some(target) = target {
                    self.participants.retain(|p| p != target);
                    if self.holds_floor(target) {
                        self.holder = None;
                    }
                }
            }
            EventType::RequestFloor
            | EventType::Utterance
            | EventType::Context
            | EventType::DeclineInvite
            | EventType::GetManifests
            | EventType::PublishManifests => {}
        }
    }
}

/// Conversants are keyed by speaker URI, falling back to service URL.
fn target_of(to: &To) -> Option<&str> {
    to.speaker_uri().or(to.service_url())
}
