//! Integration test common infrastructure.
//!
//! Provides recording collaborators and a ready-made router so tests can
//! assert on which remote calls the engine made.

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use roster_engine::config::Config;
use roster_engine::services::{ActionExecutor, MessageSender, RemoteError};
use roster_engine::state::{RosterEntry, Status, SupervisorRecord, ViewContext, ViewProfile};
use roster_engine::ActionRouter;
use std::sync::Arc;

pub const SECRET: &str = "roster-shared-secret";
/// Encrypts "sup-4821" under SECRET.
pub const TOKEN_SUP_4821: &str = "O3jcd3HnPp0=";
/// Decrypts to invalid UTF-8 under SECRET.
pub const TOKEN_GARBAGE: &str = "t/NR";

pub const SUPERVISOR: &str = "sup-1";
pub const HIDDEN_SUPERVISOR: &str = "sup-4821";
pub const OWNER: &str = "u-owner";
pub const STRANGER: &str = "u-stranger";

/// One remote mutation observed by the executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutorCall {
    SetStatus(String, Status),
    TogglePaid(String, bool),
    Delete(String),
}

#[derive(Default)]
pub struct RecordingExecutor {
    pub calls: Mutex<Vec<ExecutorCall>>,
    pub fail_with: Mutex<Option<RemoteError>>,
}

impl RecordingExecutor {
    pub fn fail_next(&self, error: RemoteError) {
        *self.fail_with.lock() = Some(error);
    }

    pub fn calls(&self) -> Vec<ExecutorCall> {
        self.calls.lock().clone()
    }

    fn record(&self, call: ExecutorCall) -> Result<(), RemoteError> {
        self.calls.lock().push(call);
        match self.fail_with.lock().take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ActionExecutor for RecordingExecutor {
    async fn set_status(&self, entry_id: &str, status: &Status) -> Result<(), RemoteError> {
        self.record(ExecutorCall::SetStatus(entry_id.to_string(), status.clone()))
    }

    async fn toggle_paid(&self, entry_id: &str, paid: bool) -> Result<(), RemoteError> {
        self.record(ExecutorCall::TogglePaid(entry_id.to_string(), paid))
    }

    async fn delete_entry(&self, entry_id: &str) -> Result<(), RemoteError> {
        self.record(ExecutorCall::Delete(entry_id.to_string()))
    }
}

#[derive(Default)]
pub struct RecordingSender {
    pub sent: Mutex<Vec<(String, String)>>,
    pub failing: Mutex<Vec<String>>,
}

impl RecordingSender {
    pub fn fail_for(&self, recipient: &str) {
        self.failing.lock().push(recipient.to_string());
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().clone()
    }

    pub fn recipients(&self) -> Vec<String> {
        self.sent.lock().iter().map(|(r, _)| r.clone()).collect()
    }
}

#[async_trait]
impl MessageSender for RecordingSender {
    async fn send_message(&self, recipient_id: &str, text: &str) -> Result<(), RemoteError> {
        self.sent
            .lock()
            .push((recipient_id.to_string(), text.to_string()));
        if self.failing.lock().iter().any(|r| r == recipient_id) {
            Err(RemoteError::new("recipient unreachable").with_status(404))
        } else {
            Ok(())
        }
    }
}

pub fn test_config() -> Config {
    Config::from_toml_str(&format!(
        r#"
[identity]
secret = "{SECRET}"

[notify]
fallback_recipient = "desk-7"
staff_proxy = "proxy-1"
staff_recipients = ["staff-a", "staff-b"]
"#
    ))
    .expect("test config parses")
}

pub struct Harness {
    pub router: Arc<ActionRouter>,
    pub executor: Arc<RecordingExecutor>,
    pub sender: Arc<RecordingSender>,
}

impl Harness {
    pub fn new() -> Self {
        let executor = Arc::new(RecordingExecutor::default());
        let sender = Arc::new(RecordingSender::default());
        let router = Arc::new(ActionRouter::new(
            &test_config(),
            executor.clone(),
            sender.clone(),
        ));
        router.load(sample_roster());
        Self {
            router,
            executor,
            sender,
        }
    }
}

/// e1: owned by OWNER, no advertiser. e2: staff proxy. e3: other advertiser.
/// e4: redacted. e5: blocked.
pub fn sample_roster() -> Vec<RosterEntry> {
    vec![
        RosterEntry::new("e1", "Ann", OWNER)
            .with_status("pending")
            .with_amounts(Some(1500), Some(0)),
        RosterEntry::new("e2", "Bo", OWNER)
            .with_status("ready")
            .with_advertiser("proxy-1")
            .with_amounts(Some(2000), Some(2000))
            .with_paid(true),
        RosterEntry::new("e3", "Cy", "u-other")
            .with_status("confirmed")
            .with_advertiser("adv-9"),
        RosterEntry::new("e4", "***", OWNER).with_status("backup"),
        RosterEntry {
            field_blocked: true,
            ..RosterEntry::new("e5", "Dee", OWNER).with_status("pending")
        },
    ]
}

pub fn supervisors() -> Vec<SupervisorRecord> {
    vec![
        SupervisorRecord::plain(SUPERVISOR, "Mira"),
        SupervisorRecord::obfuscated("Valen", TOKEN_SUP_4821),
    ]
}

pub fn manager_view() -> ViewContext {
    ViewContext::new(ViewProfile::Manager).with_supervisors(supervisors())
}

pub fn member_view() -> ViewContext {
    ViewContext::new(ViewProfile::Member).with_supervisors(supervisors())
}
