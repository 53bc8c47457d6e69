//! Admin mailbox side-channel
//!
//! Delivers event notices for a narrow set of events (new order, new shop
//! order, new demand) to one fixed administrative mailbox via a mail
//! relay webhook. Strictly best-effort: notices are handed to a
//! background worker over an unbounded channel; relay failures are
//! logged and dropped, and the sender never waits on delivery.

use serde::Serialize;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::core::{BackgroundTasks, Config, TaskKind};

/// A notice queued for the admin mailbox.
#[derive(Debug, Clone, Serialize)]
pub struct AdminNotice {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Handle used by the dispatcher to enqueue notices.
#[derive(Clone, Debug)]
pub struct Mailer {
    tx: Option<mpsc::UnboundedSender<AdminNotice>>,
    admin_email: String,
}

impl Mailer {
    /// Start the mail worker and return the sending handle.
    ///
    /// With no relay configured the handle is inert and notices are
    /// dropped at the door with a debug log.
    pub fn start(config: &Config, tasks: &mut BackgroundTasks) -> Self {
        let Some(relay_url) = config.mail_relay_url.clone() else {
            tracing::info!("MAIL_RELAY_URL not set, admin mail side-channel disabled");
            return Self::disabled(&config.admin_email);
        };

        let (tx, rx) = mpsc::unbounded_channel();
        let shutdown = tasks.shutdown_token();
        tasks.spawn("mail_worker", TaskKind::Worker, async move {
            worker_loop(relay_url, rx, shutdown).await;
        });

        Self {
            tx: Some(tx),
            admin_email: config.admin_email.clone(),
        }
    }

    /// Inert handle: used when no relay is configured, and by tests.
    pub fn disabled(admin_email: &str) -> Self {
        Self {
            tx: None,
            admin_email: admin_email.to_string(),
        }
    }

    /// Queue a notice for the admin mailbox. Never fails, never blocks.
    pub fn notify_admin(&self, subject: impl Into<String>, body: impl Into<String>) {
        let notice = AdminNotice {
            to: self.admin_email.clone(),
            subject: subject.into(),
            body: body.into(),
        };
        match &self.tx {
            Some(tx) => {
                if tx.send(notice).is_err() {
                    tracing::warn!("Mail worker gone, dropping admin notice");
                }
            }
            None => {
                tracing::debug!(subject = %notice.subject, "Mail side-channel disabled, notice dropped");
            }
        }
    }
}

async fn worker_loop(
    relay_url: String,
    mut rx: mpsc::UnboundedReceiver<AdminNotice>,
    shutdown: CancellationToken,
) {
    let client = reqwest::Client::new();
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                tracing::debug!("Mail worker shutting down");
                break;
            }
            notice = rx.recv() => {
                let Some(notice) = notice else { break };
                deliver(&client, &relay_url, &notice).await;
            }
        }
    }
}

/// POST the notice to the relay. Failure is logged and swallowed.
async fn deliver(client: &reqwest::Client, relay_url: &str, notice: &AdminNotice) {
    match client.post(relay_url).json(notice).send().await {
        Ok(resp) if resp.status().is_success() => {
            tracing::debug!(subject = %notice.subject, "Admin notice delivered");
        }
        Ok(resp) => {
            tracing::warn!(
                subject = %notice.subject,
                status = %resp.status(),
                "Mail relay rejected admin notice"
            );
        }
        Err(e) => {
            tracing::warn!(subject = %notice.subject, error = %e, "Mail relay unreachable");
        }
    }
}
