#![cfg(feature = "std")]

//! Score reporting to the external scoreboard service.
//!
//! Reporting is best effort. A missing credential skips it, a failed request
//! is logged, and neither ever feeds back into the game.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::outcome::ScoreReport;

/// The remote scoreboard.
#[async_trait::async_trait]
pub trait Scoreboard: Send + Sync {
    async fn submit_score(&self, report: &ScoreReport, token: &str) -> anyhow::Result<()>;
}

/// Answers "is the user signed in, and with what credential".
pub trait AuthProvider: Send + Sync {
    fn token(&self) -> Option<String>;

    fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

/// A credential fixed at start-up.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: Option<String>) -> Self {
        Self(token)
    }

    pub fn anonymous() -> Self {
        Self(None)
    }
}

impl AuthProvider for StaticToken {
    fn token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Posts `{"game_name": .., "score": ..}` to `{base_url}/submit-score`.
pub struct HttpScoreboard {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpScoreboard {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/submit-score", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl Scoreboard for HttpScoreboard {
    async fn submit_score(&self, report: &ScoreReport, token: &str) -> anyhow::Result<()> {
        self.client
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(report)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// Scoreboard that accepts everything and sends nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct Offline;

#[async_trait::async_trait]
impl Scoreboard for Offline {
    async fn submit_score(&self, _report: &ScoreReport, _token: &str) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Pairs a scoreboard with the credential source and fires reports off in
/// the background.
#[derive(Clone)]
pub struct ScoreReporter {
    scoreboard: Arc<dyn Scoreboard>,
    auth: Arc<dyn AuthProvider>,
}

impl ScoreReporter {
    pub fn new(scoreboard: Arc<dyn Scoreboard>, auth: Arc<dyn AuthProvider>) -> Self {
        Self { scoreboard, auth }
    }

    /// Never submits anything.
    pub fn offline() -> Self {
        Self::new(Arc::new(Offline), Arc::new(StaticToken::anonymous()))
    }

    /// Starts a submission and returns its task, or `None` when there is no
    /// credential to submit with. Must be called inside a tokio runtime.
    pub fn report(&self, report: ScoreReport) -> Option<JoinHandle<()>> {
        let Some(token) = self.auth.token() else {
            log::debug!("Not signed in; skipping {} score report", report.game_id);
            return None;
        };
        let scoreboard = Arc::clone(&self.scoreboard);
        Some(tokio::spawn(async move {
            match scoreboard.submit_score(&report, &token).await {
                Ok(()) => log::info!("{} streak {} uploaded", report.game_id, report.score),
                Err(e) => log::warn!("Score submission error: {:#}", e),
            }
        }))
    }
}
