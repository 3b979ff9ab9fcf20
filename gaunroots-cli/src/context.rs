use anyhow::{Context, Result, bail};
use reqwest::Client;
use shared::{GaunRootsClient, SessionRecord, SessionRepository, config::client::ClientConfig};
use tracing::debug;

use crate::session_store::FileSessionStore;

pub const LOGIN_HINT: &str = "not logged in; run `gaunroots login` first";

/// What every backend-facing command needs.
#[derive(Debug)]
pub struct AppContext {
    pub client: GaunRootsClient,
    pub session: FileSessionStore,
}

impl AppContext {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("gaunroots-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;
        let client = GaunRootsClient::from_url(config.parsed_base_url()?)?.with_http_client(http);
        let session = FileSessionStore::new(
            config
                .session_path
                .clone()
                .unwrap_or_else(FileSessionStore::default_path),
        );
        debug!(base_url = %client.base_url(), session = %session.path().display(), "client ready");
        Ok(Self { client, session })
    }

    /// The stored session, or an error telling the user to log in.
    pub fn require_session(&self) -> Result<SessionRecord> {
        self.session.current_user().context(LOGIN_HINT)
    }

    pub fn require_seller(&self) -> Result<SessionRecord> {
        let record = self.require_session()?;
        if !record.is_seller() {
            bail!("this command needs a seller account; `{}` is a buyer", record.name);
        }
        Ok(record)
    }
}
