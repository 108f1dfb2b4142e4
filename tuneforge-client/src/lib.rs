use std::path::PathBuf;

use actix::{Addr, Supervisor};
use clap::Args;
use reqwest::Url;

use crate::credentials::{CredentialsFile, TokenCell};
use crate::http_client::ApiClient;
use crate::session::{Initialize, SessionActor};

pub mod api;
pub mod credentials;
pub mod http_client;
pub mod poller;
pub mod routes;
pub mod session;
pub mod views;

#[derive(Args, Clone, Debug)]
pub struct ClientOpts {
    /// Base URL of the Tuneforge API
    #[clap(long, env = "TUNEFORGE_API_URL", default_value = "http://localhost:5000/api")]
    pub api_url: Url,

    /// Where access and refresh tokens persist between runs
    #[clap(long, env = "TUNEFORGE_CREDENTIALS", default_value = "tuneforge-credentials.json")]
    pub credentials_file: PathBuf,
}

// The one shared context: every view gets this by reference instead of
// reaching for globals.
#[derive(Clone)]
pub struct AppContext {
    pub client:  ApiClient,
    pub session: Addr<SessionActor>,
}

pub async fn init(opts: &ClientOpts) -> anyhow::Result<AppContext> {
    let tokens = TokenCell::default();
    let client = ApiClient::new(opts.api_url.clone(), tokens);
    let credentials = CredentialsFile::new(opts.credentials_file.clone());

    let session = Supervisor::start({
        let client = client.clone();
        move |_| SessionActor::new(client, credentials)
    });

    // restore a persisted session before anything renders
    session.send(Initialize).await?;

    Ok(AppContext { client, session })
}
