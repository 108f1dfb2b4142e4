use actix::{fut, Actor, Context, Handler, Message, MessageResponse, ResponseActFuture, Supervised, WrapFuture};
use actix::ActorFutureExt;
use actix_broker::{BrokerIssue, BrokerSubscribe};
use tracing::*;

use tuneforge_api::{ApiError, LoginOk, User, UserCreate, UserLogin, UserUpdate};

use crate::credentials::{CredentialsFile, Tokens};
use crate::http_client::ApiClient;
use crate::routes::Route;

// Read-only view of "who is logged in", handed to the guard and the views.
// Invariant: a user is only ever present while tokens are present.
#[derive(MessageResponse, Clone, Debug, Default)]
pub struct Session {
    pub user: Option<User>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct Initialize;

#[derive(Message)]
#[rtype(result = "Result<User, ApiError>")]
pub struct Login {
    pub email:    String,
    pub password: String,
}

#[derive(Message)]
#[rtype(result = "Result<(), ApiError>")]
pub struct Signup(pub UserCreate);

#[derive(Message)]
#[rtype(result = "()")]
pub struct Logout;

#[derive(Message)]
#[rtype(result = "Result<User, ApiError>")]
pub struct UpdateProfile(pub UserUpdate);

// Re-fetch the current user, e.g. after a subscription change the server
// knows about but we do not
#[derive(Message)]
#[rtype(result = "Result<User, ApiError>")]
pub struct Refresh;

#[derive(Message)]
#[rtype(result = "Session")]
pub struct GetSession;

// issued by the http client whenever any endpoint answers 401
#[derive(Message, Clone)]
#[rtype(result = "()")]
pub struct NotifyAuthExpired;

#[derive(Message, Clone)]
#[rtype(result = "()")]
pub struct NotifySessionChanged {
    pub session: Session,
}

#[derive(Message, Clone)]
#[rtype(result = "()")]
pub struct NotifyNavigate {
    pub route: Route,
}

pub struct SessionActor {
    client:      ApiClient,
    credentials: CredentialsFile,
    user:        Option<User>,
}

impl SessionActor {
    pub fn new(client: ApiClient, credentials: CredentialsFile) -> Self {
        Self { client,
               credentials,
               user: None }
    }

    fn apply_login(&mut self, ok: LoginOk) {
        let tokens = Tokens { access_token:  ok.access_token,
                              refresh_token: ok.refresh_token, };

        self.client.tokens().set(tokens.clone());

        if let Err(error) = self.credentials.save(&tokens) {
            warn!(%error, "failed to persist credentials");
        }

        self.user = Some(ok.user);
        self.emit_changed();
    }

    fn clear(&mut self) {
        self.client.tokens().clear();

        if let Err(error) = self.credentials.clear() {
            warn!(%error, "failed to clear persisted credentials");
        }

        self.user = None;
    }

    fn snapshot(&self) -> Session {
        Session { user: self.user.clone() }
    }

    fn emit_changed(&self) {
        self.issue_system_async(NotifySessionChanged { session: self.snapshot() });
    }
}

impl Actor for SessionActor {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        self.restarting(ctx);
    }
}

impl Supervised for SessionActor {
    fn restarting(&mut self, ctx: &mut Self::Context) {
        self.subscribe_system_async::<NotifyAuthExpired>(ctx);
    }
}

impl Handler<Initialize> for SessionActor {
    type Result = ResponseActFuture<Self, ()>;

    fn handle(&mut self, _msg: Initialize, _ctx: &mut Self::Context) -> Self::Result {
        let stored = match self.credentials.load() {
            Ok(Some(tokens)) => tokens,
            Ok(None) => return Box::pin(fut::ready(())),
            Err(error) => {
                warn!(%error, "failed to read stored credentials");
                return Box::pin(fut::ready(()));
            }
        };

        self.client.tokens().set(stored);

        let client = self.client.clone();

        // a single fetch, no retries: either the token still works or we
        // throw it away
        Box::pin(async move { client.current_user().await }.into_actor(self)
                                                           .map(|result, actor, _ctx| match result {
                                                               Ok(user) => {
                                                                   actor.user = Some(user);
                                                                   actor.emit_changed();
                                                               }
                                                               Err(error) => {
                                                                   debug!(%error, "stored credentials rejected");
                                                                   if !error.is_authorization() {
                                                                       actor.clear();
                                                                   }
                                                               }
                                                           }))
    }
}

impl Handler<Login> for SessionActor {
    type Result = ResponseActFuture<Self, Result<User, ApiError>>;

    fn handle(&mut self, msg: Login, _ctx: &mut Self::Context) -> Self::Result {
        let client = self.client.clone();
        let login = UserLogin { email:    msg.email,
                                password: msg.password, };

        Box::pin(async move { client.login(&login).await }.into_actor(self)
                                                          .map(|result, actor, _ctx| match result {
                                                              Ok(ok) => {
                                                                  let user = ok.user.clone();
                                                                  actor.apply_login(ok);
                                                                  Ok(user)
                                                              }
                                                              Err(error) => Err(as_login_error(error)),
                                                          }))
    }
}

impl Handler<Signup> for SessionActor {
    type Result = ResponseActFuture<Self, Result<(), ApiError>>;

    fn handle(&mut self, msg: Signup, _ctx: &mut Self::Context) -> Self::Result {
        let client = self.client.clone();

        // signup does not establish a session, the flow requires an explicit
        // login afterwards
        Box::pin(async move { client.signup(&msg.0).await.map(|_user| ()) }.into_actor(self))
    }
}

impl Handler<Logout> for SessionActor {
    type Result = ();

    fn handle(&mut self, _msg: Logout, _ctx: &mut Self::Context) -> Self::Result {
        self.clear();
        self.emit_changed();
    }
}

impl Handler<UpdateProfile> for SessionActor {
    type Result = ResponseActFuture<Self, Result<User, ApiError>>;

    fn handle(&mut self, msg: UpdateProfile, _ctx: &mut Self::Context) -> Self::Result {
        let client = self.client.clone();

        Box::pin(async move { client.update_profile(&msg.0).await }.into_actor(self)
                                                                   .map(|result, actor, _ctx| {
                                                                       // the server owns derived fields like is_paid
                                                                       if let Ok(user) = &result {
                                                                           actor.user = Some(user.clone());
                                                                           actor.emit_changed();
                                                                       }

                                                                       result
                                                                   }))
    }
}

impl Handler<Refresh> for SessionActor {
    type Result = ResponseActFuture<Self, Result<User, ApiError>>;

    fn handle(&mut self, _msg: Refresh, _ctx: &mut Self::Context) -> Self::Result {
        let client = self.client.clone();

        Box::pin(async move { client.current_user().await }.into_actor(self)
                                                           .map(|result, actor, _ctx| {
                                                               if let Ok(user) = &result {
                                                                   actor.user = Some(user.clone());
                                                                   actor.emit_changed();
                                                               }

                                                               result
                                                           }))
    }
}

impl Handler<GetSession> for SessionActor {
    type Result = Session;

    fn handle(&mut self, _msg: GetSession, _ctx: &mut Self::Context) -> Self::Result {
        self.snapshot()
    }
}

impl Handler<NotifyAuthExpired> for SessionActor {
    type Result = ();

    fn handle(&mut self, _msg: NotifyAuthExpired, _ctx: &mut Self::Context) -> Self::Result {
        // concurrent in-flight 401s collapse into a single sign-out and a
        // single navigation to the login view
        if self.user.is_none() && self.client.tokens().is_empty() {
            return;
        }

        info!("session expired, signing out");

        self.clear();
        self.emit_changed();
        self.issue_system_async(NotifyNavigate { route: Route::Login });
    }
}

fn as_login_error(error: ApiError) -> ApiError {
    match error {
        // the login endpoint answers 401 for bad credentials, which is not
        // an expired session
        ApiError::Authorization(message) => ApiError::Auth(message),
        other => other,
    }
}
