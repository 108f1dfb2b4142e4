use actix::{Actor, ActorContext, AsyncContext, Context, Handler, Recipient};
use actix_broker::BrokerSubscribe;
use tokio::sync::oneshot;

use tuneforge_api::{Song, SongId, SongUpdate};

use crate::http_client::ApiClient;
use crate::poller::{FetchFn, PollResult, PollSubscription, Poller, POLL_INTERVAL};
use crate::routes::Route;
use crate::session::NotifyNavigate;
use crate::views::Unmount;
use crate::AppContext;

pub async fn list(app: &AppContext) -> anyhow::Result<()> {
    match app.client.list_songs().await {
        Ok(songs) => render_list(&songs),
        Err(error) => super::render_error(&error),
    }

    Ok(())
}

pub async fn watch_list(app: &AppContext) -> anyhow::Result<()> {
    let (done_tx, done_rx) = oneshot::channel();
    let addr = SongListView::new(app.client.clone(), done_tx).start();

    run_until_interrupt(addr.recipient(), done_rx).await
}

pub async fn show(app: &AppContext, id: SongId) -> anyhow::Result<()> {
    match app.client.get_song(&id).await {
        Ok(song) => super::render_song(&song),
        Err(error) => super::render_error(&error),
    }

    Ok(())
}

pub async fn watch(app: &AppContext, id: SongId) -> anyhow::Result<()> {
    let (done_tx, done_rx) = oneshot::channel();
    let addr = SongDetailsView::new(app.client.clone(), id, done_tx).start();

    run_until_interrupt(addr.recipient(), done_rx).await
}

pub async fn update(app: &AppContext,
                    id: SongId,
                    title: Option<String>,
                    description: Option<String>)
                    -> anyhow::Result<()> {
    if title.is_none() && description.is_none() {
        println!("Nothing to update.");
        return Ok(());
    }

    let update = SongUpdate { title, description };

    match app.client.update_song(&id, &update).await {
        Ok(song) => {
            println!("Song updated successfully");
            super::render_song(&song);
        }
        Err(error) => super::render_error(&error),
    }

    Ok(())
}

pub async fn delete(app: &AppContext, id: SongId, yes: bool) -> anyhow::Result<()> {
    if !yes {
        println!("This permanently deletes the song. Pass --yes to confirm.");
        return Ok(());
    }

    match app.client.delete_song(&id).await {
        Ok(()) => println!("Song deleted successfully"),
        Err(error) => super::render_error(&error),
    }

    Ok(())
}

fn render_list(songs: &[Song]) {
    if songs.is_empty() {
        println!("You haven't created any songs yet. Run `tuneforge create` to make one.");
        return;
    }

    for song in songs {
        super::render_song_row(song);
    }
}

// Watch views live until the user interrupts or a forced sign-out tears
// them down; either way the poll subscription is stopped before we return.
async fn run_until_interrupt(view: Recipient<Unmount>, done: oneshot::Receiver<()>) -> anyhow::Result<()> {
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            let _ = view.send(Unmount).await;
        }
        _ = done => {}
    }

    Ok(())
}

struct SongListView {
    client:       ApiClient,
    songs:        Vec<Song>,
    loaded:       bool,
    subscription: Option<PollSubscription>,
    done:         Option<oneshot::Sender<()>>,
}

impl SongListView {
    fn new(client: ApiClient, done: oneshot::Sender<()>) -> Self {
        Self { client,
               songs: Vec::new(),
               loaded: false,
               subscription: None,
               done: Some(done) }
    }
}

impl Actor for SongListView {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        self.subscribe_system_async::<NotifyNavigate>(ctx);

        let client = self.client.clone();
        let fetch: FetchFn<Vec<Song>> = Box::new(move || {
            let client = client.clone();
            Box::pin(async move { client.list_songs().await })
        });

        self.subscription = Some(Poller::start_polling(fetch, POLL_INTERVAL, ctx.address().recipient()));
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        if let Some(done) = self.done.take() {
            let _ = done.send(());
        }
    }
}

impl Handler<PollResult<Vec<Song>>> for SongListView {
    type Result = ();

    fn handle(&mut self, msg: PollResult<Vec<Song>>, _ctx: &mut Self::Context) -> Self::Result {
        match msg.0 {
            Ok(songs) => {
                // each response fully replaces the displayed list
                if !self.loaded || songs != self.songs {
                    render_list(&songs);
                }

                self.songs = songs;
                self.loaded = true;
            }
            Err(error) if error.is_authorization() => {
                // the forced sign-out navigates us away, nothing to render
            }
            Err(error) => {
                // keep the last good state and surface a non-fatal banner
                println!("error: {error} (still refreshing)");
            }
        }
    }
}

impl Handler<Unmount> for SongListView {
    type Result = ();

    fn handle(&mut self, _msg: Unmount, ctx: &mut Self::Context) -> Self::Result {
        if let Some(subscription) = self.subscription.take() {
            subscription.stop();
        }

        ctx.stop();
    }
}

impl Handler<NotifyNavigate> for SongListView {
    type Result = ();

    fn handle(&mut self, msg: NotifyNavigate, ctx: &mut Self::Context) -> Self::Result {
        if msg.route == Route::Login {
            println!("Session expired. Please log in again.");

            if let Some(subscription) = self.subscription.take() {
                subscription.stop();
            }

            ctx.stop();
        }
    }
}

struct SongDetailsView {
    client:       ApiClient,
    id:           SongId,
    song:         Option<Song>,
    subscription: Option<PollSubscription>,
    done:         Option<oneshot::Sender<()>>,
}

impl SongDetailsView {
    fn new(client: ApiClient, id: SongId, done: oneshot::Sender<()>) -> Self {
        Self { client,
               id,
               song: None,
               subscription: None,
               done: Some(done) }
    }
}

impl Actor for SongDetailsView {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        self.subscribe_system_async::<NotifyNavigate>(ctx);

        let client = self.client.clone();
        let id = self.id.clone();
        let fetch: FetchFn<Song> = Box::new(move || {
            let client = client.clone();
            let id = id.clone();
            Box::pin(async move { client.get_song(&id).await })
        });

        self.subscription = Some(Poller::start_polling(fetch, POLL_INTERVAL, ctx.address().recipient()));
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        if let Some(done) = self.done.take() {
            let _ = done.send(());
        }
    }
}

impl Handler<PollResult<Song>> for SongDetailsView {
    type Result = ();

    fn handle(&mut self, msg: PollResult<Song>, _ctx: &mut Self::Context) -> Self::Result {
        match msg.0 {
            Ok(song) => {
                // re-render only when the snapshot changed; polling itself
                // keeps going even after a terminal status
                if self.song.as_ref() != Some(&song) {
                    super::render_song(&song);
                }

                self.song = Some(song);
            }
            Err(error) if error.is_authorization() => {}
            Err(error) => {
                println!("error: {error} (still refreshing)");
            }
        }
    }
}

impl Handler<Unmount> for SongDetailsView {
    type Result = ();

    fn handle(&mut self, _msg: Unmount, ctx: &mut Self::Context) -> Self::Result {
        if let Some(subscription) = self.subscription.take() {
            subscription.stop();
        }

        ctx.stop();
    }
}

impl Handler<NotifyNavigate> for SongDetailsView {
    type Result = ();

    fn handle(&mut self, msg: NotifyNavigate, ctx: &mut Self::Context) -> Self::Result {
        if msg.route == Route::Login {
            println!("Session expired. Please log in again.");

            if let Some(subscription) = self.subscription.take() {
                subscription.stop();
            }

            ctx.stop();
        }
    }
}
