use std::env;

use clap::{Parser, Subcommand};

use tuneforge_api::{SongId, UserCreate, UserUpdate};
use tuneforge_client::routes::{self, Access, Route};
use tuneforge_client::session::GetSession;
use tuneforge_client::views;
use tuneforge_client::{AppContext, ClientOpts};

#[derive(Parser, Debug)]
#[clap(name = "tuneforge", about = "Create AI-generated songs from text prompts")]
struct Opts {
    #[clap(flatten)]
    client: ClientOpts,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account
    Signup {
        #[clap(long)]
        email:      String,
        #[clap(long)]
        password:   String,
        #[clap(long)]
        first_name: String,
        #[clap(long)]
        last_name:  String,
    },

    /// Sign in and persist the session
    Login {
        #[clap(long)]
        email:    String,
        #[clap(long)]
        password: String,
    },

    /// Sign out and clear persisted credentials
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Go to your songs when signed in, the create form otherwise
    Home,

    /// Create a song; guests get an immediate anonymous download
    Create {
        /// Song title (required for saved songs)
        #[clap(long)]
        title:       Option<String>,
        #[clap(long)]
        description: Option<String>,
        /// What the song should sound like
        #[clap(long)]
        prompt:      String,
        /// Token budget for generation, bounded by your plan's allowance
        #[clap(long)]
        max_tokens:  Option<u32>,
    },

    /// List your songs
    Songs {
        /// Keep refreshing until interrupted
        #[clap(long)]
        watch: bool,
    },

    /// Show one song
    Song {
        id:    String,
        /// Keep refreshing until interrupted
        #[clap(long)]
        watch: bool,
    },

    /// Edit a song's title or description
    Update {
        id:          String,
        #[clap(long)]
        title:       Option<String>,
        #[clap(long)]
        description: Option<String>,
    },

    /// Delete a song
    Delete {
        id:  String,
        #[clap(long)]
        yes: bool,
    },

    /// Update profile settings
    Settings {
        #[clap(long)]
        first_name: Option<String>,
        #[clap(long)]
        last_name:  Option<String>,
        #[clap(long)]
        email:      Option<String>,
    },

    /// Subscription management
    #[clap(subcommand)]
    Payment(PaymentCommand),
}

#[derive(Subcommand, Debug)]
enum PaymentCommand {
    /// Show whether payments are enabled on the server
    Config,

    /// Start a premium checkout session
    Upgrade {
        #[clap(long, default_value = views::payment::DEFAULT_SUCCESS_URL)]
        success_url: String,
        #[clap(long, default_value = views::payment::DEFAULT_CANCEL_URL)]
        cancel_url:  String,
    },

    /// Cancel the premium subscription
    Cancel {
        #[clap(long)]
        yes: bool,
    },
}

fn route_for(command: &Command) -> Route {
    match command {
        Command::Signup { .. } => Route::Signup,
        Command::Login { .. } => Route::Login,
        Command::Logout | Command::Whoami | Command::Home => Route::Home,
        Command::Create { .. } => Route::Create,
        Command::Songs { .. } => Route::Songs,
        Command::Song { .. } | Command::Update { .. } | Command::Delete { .. } => Route::SongDetails,
        Command::Settings { .. } => Route::Settings,
        Command::Payment(_) => Route::Payment,
    }
}

#[actix::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenv::dotenv();

    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info,tuneforge_client=debug,tuneforge_api=debug");
    }

    tracing_subscriber::fmt::init();

    let opts = Opts::parse();

    let app = tuneforge_client::init(&opts.client).await?;

    // the guard runs on every navigation, session state may have changed
    // since the last run (e.g. the token expired)
    let session = app.session.send(GetSession).await?;

    match routes::can_enter(route_for(&opts.command), &session) {
        Access::Allow => {}
        Access::RedirectTo(route) => {
            views::render_redirect(route);
            return Ok(());
        }
    }

    dispatch(&app, opts.command).await
}

async fn dispatch(app: &AppContext, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Signup { email,
                          password,
                          first_name,
                          last_name, } => {
            views::auth::signup(app,
                                UserCreate { email,
                                             password,
                                             first_name,
                                             last_name }).await
        }
        Command::Login { email, password } => views::auth::login(app, email, password).await,
        Command::Logout => views::auth::logout(app).await,
        Command::Whoami => views::auth::whoami(app).await,
        Command::Home => home(app).await,
        Command::Create { title,
                          description,
                          prompt,
                          max_tokens, } => views::create::create(app, title, description, prompt, max_tokens).await,
        Command::Songs { watch } => {
            if watch {
                views::songs::watch_list(app).await
            } else {
                views::songs::list(app).await
            }
        }
        Command::Song { id, watch } => {
            let id = SongId::from(id);

            if watch {
                views::songs::watch(app, id).await
            } else {
                views::songs::show(app, id).await
            }
        }
        Command::Update { id, title, description } => {
            views::songs::update(app, SongId::from(id), title, description).await
        }
        Command::Delete { id, yes } => views::songs::delete(app, SongId::from(id), yes).await,
        Command::Settings { first_name,
                            last_name,
                            email, } => {
            views::settings::update_profile(app,
                                            UserUpdate { first_name,
                                                         last_name,
                                                         email }).await
        }
        Command::Payment(PaymentCommand::Config) => views::payment::show_config(app).await,
        Command::Payment(PaymentCommand::Upgrade { success_url, cancel_url }) => {
            views::payment::upgrade(app, success_url, cancel_url).await
        }
        Command::Payment(PaymentCommand::Cancel { yes }) => views::settings::cancel_subscription(app, yes).await,
    }
}

async fn home(app: &AppContext) -> anyhow::Result<()> {
    let session = app.session.send(GetSession).await?;

    match routes::home_target(&session) {
        Route::Songs => views::songs::list(app).await,
        _ => {
            println!("You're browsing as a guest. Run `tuneforge create --prompt \"...\"` to generate a song,");
            println!("or `tuneforge signup` to save songs to a profile.");

            Ok(())
        }
    }
}
