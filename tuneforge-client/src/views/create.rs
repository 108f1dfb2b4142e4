use tuneforge_api::songs::MIN_MAX_TOKENS;
use tuneforge_api::{AnonymousSongCreate, SongCreate, User};

use crate::session::GetSession;
use crate::AppContext;

pub async fn create(app: &AppContext,
                    title: Option<String>,
                    description: Option<String>,
                    prompt: String,
                    max_tokens: Option<u32>)
                    -> anyhow::Result<()> {
    let session = app.session.send(GetSession).await?;

    let user = match session.user {
        Some(user) => user,
        None => {
            // guests get a one-off download, nothing is saved to a profile
            match app.client.create_anonymous_song(&AnonymousSongCreate { prompt }).await {
                Ok(created) => {
                    println!("Song generated! Download it here:");
                    println!("{}", created.download_url);
                    println!("Sign up to save your songs and access them anytime.");
                }
                Err(error) => super::render_error(&error),
            }

            return Ok(());
        }
    };

    let title = match title {
        Some(title) => title,
        None => {
            println!("A title is required for saved songs (--title).");
            return Ok(());
        }
    };

    // entitlement checks live here, not in the route guard
    if let Some(requested) = max_tokens {
        if let Some(message) = max_tokens_error(&user, requested) {
            println!("{message}");
            return Ok(());
        }
    }

    let create = SongCreate { title,
                              description,
                              prompt,
                              max_tokens };

    match app.client.create_song(&create).await {
        Ok(song) => {
            println!("Song creation started! Processing in background.");
            println!("id: {}", song.id);
        }
        Err(error) => super::render_error(&error),
    }

    Ok(())
}

// everyone may pick a budget within their allowance, premium just has a
// bigger one
fn max_tokens_error(user: &User, requested: u32) -> Option<String> {
    let limit = user.max_tokens_limit();

    if requested < MIN_MAX_TOKENS || requested > limit {
        Some(format!("Max tokens must be between {MIN_MAX_TOKENS} and {limit}."))
    } else {
        None
    }
}
