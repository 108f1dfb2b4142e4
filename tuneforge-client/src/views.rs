use actix::Message;

use tuneforge_api::{ApiError, Song, User};

use crate::routes::Route;

pub mod auth;
pub mod create;
pub mod payment;
pub mod settings;
pub mod songs;

// sent by the command loop when a view is torn down, always stops the view's
// poll subscription first
#[derive(Message)]
#[rtype(result = "()")]
pub struct Unmount;

pub fn render_error(error: &ApiError) {
    if error.is_authorization() {
        println!("Session expired. Please log in again.");
    } else {
        println!("error: {error}");
    }
}

pub fn render_redirect(route: Route) {
    match route {
        Route::Login => println!("You need to be signed in for that. Run `tuneforge login` first."),
        other => println!("redirected to {other:?}"),
    }
}

pub fn plan_line(user: &User) -> String {
    if user.is_paid {
        format!("Premium User - Up to {} tokens", user.max_tokens_limit())
    } else {
        format!("Free User - Up to {} tokens", user.max_tokens_limit())
    }
}

pub fn render_song_row(song: &Song) {
    println!("{:<12} {:<12} {:<32} {}",
             song.id,
             song.status,
             song.title,
             song.created_at.format("%Y-%m-%d %H:%M"));
}

pub fn render_song(song: &Song) {
    println!("{} [{}]", song.title, song.status);

    if let Some(description) = &song.description {
        println!("{description}");
    }

    println!("prompt:     {}", song.prompt);
    println!("max tokens: {}", song.max_tokens);
    println!("created:    {}", song.created_at.format("%Y-%m-%d %H:%M:%S"));

    if let Some(url) = &song.gcs_url {
        println!("audio:      {url}");
    }

    if let Some(message) = &song.error_message {
        println!("generation error: {message}");
    }
}
