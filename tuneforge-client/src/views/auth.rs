use tuneforge_api::UserCreate;

use crate::session::{GetSession, Login, Logout, Signup};
use crate::AppContext;

pub async fn login(app: &AppContext, email: String, password: String) -> anyhow::Result<()> {
    match app.session.send(Login { email, password }).await? {
        Ok(user) => println!("Welcome back, {}!", user.first_name),
        Err(error) => super::render_error(&error),
    }

    Ok(())
}

pub async fn signup(app: &AppContext, signup: UserCreate) -> anyhow::Result<()> {
    match app.session.send(Signup(signup)).await? {
        Ok(()) => println!("Account created successfully! Please log in."),
        Err(error) => super::render_error(&error),
    }

    Ok(())
}

pub async fn logout(app: &AppContext) -> anyhow::Result<()> {
    app.session.send(Logout).await?;
    println!("Signed out.");

    Ok(())
}

pub async fn whoami(app: &AppContext) -> anyhow::Result<()> {
    let session = app.session.send(GetSession).await?;

    match session.user {
        Some(user) => {
            println!("{} {} <{}>", user.first_name, user.last_name, user.email);
            println!("{}", super::plan_line(&user));
        }
        None => println!("Not signed in."),
    }

    Ok(())
}
