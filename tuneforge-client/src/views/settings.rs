use tuneforge_api::UserUpdate;

use crate::session::{Refresh, UpdateProfile};
use crate::AppContext;

pub async fn update_profile(app: &AppContext, update: UserUpdate) -> anyhow::Result<()> {
    if update.first_name.is_none() && update.last_name.is_none() && update.email.is_none() {
        println!("Nothing to update.");
        return Ok(());
    }

    match app.session.send(UpdateProfile(update)).await? {
        Ok(user) => {
            println!("Profile updated successfully");
            println!("{} {} <{}>", user.first_name, user.last_name, user.email);
        }
        Err(error) => super::render_error(&error),
    }

    Ok(())
}

pub async fn cancel_subscription(app: &AppContext, yes: bool) -> anyhow::Result<()> {
    if !yes {
        println!("This cancels your premium subscription. Pass --yes to confirm.");
        return Ok(());
    }

    match app.client.cancel_subscription().await {
        Ok(_) => {
            println!("Subscription cancelled successfully");

            // pick up the downgraded entitlements right away
            let _ = app.session.send(Refresh).await?;
        }
        Err(error) => super::render_error(&error),
    }

    Ok(())
}
