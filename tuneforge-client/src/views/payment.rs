use tuneforge_api::CheckoutRequest;

use crate::session::GetSession;
use crate::AppContext;

pub const DEFAULT_SUCCESS_URL: &str = "http://localhost:3000/payment/success";
pub const DEFAULT_CANCEL_URL: &str = "http://localhost:3000/payment/cancel";

pub async fn show_config(app: &AppContext) -> anyhow::Result<()> {
    match app.client.payment_config().await {
        Ok(config) if config.is_usable() => {
            println!("Payments are enabled.");

            if let Some(key) = &config.publishable_key {
                println!("publishable key: {key}");
            }
        }
        Ok(_) => println!("Payment processing is not configured on this server."),
        Err(error) => super::render_error(&error),
    }

    Ok(())
}

pub async fn upgrade(app: &AppContext, success_url: String, cancel_url: String) -> anyhow::Result<()> {
    let session = app.session.send(GetSession).await?;

    if session.user.map(|user| user.is_paid).unwrap_or(false) {
        println!("You're already premium!");
        return Ok(());
    }

    match app.client.payment_config().await {
        Ok(config) if config.is_usable() => {}
        Ok(_) => {
            println!("Payment processing is not configured on this server. You can still use the free tier!");
            return Ok(());
        }
        Err(error) => {
            super::render_error(&error);
            return Ok(());
        }
    }

    let request = CheckoutRequest { success_url, cancel_url };

    match app.client.create_checkout_session(&request).await {
        Ok(checkout) => {
            // a terminal cannot follow a redirect, hand the URL to the user
            println!("Open this URL in your browser to complete checkout:");
            println!("{}", checkout.url);
        }
        Err(error) => super::render_error(&error),
    }

    Ok(())
}
