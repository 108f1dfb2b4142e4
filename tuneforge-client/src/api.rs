use tuneforge_api::{AnonymousSongCreate, AnonymousSongCreated, ApiError, CheckoutRequest, CheckoutSession, LoginOk,
                    PaymentConfig, Song, SongCreate, SongEnvelope, SongId, SongListEnvelope, SongUpdate,
                    SubscriptionCancelled, User, UserCreate, UserEnvelope, UserLogin, UserUpdate};

use crate::http_client::ApiClient;

// auth

impl ApiClient {
    pub async fn signup(&self, signup: &UserCreate) -> Result<User, ApiError> {
        Ok(self.post::<_, UserEnvelope>("auth/signup", signup).await?.user)
    }

    pub async fn login(&self, login: &UserLogin) -> Result<LoginOk, ApiError> {
        self.post("auth/login", login).await
    }

    pub async fn current_user(&self) -> Result<User, ApiError> {
        Ok(self.get::<UserEnvelope>("auth/me").await?.user)
    }

    pub async fn update_profile(&self, update: &UserUpdate) -> Result<User, ApiError> {
        Ok(self.put::<_, UserEnvelope>("auth/me", update).await?.user)
    }
}

// songs

impl ApiClient {
    pub async fn create_song(&self, create: &SongCreate) -> Result<Song, ApiError> {
        Ok(self.post::<_, SongEnvelope>("songs", create).await?.song)
    }

    pub async fn create_anonymous_song(&self, create: &AnonymousSongCreate) -> Result<AnonymousSongCreated, ApiError> {
        self.post("songs/anonymous", create).await
    }

    pub async fn list_songs(&self) -> Result<Vec<Song>, ApiError> {
        Ok(self.get::<SongListEnvelope>("songs").await?.songs)
    }

    pub async fn get_song(&self, id: &SongId) -> Result<Song, ApiError> {
        Ok(self.get::<SongEnvelope>(&format!("songs/{id}")).await?.song)
    }

    pub async fn update_song(&self, id: &SongId, update: &SongUpdate) -> Result<Song, ApiError> {
        Ok(self.put::<_, SongEnvelope>(&format!("songs/{id}"), update).await?.song)
    }

    pub async fn delete_song(&self, id: &SongId) -> Result<(), ApiError> {
        self.delete::<serde_json::Value>(&format!("songs/{id}")).await?;

        Ok(())
    }
}

// payment

impl ApiClient {
    pub async fn payment_config(&self) -> Result<PaymentConfig, ApiError> {
        self.get("payment/config").await
    }

    pub async fn create_checkout_session(&self, request: &CheckoutRequest) -> Result<CheckoutSession, ApiError> {
        self.post("payment/create-checkout-session", request).await
    }

    pub async fn cancel_subscription(&self) -> Result<SubscriptionCancelled, ApiError> {
        self.post_empty("payment/cancel-subscription").await
    }
}
