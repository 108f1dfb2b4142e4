use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PaymentConfig {
    pub enabled:         bool,
    #[serde(default)]
    pub publishable_key: Option<String>,
}

impl PaymentConfig {
    pub fn is_usable(&self) -> bool {
        self.enabled && self.publishable_key.is_some()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CheckoutRequest {
    pub success_url: String,
    pub cancel_url:  String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CheckoutSession {
    pub url: String,
    #[serde(default)]
    pub id:  Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SubscriptionCancelled {
    #[serde(default)]
    pub message: Option<String>,
}
