pub mod auth;
pub mod error;
pub mod payment;
pub mod songs;

pub use auth::{LoginOk, User, UserCreate, UserEnvelope, UserLogin, UserUpdate};
pub use error::{ApiError, ErrorEnvelope};
pub use payment::{CheckoutRequest, CheckoutSession, PaymentConfig, SubscriptionCancelled};
pub use songs::{AnonymousSongCreate, AnonymousSongCreated, Song, SongCreate, SongEnvelope, SongId, SongListEnvelope,
                SongStatus, SongUpdate};
