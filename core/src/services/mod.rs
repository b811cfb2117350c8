//! Business services containing domain logic and use cases.

pub mod account;
pub mod apikey;
pub mod token;
pub mod verification;

// Re-export commonly used types
pub use account::{AccountService, IamTokenPair, IdentityProvider, MockIdentityProvider, NewAccount};
pub use apikey::{ApiKeyService, GeneratedApiKey};
pub use token::{TokenCodecConfig, VerificationTokenCodec};
pub use verification::{
    MockNotificationDispatcher, MockSecretStore, NotificationChannel, NotificationDispatcher,
    SecretStore, VerificationConfig, VerificationService,
};
