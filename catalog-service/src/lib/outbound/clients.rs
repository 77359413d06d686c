pub mod gemini;
pub mod google;
pub mod midtrans;

pub use gemini::GeminiClient;
pub use google::GoogleTokenVerifier;
pub use midtrans::MidtransClient;
