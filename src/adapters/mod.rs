// Adapters layer: concrete implementations of the domain ports (http, files).

pub mod http_event;
pub mod preferences;
pub mod relay;
pub mod resend;
pub mod supabase;

pub use preferences::FilePreferenceStore;
pub use relay::HttpMailRelay;
pub use resend::ResendMailer;
pub use supabase::SupabaseSource;
