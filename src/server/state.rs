use crate::config::Config;
use crate::location::ServiceResolver;

/// Shared read-only state. Nothing here mutates after startup, so requests
/// share it without locks.
pub struct AppState {
    pub config: Config,
    pub resolver: ServiceResolver,
}
