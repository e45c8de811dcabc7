//! Global limits and defaults for configuration and runtime

/// Minimum accepted search query length (after trimming)
pub const MIN_QUERY_LEN: usize = 2;

/// Maximum accepted search query length
pub const MAX_QUERY_LEN: usize = 100;

/// Default result budget for a search response
pub const DEFAULT_MAX_RESULTS: usize = 20;

/// Maximum configurable result budget
pub const MAX_MAX_RESULTS: usize = 100;

/// Minimum allowed timeout for provider requests in milliseconds
pub const MIN_PROVIDER_TIMEOUT_MS: u64 = 100; // 100ms

/// Maximum allowed timeout for provider requests in milliseconds
pub const MAX_PROVIDER_TIMEOUT_MS: u64 = 30_000; // 30s

/// Default timeout for a single provider call in milliseconds
pub const DEFAULT_PROVIDER_TIMEOUT_MS: u64 = 2_000; // 2s

/// Maximum allowed global fan-out timeout in milliseconds
pub const MAX_GLOBAL_TIMEOUT_MS: u64 = 120_000; // 2min

/// Default global fan-out timeout in milliseconds
pub const DEFAULT_GLOBAL_TIMEOUT_MS: u64 = 4_000; // 4s

/// Grace margin allowed on top of the global deadline before a request
/// is considered to have overrun it
pub const DEADLINE_GRACE_MS: u64 = 250;

/// Default rate limit: requests per minute
pub const DEFAULT_RATE_LIMIT_REQUESTS_PER_MINUTE: u32 = 1000;

/// Default rate limit: burst size (immediate requests allowed)
pub const DEFAULT_RATE_LIMIT_BURST_SIZE: u32 = 100;

/// Rate limit window duration in seconds
pub const RATE_LIMIT_WINDOW_SECONDS: u64 = 60;
