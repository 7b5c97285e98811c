/// Endpoint roots and request defaults shared across the crate.
// The search and lookup services speak JSON; the RSS generator wraps its
// feed in JSON when asked; the storefront page is HTML with embedded JSON.
pub const SEARCH_BASE_URL: &str =
    "https://search.itunes.apple.com/WebObjects/MZStore.woa/wa/search";
pub const LOOKUP_BASE_URL: &str = "https://itunes.apple.com/lookup";
pub const COLLECTION_BASE_URL: &str =
    "http://ax.itunes.apple.com/WebObjects/MZStoreServices.woa/ws/RSS";
pub const STOREFRONT_PAGE_BASE_URL: &str = "https://itunes.apple.com";

pub const DEFAULT_COUNTRY: &str = "nl";
pub const DEFAULT_LANG: &str = "nl";

/// Page size the search service uses when no amount is given.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// The upstream services define no timeout of their own; every request made
/// by this crate is capped at this many seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36";

/// Key of the similar-apps id array embedded in the storefront page.
pub const SIMILAR_APPS_MARKER: &str = "customersAlsoBoughtApps";
