//! Storefront selection and the named collection/category tables.
//!
//! The store serves different catalogs per country; most endpoints select the
//! store through a numeric storefront id carried in the `X-Apple-Store-Front`
//! header or the feed's `s=` parameter, not through the country code itself.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::common::constants::{DEFAULT_COUNTRY, DEFAULT_LANG};
use crate::common::error::{Result, ScraperError};

/// Storefront ids keyed by upper-case two-letter country code.
static MARKETS: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    HashMap::from([
        ("AE", 143481),
        ("AG", 143540),
        ("AI", 143538),
        ("AL", 143575),
        ("AM", 143524),
        ("AO", 143564),
        ("AR", 143505),
        ("AT", 143445),
        ("AU", 143460),
        ("AZ", 143568),
        ("BB", 143541),
        ("BD", 143490),
        ("BE", 143446),
        ("BG", 143526),
        ("BH", 143559),
        ("BM", 143542),
        ("BN", 143560),
        ("BO", 143556),
        ("BR", 143503),
        ("BS", 143539),
        ("BW", 143525),
        ("BY", 143565),
        ("BZ", 143555),
        ("CA", 143455),
        ("CH", 143459),
        ("CL", 143483),
        ("CN", 143465),
        ("CO", 143501),
        ("CR", 143495),
        ("CY", 143557),
        ("CZ", 143489),
        ("DE", 143443),
        ("DK", 143458),
        ("DM", 143545),
        ("DO", 143508),
        ("DZ", 143563),
        ("EC", 143509),
        ("EE", 143518),
        ("EG", 143516),
        ("ES", 143454),
        ("FI", 143447),
        ("FR", 143442),
        ("GB", 143444),
        ("GD", 143546),
        ("GH", 143573),
        ("GR", 143448),
        ("GT", 143504),
        ("GY", 143553),
        ("HK", 143463),
        ("HN", 143510),
        ("HR", 143494),
        ("HU", 143482),
        ("ID", 143476),
        ("IE", 143449),
        ("IL", 143491),
        ("IN", 143467),
        ("IS", 143558),
        ("IT", 143450),
        ("JM", 143511),
        ("JO", 143528),
        ("JP", 143462),
        ("KE", 143529),
        ("KN", 143548),
        ("KR", 143466),
        ("KW", 143493),
        ("KY", 143544),
        ("KZ", 143517),
        ("LB", 143497),
        ("LC", 143549),
        ("LI", 143522),
        ("LK", 143486),
        ("LT", 143520),
        ("LU", 143451),
        ("LV", 143519),
        ("MD", 143523),
        ("MG", 143531),
        ("MK", 143530),
        ("ML", 143532),
        ("MO", 143515),
        ("MS", 143547),
        ("MT", 143521),
        ("MU", 143533),
        ("MV", 143488),
        ("MX", 143468),
        ("MY", 143473),
        ("NE", 143534),
        ("NG", 143561),
        ("NI", 143512),
        ("NL", 143452),
        ("NO", 143457),
        ("NP", 143484),
        ("NZ", 143461),
        ("OM", 143562),
        ("PA", 143485),
        ("PE", 143507),
        ("PH", 143474),
        ("PK", 143477),
        ("PL", 143478),
        ("PT", 143453),
        ("PY", 143513),
        ("QA", 143498),
        ("RO", 143487),
        ("RS", 143500),
        ("RU", 143469),
        ("SA", 143479),
        ("SE", 143456),
        ("SG", 143464),
        ("SI", 143499),
        ("SK", 143496),
        ("SN", 143535),
        ("SR", 143554),
        ("SV", 143506),
        ("TC", 143552),
        ("TH", 143475),
        ("TN", 143536),
        ("TR", 143480),
        ("TT", 143551),
        ("TW", 143470),
        ("UA", 143492),
        ("UG", 143537),
        ("US", 143441),
        ("UY", 143514),
        ("UZ", 143566),
        ("VC", 143550),
        ("VE", 143502),
        ("VG", 143543),
        ("VN", 143471),
        ("YE", 143571),
        ("ZA", 143472),
    ])
});

/// Resolve the numeric storefront id for a two-letter country code.
pub fn store_front_id(country: &str) -> Result<u32> {
    let code = country.to_ascii_uppercase();
    MARKETS
        .get(code.as_str())
        .copied()
        .ok_or(ScraperError::UnknownCountry(code))
}

/// Country, resolved storefront id and language for one store.
///
/// Resolution happens at construction so an unknown country code fails before
/// any request is made.
#[derive(Debug, Clone)]
pub struct StoreFront {
    pub country: String,
    pub store_id: u32,
    pub lang: String,
}

impl StoreFront {
    pub fn new(country: &str, lang: &str) -> Result<Self> {
        let store_id = store_front_id(country)?;
        Ok(Self {
            country: country.to_ascii_lowercase(),
            store_id,
            lang: lang.to_string(),
        })
    }
}

impl Default for StoreFront {
    fn default() -> Self {
        Self {
            country: DEFAULT_COUNTRY.to_string(),
            // NL storefront; keep in sync with DEFAULT_COUNTRY
            store_id: 143452,
            lang: DEFAULT_LANG.to_string(),
        }
    }
}

// Named collection feeds
pub const TOP_MAC: &str = "topmacapps";
pub const TOP_FREE_MAC: &str = "topfreemacapps";
pub const TOP_GROSSING_MAC: &str = "topgrossingmacapps";
pub const TOP_PAID_MAC: &str = "toppaidmacapps";
pub const NEW_IOS: &str = "newapplications";
pub const NEW_FREE_IOS: &str = "newfreeapplications";
pub const NEW_PAID_IOS: &str = "newpaidapplications";
pub const TOP_FREE_IOS: &str = "topfreeapplications";
pub const TOP_FREE_IPAD: &str = "topfreeipadapplications";
pub const TOP_GROSSING_IOS: &str = "topgrossingapplications";
pub const TOP_GROSSING_IPAD: &str = "topgrossingipadapplications";
pub const TOP_PAID_IOS: &str = "toppaidapplications";
pub const TOP_PAID_IPAD: &str = "toppaidipadapplications";

/// All known collection feeds as (name, feed segment) pairs.
pub fn collection_entries() -> Vec<(&'static str, &'static str)> {
    vec![
        ("TOP_MAC", TOP_MAC),
        ("TOP_FREE_MAC", TOP_FREE_MAC),
        ("TOP_GROSSING_MAC", TOP_GROSSING_MAC),
        ("TOP_PAID_MAC", TOP_PAID_MAC),
        ("NEW_IOS", NEW_IOS),
        ("NEW_FREE_IOS", NEW_FREE_IOS),
        ("NEW_PAID_IOS", NEW_PAID_IOS),
        ("TOP_FREE_IOS", TOP_FREE_IOS),
        ("TOP_FREE_IPAD", TOP_FREE_IPAD),
        ("TOP_GROSSING_IOS", TOP_GROSSING_IOS),
        ("TOP_GROSSING_IPAD", TOP_GROSSING_IPAD),
        ("TOP_PAID_IOS", TOP_PAID_IOS),
        ("TOP_PAID_IPAD", TOP_PAID_IPAD),
    ]
}

// Category (genre) ids as the RSS generator expects them
pub const CATEGORY_BOOKS: u32 = 6018;
pub const CATEGORY_BUSINESS: u32 = 6000;
pub const CATEGORY_CATALOGS: u32 = 6022;
pub const CATEGORY_EDUCATION: u32 = 6017;
pub const CATEGORY_ENTERTAINMENT: u32 = 6016;
pub const CATEGORY_FINANCE: u32 = 6015;
pub const CATEGORY_FOOD_AND_DRINK: u32 = 6023;
pub const CATEGORY_GAMES: u32 = 6014;
pub const CATEGORY_HEALTH_AND_FITNESS: u32 = 6013;
pub const CATEGORY_LIFESTYLE: u32 = 6012;
pub const CATEGORY_MAGAZINES_AND_NEWSPAPERS: u32 = 6021;
pub const CATEGORY_MEDICAL: u32 = 6020;
pub const CATEGORY_MUSIC: u32 = 6011;
pub const CATEGORY_NAVIGATION: u32 = 6010;
pub const CATEGORY_NEWS: u32 = 6009;
pub const CATEGORY_PHOTO_AND_VIDEO: u32 = 6008;
pub const CATEGORY_PRODUCTIVITY: u32 = 6007;
pub const CATEGORY_REFERENCE: u32 = 6006;
pub const CATEGORY_SHOPPING: u32 = 6024;
pub const CATEGORY_SOCIAL_NETWORKING: u32 = 6005;
pub const CATEGORY_SPORTS: u32 = 6004;
pub const CATEGORY_TRAVEL: u32 = 6003;
pub const CATEGORY_UTILITIES: u32 = 6002;
pub const CATEGORY_WEATHER: u32 = 6001;

// Games subgenres
pub const CATEGORY_GAMES_ACTION: u32 = 7001;
pub const CATEGORY_GAMES_ADVENTURE: u32 = 7002;
pub const CATEGORY_GAMES_ARCADE: u32 = 7003;
pub const CATEGORY_GAMES_BOARD: u32 = 7004;
pub const CATEGORY_GAMES_CARD: u32 = 7005;
pub const CATEGORY_GAMES_CASINO: u32 = 7006;
pub const CATEGORY_GAMES_DICE: u32 = 7007;
pub const CATEGORY_GAMES_EDUCATIONAL: u32 = 7008;
pub const CATEGORY_GAMES_FAMILY: u32 = 7009;
pub const CATEGORY_GAMES_MUSIC: u32 = 7011;
pub const CATEGORY_GAMES_PUZZLE: u32 = 7012;
pub const CATEGORY_GAMES_RACING: u32 = 7013;
pub const CATEGORY_GAMES_ROLE_PLAYING: u32 = 7014;
pub const CATEGORY_GAMES_SIMULATION: u32 = 7015;
pub const CATEGORY_GAMES_SPORTS: u32 = 7016;
pub const CATEGORY_GAMES_STRATEGY: u32 = 7017;
pub const CATEGORY_GAMES_TRIVIA: u32 = 7018;
pub const CATEGORY_GAMES_WORD: u32 = 7019;

/// All known categories as (name, genre id) pairs.
pub fn category_entries() -> Vec<(&'static str, u32)> {
    vec![
        ("BOOKS", CATEGORY_BOOKS),
        ("BUSINESS", CATEGORY_BUSINESS),
        ("CATALOGS", CATEGORY_CATALOGS),
        ("EDUCATION", CATEGORY_EDUCATION),
        ("ENTERTAINMENT", CATEGORY_ENTERTAINMENT),
        ("FINANCE", CATEGORY_FINANCE),
        ("FOOD_AND_DRINK", CATEGORY_FOOD_AND_DRINK),
        ("GAMES", CATEGORY_GAMES),
        ("HEALTH_AND_FITNESS", CATEGORY_HEALTH_AND_FITNESS),
        ("LIFESTYLE", CATEGORY_LIFESTYLE),
        ("MAGAZINES_AND_NEWSPAPERS", CATEGORY_MAGAZINES_AND_NEWSPAPERS),
        ("MEDICAL", CATEGORY_MEDICAL),
        ("MUSIC", CATEGORY_MUSIC),
        ("NAVIGATION", CATEGORY_NAVIGATION),
        ("NEWS", CATEGORY_NEWS),
        ("PHOTO_AND_VIDEO", CATEGORY_PHOTO_AND_VIDEO),
        ("PRODUCTIVITY", CATEGORY_PRODUCTIVITY),
        ("REFERENCE", CATEGORY_REFERENCE),
        ("SHOPPING", CATEGORY_SHOPPING),
        ("SOCIAL_NETWORKING", CATEGORY_SOCIAL_NETWORKING),
        ("SPORTS", CATEGORY_SPORTS),
        ("TRAVEL", CATEGORY_TRAVEL),
        ("UTILITIES", CATEGORY_UTILITIES),
        ("WEATHER", CATEGORY_WEATHER),
        ("GAMES_ACTION", CATEGORY_GAMES_ACTION),
        ("GAMES_ADVENTURE", CATEGORY_GAMES_ADVENTURE),
        ("GAMES_ARCADE", CATEGORY_GAMES_ARCADE),
        ("GAMES_BOARD", CATEGORY_GAMES_BOARD),
        ("GAMES_CARD", CATEGORY_GAMES_CARD),
        ("GAMES_CASINO", CATEGORY_GAMES_CASINO),
        ("GAMES_DICE", CATEGORY_GAMES_DICE),
        ("GAMES_EDUCATIONAL", CATEGORY_GAMES_EDUCATIONAL),
        ("GAMES_FAMILY", CATEGORY_GAMES_FAMILY),
        ("GAMES_MUSIC", CATEGORY_GAMES_MUSIC),
        ("GAMES_PUZZLE", CATEGORY_GAMES_PUZZLE),
        ("GAMES_RACING", CATEGORY_GAMES_RACING),
        ("GAMES_ROLE_PLAYING", CATEGORY_GAMES_ROLE_PLAYING),
        ("GAMES_SIMULATION", CATEGORY_GAMES_SIMULATION),
        ("GAMES_SPORTS", CATEGORY_GAMES_SPORTS),
        ("GAMES_STRATEGY", CATEGORY_GAMES_STRATEGY),
        ("GAMES_TRIVIA", CATEGORY_GAMES_TRIVIA),
        ("GAMES_WORD", CATEGORY_GAMES_WORD),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_country_resolves() {
        assert_eq!(store_front_id("gb").unwrap(), 143444);
        assert_eq!(store_front_id("US").unwrap(), 143441);
        assert_eq!(store_front_id("nl").unwrap(), 143452);
    }

    #[test]
    fn unknown_country_is_rejected() {
        let err = store_front_id("xz").unwrap_err();
        assert_eq!(err.to_string(), "country code not found for XZ");
    }

    #[test]
    fn storefront_carries_resolved_id() {
        let store = StoreFront::new("GB", "en").unwrap();
        assert_eq!(store.country, "gb");
        assert_eq!(store.store_id, 143444);
        assert_eq!(store.lang, "en");
    }

    #[test]
    fn default_storefront_matches_default_country() {
        let default = StoreFront::default();
        assert_eq!(default.store_id, store_front_id(DEFAULT_COUNTRY).unwrap());
    }

    #[test]
    fn collection_names_are_known() {
        assert_eq!(NEW_IOS, "newapplications");
        assert_eq!(TOP_FREE_IOS, "topfreeapplications");
        assert!(collection_entries().iter().any(|(name, _)| *name == "TOP_FREE_IOS"));
    }

    #[test]
    fn category_ids_are_known() {
        assert_eq!(CATEGORY_BOOKS, 6018);
        assert_eq!(CATEGORY_GAMES, 6014);
        assert!(category_entries().iter().any(|(_, id)| *id == CATEGORY_GAMES_WORD));
    }
}
