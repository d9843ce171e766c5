//! Static club catalog.
//!
//! This module provides:
//! - Descriptive metadata (country, league, market context) keyed by ticker
//! - Branding (crest, five-color palette) and exchange data used by seeding
//! - Currency symbols per exchange

use serde::Serialize;

/// Descriptive metadata for a club detail view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubMetadata {
    pub country: &'static str,
    pub league: &'static str,
    pub market_context: &'static str,
}

/// Seed-time branding and listing data for one club.
#[derive(Debug, Clone)]
pub struct ClubBranding {
    pub ticker: &'static str,
    pub name: &'static str,
    pub exchange: &'static str,
    pub crest_url: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub gradient_start: &'static str,
    pub gradient_end: &'static str,
    pub glow_color: &'static str,
}

static DEFAULT_METADATA: ClubMetadata = ClubMetadata {
    country: "Unknown",
    league: "Unknown",
    market_context: "A publicly traded football club available for fractional ownership on Fantera.",
};

/// Metadata for every listed club, keyed by ticker.
pub static CLUB_METADATA: &[(&str, ClubMetadata)] = &[
    (
        "JUVE.MI",
        ClubMetadata {
            country: "Italy",
            league: "Serie A",
            market_context: "Italy's most successful club with 36 league titles. Listed on the Borsa Italiana, Juventus is one of only a handful of publicly traded football clubs in the world.",
        },
    ),
    (
        "BVB.DE",
        ClubMetadata {
            country: "Germany",
            league: "Bundesliga",
            market_context: "Germany's second-largest club by revenue, famous for the 'Yellow Wall' at Signal Iduna Park. Listed on the Frankfurt Stock Exchange since 2000.",
        },
    ),
    (
        "AJAX.AS",
        ClubMetadata {
            country: "Netherlands",
            league: "Eredivisie",
            market_context: "Amsterdam's legendary club, known for its youth academy and Total Football philosophy. Listed on Euronext Amsterdam.",
        },
    ),
    (
        "SLB.LS",
        ClubMetadata {
            country: "Portugal",
            league: "Primeira Liga",
            market_context: "Portugal's most decorated club with 38 league titles and two European Cups. Listed on the Euronext Lisbon exchange.",
        },
    ),
    (
        "FCP.LS",
        ClubMetadata {
            country: "Portugal",
            league: "Primeira Liga",
            market_context: "Two-time Champions League winners and Portugal's dominant European competitor. Listed on Euronext Lisbon.",
        },
    ),
    (
        "SCP.LS",
        ClubMetadata {
            country: "Portugal",
            league: "Primeira Liga",
            market_context: "One of Portugal's 'Big Three', famous for developing world-class talent including Cristiano Ronaldo. Listed on Euronext Lisbon.",
        },
    ),
    (
        "SCB.LS",
        ClubMetadata {
            country: "Portugal",
            league: "Primeira Liga",
            market_context: "The 'Warriors of Minho' — a rising force in Portuguese football with European ambitions. Listed on Euronext Lisbon.",
        },
    ),
    (
        "SSL.MI",
        ClubMetadata {
            country: "Italy",
            league: "Serie A",
            market_context: "Rome-based club with a passionate fanbase and a legacy in Italian football. Listed on the Borsa Italiana.",
        },
    ),
    (
        "ASR.MI",
        ClubMetadata {
            country: "Italy",
            league: "Serie A",
            market_context: "The 'Giallorossi' — Roma is one of Italy's most followed clubs with a storied European history. Listed on the Borsa Italiana.",
        },
    ),
    (
        "OLG.PA",
        ClubMetadata {
            country: "France",
            league: "Ligue 1",
            market_context: "France's most successful club in European competition with seven league titles. Listed on Euronext Paris.",
        },
    ),
    (
        "CCP.L",
        ClubMetadata {
            country: "Scotland",
            league: "Scottish Premiership",
            market_context: "Glasgow's green and white, one of the most iconic clubs in world football. Listed on the London Stock Exchange.",
        },
    ),
    (
        "PARKEN.CO",
        ClubMetadata {
            country: "Denmark",
            league: "Superliga",
            market_context: "Denmark's dominant club and regular Champions League participant. Listed on the Copenhagen Stock Exchange.",
        },
    ),
    (
        "GSRAY.IS",
        ClubMetadata {
            country: "Turkey",
            league: "Super Lig",
            market_context: "Turkey's most successful club with a record 24 league titles and passionate global fanbase. Listed on Borsa Istanbul.",
        },
    ),
    (
        "MANU",
        ClubMetadata {
            country: "England",
            league: "Premier League",
            market_context: "One of the most valuable and widely followed football clubs in the world. Listed on the New York Stock Exchange since 2012.",
        },
    ),
    (
        "TICA.MX",
        ClubMetadata {
            country: "Mexico",
            league: "Liga MX",
            market_context: "Mexico's most successful club with 14 league titles, nicknamed 'Las Águilas'. Part of the Televisa group, listed on BMV Mexico.",
        },
    ),
];

/// Look up metadata for a ticker, falling back to a generic description.
pub fn club_metadata(ticker: &str) -> &'static ClubMetadata {
    CLUB_METADATA
        .iter()
        .find(|(t, _)| *t == ticker)
        .map(|(_, metadata)| metadata)
        .unwrap_or(&DEFAULT_METADATA)
}

/// Branding and listing data for every club the platform seeds.
pub static CLUB_BRANDING: &[ClubBranding] = &[
    ClubBranding {
        ticker: "JUVE.MI",
        name: "Juventus FC",
        exchange: "Borsa Italiana",
        crest_url: "/crests/juve.png",
        primary: "#000000",
        secondary: "#FFFFFF",
        gradient_start: "#1a1a1a",
        gradient_end: "#000000",
        glow_color: "rgba(255, 255, 255, 0.3)",
    },
    ClubBranding {
        ticker: "BVB.DE",
        name: "Borussia Dortmund",
        exchange: "Frankfurt SE",
        crest_url: "/crests/bvb.png",
        primary: "#FDE100",
        secondary: "#000000",
        gradient_start: "#FDE100",
        gradient_end: "#B8A000",
        glow_color: "rgba(253, 225, 0, 0.3)",
    },
    ClubBranding {
        ticker: "AJAX.AS",
        name: "AFC Ajax",
        exchange: "Euronext Amsterdam",
        crest_url: "/crests/ajax.png",
        primary: "#D2122E",
        secondary: "#FFFFFF",
        gradient_start: "#D2122E",
        gradient_end: "#8B0000",
        glow_color: "rgba(210, 18, 46, 0.3)",
    },
    ClubBranding {
        ticker: "SLB.LS",
        name: "SL Benfica",
        exchange: "Euronext Lisbon",
        crest_url: "/crests/benfica.png",
        primary: "#FF0000",
        secondary: "#FFFFFF",
        gradient_start: "#FF0000",
        gradient_end: "#B30000",
        glow_color: "rgba(255, 0, 0, 0.3)",
    },
    ClubBranding {
        ticker: "FCP.LS",
        name: "FC Porto",
        exchange: "Euronext Lisbon",
        crest_url: "/crests/porto.png",
        primary: "#003893",
        secondary: "#FFFFFF",
        gradient_start: "#003893",
        gradient_end: "#001F4D",
        glow_color: "rgba(0, 56, 147, 0.3)",
    },
    ClubBranding {
        ticker: "SCP.LS",
        name: "Sporting CP",
        exchange: "Euronext Lisbon",
        crest_url: "/crests/sporting.png",
        primary: "#006B3F",
        secondary: "#FFFFFF",
        gradient_start: "#006B3F",
        gradient_end: "#004D2C",
        glow_color: "rgba(0, 107, 63, 0.3)",
    },
    ClubBranding {
        ticker: "SCB.LS",
        name: "SC Braga",
        exchange: "Euronext Lisbon",
        crest_url: "/crests/braga.png",
        primary: "#C8102E",
        secondary: "#FFFFFF",
        gradient_start: "#C8102E",
        gradient_end: "#8B0A1E",
        glow_color: "rgba(200, 16, 46, 0.3)",
    },
    ClubBranding {
        ticker: "SSL.MI",
        name: "SS Lazio",
        exchange: "Borsa Italiana",
        crest_url: "/crests/lazio.png",
        primary: "#87CEEB",
        secondary: "#FFFFFF",
        gradient_start: "#87CEEB",
        gradient_end: "#4682B4",
        glow_color: "rgba(135, 206, 235, 0.3)",
    },
    ClubBranding {
        ticker: "ASR.MI",
        name: "AS Roma",
        exchange: "Borsa Italiana",
        crest_url: "/crests/roma.png",
        primary: "#8E1F2F",
        secondary: "#F0BC42",
        gradient_start: "#8E1F2F",
        gradient_end: "#5A1320",
        glow_color: "rgba(142, 31, 47, 0.3)",
    },
    ClubBranding {
        ticker: "OLG.PA",
        name: "Olympique Lyonnais",
        exchange: "Euronext Paris",
        crest_url: "/crests/lyon.png",
        primary: "#0033A0",
        secondary: "#FFFFFF",
        gradient_start: "#0033A0",
        gradient_end: "#001F66",
        glow_color: "rgba(0, 51, 160, 0.3)",
    },
    ClubBranding {
        ticker: "CCP.L",
        name: "Celtic FC",
        exchange: "London SE",
        crest_url: "/crests/celtic.png",
        primary: "#008000",
        secondary: "#FFFFFF",
        gradient_start: "#008000",
        gradient_end: "#004D00",
        glow_color: "rgba(0, 128, 0, 0.3)",
    },
    ClubBranding {
        ticker: "PARKEN.CO",
        name: "FC København",
        exchange: "Copenhagen SE",
        crest_url: "/crests/copenhagen.png",
        primary: "#006AB5",
        secondary: "#FFFFFF",
        gradient_start: "#006AB5",
        gradient_end: "#003D66",
        glow_color: "rgba(0, 106, 181, 0.3)",
    },
    ClubBranding {
        ticker: "GSRAY.IS",
        name: "Galatasaray SK",
        exchange: "Borsa Istanbul",
        crest_url: "/crests/galatasaray.png",
        primary: "#FF6600",
        secondary: "#8B0000",
        gradient_start: "#FF6600",
        gradient_end: "#CC5200",
        glow_color: "rgba(255, 102, 0, 0.3)",
    },
    ClubBranding {
        ticker: "MANU",
        name: "Manchester United",
        exchange: "NYSE",
        crest_url: "/crests/manu.png",
        primary: "#DA291C",
        secondary: "#FBE122",
        gradient_start: "#DA291C",
        gradient_end: "#8B1A12",
        glow_color: "rgba(218, 41, 28, 0.3)",
    },
    ClubBranding {
        ticker: "TICA.MX",
        name: "Club América",
        exchange: "BMV Mexico",
        crest_url: "/crests/america.png",
        primary: "#FFDD00",
        secondary: "#002366",
        gradient_start: "#FFDD00",
        gradient_end: "#CCB100",
        glow_color: "rgba(255, 221, 0, 0.3)",
    },
];

/// Currency symbol for an exchange, defaulting to dollars.
pub fn currency_symbol(exchange: &str) -> &'static str {
    match exchange {
        "Borsa Italiana" | "Frankfurt SE" | "Euronext Amsterdam" | "Euronext Lisbon"
        | "Euronext Paris" => "€",
        "London SE" => "£",
        "Copenhagen SE" => "kr ",
        "Borsa Istanbul" => "₺",
        "BMV Mexico" => "MX$",
        _ => "$",
    }
}
