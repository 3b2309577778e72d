//! # Presentation Helpers
//!
//! Pure formatting for the views that read the cart: the navbar badge, the
//! sidebar's item counter and currency amounts. The cart store never sees
//! any of these strings; it deals only in [`Money`] and integers.
//!
//! Prices are always US dollars; only the rendering differs per locale:
//!
//! | Locale | 1234.5 renders as |
//! |--------|-------------------|
//! | en-US  | `$1,234.50`       |
//! | pt-BR  | `US$ 1.234,50`    |
//! | es-ES  | `1234,50 US$`     |

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::BADGE_MAX_COUNT;

// =============================================================================
// Locale
// =============================================================================

/// The storefront's three display languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Locale {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "pt-BR")]
    PtBr,
    #[serde(rename = "es-ES")]
    EsEs,
}

impl Locale {
    /// Maps a language code (`"pt"`, `"es-MX"`, `"en"`) to a locale.
    ///
    /// Anything that is not Portuguese or Spanish falls back to en-US.
    pub fn from_language(language: &str) -> Self {
        let primary = language
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match primary.as_str() {
            "pt" => Locale::PtBr,
            "es" => Locale::EsEs,
            _ => Locale::EnUs,
        }
    }

    /// BCP 47 tag.
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::EnUs => "en-US",
            Locale::PtBr => "pt-BR",
            Locale::EsEs => "es-ES",
        }
    }

    fn separators(&self) -> (char, char) {
        match self {
            Locale::EnUs => (',', '.'),
            Locale::PtBr | Locale::EsEs => ('.', ','),
        }
    }

    /// Fewest integer digits before thousands grouping kicks in.
    fn min_grouping_digits(&self) -> usize {
        match self {
            Locale::EsEs => 5,
            Locale::EnUs | Locale::PtBr => 4,
        }
    }
}

// =============================================================================
// Badge
// =============================================================================

/// Text for the navbar cart badge.
///
/// `None` hides the badge (empty cart); counts above 99 collapse to `"99+"`.
///
/// ```rust
/// use signboard_core::format::badge_label;
///
/// assert_eq!(badge_label(0), None);
/// assert_eq!(badge_label(7).as_deref(), Some("7"));
/// assert_eq!(badge_label(150).as_deref(), Some("99+"));
/// ```
pub fn badge_label(item_count: i64) -> Option<String> {
    if item_count <= 0 {
        None
    } else if item_count > BADGE_MAX_COUNT {
        Some(format!("{}+", BADGE_MAX_COUNT))
    } else {
        Some(item_count.to_string())
    }
}

/// "(2 items)"-style counter text for the cart sidebar header.
pub fn item_count_label(count: i64, locale: Locale) -> String {
    let noun = match (locale, count == 1) {
        (Locale::EnUs, true) => "item",
        (Locale::EnUs, false) => "items",
        (Locale::PtBr, true) => "item",
        (Locale::PtBr, false) => "itens",
        (Locale::EsEs, true) => "artículo",
        (Locale::EsEs, false) => "artículos",
    };
    format!("{} {}", count, noun)
}

// =============================================================================
// Prices
// =============================================================================

/// Renders a USD amount the way the given locale prints currency.
///
/// ```rust
/// use signboard_core::format::{format_price, Locale};
/// use signboard_core::money::Money;
///
/// let price = Money::from_cents(123450);
/// assert_eq!(format_price(price, Locale::EnUs), "$1,234.50");
/// assert_eq!(format_price(price, Locale::PtBr), "US$ 1.234,50");
/// assert_eq!(format_price(price, Locale::EsEs), "1234,50 US$");
/// ```
pub fn format_price(amount: Money, locale: Locale) -> String {
    let (group, decimal) = locale.separators();
    let digits = amount.major_units().to_string();
    let integer = if digits.len() >= locale.min_grouping_digits() {
        group_thousands(&digits, group)
    } else {
        digits
    };
    let number = format!("{}{}{:02}", integer, decimal, amount.minor_units());
    let sign = if amount.is_negative() { "-" } else { "" };

    match locale {
        Locale::EnUs => format!("{}${}", sign, number),
        Locale::PtBr => format!("{}US$ {}", sign, number),
        Locale::EsEs => format!("{}{} US$", sign, number),
    }
}

fn group_thousands(digits: &str, separator: char) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

// =============================================================================
// Unit Tests
// =============================================================================
