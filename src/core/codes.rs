//! ISO code tables used by field validation.
//!
//! - ISO 3166-1 alpha-2 country codes (postal address `Ctry`)
//! - ISO 4217 currency codes (`InstdAmt/@Ccy`)
//! - Territories that are banked under a parent country's IBAN but carry
//!   their own country code in the BIC

/// Check whether `code` is a known ISO 3166-1 alpha-2 country code.
pub fn is_known_country_code(code: &str) -> bool {
    COUNTRY_CODES.binary_search(&code).is_ok()
}

/// Check whether `code` is a known ISO 4217 currency code.
pub fn is_known_currency_code(code: &str) -> bool {
    CURRENCY_CODES.binary_search(&code).is_ok()
}

/// BIC country codes accepted for an IBAN of `iban_country` in addition to
/// `iban_country` itself.
///
/// Åland uses Finnish IBANs, the French overseas departments and
/// collectivities use French IBANs, and the Crown Dependencies use British
/// IBANs, while their banks' BICs carry the territory's own code.
pub fn included_territories(iban_country: &str) -> &'static [&'static str] {
    INCLUDED_TERRITORIES
        .iter()
        .find(|(parent, _)| *parent == iban_country)
        .map(|(_, territories)| *territories)
        .unwrap_or(&[])
}

/// Whether a BIC with country `bic_country` may serve an IBAN of
/// `iban_country`.
pub fn bic_country_accepted(iban_country: &str, bic_country: &str) -> bool {
    iban_country == bic_country || included_territories(iban_country).contains(&bic_country)
}

static INCLUDED_TERRITORIES: &[(&str, &[&str])] = &[
    ("FI", &["AX"]),
    (
        "FR",
        &[
            "GF", "GP", "MQ", "RE", "PF", "TF", "YT", "NC", "BL", "MF", "PM", "WF",
        ],
    ),
    ("GB", &["IM", "JE", "GG"]),
];

/// ISO 3166-1 alpha-2 country codes (249 entries), sorted for binary search.
static COUNTRY_CODES: &[&str] = &[
    "AD", "AE", "AF", "AG", "AI", "AL", "AM", "AO", "AQ", "AR", "AS", "AT", "AU", "AW", "AX", "AZ",
    "BA", "BB", "BD", "BE", "BF", "BG", "BH", "BI", "BJ", "BL", "BM", "BN", "BO", "BQ", "BR", "BS",
    "BT", "BV", "BW", "BY", "BZ", "CA", "CC", "CD", "CF", "CG", "CH", "CI", "CK", "CL", "CM", "CN",
    "CO", "CR", "CU", "CV", "CW", "CX", "CY", "CZ", "DE", "DJ", "DK", "DM", "DO", "DZ", "EC", "EE",
    "EG", "EH", "ER", "ES", "ET", "FI", "FJ", "FK", "FM", "FO", "FR", "GA", "GB", "GD", "GE", "GF",
    "GG", "GH", "GI", "GL", "GM", "GN", "GP", "GQ", "GR", "GS", "GT", "GU", "GW", "GY", "HK", "HM",
    "HN", "HR", "HT", "HU", "ID", "IE", "IL", "IM", "IN", "IO", "IQ", "IR", "IS", "IT", "JE", "JM",
    "JO", "JP", "KE", "KG", "KH", "KI", "KM", "KN", "KP", "KR", "KW", "KY", "KZ", "LA", "LB", "LC",
    "LI", "LK", "LR", "LS", "LT", "LU", "LV", "LY", "MA", "MC", "MD", "ME", "MF", "MG", "MH", "MK",
    "ML", "MM", "MN", "MO", "MP", "MQ", "MR", "MS", "MT", "MU", "MV", "MW", "MX", "MY", "MZ", "NA",
    "NC", "NE", "NF", "NG", "NI", "NL", "NO", "NP", "NR", "NU", "NZ", "OM", "PA", "PE", "PF", "PG",
    "PH", "PK", "PL", "PM", "PN", "PR", "PS", "PT", "PW", "PY", "QA", "RE", "RO", "RS", "RU", "RW",
    "SA", "SB", "SC", "SD", "SE", "SG", "SH", "SI", "SJ", "SK", "SL", "SM", "SN", "SO", "SR", "SS",
    "ST", "SV", "SX", "SY", "SZ", "TC", "TD", "TF", "TG", "TH", "TJ", "TK", "TL", "TM", "TN", "TO",
    "TR", "TT", "TV", "TW", "TZ", "UA", "UG", "UM", "US", "UY", "UZ", "VA", "VC", "VE", "VG", "VI",
    "VN", "VU", "WF", "WS", "YE", "YT", "ZA", "ZM", "ZW",
];

/// ISO 4217 currency codes in current use, including fund and precious
/// metal codes (182 entries). Sorted for binary search.
static CURRENCY_CODES: &[&str] = &[
    "AED", "AFN", "ALL", "AMD", "ANG", "AOA", "ARS", "AUD", "AWG", "AZN", "BAM", "BBD", "BDT",
    "BGN", "BHD", "BIF", "BMD", "BND", "BOB", "BOV", "BRL", "BSD", "BTN", "BWP", "BYN", "BZD",
    "CAD", "CDF", "CHE", "CHF", "CHW", "CLF", "CLP", "CNY", "COP", "COU", "CRC", "CUC", "CUP",
    "CVE", "CZK", "DJF", "DKK", "DOP", "DZD", "EGP", "ERN", "ETB", "EUR", "FJD", "FKP", "GBP",
    "GEL", "GHS", "GIP", "GMD", "GNF", "GTQ", "GYD", "HKD", "HNL", "HTG", "HUF", "IDR", "ILS",
    "INR", "IQD", "IRR", "ISK", "JMD", "JOD", "JPY", "KES", "KGS", "KHR", "KMF", "KPW", "KRW",
    "KWD", "KYD", "KZT", "LAK", "LBP", "LKR", "LRD", "LSL", "LYD", "MAD", "MDL", "MGA", "MKD",
    "MMK", "MNT", "MOP", "MRU", "MUR", "MVR", "MWK", "MXN", "MXV", "MYR", "MZN", "NAD", "NGN",
    "NIO", "NOK", "NPR", "NZD", "OMR", "PAB", "PEN", "PGK", "PHP", "PKR", "PLN", "PYG", "QAR",
    "RON", "RSD", "RUB", "RWF", "SAR", "SBD", "SCR", "SDG", "SEK", "SGD", "SHP", "SLE", "SLL",
    "SOS", "SRD", "SSP", "STN", "SVC", "SYP", "SZL", "THB", "TJS", "TMT", "TND", "TOP", "TRY",
    "TTD", "TWD", "TZS", "UAH", "UGX", "USD", "USN", "UYI", "UYU", "UYW", "UZS", "VED", "VES",
    "VND", "VUV", "WST", "XAF", "XAG", "XAU", "XBA", "XBB", "XBC", "XBD", "XCD", "XCG", "XDR",
    "XOF", "XPD", "XPF", "XPT", "XSU", "XTS", "XUA", "XXX", "YER", "ZAR", "ZMW", "ZWG", "ZWL",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_countries() {
        for code in ["DE", "FR", "FI", "GB", "AX", "MQ", "JE"] {
            assert!(is_known_country_code(code), "{code}");
        }
        assert!(!is_known_country_code("XX"));
        assert!(!is_known_country_code("de"));
        assert!(!is_known_country_code(""));
    }

    #[test]
    fn known_currencies() {
        assert!(is_known_currency_code("EUR"));
        assert!(is_known_currency_code("CHF"));
        for code in ["SGD", "HKD", "MXN", "TRY", "ZAR", "XOF"] {
            assert!(is_known_currency_code(code), "{code}");
        }
        assert!(!is_known_currency_code("XYZ"));
        assert!(!is_known_currency_code("eur"));
        assert!(!is_known_currency_code("EURO"));
    }

    #[test]
    fn territories_are_accepted_for_parent_iban() {
        assert!(bic_country_accepted("FI", "AX"));
        assert!(bic_country_accepted("FR", "MQ"));
        assert!(bic_country_accepted("GB", "JE"));
        assert!(bic_country_accepted("DE", "DE"));
    }

    #[test]
    fn territory_pairing_is_directional() {
        assert!(!bic_country_accepted("AX", "FI"));
        assert!(!bic_country_accepted("FI", "FA"));
        assert!(!bic_country_accepted("FR", "AM"));
        assert!(!bic_country_accepted("DE", "AX"));
    }

    #[test]
    fn tables_are_sorted() {
        for table in [COUNTRY_CODES, CURRENCY_CODES] {
            for window in table.windows(2) {
                assert!(window[0] < window[1], "{} >= {}", window[0], window[1]);
            }
        }
    }

    #[test]
    fn every_territory_is_a_country() {
        for (parent, territories) in INCLUDED_TERRITORIES {
            assert!(is_known_country_code(parent));
            for t in *territories {
                assert!(is_known_country_code(t), "{t}");
            }
        }
    }
}
