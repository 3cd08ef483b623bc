//! Country-name display normalization.

use std::collections::HashMap;

/// Display abbreviations for country names that read too long next to a
/// distance figure. Exact-match lookup only; anything not listed passes
/// through unchanged.
const COUNTRY_ABBREVIATIONS: &[(&str, &str)] = &[
    ("United States", "USA"),
    ("United Arab Emirates", "UAE"),
    ("United Kingdom", "UK"),
    ("Central African Republic", "C African Rep"),
    ("Saint Vincent and the Grenadines", "St Vincent & Grenadines"),
    ("São Tomé and Príncipe", "Sao Tome & Principe"),
    ("Trinidad and Tobago", "Trinidad & Tobago"),
    ("Marshall Islands", "Marshall Isles"),
    ("Saint Kitts and Nevis", "St Kitts & Nevis"),
    ("Saint Lucia", "St Lucia"),
    ("Solomon Islands", "Solomon Isles"),
    ("Bosnia and Herzegovina", "Bosnia Herzegovina"),
    ("Antigua and Barbuda", "Antigua & Barbuda"),
    ("Democratic Republic of the Congo", "DR Congo"),
    ("Republic of the Congo", "Congo"),
];

/// Display form of the United States; drives region short-form selection.
pub const US_DISPLAY_NAME: &str = "USA";

/// Which textual form of a sub-national region to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionForm {
    Short,
    Long,
}

/// Immutable country-name table. Built once at startup and injected into
/// the resolver; shared read-only across requests.
#[derive(Debug, Clone)]
pub struct CountryNames {
    table: HashMap<&'static str, &'static str>,
}

impl CountryNames {
    /// The curated standard table.
    pub fn standard() -> Self {
        Self {
            table: COUNTRY_ABBREVIATIONS.iter().copied().collect(),
        }
    }

    /// Map a raw geocoder country name to its display form. Unknown names
    /// pass through unchanged.
    pub fn format_country<'a>(&self, raw: &'a str) -> &'a str {
        self.table.get(raw).copied().unwrap_or(raw)
    }

    /// Select the textual form for a region component: short iff the
    /// normalized country is the United States and a locality was found.
    /// US state codes pair well with a city name; everywhere else, and for
    /// US results without a locality, the full name is reported.
    pub fn region_form(&self, country: Option<&str>, has_locality: bool) -> RegionForm {
        if country == Some(US_DISPLAY_NAME) && has_locality {
            RegionForm::Short
        } else {
            RegionForm::Long
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_country_table_hit() {
        let names = CountryNames::standard();
        assert_eq!(names.format_country("United States"), "USA");
        assert_eq!(names.format_country("United Kingdom"), "UK");
        assert_eq!(names.format_country("Democratic Republic of the Congo"), "DR Congo");
    }

    #[test]
    fn test_format_country_identity_on_miss() {
        let names = CountryNames::standard();
        assert_eq!(names.format_country("Japan"), "Japan");
        assert_eq!(names.format_country(""), "");
    }

    #[test]
    fn test_format_country_exact_match_only() {
        let names = CountryNames::standard();
        // No partial or case-insensitive matching.
        assert_eq!(names.format_country("united states"), "united states");
        assert_eq!(names.format_country("United States of America"), "United States of America");
    }

    #[test]
    fn test_region_form_truth_table() {
        let names = CountryNames::standard();
        assert_eq!(names.region_form(Some("USA"), true), RegionForm::Short);
        assert_eq!(names.region_form(Some("USA"), false), RegionForm::Long);
        assert_eq!(names.region_form(Some("Canada"), true), RegionForm::Long);
        assert_eq!(names.region_form(Some("Canada"), false), RegionForm::Long);
    }

    #[test]
    fn test_region_form_no_country() {
        let names = CountryNames::standard();
        assert_eq!(names.region_form(None, true), RegionForm::Long);
        assert_eq!(names.region_form(None, false), RegionForm::Long);
    }
}
