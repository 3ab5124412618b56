//! Derived metrics over the gender distribution table.
//!
//! Shares are used exactly as loaded: nothing here assumes that the male and
//! female percentages of a year add up to 100.

use crate::schema::{LATEST_YEAR, YEARS};
use crate::types::{CountryYearMatrix, GenderDistribution, GenderShare, MatrixRow, SeriesPoint};
use crate::util::{argmax_by, argmin_by, mean_defined};

/// `male - female` for one year, `None` when either share is missing.
pub fn gap(share: GenderShare) -> Option<f64> {
    Some(share.male_pct? - share.female_pct?)
}

/// Signed gender gap per country and supported year.
pub fn gap_matrix(rows: &[GenderDistribution]) -> CountryYearMatrix {
    CountryYearMatrix {
        years: YEARS.to_vec(),
        rows: rows
            .iter()
            .map(|r| MatrixRow {
                country: r.country.clone(),
                values: r.shares.iter().map(|s| gap(*s)).collect(),
            })
            .collect(),
    }
}

/// Country whose latest male share is closest to 50%, with that share.
pub fn most_balanced(rows: &[GenderDistribution]) -> Option<(&str, f64)> {
    argmin_by(rows, |r| r.year(LATEST_YEAR).male_pct.map(|m| (m - 50.0).abs()))
        .and_then(|(i, _)| {
            let row = &rows[i];
            row.year(LATEST_YEAR).male_pct.map(|m| (row.country.as_str(), m))
        })
}

/// Country with the widest absolute gap in the latest year, with that gap.
pub fn largest_gap(rows: &[GenderDistribution]) -> Option<(&str, f64)> {
    argmax_by(rows, |r| gap(r.year(LATEST_YEAR)).map(f64::abs))
        .map(|(i, g)| (rows[i].country.as_str(), g))
}

/// Mean male and female share for `year` over the countries reporting it.
pub fn average_shares(rows: &[GenderDistribution], year: u16) -> GenderShare {
    GenderShare {
        male_pct: mean_defined(rows.iter().map(|r| r.year(year).male_pct)),
        female_pct: mean_defined(rows.iter().map(|r| r.year(year).female_pct)),
    }
}

/// Long form `(country, year, male share)` for the trend chart.
pub fn melt_male(rows: &[GenderDistribution]) -> Vec<SeriesPoint> {
    rows.iter()
        .flat_map(|r| {
            YEARS.iter().zip(r.shares.iter()).map(move |(year, s)| SeriesPoint {
                country: r.country.clone(),
                year: *year,
                value: s.male_pct,
            })
        })
        .collect()
}

/// First row for `country`, if the table has one.
pub fn find_country<'a>(rows: &'a [GenderDistribution], country: &str) -> Option<&'a GenderDistribution> {
    rows.iter().find(|r| r.country == country)
}
