//! Derived metrics over the yearly visitor table.

use crate::schema::{BASELINE_YEAR, LATEST_YEAR, YEARS};
use crate::types::{CountryYearMatrix, MatrixRow, SeriesPoint, YearlyVisitors};
use crate::util::{argmax_by, mean_defined, pct_change, round_to, sum_defined};
use tracing::debug;

/// Year-over-year growth in percent for every country.
///
/// Columns are the second through last supported year. A cell is `None` when
/// either year is missing or the previous year had zero visitors.
pub fn growth_matrix(rows: &[YearlyVisitors]) -> CountryYearMatrix {
    let matrix = CountryYearMatrix {
        years: YEARS[1..].to_vec(),
        rows: rows
            .iter()
            .map(|r| MatrixRow {
                country: r.country.clone(),
                values: r
                    .visitors
                    .windows(2)
                    .map(|pair| pct_change(pair[0], pair[1]))
                    .collect(),
            })
            .collect(),
    };
    debug!(countries = matrix.rows.len(), "growth matrix computed");
    matrix
}

/// 2019 → 2020 change in percent, rounded to one decimal.
pub fn covid_decline(row: &YearlyVisitors) -> Option<f64> {
    pct_change(row.year(BASELINE_YEAR), row.year(LATEST_YEAR)).map(|p| round_to(p, 1))
}

/// Change of the column totals between 2019 and 2020, rounded to one decimal.
pub fn overall_decline(rows: &[YearlyVisitors]) -> Option<f64> {
    let total_2019 = sum_defined(rows.iter().map(|r| r.year(BASELINE_YEAR)));
    let total_2020 = sum_defined(rows.iter().map(|r| r.year(LATEST_YEAR)));
    pct_change(Some(total_2019), Some(total_2020)).map(|p| round_to(p, 1))
}

/// Country with the most visitors in 2019.
pub fn top_source_market(rows: &[YearlyVisitors]) -> Option<(&str, f64)> {
    argmax_by(rows, |r| r.year(BASELINE_YEAR)).map(|(i, v)| (rows[i].country.as_str(), v))
}

/// Mean of the defined growth values per country, in matrix row order.
pub fn average_growth(matrix: &CountryYearMatrix) -> Vec<(&str, Option<f64>)> {
    matrix
        .rows
        .iter()
        .map(|r| (r.country.as_str(), mean_defined(r.values.iter().copied())))
        .collect()
}

/// Country with the highest average growth; countries with no defined
/// growth value are not considered.
pub fn fastest_growing(matrix: &CountryYearMatrix) -> Option<(&str, f64)> {
    let averages = average_growth(matrix);
    argmax_by(&averages, |(_, avg)| *avg).map(|(i, v)| (averages[i].0, v))
}

/// Sum of all defined yearly counts for one country.
pub fn total_visitors(row: &YearlyVisitors) -> f64 {
    sum_defined(row.visitors.iter().copied())
}

/// Long form `(country, year, visitors)` for the multi-series line chart.
pub fn melt(rows: &[YearlyVisitors]) -> Vec<SeriesPoint> {
    rows.iter()
        .flat_map(|r| {
            YEARS.iter().zip(r.visitors.iter()).map(move |(year, v)| SeriesPoint {
                country: r.country.clone(),
                year: *year,
                value: *v,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn row(country: &str, visitors: [Option<f64>; 7]) -> YearlyVisitors {
        YearlyVisitors {
            country: country.to_string(),
            visitors,
        }
    }

    fn flat(country: &str, v2019: f64, v2020: f64) -> YearlyVisitors {
        row(country, [None, None, None, None, None, Some(v2019), Some(v2020)])
    }

    #[test]
    fn growth_is_undefined_after_a_zero_year() {
        let rows = vec![row(
            "Nepal",
            [Some(0.0), Some(50.0), Some(100.0), None, Some(10.0), Some(0.0), Some(5.0)],
        )];
        let m = growth_matrix(&rows);
        assert_eq!(m.years, vec![2015, 2016, 2017, 2018, 2019, 2020]);
        assert_eq!(m.get("Nepal", 2015), None);
        assert_eq!(m.get("Nepal", 2016), Some(100.0));
        assert_eq!(m.get("Nepal", 2017), None);
        assert_eq!(m.get("Nepal", 2018), None);
        assert_eq!(m.get("Nepal", 2019), Some(-100.0));
        assert_eq!(m.get("Nepal", 2020), None);
    }

    #[test]
    fn decline_matches_worked_example() {
        assert_eq!(covid_decline(&flat("France", 100.0, 40.0)), Some(-60.0));
    }

    #[test]
    fn unchanged_visitors_have_zero_decline() {
        assert_eq!(covid_decline(&flat("Peru", 1234.0, 1234.0)), Some(0.0));
    }

    #[test]
    fn decline_from_zero_base_is_undefined() {
        assert_eq!(covid_decline(&flat("Fiji", 0.0, 10.0)), None);
    }

    #[test]
    fn decline_is_rounded_to_one_decimal() {
        let d = covid_decline(&flat("UK", 300.0, 200.0)).unwrap();
        assert_abs_diff_eq!(d, -33.3, epsilon = 1e-9);
    }

    #[test]
    fn overall_decline_uses_column_totals() {
        let rows = vec![flat("A", 100.0, 50.0), flat("B", 300.0, 150.0)];
        assert_eq!(overall_decline(&rows), Some(-50.0));
    }

    #[test]
    fn top_source_market_prefers_first_on_tie() {
        let rows = vec![flat("US", 500.0, 1.0), flat("UK", 900.0, 1.0), flat("DE", 900.0, 1.0)];
        assert_eq!(top_source_market(&rows), Some(("UK", 900.0)));
    }

    #[test]
    fn fastest_growing_uses_mean_of_defined_growth() {
        let rows = vec![
            row("Slow", [Some(100.0), Some(110.0), None, None, None, None, None]),
            row("Fast", [Some(100.0), Some(200.0), Some(200.0), None, None, None, None]),
            row("Unknown", [Some(0.0), Some(10.0), None, None, None, None, None]),
        ];
        let m = growth_matrix(&rows);
        let (country, avg) = fastest_growing(&m).unwrap();
        assert_eq!(country, "Fast");
        assert_abs_diff_eq!(avg, 50.0, epsilon = 1e-9);
        assert_eq!(average_growth(&m)[2], ("Unknown", None));
    }

    #[test]
    fn melt_produces_one_point_per_country_year() {
        let rows = vec![flat("A", 1.0, 2.0), flat("B", 3.0, 4.0)];
        let points = melt(&rows);
        assert_eq!(points.len(), 14);
        assert_eq!(points[6].country, "A");
        assert_eq!(points[6].year, 2020);
        assert_eq!(points[6].value, Some(2.0));
        assert_eq!(total_visitors(&rows[1]), 7.0);
    }
}
