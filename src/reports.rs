// Report assembly: turn metric results into display rows, chart datasets and
// the insight records that end up in each summary JSON.
//
// One `build_*` function per table; the builders perform no I/O. Display rows
// feed the console previews only. Each report's `data` holds the numeric,
// long-form datasets its chart manifest binds to, and `export` writes them
// next to the summary.
use crate::charts::{ChartKind, ChartSpec};
use crate::error::OutputError;
use crate::metrics::{gender, places, visitors};
use crate::output;
use crate::schema::{TableId, BASELINE_YEAR, LATEST_YEAR};
use crate::types::{
    Attraction, CategoryPoint, CategoryRow, CountryTotalPoint, CountryTotalRow, CountryYearMatrix,
    CovidImpactRow, DistributionPoint, DistributionRow, FamousPlace, GenderDistribution,
    GenderPoint, GenderSplitRow, ImpactPoint, PlaceDetailRow, PlacePoint, PopularityPoint,
    PopularityRow, SeriesPoint, TopPlace, YearlyVisitors, ZoneTypeCountRow,
};
use crate::util::{format_int, format_number, format_opt, safe_div};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use tracing::warn;

/// A single headline figure: who won and by how much.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Highlight {
    pub name: String,
    pub value: f64,
    pub detail: String,
}

/// Everything written to `<table>_summary.json`.
#[derive(Debug, Serialize)]
pub struct Summary<'a, I: Serialize> {
    pub table: &'static str,
    pub generated_at: DateTime<Utc>,
    pub rows: usize,
    pub insights: &'a I,
    pub charts: Vec<ChartSpec>,
}

impl<'a, I: Serialize> Summary<'a, I> {
    pub fn new(table: TableId, rows: usize, insights: &'a I, charts: Vec<ChartSpec>) -> Self {
        Self {
            table: table.warehouse_name(),
            generated_at: Utc::now(),
            rows,
            insights,
            charts,
        }
    }
}

/// Dataset file name for `table`, e.g. `visitors_growth.csv`.
pub fn dataset_file(table: TableId, name: &str) -> String {
    format!("{}_{}.csv", table.slug(), name)
}

pub fn summary_file(table: TableId) -> String {
    format!("{}_summary.json", table.slug())
}

fn write_dataset<T: Serialize>(
    dir: &Path,
    table: TableId,
    name: &str,
    rows: &[T],
) -> Result<(), OutputError> {
    output::write_csv(&dir.join(dataset_file(table, name)), rows)
}

fn write_summary<I: Serialize>(
    dir: &Path,
    table: TableId,
    rows: usize,
    insights: &I,
    charts: Vec<ChartSpec>,
) -> Result<(), OutputError> {
    let summary = Summary::new(table, rows, insights, charts);
    output::write_json(&dir.join(summary_file(table)), &summary)
}

// ---------------------------------------------------------------------------
// Yearly visitors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct VisitorsInsights {
    pub countries: usize,
    pub overall_decline_pct: Option<f64>,
    pub top_source_market: Option<Highlight>,
    pub fastest_growing: Option<Highlight>,
}

#[derive(Debug, Clone, Default)]
pub struct VisitorsData {
    pub trend: Vec<SeriesPoint>,
    pub totals: Vec<CountryTotalPoint>,
    /// Growth matrix in long form.
    pub growth: Vec<SeriesPoint>,
    pub impact: Vec<ImpactPoint>,
}

#[derive(Debug, Clone)]
pub struct VisitorsReport {
    pub totals: Vec<CountryTotalRow>,
    pub growth: CountryYearMatrix,
    pub impact: Vec<CovidImpactRow>,
    pub data: VisitorsData,
    pub insights: VisitorsInsights,
}

pub fn build_visitors_report(rows: &[YearlyVisitors]) -> VisitorsReport {
    let growth = visitors::growth_matrix(rows);

    let totals = rows
        .iter()
        .map(|r| CountryTotalRow {
            country: r.country.clone(),
            total_visitors: format_number(visitors::total_visitors(r), 0),
        })
        .collect();

    let impact = rows
        .iter()
        .map(|r| CovidImpactRow {
            country: r.country.clone(),
            visitors_2019: format_opt(r.year(BASELINE_YEAR), 0),
            visitors_2020: format_opt(r.year(LATEST_YEAR), 0),
            decline_pct: format_opt(visitors::covid_decline(r), 1),
        })
        .collect();

    let insights = VisitorsInsights {
        countries: rows.len(),
        overall_decline_pct: visitors::overall_decline(rows),
        top_source_market: visitors::top_source_market(rows).map(|(country, v)| Highlight {
            name: country.to_string(),
            value: v,
            detail: format!("{} visitors", format_number(v, 0)),
        }),
        fastest_growing: visitors::fastest_growing(&growth).map(|(country, avg)| Highlight {
            name: country.to_string(),
            value: avg,
            detail: format!("{}% avg. growth", format_number(avg, 1)),
        }),
    };

    let data = VisitorsData {
        trend: visitors::melt(rows),
        totals: rows
            .iter()
            .map(|r| CountryTotalPoint {
                country: r.country.clone(),
                total_visitors: visitors::total_visitors(r),
            })
            .collect(),
        growth: growth.melt(),
        impact: rows
            .iter()
            .map(|r| ImpactPoint {
                country: r.country.clone(),
                visitors_2019: r.year(BASELINE_YEAR),
                visitors_2020: r.year(LATEST_YEAR),
                decline_pct: visitors::covid_decline(r),
            })
            .collect(),
    };

    VisitorsReport {
        totals,
        growth,
        impact,
        data,
        insights,
    }
}

impl VisitorsReport {
    const TABLE: TableId = TableId::YearlyVisitors;

    pub fn charts() -> Vec<ChartSpec> {
        let t = Self::TABLE;
        vec![
            ChartSpec::new(ChartKind::Line, "Tourist Visitor Trends by Country", &dataset_file(t, "trend"), "Year")
                .y("Value")
                .color("Country"),
            ChartSpec::new(ChartKind::Bar, "Total Visitors by Country", &dataset_file(t, "totals"), "Country")
                .y("TotalVisitors")
                .color("TotalVisitors"),
            ChartSpec::new(ChartKind::Heatmap, "Year-over-Year Growth Rate (%)", &dataset_file(t, "growth"), "Year")
                .y("Country")
                .color("Value"),
            ChartSpec::new(ChartKind::Bar, "COVID-19 Impact: Visitor Decline in 2020", &dataset_file(t, "impact"), "Country")
                .y("DeclinePct")
                .color("DeclinePct"),
        ]
    }

    /// Write every chart dataset plus `visitors_summary.json` into `dir`.
    pub fn export(&self, dir: &Path, rows: usize) -> Result<(), OutputError> {
        let t = Self::TABLE;
        write_dataset(dir, t, "trend", &self.data.trend)?;
        write_dataset(dir, t, "totals", &self.data.totals)?;
        write_dataset(dir, t, "growth", &self.data.growth)?;
        write_dataset(dir, t, "impact", &self.data.impact)?;
        write_summary(dir, t, rows, &self.insights, Self::charts())
    }
}

// ---------------------------------------------------------------------------
// Gender distribution
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct GenderInsights {
    pub countries: usize,
    pub avg_male_pct: Option<f64>,
    pub avg_female_pct: Option<f64>,
    pub avg_gap: Option<f64>,
    pub most_balanced: Option<Highlight>,
    pub largest_gap: Option<Highlight>,
    pub selected_country: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct GenderData {
    pub male_trend: Vec<SeriesPoint>,
    /// Latest-year male and female share per country.
    pub split: Vec<GenderPoint>,
    /// Gap matrix in long form.
    pub gaps: Vec<SeriesPoint>,
    /// Latest-year male and female share of the selected country; empty
    /// without a selection.
    pub selection: Vec<GenderPoint>,
}

#[derive(Debug, Clone)]
pub struct GenderReport {
    pub split: Vec<GenderSplitRow>,
    pub gaps: CountryYearMatrix,
    /// Latest-year split of the selected country, if it exists.
    pub selection: Option<GenderSplitRow>,
    pub data: GenderData,
    pub insights: GenderInsights,
}

fn split_row(row: &GenderDistribution) -> GenderSplitRow {
    let share = row.year(LATEST_YEAR);
    GenderSplitRow {
        country: row.country.clone(),
        male_pct: format_opt(share.male_pct, 1),
        female_pct: format_opt(share.female_pct, 1),
        gap: format_opt(gender::gap(share), 1),
    }
}

fn gender_points(row: &GenderDistribution) -> [GenderPoint; 2] {
    let share = row.year(LATEST_YEAR);
    [
        GenderPoint {
            country: row.country.clone(),
            gender: "Male",
            pct: share.male_pct,
        },
        GenderPoint {
            country: row.country.clone(),
            gender: "Female",
            pct: share.female_pct,
        },
    ]
}

/// Build the gender report. Without `selected`, the first country is shown;
/// an unknown country leaves the report without a selection.
pub fn build_gender_report(rows: &[GenderDistribution], selected: Option<&str>) -> GenderReport {
    let chosen = match selected {
        None => rows.first(),
        Some(name) => {
            let found = gender::find_country(rows, name);
            if found.is_none() {
                warn!(country = name, "selected country not found");
            }
            found
        }
    };

    let avg = gender::average_shares(rows, LATEST_YEAR);
    let insights = GenderInsights {
        countries: rows.len(),
        avg_male_pct: avg.male_pct,
        avg_female_pct: avg.female_pct,
        avg_gap: gender::gap(avg),
        most_balanced: gender::most_balanced(rows).map(|(country, male)| Highlight {
            name: country.to_string(),
            value: male,
            detail: format!("M: {:.1}% | F: {:.1}%", male, 100.0 - male),
        }),
        largest_gap: gender::largest_gap(rows).map(|(country, g)| Highlight {
            name: country.to_string(),
            value: g,
            detail: format!("{:.1}% difference", g),
        }),
        selected_country: chosen.map(|r| r.country.clone()),
    };

    let gaps = gender::gap_matrix(rows);
    let data = GenderData {
        male_trend: gender::melt_male(rows),
        split: rows.iter().flat_map(gender_points).collect(),
        gaps: gaps.melt(),
        selection: chosen.map(|r| gender_points(r).to_vec()).unwrap_or_default(),
    };

    GenderReport {
        split: rows.iter().map(split_row).collect(),
        gaps,
        selection: chosen.map(split_row),
        data,
        insights,
    }
}

impl GenderReport {
    const TABLE: TableId = TableId::GenderDistribution;

    pub fn charts() -> Vec<ChartSpec> {
        let t = Self::TABLE;
        vec![
            ChartSpec::new(ChartKind::Line, "Male Tourist Percentage Trends by Country", &dataset_file(t, "male_trend"), "Year")
                .y("Value")
                .color("Country"),
            ChartSpec::new(ChartKind::StackedBar, "Gender Distribution by Country (2020)", &dataset_file(t, "split"), "Country")
                .y("Pct")
                .color("Gender"),
            ChartSpec::new(ChartKind::Heatmap, "Gender Gap Evolution (Male% - Female%)", &dataset_file(t, "gaps"), "Year")
                .y("Country")
                .color("Value"),
            ChartSpec::new(ChartKind::Pie, "Gender Distribution of Selected Country (2020)", &dataset_file(t, "selection"), "Gender")
                .y("Pct"),
        ]
    }

    /// Write every chart dataset plus `gender_summary.json` into `dir`.
    pub fn export(&self, dir: &Path, rows: usize) -> Result<(), OutputError> {
        let t = Self::TABLE;
        write_dataset(dir, t, "male_trend", &self.data.male_trend)?;
        write_dataset(dir, t, "split", &self.data.split)?;
        write_dataset(dir, t, "gaps", &self.data.gaps)?;
        write_dataset(dir, t, "selection", &self.data.selection)?;
        write_summary(dir, t, rows, &self.insights, Self::charts())
    }
}

// ---------------------------------------------------------------------------
// Places (shared helpers)
// ---------------------------------------------------------------------------

fn place_point<P: Attraction>(place: &P, zone: Option<&str>) -> PlacePoint {
    PlacePoint {
        name: place.name().to_string(),
        city: place.city().map(str::to_string),
        place_type: place.place_type().to_string(),
        zone: zone.map(str::to_string),
        rating: place.rating(),
        reviews_lakhs: place.review_count_lakhs(),
        entrance_fee: place.entrance_fee_inr(),
        hours_needed: place.time_needed_hours(),
    }
}

/// Percentage shares of a count distribution; all `None` when nothing was counted.
fn distribution_points<L: ToString>(counts: &[(L, usize)]) -> Vec<DistributionPoint> {
    let total: usize = counts.iter().map(|(_, n)| n).sum();
    counts
        .iter()
        .map(|(label, n)| DistributionPoint {
            label: label.to_string(),
            count: *n,
            share_pct: safe_div(Some(*n as f64), Some(total as f64)).map(|s| s * 100.0),
        })
        .collect()
}

fn distribution_rows(points: &[DistributionPoint]) -> Vec<DistributionRow> {
    points
        .iter()
        .map(|p| DistributionRow {
            label: p.label.clone(),
            count: p.count,
            share_pct: format_opt(p.share_pct, 1),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Famous places
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct FamousPlacesInsights {
    pub places: usize,
    pub search: Option<String>,
    pub matches: usize,
    pub selected_place: Option<String>,
    pub avg_rating: Option<f64>,
    pub total_reviews_lakhs: f64,
    pub highest_rated: Option<Highlight>,
    pub most_reviewed: Option<Highlight>,
}

#[derive(Debug, Clone, Default)]
pub struct FamousPlacesData {
    pub points: Vec<PlacePoint>,
    pub zone_types: Vec<ZoneTypeCountRow>,
    pub fees: Vec<DistributionPoint>,
    pub best_times: Vec<DistributionPoint>,
}

#[derive(Debug, Clone)]
pub struct FamousPlacesReport {
    /// Names matching the search, in table order.
    pub matches: Vec<String>,
    /// Detail card of the selected place.
    pub details: Option<Vec<PlaceDetailRow>>,
    pub image_url: Option<String>,
    pub zone_types: Vec<ZoneTypeCountRow>,
    pub fees: Vec<DistributionRow>,
    pub best_times: Vec<DistributionRow>,
    pub data: FamousPlacesData,
    pub insights: FamousPlacesInsights,
}

fn detail_rows(p: &FamousPlace) -> Vec<PlaceDetailRow> {
    let row = |field: &str, value: String| PlaceDetailRow {
        field: field.to_string(),
        value,
    };
    vec![
        row("Name", p.name.clone()),
        row("Zone", p.zone.clone()),
        row("State", p.state.clone()),
        row("City", p.city.clone()),
        row("Type", p.place_type.clone()),
        row("Time needed (hours)", format_opt(p.time_needed_hours, 1)),
        row("Entrance fee (₹)", format_opt(p.entrance_fee_inr, 0)),
        row("Rating", format_opt(p.rating, 1)),
        row("Reviews (lakhs)", format_opt(p.review_count_lakhs, 2)),
        row("DSLR allowed", p.dslr_allowed.clone()),
        row("Best time", p.best_time_to_visit.clone()),
    ]
}

/// Build the famous-places report.
///
/// `query` narrows the list of selectable places; `selected` picks one of
/// them (the first match when absent). An unknown name leaves the report
/// without a selection.
pub fn build_famous_places_report(
    rows: &[FamousPlace],
    query: Option<&str>,
    selected: Option<&str>,
) -> FamousPlacesReport {
    let matches = places::search(rows, query);
    let chosen: Option<&FamousPlace> = match selected {
        None => matches.first().copied(),
        Some(name) => {
            let found = matches.iter().copied().find(|p| p.name == name);
            if found.is_none() {
                warn!(place = name, "selected place not among the search results");
            }
            found
        }
    };

    let zone_types: Vec<ZoneTypeCountRow> = places::type_by_zone(rows)
        .into_iter()
        .map(|(zone, place_type, count)| ZoneTypeCountRow {
            zone,
            place_type,
            count,
        })
        .collect();
    let fees = distribution_points(&places::fee_distribution(rows));
    let best_times = distribution_points(&places::best_time_distribution(rows));

    let insights = FamousPlacesInsights {
        places: rows.len(),
        search: query.filter(|q| !q.is_empty()).map(str::to_string),
        matches: matches.len(),
        selected_place: chosen.map(|p| p.name.clone()),
        avg_rating: places::average_rating(rows),
        total_reviews_lakhs: places::total_reviews(rows),
        highest_rated: places::highest_rated(rows).map(|r| Highlight {
            name: r.place.name.clone(),
            value: r.score,
            detail: format!("{} rating - {}", r.score, r.place.city),
        }),
        most_reviewed: places::most_reviewed(rows).map(|r| Highlight {
            name: r.place.name.clone(),
            value: r.score,
            detail: format!("{:.1} lakh reviews", r.score),
        }),
    };

    FamousPlacesReport {
        matches: matches.iter().map(|p| p.name.clone()).collect(),
        details: chosen.map(detail_rows),
        image_url: chosen.and_then(|p| p.image_url.clone()),
        zone_types: zone_types.clone(),
        fees: distribution_rows(&fees),
        best_times: distribution_rows(&best_times),
        data: FamousPlacesData {
            points: rows.iter().map(|p| place_point(p, Some(p.zone.as_str()))).collect(),
            zone_types,
            fees,
            best_times,
        },
        insights,
    }
}

impl FamousPlacesReport {
    const TABLE: TableId = TableId::FamousPlaces;

    pub fn charts() -> Vec<ChartSpec> {
        let t = Self::TABLE;
        vec![
            ChartSpec::new(ChartKind::Scatter, "Tourist Places: Rating vs Visit Duration", &dataset_file(t, "points"), "Rating")
                .y("HoursNeeded")
                .color("Zone")
                .size("ReviewsLakhs"),
            ChartSpec::new(ChartKind::StackedBar, "Types of Tourist Places by Zone", &dataset_file(t, "zone_types"), "Zone")
                .y("Count")
                .color("Type"),
            ChartSpec::new(ChartKind::Pie, "Entry Fee Distribution", &dataset_file(t, "fees"), "Label").y("Count"),
            ChartSpec::new(ChartKind::Pie, "Best Time to Visit Distribution", &dataset_file(t, "best_times"), "Label")
                .y("Count"),
        ]
    }

    /// Write every chart dataset plus `famous_places_summary.json` into `dir`.
    pub fn export(&self, dir: &Path, rows: usize) -> Result<(), OutputError> {
        let t = Self::TABLE;
        write_dataset(dir, t, "points", &self.data.points)?;
        write_dataset(dir, t, "zone_types", &self.data.zone_types)?;
        write_dataset(dir, t, "fees", &self.data.fees)?;
        write_dataset(dir, t, "best_times", &self.data.best_times)?;
        write_summary(dir, t, rows, &self.insights, Self::charts())
    }
}

// ---------------------------------------------------------------------------
// Top places
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct TopPlacesInsights {
    pub places: usize,
    pub best_value: Option<Highlight>,
    pub most_popular_category: Option<Highlight>,
    pub most_time_efficient: Option<Highlight>,
}

#[derive(Debug, Clone, Default)]
pub struct TopPlacesData {
    pub popular: Vec<PopularityPoint>,
    pub categories: Vec<CategoryPoint>,
    pub points: Vec<PlacePoint>,
}

#[derive(Debug, Clone)]
pub struct TopPlacesReport {
    pub popular: Vec<PopularityRow>,
    pub categories: Vec<CategoryRow>,
    pub data: TopPlacesData,
    pub insights: TopPlacesInsights,
}

pub fn build_top_places_report(rows: &[TopPlace], top_n: usize) -> TopPlacesReport {
    let ranked: Vec<PopularityPoint> = places::top_by_popularity(rows, top_n)
        .into_iter()
        .enumerate()
        .map(|(idx, r)| PopularityPoint {
            rank: idx + 1,
            name: r.place.name.clone(),
            rating: r.place.rating,
            reviews_lakhs: r.place.review_count_lakhs,
            popularity_score: r.score,
        })
        .collect();
    let popular = ranked
        .iter()
        .map(|p| PopularityRow {
            rank: p.rank,
            name: p.name.clone(),
            rating: format_opt(p.rating, 1),
            reviews_lakhs: format_opt(p.reviews_lakhs, 1),
            popularity_score: format_number(p.popularity_score, 2),
        })
        .collect();

    let summary = places::category_summary(rows);
    let categories = summary
        .iter()
        .map(|c| CategoryRow {
            place_type: c.place_type.clone(),
            places: c.places,
            avg_rating: format_opt(c.avg_rating, 2),
            total_reviews_lakhs: format_number(c.total_reviews_lakhs, 2),
        })
        .collect();
    let category_points = summary
        .iter()
        .map(|c| CategoryPoint {
            place_type: c.place_type.clone(),
            places: c.places,
            avg_rating: c.avg_rating,
            total_reviews_lakhs: c.total_reviews_lakhs,
        })
        .collect();

    let insights = TopPlacesInsights {
        places: rows.len(),
        best_value: places::best_value(rows).map(|r| Highlight {
            name: r.place.name.clone(),
            value: r.score,
            detail: format!(
                "₹{} | {} rating",
                format_opt(r.place.entrance_fee_inr, 0),
                format_opt(r.place.rating, 1)
            ),
        }),
        most_popular_category: places::most_popular_category(&summary).and_then(|c| {
            c.avg_rating.map(|avg| Highlight {
                name: c.place_type.clone(),
                value: avg,
                detail: format!("{:.2} avg rating over {} places", avg, format_int(c.places)),
            })
        }),
        most_time_efficient: places::most_time_efficient(rows).map(|r| Highlight {
            name: r.place.name.clone(),
            value: r.score,
            detail: format!(
                "{} hrs | {}L reviews",
                format_opt(r.place.time_needed_hours, 1),
                format_opt(r.place.review_count_lakhs, 1)
            ),
        }),
    };

    TopPlacesReport {
        popular,
        categories,
        data: TopPlacesData {
            popular: ranked,
            categories: category_points,
            points: rows.iter().map(|p| place_point(p, None)).collect(),
        },
        insights,
    }
}

impl TopPlacesReport {
    const TABLE: TableId = TableId::TopPlaces;

    pub fn charts() -> Vec<ChartSpec> {
        let t = Self::TABLE;
        let points = dataset_file(t, "points");
        vec![
            ChartSpec::new(ChartKind::Histogram, "Rating Distribution of Tourist Places", &points, "Rating"),
            ChartSpec::new(ChartKind::Scatter, "Price vs Rating Analysis", &points, "EntranceFee")
                .y("Rating")
                .color("Type")
                .size("ReviewsLakhs"),
            ChartSpec::new(ChartKind::Bubble, "Place Types: Rating vs Popularity", &dataset_file(t, "categories"), "AvgRating")
                .y("TotalReviewsLakhs")
                .color("Type")
                .size("TotalReviewsLakhs"),
            ChartSpec::new(ChartKind::Scatter, "Visit Duration vs Popularity", &points, "HoursNeeded")
                .y("ReviewsLakhs")
                .color("Rating")
                .size("ReviewsLakhs"),
        ]
    }

    /// Write every chart dataset plus `top_places_summary.json` into `dir`.
    pub fn export(&self, dir: &Path, rows: usize) -> Result<(), OutputError> {
        let t = Self::TABLE;
        write_dataset(dir, t, "popular", &self.data.popular)?;
        write_dataset(dir, t, "categories", &self.data.categories)?;
        write_dataset(dir, t, "points", &self.data.points)?;
        write_summary(dir, t, rows, &self.insights, Self::charts())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GenderShare;

    fn visitors_row(country: &str, v2019: f64, v2020: f64) -> YearlyVisitors {
        YearlyVisitors {
            country: country.to_string(),
            visitors: [Some(10.0), None, None, None, None, Some(v2019), Some(v2020)],
        }
    }

    fn gender_row(country: &str, male: f64, female: f64) -> GenderDistribution {
        let mut shares = [GenderShare::default(); 7];
        shares[6] = GenderShare {
            male_pct: Some(male),
            female_pct: Some(female),
        };
        GenderDistribution {
            country: country.to_string(),
            shares,
        }
    }

    fn famous(name: &str, fee: Option<f64>) -> FamousPlace {
        FamousPlace {
            name: name.to_string(),
            zone: "Northern".into(),
            state: "Delhi".into(),
            city: "Delhi".into(),
            place_type: "Fort".into(),
            time_needed_hours: Some(2.0),
            entrance_fee_inr: fee,
            rating: Some(4.5),
            review_count_lakhs: Some(1.5),
            dslr_allowed: "Yes".into(),
            best_time_to_visit: "Evening".into(),
            image_url: Some("https://img.example/red-fort.jpg".into()),
        }
    }

    #[test]
    fn visitors_report_formats_impact_and_insights() {
        let rows = vec![visitors_row("France", 100.0, 40.0), visitors_row("Fiji", 0.0, 5.0)];
        let report = build_visitors_report(&rows);
        assert_eq!(report.impact[0].decline_pct, "-60.0");
        assert_eq!(report.impact[1].decline_pct, "N/A");
        assert_eq!(report.totals[0].total_visitors, "150");
        assert_eq!(report.insights.top_source_market.as_ref().unwrap().name, "France");
        assert_eq!(report.insights.overall_decline_pct, Some(-55.0));
        assert_eq!(report.data.trend.len(), 14);
    }

    #[test]
    fn visitors_datasets_stay_numeric() {
        let rows = vec![visitors_row("US", 2_234_572.0, 5.0), visitors_row("Fiji", 0.0, 5.0)];
        let report = build_visitors_report(&rows);
        assert_eq!(report.totals[0].total_visitors, "2,234,587");
        assert_eq!(report.data.totals[0].total_visitors, 2_234_587.0);
        assert_eq!(report.data.impact[1].visitors_2019, Some(0.0));
        assert_eq!(report.data.impact[1].decline_pct, None);
        // six growth years per country
        assert_eq!(report.data.growth.len(), 12);
        assert!(report.data.growth.iter().any(|p| p.country == "Fiji" && p.year == 2020 && p.value.is_none()));
    }

    #[test]
    fn gender_report_defaults_to_first_country_and_handles_misses() {
        let rows = vec![gender_row("India", 70.0, 30.0), gender_row("Japan", 52.0, 48.0)];
        let report = build_gender_report(&rows, None);
        assert_eq!(report.insights.selected_country.as_deref(), Some("India"));
        assert_eq!(report.selection.as_ref().unwrap().gap, "40.0");
        let largest = report.insights.largest_gap.unwrap();
        assert_eq!((largest.name.as_str(), largest.value), ("India", 40.0));
        assert_eq!(report.insights.most_balanced.unwrap().name, "Japan");

        let missing = build_gender_report(&rows, Some("Atlantis"));
        assert!(missing.selection.is_none());
        assert!(missing.data.selection.is_empty());
        assert!(missing.insights.selected_country.is_none());
    }

    #[test]
    fn gender_split_and_selection_are_long_form() {
        let rows = vec![gender_row("India", 70.0, 30.0), gender_row("Japan", 52.0, 48.0)];
        let report = build_gender_report(&rows, Some("India"));
        assert_eq!(report.data.split.len(), 4);
        let pie: Vec<(&str, Option<f64>)> =
            report.data.selection.iter().map(|p| (p.gender, p.pct)).collect();
        assert_eq!(pie, vec![("Male", Some(70.0)), ("Female", Some(30.0))]);
        assert!(report.data.selection.iter().all(|p| p.country == "India"));
        assert_eq!(report.data.gaps.len(), 14);
    }

    #[test]
    fn famous_places_selection_comes_from_search_results() {
        let rows = vec![famous("Red Fort", Some(35.0)), famous("Taj Mahal", Some(1100.0))];
        let report = build_famous_places_report(&rows, Some("taj"), None);
        assert_eq!(report.matches, vec!["Taj Mahal".to_string()]);
        assert_eq!(report.insights.selected_place.as_deref(), Some("Taj Mahal"));
        assert!(report.details.is_some());

        let outside = build_famous_places_report(&rows, Some("taj"), Some("Red Fort"));
        assert!(outside.details.is_none());

        let none = build_famous_places_report(&rows, Some("zzz"), None);
        assert!(none.matches.is_empty());
        assert!(none.details.is_none());
    }

    #[test]
    fn famous_places_fee_shares_cover_classified_places() {
        let rows = vec![
            famous("a", Some(0.0)),
            famous("b", Some(50.0)),
            famous("c", None),
            famous("d", Some(900.0)),
        ];
        let report = build_famous_places_report(&rows, None, None);
        let labels: Vec<&str> = report.fees.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Free", "₹1–100", "₹101–500", "₹500+"]);
        let counts: Vec<usize> = report.fees.iter().map(|r| r.count).collect();
        assert_eq!(counts, vec![1, 1, 0, 1]);
        assert_eq!(report.fees[0].share_pct, "33.3");
        approx::assert_abs_diff_eq!(report.data.fees[0].share_pct.unwrap(), 100.0 / 3.0, epsilon = 1e-9);
        assert_eq!(report.zone_types[0].count, 4);
        assert_eq!(report.data.points.len(), 4);
    }

    #[test]
    fn top_places_report_ranks_by_popularity() {
        let rows = vec![
            TopPlace {
                name: "A".into(),
                city: None,
                place_type: "Fort".into(),
                time_needed_hours: Some(2.0),
                entrance_fee_inr: Some(40.0),
                rating: Some(4.0),
                review_count_lakhs: Some(2.0),
            },
            TopPlace {
                name: "B".into(),
                city: Some("Agra".into()),
                place_type: "Tomb".into(),
                time_needed_hours: Some(0.0),
                entrance_fee_inr: Some(100.0),
                rating: Some(5.0),
                review_count_lakhs: Some(1.0),
            },
        ];
        let report = build_top_places_report(&rows, 1);
        assert_eq!(report.popular.len(), 1);
        assert_eq!(report.popular[0].name, "A");
        assert_eq!(report.popular[0].popularity_score, "8.00");
        assert_eq!(report.data.popular[0].popularity_score, 8.0);
        assert_eq!(report.data.categories[1].avg_rating, Some(5.0));
        assert_eq!(report.insights.best_value.as_ref().unwrap().name, "A");
        assert_eq!(report.insights.most_popular_category.as_ref().unwrap().name, "Tomb");
        assert_eq!(report.insights.most_time_efficient.as_ref().unwrap().name, "A");
        assert_eq!(report.categories.len(), 2);
    }

    #[test]
    fn every_report_publishes_four_charts() {
        assert_eq!(VisitorsReport::charts().len(), 4);
        assert_eq!(GenderReport::charts().len(), 4);
        assert_eq!(FamousPlacesReport::charts().len(), 4);
        assert_eq!(TopPlacesReport::charts().len(), 4);
        assert_eq!(dataset_file(TableId::TopPlaces, "points"), "top_places_points.csv");
    }
}
