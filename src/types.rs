use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::schema::YEAR_COUNT;

// ---------------------------------------------------------------------------
// Raw rows: one field per warehouse column, every cell still text.
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct RawVisitorsRow {
    #[serde(rename = "COUNTRY")]
    pub country: Option<String>,
    #[serde(rename = "_2014")]
    pub y2014: Option<String>,
    #[serde(rename = "_2015")]
    pub y2015: Option<String>,
    #[serde(rename = "_2016")]
    pub y2016: Option<String>,
    #[serde(rename = "_2017")]
    pub y2017: Option<String>,
    #[serde(rename = "_2018")]
    pub y2018: Option<String>,
    #[serde(rename = "_2019")]
    pub y2019: Option<String>,
    #[serde(rename = "_2020")]
    pub y2020: Option<String>,
}

impl RawVisitorsRow {
    /// Year cells in [`YEARS`](crate::schema::YEARS) order.
    pub fn year_cells(&self) -> [Option<&str>; YEAR_COUNT] {
        [
            self.y2014.as_deref(),
            self.y2015.as_deref(),
            self.y2016.as_deref(),
            self.y2017.as_deref(),
            self.y2018.as_deref(),
            self.y2019.as_deref(),
            self.y2020.as_deref(),
        ]
    }
}

#[derive(Debug, Deserialize)]
pub struct RawGenderRow {
    #[serde(rename = "COUNTRY_OF_NATIONALITY")]
    pub country: Option<String>,
    #[serde(rename = "_2014_MALE")]
    pub male_2014: Option<String>,
    #[serde(rename = "_2014_FEMALE")]
    pub female_2014: Option<String>,
    #[serde(rename = "_2015_MALE")]
    pub male_2015: Option<String>,
    #[serde(rename = "_2015_FEMALE")]
    pub female_2015: Option<String>,
    #[serde(rename = "_2016_MALE")]
    pub male_2016: Option<String>,
    #[serde(rename = "_2016_FEMALE")]
    pub female_2016: Option<String>,
    #[serde(rename = "_2017_MALE")]
    pub male_2017: Option<String>,
    #[serde(rename = "_2017_FEMALE")]
    pub female_2017: Option<String>,
    #[serde(rename = "_2018_MALE")]
    pub male_2018: Option<String>,
    #[serde(rename = "_2018_FEMALE")]
    pub female_2018: Option<String>,
    #[serde(rename = "_2019_MALE")]
    pub male_2019: Option<String>,
    #[serde(rename = "_2019_FEMALE")]
    pub female_2019: Option<String>,
    #[serde(rename = "_2020_MALE")]
    pub male_2020: Option<String>,
    #[serde(rename = "_2020_FEMALE")]
    pub female_2020: Option<String>,
}

impl RawGenderRow {
    /// `(male, female)` cells in [`YEARS`](crate::schema::YEARS) order.
    pub fn year_cells(&self) -> [(Option<&str>, Option<&str>); YEAR_COUNT] {
        [
            (self.male_2014.as_deref(), self.female_2014.as_deref()),
            (self.male_2015.as_deref(), self.female_2015.as_deref()),
            (self.male_2016.as_deref(), self.female_2016.as_deref()),
            (self.male_2017.as_deref(), self.female_2017.as_deref()),
            (self.male_2018.as_deref(), self.female_2018.as_deref()),
            (self.male_2019.as_deref(), self.female_2019.as_deref()),
            (self.male_2020.as_deref(), self.female_2020.as_deref()),
        ]
    }
}

#[derive(Debug, Deserialize)]
pub struct RawPlaceRow {
    #[serde(rename = "ZONE")]
    pub zone: Option<String>,
    #[serde(rename = "STATE")]
    pub state: Option<String>,
    #[serde(rename = "CITY")]
    pub city: Option<String>,
    #[serde(rename = "NAME")]
    pub name: Option<String>,
    #[serde(rename = "TYPE")]
    pub place_type: Option<String>,
    #[serde(rename = "TIME_NEEDED_TO_VISIT_IN_HRS")]
    pub time_needed: Option<String>,
    #[serde(rename = "GOOGLE_REVIEW_RATING")]
    pub rating: Option<String>,
    #[serde(rename = "ENTRANCE_FEE_IN_INR")]
    pub entrance_fee: Option<String>,
    #[serde(rename = "NUMBER_OF_GOOGLE_REVIEW_IN_LAKHS")]
    pub reviews: Option<String>,
    #[serde(rename = "DSLR_ALLOWED")]
    pub dslr_allowed: Option<String>,
    #[serde(rename = "BEST_TIME_TO_VISIT")]
    pub best_time: Option<String>,
    #[serde(rename = "IMAGE_URL")]
    pub image_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Typed records produced by the loader.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct YearlyVisitors {
    pub country: String,
    /// Visitor counts in [`YEARS`](crate::schema::YEARS) order; `None` for missing cells.
    pub visitors: [Option<f64>; YEAR_COUNT],
}

impl YearlyVisitors {
    pub fn year(&self, year: u16) -> Option<f64> {
        crate::schema::year_index(year).and_then(|i| self.visitors[i])
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GenderShare {
    pub male_pct: Option<f64>,
    pub female_pct: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenderDistribution {
    pub country: String,
    pub shares: [GenderShare; YEAR_COUNT],
}

impl GenderDistribution {
    pub fn year(&self, year: u16) -> GenderShare {
        crate::schema::year_index(year)
            .map(|i| self.shares[i])
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FamousPlace {
    pub name: String,
    pub zone: String,
    pub state: String,
    pub city: String,
    pub place_type: String,
    pub time_needed_hours: Option<f64>,
    pub entrance_fee_inr: Option<f64>,
    pub rating: Option<f64>,
    pub review_count_lakhs: Option<f64>,
    pub dslr_allowed: String,
    pub best_time_to_visit: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopPlace {
    pub name: String,
    pub city: Option<String>,
    pub place_type: String,
    pub time_needed_hours: Option<f64>,
    pub entrance_fee_inr: Option<f64>,
    pub rating: Option<f64>,
    pub review_count_lakhs: Option<f64>,
}

/// Common view over both place tables so the place metrics are written once.
pub trait Attraction {
    fn name(&self) -> &str;
    fn place_type(&self) -> &str;
    fn city(&self) -> Option<&str>;
    fn rating(&self) -> Option<f64>;
    fn review_count_lakhs(&self) -> Option<f64>;
    fn entrance_fee_inr(&self) -> Option<f64>;
    fn time_needed_hours(&self) -> Option<f64>;
}

impl Attraction for FamousPlace {
    fn name(&self) -> &str {
        &self.name
    }
    fn place_type(&self) -> &str {
        &self.place_type
    }
    fn city(&self) -> Option<&str> {
        Some(&self.city)
    }
    fn rating(&self) -> Option<f64> {
        self.rating
    }
    fn review_count_lakhs(&self) -> Option<f64> {
        self.review_count_lakhs
    }
    fn entrance_fee_inr(&self) -> Option<f64> {
        self.entrance_fee_inr
    }
    fn time_needed_hours(&self) -> Option<f64> {
        self.time_needed_hours
    }
}

impl Attraction for TopPlace {
    fn name(&self) -> &str {
        &self.name
    }
    fn place_type(&self) -> &str {
        &self.place_type
    }
    fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }
    fn rating(&self) -> Option<f64> {
        self.rating
    }
    fn review_count_lakhs(&self) -> Option<f64> {
        self.review_count_lakhs
    }
    fn entrance_fee_inr(&self) -> Option<f64> {
        self.entrance_fee_inr
    }
    fn time_needed_hours(&self) -> Option<f64> {
        self.time_needed_hours
    }
}

// ---------------------------------------------------------------------------
// Display rows: console previews only. Numbers are pre-formatted and `N/A`
// marks values that could not be computed.
// ---------------------------------------------------------------------------

#[derive(Debug, Tabled, Clone)]
pub struct CountryTotalRow {
    #[tabled(rename = "Country")]
    pub country: String,
    #[tabled(rename = "Total Visitors")]
    pub total_visitors: String,
}

#[derive(Debug, Tabled, Clone)]
pub struct CovidImpactRow {
    #[tabled(rename = "Country")]
    pub country: String,
    #[tabled(rename = "2019")]
    pub visitors_2019: String,
    #[tabled(rename = "2020")]
    pub visitors_2020: String,
    #[tabled(rename = "Decline (%)")]
    pub decline_pct: String,
}

#[derive(Debug, Tabled, Clone)]
pub struct GenderSplitRow {
    #[tabled(rename = "Country")]
    pub country: String,
    #[tabled(rename = "Male %")]
    pub male_pct: String,
    #[tabled(rename = "Female %")]
    pub female_pct: String,
    #[tabled(rename = "Gap")]
    pub gap: String,
}

#[derive(Debug, Tabled, Clone)]
pub struct PlaceDetailRow {
    #[tabled(rename = "Field")]
    pub field: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

/// Previewed and exported as-is; every number in it is a count.
#[derive(Debug, Serialize, Tabled, Clone)]
pub struct ZoneTypeCountRow {
    #[serde(rename = "Zone")]
    #[tabled(rename = "Zone")]
    pub zone: String,
    #[serde(rename = "Type")]
    #[tabled(rename = "Type")]
    pub place_type: String,
    #[serde(rename = "Count")]
    #[tabled(rename = "Count")]
    pub count: usize,
}

#[derive(Debug, Tabled, Clone)]
pub struct DistributionRow {
    #[tabled(rename = "Label")]
    pub label: String,
    #[tabled(rename = "Count")]
    pub count: usize,
    #[tabled(rename = "Share %")]
    pub share_pct: String,
}

#[derive(Debug, Tabled, Clone)]
pub struct PopularityRow {
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Rating")]
    pub rating: String,
    #[tabled(rename = "Reviews (L)")]
    pub reviews_lakhs: String,
    #[tabled(rename = "Popularity")]
    pub popularity_score: String,
}

#[derive(Debug, Tabled, Clone)]
pub struct CategoryRow {
    #[tabled(rename = "Type")]
    pub place_type: String,
    #[tabled(rename = "Places")]
    pub places: usize,
    #[tabled(rename = "Avg Rating")]
    pub avg_rating: String,
    #[tabled(rename = "Total Reviews (L)")]
    pub total_reviews_lakhs: String,
}

// ---------------------------------------------------------------------------
// Chart datasets: numeric, long-form rows handed to the chart renderer as-is.
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct SeriesPoint {
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Year")]
    pub year: u16,
    #[serde(rename = "Value")]
    pub value: Option<f64>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PlacePoint {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "City")]
    pub city: Option<String>,
    #[serde(rename = "Type")]
    pub place_type: String,
    #[serde(rename = "Zone")]
    pub zone: Option<String>,
    #[serde(rename = "Rating")]
    pub rating: Option<f64>,
    #[serde(rename = "ReviewsLakhs")]
    pub reviews_lakhs: Option<f64>,
    #[serde(rename = "EntranceFee")]
    pub entrance_fee: Option<f64>,
    #[serde(rename = "HoursNeeded")]
    pub hours_needed: Option<f64>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CountryTotalPoint {
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "TotalVisitors")]
    pub total_visitors: f64,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ImpactPoint {
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Visitors2019")]
    pub visitors_2019: Option<f64>,
    #[serde(rename = "Visitors2020")]
    pub visitors_2020: Option<f64>,
    #[serde(rename = "DeclinePct")]
    pub decline_pct: Option<f64>,
}

/// One gender's share for one country, long form for stacked bars and pies.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct GenderPoint {
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Gender")]
    pub gender: &'static str,
    #[serde(rename = "Pct")]
    pub pct: Option<f64>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DistributionPoint {
    #[serde(rename = "Label")]
    pub label: String,
    #[serde(rename = "Count")]
    pub count: usize,
    #[serde(rename = "SharePct")]
    pub share_pct: Option<f64>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PopularityPoint {
    #[serde(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Rating")]
    pub rating: Option<f64>,
    #[serde(rename = "ReviewsLakhs")]
    pub reviews_lakhs: Option<f64>,
    #[serde(rename = "PopularityScore")]
    pub popularity_score: f64,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CategoryPoint {
    #[serde(rename = "Type")]
    pub place_type: String,
    #[serde(rename = "Places")]
    pub places: usize,
    #[serde(rename = "AvgRating")]
    pub avg_rating: Option<f64>,
    #[serde(rename = "TotalReviewsLakhs")]
    pub total_reviews_lakhs: f64,
}

/// A named year × country matrix (growth rates, gender gaps).
#[derive(Debug, Clone, PartialEq)]
pub struct CountryYearMatrix {
    pub years: Vec<u16>,
    pub rows: Vec<MatrixRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatrixRow {
    pub country: String,
    pub values: Vec<Option<f64>>,
}

impl CountryYearMatrix {
    pub fn get(&self, country: &str, year: u16) -> Option<f64> {
        let col = self.years.iter().position(|y| *y == year)?;
        self.rows
            .iter()
            .find(|r| r.country == country)
            .and_then(|r| r.values.get(col).copied().flatten())
    }

    /// Long form `(country, year, value)`, one point per cell, for heatmaps.
    pub fn melt(&self) -> Vec<SeriesPoint> {
        self.rows
            .iter()
            .flat_map(|r| {
                self.years.iter().zip(&r.values).map(move |(year, value)| SeriesPoint {
                    country: r.country.clone(),
                    year: *year,
                    value: *value,
                })
            })
            .collect()
    }
}
