// Static description of the four tourism tables.
//
// Column names are kept exactly as the warehouse exports them (`_2019`,
// `_2020_MALE`, ...). Year columns are declared here once instead of being
// discovered by matching substrings at use time.
use std::fmt;

/// Years covered by the yearly visitor and gender tables, in column order.
pub const YEAR_COUNT: usize = 7;
pub const YEARS: [u16; YEAR_COUNT] = [2014, 2015, 2016, 2017, 2018, 2019, 2020];

/// Year used by the "latest year" insights (COVID impact, 2020 gender split).
pub const LATEST_YEAR: u16 = 2020;
pub const BASELINE_YEAR: u16 = 2019;

/// Position of `year` inside [`YEARS`], if supported.
pub fn year_index(year: u16) -> Option<usize> {
    YEARS.iter().position(|y| *y == year)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TableId {
    YearlyVisitors,
    GenderDistribution,
    FamousPlaces,
    TopPlaces,
}

impl TableId {
    pub const ALL: [TableId; 4] = [
        TableId::YearlyVisitors,
        TableId::GenderDistribution,
        TableId::FamousPlaces,
        TableId::TopPlaces,
    ];

    /// Table name as known to the data warehouse.
    pub fn warehouse_name(self) -> &'static str {
        match self {
            TableId::YearlyVisitors => "COUNTRYWISEYEARLYVISITORS",
            TableId::GenderDistribution => "COUNTRYWISEGENDER",
            TableId::FamousPlaces => "INDIAFAMOUSTOURISTPLACES",
            TableId::TopPlaces => "TOPPLACESTOVISIT",
        }
    }

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            TableId::YearlyVisitors => "International Visitors Trend",
            TableId::GenderDistribution => "Gender Distribution Analysis",
            TableId::FamousPlaces => "Famous Tourist Destinations",
            TableId::TopPlaces => "Top-Rated Places",
        }
    }

    /// Prefix used for exported file names.
    pub fn slug(self) -> &'static str {
        match self {
            TableId::YearlyVisitors => "visitors",
            TableId::GenderDistribution => "gender",
            TableId::FamousPlaces => "famous_places",
            TableId::TopPlaces => "top_places",
        }
    }

    /// Columns that must be present in the header row for the table to load.
    pub fn required_columns(self) -> Vec<String> {
        match self {
            TableId::YearlyVisitors => {
                let mut cols = vec![COUNTRY.to_string()];
                cols.extend(YEARS.iter().map(|y| visitors_column(*y)));
                cols
            }
            TableId::GenderDistribution => {
                let mut cols = vec![NATIONALITY.to_string()];
                for y in YEARS {
                    cols.push(male_column(y));
                    cols.push(female_column(y));
                }
                cols
            }
            TableId::FamousPlaces => FAMOUS_PLACE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            TableId::TopPlaces => TOP_PLACE_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.warehouse_name())
    }
}

pub const COUNTRY: &str = "COUNTRY";
pub const NATIONALITY: &str = "COUNTRY_OF_NATIONALITY";

pub const NAME: &str = "NAME";
pub const ZONE: &str = "ZONE";
pub const STATE: &str = "STATE";
pub const CITY: &str = "CITY";
pub const TYPE: &str = "TYPE";
pub const TIME_NEEDED: &str = "TIME_NEEDED_TO_VISIT_IN_HRS";
pub const RATING: &str = "GOOGLE_REVIEW_RATING";
pub const ENTRANCE_FEE: &str = "ENTRANCE_FEE_IN_INR";
pub const REVIEWS: &str = "NUMBER_OF_GOOGLE_REVIEW_IN_LAKHS";
pub const DSLR_ALLOWED: &str = "DSLR_ALLOWED";
pub const BEST_TIME: &str = "BEST_TIME_TO_VISIT";
pub const IMAGE_URL: &str = "IMAGE_URL";

// IMAGE_URL is optional and therefore not listed.
const FAMOUS_PLACE_COLUMNS: [&str; 11] = [
    ZONE,
    STATE,
    CITY,
    NAME,
    TYPE,
    TIME_NEEDED,
    RATING,
    ENTRANCE_FEE,
    REVIEWS,
    DSLR_ALLOWED,
    BEST_TIME,
];

const TOP_PLACE_COLUMNS: [&str; 6] = [NAME, TYPE, TIME_NEEDED, RATING, ENTRANCE_FEE, REVIEWS];

pub fn visitors_column(year: u16) -> String {
    format!("_{year}")
}

pub fn male_column(year: u16) -> String {
    format!("_{year}_MALE")
}

pub fn female_column(year: u16) -> String {
    format!("_{year}_FEMALE")
}
