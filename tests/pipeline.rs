use std::fs;
use std::path::Path;

use approx::assert_abs_diff_eq;

use tourism_explorer::charts::ChartSpec;
use tourism_explorer::loader::{self, CsvDirSource, MemorySource};
use tourism_explorer::metrics::{gender, places, visitors};
use tourism_explorer::reports::{self, summary_file};
use tourism_explorer::schema::YEARS;
use tourism_explorer::{logging, ProviderError, TableId};

const VISITORS_CSV: &str = "COUNTRY,_2014,_2015,_2016,_2017,_2018,_2019,_2020\n\
France,80,90,100,110,120,100,40\n\
Fiji,1,2,3,4,5,0,5\n";

const TOP_PLACES_CSV: &str = "NAME,CITY,TYPE,TIME_NEEDED_TO_VISIT_IN_HRS,GOOGLE_REVIEW_RATING,ENTRANCE_FEE_IN_INR,NUMBER_OF_GOOGLE_REVIEW_IN_LAKHS\n\
A,Delhi,Fort,2,4.0,40,2.0\n\
B,Agra,Tomb,0,5.0,100,1.0\n\
C,Jaipur,Fort,1,4.0,0,2.0\n";

const FAMOUS_HEADER: &str = "ZONE,STATE,CITY,NAME,TYPE,TIME_NEEDED_TO_VISIT_IN_HRS,GOOGLE_REVIEW_RATING,ENTRANCE_FEE_IN_INR,NUMBER_OF_GOOGLE_REVIEW_IN_LAKHS,DSLR_ALLOWED,BEST_TIME_TO_VISIT";

fn gender_csv(rows: &[(&str, f64, f64)]) -> String {
    let mut header = vec!["COUNTRY_OF_NATIONALITY".to_string()];
    for y in YEARS {
        header.push(format!("_{y}_MALE"));
        header.push(format!("_{y}_FEMALE"));
    }
    let mut text = header.join(",");
    text.push('\n');
    for (country, male, female) in rows {
        let mut cells = vec![country.to_string()];
        for _ in YEARS {
            cells.push(male.to_string());
            cells.push(female.to_string());
        }
        text.push_str(&cells.join(","));
        text.push('\n');
    }
    text
}

fn famous_csv() -> String {
    format!(
        "{FAMOUS_HEADER}\n\
         Northern,Delhi,Delhi,Red Fort,Fort,2,4.5,35,1.5,Yes,Evening\n\
         Western,Rajasthan,Jaipur,Amber Fort,Fort,3,4.6,600,1.0,Yes,Morning\n\
         Southern,Karnataka,Mysore,Mysore Palace,Palace,2,4.7,0,0.8,No,Evening\n"
    )
}

/// Every column a chart binds exists in its dataset, and the plotted
/// quantity parses as a number wherever it is defined.
fn assert_charts_match_datasets(dir: &Path, charts: &[ChartSpec]) -> anyhow::Result<()> {
    for chart in charts {
        let mut rdr = csv::Reader::from_path(dir.join(&chart.dataset))?;
        let headers = rdr.headers()?.clone();
        for column in chart.columns() {
            assert!(
                headers.iter().any(|h| h == column),
                "{} has no column {column}",
                chart.dataset
            );
        }

        let measure = chart.measure().expect("every chart plots a quantity");
        let idx = headers.iter().position(|h| h == measure).unwrap();
        let mut defined = 0;
        for record in rdr.records() {
            let record = record?;
            let cell = &record[idx];
            if cell.is_empty() {
                continue;
            }
            cell.parse::<f64>().map_err(|e| {
                anyhow::anyhow!("{}: {measure} value {cell:?} is not numeric: {e}", chart.dataset)
            })?;
            defined += 1;
        }
        assert!(defined > 0, "{} has no values for {measure}", chart.dataset);
    }
    Ok(())
}

fn write_table(dir: &Path, table: TableId, text: &str) -> anyhow::Result<()> {
    fs::write(dir.join(format!("{}.csv", table.warehouse_name())), text)?;
    Ok(())
}

#[test]
fn visitors_pipeline_exports_datasets_and_summary() -> anyhow::Result<()> {
    logging::init_logging()?;

    let data = tempfile::tempdir()?;
    let out = tempfile::tempdir()?;
    write_table(data.path(), TableId::YearlyVisitors, VISITORS_CSV)?;

    let source = CsvDirSource::new(data.path());
    let (rows, load) = loader::load_visitors(&source)?;
    assert_eq!(load.loaded_rows, 2);
    assert_eq!(load.skipped_rows, 0);

    let france = &rows[0];
    assert_abs_diff_eq!(visitors::covid_decline(france).unwrap(), -60.0, epsilon = 1e-9);
    assert_eq!(visitors::covid_decline(&rows[1]), None);

    let report = reports::build_visitors_report(&rows);
    assert_abs_diff_eq!(report.growth.get("France", 2015).unwrap(), 12.5, epsilon = 1e-9);
    assert_eq!(report.growth.get("Fiji", 2020), None);
    assert_eq!(report.insights.overall_decline_pct, Some(-55.0));
    assert_eq!(
        report.insights.top_source_market.as_ref().map(|h| h.name.as_str()),
        Some("France")
    );

    report.export(out.path(), rows.len())?;
    let summary_path = out.path().join(summary_file(TableId::YearlyVisitors));

    let impact = fs::read_to_string(out.path().join("visitors_impact.csv"))?;
    assert!(impact.starts_with("Country,Visitors2019,Visitors2020,DeclinePct\n"));
    assert!(impact.contains("France,100.0,40.0,-60.0\n"));
    assert!(impact.contains("Fiji,0.0,5.0,\n"));

    let growth = fs::read_to_string(out.path().join("visitors_growth.csv"))?;
    assert!(growth.starts_with("Country,Year,Value\nFrance,2015,12.5\n"));

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&summary_path)?)?;
    assert_eq!(json["table"], "COUNTRYWISEYEARLYVISITORS");
    assert_eq!(json["rows"], 2);
    assert_eq!(json["charts"].as_array().map(Vec::len), Some(4));
    assert_eq!(json["charts"][0]["dataset"], "visitors_trend.csv");
    Ok(())
}

#[test]
fn gender_pipeline_finds_largest_gap_and_most_balanced() -> anyhow::Result<()> {
    let source = MemorySource::new().with_table(
        TableId::GenderDistribution,
        gender_csv(&[("India", 70.0, 30.0), ("Japan", 52.0, 48.0), ("Kenya", 45.0, 55.0)]),
    );
    let (rows, _) = loader::load_gender(&source)?;

    let (country, gap) = gender::largest_gap(&rows).unwrap();
    assert_eq!(country, "India");
    assert_abs_diff_eq!(gap, 40.0, epsilon = 1e-9);

    let report = reports::build_gender_report(&rows, Some("Kenya"));
    let selected = report.selection.as_ref().unwrap();
    assert_eq!(selected.gap, "-10.0");
    assert_eq!(report.insights.most_balanced.as_ref().unwrap().name, "Japan");
    assert_eq!(report.gaps.get("India", 2014), Some(40.0));
    Ok(())
}

#[test]
fn top_places_ranking_keeps_table_order_on_ties() -> anyhow::Result<()> {
    let source = MemorySource::new().with_table(TableId::TopPlaces, TOP_PLACES_CSV);
    let (rows, _) = loader::load_top_places(&source)?;

    let ranked = places::top_by_popularity(&rows, 2);
    let names: Vec<&str> = ranked.iter().map(|r| r.place.name.as_str()).collect();
    assert_eq!(names, vec!["A", "C"]);

    let report = reports::build_top_places_report(&rows, 5);
    assert_eq!(report.popular.len(), 3);
    assert_eq!(report.popular[2].name, "B");
    // C is free, so it costs nothing per rating point
    assert_eq!(report.insights.best_value.as_ref().unwrap().name, "C");
    // B has a zero visit duration and is left out
    assert_eq!(report.insights.most_time_efficient.as_ref().unwrap().name, "C");
    assert_eq!(report.data.points[1].city.as_deref(), Some("Agra"));
    Ok(())
}

#[test]
fn famous_places_search_and_fee_buckets() -> anyhow::Result<()> {
    let source = MemorySource::new().with_table(TableId::FamousPlaces, famous_csv());
    let (rows, _) = loader::load_famous_places(&source)?;

    let report = reports::build_famous_places_report(&rows, Some("FORT"), Some("Amber Fort"));
    assert_eq!(report.matches, vec!["Red Fort".to_string(), "Amber Fort".to_string()]);
    assert_eq!(report.insights.selected_place.as_deref(), Some("Amber Fort"));
    assert_eq!(report.image_url, None);

    let counts: Vec<usize> = report.fees.iter().map(|r| r.count).collect();
    assert_eq!(counts, vec![1, 1, 0, 1]);
    assert_eq!(report.best_times[0].label, "Evening");
    assert_eq!(report.best_times[0].count, 2);
    assert_eq!(report.insights.highest_rated.as_ref().unwrap().name, "Mysore Palace");
    Ok(())
}

#[test]
fn provider_failures_are_classified() -> anyhow::Result<()> {
    let data = tempfile::tempdir()?;
    let source = CsvDirSource::new(data.path());

    assert!(matches!(
        loader::load_visitors(&source),
        Err(ProviderError::Unavailable { table: TableId::YearlyVisitors, .. })
    ));

    write_table(data.path(), TableId::TopPlaces, "NAME,TYPE\nTaj Mahal,Mausoleum\n")?;
    match loader::load_top_places(&source) {
        Err(ProviderError::Malformed { missing, .. }) => {
            assert!(missing.contains(&"GOOGLE_REVIEW_RATING".to_string()));
        }
        other => panic!("expected malformed error, got {other:?}"),
    }

    write_table(data.path(), TableId::GenderDistribution, &gender_csv(&[]))?;
    assert!(matches!(
        loader::load_gender(&source),
        Err(ProviderError::Empty { table: TableId::GenderDistribution })
    ));
    Ok(())
}

#[test]
fn every_chart_binds_numeric_columns_of_its_dataset() -> anyhow::Result<()> {
    let out = tempfile::tempdir()?;
    let dir = out.path();
    let source = MemorySource::new()
        .with_table(TableId::YearlyVisitors, VISITORS_CSV)
        .with_table(
            TableId::GenderDistribution,
            gender_csv(&[("India", 70.0, 30.0), ("Japan", 52.0, 48.0)]),
        )
        .with_table(TableId::FamousPlaces, famous_csv())
        .with_table(TableId::TopPlaces, TOP_PLACES_CSV);

    let (rows, _) = loader::load_visitors(&source)?;
    reports::build_visitors_report(&rows).export(dir, rows.len())?;
    assert_charts_match_datasets(dir, &reports::VisitorsReport::charts())?;

    let (rows, _) = loader::load_gender(&source)?;
    reports::build_gender_report(&rows, None).export(dir, rows.len())?;
    assert_charts_match_datasets(dir, &reports::GenderReport::charts())?;
    let pie = fs::read_to_string(dir.join("gender_selection.csv"))?;
    assert_eq!(pie, "Country,Gender,Pct\nIndia,Male,70.0\nIndia,Female,30.0\n");

    let (rows, _) = loader::load_famous_places(&source)?;
    reports::build_famous_places_report(&rows, None, None).export(dir, rows.len())?;
    assert_charts_match_datasets(dir, &reports::FamousPlacesReport::charts())?;

    let (rows, _) = loader::load_top_places(&source)?;
    reports::build_top_places_report(&rows, 5).export(dir, rows.len())?;
    assert_charts_match_datasets(dir, &reports::TopPlacesReport::charts())?;

    for table in TableId::ALL {
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.join(summary_file(table)))?)?;
        assert_eq!(json["table"], table.warehouse_name());
    }
    Ok(())
}
