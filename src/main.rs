// Entry point and high-level CLI flow.
//
// - With a table argument, one analysis pass runs and the program exits.
// - Without one, a numbered menu offers the four tables; after each pass the
//   user can go back to the menu or exit.
// Each pass fetches its table, prints previews and insights, and exports the
// chart datasets plus a JSON summary to the output directory.
use clap::{Parser, ValueEnum};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tourism_explorer::error::{OutputError, ProviderError};
use tourism_explorer::loader::{self, CsvDirSource, LoadReport, TableSource};
use tourism_explorer::reports::{self, Highlight};
use tourism_explorer::util::{format_int, format_opt};
use tourism_explorer::{logging, output, Settings, TableId};
use tracing::{error, info};

/// Explore the tourism tables and export chart-ready datasets.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Table to analyse. Omit it to choose from the interactive menu.
    #[arg(value_enum)]
    table: Option<TableArg>,

    /// Directory holding one `<TABLE_NAME>.csv` export per table.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Directory for exported datasets and summaries.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Number of places kept in the popularity ranking.
    #[arg(long)]
    top_n: Option<usize>,

    /// Rows shown in each console preview.
    #[arg(long)]
    preview_rows: Option<usize>,

    /// Case-insensitive filter on place names (famous places).
    #[arg(long)]
    search: Option<String>,

    /// Place name (famous places) or country (gender) to show in detail.
    #[arg(long)]
    select: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum TableArg {
    Visitors,
    Gender,
    FamousPlaces,
    TopPlaces,
}

impl From<TableArg> for TableId {
    fn from(arg: TableArg) -> Self {
        match arg {
            TableArg::Visitors => TableId::YearlyVisitors,
            TableArg::Gender => TableId::GenderDistribution,
            TableArg::FamousPlaces => TableId::FamousPlaces,
            TableArg::TopPlaces => TableId::TopPlaces,
        }
    }
}

/// Free-text search and dropdown choice forwarded to the analyses.
#[derive(Default)]
struct Selection {
    search: Option<String>,
    select: Option<String>,
}

/// Print `prompt` and read one trimmed line. `None` on end of input.
fn read_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    match io::stdin().read_line(&mut buf) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(buf.trim().to_string()),
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.is_empty())
}

/// Ask the user whether to go back to the table selection menu.
///
/// Returns `true` if the user chose `Y`, `false` if they chose `N` or input ended.
fn prompt_back_to_menu() -> bool {
    loop {
        let Some(resp) = read_line("Back to Table Selection (Y/N): ") else {
            return false;
        };
        match resp.to_uppercase().as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

fn print_load(load: &LoadReport) {
    println!(
        "Processing table... ({} of {} rows loaded, {} skipped, {} values unusable)\n",
        format_int(load.loaded_rows),
        format_int(load.total_rows),
        format_int(load.skipped_rows),
        format_int(load.coerced_nulls)
    );
}

fn print_highlight(label: &str, h: Option<&Highlight>) {
    match h {
        Some(h) => output::print_metric(label, &h.name, Some(h.detail.as_str())),
        None => output::print_metric(label, "N/A", None),
    }
}

/// Create the output directory and run `write`; failures are reported but do
/// not abort the pass.
fn export<F>(settings: &Settings, table: TableId, write: F)
where
    F: FnOnce(&Path) -> Result<(), OutputError>,
{
    let dir = settings.out_dir.as_path();
    match output::ensure_dir(dir).and_then(|_| write(dir)) {
        Ok(()) => println!("(Datasets and summary exported to {})\n", dir.display()),
        Err(e) => {
            error!(%table, error = %e, "export failed");
            eprintln!("Write error: {}", e);
        }
    }
}

fn handle_visitors(source: &dyn TableSource, settings: &Settings) -> Result<(), ProviderError> {
    let t = TableId::YearlyVisitors;
    let (rows, load) = loader::load_visitors(source)?;
    print_load(&load);
    let report = reports::build_visitors_report(&rows);
    let n = settings.preview_rows;

    println!("Country-wise Visitors Analysis (2014-2020)\n");
    output::preview_table("Total Visitors by Country", None, &report.totals, n);
    output::preview_matrix("Year-over-Year Growth Rate (%)", &report.growth, n);
    output::preview_table(
        "COVID-19 Impact: Visitor Decline in 2020",
        Some("N/A where 2019 is missing or zero"),
        &report.impact,
        n,
    );

    let insights = &report.insights;
    println!("Key Insights");
    output::print_metric(
        "Overall Tourism Decline in 2020",
        &format!("{}%", format_opt(insights.overall_decline_pct, 1)),
        None,
    );
    print_highlight("Top Source Market (2019)", insights.top_source_market.as_ref());
    print_highlight("Fastest Growing Market", insights.fastest_growing.as_ref());
    println!();

    export(settings, t, |dir| report.export(dir, rows.len()));
    Ok(())
}

fn handle_gender(
    source: &dyn TableSource,
    settings: &Settings,
    selection: &Selection,
) -> Result<(), ProviderError> {
    let t = TableId::GenderDistribution;
    let (rows, load) = loader::load_gender(source)?;
    print_load(&load);
    let report = reports::build_gender_report(&rows, selection.select.as_deref());
    let n = settings.preview_rows;

    println!("Country-wise Gender Distribution Analysis (2014-2020)\n");
    output::preview_table("Gender Distribution by Country (2020)", None, &report.split, n);
    output::preview_matrix("Gender Gap Evolution (Male% - Female%)", &report.gaps, n);
    match &report.selection {
        Some(row) => output::preview_table(
            &format!("Gender Distribution in {} (2020)", row.country),
            None,
            std::slice::from_ref(row),
            1,
        ),
        None => println!("No country selected.\n"),
    }

    let insights = &report.insights;
    println!("Key Insights");
    output::print_metric(
        "Gender Distribution (2020)",
        &format!(
            "M: {}% | F: {}%",
            format_opt(insights.avg_male_pct, 1),
            format_opt(insights.avg_female_pct, 1)
        ),
        Some(format!("Gap: {}%", format_opt(insights.avg_gap, 1)).as_str()),
    );
    print_highlight("Most Gender Balanced Country", insights.most_balanced.as_ref());
    print_highlight("Largest Gender Gap", insights.largest_gap.as_ref());
    println!();

    export(settings, t, |dir| report.export(dir, rows.len()));
    Ok(())
}

fn handle_famous_places(
    source: &dyn TableSource,
    settings: &Settings,
    selection: &Selection,
) -> Result<(), ProviderError> {
    let t = TableId::FamousPlaces;
    let (rows, load) = loader::load_famous_places(source)?;
    print_load(&load);
    let report = reports::build_famous_places_report(
        &rows,
        selection.search.as_deref(),
        selection.select.as_deref(),
    );
    let n = settings.preview_rows;

    println!("India's Famous Tourist Places Analysis\n");
    println!(
        "{} of {} places match the search.\n",
        format_int(report.matches.len()),
        format_int(rows.len())
    );
    match &report.details {
        Some(details) => {
            output::preview_table("Place Details", None, details, details.len());
            if let Some(url) = &report.image_url {
                println!("Image: {}\n", url);
            }
        }
        None => println!("No place selected.\n"),
    }
    output::preview_table("Types of Tourist Places by Zone", None, &report.zone_types, n);
    output::preview_table("Entry Fee Distribution", None, &report.fees, report.fees.len());
    output::preview_table("Best Time to Visit Distribution", None, &report.best_times, n);

    let insights = &report.insights;
    println!("Key Insights");
    output::print_metric(
        "Average Rating",
        &format!("{}/5", format_opt(insights.avg_rating, 1)),
        Some(
            format!(
                "Based on {} lakh reviews",
                format_opt(Some(insights.total_reviews_lakhs), 1)
            )
            .as_str(),
        ),
    );
    print_highlight("Highest Rated Place", insights.highest_rated.as_ref());
    print_highlight("Most Popular Place", insights.most_reviewed.as_ref());
    println!();

    export(settings, t, |dir| report.export(dir, rows.len()));
    Ok(())
}

fn handle_top_places(source: &dyn TableSource, settings: &Settings) -> Result<(), ProviderError> {
    let t = TableId::TopPlaces;
    let (rows, load) = loader::load_top_places(source)?;
    print_load(&load);
    let report = reports::build_top_places_report(&rows, settings.top_n);
    let n = settings.preview_rows;

    println!("India's Top-Rated Tourist Attractions\n");
    output::preview_table(
        &format!("Top {} Most Popular Places", settings.top_n),
        Some("popularity = rating x reviews in lakhs"),
        &report.popular,
        report.popular.len(),
    );
    output::preview_table("Place Types: Rating vs Popularity", None, &report.categories, n);

    let insights = &report.insights;
    println!("Rankings & Analytics");
    print_highlight("Best Value for Money", insights.best_value.as_ref());
    print_highlight("Most Popular Category", insights.most_popular_category.as_ref());
    print_highlight("Most Time-Efficient Visit", insights.most_time_efficient.as_ref());
    println!();

    export(settings, t, |dir| report.export(dir, rows.len()));
    Ok(())
}

/// One analysis pass. Provider failures end the pass and are reported once.
fn run_analysis(
    table: TableId,
    source: &dyn TableSource,
    settings: &Settings,
    selection: &Selection,
) -> Result<(), ProviderError> {
    println!("{}\n", table.label());
    let result = match table {
        TableId::YearlyVisitors => handle_visitors(source, settings),
        TableId::GenderDistribution => handle_gender(source, settings, selection),
        TableId::FamousPlaces => handle_famous_places(source, settings, selection),
        TableId::TopPlaces => handle_top_places(source, settings),
    };
    if let Err(e) = &result {
        error!(table = %e.table(), error = %e, "analysis aborted");
        eprintln!("Error: {}\n", e);
    }
    result
}

fn prompt_selection(table: TableId) -> Selection {
    match table {
        TableId::FamousPlaces => Selection {
            search: non_empty(read_line("Search places (blank for all): ")),
            select: non_empty(read_line("Select a place (blank for first match): ")),
        },
        TableId::GenderDistribution => Selection {
            search: None,
            select: non_empty(read_line("Select a country (blank for first): ")),
        },
        _ => Selection::default(),
    }
}

fn interactive(source: &dyn TableSource, settings: &Settings) {
    loop {
        println!("Select a table to explore:");
        for (idx, table) in TableId::ALL.iter().enumerate() {
            println!("[{}] {}", idx + 1, table.label());
        }
        println!();
        let Some(choice) = read_line("Enter choice: ") else {
            break;
        };
        let table = match choice.parse::<usize>() {
            Ok(n) if (1..=TableId::ALL.len()).contains(&n) => TableId::ALL[n - 1],
            _ => {
                println!("Invalid choice. Please enter 1-{}.\n", TableId::ALL.len());
                continue;
            }
        };
        println!();
        let selection = prompt_selection(table);
        // errors are already reported inside the pass
        let _ = run_analysis(table, source, settings, &selection);
        if !prompt_back_to_menu() {
            println!("Exiting the program.");
            break;
        }
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init_logging()?;

    let cli = Cli::parse();
    let mut settings = Settings::from_env()?;
    if let Some(dir) = cli.data_dir {
        settings.data_dir = dir;
    }
    if let Some(dir) = cli.out_dir {
        settings.out_dir = dir;
    }
    if let Some(n) = cli.top_n {
        settings.top_n = n;
    }
    if let Some(n) = cli.preview_rows {
        settings.preview_rows = n;
    }
    settings.validate()?;

    let source = CsvDirSource::new(&settings.data_dir);
    info!(data_dir = %source.dir().display(), out_dir = %settings.out_dir.display(), "settings loaded");
    match cli.table {
        Some(arg) => {
            let selection = Selection {
                search: non_empty(cli.search),
                select: non_empty(cli.select),
            };
            run_analysis(arg.into(), &source, &settings, &selection)?;
        }
        None => interactive(&source, &settings),
    }
    Ok(())
}
