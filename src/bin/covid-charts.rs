use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use covid_charts::models::RenderResult;
use covid_charts::viz::ImageFormat;
use covid_charts::{ChartComposer, Config, PlottersBackend, storage};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "covid-charts",
    version,
    about = "Plot cumulative COVID-19 infections and deaths for selected countries"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the infections and deaths comparison charts.
    Plot(PlotArgs),
    /// List the countries present in a dataset file.
    Countries(CountriesArgs),
    /// Print the default configuration as TOML.
    Config,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutFormat {
    Svg,
    Png,
}

impl From<OutFormat> for ImageFormat {
    fn from(f: OutFormat) -> Self {
        match f {
            OutFormat::Svg => ImageFormat::Svg,
            OutFormat::Png => ImageFormat::Png,
        }
    }
}

#[derive(Args, Debug)]
struct PlotArgs {
    /// Wide CSV of cumulative infections (country column, then one column per day).
    #[arg(long)]
    infections: PathBuf,
    /// Wide CSV of cumulative deaths, same date columns as --infections.
    #[arg(long)]
    deaths: PathBuf,
    /// TOML configuration file; defaults are used for anything it omits.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Countries separated by semicolon (e.g., "Germany;Korea, South").
    #[arg(long)]
    countries: Option<String>,
    /// First day offset to plot (non-positive = first day).
    #[arg(long, allow_hyphen_values = true)]
    start_day: Option<i64>,
    /// End day offset, exclusive (non-positive = last day).
    #[arg(long, allow_hyphen_values = true)]
    end_day: Option<i64>,
    /// Label every n-th day on the x axis.
    #[arg(long)]
    nth_tick: Option<usize>,
    /// Label the x axis with day offsets instead of dates.
    #[arg(long, default_value_t = false)]
    days_as_label: bool,
    /// Do not write image files.
    #[arg(long, default_value_t = false)]
    no_save: bool,
    /// Output directory for images.
    #[arg(long)]
    image_dir: Option<PathBuf>,
    /// Image format.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Print results as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Args, Debug)]
struct CountriesArgs {
    /// Wide CSV dataset.
    path: PathBuf,
}

fn parse_list(s: &str) -> Vec<String> {
    s.split(';')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Plot(args) => cmd_plot(args),
        Command::Countries(args) => cmd_countries(args),
        Command::Config => {
            print!("{}", Config::default().to_toml_string()?);
            Ok(())
        }
    }
}

fn apply_overrides(cfg: &mut Config, args: &PlotArgs) {
    if let Some(list) = args.countries.as_deref() {
        cfg.countries.countries = parse_list(list);
    }
    if let Some(v) = args.start_day {
        cfg.countries.start_day = v;
    }
    if let Some(v) = args.end_day {
        cfg.countries.end_day = v;
    }
    if let Some(v) = args.nth_tick {
        cfg.countries.nth_tick = v;
    }
    if args.days_as_label {
        cfg.countries.plot_days_as_label_x = true;
    }
    if args.no_save {
        cfg.plot.save_to_file = false;
    }
    if let Some(dir) = args.image_dir.as_ref() {
        cfg.plot.image_dir = dir.clone();
    }
    if let Some(f) = args.format {
        cfg.plot.format = f.into();
    }
}

fn cmd_plot(args: PlotArgs) -> Result<()> {
    let mut cfg = match args.config.as_ref() {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    apply_overrides(&mut cfg, &args);
    cfg.validate()?;

    let data = storage::load_dataset(&args.infections, &args.deaths)?;
    let backend = PlottersBackend::new(cfg.plot.format, cfg.plot.font_path.clone());
    let cwd = std::env::current_dir().context("resolving working directory")?;
    let composer = ChartComposer::new(&cfg, backend, cwd);
    let results = composer.compose_all(&data)?;

    if args.json {
        let out: Vec<_> = results
            .iter()
            .map(|(kind, r)| serde_json::json!({ "chart": format!("{kind:?}"), "result": r }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    for (kind, result) in &results {
        match result {
            RenderResult::Skipped => println!("{kind:?}: skipped"),
            RenderResult::Rendered {
                file_path,
                plot_name,
                missing_countries,
            } => {
                let where_ = file_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "not saved".to_string());
                println!("{kind:?}: {plot_name} -> {where_}");
                if !missing_countries.is_empty() {
                    println!("  not found: {}", missing_countries.join(", "));
                }
            }
        }
    }
    Ok(())
}

fn cmd_countries(args: CountriesArgs) -> Result<()> {
    let (table, axis) = storage::load_daily_csv(&args.path)?;
    eprintln!(
        "{} countries, {} days ({} to {})",
        table.countries().count(),
        axis.len(),
        axis.first_date(),
        axis.last_date()
    );
    for country in table.countries() {
        println!("{country}");
    }
    Ok(())
}
