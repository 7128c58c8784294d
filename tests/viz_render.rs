use chrono::NaiveDate;
use covid_charts::models::{DailySeriesTable, Dataset, DateAxis};
use covid_charts::viz::fonts::ensure_fonts_registered;
use covid_charts::viz::{
    Backend, Canvas, ChartComposer, ChartKind, FigureSize, ImageFormat, PlottersBackend,
    SaveTarget,
};
use covid_charts::{Config, RenderResult};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// Chart text needs a registered TTF; machines without one skip rendering tests.
fn fonts_available() -> bool {
    let found = ensure_fonts_registered(None).is_some();
    if !found {
        eprintln!("skipping: no sans-serif font available");
    }
    found
}

fn dataset() -> Dataset {
    let infections = DailySeriesTable::from_rows([
        ("Germany", (0..90).map(|d| d * 500).collect::<Vec<i64>>()),
        ("Korea, South", (0..90).map(|d| d * 120).collect()),
    ])
    .unwrap();
    let deaths = DailySeriesTable::from_rows([
        ("Germany", (0..90).map(|d| d * 20).collect::<Vec<i64>>()),
        ("Korea, South", (0..90).map(|d| d * 3).collect()),
    ])
    .unwrap();
    let first = NaiveDate::from_ymd_opt(2020, 1, 22).unwrap();
    Dataset::new(infections, deaths, DateAxis::consecutive(first, 90)).unwrap()
}

fn config(image_dir: &Path, format: ImageFormat) -> Config {
    let mut cfg = Config::default();
    cfg.countries.countries = vec!["Germany".into(), "Korea, South".into(), "Atlantis".into()];
    cfg.plot.image_dir = image_dir.to_path_buf();
    cfg.plot.format = format;
    cfg.plot.width = 900;
    cfg.plot.height = 500;
    cfg
}

#[test]
fn svg_charts_are_written_per_variant() {
    if !fonts_available() {
        return;
    }
    let dir = tempdir().unwrap();
    let cfg = config(Path::new("out"), ImageFormat::Svg);
    let composer = ChartComposer::new(&cfg, PlottersBackend::new(ImageFormat::Svg, None), dir.path());

    let results = composer.compose_all(&dataset()).unwrap();
    for (kind, result) in results {
        let RenderResult::Rendered {
            file_path: Some(path),
            missing_countries,
            ..
        } = result
        else {
            panic!("{kind:?} should be rendered and saved");
        };
        assert_eq!(missing_countries, vec!["Atlantis"]);
        assert!(path.starts_with(dir.path().join("out").join("2020-04-20")));
        let svg = fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Germany"));
    }
}

#[test]
fn png_output_uses_bitmap_backend() {
    if !fonts_available() {
        return;
    }
    let dir = tempdir().unwrap();
    let cfg = config(Path::new("png"), ImageFormat::Png);
    let composer = ChartComposer::new(&cfg, PlottersBackend::new(ImageFormat::Png, None), dir.path());
    let result = composer
        .compose(ChartKind::DeathsOnly, &dataset())
        .unwrap();
    let path = result.file_path().expect("saved").clone();
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));
    assert!(fs::metadata(&path).unwrap().len() > 0);
}

#[test]
fn canvas_keeps_svg_in_memory_without_saving() {
    if !fonts_available() {
        return;
    }
    let mut cfg = config(Path::new("unused"), ImageFormat::Svg);
    cfg.plot.save_to_file = false;
    let composer = ChartComposer::new(&cfg, PlottersBackend::default(), "/nonexistent");
    let chart = composer
        .build_chart(ChartKind::InfectionsOverlay, &dataset())
        .chart;

    let backend = PlottersBackend::default();
    let mut canvas = backend
        .open(FigureSize {
            width: 1600,
            height: 800,
        })
        .unwrap();
    canvas.render(&chart).unwrap();
    assert!(canvas.svg().contains("Germany (Deaths)"));
    assert!(canvas.svg().contains("2020-03-22"));

    let result = composer.compose(ChartKind::InfectionsOverlay, &dataset()).unwrap();
    assert_eq!(result.file_path(), None);
    assert!(!Path::new("/nonexistent/unused").exists());
}

#[test]
fn saving_before_rendering_is_an_error() {
    if !fonts_available() {
        return;
    }
    let dir = tempdir().unwrap();
    let canvas = PlottersBackend::default()
        .open(FigureSize {
            width: 300,
            height: 200,
        })
        .unwrap();
    let target = SaveTarget {
        cwd: dir.path(),
        image_dir: Path::new("x"),
        last_date: NaiveDate::from_ymd_opt(2020, 4, 20).unwrap(),
        filename: "empty",
    };
    assert!(canvas.save(&target).is_err());
}
