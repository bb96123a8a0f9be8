use chrono::{NaiveDate, Utc};
use mismatch_feed::synthetic::{EVOLUTION_DAYS, FLOWS};
use mismatch_feed::{
    CsvHistory, FeedError, FlowHistory, HistoryProvider, SinusoidalHistory, StaticHistory,
    UniformHistory,
};
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;
use trend_forecast::DailyObservation;

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

#[test]
fn test_sinusoidal_history_shape() {
    let end = date("2024-06-30");
    let provider = SinusoidalHistory::new(30, end, 42).unwrap();

    let history = provider.fetch_recent_history().unwrap();

    assert_eq!(history.len(), 30);
    assert_eq!(history[0].date, date("2024-06-01"));
    assert_eq!(history[29].date, end);
    for pair in history.windows(2) {
        assert_eq!(pair[1].date.signed_duration_since(pair[0].date).num_days(), 1);
    }
    // 20 + 10 * sin(x) + [0, 5) lies in [10, 35]
    assert!(history.iter().all(|obs| (10..=35).contains(&obs.count)));
}

#[test]
fn test_sinusoidal_history_is_reproducible() {
    let end = date("2024-02-10");
    let first = SinusoidalHistory::new(15, end, 7).unwrap();
    let second = SinusoidalHistory::new(15, end, 7).unwrap();

    assert_eq!(
        first.fetch_recent_history().unwrap(),
        second.fetch_recent_history().unwrap()
    );
    // Fetching twice from the same provider yields the same data
    assert_eq!(
        first.fetch_recent_history().unwrap(),
        first.fetch_recent_history().unwrap()
    );
}

#[test]
fn test_sinusoidal_custom_shape() {
    let provider = SinusoidalHistory::new(10, date("2024-01-10"), 1)
        .unwrap()
        .with_shape(60.0, 0.0, 5.0)
        .unwrap();

    let history = provider.fetch_recent_history().unwrap();

    assert!(history.iter().all(|obs| (60..=65).contains(&obs.count)));
    assert!(SinusoidalHistory::new(10, date("2024-01-10"), 1)
        .unwrap()
        .with_shape(0.0, 1.0, 0.0)
        .is_err());
}

#[test]
fn test_uniform_history_bounds() {
    let provider = UniformHistory::new(30, date("2024-03-31"), 3, 5).unwrap();

    let history = provider.fetch_recent_history().unwrap();

    assert_eq!(history.len(), 30);
    assert!(history.iter().all(|obs| obs.count < 5));
}

#[test]
fn test_flow_history_bounds() {
    let provider = FlowHistory::new("Flow C", date("2024-01-30"), 5, 11, 200).unwrap();

    let history = provider.fetch_recent_history().unwrap();

    assert_eq!(provider.name(), "Flow C");
    assert_eq!(history.len(), 5);
    assert_eq!(history[0].date, date("2024-01-30"));
    assert_eq!(history[4].date, date("2024-02-03"));
    assert!(history.iter().all(|obs| obs.count < 200));
}

#[test]
fn test_flow_evolution_defaults() {
    let provider = FlowHistory::evolution("Flow A", 3).unwrap();

    let history = provider.fetch_recent_history().unwrap();

    assert_eq!(history.len(), EVOLUTION_DAYS);
    assert_eq!(history[0].date, date("2023-08-01"));
    assert_eq!(history[EVOLUTION_DAYS - 1].date, date("2023-11-28"));
    assert_eq!(history, provider.fetch_recent_history().unwrap());
}

#[test]
fn test_evolution_flows_one_per_flow() {
    let providers = FlowHistory::evolution_flows(10).unwrap();

    let names: Vec<&str> = providers.iter().map(|p| p.name()).collect();
    assert_eq!(names, FLOWS.to_vec());
    assert_ne!(
        providers[0].fetch_recent_history().unwrap(),
        providers[1].fetch_recent_history().unwrap()
    );
}

#[test]
fn test_providers_ending_today() {
    let today = Utc::now().date_naive();
    let sinusoidal = SinusoidalHistory::ending_today(12, 1)
        .unwrap()
        .fetch_recent_history()
        .unwrap();
    let incidents = UniformHistory::incident_timeline(9, 1)
        .unwrap()
        .fetch_recent_history()
        .unwrap();

    assert_eq!(sinusoidal.len(), 12);
    assert_eq!(incidents.len(), 9);
    // Allow for the date rolling over between construction and the check
    for last in [sinusoidal[11].date, incidents[8].date] {
        assert!((today - last).num_days().abs() <= 1);
    }
    assert!(incidents.iter().all(|obs| obs.count < 5));
}

#[test]
fn test_invalid_synthetic_parameters() {
    assert!(matches!(
        SinusoidalHistory::new(0, date("2024-01-01"), 0),
        Err(FeedError::InvalidParameter(_))
    ));
    assert!(matches!(
        UniformHistory::new(10, date("2024-01-01"), 0, 0),
        Err(FeedError::InvalidParameter(_))
    ));
    assert!(matches!(
        FlowHistory::new(" ", date("2024-01-01"), 10, 0, 200),
        Err(FeedError::InvalidParameter(_))
    ));
    assert!(matches!(
        FlowHistory::new("Flow B", date("2024-01-01"), 0, 0, 200),
        Err(FeedError::InvalidParameter(_))
    ));
}

#[test]
fn test_csv_history_sorted() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "date,count").unwrap();
    writeln!(file, "2024-01-03, 30").unwrap();
    writeln!(file, "2024-01-01,10").unwrap();
    writeln!(file, "2024-01-02,20").unwrap();

    let provider = CsvHistory::new(file.path());
    let history = provider.fetch_recent_history().unwrap();

    assert_eq!(provider.path(), file.path());

    assert_eq!(
        history,
        vec![
            DailyObservation::new(date("2024-01-01"), 10),
            DailyObservation::new(date("2024-01-02"), 20),
            DailyObservation::new(date("2024-01-03"), 30),
        ]
    );
}

#[test]
fn test_csv_history_errors() {
    assert!(matches!(
        CsvHistory::new("nonexistent_history.csv").fetch_recent_history(),
        Err(FeedError::IoError(_))
    ));

    let mut header_only = NamedTempFile::new().unwrap();
    writeln!(header_only, "date,count").unwrap();
    assert!(matches!(
        CsvHistory::new(header_only.path()).fetch_recent_history(),
        Err(FeedError::Empty(_))
    ));

    let mut bad_count = NamedTempFile::new().unwrap();
    writeln!(bad_count, "date,count").unwrap();
    writeln!(bad_count, "2024-01-01,-4").unwrap();
    assert!(matches!(
        CsvHistory::new(bad_count.path()).fetch_recent_history(),
        Err(FeedError::CsvError(_))
    ));

    let mut duplicate = NamedTempFile::new().unwrap();
    writeln!(duplicate, "date,count").unwrap();
    writeln!(duplicate, "2024-01-01,4").unwrap();
    writeln!(duplicate, "2024-01-01,5").unwrap();
    assert!(matches!(
        CsvHistory::new(duplicate.path()).fetch_recent_history(),
        Err(FeedError::InvalidRecord(_))
    ));
}

#[test]
fn test_static_history_passthrough() {
    let observations = vec![DailyObservation::new(date("2024-01-01"), 3)];
    let provider = StaticHistory::new(observations.clone());

    assert_eq!(provider.name(), "static");
    assert_eq!(provider.fetch_recent_history().unwrap(), observations);
}
