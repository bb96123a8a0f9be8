use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use recon_watch::feed::{
    CsvHistory, FlowHistory, HistoryProvider, SinusoidalHistory, UniformHistory,
};
use recon_watch::forecast::TrendForecaster;
use recon_watch::settings::{HistorySource, RunSettings};
use recon_watch::{ForecastPanel, PanelState};
use tracing::info;
use tracing_subscriber::prelude::*;

// Refresh the panel once and print its state as JSON on stdout
fn render<P: HistoryProvider>(
    panel: ForecastPanel<P>,
    rng: &mut StdRng,
) -> Result<PanelState, Box<dyn std::error::Error>> {
    info!(
        provider = panel.provider().name(),
        horizon = panel.forecaster().config().horizon_days,
        "refreshing forecast panel"
    );
    let state = panel.refresh(rng);
    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(state)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "recon_watch=info,trend_forecast=info,mismatch_feed=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    dotenvy::dotenv().ok();
    let settings = RunSettings::from_env()?;

    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let forecaster = TrendForecaster::new(settings.forecast.clone())?;

    let state = match &settings.history_csv {
        Some(path) => {
            let provider = CsvHistory::new(path);
            info!(path = %provider.path().display(), "forecasting from CSV history");
            render(ForecastPanel::new(provider, forecaster), &mut rng)?
        }
        None => {
            let history_seed = rng.gen::<u64>();
            let days = settings.history_days;
            info!(source = ?settings.history_source, history_seed, "forecasting from synthetic history");
            match &settings.history_source {
                HistorySource::Sinusoidal => {
                    let provider = SinusoidalHistory::ending_today(days, history_seed)?;
                    render(ForecastPanel::new(provider, forecaster), &mut rng)?
                }
                HistorySource::Incidents => {
                    let provider = UniformHistory::incident_timeline(days, history_seed)?;
                    render(ForecastPanel::new(provider, forecaster), &mut rng)?
                }
                // Evolution data covers a fixed period, so the history length does not apply
                HistorySource::Flow(flow) => {
                    let provider = FlowHistory::evolution(flow.as_str(), history_seed)?;
                    render(ForecastPanel::new(provider, forecaster), &mut rng)?
                }
            }
        }
    };

    if !state.is_ready() {
        std::process::exit(1);
    }
    Ok(())
}
