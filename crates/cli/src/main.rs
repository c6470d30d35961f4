use clap::Parser;
use gourmet_core::error::GourmetError;
use gourmet_core::geo::Location;
use gourmet_core::geocode::GeocodeClient;
use gourmet_core::search::{find_restaurants, SearchQuery};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod render;

#[derive(Debug, Parser)]
#[command(name = "gourmet_cli", about = "Find highly-rated restaurants nearby")]
struct Args {
    /// Latitude of the search center.
    #[arg(long, allow_negative_numbers = true, requires = "lng")]
    lat: Option<f64>,

    /// Longitude of the search center.
    #[arg(long, allow_negative_numbers = true, requires = "lat")]
    lng: Option<f64>,

    /// Street address to geocode instead of passing coordinates.
    #[arg(long, conflicts_with_all = ["lat", "lng"], required_unless_present = "lat")]
    address: Option<String>,

    /// Search radius in miles.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=5))]
    radius: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    let settings = gourmet_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let code = match run(&settings, &args).await {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => report_failure(&err),
    };

    // Returning instead of exiting lets the sentry guard flush queued events.
    Ok(code)
}

fn report_failure(err: &GourmetError) -> ExitCode {
    if let GourmetError::Unexpected(inner) = err {
        sentry_anyhow::capture_anyhow(inner);
    }
    tracing::error!(kind = err.kind(), error = %err, "search failed");
    eprintln!("{err}");
    ExitCode::FAILURE
}

async fn run(
    settings: &gourmet_core::config::Settings,
    args: &Args,
) -> Result<String, GourmetError> {
    let location = match (&args.address, args.lat, args.lng) {
        (Some(address), _, _) => {
            let geocoder = GeocodeClient::from_settings(settings)?;
            let location = geocoder.geocode(address).await?;
            tracing::info!(%address, lat = location.latitude, lng = location.longitude, "address geocoded");
            location
        }
        (None, Some(lat), Some(lng)) => Location::new(lat, lng),
        _ => {
            return Err(GourmetError::InvalidInput(
                "either --address or both --lat and --lng are required".to_string(),
            ))
        }
    };

    let radius_miles = f64::from(args.radius);
    let query = SearchQuery::new(location, radius_miles)?;

    let backend = gourmet_core::places::backend_from_settings(settings)?;
    let result = find_restaurants(backend.as_ref(), query).await?;

    Ok(render::render_results(&result, radius_miles))
}

fn init_sentry(settings: &gourmet_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn accepts_negative_coordinates() {
        let args = Args::try_parse_from(["gourmet_cli", "--lat", "37.77", "--lng", "-122.41"]).unwrap();
        assert_eq!(args.lng, Some(-122.41));
        assert_eq!(args.radius, 1);
    }

    #[test]
    fn radius_is_limited_to_slider_range() {
        assert!(Args::try_parse_from(["gourmet_cli", "--address", "x", "--radius", "6"]).is_err());
        assert!(Args::try_parse_from(["gourmet_cli", "--address", "x", "--radius", "0"]).is_err());
        assert!(Args::try_parse_from(["gourmet_cli", "--address", "x", "--radius", "5"]).is_ok());
    }

    #[test]
    fn address_conflicts_with_coordinates() {
        assert!(
            Args::try_parse_from(["gourmet_cli", "--address", "x", "--lat", "1", "--lng", "2"])
                .is_err()
        );
        assert!(Args::try_parse_from(["gourmet_cli"]).is_err());
    }

    #[test]
    fn unexpected_failures_are_reported_to_sentry() {
        let events = sentry::test::with_captured_events(|| {
            report_failure(&anyhow::anyhow!("connection reset by peer").into());
        });
        assert_eq!(events.len(), 1);

        let events = sentry::test::with_captured_events(|| {
            report_failure(&GourmetError::InvalidInput("Address is required".to_string()));
        });
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn runs_against_fallback_without_credential() {
        let mut settings = gourmet_core::config::Settings::default();
        settings.fallback_delay = std::time::Duration::from_millis(1);
        let args = Args::try_parse_from(["gourmet_cli", "--lat", "10", "--lng", "20"]).unwrap();

        let output = run(&settings, &args).await.unwrap();
        assert!(output.contains("Demo Mode"));
        assert!(output.contains("The Golden Spoon"));
    }

    #[tokio::test]
    async fn address_without_credential_fails() {
        let settings = gourmet_core::config::Settings::default();
        let args = Args::try_parse_from(["gourmet_cli", "--address", "Paris"]).unwrap();

        let err = run(&settings, &args).await.unwrap_err();
        assert_eq!(err.to_string(), "Server configuration error: Missing API Key");
    }
}
