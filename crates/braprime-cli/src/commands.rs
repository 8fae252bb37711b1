use std::sync::Arc;
use std::time::Duration;

use braprime_core::{AppConfig, Coordinates, DeliveryQuote, FallbackPolicy, Location, Place};
use braprime_location::{
    LocationService, PlaceSearch, ReverseGeocode, SearchDebouncer, SearchResults, SelectionState,
};
use rust_decimal::Decimal;
use tokio::io::{AsyncBufReadExt, BufReader};

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    } else {
        text.to_owned()
    }
}

fn print_places(places: &[Place]) {
    println!("{:<4}{:<32}{:<22}ADDRESS", "#", "NAME", "COORDINATES");
    for (index, place) in places.iter().enumerate() {
        println!(
            "{:<4}{:<32}{:<22}{}",
            index,
            truncate(&place.name, 30),
            place.coordinates().to_string(),
            truncate(&place.address, 50)
        );
    }
}

fn print_location(location: &Location) {
    println!("address:      {}", location.address);
    println!("neighborhood: {}", location.neighborhood);
    println!("coordinates:  {}", location.coordinates());
    if let Some(landmark) = &location.landmark {
        println!("landmark:     {landmark}");
    }
}

fn print_quote(quote: &DeliveryQuote, max_distance_km: f64) {
    println!("distance:     {:.2} km", quote.distance_km);
    println!("fee:          {} GNF", quote.fee);
    println!("eta:          {}", quote.eta);
    if quote.available {
        println!("available:    yes");
    } else {
        println!("available:    no (beyond {max_distance_km} km)");
    }
}

/// Run a one-shot place search and print the results.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be constructed.
pub(crate) async fn run_search(
    config: &AppConfig,
    query: &str,
    bias: Option<Coordinates>,
) -> anyhow::Result<()> {
    let service = LocationService::from_config(config)?;
    let places = service.search_places(query, bias).await;

    if places.is_empty() {
        println!("no places found for \"{}\"", query.trim());
        return Ok(());
    }
    print_places(&places);
    Ok(())
}

fn print_results(results: &SearchResults) {
    if results.query.is_empty() {
        println!("(cleared)");
    } else if results.places.is_empty() {
        println!("no places found for \"{}\"", results.query);
    } else {
        println!("results for \"{}\":", results.query);
        print_places(&results.places);
    }
}

/// Feed stdin lines to a [`SearchDebouncer`] as if typed into a search box.
///
/// Each line replaces the search text. Results are printed whenever the
/// debouncer publishes. At end of input the last pending search is given
/// time to land before the debouncer is closed.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be constructed or stdin cannot
/// be read.
pub(crate) async fn run_typeahead(
    config: &AppConfig,
    bias: Option<Coordinates>,
) -> anyhow::Result<()> {
    let service = Arc::new(LocationService::from_config(config)?);
    let mut debouncer = SearchDebouncer::from_config(service, config).with_bias(bias);
    let mut results = debouncer.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last_query = String::new();

    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(text) => {
                    last_query = text.trim().to_owned();
                    debouncer.on_query_changed(&text);
                }
                None => break,
            },
            changed = results.changed() => {
                if changed.is_err() {
                    break;
                }
                print_results(&results.borrow_and_update());
            }
        }
    }

    if !last_query.is_empty() && results.borrow().query != last_query {
        let grace = Duration::from_millis(config.search_debounce_ms)
            + Duration::from_secs(config.request_timeout_secs);
        if let Ok(Ok(())) = tokio::time::timeout(grace, results.changed()).await {
            print_results(&results.borrow_and_update());
        }
    }
    debouncer.close();
    Ok(())
}

/// Reverse-geocode a point and print the resulting delivery address.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be constructed.
pub(crate) async fn run_reverse(config: &AppConfig, point: Coordinates) -> anyhow::Result<()> {
    let service = LocationService::from_config(config)?;
    let location = service.reverse_geocode(point).await;
    print_location(&location);
    Ok(())
}

/// Print a delivery quote for a customer point. Makes no network calls.
pub(crate) fn run_estimate(
    merchant: Coordinates,
    customer: Coordinates,
    base_fee: Decimal,
    max_distance_km: f64,
) {
    let location = FallbackPolicy::default().placeholder_location(customer);
    if let Some(quote) =
        braprime_core::delivery_quote(merchant, Some(&location), base_fee, max_distance_km)
    {
        print_quote(&quote, max_distance_km);
    }
}

/// Search, select the `pick`-th result, and confirm it.
///
/// Prints a quote as well when a merchant point is given.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be constructed, `pick` is out
/// of range, or the chosen place is not a confirmable location.
pub(crate) async fn run_select(
    config: &AppConfig,
    query: &str,
    pick: usize,
    landmark: Option<&str>,
    merchant: Option<Coordinates>,
    base_fee: Decimal,
) -> anyhow::Result<()> {
    let service = Arc::new(LocationService::from_config(config)?);
    let places = service.search_places(query, None).await;
    let place = places.get(pick).ok_or_else(|| {
        anyhow::anyhow!(
            "no result #{pick} for \"{}\" ({} found)",
            query.trim(),
            places.len()
        )
    })?;

    let mut selection = SelectionState::new(service);
    selection.select_place(place)?;
    if let Some(landmark) = landmark {
        selection.update_landmark(landmark);
    }
    let confirmed = selection.confirm()?;
    print_location(&confirmed);

    if let Some(merchant) = merchant {
        let max_distance_km = config.max_delivery_distance_km;
        if let Some(quote) = selection.delivery_quote(merchant, base_fee, max_distance_km) {
            print_quote(&quote, max_distance_km);
        }
    }
    Ok(())
}
