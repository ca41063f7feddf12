use chrono::{Local, TimeDelta};
use chrono_tz::Europe::Amsterdam;
use easyenergy::{EasyEnergy, VatOption};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = EasyEnergy::new().expect("Creating the client failed.");
    let today = Local::now().date_naive();
    let tomorrow = today + TimeDelta::days(1);

    let energy = client
        .energy_prices(today, today, Some(VatOption::Include))
        .await
        .expect("Querying electricity prices failed.");
    let usage = energy.usage();
    let feed_in = energy.feed_in();

    println!("--- ENERGY TODAY ---");
    if let (Ok(lowest), Ok(highest), Ok(average)) =
        (usage.lowest(), usage.highest(), usage.average_price())
    {
        println!(
            "Lowest usage price: {:.5} €/kWh at {}",
            lowest.price,
            lowest.timestamp.with_timezone(&Amsterdam)
        );
        println!(
            "Highest usage price: {:.5} €/kWh at {}",
            highest.price,
            highest.timestamp.with_timezone(&Amsterdam)
        );
        println!("Average usage price: {average:.5} €/kWh");
    }
    if let Ok(average) = feed_in.average_price() {
        println!("Average feed-in price: {average:.5} €/kWh");
    }

    match usage.current() {
        Ok(current) => {
            println!("Current usage price: {:.5} €/kWh", current.price);
            if let Ok(percentage) = usage.percentage_of_max(current.price) {
                println!("Percentage of max: {percentage}%");
            }
            if let Ok(hours) = usage.hours_with_current_price_or_better(current.price) {
                println!("Hours at this price or cheaper: {hours}");
            }
        }
        Err(e) => println!("No current usage price: {e}"),
    }
    if let Ok(next_hour) = usage.in_hours(1) {
        println!("Next hour usage price: {:.5} €/kWh", next_hour.price);
    }

    println!();
    println!("--- GAS ---");
    let gas = client
        .gas_prices(today, tomorrow, None)
        .await
        .expect("Querying gas prices failed.");
    for point in gas.rates().points() {
        println!(
            "{}: {:.5} €/m³",
            point.timestamp.with_timezone(&Amsterdam),
            point.price
        );
    }
}
