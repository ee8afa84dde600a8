//! DealerDB CLI
//!
//! Command-line interface over a DealerDB data directory.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use dealerdb::{Car, CarStatus, Config, Dealership, Model, Result, Sale};
use rust_decimal::Decimal;
use tracing_subscriber::{fmt, EnvFilter};

/// DealerDB CLI
#[derive(Parser, Debug)]
#[command(name = "dealerdb")]
#[command(about = "Record store for dealership models, cars and sales")]
#[command(version)]
struct Args {
    /// Data directory
    #[arg(short, long, default_value = "./dealerdb_data")]
    data_dir: String,

    /// Number of models reported by `top`
    #[arg(short, long, default_value = "3")]
    top: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add a model to the catalog
    AddModel { id: u32, name: String, brand: String },

    /// Add a car to inventory
    AddCar {
        vin: String,
        /// Model id
        model: u32,
        price: Decimal,
        /// Date the car entered stock (YYYY-MM-DD)
        date_start: NaiveDate,
        #[arg(default_value = "available")]
        status: CarStatus,
    },

    /// Record a sale and mark the car sold
    Sell {
        sales_number: String,
        vin: String,
        cost: Decimal,
        /// Sale date (YYYY-MM-DD)
        date: NaiveDate,
    },

    /// List cars in a status, sorted by VIN
    Cars {
        #[arg(default_value = "available")]
        status: CarStatus,
    },

    /// Show a car with its model and sale
    Info { vin: String },

    /// Change a car's VIN
    UpdateVin { vin: String, new_vin: String },

    /// Soft-delete a sale and make the car available again
    Revert { sales_number: String },

    /// Best-selling models
    Top,

    /// Seed a sample catalog and run every operation once
    Demo,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,dealerdb=debug"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    tracing::info!("DealerDB v{}", dealerdb::VERSION);
    tracing::info!("Data directory: {}", args.data_dir);

    let config = Config::builder()
        .data_dir(&args.data_dir)
        .top_models_limit(args.top)
        .build();

    let mut dealership = match Dealership::open(config) {
        Ok(d) => d,
        Err(e) => {
            tracing::error!("Failed to open store: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&mut dealership, args.command) {
        tracing::error!("Command failed: {}", e);
        std::process::exit(1);
    }
}

fn run(dealership: &mut Dealership, command: Commands) -> Result<()> {
    match command {
        Commands::AddModel { id, name, brand } => {
            let model = dealership.add_model(&Model::new(id, name, brand))?;
            println!("{:?}", model);
        }
        Commands::AddCar {
            vin,
            model,
            price,
            date_start,
            status,
        } => {
            let car = dealership.add_car(&Car {
                vin,
                model,
                price,
                date_start,
                status,
            })?;
            println!("{:?}", car);
        }
        Commands::Sell {
            sales_number,
            vin,
            cost,
            date,
        } => {
            let car = dealership.sell_car(&Sale {
                sales_number,
                car_vin: vin,
                cost,
                sales_date: date,
                is_deleted: false,
            })?;
            println!("{:?}", car);
        }
        Commands::Cars { status } => {
            let cars = dealership.get_cars(status)?;
            if cars.is_empty() {
                println!("no cars are {}", status);
            }
            for car in cars {
                println!("{:?}", car);
            }
        }
        Commands::Info { vin } => println!("{:?}", dealership.get_car_info(&vin)?),
        Commands::UpdateVin { vin, new_vin } => {
            println!("{:?}", dealership.update_vin(&vin, &new_vin)?)
        }
        Commands::Revert { sales_number } => {
            println!("{:?}", dealership.revert_sale(&sales_number)?)
        }
        Commands::Top => print_top(dealership)?,
        Commands::Demo => demo(dealership)?,
    }

    Ok(())
}

fn print_top(dealership: &Dealership) -> Result<()> {
    for (rank, stats) in dealership.top_models_by_sales()?.iter().enumerate() {
        println!(
            "{}. {} {}: {} sold, {} total",
            rank + 1,
            stats.brand,
            stats.car_model_name,
            stats.sales_number,
            stats.total_price
        );
    }
    Ok(())
}

// =============================================================================
// Demo Scenario
// =============================================================================

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn demo(dealership: &mut Dealership) -> Result<()> {
    let models = [
        (1, "Optima", "Kia"),
        (2, "Sorento", "Kia"),
        (3, "3", "Mazda"),
        (4, "Pathfinder", "Nissan"),
        (5, "Logan", "Renault"),
    ];
    for (id, name, brand) in models {
        dealership.add_model(&Model::new(id, name, brand))?;
    }

    let cars = [
        ("KNAGM4A77D5316538", 1, Decimal::new(2000, 0), date(2024, 2, 8), CarStatus::Available),
        ("5XYPH4A10GG021831", 2, Decimal::new(2300, 0), date(2024, 2, 20), CarStatus::Reserve),
        ("KNAGH4A48A5414970", 1, Decimal::new(2100, 0), date(2024, 4, 4), CarStatus::Available),
        ("JM1BL1TFXD1734246", 3, Decimal::new(227665, 2), date(2024, 5, 17), CarStatus::Available),
        ("JM1BL1M58C1614725", 3, Decimal::new(254910, 2), date(2024, 5, 17), CarStatus::Reserve),
        ("KNAGR4A63D5359556", 1, Decimal::new(2376, 0), date(2024, 5, 17), CarStatus::Available),
        ("5N1CR2MN9EC641864", 4, Decimal::new(3100, 0), date(2024, 6, 1), CarStatus::Available),
        ("JM1BL1L83C1660152", 3, Decimal::new(263517, 2), date(2024, 6, 1), CarStatus::Available),
        ("5N1CR2TS0HW037674", 4, Decimal::new(3100, 0), date(2024, 6, 1), CarStatus::Available),
        ("5N1AR2MM4DC605884", 4, Decimal::new(3200, 0), date(2024, 7, 15), CarStatus::Available),
        ("VF1LZL2T4BC242298", 5, Decimal::new(228076, 2), date(2024, 8, 31), CarStatus::Delivery),
    ];
    for (vin, model, price, date_start, status) in cars {
        dealership.add_car(&Car {
            vin: vin.to_string(),
            model,
            price,
            date_start,
            status,
        })?;
    }

    let sales = [
        ("KNAGM4A77D5316538", Decimal::new(199909, 2), date(2024, 9, 3)),
        ("KNAGH4A48A5414970", Decimal::new(2100, 0), date(2024, 9, 4)),
        ("KNAGR4A63D5359556", Decimal::new(7623, 0), date(2024, 9, 5)),
        ("JM1BL1M58C1614725", Decimal::new(2334, 0), date(2024, 9, 6)),
        ("JM1BL1L83C1660152", Decimal::new(451, 0), date(2024, 9, 7)),
        ("5N1CR2TS0HW037674", Decimal::new(9876, 0), date(2024, 9, 8)),
        ("5XYPH4A10GG021831", Decimal::new(1234, 0), date(2024, 9, 9)),
    ];
    for (vin, cost, sales_date) in sales {
        dealership.sell_car(&Sale {
            sales_number: format!("20240903#{}", vin),
            car_vin: vin.to_string(),
            cost,
            sales_date,
            is_deleted: false,
        })?;
    }

    println!("available:");
    for car in dealership.get_cars(CarStatus::Available)? {
        println!("  {:?}", car);
    }

    println!("{:?}", dealership.get_car_info("KNAGM4A77D5316538")?);
    println!("{:?}", dealership.update_vin("KNAGM4A77D5316538", "UPDGM4A77D5316538")?);
    println!("{:?}", dealership.revert_sale("20240903#KNAGM4A77D5316538")?);

    print_top(dealership)
}
