//! Seed the database with sample data for local development.

use orderdesk_core::Price;
use orderdesk_web::db::{self, ProductRepository};

use super::{CommandError, database_url};

/// Sample catalog: name, price in cents, category.
const SAMPLE_PRODUCTS: &[(&str, i64, &str)] = &[
    ("Espresso machine", 24_900, "Appliances"),
    ("Pour-over kettle", 5_900, "Appliances"),
    ("Single-origin beans 1kg", 2_400, "Coffee"),
    ("Decaf blend 500g", 1_100, "Coffee"),
    ("Ceramic mug", 1_500, "Accessories"),
    ("Travel tumbler", 2_200, "Accessories"),
];

/// Insert the sample product catalog.
///
/// Intended for empty development databases; running it twice inserts
/// duplicate rows.
///
/// # Errors
///
/// Returns an error if the database URL is missing or an insert fails.
pub async fn products() -> Result<(), CommandError> {
    dotenvy::dotenv().ok();

    let database_url = database_url()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    let repo = ProductRepository::new(&pool);
    for (name, cents, category) in SAMPLE_PRODUCTS {
        let product = repo
            .create(name, Price::from_cents(*cents), category)
            .await?;
        tracing::info!("Inserted product {} ({})", product.name, product.price);
    }

    tracing::info!("Seeded {} products", SAMPLE_PRODUCTS.len());
    Ok(())
}
