//! Seed the catalog from a YAML file.
//!
//! ```yaml
//! products:
//!   - name: Silk Saree
//!     category: Ethnic
//!     sizes: [S, M, L]
//!     price: 49.99
//!     image: https://cdn.example.com/saree.jpg
//!     description: Hand-woven, dry clean only
//! ```
//!
//! `sizes`, `availability` (default `true`) and `description` are optional.
//! The file is validated in full before anything is inserted.

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{error, info};

use rentmyfit_api::db::ProductRepository;
use rentmyfit_api::models::NewProduct;

use super::connect;

#[derive(Debug, Deserialize)]
struct SeedFile {
    products: Vec<SeedProduct>,
}

#[derive(Debug, Deserialize)]
struct SeedProduct {
    name: String,
    category: String,
    #[serde(default)]
    sizes: Vec<String>,
    price: Decimal,
    image: String,
    #[serde(default = "default_availability")]
    availability: bool,
    #[serde(default)]
    description: String,
}

const fn default_availability() -> bool {
    true
}

impl SeedProduct {
    fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        for (field, value) in [
            ("name", &self.name),
            ("category", &self.category),
            ("image", &self.image),
        ] {
            if value.trim().is_empty() {
                problems.push(format!("{field} is empty"));
            }
        }
        if self.price.is_sign_negative() {
            problems.push("price is negative".to_owned());
        }
        problems
    }

    fn into_new(self) -> NewProduct {
        NewProduct {
            name: self.name.trim().to_owned(),
            category: self.category.trim().to_owned(),
            sizes: self.sizes,
            price: self.price,
            image: self.image.trim().to_owned(),
            availability: self.availability,
            description: self.description,
        }
    }
}

/// Parse and validate a seed file, returning every problem found.
fn parse(content: &str) -> Result<Vec<NewProduct>, Box<dyn std::error::Error>> {
    let file: SeedFile = serde_yaml::from_str(content)?;

    let errors: Vec<String> = file
        .products
        .iter()
        .enumerate()
        .flat_map(|(i, product)| {
            product
                .validate()
                .into_iter()
                .map(move |problem| format!("products[{i}]: {problem}"))
        })
        .collect();

    if !errors.is_empty() {
        error!("Seed file validation failed:");
        for err in &errors {
            error!("  - {err}");
        }
        return Err(format!("{} validation errors found", errors.len()).into());
    }

    Ok(file.products.into_iter().map(SeedProduct::into_new).collect())
}

/// Insert the products listed in `file_path`.
///
/// # Errors
///
/// Returns an error if the file is missing or invalid, or an insert fails.
pub async fn products(file_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {file_path}").into());
    }

    info!(path = %file_path, "Loading products from file");
    let content = tokio::fs::read_to_string(path).await?;
    let products = parse(&content)?;
    info!(count = products.len(), "Seed file validated");

    let pool = connect().await?;
    let repo = ProductRepository::new(&pool);

    for product in &products {
        let created = repo.create(product).await?;
        info!(product_id = %created.id, name = %created.name, "Inserted product");
    }

    info!("Seeding complete! {} products inserted", products.len());
    Ok(())
}
