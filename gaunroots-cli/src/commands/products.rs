use anyhow::{Context, Result};
use clap::Subcommand;
use shared::{RecordId, models::NewProduct};

use super::print_json;
use crate::context::AppContext;

#[derive(Subcommand, Debug)]
pub enum ProductsCommand {
    /// List every product on the marketplace
    List,
    /// List the logged-in seller's products
    Mine,
    /// Publish a product as the logged-in seller
    Create {
        #[arg(long, short)]
        name: String,
        #[arg(long, short)]
        price: f64,
        #[arg(long, short, default_value = "")]
        description: String,
        /// Product category, e.g. vegetables
        #[arg(long = "type", short = 't')]
        category: String,
        /// Contact phone shown to buyers
        #[arg(long)]
        phone: String,
    },
    /// Remove a product
    Delete {
        id: String,
    },
    /// Record a view of a product
    View {
        id: String,
    },
}

pub async fn run(ctx: &AppContext, command: ProductsCommand) -> Result<()> {
    match command {
        ProductsCommand::List => {
            let products = ctx
                .client
                .get_products()
                .await
                .context("failed to load products")?;
            print_json(&products)
        }
        ProductsCommand::Mine => {
            let seller = ctx.require_seller()?;
            let products = ctx
                .client
                .get_seller_products(&seller.id)
                .await
                .context("failed to load your products")?;
            print_json(&products)
        }
        ProductsCommand::Create {
            name,
            price,
            description,
            category,
            phone,
        } => {
            let seller = ctx.require_seller()?;
            let product = NewProduct {
                name,
                price,
                description,
                category,
                phone,
            };
            let created = ctx
                .client
                .create_product(&product, &seller.id, &seller.name)
                .await
                .context("failed to create product")?;
            print_json(&created)
        }
        ProductsCommand::Delete { id } => {
            let id = RecordId::from(id);
            let response = ctx
                .client
                .delete_product(&id)
                .await
                .with_context(|| format!("failed to delete product {id}"))?;
            print_json(&response)
        }
        ProductsCommand::View { id } => {
            let id = RecordId::from(id);
            ctx.client.increment_view(&id).await?;
            println!("Recorded a view of product {id}.");
            Ok(())
        }
    }
}
