//! Interactive catalog browser.
//!
//! Pages through the remote product catalog using the app's pagination
//! coordinator over the real Admin API client. Reads single-letter commands
//! from stdin: `n` (next page), `p` (previous page), `q` (quit).
//!
//! # Environment Variables
//!
//! - `SHOPIFY_STORE` - Store domain
//! - `SHOPIFY_ADMIN_TOKEN` - Admin API access token

use std::io::BufRead;

use thiserror::Error;

use storekeeper_app::config::{ConfigError, ShopifyAdminConfig};
use storekeeper_app::paging::{PageView, Pager, PagerError};
use storekeeper_app::shopify::AdminClient;

/// Errors that can occur while browsing.
#[derive(Debug, Error)]
pub enum BrowseError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Navigation error: {0}")]
    Pager(#[from] PagerError),

    #[error("Input error: {0}")]
    Input(#[from] std::io::Error),
}

/// Browse the catalog from the terminal.
///
/// # Errors
///
/// Returns an error if configuration is missing, the first fetch fails, or
/// stdin cannot be read. Navigation errors after the first page are printed
/// and leave the current page intact, mirroring how the embedded UI surfaces
/// them as dismissible notices.
pub async fn run(search: &str, per_page: i64) -> Result<(), BrowseError> {
    dotenvy::dotenv().ok();

    let config = ShopifyAdminConfig::from_env()?;
    let client = AdminClient::new(&config);
    let pager = Pager::new(client);

    let view = pager.load_first_page(search, per_page).await?;
    render(&view);

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let result = match line.trim() {
            "n" => pager.load_next().await,
            "p" => pager.load_previous().await,
            "q" => break,
            other => {
                print_line(&format!("unknown command {other:?} (n/p/q)"));
                continue;
            }
        };

        match result {
            Ok(Some(view)) => render(&view),
            Ok(None) => print_line("no page in that direction"),
            Err(e) => print_line(&format!("navigation failed: {e}")),
        }
    }

    Ok(())
}

fn render(view: &PageView) {
    let (first, last) = view.item_range();
    print_line(&format!(
        "-- page {} (items {first}-{last}){}{}",
        view.page_number,
        if view.has_previous_page { " <p" } else { "" },
        if view.has_next_page { " n>" } else { "" },
    ));
    for product in &view.products {
        let price = product
            .variants
            .first()
            .map_or_else(String::new, |v| format!("  ${}", v.price));
        print_line(&format!("  {}{price}", product.title));
    }
}

#[allow(clippy::print_stdout)] // terminal UI output
fn print_line(line: &str) {
    println!("{line}");
}
