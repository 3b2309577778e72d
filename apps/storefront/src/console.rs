//! # Console Front End
//!
//! A line-oriented driver for the command layer, used by the `storefront`
//! binary. Each input line parses into a [`ConsoleCommand`]; executing it
//! calls the same commands a graphical front end would and renders the
//! result as text in the configured locale.
//!
//! ```text
//! > add prod-123 3
//! Added. 3 items, $300.00
//! > checkout ./order.json
//! Order INV-20261019-000001 placed: $300.00 (pending)
//! ```

use std::fmt::Write as _;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::commands::{cart, catalog, checkout, quote};
use crate::error::{ApiError, ApiResult};
use crate::Storefront;
use signboard_core::format::{format_price, item_count_label, Locale};
use signboard_core::{CheckoutForm, Order, OrderStatus, QuoteForm};

/// Help text printed by `help`.
pub const HELP: &str = "\
Commands:
  products [category]      list products on sale
  add <id> [qty]           add a product to the cart
  qty <id> <n>             set a line's quantity (0 removes it)
  rm <id>                  remove a line
  cart                     show the cart
  clear                    empty the cart
  checkout <form.json>     place an order using a checkout form file
  quote <form.json>        submit a quote request form file
  orders <email>           list a shopper's orders
  help                     show this help
  quit                     exit";

/// One parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Products { category: Option<String> },
    Add { id: String, quantity: Option<i64> },
    Quantity { id: String, quantity: i64 },
    Remove { id: String },
    Cart,
    Clear,
    Checkout { form: PathBuf },
    Quote { form: PathBuf },
    Orders { email: String },
    Help,
    Quit,
}

impl ConsoleCommand {
    /// Parses a line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match (verb, args.as_slice()) {
            ("products", []) => ConsoleCommand::Products { category: None },
            ("products", [category]) => ConsoleCommand::Products {
                category: Some(category.to_string()),
            },
            ("add", [id]) => ConsoleCommand::Add {
                id: id.to_string(),
                quantity: None,
            },
            ("add", [id, qty]) => ConsoleCommand::Add {
                id: id.to_string(),
                quantity: Some(parse_int(qty)?),
            },
            ("qty", [id, qty]) => ConsoleCommand::Quantity {
                id: id.to_string(),
                quantity: parse_int(qty)?,
            },
            ("rm", [id]) => ConsoleCommand::Remove { id: id.to_string() },
            ("cart", []) => ConsoleCommand::Cart,
            ("clear", []) => ConsoleCommand::Clear,
            ("checkout", [path]) => ConsoleCommand::Checkout {
                form: PathBuf::from(path),
            },
            ("quote", [path]) => ConsoleCommand::Quote {
                form: PathBuf::from(path),
            },
            ("orders", [email]) => ConsoleCommand::Orders {
                email: email.to_string(),
            },
            ("help", []) => ConsoleCommand::Help,
            ("quit" | "exit", []) => ConsoleCommand::Quit,
            _ => return Err(format!("unrecognized command: {} (try `help`)", line.trim())),
        };

        Ok(Some(command))
    }
}

fn parse_int(raw: &str) -> Result<i64, String> {
    raw.parse()
        .map_err(|_| format!("expected a whole number, got `{raw}`"))
}

/// Runs one command and renders its result.
///
/// `Quit` renders nothing; the caller decides when to stop reading.
pub async fn execute(app: &Storefront, command: ConsoleCommand) -> ApiResult<String> {
    debug!(?command, "Console command");
    let locale = app.config.locale;

    let output = match command {
        ConsoleCommand::Products { category } => {
            let products =
                catalog::list_products(&app.db, category.as_deref(), None).await?;
            if products.is_empty() {
                "No products.".to_string()
            } else {
                let mut out = String::new();
                for p in products {
                    let unit = p.unit.map(|u| format!(" / {u}")).unwrap_or_default();
                    let _ = writeln!(
                        out,
                        "{}  {}  {}{}",
                        p.id,
                        p.name,
                        format_price(p.price, locale),
                        unit
                    );
                }
                out.trim_end().to_string()
            }
        }
        ConsoleCommand::Add { id, quantity } => {
            let response = catalog::add_product_to_cart(&app.db, &app.cart, &id, quantity).await?;
            format!(
                "Added. {}, {}",
                item_count_label(response.item_count, locale),
                format_price(response.total, locale)
            )
        }
        ConsoleCommand::Quantity { id, quantity } => {
            render_cart(&cart::update_cart_item(&app.cart, &id, quantity), locale)
        }
        ConsoleCommand::Remove { id } => render_cart(&cart::remove_from_cart(&app.cart, &id), locale),
        ConsoleCommand::Cart => render_cart(&cart::get_cart(&app.cart), locale),
        ConsoleCommand::Clear => render_cart(&cart::clear_cart(&app.cart), locale),
        ConsoleCommand::Checkout { form } => {
            let form: CheckoutForm = read_form(&form).await?;
            let order = checkout::checkout(&app.db, &app.cart, form).await?;
            render_order(&order, locale)
        }
        ConsoleCommand::Quote { form } => {
            let form: QuoteForm = read_form(&form).await?;
            let request = quote::submit_quote(&app.db, form).await?;
            format!("Quote request {} received.", request.id)
        }
        ConsoleCommand::Orders { email } => {
            let orders = checkout::list_orders(&app.db, &email).await?;
            if orders.is_empty() {
                "No orders.".to_string()
            } else {
                orders
                    .iter()
                    .map(|o| render_order(o, locale))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
        ConsoleCommand::Help => HELP.to_string(),
        ConsoleCommand::Quit => String::new(),
    };

    Ok(output)
}

async fn read_form<T: DeserializeOwned>(path: &PathBuf) -> ApiResult<T> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ApiError::validation(format!("cannot read {}: {}", path.display(), e)))?;
    serde_json::from_str(&raw)
        .map_err(|e| ApiError::validation(format!("invalid form in {}: {}", path.display(), e)))
}

/// Renders the cart sidebar as text.
pub fn render_cart(response: &cart::CartResponse, locale: Locale) -> String {
    if response.items.is_empty() {
        return "Cart is empty.".to_string();
    }

    let mut out = String::new();
    for item in &response.items {
        let unit = item
            .unit
            .as_deref()
            .map(|u| format!(" ({u})"))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{} x {}{}  {}",
            item.quantity,
            item.name,
            unit,
            format_price(item.line_total(), locale)
        );
    }
    let _ = write!(
        out,
        "Total: {} ({})",
        format_price(response.total, locale),
        item_count_label(response.item_count, locale)
    );
    out
}

fn render_order(order: &Order, locale: Locale) -> String {
    let status = match order.status {
        OrderStatus::Pending => "pending",
        OrderStatus::Confirmed => "confirmed",
        OrderStatus::Shipped => "shipped",
        OrderStatus::Delivered => "delivered",
        OrderStatus::Cancelled => "cancelled",
    };
    format!(
        "Order {} placed: {} ({})",
        order.invoice_number,
        format_price(order.total, locale),
        status
    )
}
