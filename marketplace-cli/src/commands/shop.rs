//! Shop command - the interactive Login, Register and Marketplace screens
//!
//! Every failure inside a screen is shown in red and the screen carries on.
//! Only terminal I/O errors end the loop.

use anyhow::Result;
use colored::Colorize;
use dialoguer::{Confirm, Input, Password, Select};
use marketplace_core::adapters::demo::{DEMO_PASSWORD, DEMO_USERNAME};
use marketplace_core::{
    Credentials, EntryPoint, Error, LogEvent, LoggingService, MarketplaceContext,
    MarketplaceSession, User,
};

use super::{get_context, get_logger, log_event};
use crate::output;

const LOGIN_MENU: [&str; 3] = ["Login", "Register", "Quit"];
const MARKETPLACE_MENU: [&str; 5] = [
    "Browse categories",
    "Search products",
    "View cart",
    "Logout",
    "Quit",
];

/// Where the marketplace screen hands control back to
enum Exit {
    Logout,
    Quit,
}

pub fn run() -> Result<()> {
    if atty::isnt(atty::Stream::Stdin) || atty::isnt(atty::Stream::Stdout) {
        anyhow::bail!(
            "The shop needs an interactive terminal. Use 'mkt products' or 'mkt search' in scripts."
        );
    }

    let ctx = get_context()?;
    let logger = get_logger(EntryPoint::Shop);
    log_event(&logger, LogEvent::new("shop_opened"));

    if ctx.config.demo_mode {
        output::info(&format!(
            "Demo mode is on. Log in as {}/{}.",
            DEMO_USERNAME, DEMO_PASSWORD
        ));
    }

    while let Some(user) = login_screen(&ctx, &logger)? {
        let mut session = ctx.session(user);
        match marketplace_screen(&ctx, &logger, &mut session)? {
            Exit::Logout => log_event(&logger, LogEvent::new("logout").with_screen("marketplace")),
            Exit::Quit => break,
        }
    }

    log_event(&logger, LogEvent::new("shop_closed"));
    Ok(())
}

/// Show the error as the screen's dialog and record it without user data
fn show_error(logger: &Option<LoggingService>, event: &str, screen: &str, err: &Error) {
    output::error(&err.to_string());
    log_event(
        logger,
        LogEvent::new(event)
            .with_screen(screen)
            .with_error(err.to_string())
            .with_error_details(format!("{:?}", err)),
    );
}

fn prompt_credentials() -> Result<Credentials> {
    let username: String = Input::new()
        .with_prompt("Username")
        .allow_empty(true)
        .interact_text()?;
    let password = Password::new()
        .with_prompt("Password")
        .allow_empty_password(true)
        .interact()?;
    Ok(Credentials::new(&username, &password))
}

// ============================================================================
// Login and Register
// ============================================================================

fn login_screen(ctx: &MarketplaceContext, logger: &Option<LoggingService>) -> Result<Option<User>> {
    log_event(logger, LogEvent::new("screen_viewed").with_screen("login"));

    loop {
        println!();
        println!("{}", "Marketplace Login".bold());

        let choice = Select::new().items(&LOGIN_MENU).default(0).interact()?;
        match choice {
            0 => {
                let credentials = prompt_credentials()?;
                match ctx.auth_service.login(&credentials) {
                    Ok(user) => {
                        log_event(logger, LogEvent::new("login_succeeded").with_screen("login"));
                        return Ok(Some(user));
                    }
                    Err(e) => show_error(logger, "login_failed", "login", &e),
                }
            }
            1 => register_screen(ctx, logger)?,
            _ => return Ok(None),
        }
    }
}

/// Registering never signs the user in; they land back on the login menu
fn register_screen(ctx: &MarketplaceContext, logger: &Option<LoggingService>) -> Result<()> {
    log_event(logger, LogEvent::new("screen_viewed").with_screen("register"));

    println!();
    println!("{}", "Register".bold());

    let credentials = prompt_credentials()?;
    match ctx.auth_service.register(&credentials) {
        Ok(_) => {
            log_event(logger, LogEvent::new("user_registered").with_screen("register"));
            output::success("Registered successfully! Please login.");
        }
        Err(e) => show_error(logger, "register_failed", "register", &e),
    }
    Ok(())
}

// ============================================================================
// Marketplace
// ============================================================================

fn marketplace_screen(
    ctx: &MarketplaceContext,
    logger: &Option<LoggingService>,
    session: &mut MarketplaceSession<'_>,
) -> Result<Exit> {
    log_event(logger, LogEvent::new("screen_viewed").with_screen("marketplace"));

    loop {
        println!();
        println!("{} {}", "Welcome,".bold(), session.user().username.bold());

        let choice = Select::new()
            .with_prompt(format!("Cart: {} item(s)", session.cart().len()))
            .items(&MARKETPLACE_MENU)
            .default(0)
            .interact()?;

        match choice {
            0 => browse_categories(ctx, logger, session)?,
            1 => search(ctx, logger, session)?,
            2 => view_cart(ctx, logger, session)?,
            3 => return Ok(Exit::Logout),
            _ => return Ok(Exit::Quit),
        }
    }
}

fn browse_categories(
    ctx: &MarketplaceContext,
    logger: &Option<LoggingService>,
    session: &mut MarketplaceSession<'_>,
) -> Result<()> {
    let categories = match session.categories() {
        Ok(c) => c,
        Err(e) => {
            show_error(logger, "categories_failed", "marketplace", &e);
            return Ok(());
        }
    };

    if categories.is_empty() {
        output::warning("No categories yet.");
        return Ok(());
    }

    let mut items = categories.clone();
    items.push("Back".to_string());

    let choice = Select::new()
        .with_prompt("Category")
        .items(&items)
        .default(0)
        .interact()?;
    let Some(category) = categories.get(choice) else {
        return Ok(());
    };

    if let Err(e) = session.show_category(category) {
        show_error(logger, "category_failed", "marketplace", &e);
        return Ok(());
    }
    log_event(logger, LogEvent::new("category_viewed").with_screen("marketplace"));

    if session.displayed().is_empty() {
        output::warning(&format!("No products in {}.", category));
        return Ok(());
    }
    pick_products(ctx, logger, session)
}

fn search(
    ctx: &MarketplaceContext,
    logger: &Option<LoggingService>,
    session: &mut MarketplaceSession<'_>,
) -> Result<()> {
    let keyword: String = Input::new()
        .with_prompt("Search")
        .allow_empty(true)
        .interact_text()?;

    match session.search(&keyword) {
        Ok(result) if result.is_empty() => {
            log_event(logger, LogEvent::new("search_empty").with_screen("marketplace"));
            output::warning(&result.empty_message());
            Ok(())
        }
        Ok(_) => {
            log_event(logger, LogEvent::new("search").with_screen("marketplace"));
            pick_products(ctx, logger, session)
        }
        Err(e) => {
            show_error(logger, "search_failed", "marketplace", &e);
            Ok(())
        }
    }
}

/// Product table plus one "add to cart" choice per row
fn pick_products(
    ctx: &MarketplaceContext,
    logger: &Option<LoggingService>,
    session: &mut MarketplaceSession<'_>,
) -> Result<()> {
    println!("{}", output::product_table(session.displayed(), &ctx.config));

    let mut items: Vec<String> = session
        .displayed()
        .iter()
        .map(|p| {
            format!(
                "Add to cart: {} ({})",
                p.name,
                ctx.config.format_price(&p.price.display())
            )
        })
        .collect();
    items.push("Back".to_string());
    let back = items.len() - 1;

    loop {
        let choice = Select::new()
            .with_prompt(format!("Cart: {} item(s)", session.cart().len()))
            .items(&items)
            .default(back)
            .interact()?;
        if choice == back {
            return Ok(());
        }

        match session.add_to_cart(choice) {
            Ok(item) => {
                log_event(logger, LogEvent::new("added_to_cart").with_screen("marketplace"));
                output::success(&format!("{} added to cart.", item.name));
            }
            Err(e) => show_error(logger, "add_to_cart_failed", "marketplace", &e),
        }
    }
}

fn view_cart(
    ctx: &MarketplaceContext,
    logger: &Option<LoggingService>,
    session: &mut MarketplaceSession<'_>,
) -> Result<()> {
    log_event(logger, LogEvent::new("screen_viewed").with_screen("cart"));

    let cart = session.cart();

    println!();
    println!("{}", "Your cart".bold());
    if cart.is_empty() {
        output::info("Your cart is empty.");
    }
    for item in cart.items() {
        println!("{} - {}", item.name, ctx.config.format_price(&item.price));
    }
    println!();
    println!(
        "{}",
        format!("Total: {}", output::format_total(cart.total(), &ctx.config)).bold()
    );

    let confirmed = Confirm::new()
        .with_prompt("Place order?")
        .default(false)
        .interact()?;
    if !confirmed {
        return Ok(());
    }

    let receipt = session.place_order();
    log_event(logger, LogEvent::new("order_placed").with_screen("cart"));
    output::success("Order placed successfully!");
    println!(
        "  {} item(s), {} at {}",
        receipt.items.len(),
        output::format_total(receipt.total, &ctx.config),
        receipt.placed_at.format("%Y-%m-%d %H:%M")
    );
    Ok(())
}
