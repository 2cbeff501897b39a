//! Integration tests for marketplace-core
//!
//! These run against real DuckDB files in temporary directories.

use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;
use tempfile::TempDir;

use marketplace_core::adapters::duckdb::DuckDbStore;
use marketplace_core::config::Config;
use marketplace_core::ports::DocumentStore;
use marketplace_core::services::{
    AuthService, CatalogService, DemoService, DoctorService, ImportService, StatusService,
};
use marketplace_core::{Credentials, Error, MarketplaceContext, Price, Product, User};

fn create_test_store(temp_dir: &TempDir) -> Arc<DuckDbStore> {
    let db_path = temp_dir.path().join("test.duckdb");
    let store = DuckDbStore::new(&db_path).unwrap();
    store.ensure_schema().unwrap();
    Arc::new(store)
}

fn seed_catalog(store: &DuckDbStore) {
    let products = [
        Product::new("iPhone 15", Price::Number(Decimal::from(79999)), Some("Phones".into())),
        Product::new("Pixel 8", Price::Text("₹59,999".into()), Some("Phones".into())),
        Product::new("Desk Lamp", Price::Number(Decimal::from_str("499.5").unwrap()), Some("Home".into())),
        Product::new("Mystery Box", Price::Text("Price on request".into()), Some("Home".into())),
        Product::new("Loose Cable", Price::Missing, None),
    ];
    for product in &products {
        store.insert_product(product).unwrap();
    }
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// ============================================================================
// Auth
// ============================================================================

#[test]
fn test_register_then_login() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    let auth = AuthService::new(store.clone());

    let registered = auth.register(&Credentials::new("alice", "s3cret")).unwrap();
    assert_eq!(registered.username, "alice");
    assert_eq!(registered.password, "s3cret");

    // The stored document carries the password as typed
    let stored = store.find_user("alice", "s3cret").unwrap().unwrap();
    assert_eq!(stored.id, registered.id);

    let user = auth.login(&Credentials::new("alice", "s3cret")).unwrap();
    assert_eq!(user.id, registered.id);
    assert_eq!(store.count_users().unwrap(), 1);
}

#[test]
fn test_login_rejects_wrong_password_and_unknown_user() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    let auth = AuthService::new(store);

    auth.register(&Credentials::new("alice", "s3cret")).unwrap();

    let wrong = auth.login(&Credentials::new("alice", "nope")).unwrap_err();
    assert!(matches!(wrong, Error::InvalidCredentials));
    assert_eq!(wrong.to_string(), "Invalid credentials!");

    let unknown = auth.login(&Credentials::new("bob", "s3cret")).unwrap_err();
    assert!(matches!(unknown, Error::InvalidCredentials));
}

#[test]
fn test_login_is_case_sensitive() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    let auth = AuthService::new(store);

    auth.register(&Credentials::new("alice", "s3cret")).unwrap();

    assert!(auth.login(&Credentials::new("Alice", "s3cret")).is_err());
    assert!(auth.login(&Credentials::new("alice", "S3CRET")).is_err());
}

#[test]
fn test_register_rejects_duplicate_username() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    let auth = AuthService::new(store.clone());

    auth.register(&Credentials::new("alice", "one")).unwrap();
    let err = auth.register(&Credentials::new("alice", "two")).unwrap_err();

    assert!(matches!(err, Error::Conflict(_)));
    assert_eq!(err.to_string(), "Username already exists.");
    assert_eq!(store.count_users().unwrap(), 1);
}

#[test]
fn test_register_rejects_empty_fields() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    let auth = AuthService::new(store.clone());

    for (username, password) in [("", "pw"), ("   ", "pw"), ("alice", "")] {
        let err = auth.register(&Credentials::new(username, password)).unwrap_err();
        assert_eq!(err.to_string(), "Fields cannot be empty.");
    }
    assert_eq!(store.count_users().unwrap(), 0);
}

#[test]
fn test_inserted_user_document_can_login() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    store.insert_user(&User::new("existing", "plain-pw")).unwrap();

    let auth = AuthService::new(store);
    let user = auth.login(&Credentials::new("existing", "plain-pw")).unwrap();
    assert_eq!(user.username, "existing");

    assert!(auth.login(&Credentials::new("existing", "other")).is_err());
}

#[test]
fn test_login_only_accepts_the_stored_value_itself() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    let stored = "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2hoYXNo";
    store.insert_user(&User::new("alice", stored)).unwrap();

    let auth = AuthService::new(store);
    // No hash verification: a value that looks like a hash is just a password
    assert!(auth.login(&Credentials::new("alice", "saltsalt")).is_err());
    assert!(auth.login(&Credentials::new("alice", "")).is_err());
    assert!(auth.login(&Credentials::new("alice", stored)).is_ok());
}

#[test]
fn test_login_with_duplicate_usernames_matches_either_document() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    store.insert_user(&User::new("alice", "one")).unwrap();
    store.insert_user(&User::new("alice", "two")).unwrap();

    let auth = AuthService::new(store);
    assert_eq!(auth.login(&Credentials::new("alice", "one")).unwrap().password, "one");
    assert_eq!(auth.login(&Credentials::new("alice", "two")).unwrap().password, "two");
    assert!(auth.login(&Credentials::new("alice", "three")).is_err());
}

// ============================================================================
// Catalog
// ============================================================================

#[test]
fn test_categories_are_distinct_and_sorted() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    seed_catalog(&store);

    let catalog = CatalogService::new(store);
    assert_eq!(catalog.categories().unwrap(), vec!["Home", "Phones"]);
}

#[test]
fn test_products_in_category_keep_insertion_order() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    seed_catalog(&store);

    let catalog = CatalogService::new(store);
    let phones = catalog.products_in_category("Phones").unwrap();
    let names: Vec<_> = phones.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["iPhone 15", "Pixel 8"]);

    // Category match is exact
    assert!(catalog.products_in_category("phones").unwrap().is_empty());
    assert!(catalog.products_in_category("Garden").unwrap().is_empty());
}

#[test]
fn test_prices_survive_storage() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    seed_catalog(&store);

    let displayed: Vec<String> = store
        .list_products()
        .unwrap()
        .iter()
        .map(|p| p.price.display())
        .collect();
    assert_eq!(
        displayed,
        vec!["79999.00", "₹59,999", "499.50", "Price on request", "0.00"]
    );
}

#[test]
fn test_search_is_case_insensitive_substring() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    seed_catalog(&store);

    let catalog = CatalogService::new(store);
    let result = catalog.search("PIX").unwrap();
    assert_eq!(result.products.len(), 1);
    assert_eq!(result.products[0].name, "Pixel 8");

    // Uncategorized products are still found by search
    let cable = catalog.search("cable").unwrap();
    assert_eq!(cable.products.len(), 1);
}

#[test]
fn test_search_with_no_match() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    seed_catalog(&store);

    let catalog = CatalogService::new(store);
    let result = catalog.search("tablet").unwrap();
    assert!(result.is_empty());
    assert_eq!(result.empty_message(), "No products found for: tablet");
}

#[test]
fn test_search_treats_metacharacters_literally() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    seed_catalog(&store);

    let catalog = CatalogService::new(store);
    assert!(catalog.search(".*").unwrap().is_empty());
    assert!(catalog.search("%").unwrap().is_empty());
}

#[test]
fn test_search_rejects_empty_keyword() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    let catalog = CatalogService::new(store);

    for keyword in ["", "   "] {
        let err = catalog.search(keyword).unwrap_err();
        assert_eq!(err.to_string(), "Please enter a product name to search.");
    }
}

#[test]
fn test_add_product() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    let catalog = CatalogService::new(store.clone());

    let product = catalog
        .add_product("Kettle", Price::parse_input("1299"), Some("Kitchen"))
        .unwrap();
    assert_eq!(product.price.display(), "1299.00");

    assert_eq!(store.count_products().unwrap(), 1);
    assert_eq!(catalog.categories().unwrap(), vec!["Kitchen"]);
}

// ============================================================================
// Session and cart
// ============================================================================

#[test]
fn test_session_cart_total_skips_unparseable_prices() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    seed_catalog(&store);

    let context = MarketplaceContext::with_store(Config::default(), temp_dir.path(), store);
    let user = User::new("alice", "irrelevant");
    let mut session = context.session(user);

    session.show_category("Phones").unwrap();
    session.add_to_cart(0).unwrap();
    session.add_to_cart(1).unwrap();

    session.show_category("Home").unwrap();
    let item = session.add_to_cart(1).unwrap();
    assert_eq!(item.name, "Mystery Box");

    assert_eq!(session.cart().len(), 3);
    // 79999.00 + 59999 + nothing
    assert_eq!(session.cart().total(), decimal("139998.00"));
}

#[test]
fn test_session_add_to_cart_out_of_range() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    seed_catalog(&store);

    let context = MarketplaceContext::with_store(Config::default(), temp_dir.path(), store);
    let mut session = context.session(User::new("alice", "pw"));

    // Nothing displayed yet
    let err = session.add_to_cart(0).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    session.show_category("Phones").unwrap();
    assert!(session.add_to_cart(2).is_err());
    assert!(session.cart().is_empty());
}

#[test]
fn test_session_empty_search_keeps_displayed_products() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    seed_catalog(&store);

    let context = MarketplaceContext::with_store(Config::default(), temp_dir.path(), store);
    let mut session = context.session(User::new("alice", "pw"));

    session.show_category("Home").unwrap();
    assert!(session.search("").is_err());
    assert_eq!(session.displayed().len(), 2);

    session.search("lamp").unwrap();
    assert_eq!(session.displayed().len(), 1);
}

#[test]
fn test_place_order_clears_cart() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    seed_catalog(&store);

    let context = MarketplaceContext::with_store(Config::default(), temp_dir.path(), store);
    let mut session = context.session(User::new("alice", "pw"));

    session.search("lamp").unwrap();
    session.add_to_cart(0).unwrap();
    session.add_to_cart(0).unwrap();

    let receipt = session.place_order();
    assert_eq!(receipt.items.len(), 2);
    assert_eq!(receipt.total, decimal("999.00"));
    assert!(session.cart().is_empty());

    // Checking out again still succeeds, with nothing in it
    let empty = session.place_order();
    assert!(empty.items.is_empty());
    assert_eq!(empty.total, Decimal::ZERO);
}

// ============================================================================
// Import
// ============================================================================

#[test]
fn test_import_json_file() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    let import = ImportService::new(store.clone());

    let path = temp_dir.path().join("products.json");
    std::fs::write(
        &path,
        r#"[
            {"name": "Backpack", "price": 1499, "category": "Bags"},
            {"name": "Tote", "price": "₹299", "category": "Bags"},
            {"price": 10}
        ]"#,
    )
    .unwrap();

    let result = import.import_file(&path).unwrap();
    assert_eq!(result.imported, 2);
    assert_eq!(result.skipped, 1);
    assert_eq!(store.count_products().unwrap(), 2);

    let bags = store.products_by_category("Bags").unwrap();
    assert_eq!(bags[0].price, Price::Number(Decimal::from(1499)));
    assert_eq!(bags[1].price, Price::Text("₹299".to_string()));
}

#[test]
fn test_import_csv_file() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    let import = ImportService::new(store.clone());

    let path = temp_dir.path().join("products.csv");
    std::fs::write(
        &path,
        "Name,Price,Category\nNotebook,45.5,Stationery\nPen,,Stationery\n,10,Stationery\n",
    )
    .unwrap();

    let result = import.import_file(&path).unwrap();
    assert_eq!(result.imported, 2);
    assert_eq!(result.skipped, 1);

    let products = store.products_by_category("Stationery").unwrap();
    assert_eq!(products[0].price.display(), "45.50");
    assert_eq!(products[1].price, Price::Missing);
}

#[test]
fn test_import_unsupported_extension() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    let import = ImportService::new(store.clone());

    let path = temp_dir.path().join("products.xml");
    std::fs::write(&path, "<products/>").unwrap();

    assert!(import.import_file(&path).is_err());
    assert_eq!(store.count_products().unwrap(), 0);
}

// ============================================================================
// Status and doctor
// ============================================================================

#[test]
fn test_status_counts() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    seed_catalog(&store);
    store.insert_user(&User::new("alice", "pw")).unwrap();

    let status = StatusService::new(store).get_status().unwrap();
    assert_eq!(status.total_users, 1);
    assert_eq!(status.total_products, 5);
    assert_eq!(status.total_categories, 2);
    assert_eq!(status.categories, vec!["Home", "Phones"]);
    assert!(status.db_size_bytes > 0);
}

#[test]
fn test_doctor_clean_database_passes() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    store
        .insert_product(&Product::new("Lamp", Price::Number(Decimal::from(10)), Some("Home".into())))
        .unwrap();

    let result = DoctorService::new(store).run_checks().unwrap();
    assert!(result.passed);
    assert_eq!(result.errors, 0);
    assert_eq!(result.warnings, 0);
}

#[test]
fn test_doctor_reports_problems() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    seed_catalog(&store);
    // Bypass registration to create a duplicate
    store.insert_user(&User::new("alice", "one")).unwrap();
    store.insert_user(&User::new("alice", "two")).unwrap();

    let result = DoctorService::new(store).run_checks().unwrap();
    assert!(!result.passed);
    assert_eq!(result.errors, 1);
    assert_eq!(result.warnings, 2);

    assert_eq!(result.checks["duplicate_usernames"].status, "error");
    assert_eq!(result.checks["uncategorized_products"].status, "warning");
    assert_eq!(result.checks["unparseable_prices"].status, "warning");
}

#[test]
fn test_unparseable_prices_exclude_missing_and_currency_text() {
    let temp_dir = TempDir::new().unwrap();
    let store = create_test_store(&temp_dir);
    seed_catalog(&store);

    let unparseable = store.products_with_unparseable_price().unwrap();
    let names: Vec<_> = unparseable.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Mystery Box"]);
}

// ============================================================================
// Context and demo mode
// ============================================================================

#[test]
fn test_context_persists_across_reopen() {
    let temp_dir = TempDir::new().unwrap();

    {
        let context = MarketplaceContext::new(temp_dir.path()).unwrap();
        context
            .auth_service
            .register(&Credentials::new("alice", "pw"))
            .unwrap();
        context
            .catalog_service
            .add_product("Lamp", Price::Number(Decimal::from(10)), Some("Home"))
            .unwrap();
    }

    let context = MarketplaceContext::new(temp_dir.path()).unwrap();
    assert!(context.auth_service.login(&Credentials::new("alice", "pw")).is_ok());
    assert_eq!(context.catalog_service.all_products().unwrap().len(), 1);
}

#[test]
fn test_seed_demo_data_into_context() {
    let temp_dir = TempDir::new().unwrap();
    let context = MarketplaceContext::new(temp_dir.path()).unwrap();

    let seeded = context.seed_demo_data().unwrap();
    assert!(seeded.user_created);
    assert!(seeded.products > 0);

    let user = context.auth_service.login(&Credentials::new("demo", "demo")).unwrap();
    assert_eq!(user.username, "demo");

    // Seeding again adds neither a second account nor duplicate products
    let products_before = context.store.count_products().unwrap();
    let again = context.seed_demo_data().unwrap();
    assert!(!again.user_created);
    assert_eq!(again.products, 0);
    assert_eq!(context.store.count_users().unwrap(), 1);
    assert_eq!(context.store.count_products().unwrap(), products_before);
}

#[test]
fn test_demo_mode_uses_separate_database() {
    let temp_dir = TempDir::new().unwrap();

    {
        let context = MarketplaceContext::new(temp_dir.path()).unwrap();
        context
            .auth_service
            .register(&Credentials::new("alice", "pw"))
            .unwrap();
    }

    let demo = DemoService::new(temp_dir.path());
    demo.enable().unwrap();
    assert!(temp_dir.path().join("demo.duckdb").exists());

    {
        let context = MarketplaceContext::new(temp_dir.path()).unwrap();
        assert!(context.config.demo_mode);
        assert!(context.auth_service.login(&Credentials::new("alice", "pw")).is_err());
        assert!(context.auth_service.login(&Credentials::new("demo", "demo")).is_ok());
        assert!(!context.catalog_service.categories().unwrap().is_empty());
    }

    demo.disable(true).unwrap();
    assert!(!temp_dir.path().join("demo.duckdb").exists());

    let context = MarketplaceContext::new(temp_dir.path()).unwrap();
    assert!(context.auth_service.login(&Credentials::new("alice", "pw")).is_ok());
}
