use std::fs;
use std::path::Path;

use shopfront_core::{CoreError, Money, RemoveOutcome};
use shopfront_engine::{
    AddOutcome, AlwaysConfirm, CartManager, ClearOutcome, NoticeLog, Prompt, Screen, Storefront,
    StorefrontConfig,
};
use shopfront_store::{CatalogStore, JsonFileStore, MemoryStore};
use tempfile::tempdir;

fn write_catalog(path: &Path, json: &str) {
    fs::write(path, json).unwrap();
}

fn file_manager(path: &Path) -> CartManager<JsonFileStore> {
    CartManager::new(JsonFileStore::new(path)).with_confirm(AlwaysConfirm)
}

#[test]
fn scenario_a_add_twice_then_checkout() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("products.json");
    write_catalog(
        &path,
        r#"{"Books":[{"id":1,"name":"Go","price":10,"stock":2}]}"#,
    );

    let mut manager = file_manager(&path);
    manager.add_to_cart(1, "Books").unwrap();
    manager.add_to_cart(1, "Books").unwrap();

    assert_eq!(manager.cart().item_count(), 1);
    assert_eq!(manager.cart().items()[0].quantity, 2);
    assert_eq!(manager.total_price(), Money::from_major(20));

    let receipt = manager.checkout().unwrap();
    assert_eq!(receipt.total, Money::from_major(20));
    assert!(manager.cart().is_empty());
    assert!(manager.total_price().is_zero());

    let stored = JsonFileStore::new(&path).read().unwrap();
    assert_eq!(stored.find_product("Books", 1).unwrap().stock, 0);
}

#[test]
fn scenario_b_second_add_exceeds_stock() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("products.json");
    write_catalog(
        &path,
        r#"{"Books":[{"id":1,"name":"Go","price":10,"stock":1}]}"#,
    );

    let log = NoticeLog::new();
    let mut manager = file_manager(&path).with_notifier(log.clone());

    assert_eq!(
        manager.add_to_cart(1, "Books").unwrap(),
        AddOutcome::Added { name: "Go".into() }
    );
    assert!(matches!(
        manager.add_to_cart(1, "Books"),
        Err(CoreError::StockExceeded { available: 1, .. })
    ));
    assert_eq!(manager.total_price(), Money::from_major(10));
    assert_eq!(
        log.last().unwrap().message,
        "Cannot add more. Only 1 left in stock."
    );
}

#[test]
fn scenario_c_empty_checkout_never_touches_store() {
    let store = MemoryStore::default();
    let mut manager = CartManager::new(&store).with_confirm(AlwaysConfirm);
    let reads_after_load = store.reads();

    let err = manager.checkout().unwrap_err();
    assert!(matches!(err.as_core(), Some(CoreError::EmptyCart)));
    assert_eq!(err.to_string(), "Your cart is empty.");
    assert_eq!(store.reads(), reads_after_load);
    assert_eq!(store.writes(), 0);
}

#[test]
fn scenario_d_same_id_in_two_categories() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("products.json");
    write_catalog(
        &path,
        r#"{
            "Books": [{"id": 1, "name": "Go", "price": 10, "stock": 3}],
            "Sports": [{"id": 1, "name": "Football", "price": 19.5, "stock": 3}]
        }"#,
    );

    let mut manager = file_manager(&path);
    manager.add_to_cart(1, "Books").unwrap();
    manager.add_to_cart(1, "Sports").unwrap();

    assert_eq!(manager.cart().item_count(), 2);
    assert_eq!(manager.total_price(), Money::from_cents(2950));

    assert_eq!(manager.remove_from_cart(1, "Sports"), RemoveOutcome::Removed);
    assert_eq!(manager.cart().item_count(), 1);
    assert_eq!(manager.cart().items()[0].category, "Books");
}

#[test]
fn checkout_shortfall_leaves_file_and_cart_alone() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("products.json");
    write_catalog(
        &path,
        r#"{"Books":[{"id":1,"name":"Go","price":10,"stock":3},{"id":2,"name":"Dune","price":8.5,"stock":3}]}"#,
    );

    let mut manager = file_manager(&path);
    manager.add_to_cart(1, "Books").unwrap();
    manager.add_to_cart(2, "Books").unwrap();
    manager.add_to_cart(2, "Books").unwrap();

    // Another process sells most of the Dune stock.
    write_catalog(
        &path,
        r#"{"Books":[{"id":1,"name":"Go","price":10,"stock":3},{"id":2,"name":"Dune","price":8.5,"stock":1}]}"#,
    );
    let before = fs::read_to_string(&path).unwrap();

    let err = manager.checkout().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Not enough stock for:\nDune (Available: 1, In Cart: 2)"
    );
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
    assert_eq!(manager.cart().total_quantity(), 3);
    assert_eq!(manager.total_price(), Money::from_cents(1000 + 2 * 850));
}

#[test]
fn quantities_never_exceed_stock_seen_at_add() {
    let store = MemoryStore::new(
        serde_json::from_str(
            r#"{"Books":[{"id":1,"name":"Go","price":10,"stock":3}],
                "Sports":[{"id":7,"name":"Ball","price":4,"stock":0}]}"#,
        )
        .unwrap(),
    );
    let mut manager = CartManager::new(&store);

    for _ in 0..10 {
        let _ = manager.add_to_cart(1, "Books");
        let _ = manager.add_to_cart(7, "Sports");
    }

    for item in manager.cart().items() {
        let stock = manager
            .catalog()
            .find_product(&item.category, item.id())
            .unwrap()
            .stock;
        assert!(item.quantity <= stock);
    }
    assert_eq!(manager.cart().item_count(), 1);
    assert_eq!(manager.cart().recomputed_total(), manager.total_price());
}

#[test]
fn declined_clear_then_accepted_clear() {
    let store = MemoryStore::new(
        serde_json::from_str(r#"{"Books":[{"id":1,"name":"Go","price":10,"stock":3}]}"#).unwrap(),
    );
    let mut answers = vec![true, false];
    let mut manager = CartManager::new(&store)
        .with_confirm(move |_: Prompt| answers.pop().unwrap_or(false));

    manager.add_to_cart(1, "Books").unwrap();
    assert_eq!(manager.clear_cart(), ClearOutcome::Declined);
    assert_eq!(manager.cart().item_count(), 1);
    assert_eq!(manager.clear_cart(), ClearOutcome::Cleared);
    assert!(manager.cart().is_empty());
}

#[test]
fn session_over_configured_catalog() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data").join("products.json");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    write_catalog(
        &path,
        r#"{"Electronics":[{"id":1,"name":"Laptop","price":899.99,"brand":"Voltra","model year":2023,"stock":1}]}"#,
    );

    let mut config = StorefrontConfig::default();
    config.store.catalog_path = Some(path.clone());
    config.validate().unwrap();

    let manager = CartManager::from_config(&config).with_confirm(AlwaysConfirm);
    let mut shop = Storefront::new(manager);

    let view = shop.open_category("Electronics").unwrap();
    assert_eq!(view.search_by_name("laptop").unwrap().id, 1);

    shop.manager_mut().add_to_cart(1, "Electronics").unwrap();
    let snapshot = shop.open_cart();
    assert_eq!(snapshot.total_price, Money::from_cents(89999));
    assert_eq!(shop.current_screen(), &Screen::Cart);

    shop.manager_mut().checkout().unwrap();
    assert!(shop.logout(true));
    assert_eq!(shop.current_screen(), &Screen::Home);

    let saved = fs::read_to_string(&path).unwrap();
    assert!(saved.contains("\"stock\": 0"));
    assert!(saved.contains("\"model year\": 2023"));
}

#[test]
fn checkout_keeps_untouched_records_byte_for_byte() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("products.json");
    write_catalog(
        &path,
        r#"{
    "Books": [
        {
            "id": 1,
            "name": "Go",
            "price": 10,
            "stock": 2
        }
    ],
    "Sports": [
        {
            "id": 1,
            "name": "Wristband",
            "price": 19.999,
            "brand": "Kickr",
            "stock": 3
        },
        {
            "id": 2,
            "name": "Chalk",
            "price": 0.005,
            "model year": 2021,
            "stock": 9
        }
    ]
}"#,
    );

    let mut manager = file_manager(&path);
    manager.add_to_cart(1, "Books").unwrap();
    manager.checkout().unwrap();

    let saved = fs::read_to_string(&path).unwrap();
    let after: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(after["Books"][0]["stock"], 1);
    assert_eq!(after["Sports"][0]["price"], serde_json::json!(19.999));
    assert_eq!(after["Sports"][1]["price"], serde_json::json!(0.005));
    assert!(after["Sports"][0].get("model year").is_none());
    assert!(after["Sports"][1].get("brand").is_none());
    assert!(after["Books"][0].get("brand").is_none());
}
