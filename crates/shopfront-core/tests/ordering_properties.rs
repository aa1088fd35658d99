use proptest::prelude::*;
use proptest::test_runner::Config;
use shopfront_core::ordering::SortKey;
use shopfront_core::{
    exact_search, sort_products, Cart, CartItem, Money, Product, RemoveOutcome, SortDirection,
};

fn arb_product() -> impl Strategy<Value = Product> {
    (
        0_i64..50,
        "[A-Za-z]{1,6}",
        0_i64..5_000,
        "[a-z]{1,4}",
        1990_i64..2030,
        0_i64..20,
    )
        .prop_map(|(id, name, cents, brand, year, stock)| {
            Product::new(id, name, Money::from_cents(cents), brand, year, stock)
        })
}

fn arb_key() -> impl Strategy<Value = SortKey> {
    prop_oneof![
        Just(SortKey::Id),
        Just(SortKey::Name),
        Just(SortKey::Price),
        Just(SortKey::Brand),
        Just(SortKey::ModelYear),
        Just(SortKey::Stock),
    ]
}

/// Tags each product with its input position so stability can be observed.
fn tagged(products: Vec<Product>) -> Vec<Product> {
    products
        .into_iter()
        .enumerate()
        .map(|(pos, mut p)| {
            p.extra.insert("pos".to_string(), (pos as u64).into());
            p
        })
        .collect()
}

fn pos(p: &Product) -> u64 {
    p.extra.get("pos").and_then(|v| v.as_u64()).unwrap_or(u64::MAX)
}

fn key_text(p: &Product, key: SortKey) -> String {
    match key {
        SortKey::Id => p.id.to_string(),
        SortKey::Name => p.name.clone(),
        SortKey::Price => p.price.to_string(),
        SortKey::Brand => p.brand.clone().unwrap_or_default(),
        SortKey::ModelYear => p.model_year.map(|y| y.to_string()).unwrap_or_default(),
        SortKey::Stock => p.stock.to_string(),
    }
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn ascending_sort_is_ordered_stable_permutation(
        products in proptest::collection::vec(arb_product(), 0..40),
        key in arb_key(),
    ) {
        let input = tagged(products);
        let sorted = sort_products(&input, key, SortDirection::Ascending);

        prop_assert_eq!(sorted.len(), input.len());
        for pair in sorted.windows(2) {
            let ord = key.compare(&pair[0], &pair[1]);
            prop_assert_ne!(ord, std::cmp::Ordering::Greater);
            if ord == std::cmp::Ordering::Equal {
                prop_assert!(pos(&pair[0]) < pos(&pair[1]));
            }
        }

        let mut positions: Vec<u64> = sorted.iter().map(pos).collect();
        positions.sort_unstable();
        let expected: Vec<u64> = (0..input.len() as u64).collect();
        prop_assert_eq!(positions, expected);
    }

    #[test]
    fn descending_sort_is_ordered_and_stable(
        products in proptest::collection::vec(arb_product(), 0..40),
        key in arb_key(),
    ) {
        let input = tagged(products);
        let before = input.clone();
        let sorted = sort_products(&input, key, SortDirection::Descending);

        prop_assert_eq!(&input, &before);
        for pair in sorted.windows(2) {
            let ord = key.compare(&pair[0], &pair[1]);
            prop_assert_ne!(ord, std::cmp::Ordering::Less);
            if ord == std::cmp::Ordering::Equal {
                prop_assert!(pos(&pair[0]) < pos(&pair[1]));
            }
        }
    }

    #[test]
    fn search_finds_every_present_element(
        products in proptest::collection::vec(arb_product(), 1..40),
        key in arb_key(),
        pick in any::<prop::sample::Index>(),
    ) {
        let sorted = sort_products(&products, key, SortDirection::Ascending);
        let target = pick.get(&sorted);

        let found = exact_search(&sorted, &key_text(target, key), key);
        prop_assert!(found.is_some());
        let idx = found.unwrap_or_default();
        prop_assert_eq!(key.compare(&sorted[idx], target), std::cmp::Ordering::Equal);
    }

    #[test]
    fn search_misses_absent_names(
        products in proptest::collection::vec(arb_product(), 0..40),
    ) {
        let sorted = sort_products(&products, SortKey::Name, SortDirection::Ascending);
        // Generated names are letters only.
        prop_assert_eq!(exact_search(&sorted, "not-a-name-123", SortKey::Name), None);
    }

    #[test]
    fn add_then_remove_restores_total(
        products in proptest::collection::vec(arb_product(), 1..10),
        extra in arb_product(),
    ) {
        let mut cart = Cart::new();
        for (i, p) in products.iter().enumerate() {
            cart.push(CartItem::from_product(p, format!("cat-{}", i)));
        }
        let before = cart.total_price();

        cart.push(CartItem::from_product(&extra, "fresh"));
        prop_assert_eq!(cart.total_price(), before + extra.price);

        prop_assert_eq!(cart.decrement(extra.id, "fresh"), RemoveOutcome::Removed);
        prop_assert_eq!(cart.total_price(), before);
        prop_assert!(cart.find(extra.id, "fresh").is_none());
        prop_assert_eq!(cart.total_price(), cart.recomputed_total());
    }
}
