//! Purchase selection policy.
//!
//! A user, an event and a product are each drawn uniformly and
//! independently; nothing ties the product to the event it is bought in.
//! RNG draw order is user index, event index, product index, quantity.

use chrono::{DateTime, Utc};
use liveshop_core::error::DomainError;
use liveshop_core::model::{Event, NewPurchase, Product, User};
use liveshop_core::rng::DeterministicRng;

/// Smallest quantity a generated purchase can have.
pub const MIN_QUANTITY: u32 = 1;
/// Largest quantity a generated purchase can have.
pub const MAX_QUANTITY: u32 = 5;

/// The entities a purchase is drawn from.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Candidate buyers.
    pub users: Vec<User>,
    /// Candidate events.
    pub events: Vec<Event>,
    /// Candidate products.
    pub products: Vec<Product>,
}

impl Catalog {
    /// Checks that every collection has at least one entry.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` naming the first empty collection.
    pub fn ensure_complete(&self) -> Result<(), DomainError> {
        let empty = if self.users.is_empty() {
            Some("users")
        } else if self.events.is_empty() {
            Some("events")
        } else if self.products.is_empty() {
            Some("products")
        } else {
            None
        };

        match empty {
            Some(name) => Err(DomainError::Validation(format!(
                "cannot generate a purchase: no {name} available"
            ))),
            None => Ok(()),
        }
    }
}

fn pick<'a, T>(items: &'a [T], rng: &mut dyn DeterministicRng) -> Result<&'a T, DomainError> {
    let last = u32::try_from(items.len().saturating_sub(1))
        .map_err(|_| DomainError::Validation("collection too large to sample".to_owned()))?;
    let index = rng.next_u32_range(0, last) as usize;
    items
        .get(index)
        .ok_or_else(|| DomainError::Validation(format!("index {index} out of range")))
}

/// Rejects catalog rows the event log cannot carry: a price that is negative
/// or not finite, or an event duration that is negative or does not fit in
/// `i64` nanoseconds.
fn ensure_recordable(event: &Event, product: &Product) -> Result<(), DomainError> {
    if !product.price.is_finite() || product.price < 0.0 {
        return Err(DomainError::Validation(format!(
            "product {} has an unusable price {}",
            product.id, product.price
        )));
    }
    match event.duration.num_nanoseconds() {
        Some(nanos) if nanos >= 0 => Ok(()),
        _ => Err(DomainError::Validation(format!(
            "event {} has an unusable duration",
            event.id
        ))),
    }
}

/// Draws one purchase from the catalog, priced at the product's current
/// price and dated `now`.
///
/// # Errors
///
/// Returns `DomainError::Validation` if any catalog collection is empty, or
/// if the drawn product's price or event's duration cannot be recorded.
pub fn select_purchase(
    catalog: &Catalog,
    now: DateTime<Utc>,
    rng: &mut dyn DeterministicRng,
) -> Result<NewPurchase, DomainError> {
    catalog.ensure_complete()?;

    let user = pick(&catalog.users, rng)?;
    let event = pick(&catalog.events, rng)?;
    let product = pick(&catalog.products, rng)?;
    let quantity = i32::try_from(rng.next_u32_range(MIN_QUANTITY, MAX_QUANTITY))
        .map_err(|_| DomainError::Validation("quantity out of range".to_owned()))?;
    ensure_recordable(event, product)?;

    Ok(NewPurchase {
        user: user.clone(),
        event: event.clone(),
        product: product.clone(),
        quantity,
        price: product.price,
        purchase_date: now,
    })
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone};
    use liveshop_core::rng::SystemRng;
    use liveshop_test_support::{
        MockRng, SequenceRng, sample_event, sample_product, sample_user,
    };

    use super::*;

    fn full_catalog() -> Catalog {
        Catalog {
            users: vec![sample_user(1), sample_user(2), sample_user(3)],
            events: vec![sample_event(10), sample_event(20)],
            products: vec![
                sample_product(100, "Cool T-shirt", 19.99),
                sample_product(200, "Smartphone", 299.99),
                sample_product(300, "Gaming Console", 499.99),
            ],
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_select_purchase_follows_rng_draw_order() {
        // Arrange
        let mut rng = SequenceRng::new(vec![2, 0, 1, 4]);

        // Act
        let purchase = select_purchase(&full_catalog(), fixed_now(), &mut rng).unwrap();

        // Assert
        assert_eq!(purchase.user.id, 3);
        assert_eq!(purchase.event.id, 10);
        assert_eq!(purchase.product.id, 200);
        assert_eq!(purchase.quantity, 4);
        assert_eq!(purchase.purchase_date, fixed_now());
    }

    #[test]
    fn test_select_purchase_copies_current_product_price() {
        let mut rng = SequenceRng::new(vec![0, 0, 2, 1]);

        let purchase = select_purchase(&full_catalog(), fixed_now(), &mut rng).unwrap();

        assert!((purchase.price - 499.99).abs() < f64::EPSILON);
    }

    #[test]
    fn test_select_purchase_quantity_stays_within_bounds() {
        let mut rng = SystemRng::seeded(99);
        let catalog = full_catalog();

        for _ in 0..500 {
            let purchase = select_purchase(&catalog, fixed_now(), &mut rng).unwrap();
            assert!((1..=5).contains(&purchase.quantity));
        }
    }

    #[test]
    fn test_mock_rng_yields_minimum_quantity() {
        let purchase = select_purchase(&full_catalog(), fixed_now(), &mut MockRng).unwrap();

        assert_eq!(purchase.quantity, 1);
        assert_eq!(purchase.user.id, 1);
    }

    #[test]
    fn test_select_purchase_rejects_each_empty_collection() {
        let cases = [
            ("users", Catalog { users: vec![], ..full_catalog() }),
            ("events", Catalog { events: vec![], ..full_catalog() }),
            ("products", Catalog { products: vec![], ..full_catalog() }),
        ];

        for (name, catalog) in cases {
            match select_purchase(&catalog, fixed_now(), &mut MockRng) {
                Err(DomainError::Validation(msg)) => assert!(msg.contains(name)),
                other => panic!("expected Validation for empty {name}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_select_purchase_rejects_non_finite_price() {
        for price in [f64::NAN, f64::INFINITY, -1.0] {
            // Arrange
            let catalog = Catalog {
                products: vec![sample_product(100, "Cool T-shirt", price)],
                ..full_catalog()
            };

            // Act
            let result = select_purchase(&catalog, fixed_now(), &mut MockRng);

            // Assert
            match result {
                Err(DomainError::Validation(msg)) => assert!(msg.contains("product 100")),
                other => panic!("expected Validation for price {price}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_select_purchase_rejects_duration_beyond_i64_nanoseconds() {
        let catalog = Catalog {
            events: vec![Event {
                duration: TimeDelta::days(120_000),
                ..sample_event(10)
            }],
            ..full_catalog()
        };

        let result = select_purchase(&catalog, fixed_now(), &mut MockRng);

        match result {
            Err(DomainError::Validation(msg)) => assert!(msg.contains("event 10")),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_select_purchase_only_checks_the_drawn_rows() {
        // Arrange: the unusable product is never drawn.
        let mut catalog = full_catalog();
        catalog.products[2].price = f64::NAN;
        let mut rng = SequenceRng::new(vec![0, 0, 1, 1]);

        // Act
        let purchase = select_purchase(&catalog, fixed_now(), &mut rng).unwrap();

        // Assert
        assert_eq!(purchase.product.id, 200);
    }
}
