use std::sync::Arc;

use bigdecimal::BigDecimal;

use crate::domain::cart::model::{AddItemOutcome, Cart, CartLineItem};
use crate::domain::cart::storage::{CART_STORAGE_KEY, CartStorage};
use crate::domain::cart::value_objects::Coupon;
use crate::domain::logger::Logger;
use crate::domain::shared::value_objects::ProductId;

/// Session-scoped cart with write-through persistence.
///
/// Holds the in-memory [`Cart`] and writes the whole snapshot to the storage
/// slot after every state change. Storage failures are logged and never
/// surfaced: the in-memory cart stays authoritative for the session.
pub struct CartStore {
    cart: Cart,
    storage: Arc<dyn CartStorage>,
    logger: Arc<dyn Logger>,
}

impl CartStore {
    /// Restores the cart from storage. A missing, unreadable or corrupt slot
    /// starts an empty cart.
    pub async fn load(storage: Arc<dyn CartStorage>, logger: Arc<dyn Logger>) -> Self {
        let cart = match storage.read(CART_STORAGE_KEY).await {
            Ok(Some(blob)) => match Cart::decode(&blob) {
                Ok(cart) => {
                    logger.debug(&format!(
                        "Cart restored with {} line(s)",
                        cart.items().len()
                    ));
                    cart
                }
                Err(e) => {
                    logger.warn(&format!("Discarding stored cart: {}", e));
                    Cart::new()
                }
            },
            Ok(None) => Cart::new(),
            Err(e) => {
                logger.warn(&format!("Could not read stored cart: {}", e));
                Cart::new()
            }
        };

        Self {
            cart,
            storage,
            logger,
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn items(&self) -> &[CartLineItem] {
        self.cart.items()
    }

    pub fn coupon(&self) -> Option<&Coupon> {
        self.cart.coupon()
    }

    pub fn subtotal(&self) -> BigDecimal {
        self.cart.subtotal()
    }

    pub fn total_price(&self) -> BigDecimal {
        self.cart.total_price()
    }

    pub fn would_conflict(&self, item: &CartLineItem) -> bool {
        self.cart.would_conflict(item)
    }

    pub async fn add_item(&mut self, item: CartLineItem) -> AddItemOutcome {
        let id = item.id.clone();
        let outcome = self.cart.add_item(item);
        match outcome {
            AddItemOutcome::ShopConflict => {
                self.logger
                    .info(&format!("Item {} belongs to another shop, cart kept", id));
            }
            AddItemOutcome::Added | AddItemOutcome::Incremented => {
                self.logger.info(&format!("Item {} added to cart", id));
                self.persist().await;
            }
        }
        outcome
    }

    /// Confirmed shop switch: discards the current cart and starts with `item`.
    pub async fn replace_cart(&mut self, item: CartLineItem) {
        self.logger.info(&format!(
            "Replacing cart with item {} from shop {}",
            item.id, item.shop_id
        ));
        self.cart.replace_cart(item);
        self.persist().await;
    }

    pub async fn remove_item(&mut self, id: &ProductId) -> bool {
        let removed = self.cart.remove_item(id);
        if removed {
            self.logger.info(&format!("Item {} removed from cart", id));
            self.persist().await;
        }
        removed
    }

    pub async fn update_quantity(&mut self, id: &ProductId, quantity: i64) -> bool {
        let updated = self.cart.update_quantity(id, quantity);
        if updated {
            self.persist().await;
        } else {
            self.logger.debug(&format!(
                "Quantity {} for item {} ignored",
                quantity, id
            ));
        }
        updated
    }

    pub async fn clear_cart(&mut self) {
        self.cart.clear();
        self.logger.info("Cart cleared");
        self.persist().await;
    }

    pub async fn apply_coupon(&mut self, coupon: Coupon) {
        self.logger
            .info(&format!("Coupon {} applied to cart", coupon.code));
        self.cart.apply_coupon(coupon);
        self.persist().await;
    }

    pub async fn remove_coupon(&mut self) -> Option<Coupon> {
        let removed = self.cart.remove_coupon();
        if let Some(coupon) = &removed {
            self.logger
                .info(&format!("Coupon {} removed from cart", coupon.code));
            self.persist().await;
        }
        removed
    }

    async fn persist(&self) {
        let blob = match self.cart.encode() {
            Ok(blob) => blob,
            Err(e) => {
                self.logger
                    .error(&format!("Could not encode cart snapshot: {}", e));
                return;
            }
        };

        if let Err(e) = self.storage.write(CART_STORAGE_KEY, &blob).await {
            self.logger.error(&format!("Could not persist cart: {}", e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::model::CartItemProps;
    use crate::domain::cart::value_objects::DiscountType;
    use crate::domain::errors::RepositoryError;
    use crate::domain::shared::value_objects::ShopId;
    use async_trait::async_trait;
    use mockall::mock;
    use std::str::FromStr;
    use std::sync::Mutex;

    mock! {
        pub Storage {}

        #[async_trait]
        impl CartStorage for Storage {
            async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, RepositoryError>;
            async fn write(&self, key: &str, blob: &[u8]) -> Result<(), RepositoryError>;
        }
    }

    mock! {
        pub Log {}

        impl Logger for Log {
            fn info(&self, message: &str);
            fn warn(&self, message: &str);
            fn error(&self, message: &str);
            fn debug(&self, message: &str);
        }
    }

    fn mock_logger() -> Arc<dyn Logger> {
        let mut logger = MockLog::new();
        logger.expect_info().returning(|_| ());
        logger.expect_warn().returning(|_| ());
        logger.expect_error().returning(|_| ());
        logger.expect_debug().returning(|_| ());
        Arc::new(logger)
    }

    /// Storage mock backed by a shared slot, so written snapshots can be inspected.
    fn slot_storage(slot: Arc<Mutex<Option<Vec<u8>>>>) -> MockStorage {
        let mut storage = MockStorage::new();
        let read_slot = slot.clone();
        storage
            .expect_read()
            .returning(move |_| Ok(read_slot.lock().unwrap().clone()));
        storage.expect_write().returning(move |key, blob| {
            assert_eq!(key, CART_STORAGE_KEY);
            *slot.lock().unwrap() = Some(blob.to_vec());
            Ok(())
        });
        storage
    }

    fn item(id: &str, price: &str, shop: &str) -> CartLineItem {
        CartLineItem::new(CartItemProps {
            id: ProductId::parse(id).unwrap(),
            name: format!("Product {id}"),
            unit_price: BigDecimal::from_str(price).unwrap(),
            image_url: None,
            shop_id: ShopId::parse(shop).unwrap(),
        })
        .unwrap()
    }

    fn percent(value: u32) -> Coupon {
        Coupon::new("SAVE".to_string(), DiscountType::Percent, BigDecimal::from(value)).unwrap()
    }

    #[tokio::test]
    async fn should_start_empty_when_slot_missing() {
        let mut storage = MockStorage::new();
        storage.expect_read().returning(|_| Ok(None));

        let store = CartStore::load(Arc::new(storage), mock_logger()).await;

        assert!(store.items().is_empty());
        assert!(store.coupon().is_none());
    }

    #[tokio::test]
    async fn should_start_empty_when_slot_corrupt() {
        let mut storage = MockStorage::new();
        storage
            .expect_read()
            .returning(|_| Ok(Some(b"{\"items\": 42}".to_vec())));
        let mut logger = MockLog::new();
        logger.expect_warn().times(1).returning(|_| ());

        let store = CartStore::load(Arc::new(storage), Arc::new(logger)).await;

        assert!(store.items().is_empty());
    }

    #[tokio::test]
    async fn should_start_empty_when_storage_unreadable() {
        let mut storage = MockStorage::new();
        storage
            .expect_read()
            .returning(|_| Err(RepositoryError::DatabaseError));

        let store = CartStore::load(Arc::new(storage), mock_logger()).await;

        assert!(store.items().is_empty());
    }

    #[tokio::test]
    async fn should_write_through_after_each_mutation() {
        let slot = Arc::new(Mutex::new(None));
        let mut store = CartStore::load(Arc::new(slot_storage(slot.clone())), mock_logger()).await;

        store.add_item(item("p-1", "10", "bakery")).await;
        store.add_item(item("p-1", "10", "bakery")).await;

        let stored = Cart::decode(slot.lock().unwrap().as_deref().unwrap()).unwrap();
        assert_eq!(stored.items()[0].quantity, 2);
        assert_eq!(&stored, store.cart());
    }

    #[tokio::test]
    async fn should_restore_previous_session() {
        let slot = Arc::new(Mutex::new(None));
        {
            let mut store =
                CartStore::load(Arc::new(slot_storage(slot.clone())), mock_logger()).await;
            store.add_item(item("p-1", "1000", "bakery")).await;
            store.apply_coupon(percent(10)).await;
        }

        let restored = CartStore::load(Arc::new(slot_storage(slot)), mock_logger()).await;

        assert_eq!(restored.items().len(), 1);
        assert_eq!(restored.coupon().map(|c| c.code.as_str()), Some("SAVE"));
        assert_eq!(restored.total_price(), BigDecimal::from(900));
    }

    #[tokio::test]
    async fn should_not_write_when_shop_conflicts() {
        let mut storage = MockStorage::new();
        storage.expect_read().returning(|_| Ok(None));
        storage.expect_write().times(1).returning(|_, _| Ok(()));

        let mut store = CartStore::load(Arc::new(storage), mock_logger()).await;
        store.add_item(item("p-1", "10", "bakery")).await;

        let outcome = store.add_item(item("p-2", "10", "butcher")).await;

        assert_eq!(outcome, AddItemOutcome::ShopConflict);
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].shop_id.as_str(), "bakery");
    }

    #[tokio::test]
    async fn should_replace_cart_after_confirmation() {
        let slot = Arc::new(Mutex::new(None));
        let mut store = CartStore::load(Arc::new(slot_storage(slot.clone())), mock_logger()).await;
        store.add_item(item("p-1", "10", "bakery")).await;
        store.apply_coupon(percent(10)).await;

        let other = item("p-2", "7", "butcher");
        assert!(store.would_conflict(&other));
        store.replace_cart(other).await;

        let stored = Cart::decode(slot.lock().unwrap().as_deref().unwrap()).unwrap();
        assert_eq!(stored.shop_id().map(ShopId::as_str), Some("butcher"));
        assert!(stored.coupon().is_none());
    }

    #[tokio::test]
    async fn should_skip_write_for_ignored_operations() {
        let mut storage = MockStorage::new();
        storage.expect_read().returning(|_| Ok(None));
        storage.expect_write().times(1).returning(|_, _| Ok(()));

        let mut store = CartStore::load(Arc::new(storage), mock_logger()).await;
        store.add_item(item("p-1", "10", "bakery")).await;
        let id = ProductId::parse("p-1").unwrap();

        assert!(!store.update_quantity(&id, 0).await);
        assert!(!store.update_quantity(&id, -1).await);
        assert!(!store.remove_item(&ProductId::parse("ghost").unwrap()).await);
        assert!(store.remove_coupon().await.is_none());
        assert_eq!(store.items()[0].quantity, 1);
    }

    #[tokio::test]
    async fn should_update_quantity_and_remove_item() {
        let slot = Arc::new(Mutex::new(None));
        let mut store = CartStore::load(Arc::new(slot_storage(slot.clone())), mock_logger()).await;
        store.add_item(item("p-1", "2.50", "bakery")).await;
        store.add_item(item("p-2", "1", "bakery")).await;
        let id = ProductId::parse("p-1").unwrap();

        assert!(store.update_quantity(&id, 4).await);
        assert_eq!(store.subtotal(), BigDecimal::from(11));

        assert!(store.remove_item(&id).await);
        let stored = Cart::decode(slot.lock().unwrap().as_deref().unwrap()).unwrap();
        assert_eq!(stored.items().len(), 1);
    }

    #[tokio::test]
    async fn should_clear_items_and_coupon() {
        let slot = Arc::new(Mutex::new(None));
        let mut store = CartStore::load(Arc::new(slot_storage(slot.clone())), mock_logger()).await;
        store.add_item(item("p-1", "10", "bakery")).await;
        store.apply_coupon(percent(5)).await;

        store.clear_cart().await;

        let stored = Cart::decode(slot.lock().unwrap().as_deref().unwrap()).unwrap();
        assert!(stored.is_empty());
        assert!(stored.coupon().is_none());
    }

    #[tokio::test]
    async fn should_keep_state_when_write_fails() {
        let mut storage = MockStorage::new();
        storage.expect_read().returning(|_| Ok(None));
        storage
            .expect_write()
            .returning(|_, _| Err(RepositoryError::DatabaseError));
        let mut logger = MockLog::new();
        logger.expect_info().returning(|_| ());
        logger.expect_error().times(1).returning(|_| ());

        let mut store = CartStore::load(Arc::new(storage), Arc::new(logger)).await;
        let outcome = store.add_item(item("p-1", "10", "bakery")).await;

        assert_eq!(outcome, AddItemOutcome::Added);
        assert_eq!(store.items().len(), 1);
    }
}
