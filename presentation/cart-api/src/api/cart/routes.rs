use std::sync::Arc;

use poem_openapi::{OpenApi, param::Path, payload::Json};
use tokio::sync::Mutex;

use business::application::cart::store::CartStore;
use business::domain::cart::errors::CartError;
use business::domain::cart::model::AddItemOutcome;
use business::domain::cart::use_cases::verify_coupon::{VerifyCouponParams, VerifyCouponUseCase};
use business::domain::shared::value_objects::ProductId;

use crate::api::cart::dto::{
    AddCartItemRequest, ApplyCouponRequest, CartResponse, UpdateQuantityRequest,
};
use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::tags::ApiTags;

pub struct CartApi {
    store: Arc<Mutex<CartStore>>,
    verify_coupon_use_case: Arc<dyn VerifyCouponUseCase>,
}

impl CartApi {
    pub fn new(
        store: Arc<Mutex<CartStore>>,
        verify_coupon_use_case: Arc<dyn VerifyCouponUseCase>,
    ) -> Self {
        Self {
            store,
            verify_coupon_use_case,
        }
    }
}

fn invalid_id() -> Json<ErrorResponse> {
    Json(ErrorResponse::new("ValidationError", "product.id_empty"))
}

/// Shopping cart API
///
/// One cart per device session. Every change is written through to local storage.
#[OpenApi]
impl CartApi {
    /// Get the cart
    ///
    /// Returns the items, the attached coupon and the computed totals.
    #[oai(path = "/cart", method = "get", tag = "ApiTags::Cart")]
    async fn get_cart(&self) -> Json<CartResponse> {
        let store = self.store.lock().await;
        Json(store.cart().into())
    }

    /// Add an item
    ///
    /// Adds one unit of a product. Adding a product from another shop is
    /// refused with 409 unless `replace` is set, in which case the current
    /// cart is discarded first.
    #[oai(path = "/cart/items", method = "post", tag = "ApiTags::Cart")]
    async fn add_item(&self, body: Json<AddCartItemRequest>) -> AddCartItemResponse {
        let replace = body.0.replace.unwrap_or(false);
        let item = match body.0.into_line_item() {
            Ok(item) => item,
            Err(err) => {
                let (_status, json) = err.into_error_response();
                return AddCartItemResponse::BadRequest(json);
            }
        };

        let mut store = self.store.lock().await;
        if replace && store.would_conflict(&item) {
            store.replace_cart(item).await;
            return AddCartItemResponse::Ok(Json(store.cart().into()));
        }

        match store.add_item(item).await {
            AddItemOutcome::ShopConflict => AddCartItemResponse::Conflict(Json(
                ErrorResponse::new("Conflict", "cart.shop_conflict"),
            )),
            AddItemOutcome::Added | AddItemOutcome::Incremented => {
                AddCartItemResponse::Ok(Json(store.cart().into()))
            }
        }
    }

    /// Change an item quantity
    ///
    /// Quantities below 1 leave the cart unchanged; use DELETE to drop an item.
    #[oai(path = "/cart/items/:id", method = "put", tag = "ApiTags::Cart")]
    async fn update_quantity(
        &self,
        id: Path<String>,
        body: Json<UpdateQuantityRequest>,
    ) -> UpdateCartItemResponse {
        let Ok(id) = ProductId::parse(&id.0) else {
            return UpdateCartItemResponse::BadRequest(invalid_id());
        };

        let mut store = self.store.lock().await;
        store.update_quantity(&id, body.0.quantity).await;
        UpdateCartItemResponse::Ok(Json(store.cart().into()))
    }

    /// Remove an item
    ///
    /// Removing an item that is not in the cart is a no-op.
    #[oai(path = "/cart/items/:id", method = "delete", tag = "ApiTags::Cart")]
    async fn remove_item(&self, id: Path<String>) -> RemoveCartItemResponse {
        let Ok(id) = ProductId::parse(&id.0) else {
            return RemoveCartItemResponse::BadRequest(invalid_id());
        };

        let mut store = self.store.lock().await;
        store.remove_item(&id).await;
        RemoveCartItemResponse::Ok(Json(store.cart().into()))
    }

    /// Clear the cart
    ///
    /// Removes every item and the coupon.
    #[oai(path = "/cart", method = "delete", tag = "ApiTags::Cart")]
    async fn clear(&self) -> Json<CartResponse> {
        let mut store = self.store.lock().await;
        store.clear_cart().await;
        Json(store.cart().into())
    }

    /// Apply a coupon
    ///
    /// Verifies the code against the cart's shop and subtotal, then attaches
    /// the returned discount terms, replacing any previous coupon. The cart is
    /// not locked during verification; if it changed meanwhile the coupon is
    /// not applied and 409 is returned.
    #[oai(path = "/cart/coupon", method = "post", tag = "ApiTags::Cart")]
    async fn apply_coupon(&self, body: Json<ApplyCouponRequest>) -> ApplyCouponResponse {
        let (shop_id, subtotal) = {
            let store = self.store.lock().await;
            let Some(shop_id) = store.cart().shop_id().cloned() else {
                let (_status, json) = CartError::Empty.into_error_response();
                return ApplyCouponResponse::BadRequest(json);
            };
            (shop_id, store.subtotal())
        };

        let params = VerifyCouponParams {
            code: body.0.code,
            shop_id: shop_id.clone(),
            subtotal: subtotal.clone(),
        };

        match self.verify_coupon_use_case.execute(params).await {
            Ok(coupon) => {
                let mut store = self.store.lock().await;
                if store.cart().shop_id() != Some(&shop_id) || store.subtotal() != subtotal {
                    return ApplyCouponResponse::Conflict(Json(ErrorResponse::new(
                        "Conflict",
                        "cart.changed_during_verification",
                    )));
                }
                store.apply_coupon(coupon).await;
                ApplyCouponResponse::Ok(Json(store.cart().into()))
            }
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => ApplyCouponResponse::BadRequest(json),
                    404 => ApplyCouponResponse::NotFound(json),
                    422 => ApplyCouponResponse::Rejected(json),
                    _ => ApplyCouponResponse::Unavailable(json),
                }
            }
        }
    }

    /// Remove the coupon
    #[oai(path = "/cart/coupon", method = "delete", tag = "ApiTags::Cart")]
    async fn remove_coupon(&self) -> Json<CartResponse> {
        let mut store = self.store.lock().await;
        store.remove_coupon().await;
        Json(store.cart().into())
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum AddCartItemResponse {
    #[oai(status = 200)]
    Ok(Json<CartResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum UpdateCartItemResponse {
    #[oai(status = 200)]
    Ok(Json<CartResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum RemoveCartItemResponse {
    #[oai(status = 200)]
    Ok(Json<CartResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum ApplyCouponResponse {
    #[oai(status = 200)]
    Ok(Json<CartResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),
    #[oai(status = 422)]
    Rejected(Json<ErrorResponse>),
    #[oai(status = 503)]
    Unavailable(Json<ErrorResponse>),
}
