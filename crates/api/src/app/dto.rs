use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use tonecart_catalog::Product;
use tonecart_orders::{Order, ShippingAddress, TrackingInfo};
use tonecart_reviews::Review;

// --- request bodies ---------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreateOrderLineRequest {
    pub product_id: String,
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
pub struct ShippingAddressRequest {
    pub recipient: String,
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

impl From<ShippingAddressRequest> for ShippingAddress {
    fn from(req: ShippingAddressRequest) -> Self {
        ShippingAddress {
            recipient: req.recipient,
            street: req.street,
            city: req.city,
            postal_code: req.postal_code,
            country: req.country,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub lines: Vec<CreateOrderLineRequest>,
    pub shipping_address: ShippingAddressRequest,
    /// Smallest currency unit, same as prices.
    #[serde(default)]
    pub shipping_fee: u64,
    pub payment_method: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct SetTrackingRequest {
    pub carrier: String,
    pub tracking_number: String,
    pub estimated_delivery: DateTime<Utc>,
}

impl From<SetTrackingRequest> for TrackingInfo {
    fn from(req: SetTrackingRequest) -> Self {
        TrackingInfo {
            carrier: req.carrier,
            tracking_number: req.tracking_number,
            estimated_delivery: req.estimated_delivery,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SubmitReviewRequest {
    pub product_id: String,
    pub rating: u8,
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    /// Filter to one user's orders. Absent means "all orders" (admin only).
    pub user: Option<String>,
}

// --- response payloads --------------------------------------------------------

pub fn product_to_json(product: &Product) -> serde_json::Value {
    json!({
        "id": product.id.to_string(),
        "name": product.name,
        "description": product.description,
        "price": product.price,
        "stock": product.stock,
        "category": product.category,
        "subcategory": product.subcategory,
        "images": product.images,
        "suggested_tones": product
            .suggested_tones
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>(),
        "created_at": product.created_at,
        "updated_at": product.updated_at,
    })
}

pub fn order_to_json(order: &Order) -> serde_json::Value {
    json!({
        "id": order.id().to_string(),
        "user_id": order.user_id().to_string(),
        "lines": order
            .lines()
            .iter()
            .map(|line| json!({
                "product_id": line.product_id.to_string(),
                "product_name": line.product_name,
                "quantity": line.quantity,
                "unit_price": line.unit_price,
                "subtotal": line.subtotal(),
            }))
            .collect::<Vec<_>>(),
        "total_price": order.total_price(),
        "shipping_fee": order.shipping_fee(),
        "shipping_address": {
            "recipient": order.shipping_address().recipient,
            "street": order.shipping_address().street,
            "city": order.shipping_address().city,
            "postal_code": order.shipping_address().postal_code,
            "country": order.shipping_address().country,
        },
        "payment_method": order.payment_method().as_str(),
        "status": order.status().as_str(),
        "tracking": order.tracking().map(|t| json!({
            "carrier": t.carrier,
            "tracking_number": t.tracking_number,
            "estimated_delivery": t.estimated_delivery,
        })),
        "created_at": order.created_at(),
        "updated_at": order.updated_at(),
    })
}

pub fn review_to_json(review: &Review) -> serde_json::Value {
    json!({
        "id": review.id.to_string(),
        "product_id": review.product_id.to_string(),
        "user_id": review.user_id.to_string(),
        "rating": review.rating,
        "body": review.body,
        "created_at": review.created_at,
    })
}
