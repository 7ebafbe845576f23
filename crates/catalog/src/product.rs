use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tonecart_core::{DomainError, DomainResult, ProductId};

use crate::tone::ToneTag;

/// Catalog product document.
///
/// Created and edited by catalog management, which is external to this core.
/// The order core reads products and decrements `stock`; nothing else here
/// is ever mutated by order processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Price in smallest currency unit (e.g., cents).
    pub price: u64,
    /// Sellable units. Invariant: never negative.
    pub stock: i64,
    pub category: String,
    pub subcategory: Option<String>,
    /// Ordered image references.
    pub images: Vec<String>,
    /// Tone tags marking this product as suggested for matching skin tones.
    pub suggested_tones: Vec<ToneTag>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Validating constructor for a new catalog entry.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        description: impl Into<String>,
        price: u64,
        stock: i64,
        category: impl Into<String>,
        suggested_tones: Vec<ToneTag>,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }
        if stock < 0 {
            return Err(DomainError::validation("stock cannot be negative"));
        }
        if suggested_tones.is_empty() {
            return Err(DomainError::validation(
                "product must carry at least one tone tag",
            ));
        }

        Ok(Self {
            id,
            name,
            description: description.into(),
            price,
            stock,
            category: category.into(),
            subcategory: None,
            images: Vec::new(),
            suggested_tones,
            created_at: now,
            updated_at: now,
        })
    }

    /// The recommendation matching rule: does this product's tone-tag set
    /// contain `tone`? Insensitive to the insertion order of tags.
    pub fn suggests(&self, tone: &ToneTag) -> bool {
        self.suggested_tones.iter().any(|t| t == tone)
    }
}
