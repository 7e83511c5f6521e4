use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{CategoryId, ProductQueries};
use crate::error::{AppError, AppResult};

/// Response envelope used by the product service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayReply<T> {
    pub status: u16,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub error: Vec<String>,
    pub data: Option<T>,
}

impl<T> GatewayReply<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: 200,
            error: Vec::new(),
            data: Some(data),
        }
    }

    pub fn failed(status: u16, errors: Vec<String>) -> Self {
        Self {
            status,
            error: errors,
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl<T: Default> GatewayReply<T> {
    /// Success yields the payload; any other status is forwarded untouched.
    pub fn into_result(self) -> AppResult<T> {
        if self.is_success() {
            Ok(self.data.unwrap_or_default())
        } else {
            Err(AppError::Upstream {
                status: self.status,
                errors: self.error,
            })
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsCount {
    #[serde(alias = "count")]
    pub products_count: i64,
}

#[derive(Debug, Serialize)]
pub struct ListProductsRequest<'a> {
    pub categories: &'a [CategoryId],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queries: Option<&'a ProductQueries>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountProductsRequest<'a> {
    pub categories_ids: &'a [CategoryId],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queries: Option<&'a ProductQueries>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
