// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Stripe API client for creating payment intents.
//!
//! This layer only creates charge intents; it is not a ledger. Recording a
//! completed payment is the `/payment` route's job, and the two are not
//! coordinated beyond the charge id doubling as the record key.

use crate::error::AppError;
use serde::Deserialize;

const STRIPE_API_BASE: &str = "https://api.stripe.com/v1";

/// Convert a decimal currency amount to integer minor units (cents).
pub fn to_minor_units(price: f64) -> i64 {
    (price * 100.0).round() as i64
}

/// Stripe API client.
#[derive(Clone)]
pub struct StripeClient {
    http: reqwest::Client,
    base_url: String,
    secret_key: String,
}

impl StripeClient {
    /// Create a new Stripe client with the account's secret key.
    pub fn new(secret_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: STRIPE_API_BASE.to_string(),
            secret_key,
        }
    }

    /// Create a payment intent for a card charge of `amount` minor units.
    pub async fn create_payment_intent(&self, amount: i64) -> Result<PaymentIntent, AppError> {
        let url = format!("{}/payment_intents", self.base_url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.secret_key)
            .form(&[
                ("amount", amount.to_string()),
                ("currency", "usd".to_string()),
                ("payment_method_types[]", "card".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Gateway(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// Check response status and parse the JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Gateway(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Gateway(format!("JSON parse error: {}", e)))
    }
}

/// Payment intent response from Stripe (the fields this layer consumes).
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minor_units_round_to_cents() {
        assert_eq!(to_minor_units(10.0), 1000);
        assert_eq!(to_minor_units(25.5), 2550);
        assert_eq!(to_minor_units(19.99), 1999);
        // Float noise must not drop a cent
        assert_eq!(to_minor_units(0.1 + 0.2), 30);
        assert_eq!(to_minor_units(0.0), 0);
    }
}
