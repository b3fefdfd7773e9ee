//! Order Form Snapshot
//!
//! Values are read once per submit attempt, trimmed, and then fanned out
//! into the backend caching request and the billing/shipping details sent
//! with the card payment confirmation.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::secrets::ClientSecret;

/// Named inputs of the order form
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    FullName,
    PhoneNumber,
    Email,
    StreetAddress1,
    StreetAddress2,
    TownOrCity,
    Country,
    County,
    Postcode,
    CsrfToken,
}

impl FormField {
    pub const ALL: [FormField; 10] = [
        FormField::FullName,
        FormField::PhoneNumber,
        FormField::Email,
        FormField::StreetAddress1,
        FormField::StreetAddress2,
        FormField::TownOrCity,
        FormField::Country,
        FormField::County,
        FormField::Postcode,
        FormField::CsrfToken,
    ];

    /// The `name` attribute of the input
    pub fn name(self) -> &'static str {
        match self {
            FormField::FullName => "full_name",
            FormField::PhoneNumber => "phone_number",
            FormField::Email => "email",
            FormField::StreetAddress1 => "street_address1",
            FormField::StreetAddress2 => "street_address2",
            FormField::TownOrCity => "town_or_city",
            FormField::Country => "country",
            FormField::County => "county",
            FormField::Postcode => "postcode",
            FormField::CsrfToken => "csrfmiddlewaretoken",
        }
    }
}

/// Trimmed form values captured at submit time
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormSnapshot {
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
    pub street_address1: String,
    pub street_address2: String,
    pub town_or_city: String,
    pub country: String,
    pub county: String,
    pub postcode: String,
    pub csrf_token: String,
    pub save_info: bool,
}

impl FormSnapshot {
    /// Read every field through `read`, trimming surrounding whitespace.
    pub fn collect<F>(mut read: F, save_info: bool) -> Result<Self>
    where
        F: FnMut(FormField) -> Result<String>,
    {
        let mut value = |field| read(field).map(|raw| raw.trim().to_string());

        Ok(Self {
            full_name: value(FormField::FullName)?,
            phone_number: value(FormField::PhoneNumber)?,
            email: value(FormField::Email)?,
            street_address1: value(FormField::StreetAddress1)?,
            street_address2: value(FormField::StreetAddress2)?,
            town_or_city: value(FormField::TownOrCity)?,
            country: value(FormField::Country)?,
            county: value(FormField::County)?,
            postcode: value(FormField::Postcode)?,
            csrf_token: value(FormField::CsrfToken)?,
            save_info,
        })
    }

    /// Body of the `cache_checkout_data` POST
    pub fn cache_data(&self, client_secret: &ClientSecret) -> CacheCheckoutData {
        CacheCheckoutData {
            csrfmiddlewaretoken: self.csrf_token.clone(),
            client_secret: client_secret.clone(),
            save_info: self.save_info,
        }
    }

    /// Billing details attached to the payment method.
    ///
    /// No postal code: the card element collects it and Stripe overrides
    /// any value supplied here.
    pub fn billing_details(&self) -> BillingDetails {
        BillingDetails {
            name: self.full_name.clone(),
            phone: self.phone_number.clone(),
            email: self.email.clone(),
            address: BillingAddress {
                line1: self.street_address1.clone(),
                line2: self.street_address2.clone(),
                city: self.town_or_city.clone(),
                country: self.country.clone(),
                state: self.county.clone(),
            },
        }
    }

    /// Shipping details attached to the payment intent
    pub fn shipping_details(&self) -> ShippingDetails {
        ShippingDetails {
            name: self.full_name.clone(),
            phone: self.phone_number.clone(),
            address: ShippingAddress {
                line1: self.street_address1.clone(),
                line2: self.street_address2.clone(),
                city: self.town_or_city.clone(),
                country: self.country.clone(),
                postal_code: self.postcode.clone(),
                state: self.county.clone(),
            },
        }
    }

    pub fn card_payment_details(&self) -> CardPaymentDetails {
        CardPaymentDetails {
            billing_details: self.billing_details(),
            shipping: self.shipping_details(),
        }
    }
}

/// Form-encoded body of `POST /checkout/cache_checkout_data/`
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CacheCheckoutData {
    pub csrfmiddlewaretoken: String,
    pub client_secret: ClientSecret,
    pub save_info: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingAddress {
    pub line1: String,
    pub line2: String,
    pub city: String,
    pub country: String,
    pub state: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingDetails {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: BillingAddress,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub line1: String,
    pub line2: String,
    pub city: String,
    pub country: String,
    pub postal_code: String,
    pub state: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingDetails {
    pub name: String,
    pub phone: String,
    pub address: ShippingAddress,
}

/// Everything `confirmCardPayment` receives besides the card element itself
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPaymentDetails {
    pub billing_details: BillingDetails,
    pub shipping: ShippingDetails,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CheckoutError;

    fn padded(field: FormField) -> Result<String> {
        Ok(match field {
            FormField::FullName => "  Ada   Lovelace \n".into(),
            FormField::PhoneNumber => "\t+44 20 7946 0000 ".into(),
            FormField::Email => " ada@example.com".into(),
            FormField::StreetAddress1 => " 12  Analytical Row ".into(),
            FormField::StreetAddress2 => "   ".into(),
            FormField::TownOrCity => "London ".into(),
            FormField::Country => " GB".into(),
            FormField::County => " Greater London ".into(),
            FormField::Postcode => " NW1 6XE ".into(),
            FormField::CsrfToken => "token123".into(),
        })
    }

    #[test]
    fn test_collect_trims_but_keeps_interior_whitespace() {
        let snapshot = FormSnapshot::collect(padded, true).unwrap();
        assert_eq!(snapshot.full_name, "Ada   Lovelace");
        assert_eq!(snapshot.phone_number, "+44 20 7946 0000");
        assert_eq!(snapshot.street_address1, "12  Analytical Row");
        assert_eq!(snapshot.street_address2, "");
        assert_eq!(snapshot.postcode, "NW1 6XE");
        assert!(snapshot.save_info);
    }

    #[test]
    fn test_collect_propagates_missing_field() {
        let result = FormSnapshot::collect(
            |field| match field {
                FormField::County => Err(CheckoutError::MissingElement("county".into())),
                other => padded(other),
            },
            false,
        );
        assert!(matches!(result, Err(CheckoutError::MissingElement(_))));
    }

    #[test]
    fn test_details_shape() {
        let snapshot = FormSnapshot::collect(padded, false).unwrap();
        let json = serde_json::to_value(snapshot.card_payment_details()).unwrap();

        assert_eq!(json["billing_details"]["name"], "Ada   Lovelace");
        assert_eq!(json["billing_details"]["address"]["state"], "Greater London");
        assert!(json["billing_details"]["address"].get("postal_code").is_none());
        assert!(json["shipping"].get("email").is_none());
        assert_eq!(json["shipping"]["address"]["postal_code"], "NW1 6XE");
        assert_eq!(json["shipping"]["address"]["country"], "GB");
    }

    #[test]
    fn test_cache_data_fields() {
        let snapshot = FormSnapshot::collect(padded, true).unwrap();
        let secret = ClientSecret::from_embedded("\"pi_secret_1\"").unwrap();
        let json = serde_json::to_value(snapshot.cache_data(&secret)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "csrfmiddlewaretoken": "token123",
                "client_secret": "pi_secret_1",
                "save_info": true,
            })
        );
    }

    #[test]
    fn test_field_names_are_unique() {
        let mut names: Vec<_> = FormField::ALL.iter().map(|f| f.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), FormField::ALL.len());
    }
}
