//! Four-step delivery booking wizard.
//!
//! ```text
//! 1 Customer Info ─► 2 Pickup & Delivery ─► 3 Package Details ─► 4 Review & Confirm
//! ```
//!
//! Each step validates its required fields before the wizard advances.
//! Leaving the package step requests a price quote; submitting creates the
//! order at the quoted total.

use std::collections::BTreeMap;

use crate::app::state::Notices;
use crate::domain::error::{CourierError, Result};
use crate::domain::{Dimensions, NewOrder, Order, PackageDetails, PostalAddress, PriceQuote};
use crate::services::{Repository, Services};

/// Package types offered by the form, as `(value, label)`.
pub const PACKAGE_TYPES: [(&str, &str); 6] = [
    ("general", "General Package"),
    ("documents", "Documents"),
    ("electronics", "Electronics"),
    ("clothing", "Clothing"),
    ("food", "Food & Beverages"),
    ("books", "Books & Media"),
];

const DEFAULT_CITY: &str = "San Francisco";
const DEFAULT_STATE: &str = "CA";
const DEFAULT_PACKAGE_TYPE: &str = "general";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BookingStep {
    Customer = 1,
    Addresses = 2,
    Package = 3,
    Review = 4,
}

impl BookingStep {
    #[must_use]
    pub const fn number(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Customer => "Customer Info",
            Self::Addresses => "Pickup & Delivery",
            Self::Package => "Package Details",
            Self::Review => "Review & Confirm",
        }
    }

    const fn next(self) -> Self {
        match self {
            Self::Customer => Self::Addresses,
            Self::Addresses => Self::Package,
            Self::Package | Self::Review => Self::Review,
        }
    }

    const fn previous(self) -> Self {
        match self {
            Self::Customer | Self::Addresses => Self::Customer,
            Self::Package => Self::Addresses,
            Self::Review => Self::Package,
        }
    }
}

/// Package section as typed into the form. Numbers stay text until submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageForm {
    pub weight: String,
    pub length: String,
    pub width: String,
    pub height: String,
    pub kind: String,
    pub value: String,
    pub urgent: bool,
    pub fragile: bool,
}

impl Default for PackageForm {
    fn default() -> Self {
        Self {
            weight: String::new(),
            length: String::new(),
            width: String::new(),
            height: String::new(),
            kind: DEFAULT_PACKAGE_TYPE.to_string(),
            value: String::new(),
            urgent: false,
            fragile: false,
        }
    }
}

impl PackageForm {
    fn details(&self) -> PackageDetails {
        PackageDetails {
            weight: parse_lenient(&self.weight),
            dimensions: Dimensions {
                length: parse_lenient(&self.length),
                width: parse_lenient(&self.width),
                height: parse_lenient(&self.height),
            },
            kind: self.kind.clone(),
            value: parse_lenient(&self.value),
            urgent: self.urgent,
            fragile: self.fragile,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookingForm {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub pickup_address: PostalAddress,
    pub pickup_notes: String,
    pub delivery_address: PostalAddress,
    pub delivery_notes: String,
    pub package: PackageForm,
}

impl Default for BookingForm {
    fn default() -> Self {
        let local = PostalAddress {
            city: DEFAULT_CITY.to_string(),
            state: DEFAULT_STATE.to_string(),
            ..PostalAddress::default()
        };
        Self {
            customer_name: String::new(),
            customer_phone: String::new(),
            customer_email: String::new(),
            pickup_address: local.clone(),
            pickup_notes: String::new(),
            delivery_address: local,
            delivery_notes: String::new(),
            package: PackageForm::default(),
        }
    }
}

/// Field name to message, for the fields failing validation.
pub type FieldErrors = BTreeMap<&'static str, &'static str>;

/// Validates the fields `step` requires.
#[must_use]
pub fn validate_step(step: BookingStep, form: &BookingForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    let mut require = |field: &'static str, value: &str, message: &'static str| {
        if value.trim().is_empty() {
            errors.insert(field, message);
        }
    };

    match step {
        BookingStep::Customer => {
            require("customerName", &form.customer_name, "Name is required");
            require("customerPhone", &form.customer_phone, "Phone is required");
        }
        BookingStep::Addresses => {
            require("pickupStreet", &form.pickup_address.street, "Pickup address is required");
            require("deliveryStreet", &form.delivery_address.street, "Delivery address is required");
        }
        BookingStep::Package => {
            require("weight", &form.package.weight, "Weight is required");
            require("type", &form.package.kind, "Package type is required");
            if !errors.contains_key("weight") && parse_weight(&form.package.weight).is_none() {
                errors.insert("weight", "Weight must be a positive number");
            }
        }
        BookingStep::Review => {}
    }
    errors
}

/// Parses a number typed into the form, treating blank or invalid text as 0.
#[must_use]
pub fn parse_lenient(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

fn parse_weight(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|w| w.is_finite() && *w > 0.0)
}

pub struct BookingWizard {
    services: Services,
    notices: Notices,
    step: BookingStep,
    pub form: BookingForm,
    errors: FieldErrors,
    quote: Option<PriceQuote>,
}

impl BookingWizard {
    #[must_use]
    pub fn new(services: Services, notices: Notices) -> Self {
        Self {
            services,
            notices,
            step: BookingStep::Customer,
            form: BookingForm::default(),
            errors: FieldErrors::new(),
            quote: None,
        }
    }

    #[must_use]
    pub fn step(&self) -> BookingStep {
        self.step
    }

    /// Validation messages from the last advance attempt.
    #[must_use]
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    #[must_use]
    pub fn quote(&self) -> Option<&PriceQuote> {
        self.quote.as_ref()
    }

    /// Validates the current step and moves forward.
    ///
    /// Leaving the package step requests a price quote first. A failed quote
    /// raises a notice but does not block the wizard. Returns whether the
    /// step changed.
    pub async fn next(&mut self) -> bool {
        self.errors = validate_step(self.step, &self.form);
        if !self.errors.is_empty() {
            tracing::debug!(step = self.step.number(), errors = self.errors.len(), "step invalid");
            return false;
        }

        if self.step == BookingStep::Package {
            self.request_quote().await;
        }

        let previous = self.step;
        self.step = self.step.next();
        self.step != previous
    }

    /// Moves back one step, never below the first.
    pub fn previous(&mut self) {
        self.step = self.step.previous();
    }

    async fn request_quote(&mut self) {
        let package = self.form.package.details();
        match self
            .services
            .orders
            .quote(&self.form.pickup_address, &self.form.delivery_address, &package)
            .await
        {
            Ok(quote) => self.quote = Some(quote),
            Err(e) => {
                tracing::warn!(error = %e, "price quote failed");
                self.notices.error("Failed to calculate price");
            }
        }
    }

    /// Creates the order at the quoted total, or at 0 when no quote exists.
    ///
    /// # Errors
    ///
    /// Returns [`CourierError::Validation`] if called before the review step,
    /// or the order service error.
    pub async fn submit(&mut self) -> Result<Order> {
        if self.step != BookingStep::Review {
            return Err(CourierError::Validation(
                "Complete every step before submitting".to_string(),
            ));
        }

        let form = &self.form;
        let input = NewOrder {
            customer_name: form.customer_name.clone(),
            customer_phone: form.customer_phone.clone(),
            customer_email: form.customer_email.clone(),
            pickup_address: form.pickup_address.clone(),
            delivery_address: form.delivery_address.clone(),
            pickup_notes: form.pickup_notes.clone(),
            delivery_notes: form.delivery_notes.clone(),
            package_details: form.package.details(),
            price: self.quote.as_ref().map_or(0.0, |q| q.total),
            assigned_driver: None,
        };

        match self.services.orders.create(input).await {
            Ok(order) => {
                tracing::info!(order_id = %order.id, tracking = %order.tracking_number, "order booked");
                self.notices.success("Order created successfully!");
                Ok(order)
            }
            Err(e) => {
                self.notices.error("Failed to create order");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OrderStatus;

    fn wizard() -> (BookingWizard, Notices) {
        let notices = Notices::new();
        (BookingWizard::new(Services::immediate().unwrap(), notices.clone()), notices)
    }

    fn fill_customer(form: &mut BookingForm) {
        form.customer_name = "Noah Brooks".into();
        form.customer_phone = "(415) 555-0199".into();
    }

    fn fill_addresses(form: &mut BookingForm) {
        form.pickup_address.street = "1 Market St".into();
        form.delivery_address.street = "200 Mission St".into();
    }

    #[test]
    fn form_defaults_to_local_addresses_and_general_package() {
        let form = BookingForm::default();
        assert_eq!(form.pickup_address.city, "San Francisco");
        assert_eq!(form.delivery_address.state, "CA");
        assert_eq!(form.package.kind, "general");
        assert!(PACKAGE_TYPES.iter().any(|(value, _)| *value == form.package.kind));
    }

    #[test]
    fn each_step_reports_its_missing_fields() {
        let form = BookingForm::default();

        let customer = validate_step(BookingStep::Customer, &form);
        assert_eq!(customer.get("customerName"), Some(&"Name is required"));
        assert_eq!(customer.get("customerPhone"), Some(&"Phone is required"));

        let addresses = validate_step(BookingStep::Addresses, &form);
        assert_eq!(addresses.get("pickupStreet"), Some(&"Pickup address is required"));
        assert_eq!(addresses.get("deliveryStreet"), Some(&"Delivery address is required"));

        let mut form = form;
        form.package.kind.clear();
        let package = validate_step(BookingStep::Package, &form);
        assert_eq!(package.get("weight"), Some(&"Weight is required"));
        assert_eq!(package.get("type"), Some(&"Package type is required"));

        assert!(validate_step(BookingStep::Review, &form).is_empty());
    }

    #[test]
    fn non_numeric_weight_is_rejected() {
        let mut form = BookingForm::default();
        form.package.weight = "heavy".into();
        let errors = validate_step(BookingStep::Package, &form);
        assert_eq!(errors.get("weight"), Some(&"Weight must be a positive number"));
    }

    #[test]
    fn lenient_parse_falls_back_to_zero() {
        assert_eq!(parse_lenient(""), 0.0);
        assert_eq!(parse_lenient("abc"), 0.0);
        assert_eq!(parse_lenient(" 12.5 "), 12.5);
    }

    #[tokio::test]
    async fn invalid_step_does_not_advance() {
        let (mut wizard, _) = wizard();
        assert!(!wizard.next().await);
        assert_eq!(wizard.step(), BookingStep::Customer);
        assert_eq!(wizard.errors().len(), 2);
    }

    #[tokio::test]
    async fn previous_never_goes_below_first_step() {
        let (mut wizard, _) = wizard();
        wizard.previous();
        assert_eq!(wizard.step().number(), 1);

        fill_customer(&mut wizard.form);
        assert!(wizard.next().await);
        wizard.previous();
        wizard.previous();
        assert_eq!(wizard.step(), BookingStep::Customer);
    }

    #[tokio::test]
    async fn full_booking_uses_the_quoted_total() {
        let (mut wizard, notices) = wizard();
        fill_customer(&mut wizard.form);
        assert!(wizard.next().await);
        fill_addresses(&mut wizard.form);
        assert!(wizard.next().await);

        wizard.form.package.weight = "2".into();
        wizard.form.package.urgent = true;
        wizard.form.package.value = "not a number".into();
        assert!(wizard.next().await);
        assert_eq!(wizard.step(), BookingStep::Review);
        assert_eq!(wizard.quote().unwrap().total, 33.25);

        let order = wizard.submit().await.unwrap();
        assert_eq!(order.price, 33.25);
        assert_eq!(order.package_details.value, 0.0);
        assert_eq!(order.package_details.weight, 2.0);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(notices.drain().last().unwrap().message, "Order created successfully!");
    }

    #[tokio::test]
    async fn submitting_early_is_rejected() {
        let (mut wizard, _) = wizard();
        let err = wizard.submit().await.unwrap_err();
        assert!(matches!(err, CourierError::Validation(_)));
    }
}
