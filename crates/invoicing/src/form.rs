//! Invoice form validation.
//!
//! Forms arrive as untyped string maps. `InvoiceForm::validate` turns them
//! into either a fully typed `ValidInvoiceForm` or a field-keyed error map.
//! Every field is checked so the caller can show all problems at once.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use dashboard_core::{Amount, CustomerId};

use crate::invoice::{InvoiceChanges, InvoiceStatus, NewInvoice};

/// Client-supplied invoice form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceField {
    CustomerId,
    Amount,
    Status,
}

impl InvoiceField {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceField::CustomerId => "customer_id",
            InvoiceField::Amount => "amount",
            InvoiceField::Status => "status",
        }
    }
}

const CUSTOMER_REQUIRED: &str = "Please select a customer.";
const STATUS_REQUIRED: &str = "Please select an invoice status.";

/// Field name -> human-readable messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<InvoiceField, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: InvoiceField, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn get(&self, field: InvoiceField) -> &[String] {
        self.0.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, field: InvoiceField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = InvoiceField> + '_ {
        self.0.keys().copied()
    }
}

/// What a form gets back when a submission is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormState {
    pub message: String,
    pub errors: FieldErrors,
}

/// Raw form submission. Unknown keys (including `id` and `date`) are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceForm {
    pub customer_id: Option<String>,
    pub amount: Option<String>,
    pub status: Option<String>,
}

impl InvoiceForm {
    pub fn from_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut form = Self::default();
        for (key, value) in fields {
            match key.as_ref() {
                "customer_id" | "customerId" => form.customer_id = Some(value.into()),
                "amount" => form.amount = Some(value.into()),
                "status" => form.status = Some(value.into()),
                _ => {}
            }
        }
        form
    }

    /// Validate every field, collecting all failures.
    pub fn validate(&self) -> Result<ValidInvoiceForm, FieldErrors> {
        let mut errors = FieldErrors::new();

        let customer_id = match self.customer_id.as_deref().map(|raw| CustomerId::parse(raw)) {
            Some(Ok(id)) => Some(id),
            _ => {
                errors.push(InvoiceField::CustomerId, CUSTOMER_REQUIRED);
                None
            }
        };

        // A missing field coerces like an empty one: to zero.
        let amount = match Amount::parse_major(self.amount.as_deref().unwrap_or("")) {
            Ok(amount) => Some(amount),
            Err(e) => {
                errors.push(InvoiceField::Amount, e.to_string());
                None
            }
        };

        let status = match self.status.as_deref().map(str::parse::<InvoiceStatus>) {
            Some(Ok(status)) => Some(status),
            _ => {
                errors.push(InvoiceField::Status, STATUS_REQUIRED);
                None
            }
        };

        match (customer_id, amount, status) {
            (Some(customer_id), Some(amount), Some(status)) => Ok(ValidInvoiceForm {
                customer_id,
                amount,
                status,
            }),
            _ => Err(errors),
        }
    }
}

/// A form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidInvoiceForm {
    pub customer_id: CustomerId,
    pub amount: Amount,
    pub status: InvoiceStatus,
}

impl ValidInvoiceForm {
    pub fn into_new_invoice(self, date: NaiveDate) -> NewInvoice {
        NewInvoice {
            customer_id: self.customer_id,
            amount: self.amount,
            date,
            status: self.status,
        }
    }

    pub fn into_changes(self) -> InvoiceChanges {
        InvoiceChanges {
            customer_id: self.customer_id,
            amount: self.amount,
            status: self.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn form(customer_id: &str, amount: &str, status: &str) -> InvoiceForm {
        InvoiceForm::from_fields([
            ("customer_id", customer_id),
            ("amount", amount),
            ("status", status),
        ])
    }

    #[test]
    fn valid_form_is_typed() {
        let valid = form("c1", "45.50", "pending").validate().unwrap();
        assert_eq!(valid.customer_id.as_str(), "c1");
        assert_eq!(valid.amount.minor_units(), 4550);
        assert_eq!(valid.status, InvoiceStatus::Pending);
    }

    #[test]
    fn server_side_fields_are_ignored() {
        let form = InvoiceForm::from_fields([
            ("id", "forged"),
            ("date", "1999-01-01"),
            ("customer_id", "c1"),
            ("amount", "1"),
            ("status", "paid"),
        ]);
        assert!(form.validate().is_ok());
    }

    #[test]
    fn browser_field_name_is_accepted() {
        let form = InvoiceForm::from_fields([("customerId", "c9"), ("amount", "1"), ("status", "paid")]);
        assert_eq!(form.customer_id.as_deref(), Some("c9"));
    }

    #[test]
    fn empty_form_reports_every_field() {
        let errors = InvoiceForm::default().validate().unwrap_err();
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec![InvoiceField::CustomerId, InvoiceField::Amount, InvoiceField::Status]
        );
        assert_eq!(errors.get(InvoiceField::CustomerId), ["Please select a customer."]);
        assert_eq!(
            errors.get(InvoiceField::Amount),
            ["Please enter an amount greater than $0."]
        );
        assert_eq!(errors.get(InvoiceField::Status), ["Please select an invoice status."]);
    }

    #[test]
    fn non_numeric_amount_has_its_own_message() {
        let errors = form("c1", "twelve", "paid").validate().unwrap_err();
        assert_eq!(errors.get(InvoiceField::Amount), ["Please enter a valid amount."]);
        assert!(!errors.contains(InvoiceField::CustomerId));
        assert!(!errors.contains(InvoiceField::Status));
    }

    #[test]
    fn unknown_status_is_rejected() {
        let errors = form("c1", "10", "overdue").validate().unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![InvoiceField::Status]);
    }

    proptest! {
        #[test]
        fn missing_customer_always_fails(
            amount in "[0-9]{1,6}(\\.[0-9]{1,2})?",
            paid in any::<bool>(),
        ) {
            let status = if paid { "paid" } else { "pending" };
            let form = InvoiceForm::from_fields([("amount", amount.as_str()), ("status", status)]);
            let errors = form.validate().unwrap_err();
            prop_assert!(errors.contains(InvoiceField::CustomerId));
        }

        #[test]
        fn non_positive_amount_fails_on_amount(value in -100_000i64..=0i64) {
            let errors = form("c1", &value.to_string(), "paid").validate().unwrap_err();
            prop_assert_eq!(
                errors.get(InvoiceField::Amount),
                ["Please enter an amount greater than $0.".to_string()]
            );
        }
    }
}
