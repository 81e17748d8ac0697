//! Payment method entity family.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use tesoro_core::{Entity, PaymentMethodId};

/// Discriminator for payment method variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethodKind {
    /// Bank transfer (routing/account number).
    Bank,
    /// Payment card.
    Card,
}

impl PaymentMethodKind {
    /// Returns the discriminator value as stored in the `kind` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bank => "bank",
            Self::Card => "card",
        }
    }
}

impl Display for PaymentMethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bank-transfer payment details.
///
/// All fields are optional strings; any value, including none, is accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankPaymentMethod {
    /// Bank routing number.
    pub routing_number: Option<String>,

    /// Bank account number.
    pub account_number: Option<String>,

    /// Account holder name.
    pub name: Option<String>,
}

/// Payment card details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPaymentMethod {
    /// Card number.
    pub card_number: Option<String>,

    /// Expiry, `MM/YY`.
    pub expiry: Option<String>,

    /// Card holder name.
    pub name: Option<String>,
}

/// Variant-specific payment method data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PaymentMethodDetails {
    Bank(BankPaymentMethod),
    Card(CardPaymentMethod),
}

impl PaymentMethodDetails {
    /// Returns the discriminator for this variant.
    #[must_use]
    pub const fn kind(&self) -> PaymentMethodKind {
        match self {
            Self::Bank(_) => PaymentMethodKind::Bank,
            Self::Card(_) => PaymentMethodKind::Card,
        }
    }
}

/// A stored payment method: identifier, timestamps, and variant data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    /// Unique identifier.
    pub id: PaymentMethodId,

    /// Variant-specific data; the discriminator derives from this.
    #[serde(flatten)]
    pub details: PaymentMethodDetails,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl PaymentMethod {
    /// Creates a new payment method with a fresh identifier.
    #[must_use]
    pub fn new(details: PaymentMethodDetails) -> Self {
        let now = Utc::now();
        Self {
            id: PaymentMethodId::new(),
            details,
            created_at: now,
            updated_at: now,
        }
    }

    /// Creates a new bank-transfer payment method.
    #[must_use]
    pub fn bank(bank: BankPaymentMethod) -> Self {
        Self::new(PaymentMethodDetails::Bank(bank))
    }

    /// Creates a new card payment method.
    #[must_use]
    pub fn card(card: CardPaymentMethod) -> Self {
        Self::new(PaymentMethodDetails::Card(card))
    }

    /// Returns the discriminator for this payment method.
    #[must_use]
    pub const fn kind(&self) -> PaymentMethodKind {
        self.details.kind()
    }

    /// Returns the bank details, if this is a bank-transfer method.
    #[must_use]
    pub const fn as_bank(&self) -> Option<&BankPaymentMethod> {
        match &self.details {
            PaymentMethodDetails::Bank(bank) => Some(bank),
            PaymentMethodDetails::Card(_) => None,
        }
    }

    /// Returns the card details, if this is a card method.
    #[must_use]
    pub const fn as_card(&self) -> Option<&CardPaymentMethod> {
        match &self.details {
            PaymentMethodDetails::Card(card) => Some(card),
            PaymentMethodDetails::Bank(_) => None,
        }
    }

    /// Returns the holder name, whichever variant carries it.
    #[must_use]
    pub fn holder_name(&self) -> Option<&str> {
        match &self.details {
            PaymentMethodDetails::Bank(bank) => bank.name.as_deref(),
            PaymentMethodDetails::Card(card) => card.name.as_deref(),
        }
    }
}

impl Entity for PaymentMethod {
    type Id = PaymentMethodId;

    fn table_name() -> &'static str {
        "payment_methods"
    }

    fn id_column() -> &'static str {
        "id"
    }

    fn columns() -> &'static [&'static str] {
        &[
            "id",
            "kind",
            "routing_number",
            "account_number",
            "card_number",
            "expiry",
            "holder_name",
            "created_at",
            "updated_at",
        ]
    }

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
