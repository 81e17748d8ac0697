//! Flat payment method DTOs and their mappers.
//!
//! The DTO flattens the variant structure into one record with nullable
//! columns for every variant field, mirroring the storage layout.

use crate::{
    BankPaymentMethod, CardPaymentMethod, PaymentMethod, PaymentMethodDetails, PaymentMethodKind,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tesoro_core::{BiMapper, Mapper, PaymentMethodId};

/// Flat payment method DTO.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethodDto {
    pub id: PaymentMethodId,
    pub kind: PaymentMethodKind,
    pub routing_number: Option<String>,
    pub account_number: Option<String>,
    pub card_number: Option<String>,
    pub expiry: Option<String>,
    pub holder_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Maps between [`PaymentMethod`] and its flat DTO.
pub struct PaymentMethodDtoMapper;

impl Mapper<PaymentMethod, PaymentMethodDto> for PaymentMethodDtoMapper {
    fn map(from: PaymentMethod) -> PaymentMethodDto {
        let kind = from.kind();
        let (routing_number, account_number, card_number, expiry, holder_name) = match from.details
        {
            PaymentMethodDetails::Bank(bank) => {
                (bank.routing_number, bank.account_number, None, None, bank.name)
            }
            PaymentMethodDetails::Card(card) => {
                (None, None, card.card_number, card.expiry, card.name)
            }
        };

        PaymentMethodDto {
            id: from.id,
            kind,
            routing_number,
            account_number,
            card_number,
            expiry,
            holder_name,
            created_at: from.created_at,
            updated_at: from.updated_at,
        }
    }
}

impl BiMapper<PaymentMethod, PaymentMethodDto> for PaymentMethodDtoMapper {
    fn map_back(from: PaymentMethodDto) -> PaymentMethod {
        let details = match from.kind {
            PaymentMethodKind::Bank => PaymentMethodDetails::Bank(BankPaymentMethod {
                routing_number: from.routing_number,
                account_number: from.account_number,
                name: from.holder_name,
            }),
            PaymentMethodKind::Card => PaymentMethodDetails::Card(CardPaymentMethod {
                card_number: from.card_number,
                expiry: from.expiry,
                name: from.holder_name,
            }),
        };

        PaymentMethod {
            id: from.id,
            details,
            created_at: from.created_at,
            updated_at: from.updated_at,
        }
    }
}
