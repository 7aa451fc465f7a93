//! Closed string enumerations of the acquiring API.
//!
//! Each enum serializes to its wire string, parses back with [`FromStr`], and lists its
//! variants in `ALL`. Request-side enums make one-of membership a property of the type;
//! response-side fields holding them are `Option`s decoded with `DefaultOnError`, so an
//! explicit `null` or a value not listed here decodes to `None`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing a string that is not a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {type_name} value {value:?}")]
pub struct UnknownVariant {
    /// Name of the enum being parsed.
    pub type_name: &'static str,
    /// The rejected input.
    pub value: String,
}

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[non_exhaustive]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Returns the wire string.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    _ => Err(UnknownVariant {
                        type_name: stringify!($name),
                        value: s.to_owned(),
                    }),
                }
            }
        }
    };
}

string_enum! {
    /// Whether funds are captured immediately or only held.
    PaymentType {
        /// Immediate capture.
        Debit => "debit",
        /// Authorization only; capture later with a finalize call.
        Hold => "hold",
    }
}

impl Default for PaymentType {
    fn default() -> Self {
        Self::Debit
    }
}

string_enum! {
    /// How the payment page is displayed.
    DisplayType {
        /// Embedded in an iframe.
        Iframe => "iframe",
    }
}

string_enum! {
    /// Direction of a discount.
    DiscountType {
        /// Reduces the price.
        Discount => "DISCOUNT",
        /// Increases the price.
        ExtraCharge => "EXTRA_CHARGE",
    }
}

string_enum! {
    /// How a discount value is interpreted.
    DiscountMode {
        /// Value is a percentage.
        Percent => "PERCENT",
        /// Value is an absolute amount.
        Value => "VALUE",
    }
}

string_enum! {
    /// Kind of card number passed to a synchronous payment.
    CardType {
        /// Funding PAN.
        Fpan => "FPAN",
        /// Device (tokenized) PAN.
        Dpan => "DPAN",
    }
}

string_enum! {
    /// Party that initiated a payment.
    InitiationKind {
        /// The cardholder.
        Client => "client",
        /// The merchant (e.g. a recurring charge).
        Merchant => "merchant",
    }
}

string_enum! {
    /// Lifecycle state of an invoice.
    InvoiceStatus {
        /// Created, not yet paid.
        Created => "created",
        /// Payment in progress.
        Processing => "processing",
        /// Funds held, awaiting finalization.
        Hold => "hold",
        /// Paid.
        Success => "success",
        /// Payment failed.
        Failure => "failure",
        /// Refunded.
        Reversed => "reversed",
        /// Expired unpaid.
        Expired => "expired",
    }
}

string_enum! {
    /// State of a cancellation (refund) operation.
    CancelStatus {
        /// In progress.
        Processing => "processing",
        /// Completed.
        Success => "success",
        /// Failed.
        Failure => "failure",
    }
}

string_enum! {
    /// State of a direct or token payment.
    PaymentStatus {
        /// In progress (possibly awaiting 3-D Secure).
        Processing => "processing",
        /// Completed.
        Success => "success",
        /// Failed.
        Failure => "failure",
    }
}

string_enum! {
    /// Outcome of a hold finalization.
    HoldFinalizationStatus {
        /// Hold captured.
        Success => "success",
    }
}

string_enum! {
    /// State of card tokenization.
    WalletStatus {
        /// Requested.
        New => "new",
        /// Token issued.
        Created => "created",
        /// Tokenization failed.
        Failed => "failed",
    }
}

string_enum! {
    /// Card network.
    PaymentSystem {
        /// Mastercard.
        Mastercard => "mastercard",
        /// Visa.
        Visa => "visa",
    }
}

string_enum! {
    /// Means by which a payment was made.
    PaymentMethod {
        /// Card number entry.
        Pan => "pan",
        /// Apple Pay.
        Apple => "apple",
        /// Google Pay.
        Google => "google",
        /// monobank app.
        Monobank => "monobank",
        /// Saved card token.
        Wallet => "wallet",
        /// Direct card payment.
        Direct => "direct",
    }
}

string_enum! {
    /// Who sets the amount of a QR register payment.
    QrAmountType {
        /// Set by the merchant.
        Merchant => "merchant",
        /// Entered by the client.
        Client => "client",
        /// Fixed.
        Fix => "fix",
    }
}

string_enum! {
    /// Processing state of a fiscal check.
    FiscalCheckStatus {
        /// Queued.
        New => "new",
        /// Being fiscalized.
        Process => "process",
        /// Fiscalized.
        Done => "done",
        /// Fiscalization failed.
        Failed => "failed",
    }
}

string_enum! {
    /// Kind of fiscal check.
    FiscalCheckType {
        /// Sale receipt.
        Sale => "sale",
        /// Return receipt.
        Return => "return",
    }
}

string_enum! {
    /// Fiscalization provider.
    FiscalCheckSource {
        /// Checkbox.
        CheckBox => "checkbox",
        /// monopay.
        MonoPay => "monopay",
        /// Vchasno.Kasa.
        VchasnoKasa => "vchasnokasa",
    }
}

string_enum! {
    /// State of a statement entry.
    StatementStatus {
        /// Funds held.
        Hold => "hold",
        /// In progress.
        Processing => "processing",
        /// Completed.
        Success => "success",
        /// Failed.
        Failure => "failure",
    }
}

string_enum! {
    /// Installment scheme of a statement entry.
    PaymentScheme {
        /// Buy now, pay in 30 days.
        BnplLater30 => "bnpl_later_30",
        /// Buy now, pay in 4 parts.
        BnplParts4 => "bnpl_parts_4",
        /// Paid in full.
        Full => "full",
    }
}
