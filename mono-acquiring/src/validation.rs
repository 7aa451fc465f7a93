//! Local request validation.
//!
//! Request types implement [`Validate`] by listing their field rules against a
//! [`Validator`]. Rules for a single field run in order and stop at the first failure;
//! all fields of the whole object graph are always visited, so a failing request reports
//! every offending field at once.
//!
//! Paths start at the type name and follow Rust field names, with `[index]` for
//! collection elements: `InvoiceCreateRequest.merchant_paym_info.basket_order[0].name`.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// A single violated rule.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Constraint {
    /// The value is zero, empty or absent.
    Required,
    /// The string is longer than the given number of characters.
    MaxLen(usize),
    /// The number is below the given minimum.
    Min(f64),
    /// The string is not an absolute `http`/`https` URL.
    HttpUrl,
    /// The string is not an email address.
    Email,
    /// The string is not a `MMYY` card expiry.
    CardExp,
    /// The number is not an ISO 4217 numeric currency code.
    Iso4217Numeric,
}

impl Constraint {
    /// Returns the short tag naming the rule.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::MaxLen(_) => "max",
            Self::Min(_) => "min",
            Self::HttpUrl => "http_url",
            Self::Email => "email",
            Self::CardExp => "card_exp",
            Self::Iso4217Numeric => "iso4217_numeric",
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxLen(max) => write!(f, "max={max}"),
            Self::Min(min) => write!(f, "min={min}"),
            other => f.write_str(other.tag()),
        }
    }
}

/// A violated rule together with the path of the offending field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    /// Dotted/indexed path of the field.
    pub path: String,
    /// The rule it violates.
    pub constraint: Constraint,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.constraint)
    }
}

/// The complete, non-empty set of violations found in a request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("request validation failed: {}", join(.0))]
pub struct ValidationErrors(Vec<FieldError>);

fn join(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    /// Returns the violations in the order fields were checked.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Returns the number of violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; an empty set is never constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the constraint violated at `path`, if any.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Constraint> {
        self.0
            .iter()
            .find(|error| error.path == path)
            .map(|error| &error.constraint)
    }

    /// Consumes the set, returning the violations.
    #[must_use]
    pub fn into_vec(self) -> Vec<FieldError> {
        self.0
    }
}

/// Types whose values can be checked before being sent.
pub trait Validate {
    /// Root of the paths reported for this type.
    const NAME: &'static str;

    /// Declares the rules of every field.
    fn validate_fields(&self, validator: &mut Validator<'_>);

    /// Runs all rules and collects every violation.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] if at least one rule fails.
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();
        let mut validator = Validator {
            path: Self::NAME.to_owned(),
            errors: &mut errors,
        };
        self.validate_fields(&mut validator);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }
}

/// Collects violations for one object, tracking the path from the root.
#[derive(Debug)]
pub struct Validator<'a> {
    path: String,
    errors: &'a mut Vec<FieldError>,
}

impl Validator<'_> {
    fn child(&self, field: &str) -> String {
        format!("{}.{field}", self.path)
    }

    /// Starts the rule chain of a scalar field.
    pub fn field(&mut self, name: &str) -> FieldCheck<'_> {
        FieldCheck {
            path: self.child(name),
            errors: &mut *self.errors,
            failed: false,
        }
    }

    /// Validates a nested object under `name`.
    pub fn nested<T: Validate + ?Sized>(&mut self, name: &str, value: &T) {
        let mut child = Validator {
            path: self.child(name),
            errors: &mut *self.errors,
        };
        value.validate_fields(&mut child);
    }

    /// Validates every element of a collection of objects.
    pub fn dive<T: Validate>(&mut self, name: &str, items: &[T]) {
        for (index, item) in items.iter().enumerate() {
            let mut child = Validator {
                path: format!("{}.{name}[{index}]", self.path),
                errors: &mut *self.errors,
            };
            item.validate_fields(&mut child);
        }
    }

    /// Applies scalar rules to every element of a collection.
    pub fn dive_each<T, F>(&mut self, name: &str, items: &[T], mut rules: F)
    where
        F: FnMut(FieldCheck<'_>, &T),
    {
        for (index, item) in items.iter().enumerate() {
            let check = FieldCheck {
                path: format!("{}.{name}[{index}]", self.path),
                errors: &mut *self.errors,
                failed: false,
            };
            rules(check, item);
        }
    }
}

/// Rule chain of a single field; the first failing rule is recorded, later ones are skipped.
///
/// Format rules check the value they are given, empty or zero included. Optional fields
/// are checked only when present.
#[derive(Debug)]
pub struct FieldCheck<'v> {
    path: String,
    errors: &'v mut Vec<FieldError>,
    failed: bool,
}

impl FieldCheck<'_> {
    fn rule(mut self, ok: bool, constraint: Constraint) -> Self {
        if !self.failed && !ok {
            self.errors.push(FieldError {
                path: self.path.clone(),
                constraint,
            });
            self.failed = true;
        }
        self
    }

    /// The value must be non-zero, non-empty or present.
    pub fn required<T: Required + ?Sized>(self, value: &T) -> Self {
        self.rule(value.is_present(), Constraint::Required)
    }

    /// The string must have at most `max` characters.
    pub fn max_len(self, value: &str, max: usize) -> Self {
        self.rule(value.chars().count() <= max, Constraint::MaxLen(max))
    }

    /// The number must be at least `min`.
    pub fn min(self, value: f64, min: f64) -> Self {
        self.rule(value >= min, Constraint::Min(min))
    }

    /// The string must be an absolute `http`/`https` URL with a host.
    pub fn http_url(self, value: &str) -> Self {
        self.rule(is_http_url(value), Constraint::HttpUrl)
    }

    /// The string must be an email address.
    pub fn email(self, value: &str) -> Self {
        self.rule(EMAIL.is_match(value), Constraint::Email)
    }

    /// The string must be `MMYY` with a month in `01..=12`.
    pub fn card_exp(self, value: &str) -> Self {
        self.rule(is_card_exp(value), Constraint::CardExp)
    }

    /// The code must be an ISO 4217 numeric currency code.
    pub fn iso4217_numeric(self, value: u16) -> Self {
        self.rule(
            ISO4217_NUMERIC.binary_search(&value).is_ok(),
            Constraint::Iso4217Numeric,
        )
    }
}

/// Presence test behind [`FieldCheck::required`].
pub trait Required {
    /// Returns `true` unless the value is zero, empty or absent.
    fn is_present(&self) -> bool;
}

impl Required for str {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl Required for String {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> Required for Option<T> {
    fn is_present(&self) -> bool {
        self.is_some()
    }
}

impl<T> Required for Vec<T> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl Required for f64 {
    fn is_present(&self) -> bool {
        *self != 0.0
    }
}

macro_rules! required_int {
    ($($ty:ty),*) => {
        $(impl Required for $ty {
            fn is_present(&self) -> bool {
                *self != 0
            }
        })*
    };
}

required_int!(u16, u32, u64, i32, i64);

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("Invalid email pattern")
});

fn is_http_url(value: &str) -> bool {
    Url::parse(value).is_ok_and(|url| {
        matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|host| !host.is_empty())
    })
}

fn is_card_exp(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 4 || !bytes.iter().all(u8::is_ascii_digit) {
        return false;
    }
    let month = (bytes[0] - b'0') * 10 + (bytes[1] - b'0');
    (1..=12).contains(&month)
}

/// Active ISO 4217 numeric codes, sorted.
const ISO4217_NUMERIC: &[u16] = &[
    8, 12, 32, 36, 44, 48, 50, 51, 52, 60, 64, 68, 72, 84, 90, 96, 104, 108, 116, 124, 132, 136,
    144, 152, 156, 170, 174, 188, 191, 192, 203, 208, 214, 222, 230, 232, 238, 242, 262, 270, 292,
    320, 324, 328, 332, 340, 344, 348, 352, 356, 360, 364, 368, 376, 388, 392, 398, 400, 404, 408,
    410, 414, 417, 418, 422, 426, 430, 434, 446, 454, 458, 462, 480, 484, 496, 498, 504, 512, 516,
    524, 532, 533, 548, 554, 558, 566, 578, 586, 590, 598, 600, 604, 608, 634, 643, 646, 654, 682,
    690, 694, 702, 704, 706, 710, 728, 748, 752, 756, 760, 764, 776, 780, 784, 788, 800, 807, 818,
    826, 834, 840, 858, 860, 882, 886, 901, 924, 925, 926, 927, 928, 929, 930, 931, 932, 933, 934,
    936, 938, 940, 941, 943, 944, 946, 947, 948, 949, 950, 951, 952, 953, 955, 956, 957, 958, 959,
    960, 961, 962, 963, 964, 965, 967, 968, 969, 970, 971, 972, 973, 975, 976, 977, 978, 979, 980,
    981, 984, 985, 986, 990, 994, 997, 999,
];

#[cfg(test)]
mod tests {
    use super::*;

    struct Item {
        name: String,
        qty: f64,
    }

    impl Validate for Item {
        const NAME: &'static str = "Item";

        fn validate_fields(&self, v: &mut Validator<'_>) {
            v.field("name").required(&self.name).max_len(&self.name, 5);
            v.field("qty").required(&self.qty).min(self.qty, 0.01);
        }
    }

    struct Order {
        email: String,
        ccy: u16,
        items: Vec<Item>,
        cc: Vec<String>,
        inner: Option<Item>,
    }

    impl Validate for Order {
        const NAME: &'static str = "Order";

        fn validate_fields(&self, v: &mut Validator<'_>) {
            v.field("email").email(&self.email);
            v.field("ccy").required(&self.ccy).iso4217_numeric(self.ccy);
            v.dive("items", &self.items);
            v.dive_each("cc", &self.cc, |check, email| {
                check.email(email);
            });
            if let Some(inner) = &self.inner {
                v.nested("inner", inner);
            }
        }
    }

    fn item(name: &str, qty: f64) -> Item {
        Item {
            name: name.to_owned(),
            qty,
        }
    }

    #[test]
    fn test_valid_object_passes() {
        let order = Order {
            email: "a@example.com".into(),
            ccy: 980,
            items: vec![item("tea", 1.0)],
            cc: vec!["b@example.com".into()],
            inner: Some(item("cup", 2.0)),
        };
        assert!(order.validate().is_ok());
    }

    #[test]
    fn test_collects_all_fields_with_paths() {
        let order = Order {
            email: "nope".into(),
            ccy: 0,
            items: vec![item("tea", 1.0), item("", -1.0)],
            cc: vec!["ok@example.com".into(), "broken".into()],
            inner: Some(item("toolong", 0.001)),
        };
        let errors = order.validate().unwrap_err();
        let rendered: Vec<String> = errors.errors().iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            [
                "Order.email: email",
                "Order.ccy: required",
                "Order.items[1].name: required",
                "Order.items[1].qty: min=0.01",
                "Order.cc[1]: email",
                "Order.inner.name: max=5",
                "Order.inner.qty: min=0.01",
            ]
        );
    }

    #[test]
    fn test_first_failing_rule_wins() {
        let errors = item("", 0.0).validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("Item.name"), Some(&Constraint::Required));
        assert_eq!(errors.get("Item.qty"), Some(&Constraint::Required));
    }

    #[test]
    fn test_max_len_counts_characters() {
        assert!(item("їжачо", 1.0).validate().is_ok());
        assert!(item("їжачок", 1.0).validate().is_err());
    }

    #[test]
    fn test_card_exp() {
        for ok in ["0125", "1299", "0600"] {
            assert!(is_card_exp(ok), "{ok}");
        }
        for bad in ["1325", "0025", "125", "01255", "ab25", "12/5"] {
            assert!(!is_card_exp(bad), "{bad}");
        }
    }

    #[test]
    fn test_http_url() {
        assert!(is_http_url("https://example.com/redirect"));
        assert!(is_http_url("http://localhost:8080"));
        assert!(!is_http_url("ftp://example.com"));
        assert!(!is_http_url("example.com"));
        assert!(!is_http_url("mailto:a@example.com"));
    }

    #[test]
    fn test_iso4217_table_is_sorted() {
        assert!(ISO4217_NUMERIC.windows(2).all(|pair| pair[0] < pair[1]));
        for code in [980, 840, 978, 985, 826] {
            assert!(ISO4217_NUMERIC.binary_search(&code).is_ok(), "{code}");
        }
        assert!(ISO4217_NUMERIC.binary_search(&123).is_err());
    }

    #[test]
    fn test_format_rules_reject_empty_and_zero() {
        let order = Order {
            email: String::new(),
            ccy: 980,
            items: Vec::new(),
            cc: vec![String::new()],
            inner: None,
        };
        let errors = order.validate().unwrap_err();
        assert_eq!(errors.get("Order.email"), Some(&Constraint::Email));
        assert_eq!(errors.get("Order.cc[0]"), Some(&Constraint::Email));

        let mut errors = Vec::new();
        let mut v = Validator {
            path: "T".to_owned(),
            errors: &mut errors,
        };
        v.field("url").http_url("");
        v.field("ccy").iso4217_numeric(0);
        v.field("exp").card_exp("");
        let constraints: Vec<Constraint> = errors.into_iter().map(|error| error.constraint).collect();
        assert_eq!(
            constraints,
            [Constraint::HttpUrl, Constraint::Iso4217Numeric, Constraint::CardExp]
        );
    }

    #[test]
    fn test_display_lists_violations() {
        let errors = item("", 1.0).validate().unwrap_err();
        assert_eq!(errors.to_string(), "request validation failed: Item.name: required");
    }
}
