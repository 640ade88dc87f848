//! Identity and account records returned by `authorization.json`.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Product tag of the accounts returned when no filter is given.
pub const DEFAULT_PRODUCT: &str = "bcx";

/// The authenticated user's profile, distinct from any per-account person id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One account the authenticated identity can access.
///
/// Any JSON object decodes: a known key whose value has an unexpected
/// shape stays in `extra` under its own name, and missing keys default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct AccountReference {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// API base URL of the account; feed it to a resource client.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub href: String,
    /// Product tag, e.g. `bcx` or `bc3`. Empty when the provider sent none.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub product: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<Map<String, Value>> for AccountReference {
    fn from(mut extra: Map<String, Value>) -> Self {
        let id = take(&mut extra, "id", Value::as_u64);
        let name = take(&mut extra, "name", |v| v.as_str().map(str::to_string));
        let href = take(&mut extra, "href", |v| v.as_str().map(str::to_string));
        let product = take(&mut extra, "product", |v| v.as_str().map(str::to_string));

        Self {
            id,
            name: name.unwrap_or_default(),
            href: href.unwrap_or_default(),
            product: product.unwrap_or_default(),
            extra,
        }
    }
}

/// Remove `key` from `map` if `convert` accepts its value.
fn take<T>(map: &mut Map<String, Value>, key: &str, convert: impl Fn(&Value) -> Option<T>) -> Option<T> {
    let value = map.get(key).and_then(convert)?;
    map.remove(key);
    Some(value)
}

/// The full body of `authorization.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Authorization {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<FixedOffset>>,
    pub identity: Identity,
    #[serde(default)]
    pub accounts: Vec<AccountReference>,
}

/// Which accounts to keep when listing the accounts of an identity.
///
/// Parses from the provider's product strings, with `"all"` meaning no
/// filtering at all. Matching is case-sensitive.
///
/// # Example
///
/// ```
/// use basecamp_core::AccountType;
///
/// assert_eq!("all".parse::<AccountType>().unwrap(), AccountType::All);
/// assert_eq!(AccountType::default(), AccountType::Product("bcx".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AccountType {
    /// Every account regardless of product.
    All,
    /// Only accounts whose `product` equals this tag exactly.
    Product(String),
}

impl AccountType {
    /// Returns true if the account passes this filter.
    pub fn matches(&self, account: &AccountReference) -> bool {
        match self {
            AccountType::All => true,
            AccountType::Product(product) => account.product == *product,
        }
    }

    /// Keep the matching accounts, preserving their order.
    pub fn filter(&self, accounts: Vec<AccountReference>) -> Vec<AccountReference> {
        accounts.into_iter().filter(|a| self.matches(a)).collect()
    }
}

impl Default for AccountType {
    fn default() -> Self {
        AccountType::Product(DEFAULT_PRODUCT.to_string())
    }
}

impl From<&str> for AccountType {
    fn from(s: &str) -> Self {
        match s {
            "all" => AccountType::All,
            product => AccountType::Product(product.to_string()),
        }
    }
}

impl FromStr for AccountType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountType::All => write!(f, "all"),
            AccountType::Product(product) => write!(f, "{}", product),
        }
    }
}
