//! Event types and tracking data.

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Wire name of the page view event.
pub const PAGE_VIEW: &str = "PageView";

/// Standard event catalog understood by the receiving pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StandardEvent {
    AddPaymentInfo,
    AddToCart,
    AddToWishlist,
    CompleteRegistration,
    Contact,
    CustomizeProduct,
    Donate,
    FindLocation,
    InitiateCheckout,
    Lead,
    Purchase,
    Schedule,
    Search,
    StartTrial,
    SubmitApplication,
    Subscribe,
    ViewContent,
}

impl StandardEvent {
    /// Every standard event, in catalog order.
    pub const ALL: [StandardEvent; 17] = [
        StandardEvent::AddPaymentInfo,
        StandardEvent::AddToCart,
        StandardEvent::AddToWishlist,
        StandardEvent::CompleteRegistration,
        StandardEvent::Contact,
        StandardEvent::CustomizeProduct,
        StandardEvent::Donate,
        StandardEvent::FindLocation,
        StandardEvent::InitiateCheckout,
        StandardEvent::Lead,
        StandardEvent::Purchase,
        StandardEvent::Schedule,
        StandardEvent::Search,
        StandardEvent::StartTrial,
        StandardEvent::SubmitApplication,
        StandardEvent::Subscribe,
        StandardEvent::ViewContent,
    ];

    /// Name sent in the `ev` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            StandardEvent::AddPaymentInfo => "AddPaymentInfo",
            StandardEvent::AddToCart => "AddToCart",
            StandardEvent::AddToWishlist => "AddToWishlist",
            StandardEvent::CompleteRegistration => "CompleteRegistration",
            StandardEvent::Contact => "Contact",
            StandardEvent::CustomizeProduct => "CustomizeProduct",
            StandardEvent::Donate => "Donate",
            StandardEvent::FindLocation => "FindLocation",
            StandardEvent::InitiateCheckout => "InitiateCheckout",
            StandardEvent::Lead => "Lead",
            StandardEvent::Purchase => "Purchase",
            StandardEvent::Schedule => "Schedule",
            StandardEvent::Search => "Search",
            StandardEvent::StartTrial => "StartTrial",
            StandardEvent::SubmitApplication => "SubmitApplication",
            StandardEvent::Subscribe => "Subscribe",
            StandardEvent::ViewContent => "ViewContent",
        }
    }
}

impl fmt::Display for StandardEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expands to one `track_*` method per standard event, each forwarding to
/// `self.track(StandardEvent::..)` and returning `$ret`.
macro_rules! standard_event_methods {
    (@emit $ret:ty; $($variant:ident => $method:ident),* $(,)?) => {
        $(
            #[doc = concat!("Track the standard `", stringify!($variant), "` event.")]
            pub fn $method(&self) -> $ret {
                self.track($crate::types::StandardEvent::$variant)
            }
        )*
    };
    ($ret:ty) => {
        standard_event_methods!(@emit $ret;
            AddPaymentInfo => track_add_payment_info,
            AddToCart => track_add_to_cart,
            AddToWishlist => track_add_to_wishlist,
            CompleteRegistration => track_complete_registration,
            Contact => track_contact,
            CustomizeProduct => track_customize_product,
            Donate => track_donate,
            FindLocation => track_find_location,
            InitiateCheckout => track_initiate_checkout,
            Lead => track_lead,
            Purchase => track_purchase,
            Schedule => track_schedule,
            Search => track_search,
            StartTrial => track_start_trial,
            SubmitApplication => track_submit_application,
            Subscribe => track_subscribe,
            ViewContent => track_view_content,
        );
    };
}

// ============================================
// USER DATA
// ============================================

/// How a user data value is canonicalized before hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizationRule {
    /// Lowercase and trim.
    Default,
    /// Lowercase, trim, keep decimal digits only.
    DigitsOnly,
    /// Lowercase, trim, drop every whitespace character.
    NoWhitespace,
}

/// Identifying fields accepted by the pixel. Values are always hashed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserDataField {
    #[serde(rename = "em")]
    Email,
    #[serde(rename = "fn")]
    FirstName,
    #[serde(rename = "ln")]
    LastName,
    #[serde(rename = "ph")]
    Phone,
    #[serde(rename = "external_id")]
    ExternalId,
    #[serde(rename = "ge")]
    Gender,
    #[serde(rename = "db")]
    BirthDate,
    #[serde(rename = "ct")]
    City,
    #[serde(rename = "st")]
    State,
    #[serde(rename = "zp")]
    PostalCode,
    #[serde(rename = "country")]
    Country,
}

impl UserDataField {
    /// Key used inside `ud[...]`.
    pub fn key(&self) -> &'static str {
        match self {
            UserDataField::Email => "em",
            UserDataField::FirstName => "fn",
            UserDataField::LastName => "ln",
            UserDataField::Phone => "ph",
            UserDataField::ExternalId => "external_id",
            UserDataField::Gender => "ge",
            UserDataField::BirthDate => "db",
            UserDataField::City => "ct",
            UserDataField::State => "st",
            UserDataField::PostalCode => "zp",
            UserDataField::Country => "country",
        }
    }

    pub fn normalization(&self) -> NormalizationRule {
        match self {
            UserDataField::Phone | UserDataField::BirthDate | UserDataField::PostalCode => {
                NormalizationRule::DigitsOnly
            }
            UserDataField::City => NormalizationRule::NoWhitespace,
            _ => NormalizationRule::Default,
        }
    }
}

/// Gender values accepted in the `ge` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Female => "f",
            Gender::Male => "m",
        }
    }
}

/// Identifying data attached to an event, kept in insertion order.
///
/// Raw values live here only until the request is built; they are normalized
/// and hashed before anything leaves the process.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct UserData {
    fields: Vec<(UserDataField, String)>,
}

impl UserData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse user data from a JSON object such as `{"em": "a@b.com"}`.
    pub fn from_json(json: &str) -> Result<Self, crate::Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set a field, replacing any previous value in place.
    pub fn set(&mut self, field: UserDataField, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(f, _)| *f == field) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((field, value)),
        }
    }

    /// Builder form of [`UserData::set`].
    pub fn with(mut self, field: UserDataField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn email(self, value: impl Into<String>) -> Self {
        self.with(UserDataField::Email, value)
    }

    pub fn phone(self, value: impl Into<String>) -> Self {
        self.with(UserDataField::Phone, value)
    }

    pub fn first_name(self, value: impl Into<String>) -> Self {
        self.with(UserDataField::FirstName, value)
    }

    pub fn last_name(self, value: impl Into<String>) -> Self {
        self.with(UserDataField::LastName, value)
    }

    pub fn external_id(self, value: impl Into<String>) -> Self {
        self.with(UserDataField::ExternalId, value)
    }

    pub fn gender(self, gender: Gender) -> Self {
        self.with(UserDataField::Gender, gender.as_str())
    }

    pub fn birth_date(self, value: impl Into<String>) -> Self {
        self.with(UserDataField::BirthDate, value)
    }

    pub fn city(self, value: impl Into<String>) -> Self {
        self.with(UserDataField::City, value)
    }

    pub fn state(self, value: impl Into<String>) -> Self {
        self.with(UserDataField::State, value)
    }

    pub fn postal_code(self, value: impl Into<String>) -> Self {
        self.with(UserDataField::PostalCode, value)
    }

    pub fn country(self, value: impl Into<String>) -> Self {
        self.with(UserDataField::Country, value)
    }

    pub fn get(&self, field: UserDataField) -> Option<&str> {
        self.fields
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.as_str())
    }

    /// Fields in insertion order, including empty ones.
    pub fn iter(&self) -> impl Iterator<Item = (UserDataField, &str)> {
        self.fields.iter().map(|(f, v)| (*f, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Merge `other` into `self`; fields from `other` win.
    pub(crate) fn extend(&mut self, other: UserData) {
        for (field, value) in other.fields {
            self.set(field, value);
        }
    }
}

// Values are PII, keep them out of debug output.
impl fmt::Debug for UserData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.fields.iter().map(|(field, _)| field.key()))
            .finish()
    }
}

impl<S: Into<String>> FromIterator<(UserDataField, S)> for UserData {
    fn from_iter<I: IntoIterator<Item = (UserDataField, S)>>(iter: I) -> Self {
        let mut data = UserData::new();
        for (field, value) in iter {
            data.set(field, value);
        }
        data
    }
}

impl<'de> Deserialize<'de> for UserData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct UserDataVisitor;

        impl<'de> Visitor<'de> for UserDataVisitor {
            type Value = UserData;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of user data fields")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<UserData, A::Error> {
                let mut data = UserData::new();
                while let Some((field, value)) = map.next_entry::<UserDataField, Value>()? {
                    match value {
                        Value::Null => {}
                        Value::String(s) => data.set(field, s),
                        Value::Number(n) => data.set(field, n.to_string()),
                        Value::Bool(false) => {}
                        other => {
                            return Err(de::Error::custom(format!(
                                "user data field `{}` must be a string, got {}",
                                field.key(),
                                other
                            )))
                        }
                    }
                }
                Ok(data)
            }
        }

        deserializer.deserialize_map(UserDataVisitor)
    }
}

// ============================================
// CUSTOM DATA
// ============================================

/// A custom data value, sent unhashed in `cd[...]`.
#[derive(Debug, Clone, PartialEq)]
pub enum CustomValue {
    /// Suppresses the field entirely.
    Unset,
    String(String),
    Number(serde_json::Number),
    Bool(bool),
    /// Non-finite floats, kept as their textual form.
    NonFinite(f64),
    /// Arrays, objects and `null`; sent as compact JSON.
    Structured(Value),
}

impl CustomValue {
    pub fn is_unset(&self) -> bool {
        matches!(self, CustomValue::Unset)
    }

    /// String form placed in the query string.
    pub fn to_query_value(&self) -> Option<String> {
        match self {
            CustomValue::Unset => None,
            CustomValue::String(s) => Some(s.clone()),
            CustomValue::Number(n) => Some(format_number(n)),
            CustomValue::Bool(b) => Some(b.to_string()),
            CustomValue::NonFinite(f) => Some(format_non_finite(*f)),
            CustomValue::Structured(v) => {
                let mut out = String::new();
                write_compact_json(v, &mut out);
                Some(out)
            }
        }
    }
}

fn format_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    n.as_f64()
        .map(format_float)
        .unwrap_or_else(|| n.to_string())
}

/// Formats a finite float the way ECMAScript's `Number::toString` does:
/// plain notation for decimal exponents in `[-7, 21)`, `1.5e+21` style outside.
fn format_float(f: f64) -> String {
    if f == 0.0 {
        return "0".into();
    }

    // `{:e}` yields the shortest round-tripping digits, e.g. `9.99e1`
    let sci = format!("{:e}", f.abs());
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    let n = exp + 1;

    let body = if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{}.{}", int, frac)
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let e = n - 1;
        let sign = if e < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{}e{}{}", first, sign, e.abs())
        } else {
            format!("{}.{}e{}{}", first, rest, sign, e.abs())
        }
    };

    if f.is_sign_negative() {
        format!("-{}", body)
    } else {
        body
    }
}

/// Compact JSON with numbers written by [`format_number`], so `2.0` nested in
/// an object reads `2` just like a top-level value.
fn write_compact_json(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&format_number(n)),
        Value::String(_) => out.push_str(&value.to_string()),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_compact_json(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            out.push('{');
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_compact_json(item, out);
            }
            out.push('}');
        }
    }
}

fn format_non_finite(f: f64) -> String {
    if f.is_nan() {
        "NaN".into()
    } else if f.is_sign_positive() {
        "Infinity".into()
    } else {
        "-Infinity".into()
    }
}

impl From<Value> for CustomValue {
    fn from(v: Value) -> Self {
        match v {
            Value::String(s) => CustomValue::String(s),
            Value::Number(n) => CustomValue::Number(n),
            Value::Bool(b) => CustomValue::Bool(b),
            other => CustomValue::Structured(other),
        }
    }
}

impl From<&str> for CustomValue {
    fn from(s: &str) -> Self {
        CustomValue::String(s.into())
    }
}

impl From<String> for CustomValue {
    fn from(s: String) -> Self {
        CustomValue::String(s)
    }
}

impl From<bool> for CustomValue {
    fn from(b: bool) -> Self {
        CustomValue::Bool(b)
    }
}

impl From<f64> for CustomValue {
    fn from(f: f64) -> Self {
        match serde_json::Number::from_f64(f) {
            Some(n) => CustomValue::Number(n),
            None => CustomValue::NonFinite(f),
        }
    }
}

macro_rules! custom_value_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for CustomValue {
                fn from(i: $t) -> Self {
                    CustomValue::Number(i.into())
                }
            }
        )*
    };
}

custom_value_from_int!(i8, i16, i32, i64, u8, u16, u32, u64, isize, usize);

impl<T: Into<Value>> From<Vec<T>> for CustomValue {
    fn from(items: Vec<T>) -> Self {
        CustomValue::Structured(Value::Array(items.into_iter().map(Into::into).collect()))
    }
}

impl<T: Into<CustomValue>> From<Option<T>> for CustomValue {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(CustomValue::Unset)
    }
}

/// Business context for an event (currency, value, content ids, ...), kept in
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomData {
    fields: Vec<(String, CustomValue)>,
}

impl CustomData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse custom data from a JSON object, keeping document order.
    pub fn from_json(json: &str) -> Result<Self, crate::Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set a field, replacing any previous value in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<CustomValue>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Builder form of [`CustomData::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<CustomValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn currency(self, currency: impl Into<String>) -> Self {
        self.with("currency", CustomValue::String(currency.into()))
    }

    pub fn value(self, value: f64) -> Self {
        self.with("value", value)
    }

    pub fn content_ids<S: Into<String>>(self, ids: impl IntoIterator<Item = S>) -> Self {
        let ids: Vec<String> = ids.into_iter().map(Into::into).collect();
        self.with("content_ids", ids)
    }

    pub fn content_name(self, name: impl Into<String>) -> Self {
        self.with("content_name", CustomValue::String(name.into()))
    }

    pub fn num_items(self, count: u64) -> Self {
        self.with("num_items", count)
    }

    pub fn search_string(self, query: impl Into<String>) -> Self {
        self.with("search_string", CustomValue::String(query.into()))
    }

    pub fn get(&self, key: &str) -> Option<&CustomValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CustomValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Merge `other` into `self`; fields from `other` win.
    pub(crate) fn extend(&mut self, other: CustomData) {
        for (key, value) in other.fields {
            self.set(key, value);
        }
    }
}

impl<K: Into<String>, V: Into<CustomValue>> FromIterator<(K, V)> for CustomData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut data = CustomData::new();
        for (key, value) in iter {
            data.set(key, value);
        }
        data
    }
}

impl From<serde_json::Map<String, Value>> for CustomData {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

impl<'de> Deserialize<'de> for CustomData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CustomDataVisitor;

        impl<'de> Visitor<'de> for CustomDataVisitor {
            type Value = CustomData;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of custom data fields")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<CustomData, A::Error> {
                let mut data = CustomData::new();
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    data.set(key, value);
                }
                Ok(data)
            }
        }

        deserializer.deserialize_map(CustomDataVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_standard_event_names() {
        assert_eq!(StandardEvent::AddToCart.as_str(), "AddToCart");
        assert_eq!(StandardEvent::Purchase.to_string(), "Purchase");
        assert_eq!(
            serde_json::to_value(StandardEvent::CompleteRegistration).unwrap(),
            "CompleteRegistration"
        );
        assert_eq!(StandardEvent::ALL.len(), 17);
    }

    #[test]
    fn test_field_keys_and_rules() {
        assert_eq!(UserDataField::Email.key(), "em");
        assert_eq!(UserDataField::ExternalId.key(), "external_id");
        assert_eq!(
            UserDataField::Phone.normalization(),
            NormalizationRule::DigitsOnly
        );
        assert_eq!(
            UserDataField::City.normalization(),
            NormalizationRule::NoWhitespace
        );
        assert_eq!(
            UserDataField::State.normalization(),
            NormalizationRule::Default
        );
    }

    #[test]
    fn test_user_data_set_replaces_in_place() {
        let data = UserData::new()
            .email("a@b.com")
            .phone("123")
            .email("c@d.com");

        let fields: Vec<_> = data.iter().collect();
        assert_eq!(
            fields,
            vec![
                (UserDataField::Email, "c@d.com"),
                (UserDataField::Phone, "123")
            ]
        );
    }

    #[test]
    fn test_user_data_debug_hides_values() {
        let data = UserData::new().email("secret@example.com");
        let debug = format!("{:?}", data);
        assert!(debug.contains("em"));
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn test_user_data_from_json_keeps_order() {
        let data = UserData::from_json(r#"{"zp": "01310-100", "em": "a@b.com", "ph": 5511}"#)
            .unwrap();

        let keys: Vec<_> = data.iter().map(|(f, _)| f.key()).collect();
        assert_eq!(keys, vec!["zp", "em", "ph"]);
        assert_eq!(data.get(UserDataField::Phone), Some("5511"));
    }

    #[test]
    fn test_user_data_from_json_rejects_unknown_field() {
        assert!(UserData::from_json(r#"{"password": "hunter2"}"#).is_err());
    }

    #[test]
    fn test_custom_value_formatting() {
        assert_eq!(CustomValue::from(0).to_query_value().unwrap(), "0");
        assert_eq!(CustomValue::from(99.9).to_query_value().unwrap(), "99.9");
        assert_eq!(CustomValue::from(100.0).to_query_value().unwrap(), "100");
        assert_eq!(CustomValue::from(false).to_query_value().unwrap(), "false");
        assert_eq!(CustomValue::from("BRL").to_query_value().unwrap(), "BRL");
        assert_eq!(CustomValue::from(f64::NAN).to_query_value().unwrap(), "NaN");
        assert_eq!(
            CustomValue::from(f64::NEG_INFINITY).to_query_value().unwrap(),
            "-Infinity"
        );
        assert_eq!(
            CustomValue::from(vec!["sku-1", "sku-2"])
                .to_query_value()
                .unwrap(),
            r#"["sku-1","sku-2"]"#
        );
        assert_eq!(
            CustomValue::from(json!({"id": "sku-1", "quantity": 2}))
                .to_query_value()
                .unwrap(),
            r#"{"id":"sku-1","quantity":2}"#
        );
        assert_eq!(CustomValue::from(Value::Null).to_query_value().unwrap(), "null");
    }

    #[test]
    fn test_float_formatting_matches_number_to_string() {
        let cases = [
            (1e21, "1e+21"),
            (1.5e21, "1.5e+21"),
            (1e20, "100000000000000000000"),
            (1e-7, "1e-7"),
            (0.000001, "0.000001"),
            (123e-20, "1.23e-18"),
            (0.1, "0.1"),
            (-2.5, "-2.5"),
            (-0.0, "0"),
        ];
        for (input, expected) in cases {
            assert_eq!(
                CustomValue::from(input).to_query_value().unwrap(),
                expected,
                "formatting {:?}",
                input
            );
        }
    }

    #[test]
    fn test_structured_numbers_match_top_level() {
        assert_eq!(
            CustomValue::from(json!({"price": 2.0, "tax": 0.5, "tags": ["a\"b"]}))
                .to_query_value()
                .unwrap(),
            r#"{"price":2,"tax":0.5,"tags":["a\"b"]}"#
        );
        assert_eq!(
            CustomValue::from(json!([1e21, 2.0, null, true]))
                .to_query_value()
                .unwrap(),
            "[1e+21,2,null,true]"
        );
    }

    #[test]
    fn test_none_is_unset() {
        let value: CustomValue = Option::<f64>::None.into();
        assert!(value.is_unset());
        assert_eq!(value.to_query_value(), None);
    }

    #[test]
    fn test_custom_data_from_json_keeps_order() {
        let data = CustomData::from_json(
            r#"{"value": 10, "currency": "USD", "contents": [{"id": "a", "quantity": 1}]}"#,
        )
        .unwrap();

        let keys: Vec<_> = data.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["value", "currency", "contents"]);
        assert!(matches!(
            data.get("contents"),
            Some(CustomValue::Structured(_))
        ));
    }

    #[test]
    fn test_custom_data_from_json_map_keeps_order() {
        let map = json!({"value": 1, "currency": "USD", "content_type": "product"})
            .as_object()
            .unwrap()
            .clone();

        let data = CustomData::from(map);

        let keys: Vec<_> = data.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["value", "currency", "content_type"]);
    }

    #[test]
    fn test_custom_data_helpers() {
        let data = CustomData::new()
            .currency("USD")
            .value(12.5)
            .content_ids(["a", "b"])
            .num_items(2);

        assert_eq!(data.len(), 4);
        assert_eq!(data.get("currency"), Some(&CustomValue::from("USD")));
        assert_eq!(
            data.get("content_ids").unwrap().to_query_value().unwrap(),
            r#"["a","b"]"#
        );
    }
}
