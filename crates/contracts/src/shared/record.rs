use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use super::lenient;

/// Kind of transaction a record represents. Decides which count is populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Quantity of a design shipped through a portal
    Billing,
    /// Count of returned parcels per company/courier
    ReturnMaster,
    /// Returned goods itemised by design
    ReturnDetailed,
}

impl RecordKind {
    pub fn value_field(&self) -> ValueField {
        match self {
            RecordKind::ReturnMaster => ValueField::NoReturn,
            RecordKind::Billing | RecordKind::ReturnDetailed => ValueField::Quantity,
        }
    }
}

/// Numeric column summed by the aggregation engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueField {
    Quantity,
    NoReturn,
}

impl ValueField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueField::Quantity => "quantity",
            ValueField::NoReturn => "no_return",
        }
    }

    /// Column caption in tables and reports
    pub fn title(&self) -> &'static str {
        match self {
            ValueField::Quantity => "Quantity",
            ValueField::NoReturn => "No. Return",
        }
    }
}

impl FromStr for ValueField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "quantity" => Ok(ValueField::Quantity),
            "no_return" => Ok(ValueField::NoReturn),
            other => Err(format!("unknown value field: {}", other)),
        }
    }
}

/// Field a record can be bucketed by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupField {
    Company,
    Courier,
    Portal,
    Design,
    Date,
    UserId,
}

impl GroupField {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupField::Company => "company",
            GroupField::Courier => "courier",
            GroupField::Portal => "portal",
            GroupField::Design => "design",
            GroupField::Date => "date",
            GroupField::UserId => "user_id",
        }
    }

    /// Column title used in tables and exports
    pub fn title(&self) -> &'static str {
        match self {
            GroupField::Company => "Company",
            GroupField::Courier => "Courier",
            GroupField::Portal => "Portal",
            GroupField::Design => "Design",
            GroupField::Date => "Date",
            GroupField::UserId => "User ID",
        }
    }
}

impl fmt::Display for GroupField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "company" => Ok(GroupField::Company),
            "courier" => Ok(GroupField::Courier),
            "portal" => Ok(GroupField::Portal),
            "design" => Ok(GroupField::Design),
            "date" => Ok(GroupField::Date),
            "user_id" | "user" => Ok(GroupField::UserId),
            other => Err(format!("unknown group field: {}", other)),
        }
    }
}

/// Flat transaction row as exchanged with the backend.
///
/// Billing rows and detailed return entries carry `quantity`, return-master
/// rows carry `no_return`; the two are never read interchangeably.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    pub company: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub courier: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portal: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient::count",
        skip_serializing_if = "Option::is_none"
    )]
    pub quantity: Option<i64>,

    #[serde(
        default,
        deserialize_with = "lenient::count",
        skip_serializing_if = "Option::is_none"
    )]
    pub no_return: Option<i64>,

    #[serde(deserialize_with = "lenient::date")]
    pub date: NaiveDate,

    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub user_id: String,
}

impl TransactionRecord {
    pub fn billing(
        company: impl Into<String>,
        portal: impl Into<String>,
        design: impl Into<String>,
        quantity: i64,
        date: NaiveDate,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            company: company.into(),
            courier: None,
            portal: Some(portal.into()),
            design: Some(design.into()),
            quantity: Some(quantity),
            no_return: None,
            date,
            user_id: user_id.into(),
        }
    }

    pub fn return_master(
        company: impl Into<String>,
        courier: impl Into<String>,
        no_return: i64,
        date: NaiveDate,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            company: company.into(),
            courier: Some(courier.into()),
            portal: None,
            design: None,
            quantity: None,
            no_return: Some(no_return),
            date,
            user_id: user_id.into(),
        }
    }

    pub fn return_detailed(
        company: impl Into<String>,
        courier: impl Into<String>,
        design: impl Into<String>,
        quantity: i64,
        date: NaiveDate,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            company: company.into(),
            courier: Some(courier.into()),
            portal: None,
            design: Some(design.into()),
            quantity: Some(quantity),
            no_return: None,
            date,
            user_id: user_id.into(),
        }
    }

    /// Value summed for `field`; absent counts contribute 0
    pub fn value(&self, field: ValueField) -> i64 {
        match field {
            ValueField::Quantity => self.quantity.unwrap_or(0),
            ValueField::NoReturn => self.no_return.unwrap_or(0),
        }
    }

    /// Grouping value for `field`; absent fields are the empty string
    pub fn field(&self, field: GroupField) -> Cow<'_, str> {
        match field {
            GroupField::Company => Cow::Borrowed(self.company.as_str()),
            GroupField::Courier => Cow::Borrowed(self.courier.as_deref().unwrap_or_default()),
            GroupField::Portal => Cow::Borrowed(self.portal.as_deref().unwrap_or_default()),
            GroupField::Design => Cow::Borrowed(self.design.as_deref().unwrap_or_default()),
            GroupField::Date => Cow::Owned(self.date.format("%Y-%m-%d").to_string()),
            GroupField::UserId => Cow::Borrowed(self.user_id.as_str()),
        }
    }

    /// Checks the record invariants for the given kind before it is sent
    pub fn validate(&self, kind: RecordKind) -> Result<(), String> {
        if self.company.trim().is_empty() {
            return Err("Company is required".to_string());
        }

        let (present, absent, name) = match kind.value_field() {
            ValueField::Quantity => (self.quantity, self.no_return, "Quantity"),
            ValueField::NoReturn => (self.no_return, self.quantity, "No. Return"),
        };
        match present {
            None => return Err(format!("{} is required", name)),
            Some(n) if n < 0 => return Err(format!("{} cannot be negative", name)),
            Some(_) => {}
        }
        if absent.is_some() {
            return Err("quantity and no_return cannot both be set".to_string());
        }

        match kind {
            RecordKind::Billing => {
                if self.portal.as_deref().map_or(true, |p| p.trim().is_empty()) {
                    return Err("Portal is required".to_string());
                }
                if self.design.as_deref().map_or(true, |d| d.trim().is_empty()) {
                    return Err("Design is required".to_string());
                }
            }
            RecordKind::ReturnMaster => {
                if self.courier.as_deref().map_or(true, |c| c.trim().is_empty()) {
                    return Err("Courier is required".to_string());
                }
            }
            RecordKind::ReturnDetailed => {
                if self.courier.as_deref().map_or(true, |c| c.trim().is_empty()) {
                    return Err("Courier is required".to_string());
                }
                if self.design.as_deref().map_or(true, |d| d.trim().is_empty()) {
                    return Err("Design is required".to_string());
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_deserialize_billing_row_from_backend() {
        let json = r#"{"id":7,"company":"Acme","portal":"X","design":"D1","quantity":"12","date":"2024-01-01T00:00:00.000Z","user_id":3}"#;
        let rec: TransactionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.id, Some(7));
        assert_eq!(rec.quantity, Some(12));
        assert_eq!(rec.no_return, None);
        assert_eq!(rec.date, day());
        assert_eq!(rec.user_id, "3");
    }

    #[test]
    fn test_malformed_quantity_is_zero() {
        let json = r#"{"company":"Acme","quantity":"abc","date":"2024-01-01"}"#;
        let rec: TransactionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.quantity, Some(0));
        assert_eq!(rec.value(ValueField::Quantity), 0);
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        let json = r#"{"company":"Acme","date":"2024-13-01"}"#;
        assert!(serde_json::from_str::<TransactionRecord>(json).is_err());
    }

    #[test]
    fn test_serialize_skips_absent_fields() {
        let rec = TransactionRecord::return_master("Acme", "C1", 4, day(), "u1");
        let value = serde_json::to_value(&rec).unwrap();
        assert_eq!(value["date"], "2024-01-01");
        assert_eq!(value["no_return"], 4);
        assert!(value.get("quantity").is_none());
        assert!(value.get("id").is_none());
    }

    #[test]
    fn test_absent_fields_group_as_empty() {
        let rec = TransactionRecord::return_master("Acme", "C1", 4, day(), "u1");
        assert_eq!(rec.field(GroupField::Design), "");
        assert_eq!(rec.field(GroupField::Courier), "C1");
        assert_eq!(rec.field(GroupField::Date), "2024-01-01");
    }

    #[test]
    fn test_validate() {
        let ok = TransactionRecord::billing("Acme", "X", "A", 5, day(), "u1");
        assert!(ok.validate(RecordKind::Billing).is_ok());

        let mut no_company = ok.clone();
        no_company.company = "  ".into();
        assert!(no_company.validate(RecordKind::Billing).is_err());

        let mut negative = ok.clone();
        negative.quantity = Some(-1);
        assert!(negative.validate(RecordKind::Billing).is_err());

        let mut both = ok.clone();
        both.no_return = Some(1);
        assert!(both.validate(RecordKind::Billing).is_err());

        let ret = TransactionRecord::return_master("Acme", "", 2, day(), "u1");
        assert_eq!(
            ret.validate(RecordKind::ReturnMaster),
            Err("Courier is required".to_string())
        );
    }

    #[test]
    fn test_group_field_from_str() {
        assert_eq!("Company".parse::<GroupField>(), Ok(GroupField::Company));
        assert_eq!("user".parse::<GroupField>(), Ok(GroupField::UserId));
        assert!("colour".parse::<GroupField>().is_err());
    }
}
