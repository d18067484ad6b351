//! Filter/Query builder
//!
//! A [`RecordFilter`] is split into the query parameters a resource filters
//! on the server and a local predicate for everything else.

use chrono::NaiveDate;
use contracts::shared::record::TransactionRecord;

/// Which filter fields a resource applies on the server
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServerFilters {
    pub date: bool,
    pub company: bool,
    pub portal: bool,
}

impl ServerFilters {
    /// Resource returns everything; all filtering is local
    pub const NONE: ServerFilters = ServerFilters {
        date: false,
        company: false,
        portal: false,
    };

    /// `/billing?date=&company=&portal=`
    pub const BILLING: ServerFilters = ServerFilters {
        date: true,
        company: true,
        portal: true,
    };
}

/// User-entered filter; empty strings and `None` mean "no filter"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub date: Option<NaiveDate>,
    pub company: String,
    pub portal: String,
    pub courier: String,
    pub design: String,
}

impl RecordFilter {
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }

    pub fn with_portal(mut self, portal: impl Into<String>) -> Self {
        self.portal = portal.into();
        self
    }

    pub fn with_courier(mut self, courier: impl Into<String>) -> Self {
        self.courier = courier.into();
        self
    }

    pub fn with_design(mut self, design: impl Into<String>) -> Self {
        self.design = design.into();
        self
    }

    /// Build from optional CLI values
    pub fn from_options(
        date: Option<NaiveDate>,
        company: Option<&str>,
        portal: Option<&str>,
        courier: Option<&str>,
        design: Option<&str>,
    ) -> Self {
        Self {
            date,
            company: company.unwrap_or_default().to_string(),
            portal: portal.unwrap_or_default().to_string(),
            courier: courier.unwrap_or_default().to_string(),
            design: design.unwrap_or_default().to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && blank(&self.company)
            && blank(&self.portal)
            && blank(&self.courier)
            && blank(&self.design)
    }

    /// Query parameters for the server side and the predicate for the rest
    pub fn split(&self, server: ServerFilters) -> (Vec<(&'static str, String)>, LocalFilter) {
        let mut params = Vec::new();
        let mut local = LocalFilter::default();

        match self.date {
            Some(date) if server.date => params.push(("date", date.format("%Y-%m-%d").to_string())),
            other => local.date = other,
        }

        if !blank(&self.company) {
            if server.company {
                params.push(("company", self.company.clone()));
            } else {
                local.company = Some(self.company.clone());
            }
        }

        if !blank(&self.portal) {
            if server.portal {
                params.push(("portal", self.portal.clone()));
            } else {
                local.portal = Some(self.portal.clone());
            }
        }

        if !blank(&self.courier) {
            local.courier = Some(self.courier.clone());
        }
        if !blank(&self.design) {
            local.design = Some(self.design.clone());
        }

        (params, local)
    }
}

/// Exact-match conjunction applied after the fetch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalFilter {
    pub date: Option<NaiveDate>,
    pub company: Option<String>,
    pub portal: Option<String>,
    pub courier: Option<String>,
    pub design: Option<String>,
}

impl LocalFilter {
    pub fn matches(&self, record: &TransactionRecord) -> bool {
        self.date.map_or(true, |d| record.date == d)
            && eq_opt(&self.company, Some(record.company.as_str()))
            && eq_opt(&self.portal, record.portal.as_deref())
            && eq_opt(&self.courier, record.courier.as_deref())
            && eq_opt(&self.design, record.design.as_deref())
    }

    pub fn apply(&self, records: Vec<TransactionRecord>) -> Vec<TransactionRecord> {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn eq_opt(wanted: &Option<String>, actual: Option<&str>) -> bool {
    match wanted {
        None => true,
        Some(w) => actual == Some(w.as_str()),
    }
}
