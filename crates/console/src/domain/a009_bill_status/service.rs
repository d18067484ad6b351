use chrono::NaiveDate;
use contracts::domain::a009_bill_status::{
    names_from_list, BillStage, CompanyBillStatus, PortalBillStatus,
};
use serde_json::Value;

use crate::shared::error::{ConsoleError, ConsoleResult};
use crate::shared::gateway::Gateway;

const COMPANY_STATUS: &str = "companybillstatus";
const PORTAL_STATUS: &str = "portalbillstatus";
const READY_COMPANIES: &str = "readycompanies";
const READY_PORTALS: &str = "readyportals";
const BILLED_COMPANIES: &str = "billedcompanies";

fn date_param(date: NaiveDate) -> [(&'static str, String); 1] {
    [("date", date.format("%Y-%m-%d").to_string())]
}

pub async fn company_status(gateway: &Gateway, date: NaiveDate) -> ConsoleResult<Vec<CompanyBillStatus>> {
    gateway.list_at(COMPANY_STATUS, &date_param(date)).await
}

pub async fn portal_status(gateway: &Gateway, date: NaiveDate) -> ConsoleResult<Vec<PortalBillStatus>> {
    gateway.list_at(PORTAL_STATUS, &date_param(date)).await
}

pub async fn set_company_status(
    gateway: &Gateway,
    company: &str,
    date: NaiveDate,
    status: BillStage,
) -> ConsoleResult<()> {
    if company.trim().is_empty() {
        return Err(ConsoleError::validation("Company is required"));
    }
    let body = CompanyBillStatus {
        company: company.trim().to_string(),
        date,
        status,
    };
    gateway.create_at(COMPANY_STATUS, &body).await?;
    tracing::info!("{} marked {} for {}", body.company, status, date);
    Ok(())
}

pub async fn set_portal_status(
    gateway: &Gateway,
    portal: &str,
    date: NaiveDate,
    status: BillStage,
) -> ConsoleResult<()> {
    if portal.trim().is_empty() {
        return Err(ConsoleError::validation("Portal is required"));
    }
    let body = PortalBillStatus {
        portal: portal.trim().to_string(),
        date,
        status,
    };
    gateway.create_at(PORTAL_STATUS, &body).await?;
    tracing::info!("{} marked {} for {}", body.portal, status, date);
    Ok(())
}

pub async fn ready_companies(gateway: &Gateway, date: NaiveDate) -> ConsoleResult<Vec<String>> {
    names(gateway, READY_COMPANIES, date, "company").await
}

pub async fn ready_portals(gateway: &Gateway, date: NaiveDate) -> ConsoleResult<Vec<String>> {
    names(gateway, READY_PORTALS, date, "portal").await
}

pub async fn billed_companies(gateway: &Gateway, date: NaiveDate) -> ConsoleResult<Vec<String>> {
    names(gateway, BILLED_COMPANIES, date, "company").await
}

async fn names(gateway: &Gateway, path: &str, date: NaiveDate, field: &str) -> ConsoleResult<Vec<String>> {
    let values: Vec<Value> = gateway.list_at(path, &date_param(date)).await?;
    Ok(names_from_list(&values, field))
}
