use std::path::PathBuf;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand};
use contracts::domain::a006_billing::BillingEntry;
use contracts::domain::a009_bill_status::BillStage;
use contracts::shared::report::{ReportRow, ReportSection};

use super::AppContext;
use crate::domain::{a006_billing, a009_bill_status};
use crate::shared::format::{display_date, parse_date_arg, render_table};
use crate::shared::query::RecordFilter;
use crate::usecases::u501_import_billing_sheet::ImportExecutor;

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[derive(Subcommand, Debug)]
pub enum Billing {
    /// Billing rows of one day
    List(ListBilling),
    /// Upload a CSV or Excel sheet with Design / Quantity columns
    Import(ImportSheet),
    /// Edit a billing row (billing editors only)
    Update(UpdateBilling),
    /// Delete a billing row (billing editors only)
    Delete {
        #[arg(long)]
        id: i64,
    },
}

impl Billing {
    pub async fn run(self, ctx: &AppContext) -> Result<()> {
        match self {
            Billing::List(cmd) => cmd.run(ctx).await,
            Billing::Import(cmd) => cmd.run(ctx).await,
            Billing::Update(cmd) => cmd.run(ctx).await,
            Billing::Delete { id } => {
                let session = ctx.session()?;
                a006_billing::service::remove(&ctx.gateway, &session, &ctx.config.access, id).await?;
                println!("Deleted billing row {}", id);
                Ok(())
            }
        }
    }
}

#[derive(Args, Debug)]
pub struct ListBilling {
    #[arg(short, long, value_parser = parse_date_arg)]
    pub date: Option<NaiveDate>,
    #[arg(short, long)]
    pub company: Option<String>,
    #[arg(short, long)]
    pub portal: Option<String>,
    #[arg(long)]
    pub design: Option<String>,
}

impl ListBilling {
    pub async fn run(self, ctx: &AppContext) -> Result<()> {
        let date = self.date.unwrap_or_else(today);
        let filter = RecordFilter::from_options(
            Some(date),
            self.company.as_deref(),
            self.portal.as_deref(),
            None,
            self.design.as_deref(),
        );
        let rows = a006_billing::service::list(&ctx.gateway, &filter).await?;
        println!("{}", render_table(&billing_section(date, &rows)));
        Ok(())
    }
}

fn billing_section(date: NaiveDate, rows: &[BillingEntry]) -> ReportSection {
    let cells = rows
        .iter()
        .map(|row| {
            ReportRow::plain(vec![
                row.id.map(|id| id.to_string()).unwrap_or_default(),
                row.company.clone(),
                row.portal.clone().unwrap_or_default(),
                row.design.clone().unwrap_or_default(),
                row.quantity.unwrap_or(0).to_string(),
            ])
        })
        .collect();
    ReportSection::new(
        format!("Billing {}", display_date(date)),
        &["ID", "Company", "Portal", "Design", "Quantity"],
    )
    .with_rows(cells)
}

#[derive(Args, Debug)]
pub struct ImportSheet {
    /// `.csv`, `.xlsx` or `.xls` file
    pub file: PathBuf,
    #[arg(short, long)]
    pub company: String,
    #[arg(short, long)]
    pub portal: String,
    #[arg(short, long, value_parser = parse_date_arg)]
    pub date: Option<NaiveDate>,
    /// Only show what would be submitted
    #[arg(long)]
    pub dry_run: bool,
}

impl ImportSheet {
    pub async fn run(self, ctx: &AppContext) -> Result<()> {
        let session = ctx.session()?;
        let date = self.date.unwrap_or_else(today);
        let context = ImportExecutor::context(&session, &self.company, &self.portal, date);
        let executor = ImportExecutor::new(ctx.gateway.clone());

        let records = executor.preview(&self.file, &context)?;
        println!("{}", render_table(&billing_section(date, &records)));
        if self.dry_run {
            return Ok(());
        }

        let result = executor.submit(&records).await?;
        println!(
            "Data submitted successfully: {} rows, {} pcs",
            result.submitted, result.total_quantity
        );
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct UpdateBilling {
    #[arg(long)]
    pub id: i64,
    #[arg(short, long)]
    pub company: String,
    #[arg(short, long)]
    pub portal: String,
    #[arg(long)]
    pub design: String,
    #[arg(short, long)]
    pub quantity: i64,
    #[arg(short, long, value_parser = parse_date_arg)]
    pub date: NaiveDate,
}

impl UpdateBilling {
    pub async fn run(self, ctx: &AppContext) -> Result<()> {
        let session = ctx.session()?;
        let mut record = BillingEntry::billing(
            self.company,
            self.portal,
            self.design,
            self.quantity,
            self.date,
            session.user_id.clone(),
        );
        record.id = Some(self.id);
        a006_billing::service::update(&ctx.gateway, &session, &ctx.config.access, self.id, &record)
            .await?;
        println!("Updated billing row {}", self.id);
        Ok(())
    }
}

#[derive(Subcommand, Debug)]
pub enum Status {
    /// Ready / billed state of companies and portals for a day
    Show {
        #[arg(short, long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
    },
    /// Mark a company or a portal as ready or billed
    Set(SetStatus),
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false, id = "target")]
pub struct SetTarget {
    #[arg(short, long)]
    pub company: Option<String>,
    #[arg(short, long)]
    pub portal: Option<String>,
}

#[derive(Args, Debug)]
pub struct SetStatus {
    #[command(flatten)]
    pub target: SetTarget,
    #[arg(short, long, value_parser = parse_date_arg)]
    pub date: Option<NaiveDate>,
    /// ready | billed
    #[arg(short, long)]
    pub status: BillStage,
}

impl Status {
    pub async fn run(self, ctx: &AppContext) -> Result<()> {
        match self {
            Status::Show { date } => {
                let date = date.unwrap_or_else(today);
                let gateway = &ctx.gateway;

                let companies = a009_bill_status::service::company_status(gateway, date).await?;
                let portals = a009_bill_status::service::portal_status(gateway, date).await?;
                let ready = a009_bill_status::service::ready_companies(gateway, date).await?;
                let ready_portals = a009_bill_status::service::ready_portals(gateway, date).await?;
                let billed = a009_bill_status::service::billed_companies(gateway, date).await?;

                let company_rows = companies
                    .iter()
                    .map(|s| ReportRow::plain(vec![s.company.clone(), s.status.to_string()]))
                    .collect();
                let portal_rows = portals
                    .iter()
                    .map(|s| ReportRow::plain(vec![s.portal.clone(), s.status.to_string()]))
                    .collect();
                let sections = [
                    ReportSection::new(format!("Companies {}", display_date(date)), &["Company", "Status"])
                        .with_rows(company_rows),
                    ReportSection::new("Portals", &["Portal", "Status"]).with_rows(portal_rows),
                ];
                for section in &sections {
                    println!("{}", render_table(section));
                }
                println!("Ready companies: {}", ready.join(", "));
                println!("Ready portals: {}", ready_portals.join(", "));
                println!("Billed companies: {}", billed.join(", "));
                Ok(())
            }
            Status::Set(cmd) => {
                let date = cmd.date.unwrap_or_else(today);
                match (cmd.target.company, cmd.target.portal) {
                    (Some(company), _) => {
                        a009_bill_status::service::set_company_status(&ctx.gateway, &company, date, cmd.status)
                            .await?;
                        println!("{} is {} for {}", company.trim(), cmd.status, display_date(date));
                    }
                    (None, Some(portal)) => {
                        a009_bill_status::service::set_portal_status(&ctx.gateway, &portal, date, cmd.status)
                            .await?;
                        println!("{} is {} for {}", portal.trim(), cmd.status, display_date(date));
                    }
                    (None, None) => anyhow::bail!("either --company or --portal is required"),
                }
                Ok(())
            }
        }
    }
}
