use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use contracts::dashboards::d402_return_report::ReturnReportKind;
use contracts::shared::record::TransactionRecord;
use contracts::shared::report::{ReportRow, ReportSection};

use super::billing::today;
use super::AppContext;
use crate::domain::{a007_return_master, a008_return_detailed_entry};
use crate::shared::format::{display_date, parse_date_arg, render_table};
use crate::shared::query::RecordFilter;

#[derive(Subcommand, Debug)]
pub enum Returns {
    /// Return entries, filtered locally
    List(ListReturns),
    /// Record a return
    Add(AddReturn),
}

impl Returns {
    pub async fn run(self, ctx: &AppContext) -> Result<()> {
        match self {
            Returns::List(cmd) => cmd.run(ctx).await,
            Returns::Add(cmd) => cmd.run(ctx).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct ListReturns {
    /// return-master | return-detailed-entry
    #[arg(short, long, default_value = "return-master")]
    pub table: ReturnReportKind,
    #[arg(short, long)]
    pub company: Option<String>,
    #[arg(long)]
    pub courier: Option<String>,
    #[arg(short, long, value_parser = parse_date_arg)]
    pub date: Option<NaiveDate>,
}

impl ListReturns {
    pub async fn run(self, ctx: &AppContext) -> Result<()> {
        let filter = RecordFilter::from_options(
            self.date,
            self.company.as_deref(),
            None,
            self.courier.as_deref(),
            None,
        );
        let rows = match self.table {
            ReturnReportKind::ReturnMaster => a007_return_master::service::list(&ctx.gateway, &filter).await?,
            ReturnReportKind::ReturnDetailedEntry => {
                a008_return_detailed_entry::service::list(&ctx.gateway, &filter).await?
            }
        };
        println!("{}", render_table(&returns_section(self.table, &rows)));
        Ok(())
    }
}

fn returns_section(kind: ReturnReportKind, rows: &[TransactionRecord]) -> ReportSection {
    let field = kind.value_field();
    let cells = rows
        .iter()
        .map(|row| {
            ReportRow::plain(vec![
                display_date(row.date),
                row.company.clone(),
                row.courier.clone().unwrap_or_default(),
                row.design.clone().unwrap_or_default(),
                row.value(field).to_string(),
                row.user_id.clone(),
            ])
        })
        .collect();
    ReportSection::new(
        kind.title(),
        &["Date", "Company", "Courier", "Design", field.title(), "User ID"],
    )
    .with_rows(cells)
}

#[derive(Args, Debug)]
pub struct AddReturn {
    #[arg(short, long, default_value = "return-master")]
    pub table: ReturnReportKind,
    #[arg(short, long)]
    pub company: String,
    #[arg(long)]
    pub courier: String,
    /// Required for detailed entries
    #[arg(long)]
    pub design: Option<String>,
    /// No. of returns for return-master, quantity for detailed entries
    #[arg(short = 'n', long)]
    pub count: i64,
    #[arg(short, long, value_parser = parse_date_arg)]
    pub date: Option<NaiveDate>,
}

impl AddReturn {
    pub async fn run(self, ctx: &AppContext) -> Result<()> {
        let session = ctx.session()?;
        let date = self.date.unwrap_or_else(today);

        let id = match self.table {
            ReturnReportKind::ReturnMaster => {
                if self.design.is_some() {
                    bail!("--design applies to detailed entries only");
                }
                let entry = TransactionRecord::return_master(self.company, self.courier, self.count, date, "");
                a007_return_master::service::create(&ctx.gateway, &session, entry).await?
            }
            ReturnReportKind::ReturnDetailedEntry => {
                let entry = TransactionRecord::return_detailed(
                    self.company,
                    self.courier,
                    self.design.unwrap_or_default(),
                    self.count,
                    date,
                    "",
                );
                a008_return_detailed_entry::service::create(&ctx.gateway, &session, entry).await?
            }
        };

        match id {
            Some(id) => println!("Saved {} #{}", self.table.title(), id),
            None => println!("Saved {}", self.table.title()),
        }
        Ok(())
    }
}
