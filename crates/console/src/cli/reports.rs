use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use clap::Args;
use contracts::dashboards::d400_billing_summary::BillingSummaryRequest;
use contracts::dashboards::d401_sales_trend::SalesTrendRequest;
use contracts::dashboards::d402_return_report::{ReturnReportKind, ReturnReportRequest};
use contracts::shared::report::{DateRange, ReportSection};

use super::billing::today;
use super::AppContext;
use crate::dashboards::{d400_billing_summary, d401_sales_trend, d402_return_report};
use crate::shared::export::write_report;
use crate::shared::format::{display_date, parse_date_arg, render_table};
use crate::shared::logger;

fn print_sections(sections: &[ReportSection]) {
    for section in sections {
        println!("{}", render_table(section));
    }
}

fn save_pdf(ctx: &AppContext, file_name: &str, bytes: &[u8]) -> Result<()> {
    let path = write_report(&ctx.output_dir(), file_name, bytes)?;
    logger::log("export", &format!("{} written", path.display()));
    println!("Saved {}", path.display());
    Ok(())
}

#[derive(Args, Debug)]
pub struct Summary {
    #[arg(short, long, value_parser = parse_date_arg)]
    pub date: Option<NaiveDate>,
    /// All companies with bills on the date when omitted
    #[arg(short, long)]
    pub company: Option<String>,
    #[arg(short, long)]
    pub portal: Option<String>,
    /// Also export the summary as PDF
    #[arg(long)]
    pub pdf: bool,
}

impl Summary {
    pub async fn run(self, ctx: &AppContext) -> Result<()> {
        let request = BillingSummaryRequest {
            date: self.date.unwrap_or_else(today),
            company: self.company,
            portal: self.portal,
        };

        let summary = d400_billing_summary::service::get_billing_summary(&ctx.gateway, &request).await?;

        println!("{}", d400_billing_summary::service::report_title(request.date));
        print_sections(&d400_billing_summary::service::build_sections(&summary));
        println!("Grand total: {}", summary.grand_total());

        if self.pdf {
            let (file_name, bytes) = d400_billing_summary::service::export_pdf(&request, &summary)?;
            save_pdf(ctx, &file_name, &bytes)?;
        }
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct Trend {
    #[arg(long, value_parser = parse_date_arg)]
    pub from: Option<NaiveDate>,
    #[arg(long, value_parser = parse_date_arg)]
    pub to: Option<NaiveDate>,
    /// Length of the range ending at `--to` when `--from` is omitted
    #[arg(long, default_value_t = 7)]
    pub days: u32,
    #[arg(long)]
    pub design: Option<String>,
    #[arg(short, long)]
    pub company: Option<String>,
    #[arg(long)]
    pub pdf: bool,
}

impl Trend {
    fn range(&self) -> Result<DateRange> {
        let to = self.to.unwrap_or_else(today);
        match self.from {
            Some(from) => DateRange::new(from, to).map_err(|e| anyhow!(e)),
            None => DateRange::ending_at(to, self.days).map_err(|e| anyhow!(e)),
        }
    }

    pub async fn run(self, ctx: &AppContext) -> Result<()> {
        let request = SalesTrendRequest {
            range: self.range()?,
            design: self.design.clone(),
            company: self.company.clone(),
        };

        let response = d401_sales_trend::service::get_sales_trend(&ctx.gateway, &request).await?;

        println!("{}", d401_sales_trend::service::series_label(&request));
        for point in &response.points {
            println!("  {}  {:>6}", display_date(point.date), point.total);
        }
        println!();
        print_sections(&d401_sales_trend::service::build_sections(&request, &response));

        if self.pdf {
            let (file_name, bytes) = d401_sales_trend::service::export_pdf(&request, &response)?;
            save_pdf(ctx, &file_name, &bytes)?;
        }
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ShareReport {
    /// return-master | return-detailed-entry
    #[arg(short, long, default_value = "return-master")]
    pub table: ReturnReportKind,
    #[arg(short, long)]
    pub company: Option<String>,
    #[arg(long)]
    pub courier: Option<String>,
    #[arg(short, long, value_parser = parse_date_arg)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub pdf: bool,
    /// Print the share message and its link
    #[arg(long)]
    pub share: bool,
    /// Print totals per company and per courier
    #[arg(long)]
    pub totals: bool,
}

impl ShareReport {
    pub async fn run(self, ctx: &AppContext) -> Result<()> {
        let request = ReturnReportRequest {
            kind: self.table,
            company: self.company,
            courier: self.courier,
            date: self.date,
        };

        let entries = d402_return_report::service::fetch_entries(&ctx.gateway, &request).await?;
        let groups = d402_return_report::service::group_entries(&entries);

        println!("{}", request.kind.title());
        print_sections(&d402_return_report::service::build_sections(request.kind, &groups));

        if self.totals {
            print_sections(&d402_return_report::service::totals_sections(request.kind, &entries));
        }
        if self.pdf {
            let (file_name, bytes) = d402_return_report::service::export_pdf(request.kind, &groups)?;
            save_pdf(ctx, &file_name, &bytes)?;
        }
        if self.share {
            let (message, url) =
                d402_return_report::service::share(request.kind, &groups, &ctx.config.share.target_url);
            println!("{}\n\n{}", message, url);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trend(from: Option<NaiveDate>, days: u32) -> Trend {
        Trend {
            from,
            to: NaiveDate::from_ymd_opt(2024, 1, 7),
            days,
            design: None,
            company: None,
            pdf: false,
        }
    }

    #[test]
    fn test_trend_range_from_days() {
        let range = trend(None, 7).range().unwrap();
        assert_eq!(range.from, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn test_trend_range_rejects_huge_days() {
        let err = trend(None, u32::MAX).range().unwrap_err();
        assert!(err.to_string().starts_with("Invalid date range"));
    }

    #[test]
    fn test_trend_range_rejects_inverted() {
        assert!(trend(NaiveDate::from_ymd_opt(2024, 2, 1), 7).range().is_err());
    }
}
