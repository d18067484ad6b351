use contracts::dashboards::d400_billing_summary::{
    BillingSummary, CompanyBucket, DesignLine, PortalBucket,
};
use contracts::shared::record::{GroupField, TransactionRecord, ValueField};

use super::engine::aggregate;

/// Company -> portal -> design tree of billed quantities.
///
/// Every level keeps first-seen order; a design appearing twice under the
/// same portal is summed into one line.
pub fn build_billing_tree(records: &[TransactionRecord]) -> BillingSummary {
    let rows = aggregate(
        records,
        &[GroupField::Company, GroupField::Portal, GroupField::Design],
        ValueField::Quantity,
    );

    let mut companies: Vec<CompanyBucket> = Vec::new();
    for row in rows {
        let (company, portal, design) = (row.key.get(0), row.key.get(1), row.key.get(2));

        let company_pos = match companies.iter().position(|c| c.company == company) {
            Some(pos) => pos,
            None => {
                companies.push(CompanyBucket {
                    company: company.to_string(),
                    portals: Vec::new(),
                    total: 0,
                });
                companies.len() - 1
            }
        };
        let bucket = &mut companies[company_pos];
        bucket.total = bucket.total.saturating_add(row.total);

        let portal_pos = match bucket.portals.iter().position(|p| p.portal == portal) {
            Some(pos) => pos,
            None => {
                bucket.portals.push(PortalBucket {
                    portal: portal.to_string(),
                    designs: Vec::new(),
                    total: 0,
                });
                bucket.portals.len() - 1
            }
        };
        let portal_bucket = &mut bucket.portals[portal_pos];
        portal_bucket.total = portal_bucket.total.saturating_add(row.total);
        portal_bucket.designs.push(DesignLine {
            design: design.to_string(),
            quantity: row.total,
        });
    }

    BillingSummary { companies }
}
