//! Plain-text rendering of the medication overview.

use core::fmt;

use chrono::NaiveDate;

use clinic_inventory::{ExpiryPolicy, LotRow, MedicationOverview, OverviewTotals, StockTotal};

/// Text report over already-built overviews.
#[derive(Debug)]
pub struct OverviewReport<'a> {
    reference: NaiveDate,
    policy: ExpiryPolicy,
    overviews: &'a [MedicationOverview],
}

impl<'a> OverviewReport<'a> {
    pub fn new(reference: NaiveDate, policy: ExpiryPolicy, overviews: &'a [MedicationOverview]) -> Self {
        Self {
            reference,
            policy,
            overviews,
        }
    }

    pub fn totals(&self) -> OverviewTotals {
        OverviewTotals::from_overviews(self.overviews)
    }
}

impl fmt::Display for OverviewReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Medication overview as of {} (warning window {} days)",
            self.reference,
            self.policy.warning_days()
        )?;

        if self.overviews.is_empty() {
            return writeln!(f, "No medications found.");
        }

        let totals = self.totals();
        writeln!(
            f,
            "{} medications: {} with expired stock, {} expiring soon, {} out of stock, {} unreliable",
            totals.medications,
            totals.expired,
            totals.expiring_soon,
            totals.out_of_stock,
            totals.unreliable
        )?;

        for ov in self.overviews {
            writeln!(f)?;
            write_card(f, ov)?;
        }
        Ok(())
    }
}

fn write_card(f: &mut fmt::Formatter<'_>, ov: &MedicationOverview) -> fmt::Result {
    write!(f, "#{} {}", ov.med_id, ov.name)?;
    if let Some(common) = &ov.common_name {
        write!(f, " \"{common}\"")?;
    }
    match ov.price {
        Some(price) => write!(f, "  price {price}")?,
        None => write!(f, "  price ERROR")?,
    }
    match &ov.total {
        StockTotal::Units { units } => write!(f, "  total {units} units")?,
        StockTotal::Unreliable { reason } => write!(f, "  total ERROR ({reason})")?,
    }
    if let Some(badge) = ov.warning.warning_badge() {
        write!(f, "  [{badge}]")?;
    }
    writeln!(f)?;

    if ov.lots.is_empty() {
        writeln!(f, "    no stock entries")?;
    }
    for lot in &ov.lots {
        write_lot(f, lot)?;
    }

    if let Some(guideline) = ov.med_info.guideline() {
        writeln!(f, "    guideline: {guideline}")?;
    }
    if let Some(warning) = ov.med_info.warning() {
        writeln!(f, "    warning: {warning}")?;
    }
    Ok(())
}

fn write_lot(f: &mut fmt::Formatter<'_>, lot: &LotRow) -> fmt::Result {
    let day = |d: Option<NaiveDate>| d.map_or_else(|| "?".to_string(), |d| d.to_string());
    let qty = lot.quantity.map_or_else(|| "?".to_string(), |q| q.to_string());
    write!(
        f,
        "    lot {}  qty {}  in {}  exp {}",
        lot.inv_id,
        qty,
        day(lot.in_day),
        day(lot.exp_day)
    )?;
    if let Some(badge) = lot.status.badge() {
        write!(f, "  {badge}")?;
    }
    writeln!(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode_view;
    use clinic_inventory::summarize;

    #[test]
    fn renders_cards_with_badges() {
        let meds = decode_view(
            r#"[{
                "med_id": 7,
                "name": "Cetirizine",
                "common_name": "Zyrtec",
                "price": 30,
                "stock": [
                    {"inv_id": 1, "in_day": "2024-01-01", "exp_day": "2024-06-10", "quantity": 2},
                    {"inv_id": 2, "in_day": "2024-01-01", "exp_day": null, "quantity": 3}
                ],
                "med_info": {"guideline": null, "warning": "Drowsiness"}
            }]"#,
        )
        .unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let policy = ExpiryPolicy::default();
        let overviews = summarize(&meds, today, &policy);

        let text = OverviewReport::new(today, policy, &overviews).to_string();
        assert!(text.contains("#7 Cetirizine \"Zyrtec\"  price 30  total 5 units  [STOCK EXPIRING SOON]"));
        assert!(text.contains("lot 1  qty 2  in 2024-01-01  exp 2024-06-10  EXPIRES SOON"));
        assert!(text.contains("lot 2  qty 3  in 2024-01-01  exp ?\n"));
        assert!(text.contains("warning: Drowsiness"));
    }

    #[test]
    fn corrupt_fields_render_as_errors() {
        let meds = decode_view(
            r#"[{
                "med_id": 8,
                "name": "Loratadine",
                "price": -5,
                "stock": [{"inv_id": 4, "in_day": "2024-01-01", "exp_day": "2025-01-01", "quantity": null}]
            }]"#,
        )
        .unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let policy = ExpiryPolicy::default();
        let overviews = summarize(&meds, today, &policy);

        let text = OverviewReport::new(today, policy, &overviews).to_string();
        assert!(text.contains(
            "#8 Loratadine  price ERROR  total ERROR (data integrity violation: stock lot 4 has no quantity)"
        ));
        assert!(text.contains("lot 4  qty ?  in 2024-01-01  exp 2025-01-01\n"));
        assert!(text.contains("1 unreliable"));
    }

    #[test]
    fn empty_list_says_so() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let text = OverviewReport::new(today, ExpiryPolicy::default(), &[]).to_string();
        assert!(text.ends_with("No medications found.\n"));
    }
}
