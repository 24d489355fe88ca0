use chrono::NaiveDate;

/// Contract boilerplate carried on every generated PO.
const SLA_ON_TIME: &str = "98% On-Time Delivery";
const QUALITY_CLAUSE: &str = "< 0.5% Defect Rate";
const RISK_CLAUSE: &str = "Dual Sourcing Trigger if Disruption Probability > 20%";
const PAYMENT_TERMS: &str = "Net 30";
const PENALTY_CLAUSE: &str = "1% per day delay";

/// Draft a purchase-order document for a supplier.
///
/// `qty` is normally the supplier's allocated quantity from the engine, but
/// any quantity the analyst settles on works. The date is injected by the
/// caller so tests stay deterministic.
pub fn draft_po(supplier: &str, qty: i64, target_price: f64, date: NaiveDate) -> String {
    format!(
        "PURCHASE ORDER - SMARTPROCURE\n\
         \n\
         Date: {date}\n\
         Supplier: {supplier}\n\
         Quantity: {qty}\n\
         Price: {target_price:.2}\n\
         SLA: {SLA_ON_TIME}\n\
         Quality: {QUALITY_CLAUSE}\n\
         Risk Clause: {RISK_CLAUSE}\n\
         Payment Terms: {PAYMENT_TERMS}\n\
         Penalty: {PENALTY_CLAUSE}\n",
        date = date.format("%Y-%m-%d"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 27).unwrap()
    }

    #[test]
    fn test_po_contains_order_terms() {
        let po = draft_po("Alpha", 354, 90.0, date());
        assert!(po.contains("Supplier: Alpha"));
        assert!(po.contains("Quantity: 354"));
        assert!(po.contains("Price: 90.00"));
        assert!(po.contains("Date: 2026-08-27"));
    }

    #[test]
    fn test_po_contains_contract_clauses() {
        let po = draft_po("Gamma", 100, 95.5, date());
        assert!(po.contains("98% On-Time Delivery"));
        assert!(po.contains("< 0.5% Defect Rate"));
        assert!(po.contains("Dual Sourcing Trigger if Disruption Probability > 20%"));
        assert!(po.contains("Net 30"));
        assert!(po.contains("1% per day delay"));
    }

    #[test]
    fn test_po_is_deterministic() {
        assert_eq!(
            draft_po("Beta", 220, 88.0, date()),
            draft_po("Beta", 220, 88.0, date())
        );
    }
}
