use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::extract::Bank;

// Fixed conversion rates from USD, billions.
const GBP_RATE: f64 = 0.8;
const EUR_RATE: f64 = 0.93;
const INR_RATE: f64 = 82.95;

/// One fully-derived output row. Serde field names double as the CSV
/// header, so the column order here is the column order everywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedBank {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "MC_USD_Billion")]
    pub mc_usd_billion: Option<f64>,
    #[serde(rename = "MC_GBP_Billion")]
    pub mc_gbp_billion: Option<f64>,
    #[serde(rename = "MC_EUR_Billion")]
    pub mc_eur_billion: Option<f64>,
    #[serde(rename = "MC_INR_Billion")]
    pub mc_inr_billion: Option<f64>,
}

/// Coerce the raw market-cap strings to floats and derive the three
/// converted columns. A non-numeric value degrades that row's numeric
/// fields to null; it never aborts the run.
///
/// Derived values are `(usd * rate).round()`: round-half-away-from-zero,
/// which is round-half-up for these non-negative caps.
pub fn transform(records: Vec<Bank>) -> Vec<EnrichedBank> {
    records.into_iter().map(enrich).collect()
}

fn enrich(bank: Bank) -> EnrichedBank {
    let usd = match bank.mc_usd.parse::<f64>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("non-numeric market cap for {}: {:?}", bank.name, bank.mc_usd);
            None
        }
    };
    let convert = |rate: f64| usd.map(|v| (v * rate).round());
    EnrichedBank {
        name: bank.name,
        mc_usd_billion: usd,
        mc_gbp_billion: convert(GBP_RATE),
        mc_eur_billion: convert(EUR_RATE),
        mc_inr_billion: convert(INR_RATE),
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn bank(name: &str, mc: &str) -> Bank {
        Bank { name: name.into(), mc_usd: mc.into() }
    }

    #[test]
    fn derived_columns_use_fixed_rates() {
        let out = transform(vec![bank("JPMorgan Chase", "432.92")]);
        let row = &out[0];
        assert_eq!(row.mc_usd_billion, Some(432.92));
        assert_eq!(row.mc_gbp_billion, Some(346.0));
        assert_eq!(row.mc_eur_billion, Some(403.0));
        assert_eq!(row.mc_inr_billion, Some(35911.0));
    }

    #[test]
    fn worked_example_100_50() {
        let out = transform(vec![bank("Foo", "100.50")]);
        let row = &out[0];
        assert_eq!(row.mc_usd_billion, Some(100.50));
        assert_eq!(row.mc_gbp_billion, Some(80.0)); // round(80.4)
        assert_eq!(row.mc_eur_billion, Some(93.0)); // round(93.465)
        assert_eq!(row.mc_inr_billion, Some(8336.0)); // round(8336.475)
    }

    #[test]
    fn non_numeric_degrades_to_null_without_fault() {
        let out = transform(vec![bank("HDFC Bank", "N/A"), bank("Foo", "12.0")]);
        let row = &out[0];
        assert_eq!(row.name, "HDFC Bank");
        assert_eq!(row.mc_usd_billion, None);
        assert_eq!(row.mc_gbp_billion, None);
        assert_eq!(row.mc_eur_billion, None);
        assert_eq!(row.mc_inr_billion, None);
        // The following row is unaffected
        assert_eq!(out[1].mc_usd_billion, Some(12.0));
    }

    #[test]
    fn order_preserved() {
        let out = transform(vec![bank("A", "1"), bank("B", "2"), bank("C", "3")]);
        let names: Vec<_> = out.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
    }
}
