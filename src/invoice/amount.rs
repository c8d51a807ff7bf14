use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};

use crate::models::{InvoiceAmount, WorkRecord, wire};

use super::InvoiceError;
use super::money;

/// Raw inputs of a single invoice; any absent value counts as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceAmountInput {
    #[serde(default, deserialize_with = "wire::optional_decimal")]
    pub daily: Option<BigDecimal>,
    #[serde(default, deserialize_with = "wire::optional_decimal")]
    pub overtime_hours: Option<BigDecimal>,
    #[serde(default, deserialize_with = "wire::optional_decimal")]
    pub overtime_rate: Option<BigDecimal>,
    #[serde(default, deserialize_with = "wire::optional_decimal")]
    pub adjust: Option<BigDecimal>,
}

impl InvoiceAmountInput {
    /// Rejects negative rates and hours. `adjust` may be negative.
    pub fn validate(&self) -> Result<(), InvoiceError> {
        let checks = [
            ("daily", &self.daily),
            ("overtimeHours", &self.overtime_hours),
            ("overtimeRate", &self.overtime_rate),
        ];
        for (field, value) in checks {
            if value.as_ref().is_some_and(|v| *v < BigDecimal::zero()) {
                return Err(InvoiceError::NegativeInput { field });
            }
        }
        Ok(())
    }
}

impl From<&WorkRecord> for InvoiceAmountInput {
    fn from(record: &WorkRecord) -> Self {
        Self {
            daily: Some(record.daily_rate.clone()),
            overtime_hours: Some(record.overtime_hours.clone()),
            overtime_rate: Some(record.overtime_rate.clone()),
            adjust: Some(record.manual_adjustment.clone()),
        }
    }
}

/// `calculated = daily + overtimeHours × overtimeRate`, `final = calculated + adjust`.
pub fn compute_invoice_amount(input: &InvoiceAmountInput) -> InvoiceAmount {
    let zero = BigDecimal::zero();
    let daily = input.daily.clone().unwrap_or_default();
    let extra_hours = input.overtime_hours.as_ref().unwrap_or(&zero)
        * input.overtime_rate.as_ref().unwrap_or(&zero);
    let adjust = input.adjust.clone().unwrap_or_default();

    let calculated = &daily + &extra_hours;
    let final_amount = &calculated + &adjust;

    InvoiceAmount {
        daily,
        extra_hours,
        calculated,
        adjust,
        final_amount,
    }
}

impl InvoiceAmount {
    /// Add an extra manual adjustment on top of the existing one.
    pub fn adjusted_by(&self, extra: &BigDecimal) -> InvoiceAmount {
        let adjust = &self.adjust + extra;
        InvoiceAmount {
            final_amount: &self.calculated + &adjust,
            adjust,
            ..self.clone()
        }
    }

    /// Copy rounded to cents for rendering.
    pub fn rounded(&self) -> InvoiceAmount {
        InvoiceAmount {
            daily: money::round_for_display(&self.daily),
            extra_hours: money::round_for_display(&self.extra_hours),
            calculated: money::round_for_display(&self.calculated),
            adjust: money::round_for_display(&self.adjust),
            final_amount: money::round_for_display(&self.final_amount),
        }
    }

    pub fn ensure_payable(&self) -> Result<(), InvoiceError> {
        if self.final_amount < BigDecimal::zero() {
            return Err(InvoiceError::NegativeFinal(self.final_amount.clone()));
        }
        Ok(())
    }
}

impl std::iter::Sum for InvoiceAmount {
    fn sum<I: Iterator<Item = InvoiceAmount>>(iter: I) -> Self {
        iter.fold(InvoiceAmount::default(), |total, amount| InvoiceAmount {
            daily: total.daily + amount.daily,
            extra_hours: total.extra_hours + amount.extra_hours,
            calculated: total.calculated + amount.calculated,
            adjust: total.adjust + amount.adjust,
            final_amount: total.final_amount + amount.final_amount,
        })
    }
}

/// Aggregate amount for several work records, one daily rate per record.
pub fn amount_for_records<'a, I>(records: I) -> InvoiceAmount
where
    I: IntoIterator<Item = &'a WorkRecord>,
{
    records
        .into_iter()
        .map(|record| compute_invoice_amount(&InvoiceAmountInput::from(record)))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Reference;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(value: &str) -> BigDecimal {
        BigDecimal::from_str(value).unwrap()
    }

    fn record(daily: &str, hours: &str, rate: &str, adjust: &str) -> WorkRecord {
        WorkRecord {
            id: "r".to_string(),
            worker: Reference::new("w-1"),
            project: None,
            date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            regular_hours: dec("8"),
            overtime_hours: dec(hours),
            daily_rate: dec(daily),
            overtime_rate: dec(rate),
            manual_adjustment: dec(adjust),
            invoice_id: None,
        }
    }

    #[test]
    fn daily_plus_overtime_plus_adjustment() {
        let amount = compute_invoice_amount(&InvoiceAmountInput {
            daily: Some(dec("100")),
            overtime_hours: Some(dec("2")),
            overtime_rate: Some(dec("15")),
            adjust: Some(dec("-10")),
        });

        assert_eq!(amount.extra_hours, dec("30"));
        assert_eq!(amount.calculated, dec("130"));
        assert_eq!(amount.final_amount, dec("120"));
    }

    #[test]
    fn absent_inputs_count_as_zero() {
        let amount = compute_invoice_amount(&InvoiceAmountInput {
            daily: Some(dec("80")),
            overtime_hours: Some(dec("3")),
            ..Default::default()
        });

        assert_eq!(amount.extra_hours, BigDecimal::zero());
        assert_eq!(amount.final_amount, dec("80"));
        assert_eq!(compute_invoice_amount(&InvoiceAmountInput::default()), InvoiceAmount::default());
    }

    #[test]
    fn negative_rates_are_rejected_but_adjustments_are_not() {
        let bad = InvoiceAmountInput {
            overtime_rate: Some(dec("-1")),
            ..Default::default()
        };
        assert!(matches!(
            bad.validate(),
            Err(InvoiceError::NegativeInput { field: "overtimeRate" })
        ));

        let discount = InvoiceAmountInput {
            adjust: Some(dec("-50")),
            ..Default::default()
        };
        assert!(discount.validate().is_ok());
        assert!(compute_invoice_amount(&discount).ensure_payable().is_err());
    }

    #[test]
    fn records_sum_per_day() {
        let records = [
            record("100", "2", "15", "0"),
            record("120", "0", "20", "-5.50"),
        ];
        let amount = amount_for_records(&records);

        assert_eq!(amount.daily, dec("220"));
        assert_eq!(amount.extra_hours, dec("30"));
        assert_eq!(amount.calculated, dec("250"));
        assert_eq!(amount.final_amount, dec("244.50"));

        let bumped = amount.adjusted_by(&dec("10"));
        assert_eq!(bumped.adjust, dec("4.50"));
        assert_eq!(bumped.final_amount, dec("254.50"));
    }
}
