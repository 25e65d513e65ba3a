use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::money;

use super::location::Location;

/// One requested option: a run length paired with its net rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingOption {
    pub duration_weeks: u32,
    pub net_rate: Decimal,
}

impl PricingOption {
    pub fn new(duration_weeks: u32, net_rate: Decimal) -> Self {
        PricingOption { duration_weeks, net_rate }
    }

    /// Pair duration and rate lists that were extracted separately upstream.
    /// The lists must line up one to one; nothing is truncated or padded.
    pub fn from_parallel_lists(
        durations: &[u32],
        rates: &[Decimal],
    ) -> Result<Vec<PricingOption>, ValidationError> {
        if durations.len() != rates.len() {
            return Err(ValidationError::MismatchedOptions {
                durations: durations.len(),
                rates: rates.len(),
            });
        }
        Ok(durations
            .iter()
            .zip(rates)
            .map(|(&duration_weeks, &net_rate)| PricingOption { duration_weeks, net_rate })
            .collect())
    }

    /// `"2 Weeks"`, or `"1 Week"` for a single week.
    pub fn duration_label(&self) -> String {
        if self.duration_weeks == 1 {
            "1 Week".to_owned()
        } else {
            format!("{} Weeks", self.duration_weeks)
        }
    }

    /// Derive VAT and total for this option. VAT is rounded half-up to cents
    /// here and nowhere else; the total is the plain sum.
    pub fn price(&self) -> PricedOption {
        let vat = money::vat_on(self.net_rate);
        PricedOption {
            duration_weeks: self.duration_weeks,
            net_rate: self.net_rate,
            vat,
            total: self.net_rate + vat,
        }
    }
}

/// A fully derived pricing row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedOption {
    pub duration_weeks: u32,
    pub net_rate: Decimal,
    pub vat: Decimal,
    pub total: Decimal,
}

impl PricedOption {
    pub fn duration_label(&self) -> String {
        PricingOption::new(self.duration_weeks, self.net_rate).duration_label()
    }
}

/// Everything the builder needs to produce one proposal slide.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalRequest {
    pub location: Location,
    pub start_date: NaiveDate,
    pub options: Vec<PricingOption>,
    pub client_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_by: Option<String>,
}

impl ProposalRequest {
    pub fn new(
        location: Location,
        start_date: NaiveDate,
        options: Vec<PricingOption>,
        client_name: impl Into<String>,
    ) -> Self {
        ProposalRequest {
            location,
            start_date,
            options,
            client_name: client_name.into(),
            submitted_by: None,
        }
    }

    pub fn submitted_by(mut self, who: impl Into<String>) -> Self {
        self.submitted_by = Some(who.into());
        self
    }

    /// The request-level checks. Runs before any deck is read or mutated.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.options.is_empty() {
            return Err(ValidationError::EmptyOptions);
        }
        for (index, option) in self.options.iter().enumerate() {
            if option.duration_weeks == 0 {
                return Err(ValidationError::NonPositiveDuration { index });
            }
            if option.net_rate <= Decimal::ZERO {
                return Err(ValidationError::NonPositiveRate { index, rate: option.net_rate });
            }
        }
        Ok(())
    }

    /// Derived rows in input order.
    pub fn priced_options(&self) -> Vec<PricedOption> {
        self.options.iter().map(PricingOption::price).collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::{Location, PricingOption, ProposalRequest, ValidationError};

    fn gateway_request(options: Vec<PricingOption>) -> ProposalRequest {
        ProposalRequest::new(
            Location::Gateway,
            NaiveDate::from_ymd_opt(2024, 2, 15).expect("valid date"),
            options,
            "Acme Motors",
        )
    }

    #[test]
    fn prices_each_option_independently_in_order() {
        let request = gateway_request(vec![
            PricingOption::new(2, Decimal::from(2_000_000)),
            PricingOption::new(4, Decimal::from(3_500_000)),
        ]);

        let priced = request.priced_options();
        assert_eq!(priced[0].vat, Decimal::from(100_000));
        assert_eq!(priced[0].total, Decimal::from(2_100_000));
        assert_eq!(priced[1].vat, Decimal::from(175_000));
        assert_eq!(priced[1].total, Decimal::from(3_675_000));
    }

    #[test]
    fn total_minus_net_equals_vat_to_the_cent() {
        for net in ["1017.77", "333333.33", "49999.995", "1.01"] {
            let option = PricingOption::new(3, net.parse::<Decimal>().expect("decimal"));
            let priced = option.price();
            assert_eq!(priced.total - priced.net_rate, priced.vat, "net={net}");
        }
    }

    #[test]
    fn empty_options_fail_validation() {
        assert_eq!(gateway_request(vec![]).validate(), Err(ValidationError::EmptyOptions));
    }

    #[test]
    fn zero_duration_fails_with_its_index() {
        let request = gateway_request(vec![
            PricingOption::new(2, Decimal::from(500)),
            PricingOption::new(0, Decimal::from(900)),
        ]);

        assert_eq!(request.validate(), Err(ValidationError::NonPositiveDuration { index: 1 }));
    }

    #[test]
    fn non_positive_rate_fails_with_its_index() {
        let request = gateway_request(vec![PricingOption::new(2, Decimal::ZERO)]);

        assert_eq!(
            request.validate(),
            Err(ValidationError::NonPositiveRate { index: 0, rate: Decimal::ZERO })
        );
    }

    #[test]
    fn parallel_lists_must_line_up() {
        let durations = [2u32, 4, 6];
        let rates = [Decimal::from(100), Decimal::from(200)];

        assert_eq!(
            PricingOption::from_parallel_lists(&durations, &rates),
            Err(ValidationError::MismatchedOptions { durations: 3, rates: 2 })
        );

        let paired = PricingOption::from_parallel_lists(&durations[..2], &rates)
            .expect("matched lists pair up");
        assert_eq!(paired.len(), 2);
        assert_eq!(paired[1].duration_weeks, 4);
        assert_eq!(paired[1].net_rate, Decimal::from(200));
    }

    #[test]
    fn duration_labels_pluralise() {
        assert_eq!(PricingOption::new(1, Decimal::ONE).duration_label(), "1 Week");
        assert_eq!(PricingOption::new(12, Decimal::ONE).duration_label(), "12 Weeks");
    }
}
