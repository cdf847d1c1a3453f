/// Hourly rates in euros, keyed by the service identifier used in the forms.
pub const SERVICE_RATES: [(&str, f64); 6] = [
    ("entretien", 26.0),
    ("jardinage", 28.0),
    ("bricolage", 30.0),
    ("garde", 32.0),
    ("soutien", 34.0),
    ("courses", 24.0),
];

/// Share of the gross amount refunded as a tax credit.
pub const CREDIT_RATE: f64 = 0.5;

/// Rate for `service`, or `0.0` when the key is empty or unknown.
pub fn rate_for(service: &str) -> f64 {
    SERVICE_RATES
        .iter()
        .find(|(key, _)| *key == service)
        .map(|(_, rate)| *rate)
        .unwrap_or(0.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBreakdown {
    pub gross: f64,
    pub credit: f64,
    pub net: f64,
}

impl PriceBreakdown {
    pub fn compute(hours: f64, rate: f64) -> Self {
        let gross = hours * rate;
        let credit = gross * CREDIT_RATE;
        Self {
            gross,
            credit,
            net: gross - credit,
        }
    }

    pub fn for_service(service: &str, hours: f64) -> Self {
        Self::compute(hours, rate_for(service))
    }
}
