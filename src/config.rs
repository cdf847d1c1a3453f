use super::*;

/// Presentation constants of the site. `Default` matches the live page.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    /// Page URL; its origin scopes the local store.
    pub document_url: String,
    pub copy_idle_label: String,
    pub copy_success_label: String,
    pub copy_failure_label: String,
    /// Delay before the copy button returns to its idle label.
    pub copy_label_reset_ms: i64,
    pub testimonial_interval_ms: i64,
    pub testimonials: Vec<Testimonial>,
    /// Scroll offset past which the back-to-top button shows.
    pub back_to_top_threshold: f64,
    /// Visible fraction at which a `.reveal` element is revealed.
    pub reveal_threshold: f64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            document_url: "https://presenceplus.fr/".to_string(),
            copy_idle_label: "Copier le récapitulatif".to_string(),
            copy_success_label: "Récapitulatif copié".to_string(),
            copy_failure_label: "Copie impossible".to_string(),
            copy_label_reset_ms: 2000,
            testimonial_interval_ms: 6000,
            testimonials: Testimonial::defaults(),
            back_to_top_threshold: 400.0,
            reveal_threshold: 0.2,
        }
    }
}

impl SiteConfig {
    pub fn validate(&self) -> Result<()> {
        if self.copy_label_reset_ms < 0 {
            return Err(Error::Runtime(format!(
                "copy_label_reset_ms must be non-negative (got {})",
                self.copy_label_reset_ms
            )));
        }
        if self.testimonial_interval_ms <= 0 {
            return Err(Error::Runtime(format!(
                "testimonial_interval_ms must be positive (got {})",
                self.testimonial_interval_ms
            )));
        }
        if !self.back_to_top_threshold.is_finite() {
            return Err(Error::Runtime(
                "back_to_top_threshold must be finite".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.reveal_threshold) {
            return Err(Error::Runtime(format!(
                "reveal_threshold must be within 0..=1 (got {})",
                self.reveal_threshold
            )));
        }
        Ok(())
    }
}
