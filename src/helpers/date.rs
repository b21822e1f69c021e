//! Date helper functions

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, FixedOffset, Locale, TimeZone};
use chrono_tz::Tz;

use crate::config::SiteConfig;

/// Formats CMS publication timestamps for display
#[derive(Debug, Clone)]
pub struct DateFormatter {
    format: String,
    locale: Locale,
    timezone: Tz,
}

impl DateFormatter {
    /// Create a formatter from a Moment.js-style format, a locale name
    /// (`pt_BR`) and an IANA timezone (`America/Sao_Paulo`)
    pub fn new(format: &str, language: &str, timezone: &str) -> Result<Self> {
        let locale = Locale::try_from(language)
            .map_err(|_| anyhow!("Unknown locale: {}", language))?;
        let timezone = if timezone.is_empty() {
            Tz::UTC
        } else {
            timezone
                .parse::<Tz>()
                .map_err(|_| anyhow!("Unknown timezone: {}", timezone))?
        };

        Ok(Self {
            format: moment_to_chrono_format(format),
            locale,
            timezone,
        })
    }

    pub fn from_config(config: &SiteConfig) -> Result<Self> {
        Self::new(&config.date_format, &config.language, &config.timezone)
    }

    /// Parse and format a CMS timestamp, e.g. `2021-03-25T19:25:28+0000`
    pub fn format(&self, timestamp: &str) -> Result<String> {
        let date = parse_timestamp(timestamp)?;
        Ok(self.format_date(&date))
    }

    pub fn format_date<T: TimeZone>(&self, date: &DateTime<T>) -> String {
        date.with_timezone(&self.timezone)
            .format_localized(&self.format, self.locale)
            .to_string()
    }
}

/// Parse a CMS timestamp. Both `+0000` and RFC 3339 `+00:00` offsets occur.
pub fn parse_timestamp(timestamp: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(timestamp)
        .or_else(|_| DateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%z"))
        .with_context(|| format!("Invalid publication date: {:?}", timestamp))
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    let replacements = [
        // Year
        ("YYYY", "%Y"),
        ("YY", "%y"),
        // Month
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        // Day of month
        ("DDDD", "%j"),
        ("DD", "%d"),
        // Hour
        ("HH", "%H"),
        ("hh", "%I"),
        // Minute
        ("mm", "%M"),
        // Second
        ("ss", "%S"),
        // Day of week
        ("dddd", "%A"),
        ("ddd", "%a"),
        // Timezone
        ("ZZ", "%z"),
    ];

    let mut result = format.to_string();

    for (from, to) in replacements {
        result = result.replace(from, to);
    }

    result
}
