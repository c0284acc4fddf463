use std::time::Duration;

use crate::error::AppError;

/// Source of the short calendar text shown on the dashboard.
pub trait CalendarSource {
    /// Fetch up to a couple of display lines. Failures are the caller's to
    /// handle; the dashboard blanks its rows.
    fn fetch(&self) -> Result<Vec<String>, AppError>;
}

/// Fetches plain-text event lines from a configured HTTP endpoint
/// (one event per line, already formatted for a 20-column display).
pub struct HttpCalendar {
    http: reqwest::blocking::Client,
    url: String,
}

impl HttpCalendar {
    pub fn new(url: &str) -> Result<Self, AppError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()?;
        Ok(Self {
            http,
            url: url.to_string(),
        })
    }
}

impl CalendarSource for HttpCalendar {
    fn fetch(&self) -> Result<Vec<String>, AppError> {
        let text = self.http.get(&self.url).send()?.error_for_status()?.text()?;
        Ok(text
            .lines()
            .take(2)
            .map(|line| line.trim_end().to_string())
            .collect())
    }
}

/// Used when no calendar URL is configured.
pub struct NoCalendar;

impl CalendarSource for NoCalendar {
    fn fetch(&self) -> Result<Vec<String>, AppError> {
        Ok(Vec::new())
    }
}
