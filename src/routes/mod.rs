//! src/routes/mod.rs

mod admin;
mod health_check;
mod home;
mod login;
mod mic;
mod vendor;

pub use admin::*;
pub use health_check::*;
pub use home::*;
pub use login::*;
pub use mic::*;
pub use vendor::*;

use crate::domain::TimePeriod;

/// An `<option>` of a filter or choice drop-down.
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    /// An "All" entry followed by `values`.
    pub fn with_all(values: &[String], current: &str) -> Vec<SelectOption> {
        let current = current.trim();
        let mut options = vec![SelectOption {
            value: "All".into(),
            label: "All".into(),
            selected: current.is_empty() || current == "All",
        }];
        options.extend(Self::from_values(values, current));
        options
    }

    pub fn from_values(values: &[String], current: &str) -> Vec<SelectOption> {
        values
            .iter()
            .map(|v| SelectOption {
                value: v.clone(),
                label: v.clone(),
                selected: v == current,
            })
            .collect()
    }
}

/// `?period=` of the analysis pages.
#[derive(Debug, Default, serde::Deserialize)]
pub struct PeriodQuery {
    pub period: Option<TimePeriod>,
}

impl PeriodQuery {
    pub fn period_or(&self, default: TimePeriod) -> TimePeriod {
        self.period.unwrap_or(default)
    }
}

pub fn period_options(current: TimePeriod) -> Vec<SelectOption> {
    TimePeriod::CHOICES
        .iter()
        .map(|p| SelectOption {
            value: p.as_str().into(),
            label: p.label().into(),
            selected: *p == current,
        })
        .collect()
}

/// Link card on the dashboards.
pub struct NavCard {
    pub title: &'static str,
    pub description: &'static str,
    pub href: &'static str,
}
