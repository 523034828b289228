//! src/domain/analytics.rs
//!
//! Aggregates behind the vendor sales/menu pages and the MIC participation
//! page. `today` is always passed in so that periods are deterministic.

use crate::domain::{calendar_date, FoodOrder, MenuItem};
use chrono::{Datelike, NaiveDate};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimePeriod {
    #[default]
    All,
    Week,
    Month,
    Year,
}

impl TimePeriod {
    pub const CHOICES: [TimePeriod; 4] = [
        TimePeriod::All,
        TimePeriod::Week,
        TimePeriod::Month,
        TimePeriod::Year,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimePeriod::All => "all",
            TimePeriod::Week => "week",
            TimePeriod::Month => "month",
            TimePeriod::Year => "year",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimePeriod::All => "All Time",
            TimePeriod::Week => "Last Week",
            TimePeriod::Month => "This Month",
            TimePeriod::Year => "This Year",
        }
    }

    /// Week counts anything at most seven days before `today`, including
    /// dates in the future.
    pub fn includes(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            TimePeriod::All => true,
            TimePeriod::Week => (today - date).num_days() <= 7,
            TimePeriod::Month => date.year() == today.year() && date.month() == today.month(),
            TimePeriod::Year => date.year() == today.year(),
        }
    }

    /// Undated records only count towards `All`.
    fn includes_raw(&self, date: &str, today: NaiveDate) -> bool {
        match calendar_date(date) {
            Some(date) => self.includes(date, today),
            None => *self == TimePeriod::All,
        }
    }

    fn sales_label(&self, date: Option<NaiveDate>) -> String {
        let Some(date) = date else {
            return "Undated".into();
        };
        match self {
            TimePeriod::Week => format!("Week {}", date.day() / 7 + 1),
            TimePeriod::Month | TimePeriod::All => date.format("%b %Y").to_string(),
            TimePeriod::Year => date.format("%Y").to_string(),
        }
    }
}

/// One row of a bar table. `percent` is relative to the largest value.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub percent: u32,
}

impl Bar {
    pub fn value_display(&self) -> String {
        if self.value.fract() == 0.0 {
            format!("{:.0}", self.value)
        } else {
            format!("{:.2}", self.value)
        }
    }
}

pub fn bars(values: &[(String, f64)]) -> Vec<Bar> {
    let max = values.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
    values
        .iter()
        .map(|(label, value)| Bar {
            label: label.clone(),
            value: *value,
            percent: if max > 0.0 {
                (value / max * 100.0).round().clamp(0.0, 100.0) as u32
            } else {
                0
            },
        })
        .collect()
}

/// Revenue per period label, in the order labels are first seen.
pub fn sales_by_period(
    orders: &[FoodOrder],
    period: TimePeriod,
    today: NaiveDate,
) -> Vec<(String, f64)> {
    let mut sales: Vec<(String, f64)> = Vec::new();
    for order in orders
        .iter()
        .filter(|o| period.includes_raw(&o.date, today))
    {
        let label = period.sales_label(calendar_date(&order.date));
        match sales.iter_mut().find(|(l, _)| *l == label) {
            Some((_, revenue)) => *revenue += order.total,
            None => sales.push((label, order.total)),
        }
    }
    sales
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemSales {
    pub name: String,
    pub sold: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuAnalysis {
    pub items: Vec<ItemSales>,
    pub total_revenue: f64,
    pub total_items_sold: u64,
    pub most_popular: Option<ItemSales>,
}

impl MenuAnalysis {
    pub fn total_revenue_display(&self) -> String {
        format!("LKR {:.2}", self.total_revenue)
    }

    pub fn bars(&self) -> Vec<Bar> {
        let values: Vec<(String, f64)> = self
            .items
            .iter()
            .map(|i| (i.name.clone(), i.sold as f64))
            .collect();
        bars(&values)
    }
}

/// Per menu item, the number of orders in `period` that contain it.
pub fn menu_item_sales(
    menu: &[MenuItem],
    orders: &[FoodOrder],
    period: TimePeriod,
    today: NaiveDate,
) -> MenuAnalysis {
    let orders: Vec<&FoodOrder> = orders
        .iter()
        .filter(|o| period.includes_raw(&o.date, today))
        .collect();
    let items: Vec<ItemSales> = menu
        .iter()
        .map(|item| ItemSales {
            name: item.name.clone(),
            sold: orders
                .iter()
                .filter(|o| o.items.iter().any(|i| *i == item.name))
                .count() as u64,
        })
        .collect();
    let mut most_popular: Option<&ItemSales> = None;
    for item in &items {
        if most_popular.map_or(true, |best| item.sold > best.sold) {
            most_popular = Some(item);
        }
    }
    MenuAnalysis {
        total_revenue: orders.iter().map(|o| o.total).sum(),
        total_items_sold: items.iter().map(|i| i.sold).sum(),
        most_popular: most_popular.cloned(),
        items,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventParticipation {
    pub name: String,
    pub participants: u64,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParticipationAnalysis {
    pub events: Vec<EventParticipation>,
    pub best: Option<EventParticipation>,
}

impl ParticipationAnalysis {
    pub fn total_events(&self) -> usize {
        self.events.len()
    }

    pub fn bars(&self) -> Vec<Bar> {
        let values: Vec<(String, f64)> = self
            .events
            .iter()
            .map(|e| (e.name.clone(), e.participants as f64))
            .collect();
        bars(&values)
    }
}

pub fn participation(
    events: Vec<EventParticipation>,
    period: TimePeriod,
    today: NaiveDate,
) -> ParticipationAnalysis {
    let events: Vec<EventParticipation> = events
        .into_iter()
        .filter(|e| period.includes_raw(&e.date, today))
        .collect();
    let mut best: Option<&EventParticipation> = None;
    for event in &events {
        if best.map_or(true, |b| event.participants > b.participants) {
            best = Some(event);
        }
    }
    ParticipationAnalysis {
        best: best.cloned(),
        events,
    }
}
