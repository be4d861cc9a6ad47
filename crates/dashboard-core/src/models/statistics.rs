//! Dashboard statistics and chart series.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::decimal;
use crate::error::{Error, InvalidInputError};

/// Headline numbers for the dashboard cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(deserialize_with = "decimal")]
    pub total_revenue: f64,
    pub active_users: u64,
    pub completed_projects: u64,
    #[serde(deserialize_with = "decimal")]
    pub conversion_rate: f64,
    #[serde(deserialize_with = "decimal")]
    pub total_sales: f64,
    pub sales_distribution: SalesDistribution,
}

/// Share of sales per category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalesDistribution {
    #[serde(deserialize_with = "decimal")]
    pub products: f64,
    #[serde(deserialize_with = "decimal")]
    pub services: f64,
    #[serde(deserialize_with = "decimal")]
    pub subscriptions: f64,
    #[serde(deserialize_with = "decimal")]
    pub consulting: f64,
}

impl SalesDistribution {
    pub fn total(&self) -> f64 {
        self.products + self.services + self.subscriptions + self.consulting
    }
}

/// Time window for the performance chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartPeriod {
    #[default]
    Week,
    Month,
    Year,
}

impl ChartPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartPeriod::Week => "week",
            ChartPeriod::Month => "month",
            ChartPeriod::Year => "year",
        }
    }
}

impl fmt::Display for ChartPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartPeriod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "week" => Ok(ChartPeriod::Week),
            "month" => Ok(ChartPeriod::Month),
            "year" => Ok(ChartPeriod::Year),
            other => Err(InvalidInputError::Other {
                message: format!("unknown chart period '{}'", other),
            }
            .into()),
        }
    }
}

/// Labelled series for the revenue/expenses chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
    #[serde(default)]
    pub color: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dashboard_stats_accept_decimal_strings() {
        let stats: DashboardStats = serde_json::from_value(json!({
            "total_revenue": "156420.00",
            "active_users": 12847,
            "completed_projects": 342,
            "conversion_rate": "24.80",
            "total_sales": 85420,
            "sales_distribution": {
                "products": 35.0,
                "services": 25.0,
                "subscriptions": 25.0,
                "consulting": 15.0
            }
        }))
        .unwrap();

        assert_eq!(stats.total_revenue, 156420.0);
        assert_eq!(stats.conversion_rate, 24.8);
        assert_eq!(stats.sales_distribution.total(), 100.0);
    }

    #[test]
    fn chart_data_decodes() {
        let chart: ChartData = serde_json::from_value(json!({
            "labels": ["W1", "W2", "W3", "W4"],
            "datasets": [
                {"label": "revenue", "data": [85000, 92000, 78000, 105000], "color": "#00d9ff"},
                {"label": "expenses", "data": [55000, 62000, 48000, 70000], "color": "#8b5cf6"}
            ]
        }))
        .unwrap();
        assert_eq!(chart.labels.len(), 4);
        assert_eq!(chart.datasets[1].data[3], 70000.0);
    }

    #[test]
    fn period_defaults_to_week() {
        assert_eq!(ChartPeriod::default().as_str(), "week");
        assert_eq!("year".parse::<ChartPeriod>().unwrap(), ChartPeriod::Year);
        assert!("decade".parse::<ChartPeriod>().is_err());
    }
}
