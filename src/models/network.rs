//! Per-unit radio metrics and the network summary.

use serde::{Deserialize, Serialize};

/// Radio state of a mobile unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum UnitStatus {
    #[default]
    Active,
    Warning,
    Inactive,
}

/// Live metrics reported by one cell-on-wheels unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitMetrics {
    pub name: String,
    pub tech: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub status: UnitStatus,

    /// Percent
    pub signal_strength: f64,
    /// Percent of the planned area
    pub coverage: f64,
    pub active_users: u64,
    /// Percent of backhaul capacity
    pub data_usage: f64,
}

/// Units whose metrics feed the network panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkDataset {
    pub units: Vec<UnitMetrics>,
}

impl NetworkDataset {
    pub fn stats(&self) -> NetworkStats {
        NetworkStats::compute(&self.units)
    }
}

impl Default for NetworkDataset {
    fn default() -> Self {
        use UnitStatus::{Active, Warning};

        let units = [
            ("CWH076", "2G/4G", 25.59805, 46.87754, Active, 92.0, 95.0, 1245, 87.0),
            ("CWH022", "2G/4G/5G", 25.63587, 46.83091, Active, 96.0, 98.0, 2156, 92.0),
            ("CWH188", "2G/4G/5G", 25.64236, 46.81855, Active, 94.0, 96.0, 1876, 89.0),
            ("CWH094", "2G/4G/5G", 25.67764, 46.85573, Active, 98.0, 99.0, 2534, 95.0),
            ("COW652", "2G/4G/5G", 25.67445, 46.8308, Active, 91.0, 93.0, 1432, 85.0),
            ("CWS808", "2G/4G/5G", 25.6609, 46.86093, Active, 95.0, 97.0, 2089, 91.0),
            ("COW636", "2G/4G/5G", 25.61766, 46.82656, Active, 93.0, 95.0, 1654, 88.0),
            ("CWH352", "2G/4G/5G", 25.68984, 46.852437, Active, 97.0, 98.0, 2312, 93.0),
            ("CWH973", "2G/4G/5G", 25.63117, 46.862969, Active, 89.0, 91.0, 987, 82.0),
            ("CWH940", "2G/4G/5G", 25.72821, 46.83006, Active, 92.0, 94.0, 1765, 86.0),
            ("CWH941", "2G/4G/5G", 25.70092, 46.87303, Active, 94.0, 96.0, 2001, 90.0),
            ("CWH942", "2G/4G/5G", 25.73222, 46.86446, Active, 96.0, 97.0, 2243, 92.0),
            ("CWH943", "2G/4G/5G", 25.72473, 46.89682, Warning, 78.0, 82.0, 1432, 78.0),
            ("CWH935", "2G/4G/5G", 25.67836, 46.90278, Active, 91.0, 93.0, 1678, 84.0),
            ("CWH937", "2G/4G/5G", 25.647401, 46.843437, Active, 95.0, 96.0, 2134, 89.0),
            ("CWH944", "2G/4G/5G", 25.6327, 46.890079, Active, 90.0, 92.0, 1545, 83.0),
            ("CWH945", "2G/4G/5G", 25.701437, 46.916691, Active, 93.0, 95.0, 1823, 87.0),
        ];

        Self {
            units: units
                .into_iter()
                .map(
                    |(name, tech, latitude, longitude, status, signal_strength, coverage, active_users, data_usage)| {
                        UnitMetrics {
                            name: name.to_string(),
                            tech: tech.to_string(),
                            latitude,
                            longitude,
                            status,
                            signal_strength,
                            coverage,
                            active_users,
                            data_usage,
                        }
                    },
                )
                .collect(),
        }
    }
}

/// Summary block of the network panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStats {
    pub total_units: usize,
    pub active_units: usize,
    pub warning_units: usize,
    pub inactive_units: usize,
    pub total_active_users: u64,

    /// Mean signal strength, rounded to a whole percent; 0 with no units
    pub avg_signal_strength: u64,
    /// Mean data usage, rounded to a whole percent; 0 with no units
    pub avg_data_usage: u64,
}

impl NetworkStats {
    pub fn compute(units: &[UnitMetrics]) -> Self {
        let with_status = |status: UnitStatus| units.iter().filter(|u| u.status == status).count();

        Self {
            total_units: units.len(),
            active_units: with_status(UnitStatus::Active),
            warning_units: with_status(UnitStatus::Warning),
            inactive_units: with_status(UnitStatus::Inactive),
            total_active_users: units.iter().map(|u| u.active_users).sum(),
            avg_signal_strength: rounded_mean(units.iter().map(|u| u.signal_strength)),
            avg_data_usage: rounded_mean(units.iter().map(|u| u.data_usage)),
        }
    }
}

/// Mean of finite, non-negative values rounded half away from zero.
fn rounded_mean(values: impl Iterator<Item = f64>) -> u64 {
    let (sum, count) = values
        .filter(|v| v.is_finite() && *v >= 0.0)
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        return 0;
    }
    (sum / count as f64).round() as u64
}
