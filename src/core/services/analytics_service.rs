use std::fs;
use std::path::Path;

use chrono_tz::Tz;

use crate::analytics::{self, export, DashboardTiles};
use crate::core::clock::Clock;
use crate::domain::donation::{AnalyticsSnapshot, AnalyticsSummary};

use super::ServiceResult;

/// Reads exported donation snapshots and turns them into dashboard
/// figures and CSV exports.
pub struct AnalyticsService;

impl AnalyticsService {
    /// Loads a snapshot from a JSON export on disk.
    pub fn load_snapshot(path: &Path) -> ServiceResult<AnalyticsSnapshot> {
        let data = fs::read_to_string(path).map_err(crate::errors::CoreError::Io)?;
        let snapshot: AnalyticsSnapshot =
            serde_json::from_str(&data).map_err(crate::errors::CoreError::Serde)?;
        tracing::debug!(
            donations = snapshot.donations.len(),
            subscriptions = snapshot.recurring_donations.len(),
            "snapshot loaded"
        );
        Ok(snapshot)
    }

    pub fn dashboard(
        snapshot: &AnalyticsSnapshot,
        clock: &dyn Clock,
        tz: Tz,
    ) -> DashboardTiles {
        analytics::dashboard_tiles(snapshot, clock.now(), tz)
    }

    pub fn summary(snapshot: &AnalyticsSnapshot) -> AnalyticsSummary {
        analytics::rebuild_summary(&snapshot.donations)
    }

    /// Writes the succeeded donations of a snapshot as CSV.
    pub fn export_csv(snapshot: &AnalyticsSnapshot, out: &Path) -> ServiceResult<()> {
        let csv = export::donations_csv(&snapshot.donations);
        fs::write(out, csv).map_err(crate::errors::CoreError::Io)?;
        tracing::info!(path = %out.display(), "donation export written");
        Ok(())
    }
}
