//! Production chart lifecycle
//!
//! `Idle -> Constructed -> Updated* -> Disposed`. The chart is never rebuilt
//! during normal refreshes.

use crate::models::ProductionSeries;
use crate::render::{ChartHandle, RenderSurface, RenderTarget};

/// Observable phase of the chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartPhase {
    Idle,
    Constructed,
    /// Mutated in place `n` times since construction
    Updated(u64),
    Disposed,
}

pub(super) enum ChartLifecycle {
    Idle,
    Live {
        handle: Box<dyn ChartHandle>,
        updates: u64,
    },
    Disposed,
}

impl ChartLifecycle {
    pub fn phase(&self) -> ChartPhase {
        match self {
            ChartLifecycle::Idle => ChartPhase::Idle,
            ChartLifecycle::Live { updates: 0, .. } => ChartPhase::Constructed,
            ChartLifecycle::Live { updates, .. } => ChartPhase::Updated(*updates),
            ChartLifecycle::Disposed => ChartPhase::Disposed,
        }
    }

    /// Build the chart on first data, mutate it afterwards
    pub fn apply(&mut self, surface: &dyn RenderSurface, series: &ProductionSeries) {
        match self {
            ChartLifecycle::Idle => {
                if !surface.has_target(RenderTarget::ProductionChart) {
                    return;
                }
                match surface.create_chart(series) {
                    Some(handle) => {
                        tracing::debug!(points = series.len(), "Production chart constructed");
                        *self = ChartLifecycle::Live { handle, updates: 0 };
                    }
                    None => tracing::debug!("Surface has no chart region, chart left idle"),
                }
            }
            ChartLifecycle::Live { handle, updates } => {
                handle.update(series);
                *updates += 1;
            }
            ChartLifecycle::Disposed => {}
        }
    }

    /// Release the chart resource. Further `apply` calls are ignored.
    pub fn dispose(&mut self) {
        if let ChartLifecycle::Live { handle, .. } =
            std::mem::replace(self, ChartLifecycle::Disposed)
        {
            handle.destroy();
        }
    }
}
