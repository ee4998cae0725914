use image::RgbImage;
use kurbo::Point;
use rayon::prelude::*;

use crate::composite::pipeline::composite;
use crate::config::effect::EffectConfig;
use crate::foundation::core::TimeOfDay;
use crate::foundation::error::{BillboardError, BillboardResult};

/// One independent composite request.
#[derive(Clone, Debug)]
pub struct CompositeJob<'a> {
    /// Photo containing the frame.
    pub destination: &'a RgbImage,
    /// Image placed into the frame.
    pub creative: &'a RgbImage,
    /// Frame corners, any order.
    pub corners: Vec<Point>,
    /// Effect parameters for this job.
    pub config: EffectConfig,
    /// Lighting regime of the photo.
    pub time_of_day: TimeOfDay,
}

/// Settings for [`composite_batch`].
#[derive(Clone, Debug, Default)]
pub struct BatchOptions {
    /// Worker count; `None` uses rayon's default.
    pub threads: Option<usize>,
}

/// Run every job on a dedicated thread pool.
///
/// The outer error covers pool setup only. Per-job failures are returned in
/// place, in input order, and do not stop the other jobs.
#[tracing::instrument(skip(jobs), fields(jobs = jobs.len()))]
pub fn composite_batch(
    jobs: &[CompositeJob<'_>],
    opts: &BatchOptions,
) -> BillboardResult<Vec<BillboardResult<RgbImage>>> {
    if jobs.is_empty() {
        return Ok(Vec::new());
    }
    let pool = build_thread_pool(opts.threads)?;
    let results = pool.install(|| {
        jobs.par_iter()
            .map(|job| {
                composite(
                    job.destination,
                    job.creative,
                    &job.corners,
                    &job.config,
                    job.time_of_day,
                )
            })
            .collect::<Vec<_>>()
    });
    let failed = results.iter().filter(|r| r.is_err()).count();
    tracing::debug!(failed, "batch finished");
    Ok(results)
}

fn build_thread_pool(threads: Option<usize>) -> BillboardResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(BillboardError::config("batch 'threads' must be >= 1 when set"));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| BillboardError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/composite/batch.rs"]
mod tests;
