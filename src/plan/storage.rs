use super::types::{RecalcPlan, PLAN_VERSION};
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::File;
use std::path::Path;

/// Load an update plan from a JSON file
///
/// Read side for the persistence service that applies a saved plan; this
/// crate only writes plans. Fails if the file is missing, malformed, or has
/// an unsupported version.
pub fn load_plan(path: &Path) -> Result<RecalcPlan> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open plan file at {}", path.display()))?;

    let plan: RecalcPlan = serde_json::from_reader(file).context("Failed to load plan")?;

    // Version check
    if plan.version != PLAN_VERSION {
        anyhow::bail!("Unsupported plan version: {}", plan.version);
    }

    Ok(plan)
}

/// Save an update plan to a JSON file atomically
///
/// Uses atomic-write-file to ensure the file is never left in a corrupted state.
/// Creates the parent directory if it doesn't exist.
pub fn save_plan(path: &Path, plan: &RecalcPlan) -> Result<()> {
    crate::config::ensure_parent_dir(path)?;

    // Open atomic write file
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    // Write JSON with pretty formatting
    serde_json::to_writer_pretty(&mut file, plan).context("Failed to serialize plan")?;

    // Commit the write atomically
    file.commit().context("Failed to save plan")?;

    Ok(())
}
