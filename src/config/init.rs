use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::Path;

use super::ensure_parent_dir;

/// Starter configuration written by `electre-rank init`.
pub const TEMPLATE: &str = r#"# electre-rank configuration
#
# normalization rule:
#   1  vector      a / sqrt(sum(a^2))           ignores min/max
#   2  min-max     (a - min) / (max - min)      direction aware
#   3  ratio       a / max  or  min / a         direction aware
#   4  z-score     (a - mean) / std             ignores min/max
normalization: 2

# C(a,b) must be strictly above this for concordant dominance.
concordance_threshold: 0.5

# D(a,b) must be strictly below this for discordant dominance.
# Leave unset to use the mean of the discordance matrix.
# discordance_threshold: 0.3

# One entry per column of the decision matrix. Weights must sum to 1.
criteria:
  - { name: price, direction: min, weight: 0.3 }
  - { name: storage, direction: max, weight: 0.1 }
  - { name: camera, direction: max, weight: 0.2 }
  - { name: battery, direction: max, weight: 0.4 }
"#;

/// Write [`TEMPLATE`] to `path` atomically.
///
/// Refuses to replace an existing file unless `force` is set.
pub fn write_template(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {}. Pass --force to overwrite",
            path.display()
        );
    }

    ensure_parent_dir(path)?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(TEMPLATE.as_bytes())
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save config to {}", path.display()))?;

    Ok(())
}
