//! Human-readable summary renderer for catalog diffs.

use crate::diff::model::{DiffClassification, DiffSummary};

/// Render a Markdown summary of a [`DiffSummary`].
///
/// Informational only; the operation stream is the source of truth.
pub fn render_human_summary(summary: &DiffSummary) -> String {
    let mut out = String::new();

    out.push_str("## Catalog Diff\n\n");

    let class_label = match summary.classification {
        DiffClassification::Identical => "Identical",
        DiffClassification::Changed => "Changed",
    };
    let mode_label = if summary.strict_change_detection {
        "strict (unchanged records skipped)"
    } else {
        "default (every surviving record updated)"
    };
    out.push_str(&format!(
        "**Classification**: {class_label}  \n**Change detection**: {mode_label}\n\n"
    ));

    out.push_str("### Snapshots\n\n");
    out.push_str(&format!(
        "| | Records | Digest |\n\
         |---|---|---|\n\
         | Before | {} | `{}` |\n\
         | After | {} | `{}` |\n\n",
        summary.before_records,
        short(&summary.identity.before_digest),
        summary.after_records,
        short(&summary.identity.after_digest),
    ));

    let counts = &summary.counts;
    out.push_str("### Operations\n\n");
    out.push_str(&format!("- **CREATE**: {}\n", counts.creates));
    out.push_str(&format!("- **UPDATE**: {}\n", counts.updates));
    out.push_str(&format!("- **DELETE**: {}\n", counts.deletes));
    if summary.strict_change_detection {
        out.push_str(&format!("- **Unchanged**: {}\n", counts.unchanged));
    }
    out.push_str(&format!("\n**Total**: {}\n", counts.total()));

    out
}

/// First 12 hex chars of a digest.
fn short(digest: &str) -> &str {
    digest.get(..12).unwrap_or(digest)
}
