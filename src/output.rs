//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::Epic;

/// Trait for human-readable key-value output.
///
/// Implemented by model types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for Epic {
    fn pretty_print(&self) -> String {
        let header = format!("Epic &{}: {}", self.iid, self.title);
        let divider = "─".repeat(header.chars().count().clamp(30, 80));

        let mut lines = vec![
            header,
            divider,
            format!("State:          {}", self.state),
            format!("Group:          {}", self.group_id),
        ];

        if let Some(ref author) = self.author {
            lines.push(format!("Author:         {} (@{})", author.name, author.username));
        }

        if !self.labels.is_empty() {
            lines.push(format!("Labels:         {}", self.labels.join(", ")));
        }

        if let Some(start) = self.start_date {
            let origin = if self.start_date_is_fixed { "fixed" } else { "inherited" };
            lines.push(format!("Start:          {} ({origin})", start.format("%Y-%m-%d")));
        }

        if let Some(due) = self.due_date {
            let origin = if self.due_date_is_fixed { "fixed" } else { "inherited" };
            lines.push(format!("Due:            {} ({origin})", due.format("%Y-%m-%d")));
        }

        if let Some(ref created) = self.created_at {
            lines.push(format!("Created:        {}", created.format("%Y-%m-%d %H:%M:%S UTC")));
        }

        if let Some(ref closed) = self.closed_at {
            lines.push(format!("Closed:         {}", closed.format("%Y-%m-%d %H:%M:%S UTC")));
        }

        if !self.web_url.is_empty() {
            lines.push(format!("URL:            {}", self.web_url));
        }

        lines.join("\n")
    }
}
