use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::model::GanttSnapshot;

pub const EXPORT_FORMAT_VERSION: &str = "1.0";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportEnvelope<'a> {
    #[serde(flatten)]
    snapshot: &'a GanttSnapshot,
    version: &'static str,
    exported_at: String,
}

/// Render a snapshot as the pretty-printed JSON document users download.
///
/// The snapshot fields sit at the top level next to `version` and an
/// RFC 3339 `exportedAt` timestamp.
pub fn export_json(snapshot: &GanttSnapshot) -> Result<String, serde_json::Error> {
    let envelope = ExportEnvelope {
        snapshot,
        version: EXPORT_FORMAT_VERSION,
        exported_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    };
    serde_json::to_string_pretty(&envelope)
}
