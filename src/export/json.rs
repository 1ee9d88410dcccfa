//! JSON rendering.

use serde_json::{Map, Value, json};

use crate::export::ExportOptions;
use crate::model::LyricLine;

/// `{ "lyrics": [ { "time", "text", "segments"? } ] }`, pretty-printed.
///
/// Times are plain seconds. Segments are omitted when singer tags are
/// disabled.
pub fn render(lines: &[&LyricLine], options: &ExportOptions) -> String {
    let lyrics: Vec<Value> = lines
        .iter()
        .map(|line| {
            let mut entry = Map::new();
            entry.insert("time".to_string(), json!(line.time));
            entry.insert("text".to_string(), json!(line.text));
            if options.include_singer_tags {
                entry.insert("segments".to_string(), json!(line.segments));
            }
            Value::Object(entry)
        })
        .collect();

    format!("{:#}", json!({ "lyrics": lyrics }))
}
