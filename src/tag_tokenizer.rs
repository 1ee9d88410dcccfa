/*!
 * Singer tag tokenizer.
 *
 * Splits one lyric line into segments using `@id@text` markers, where `id`
 * may be a comma-separated list (`@a,b@text`) for a blended segment.
 * The scan is a single left-to-right pass; a tag that cannot be closed or
 * that names no singer degrades to plain text instead of being dropped.
 */

use log::debug;

use crate::model::Segment;

/// Marker delimiting singer ids
const TAG_MARKER: char = '@';

/// Separator between singer ids inside one tag
const SINGER_SEPARATOR: char = ',';

/// Tokenize a raw lyric line into segments.
///
/// Empty or whitespace-only input yields no segments. Input without any
/// recognized tag yields a single untagged segment with the trimmed text.
pub fn tokenize(raw: &str) -> Vec<Segment> {
    let input = raw.trim();
    if input.is_empty() {
        return Vec::new();
    }

    let Some(first_marker) = input.find(TAG_MARKER) else {
        return vec![Segment::plain(input)];
    };

    let mut segments = Vec::new();
    let mut recognized_tags = 0usize;

    push_plain(&mut segments, &input[..first_marker]);

    // `cursor` always sits on an opening marker
    let mut cursor = first_marker;
    loop {
        let ids_start = cursor + TAG_MARKER.len_utf8();
        let Some(close_offset) = input[ids_start..].find(TAG_MARKER) else {
            debug!("Unterminated singer tag, keeping as text: {}", &input[cursor..]);
            push_plain(&mut segments, &input[cursor..]);
            break;
        };

        let ids_end = ids_start + close_offset;
        let body_start = ids_end + TAG_MARKER.len_utf8();
        let body_end = input[body_start..]
            .find(TAG_MARKER)
            .map_or(input.len(), |offset| body_start + offset);

        let singers = parse_singers(&input[ids_start..ids_end]);
        if singers.is_empty() {
            debug!("Singer tag without ids, keeping as text: {}", &input[cursor..body_end]);
            push_plain(&mut segments, &input[cursor..body_end]);
        } else {
            recognized_tags += 1;
            let text = input[body_start..body_end].trim();
            if !text.is_empty() {
                segments.push(Segment::tagged(text, singers));
            }
        }

        if body_end >= input.len() {
            break;
        }
        cursor = body_end;
    }

    if recognized_tags == 0 {
        return vec![Segment::plain(input)];
    }

    segments
}

/// Split a tag's id list into an ordered set of singer ids
fn parse_singers(ids: &str) -> Vec<String> {
    let mut singers: Vec<String> = Vec::new();
    for id in ids.split(SINGER_SEPARATOR).map(str::trim) {
        if !id.is_empty() && !singers.iter().any(|existing| existing == id) {
            singers.push(id.to_string());
        }
    }
    singers
}

fn push_plain(segments: &mut Vec<Segment>, text: &str) {
    let text = text.trim();
    if !text.is_empty() {
        segments.push(Segment::plain(text));
    }
}
