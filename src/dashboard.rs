use crate::structs::{DisplayNote, NoteBody, NoteRecord};

/// Most recent notes shown on the dashboard.
pub const FEED_LIMIT: usize = 10;

#[derive(Debug, Default, PartialEq)]
pub struct Counts {
    pub title: usize,
    pub content: usize,
    pub data: usize,
}

pub struct FeedEntry {
    pub note: DisplayNote,
    pub kind: &'static str,
    pub label: &'static str,
}

pub struct Dashboard {
    pub counts: Counts,
    pub feed: Vec<FeedEntry>,
}

/// Per-type counts plus the recency feed: every record adapted and labelled,
/// stable-sorted newest first (ties keep insertion order), capped after the
/// sort so the top 10 is correct for any collection size.
pub fn aggregate(notes: &[NoteRecord]) -> Dashboard {
    let mut counts = Counts::default();
    let mut feed = Vec::with_capacity(notes.len());
    for record in notes {
        match record.body {
            NoteBody::Title { .. } => counts.title += 1,
            NoteBody::Content { .. } => counts.content += 1,
            NoteBody::Data { .. } => counts.data += 1,
        }
        feed.push(FeedEntry {
            note: DisplayNote::from_record(record),
            kind: record.body.kind(),
            label: record.body.label(),
        });
    }

    feed.sort_by(|a, b| b.note.created_at.cmp(&a.note.created_at));
    feed.truncate(FEED_LIMIT);

    Dashboard { counts, feed }
}
