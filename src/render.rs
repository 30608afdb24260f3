use std::fmt::Write;

use crate::dashboard::Dashboard;
use crate::structs::DisplayNote;

// Presentation plumbing: a real template layer would live outside the core,
// so these pages stay deliberately bare.

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}</body>\n</html>\n",
        escape(title),
        body
    )
}

fn flash_banner(out: &mut String, flash: Option<(&str, &str)>) {
    if let Some((kind, message)) = flash {
        let _ = writeln!(
            out,
            "<p class=\"flash {}\">{}</p>",
            escape(kind),
            escape(message)
        );
    }
}

pub fn dashboard_page(flash: Option<(&str, &str)>, dash: &Dashboard) -> String {
    let mut body = String::new();
    body.push_str("<h1>Notepad</h1>\n");
    flash_banner(&mut body, flash);

    let _ = writeln!(
        body,
        "<ul class=\"counts\">\n<li>Title notes: {}</li>\n<li>Content notes: {}</li>\n<li>Data notes: {}</li>\n</ul>",
        dash.counts.title, dash.counts.content, dash.counts.data
    );

    body.push_str("<h2>Recent notes</h2>\n<ul class=\"feed\">\n");
    for entry in &dash.feed {
        let _ = writeln!(
            body,
            "<li><a href=\"/note/{id}\">{summary}</a> <em>{label}</em> <time>{created}</time>\
             <form method=\"post\" action=\"/note/{id}/delete\"><button>Delete</button></form></li>",
            id = escape(&entry.note.id),
            summary = escape(&entry.note.summary()),
            label = entry.label,
            created = entry.note.created_at.format("%Y-%m-%d %H:%M"),
        );
    }
    body.push_str("</ul>\n");

    // Three empty form descriptors for re-display.
    body.push_str(concat!(
        "<h2>New title note</h2>\n",
        "<form method=\"post\" action=\"/\">\n",
        "<input type=\"hidden\" name=\"form_type\" value=\"title\">\n",
        "<input name=\"title\" placeholder=\"Note title...\">\n",
        "<textarea name=\"content\" rows=\"5\" placeholder=\"Note content...\"></textarea>\n",
        "<button>Add</button>\n</form>\n",
        "<h2>New content note</h2>\n",
        "<form method=\"post\" action=\"/\">\n",
        "<input type=\"hidden\" name=\"form_type\" value=\"content\">\n",
        "<textarea name=\"content\" rows=\"5\" placeholder=\"Note content...\"></textarea>\n",
        "<button>Add</button>\n</form>\n",
        "<h2>New data note</h2>\n",
        "<form method=\"post\" action=\"/\">\n",
        "<input type=\"hidden\" name=\"form_type\" value=\"data\">\n",
        "<textarea name=\"data\" rows=\"5\" placeholder=\"JSON data, e.g. {&quot;key&quot;: &quot;value&quot;}\"></textarea>\n",
        "<button>Add</button>\n</form>\n",
    ));

    page("Notepad", &body)
}

pub fn detail_page(note: &DisplayNote, kind: &str, label: &str) -> String {
    let mut body = String::new();
    let _ = writeln!(body, "<h1>{}</h1>", escape(&note.summary()));
    let _ = writeln!(body, "<p><em>{}</em></p>", escape(label));
    match kind {
        "title" => {
            let _ = writeln!(body, "<h2>{}</h2>", escape(&note.title));
            let _ = writeln!(body, "<p>{}</p>", escape(&note.content));
        }
        "data" => {
            let _ = writeln!(body, "<pre>{}</pre>", escape(&note.data.to_string()));
        }
        _ => {
            let _ = writeln!(body, "<p>{}</p>", escape(&note.content));
        }
    }
    let _ = writeln!(
        body,
        "<p>Created <time>{}</time>, updated <time>{}</time></p>",
        note.created_at.format("%Y-%m-%d %H:%M:%S"),
        note.updated_at.format("%Y-%m-%d %H:%M:%S"),
    );
    let _ = writeln!(
        body,
        "<form method=\"post\" action=\"/note/{}/delete\"><button>Delete</button></form>\
         \n<p><a href=\"/\">Back to dashboard</a></p>",
        escape(&note.id)
    );
    page("Note detail", &body)
}
