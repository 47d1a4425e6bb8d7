//! # Page
//!
//! Server-rendered, no client script. Three mutually exclusive states:
//!
//! - **Disconnected**: fetch failed for any reason
//! - **Empty**: connected, nothing in the collection
//! - **Table**: days since the newest visit, then one row per visit in fetch order
//!
//! The renderer never sorts or trims, it trusts the query for both.
use chrono::{DateTime, Datelike, Utc};

use crate::{
    models::VisitRecord,
    utils::{days_since, display_date, escape_html},
    view::ViewState,
};

pub const TITLE: &str = "Noodle Tracker";
pub const DISCONNECTED_MESSAGE: &str = "Could not connect to the database.";
pub const EMPTY_MESSAGE: &str = "No noodle entries found.";

const COLUMNS: [(&str, &str); 7] = [
    ("date", "Date"),
    ("name", "Name"),
    ("location", "Location"),
    ("type", "Type"),
    ("rating", "Rating"),
    ("price", "Price"),
    ("notes", "Notes"),
];

const CENTERED_MAIN: &str =
    "flex flex-col justify-center items-center min-h-screen bg-black bg-opacity-50 text-white p-4";
const TABLE_MAIN: &str =
    "flex flex-col items-center min-h-screen bg-black bg-opacity-50 text-white p-4 relative";

pub fn render_page(view: &ViewState, now: DateTime<Utc>) -> String {
    let body = match (view.is_connected, view.entries.as_deref()) {
        (false, _) => message_main(DISCONNECTED_MESSAGE, now),
        (true, None) | (true, Some([])) => message_main(EMPTY_MESSAGE, now),
        (true, Some(entries)) => table_main(entries, now),
    };

    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{TITLE}</title>\n\
         </head>\n\
         <body>\n{body}</body>\n\
         </html>\n"
    )
}

fn message_main(message: &str, now: DateTime<Utc>) -> String {
    format!(
        "<main class=\"{CENTERED_MAIN}\">\n\
         <h1 class=\"text-center text-3xl font-bold mb-4\">{message}</h1>\n\
         {footer}</main>\n",
        footer = footer(now.year()),
    )
}

fn table_main(entries: &[VisitRecord], now: DateTime<Utc>) -> String {
    // entries are newest first
    let most_recent = entries
        .first()
        .and_then(|entry| entry.date.as_deref())
        .unwrap_or("");
    let days = days_since(most_recent, now);

    let mut html = format!(
        "<main class=\"{TABLE_MAIN}\">\n\
         <div class=\"w-full max-w-4xl\">\n\
         <h1 class=\"text-4xl mt-6 text-center\">{TITLE}</h1>\n\
         <h2 class=\"text-2xl mb-6 text-center\">It has been {days} days since I have eaten noodles.</h2>\n\
         <table class=\"w-full border-collapse bg-white text-gray-900 shadow-md\">\n\
         <thead class=\"bg-gray-200\">\n<tr>\n"
    );

    for (class, label) in COLUMNS {
        html.push_str(&format!(
            "<th class=\"{class} py-2 px-4 border-b text-left\">{label}</th>\n"
        ));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for entry in entries {
        html.push_str(&row(entry));
    }

    html.push_str("</tbody>\n</table>\n</div>\n");
    html.push_str(&footer(now.year()));
    html.push_str("</main>\n");

    html
}

fn row(entry: &VisitRecord) -> String {
    let date = entry.date.as_deref().map(display_date);
    let cells = [
        date.as_deref(),
        entry.name.as_deref(),
        entry.location.as_deref(),
        entry.kind.as_deref(),
        entry.rating.as_deref(),
        entry.price.as_deref(),
        entry.notes.as_deref(),
    ];

    let mut html = format!(
        "<tr data-key=\"{}\">\n",
        escape_html(entry.id.as_deref().unwrap_or(""))
    );
    for ((class, _), value) in COLUMNS.iter().zip(cells) {
        html.push_str(&format!(
            "<td class=\"{class} py-2 px-4 border-b\">{}</td>\n",
            escape_html(value.unwrap_or(""))
        ));
    }
    html.push_str("</tr>\n");

    html
}

fn footer(year: i32) -> String {
    format!(
        "<footer class=\"text-sm absolute bottom-4 right-4 space-y-2\">\n\
         <div>Photo by {photographer} on {unsplash}</div>\n\
         <div>a creation by {author}, &copy; {year}</div>\n\
         </footer>\n",
        photographer = external_link(
            "https://unsplash.com/@ruslanbardash?utm_content=creditCopyText&utm_medium=referral&utm_source=unsplash",
            "Ruslan Bardash",
        ),
        unsplash = external_link(
            "https://unsplash.com/photos/white-house-between-two-cliffs-8MhejqEghLk?utm_content=creditCopyText&utm_medium=referral&utm_source=unsplash",
            "Unsplash",
        ),
        author = external_link("https://github.com/kennytrbl", "Kenny Zhang"),
    )
}

fn external_link(href: &str, text: &str) -> String {
    format!(
        "<a href=\"{}\" class=\"underline\" target=\"_blank\" rel=\"noopener noreferrer\">{text}</a>",
        escape_html(href)
    )
}
