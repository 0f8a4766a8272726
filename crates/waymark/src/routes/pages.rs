//! Server-rendered HTML pages.

use waymark_common::constants::{fields, messages};
use waymark_common::{LocationRecord, UnlockOutcome};

use crate::export::QrStore;

const STYLESHEET: &str = "https://cdn.jsdelivr.net/npm/tailwindcss@2.2.19/dist/tailwind.min.css";
const CARD: &str = "max-w-md mx-auto bg-white rounded-xl shadow-md overflow-hidden md:max-w-2xl m-4 p-6";
const BUTTON: &str = "inline-block bg-blue-600 text-white px-4 py-2 rounded hover:bg-blue-700";
const INPUT: &str = "mt-1 block w-full rounded-md border-gray-300 shadow-sm focus:border-blue-500 focus:ring-blue-500";

/// Escape text for HTML element and attribute content
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>{}</title>
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <link href="{}" rel="stylesheet">
</head>
<body class="bg-gray-100 min-h-screen py-6">
{}
</body>
</html>
"#,
        escape_html(title),
        STYLESHEET,
        body
    )
}

fn error_line(error: Option<&str>) -> String {
    match error {
        Some(message) => format!(
            r#"<p class="text-red-500 text-sm">{}</p>"#,
            escape_html(message)
        ),
        None => String::new(),
    }
}

fn password_form(action: &str, label: &str, button: &str, error: Option<&str>) -> String {
    format!(
        r#"<form method="POST" action="{}" class="space-y-4">
    <div>
        <label class="block text-sm font-medium text-gray-700">{}</label>
        <input type="text" name="{}" autocomplete="off" class="{}">
    </div>
    {}
    <button type="submit" class="{}">{}</button>
</form>"#,
        escape_html(action),
        escape_html(label),
        fields::PASSWORD,
        INPUT,
        error_line(error),
        BUTTON,
        escape_html(button)
    )
}

/// Landing page
pub fn index_page() -> String {
    let body = format!(
        r#"<div class="{}">
    <h1 class="text-2xl font-bold mb-4">Welcome to the Treasure Hunt!</h1>
    <p class="mb-4">Start your journey by scanning the QR code at the first location.</p>
    <p class="text-sm text-gray-600 mb-4">Each location will provide you with a riddle leading to the next location.</p>
    <a href="/admin" class="{}">Organizers</a>
</div>"#,
        CARD, BUTTON
    );
    layout("Treasure Hunt", &body)
}

/// Location page: riddle when unlocked, password prompt otherwise
pub fn location_page(
    record: &LocationRecord,
    outcome: UnlockOutcome,
    final_answer_enabled: bool,
) -> String {
    let id = escape_html(&record.id);
    let content = if outcome.is_unlocked() {
        let mut content = format!(
            r#"<div class="space-y-4">
    <div>
        <h2 class="font-semibold">Current Location:</h2>
        <p>{}</p>
    </div>
    <div>
        <h2 class="font-semibold">Your Riddle:</h2>
        <p class="whitespace-pre-line">{}</p>
    </div>"#,
            escape_html(&record.display_name),
            escape_html(&record.riddle_text)
        );

        if !record.is_terminal() {
            content.push_str(
                r#"
    <div>
        <h2 class="font-semibold">Next Location:</h2>
        <p>Find the QR code at the location described in the riddle!</p>
    </div>"#,
            );
        } else if final_answer_enabled {
            content.push_str(&format!(
                r#"
    <form method="POST" class="space-y-4">
        <label class="block text-sm font-medium text-gray-700">Final answer:</label>
        <input type="text" name="{}" autocomplete="off" class="{}">
        <button type="submit" class="{}">Finish</button>
    </form>"#,
                fields::FINAL_ANSWER,
                INPUT,
                BUTTON
            ));
        }

        content.push_str("\n</div>");
        content
    } else {
        let error = outcome.is_mismatch().then_some(messages::INCORRECT_PASSWORD);
        password_form(
            &format!("/location/{}", record.id),
            "Enter password from previous location:",
            "Unlock",
            error,
        )
    };

    let body = format!(
        r#"<div class="{}">
    <h1 class="text-2xl font-bold mb-4">Location {}</h1>
    {}
</div>"#,
        CARD, id, content
    );
    layout(&format!("Location {} - Treasure Hunt", record.id), &body)
}

/// Admin password prompt
pub fn admin_login_page(error: Option<&str>) -> String {
    let body = format!(
        r#"<div class="{}">
    <h1 class="text-2xl font-bold mb-4">Treasure Hunt Admin</h1>
    {}
</div>"#,
        CARD,
        password_form("/admin", "Admin password:", "View QR Codes", error)
    );
    layout("Admin - Treasure Hunt", &body)
}

/// QR gallery with a download form
pub fn admin_gallery_page(store: &QrStore) -> String {
    let mut cards = String::new();
    for code in store.iter() {
        cards.push_str(&format!(
            r#"
        <div class="border rounded-lg p-4">
            <h2 class="text-xl font-semibold mb-2">Location {}: {}</h2>
            <img src="{}" alt="QR Code for Location {}" class="mx-auto mb-2">
            <div class="text-sm text-gray-600"><p>URL: {}</p></div>
        </div>"#,
            escape_html(&code.id),
            escape_html(&code.display_name),
            code.data_uri(),
            escape_html(&code.id),
            escape_html(&code.url)
        ));
    }

    let body = format!(
        r#"<div class="max-w-6xl mx-auto">
    <div class="bg-white rounded-xl shadow-md overflow-hidden m-4 p-6">
        <h1 class="text-2xl font-bold mb-4">Treasure Hunt QR Codes</h1>
        <div class="mb-4">
            {}
        </div>
        <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4">{}
        </div>
    </div>
</div>"#,
        password_form(
            "/admin/download",
            "Confirm admin password to download:",
            "Download All QR Codes (ZIP)",
            None
        ),
        cards
    );
    layout("Treasure Hunt QR Codes", &body)
}
