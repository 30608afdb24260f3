#[macro_use]
extern crate rocket;

use dotenv::dotenv;
use rocket::form::Form;
use rocket::http::{Cookie, CookieJar};
use rocket::request::FlashMessage;
use rocket::response::content::RawHtml;
use rocket::response::{Flash, Redirect};
use rocket::time::Duration;
use rocket::{Build, Rocket};

mod codec;
mod dashboard;
mod render;
mod store;
mod structs;

use store::NewNote;
use structs::{DisplayNote, NoteBody, NoteRecord, NoteVector};

const NOTES_COOKIE: &str = "notes";
const COOKIE_MAX_AGE_DAYS: i64 = 365;

// Cookie transport ////////////////////////////////////////////////////////////

fn load_notes(jar: &CookieJar<'_>) -> NoteVector {
    codec::decode(jar.get(NOTES_COOKIE).map(|cookie| cookie.value()))
}

/// Rewrites the whole collection into the cookie. Best-effort: an encode
/// failure is logged and the write is dropped.
fn save_notes(jar: &CookieJar<'_>, notes: &[NoteRecord]) {
    match codec::encode(notes) {
        Ok(encoded) => {
            let mut cookie = Cookie::new(NOTES_COOKIE, encoded);
            cookie.set_max_age(Duration::days(COOKIE_MAX_AGE_DAYS));
            // Readable by client-side script on purpose.
            cookie.set_http_only(false);
            cookie.set_path("/");
            jar.add(cookie);
        }
        Err(err) => log::error!("failed to encode notes cookie: {}", err),
    }
}

// Routes //////////////////////////////////////////////////////////////////////

#[derive(FromForm)]
struct NoteForm {
    form_type: String,
    title: Option<String>,
    content: Option<String>,
    data: Option<String>,
}

#[get("/")]
fn notepad_dashboard(jar: &CookieJar<'_>, flash: Option<FlashMessage<'_>>) -> RawHtml<String> {
    let notes = load_notes(jar);
    let dash = dashboard::aggregate(&notes);
    save_notes(jar, &notes);
    RawHtml(render::dashboard_page(
        flash.as_ref().map(|f| (f.kind(), f.message())),
        &dash,
    ))
}

#[post("/", data = "<form>")]
fn create_note(jar: &CookieJar<'_>, form: Form<NoteForm>) -> Flash<Redirect> {
    let mut notes = load_notes(jar);
    let form = form.into_inner();
    let redirect = || Redirect::to(uri!(notepad_dashboard));

    let new = match form.form_type.as_str() {
        "title" => NewNote::Title {
            title: form.title.unwrap_or_default(),
            content: form.content.unwrap_or_default(),
        },
        "content" => NewNote::Content {
            content: form.content.unwrap_or_default(),
        },
        // An untouched data form still submits an empty JSON object.
        "data" => NewNote::Data {
            raw: form.data.unwrap_or_else(|| "{}".to_string()),
        },
        _ => return Flash::error(redirect(), "Unknown note type."),
    };

    let flash = match store::append(&mut notes, new) {
        Ok(record) => Flash::success(redirect(), added_message(&record.body)),
        Err(err) => Flash::error(redirect(), err.message()),
    };
    save_notes(jar, &notes);
    flash
}

#[get("/note/<id>")]
fn note_detail(jar: &CookieJar<'_>, id: &str) -> Result<RawHtml<String>, Flash<Redirect>> {
    let notes = load_notes(jar);
    match store::find(&notes, id) {
        Some(record) => Ok(RawHtml(render::detail_page(
            &DisplayNote::from_record(record),
            record.body.kind(),
            record.body.label(),
        ))),
        None => Err(Flash::error(
            Redirect::to(uri!(notepad_dashboard)),
            "Note not found.",
        )),
    }
}

// Deletion is only routed for POST, so link prefetching can never trigger it.
#[post("/note/<id>/delete")]
fn delete_note(jar: &CookieJar<'_>, id: &str) -> Flash<Redirect> {
    let mut notes = load_notes(jar);
    let removed = store::delete(&mut notes, id);
    save_notes(jar, &notes);
    let redirect = Redirect::to(uri!(notepad_dashboard));
    if removed {
        Flash::success(redirect, "Note deleted.")
    } else {
        Flash::error(redirect, "Note not found.")
    }
}

fn added_message(body: &NoteBody) -> &'static str {
    match body {
        NoteBody::Title { .. } => "Title note added!",
        NoteBody::Content { .. } => "Content note added!",
        NoteBody::Data { .. } => "Data note added!",
    }
}

fn build_rocket() -> Rocket<Build> {
    rocket::build().mount(
        "/",
        routes![notepad_dashboard, create_note, note_detail, delete_note],
    )
}

#[launch]
fn rocket() -> _ {
    dotenv().ok();
    build_rocket()
}
