/// Server-rendered HTML pages
///
/// Every page is a full document built with `format!` over a shared
/// stylesheet; there is no template engine. All user-supplied values pass
/// through [`escape_html`] before interpolation, including attribute values.
///
/// Handlers call the `render_*` functions and wrap the result in
/// `axum::response::Html`.

use tripmark_shared::models::spot::Spot;
use tripmark_shared::spots::SpotInput;

/// Form state echoed back into the add/edit form
///
/// Everything is kept as the text the user typed, so a rejected submission
/// re-renders exactly what was entered.
#[derive(Debug, Clone, Default)]
pub struct SpotFormValues {
    pub name: String,
    pub city: String,
    pub comment: String,
    pub lat: String,
    pub lng: String,
}

impl SpotFormValues {
    /// Prefills the form from a stored spot
    pub fn from_spot(spot: &Spot) -> Self {
        Self {
            name: spot.name.clone(),
            city: spot.city.clone().unwrap_or_default(),
            comment: spot.comment.clone().unwrap_or_default(),
            lat: spot.lat.map(|v| v.to_string()).unwrap_or_default(),
            lng: spot.lng.map(|v| v.to_string()).unwrap_or_default(),
        }
    }

    /// Echoes back a submission that failed validation
    pub fn from_input(input: &SpotInput) -> Self {
        Self {
            name: input.name.clone(),
            city: input.city.clone().unwrap_or_default(),
            comment: input.comment.clone().unwrap_or_default(),
            lat: input.lat.clone().unwrap_or_default(),
            lng: input.lng.clone().unwrap_or_default(),
        }
    }
}

/// Escapes text for safe interpolation into HTML bodies and attributes
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn error_html(error: Option<&str>) -> String {
    error
        .map(|e| format!(r#"<div class="error">{}</div>"#, escape_html(e)))
        .unwrap_or_default()
}

fn flashes_html(flashes: &[String]) -> String {
    flashes
        .iter()
        .map(|f| format!(r#"<div class="flash">{}</div>"#, escape_html(f)))
        .collect()
}

fn nav_html(username: &str) -> String {
    let username = escape_html(username);
    format!(
        r#"<div class="nav">
  <a href="/">My spots</a>
  <a href="/add">Add spot</a>
  <a href="/map">Map</a>
  <span class="nav-user">{username}</span>
  <a href="/logout">Log out</a>
</div>"#
    )
}

// ── HTML pages ────────────────────────────────────────────────────────

fn base_style() -> &'static str {
    r#"
    * { margin: 0; padding: 0; box-sizing: border-box; }
    body {
        font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
        background: #f2f4f7; color: #2b2f36; padding: 24px;
    }
    .wrap { max-width: 820px; margin: 0 auto; }
    .card {
        background: #fff; border-radius: 12px; padding: 24px;
        box-shadow: 0 2px 12px rgba(20,30,50,0.07); margin-bottom: 16px;
    }
    .narrow { max-width: 420px; margin: 48px auto; }
    h1 { font-size: 22px; margin-bottom: 16px; color: #1d2733; }
    .nav { display: flex; gap: 16px; align-items: center; margin-bottom: 20px; }
    .nav a { color: #2d6cdf; text-decoration: none; font-weight: 500; }
    .nav a:hover { text-decoration: underline; }
    .nav-user { margin-left: auto; color: #5a6472; font-size: 14px; }
    .flash { background: #ecf7ee; color: #256c31; padding: 10px 14px; border-radius: 8px; font-size: 14px; margin-bottom: 12px; }
    .error { background: #fdeeee; color: #c0392b; padding: 10px 14px; border-radius: 8px; font-size: 14px; margin-bottom: 12px; }
    .form-group { margin-bottom: 14px; }
    .form-group label { display: block; font-size: 14px; margin-bottom: 6px; color: #46505c; }
    .form-group input, .form-group textarea {
        width: 100%; padding: 10px 12px; border: 1px solid #ccd3dc;
        border-radius: 8px; font-size: 15px; font-family: inherit; outline: none;
    }
    .form-group input:focus, .form-group textarea:focus { border-color: #2d6cdf; }
    .btn {
        padding: 10px 18px; border: none; border-radius: 8px;
        font-size: 15px; font-weight: 600; cursor: pointer;
    }
    .btn-primary { background: #2d6cdf; color: #fff; }
    .btn-primary:hover { background: #2259bd; }
    .btn-danger { background: #d64541; color: #fff; }
    .btn-danger:hover { background: #b8332f; }
    table.spots { width: 100%; border-collapse: collapse; }
    table.spots th { text-align: left; font-size: 13px; color: #5a6472; padding: 8px 10px; border-bottom: 2px solid #e4e8ee; }
    table.spots td { padding: 10px; border-bottom: 1px solid #edf0f4; font-size: 15px; }
    .actions a { color: #2d6cdf; text-decoration: none; margin-right: 10px; font-size: 14px; }
    .actions a.danger { color: #d64541; }
    .filter { display: flex; gap: 8px; margin-bottom: 16px; }
    .filter input { flex: 1; padding: 8px 12px; border: 1px solid #ccd3dc; border-radius: 8px; font-size: 14px; }
    .empty { color: #5a6472; padding: 16px 0; }
    .link { text-align: center; margin-top: 14px; font-size: 14px; color: #5a6472; }
    .link a { color: #2d6cdf; text-decoration: none; }
    .link a:hover { text-decoration: underline; }
    #map { height: 72vh; border-radius: 12px; }
    "#
}

/// The spot listing, optionally narrowed by the city filter
pub fn render_index(
    username: &str,
    flashes: &[String],
    city_filter: Option<&str>,
    spots: &[Spot],
) -> String {
    let nav = nav_html(username);
    let flashes = flashes_html(flashes);
    let city_value = escape_html(city_filter.unwrap_or(""));

    let listing = if spots.is_empty() {
        r#"<p class="empty">No spots yet. <a href="/add">Add your first one</a>.</p>"#.to_string()
    } else {
        let mut rows = String::new();
        for spot in spots {
            let name = escape_html(&spot.name);
            let city = escape_html(spot.city.as_deref().unwrap_or(""));
            let comment = escape_html(spot.comment.as_deref().unwrap_or(""));
            let lat = spot.lat.map(|v| v.to_string()).unwrap_or_default();
            let lng = spot.lng.map(|v| v.to_string()).unwrap_or_default();
            rows.push_str(&format!(
                r#"<tr>
  <td>{name}</td><td>{city}</td><td>{comment}</td><td>{lat}</td><td>{lng}</td>
  <td class="actions"><a href="/edit/{id}">Edit</a><a class="danger" href="/delete/{id}">Delete</a></td>
</tr>
"#,
                id = spot.id,
            ));
        }
        format!(
            r#"<table class="spots">
<tr><th>Name</th><th>City</th><th>Comment</th><th>Lat</th><th>Lng</th><th></th></tr>
{rows}</table>"#
        )
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en"><head>
<meta charset="utf-8"><meta name="viewport" content="width=device-width,initial-scale=1">
<title>TripMark - My spots</title>
<style>{style}</style>
</head><body>
<div class="wrap">
{nav}
{flashes}
<div class="card">
  <h1>My spots</h1>
  <form method="GET" action="/" class="filter">
    <input type="text" name="city" value="{city_value}" placeholder="Filter by city">
    <button type="submit" class="btn btn-primary">Filter</button>
  </form>
  {listing}
</div>
</div>
</body></html>"#,
        style = base_style(),
    )
}

/// The login form
///
/// `next` is carried through a hidden field so a successful login can land
/// on the page the user originally asked for.
pub fn render_login(next: Option<&str>, error: Option<&str>, flashes: &[String]) -> String {
    let error_html = error_html(error);
    let flashes = flashes_html(flashes);
    let next_value = escape_html(next.unwrap_or("/"));

    format!(
        r#"<!DOCTYPE html>
<html lang="en"><head>
<meta charset="utf-8"><meta name="viewport" content="width=device-width,initial-scale=1">
<title>TripMark - Log in</title>
<style>{style}</style>
</head><body>
<div class="card narrow">
  <h1>Log in</h1>
  {flashes}
  {error_html}
  <form method="POST" action="/login">
    <input type="hidden" name="next" value="{next_value}">
    <div class="form-group">
      <label>Username</label>
      <input type="text" name="username" required autocomplete="username">
    </div>
    <div class="form-group">
      <label>Password</label>
      <input type="password" name="password" required autocomplete="current-password">
    </div>
    <button type="submit" class="btn btn-primary">Log in</button>
  </form>
  <div class="link">No account? <a href="/register">Register</a></div>
</div>
</body></html>"#,
        style = base_style(),
    )
}

/// The registration form
pub fn render_register(error: Option<&str>, flashes: &[String]) -> String {
    let error_html = error_html(error);
    let flashes = flashes_html(flashes);

    format!(
        r#"<!DOCTYPE html>
<html lang="en"><head>
<meta charset="utf-8"><meta name="viewport" content="width=device-width,initial-scale=1">
<title>TripMark - Register</title>
<style>{style}</style>
</head><body>
<div class="card narrow">
  <h1>Register</h1>
  {flashes}
  {error_html}
  <form method="POST" action="/register">
    <div class="form-group">
      <label>Username</label>
      <input type="text" name="username" required autocomplete="username">
    </div>
    <div class="form-group">
      <label>Password</label>
      <input type="password" name="password" required autocomplete="new-password">
    </div>
    <button type="submit" class="btn btn-primary">Register</button>
  </form>
  <div class="link">Already registered? <a href="/login">Log in</a></div>
</div>
</body></html>"#,
        style = base_style(),
    )
}

/// The add/edit form, shared by both flows
///
/// `action` is the POST target (`/add` or `/edit/{id}`); coordinates stay
/// free-text so whatever failed to parse is shown back unchanged.
pub fn render_spot_form(
    username: &str,
    title: &str,
    action: &str,
    values: &SpotFormValues,
    error: Option<&str>,
    flashes: &[String],
) -> String {
    let nav = nav_html(username);
    let error_html = error_html(error);
    let flashes = flashes_html(flashes);
    let title = escape_html(title);
    let action = escape_html(action);
    let name = escape_html(&values.name);
    let city = escape_html(&values.city);
    let comment = escape_html(&values.comment);
    let lat = escape_html(&values.lat);
    let lng = escape_html(&values.lng);

    format!(
        r#"<!DOCTYPE html>
<html lang="en"><head>
<meta charset="utf-8"><meta name="viewport" content="width=device-width,initial-scale=1">
<title>TripMark - {title}</title>
<style>{style}</style>
</head><body>
<div class="wrap">
{nav}
{flashes}
<div class="card">
  <h1>{title}</h1>
  {error_html}
  <form method="POST" action="{action}">
    <div class="form-group">
      <label>Name</label>
      <input type="text" name="name" value="{name}" required>
    </div>
    <div class="form-group">
      <label>City</label>
      <input type="text" name="city" value="{city}">
    </div>
    <div class="form-group">
      <label>Comment</label>
      <textarea name="comment" rows="3">{comment}</textarea>
    </div>
    <div class="form-group">
      <label>Latitude</label>
      <input type="text" name="lat" value="{lat}" placeholder="e.g. 35.0394">
    </div>
    <div class="form-group">
      <label>Longitude</label>
      <input type="text" name="lng" value="{lng}" placeholder="e.g. 135.7292">
    </div>
    <button type="submit" class="btn btn-primary">Save</button>
  </form>
  <div class="link"><a href="/">Back to my spots</a></div>
</div>
</div>
</body></html>"#,
        style = base_style(),
    )
}

/// The delete confirmation page
///
/// Deletion itself is a POST; this page only renders the form for it.
pub fn render_delete_confirm(username: &str, spot: &Spot, flashes: &[String]) -> String {
    let nav = nav_html(username);
    let flashes = flashes_html(flashes);
    let name = escape_html(&spot.name);
    let city_line = spot
        .city
        .as_deref()
        .map(|c| format!("<p>City: {}</p>", escape_html(c)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en"><head>
<meta charset="utf-8"><meta name="viewport" content="width=device-width,initial-scale=1">
<title>TripMark - Delete spot</title>
<style>{style}</style>
</head><body>
<div class="wrap">
{nav}
{flashes}
<div class="card">
  <h1>Delete "{name}"?</h1>
  {city_line}
  <p>This cannot be undone.</p>
  <form method="POST" action="/delete/{id}" style="margin-top:16px">
    <button type="submit" class="btn btn-danger">Delete</button>
  </form>
  <div class="link"><a href="/">Cancel</a></div>
</div>
</div>
</body></html>"#,
        style = base_style(),
        id = spot.id,
    )
}

const MAP_SCRIPT: &str = r#"
function label(spot) {
    var div = document.createElement('div');
    div.textContent = spot.city ? spot.name + ' (' + spot.city + ')' : spot.name;
    return div;
}

var map = L.map('map');
L.tileLayer('https://tile.openstreetmap.org/{z}/{x}/{y}.png', {
    maxZoom: 19,
    attribution: '&copy; OpenStreetMap contributors'
}).addTo(map);

if (spots.length > 0) {
    var group = L.featureGroup(spots.map(function (spot) {
        return L.marker([spot.lat, spot.lng]).bindPopup(label(spot));
    }));
    group.addTo(map);
    map.fitBounds(group.getBounds().pad(0.2));
} else {
    map.setView([20, 0], 2);
}
"#;

/// The map view over all spots that carry both coordinates
///
/// `markers_json` is a JSON array of `{name, city, lat, lng}` objects; it is
/// embedded in an inline script, so `</` is escaped to keep the document
/// well-formed whatever the spot names contain.
pub fn render_map(username: &str, markers_json: &str) -> String {
    let nav = nav_html(username);
    let markers = markers_json.replace("</", "<\\/");

    format!(
        r#"<!DOCTYPE html>
<html lang="en"><head>
<meta charset="utf-8"><meta name="viewport" content="width=device-width,initial-scale=1">
<title>TripMark - Map</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<style>{style}</style>
</head><body>
<div class="wrap">
{nav}
<div class="card">
  <h1>Map</h1>
  <div id="map"></div>
</div>
</div>
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<script>
var spots = {markers};
{map_script}
</script>
</body></html>"#,
        style = base_style(),
        map_script = MAP_SCRIPT,
    )
}

/// A bare titled message, used for the 404/422/500 fallbacks
pub fn render_message_page(title: &str, message: &str) -> String {
    let title = escape_html(title);
    let message = escape_html(message);

    format!(
        r#"<!DOCTYPE html>
<html lang="en"><head>
<meta charset="utf-8"><meta name="viewport" content="width=device-width,initial-scale=1">
<title>TripMark - {title}</title>
<style>{style}</style>
</head><body>
<div class="card narrow">
  <h1>{title}</h1>
  <p>{message}</p>
  <div class="link"><a href="/">Back to my spots</a></div>
</div>
</body></html>"#,
        style = base_style(),
    )
}
