use crate::data::registry::GameData;
use crate::server::api;

pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    pub fn to_http_string(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status_code,
            self.status_text,
            self.content_type,
            self.body.len(),
            self.body
        )
    }
}

pub fn route_request(data: &GameData, method: &str, path: &str) -> HttpResponse {
    // Query strings are parsed by the handlers; routing only sees the path.
    let route = path.split('?').next().unwrap_or(path);
    match (method, route) {
        ("GET", "/") => HttpResponse {
            status_code: 200,
            status_text: "OK",
            content_type: "text/html; charset=utf-8",
            body: index_html(),
        },
        ("GET", "/api/health") => json_or_500(api::health_payload()),
        ("GET", "/api/sends") => json_or_500(api::sends_payload(data)),
        ("GET", "/api/towers") => json_or_500(api::towers_payload(data)),
        ("GET", "/api/waves") => json_or_500(api::waves_payload(data)),
        ("GET", "/api/abilities") => json_or_500(api::abilities_payload(data)),
        ("GET", "/api/lookup") => match api::lookup_payload(data, path) {
            Ok(payload) => json_response(payload),
            Err(api::LookupPayloadError::BadRequest(message)) => {
                error_response(400, "Bad Request", &message)
            }
            Err(api::LookupPayloadError::NotFound(message)) => not_found_response(&message),
            Err(api::LookupPayloadError::Internal(message)) => {
                error_response(500, "Internal Server Error", &message)
            }
        },
        ("GET", "/api/data/status") => json_or_500(api::data_status_payload(data)),
        _ => error_response(404, "Not Found", "Route not found"),
    }
}

fn json_response(body: String) -> HttpResponse {
    HttpResponse {
        status_code: 200,
        status_text: "OK",
        content_type: "application/json",
        body,
    }
}

fn json_or_500(payload: Result<String, serde_json::Error>) -> HttpResponse {
    match payload {
        Ok(body) => json_response(body),
        Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
    }
}

/// A lookup miss is the expected outcome for an unknown name, so the body
/// carries the user-facing message rather than an error status.
fn not_found_response(message: &str) -> HttpResponse {
    HttpResponse {
        status_code: 404,
        status_text: "Not Found",
        content_type: "application/json",
        body: format!(
            "{{\n  \"status\": \"not_found\",\n  \"message\": {}\n}}",
            serde_json::to_string(message).unwrap_or_else(|_| "\"Not found\"".to_string())
        ),
    }
}

fn error_response(status_code: u16, status_text: &'static str, message: &str) -> HttpResponse {
    HttpResponse {
        status_code,
        status_text,
        content_type: "application/json",
        body: format!(
            "{{\n  \"status\": \"error\",\n  \"message\": {}\n}}",
            serde_json::to_string(message).unwrap_or_else(|_| "\"Unknown error\"".to_string())
        ),
    }
}

fn index_html() -> String {
    r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width,initial-scale=1" />
  <title>Adjutant</title>
  <style>
    body { font-family: Arial, sans-serif; max-width: 700px; margin: 24px auto; padding: 0 12px; }
    .card { border: 1px solid #ddd; border-radius: 8px; padding: 14px; margin: 14px 0; }
    label { margin-right: 8px; }
    input, select { padding: 6px; }
    button { padding: 6px 14px; }
    pre { background: #111; color: #aef2ae; padding: 12px; overflow: auto; border-radius: 6px; min-height: 140px; white-space: pre-wrap; }
  </style>
</head>
<body>
  <h1>Adjutant</h1>
  <p>Squadron TD lookup. Listings: <code>/api/sends</code>, <code>/api/towers</code>, <code>/api/waves</code>, <code>/api/abilities</code>.</p>

  <div class="card">
    <label for="kind">Kind</label>
    <select id="kind">
      <option value="send">send</option>
      <option value="tower">tower</option>
      <option value="wave">wave</option>
    </select>
    <label for="q">Name</label>
    <input id="q" value="zealot" />
    <label><input id="non-adr" type="checkbox" /> non-adr</label>
    <label><input id="x1" type="checkbox" /> x1</label>
    <button id="lookup-btn">Lookup</button>
  </div>

  <pre id="output">Ready.</pre>

  <script>
    const output = document.getElementById('output');
    document.getElementById('lookup-btn').addEventListener('click', async () => {
      const kind = document.getElementById('kind').value;
      const q = document.getElementById('q').value;
      let url = '/api/lookup?kind=' + kind + '&q=' + encodeURIComponent(q);
      if (document.getElementById('non-adr').checked) url += '&non_adr=1';
      if (document.getElementById('x1').checked) url += '&x1=1';
      output.textContent = 'Loading…';
      const response = await fetch(url);
      output.textContent = 'HTTP ' + response.status + '\n' + await response.text();
    });
  </script>
</body>
</html>
"#
    .to_string()
}
