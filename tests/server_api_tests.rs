//! Routing and payload tests against a fixture registry, exercising the
//! handlers directly without binding a socket.

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use adjutant::data::registry::GameData;
use adjutant::server::routes::route_request;

const ABILS_FIXTURE: &str = r#"{
  "cloak": { "name": "Cloak", "desc": "Invisible to enemies without detection." },
  "splash": { "name": "Splash", "desc": "Attacks damage nearby enemies." }
}"#;

const SENDS_FIXTURE: &str = r#"{
  "zealot": {
    "name": "Zealot",
    "hp": 145.0, "shields": 0, "energy": 0,
    "armor": "Light", "move_speed": 2.75,
    "abilities": [],
    "wpn": {
      "period": 1.2, "targets": 1, "range": 0.1,
      "damage": { "min": 7.6, "max": 9.4, "dmg_type": "Normal" },
      "melee": true
    },
    "bounty": 5, "income": 2, "cost": { "vespene": 12.4 }
  },
  "ghost": {
    "name": "Ghost",
    "hp": 110.0, "shields": 0, "energy": 75.0,
    "armor": "Light", "move_speed": 2.5,
    "abilities": ["cloak"],
    "wpn": {
      "period": 1.5, "targets": 1, "range": 6.0,
      "damage": { "min": 10.0, "max": 11.0, "dmg_type": "Piercing" },
      "melee": false
    },
    "bounty": 12, "income": 6, "cost": { "vespene": 50.0 }
  }
}"#;

const TOWERS_FIXTURE: &str = r#"{
  "missile turret": {
    "name": "Missile Turret",
    "hp": 310.0, "shields": 0, "energy": 0,
    "armor": "Armored", "move_speed": 0,
    "abilities": [],
    "wpn": {
      "period": 1.1, "targets": 1, "range": 7.0,
      "damage": { "min": 12.0, "max": 14.0, "dmg_type": "Piercing" },
      "melee": false
    },
    "builder": "Swann", "tier": "1",
    "upgrades": ["ion turret"],
    "cost": { "minerals": 100.0, "supply": -1.0 },
    "predecessors": []
  },
  "ion turret": {
    "name": "Ion Turret",
    "hp": 520.0, "shields": 0, "energy": 0,
    "armor": "Armored", "move_speed": 0,
    "abilities": ["splash"],
    "wpn": {
      "period": 1.0, "targets": 1, "range": 7.5,
      "damage": { "min": 32.0, "max": 36.0, "dmg_type": "Normal" },
      "melee": false
    },
    "builder": "Swann", "tier": "2",
    "upgrades": [],
    "cost": { "minerals": 280.0, "supply": -2.0 },
    "predecessors": ["missile turret"]
  }
}"#;

const WAVES_FIXTURE: &str = r#"{
  "w5": {
    "name": "Aberration",
    "hp": 100.0, "shields": 0, "energy": 0,
    "armor": "Armored", "move_speed": 2.0,
    "abilities": [],
    "wpn": {
      "period": 1.43, "targets": 1, "range": 0.2,
      "damage": { "min": 10.0, "max": 12.0, "dmg_type": "Normal" },
      "melee": true
    },
    "index": 5, "bounty": 6, "count": 30
  }
}"#;

fn fixture_data(name: &str) -> (GameData, PathBuf) {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("adjutant-{name}-{stamp}"));
    fs::create_dir_all(&dir).expect("temp dir should be creatable");
    fs::write(dir.join("abils.json"), ABILS_FIXTURE).expect("fixture should be written");
    fs::write(dir.join("sends.json"), SENDS_FIXTURE).expect("fixture should be written");
    fs::write(dir.join("towers.json"), TOWERS_FIXTURE).expect("fixture should be written");
    fs::write(dir.join("waves.json"), WAVES_FIXTURE).expect("fixture should be written");

    let data = GameData::load_from_dir(&dir).expect("fixture data should load");
    (data, dir)
}

#[test]
fn health_endpoint_returns_ok_json() {
    let (data, dir) = fixture_data("health");

    let response = route_request(&data, "GET", "/api/health");
    assert_eq!(response.status_code, 200);
    assert_eq!(response.content_type, "application/json");
    assert!(response.body.contains("\"status\": \"ok\""));
    assert!(response.body.contains("\"service\": \"adjutant-api\""));

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn index_page_serves_html() {
    let (data, dir) = fixture_data("index");

    let response = route_request(&data, "GET", "/");
    assert_eq!(response.status_code, 200);
    assert_eq!(response.content_type, "text/html; charset=utf-8");
    assert!(response.body.contains("<h1>Adjutant</h1>"));

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn send_listing_keeps_catalog_order() {
    let (data, dir) = fixture_data("send-list");

    let response = route_request(&data, "GET", "/api/sends");
    assert_eq!(response.status_code, 200);

    let payload: serde_json::Value =
        serde_json::from_str(&response.body).expect("response should be valid json");
    let sends = payload["sends"].as_array().expect("sends should be an array");
    assert_eq!(sends.len(), 2);
    assert_eq!(sends[0]["key"], "zealot");
    assert_eq!(sends[0]["cost"], 12);
    assert_eq!(sends[1]["key"], "ghost");

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn wave_listing_reports_index_and_count() {
    let (data, dir) = fixture_data("wave-list");

    let response = route_request(&data, "GET", "/api/waves");
    assert_eq!(response.status_code, 200);

    let payload: serde_json::Value =
        serde_json::from_str(&response.body).expect("response should be valid json");
    let waves = payload["waves"].as_array().expect("waves should be an array");
    assert_eq!(waves.len(), 1);
    assert_eq!(waves[0]["index"], 5);
    assert_eq!(waves[0]["name"], "Aberration");
    assert_eq!(waves[0]["count"], 30);

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn lookup_endpoint_resolves_and_formats() {
    let (data, dir) = fixture_data("lookup-hit");

    let response = route_request(&data, "GET", "/api/lookup?kind=send&q=zealot");
    assert_eq!(response.status_code, 200);

    let payload: serde_json::Value =
        serde_json::from_str(&response.body).expect("response should be valid json");
    assert_eq!(payload["status"], "ok");
    assert_eq!(payload["reply"]["title"], "Zealot");
    let body = payload["reply"]["body"]
        .as_str()
        .expect("reply body should be a string");
    assert!(body.contains("**Cost: ** 12 vespene"));

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn lookup_endpoint_decodes_multiword_names() {
    let (data, dir) = fixture_data("lookup-decode");

    let response = route_request(&data, "GET", "/api/lookup?kind=tower&q=ion%20turret");
    assert_eq!(response.status_code, 200);
    let payload: serde_json::Value =
        serde_json::from_str(&response.body).expect("response should be valid json");
    assert_eq!(payload["reply"]["title"], "Ion Turret");

    let plus = route_request(&data, "GET", "/api/lookup?kind=tower&q=ion+turret");
    assert_eq!(plus.status_code, 200);

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn lookup_endpoint_passes_wave_flags_through() {
    let (data, dir) = fixture_data("lookup-flags");

    let response = route_request(&data, "GET", "/api/lookup?kind=wave&q=5&non_adr=1&x1=1");
    assert_eq!(response.status_code, 200);

    let payload: serde_json::Value =
        serde_json::from_str(&response.body).expect("response should be valid json");
    assert_eq!(payload["reply"]["title"], "Wave 5 (Non-adrenaline)");
    let body = payload["reply"]["body"]
        .as_str()
        .expect("reply body should be a string");
    assert!(body.contains("**Count (1x): **10"));

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn lookup_miss_returns_not_found_payload() {
    let (data, dir) = fixture_data("lookup-miss");

    let response = route_request(&data, "GET", "/api/lookup?kind=send&q=carrier");
    assert_eq!(response.status_code, 404);

    let payload: serde_json::Value =
        serde_json::from_str(&response.body).expect("response should be valid json");
    assert_eq!(payload["status"], "not_found");
    assert_eq!(payload["message"], "There is no send named **carrier**");

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn lookup_endpoint_rejects_missing_parameters() {
    let (data, dir) = fixture_data("lookup-bad");

    let response = route_request(&data, "GET", "/api/lookup?kind=send");
    assert_eq!(response.status_code, 400);
    let payload: serde_json::Value =
        serde_json::from_str(&response.body).expect("response should be valid json");
    assert_eq!(payload["status"], "error");

    let response = route_request(&data, "GET", "/api/lookup?q=zealot");
    assert_eq!(response.status_code, 400);

    let response = route_request(&data, "GET", "/api/lookup?kind=building&q=zealot");
    assert_eq!(response.status_code, 400);

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn data_status_reports_entry_counts() {
    let (data, dir) = fixture_data("status");

    let response = route_request(&data, "GET", "/api/data/status");
    assert_eq!(response.status_code, 200);

    let payload: serde_json::Value =
        serde_json::from_str(&response.body).expect("response should be valid json");
    let catalogs = payload["catalogs"]
        .as_array()
        .expect("catalogs should be an array");
    assert_eq!(catalogs.len(), 4);
    for catalog in catalogs {
        assert!(catalog["file"].as_str().is_some());
        assert!(catalog["entries"].as_u64().is_some());
    }
    let sends = catalogs
        .iter()
        .find(|catalog| catalog["file"] == "sends.json")
        .expect("sends catalog should be listed");
    assert_eq!(sends["entries"], 2);

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn unknown_route_returns_404() {
    let (data, dir) = fixture_data("unknown-route");

    let response = route_request(&data, "GET", "/api/nope");
    assert_eq!(response.status_code, 404);
    assert!(response.body.contains("Route not found"));

    let post = route_request(&data, "POST", "/api/health");
    assert_eq!(post.status_code, 404);

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn http_string_carries_framing_headers() {
    let (data, dir) = fixture_data("framing");

    let response = route_request(&data, "GET", "/api/health");
    let wire = response.to_http_string();
    assert!(wire.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(wire.contains("Content-Type: application/json\r\n"));
    assert!(wire.contains(&format!("Content-Length: {}\r\n", response.body.len())));
    assert!(wire.contains("Connection: close\r\n\r\n"));

    let _ = fs::remove_dir_all(dir);
}
