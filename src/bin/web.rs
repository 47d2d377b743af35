//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! Rosters are saved under RUMMY_DATA_DIR (default `data`), one directory per browser session.

use actix_files::Files;
use actix_session::{storage::CookieSessionStore, Session, SessionMiddleware};
use actix_web::{
    cookie::Key,
    delete, get, post, put,
    web::{self, Bytes, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use rummy_tracker_web::{
    available_players, avatar_for, highest_hand_score, parse_score, parse_target,
    prune_stale_namespaces, FileBackend, GamePhase, JsonStorage, Points, RosterError, RosterState,
    RosterStore, ServerConfig, DEFAULT_TARGET_SCORE,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Names one browser's roster; kept in the session cookie.
type RosterId = Uuid;

type SessionRoster = RosterStore<JsonStorage<FileBackend>>;

/// Per-session entry: roster store + last activity time (for eviction from memory).
struct RosterEntry {
    store: SessionRoster,
    last_activity: Instant,
}

/// In-memory rosters by session. Evicted entries stay on disk and are rehydrated on next use.
///
/// The map lock is only held to find or insert an entry; each roster has its own mutex,
/// so one session's disk write never blocks another session.
struct Rosters {
    data_dir: PathBuf,
    entries: RwLock<HashMap<RosterId, Arc<Mutex<RosterEntry>>>>,
}

impl Rosters {
    fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Entry for `id`, rehydrated from disk on first use. `None` if the map lock is poisoned.
    fn entry(&self, id: RosterId) -> Option<Arc<Mutex<RosterEntry>>> {
        if let Some(entry) = self.entries.read().ok()?.get(&id) {
            return Some(entry.clone());
        }
        let opened = RosterEntry {
            store: RosterStore::open(JsonStorage::new(FileBackend::new(
                self.data_dir.join(id.to_string()),
            ))),
            last_activity: Instant::now(),
        };
        let mut g = self.entries.write().ok()?;
        // Another request may have opened it meanwhile; keep whichever got in first.
        Some(
            g.entry(id)
                .or_insert_with(|| Arc::new(Mutex::new(opened)))
                .clone(),
        )
    }
}

type AppState = Data<Rosters>;

/// Inactivity threshold: rosters not accessed for this long are dropped from memory.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

const SESSION_ROSTER_KEY: &str = "roster_id";

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Roster as sent to the page: stored state plus derived standings.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RosterView<'a> {
    #[serde(flatten)]
    roster: &'a RosterState,
    phase: GamePhase,
    winner: Option<&'a str>,
    highest_hand_score: Points,
}

impl<'a> RosterView<'a> {
    fn of(store: &'a SessionRoster) -> Self {
        Self {
            roster: store.state(),
            phase: store.phase(),
            winner: store.winner().map(|p| p.name.as_str()),
            highest_hand_score: highest_hand_score(&store.state().list),
        }
    }
}

/// A number as JSON, or as the raw text of a form field. Anything else is kept so it can be
/// rejected with the right roster error instead of a decode failure.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberInput {
    Number(Points),
    Text(String),
    Other(serde_json::Value),
}

impl NumberInput {
    fn score(&self) -> Result<Points, RosterError> {
        match self {
            NumberInput::Number(n) => Ok(*n),
            NumberInput::Text(s) => parse_score(s),
            NumberInput::Other(_) => Err(RosterError::InvalidScore),
        }
    }

    fn target(&self) -> Result<Points, RosterError> {
        match self {
            NumberInput::Number(n) if *n > 0 => Ok(*n),
            NumberInput::Text(s) => parse_target(s),
            _ => Err(RosterError::InvalidTarget),
        }
    }
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
    #[serde(default)]
    points: Option<NumberInput>,
    #[serde(default)]
    avatar: Option<String>,
}

#[derive(Deserialize)]
struct ScoreBody {
    points: NumberInput,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StartGameBody {
    #[serde(default)]
    target_score: Option<NumberInput>,
}

/// Path segment: player name (e.g. /api/roster/players/{name})
#[derive(Deserialize)]
struct PlayerPath {
    name: String,
}

fn error_response(message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": message }))
}

/// Body decode failures answer in the same `{ "error": ... }` shape as roster errors.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = error_response(&err.to_string());
        actix_web::error::InternalError::from_response(err, response).into()
    })
}

/// Target for a start request: the default only when no body was sent at all.
fn start_target(body: &[u8]) -> Result<Points, RosterError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(DEFAULT_TARGET_SCORE);
    }
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|_| RosterError::InvalidTarget)?;
    if !value.is_object() {
        return Err(RosterError::InvalidTarget);
    }
    let body: StartGameBody =
        serde_json::from_value(value).map_err(|_| RosterError::InvalidTarget)?;
    match body.target_score {
        Some(t) => t.target(),
        None => Ok(DEFAULT_TARGET_SCORE),
    }
}

/// Roster id for this browser, assigning a fresh one on first visit.
fn roster_id(session: &Session) -> Result<RosterId, HttpResponse> {
    if let Ok(Some(id)) = session.get::<RosterId>(SESSION_ROSTER_KEY) {
        return Ok(id);
    }
    let id = Uuid::new_v4();
    session
        .insert(SESSION_ROSTER_KEY, id)
        .map_err(|_| HttpResponse::InternalServerError().body("session error"))?;
    log::info!("New roster {}", id);
    Ok(id)
}

/// Run `op` against this session's roster and answer with the resulting view.
fn with_roster<F>(state: &AppState, session: &Session, op: F) -> HttpResponse
where
    F: FnOnce(&mut SessionRoster) -> Result<(), RosterError>,
{
    let id = match roster_id(session) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let shared = match state.entry(id) {
        Some(shared) => shared,
        None => return HttpResponse::InternalServerError().body("lock error"),
    };
    let mut entry = match shared.lock() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    entry.last_activity = Instant::now();
    match op(&mut entry.store) {
        Ok(()) => HttpResponse::Ok().json(RosterView::of(&entry.store)),
        Err(e) => error_response(&e.to_string()),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "rummy-tracker-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Players offered in the picker, with avatars.
#[get("/api/catalog")]
async fn api_catalog() -> HttpResponse {
    HttpResponse::Ok().json(available_players())
}

/// Current roster for this browser (rehydrated from disk if needed).
#[get("/api/roster")]
async fn api_get_roster(state: AppState, session: Session) -> HttpResponse {
    with_roster(&state, &session, |_| Ok(()))
}

/// Add a player. Without an avatar, the catalog picture (or the default) is used.
#[post("/api/roster/players")]
async fn api_add_player(state: AppState, session: Session, body: Json<AddPlayerBody>) -> HttpResponse {
    let AddPlayerBody {
        name,
        points,
        avatar,
    } = body.into_inner();
    let avatar = avatar
        .filter(|a| !a.trim().is_empty())
        .unwrap_or_else(|| avatar_for(&name).to_string());
    with_roster(&state, &session, |store| {
        let starting_points = match &points {
            Some(p) => p.score()?,
            None => 0,
        };
        store.add_player_with_avatar(&name, starting_points, Some(avatar))
    })
}

/// Remove a player by name (unknown names are ignored).
#[delete("/api/roster/players/{name}")]
async fn api_delete_player(state: AppState, session: Session, path: Path<PlayerPath>) -> HttpResponse {
    with_roster(&state, &session, |store| store.delete_player(&path.name))
}

/// Record one hand for a player.
#[post("/api/roster/players/{name}/scores")]
async fn api_record_score(
    state: AppState,
    session: Session,
    path: Path<PlayerPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    with_roster(&state, &session, |store| {
        let points = body.points.score()?;
        store.record_score(&path.name, points)
    })
}

/// Correct a player's most recent hand.
#[put("/api/roster/players/{name}/scores/last")]
async fn api_replace_last_score(
    state: AppState,
    session: Session,
    path: Path<PlayerPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    with_roster(&state, &session, |store| {
        let points = body.points.score()?;
        store.replace_last_score(&path.name, points)
    })
}

/// Start the game (setup -> in progress). An empty body means the default target of 320.
#[post("/api/roster/start")]
async fn api_start_game(state: AppState, session: Session, body: Bytes) -> HttpResponse {
    with_roster(&state, &session, |store| {
        let target = start_target(&body)?;
        store.start_game(target)
    })
}

/// Reset: empty roster, default target, saved state erased.
#[post("/api/roster/reset")]
async fn api_reset_game(state: AppState, session: Session) -> HttpResponse {
    with_roster(&state, &session, |store| {
        store.reset_game();
        Ok(())
    })
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/", web::get().to(serve_index_async))
        .service(api_health)
        .service(favicon)
        .service(api_catalog)
        .service(api_get_roster)
        .service(api_add_player)
        .service(api_delete_player)
        .service(api_record_score)
        .service(api_replace_last_score)
        .service(api_start_game)
        .service(api_reset_game)
        .service(Files::new("/static", "static"));
}

fn session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_secure(false)
        .build()
}

fn session_key(config: &ServerConfig) -> Key {
    if let Some(bytes) = config.session_key.as_deref() {
        match Key::try_from(bytes) {
            Ok(key) => return key,
            Err(e) => log::warn!("Unusable RUMMY_SESSION_KEY ({:?}), generating one", e),
        }
    } else {
        log::warn!("RUMMY_SESSION_KEY not set: sessions will not survive a restart");
    }
    Key::generate()
}

/// Drop idle rosters from memory. Returns the ids still held.
fn evict_idle(state: &Rosters) -> Option<HashSet<RosterId>> {
    let mut g = state.entries.write().ok()?;
    let before = g.len();
    g.retain(|_, entry| {
        entry
            .lock()
            .map(|e| e.last_activity.elapsed() < INACTIVITY_TIMEOUT)
            .unwrap_or(false)
    });
    let removed = before - g.len();
    if removed > 0 {
        log::info!("Evicted {} idle roster(s) from memory (no activity for 12h)", removed);
    }
    Some(g.keys().copied().collect())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let key = session_key(&config);
    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);
    log::info!("Saving rosters under {}", config.data_dir.display());

    let state = Data::new(Rosters::new(config.data_dir.clone()));

    // Background task: every 30 minutes, drop rosters idle for 12+ hours from memory and
    // delete saved rosters nobody has written to within the retention period
    let state_cleanup = state.clone();
    let retention = config.retention;
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let live = match evict_idle(&state_cleanup) {
                Some(live) => live,
                None => continue,
            };
            let data_dir = state_cleanup.data_dir.clone();
            let pruned = web::block(move || {
                // Directories that are not roster ids are not ours to delete.
                prune_stale_namespaces(&data_dir, retention, |name| {
                    Uuid::parse_str(name).map_or(true, |id| live.contains(&id))
                })
            })
            .await;
            match pruned {
                Ok(Ok(0)) => {}
                Ok(Ok(n)) => log::info!("Deleted {} saved roster(s) past retention", n),
                Ok(Err(e)) => log::warn!("Could not prune saved rosters: {}", e),
                Err(e) => log::warn!("Prune task failed: {}", e),
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .wrap(session_middleware(key.clone()))
            .app_data(state.clone())
            .configure(routes)
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
